#![forbid(unsafe_code)]

//! The element capability model.
//!
//! Every node in the UI tree implements [`Element`]: it reports a minimum
//! size, lays out its children for a rect, and draws itself. Interaction is
//! opt-in through small capability traits, discovered at runtime with the
//! `as_*` queries rather than declared in the type:
//!
//! | Capability | Query | Used by |
//! |---|---|---|
//! | [`Hoverable`] | `as_hoverable` | mouse enter/leave/move |
//! | [`Clickable`] | `as_clickable` | press and click |
//! | [`Scrollable`] | `as_scrollable` | wheel |
//! | [`FocusTarget`] | `as_focus_target` | focus delegation |
//! | [`Focusable`] | `as_focusable` | focus/blur notification |
//! | [`KeyHandler`] | `as_key_handler` | keys and paste |
//! | [`Oriented`] | `as_oriented` | stacks orienting dividers |
//!
//! Elements are shared as [`ElementRef`] (`Rc<dyn Element>`) and keep their
//! mutable state behind `Cell`/`RefCell`; the whole tree lives on one thread.

use std::ptr;
use std::rc::Rc;

use trellis_core::event::{KeyEvent, MouseEvent};
use trellis_core::geometry::{Point, Rect, Size};
use trellis_layout::Direction;
use trellis_render::Frame;
use trellis_style::Style;

use crate::decorate::Decorated;
use crate::node::LayoutNode;

/// Shared handle to an element.
pub type ElementRef = Rc<dyn Element>;

/// A composable node of the UI tree.
pub trait Element {
    /// Smallest size at which the element can draw meaningfully.
    fn min_size(&self) -> Size;

    /// Child nodes for `area`. Leaves have none.
    fn layout_children(&self, _area: Rect) -> Vec<LayoutNode> {
        Vec::new()
    }

    /// Draw into `area`. Children are drawn afterwards by the node.
    fn draw(&self, _area: Rect, _frame: &mut Frame) {}

    /// Style contribution inherited by this element and its descendants.
    fn style(&self) -> Style {
        Style::new()
    }

    /// Share of leftover space in a stack; zero keeps the minimum size.
    fn grow_weight(&self) -> u16 {
        0
    }

    fn as_hoverable(&self) -> Option<&dyn Hoverable> {
        None
    }

    fn as_clickable(&self) -> Option<&dyn Clickable> {
        None
    }

    fn as_scrollable(&self) -> Option<&dyn Scrollable> {
        None
    }

    fn as_focus_target(&self) -> Option<&dyn FocusTarget> {
        None
    }

    fn as_focusable(&self) -> Option<&dyn Focusable> {
        None
    }

    fn as_key_handler(&self) -> Option<&dyn KeyHandler> {
        None
    }

    fn as_oriented(&self) -> Option<&dyn Oriented> {
        None
    }

    fn as_decorated(&self) -> Option<&Decorated> {
        None
    }
}

/// Mouse hover notifications. Points are local to the element's rect.
pub trait Hoverable {
    fn on_enter(&self, _local: Point, _event: &MouseEvent) {}
    fn on_leave(&self) {}
    /// Every mouse event while the pointer stays over the element,
    /// including drags.
    fn on_move(&self, _local: Point, _event: &MouseEvent) {}
}

/// Primary-button press and matching release.
pub trait Clickable {
    fn on_press(&self, _local: Point, _event: &MouseEvent) {}
    /// Release at exactly the press coordinates on the same element.
    fn on_click(&self, local: Point, event: &MouseEvent);
}

/// Mouse wheel.
pub trait Scrollable {
    /// `delta` is -1 for up/left and +1 for down/right.
    fn on_scroll(&self, delta: i32, local: Point);
}

/// Focus delegation.
///
/// When focus is assigned to an element with this capability, it moves on
/// to the returned element. Returning `None` or the element itself keeps
/// focus here.
pub trait FocusTarget {
    fn focus_target(&self) -> Option<ElementRef>;
}

/// Focus transfer notifications.
pub trait Focusable {
    fn on_focus(&self);
    fn on_blur(&self);
    fn is_focused(&self) -> bool {
        false
    }
}

/// Keyboard input for the focused element.
pub trait KeyHandler {
    /// Returns `true` if the key was consumed.
    fn handle_key(&self, key: &KeyEvent) -> bool;

    /// Returns `true` if the paste was consumed.
    fn handle_paste(&self, _text: &str) -> bool {
        false
    }
}

/// Elements whose look depends on the axis of their parent stack.
pub trait Oriented {
    fn set_axis(&self, axis: Direction);
}

/// Identity comparison for shared elements (data pointer only).
#[inline]
pub fn same_element(a: &ElementRef, b: &ElementRef) -> bool {
    ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// The element under any decorator layers. A decorator forwards hover,
/// focus, and keys to this element, so it is the identity those interactions
/// belong to.
pub fn undecorated(element: &ElementRef) -> ElementRef {
    let mut current = Rc::clone(element);
    while let Some(child) = current.as_decorated().map(|d| Rc::clone(d.child())) {
        current = child;
    }
    current
}

/// Conversion into a shared element handle.
pub trait IntoElement {
    fn into_element(self) -> ElementRef;
}

impl<E: Element + 'static> IntoElement for E {
    fn into_element(self) -> ElementRef {
        Rc::new(self)
    }
}

impl<E: Element + 'static> IntoElement for Rc<E> {
    fn into_element(self) -> ElementRef {
        self
    }
}

impl IntoElement for ElementRef {
    fn into_element(self) -> ElementRef {
        self
    }
}

/// Layout entry point for shared elements.
pub trait ElementExt {
    /// Build the node tree for this element placed at `area`.
    fn layout(&self, area: Rect) -> LayoutNode;
}

impl ElementExt for ElementRef {
    fn layout(&self, area: Rect) -> LayoutNode {
        LayoutNode::new(Rc::clone(self), area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Spacer;

    #[test]
    fn identity_ignores_vtable() {
        let a: ElementRef = Spacer::new().into_element();
        let b = Rc::clone(&a);
        let c: ElementRef = Spacer::new().into_element();
        assert!(same_element(&a, &b));
        assert!(!same_element(&a, &c));
    }

    #[test]
    fn typed_handle_converts() {
        let typed = Rc::new(Spacer::new());
        let shared = Rc::clone(&typed).into_element();
        assert!(ptr::addr_eq(Rc::as_ptr(&typed), Rc::as_ptr(&shared)));
        assert_eq!(shared.grow_weight(), 1);
    }
}
