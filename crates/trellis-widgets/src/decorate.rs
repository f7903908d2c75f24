#![forbid(unsafe_code)]

//! Layout decorators.
//!
//! Grow weight, padding, border, forced frame size, and style all live in
//! one [`Decorated`] value around a single child. Decorating an element that
//! is already decorated updates that value instead of nesting another
//! wrapper, so `.pad(1).pad(2)` means padding 2.
//!
//! The decorator is transparent to interaction: focus delegation, hover,
//! focus/blur, and key handling all reach the child.
//!
//! ```
//! use trellis_core::geometry::{Rect, Size};
//! use trellis_widgets::{Decorate, Element, ElementExt, Spacer};
//!
//! let boxed = Spacer::new().border().pad(1).frame(Some(10), None);
//! assert_eq!(boxed.min_size(), Size::new(14, 4));
//! let node = boxed.layout(Rect::new(0, 0, 30, 8));
//! assert_eq!(node.children[0].area, Rect::new(2, 2, 10, 4));
//! ```

use std::rc::Rc;

use trellis_core::event::MouseEvent;
use trellis_core::geometry::{Point, Rect, Sides, Size};
use trellis_render::{BorderChars, Frame};
use trellis_style::Style;

use crate::element::{
    Element, ElementExt, ElementRef, FocusTarget, Focusable, Hoverable, IntoElement, KeyHandler,
};
use crate::node::LayoutNode;

/// One child plus optional layout parameters.
#[derive(Clone)]
pub struct Decorated {
    child: ElementRef,
    grow: Option<u16>,
    padding: Sides,
    border: Option<BorderChars>,
    frame_width: Option<u16>,
    frame_height: Option<u16>,
    style: Option<Style>,
}

impl std::fmt::Debug for Decorated {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decorated")
            .field("grow", &self.grow)
            .field("padding", &self.padding)
            .field("border", &self.border)
            .field("frame", &(self.frame_width, self.frame_height))
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl Decorated {
    /// Start decorating `element`, reusing its decoration if it already has
    /// one.
    pub fn wrap(element: ElementRef) -> Self {
        match element.as_decorated() {
            Some(existing) => existing.clone(),
            None => Self {
                child: element,
                grow: None,
                padding: Sides::default(),
                border: None,
                frame_width: None,
                frame_height: None,
                style: None,
            },
        }
    }

    pub fn child(&self) -> &ElementRef {
        &self.child
    }

    #[must_use]
    pub fn with_grow(mut self, weight: u16) -> Self {
        self.grow = Some(weight);
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Sides) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_border(mut self, chars: BorderChars) -> Self {
        self.border = Some(chars);
        self
    }

    #[must_use]
    pub fn with_frame(mut self, width: Option<u16>, height: Option<u16>) -> Self {
        if width.is_some() {
            self.frame_width = width;
        }
        if height.is_some() {
            self.frame_height = height;
        }
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Space taken by border and padding.
    fn chrome(&self) -> Sides {
        let border = if self.border.is_some() {
            Sides::all(1)
        } else {
            Sides::default()
        };
        border.add(self.padding)
    }

    /// Rect handed to the child.
    pub fn inner(&self, area: Rect) -> Rect {
        area.inner(self.chrome())
            .clamp_size(self.frame_width, self.frame_height)
    }

    fn child_local(&self, local: Point) -> Point {
        let chrome = self.chrome();
        Point::new(
            local.x.saturating_sub(chrome.left),
            local.y.saturating_sub(chrome.top),
        )
    }
}

impl Element for Decorated {
    fn min_size(&self) -> Size {
        let child = self.child.min_size();
        let width = self.frame_width.unwrap_or(child.width);
        let height = self.frame_height.unwrap_or(child.height);
        let chrome = self.chrome();
        Size::new(width, height).expand(chrome.horizontal_sum(), chrome.vertical_sum())
    }

    fn layout_children(&self, area: Rect) -> Vec<LayoutNode> {
        let inner = self.inner(area);
        if inner.is_empty() {
            return Vec::new();
        }
        vec![self.child.layout(inner)]
    }

    fn draw(&self, area: Rect, frame: &mut Frame) {
        if self.style.is_some() {
            frame.fill(area, Style::new());
        }
        if let Some(chars) = self.border {
            let focused = self
                .child
                .as_focusable()
                .is_some_and(|f| f.is_focused());
            let style = if focused {
                frame.theme().border_focused
            } else {
                frame.theme().border
            };
            frame.draw_border(area, chars, style);
        }
    }

    fn style(&self) -> Style {
        self.style.unwrap_or_default()
    }

    fn grow_weight(&self) -> u16 {
        self.grow.unwrap_or_else(|| self.child.grow_weight())
    }

    fn as_hoverable(&self) -> Option<&dyn Hoverable> {
        self.child.as_hoverable().map(|_| self as &dyn Hoverable)
    }

    fn as_focus_target(&self) -> Option<&dyn FocusTarget> {
        Some(self)
    }

    fn as_focusable(&self) -> Option<&dyn Focusable> {
        self.child.as_focusable().map(|_| self as &dyn Focusable)
    }

    fn as_key_handler(&self) -> Option<&dyn KeyHandler> {
        self.child.as_key_handler().map(|_| self as &dyn KeyHandler)
    }

    fn as_decorated(&self) -> Option<&Decorated> {
        Some(self)
    }
}

impl FocusTarget for Decorated {
    fn focus_target(&self) -> Option<ElementRef> {
        Some(Rc::clone(&self.child))
    }
}

impl Hoverable for Decorated {
    fn on_enter(&self, local: Point, event: &MouseEvent) {
        if let Some(h) = self.child.as_hoverable() {
            h.on_enter(self.child_local(local), event);
        }
    }

    fn on_leave(&self) {
        if let Some(h) = self.child.as_hoverable() {
            h.on_leave();
        }
    }

    fn on_move(&self, local: Point, event: &MouseEvent) {
        if let Some(h) = self.child.as_hoverable() {
            h.on_move(self.child_local(local), event);
        }
    }
}

impl Focusable for Decorated {
    fn on_focus(&self) {
        if let Some(f) = self.child.as_focusable() {
            f.on_focus();
        }
    }

    fn on_blur(&self) {
        if let Some(f) = self.child.as_focusable() {
            f.on_blur();
        }
    }

    fn is_focused(&self) -> bool {
        self.child.as_focusable().is_some_and(|f| f.is_focused())
    }
}

impl KeyHandler for Decorated {
    fn handle_key(&self, key: &trellis_core::event::KeyEvent) -> bool {
        self.child
            .as_key_handler()
            .is_some_and(|k| k.handle_key(key))
    }

    fn handle_paste(&self, text: &str) -> bool {
        self.child
            .as_key_handler()
            .is_some_and(|k| k.handle_paste(text))
    }
}

/// Fluent decoration for anything convertible into an element.
pub trait Decorate: IntoElement + Sized {
    /// Stack grow weight.
    fn grow(self, weight: u16) -> ElementRef {
        Decorated::wrap(self.into_element())
            .with_grow(weight)
            .into_element()
    }

    /// Inner padding.
    fn pad(self, padding: impl Into<Sides>) -> ElementRef {
        Decorated::wrap(self.into_element())
            .with_padding(padding.into())
            .into_element()
    }

    /// One-cell square border.
    fn border(self) -> ElementRef {
        self.border_with(BorderChars::SQUARE)
    }

    fn border_with(self, chars: BorderChars) -> ElementRef {
        Decorated::wrap(self.into_element())
            .with_border(chars)
            .into_element()
    }

    /// Force the content size on either axis.
    fn frame(self, width: Option<u16>, height: Option<u16>) -> ElementRef {
        Decorated::wrap(self.into_element())
            .with_frame(width, height)
            .into_element()
    }

    /// Inherited style; a background fills the whole rect.
    fn styled(self, style: Style) -> ElementRef {
        Decorated::wrap(self.into_element())
            .with_style(style)
            .into_element()
    }
}

impl<T: IntoElement> Decorate for T {}
