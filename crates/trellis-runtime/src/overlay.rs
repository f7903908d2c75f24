#![forbid(unsafe_code)]

//! Transient overlays.
//!
//! An overlay is one element drawn above the root at its minimum size,
//! positioned inside the screen by a [`Placement`]. It remembers the focus
//! it displaced so dismissing it can put focus back.

use std::rc::Rc;

use trellis_core::geometry::Rect;
use trellis_layout::Placement;
use trellis_widgets::{ElementExt, ElementRef, LayoutNode};

/// An open overlay.
pub struct Overlay {
    element: ElementRef,
    placement: Placement,
    prior_focus: Option<ElementRef>,
}

impl std::fmt::Debug for Overlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Overlay")
            .field("placement", &self.placement)
            .field("has_prior_focus", &self.prior_focus.is_some())
            .finish_non_exhaustive()
    }
}

impl Overlay {
    pub fn new(element: ElementRef, placement: Placement, prior_focus: Option<ElementRef>) -> Self {
        Self {
            element,
            placement,
            prior_focus,
        }
    }

    pub fn element(&self) -> &ElementRef {
        &self.element
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Focus to restore on dismissal.
    pub fn prior_focus(&self) -> Option<&ElementRef> {
        self.prior_focus.as_ref()
    }

    pub fn into_prior_focus(self) -> Option<ElementRef> {
        self.prior_focus
    }

    /// Where the overlay sits inside `bounds`.
    pub fn area(&self, bounds: Rect) -> Rect {
        self.placement.place(bounds, self.element.min_size())
    }

    pub fn layout(&self, bounds: Rect) -> LayoutNode {
        self.element.layout(self.area(bounds))
    }

    /// Whether `element` is part of the overlay's tree.
    ///
    /// Laid out at least at its minimum size so descendants that would be
    /// squeezed out of a small screen still count.
    pub fn contains(&self, element: &ElementRef, bounds: Rect) -> bool {
        let size = bounds.size().max(self.element.min_size());
        LayoutNode::new(Rc::clone(&self.element), Rect::from_size(size.width, size.height))
            .contains(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::geometry::Size;
    use trellis_widgets::{Decorate, IntoElement, Spacer, Stack};

    #[test]
    fn placed_at_min_size() {
        let el = Spacer::new().frame(Some(6), Some(2)).border();
        let overlay = Overlay::new(el, Placement::Center, None);
        assert_eq!(overlay.area(Rect::new(0, 0, 20, 10)), Rect::new(6, 3, 8, 4));
        assert_eq!(overlay.area(Rect::new(0, 0, 4, 2)).size(), Size::new(4, 2));
    }

    #[test]
    fn contains_descendants() {
        let inner = Spacer::new().into_element();
        let el = Stack::vertical()
            .child(Rc::clone(&inner))
            .into_element();
        let overlay = Overlay::new(el, Placement::Top, None);
        assert!(overlay.contains(&inner, Rect::new(0, 0, 10, 5)));
        assert!(!overlay.contains(&Spacer::new().into_element(), Rect::new(0, 0, 10, 5)));
    }
}
