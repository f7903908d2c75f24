#![forbid(unsafe_code)]

//! Vertical and horizontal stacks.
//!
//! A [`Stack`] distributes its main axis with [`Flex`]: non-growing children
//! get their minimum extent, growing children share what is left by weight.
//! Every child spans the full cross axis. Children left with no room are
//! omitted from the layout tree.
//!
//! ```
//! use trellis_core::geometry::Rect;
//! use trellis_widgets::{Decorate, Divider, ElementExt, IntoElement, Spacer, Stack};
//!
//! let stack = Stack::vertical()
//!     .child(Spacer::new().frame(None, Some(2)).grow(0))
//!     .child(Divider::new())
//!     .child(Spacer::new())
//!     .into_element();
//! let node = stack.layout(Rect::new(0, 0, 10, 10));
//! let heights: Vec<u16> = node.children.iter().map(|c| c.area.height).collect();
//! assert_eq!(heights, vec![2, 1, 7]);
//! ```

use trellis_core::geometry::{Rect, Size};
use trellis_layout::{Direction, Flex, Item};
use trellis_style::Style;

use crate::element::{Element, ElementExt, ElementRef, IntoElement};
use crate::node::LayoutNode;

/// Children laid out along one axis.
pub struct Stack {
    flex: Flex,
    children: Vec<ElementRef>,
    style: Style,
}

impl std::fmt::Debug for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stack")
            .field("flex", &self.flex)
            .field("children", &self.children.len())
            .finish()
    }
}

impl Stack {
    /// Children top to bottom.
    #[must_use]
    pub fn vertical() -> Self {
        Self::new(Direction::Vertical)
    }

    /// Children left to right.
    #[must_use]
    pub fn horizontal() -> Self {
        Self::new(Direction::Horizontal)
    }

    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            flex: Flex::vertical().direction(direction),
            children: Vec::new(),
            style: Style::new(),
        }
    }

    /// Append a child. Dividers and other oriented children learn the
    /// stack's axis here.
    #[must_use]
    pub fn child(mut self, child: impl IntoElement) -> Self {
        self.push(child);
        self
    }

    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = ElementRef>) -> Self {
        for child in children {
            self.push(child);
        }
        self
    }

    pub fn push(&mut self, child: impl IntoElement) {
        let child = child.into_element();
        if let Some(oriented) = child.as_oriented() {
            oriented.set_axis(self.flex.axis());
        }
        self.children.push(child);
    }

    /// Cells between adjacent children.
    #[must_use]
    pub fn spacing(mut self, spacing: u16) -> Self {
        self.flex = self.flex.spacing(spacing);
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn direction(&self) -> Direction {
        self.flex.axis()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn items(&self) -> Vec<Item> {
        let axis = self.flex.axis();
        self.children
            .iter()
            .map(|c| Item::new(axis.main(c.min_size()), c.grow_weight()))
            .collect()
    }
}

impl Element for Stack {
    fn min_size(&self) -> Size {
        let sizes: Vec<Size> = self.children.iter().map(|c| c.min_size()).collect();
        self.flex.min_size(&sizes)
    }

    fn layout_children(&self, area: Rect) -> Vec<LayoutNode> {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!(
            "stack_layout",
            children = self.children.len(),
            w = area.width,
            h = area.height
        )
        .entered();

        let rects = self.flex.split(area, &self.items());
        self.children
            .iter()
            .zip(rects)
            .filter(|(_, rect)| !rect.is_empty())
            .map(|(child, rect)| child.layout(rect))
            .collect()
    }

    fn style(&self) -> Style {
        self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Decorate, Divider, Spacer};
    use trellis_core::geometry::Size;

    struct Fixed(Size);

    impl Element for Fixed {
        fn min_size(&self) -> Size {
            self.0
        }
    }

    #[test]
    fn min_size_sums_main_and_maxes_cross() {
        let stack = Stack::horizontal()
            .spacing(1)
            .child(Fixed(Size::new(3, 2)))
            .child(Fixed(Size::new(4, 5)));
        assert_eq!(stack.min_size(), Size::new(8, 5));
    }

    #[test]
    fn growers_share_leftover() {
        let stack = Stack::horizontal()
            .child(Fixed(Size::new(4, 1)))
            .child(Spacer::new().grow(1))
            .child(Spacer::new().grow(3))
            .into_element();
        let node = stack.layout(Rect::new(0, 0, 20, 2));
        let widths: Vec<u16> = node.children.iter().map(|c| c.area.width).collect();
        assert_eq!(widths, vec![4, 4, 12]);
        assert!(node.children.iter().all(|c| c.area.height == 2));
    }

    #[test]
    fn zero_extent_children_are_omitted() {
        let stack = Stack::vertical()
            .child(Fixed(Size::new(1, 0)))
            .child(Fixed(Size::new(1, 3)))
            .child(Fixed(Size::new(1, 3)))
            .into_element();
        let node = stack.layout(Rect::new(0, 0, 5, 4));
        let rects: Vec<Rect> = node.children.iter().map(|c| c.area).collect();
        assert_eq!(rects, vec![Rect::new(0, 0, 5, 3), Rect::new(0, 3, 5, 1)]);
    }

    #[test]
    fn divider_is_oriented_by_stack() {
        let v = Stack::vertical().child(Divider::new());
        assert_eq!(v.min_size(), Size::new(0, 1));
        let h = Stack::horizontal().child(Divider::new());
        assert_eq!(h.min_size(), Size::new(1, 0));
    }

    #[test]
    fn nested_stacks_fill_cross_axis() {
        let inner = Stack::horizontal().child(Spacer::new()).child(Spacer::new());
        let outer = Stack::vertical().child(inner.grow(1)).into_element();
        let node = outer.layout(Rect::new(0, 0, 10, 4));
        let inner_node = &node.children[0];
        assert_eq!(inner_node.area, Rect::new(0, 0, 10, 4));
        assert_eq!(inner_node.children[0].children.len(), 2);
    }
}
