#![forbid(unsafe_code)]

//! Layout solvers.
//!
//! - [`Flex`]: one-dimensional space distribution for stacks, driven by each
//!   child's minimum extent and grow weight.
//! - [`Placement`]: positions a box of known size inside an area (used for
//!   overlays).
//!
//! # Distribution
//!
//! [`Flex::split`] runs two passes over the items:
//!
//! 1. Sum the minimum extents of the non-growing items and total the grow
//!    weights of the growing ones.
//! 2. `leftover = available - sum - spacing` (saturating at zero) is handed
//!    to growing items in proportion to their weight, each share rounded up,
//!    with the running total capped at `leftover`. Items are then placed in
//!    order; an item that would overrun the remaining length is clipped.
//!
//! ```
//! use trellis_layout::{Flex, Item};
//! use trellis_core::geometry::Rect;
//!
//! let rects = Flex::horizontal()
//!     .spacing(1)
//!     .split(Rect::new(0, 0, 20, 3), &[Item::fixed(4), Item::grow(1), Item::fixed(5)]);
//! assert_eq!(rects[0], Rect::new(0, 0, 4, 3));
//! assert_eq!(rects[1], Rect::new(5, 0, 9, 3));
//! assert_eq!(rects[2], Rect::new(15, 0, 5, 3));
//! ```

pub use trellis_core::geometry::{Rect, Sides, Size};

/// Main axis of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Top to bottom.
    #[default]
    Vertical,
    /// Left to right.
    Horizontal,
}

impl Direction {
    /// Extent of `size` along this axis.
    #[inline]
    pub const fn main(self, size: Size) -> u16 {
        match self {
            Direction::Vertical => size.height,
            Direction::Horizontal => size.width,
        }
    }

    /// Extent of `size` across this axis.
    #[inline]
    pub const fn cross(self, size: Size) -> u16 {
        match self {
            Direction::Vertical => size.width,
            Direction::Horizontal => size.height,
        }
    }

    /// Build a size from main/cross extents.
    #[inline]
    pub const fn size(self, main: u16, cross: u16) -> Size {
        match self {
            Direction::Vertical => Size::new(cross, main),
            Direction::Horizontal => Size::new(main, cross),
        }
    }
}

/// One child's sizing input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Item {
    /// Minimum main-axis extent. Only consulted for non-growing items.
    pub min: u16,
    /// Share of leftover space. Zero means "don't grow".
    pub grow: u16,
}

impl Item {
    pub const fn new(min: u16, grow: u16) -> Self {
        Self { min, grow }
    }

    /// Non-growing item of exactly `min` cells (space permitting).
    pub const fn fixed(min: u16) -> Self {
        Self::new(min, 0)
    }

    /// Growing item with the given weight.
    pub const fn grow(weight: u16) -> Self {
        Self::new(0, weight)
    }

    #[inline]
    pub const fn is_growing(&self) -> bool {
        self.grow > 0
    }
}

/// One-dimensional stack solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flex {
    direction: Direction,
    spacing: u16,
}

impl Flex {
    #[must_use]
    pub const fn vertical() -> Self {
        Self {
            direction: Direction::Vertical,
            spacing: 0,
        }
    }

    #[must_use]
    pub const fn horizontal() -> Self {
        Self {
            direction: Direction::Horizontal,
            spacing: 0,
        }
    }

    #[must_use]
    pub const fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Cells between adjacent items.
    #[must_use]
    pub const fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    #[inline]
    pub const fn axis(&self) -> Direction {
        self.direction
    }

    /// Total spacing for `count` items.
    fn total_spacing(&self, count: usize) -> u16 {
        let gaps = count.saturating_sub(1) as u64;
        (gaps * self.spacing as u64).min(u16::MAX as u64) as u16
    }

    /// Minimum size of a stack whose children have the given minimum sizes:
    /// main axis is the sum plus spacing, cross axis is the maximum.
    pub fn min_size(&self, children: &[Size]) -> Size {
        let main = children
            .iter()
            .fold(0u16, |acc, s| acc.saturating_add(self.direction.main(*s)))
            .saturating_add(self.total_spacing(children.len()));
        let cross = children
            .iter()
            .map(|s| self.direction.cross(*s))
            .max()
            .unwrap_or(0);
        self.direction.size(main, cross)
    }

    /// Main-axis extents for each item, before placement clipping.
    pub fn extents(&self, available: u16, items: &[Item]) -> Vec<u16> {
        // Pass 1
        let mut fixed_sum: u16 = 0;
        let mut total_weight: u64 = 0;
        for item in items {
            if item.is_growing() {
                total_weight += item.grow as u64;
            } else {
                fixed_sum = fixed_sum.saturating_add(item.min);
            }
        }

        // Pass 2
        let leftover = available
            .saturating_sub(fixed_sum)
            .saturating_sub(self.total_spacing(items.len()));
        let mut granted: u16 = 0;
        items
            .iter()
            .map(|item| {
                if !item.is_growing() {
                    return item.min;
                }
                let share = (leftover as u64 * item.grow as u64).div_ceil(total_weight) as u16;
                let share = share.min(leftover - granted);
                granted += share;
                share
            })
            .collect()
    }

    /// Split `area` into one rect per item, in order.
    ///
    /// Cross-axis extent always fills `area`. Items that end up with zero
    /// extent (nothing granted, or no room left) get an empty rect at the
    /// position where they would have started.
    pub fn split(&self, area: Rect, items: &[Item]) -> Vec<Rect> {
        let available = self.direction.main(area.size());
        let extents = self.extents(available, items);

        let mut offset: u16 = 0;
        let mut rects = Vec::with_capacity(items.len());
        for (i, extent) in extents.into_iter().enumerate() {
            let remaining = available.saturating_sub(offset);
            let len = extent.min(remaining);
            rects.push(self.rect_at(area, offset, len));
            offset = offset.saturating_add(len);
            if i + 1 < items.len() {
                offset = offset.saturating_add(self.spacing).min(available);
            }
        }
        rects
    }

    fn rect_at(&self, area: Rect, offset: u16, len: u16) -> Rect {
        match self.direction {
            Direction::Vertical => {
                Rect::new(area.x, area.y.saturating_add(offset), area.width, len)
            }
            Direction::Horizontal => {
                Rect::new(area.x.saturating_add(offset), area.y, len, area.height)
            }
        }
    }
}

/// Where to put a box inside an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Placement {
    #[default]
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Placement {
    /// Position a box of `size` (clamped to `area`) inside `area`.
    pub fn place(self, area: Rect, size: Size) -> Rect {
        let w = size.width.min(area.width);
        let h = size.height.min(area.height);
        let free_x = area.width - w;
        let free_y = area.height - h;

        let (dx, dy) = match self {
            Placement::Center => (free_x / 2, free_y / 2),
            Placement::Top => (free_x / 2, 0),
            Placement::Bottom => (free_x / 2, free_y),
            Placement::Left => (0, free_y / 2),
            Placement::Right => (free_x, free_y / 2),
            Placement::TopLeft => (0, 0),
            Placement::TopRight => (free_x, 0),
            Placement::BottomLeft => (0, free_y),
            Placement::BottomRight => (free_x, free_y),
        };
        Rect::new(area.x.saturating_add(dx), area.y.saturating_add(dy), w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_split() {
        let rects =
            Flex::horizontal().split(Rect::new(0, 0, 100, 10), &[Item::fixed(10), Item::fixed(20)]);
        assert_eq!(rects, vec![Rect::new(0, 0, 10, 10), Rect::new(10, 0, 20, 10)]);
    }

    #[test]
    fn spacing_handling() {
        let rects = Flex::horizontal()
            .spacing(5)
            .split(Rect::new(0, 0, 100, 10), &[Item::fixed(10), Item::fixed(10)]);
        assert_eq!(rects[0], Rect::new(0, 0, 10, 10));
        assert_eq!(rects[1], Rect::new(15, 0, 10, 10));
    }

    #[test]
    fn grow_shares_by_weight() {
        let flex = Flex::vertical();
        assert_eq!(flex.extents(10, &[Item::grow(1), Item::grow(1)]), vec![5, 5]);
        assert_eq!(
            flex.extents(12, &[Item::fixed(3), Item::grow(1), Item::grow(2)]),
            vec![3, 3, 6]
        );
    }

    #[test]
    fn ceiling_rounding_is_capped() {
        // 10 / 3 rounds up to 4 each; the last grower gets what is left.
        let flex = Flex::horizontal();
        assert_eq!(flex.extents(10, &[Item::grow(1), Item::grow(1), Item::grow(1)]), vec![4, 4, 2]);
    }

    #[test]
    fn grower_min_is_not_added_to_share() {
        let flex = Flex::horizontal();
        assert_eq!(flex.extents(10, &[Item::new(4, 1), Item::fixed(6)]), vec![4, 6]);
        assert_eq!(flex.extents(8, &[Item::new(4, 1), Item::fixed(6)]), vec![2, 6]);
    }

    #[test]
    fn leftover_saturates_at_zero() {
        let flex = Flex::horizontal().spacing(2);
        assert_eq!(
            flex.extents(5, &[Item::fixed(4), Item::grow(1), Item::fixed(4)]),
            vec![4, 0, 4]
        );
    }

    #[test]
    fn overflow_is_clipped_in_order() {
        let rects = Flex::horizontal()
            .spacing(1)
            .split(Rect::new(0, 0, 6, 1), &[Item::fixed(4), Item::fixed(4), Item::fixed(4)]);
        assert_eq!(rects[0], Rect::new(0, 0, 4, 1));
        assert_eq!(rects[1], Rect::new(5, 0, 1, 1));
        assert!(rects[2].is_empty());
    }

    #[test]
    fn cross_axis_fills() {
        let rects = Flex::vertical().split(Rect::new(2, 3, 7, 10), &[Item::fixed(2)]);
        assert_eq!(rects, vec![Rect::new(2, 3, 7, 2)]);
    }

    #[test]
    fn empty_items_and_empty_area() {
        assert!(Flex::vertical().split(Rect::new(0, 0, 5, 5), &[]).is_empty());
        let rects = Flex::vertical().split(Rect::new(0, 0, 5, 0), &[Item::grow(1)]);
        assert!(rects[0].is_empty());
    }

    #[test]
    fn min_size_sums_main_and_maxes_cross() {
        let flex = Flex::horizontal().spacing(1);
        assert_eq!(flex.min_size(&[Size::new(3, 1), Size::new(4, 5)]), Size::new(8, 5));
        assert_eq!(Flex::vertical().min_size(&[]), Size::ZERO);
    }

    #[test]
    fn placement_positions() {
        let area = Rect::new(10, 10, 20, 10);
        let size = Size::new(6, 4);
        assert_eq!(Placement::Center.place(area, size), Rect::new(17, 13, 6, 4));
        assert_eq!(Placement::TopLeft.place(area, size), Rect::new(10, 10, 6, 4));
        assert_eq!(Placement::BottomRight.place(area, size), Rect::new(24, 16, 6, 4));
        assert_eq!(Placement::Top.place(area, size), Rect::new(17, 10, 6, 4));
        assert_eq!(Placement::Center.place(area, Size::new(50, 50)), area);
    }
}
