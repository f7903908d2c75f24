#![forbid(unsafe_code)]

//! Geometric primitives in terminal cell coordinates.
//!
//! All coordinates are 0-indexed with the origin at the top-left. Arithmetic
//! saturates instead of overflowing; a rectangle with zero width or height is
//! degenerate and covers no cells.

/// A cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    #[inline]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl From<(u16, u16)> for Point {
    fn from((x, y): (u16, u16)) -> Self {
        Self::new(x, y)
    }
}

/// A width/height pair, used for minimum sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const ZERO: Size = Size::new(0, 0);

    #[inline]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Grow by the given amounts, saturating.
    #[inline]
    #[must_use]
    pub const fn expand(self, dw: u16, dh: u16) -> Self {
        Self::new(self.width.saturating_add(dw), self.height.saturating_add(dh))
    }

    /// Component-wise maximum.
    #[inline]
    #[must_use]
    pub fn max(self, other: Size) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }
}

/// A rectangle for layout bounds, clipping, and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Area in cells.
    #[inline]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// True when the rectangle covers no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle. Degenerate rectangles
    /// contain nothing.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Translate an absolute point into this rectangle's local frame.
    ///
    /// Returns `None` when the point lies outside.
    #[inline]
    pub const fn to_local(&self, x: u16, y: u16) -> Option<Point> {
        if self.contains(x, y) {
            Some(Point::new(x - self.x, y - self.y))
        } else {
            None
        }
    }

    /// Shrink by a margin on each side.
    pub fn inner(&self, margin: Sides) -> Rect {
        Rect {
            x: self.x.saturating_add(margin.left),
            y: self.y.saturating_add(margin.top),
            width: self.width.saturating_sub(margin.horizontal_sum()),
            height: self.height.saturating_sub(margin.vertical_sum()),
        }
    }

    /// Clamp the size to at most `width` x `height`, keeping the origin.
    #[must_use]
    pub fn clamp_size(&self, width: Option<u16>, height: Option<u16>) -> Rect {
        Rect {
            width: width.map_or(self.width, |w| w.min(self.width)),
            height: height.map_or(self.height, |h| h.min(self.height)),
            ..*self
        }
    }

    /// Intersection with another rectangle, or `None` if they don't overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Intersection with another rectangle; empty when there is no overlap.
    #[inline]
    pub fn intersection(&self, other: &Rect) -> Rect {
        self.intersection_opt(other).unwrap_or_default()
    }

    /// True when `other` lies entirely within `self`.
    ///
    /// Degenerate rectangles are contained anywhere.
    pub fn encloses(&self, other: &Rect) -> bool {
        other.is_empty()
            || (other.x >= self.x
                && other.y >= self.y
                && other.right() <= self.right()
                && other.bottom() <= self.bottom())
    }
}

/// Per-side amounts for padding and borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sides {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Sides {
    pub const fn all(val: u16) -> Self {
        Self::new(val, val, val, val)
    }

    /// Left and right only.
    pub const fn horizontal(val: u16) -> Self {
        Self::new(0, val, 0, val)
    }

    /// Top and bottom only.
    pub const fn vertical(val: u16) -> Self {
        Self::new(val, 0, val, 0)
    }

    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[inline]
    pub const fn horizontal_sum(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    #[inline]
    pub const fn vertical_sum(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }

    /// Side-wise saturating sum.
    #[must_use]
    pub const fn add(self, other: Sides) -> Sides {
        Sides::new(
            self.top.saturating_add(other.top),
            self.right.saturating_add(other.right),
            self.bottom.saturating_add(other.bottom),
            self.left.saturating_add(other.left),
        )
    }
}

impl From<u16> for Sides {
    fn from(val: u16) -> Self {
        Self::all(val)
    }
}

impl From<(u16, u16)> for Sides {
    fn from((vertical, horizontal): (u16, u16)) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect, Sides, Size};

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2, 3, 4, 5);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 7));
        assert!(!rect.contains(6, 3));
        assert!(!rect.contains(2, 8));
    }

    #[test]
    fn degenerate_rect_contains_nothing() {
        assert!(!Rect::new(3, 3, 0, 5).contains(3, 3));
        assert!(!Rect::new(3, 3, 5, 0).contains(3, 3));
    }

    #[test]
    fn to_local_translates() {
        let rect = Rect::new(10, 4, 5, 5);
        assert_eq!(rect.to_local(12, 6), Some(Point::new(2, 2)));
        assert_eq!(rect.to_local(9, 6), None);
    }

    #[test]
    fn inner_saturates() {
        let rect = Rect::new(0, 0, 3, 1);
        let inner = rect.inner(Sides::all(1));
        assert_eq!(inner, Rect::new(1, 1, 1, 0));
        assert!(inner.is_empty());
    }

    #[test]
    fn clamp_size_only_shrinks() {
        let rect = Rect::new(1, 1, 10, 4);
        assert_eq!(rect.clamp_size(Some(3), None), Rect::new(1, 1, 3, 4));
        assert_eq!(rect.clamp_size(Some(30), Some(2)), Rect::new(1, 1, 10, 2));
    }

    #[test]
    fn intersection_no_overlap_is_empty() {
        let a = Rect::new(0, 0, 2, 2);
        let b = Rect::new(3, 3, 2, 2);
        assert_eq!(a.intersection(&b), Rect::default());
        assert_eq!(
            Rect::new(0, 0, 4, 4).intersection(&Rect::new(2, 2, 4, 4)),
            Rect::new(2, 2, 2, 2)
        );
    }

    #[test]
    fn encloses_child() {
        let parent = Rect::new(0, 0, 10, 10);
        assert!(parent.encloses(&Rect::new(2, 2, 8, 8)));
        assert!(!parent.encloses(&Rect::new(2, 2, 9, 8)));
        assert!(parent.encloses(&Rect::new(50, 50, 0, 0)));
    }

    #[test]
    fn size_helpers() {
        assert_eq!(Size::new(3, 4).expand(2, 2), Size::new(5, 6));
        assert_eq!(Size::new(3, 9).max(Size::new(5, 1)), Size::new(5, 9));
        assert_eq!(Size::new(u16::MAX, 0).expand(1, 0).width, u16::MAX);
    }

    #[test]
    fn sides_from_tuple() {
        let sides: Sides = (1, 2).into();
        assert_eq!(sides, Sides::new(1, 2, 1, 2));
        assert_eq!(sides.add(Sides::all(1)), Sides::new(2, 3, 2, 3));
    }
}
