#![forbid(unsafe_code)]

//! Buffer positions and the selection model.

/// A position in a [`TextBuffer`](crate::TextBuffer).
///
/// `col` counts code points, not screen columns. Ordering is by row, then
/// column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Pos {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// Order two positions.
#[inline]
pub fn ordered(a: Pos, b: Pos) -> (Pos, Pos) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Whether `pos` lies inside the half-open span `[start, end)`.
///
/// Rows strictly between the endpoints are fully inside; on the boundary
/// rows only the covered columns are.
pub fn span_contains(start: Pos, end: Pos, pos: Pos) -> bool {
    let (start, end) = ordered(start, end);
    if pos.row < start.row || pos.row > end.row {
        return false;
    }
    if start.row == end.row {
        return start.col <= pos.col && pos.col < end.col;
    }
    if pos.row == start.row {
        pos.col >= start.col
    } else if pos.row == end.row {
        pos.col < end.col
    } else {
        true
    }
}

/// Selection anchor plus an explicit active flag.
///
/// The moving end of a selection is the editor's cursor. Whether a selection
/// exists is recorded in `active`; an active selection may be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    pub anchor: Pos,
    pub active: bool,
}

impl Selection {
    #[must_use]
    pub const fn inactive() -> Self {
        Self {
            anchor: Pos::new(0, 0),
            active: false,
        }
    }

    #[must_use]
    pub const fn at(anchor: Pos) -> Self {
        Self {
            anchor,
            active: true,
        }
    }

    /// Normalized `(start, end)` given the cursor, or `None` when inactive.
    #[must_use]
    pub fn range(&self, cursor: Pos) -> Option<(Pos, Pos)> {
        self.active.then(|| ordered(self.anchor, cursor))
    }

    /// Active and covering at least one code point or line break.
    #[must_use]
    pub fn is_nonempty(&self, cursor: Pos) -> bool {
        self.active && self.anchor != cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_row_major() {
        assert!(Pos::new(0, 9) < Pos::new(1, 0));
        assert!(Pos::new(2, 1) < Pos::new(2, 3));
        assert_eq!(ordered(Pos::new(3, 0), Pos::new(1, 5)), (Pos::new(1, 5), Pos::new(3, 0)));
    }

    #[test]
    fn single_row_span() {
        let (s, e) = (Pos::new(1, 2), Pos::new(1, 5));
        assert!(!span_contains(s, e, Pos::new(1, 1)));
        assert!(span_contains(s, e, Pos::new(1, 2)));
        assert!(span_contains(s, e, Pos::new(1, 4)));
        assert!(!span_contains(s, e, Pos::new(1, 5)));
        assert!(!span_contains(s, e, Pos::new(0, 3)));
    }

    #[test]
    fn multi_row_span() {
        let (s, e) = (Pos::new(1, 4), Pos::new(3, 2));
        assert!(!span_contains(s, e, Pos::new(1, 3)));
        assert!(span_contains(s, e, Pos::new(1, 4)));
        assert!(span_contains(s, e, Pos::new(1, 400)));
        assert!(span_contains(s, e, Pos::new(2, 0)));
        assert!(span_contains(s, e, Pos::new(3, 1)));
        assert!(!span_contains(s, e, Pos::new(3, 2)));
        assert!(span_contains(e, s, Pos::new(2, 7)));
    }

    #[test]
    fn selection_flag_not_inferred() {
        let cursor = Pos::new(0, 3);
        let sel = Selection::at(cursor);
        assert_eq!(sel.range(cursor), Some((cursor, cursor)));
        assert!(!sel.is_nonempty(cursor));
        assert_eq!(Selection::inactive().range(cursor), None);
    }
}
