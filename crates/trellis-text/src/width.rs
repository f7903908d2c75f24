#![forbid(unsafe_code)]

//! Code-point index <-> screen column mapping.
//!
//! A tab advances to the next multiple of the tab width. Other code points
//! take their `unicode-width` display width; control characters count as one
//! column (they are drawn as a replacement glyph), and combining marks as
//! zero.
//!
//! ```
//! use trellis_text::width::{col_at_visual, visual_col};
//!
//! let row: Vec<char> = "\tab中c".chars().collect();
//! assert_eq!(visual_col(&row, 1, 4), 4);
//! assert_eq!(visual_col(&row, 4, 4), 8);
//! // Column 7 falls inside the wide glyph, which starts at index 3.
//! assert_eq!(col_at_visual(&row, 7, 4), 3);
//! ```

use unicode_width::UnicodeWidthChar;

/// Columns occupied by `ch` when it starts at visual column `at`.
#[inline]
pub fn char_width_at(ch: char, at: usize, tab_width: usize) -> usize {
    match ch {
        '\t' => {
            let tab = tab_width.max(1);
            tab - at % tab
        }
        _ => ch.width().unwrap_or(1),
    }
}

/// Visual column of code-point index `col` (clamped to the row length).
pub fn visual_col(row: &[char], col: usize, tab_width: usize) -> usize {
    row.iter()
        .take(col)
        .fold(0, |vis, &ch| vis + char_width_at(ch, vis, tab_width))
}

/// Total visual width of a row.
pub fn row_width(row: &[char], tab_width: usize) -> usize {
    visual_col(row, row.len(), tab_width)
}

/// Code-point index whose span covers visual column `target`.
///
/// Walks forward accumulating widths and stops at the first code point whose
/// span passes `target`; a target inside a wide glyph or tab maps to that
/// glyph's index. Past the end of the row, returns the row length.
pub fn col_at_visual(row: &[char], target: usize, tab_width: usize) -> usize {
    let mut vis = 0;
    for (i, &ch) in row.iter().enumerate() {
        let w = char_width_at(ch, vis, tab_width);
        if vis + w > target {
            return i;
        }
        vis += w;
    }
    row.len()
}

/// Like [`col_at_visual`], but a target in the right half of a multi-column
/// glyph rounds to the index after it. Used for mouse placement.
pub fn col_at_visual_nearest(row: &[char], target: usize, tab_width: usize) -> usize {
    let mut vis = 0;
    for (i, &ch) in row.iter().enumerate() {
        let w = char_width_at(ch, vis, tab_width);
        if vis + w > target {
            return if w > 1 && target - vis >= w.div_ceil(2) {
                i + 1
            } else {
                i
            };
        }
        vis += w;
    }
    row.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn ascii_is_identity() {
        let row = chars("hello");
        for i in 0..=5 {
            assert_eq!(visual_col(&row, i, 4), i);
            assert_eq!(col_at_visual(&row, i, 4), i);
        }
    }

    #[test]
    fn tabs_advance_to_stops() {
        let row = chars("a\tb\t\tc");
        assert_eq!(visual_col(&row, 1, 4), 1);
        assert_eq!(visual_col(&row, 2, 4), 4);
        assert_eq!(visual_col(&row, 3, 4), 5);
        assert_eq!(visual_col(&row, 4, 4), 8);
        assert_eq!(visual_col(&row, 5, 4), 12);
        assert_eq!(row_width(&row, 4), 13);
        assert_eq!(visual_col(&row, 2, 8), 8);
    }

    #[test]
    fn inside_tab_maps_to_tab() {
        let row = chars("a\tb");
        assert_eq!(col_at_visual(&row, 2, 4), 1);
        assert_eq!(col_at_visual(&row, 3, 4), 1);
        assert_eq!(col_at_visual(&row, 4, 4), 2);
    }

    #[test]
    fn wide_glyphs_take_two_columns() {
        let row = chars("中文x");
        assert_eq!(visual_col(&row, 2, 4), 4);
        assert_eq!(col_at_visual(&row, 1, 4), 0);
        assert_eq!(col_at_visual(&row, 2, 4), 1);
        assert_eq!(col_at_visual(&row, 99, 4), 3);
    }

    #[test]
    fn nearest_rounds_right_half() {
        let row = chars("中x");
        assert_eq!(col_at_visual_nearest(&row, 0, 4), 0);
        assert_eq!(col_at_visual_nearest(&row, 1, 4), 1);
        assert_eq!(col_at_visual_nearest(&row, 2, 4), 1);
    }

    #[test]
    fn combining_marks_are_zero_width() {
        let row = chars("e\u{301}x");
        assert_eq!(visual_col(&row, 2, 4), 1);
        assert_eq!(col_at_visual(&row, 1, 4), 2);
    }

    #[test]
    fn zero_tab_width_is_treated_as_one() {
        let row = chars("\t\t");
        assert_eq!(row_width(&row, 0), 2);
    }

    #[test]
    fn col_clamped_past_end() {
        let row = chars("ab");
        assert_eq!(visual_col(&row, 10, 4), 2);
    }
}
