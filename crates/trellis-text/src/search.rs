#![forbid(unsafe_code)]

//! Literal text search over a [`TextBuffer`].
//!
//! Matches are case-sensitive and never span a line break. Positions are
//! code-point indices, like everything else in the editor.
//!
//! # Example
//! ```
//! use trellis_text::search::{find_next, search_row};
//! use trellis_text::{Pos, TextBuffer};
//!
//! let row: Vec<char> = "hello world hello".chars().collect();
//! let results = search_row(&row, "hello");
//! assert_eq!(results.len(), 2);
//! assert_eq!(results[0].range, 0..5);
//! assert_eq!(results[1].range, 12..17);
//!
//! let buf = TextBuffer::from_text("one\ntwo one");
//! let (start, end) = find_next(&buf, Pos::new(0, 1), "one").unwrap();
//! assert_eq!((start, end), (Pos::new(1, 4), Pos::new(1, 7)));
//! ```

use std::ops::Range;

use crate::buffer::TextBuffer;
use crate::position::Pos;

/// A single match with its code-point range in one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub range: Range<usize>,
}

impl SearchResult {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { range: start..end }
    }

    /// The matched code points.
    #[must_use]
    pub fn text<'a>(&self, row: &'a [char]) -> &'a [char] {
        &row[self.range.clone()]
    }
}

/// First occurrence of `needle` in `row` starting at or after `from`.
pub fn find_in_row(row: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || needle.len() > row.len() {
        return None;
    }
    let last_start = row.len() - needle.len();
    (from..=last_start).find(|&i| row[i..i + needle.len()] == *needle)
}

/// All non-overlapping matches in a row, left to right.
#[must_use]
pub fn search_row(row: &[char], needle: &str) -> Vec<SearchResult> {
    let needle: Vec<char> = needle.chars().collect();
    let mut results = Vec::new();
    let mut from = 0;
    while let Some(at) = find_in_row(row, &needle, from) {
        results.push(SearchResult::new(at, at + needle.len()));
        from = at + needle.len();
    }
    results
}

/// Next match at or after `from`, wrapping around the end of the buffer.
///
/// The scan covers the rest of the starting row, then every following row,
/// then rows from the top back through the starting row. Returns the match
/// as `(start, end)`; `None` for an empty needle or no match.
pub fn find_next(buf: &TextBuffer, from: Pos, needle: &str) -> Option<(Pos, Pos)> {
    let needle: Vec<char> = needle.chars().collect();
    if needle.is_empty() {
        return None;
    }
    let from = buf.clamp(from);
    let rows = buf.row_count();
    let hit = |row: usize, col: usize| (Pos::new(row, col), Pos::new(row, col + needle.len()));

    if let Some(col) = find_in_row(buf.row(from.row), &needle, from.col) {
        return Some(hit(from.row, col));
    }
    for offset in 1..=rows {
        let row = (from.row + offset) % rows;
        if let Some(col) = find_in_row(buf.row(row), &needle, 0) {
            return Some(hit(row, col));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn row_search_non_overlapping() {
        let row = chars("aaaa");
        let results = search_row(&row, "aa");
        assert_eq!(results, vec![SearchResult::new(0, 2), SearchResult::new(2, 4)]);
        assert_eq!(results[0].text(&row), &['a', 'a']);
    }

    #[test]
    fn empty_or_long_needle() {
        let row = chars("abc");
        assert!(search_row(&row, "").is_empty());
        assert_eq!(find_in_row(&row, &chars("abcd"), 0), None);
        assert_eq!(find_in_row(&row, &chars("c"), 5), None);
    }

    #[test]
    fn code_point_offsets() {
        let row = chars("日本語テキスト");
        assert_eq!(search_row(&row, "テキ")[0].range, 3..5);
    }

    #[test]
    fn find_next_includes_cursor_column() {
        let buf = TextBuffer::from_text("hello world hello");
        assert_eq!(
            find_next(&buf, Pos::new(0, 0), "hello"),
            Some((Pos::new(0, 0), Pos::new(0, 5)))
        );
        assert_eq!(
            find_next(&buf, Pos::new(0, 5), "hello"),
            Some((Pos::new(0, 12), Pos::new(0, 17)))
        );
        assert_eq!(
            find_next(&buf, Pos::new(0, 17), "hello"),
            Some((Pos::new(0, 0), Pos::new(0, 5)))
        );
    }

    #[test]
    fn find_next_wraps_across_rows() {
        let buf = TextBuffer::from_text("needle\nhay\nhay");
        assert_eq!(
            find_next(&buf, Pos::new(1, 0), "needle"),
            Some((Pos::new(0, 0), Pos::new(0, 6)))
        );
        assert_eq!(find_next(&buf, Pos::new(0, 0), "straw"), None);
        assert_eq!(find_next(&buf, Pos::new(0, 0), ""), None);
    }

    #[test]
    fn find_next_earlier_in_start_row_after_wrap() {
        let buf = TextBuffer::from_text("ab x ab");
        assert_eq!(
            find_next(&buf, Pos::new(0, 6), "ab"),
            Some((Pos::new(0, 0), Pos::new(0, 2)))
        );
    }
}
