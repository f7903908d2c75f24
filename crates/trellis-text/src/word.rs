#![forbid(unsafe_code)]

//! Word boundaries.
//!
//! Two notions are used:
//!
//! - *Identifier words* ([`word_range`], [`word_prefix_start`]): maximal runs
//!   of letters, digits, and `_`. Used for double-click selection and for the
//!   prefix handed to the suggestion provider.
//! - *Navigation words* ([`next_word_end`], [`prev_word_start`]): segments
//!   from Unicode word segmentation (UAX #29) that contain at least one
//!   alphanumeric character. Used by Ctrl+Left/Right and Ctrl+Backspace.

use unicode_segmentation::UnicodeSegmentation;

/// Letter, digit, or underscore.
#[inline]
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// The identifier run around `col`.
///
/// Returns `(start, end)` as code-point indices. If neither neighbor of
/// `col` is a word character the range is empty (`start == end == col`).
pub fn word_range(row: &[char], col: usize) -> (usize, usize) {
    let col = col.min(row.len());
    let mut start = col;
    while start > 0 && is_word_char(row[start - 1]) {
        start -= 1;
    }
    let mut end = col;
    while end < row.len() && is_word_char(row[end]) {
        end += 1;
    }
    (start, end)
}

/// Start of the identifier run that ends at `col`.
pub fn word_prefix_start(row: &[char], col: usize) -> usize {
    word_range(row, col).0
}

/// Word segments of a row as `(start, end)` code-point ranges.
fn word_segments(row: &[char]) -> Vec<(usize, usize)> {
    let text: String = row.iter().collect();
    let mut segments = Vec::new();
    let mut char_idx = 0;
    for segment in text.split_word_bounds() {
        let len = segment.chars().count();
        if segment.chars().any(char::is_alphanumeric) {
            segments.push((char_idx, char_idx + len));
        }
        char_idx += len;
    }
    segments
}

/// End of the first word that ends after `col`, or the row end.
pub fn next_word_end(row: &[char], col: usize) -> usize {
    word_segments(row)
        .into_iter()
        .find(|&(_, end)| end > col)
        .map_or(row.len(), |(_, end)| end)
}

/// Start of the last word that starts before `col`, or zero.
pub fn prev_word_start(row: &[char], col: usize) -> usize {
    word_segments(row)
        .into_iter()
        .rev()
        .find(|&(start, _)| start < col)
        .map_or(0, |(start, _)| start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn range_around_cursor() {
        let row = chars("let foo_bar = 42;");
        assert_eq!(word_range(&row, 6), (4, 11));
        assert_eq!(word_range(&row, 4), (4, 11));
        assert_eq!(word_range(&row, 11), (4, 11));
        assert_eq!(word_range(&row, 15), (14, 16));
    }

    #[test]
    fn range_between_non_word_chars_is_empty() {
        let row = chars("a = b");
        assert_eq!(word_range(&row, 2), (2, 2));
        assert_eq!(word_range(&chars(""), 0), (0, 0));
        assert_eq!(word_range(&chars("  "), 1), (1, 1));
    }

    #[test]
    fn range_with_unicode_letters() {
        let row = chars("über straße");
        assert_eq!(word_range(&row, 2), (0, 4));
        assert_eq!(word_range(&row, 11), (5, 11));
    }

    #[test]
    fn prefix_start() {
        let row = chars("foo.ba");
        assert_eq!(word_prefix_start(&row, 6), 4);
        assert_eq!(word_prefix_start(&row, 4), 4);
    }

    #[test]
    fn navigation_words() {
        let row = chars("hello,  world foo");
        assert_eq!(next_word_end(&row, 0), 5);
        assert_eq!(next_word_end(&row, 5), 13);
        assert_eq!(next_word_end(&row, 14), 17);
        assert_eq!(next_word_end(&row, 17), 17);

        assert_eq!(prev_word_start(&row, 17), 14);
        assert_eq!(prev_word_start(&row, 14), 8);
        assert_eq!(prev_word_start(&row, 8), 0);
        assert_eq!(prev_word_start(&row, 0), 0);
    }
}
