#![forbid(unsafe_code)]

//! A single terminal cell.

use trellis_style::Style;
use unicode_width::UnicodeWidthChar;

/// One grid position: a code point and the style it is drawn with.
///
/// A double-width glyph occupies its own cell plus a following
/// continuation cell, which presenters skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    const CONTINUATION_CHAR: char = '\0';

    #[inline]
    #[must_use]
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }

    #[inline]
    #[must_use]
    pub const fn from_char(ch: char) -> Self {
        Self::new(ch, Style::new())
    }

    /// Trailing half of a double-width glyph.
    #[inline]
    #[must_use]
    pub const fn continuation(style: Style) -> Self {
        Self::new(Self::CONTINUATION_CHAR, style)
    }

    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.ch == Self::CONTINUATION_CHAR
    }

    /// Display width of the glyph (0 for continuations, 1 or 2 otherwise).
    #[inline]
    pub fn width(&self) -> usize {
        if self.is_continuation() {
            0
        } else {
            self.ch.width().unwrap_or(0).max(1)
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::from_char(' ')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths() {
        assert_eq!(Cell::from_char('a').width(), 1);
        assert_eq!(Cell::from_char('中').width(), 2);
        assert_eq!(Cell::continuation(Style::new()).width(), 0);
        assert!(Cell::continuation(Style::new()).is_continuation());
        assert_eq!(Cell::default().ch, ' ');
    }
}
