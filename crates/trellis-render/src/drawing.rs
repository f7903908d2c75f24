#![forbid(unsafe_code)]

//! Line and border primitives on [`Frame`].
//!
//! Everything goes through [`Frame::put`], so the inherited style and the
//! clip stack apply.

use trellis_core::geometry::Rect;
use trellis_style::Style;

use crate::frame::Frame;

/// Characters used to draw a border around a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BorderChars {
    pub const SQUARE: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
    };

    pub const ROUNDED: Self = Self {
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        horizontal: '─',
        vertical: '│',
    };

    pub const ASCII: Self = Self {
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
        horizontal: '-',
        vertical: '|',
    };
}

impl Default for BorderChars {
    fn default() -> Self {
        Self::SQUARE
    }
}

impl Frame {
    pub fn hline(&mut self, x: u16, y: u16, width: u16, ch: char, style: Style) {
        for i in 0..width {
            self.put(x.saturating_add(i), y, ch, style);
        }
    }

    pub fn vline(&mut self, x: u16, y: u16, height: u16, ch: char, style: Style) {
        for i in 0..height {
            self.put(x, y.saturating_add(i), ch, style);
        }
    }

    /// Draw a border along the inside edge of `rect`.
    pub fn draw_border(&mut self, rect: Rect, chars: BorderChars, style: Style) {
        if rect.is_empty() {
            return;
        }
        let (left, top) = (rect.x, rect.y);
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);

        self.hline(left, top, rect.width, chars.horizontal, style);
        if rect.height > 1 {
            self.hline(left, bottom, rect.width, chars.horizontal, style);
        }
        if rect.height > 2 {
            self.vline(left, top + 1, rect.height - 2, chars.vertical, style);
            if rect.width > 1 {
                self.vline(right, top + 1, rect.height - 2, chars.vertical, style);
            }
        }

        // Corners last so they overwrite the edges.
        self.put(left, top, chars.top_left, style);
        if rect.width > 1 {
            self.put(right, top, chars.top_right, style);
        }
        if rect.height > 1 {
            self.put(left, bottom, chars.bottom_left, style);
        }
        if rect.width > 1 && rect.height > 1 {
            self.put(right, bottom, chars.bottom_right, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_style::Theme;

    #[test]
    fn border_outline() {
        let mut frame = Frame::new(5, 3, Theme::default());
        frame.draw_border(Rect::new(0, 0, 5, 3), BorderChars::SQUARE, Style::new());
        assert_eq!(frame.buffer.row_text(0), "┌───┐");
        assert_eq!(frame.buffer.row_text(1), "│   │");
        assert_eq!(frame.buffer.row_text(2), "└───┘");
    }

    #[test]
    fn single_row_border() {
        let mut frame = Frame::new(4, 1, Theme::default());
        frame.draw_border(Rect::new(0, 0, 4, 1), BorderChars::ASCII, Style::new());
        assert_eq!(frame.buffer.row_text(0), "+--+");
    }

    #[test]
    fn border_respects_clip() {
        let mut frame = Frame::new(6, 3, Theme::default());
        frame.push_clip(Rect::new(0, 0, 3, 3));
        frame.draw_border(Rect::new(0, 0, 6, 3), BorderChars::SQUARE, Style::new());
        assert_eq!(frame.buffer.row_text(0), "┌──   ");
    }
}
