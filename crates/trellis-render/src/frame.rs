#![forbid(unsafe_code)]

//! Frame = Buffer + per-pass draw state.
//!
//! Elements draw into a [`Frame`]. On top of the raw [`Buffer`] it keeps an
//! inherited-style stack (each push is merged over the current top), a clip
//! stack delegated to the buffer's scissor, the theme for the pass, and the
//! cursor position requested by the focused element.
//!
//! ```
//! use trellis_core::geometry::Point;
//! use trellis_render::Frame;
//! use trellis_style::{Style, Theme};
//!
//! let mut frame = Frame::new(10, 2, Theme::default());
//! frame.push_style(Style::new().bold(true));
//! let end = frame.print(0, 0, "Hi", Style::new(), 10);
//! assert_eq!(end, 2);
//! frame.set_cursor(Some(Point::new(2, 0)));
//! assert_eq!(frame.buffer.row_text(0).trim_end(), "Hi");
//! ```

use trellis_core::geometry::{Point, Rect};
use trellis_style::{Style, Theme};
use unicode_width::UnicodeWidthChar;

use crate::buffer::Buffer;
use crate::cell::Cell;

/// Render target for one redraw.
#[derive(Debug, Clone)]
pub struct Frame {
    pub buffer: Buffer,
    theme: Theme,
    style_stack: Vec<Style>,
    cursor: Option<Point>,
}

impl Frame {
    /// Fresh frame; the base inherited style is `theme.text`.
    pub fn new(width: u16, height: u16, theme: Theme) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            style_stack: vec![theme.text],
            theme,
            cursor: None,
        }
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.buffer.width()
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.buffer.height()
    }

    #[inline]
    pub const fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    // ── Style stack ─────────────────────────────────────────────────────

    /// Effective inherited style.
    #[inline]
    pub fn current_style(&self) -> Style {
        self.style_stack.last().copied().unwrap_or(self.theme.text)
    }

    /// Push a style contribution; unset fields inherit from the current top.
    pub fn push_style(&mut self, style: Style) {
        let merged = style.merge(&self.current_style());
        self.style_stack.push(merged);
    }

    /// Pop a style contribution. The base style is never popped.
    pub fn pop_style(&mut self) {
        if self.style_stack.len() > 1 {
            self.style_stack.pop();
        }
    }

    // ── Clipping ────────────────────────────────────────────────────────

    pub fn push_clip(&mut self, rect: Rect) {
        self.buffer.push_scissor(rect);
    }

    pub fn pop_clip(&mut self) {
        self.buffer.pop_scissor();
    }

    #[inline]
    pub fn clip(&self) -> Rect {
        self.buffer.current_scissor()
    }

    // ── Drawing ─────────────────────────────────────────────────────────

    /// Write one code point with `style` merged over the inherited style.
    pub fn put(&mut self, x: u16, y: u16, ch: char, style: Style) {
        let style = style.merge(&self.current_style());
        self.buffer.set(x, y, Cell::new(ch, style));
    }

    /// Draw text on one row, stopping before `max_x`.
    ///
    /// Zero-width and control code points are skipped; a wide glyph that
    /// would straddle `max_x` ends the run. Returns the column after the last
    /// glyph drawn.
    pub fn print(&mut self, mut x: u16, y: u16, text: &str, style: Style, max_x: u16) -> u16 {
        let style = style.merge(&self.current_style());
        for ch in text.chars() {
            if x >= max_x {
                break;
            }
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if x.saturating_add(w) > max_x {
                break;
            }
            self.buffer.set(x, y, Cell::new(ch, style));
            x = x.saturating_add(w);
        }
        x
    }

    /// Blank a region with `style` merged over the inherited style.
    pub fn fill(&mut self, rect: Rect, style: Style) {
        let style = style.merge(&self.current_style());
        self.buffer.fill(rect, Cell::new(' ', style));
    }

    /// Layer `style` over the existing cells of a region, keeping their
    /// characters. Used for selection and cursor-line highlights.
    pub fn restyle(&mut self, rect: Rect, style: Style) {
        let clipped = self.clip().intersection(&rect);
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                if let Some(cell) = self.buffer.get_mut(x, y) {
                    cell.style = style.merge(&cell.style);
                }
            }
        }
    }

    // ── Cursor ──────────────────────────────────────────────────────────

    /// Request the hardware cursor at an absolute position, or hide it.
    ///
    /// Positions outside the current clip are ignored.
    pub fn set_cursor(&mut self, position: Option<Point>) {
        self.cursor = position.filter(|p| self.clip().contains(p.x, p.y));
    }

    #[inline]
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn into_buffer(self) -> Buffer {
        self.buffer
    }
}
