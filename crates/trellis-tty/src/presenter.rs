#![forbid(unsafe_code)]

//! Cell diff presenter.
//!
//! [`Presenter`] remembers the last frame it wrote and, given a new one,
//! emits only the cells that changed. Cursor moves are skipped when the
//! next changed cell directly follows the previous one, and style
//! sequences are written only when the style changes. Output is queued
//! with crossterm and flushed once per frame.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{
    Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;
use trellis_core::geometry::Point;
use trellis_render::Buffer;
use trellis_style::{Ansi16, Color, Style, StyleFlags};

/// Writes buffers to a terminal as cell diffs.
#[derive(Debug)]
pub struct Presenter<W: Write> {
    out: W,
    /// Last frame written; `None` forces a full repaint.
    front: Option<Buffer>,
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, front: None }
    }

    /// Forget the screen contents so the next frame is painted in full.
    pub fn invalidate(&mut self) {
        self.front = None;
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    /// Write the cells of `next` that differ from the previous frame, then
    /// place or hide the cursor, and flush.
    pub fn present(&mut self, next: &Buffer, cursor: Option<Point>) -> io::Result<()> {
        let full = self
            .front
            .as_ref()
            .is_none_or(|f| f.width() != next.width() || f.height() != next.height());
        if full {
            queue!(self.out, SetAttribute(Attribute::Reset), Clear(ClearType::All))?;
        }

        queue!(self.out, Hide)?;
        let mut pen: Option<Style> = None;
        let mut at: Option<(u16, u16)> = None;
        let mut changed = 0usize;

        for y in 0..next.height() {
            for x in 0..next.width() {
                let Some(&cell) = next.get(x, y) else {
                    continue;
                };
                if cell.is_continuation() {
                    continue;
                }
                let old = if full {
                    None
                } else {
                    self.front.as_ref().and_then(|f| f.get(x, y)).copied()
                };
                if old == Some(cell) {
                    continue;
                }

                if at != Some((x, y)) {
                    queue!(self.out, MoveTo(x, y))?;
                }
                if pen != Some(cell.style) {
                    write_style(&mut self.out, cell.style)?;
                    pen = Some(cell.style);
                }
                queue!(self.out, Print(cell.ch))?;
                changed += 1;

                let advance = u16::try_from(cell.width()).unwrap_or(1);
                at = Some((x.saturating_add(advance), y));
            }
        }

        if pen.is_some() {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
        }
        if let Some(p) = cursor {
            queue!(self.out, MoveTo(p.x, p.y), Show)?;
        }
        self.out.flush()?;

        trellis_core::logging::trace!(changed, full, "frame written");
        self.front = Some(next.clone());
        Ok(())
    }
}

/// Reset attributes and apply `style` in full.
fn write_style(out: &mut impl Write, style: Style) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(style.fg.map_or(CtColor::Reset, to_crossterm)),
        SetBackgroundColor(style.bg.map_or(CtColor::Reset, to_crossterm)),
    )?;
    let flags = style.effective_flags();
    for (flag, attr) in [
        (StyleFlags::BOLD, Attribute::Bold),
        (StyleFlags::DIM, Attribute::Dim),
        (StyleFlags::ITALIC, Attribute::Italic),
        (StyleFlags::UNDERLINE, Attribute::Underlined),
        (StyleFlags::REVERSE, Attribute::Reverse),
    ] {
        if flags.contains(flag) {
            queue!(out, SetAttribute(attr))?;
        }
    }
    Ok(())
}

/// Map a style color to crossterm's color type.
pub fn to_crossterm(color: Color) -> CtColor {
    match color {
        Color::Rgb(rgb) => CtColor::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        },
        Color::Ansi256(n) => CtColor::AnsiValue(n),
        Color::Ansi16(c) => match c {
            Ansi16::Black => CtColor::Black,
            Ansi16::Red => CtColor::DarkRed,
            Ansi16::Green => CtColor::DarkGreen,
            Ansi16::Yellow => CtColor::DarkYellow,
            Ansi16::Blue => CtColor::DarkBlue,
            Ansi16::Magenta => CtColor::DarkMagenta,
            Ansi16::Cyan => CtColor::DarkCyan,
            Ansi16::White => CtColor::Grey,
            Ansi16::BrightBlack => CtColor::DarkGrey,
            Ansi16::BrightRed => CtColor::Red,
            Ansi16::BrightGreen => CtColor::Green,
            Ansi16::BrightYellow => CtColor::Yellow,
            Ansi16::BrightBlue => CtColor::Blue,
            Ansi16::BrightMagenta => CtColor::Magenta,
            Ansi16::BrightCyan => CtColor::Cyan,
            Ansi16::BrightWhite => CtColor::White,
        },
        Color::Default => CtColor::Reset,
    }
}
