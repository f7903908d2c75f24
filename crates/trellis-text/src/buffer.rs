#![forbid(unsafe_code)]

//! Row storage.
//!
//! A [`TextBuffer`] is an ordered list of rows, each an ordered list of code
//! points. Rows are reference counted and copied on write, so cloning a
//! buffer for an undo snapshot only bumps counts; an edit then copies the one
//! or two rows it touches.
//!
//! # Invariants
//!
//! 1. There is always at least one row.
//! 2. Rows never contain `'\n'` or `'\r'`.
//! 3. Every position handed out by this type satisfies
//!    `row < row_count()` and `col <= row_len(row)`.
//!
//! # Example
//! ```
//! use trellis_text::{Pos, TextBuffer};
//!
//! let mut buf = TextBuffer::from_text("hello\nworld");
//! let end = buf.insert(Pos::new(0, 5), ",\nbig");
//! assert_eq!(end, Pos::new(1, 3));
//! assert_eq!(buf.text(), "hello,\nbig\nworld");
//!
//! let junction = buf.delete(Pos::new(0, 5), Pos::new(2, 0));
//! assert_eq!(junction, Pos::new(0, 5));
//! assert_eq!(buf.text(), "helloworld");
//! ```

use std::rc::Rc;

use crate::position::{Pos, ordered};

/// Rows of code points with copy-on-write sharing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    rows: Vec<Rc<Vec<char>>>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize line breaks: `\r\n` and lone `\r` become `\n`.
pub fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

impl TextBuffer {
    /// One empty row.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: vec![Rc::new(Vec::new())],
        }
    }

    /// Build from text. Line breaks are normalized and a single trailing
    /// line break is dropped.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let text = normalize_newlines(text);
        let body = text.strip_suffix('\n').unwrap_or(&text);
        Self {
            rows: body
                .split('\n')
                .map(|line| Rc::new(line.chars().collect()))
                .collect(),
        }
    }

    /// Rows joined with `'\n'`.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter());
        }
        out
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Code points of a row; empty for out-of-range rows.
    #[inline]
    pub fn row(&self, row: usize) -> &[char] {
        self.rows.get(row).map_or(&[], |r| r.as_slice())
    }

    #[inline]
    pub fn row_len(&self, row: usize) -> usize {
        self.row(row).len()
    }

    pub fn row_string(&self, row: usize) -> String {
        self.row(row).iter().collect()
    }

    /// True for a single empty row.
    pub fn is_empty(&self) -> bool {
        self.rows.len() == 1 && self.rows[0].is_empty()
    }

    pub fn char_at(&self, pos: Pos) -> Option<char> {
        self.row(pos.row).get(pos.col).copied()
    }

    /// Position after the last code point.
    pub fn end(&self) -> Pos {
        let last = self.rows.len() - 1;
        Pos::new(last, self.row_len(last))
    }

    /// Clamp a position into the buffer.
    pub fn clamp(&self, pos: Pos) -> Pos {
        let row = pos.row.min(self.rows.len() - 1);
        Pos::new(row, pos.col.min(self.row_len(row)))
    }

    /// Position one code point before `pos`, crossing to the end of the
    /// previous row at column zero.
    pub fn prev_pos(&self, pos: Pos) -> Pos {
        let pos = self.clamp(pos);
        if pos.col > 0 {
            Pos::new(pos.row, pos.col - 1)
        } else if pos.row > 0 {
            Pos::new(pos.row - 1, self.row_len(pos.row - 1))
        } else {
            pos
        }
    }

    /// Position one code point after `pos`, crossing to the start of the
    /// next row at the row end.
    pub fn next_pos(&self, pos: Pos) -> Pos {
        let pos = self.clamp(pos);
        if pos.col < self.row_len(pos.row) {
            Pos::new(pos.row, pos.col + 1)
        } else if pos.row + 1 < self.rows.len() {
            Pos::new(pos.row + 1, 0)
        } else {
            pos
        }
    }

    /// Text between two positions (in either order), rows joined by `'\n'`.
    pub fn slice(&self, a: Pos, b: Pos) -> String {
        let (start, end) = ordered(self.clamp(a), self.clamp(b));
        if start.row == end.row {
            return self.row(start.row)[start.col..end.col].iter().collect();
        }
        let mut out: String = self.row(start.row)[start.col..].iter().collect();
        for row in start.row + 1..end.row {
            out.push('\n');
            out.extend(self.row(row).iter());
        }
        out.push('\n');
        out.extend(self.row(end.row)[..end.col].iter());
        out
    }

    /// Insert text at `pos` and return the position just after it.
    ///
    /// A single-line insert splices into the row. A multi-line insert splits
    /// the row at `pos`: the head gets the first inserted line, the tail is
    /// appended to the last, and the lines in between become new rows.
    pub fn insert(&mut self, pos: Pos, text: &str) -> Pos {
        let pos = self.clamp(pos);
        let text = normalize_newlines(text);
        let mut lines = text.split('\n');
        let first: Vec<char> = lines.next().unwrap_or_default().chars().collect();
        let rest: Vec<Vec<char>> = lines.map(|l| l.chars().collect()).collect();

        if rest.is_empty() {
            let end_col = pos.col + first.len();
            let row = Rc::make_mut(&mut self.rows[pos.row]);
            row.splice(pos.col..pos.col, first);
            return Pos::new(pos.row, end_col);
        }

        let row = Rc::make_mut(&mut self.rows[pos.row]);
        let tail = row.split_off(pos.col);
        row.extend(first);

        let last_index = rest.len() - 1;
        let mut end = pos;
        let mut new_rows = Vec::with_capacity(rest.len());
        for (i, mut line) in rest.into_iter().enumerate() {
            if i == last_index {
                end = Pos::new(pos.row + 1 + i, line.len());
                line.extend_from_slice(&tail);
            }
            new_rows.push(Rc::new(line));
        }
        let at = pos.row + 1;
        self.rows.splice(at..at, new_rows);
        end
    }

    /// Delete between two positions (in either order) and return the
    /// junction where the start-row prefix now meets the end-row suffix.
    pub fn delete(&mut self, a: Pos, b: Pos) -> Pos {
        let (start, end) = ordered(self.clamp(a), self.clamp(b));
        if start == end {
            return start;
        }
        if start.row == end.row {
            Rc::make_mut(&mut self.rows[start.row]).drain(start.col..end.col);
            return start;
        }

        let suffix = self.row(end.row)[end.col..].to_vec();
        let head = Rc::make_mut(&mut self.rows[start.row]);
        head.truncate(start.col);
        head.extend(suffix);
        self.rows.drain(start.row + 1..=end.row);

        if self.rows.is_empty() {
            self.rows.push(Rc::new(Vec::new()));
        }
        start
    }

    /// Count of rows still shared with `other` (same allocation).
    pub fn shared_rows(&self, other: &TextBuffer) -> usize {
        self.rows
            .iter()
            .zip(&other.rows)
            .filter(|(a, b)| Rc::ptr_eq(a, b))
            .count()
    }
}
