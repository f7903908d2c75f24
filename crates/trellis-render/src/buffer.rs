#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! Cells are stored in row-major order: `index = y * width + x`.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. The scissor stack always holds at least the full-bounds rect
//! 3. Each pushed scissor is intersected with the one below it

use trellis_core::geometry::Rect;

use crate::cell::Cell;

/// A 2D grid of terminal cells with a clip stack.
///
/// # Example
///
/// ```
/// use trellis_render::{Buffer, Cell};
///
/// let mut buffer = Buffer::new(80, 24);
/// buffer.set(0, 0, Cell::from_char('H'));
/// buffer.set(1, 0, Cell::from_char('i'));
/// assert_eq!(buffer.row_text(0).trim_end(), "Hi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    scissor_stack: Vec<Rect>,
}

impl Buffer {
    /// Create a buffer filled with blank cells. Zero dimensions are allowed
    /// and produce a buffer that ignores every write.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
            scissor_stack: vec![Rect::from_size(width, height)],
        }
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Bounding rect of the whole buffer.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Write a cell, honoring the current scissor.
    ///
    /// A double-width glyph also claims `x + 1` as a continuation. If that
    /// column is clipped, a blank is written instead so no half glyph shows.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let scissor = self.current_scissor();
        if !scissor.contains(x, y) {
            return;
        }
        self.cleanup_overlap(x, y);
        if cell.width() == 2 {
            let tail_x = x.saturating_add(1);
            if tail_x == x || !scissor.contains(tail_x, y) {
                self.set_raw(x, y, Cell::new(' ', cell.style));
                return;
            }
            self.cleanup_overlap(tail_x, y);
            self.set_raw(tail_x, y, Cell::continuation(cell.style));
        }
        self.set_raw(x, y, cell);
    }

    // Blank the other half of any wide glyph that (x, y) is part of.
    fn cleanup_overlap(&mut self, x: u16, y: u16) {
        let Some(old) = self.get(x, y).copied() else {
            return;
        };
        if old.is_continuation() {
            if let Some(head) = x.checked_sub(1).and_then(|hx| self.get_mut(hx, y)) {
                head.ch = ' ';
            }
        } else if old.width() == 2
            && let Some(tail) = self.get_mut(x.saturating_add(1), y)
            && tail.is_continuation()
        {
            tail.ch = ' ';
        }
    }

    /// Write a cell ignoring the scissor (bounds are still checked).
    #[inline]
    pub fn set_raw(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = cell;
        }
    }

    /// Fill a region, clipped by the current scissor.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let clipped = self.current_scissor().intersection(&rect);
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set_raw(x, y, cell);
            }
        }
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row contents as a string, continuations skipped.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|c| !c.is_continuation())
            .map(|c| c.ch)
            .collect()
    }

    // ========== Scissor Stack ==========

    /// Push a clip region; the effective clip is the intersection of all
    /// pushed rects.
    pub fn push_scissor(&mut self, rect: Rect) {
        let intersected = self.current_scissor().intersection(&rect);
        self.scissor_stack.push(intersected);
    }

    /// Pop a clip region. The base region is never popped.
    pub fn pop_scissor(&mut self) {
        if self.scissor_stack.len() > 1 {
            self.scissor_stack.pop();
        }
    }

    #[inline]
    pub fn current_scissor(&self) -> Rect {
        self.scissor_stack
            .last()
            .copied()
            .unwrap_or_else(|| self.bounds())
    }

    #[inline]
    pub fn scissor_depth(&self) -> usize {
        self.scissor_stack.len()
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new(1, 1)
    }
}
