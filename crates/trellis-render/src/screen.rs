#![forbid(unsafe_code)]

//! The screen capability.
//!
//! A [`Screen`] is everything the event loop needs from a terminal: a cell
//! grid it can write and read back, a size, a text cursor, a flush, and a
//! blocking source of input events. Decoding terminal bytes and encoding
//! output live behind this trait.

use std::fmt;
use std::io;
use std::sync::Arc;

use trellis_core::event::Event;
use trellis_core::geometry::{Point, Size};

use crate::buffer::Buffer;
use crate::cell::Cell;

/// Cross-thread handle that unblocks a screen's event wait by injecting
/// [`Event::Wake`].
#[derive(Clone)]
pub struct Waker {
    wake: Arc<dyn Fn() + Send + Sync>,
}

impl Waker {
    pub fn new(wake: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            wake: Arc::new(wake),
        }
    }

    pub fn wake(&self) {
        (self.wake)();
    }
}

impl fmt::Debug for Waker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Waker").finish_non_exhaustive()
    }
}

/// Terminal collaborator consumed by the event loop.
pub trait Screen {
    /// Current size in cells.
    fn size(&self) -> io::Result<Size>;

    /// Write a styled cell. Out-of-range positions are ignored.
    fn set_cell(&mut self, x: u16, y: u16, cell: Cell);

    /// Read back what was last written at a position.
    fn cell(&self, x: u16, y: u16) -> Option<Cell>;

    /// Show the text cursor at a position, or hide it with `None`.
    fn set_cursor(&mut self, position: Option<Point>) -> io::Result<()>;

    /// Make written cells visible.
    fn flush(&mut self) -> io::Result<()>;

    /// Block until the next input event. `Ok(None)` means the source is
    /// exhausted and the loop should stop.
    fn next_event(&mut self) -> io::Result<Option<Event>>;

    /// Handle for injecting wake-ups from another thread, if supported.
    fn waker(&self) -> Option<Waker> {
        None
    }

    /// Toggle mouse reporting.
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }

    /// Copy changed cells of `buffer` to the screen, position the cursor,
    /// and flush.
    fn present(&mut self, buffer: &Buffer, cursor: Option<Point>) -> io::Result<()> {
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                if let Some(&cell) = buffer.get(x, y)
                    && self.cell(x, y) != Some(cell)
                {
                    self.set_cell(x, y, cell);
                }
            }
        }
        self.set_cursor(cursor)?;
        self.flush()
    }
}
