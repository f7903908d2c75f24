#![forbid(unsafe_code)]

//! In-memory [`Screen`] for tests and snapshotting.
//!
//! Events are scripted up front (or pushed through a [`Waker`]); once the
//! queue drains, [`Screen::next_event`] returns `Ok(None)` and the event loop
//! stops.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use trellis_core::event::Event;
use trellis_core::geometry::{Point, Size};

use crate::buffer::Buffer;
use crate::cell::Cell;
use crate::screen::{Screen, Waker};

/// Headless screen backed by a [`Buffer`].
#[derive(Debug)]
pub struct HeadlessScreen {
    buffer: Buffer,
    cursor: Option<Point>,
    events: Arc<Mutex<VecDeque<Event>>>,
    mouse_capture: bool,
    flushes: usize,
}

impl HeadlessScreen {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            cursor: None,
            events: Arc::new(Mutex::new(VecDeque::new())),
            mouse_capture: false,
            flushes: 0,
        }
    }

    /// Builder form of [`push_events`](Self::push_events).
    #[must_use]
    pub fn with_events(self, events: impl IntoIterator<Item = Event>) -> Self {
        self.push_events(events);
        self
    }

    pub fn push_event(&self, event: Event) {
        self.queue().push_back(event);
    }

    pub fn push_events(&self, events: impl IntoIterator<Item = Event>) {
        self.queue().extend(events);
    }

    /// Change the size and queue the matching resize event.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.buffer = Buffer::new(width, height);
        self.push_event(Event::Resize { width, height });
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Row contents as a string.
    pub fn row_text(&self, y: u16) -> String {
        self.buffer.row_text(y)
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn mouse_capture(&self) -> bool {
        self.mouse_capture
    }

    /// Number of completed presents.
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    fn queue(&self) -> std::sync::MutexGuard<'_, VecDeque<Event>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Screen for HeadlessScreen {
    fn size(&self) -> io::Result<Size> {
        Ok(self.buffer.bounds().size())
    }

    fn set_cell(&mut self, x: u16, y: u16, cell: Cell) {
        self.buffer.set_raw(x, y, cell);
    }

    fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        self.buffer.get(x, y).copied()
    }

    fn set_cursor(&mut self, position: Option<Point>) -> io::Result<()> {
        self.cursor = position;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }

    fn next_event(&mut self) -> io::Result<Option<Event>> {
        Ok(self.queue().pop_front())
    }

    fn waker(&self) -> Option<Waker> {
        let events = Arc::clone(&self.events);
        Some(Waker::new(move || {
            events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push_back(Event::Wake);
        }))
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        self.mouse_capture = enabled;
        Ok(())
    }
}
