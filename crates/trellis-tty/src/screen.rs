#![forbid(unsafe_code)]

//! [`Screen`] implementation over a real terminal.
//!
//! A background thread blocks on crossterm's input reader, maps each event
//! to the canonical [`Event`], and sends it through a bounded channel. The
//! event loop receives from the other end, so it blocks without polling.
//! [`Waker`]s post [`Event::Wake`] into the same channel. A read failure is
//! sent through the channel too and surfaces from
//! [`next_event`](Screen::next_event); the thread stops after it.

use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread;

use trellis_core::event::Event;
use trellis_core::geometry::{Point, Size};
use trellis_core::logging::{debug, warn};
use trellis_render::{Buffer, Cell, Screen, Waker};

use crate::presenter::Presenter;
use crate::session::{SessionOptions, TerminalSession};

/// Full-screen terminal driven by crossterm.
///
/// Dropping the screen restores the terminal. The input thread exits on
/// its next event once the receiving end is gone.
#[derive(Debug)]
pub struct CrosstermScreen {
    back: Buffer,
    cursor: Option<Point>,
    presenter: Presenter<Stdout>,
    events: Receiver<io::Result<Event>>,
    sender: SyncSender<io::Result<Event>>,
    // Dropped last: the terminal is restored after everything above.
    session: TerminalSession,
}

impl CrosstermScreen {
    /// Open a session with `options` and start the input thread.
    pub fn open(options: SessionOptions) -> io::Result<Self> {
        let session = TerminalSession::new(options.clone())?;
        let (width, height) = crossterm::terminal::size()?;
        let (sender, events) = mpsc::sync_channel(options.queue_capacity.max(1));
        spawn_input_thread(sender.clone())?;
        debug!(width, height, capacity = options.queue_capacity, "terminal screen opened");

        Ok(Self {
            back: Buffer::new(width, height),
            cursor: None,
            presenter: Presenter::new(io::stdout()),
            events,
            sender,
            session,
        })
    }

    pub fn session(&self) -> &TerminalSession {
        &self.session
    }

    fn resize_back(&mut self, width: u16, height: u16) {
        if self.back.width() != width || self.back.height() != height {
            self.back = Buffer::new(width, height);
            self.presenter.invalidate();
        }
    }
}

impl Screen for CrosstermScreen {
    fn size(&self) -> io::Result<Size> {
        Ok(Size::new(self.back.width(), self.back.height()))
    }

    fn set_cell(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.back.get_mut(x, y) {
            *slot = cell;
        }
    }

    fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        self.back.get(x, y).copied()
    }

    fn set_cursor(&mut self, position: Option<Point>) -> io::Result<()> {
        self.cursor = position;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.presenter.present(&self.back, self.cursor)
    }

    fn next_event(&mut self) -> io::Result<Option<Event>> {
        let event = receive(&self.events)?;
        if let Some(Event::Resize { width, height }) = event {
            self.resize_back(width, height);
        }
        Ok(event)
    }

    fn waker(&self) -> Option<Waker> {
        let sender = self.sender.clone();
        // A full queue already holds something that wakes the loop.
        Some(Waker::new(move || {
            let _ = sender.try_send(Ok(Event::Wake));
        }))
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        self.session.set_mouse_capture(enabled)
    }

    fn present(&mut self, buffer: &Buffer, cursor: Option<Point>) -> io::Result<()> {
        self.resize_back(buffer.width(), buffer.height());
        self.back.clone_from(buffer);
        self.cursor = cursor;
        self.flush()
    }
}

fn spawn_input_thread(sender: SyncSender<io::Result<Event>>) -> io::Result<()> {
    thread::Builder::new()
        .name("trellis-input".into())
        .spawn(move || pump(crossterm::event::read, &sender))?;
    Ok(())
}

/// Forward events from `read` until it fails or the receiver is gone. A
/// failure is forwarded before stopping.
fn pump(
    mut read: impl FnMut() -> io::Result<crossterm::event::Event>,
    sender: &SyncSender<io::Result<Event>>,
) {
    loop {
        let event = match read() {
            Ok(raw) => match Event::from_crossterm(raw) {
                Some(event) => event,
                None => continue,
            },
            Err(err) => {
                warn!(%err, "terminal input failed");
                let _ = sender.send(Err(err));
                return;
            }
        };
        if sender.send(Ok(event)).is_err() {
            return;
        }
    }
}

/// Next event from the input channel. `Ok(None)` once every sender is gone.
fn receive(events: &Receiver<io::Result<Event>>) -> io::Result<Option<Event>> {
    match events.recv() {
        Ok(Ok(event)) => Ok(Some(event)),
        Ok(Err(err)) => Err(err),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event as ct;
    use trellis_core::event::KeyCode;

    fn key_press(c: char) -> ct::Event {
        ct::Event::Key(ct::KeyEvent::new(ct::KeyCode::Char(c), ct::KeyModifiers::NONE))
    }

    #[test]
    fn read_failure_reaches_the_receiver() {
        let (sender, events) = mpsc::sync_channel(4);
        let mut script = vec![
            Err(io::Error::other("tty closed")),
            Ok(ct::Event::Key(ct::KeyEvent::new(ct::KeyCode::CapsLock, ct::KeyModifiers::NONE))),
            Ok(key_press('a')),
        ];
        pump(|| script.pop().unwrap_or_else(|| Err(io::Error::other("drained"))), &sender);

        assert_eq!(receive(&events).ok().flatten(), Some(Event::key(KeyCode::Char('a'))));
        let err = receive(&events).expect_err("read failure is forwarded");
        assert_eq!(err.to_string(), "tty closed");

        // Only the screen's own sender is left; once it goes, the stream ends.
        drop(sender);
        assert!(matches!(receive(&events), Ok(None)));
    }

    #[test]
    fn pump_stops_when_receiver_is_gone() {
        let (sender, events) = mpsc::sync_channel(1);
        drop(events);
        let mut reads = 0;
        pump(
            || {
                reads += 1;
                Ok(key_press('x'))
            },
            &sender,
        );
        assert_eq!(reads, 1);
    }
}
