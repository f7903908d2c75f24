#![forbid(unsafe_code)]

//! Crossterm terminal backend for Trellis.
//!
//! [`CrosstermScreen`] implements [`Screen`](trellis_render::Screen) on the
//! process's terminal: [`TerminalSession`] owns raw mode and the optional
//! modes, an input thread feeds a bounded event queue, and [`Presenter`]
//! writes frames as cell diffs.
//!
//! ```no_run
//! use trellis_tty::{CrosstermScreen, SessionOptions};
//!
//! let screen = CrosstermScreen::open(SessionOptions::default())?;
//! # drop(screen);
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod presenter;
pub mod screen;
pub mod session;

pub use presenter::{Presenter, to_crossterm};
pub use screen::CrosstermScreen;
pub use session::{DEFAULT_QUEUE_CAPACITY, SessionOptions, TerminalSession};
