#![forbid(unsafe_code)]

//! Trellis public facade crate.
//!
//! Re-exports the types most applications need from the internal crates and
//! offers a prelude. With the default `tty` feature, [`terminal`] opens the
//! process's terminal and returns a ready [`Manager`].
//!
//! ```no_run
//! use trellis::prelude::*;
//!
//! fn main() -> trellis::Result<()> {
//!     let editor = std::rc::Rc::new(TextEditor::new().with_line_numbers(true));
//!     let root = Stack::vertical()
//!         .child(Label::new("notes"))
//!         .child(Divider::new())
//!         .child(std::rc::Rc::clone(&editor).grow(1));
//!     let options = SessionOptions::default();
//!     let mut manager = trellis::terminal(root, options, ManagerConfig::default())?;
//!     manager.set_focus(editor);
//!     manager.bind("quit", KeyCombo::ctrl('q'), |ctl| ctl.quit());
//!     manager.run()?;
//!     Ok(())
//! }
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use trellis_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
pub use trellis_core::geometry::{Point, Rect, Sides, Size};

// --- Layout, render, and style re-exports ----------------------------------

pub use trellis_layout::{Direction, Placement};
pub use trellis_render::{BorderChars, Buffer, Cell, Frame, HeadlessScreen, Screen, Waker};
pub use trellis_style::{Ansi16, Color, Rgb, Style, StyleFlags, Theme};

// --- Text and widget re-exports --------------------------------------------

pub use trellis_text::{Editor, EditorConfig, Pos, Selection};
pub use trellis_widgets::{
    Clickable, Decorate, Divider, Element, ElementExt, ElementRef, FocusTarget, Focusable,
    Hoverable, IntoElement, KeyHandler, Label, LayoutNode, Scrollable, Spacer, Stack, Tabs,
    TextEditor,
};

// --- Runtime re-exports ----------------------------------------------------

pub use trellis_runtime::{
    Bindings, Command, Control, KeyCombo, Manager, ManagerConfig, Overlay, ShutdownHandle,
};

#[cfg(feature = "tty")]
pub use trellis_tty::{CrosstermScreen, SessionOptions, TerminalSession};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Trellis apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure during terminal operations.
    Io(std::io::Error),
    /// Terminal or runtime error with message.
    Terminal(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Terminal(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Terminal(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for Trellis APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Entry point ----------------------------------------------------------

/// Open the terminal with `options` and build a manager over `root`.
///
/// Mouse reporting follows `config.mouse` once the loop starts, whatever
/// `options.mouse_capture` says.
#[cfg(feature = "tty")]
pub fn terminal(
    root: impl IntoElement,
    options: SessionOptions,
    config: ManagerConfig,
) -> Result<Manager<CrosstermScreen>> {
    let screen = CrosstermScreen::open(options)?;
    Ok(Manager::with_config(screen, root, config)?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Color, Decorate, Direction, Divider, Element, ElementExt, ElementRef, Error, Event,
        IntoElement, KeyCode, KeyCombo, KeyEvent, Label, Manager, ManagerConfig, Modifiers,
        Placement, Result, Spacer, Stack, Style, Tabs, TextEditor, Theme,
    };

    #[cfg(feature = "tty")]
    pub use crate::{CrosstermScreen, SessionOptions};

    pub use crate::{core, layout, render, runtime, style, text, widgets};
}

pub use trellis_core as core;
pub use trellis_layout as layout;
pub use trellis_render as render;
pub use trellis_runtime as runtime;
pub use trellis_style as style;
pub use trellis_text as text;
pub use trellis_widgets as widgets;
