#![forbid(unsafe_code)]

//! Text buffer engine.
//!
//! Rows of Unicode code points with a cursor/selection model, multi-line
//! splicing, snapshot undo/redo, tab- and width-aware visual columns, word
//! and bracket navigation, incremental find, inline suggestions, and scroll
//! policies. [`Editor`] ties them together; the other modules are usable on
//! their own.
//!
//! # Example
//! ```
//! use trellis_text::{Editor, Motion};
//!
//! let mut ed = Editor::new();
//! ed.insert_text("fn main() {\n}");
//! ed.move_cursor(Motion::DocumentStart, false);
//! assert!(ed.find_next("main"));
//! assert_eq!(ed.selected_text().as_deref(), Some("main"));
//! assert!(ed.undo());
//! assert_eq!(ed.text(), "");
//! ```

pub mod bracket;
pub mod buffer;
pub mod config;
pub mod editor;
pub mod history;
pub mod position;
pub mod search;
pub mod width;
pub mod word;

pub use buffer::TextBuffer;
pub use config::EditorConfig;
pub use editor::{Editor, Motion};
pub use history::{EditKind, History, Snapshot};
pub use position::{Pos, Selection};
