#![forbid(unsafe_code)]

//! Style system: colors, mergeable styles, and themes.
//!
//! Styles carry "unset" as a distinct state so a child style can inherit from
//! its parent field by field. Themes are plain values handed to the renderer;
//! nothing here reads or writes process-wide state except
//! [`Theme::detect`](theme::Theme::detect), which only reads the environment.

pub mod color;
pub mod style;
pub mod theme;

pub use color::{Ansi16, Color, Rgb};
pub use style::{Style, StyleFlags};
pub use theme::Theme;
