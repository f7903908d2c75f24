#![forbid(unsafe_code)]

//! Themes with semantic style slots.
//!
//! A [`Theme`] is an ordinary value. The renderer receives one per frame and
//! widgets look their slots up through it, so two managers can run with
//! different themes side by side.
//!
//! # Example
//! ```
//! use trellis_style::{Color, Style, Theme};
//!
//! let theme = Theme::default();
//! assert!(theme.selection.bg.is_some());
//!
//! let custom = Theme::dark().with_text(Style::new().fg(Color::rgb(200, 200, 200)));
//! assert_eq!(custom.text.fg, Some(Color::rgb(200, 200, 200)));
//! ```

use std::env;

use crate::color::Color;
use crate::style::Style;

/// Semantic style slots consumed by the built-in widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Whether this theme targets a dark background.
    pub is_dark: bool,

    /// Base style applied at the root of every frame.
    pub text: Style,
    /// De-emphasized text (placeholders, inline suggestions).
    pub text_muted: Style,

    /// Borders and dividers.
    pub border: Style,
    /// Border of the focused decorated element.
    pub border_focused: Style,

    /// Selected text.
    pub selection: Style,
    /// Row containing the cursor in an editor.
    pub cursor_line: Style,
    /// Line-number gutter.
    pub line_number: Style,
    /// Line number on the cursor row.
    pub line_number_active: Style,
    /// Matching bracket highlight.
    pub bracket_match: Style,

    /// Background of overlays.
    pub overlay: Style,

    /// Tab header of the active page.
    pub tab_active: Style,
    /// Tab headers of inactive pages.
    pub tab_inactive: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme.
    #[must_use]
    pub fn dark() -> Theme {
        Theme {
            is_dark: true,
            text: Style::new()
                .fg(Color::rgb(230, 237, 243))
                .bg(Color::rgb(22, 27, 34)),
            text_muted: Style::new().fg(Color::rgb(110, 118, 129)).dim(true),
            border: Style::new().fg(Color::rgb(72, 79, 88)),
            border_focused: Style::new().fg(Color::rgb(88, 166, 255)),
            selection: Style::new()
                .fg(Color::rgb(255, 255, 255))
                .bg(Color::rgb(56, 139, 253)),
            cursor_line: Style::new().bg(Color::rgb(33, 38, 45)),
            line_number: Style::new().fg(Color::rgb(110, 118, 129)),
            line_number_active: Style::new().fg(Color::rgb(230, 237, 243)).bold(true),
            bracket_match: Style::new().underline(true).bold(true),
            overlay: Style::new().bg(Color::rgb(48, 54, 61)),
            tab_active: Style::new().fg(Color::rgb(88, 166, 255)).bold(true),
            tab_inactive: Style::new().fg(Color::rgb(139, 148, 158)),
        }
    }

    /// Light theme.
    #[must_use]
    pub fn light() -> Theme {
        Theme {
            is_dark: false,
            text: Style::new()
                .fg(Color::rgb(31, 35, 40))
                .bg(Color::rgb(255, 255, 255)),
            text_muted: Style::new().fg(Color::rgb(140, 149, 159)).dim(true),
            border: Style::new().fg(Color::rgb(208, 215, 222)),
            border_focused: Style::new().fg(Color::rgb(9, 105, 218)),
            selection: Style::new()
                .fg(Color::rgb(31, 35, 40))
                .bg(Color::rgb(84, 174, 255)),
            cursor_line: Style::new().bg(Color::rgb(246, 248, 250)),
            line_number: Style::new().fg(Color::rgb(140, 149, 159)),
            line_number_active: Style::new().fg(Color::rgb(31, 35, 40)).bold(true),
            bracket_match: Style::new().underline(true).bold(true),
            overlay: Style::new().bg(Color::rgb(234, 238, 242)),
            tab_active: Style::new().fg(Color::rgb(9, 105, 218)).bold(true),
            tab_inactive: Style::new().fg(Color::rgb(101, 109, 118)),
        }
    }

    /// Pick [`dark`](Self::dark) or [`light`](Self::light) from `COLORFGBG`,
    /// defaulting to dark.
    #[must_use]
    pub fn detect() -> Theme {
        if detect_dark_mode_from_colorfgbg(env::var("COLORFGBG").ok().as_deref()) {
            Self::dark()
        } else {
            Self::light()
        }
    }

    #[must_use]
    pub fn with_text(mut self, style: Style) -> Self {
        self.text = style;
        self
    }

    #[must_use]
    pub fn with_selection(mut self, style: Style) -> Self {
        self.selection = style;
        self
    }

    #[must_use]
    pub fn with_border(mut self, style: Style) -> Self {
        self.border = style;
        self
    }

    #[must_use]
    pub fn with_overlay(mut self, style: Style) -> Self {
        self.overlay = style;
        self
    }
}

// COLORFGBG is "fg;bg" (sometimes "fg;default;bg") with ANSI indices.
// Light terminals typically report bg 7 or 15.
fn detect_dark_mode_from_colorfgbg(colorfgbg: Option<&str>) -> bool {
    if let Some(colorfgbg) = colorfgbg
        && let Some(bg_part) = colorfgbg.split(';').next_back()
        && let Ok(bg) = bg_part.trim().parse::<u8>()
    {
        return bg != 7 && bg != 15;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_dark() {
        assert!(Theme::default().is_dark);
        assert!(!Theme::light().is_dark);
    }

    #[test]
    fn colorfgbg_detection() {
        assert!(detect_dark_mode_from_colorfgbg(None));
        assert!(detect_dark_mode_from_colorfgbg(Some("15;0")));
        assert!(!detect_dark_mode_from_colorfgbg(Some("0;15")));
        assert!(!detect_dark_mode_from_colorfgbg(Some("0;default;7")));
        assert!(detect_dark_mode_from_colorfgbg(Some("garbage")));
    }

    #[test]
    fn presets_differ() {
        assert_ne!(Theme::dark().text, Theme::light().text);
        assert_ne!(Theme::dark().selection, Theme::light().selection);
    }

    #[test]
    fn builders_replace_slots() {
        let style = Style::new().reverse(true);
        let theme = Theme::dark()
            .with_selection(style)
            .with_border(style)
            .with_overlay(style);
        assert_eq!(theme.selection, style);
        assert_eq!(theme.border, style);
        assert_eq!(theme.overlay, style);
    }
}
