#![forbid(unsafe_code)]

//! Event loop configuration.

use trellis_style::Theme;

/// Options for a [`Manager`](crate::Manager).
#[derive(Debug, Clone, Copy)]
pub struct ManagerConfig {
    /// Turn on mouse reporting when the loop starts.
    pub mouse: bool,
    /// Let an unconsumed Escape close the open overlay.
    pub escape_dismisses_overlay: bool,
    /// Theme handed to every frame.
    pub theme: Theme,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            mouse: true,
            escape_dismisses_overlay: true,
            theme: Theme::default(),
        }
    }
}

impl ManagerConfig {
    #[must_use]
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse = enabled;
        self
    }

    #[must_use]
    pub fn with_escape_dismisses_overlay(mut self, enabled: bool) -> Self {
        self.escape_dismisses_overlay = enabled;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}
