#![forbid(unsafe_code)]

//! Editor settings.

/// Tunables for an [`Editor`](crate::Editor).
///
/// ```
/// use trellis_text::EditorConfig;
///
/// let config = EditorConfig::default().with_tab_width(8).with_expand_tabs(true);
/// assert_eq!(config.tab_width, 8);
/// assert_eq!(config.scroll_margin, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Columns between tab stops. Never below one.
    pub tab_width: usize,
    /// Rows kept visible above and below the cursor when scrolling.
    pub scroll_margin: usize,
    /// Undo steps retained.
    pub max_history: usize,
    /// Copy the current row's leading whitespace into new rows.
    pub auto_indent: bool,
    /// Insert spaces up to the next tab stop instead of `'\t'`.
    pub expand_tabs: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: 4,
            scroll_margin: 2,
            max_history: 1000,
            auto_indent: true,
            expand_tabs: false,
        }
    }
}

impl EditorConfig {
    #[must_use]
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    #[must_use]
    pub fn with_scroll_margin(mut self, scroll_margin: usize) -> Self {
        self.scroll_margin = scroll_margin;
        self
    }

    #[must_use]
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = max_history;
        self
    }

    #[must_use]
    pub fn with_auto_indent(mut self, auto_indent: bool) -> Self {
        self.auto_indent = auto_indent;
        self
    }

    #[must_use]
    pub fn with_expand_tabs(mut self, expand_tabs: bool) -> Self {
        self.expand_tabs = expand_tabs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_tab_width_is_raised() {
        assert_eq!(EditorConfig::default().with_tab_width(0).tab_width, 1);
    }
}
