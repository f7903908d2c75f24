#![forbid(unsafe_code)]

//! One-row status bar reflecting the active page.

use std::rc::Rc;

use trellis::{Element, Frame, Rect, Size, Tabs, TextEditor};

/// Shows the active page title, cursor position, and modified flag, with a
/// key hint on the right.
pub struct StatusBar {
    tabs: Rc<Tabs>,
    editors: Vec<Rc<TextEditor>>,
    hint: String,
}

impl StatusBar {
    /// `editors[i]` is the editor on page `i`.
    pub fn new(tabs: Rc<Tabs>, editors: Vec<Rc<TextEditor>>) -> Self {
        Self {
            tabs,
            editors,
            hint: "F1 help  Ctrl+Q quit ".into(),
        }
    }

    /// Left-hand text for the current state.
    pub fn summary(&self) -> String {
        let active = self.tabs.active();
        let title = self.tabs.title(active).unwrap_or_default();
        match self.editors.get(active) {
            Some(editor) => {
                let ed = editor.editor();
                let pos = ed.cursor();
                let modified = if ed.is_dirty() { "  [modified]" } else { "" };
                format!(" {title}  Ln {}, Col {}{modified}", pos.row + 1, pos.col + 1)
            }
            None => format!(" {title}"),
        }
    }
}

impl Element for StatusBar {
    fn min_size(&self) -> Size {
        Size::new(0, 1)
    }

    fn draw(&self, area: Rect, frame: &mut Frame) {
        let style = frame.theme().line_number_active;
        frame.fill(area, style);
        let right = area.right();
        let end = frame.print(area.x, area.y, &self.summary(), style, right);

        let hint_width = self.hint.chars().count() as u16;
        let hint_x = right.saturating_sub(hint_width);
        if hint_x > end {
            frame.print(hint_x, area.y, &self.hint, style, right);
        }
    }
}
