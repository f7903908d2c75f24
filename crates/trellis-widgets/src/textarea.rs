#![forbid(unsafe_code)]

//! Multi-line text editing element.
//!
//! [`TextEditor`] wraps an [`Editor`] for text manipulation and draws it with
//! viewport scrolling, an optional line-number gutter, selection and
//! cursor-line highlights, bracket matching, and inline suggestions.
//!
//! # Example
//! ```
//! use trellis_core::event::{KeyCode, KeyEvent};
//! use trellis_widgets::{KeyHandler, TextEditor};
//!
//! let editor = TextEditor::new().with_text("Hello");
//! editor.handle_key(&KeyEvent::new(KeyCode::End));
//! editor.handle_key(&KeyEvent::new(KeyCode::Char('!')));
//! assert_eq!(editor.text(), "Hello!");
//! ```

use std::cell::{Cell, Ref, RefCell, RefMut};

use trellis_core::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use trellis_core::geometry::{Point, Rect, Size};
use trellis_render::Frame;
use trellis_style::Style;
use trellis_text::width::char_width_at;
use trellis_text::{Editor, EditorConfig, Motion, Pos};

use crate::element::{Clickable, Element, Focusable, Hoverable, KeyHandler, Scrollable};

/// Per-code-point styles for one row.
pub type Highlighter = Box<dyn Fn(usize, &str) -> Vec<Style>>;

/// Rows scrolled per wheel notch.
const WHEEL_ROWS: isize = 3;

/// Multi-line text editor element.
pub struct TextEditor {
    editor: RefCell<Editor>,
    focused: Cell<bool>,
    /// Anchor of an in-progress mouse drag.
    drag_anchor: Cell<Option<Pos>>,
    show_line_numbers: bool,
    cursor_line: bool,
    placeholder: String,
    highlighter: Option<Highlighter>,
    style: Style,
}

impl Default for TextEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEditor")
            .field("editor", &self.editor)
            .field("focused", &self.focused.get())
            .field("show_line_numbers", &self.show_line_numbers)
            .field("placeholder", &self.placeholder)
            .finish_non_exhaustive()
    }
}

impl TextEditor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            editor: RefCell::new(Editor::new()),
            focused: Cell::new(false),
            drag_anchor: Cell::new(None),
            show_line_numbers: false,
            cursor_line: true,
            placeholder: String::new(),
            highlighter: None,
            style: Style::new(),
        }
    }

    // ── Builder methods ────────────────────────────────────────────

    /// Initial content; the cursor starts at the beginning.
    #[must_use]
    pub fn with_text(self, text: &str) -> Self {
        self.editor.borrow_mut().set_text(text);
        self
    }

    #[must_use]
    pub fn with_config(self, config: EditorConfig) -> Self {
        self.editor.borrow_mut().set_config(config);
        self
    }

    #[must_use]
    pub fn with_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }

    /// Highlight the cursor row while focused (on by default).
    #[must_use]
    pub fn with_cursor_line(mut self, show: bool) -> Self {
        self.cursor_line = show;
        self
    }

    /// Text shown while the buffer is empty.
    #[must_use]
    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Syntax highlighting hook. Called with the row index and its text;
    /// returns one style per code point (missing entries stay unstyled).
    #[must_use]
    pub fn with_highlighter(
        mut self,
        highlighter: impl Fn(usize, &str) -> Vec<Style> + 'static,
    ) -> Self {
        self.highlighter = Some(Box::new(highlighter));
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    // ── State access ───────────────────────────────────────────────

    /// Borrow the underlying editor.
    ///
    /// # Panics
    ///
    /// If the editor is mutably borrowed, e.g. from inside its own change
    /// callback.
    pub fn editor(&self) -> Ref<'_, Editor> {
        self.editor.borrow()
    }

    /// Mutably borrow the underlying editor.
    ///
    /// # Panics
    ///
    /// If the editor is already borrowed.
    pub fn editor_mut(&self) -> RefMut<'_, Editor> {
        self.editor.borrow_mut()
    }

    pub fn text(&self) -> String {
        self.editor.borrow().text()
    }

    /// Replace the content, resetting cursor and history.
    pub fn set_text(&self, text: &str) {
        self.editor.borrow_mut().set_text(text);
    }

    /// Width of the line-number gutter: digits plus one space.
    fn gutter_width(&self, line_count: usize) -> u16 {
        if !self.show_line_numbers {
            return 0;
        }
        let digits = line_count.max(1).ilog10() + 1;
        u16::try_from(digits).unwrap_or(u16::MAX).saturating_add(1)
    }

    /// Buffer position under a point local to the element.
    fn pos_at(&self, ed: &Editor, local: Point) -> Pos {
        let gutter = self.gutter_width(ed.line_count());
        let (top, left) = ed.scroll_offset();
        let vis = usize::from(local.x.saturating_sub(gutter)) + left;
        ed.pos_at_visual(top + usize::from(local.y), vis)
    }

    fn handle_editor_key(ed: &mut Editor, key: &KeyEvent) -> bool {
        let ctrl = key.ctrl();
        let shift = key.shift();

        let motion = match key.code {
            KeyCode::Left if ctrl => Some(Motion::WordLeft),
            KeyCode::Right if ctrl => Some(Motion::WordRight),
            KeyCode::Left => Some(Motion::Left),
            KeyCode::Right => Some(Motion::Right),
            KeyCode::Up => Some(Motion::Up),
            KeyCode::Down => Some(Motion::Down),
            KeyCode::Home if ctrl => Some(Motion::DocumentStart),
            KeyCode::End if ctrl => Some(Motion::DocumentEnd),
            KeyCode::Home => Some(Motion::SmartHome),
            KeyCode::End => Some(Motion::LineEnd),
            KeyCode::PageUp => Some(Motion::PageUp),
            KeyCode::PageDown => Some(Motion::PageDown),
            _ => None,
        };
        if let Some(motion) = motion {
            ed.move_cursor(motion, shift);
            return true;
        }

        match key.code {
            KeyCode::Char('a') if ctrl => ed.select_all(),
            KeyCode::Char('c') if ctrl => {
                ed.copy();
            }
            KeyCode::Char('x') if ctrl => {
                ed.cut();
            }
            KeyCode::Char('v') if ctrl => {
                ed.paste();
            }
            KeyCode::Char('z') if ctrl => {
                ed.undo();
            }
            KeyCode::Char('y') if ctrl => {
                ed.redo();
            }
            // Ctrl+K: delete to end of line (emacs/shell convention)
            KeyCode::Char('k') if ctrl => {
                ed.delete_to_end_of_line();
            }
            KeyCode::Char(']') if ctrl => {
                ed.jump_to_matching_bracket();
            }
            KeyCode::Char(_) if ctrl || key.alt() => return false,
            KeyCode::Char(c) => ed.insert_char(c),
            KeyCode::Enter => ed.insert_newline(),
            KeyCode::Tab => {
                if !ed.accept_suggestion() {
                    ed.insert_tab();
                }
            }
            KeyCode::Backspace if ctrl => {
                ed.delete_word_backward();
            }
            KeyCode::Backspace => {
                ed.delete_backward();
            }
            KeyCode::Delete => {
                ed.delete_forward();
            }
            KeyCode::Escape if ed.has_selection() => ed.clear_selection(),
            _ => return false,
        }
        true
    }

    fn draw_row(
        &self,
        ed: &Editor,
        frame: &mut Frame,
        line: usize,
        origin: Point,
        text_w: usize,
        base: Style,
        bracket: Option<Pos>,
    ) {
        let theme = *frame.theme();
        let tab_width = ed.config().tab_width;
        let (_, left) = ed.scroll_offset();
        let row = ed.buffer().row(line);
        let styles = self
            .highlighter
            .as_ref()
            .map(|h| h(line, &ed.buffer().row_string(line)))
            .unwrap_or_default();

        let mut vis = 0usize;
        for (col, &ch) in row.iter().enumerate() {
            let w = char_width_at(ch, vis, tab_width);
            let start = vis;
            vis += w;
            // Glyphs straddling the left edge are dropped whole.
            if start < left {
                continue;
            }
            let sx = start - left;
            if sx >= text_w {
                break;
            }

            let pos = Pos::new(line, col);
            let mut style = styles.get(col).copied().unwrap_or_default().merge(&base);
            if bracket == Some(pos) {
                style = theme.bracket_match.merge(&style);
            }
            if ed.is_selected(pos) {
                style = theme.selection.merge(&style);
            }

            let x = origin.x.saturating_add(sx as u16);
            match ch {
                '\t' => {
                    let cells = w.min(text_w - sx) as u16;
                    for i in 0..cells {
                        frame.put(x + i, origin.y, ' ', style);
                    }
                }
                _ if w == 0 => {}
                _ if sx + w > text_w => break,
                c if c.is_control() => frame.put(x, origin.y, '\u{FFFD}', style),
                c => frame.put(x, origin.y, c, style),
            }
        }

        // A selected line break shows as one highlighted cell past the end.
        let eol = Pos::new(line, row.len());
        if line + 1 < ed.line_count() && ed.is_selected(eol) && vis >= left && vis - left < text_w {
            let x = origin.x.saturating_add((vis - left) as u16);
            frame.put(x, origin.y, ' ', theme.selection);
        }
    }
}

impl Element for TextEditor {
    fn min_size(&self) -> Size {
        let gutter = self.gutter_width(self.editor.borrow().line_count());
        Size::new(gutter.saturating_add(1), 1)
    }

    fn grow_weight(&self) -> u16 {
        1
    }

    fn style(&self) -> Style {
        self.style
    }

    fn draw(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        #[cfg(feature = "tracing")]
        let _span =
            tracing::trace_span!("text_editor_draw", w = area.width, h = area.height).entered();

        let mut ed = self.editor.borrow_mut();
        let theme = *frame.theme();
        let gutter = self.gutter_width(ed.line_count());
        let text_x = area.x.saturating_add(gutter);
        let text_w = usize::from(area.width.saturating_sub(gutter));
        ed.set_viewport(text_w, usize::from(area.height));
        let ed = &*ed;

        let focused = self.focused.get();
        let cursor = ed.cursor();
        let (top, left) = ed.scroll_offset();
        let bracket = if focused { ed.matching_bracket() } else { None };

        for (screen_row, y) in (area.y..area.bottom()).enumerate() {
            let line = top + screen_row;
            if line >= ed.line_count() {
                break;
            }

            if gutter > 0 {
                let style = if line == cursor.row {
                    theme.line_number_active
                } else {
                    theme.line_number
                };
                let number = format!("{:>width$} ", line + 1, width = usize::from(gutter - 1));
                frame.print(area.x, y, &number, style, text_x);
            }

            let base = if focused && self.cursor_line && line == cursor.row {
                frame.fill(Rect::new(text_x, y, text_w as u16, 1), theme.cursor_line);
                theme.cursor_line
            } else {
                Style::new()
            };

            self.draw_row(ed, frame, line, Point::new(text_x, y), text_w, base, bracket);
        }

        if ed.is_empty() && !self.placeholder.is_empty() {
            frame.print(text_x, area.y, &self.placeholder, theme.text_muted, area.right());
        }

        if !focused || cursor.row < top || cursor.row - top >= usize::from(area.height) {
            return;
        }
        let vis = ed.cursor_visual_col();
        if vis < left || vis - left >= text_w {
            return;
        }
        let cursor_at = Point::new(
            text_x.saturating_add((vis - left) as u16),
            area.y.saturating_add((cursor.row - top) as u16),
        );
        if let Some(suggestion) = ed.suggestion() {
            frame.print(cursor_at.x, cursor_at.y, suggestion, theme.text_muted, area.right());
        }
        frame.set_cursor(Some(cursor_at));
    }

    fn as_hoverable(&self) -> Option<&dyn Hoverable> {
        Some(self)
    }

    fn as_clickable(&self) -> Option<&dyn Clickable> {
        Some(self)
    }

    fn as_scrollable(&self) -> Option<&dyn Scrollable> {
        Some(self)
    }

    fn as_focusable(&self) -> Option<&dyn Focusable> {
        Some(self)
    }

    fn as_key_handler(&self) -> Option<&dyn KeyHandler> {
        Some(self)
    }
}

impl KeyHandler for TextEditor {
    fn handle_key(&self, key: &KeyEvent) -> bool {
        if !key.is_press() {
            return false;
        }
        Self::handle_editor_key(&mut self.editor.borrow_mut(), key)
    }

    fn handle_paste(&self, text: &str) -> bool {
        self.editor.borrow_mut().insert_text(text);
        true
    }
}

impl Focusable for TextEditor {
    fn on_focus(&self) {
        self.focused.set(true);
    }

    fn on_blur(&self) {
        self.focused.set(false);
        self.drag_anchor.set(None);
    }

    fn is_focused(&self) -> bool {
        self.focused.get()
    }
}

impl Clickable for TextEditor {
    fn on_press(&self, local: Point, _event: &MouseEvent) {
        let mut ed = self.editor.borrow_mut();
        let pos = self.pos_at(&ed, local);
        ed.set_cursor(pos);
        self.drag_anchor.set(Some(ed.cursor()));
    }

    fn on_click(&self, _local: Point, _event: &MouseEvent) {
        self.drag_anchor.set(None);
    }
}

impl Hoverable for TextEditor {
    fn on_move(&self, local: Point, event: &MouseEvent) {
        match event.kind {
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(anchor) = self.drag_anchor.get() {
                    let mut ed = self.editor.borrow_mut();
                    let head = self.pos_at(&ed, local);
                    ed.set_selection(anchor, head);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.drag_anchor.set(None),
            _ => {}
        }
    }

    fn on_leave(&self) {
        self.drag_anchor.set(None);
    }
}

impl Scrollable for TextEditor {
    fn on_scroll(&self, delta: i32, _local: Point) {
        let rows = isize::try_from(delta).unwrap_or(0) * WHEEL_ROWS;
        self.editor.borrow_mut().scroll_by(rows);
    }
}
