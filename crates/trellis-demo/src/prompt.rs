#![forbid(unsafe_code)]

//! One-line input overlay for the find and go-to-line bindings.

use std::cell::RefCell;
use std::rc::Rc;

use trellis::{
    Control, Element, ElementRef, Focusable, Frame, KeyCode, KeyEvent, KeyHandler, LayoutNode,
    Rect, Size, TextEditor,
};

type Submit = Box<dyn Fn(&str) -> Result<(), String>>;

const FIELD_WIDTH: u16 = 32;

/// A title row above a single-line field.
///
/// Enter hands the field text to the submit callback. `Ok` dismisses the
/// overlay; `Err` keeps it open and shows the message in place of the
/// title. Escape falls through to the manager, which dismisses.
pub struct Prompt {
    title: String,
    message: RefCell<Option<String>>,
    field: Rc<TextEditor>,
    control: Control,
    submit: Submit,
}

impl Prompt {
    pub fn new(
        title: impl Into<String>,
        control: Control,
        submit: impl Fn(&str) -> Result<(), String> + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            message: RefCell::new(None),
            field: Rc::new(TextEditor::new().with_cursor_line(false)),
            control,
            submit: Box::new(submit),
        }
    }

    /// Pre-fill the field, selected so typing replaces it.
    #[must_use]
    pub fn with_value(self, value: &str) -> Self {
        if !value.is_empty() {
            self.field.set_text(value);
            self.field.editor_mut().select_all();
        }
        self
    }

    pub fn value(&self) -> String {
        self.field.text()
    }

    /// Error from the last rejected submit.
    pub fn message(&self) -> Option<String> {
        self.message.borrow().clone()
    }

    fn submit(&self) {
        match (self.submit)(&self.value()) {
            Ok(()) => self.control.dismiss_overlay(),
            Err(message) => *self.message.borrow_mut() = Some(message),
        }
    }
}

impl Element for Prompt {
    fn min_size(&self) -> Size {
        let title = u16::try_from(self.title.chars().count()).unwrap_or(u16::MAX);
        Size::new(title.max(FIELD_WIDTH), 2)
    }

    fn layout_children(&self, area: Rect) -> Vec<LayoutNode> {
        if area.height < 2 {
            return Vec::new();
        }
        let row = Rect::new(area.x, area.y + 1, area.width, 1);
        vec![LayoutNode::new(Rc::clone(&self.field) as ElementRef, row)]
    }

    fn draw(&self, area: Rect, frame: &mut Frame) {
        let message = self.message.borrow();
        let (text, style) = match message.as_deref() {
            Some(message) => (message, frame.theme().text_muted),
            None => (self.title.as_str(), frame.theme().text),
        };
        frame.print(area.x, area.y, text, style, area.right());
    }

    fn as_focusable(&self) -> Option<&dyn Focusable> {
        Some(self)
    }

    fn as_key_handler(&self) -> Option<&dyn KeyHandler> {
        Some(self)
    }
}

impl Focusable for Prompt {
    fn on_focus(&self) {
        self.field.on_focus();
    }

    fn on_blur(&self) {
        self.field.on_blur();
    }

    fn is_focused(&self) -> bool {
        self.field.is_focused()
    }
}

impl KeyHandler for Prompt {
    fn handle_key(&self, key: &KeyEvent) -> bool {
        if key.is_press() && key.code == KeyCode::Enter {
            self.submit();
            return true;
        }
        self.message.borrow_mut().take();
        self.field.handle_key(key)
    }

    fn handle_paste(&self, text: &str) -> bool {
        let line = text.lines().next().unwrap_or_default();
        self.field.handle_paste(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use trellis::{Command, ElementExt, IntoElement, Theme};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    fn type_text(prompt: &Prompt, text: &str) {
        for c in text.chars() {
            prompt.handle_key(&press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn enter_submits_and_dismisses_on_success() {
        let control = Control::new();
        let seen = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&seen);
        let prompt = Prompt::new("Find:", control.clone(), move |text| {
            sink.borrow_mut().push_str(text);
            Ok(())
        });

        type_text(&prompt, "needle");
        assert!(prompt.handle_key(&press(KeyCode::Enter)));
        assert_eq!(*seen.borrow(), "needle");
        assert!(matches!(control.take().as_slice(), [Command::DismissOverlay]));
    }

    #[test]
    fn rejected_submit_stays_open_with_message() {
        let control = Control::new();
        let prompt = Prompt::new("Go to line:", control.clone(), |_| Err("not a number".into()));

        type_text(&prompt, "x");
        prompt.handle_key(&press(KeyCode::Enter));
        assert!(control.is_empty());
        assert_eq!(prompt.message().as_deref(), Some("not a number"));
        assert_eq!(prompt.value(), "x");

        prompt.handle_key(&press(KeyCode::Backspace));
        assert_eq!(prompt.message(), None);
    }

    #[test]
    fn escape_and_enter_release_fall_through() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let prompt = Prompt::new("Find:", Control::new(), move |_| {
            counter.set(counter.get() + 1);
            Ok(())
        });
        assert!(!prompt.handle_key(&press(KeyCode::Escape)));
        let release = press(KeyCode::Enter).with_kind(trellis::KeyEventKind::Release);
        assert!(!prompt.handle_key(&release));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn paste_keeps_only_the_first_line() {
        let prompt = Prompt::new("Find:", Control::new(), |_| Ok(()));
        prompt.handle_paste("first\nsecond");
        assert_eq!(prompt.value(), "first");
    }

    #[test]
    fn preset_value_is_replaced_by_typing() {
        let prompt = Prompt::new("Find:", Control::new(), |_| Ok(())).with_value("old");
        type_text(&prompt, "n");
        assert_eq!(prompt.value(), "n");
    }

    #[test]
    fn draws_title_above_field() {
        let prompt = Prompt::new("Find:", Control::new(), |_| Ok(())).with_value("abc");
        let el = prompt.into_element();
        let node = el.layout(Rect::new(0, 0, 32, 2));
        let mut frame = trellis::Frame::new(32, 2, Theme::default());
        node.render(&mut frame);
        assert!(frame.buffer.row_text(0).starts_with("Find:"));
        assert!(frame.buffer.row_text(1).starts_with("abc"));
    }
}
