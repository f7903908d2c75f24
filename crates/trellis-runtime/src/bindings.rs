#![forbid(unsafe_code)]

//! Global key bindings and the command queue.
//!
//! A binding maps a [`KeyCombo`] to an action under a name. Actions run
//! when a key reaches the bindings stage of dispatch (the focused element
//! did not consume it) and talk back to the event loop through a
//! [`Control`] handle, which queues [`Command`]s. The loop applies queued
//! commands after each event.
//!
//! ```
//! use trellis_core::event::{KeyCode, KeyEvent, Modifiers};
//! use trellis_runtime::{Bindings, Command, Control, KeyCombo};
//!
//! let mut bindings = Bindings::new();
//! bindings.bind("quit", KeyCombo::ctrl('q'), |ctl: &Control| ctl.quit());
//!
//! let control = Control::new();
//! let key = KeyEvent::new(KeyCode::Char('q')).with_modifiers(Modifiers::CTRL);
//! assert!(bindings.dispatch(&key, &control));
//! assert!(matches!(control.take().as_slice(), [Command::Quit]));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;
use trellis_core::event::{KeyCode, KeyEvent, Modifiers};
use trellis_layout::Placement;
use trellis_widgets::{ElementRef, IntoElement};

/// A key plus modifiers, as matched by [`Bindings`].
///
/// Shift is ignored for character keys: the character already reflects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    #[must_use]
    pub fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        let modifiers = match code {
            KeyCode::Char(_) => modifiers - Modifiers::SHIFT,
            _ => modifiers,
        };
        Self { code, modifiers }
    }

    /// Unmodified key.
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    /// Ctrl plus a character.
    #[must_use]
    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::CTRL)
    }

    /// Alt plus a character.
    #[must_use]
    pub fn alt(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::ALT)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        *self == KeyCombo::from(key)
    }
}

impl From<&KeyEvent> for KeyCombo {
    fn from(key: &KeyEvent) -> Self {
        Self::new(key.code, key.modifiers)
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (Modifiers::CTRL, "Ctrl+"),
            (Modifiers::ALT, "Alt+"),
            (Modifiers::SHIFT, "Shift+"),
            (Modifiers::SUPER, "Super+"),
        ] {
            if self.modifiers.contains(flag) {
                f.write_str(name)?;
            }
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("Space"),
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            KeyCode::F(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Deferred request to the event loop.
pub enum Command {
    /// Stop the loop after the current event.
    Quit,
    /// Assign focus (delegation applies).
    Focus(ElementRef),
    /// Show an overlay, replacing any open one.
    ShowOverlay(ElementRef, Placement),
    /// Close the open overlay and restore the focus it replaced.
    DismissOverlay,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quit => write!(f, "Quit"),
            Self::Focus(_) => write!(f, "Focus(..)"),
            Self::ShowOverlay(_, placement) => {
                f.debug_tuple("ShowOverlay").field(placement).finish()
            }
            Self::DismissOverlay => write!(f, "DismissOverlay"),
        }
    }
}

/// Cloneable handle for queueing [`Command`]s.
///
/// Clones share one queue, so element callbacks built before the loop
/// starts can hold a handle from [`Manager::control`].
///
/// [`Manager::control`]: crate::Manager::control
#[derive(Clone, Default)]
pub struct Control {
    queue: Rc<RefCell<Vec<Command>>>,
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("pending", &self.queue.borrow().len())
            .finish()
    }
}

impl Control {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, command: Command) {
        self.queue.borrow_mut().push(command);
    }

    pub fn quit(&self) {
        self.push(Command::Quit);
    }

    pub fn focus(&self, element: impl IntoElement) {
        self.push(Command::Focus(element.into_element()));
    }

    pub fn show_overlay(&self, element: impl IntoElement, placement: Placement) {
        self.push(Command::ShowOverlay(element.into_element(), placement));
    }

    pub fn dismiss_overlay(&self) {
        self.push(Command::DismissOverlay);
    }

    /// Drain queued commands in order.
    pub fn take(&self) -> Vec<Command> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

/// Action run for a binding.
pub type Action = Box<dyn FnMut(&Control)>;

struct Binding {
    name: String,
    combo: KeyCombo,
    action: Action,
}

/// Named global key bindings.
#[derive(Default)]
pub struct Bindings {
    entries: Vec<Binding>,
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|b| (&b.name, b.combo)))
            .finish()
    }
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` for `combo` under `name`. A binding with the same
    /// name is replaced.
    pub fn bind(
        &mut self,
        name: impl Into<String>,
        combo: KeyCombo,
        action: impl FnMut(&Control) + 'static,
    ) {
        let name = name.into();
        let binding = Binding {
            name,
            combo,
            action: Box::new(action),
        };
        match self.entries.iter_mut().find(|b| b.name == binding.name) {
            Some(existing) => *existing = binding,
            None => self.entries.push(binding),
        }
    }

    /// Remove the binding called `name`. Returns whether one existed.
    pub fn unbind(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|b| b.name != name);
        self.entries.len() != before
    }

    /// Combo bound under `name`.
    pub fn combo(&self, name: &str) -> Option<KeyCombo> {
        self.entries.iter().find(|b| b.name == name).map(|b| b.combo)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the first binding matching `key`. Returns whether one ran.
    pub fn dispatch(&mut self, key: &KeyEvent, control: &Control) -> bool {
        let combo = KeyCombo::from(key);
        match self.entries.iter_mut().find(|b| b.combo == combo) {
            Some(binding) => {
                debug!(name = %binding.name, combo = %combo, "binding triggered");
                (binding.action)(control);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn shift_is_ignored_for_characters() {
        let key =
            KeyEvent::new(KeyCode::Char('Q')).with_modifiers(Modifiers::CTRL | Modifiers::SHIFT);
        assert_eq!(KeyCombo::from(&key), KeyCombo::ctrl('Q'));
        let tab = KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT);
        assert_ne!(KeyCombo::from(&tab), KeyCombo::key(KeyCode::Tab));
    }

    #[test]
    fn display_names() {
        assert_eq!(KeyCombo::ctrl('s').to_string(), "Ctrl+S");
        assert_eq!(KeyCombo::alt(' ').to_string(), "Alt+Space");
        assert_eq!(KeyCombo::key(KeyCode::F(5)).to_string(), "F5");
        assert_eq!(KeyCombo::key(KeyCode::Escape).to_string(), "Escape");
    }

    #[test]
    fn rebinding_a_name_replaces_it() {
        let hits = Rc::new(Cell::new(0));
        let mut bindings = Bindings::new();
        bindings.bind("save", KeyCombo::ctrl('s'), |_: &Control| {});
        let counter = Rc::clone(&hits);
        bindings.bind("save", KeyCombo::key(KeyCode::F(2)), move |_: &Control| {
            counter.set(counter.get() + 1)
        });
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings.combo("save"), Some(KeyCombo::key(KeyCode::F(2))));

        let control = Control::new();
        let ctrl_s = KeyEvent::new(KeyCode::Char('s')).with_modifiers(Modifiers::CTRL);
        assert!(!bindings.dispatch(&ctrl_s, &control));
        assert!(bindings.dispatch(&KeyEvent::new(KeyCode::F(2)), &control));
        assert_eq!(hits.get(), 1);

        assert!(bindings.unbind("save"));
        assert!(!bindings.unbind("save"));
        assert!(bindings.is_empty());
    }

    #[test]
    fn control_clones_share_queue() {
        let control = Control::new();
        let other = control.clone();
        other.dismiss_overlay();
        control.quit();
        let commands = control.take();
        assert!(matches!(commands.as_slice(), [Command::DismissOverlay, Command::Quit]));
        assert!(other.is_empty());
    }
}
