#![forbid(unsafe_code)]

//! The demo's element tree and key bindings.
//!
//! ```text
//! ╭──────────────────────────────────╮
//! │ Notes  Scratch  About            │
//! │ editor for the active page       │
//! ╰──────────────────────────────────╯
//!  Notes  Ln 1, Col 1      F1 help ...
//! ```

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use trellis::{
    BorderChars, Control, Decorate, Divider, ElementRef, IntoElement, KeyCode, KeyCombo, Label,
    Manager, Placement, Screen, Stack, Tabs, TextEditor,
};

use crate::assist::{complete, highlight_line};
use crate::cli::{HELP_TEXT, Opts};
use crate::prompt::Prompt;
use crate::status::StatusBar;

const ABOUT: &str = "\
Trellis demo

Every page is an element. Tabs delegate focus
to the active page; the status bar reads the
editor it describes.";

/// Shared handles into the element tree.
pub struct App {
    pub notes: Rc<TextEditor>,
    pub scratch: Rc<TextEditor>,
    pub tabs: Rc<Tabs>,
    pub root: ElementRef,
    file: Option<PathBuf>,
}

/// The tabs plus the editor on each page, for bindings that act on
/// whichever page is showing.
#[derive(Clone)]
struct Pages {
    tabs: Rc<Tabs>,
    editors: Vec<Rc<TextEditor>>,
}

impl Pages {
    fn active(&self) -> Option<Rc<TextEditor>> {
        self.editors.get(self.tabs.active()).cloned()
    }
}

impl App {
    /// Build the tree. `text` seeds the notes page.
    pub fn new(opts: &Opts, text: &str) -> Self {
        let notes = Rc::new(
            TextEditor::new()
                .with_text(text)
                .with_line_numbers(opts.line_numbers)
                .with_placeholder("Start typing. F1 shows the key bindings.")
                .with_highlighter(highlight_line),
        );
        notes.editor_mut().set_suggestion_provider(complete);
        let scratch = Rc::new(TextEditor::new().with_placeholder("Scratch space, never saved."));

        let tabs = Rc::new(
            Tabs::new()
                .page("Notes", Rc::clone(&notes))
                .page("Scratch", Rc::clone(&scratch))
                .page("About", Label::new(ABOUT).pad((1, 2))),
        );
        let status = StatusBar::new(
            Rc::clone(&tabs),
            vec![Rc::clone(&notes), Rc::clone(&scratch)],
        );

        let root = Stack::vertical()
            .child(Rc::clone(&tabs).border_with(BorderChars::ROUNDED).grow(1))
            .child(status)
            .into_element();

        Self {
            notes,
            scratch,
            tabs,
            root,
            file: opts.file.clone(),
        }
    }

    /// Read `opts.file` if it exists; a missing file starts empty.
    pub fn load(opts: &Opts) -> io::Result<Self> {
        let text = match &opts.file {
            Some(path) if path.exists() => fs::read_to_string(path)?,
            _ => String::new(),
        };
        Ok(Self::new(opts, &text))
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    fn pages(&self) -> Pages {
        Pages {
            tabs: Rc::clone(&self.tabs),
            editors: vec![Rc::clone(&self.notes), Rc::clone(&self.scratch)],
        }
    }

    /// Focus the tabs and register the global bindings.
    pub fn install<S: Screen>(&self, manager: &mut Manager<S>) {
        manager.set_focus(Rc::clone(&self.tabs));

        manager.bind("quit", KeyCombo::ctrl('q'), |ctl| ctl.quit());

        let tabs = Rc::clone(&self.tabs);
        manager.bind("next-page", KeyCombo::ctrl('n'), move |_| tabs.next());
        let tabs = Rc::clone(&self.tabs);
        manager.bind("prev-page", KeyCombo::ctrl('p'), move |_| tabs.prev());

        let help = help_overlay();
        manager.bind("help", KeyCombo::key(KeyCode::F(1)), move |ctl| {
            ctl.show_overlay(Rc::clone(&help), Placement::Center);
        });

        let last_find = Rc::new(RefCell::new(String::new()));
        let pages = self.pages();
        let needle = Rc::clone(&last_find);
        manager.bind("find", KeyCombo::ctrl('f'), move |ctl| {
            if let Some(editor) = pages.active() {
                let prompt = find_prompt(editor, Rc::clone(&needle), ctl.clone());
                ctl.show_overlay(prompt.border_with(BorderChars::ROUNDED), Placement::Center);
            }
        });

        let pages = self.pages();
        manager.bind("find-next", KeyCombo::key(KeyCode::F(3)), move |_| {
            let needle = last_find.borrow();
            if needle.is_empty() {
                return;
            }
            if let Some(editor) = pages.active()
                && !editor.editor_mut().find_next(&needle)
            {
                tracing::info!(needle = %needle, "no match");
            }
        });

        let pages = self.pages();
        manager.bind("goto-line", KeyCombo::ctrl('g'), move |ctl| {
            if let Some(editor) = pages.active() {
                let prompt = goto_prompt(editor, ctl.clone());
                ctl.show_overlay(prompt.border_with(BorderChars::ROUNDED), Placement::Center);
            }
        });

        let notes = Rc::clone(&self.notes);
        let file = self.file.clone();
        manager.bind("save", KeyCombo::ctrl('s'), move |_| {
            let Some(path) = &file else {
                tracing::info!("no file to save to");
                return;
            };
            match save(&notes, path) {
                Ok(bytes) => tracing::info!(path = %path.display(), bytes, "notes saved"),
                Err(err) => tracing::warn!(path = %path.display(), %err, "save failed"),
            }
        });
    }
}

/// Write the editor's text to `path` and mark it clean.
pub fn save(editor: &TextEditor, path: &Path) -> io::Result<usize> {
    let text = editor.text();
    fs::write(path, &text)?;
    editor.editor_mut().mark_clean();
    Ok(text.len())
}

/// Prompt that selects the next match of its text in `editor` and
/// remembers it in `last` for F3.
fn find_prompt(editor: Rc<TextEditor>, last: Rc<RefCell<String>>, control: Control) -> Prompt {
    let preset = last.borrow().clone();
    Prompt::new("Find:", control, move |text| {
        if text.is_empty() {
            return Err("Find: type something to search for".into());
        }
        text.clone_into(&mut last.borrow_mut());
        if editor.editor_mut().find_next(text) {
            Ok(())
        } else {
            Err(format!("No match for \"{text}\""))
        }
    })
    .with_value(&preset)
}

/// Prompt that moves `editor` to a 1-based line number.
fn goto_prompt(editor: Rc<TextEditor>, control: Control) -> Prompt {
    Prompt::new("Go to line:", control, move |text| {
        match text.trim().parse::<usize>() {
            Ok(line) if line > 0 => {
                editor.editor_mut().goto_line(line);
                Ok(())
            }
            _ => Err(format!("Not a line number: {}", text.trim())),
        }
    })
}

/// Bordered key reference shown by F1.
pub fn help_overlay() -> ElementRef {
    let keys = HELP_TEXT
        .split("KEYBINDINGS:\n")
        .nth(1)
        .and_then(|rest| rest.split("\n\n").next())
        .unwrap_or_default();
    let lines: Vec<&str> = keys.lines().map(str::trim_start).collect();

    Stack::vertical()
        .child(Label::new("Key bindings"))
        .child(Divider::new())
        .child(Label::new(lines.join("\n")))
        .pad((0, 1))
        .border_with(BorderChars::ROUNDED)
        .into_element()
}
