#![forbid(unsafe_code)]

//! Snapshot undo/redo.
//!
//! Before every logical edit the editor records a [`Snapshot`] of the buffer,
//! cursor, and selection. Undo swaps the current state with the newest undo
//! snapshot; redo does the reverse. Any new edit clears the redo stack, so
//! history stays linear.
//!
//! Consecutive [`EditKind::Typing`] edits share one snapshot: only the first
//! keystroke of a run records, and the run ends at the first edit of another
//! kind or an explicit [`History::break_merge`].

use tracing::trace;

use crate::buffer::TextBuffer;
use crate::position::{Pos, Selection};

/// Saved editor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub buffer: TextBuffer,
    pub cursor: Pos,
    pub selection: Selection,
    /// Editor content revision at the time of the snapshot.
    pub revision: u64,
}

/// How an edit participates in undo grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// A typed character; merges with the preceding typed characters.
    Typing,
    /// Anything else; always its own undo step.
    Other,
}

/// Bounded undo/redo stacks.
#[derive(Debug, Clone)]
pub struct History {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
    max_depth: usize,
    merging: bool,
}

impl Default for History {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl History {
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            max_depth,
            merging: false,
        }
    }

    /// Record the state before an edit.
    ///
    /// Returns `true` if a new undo step was pushed, `false` if the edit
    /// merged into the current typing run.
    pub fn record(&mut self, before: Snapshot, kind: EditKind) -> bool {
        self.redo.clear();
        if kind == EditKind::Typing && self.merging {
            return false;
        }
        self.undo.push(before);
        self.trim();
        self.merging = kind == EditKind::Typing;
        true
    }

    /// End the current typing run.
    pub fn break_merge(&mut self) {
        self.merging = false;
    }

    /// Swap `current` for the newest undo snapshot.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        self.merging = false;
        let previous = self.undo.pop()?;
        self.redo.push(current);
        trace!(undo = self.undo.len(), redo = self.redo.len(), "undo");
        Some(previous)
    }

    /// Swap `current` for the newest redo snapshot.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        self.merging = false;
        let next = self.redo.pop()?;
        self.undo.push(current);
        trace!(undo = self.undo.len(), redo = self.redo.len(), "redo");
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.merging = false;
    }

    /// Change the depth limit, dropping the oldest steps if needed.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
        self.trim();
    }

    fn trim(&mut self) {
        if self.undo.len() > self.max_depth {
            let excess = self.undo.len() - self.max_depth;
            self.undo.drain(..excess);
            trace!(dropped = excess, "history trimmed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn snap(text: &str) -> Snapshot {
        Snapshot {
            buffer: TextBuffer::from_text(text),
            cursor: Pos::default(),
            selection: Selection::inactive(),
            revision: 0,
        }
    }

    #[test]
    fn undo_redo_swap() {
        let mut h = History::default();
        h.record(snap("a"), EditKind::Other);
        let prev = h.undo(snap("ab")).map(|s| s.buffer.text());
        assert_eq!(prev.as_deref(), Some("a"));
        let next = h.redo(snap("a")).map(|s| s.buffer.text());
        assert_eq!(next.as_deref(), Some("ab"));
        assert!(h.can_undo());
        assert!(!h.can_redo());
    }

    #[test]
    fn empty_stacks_are_noops() {
        let mut h = History::default();
        assert!(h.undo(snap("x")).is_none());
        assert!(h.redo(snap("x")).is_none());
    }

    #[test]
    fn typing_merges_until_broken() {
        let mut h = History::default();
        assert!(h.record(snap(""), EditKind::Typing));
        assert!(!h.record(snap("a"), EditKind::Typing));
        assert!(!h.record(snap("ab"), EditKind::Typing));
        assert_eq!(h.undo_depth(), 1);

        h.break_merge();
        assert!(h.record(snap("abc"), EditKind::Typing));
        assert!(h.record(snap("abcd"), EditKind::Other));
        assert!(h.record(snap("abcd\n"), EditKind::Typing));
        assert_eq!(h.undo_depth(), 4);
    }

    #[test]
    fn new_edit_clears_redo() {
        let mut h = History::default();
        h.record(snap(""), EditKind::Other);
        h.undo(snap("a"));
        assert!(h.can_redo());
        h.record(snap(""), EditKind::Other);
        assert!(!h.can_redo());
    }

    #[test]
    fn depth_is_bounded() {
        let mut h = History::new(3);
        for i in 0..10 {
            h.record(snap(&i.to_string()), EditKind::Other);
        }
        assert_eq!(h.undo_depth(), 3);
        let oldest = (0..3).filter_map(|_| h.undo(snap("now"))).last();
        assert_eq!(oldest.map(|s| s.buffer.text()).as_deref(), Some("7"));

        h.set_max_depth(1);
        assert_eq!(h.undo_depth(), 0);
    }

    #[test]
    #[traced_test]
    fn undo_is_traced() {
        let mut h = History::default();
        h.record(snap(""), EditKind::Other);
        h.undo(snap("a"));
        assert!(logs_contain("undo"));
    }
}
