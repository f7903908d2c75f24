#![forbid(unsafe_code)]

//! Editing operations on top of [`TextBuffer`] + [`History`].
//!
//! [`Editor`] owns the buffer, the cursor (which doubles as the selection
//! head), the selection anchor, the scroll offset, and the undo history. It
//! provides the editing operations that power the `TextEditor` element but
//! knows nothing about drawing or input events.
//!
//! Every operation leaves the cursor inside the buffer. Content changes go
//! through one path: snapshot, record, mutate, then mark dirty, keep the
//! cursor visible, and notify the change callback.
//!
//! # Example
//! ```
//! use trellis_text::{Editor, Motion};
//!
//! let mut ed = Editor::new();
//! ed.insert_text("hello");
//! ed.insert_char(' ');
//! ed.insert_text("world");
//! assert_eq!(ed.text(), "hello world");
//!
//! ed.move_cursor(Motion::WordLeft, false);
//! ed.move_cursor(Motion::Left, false);
//! ed.delete_backward();
//! assert_eq!(ed.text(), "hell world");
//! ```

use std::fmt;

use crate::bracket;
use crate::buffer::TextBuffer;
use crate::config::EditorConfig;
use crate::history::{EditKind, History, Snapshot};
use crate::position::{Pos, Selection, span_contains};
use crate::search;
use crate::width::{col_at_visual, visual_col};
use crate::word::{next_word_end, prev_word_start, word_prefix_start, word_range};

/// Cursor motions understood by [`Editor::move_cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    /// First non-blank column; from there, column zero.
    SmartHome,
    LineEnd,
    WordLeft,
    WordRight,
    DocumentStart,
    DocumentEnd,
    PageUp,
    PageDown,
}

impl Motion {
    fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::PageUp | Self::PageDown)
    }
}

/// Completion source: receives the word prefix before the cursor and returns
/// the text to append after it.
pub type SuggestionProvider = Box<dyn Fn(&str) -> Option<String>>;

/// Called after every content change.
pub type ChangeCallback = Box<dyn FnMut()>;

/// Multi-line text editor state.
pub struct Editor {
    buffer: TextBuffer,
    cursor: Pos,
    selection: Selection,
    /// First visible row.
    scroll_top: usize,
    /// First visible visual column.
    scroll_left: usize,
    /// `(width, height)` in cells; zero means unknown.
    viewport: (usize, usize),
    /// Visual column kept across vertical moves.
    goal_col: Option<usize>,
    history: History,
    /// Content revision; every edit gets a fresh one and undo/redo restore
    /// the revision they return to.
    revision: u64,
    next_revision: u64,
    clean_revision: u64,
    on_change: Option<ChangeCallback>,
    suggestion: Option<String>,
    suggest: Option<SuggestionProvider>,
    clipboard: String,
    config: EditorConfig,
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("rows", &self.buffer.row_count())
            .field("cursor", &self.cursor)
            .field("selection", &self.selection)
            .field("scroll", &(self.scroll_top, self.scroll_left))
            .field("viewport", &self.viewport)
            .field("dirty", &self.is_dirty())
            .field("suggestion", &self.suggestion)
            .finish_non_exhaustive()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an empty editor with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            buffer: TextBuffer::new(),
            cursor: Pos::default(),
            selection: Selection::inactive(),
            scroll_top: 0,
            scroll_left: 0,
            viewport: (0, 0),
            goal_col: None,
            history: History::new(config.max_history),
            revision: 0,
            next_revision: 1,
            clean_revision: 0,
            on_change: None,
            suggestion: None,
            suggest: None,
            clipboard: String::new(),
            config: EditorConfig {
                tab_width: config.tab_width.max(1),
                ..config
            },
        }
    }

    /// Create an editor holding `text`, cursor at the start.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let mut ed = Self::new();
        ed.set_text(text);
        ed
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EditorConfig) {
        self.history.set_max_depth(config.max_history);
        self.config = EditorConfig {
            tab_width: config.tab_width.max(1),
            ..config
        };
        self.ensure_cursor_visible();
    }

    // ====================================================================
    // Content
    // ====================================================================

    /// Full content, rows joined by `'\n'`.
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Replace the whole content.
    ///
    /// Resets cursor, selection, scroll, history, and the dirty flag. The
    /// change callback is not invoked: this is a load, not an edit.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = TextBuffer::from_text(text);
        self.cursor = Pos::default();
        self.selection = Selection::inactive();
        self.scroll_top = 0;
        self.scroll_left = 0;
        self.goal_col = None;
        self.history.clear();
        self.revision = self.bump_revision();
        self.clean_revision = self.revision;
        self.suggestion = None;
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn line_count(&self) -> usize {
        self.buffer.row_count()
    }

    /// Text of a row, or `None` past the last row.
    pub fn line(&self, row: usize) -> Option<String> {
        (row < self.buffer.row_count()).then(|| self.buffer.row_string(row))
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    // ====================================================================
    // Cursor and selection
    // ====================================================================

    pub fn cursor(&self) -> Pos {
        self.cursor
    }

    /// Move the cursor to `pos` (clamped) and drop the selection.
    pub fn set_cursor(&mut self, pos: Pos) {
        self.break_run();
        self.cursor = self.buffer.clamp(pos);
        self.selection = Selection::inactive();
        self.goal_col = None;
        self.ensure_cursor_visible();
    }

    /// Apply a motion. With `extend`, the selection grows from where the
    /// cursor was (starting one if needed); without it, the selection is
    /// dropped.
    pub fn move_cursor(&mut self, motion: Motion, extend: bool) {
        self.break_run();
        if extend {
            if !self.selection.active {
                self.selection = Selection::at(self.cursor);
            }
        } else {
            self.selection = Selection::inactive();
        }
        if !motion.is_vertical() {
            self.goal_col = None;
        }

        let pos = self.cursor;
        let row = self.buffer.row(pos.row);
        let page = self.viewport.1.max(1);
        let last_row = self.buffer.row_count() - 1;
        let target = match motion {
            Motion::Left => self.buffer.prev_pos(pos),
            Motion::Right => self.buffer.next_pos(pos),
            Motion::Up => return self.move_vertical(pos.row.checked_sub(1)),
            Motion::Down => {
                let below = (pos.row < last_row).then_some(pos.row + 1);
                return self.move_vertical(below);
            }
            Motion::PageUp => {
                let above = (pos.row > 0).then(|| pos.row.saturating_sub(page));
                self.scroll_top = self.scroll_top.saturating_sub(page);
                return self.move_vertical(above);
            }
            Motion::PageDown => {
                let below = (pos.row < last_row).then(|| (pos.row + page).min(last_row));
                self.scroll_top = (self.scroll_top + page).min(self.max_scroll_top());
                return self.move_vertical(below);
            }
            Motion::LineStart => Pos::new(pos.row, 0),
            Motion::SmartHome => {
                let first = row
                    .iter()
                    .position(|c| !c.is_whitespace())
                    .unwrap_or(row.len());
                Pos::new(pos.row, if pos.col == first { 0 } else { first })
            }
            Motion::LineEnd => Pos::new(pos.row, row.len()),
            Motion::WordLeft if pos.col == 0 => self.buffer.prev_pos(pos),
            Motion::WordLeft => Pos::new(pos.row, prev_word_start(row, pos.col)),
            Motion::WordRight if pos.col == row.len() => self.buffer.next_pos(pos),
            Motion::WordRight => Pos::new(pos.row, next_word_end(row, pos.col)),
            Motion::DocumentStart => Pos::default(),
            Motion::DocumentEnd => self.buffer.end(),
        };
        self.cursor = target;
        self.ensure_cursor_visible();
    }

    /// Move to `row` keeping the goal column. `None` leaves the cursor where
    /// it is (top or bottom edge).
    fn move_vertical(&mut self, row: Option<usize>) {
        if let Some(row) = row {
            let goal = self
                .goal_col
                .unwrap_or_else(|| self.visual_col(self.cursor));
            let col = col_at_visual(self.buffer.row(row), goal, self.config.tab_width);
            self.cursor = Pos::new(row, col);
            self.goal_col = Some(goal);
        }
        self.ensure_cursor_visible();
    }

    /// Select from `anchor` to `head`; the cursor moves to `head`.
    pub fn set_selection(&mut self, anchor: Pos, head: Pos) {
        self.break_run();
        self.selection = Selection::at(self.buffer.clamp(anchor));
        self.cursor = self.buffer.clamp(head);
        self.goal_col = None;
        self.ensure_cursor_visible();
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::inactive();
    }

    /// Normalized `(start, end)` of the active selection.
    pub fn selection_range(&self) -> Option<(Pos, Pos)> {
        self.selection.range(self.cursor)
    }

    /// True when a selection is active and covers something.
    pub fn has_selection(&self) -> bool {
        self.selection.is_nonempty(self.cursor)
    }

    pub fn select_all(&mut self) {
        let end = self.buffer.end();
        self.set_selection(Pos::default(), end);
    }

    /// Select the identifier around the cursor. Returns `false` (and changes
    /// nothing) when the cursor is not touching one.
    pub fn select_word(&mut self) -> bool {
        let (start, end) = word_range(self.buffer.row(self.cursor.row), self.cursor.col);
        if start == end {
            return false;
        }
        let row = self.cursor.row;
        self.set_selection(Pos::new(row, start), Pos::new(row, end));
        true
    }

    #[must_use]
    pub fn selected_text(&self) -> Option<String> {
        let (start, end) = self.selection_range()?;
        (start != end).then(|| self.buffer.slice(start, end))
    }

    /// Whether the code point at `pos` is inside the selection.
    pub fn is_selected(&self, pos: Pos) -> bool {
        self.selection_range()
            .is_some_and(|(start, end)| span_contains(start, end, pos))
    }

    // ====================================================================
    // Insertion
    // ====================================================================

    /// Type one character. Consecutive calls form one undo step.
    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' || ch == '\r' {
            self.insert_newline();
            return;
        }
        let kind = if self.has_selection() {
            self.history.break_merge();
            EditKind::Other
        } else {
            EditKind::Typing
        };
        self.begin_edit(kind);
        self.remove_selection();
        self.cursor = self.buffer.insert(self.cursor, ch.encode_utf8(&mut [0; 4]));
        self.finish_edit();
        if kind == EditKind::Other {
            // A replaced selection is its own step; typing after it is not.
            self.history.break_merge();
        }
        self.refresh_suggestion();
    }

    /// Insert text (may contain line breaks), replacing any selection.
    pub fn insert_text(&mut self, text: &str) {
        self.break_run();
        if text.is_empty() && !self.has_selection() {
            return;
        }
        self.begin_edit(EditKind::Other);
        self.remove_selection();
        self.cursor = self.buffer.insert(self.cursor, text);
        self.finish_edit();
    }

    /// Split the row at the cursor. With auto-indent, the new row starts
    /// with the leading whitespace of the current one.
    pub fn insert_newline(&mut self) {
        self.break_run();
        self.begin_edit(EditKind::Other);
        self.remove_selection();
        let mut text = String::from("\n");
        if self.config.auto_indent {
            let row = self.buffer.row(self.cursor.row);
            text.extend(
                row[..self.cursor.col]
                    .iter()
                    .take_while(|c| **c == ' ' || **c == '\t'),
            );
        }
        self.cursor = self.buffer.insert(self.cursor, &text);
        self.finish_edit();
    }

    /// Insert a tab: `'\t'`, or spaces to the next stop with `expand_tabs`.
    pub fn insert_tab(&mut self) {
        if self.config.expand_tabs {
            let tab = self.config.tab_width.max(1);
            let vis = self.visual_col(self.cursor);
            self.insert_text(&" ".repeat(tab - vis % tab));
        } else {
            self.insert_text("\t");
        }
    }

    // ====================================================================
    // Deletion
    // ====================================================================

    /// Backspace: delete the selection, or the code point (or line break)
    /// before the cursor. Returns whether anything changed.
    pub fn delete_backward(&mut self) -> bool {
        if self.has_selection() {
            return self.delete_selection();
        }
        let prev = self.buffer.prev_pos(self.cursor);
        self.delete_range(prev, self.cursor)
    }

    /// Delete the selection, or the code point (or line break) after the
    /// cursor.
    pub fn delete_forward(&mut self) -> bool {
        if self.has_selection() {
            return self.delete_selection();
        }
        let next = self.buffer.next_pos(self.cursor);
        self.delete_range(self.cursor, next)
    }

    /// Delete back to the start of the previous word; at column zero, join
    /// with the previous row.
    pub fn delete_word_backward(&mut self) -> bool {
        if self.has_selection() {
            return self.delete_selection();
        }
        let pos = self.cursor;
        let start = if pos.col == 0 {
            self.buffer.prev_pos(pos)
        } else {
            Pos::new(pos.row, prev_word_start(self.buffer.row(pos.row), pos.col))
        };
        self.delete_range(start, pos)
    }

    /// Delete to the end of the row; at the end, join with the next row.
    pub fn delete_to_end_of_line(&mut self) -> bool {
        if self.has_selection() {
            return self.delete_selection();
        }
        let pos = self.cursor;
        let len = self.buffer.row_len(pos.row);
        let end = if pos.col < len {
            Pos::new(pos.row, len)
        } else {
            self.buffer.next_pos(pos)
        };
        self.delete_range(pos, end)
    }

    /// Delete between two positions (either order, clamped). The cursor
    /// lands on the junction and the selection is dropped.
    pub fn delete_range(&mut self, a: Pos, b: Pos) -> bool {
        self.break_run();
        let (a, b) = (self.buffer.clamp(a), self.buffer.clamp(b));
        if a == b {
            return false;
        }
        self.begin_edit(EditKind::Other);
        self.cursor = self.buffer.delete(a, b);
        self.selection = Selection::inactive();
        self.finish_edit();
        true
    }

    /// Delete the selected text. An empty selection is just dropped.
    pub fn delete_selection(&mut self) -> bool {
        match self.selection_range() {
            Some((start, end)) if start != end => self.delete_range(start, end),
            _ => {
                self.selection = Selection::inactive();
                false
            }
        }
    }

    // ====================================================================
    // Undo / redo
    // ====================================================================

    /// Restore the state before the last edit. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.break_run();
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(previous) => {
                self.restore(previous);
                true
            }
            None => false,
        }
    }

    /// Re-apply the last undone edit.
    pub fn redo(&mut self) -> bool {
        self.break_run();
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(next) => {
                self.restore(next);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ====================================================================
    // Clipboard register
    // ====================================================================

    /// Copy the selection into the register.
    pub fn copy(&mut self) -> bool {
        match self.selected_text() {
            Some(text) => {
                self.clipboard = text;
                true
            }
            None => false,
        }
    }

    /// Copy the selection into the register and delete it.
    pub fn cut(&mut self) -> bool {
        self.copy() && self.delete_selection()
    }

    /// Insert the register at the cursor, replacing any selection.
    pub fn paste(&mut self) -> bool {
        if self.clipboard.is_empty() {
            return false;
        }
        let text = self.clipboard.clone();
        self.insert_text(&text);
        true
    }

    pub fn clipboard(&self) -> &str {
        &self.clipboard
    }

    pub fn set_clipboard(&mut self, text: impl Into<String>) {
        self.clipboard = text.into();
    }

    // ====================================================================
    // Navigation
    // ====================================================================

    /// Select the next occurrence of `needle` at or after the cursor,
    /// wrapping at the end, and center it. No match changes nothing.
    pub fn find_next(&mut self, needle: &str) -> bool {
        self.break_run();
        match search::find_next(&self.buffer, self.cursor, needle) {
            Some((start, end)) => {
                self.selection = Selection::at(start);
                self.cursor = end;
                self.goal_col = None;
                self.center_on_cursor();
                true
            }
            None => false,
        }
    }

    /// Bracket paired with the one at (or just before) the cursor.
    pub fn matching_bracket(&self) -> Option<Pos> {
        bracket::matching_bracket(&self.buffer, self.cursor)
    }

    /// Move to the matching bracket and center it.
    pub fn jump_to_matching_bracket(&mut self) -> bool {
        self.break_run();
        match self.matching_bracket() {
            Some(pos) => {
                self.cursor = pos;
                self.selection = Selection::inactive();
                self.goal_col = None;
                self.center_on_cursor();
                true
            }
            None => false,
        }
    }

    /// Move to the start of a 1-based line (clamped) and center it.
    pub fn goto_line(&mut self, line: usize) {
        self.break_run();
        let row = line.saturating_sub(1).min(self.buffer.row_count() - 1);
        self.cursor = Pos::new(row, 0);
        self.selection = Selection::inactive();
        self.goal_col = None;
        self.center_on_cursor();
    }

    // ====================================================================
    // Inline suggestion
    // ====================================================================

    pub fn set_suggestion_provider(&mut self, provider: impl Fn(&str) -> Option<String> + 'static) {
        self.suggest = Some(Box::new(provider));
    }

    /// Pending suggestion text, shown after the cursor.
    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    /// Insert the pending suggestion as a normal edit.
    pub fn accept_suggestion(&mut self) -> bool {
        match self.suggestion.take() {
            Some(text) => {
                self.insert_text(&text);
                true
            }
            None => false,
        }
    }

    fn refresh_suggestion(&mut self) {
        self.suggestion = None;
        let Some(provider) = self.suggest.as_ref() else {
            return;
        };
        let row = self.buffer.row(self.cursor.row);
        let start = word_prefix_start(row, self.cursor.col);
        if start == self.cursor.col {
            return;
        }
        let prefix: String = row[start..self.cursor.col].iter().collect();
        self.suggestion = provider(&prefix).filter(|s| !s.is_empty());
    }

    // ====================================================================
    // Scrolling
    // ====================================================================

    /// Set the visible area in cells. Only clamps the scroll offset; the
    /// cursor is not forced into view.
    pub fn set_viewport(&mut self, width: usize, height: usize) {
        self.viewport = (width, height);
        self.scroll_top = self.scroll_top.min(self.max_scroll_top());
    }

    pub fn viewport(&self) -> (usize, usize) {
        self.viewport
    }

    /// `(top row, left visual column)`.
    pub fn scroll_offset(&self) -> (usize, usize) {
        (self.scroll_top, self.scroll_left)
    }

    /// Scroll by whole rows without moving the cursor.
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll_top = self
            .scroll_top
            .saturating_add_signed(delta)
            .min(self.max_scroll_top());
    }

    fn max_scroll_top(&self) -> usize {
        self.buffer.row_count().saturating_sub(self.viewport.1.max(1))
    }

    /// Minimal scroll that shows the cursor with `scroll_margin` rows of
    /// context (reduced in small viewports).
    pub fn ensure_cursor_visible(&mut self) {
        let (width, height) = self.viewport;
        if height > 0 {
            let margin = self.config.scroll_margin.min((height - 1) / 2);
            let row = self.cursor.row;
            if row < self.scroll_top + margin {
                self.scroll_top = row.saturating_sub(margin);
            } else if row + margin >= self.scroll_top + height {
                self.scroll_top = row + margin + 1 - height;
            }
            self.scroll_top = self.scroll_top.min(self.max_scroll_top());
        }
        self.ensure_column_visible(width);
    }

    fn ensure_column_visible(&mut self, width: usize) {
        if width == 0 {
            return;
        }
        let vis = self.cursor_visual_col();
        if vis < self.scroll_left {
            self.scroll_left = vis;
        } else if vis >= self.scroll_left + width {
            self.scroll_left = vis + 1 - width;
        }
    }

    /// Scroll so the cursor row sits at half the viewport height.
    pub fn center_on_cursor(&mut self) {
        let (width, height) = self.viewport;
        if height > 0 {
            self.scroll_top = self
                .cursor
                .row
                .saturating_sub(height / 2)
                .min(self.max_scroll_top());
        }
        self.ensure_column_visible(width);
    }

    // ====================================================================
    // Visual columns
    // ====================================================================

    pub fn cursor_visual_col(&self) -> usize {
        self.visual_col(self.cursor)
    }

    /// Screen column of `pos` within its row, before horizontal scrolling.
    pub fn visual_col(&self, pos: Pos) -> usize {
        visual_col(self.buffer.row(pos.row), pos.col, self.config.tab_width)
    }

    /// Buffer position under a visual `(row, column)`, clamped.
    pub fn pos_at_visual(&self, row: usize, vis_col: usize) -> Pos {
        let row = row.min(self.buffer.row_count() - 1);
        let col = crate::width::col_at_visual_nearest(
            self.buffer.row(row),
            vis_col,
            self.config.tab_width,
        );
        Pos::new(row, col)
    }

    // ====================================================================
    // Change tracking
    // ====================================================================

    /// Whether the content differs from the last clean point. Undoing back
    /// to that point makes the editor clean again.
    pub fn is_dirty(&self) -> bool {
        self.revision != self.clean_revision
    }

    pub fn mark_clean(&mut self) {
        self.clean_revision = self.revision;
    }

    /// Register the change callback, replacing any previous one.
    pub fn on_change(&mut self, callback: impl FnMut() + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    // ====================================================================
    // Internals
    // ====================================================================

    /// End a typing run: history stops merging and the suggestion goes away.
    fn break_run(&mut self) {
        self.history.break_merge();
        self.suggestion = None;
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            buffer: self.buffer.clone(),
            cursor: self.cursor,
            selection: self.selection,
            revision: self.revision,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.buffer = snapshot.buffer;
        self.cursor = self.buffer.clamp(snapshot.cursor);
        self.selection = snapshot.selection;
        self.revision = snapshot.revision;
        self.goal_col = None;
        self.changed();
    }

    fn bump_revision(&mut self) -> u64 {
        let revision = self.next_revision;
        self.next_revision += 1;
        revision
    }

    fn begin_edit(&mut self, kind: EditKind) {
        let before = self.snapshot();
        self.history.record(before, kind);
    }

    fn finish_edit(&mut self) {
        self.cursor = self.buffer.clamp(self.cursor);
        self.goal_col = None;
        self.revision = self.bump_revision();
        self.changed();
    }

    fn changed(&mut self) {
        self.ensure_cursor_visible();
        if let Some(callback) = self.on_change.as_mut() {
            callback();
        }
    }

    /// Delete the selection without recording; part of a larger edit.
    fn remove_selection(&mut self) {
        if let Some((start, end)) = self.selection_range() {
            self.cursor = self.buffer.delete(start, end);
        }
        self.selection = Selection::inactive();
    }
}
