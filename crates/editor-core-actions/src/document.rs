//! A buffer: text plus the cursors, settings and search memory that live with it.
//!
//! All text mutation goes through [`Buffer`] so that every cursor is re-derived after every
//! edit. Nothing else may hold a [`Location`] across a mutation.

use crate::buffer::TextBuffer;
use crate::cursor::Cursor;
use crate::cursor_set::CursorSet;
use crate::layout::ScreenLayout;
use crate::location::{Change, Location};
use crate::search::{SearchOptions, SearchState};
use crate::settings::Settings;

/// Text, cursors and per-buffer state.
#[derive(Debug, Default)]
pub struct Buffer {
    /// Text storage.
    pub text: TextBuffer,
    /// Cursors into `text`.
    pub cursors: CursorSet,
    /// Typed options.
    pub settings: Settings,
    /// Last committed search.
    pub search: SearchState,
}

impl Buffer {
    /// A buffer holding `text`, with one cursor at the start.
    pub fn new(text: &str, settings: Settings) -> Self {
        Self {
            text: TextBuffer::new(text),
            cursors: CursorSet::default(),
            settings,
            search: SearchState::default(),
        }
    }

    /// Lay out the text at `width` cells.
    pub fn layout(&self, width: usize) -> ScreenLayout<'_> {
        ScreenLayout::new(&self.text, &self.settings, width)
    }

    /// Search options derived from the settings.
    pub fn search_options(&self, regex: bool) -> SearchOptions {
        SearchOptions {
            case_sensitive: !self.settings.ignore_case,
            regex,
        }
    }

    /// Cursor `index`. Falls back to the primary for a stale index.
    pub fn cursor(&self, index: usize) -> &Cursor {
        self.cursors.get_or_primary(index)
    }

    /// Cursor `index`, mutably. Falls back to the primary for a stale index.
    pub fn cursor_mut(&mut self, index: usize) -> &mut Cursor {
        self.cursors.get_or_primary_mut(index)
    }

    fn after_edit(&mut self, change: Change) -> Change {
        self.cursors.adjust(&change);
        change
    }

    /// Insert `text` at `loc`.
    pub fn insert(&mut self, loc: Location, text: &str) -> Change {
        let change = self.text.insert(loc, text);
        self.after_edit(change)
    }

    /// Remove `[start, end)`.
    pub fn remove(&mut self, start: Location, end: Location) -> Change {
        let change = self.text.remove(start, end);
        self.after_edit(change)
    }

    /// Replace `[start, end)` with `text`.
    pub fn replace(&mut self, start: Location, end: Location, text: &str) -> Change {
        let change = self.text.replace(start, end, text);
        self.after_edit(change)
    }

    /// Delete cursor `index`'s selection and leave it at the selection start. Returns `false`
    /// without a selection.
    pub fn delete_selection(&mut self, index: usize) -> bool {
        let Some((start, end)) = self.cursor(index).selection_range() else {
            return false;
        };
        self.cursor_mut(index).reset_selection();
        self.remove(start, end);
        self.cursor_mut(index).loc = start;
        true
    }

    /// Text selected by cursor `index`.
    pub fn selected_text(&self, index: usize) -> String {
        self.cursor(index)
            .selection_range()
            .map(|(a, b)| self.text.slice(a, b))
            .unwrap_or_default()
    }

    fn after_history(&mut self, changes: Vec<Change>) -> bool {
        let Some(last) = changes.last().copied() else {
            return false;
        };
        for change in &changes {
            self.cursors.adjust(change);
        }
        self.cursors.clear_secondary();
        let layout = ScreenLayout::new(&self.text, &self.settings, 0);
        let cursor = self.cursors.primary_mut();
        cursor.reset_selection();
        cursor.goto(&layout, last.inserted_end);
        true
    }

    /// Undo the last action. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.text.can_undo() {
            return false;
        }
        let changes = self.text.undo();
        self.after_history(changes)
    }

    /// Redo the last undone action.
    pub fn redo(&mut self) -> bool {
        if !self.text.can_redo() {
            return false;
        }
        let changes = self.text.redo();
        self.after_history(changes)
    }

    /// `true` if there are unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.text.is_modified()
    }
}
