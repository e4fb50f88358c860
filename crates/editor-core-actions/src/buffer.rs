//! Text storage.
//!
//! [`TextBuffer`] is a rope with location arithmetic and a grouped undo/redo history. Every
//! mutation returns the [`Change`] it caused so that owners of stored locations can re-derive
//! them.

use crate::location::{Change, Location};
use ropey::Rope;

#[derive(Debug, Clone)]
struct TextEdit {
    start: usize,
    deleted_text: String,
    inserted_text: String,
}

impl TextEdit {
    fn deleted_len(&self) -> usize {
        self.deleted_text.chars().count()
    }

    fn inserted_len(&self) -> usize {
        self.inserted_text.chars().count()
    }

    fn inverted(&self) -> Self {
        Self {
            start: self.start,
            deleted_text: self.inserted_text.clone(),
            inserted_text: self.deleted_text.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct UndoStep {
    group_id: usize,
    edit: TextEdit,
}

#[derive(Debug)]
struct UndoHistory {
    undo_stack: Vec<UndoStep>,
    redo_stack: Vec<UndoStep>,
    max_undo: usize,
    /// Clean point tracking. Uses `undo_stack.len()` as the saved position in the linear history.
    /// When `redo_stack` is non-empty, `clean_index` may be greater than `undo_stack.len()`.
    clean_index: Option<usize>,
    next_group_id: usize,
    open_group_id: Option<usize>,
    group_depth: usize,
}

impl UndoHistory {
    fn new(max_undo: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_undo,
            clean_index: Some(0),
            next_group_id: 0,
            open_group_id: None,
            group_depth: 0,
        }
    }

    fn is_clean(&self) -> bool {
        self.clean_index == Some(self.undo_stack.len())
    }

    fn mark_clean(&mut self) {
        self.clean_index = Some(self.undo_stack.len());
    }

    fn fresh_group_id(&mut self) -> usize {
        let id = self.next_group_id;
        self.next_group_id = self.next_group_id.wrapping_add(1);
        id
    }

    fn begin_group(&mut self) {
        if self.group_depth == 0 {
            self.open_group_id = Some(self.fresh_group_id());
        }
        self.group_depth += 1;
    }

    fn end_group(&mut self) {
        self.group_depth = self.group_depth.saturating_sub(1);
        if self.group_depth == 0 {
            self.open_group_id = None;
        }
    }

    fn clear_redo_and_adjust_clean(&mut self) {
        if self.redo_stack.is_empty() {
            return;
        }

        // If clean point is in redo area, it becomes unreachable after clearing redo.
        if let Some(clean_index) = self.clean_index
            && clean_index > self.undo_stack.len()
        {
            self.clean_index = None;
        }

        self.redo_stack.clear();
    }

    fn push(&mut self, edit: TextEdit) {
        self.clear_redo_and_adjust_clean();

        if self.undo_stack.len() >= self.max_undo {
            self.undo_stack.remove(0);
            self.clean_index = match self.clean_index {
                Some(0) | None => None,
                Some(i) => Some(i - 1),
            };
        }

        let group_id = match self.open_group_id {
            Some(id) => id,
            None => self.fresh_group_id(),
        };
        self.undo_stack.push(UndoStep { group_id, edit });
    }

    fn pop_group(stack: &mut Vec<UndoStep>) -> Vec<UndoStep> {
        let Some(last_group_id) = stack.last().map(|s| s.group_id) else {
            return Vec::new();
        };
        let mut steps = Vec::new();
        while let Some(step) = stack.pop_if(|s| s.group_id == last_group_id) {
            steps.push(step);
        }
        steps
    }
}

/// Rope-backed text with grouped undo/redo.
#[derive(Debug)]
pub struct TextBuffer {
    rope: Rope,
    history: UndoHistory,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextBuffer {
    /// Create a buffer holding `text`.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            history: UndoHistory::new(1000),
        }
    }

    /// Whole content.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Number of lines. An empty buffer and a buffer ending in `'\n'` both count the final,
    /// empty line.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total characters.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Text of line `line` without its line terminator. Empty for out-of-range lines.
    pub fn line(&self, line: usize) -> String {
        if line >= self.line_count() {
            return String::new();
        }
        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }
        text
    }

    /// Characters on `line`, excluding the terminator.
    pub fn line_len(&self, line: usize) -> usize {
        if line >= self.line_count() {
            return 0;
        }
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len -= 1;
        }
        if len > 0 && slice.char(len - 1) == '\r' {
            len -= 1;
        }
        len
    }

    /// Character at `loc`, or `None` at a line end.
    pub fn char_at(&self, loc: Location) -> Option<char> {
        if loc.line >= self.line_count() || loc.column >= self.line_len(loc.line) {
            return None;
        }
        Some(self.rope.char(self.rope.line_to_char(loc.line) + loc.column))
    }

    /// First location.
    pub fn start(&self) -> Location {
        Location::new(0, 0)
    }

    /// Last location.
    pub fn end(&self) -> Location {
        let last = self.line_count().saturating_sub(1);
        Location::new(last, self.line_len(last))
    }

    /// Clamp `loc` into the buffer.
    pub fn clamp(&self, loc: Location) -> Location {
        let line = loc.line.min(self.line_count().saturating_sub(1));
        Location::new(line, loc.column.min(self.line_len(line)))
    }

    /// Character offset of `loc` (clamped).
    pub fn offset(&self, loc: Location) -> usize {
        let loc = self.clamp(loc);
        self.rope.line_to_char(loc.line) + loc.column
    }

    /// Location of a character offset (clamped).
    pub fn location(&self, offset: usize) -> Location {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        let column = offset - self.rope.line_to_char(line);
        self.clamp(Location::new(line, column))
    }

    /// Move `loc` by `n` characters, crossing line boundaries, clamped to the buffer.
    pub fn move_by(&self, loc: Location, n: isize) -> Location {
        let offset = self.offset(loc);
        let target = offset.saturating_add_signed(n).min(self.rope.len_chars());
        self.location(target)
    }

    /// Text in `[start, end)`.
    pub fn slice(&self, start: Location, end: Location) -> String {
        let (a, b) = (self.offset(start), self.offset(end));
        let (a, b) = (a.min(b), a.max(b));
        self.rope.slice(a..b).to_string()
    }

    /// Insert `text` at `loc`.
    pub fn insert(&mut self, loc: Location, text: &str) -> Change {
        self.replace(loc, loc, text)
    }

    /// Remove `[start, end)`.
    pub fn remove(&mut self, start: Location, end: Location) -> Change {
        self.replace(start, end, "")
    }

    /// Replace `[start, end)` with `text`.
    pub fn replace(&mut self, start: Location, end: Location, text: &str) -> Change {
        let (a, b) = (self.offset(start), self.offset(end));
        let (a, b) = (a.min(b), a.max(b));
        if a == b && text.is_empty() {
            let at = self.location(a);
            return Change {
                start: at,
                removed_end: at,
                inserted_end: at,
            };
        }
        let edit = TextEdit {
            start: a,
            deleted_text: self.rope.slice(a..b).to_string(),
            inserted_text: text.to_string(),
        };
        let change = self.apply(&edit);
        self.history.push(edit);
        change
    }

    fn apply(&mut self, edit: &TextEdit) -> Change {
        let start = self.location(edit.start);
        let removed_end = self.location(edit.start + edit.deleted_len());
        self.rope
            .remove(edit.start..edit.start + edit.deleted_len());
        self.rope.insert(edit.start, &edit.inserted_text);
        let inserted_end = self.location(edit.start + edit.inserted_len());
        Change {
            start,
            removed_end,
            inserted_end,
        }
    }

    /// Open an undo group; edits until the matching [`TextBuffer::end_group`] undo together.
    /// Groups nest; only the outermost one counts.
    pub fn begin_group(&mut self) {
        self.history.begin_group();
    }

    /// Close the group opened by [`TextBuffer::begin_group`].
    pub fn end_group(&mut self) {
        self.history.end_group();
    }

    /// `true` if there is an undo group to revert.
    pub fn can_undo(&self) -> bool {
        !self.history.undo_stack.is_empty()
    }

    /// `true` if there is an undone group to re-apply.
    pub fn can_redo(&self) -> bool {
        !self.history.redo_stack.is_empty()
    }

    /// Revert the most recent group. Returns the changes applied, in order; empty when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> Vec<Change> {
        let steps = UndoHistory::pop_group(&mut self.history.undo_stack);
        let mut changes = Vec::with_capacity(steps.len());
        for step in steps {
            changes.push(self.apply(&step.edit.inverted()));
            self.history.redo_stack.push(step);
        }
        changes
    }

    /// Re-apply the most recently undone group.
    pub fn redo(&mut self) -> Vec<Change> {
        let steps = UndoHistory::pop_group(&mut self.history.redo_stack);
        let mut changes = Vec::with_capacity(steps.len());
        for step in steps {
            changes.push(self.apply(&step.edit));
            self.history.undo_stack.push(step);
        }
        changes
    }

    /// `true` if the content differs from the last clean point.
    pub fn is_modified(&self) -> bool {
        !self.history.is_clean()
    }

    /// Record the current state as saved.
    pub fn mark_clean(&mut self) {
        self.history.mark_clean();
    }

    /// Find the brace matching the one at `loc`, or (with `allow_left`) the one just before it.
    ///
    /// Returns `(matching, left)` where `left` reports that the brace left of `loc` was used.
    pub fn find_matching_brace(&self, loc: Location, allow_left: bool) -> Option<(Location, bool)> {
        let offset = self.offset(loc);
        if let Some(found) = self.match_brace_at(offset) {
            return Some((found, false));
        }
        if allow_left && loc.column > 0 {
            return self.match_brace_at(offset - 1).map(|found| (found, true));
        }
        None
    }

    fn match_brace_at(&self, offset: usize) -> Option<Location> {
        const PAIRS: [(char, char); 3] = [('(', ')'), ('[', ']'), ('{', '}')];
        if offset >= self.rope.len_chars() {
            return None;
        }
        let ch = self.rope.char(offset);
        if let Some(&(open, close)) = PAIRS.iter().find(|(open, _)| *open == ch) {
            let mut depth = 0usize;
            for (i, c) in self.rope.chars_at(offset).enumerate() {
                if c == open {
                    depth += 1;
                } else if c == close {
                    depth -= 1;
                    if depth == 0 {
                        return Some(self.location(offset + i));
                    }
                }
            }
            return None;
        }
        if let Some(&(open, close)) = PAIRS.iter().find(|(_, close)| *close == ch) {
            let mut depth = 0usize;
            let mut iter = self.rope.chars_at(offset + 1);
            let mut pos = offset + 1;
            while let Some(c) = iter.prev() {
                pos -= 1;
                if c == close {
                    depth += 1;
                } else if c == open {
                    depth -= 1;
                    if depth == 0 {
                        return Some(self.location(pos));
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(line: usize, column: usize) -> Location {
        Location::new(line, column)
    }

    #[test]
    fn test_line_access() {
        let buf = TextBuffer::new("ab\r\ncde\n");
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.line(0), "ab");
        assert_eq!(buf.line_len(0), 2);
        assert_eq!(buf.line(1), "cde");
        assert_eq!(buf.line_len(2), 0);
        assert_eq!(buf.end(), loc(2, 0));
        assert_eq!(buf.char_at(loc(1, 1)), Some('d'));
        assert_eq!(buf.char_at(loc(1, 3)), None);
    }

    #[test]
    fn test_move_by_crosses_lines_and_clamps() {
        let buf = TextBuffer::new("ab\ncd");
        assert_eq!(buf.move_by(loc(0, 2), 1), loc(1, 0));
        assert_eq!(buf.move_by(loc(1, 0), -1), loc(0, 2));
        assert_eq!(buf.move_by(loc(0, 0), -5), loc(0, 0));
        assert_eq!(buf.move_by(loc(1, 1), 50), loc(1, 2));
    }

    #[test]
    fn test_replace_reports_change() {
        let mut buf = TextBuffer::new("hello\nworld");
        let change = buf.replace(loc(0, 1), loc(1, 2), "EY\nX");
        assert_eq!(buf.text(), "hEY\nXrld");
        assert_eq!(change.start, loc(0, 1));
        assert_eq!(change.removed_end, loc(1, 2));
        assert_eq!(change.inserted_end, loc(1, 1));
    }

    #[test]
    fn test_grouped_undo_redo() {
        let mut buf = TextBuffer::new("abc");
        buf.begin_group();
        buf.insert(loc(0, 3), "d");
        buf.insert(loc(0, 0), "_");
        buf.end_group();
        buf.insert(loc(0, 0), "!");
        assert_eq!(buf.text(), "!_abcd");

        assert_eq!(buf.undo().len(), 1);
        assert_eq!(buf.text(), "_abcd");
        assert_eq!(buf.undo().len(), 2);
        assert_eq!(buf.text(), "abc");
        assert!(buf.undo().is_empty());

        buf.redo();
        assert_eq!(buf.text(), "_abcd");
        buf.redo();
        assert_eq!(buf.text(), "!_abcd");
    }

    #[test]
    fn test_clean_tracking() {
        let mut buf = TextBuffer::new("x");
        assert!(!buf.is_modified());
        buf.insert(loc(0, 1), "y");
        assert!(buf.is_modified());
        buf.mark_clean();
        assert!(!buf.is_modified());
        buf.undo();
        assert!(buf.is_modified());
        buf.redo();
        assert!(!buf.is_modified());
    }

    #[test]
    fn test_matching_brace() {
        let buf = TextBuffer::new("f(a[1], {b})\n");
        assert_eq!(buf.find_matching_brace(loc(0, 1), false), Some((loc(0, 11), false)));
        assert_eq!(buf.find_matching_brace(loc(0, 10), false), Some((loc(0, 8), false)));
        assert_eq!(buf.find_matching_brace(loc(0, 12), true), Some((loc(0, 1), true)));
        assert_eq!(buf.find_matching_brace(loc(0, 12), false), None);
    }
}
