//! Line-block editor.
//!
//! Whole-line operations on the range covered by one cursor. A selection ending exactly at
//! column 0 of a line does not include that line.

use crate::cursor::Cursor;
use crate::document::Buffer;
use crate::location::{Location, Selection};
use crate::text::leading_whitespace;
use tracing::debug;

impl Buffer {
    /// Lines `[start, end)` covered by cursor `index`.
    pub fn covered_lines(&self, index: usize) -> (usize, usize) {
        let c = self.cursor(index);
        match c.selection_range() {
            Some((min, max)) if max.column == 0 && max.line > min.line => (min.line, max.line),
            Some((min, max)) => (min.line, max.line + 1),
            None => (c.loc.line, c.loc.line + 1),
        }
    }

    fn lines_span(&self, start_line: usize, end_line: usize) -> (Location, Location) {
        let start = Location::new(start_line, 0);
        let end = if end_line < self.text.line_count() {
            Location::new(end_line, 0)
        } else {
            self.text.end()
        };
        (start, end)
    }

    /// Expand cursor `index`'s selection to whole lines (the current line without a
    /// selection) and move to its end. Returns the number of lines covered; 0 when the
    /// range is empty.
    pub fn select_whole_lines(&mut self, index: usize) -> usize {
        let (start_line, end_line) = self.covered_lines(index);
        let (start, end) = self.lines_span(start_line, end_line);
        let c = self.cursor_mut(index);
        if start == end {
            c.reset_selection();
            return 0;
        }
        c.set_selection(start, end);
        c.loc = end;
        end_line - start_line
    }

    /// Insert one indent unit at the start of cursor `index`'s line. Refuses while the cursor
    /// has a selection.
    pub fn indent_line(&mut self, index: usize) -> bool {
        if self.cursor(index).has_selection() {
            return false;
        }
        let line = self.cursor(index).loc.line;
        let indent = self.settings.indent_string();
        self.insert(Location::new(line, 0), &indent);
        true
    }

    /// Remove up to one indent unit of leading whitespace from `line`, one character at a
    /// time. Returns the number of characters removed.
    fn outdent_one(&mut self, line: usize) -> usize {
        let unit = self.settings.indent_string().chars().count();
        let mut removed = 0;
        while removed < unit && !leading_whitespace(&self.text.line(line)).is_empty() {
            self.remove(Location::new(line, 0), Location::new(line, 1));
            removed += 1;
        }
        removed
    }

    /// Outdent cursor `index`'s line. `false` if there was no leading whitespace.
    pub fn outdent_line(&mut self, index: usize) -> bool {
        if self.cursor(index).has_selection() {
            return false;
        }
        let line = self.cursor(index).loc.line;
        self.outdent_one(line) > 0
    }

    /// Indent every non-empty line under cursor `index`'s selection. The selection keeps
    /// covering the same content: a start at column 0 stays at column 0, other ends shift by
    /// the inserted width.
    pub fn indent_selection(&mut self, index: usize) -> bool {
        let Some(sel) = self.cursor(index).selection() else {
            return false;
        };
        let (min, max) = sel.range();
        let (first, last) = self.covered_lines(index);
        let indent = self.settings.indent_string();
        let width = indent.chars().count();

        let mut indented = Vec::new();
        for line in first..last {
            if self.text.line_len(line) > 0 {
                self.insert(Location::new(line, 0), &indent);
                indented.push(line);
            }
        }

        let shift = |loc: Location| {
            if loc.column > 0 && indented.contains(&loc.line) {
                Location::new(loc.line, loc.column + width)
            } else {
                loc
            }
        };
        let (new_min, new_max) = (shift(min), shift(max));
        let c = self.cursor_mut(index);
        if sel.anchor <= sel.active {
            c.set_selection(new_min, new_max);
            c.loc = new_max;
        } else {
            c.set_selection(new_max, new_min);
            c.loc = new_min;
        }
        debug!(target: "line_ops", lines = indented.len(), "indent_selection");
        !indented.is_empty()
    }

    /// Outdent every line under cursor `index`'s selection by at most one indent unit.
    pub fn outdent_selection(&mut self, index: usize) -> bool {
        if !self.cursor(index).has_selection() {
            return false;
        }
        let (first, last) = self.covered_lines(index);
        let mut removed = 0;
        for line in first..last {
            removed += self.outdent_one(line);
        }
        debug!(target: "line_ops", removed, "outdent_selection");
        removed > 0
    }

    fn snapshot_locations(&self) -> Vec<(Location, Option<Selection>, Selection)> {
        self.cursors
            .iter()
            .map(|c| (c.loc, c.selection(), c.origin))
            .collect()
    }

    // Reinstate cursor locations after a line permutation, mapping each through `map`.
    fn remap_cursors(
        &mut self,
        snapshot: Vec<(Location, Option<Selection>, Selection)>,
        map: impl Fn(usize, Location) -> Location,
    ) {
        for (i, (loc, sel, origin)) in snapshot.into_iter().enumerate() {
            let Some(c) = self.cursors.get_mut(i) else {
                continue;
            };
            c.loc = map(i, loc);
            c.origin = Selection::new(map(i, origin.anchor), map(i, origin.active));
            match sel {
                Some(s) => c.set_selection(map(i, s.anchor), map(i, s.active)),
                None => c.reset_selection(),
            }
        }
    }

    /// Move the lines covered by cursor `index` up by one. `false` at the top of the buffer.
    pub fn move_lines_up(&mut self, index: usize) -> bool {
        let (start, end) = self.covered_lines(index);
        if start == 0 {
            return false;
        }
        let above = start - 1;
        let mut lines: Vec<String> = (start..end).map(|l| self.text.line(l)).collect();
        lines.push(self.text.line(above));

        let snapshot = self.snapshot_locations();
        let region_end = Location::new(end - 1, self.text.line_len(end - 1));
        self.text
            .replace(Location::new(above, 0), region_end, &lines.join("\n"));

        self.remap_cursors(snapshot, |i, loc| {
            if i == index && loc == Location::new(end, 0) {
                Location::new(end - 1, 0)
            } else if loc.line == above {
                Location::new(end - 1, loc.column)
            } else if (start..end).contains(&loc.line) {
                Location::new(loc.line - 1, loc.column)
            } else {
                loc
            }
        });
        debug!(target: "line_ops", start, end, "move_lines_up");
        true
    }

    /// Move the lines covered by cursor `index` down by one. `false` at the bottom.
    pub fn move_lines_down(&mut self, index: usize) -> bool {
        let (start, end) = self.covered_lines(index);
        let line_count = self.text.line_count();
        if end >= line_count {
            return false;
        }
        let below = end;
        let mut lines = vec![self.text.line(below)];
        lines.extend((start..end).map(|l| self.text.line(l)));

        let snapshot = self.snapshot_locations();
        let region_end = Location::new(below, self.text.line_len(below));
        self.text
            .replace(Location::new(start, 0), region_end, &lines.join("\n"));

        let buffer_end = self.text.end();
        self.remap_cursors(snapshot, |i, loc| {
            if i == index && loc == Location::new(end, 0) {
                if end + 1 < line_count {
                    Location::new(end + 1, 0)
                } else {
                    buffer_end
                }
            } else if loc.line == below {
                Location::new(start, loc.column)
            } else if (start..end).contains(&loc.line) {
                Location::new(loc.line + 1, loc.column)
            } else {
                loc
            }
        });
        debug!(target: "line_ops", start, end, "move_lines_down");
        true
    }

    pub(crate) fn restore_cursor(&mut self, index: usize, saved: Cursor) {
        let c = self.cursor_mut(index);
        c.loc = saved.loc;
        c.origin = saved.origin;
        c.last_visual_x = saved.last_visual_x;
        c.last_wrapped_visual_x = saved.last_wrapped_visual_x;
        match saved.selection() {
            Some(s) => c.set_selection(s.anchor, s.active),
            None => c.reset_selection(),
        }
    }

    /// Insert a copy of cursor `index`'s selected text right after the selection. The cursor
    /// keeps its position and selection.
    pub fn duplicate(&mut self, index: usize) -> bool {
        let Some((_, max)) = self.cursor(index).selection_range() else {
            return false;
        };
        let saved = self.cursor(index).clone();
        let text = self.selected_text(index);
        self.insert(max, &text);
        self.restore_cursor(index, saved);
        true
    }

    /// Insert a copy of the lines covered by cursor `index` right below them. The cursor keeps
    /// its position and selection. Returns the number of lines duplicated.
    pub fn duplicate_lines(&mut self, index: usize) -> usize {
        let (start, end) = self.covered_lines(index);
        let saved = self.cursor(index).clone();
        let copy: Vec<String> = (start..end).map(|l| self.text.line(l)).collect();
        let last = end - 1;
        let at = Location::new(last, self.text.line_len(last));
        self.insert(at, &format!("\n{}", copy.join("\n")));
        self.restore_cursor(index, saved);
        end - start
    }

    /// Delete the lines covered by cursor `index`, newline included. When the range reaches
    /// the end of a buffer with no trailing newline, the preceding newline goes instead.
    pub fn delete_lines(&mut self, index: usize) -> bool {
        let (start_line, end_line) = self.covered_lines(index);
        let (mut start, end) = self.lines_span(start_line, end_line);
        if start == end && self.text.line_count() == 1 {
            return false;
        }
        if end_line >= self.text.line_count() && start_line > 0 {
            start = Location::new(start_line - 1, self.text.line_len(start_line - 1));
        }
        self.cursor_mut(index).reset_selection();
        self.remove(start, end);
        let target = self.text.clamp(Location::new(start_line, 0));
        let c = self.cursor_mut(index);
        c.loc = target;
        c.origin = Selection::caret(target);
        debug!(target: "line_ops", start_line, end_line, "delete_lines");
        true
    }

    /// Convert leading indentation of every line to the configured style. Returns `true` if
    /// anything changed.
    pub fn retab(&mut self) -> bool {
        let tab = " ".repeat(self.settings.tab_width());
        let to_spaces = self.settings.tabs_to_spaces;
        let mut changed = false;
        for line in 0..self.text.line_count() {
            let text = self.text.line(line);
            let ws = leading_whitespace(&text);
            if ws.is_empty() {
                continue;
            }
            let converted = if to_spaces {
                ws.replace('\t', &tab)
            } else {
                ws.replace(&tab, "\t")
            };
            if converted != ws {
                let ws_len = ws.chars().count();
                self.replace(Location::new(line, 0), Location::new(line, ws_len), &converted);
                changed = true;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn loc(line: usize, column: usize) -> Location {
        Location::new(line, column)
    }

    fn spaces(n: usize) -> Settings {
        Settings {
            tab_size: n,
            tabs_to_spaces: true,
            ..Settings::default()
        }
    }

    #[test]
    fn test_select_whole_lines() {
        let mut buf = Buffer::new("ab\ncd\nef", Settings::default());
        buf.cursor_mut(0).loc = loc(1, 1);
        assert_eq!(buf.select_whole_lines(0), 1);
        assert_eq!(buf.selected_text(0), "cd\n");

        buf.cursor_mut(0).set_selection(loc(0, 1), loc(2, 0));
        assert_eq!(buf.select_whole_lines(0), 2);
        assert_eq!(buf.selected_text(0), "ab\ncd\n");

        buf.cursor_mut(0).reset_selection();
        buf.cursor_mut(0).loc = loc(2, 1);
        assert_eq!(buf.select_whole_lines(0), 1);
        assert_eq!(buf.cursor(0).selection_range(), Some((loc(2, 0), loc(2, 2))));

        let mut empty = Buffer::new("", Settings::default());
        assert_eq!(empty.select_whole_lines(0), 0);
    }

    #[test]
    fn test_indent_and_outdent_line() {
        let mut buf = Buffer::new("x\n\ty", spaces(2));
        buf.cursor_mut(0).loc = loc(0, 1);
        assert!(buf.indent_line(0));
        assert_eq!(buf.text.text(), "  x\n\ty");
        assert_eq!(buf.cursor(0).loc, loc(0, 3));
        assert!(buf.outdent_line(0));
        assert!(!buf.outdent_line(0));
        buf.cursor_mut(0).loc = loc(1, 0);
        assert!(buf.outdent_line(0));
        assert_eq!(buf.text.text(), "x\ny");
    }

    #[test]
    fn test_indent_selection_skips_empty_lines() {
        let mut buf = Buffer::new("a\n\nb\nc", Settings::default());
        buf.cursor_mut(0).set_selection(loc(0, 1), loc(2, 1));
        assert!(buf.indent_selection(0));
        assert_eq!(buf.text.text(), "\ta\n\n\tb\nc");
        assert_eq!(buf.cursor(0).selection_range(), Some((loc(0, 2), loc(2, 2))));
    }

    #[test]
    fn test_outdent_selection_partial_whitespace() {
        let mut buf = Buffer::new("    a\n b\nc", spaces(4));
        buf.cursor_mut(0).set_selection(loc(0, 0), loc(2, 1));
        assert!(buf.outdent_selection(0));
        assert_eq!(buf.text.text(), "a\nb\nc");
        assert!(!buf.outdent_selection(0));
    }

    #[test]
    fn test_move_lines_boundaries() {
        let mut buf = Buffer::new("a\nb\nc", Settings::default());
        assert!(!buf.move_lines_up(0));
        buf.cursor_mut(0).loc = loc(2, 1);
        assert!(!buf.move_lines_down(0));
        assert!(buf.move_lines_up(0));
        assert_eq!(buf.text.text(), "a\nc\nb");
        assert_eq!(buf.cursor(0).loc, loc(1, 1));
    }

    #[test]
    fn test_move_selection_excludes_trailing_column_zero_line() {
        let mut buf = Buffer::new("a\nb\nc\nd", Settings::default());
        buf.cursor_mut(0).set_selection(loc(1, 0), loc(3, 0));
        buf.cursor_mut(0).loc = loc(3, 0);
        assert!(buf.move_lines_up(0));
        assert_eq!(buf.text.text(), "b\nc\na\nd");
        assert_eq!(buf.cursor(0).selection_range(), Some((loc(0, 0), loc(2, 0))));

        assert!(buf.move_lines_down(0));
        assert_eq!(buf.text.text(), "a\nb\nc\nd");
        assert_eq!(buf.cursor(0).selection_range(), Some((loc(1, 0), loc(3, 0))));
    }

    #[test]
    fn test_duplicate_keeps_cursor() {
        let mut buf = Buffer::new("abc", Settings::default());
        buf.cursor_mut(0).set_selection(loc(0, 0), loc(0, 2));
        buf.cursor_mut(0).loc = loc(0, 2);
        assert!(buf.duplicate(0));
        assert_eq!(buf.text.text(), "ababc");
        assert_eq!(buf.cursor(0).selection_range(), Some((loc(0, 0), loc(0, 2))));
        assert_eq!(buf.cursor(0).loc, loc(0, 2));
    }

    #[test]
    fn test_duplicate_lines_then_delete() {
        let mut buf = Buffer::new("one\ntwo", Settings::default());
        buf.cursor_mut(0).loc = loc(1, 3);
        assert_eq!(buf.duplicate_lines(0), 1);
        assert_eq!(buf.text.text(), "one\ntwo\ntwo");
        assert_eq!(buf.cursor(0).loc, loc(1, 3));

        buf.cursor_mut(0).loc = loc(2, 0);
        assert!(buf.delete_lines(0));
        assert_eq!(buf.text.text(), "one\ntwo");
    }

    #[test]
    fn test_delete_lines_middle_and_only_line() {
        let mut buf = Buffer::new("a\nb\nc\n", Settings::default());
        buf.cursor_mut(0).loc = loc(1, 0);
        assert!(buf.delete_lines(0));
        assert_eq!(buf.text.text(), "a\nc\n");
        assert_eq!(buf.cursor(0).loc, loc(1, 0));

        let mut single = Buffer::new("x", Settings::default());
        assert!(single.delete_lines(0));
        assert_eq!(single.text.text(), "");
        assert!(!single.delete_lines(0));
    }

    #[test]
    fn test_retab_both_ways() {
        let mut buf = Buffer::new("\tx\n  \ty", spaces(2));
        assert!(buf.retab());
        assert_eq!(buf.text.text(), "  x\n    y");
        buf.settings.tabs_to_spaces = false;
        assert!(buf.retab());
        assert_eq!(buf.text.text(), "\tx\n\t\ty");
        assert!(!buf.retab());
    }
}
