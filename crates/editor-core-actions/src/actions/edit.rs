use crate::cursor::Cursor;
use crate::layout::ScreenLayout;
use crate::location::Location;
use crate::pane::Pane;
use crate::text::{char_len, is_blank, is_spaces, leading_whitespace};

impl Pane {
    pub(super) fn insert_newline(&mut self) -> bool {
        let i = self.active;
        self.buf.delete_selection(i);
        let loc = self.buf.cursor(i).loc;
        let line = self.buf.text.line(loc.line);
        let indent: String = leading_whitespace(&line).chars().take(loc.column).collect();
        self.buf.insert(loc, "\n");

        if self.buf.settings.auto_indent {
            let at = self.buf.cursor(i).loc;
            self.buf.insert(at, &indent);
            let prev = self.buf.cursor(i).loc.line - 1;
            let prev_len = self.buf.text.line_len(prev);
            if !self.buf.settings.keep_auto_indent
                && prev_len > 0
                && is_blank(&self.buf.text.line(prev))
            {
                self.buf
                    .remove(Location::new(prev, 0), Location::new(prev, prev_len));
            }
        }
        self.with_active(|c, layout| c.store_visual_x(layout));
        true
    }

    pub(super) fn backspace(&mut self) -> bool {
        let i = self.active;
        if !self.buf.delete_selection(i) {
            let loc = self.buf.cursor(i).loc;
            if loc > self.buf.text.start() {
                let tab = self.buf.settings.tab_width();
                let before: String = self.buf.text.line(loc.line).chars().take(loc.column).collect();
                let width = if self.buf.settings.tabs_to_spaces
                    && is_spaces(&before)
                    && char_len(&before) % tab == 0
                {
                    tab
                } else {
                    1
                };
                let start = self.buf.text.move_by(loc, -(width as isize));
                self.buf.remove(start, loc);
            }
        }
        self.with_active(|c, layout| c.store_visual_x(layout));
        true
    }

    pub(super) fn delete(&mut self) -> bool {
        let i = self.active;
        if !self.buf.delete_selection(i) {
            let loc = self.buf.cursor(i).loc;
            if loc < self.buf.text.end() {
                let next = self.buf.text.move_by(loc, 1);
                self.buf.remove(loc, next);
            }
        }
        true
    }

    /// Select with `movement`, then delete the selection.
    pub(super) fn delete_with(&mut self, movement: impl FnOnce(&mut Cursor, &ScreenLayout)) -> bool {
        self.select_with(movement);
        self.buf.delete_selection(self.active);
        self.with_active(|c, layout| c.store_visual_x(layout));
        true
    }

    pub(super) fn insert_tab(&mut self) -> bool {
        let indent = self.buf.settings.indent_string();
        let unit = char_len(&indent);
        let loc = self.cursor().loc;
        let visual_x = self.layout().visual_x(loc, false);
        let fill: String = indent.chars().take(unit - visual_x % unit).collect();
        self.buf.insert(loc, &fill);
        self.with_active(|c, layout| c.store_visual_x(layout));
        true
    }

    pub(super) fn undo(&mut self) -> bool {
        if !self.buf.undo() {
            return false;
        }
        self.info.message("Undid action");
        true
    }

    pub(super) fn redo(&mut self) -> bool {
        if !self.buf.redo() {
            return false;
        }
        self.info.message("Redid action");
        true
    }

    pub(super) fn duplicate(&mut self) -> bool {
        if !self.buf.duplicate(self.active) {
            return false;
        }
        self.info.message("Duplicated selection");
        true
    }

    pub(super) fn duplicate_line(&mut self) -> bool {
        match self.buf.duplicate_lines(self.active) {
            0 => false,
            1 => {
                self.info.message("Duplicated line");
                true
            }
            n => {
                self.info.message(format!("Duplicated {n} lines"));
                true
            }
        }
    }

    pub(super) fn delete_line(&mut self) -> bool {
        let (start, end) = self.buf.covered_lines(self.active);
        if !self.buf.delete_lines(self.active) {
            return false;
        }
        if end - start > 1 {
            self.info.message(format!("Deleted {} lines", end - start));
        } else {
            self.info.message("Deleted line");
        }
        self.with_active(|c, layout| c.store_visual_x(layout));
        true
    }

    pub(super) fn move_lines(&mut self, up: bool) -> bool {
        let moved = if up {
            self.buf.move_lines_up(self.active)
        } else {
            self.buf.move_lines_down(self.active)
        };
        if !moved {
            self.info
                .message(if up { "Cannot move further up" } else { "Cannot move further down" });
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use crate::actions::Action;
    use crate::document::Buffer;
    use crate::location::Location;
    use crate::pane::Pane;
    use crate::recorder::Session;
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
    fn test_newline_auto_indent() {
        let mut s = Session::default();
        let mut p = Pane::new(Buffer::new("    foo", Settings::default()), 80, 10);
        p.execute(&mut s, Action::EndOfLine);
        p.execute(&mut s, Action::InsertNewline);
        assert_eq!(p.buf.text.text(), "    foo\n    ");
        assert_eq!(p.buf.cursor(0).loc, loc(1, 4));
        p.execute(&mut s, Action::InsertNewline);
        assert_eq!(p.buf.text.text(), "    foo\n\n    ");
        assert_eq!(p.buf.cursor(0).loc, loc(2, 4));
    }

    #[test]
    fn test_newline_inside_indent_keeps_partial_indent() {
        let mut s = Session::default();
        let mut p = Pane::new(Buffer::new("    foo", Settings::default()), 80, 10);
        p.buf.cursors.primary_mut().loc = loc(0, 2);
        p.execute(&mut s, Action::InsertNewline);
        assert_eq!(p.buf.text.text(), "\n    foo");
        assert_eq!(p.buf.cursor(0).loc, loc(1, 2));
    }

    #[test]
    fn test_backspace_removes_space_indent_unit() {
        let mut s = Session::default();
        let mut p = Pane::new(Buffer::new("        x", spaces(4)), 80, 10);
        p.buf.cursors.primary_mut().loc = loc(0, 8);
        p.execute(&mut s, Action::Backspace);
        assert_eq!(p.buf.text.text(), "    x");
        p.buf.cursors.primary_mut().loc = loc(0, 5);
        p.execute(&mut s, Action::Backspace);
        assert_eq!(p.buf.text.text(), "    ");
    }

    #[test]
    fn test_backspace_and_delete_join_lines() {
        let mut s = Session::default();
        let mut p = Pane::new(Buffer::new("ab\ncd", Settings::default()), 80, 10);
        p.buf.cursors.primary_mut().loc = loc(1, 0);
        p.execute(&mut s, Action::Backspace);
        assert_eq!(p.buf.text.text(), "abcd");
        assert_eq!(p.buf.cursor(0).loc, loc(0, 2));
        p.execute(&mut s, Action::Delete);
        assert_eq!(p.buf.text.text(), "abd");
        p.execute(&mut s, Action::CursorStart);
        p.execute(&mut s, Action::Backspace);
        assert_eq!(p.buf.text.text(), "abd");
    }

    #[test]
    fn test_insert_tab_to_next_stop() {
        let mut s = Session::default();
        let mut p = Pane::new(Buffer::new("ab", spaces(4)), 80, 10);
        p.execute(&mut s, Action::EndOfLine);
        p.execute(&mut s, Action::InsertTab);
        assert_eq!(p.buf.text.text(), "ab  ");
        p.execute(&mut s, Action::InsertTab);
        assert_eq!(p.buf.text.text(), "ab      ");
    }

    #[test]
    fn test_delete_word_and_undo_group() {
        let mut s = Session::default();
        let mut p = Pane::new(Buffer::new("foo bar", Settings::default()), 80, 10);
        assert!(!p.execute(&mut s, Action::Undo));
        assert!(!p.execute(&mut s, Action::Redo));
        p.execute(&mut s, Action::DeleteWordRight);
        assert_eq!(p.buf.text.text(), " bar");
        assert!(p.execute(&mut s, Action::Undo));
        assert_eq!(p.buf.text.text(), "foo bar");
        assert!(p.execute(&mut s, Action::Redo));
        assert_eq!(p.buf.text.text(), " bar");
        assert!(!p.execute(&mut s, Action::Redo));
    }

    #[test]
    fn test_move_lines_reports_boundary() {
        let mut s = Session::default();
        let mut p = Pane::new(Buffer::new("a\nb", Settings::default()), 80, 10);
        assert!(!p.execute(&mut s, Action::MoveLinesUp));
        assert!(p.info.notice().is_some());
        assert!(p.execute(&mut s, Action::MoveLinesDown));
        assert_eq!(p.buf.text.text(), "b\na");
    }
}
