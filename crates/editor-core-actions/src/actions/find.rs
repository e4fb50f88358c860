use crate::location::Location;
use crate::pane::Pane;
use crate::prompt::PromptKind;
use crate::search;

impl Pane {
    pub(super) fn find(&mut self, regex: bool) -> bool {
        self.open_find(regex);
        true
    }

    /// Repeat the last committed search from the active cursor.
    pub(super) fn find_next(&mut self, forward: bool) -> bool {
        if !self.buf.search.is_active() {
            return false;
        }
        let c = self.cursor();
        let from = match c.selection_range() {
            Some((min, max)) => {
                if forward {
                    max
                } else {
                    min
                }
            }
            None => c.loc,
        };
        let term = self.buf.search.last_search.clone();
        let options = self.buf.search_options(self.buf.search.last_search_regex);
        match search::find_next(&self.buf.text, &term, from, forward, options) {
            Err(err) => {
                self.info.error(err.to_string());
                false
            }
            Ok(Some(m)) => {
                self.select_match(m);
                true
            }
            Ok(None) => {
                self.with_active(|c, _| c.reset_selection());
                self.info.message("No matches found");
                true
            }
        }
    }

    pub(super) fn toggle_highlight_search(&mut self) -> bool {
        let search = &mut self.buf.search;
        search.highlight = !search.highlight;
        if search.highlight {
            self.info.message("Highlighting search");
        } else {
            self.info.message("Disabled search highlighting");
        }
        true
    }

    pub(super) fn unhighlight_search(&mut self) -> bool {
        if !self.buf.search.highlight {
            return false;
        }
        self.buf.search.highlight = false;
        true
    }

    pub(super) fn reset_search(&mut self) -> bool {
        if !self.buf.search.is_active() {
            return false;
        }
        self.buf.search.clear();
        true
    }

    /// Move to the first line of the next or previous diff block. Never wraps.
    pub(super) fn diff_jump(&mut self, forward: bool) -> bool {
        let line = self.cursor().loc.line;
        let Some(target) = self
            .diff_provider()
            .and_then(|diff| diff.next_diff_line(line, forward))
        else {
            return false;
        };
        self.with_active(|c, layout| {
            c.reset_selection();
            c.goto(layout, Location::new(target, 0));
        });
        true
    }

    pub(super) fn jump_line(&mut self) -> bool {
        self.info.open(PromptKind::JumpLine, "Jump to line: ", "", false);
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::actions::Action;
    use crate::diff::DiffBlocks;
    use crate::document::Buffer;
    use crate::location::Location;
    use crate::pane::Pane;
    use crate::prompt::{Notice, PromptKind, PromptReply};
    use crate::recorder::Session;
    use crate::settings::Settings;

    fn loc(line: usize, column: usize) -> Location {
        Location::new(line, column)
    }

    #[test]
    fn test_find_next_wraps_and_previous() {
        let mut s = Session::default();
        let mut p = Pane::new(Buffer::new("ab ab ab", Settings::default()), 80, 10);
        assert!(!p.execute(&mut s, Action::FindNext));
        assert!(p.search("ab", false, true).unwrap());
        assert_eq!(p.buf.cursor(0).selection_range(), Some((loc(0, 0), loc(0, 2))));
        p.execute(&mut s, Action::FindNext);
        assert_eq!(p.buf.cursor(0).selection_range(), Some((loc(0, 3), loc(0, 5))));
        p.execute(&mut s, Action::FindNext);
        p.execute(&mut s, Action::FindNext);
        assert_eq!(p.buf.cursor(0).selection_range(), Some((loc(0, 0), loc(0, 2))));
        p.execute(&mut s, Action::FindPrevious);
        assert_eq!(p.buf.cursor(0).selection_range(), Some((loc(0, 6), loc(0, 8))));
    }

    #[test]
    fn test_no_match_shows_notice() {
        let mut s = Session::default();
        let mut p = Pane::new(Buffer::new("ab cd", Settings::default()), 80, 10);
        let none = Some(&Notice::Info("No matches found".to_string()));
        assert!(!p.search("zzz", false, true).unwrap());
        assert_eq!(p.info.notice(), none);

        assert!(p.search("ab", false, true).unwrap());
        p.execute(&mut s, Action::SelectAll);
        p.execute(&mut s, Action::Backspace);
        p.execute(&mut s, Action::ClearInfo);
        assert!(p.execute(&mut s, Action::FindNext));
        assert_eq!(p.info.notice(), none);
        assert!(!p.buf.cursor(0).has_selection());
    }

    #[test]
    fn test_highlight_and_reset() {
        let mut s = Session::default();
        let mut p = Pane::new(Buffer::new("x", Settings::default()), 80, 10);
        assert!(!p.execute(&mut s, Action::UnhighlightSearch));
        assert!(p.execute(&mut s, Action::ToggleHighlightSearch));
        assert!(p.buf.search.highlight);
        assert!(p.execute(&mut s, Action::UnhighlightSearch));
        assert!(!p.execute(&mut s, Action::ResetSearch));
        p.search("x", false, true).unwrap();
        assert!(p.execute(&mut s, Action::ResetSearch));
        assert!(!p.buf.search.is_active());
    }

    #[test]
    fn test_diff_jump_does_not_wrap() {
        let mut s = Session::default();
        let text = vec!["l"; 20].join("\n");
        let mut p = Pane::new(Buffer::new(&text, Settings::default()), 80, 10);
        assert!(!p.execute(&mut s, Action::DiffNext));
        p.set_diff_provider(Box::new(DiffBlocks::new(vec![3..5, 12..13])));
        assert!(p.execute(&mut s, Action::DiffNext));
        assert_eq!(p.buf.cursor(0).loc, loc(3, 0));
        assert!(p.execute(&mut s, Action::DiffNext));
        assert_eq!(p.buf.cursor(0).loc, loc(12, 0));
        assert!(!p.execute(&mut s, Action::DiffNext));
        assert!(p.execute(&mut s, Action::DiffPrevious));
        assert_eq!(p.buf.cursor(0).loc, loc(3, 0));
    }

    #[test]
    fn test_jump_line_prompt() {
        let mut s = Session::default();
        let text = vec!["abc"; 30].join("\n");
        let mut p = Pane::new(Buffer::new(&text, Settings::default()), 80, 10);
        p.execute(&mut s, Action::JumpLine);
        let prompt = p.info.active().unwrap().clone();
        assert_eq!(prompt.kind, PromptKind::JumpLine);
        assert!(p.resolve_prompt(prompt.id, PromptReply::Submit("20:2".into())));
        assert_eq!(p.buf.cursor(0).loc, loc(19, 1));
        assert!(p.view.start_line.line > 0);
    }
}
