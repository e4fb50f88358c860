//! Multi-cursor coordinator.
//!
//! Spawning, skipping and removing cursors on a [`Pane`]. Every structural change ends with a
//! merge pass, so no two cursors ever overlap, and the cursor added or moved last becomes
//! primary.

use crate::cursor::Cursor;
use crate::layout::VisualLocation;
use crate::location::{Location, Selection};
use crate::pane::Pane;
use crate::search::{self, SearchMatch, SearchOptions};
use tracing::debug;

impl Pane {
    fn spawn_pattern(&self, text: &str) -> String {
        if self.multi_word {
            search::word_pattern(text)
        } else {
            regex::escape(text)
        }
    }

    fn find_occurrence(&mut self, text: &str, from: Location, forward: bool) -> Option<SearchMatch> {
        let pattern = self.spawn_pattern(text);
        let options = SearchOptions {
            case_sensitive: true,
            regex: true,
        };
        match search::find_next(&self.buf.text, &pattern, from, forward, options) {
            Ok(found) => found,
            Err(err) => {
                self.info.error(err.to_string());
                None
            }
        }
    }

    fn occupied(&self, m: SearchMatch) -> bool {
        self.buf
            .cursors
            .iter()
            .any(|c| c.selection_range() == Some((m.start, m.end)))
    }

    /// Add a cursor on the next occurrence of the primary cursor's selection. Without a
    /// selection, select the word under the primary cursor instead and turn on word-spawn mode.
    /// Returns `false` when no further occurrence exists.
    pub fn spawn_from_selection(&mut self) -> bool {
        let primary = self.buf.cursors.primary_index();
        if !self.buf.cursor(primary).has_selection() {
            let selected = self.with_cursor(primary, |c, layout| c.select_word(layout));
            if selected {
                self.multi_word = true;
            }
            return selected;
        }
        let text = self.buf.selected_text(primary);
        let from = self.buf.cursor(primary).range().1;
        let Some(m) = self
            .find_occurrence(&text, from, true)
            .filter(|&m| !self.occupied(m))
        else {
            self.info.message("No matches found");
            return false;
        };
        let mut cursor = Cursor::new(m.end);
        cursor.set_selection(m.start, m.end);
        cursor.origin = Selection::new(m.start, m.end);
        cursor.store_visual_x(&self.layout());
        self.buf.cursors.push(cursor);
        self.buf.cursors.merge_pass();
        debug!(target: "multicursor", count = self.buf.cursors.len(), "spawned");
        true
    }

    /// Move the primary cursor's selection to the next (`forward`) or previous occurrence of
    /// its text, dropping the current match.
    pub fn skip(&mut self, forward: bool) -> bool {
        let primary = self.buf.cursors.primary_index();
        let Some((min, max)) = self.buf.cursor(primary).selection_range() else {
            return false;
        };
        let text = self.buf.selected_text(primary);
        let from = if forward { max } else { min };
        let Some(m) = self
            .find_occurrence(&text, from, forward)
            .filter(|&m| !self.occupied(m))
        else {
            self.info.message("No matches found");
            return false;
        };
        self.with_cursor(primary, |c, layout| {
            c.set_selection(m.start, m.end);
            c.origin = Selection::new(m.start, m.end);
            c.goto(layout, m.end);
        });
        self.buf.cursors.merge_pass();
        true
    }

    /// Add a cursor one screen row above (`up`) or below the primary cursor, aiming for its
    /// remembered visual column. Fails at the first or last row.
    pub fn spawn_above_below(&mut self, up: bool) -> bool {
        let layout = self.layout();
        let source = self.buf.cursors.primary().clone();
        let delta = if up { -1 } else { 1 };
        let loc = if layout.is_wrapping() {
            let vloc = layout.visual_location(source.loc);
            let screen = layout.scroll(vloc.screen, delta);
            if screen == vloc.screen {
                return false;
            }
            layout.location_from_visual(VisualLocation {
                screen,
                visual_x: source.last_wrapped_visual_x,
            })
        } else {
            let line = source.loc.line;
            if (up && line == 0) || (!up && line + 1 >= layout.text().line_count()) {
                return false;
            }
            let line = if up { line - 1 } else { line + 1 };
            let text = layout.text().line(line);
            let column =
                crate::layout::column_for_visual_x(&text, source.last_visual_x, layout.tab_size());
            Location::new(line, column)
        };
        let mut cursor = Cursor::new(loc);
        cursor.last_visual_x = source.last_visual_x;
        cursor.last_wrapped_visual_x = source.last_wrapped_visual_x;
        self.buf.cursors.deselect_all();
        self.buf.cursors.push(cursor);
        self.buf.cursors.merge_pass();
        true
    }

    /// Replace a single cursor's selection by one cursor at column 0 of every line it touches.
    /// Refused when several cursors exist or there is no selection.
    pub fn spawn_at_each_selected_line(&mut self) -> bool {
        if self.buf.cursors.len() > 1 {
            return false;
        }
        let Some((min, max)) = self.buf.cursors.primary().selection_range() else {
            return false;
        };
        self.with_cursor(0, |c, layout| {
            c.reset_selection();
            c.goto(layout, Location::new(min.line, 0));
        });
        for line in min.line + 1..=max.line {
            let mut cursor = Cursor::new(Location::new(line, 0));
            cursor.store_visual_x(&self.layout());
            self.buf.cursors.push(cursor);
        }
        self.buf.cursors.merge_pass();
        self.info.message("Added cursors from selection");
        true
    }

    /// Remove the highest-index cursor that is not primary. With a single cursor left,
    /// word-spawn mode is turned off.
    pub fn remove_last(&mut self) -> bool {
        let primary = self.buf.cursors.primary_index();
        let removed = (0..self.buf.cursors.len())
            .rev()
            .find(|&i| i != primary)
            .is_some_and(|i| self.buf.cursors.remove(i));
        if self.buf.cursors.len() == 1 {
            self.multi_word = false;
        }
        removed
    }

    /// Keep only the primary cursor and turn off word-spawn mode.
    pub fn remove_all(&mut self) -> bool {
        let had_many = self.buf.cursors.len() > 1;
        self.buf.cursors.clear_secondary();
        self.multi_word = false;
        had_many
    }

    /// Remove the cursor sitting exactly at `loc`, or add one there. The last cursor is never
    /// removed, so toggling onto it does nothing.
    pub fn pointer_toggle(&mut self, loc: Location) -> bool {
        let loc = self.buf.text.clamp(loc);
        let hit = self.buf.cursors.iter().position(|c| c.loc == loc);
        if let Some(i) = hit {
            return self.buf.cursors.len() > 1 && self.buf.cursors.remove(i);
        }
        let mut cursor = Cursor::new(loc);
        cursor.store_visual_x(&self.layout());
        self.buf.cursors.push(cursor);
        self.buf.cursors.merge_pass();
        true
    }

    /// Pointer toggle at the view cell `(x, y)`.
    pub fn mouse_multi_cursor(&mut self, x: usize, y: usize) -> bool {
        if y >= self.view.height {
            return false;
        }
        let loc = self.location_at(x, y);
        self.pointer_toggle(loc)
    }
}

#[cfg(test)]
mod tests {
    use crate::document::Buffer;
    use crate::location::Location;
    use crate::pane::Pane;
    use crate::settings::Settings;

    fn pane(text: &str) -> Pane {
        Pane::new(Buffer::new(text, Settings::default()), 80, 24)
    }

    #[test]
    fn test_spawn_walks_occurrences() {
        let mut p = pane("ab x ab y ab");
        assert!(p.spawn_from_selection());
        assert!(p.multi_word());
        assert_eq!(p.buf.selected_text(0), "ab");
        assert!(p.spawn_from_selection());
        assert!(p.spawn_from_selection());
        assert_eq!(p.buf.cursors.len(), 3);
        assert!(!p.spawn_from_selection());
        assert_eq!(p.buf.cursors.len(), 3);
        assert!(p.remove_last());
        assert_eq!(p.buf.cursors.len(), 2);
        assert!(p.remove_all());
        assert!(!p.multi_word());
    }

    #[test]
    fn test_word_mode_skips_partial_words() {
        let mut p = pane("ab abc ab");
        p.spawn_from_selection();
        assert!(p.spawn_from_selection());
        assert_eq!(p.buf.cursors.primary().selection_range().map(|r| r.0), Some(Location::new(0, 7)));
    }

    #[test]
    fn test_skip_moves_primary() {
        let mut p = pane("foo foo foo");
        p.spawn_from_selection();
        p.spawn_from_selection();
        assert!(p.skip(true));
        let ranges: Vec<_> = p.buf.cursors.iter().map(|c| c.range().0.column).collect();
        assert_eq!(ranges, vec![0, 8]);
        assert_eq!(p.buf.cursors.primary().range().0.column, 8);
    }

    #[test]
    fn test_spawn_above_below_bounds() {
        let mut p = pane("abc\nd\nefgh");
        p.buf.cursors.primary_mut().loc = Location::new(0, 3);
        p.with_cursor(0, |c, layout| c.store_visual_x(layout));
        assert!(!p.spawn_above_below(true));
        assert!(p.spawn_above_below(false));
        assert_eq!(p.buf.cursors.primary().loc, Location::new(1, 1));
        assert!(p.spawn_above_below(false));
        assert_eq!(p.buf.cursors.primary().loc, Location::new(2, 3));
        assert!(!p.spawn_above_below(false));
        assert_eq!(p.buf.cursors.len(), 3);
    }

    #[test]
    fn test_spawn_at_each_selected_line() {
        let mut p = pane("a\nb\nc\nd");
        p.buf.cursors.primary_mut().select_to(Location::new(2, 1));
        assert!(p.spawn_at_each_selected_line());
        let locs: Vec<_> = p.buf.cursors.iter().map(|c| c.loc).collect();
        assert_eq!(
            locs,
            vec![Location::new(0, 0), Location::new(1, 0), Location::new(2, 0)]
        );
        assert!(p.buf.cursors.iter().all(|c| !c.has_selection()));
        assert!(!p.spawn_at_each_selected_line());
    }

    #[test]
    fn test_pointer_toggle() {
        let mut p = pane("abc\ndef");
        assert!(p.pointer_toggle(Location::new(1, 1)));
        assert_eq!(p.buf.cursors.len(), 2);
        assert!(p.pointer_toggle(Location::new(1, 1)));
        assert_eq!(p.buf.cursors.len(), 1);
        assert!(!p.pointer_toggle(Location::new(0, 0)));
        assert_eq!(p.buf.cursors.len(), 1);
        assert_eq!(p.buf.cursors.primary().loc, Location::new(0, 0));
    }
}
