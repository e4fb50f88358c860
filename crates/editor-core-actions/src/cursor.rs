//! Cursor & selection model.
//!
//! A [`Cursor`] owns a location, an optional selection and the visual columns that vertical
//! movement aims for. Movement methods are raw: they never touch the selection. Selection
//! actions compose them with [`Cursor::extend`], which records the anchor the first time.

use crate::layout::{ScreenLayout, VisualLocation};
use crate::location::{Location, Selection};
use crate::text::{CharClass, SubWordClass, char_class, is_word_char, sub_word_class};

/// One cursor in a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    /// Current position.
    pub loc: Location,
    selection: Option<Selection>,
    /// Range picked by the last double or triple click; drags extend from it.
    pub origin: Selection,
    /// Target visual column for vertical movement without soft-wrap.
    pub last_visual_x: usize,
    /// Target visual column within a wrapped row.
    pub last_wrapped_visual_x: usize,
    /// Index in the owning cursor set.
    pub num: usize,
}

impl Cursor {
    /// A cursor at `loc` with no selection.
    pub fn new(loc: Location) -> Self {
        Self {
            loc,
            selection: None,
            origin: Selection::caret(loc),
            last_visual_x: 0,
            last_wrapped_visual_x: 0,
            num: 0,
        }
    }

    /// `true` when a non-empty selection is active.
    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    /// The active selection, if any.
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Ordered `(min, max)` of the active selection.
    pub fn selection_range(&self) -> Option<(Location, Location)> {
        self.selection.map(|s| s.range())
    }

    /// The range this cursor occupies: its selection, or an empty range at `loc`.
    pub fn range(&self) -> (Location, Location) {
        self.selection_range().unwrap_or((self.loc, self.loc))
    }

    /// Set the selection; an empty one clears it.
    pub fn set_selection(&mut self, anchor: Location, active: Location) {
        self.selection = (anchor != active).then_some(Selection::new(anchor, active));
    }

    /// Drop the selection without moving.
    pub fn reset_selection(&mut self) {
        self.selection = None;
    }

    /// Where a selection grown from here would be anchored.
    pub fn anchor(&self) -> Location {
        self.selection.map_or(self.loc, |s| s.anchor)
    }

    /// Extend (or start) the selection to `loc` and move there. Without a selection the
    /// pre-call location becomes the anchor.
    pub fn select_to(&mut self, loc: Location) {
        let anchor = self.anchor();
        self.set_selection(anchor, loc);
        self.loc = loc;
    }

    /// Run a raw movement and grow the selection to wherever it lands.
    pub fn extend(&mut self, movement: impl FnOnce(&mut Self)) {
        let anchor = self.anchor();
        movement(self);
        self.set_selection(anchor, self.loc);
    }

    /// Collapse the selection to its start (`to_start`) or end. Returns `false` if there was
    /// nothing to collapse.
    pub fn deselect(&mut self, to_start: bool) -> bool {
        let Some(sel) = self.selection.take() else {
            return false;
        };
        let (min, max) = sel.range();
        self.loc = if to_start { min } else { max };
        true
    }

    /// Push every stored location through a buffer change.
    pub fn adjust(&mut self, change: &crate::location::Change) {
        self.loc = change.adjust(self.loc);
        self.origin = self.origin.adjusted(change);
        if let Some(sel) = self.selection {
            let sel = sel.adjusted(change);
            self.set_selection(sel.anchor, sel.active);
        }
    }

    /// Clamp every stored location into the buffer.
    pub fn clamp(&mut self, layout: &ScreenLayout) {
        let text = layout.text();
        self.loc = text.clamp(self.loc);
        self.origin = Selection::new(text.clamp(self.origin.anchor), text.clamp(self.origin.active));
        if let Some(sel) = self.selection {
            self.set_selection(text.clamp(sel.anchor), text.clamp(sel.active));
        }
    }

    /// Remember the current visual columns as the vertical-movement target.
    pub fn store_visual_x(&mut self, layout: &ScreenLayout) {
        self.last_visual_x = layout.visual_x(self.loc, false);
        self.last_wrapped_visual_x = layout.visual_x(self.loc, true);
    }

    /// Jump to `loc` (clamped).
    pub fn goto(&mut self, layout: &ScreenLayout, loc: Location) {
        self.loc = layout.text().clamp(loc);
        self.store_visual_x(layout);
    }

    /// One step left, crossing to the previous line end at column 0.
    pub fn left(&mut self, layout: &ScreenLayout) {
        let text = layout.text();
        if let Some(column) = self.tab_stop_left(layout) {
            self.loc.column = column;
        } else if self.loc.column > 0 {
            self.loc.column -= 1;
        } else if self.loc.line > 0 {
            let line = self.loc.line - 1;
            self.loc = Location::new(line, text.line_len(line));
        }
        self.store_visual_x(layout);
    }

    /// One step right, crossing to the next line start at the line end.
    pub fn right(&mut self, layout: &ScreenLayout) {
        let text = layout.text();
        if let Some(column) = self.tab_stop_right(layout) {
            self.loc.column = column;
        } else if self.loc.column < text.line_len(self.loc.line) {
            self.loc.column += 1;
        } else if self.loc.line + 1 < text.line_count() {
            self.loc = Location::new(self.loc.line + 1, 0);
        }
        self.store_visual_x(layout);
    }

    // Stepping over a full indent unit of spaces, only inside leading indentation.
    fn tab_stop_left(&self, layout: &ScreenLayout) -> Option<usize> {
        if !layout.tab_movement() {
            return None;
        }
        let tab = layout.tab_size();
        let column = self.loc.column;
        if column < tab {
            return None;
        }
        let chars: Vec<char> = layout.text().line(self.loc.line).chars().collect();
        let crossed = chars.get(column - tab..column)?;
        let prefix = &chars[..column - tab];
        (crossed.iter().all(|&c| c == ' ') && prefix.iter().all(|c| c.is_whitespace()))
            .then_some(column - tab)
    }

    fn tab_stop_right(&self, layout: &ScreenLayout) -> Option<usize> {
        if !layout.tab_movement() {
            return None;
        }
        let tab = layout.tab_size();
        let column = self.loc.column;
        let chars: Vec<char> = layout.text().line(self.loc.line).chars().collect();
        if column + tab >= chars.len() {
            return None;
        }
        let crossed = &chars[column..column + tab];
        let prefix = &chars[..column];
        (crossed.iter().all(|&c| c == ' ') && prefix.iter().all(|c| c.is_whitespace()))
            .then_some(column + tab)
    }

    /// Move `amount` buffer lines up (negative: down) keeping the remembered visual column.
    /// Moving up on the first line goes to its start; moving down on the last line goes to its
    /// end.
    pub fn up_lines(&mut self, layout: &ScreenLayout, amount: isize) {
        let text = layout.text();
        let last = text.line_count().saturating_sub(1) as isize;
        let proposed = (self.loc.line as isize - amount).clamp(0, last) as usize;
        let line = text.line(proposed);
        let mut column =
            crate::layout::column_for_visual_x(&line, self.last_visual_x, layout.tab_size());
        let mut store = false;
        if amount < 0 && proposed == self.loc.line {
            column = text.line_len(proposed);
            store = true;
        }
        if amount > 0 && proposed == self.loc.line {
            column = 0;
            store = true;
        }
        self.loc = Location::new(proposed, column);
        if store {
            self.store_visual_x(layout);
        }
    }

    /// Move `n` screen rows up. Under soft-wrap this walks wrapped rows and aims for the
    /// remembered in-row column; on the first row it snaps to the buffer start.
    pub fn up(&mut self, layout: &ScreenLayout, n: usize) {
        self.vertical(layout, -(n as isize));
    }

    /// Move `n` screen rows down; on the last row it snaps to the buffer end.
    pub fn down(&mut self, layout: &ScreenLayout, n: usize) {
        self.vertical(layout, n as isize);
    }

    fn vertical(&mut self, layout: &ScreenLayout, delta: isize) {
        if !layout.is_wrapping() {
            self.up_lines(layout, -delta);
            return;
        }
        let vloc = layout.visual_location(self.loc);
        let screen = layout.scroll(vloc.screen, delta);
        if screen == vloc.screen {
            let text = layout.text();
            self.loc = if delta < 0 { text.start() } else { text.end() };
            self.store_visual_x(layout);
        } else {
            self.loc = layout.location_from_visual(VisualLocation {
                screen,
                visual_x: self.last_wrapped_visual_x,
            });
            self.last_visual_x = layout.visual_x(self.loc, false);
        }
    }

    /// Start of the line.
    pub fn start(&mut self, layout: &ScreenLayout) {
        self.loc.column = 0;
        self.store_visual_x(layout);
    }

    /// End of the line.
    pub fn end(&mut self, layout: &ScreenLayout) {
        self.loc.column = layout.text().line_len(self.loc.line);
        self.store_visual_x(layout);
    }

    fn first_text_column(layout: &ScreenLayout, line: usize) -> usize {
        let text = layout.text().line(line);
        text.chars().take_while(|c| c.is_whitespace()).count()
    }

    /// First non-whitespace character of the line.
    pub fn start_of_text(&mut self, layout: &ScreenLayout) {
        self.loc.column = Self::first_text_column(layout, self.loc.line);
        self.store_visual_x(layout);
    }

    /// `true` if the cursor sits on the first non-whitespace character.
    pub fn is_start_of_text(&self, layout: &ScreenLayout) -> bool {
        self.loc.column == Self::first_text_column(layout, self.loc.line)
    }

    /// Toggle between the first non-whitespace character and column 0.
    pub fn start_of_text_toggle(&mut self, layout: &ScreenLayout) {
        if self.is_start_of_text(layout) {
            self.start(layout);
        } else {
            self.start_of_text(layout);
        }
    }

    /// Forward to the end of the next word or punctuation run.
    pub fn word_right(&mut self, layout: &ScreenLayout) {
        self.skip_right(layout, |c| char_class(c) == CharClass::Whitespace, |a, b| {
            char_class(a) == char_class(b)
        });
    }

    /// Back to the start of the previous word or punctuation run.
    pub fn word_left(&mut self, layout: &ScreenLayout) {
        self.skip_left(layout, |c| char_class(c) == CharClass::Whitespace, |a, b| {
            char_class(a) == char_class(b)
        });
    }

    /// Forward past the next sub-word: words also break on case changes and `_`.
    pub fn sub_word_right(&mut self, layout: &ScreenLayout) {
        let text = layout.text();
        let len = text.line_len(self.loc.line);
        if self.loc.column >= len {
            self.right(layout);
            return;
        }
        let chars: Vec<char> = text.line(self.loc.line).chars().collect();
        let mut x = self.loc.column;
        while x < len && sub_word_class(chars[x]) == SubWordClass::Separator {
            x += 1;
        }
        if x < len {
            match sub_word_class(chars[x]) {
                SubWordClass::Upper => {
                    let run = chars[x..]
                        .iter()
                        .take_while(|&&c| sub_word_class(c) == SubWordClass::Upper)
                        .count();
                    if run == 1 {
                        x += 1;
                        while x < len && sub_word_class(chars[x]) == SubWordClass::Lower {
                            x += 1;
                        }
                    } else if x + run < len
                        && sub_word_class(chars[x + run]) == SubWordClass::Lower
                    {
                        // "HTTPServer": stop before the capital that starts the next part.
                        x += run - 1;
                    } else {
                        x += run;
                    }
                }
                class => {
                    while x < len && sub_word_class(chars[x]) == class {
                        x += 1;
                    }
                }
            }
        }
        self.loc.column = x;
        self.store_visual_x(layout);
    }

    /// Back to the start of the previous sub-word.
    pub fn sub_word_left(&mut self, layout: &ScreenLayout) {
        if self.loc.column == 0 {
            self.left(layout);
            return;
        }
        let chars: Vec<char> = layout.text().line(self.loc.line).chars().collect();
        let mut x = self.loc.column.min(chars.len());
        while x > 0 && sub_word_class(chars[x - 1]) == SubWordClass::Separator {
            x -= 1;
        }
        if x > 0 {
            match sub_word_class(chars[x - 1]) {
                SubWordClass::Lower => {
                    while x > 0 && sub_word_class(chars[x - 1]) == SubWordClass::Lower {
                        x -= 1;
                    }
                    if x > 0 && sub_word_class(chars[x - 1]) == SubWordClass::Upper {
                        x -= 1;
                    }
                }
                class => {
                    while x > 0 && sub_word_class(chars[x - 1]) == class {
                        x -= 1;
                    }
                }
            }
        }
        self.loc.column = x;
        self.store_visual_x(layout);
    }

    fn skip_right(
        &mut self,
        layout: &ScreenLayout,
        is_space: impl Fn(char) -> bool,
        same: impl Fn(char, char) -> bool,
    ) {
        let text = layout.text();
        let len = text.line_len(self.loc.line);
        if self.loc.column >= len {
            self.right(layout);
            return;
        }
        let chars: Vec<char> = text.line(self.loc.line).chars().collect();
        let mut x = self.loc.column;
        while x < len && is_space(chars[x]) {
            x += 1;
        }
        if x < len {
            let first = chars[x];
            while x < len && same(first, chars[x]) {
                x += 1;
            }
        }
        self.loc.column = x;
        self.store_visual_x(layout);
    }

    fn skip_left(
        &mut self,
        layout: &ScreenLayout,
        is_space: impl Fn(char) -> bool,
        same: impl Fn(char, char) -> bool,
    ) {
        if self.loc.column == 0 {
            self.left(layout);
            return;
        }
        let chars: Vec<char> = layout.text().line(self.loc.line).chars().collect();
        let mut x = self.loc.column.min(chars.len());
        while x > 0 && is_space(chars[x - 1]) {
            x -= 1;
        }
        if x > 0 {
            let first = chars[x - 1];
            while x > 0 && same(first, chars[x - 1]) {
                x -= 1;
            }
        }
        self.loc.column = x;
        self.store_visual_x(layout);
    }

    /// Up to the previous empty line that follows text, or the buffer start.
    pub fn paragraph_previous(&mut self, layout: &ScreenLayout) {
        let text = layout.text();
        let mut line = self.loc.line;
        while line > 0 && text.line_len(line) == 0 {
            line -= 1;
        }
        while line > 0 && text.line_len(line) != 0 {
            line -= 1;
        }
        self.loc = Location::new(line, 0);
        self.store_visual_x(layout);
    }

    /// Down to the next empty line that follows text, or the buffer end.
    pub fn paragraph_next(&mut self, layout: &ScreenLayout) {
        let text = layout.text();
        let last = text.line_count().saturating_sub(1);
        let mut line = self.loc.line;
        while line < last && text.line_len(line) == 0 {
            line += 1;
        }
        while line < last && text.line_len(line) != 0 {
            line += 1;
        }
        self.loc = if text.line_len(line) == 0 {
            Location::new(line, 0)
        } else {
            text.end()
        };
        self.store_visual_x(layout);
    }

    /// Select the word under the cursor (or the single non-word character there). Returns
    /// `false` on an empty line.
    pub fn select_word(&mut self, layout: &ScreenLayout) -> bool {
        let text = layout.text();
        let chars: Vec<char> = text.line(self.loc.line).chars().collect();
        if chars.is_empty() {
            return false;
        }
        let probe = self.loc.column.min(chars.len() - 1);
        let line = self.loc.line;
        let (start, end) = if is_word_char(chars[probe]) {
            let mut backward = probe;
            while backward > 0 && is_word_char(chars[backward - 1]) {
                backward -= 1;
            }
            let mut forward = probe + 1;
            while forward < chars.len() && is_word_char(chars[forward]) {
                forward += 1;
            }
            (backward, forward)
        } else {
            (probe, probe + 1)
        };
        let (start, end) = (Location::new(line, start), Location::new(line, end));
        self.set_selection(start, end);
        self.origin = Selection::new(start, end);
        self.loc = end;
        self.store_visual_x(layout);
        true
    }

    /// Select the whole line including its newline (the last line up to its end).
    pub fn select_line(&mut self, layout: &ScreenLayout) {
        let (start, end) = Self::line_span(layout, self.loc.line);
        self.set_selection(start, end);
        self.origin = Selection::new(start, end);
        self.loc = end;
        self.store_visual_x(layout);
    }

    fn line_span(layout: &ScreenLayout, line: usize) -> (Location, Location) {
        let text = layout.text();
        let end = if line + 1 < text.line_count() {
            Location::new(line + 1, 0)
        } else {
            Location::new(line, text.line_len(line))
        };
        (Location::new(line, 0), end)
    }

    /// Extend a double-click selection word by word towards `loc`.
    pub fn add_word_to_selection(&mut self, layout: &ScreenLayout) {
        let (ostart, oend) = self.origin.range();
        let chars: Vec<char> = layout.text().line(self.loc.line).chars().collect();
        if self.loc > ostart && self.loc < oend {
            self.set_selection(ostart, oend);
            self.loc = oend;
        } else if self.loc < ostart {
            let mut backward = self.loc.column.min(chars.len());
            while backward > 0 && is_word_char(chars[backward - 1]) {
                backward -= 1;
            }
            let start = Location::new(self.loc.line, backward);
            self.set_selection(oend, start);
            self.loc = start;
        } else if self.loc > oend {
            let mut forward = self.loc.column.min(chars.len());
            while forward < chars.len() && is_word_char(chars[forward]) {
                forward += 1;
            }
            let end = Location::new(self.loc.line, forward);
            self.set_selection(ostart, end);
            self.loc = end;
        }
        self.store_visual_x(layout);
    }

    /// Extend a triple-click selection line by line towards `loc`.
    pub fn add_line_to_selection(&mut self, layout: &ScreenLayout) {
        let (ostart, oend) = self.origin.range();
        if self.loc < ostart {
            let start = Location::new(self.loc.line, 0);
            self.set_selection(oend, start);
            self.loc = start;
        } else if self.loc > oend {
            let (_, end) = Self::line_span(layout, self.loc.line);
            self.set_selection(ostart, end);
            self.loc = end;
        } else {
            self.set_selection(ostart, oend);
            self.loc = oend;
        }
        self.store_visual_x(layout);
    }

    /// Text under the selection, or empty.
    pub fn selected_text(&self, layout: &ScreenLayout) -> String {
        self.selection_range()
            .map(|(a, b)| layout.text().slice(a, b))
            .unwrap_or_default()
    }
}
