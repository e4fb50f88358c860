//! A buffer shown in a view.
//!
//! [`Pane`] owns everything a single editing surface needs: the [`Buffer`], its [`View`], the
//! [`InfoBar`] and per-pane flags. Actions are dispatched on it (see [`crate::actions`]);
//! mouse input and prompt answers also arrive here.

use crate::cursor::Cursor;
use crate::diff::DiffProvider;
use crate::document::Buffer;
use crate::layout::{ScreenLayout, VisualLocation};
use crate::location::{Location, Selection};
use crate::prompt::{InfoBar, PromptId, PromptKind, PromptReply};
use crate::recorder::{MacroStep, Session};
use crate::search::{self, SearchError, SearchMatch};
use crate::view::View;
use std::time::{Duration, Instant};
use tracing::debug;

/// Something only the host can do, queued by an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    /// Save the buffer.
    Save,
    /// Close the pane.
    Close,
}

#[derive(Debug, Clone, Copy, Default)]
struct ClickState {
    last_time: Option<Instant>,
    last_loc: Location,
    double: bool,
    triple: bool,
}

/// An editing surface.
pub struct Pane {
    /// The edited buffer.
    pub buf: Buffer,
    /// The visible window.
    pub view: View,
    /// Messages and prompts.
    pub info: InfoBar,
    /// Typing replaces the character under the cursor.
    pub overwrite: bool,
    // The next CutLine appends to the clipboard.
    pub(crate) fresh_clip: bool,
    // Snapshot of `fresh_clip` taken before a per-cursor CutLine runs.
    pub(crate) cut_append: bool,
    // Multi-cursor spawn matches whole words only.
    pub(crate) multi_word: bool,
    // Cursor the running action applies to.
    pub(crate) active: usize,
    search_orig: Option<Cursor>,
    click: ClickState,
    diff: Option<Box<dyn DiffProvider>>,
    requests: Vec<HostRequest>,
}

impl std::fmt::Debug for Pane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pane")
            .field("buf", &self.buf)
            .field("view", &self.view)
            .field("info", &self.info)
            .field("overwrite", &self.overwrite)
            .field("fresh_clip", &self.fresh_clip)
            .field("multi_word", &self.multi_word)
            .field("requests", &self.requests)
            .finish_non_exhaustive()
    }
}

impl Pane {
    /// Show `buf` in a `width` x `height` view.
    pub fn new(buf: Buffer, width: usize, height: usize) -> Self {
        Self {
            buf,
            view: View::new(width, height),
            info: InfoBar::default(),
            overwrite: false,
            fresh_clip: false,
            cut_append: false,
            multi_word: false,
            active: 0,
            search_orig: None,
            click: ClickState::default(),
            diff: None,
            requests: Vec::new(),
        }
    }

    /// Attach a diff provider.
    pub fn set_diff_provider(&mut self, provider: Box<dyn DiffProvider>) {
        self.diff = Some(provider);
    }

    pub(crate) fn diff_provider(&self) -> Option<&dyn DiffProvider> {
        self.diff.as_deref()
    }

    /// `true` while word-spawn mode is on.
    pub fn multi_word(&self) -> bool {
        self.multi_word
    }

    /// `true` when the next line cut will append to the clipboard.
    pub fn fresh_clip(&self) -> bool {
        self.fresh_clip
    }

    /// Resize the view.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.view.width = width;
        self.view.height = height;
        self.relocate();
    }

    /// Drain the queued host requests.
    pub fn take_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests)
    }

    pub(crate) fn request(&mut self, request: HostRequest) {
        self.requests.push(request);
    }

    /// The buffer laid out at the view width.
    pub fn layout(&self) -> ScreenLayout<'_> {
        ScreenLayout::new(&self.buf.text, &self.buf.settings, self.view.width)
    }

    /// Run `f` on cursor `index` with the current layout.
    pub(crate) fn with_cursor<R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut Cursor, &ScreenLayout) -> R,
    ) -> R {
        let layout = ScreenLayout::new(&self.buf.text, &self.buf.settings, self.view.width);
        f(self.buf.cursors.get_or_primary_mut(index), &layout)
    }

    /// Run `f` on the cursor the current action applies to.
    pub(crate) fn with_active<R>(&mut self, f: impl FnOnce(&mut Cursor, &ScreenLayout) -> R) -> R {
        self.with_cursor(self.active, f)
    }

    pub(crate) fn cursor(&self) -> &Cursor {
        self.buf.cursor(self.active)
    }

    /// Scroll the view so the primary cursor respects the scroll margin.
    pub fn relocate(&mut self) -> bool {
        let layout = ScreenLayout::new(&self.buf.text, &self.buf.settings, self.view.width);
        let margin = self.buf.settings.effective_scroll_margin(self.view.height);
        let loc = self.buf.cursors.primary().loc;
        self.view.relocate(&layout, loc, margin)
    }

    /// Select `m` with the active cursor and move to its end.
    pub(crate) fn select_match(&mut self, m: SearchMatch) {
        self.with_active(|c, layout| {
            c.set_selection(m.start, m.end);
            c.origin = Selection::new(m.start, m.end);
            c.goto(layout, m.end);
        });
    }

    /// Type `ch` at every cursor. Selections are replaced; in overwrite mode the character
    /// under the cursor is replaced unless at the line end.
    pub fn insert_char(&mut self, session: &mut Session, ch: char) {
        session.recorder.record(MacroStep::Insert(ch));
        let mut text = [0u8; 4];
        let text = ch.encode_utf8(&mut text);
        self.buf.text.begin_group();
        for i in 0..self.buf.cursors.len() {
            let deleted = self.buf.delete_selection(i);
            let loc = self.buf.cursor(i).loc;
            if !deleted && self.overwrite && loc.column < self.buf.text.line_len(loc.line) {
                let next = Location::new(loc.line, loc.column + 1);
                self.buf.replace(loc, next, text);
                self.buf.cursor_mut(i).loc = next;
            } else {
                self.buf.insert(loc, text);
            }
            self.with_cursor(i, |c, layout| c.store_visual_x(layout));
        }
        self.buf.text.end_group();
        self.fresh_clip = false;
        self.buf.cursors.merge_pass();
        self.relocate();
    }

    /// Buffer location under the view cell `(x, y)`.
    pub fn location_at(&self, x: usize, y: usize) -> Location {
        let layout = self.layout();
        let screen = layout.scroll(self.view.start_line, y as isize);
        let visual_x = if layout.is_wrapping() {
            x
        } else {
            x + self.view.start_col
        };
        layout.location_from_visual(VisualLocation { screen, visual_x })
    }

    /// A click at `(x, y)`. Two or three clicks on the same spot within the double-click
    /// threshold select the word or line under it. Clicks below the view are ignored.
    pub fn mouse_press(&mut self, session: &mut Session, x: usize, y: usize, now: Instant) -> bool {
        if y >= self.view.height {
            return false;
        }
        let loc = self.location_at(x, y);
        if self.buf.cursors.len() > 1 {
            self.buf.cursors.clear_secondary();
        }
        self.active = self.buf.cursors.primary_index();
        self.buf.cursors.primary_mut().loc = loc;

        let threshold = Duration::from_millis(self.buf.settings.double_click_threshold_ms);
        let repeated = self
            .click
            .last_time
            .is_some_and(|t| now.saturating_duration_since(t) < threshold)
            && self.click.last_loc == loc;
        self.click.last_time = Some(now);
        if repeated {
            if self.click.double {
                self.click.triple = true;
                self.click.double = false;
                self.with_active(|c, layout| c.select_line(layout));
            } else {
                self.click.double = true;
                self.click.triple = false;
                self.with_active(|c, layout| {
                    c.select_word(layout);
                });
            }
            self.copy_to_primary(session);
        } else {
            self.click.double = false;
            self.click.triple = false;
            let c = self.buf.cursors.primary_mut();
            c.reset_selection();
            c.origin = Selection::caret(loc);
        }
        self.with_active(|c, layout| c.store_visual_x(layout));
        self.click.last_loc = loc;
        self.relocate();
        true
    }

    /// Dragging to `(x, y)` extends the selection by character, word or line depending on how
    /// the drag started.
    pub fn mouse_drag(&mut self, x: usize, y: usize) -> bool {
        if y >= self.view.height {
            return false;
        }
        let loc = self.location_at(x, y);
        let (double, triple) = (self.click.double, self.click.triple);
        self.active = self.buf.cursors.primary_index();
        self.with_active(|c, layout| {
            c.loc = loc;
            if triple {
                c.add_line_to_selection(layout);
            } else if double {
                c.add_word_to_selection(layout);
            } else {
                c.set_selection(c.origin.anchor, loc);
            }
            c.store_visual_x(layout);
        });
        self.relocate();
        true
    }

    /// End of a click or drag: the selection goes to the primary-selection register.
    pub fn mouse_release(&mut self, session: &mut Session) -> bool {
        self.active = self.buf.cursors.primary_index();
        self.copy_to_primary(session)
    }

    fn copy_to_primary(&mut self, session: &mut Session) -> bool {
        let text = self.buf.selected_text(self.active);
        if text.is_empty() {
            return false;
        }
        if let Err(err) = session
            .clipboard
            .write(crate::clipboard::Register::Primary, &text)
        {
            debug!(target: "clipboard", %err, "primary selection not written");
            return false;
        }
        true
    }

    /// Search for `term` from the primary cursor and select the match. The term is remembered
    /// for find-next on success.
    pub fn search(&mut self, term: &str, regex: bool, forward: bool) -> Result<bool, SearchError> {
        self.active = self.buf.cursors.primary_index();
        let from = self.cursor().loc;
        let options = self.buf.search_options(regex);
        match search::find_next(&self.buf.text, term, from, forward, options)? {
            Some(m) => {
                self.select_match(m);
                let highlight = self.buf.settings.hl_search;
                self.buf.search.commit(term, regex, highlight);
                self.relocate();
                Ok(true)
            }
            None => {
                self.buf.cursors.primary_mut().reset_selection();
                self.info.message("No matches found");
                Ok(false)
            }
        }
    }

    /// Open the find prompt, pre-filled with the selection. With incremental search on, the
    /// pre-filled term is previewed at once.
    pub(crate) fn open_find(&mut self, regex: bool) -> PromptId {
        self.active = self.buf.cursors.primary_index();
        self.search_orig = Some(self.cursor().clone());
        let prefill = search::prompt_prefill(&self.buf.selected_text(self.active), regex);
        if self.buf.settings.inc_search && !prefill.is_empty() {
            self.preview_search(&prefill, regex);
        }
        let label = if regex { "Find (regex): " } else { "Find: " };
        self.info
            .open(PromptKind::Find { regex }, label, prefill, false)
    }

    fn search_origin(&self) -> Location {
        self.search_orig
            .as_ref()
            .map_or(self.buf.cursors.primary().loc, |c| c.loc)
    }

    fn restore_search_origin(&mut self) {
        if let Some(orig) = self.search_orig.take() {
            let layout = ScreenLayout::new(&self.buf.text, &self.buf.settings, self.view.width);
            let c = self.buf.cursors.primary_mut();
            let num = c.num;
            *c = orig;
            c.num = num;
            c.clamp(&layout);
        }
    }

    fn preview_search(&mut self, term: &str, regex: bool) {
        let from = self.search_origin();
        let options = self.buf.search_options(regex);
        match search::find_next(&self.buf.text, term, from, true, options) {
            Ok(Some(m)) => self.select_match(m),
            _ => self.with_active(|c, layout| {
                c.reset_selection();
                c.goto(layout, from);
            }),
        }
    }

    /// The text of prompt `id` changed. Drives incremental search.
    pub fn prompt_changed(&mut self, id: PromptId, text: &str) {
        let Some(prompt) = self.info.active() else {
            return;
        };
        if prompt.id != id {
            return;
        }
        if let PromptKind::Find { regex } = prompt.kind
            && self.buf.settings.inc_search
        {
            self.active = self.buf.cursors.primary_index();
            self.preview_search(text, regex);
            self.relocate();
        }
    }

    /// Deliver the answer to prompt `id`. Answers to prompts that are no longer open are
    /// ignored and return `false`.
    pub fn resolve_prompt(&mut self, id: PromptId, reply: PromptReply) -> bool {
        let Some(prompt) = self.info.take(id) else {
            return false;
        };
        self.active = self.buf.cursors.primary_index();
        let done = match (prompt.kind, reply) {
            (PromptKind::Find { .. }, PromptReply::Cancel) => {
                self.restore_search_origin();
                true
            }
            (_, PromptReply::Cancel) => true,
            (PromptKind::Find { regex }, PromptReply::Submit(term)) => self.finish_find(&term, regex),
            (PromptKind::JumpLine, PromptReply::Submit(text)) => self.jump_to(&text),
            (PromptKind::QuitConfirm, PromptReply::YesNo(true)) => {
                self.request(HostRequest::Save);
                self.request(HostRequest::Close);
                true
            }
            (PromptKind::QuitConfirm, PromptReply::YesNo(false)) => {
                self.request(HostRequest::Close);
                true
            }
            _ => false,
        };
        self.relocate();
        done
    }

    fn finish_find(&mut self, term: &str, regex: bool) -> bool {
        let from = self.search_origin();
        let options = self.buf.search_options(regex);
        match search::find_next(&self.buf.text, term, from, true, options) {
            Err(err) => {
                self.restore_search_origin();
                self.info.error(err.to_string());
                false
            }
            Ok(Some(m)) => {
                self.search_orig = None;
                self.select_match(m);
                let highlight = self.buf.settings.hl_search;
                self.buf.search.commit(term, regex, highlight);
                true
            }
            Ok(None) => {
                self.search_orig = None;
                self.buf.cursors.primary_mut().reset_selection();
                self.info.message("No matches found");
                false
            }
        }
    }

    /// Jump to `line[:col]`, both 1-based. A leading `+` or `-` makes the line relative.
    fn jump_to(&mut self, text: &str) -> bool {
        let Some(target) = parse_jump(text, self.cursor().loc.line) else {
            self.info.error(format!("Invalid line number: {text}"));
            return false;
        };
        self.buf.cursors.clear_secondary();
        self.active = 0;
        self.with_active(|c, layout| {
            c.reset_selection();
            c.goto(layout, target);
        });
        true
    }
}

fn parse_jump(text: &str, current: usize) -> Option<Location> {
    let text = text.trim();
    let (line, col) = match text.split_once(':') {
        Some((line, col)) => (line, Some(col)),
        None => (text, None),
    };
    let line = if let Some(n) = line.strip_prefix('+') {
        current.checked_add(n.parse().ok()?)?
    } else if let Some(n) = line.strip_prefix('-') {
        current.saturating_sub(n.parse().ok()?)
    } else {
        line.parse::<usize>().ok()?.saturating_sub(1)
    };
    let column = match col {
        Some(col) => col.parse::<usize>().ok()?.saturating_sub(1),
        None => 0,
    };
    Some(Location::new(line, column))
}
