use crate::clipboard::{ClipboardError, Register};
use crate::pane::Pane;
use crate::recorder::Session;
use crate::text::leading_whitespace;

impl Pane {
    fn clip_slot(&self) -> (usize, usize) {
        (self.active, self.buf.cursors.len())
    }

    fn report(&mut self, result: Result<(), ClipboardError>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                self.info.error(err.to_string());
                false
            }
        }
    }

    fn write_clip(&mut self, session: &mut Session, text: &str) -> bool {
        let (num, count) = self.clip_slot();
        let result = session
            .clipboard
            .write_multi(Register::Clipboard, text, num, count);
        self.report(result)
    }

    pub(super) fn copy(&mut self, session: &mut Session) -> bool {
        let text = self.buf.selected_text(self.active);
        if text.is_empty() || !self.write_clip(session, &text) {
            return false;
        }
        self.fresh_clip = false;
        self.info.message("Copied selection");
        true
    }

    pub(super) fn copy_line(&mut self, session: &mut Session) -> bool {
        let saved = self.cursor().clone();
        let lines = self.buf.select_whole_lines(self.active);
        let text = self.buf.selected_text(self.active);
        self.buf.restore_cursor(self.active, saved);
        if lines == 0 || !self.write_clip(session, &text) {
            return false;
        }
        self.fresh_clip = false;
        if lines > 1 {
            self.info.message(format!("Copied {lines} lines"));
        } else {
            self.info.message("Copied line");
        }
        true
    }

    pub(super) fn cut(&mut self, session: &mut Session) -> bool {
        let text = self.buf.selected_text(self.active);
        if text.is_empty() || !self.write_clip(session, &text) {
            return false;
        }
        self.buf.delete_selection(self.active);
        self.with_active(|c, layout| c.store_visual_x(layout));
        self.fresh_clip = false;
        self.info.message("Cut selection");
        true
    }

    /// Cut the covered lines. Right after another line cut, the text is appended to what that
    /// cut put on the clipboard.
    pub(super) fn cut_line(&mut self, session: &mut Session) -> bool {
        let lines = self.buf.select_whole_lines(self.active);
        if lines == 0 {
            return false;
        }
        let mut text = self.buf.selected_text(self.active);
        if self.cut_append {
            let (num, count) = self.clip_slot();
            match session.clipboard.read_multi(Register::Clipboard, num, count) {
                Ok(previous) => text.insert_str(0, &previous),
                Err(err) => {
                    self.info.error(err.to_string());
                    return false;
                }
            }
        }
        if !self.write_clip(session, &text) {
            return false;
        }
        self.fresh_clip = true;
        self.buf.delete_selection(self.active);
        self.with_active(|c, layout| c.store_visual_x(layout));
        if lines > 1 {
            self.info.message(format!("Cut {lines} lines"));
        } else {
            self.info.message("Cut line");
        }
        true
    }

    pub(super) fn paste(&mut self, session: &mut Session, register: Register) -> bool {
        let (num, count) = self.clip_slot();
        let clip = match session.clipboard.read_multi(register, num, count) {
            Ok(clip) => clip,
            Err(err) => {
                self.info.error(err.to_string());
                return false;
            }
        };
        self.buf.delete_selection(self.active);
        let loc = self.cursor().loc;
        let clip = self.smart_paste(&clip, loc.line, loc.column);
        self.buf.insert(loc, &clip);
        self.with_active(|c, layout| c.store_visual_x(layout));
        self.fresh_clip = false;
        self.info.message("Pasted clipboard");
        true
    }

    /// Re-indent continuation lines of a multi-line paste to the indentation of `line`.
    fn smart_paste(&self, clip: &str, line: usize, column: usize) -> String {
        if !self.buf.settings.smart_paste || column == 0 {
            return clip.to_string();
        }
        let paste_indent = leading_whitespace(clip);
        let continuation = format!("\n{paste_indent}");
        if paste_indent == " " || !clip.contains(&continuation) {
            return clip.to_string();
        }
        let line = self.buf.text.line(line);
        let indent = leading_whitespace(&line);
        clip[paste_indent.len()..].replace(&continuation, &format!("\n{indent}"))
    }
}
