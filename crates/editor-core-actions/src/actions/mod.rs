//! Action dispatch.
//!
//! Every editor command is a named [`Action`]. [`Pane::execute`] runs one:
//!
//! - Actions that act on "the cursor" run once per cursor in index order. Edits made for one
//!   cursor re-derive every other cursor before the next runs. The merge pass follows.
//! - View, search, prompt, macro and multi-cursor management actions run once, on the
//!   primary cursor.
//! - Each action is a single undo step, and unless it only moves the view, the view is
//!   relocated around the primary cursor afterwards.
//!
//! Action names are stable strings usable in key-binding files:
//!
//! ```rust
//! use editor_core_actions::Action;
//!
//! let action: Action = "SpawnMultiCursor".parse().unwrap();
//! assert_eq!(action, Action::SpawnMultiCursor);
//! assert_eq!(action.name(), "SpawnMultiCursor");
//! ```

mod clip;
mod edit;
mod find;
mod motion;
mod scroll;
mod session;

use crate::pane::Pane;
use crate::recorder::{MacroStep, Session};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::trace;

macro_rules! define_actions {
    ($($(#[doc = $doc:literal])* $name:ident,)*) => {
        /// A named editor action.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Action {
            $($(#[doc = $doc])* $name,)*
        }

        impl Action {
            /// Every action, in declaration order.
            pub const ALL: &'static [Action] = &[$(Action::$name,)*];

            /// Stable name of the action.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Action::$name => stringify!($name),)*
                }
            }
        }
    };
}

define_actions! {
    /// Move up one row.
    CursorUp,
    /// Move down one row.
    CursorDown,
    /// Move left, or collapse the selection to its start.
    CursorLeft,
    /// Move right, or collapse the selection to its end.
    CursorRight,
    /// Next word end.
    WordRight,
    /// Previous word start.
    WordLeft,
    /// Next sub-word boundary.
    SubWordRight,
    /// Previous sub-word boundary.
    SubWordLeft,
    /// Extend the selection one row up.
    SelectUp,
    /// Extend the selection one row down.
    SelectDown,
    /// Extend the selection one character left.
    SelectLeft,
    /// Extend the selection one character right.
    SelectRight,
    /// Extend the selection to the next word end.
    SelectWordRight,
    /// Extend the selection to the previous word start.
    SelectWordLeft,
    /// Extend the selection to the next sub-word boundary.
    SelectSubWordRight,
    /// Extend the selection to the previous sub-word boundary.
    SelectSubWordLeft,
    /// First non-blank character of the line.
    StartOfText,
    /// Toggle between the first non-blank character and column 0.
    StartOfTextToggle,
    /// Column 0.
    StartOfLine,
    /// Line end.
    EndOfLine,
    /// Select the current line.
    SelectLine,
    /// Extend the selection to the first non-blank character.
    SelectToStartOfText,
    /// Extend the selection to the first non-blank character or column 0.
    SelectToStartOfTextToggle,
    /// Extend the selection to column 0.
    SelectToStartOfLine,
    /// Extend the selection to the line end.
    SelectToEndOfLine,
    /// Previous paragraph boundary.
    ParagraphPrevious,
    /// Next paragraph boundary.
    ParagraphNext,
    /// Extend the selection to the previous paragraph boundary.
    SelectToParagraphPrevious,
    /// Extend the selection to the next paragraph boundary.
    SelectToParagraphNext,
    /// Buffer start.
    CursorStart,
    /// Buffer end.
    CursorEnd,
    /// Extend the selection to the buffer start.
    SelectToStart,
    /// Extend the selection to the buffer end.
    SelectToEnd,
    /// Select the whole buffer.
    SelectAll,
    /// Collapse the selection.
    Deselect,
    /// Jump to the brace matching the one at the cursor.
    JumpToMatchingBrace,
    /// Split the line, carrying indentation over.
    InsertNewline,
    /// Delete backwards.
    Backspace,
    /// Delete forwards.
    Delete,
    /// Delete to the next word end.
    DeleteWordRight,
    /// Delete to the previous word start.
    DeleteWordLeft,
    /// Delete to the next sub-word boundary.
    DeleteSubWordRight,
    /// Delete to the previous sub-word boundary.
    DeleteSubWordLeft,
    /// Indent the selected lines.
    IndentSelection,
    /// Outdent the selected lines.
    OutdentSelection,
    /// Indent the current line.
    IndentLine,
    /// Outdent the current line.
    OutdentLine,
    /// Insert indentation up to the next tab stop.
    InsertTab,
    /// Convert indentation to the configured style.
    Retab,
    /// Undo the last action.
    Undo,
    /// Redo the last undone action.
    Redo,
    /// Toggle overwrite mode.
    ToggleOverwriteMode,
    /// Copy the selection.
    Copy,
    /// Copy the covered lines.
    CopyLine,
    /// Cut the selection.
    Cut,
    /// Cut the covered lines; consecutive line cuts accumulate.
    CutLine,
    /// Paste the clipboard.
    Paste,
    /// Paste the primary selection.
    PastePrimary,
    /// Duplicate the selection.
    Duplicate,
    /// Duplicate the covered lines.
    DuplicateLine,
    /// Delete the covered lines.
    DeleteLine,
    /// Move the covered lines up.
    MoveLinesUp,
    /// Move the covered lines down.
    MoveLinesDown,
    /// Open the regex find prompt.
    Find,
    /// Open the literal find prompt.
    FindLiteral,
    /// Next match of the last search.
    FindNext,
    /// Previous match of the last search.
    FindPrevious,
    /// Toggle highlighting of the last search.
    ToggleHighlightSearch,
    /// Turn search highlighting off.
    UnhighlightSearch,
    /// Forget the last search.
    ResetSearch,
    /// Next diff block.
    DiffNext,
    /// Previous diff block.
    DiffPrevious,
    /// Scroll the view up.
    ScrollUp,
    /// Scroll the view down.
    ScrollDown,
    /// Center the view on the cursor.
    Center,
    /// Cursor to the top of the view.
    CursorToViewTop,
    /// Cursor to the middle of the view.
    CursorToViewCenter,
    /// Cursor to the bottom of the view.
    CursorToViewBottom,
    /// View to the buffer start.
    Start,
    /// View to the buffer end.
    End,
    /// Scroll one page up.
    PageUp,
    /// Scroll one page down.
    PageDown,
    /// Extend the selection one page up.
    SelectPageUp,
    /// Extend the selection one page down.
    SelectPageDown,
    /// Move the cursor one page up.
    CursorPageUp,
    /// Move the cursor one page down.
    CursorPageDown,
    /// Scroll half a page up.
    HalfPageUp,
    /// Scroll half a page down.
    HalfPageDown,
    /// Toggle the diff gutter.
    ToggleDiffGutter,
    /// Toggle line numbers.
    ToggleRuler,
    /// Prompt for a line to jump to.
    JumpLine,
    /// Add a cursor on the next occurrence of the selection.
    SpawnMultiCursor,
    /// Add a cursor one row up.
    SpawnMultiCursorUp,
    /// Add a cursor one row down.
    SpawnMultiCursorDown,
    /// Add a cursor on each selected line.
    SpawnMultiCursorSelect,
    /// Move the primary cursor to the next occurrence.
    SkipMultiCursor,
    /// Move the primary cursor to the previous occurrence.
    SkipMultiCursorBack,
    /// Remove the last secondary cursor.
    RemoveMultiCursor,
    /// Keep only the primary cursor.
    RemoveAllMultiCursors,
    /// Start or stop recording a macro.
    ToggleMacro,
    /// Replay the recorded macro.
    PlayMacro,
    /// Close, asking to save unsaved changes.
    Quit,
    /// Close without asking.
    ForceQuit,
    /// Clear the message line.
    ClearInfo,
    /// Cancel the open prompt.
    Escape,
    /// Do nothing.
    None,
}

impl Action {
    /// `true` if the action runs once per cursor.
    pub const fn applies_per_cursor(self) -> bool {
        use Action as A;
        matches!(
            self,
            A::CursorUp
                | A::CursorDown
                | A::CursorLeft
                | A::CursorRight
                | A::WordRight
                | A::WordLeft
                | A::SubWordRight
                | A::SubWordLeft
                | A::SelectUp
                | A::SelectDown
                | A::SelectLeft
                | A::SelectRight
                | A::SelectWordRight
                | A::SelectWordLeft
                | A::SelectSubWordRight
                | A::SelectSubWordLeft
                | A::StartOfText
                | A::StartOfTextToggle
                | A::StartOfLine
                | A::EndOfLine
                | A::SelectLine
                | A::SelectToStartOfText
                | A::SelectToStartOfTextToggle
                | A::SelectToStartOfLine
                | A::SelectToEndOfLine
                | A::ParagraphPrevious
                | A::ParagraphNext
                | A::SelectToParagraphPrevious
                | A::SelectToParagraphNext
                | A::CursorStart
                | A::CursorEnd
                | A::SelectToStart
                | A::SelectToEnd
                | A::Deselect
                | A::JumpToMatchingBrace
                | A::InsertNewline
                | A::Backspace
                | A::Delete
                | A::DeleteWordRight
                | A::DeleteWordLeft
                | A::DeleteSubWordRight
                | A::DeleteSubWordLeft
                | A::IndentSelection
                | A::OutdentSelection
                | A::IndentLine
                | A::OutdentLine
                | A::InsertTab
                | A::Copy
                | A::CopyLine
                | A::Cut
                | A::CutLine
                | A::Paste
                | A::PastePrimary
                | A::Duplicate
                | A::DuplicateLine
                | A::DeleteLine
                | A::MoveLinesUp
                | A::MoveLinesDown
                | A::FindNext
                | A::FindPrevious
                | A::SelectPageUp
                | A::SelectPageDown
                | A::CursorPageUp
                | A::CursorPageDown
        )
    }

    /// `true` if the action edits text or writes the clipboard (line cuts excepted).
    pub const fn is_edit(self) -> bool {
        use Action as A;
        matches!(
            self,
            A::InsertNewline
                | A::Backspace
                | A::Delete
                | A::DeleteWordRight
                | A::DeleteWordLeft
                | A::DeleteSubWordRight
                | A::DeleteSubWordLeft
                | A::IndentSelection
                | A::OutdentSelection
                | A::IndentLine
                | A::OutdentLine
                | A::InsertTab
                | A::Retab
                | A::Undo
                | A::Redo
                | A::Copy
                | A::CopyLine
                | A::Cut
                | A::Paste
                | A::PastePrimary
                | A::Duplicate
                | A::DuplicateLine
                | A::DeleteLine
                | A::MoveLinesUp
                | A::MoveLinesDown
        )
    }

    /// `true` if the view follows the primary cursor after the action.
    pub const fn relocates(self) -> bool {
        use Action as A;
        !matches!(
            self,
            A::ScrollUp
                | A::ScrollDown
                | A::Center
                | A::Start
                | A::End
                | A::PageUp
                | A::PageDown
                | A::HalfPageUp
                | A::HalfPageDown
                | A::ToggleDiffGutter
                | A::ToggleRuler
                | A::ToggleHighlightSearch
                | A::UnhighlightSearch
                | A::ResetSearch
                | A::ToggleOverwriteMode
                | A::ToggleMacro
                | A::Quit
                | A::ForceQuit
                | A::ClearInfo
                | A::Escape
                | A::None
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An action name that does not exist.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown action: {0}")]
pub struct ParseActionError(pub String);

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|a| a.name() == s)
            .ok_or_else(|| ParseActionError(s.to_string()))
    }
}

impl Pane {
    /// Run `action`. Returns `false` when it had nothing to do.
    pub fn execute(&mut self, session: &mut Session, action: Action) -> bool {
        if !matches!(action, Action::ToggleMacro | Action::PlayMacro) {
            session.recorder.record(MacroStep::Action(action));
        }
        if action.is_edit() {
            self.fresh_clip = false;
        }
        if action == Action::CutLine {
            self.cut_append = self.fresh_clip;
        }

        self.buf.text.begin_group();
        let ok = if action.applies_per_cursor() {
            let mut ok = false;
            for i in 0..self.buf.cursors.len() {
                self.active = i;
                ok |= self.run(session, action);
            }
            ok
        } else {
            self.active = self.buf.cursors.primary_index();
            self.run(session, action)
        };
        self.buf.text.end_group();

        self.buf.cursors.merge_pass();
        self.active = self.buf.cursors.primary_index();
        if action.relocates() {
            self.relocate();
        }
        trace!(
            target: "actions.dispatch",
            action = action.name(),
            cursors = self.buf.cursors.len(),
            ok,
            "executed"
        );
        ok
    }

    /// Run `action` by name.
    pub fn execute_named(&mut self, session: &mut Session, name: &str) -> Result<bool, ParseActionError> {
        let action = name.parse()?;
        Ok(self.execute(session, action))
    }

    fn run(&mut self, session: &mut Session, action: Action) -> bool {
        use Action as A;
        match action {
            A::CursorUp => self.move_with(true, |c, l| c.up(l, 1)),
            A::CursorDown => self.move_with(false, |c, l| c.down(l, 1)),
            A::CursorLeft => self.cursor_left(),
            A::CursorRight => self.cursor_right(),
            A::WordRight => self.move_with(false, |c, l| c.word_right(l)),
            A::WordLeft => self.move_with(true, |c, l| c.word_left(l)),
            A::SubWordRight => self.move_with(false, |c, l| c.sub_word_right(l)),
            A::SubWordLeft => self.move_with(true, |c, l| c.sub_word_left(l)),
            A::SelectUp => self.select_with(|c, l| c.up(l, 1)),
            A::SelectDown => self.select_with(|c, l| c.down(l, 1)),
            A::SelectLeft => self.select_with(|c, l| c.left(l)),
            A::SelectRight => self.select_with(|c, l| c.right(l)),
            A::SelectWordRight => self.select_with(|c, l| c.word_right(l)),
            A::SelectWordLeft => self.select_with(|c, l| c.word_left(l)),
            A::SelectSubWordRight => self.select_with(|c, l| c.sub_word_right(l)),
            A::SelectSubWordLeft => self.select_with(|c, l| c.sub_word_left(l)),
            A::StartOfText => self.move_with(true, |c, l| c.start_of_text(l)),
            A::StartOfTextToggle => self.move_with(true, |c, l| c.start_of_text_toggle(l)),
            A::StartOfLine => self.move_with(true, |c, l| c.start(l)),
            A::EndOfLine => self.move_with(true, |c, l| c.end(l)),
            A::SelectLine => self.with_active(|c, l| {
                c.select_line(l);
                true
            }),
            A::SelectToStartOfText => self.select_with(|c, l| c.start_of_text(l)),
            A::SelectToStartOfTextToggle => self.select_with(|c, l| c.start_of_text_toggle(l)),
            A::SelectToStartOfLine => self.select_with(|c, l| c.start(l)),
            A::SelectToEndOfLine => self.select_with(|c, l| c.end(l)),
            A::ParagraphPrevious => self.move_with(true, |c, l| c.paragraph_previous(l)),
            A::ParagraphNext => self.move_with(false, |c, l| c.paragraph_next(l)),
            A::SelectToParagraphPrevious => self.select_with(|c, l| c.paragraph_previous(l)),
            A::SelectToParagraphNext => self.select_with(|c, l| c.paragraph_next(l)),
            A::CursorStart => self.move_with(true, |c, l| c.goto(l, l.text().start())),
            A::CursorEnd => self.move_with(false, |c, l| c.goto(l, l.text().end())),
            A::SelectToStart => self.select_with(|c, l| c.goto(l, l.text().start())),
            A::SelectToEnd => self.select_with(|c, l| c.goto(l, l.text().end())),
            A::SelectAll => self.select_all(),
            A::Deselect => self.deselect(),
            A::JumpToMatchingBrace => self.jump_to_matching_brace(),

            A::InsertNewline => self.insert_newline(),
            A::Backspace => self.backspace(),
            A::Delete => self.delete(),
            A::DeleteWordRight => self.delete_with(|c, l| c.word_right(l)),
            A::DeleteWordLeft => self.delete_with(|c, l| c.word_left(l)),
            A::DeleteSubWordRight => self.delete_with(|c, l| c.sub_word_right(l)),
            A::DeleteSubWordLeft => self.delete_with(|c, l| c.sub_word_left(l)),
            A::IndentSelection => self.buf.indent_selection(self.active),
            A::OutdentSelection => self.buf.outdent_selection(self.active),
            A::IndentLine => self.buf.indent_line(self.active),
            A::OutdentLine => self.buf.outdent_line(self.active),
            A::InsertTab => self.insert_tab(),
            A::Retab => self.buf.retab(),
            A::Undo => self.undo(),
            A::Redo => self.redo(),
            A::ToggleOverwriteMode => {
                self.overwrite = !self.overwrite;
                true
            }

            A::Copy => self.copy(session),
            A::CopyLine => self.copy_line(session),
            A::Cut => self.cut(session),
            A::CutLine => self.cut_line(session),
            A::Paste => self.paste(session, crate::clipboard::Register::Clipboard),
            A::PastePrimary => self.paste(session, crate::clipboard::Register::Primary),
            A::Duplicate => self.duplicate(),
            A::DuplicateLine => self.duplicate_line(),
            A::DeleteLine => self.delete_line(),
            A::MoveLinesUp => self.move_lines(true),
            A::MoveLinesDown => self.move_lines(false),

            A::Find => self.find(true),
            A::FindLiteral => self.find(false),
            A::FindNext => self.find_next(true),
            A::FindPrevious => self.find_next(false),
            A::ToggleHighlightSearch => self.toggle_highlight_search(),
            A::UnhighlightSearch => self.unhighlight_search(),
            A::ResetSearch => self.reset_search(),
            A::DiffNext => self.diff_jump(true),
            A::DiffPrevious => self.diff_jump(false),

            A::ScrollUp => self.scroll_action(true),
            A::ScrollDown => self.scroll_action(false),
            A::Center => self.center(),
            A::CursorToViewTop => self.cursor_to_view_top(),
            A::CursorToViewCenter => self.cursor_to_view_center(),
            A::CursorToViewBottom => self.cursor_to_view_bottom(),
            A::Start => self.view_start(),
            A::End => self.view_end(),
            A::PageUp => self.page_up(),
            A::PageDown => self.page_down(),
            A::SelectPageUp => {
                let rows = self.view.height;
                self.select_with(|c, l| c.up(l, rows))
            }
            A::SelectPageDown => {
                let rows = self.view.height;
                self.select_with(|c, l| c.down(l, rows))
            }
            A::CursorPageUp => {
                let rows = self.page_rows();
                self.move_with(true, |c, l| c.up(l, rows))
            }
            A::CursorPageDown => {
                let rows = self.page_rows();
                self.move_with(false, |c, l| c.down(l, rows))
            }
            A::HalfPageUp => self.half_page_up(),
            A::HalfPageDown => self.half_page_down(),
            A::ToggleDiffGutter => self.toggle_diff_gutter(),
            A::ToggleRuler => self.toggle_ruler(),
            A::JumpLine => self.jump_line(),

            A::SpawnMultiCursor => self.spawn_from_selection(),
            A::SpawnMultiCursorUp => self.spawn_above_below(true),
            A::SpawnMultiCursorDown => self.spawn_above_below(false),
            A::SpawnMultiCursorSelect => self.spawn_at_each_selected_line(),
            A::SkipMultiCursor => self.skip(true),
            A::SkipMultiCursorBack => self.skip(false),
            A::RemoveMultiCursor => self.remove_last(),
            A::RemoveAllMultiCursors => self.remove_all(),

            A::ToggleMacro => self.toggle_macro(session),
            A::PlayMacro => self.play_macro(session),
            A::Quit => self.quit(),
            A::ForceQuit => self.force_quit(),
            A::ClearInfo => {
                self.info.clear();
                true
            }
            A::Escape => self.escape(),
            A::None => true,
        }
    }
}
