//! Prompt and notification surface.
//!
//! Prompts are a two-phase protocol. An action calls [`InfoBar::open`] and returns at once;
//! the host later delivers the user's answer with [`crate::pane::Pane::resolve_prompt`]
//! quoting the [`PromptId`]. Only one prompt is open at a time and an answer for any other
//! id is dropped.

/// A transient message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Informational message.
    Info(String),
    /// Error message.
    Error(String),
}

/// Handle of an opened prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PromptId(pub u64);

/// What a prompt is asking for; decides how its answer is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Search term, literal or regex. Keystrokes preview matches when incremental search is on.
    Find {
        /// Whether the term is a regex.
        regex: bool,
    },
    /// `line[:col]` to jump to.
    JumpLine,
    /// Save before closing a modified buffer?
    QuitConfirm,
}

/// An open prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Handle to answer with.
    pub id: PromptId,
    /// Purpose.
    pub kind: PromptKind,
    /// Label shown before the input.
    pub label: String,
    /// Pre-filled input.
    pub initial: String,
    /// `true` for a yes/no question.
    pub yes_no: bool,
}

/// The user's answer to a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptReply {
    /// Text entered and confirmed.
    Submit(String),
    /// Answer to a yes/no question.
    YesNo(bool),
    /// Dismissed.
    Cancel,
}

/// The message line plus the open prompt, if any.
#[derive(Debug, Default, Clone)]
pub struct InfoBar {
    notice: Option<Notice>,
    prompt: Option<Prompt>,
    next_id: u64,
}

impl InfoBar {
    /// Show an informational message.
    pub fn message(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice::Info(text.into()));
    }

    /// Show an error message.
    pub fn error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice::Error(text.into()));
    }

    /// The current message.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Clear the message.
    pub fn clear(&mut self) {
        self.notice = None;
    }

    /// Open a prompt, replacing any open one.
    pub fn open(
        &mut self,
        kind: PromptKind,
        label: impl Into<String>,
        initial: impl Into<String>,
        yes_no: bool,
    ) -> PromptId {
        self.next_id += 1;
        let id = PromptId(self.next_id);
        self.prompt = Some(Prompt {
            id,
            kind,
            label: label.into(),
            initial: initial.into(),
            yes_no,
        });
        id
    }

    /// The open prompt.
    pub fn active(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// Close and return the prompt `id` if it is the open one.
    pub fn take(&mut self, id: PromptId) -> Option<Prompt> {
        self.prompt.take_if(|p| p.id == id)
    }
}
