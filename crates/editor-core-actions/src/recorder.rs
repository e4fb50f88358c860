//! Macro recording and process-scoped session state.
//!
//! There is one [`Session`] per editor process. It is passed to every dispatched action
//! instead of living in a global, so several independent editors can coexist in one process.

use crate::actions::Action;
use crate::clipboard::ClipboardHub;
use tracing::debug;

/// One recorded step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacroStep {
    /// A typed character.
    Insert(char),
    /// A dispatched action.
    Action(Action),
}

/// Records steps between a start and a stop.
#[derive(Debug, Default, Clone)]
pub struct MacroRecorder {
    recording: bool,
    steps: Vec<MacroStep>,
}

impl MacroRecorder {
    /// `true` while recording.
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Start a fresh recording, discarding the previous one.
    pub fn start(&mut self) {
        self.recording = true;
        self.steps.clear();
        debug!(target: "recorder", "start");
    }

    /// Freeze the recording.
    pub fn stop(&mut self) {
        self.recording = false;
        debug!(target: "recorder", steps = self.steps.len(), "stop");
    }

    /// Append `step` if recording.
    pub fn record(&mut self, step: MacroStep) {
        if self.recording {
            self.steps.push(step);
        }
    }

    /// The recorded steps.
    pub fn steps(&self) -> &[MacroStep] {
        &self.steps
    }
}

/// State shared by every pane of one editor.
#[derive(Debug, Default)]
pub struct Session {
    /// The macro recorder.
    pub recorder: MacroRecorder,
    /// Clipboard registers.
    pub clipboard: ClipboardHub,
}

impl Session {
    /// A session over `clipboard`.
    pub fn new(clipboard: ClipboardHub) -> Self {
        Self {
            recorder: MacroRecorder::default(),
            clipboard,
        }
    }
}
