use crate::pane::{HostRequest, Pane};
use crate::prompt::{PromptKind, PromptReply};
use crate::recorder::{MacroStep, Session};
use tracing::debug;

impl Pane {
    pub(super) fn toggle_macro(&mut self, session: &mut Session) -> bool {
        let recorder = &mut session.recorder;
        if recorder.is_recording() {
            recorder.stop();
            self.info.message("Stopped recording");
        } else {
            recorder.start();
            self.info.message("Recording");
        }
        true
    }

    /// Replay the recorded steps in order. The replay runs inside the dispatching action's undo
    /// group, so it undoes as one step.
    pub(super) fn play_macro(&mut self, session: &mut Session) -> bool {
        if session.recorder.is_recording() {
            return false;
        }
        let steps = session.recorder.steps().to_vec();
        debug!(target: "recorder", steps = steps.len(), "replay");
        for step in steps {
            match step {
                MacroStep::Insert(ch) => self.insert_char(session, ch),
                MacroStep::Action(action) => {
                    self.execute(session, action);
                }
            }
        }
        true
    }

    pub(super) fn quit(&mut self) -> bool {
        if !self.buf.is_modified() {
            self.request(HostRequest::Close);
        } else if self.buf.settings.auto_save {
            self.request(HostRequest::Save);
            self.request(HostRequest::Close);
        } else {
            self.info.open(
                PromptKind::QuitConfirm,
                "Save changes to buffer before closing? (y,n,esc)",
                "",
                true,
            );
        }
        true
    }

    pub(super) fn force_quit(&mut self) -> bool {
        self.request(HostRequest::Close);
        true
    }

    pub(super) fn escape(&mut self) -> bool {
        let Some(id) = self.info.active().map(|p| p.id) else {
            return false;
        };
        self.resolve_prompt(id, PromptReply::Cancel)
    }
}

#[cfg(test)]
mod tests {
    use crate::actions::Action;
    use crate::document::Buffer;
    use crate::pane::{HostRequest, Pane};
    use crate::prompt::{PromptKind, PromptReply};
    use crate::recorder::Session;
    use crate::settings::Settings;

    fn pane(text: &str) -> Pane {
        Pane::new(Buffer::new(text, Settings::default()), 80, 10)
    }

    #[test]
    fn test_macro_replays_as_one_undo_step() {
        let mut s = Session::default();
        let mut p = pane("x\ny");
        p.execute(&mut s, Action::ToggleMacro);
        assert!(!p.execute(&mut s, Action::PlayMacro));
        p.insert_char(&mut s, '-');
        p.execute(&mut s, Action::CursorDown);
        p.execute(&mut s, Action::StartOfLine);
        p.execute(&mut s, Action::ToggleMacro);
        assert_eq!(s.recorder.steps().len(), 3);
        assert_eq!(p.buf.text.text(), "-x\ny");

        assert!(p.execute(&mut s, Action::PlayMacro));
        assert_eq!(p.buf.text.text(), "-x\n-y");
        p.execute(&mut s, Action::Undo);
        assert_eq!(p.buf.text.text(), "-x\ny");
    }

    #[test]
    fn test_quit_unmodified_closes() {
        let mut s = Session::default();
        let mut p = pane("x");
        p.execute(&mut s, Action::Quit);
        assert_eq!(p.take_requests(), vec![HostRequest::Close]);
    }

    #[test]
    fn test_quit_modified_asks() {
        let mut s = Session::default();
        let mut p = pane("x");
        p.insert_char(&mut s, 'a');
        p.execute(&mut s, Action::Quit);
        assert!(p.take_requests().is_empty());
        let prompt = p.info.active().unwrap().clone();
        assert_eq!(prompt.kind, PromptKind::QuitConfirm);
        assert!(prompt.yes_no);
        assert!(p.resolve_prompt(prompt.id, PromptReply::YesNo(true)));
        assert_eq!(
            p.take_requests(),
            vec![HostRequest::Save, HostRequest::Close]
        );
    }

    #[test]
    fn test_quit_with_auto_save() {
        let mut s = Session::default();
        let settings = Settings {
            auto_save: true,
            ..Settings::default()
        };
        let mut p = Pane::new(Buffer::new("x", settings), 80, 10);
        p.insert_char(&mut s, 'a');
        p.execute(&mut s, Action::Quit);
        assert_eq!(
            p.take_requests(),
            vec![HostRequest::Save, HostRequest::Close]
        );
        p.execute(&mut s, Action::ForceQuit);
        assert_eq!(p.take_requests(), vec![HostRequest::Close]);
    }

    #[test]
    fn test_escape_cancels_prompt() {
        let mut s = Session::default();
        let mut p = pane("x");
        assert!(!p.execute(&mut s, Action::Escape));
        p.execute(&mut s, Action::JumpLine);
        assert!(p.execute(&mut s, Action::Escape));
        assert!(p.info.active().is_none());
    }
}
