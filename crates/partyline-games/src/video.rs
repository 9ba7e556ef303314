//! Watch a funny video without laughing.

use partyline_protocol::{Phase, PlayerId, StateView};

use crate::logic::{MiniGame, SubmitOutcome, VIDEO_COMPLETE};
use crate::GameKind;

#[derive(Debug, Clone)]
pub struct VideoWatch {
    video_id: String,
    finished: bool,
}

impl VideoWatch {
    pub fn new(video_id: &str) -> Self {
        Self {
            video_id: video_id.to_string(),
            finished: false,
        }
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }
}

impl MiniGame for VideoWatch {
    fn kind(&self) -> GameKind {
        GameKind::YouLaughYouLose
    }

    fn instructions(&self) -> String {
        "Last person to keep a straight face wins!".to_string()
    }

    fn needs_input(&self) -> bool {
        false
    }

    fn prompt(&self) -> String {
        "Watch and don't laugh!".to_string()
    }

    fn submit_answer(&mut self, _player: &PlayerId, answer: &str) -> SubmitOutcome {
        if answer == VIDEO_COMPLETE {
            self.finished = true;
        }
        SubmitOutcome::rejected(self.finished)
    }

    fn is_complete(&self) -> bool {
        self.finished
    }

    fn result(&self) -> String {
        "Who kept the straightest face?".to_string()
    }

    fn decorate(&self, _phase: Phase, view: &mut StateView) {
        view.youtube_video_id = Some(self.video_id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_video_signal_completes() {
        let mut game = VideoWatch::new("abc123");
        let alice = PlayerId::from("alice");

        assert!(!game.submit_answer(&alice, "haha").complete);
        assert!(!game.submit_answer(&alice, crate::TIMER_COMPLETE).complete);

        let outcome = game.submit_answer(&alice, VIDEO_COMPLETE);
        assert_eq!(outcome, SubmitOutcome::rejected(true));
        assert!(game.is_complete());
    }

    #[test]
    fn test_decorate_adds_video_id() {
        let game = VideoWatch::new("abc123");
        let mut view = StateView::default();
        game.decorate(Phase::Voting, &mut view);
        assert_eq!(view.youtube_video_id.as_deref(), Some("abc123"));
    }
}
