//! The `MiniGame` trait: the contract between a room and its round.
//!
//! The room calls these methods at the right time; each variant only
//! implements its own rules. Methods with defaults describe the common
//! case (no timer, no actor, nothing personal to show) so a variant only
//! overrides what makes it different.

use partyline_protocol::{Phase, PlayerId, StateView};
use rand::rngs::StdRng;

use crate::GameKind;

/// Submission sent by the client when its countdown display hits zero.
pub const TIMER_COMPLETE: &str = "timer_complete";

/// Submission sent by the client when the embedded video ends.
pub const VIDEO_COMPLETE: &str = "video_complete";

/// How the room turns a round into points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringPolicy {
    /// One point for every accepted submission.
    PerSubmission,
    /// Only the first accepted guess scores (and it scores big).
    FirstCorrectGuess,
    /// Nothing per submission; the vote decides who scores.
    VoteOnly,
}

/// What happened to one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmitOutcome {
    /// The submission counted as a player's answer. Completion signals
    /// (`timer_complete`, `video_complete`) are never accepted answers.
    pub accepted: bool,
    /// The round is over after this submission.
    pub complete: bool,
}

impl SubmitOutcome {
    /// Not accepted; `complete` reports the round's current state.
    pub fn rejected(complete: bool) -> Self {
        Self {
            accepted: false,
            complete,
        }
    }

    pub fn accepted(complete: bool) -> Self {
        Self {
            accepted: true,
            complete,
        }
    }
}

/// Per-recipient overrides on top of a shared [`StateView`].
///
/// `None` keeps the shared value. Rendering a snapshot for one player is
/// `shared.clone()` followed by [`PlayerView::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerView {
    pub game_title: Option<String>,
    pub game_instructions: Option<String>,
    pub round_instructions: Option<String>,
    pub needs_input: Option<bool>,
    pub current_prompt: Option<String>,
}

impl PlayerView {
    /// Renders the shared snapshot for one recipient.
    pub fn apply(self, shared: &StateView) -> StateView {
        let mut view = shared.clone();
        if let Some(title) = self.game_title {
            view.game_title = title;
        }
        if let Some(instructions) = self.game_instructions {
            view.game_instructions = instructions;
        }
        if let Some(round) = self.round_instructions {
            view.round_instructions = round;
        }
        if let Some(needs_input) = self.needs_input {
            view.needs_input = needs_input;
        }
        if let Some(prompt) = self.current_prompt {
            view.current_prompt = Some(prompt);
        }
        view
    }
}

/// One round of a party game.
///
/// Instances are created by [`GameKind::create`] while the room shows
/// the instructions, receive [`setup`](Self::setup) once every player is
/// ready, and are dropped when the next round is picked.
pub trait MiniGame: Send + 'static {
    /// The registry entry this instance was created from.
    fn kind(&self) -> GameKind;

    /// Human-readable name, e.g. "Mad Libs".
    fn name(&self) -> &'static str {
        self.kind().display_name()
    }

    /// Title shown while the room waits for everyone to ready up.
    fn headline(&self) -> String {
        self.name().to_string()
    }

    /// How to play, shown with the headline.
    fn instructions(&self) -> String;

    /// Whether players type answers during this round.
    fn needs_input(&self) -> bool;

    /// The big text shown to everyone while playing.
    fn prompt(&self) -> String;

    /// Kind-specific preparation with the final roster, e.g. picking
    /// the actor or fixing how many answers to wait for. `roster` is
    /// sorted so a seeded `rng` gives reproducible picks.
    fn setup(&mut self, _roster: &[PlayerId], _rng: &mut StdRng) {}

    /// Records a player's answer (or a client completion signal).
    fn submit_answer(&mut self, player: &PlayerId, answer: &str) -> SubmitOutcome;

    /// Returns `true` once the round is over.
    fn is_complete(&self) -> bool;

    /// Summary shown once the round is over (and while voting).
    fn result(&self) -> String;

    fn has_timer(&self) -> bool {
        false
    }

    /// Seconds left on the countdown; 0 for untimed rounds.
    fn time_remaining(&self) -> u32 {
        0
    }

    /// Advances the countdown by one second. Reaching zero completes
    /// the round.
    fn decrement_timer(&mut self) {}

    fn scoring_policy(&self) -> ScoringPolicy {
        self.kind().scoring_policy()
    }

    /// The player whose answer ended the round, for guessing games.
    fn winner(&self) -> Option<&PlayerId> {
        None
    }

    /// Explicit request for something to answer (word-filling slots).
    /// Returns `true` if the round changed.
    fn request_prompt(&mut self, _player: &PlayerId) -> bool {
        false
    }

    /// A player left mid-round. Returns `true` if the round changed.
    fn player_left(&mut self, _player: &PlayerId) -> bool {
        false
    }

    /// What `player` should see instead of the shared playing view.
    fn personalize(&self, _player: &PlayerId) -> Option<PlayerView> {
        None
    }

    /// Adds kind-specific auxiliary fields to the shared snapshot.
    fn decorate(&self, _phase: Phase, _view: &mut StateView) {}
}
