//! Acting games: one player performs, everyone else guesses.

use partyline_protocol::PlayerId;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::logic::{MiniGame, PlayerView, SubmitOutcome};
use crate::matcher::fuzzy_match;
use crate::GameKind;

/// Charades or Imitations.
///
/// An actor is drawn from the roster at setup and sees the secret; the
/// other players see a guessing prompt. The first guess that
/// [fuzzy-matches](crate::matcher::fuzzy_match) the secret wins the round.
/// A round left without anyone to guess ends with no winner.
#[derive(Debug, Clone)]
pub struct Acting {
    kind: GameKind,
    secret: String,
    actor: Option<PlayerId>,
    /// Everyone but the actor, filled at setup.
    guessers: Vec<PlayerId>,
    winner: Option<PlayerId>,
    complete: bool,
}

impl Acting {
    /// `kind` picks the wording; any kind other than
    /// [`GameKind::Imitations`] reads as charades.
    pub fn new(kind: GameKind, secret: &str) -> Self {
        Self {
            kind,
            secret: secret.to_string(),
            actor: None,
            guessers: Vec::new(),
            winner: None,
            complete: false,
        }
    }

    pub fn actor(&self) -> Option<&PlayerId> {
        self.actor.as_ref()
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Fixes the actor instead of drawing one.
    pub fn set_actor(&mut self, actor: PlayerId) {
        self.actor = Some(actor);
    }

    fn is_imitation(&self) -> bool {
        self.kind == GameKind::Imitations
    }

    fn perform_title(&self) -> String {
        if self.is_imitation() {
            format!("Imitate {}!", self.secret)
        } else {
            format!("Act out: {}!", self.secret)
        }
    }
}

impl MiniGame for Acting {
    fn kind(&self) -> GameKind {
        self.kind
    }

    fn instructions(&self) -> String {
        if self.is_imitation() {
            "Imitate the person without saying their name!".to_string()
        } else {
            "Silently act out the topic".to_string()
        }
    }

    fn needs_input(&self) -> bool {
        true
    }

    fn prompt(&self) -> String {
        if self.is_imitation() {
            "Guess who's being imitated!".to_string()
        } else {
            "Guess what's being acted out!".to_string()
        }
    }

    fn setup(&mut self, roster: &[PlayerId], rng: &mut StdRng) {
        self.actor = roster.choose(rng).cloned();
        self.guessers = roster
            .iter()
            .filter(|id| self.actor.as_ref() != Some(*id))
            .cloned()
            .collect();
        if self.guessers.is_empty() {
            self.complete = true;
        }
    }

    fn submit_answer(&mut self, player: &PlayerId, answer: &str) -> SubmitOutcome {
        if self.complete {
            return SubmitOutcome::rejected(true);
        }
        if self.actor.as_ref() == Some(player) {
            return SubmitOutcome::rejected(false);
        }
        if !fuzzy_match(answer, &self.secret) {
            return SubmitOutcome::rejected(false);
        }

        self.winner = Some(player.clone());
        self.complete = true;
        SubmitOutcome::accepted(true)
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn result(&self) -> String {
        if self.is_imitation() {
            format!("The person was: {}", self.secret)
        } else {
            format!("The topic was: {}", self.secret)
        }
    }

    fn winner(&self) -> Option<&PlayerId> {
        self.winner.as_ref()
    }

    /// Losing the actor, or the last guesser, ends the round with nobody
    /// winning.
    fn player_left(&mut self, player: &PlayerId) -> bool {
        if self.complete {
            return false;
        }
        if self.actor.as_ref() == Some(player) {
            self.complete = true;
            return true;
        }
        let Some(pos) = self.guessers.iter().position(|id| id == player) else {
            return false;
        };
        self.guessers.remove(pos);
        if self.guessers.is_empty() {
            self.complete = true;
        }
        true
    }

    fn personalize(&self, player: &PlayerId) -> Option<PlayerView> {
        let view = if self.actor.as_ref() == Some(player) {
            PlayerView {
                game_title: Some(self.perform_title()),
                game_instructions: Some(String::new()),
                round_instructions: Some(String::new()),
                needs_input: Some(false),
                current_prompt: None,
            }
        } else {
            PlayerView {
                game_title: Some(self.prompt()),
                game_instructions: Some("Enter your answer:".to_string()),
                round_instructions: Some(String::new()),
                needs_input: Some(true),
                current_prompt: None,
            }
        };
        Some(view)
    }
}
