//! Scavenger races against a countdown, settled by a vote.

use partyline_protocol::PlayerId;

use crate::logic::{MiniGame, SubmitOutcome, TIMER_COMPLETE};
use crate::GameKind;

/// First to Find or Find the Blankest Blank.
///
/// Players run off to find something and show it on camera; nobody
/// types. The round ends when the countdown hits zero, either through
/// room ticks or through the client's `timer_complete` signal.
#[derive(Debug, Clone)]
pub struct Countdown {
    kind: GameKind,
    /// What to find: an item, or "superlative thing".
    subject: String,
    remaining: u32,
    running: bool,
}

impl Countdown {
    pub fn first_to_find(item: &str, secs: u32) -> Self {
        Self::new(GameKind::FirstToFind, item.to_string(), secs)
    }

    pub fn blankest_blank(superlative: &str, thing: &str, secs: u32) -> Self {
        Self::new(
            GameKind::BlankestBlank,
            format!("{superlative} {thing}"),
            secs,
        )
    }

    fn new(kind: GameKind, subject: String, secs: u32) -> Self {
        Self {
            kind,
            subject,
            remaining: secs,
            running: secs > 0,
        }
    }

    fn is_first_to_find(&self) -> bool {
        self.kind == GameKind::FirstToFind
    }
}

impl MiniGame for Countdown {
    fn kind(&self) -> GameKind {
        self.kind
    }

    /// The blankest-blank round is announced by what to find.
    fn headline(&self) -> String {
        if self.is_first_to_find() {
            self.name().to_string()
        } else {
            self.prompt()
        }
    }

    fn instructions(&self) -> String {
        if self.is_first_to_find() {
            "The first person to find the object and show it on screen wins".to_string()
        } else {
            format!(
                "The person who finds the {} and shows it on screen wins",
                self.subject
            )
        }
    }

    fn needs_input(&self) -> bool {
        false
    }

    fn prompt(&self) -> String {
        if self.is_first_to_find() {
            format!("First to show a {} wins!", self.subject)
        } else {
            format!("Find the {}!", self.subject)
        }
    }

    fn submit_answer(&mut self, _player: &PlayerId, answer: &str) -> SubmitOutcome {
        if answer == TIMER_COMPLETE {
            self.running = false;
        }
        SubmitOutcome::rejected(self.is_complete())
    }

    fn is_complete(&self) -> bool {
        !self.running
    }

    fn result(&self) -> String {
        if self.is_first_to_find() {
            format!("Time's up! Vote for who showed the best {}", self.subject)
        } else {
            format!("Time's up! Vote for who showed the {}", self.subject)
        }
    }

    fn has_timer(&self) -> bool {
        true
    }

    fn time_remaining(&self) -> u32 {
        self.remaining
    }

    fn decrement_timer(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
        }
    }
}
