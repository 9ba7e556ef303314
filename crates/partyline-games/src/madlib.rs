//! Word-filling: players fill the blanks of a story without seeing it.

use std::collections::HashMap;

use partyline_protocol::{Phase, PlayerId, StateView};
use rand::rngs::StdRng;

use crate::logic::{MiniGame, PlayerView, SubmitOutcome, TIMER_COMPLETE, VIDEO_COMPLETE};
use crate::GameKind;

/// A story template with one blank per `{slot}`.
///
/// Every player in the round's roster holds one blank from the start;
/// anyone else claims the next free blank on their first prompt request
/// or word. Submitting a word fills the submitter's blank and claims the
/// next free one for them, so a solo player walks through every blank in
/// order while a group fills them in parallel.
#[derive(Debug, Clone)]
pub struct MadLib {
    /// Literal text around the blanks; always `slots.len() + 1` pieces.
    pieces: Vec<String>,
    slots: Vec<String>,
    words: Vec<Option<String>>,
    claimed_by: Vec<Option<PlayerId>>,
    /// Blank each player is currently filling.
    claims: HashMap<PlayerId, usize>,
}

impl MadLib {
    pub fn new(template: &str) -> Self {
        let (pieces, slots) = parse(template);
        Self {
            pieces,
            words: vec![None; slots.len()],
            claimed_by: vec![None; slots.len()],
            slots,
            claims: HashMap::new(),
        }
    }

    pub fn total_words(&self) -> usize {
        self.slots.len()
    }

    pub fn words_collected(&self) -> usize {
        self.words.iter().filter(|w| w.is_some()).count()
    }

    /// The blank `player` is filling, if any. Never claims anything.
    pub fn prompt_for(&self, player: &PlayerId) -> Option<String> {
        self.claims.get(player).map(|&idx| humanize(&self.slots[idx]))
    }

    /// The blank `player`'s next word would land in: their own claim, or
    /// the one they would claim by submitting now.
    fn upcoming_for(&self, player: &PlayerId) -> Option<String> {
        self.prompt_for(player)
            .or_else(|| self.next_unclaimed().map(|idx| humanize(&self.slots[idx])))
    }

    /// The template with every filled blank substituted. Unfilled blanks
    /// stay as `{slot}`.
    pub fn story(&self) -> String {
        let mut story = String::new();
        for (idx, piece) in self.pieces.iter().enumerate() {
            story.push_str(piece);
            let Some(slot) = self.slots.get(idx) else {
                break;
            };
            match &self.words[idx] {
                Some(word) => story.push_str(word),
                None => {
                    story.push('{');
                    story.push_str(slot);
                    story.push('}');
                }
            }
        }
        story
    }

    fn next_unclaimed(&self) -> Option<usize> {
        self.claimed_by.iter().position(Option::is_none)
    }

    fn claim_next(&mut self, player: &PlayerId) -> Option<usize> {
        let idx = self.next_unclaimed()?;
        self.claimed_by[idx] = Some(player.clone());
        self.claims.insert(player.clone(), idx);
        Some(idx)
    }

    fn next_open_slot(&self) -> Option<&str> {
        self.words
            .iter()
            .position(Option::is_none)
            .map(|idx| self.slots[idx].as_str())
    }
}

impl MiniGame for MadLib {
    fn kind(&self) -> GameKind {
        GameKind::MadLibs
    }

    fn instructions(&self) -> String {
        "Fill in the blanks with words!".to_string()
    }

    fn needs_input(&self) -> bool {
        true
    }

    fn prompt(&self) -> String {
        self.next_open_slot().map(humanize).unwrap_or_default()
    }

    fn setup(&mut self, roster: &[PlayerId], _rng: &mut StdRng) {
        for player in roster {
            if !self.claims.contains_key(player) && self.claim_next(player).is_none() {
                break;
            }
        }
    }

    fn submit_answer(&mut self, player: &PlayerId, answer: &str) -> SubmitOutcome {
        let word = answer.trim();
        if word.is_empty() || word == TIMER_COMPLETE || word == VIDEO_COMPLETE {
            return SubmitOutcome::rejected(self.is_complete());
        }

        let claimed = match self.claims.get(player) {
            Some(&idx) => Some(idx),
            None => self.claim_next(player),
        };
        let Some(idx) = claimed else {
            return SubmitOutcome::rejected(self.is_complete());
        };

        self.words[idx] = Some(word.to_string());
        self.claims.remove(player);
        self.claim_next(player);
        SubmitOutcome::accepted(self.is_complete())
    }

    fn is_complete(&self) -> bool {
        self.words.iter().all(Option::is_some)
    }

    fn result(&self) -> String {
        self.story()
    }

    fn request_prompt(&mut self, player: &PlayerId) -> bool {
        if self.claims.contains_key(player) {
            return false;
        }
        self.claim_next(player).is_some()
    }

    fn player_left(&mut self, player: &PlayerId) -> bool {
        match self.claims.remove(player) {
            Some(idx) => {
                self.claimed_by[idx] = None;
                true
            }
            None => false,
        }
    }

    fn personalize(&self, player: &PlayerId) -> Option<PlayerView> {
        let mine = self.upcoming_for(player).unwrap_or_default();
        Some(PlayerView {
            game_title: Some(mine.clone()),
            current_prompt: Some(mine),
            ..PlayerView::default()
        })
    }

    fn decorate(&self, phase: Phase, view: &mut StateView) {
        if phase != Phase::Playing {
            return;
        }
        view.current_prompt = Some(self.prompt());
        view.words_collected = Some(self.words_collected());
        view.total_words = Some(self.total_words());
    }
}

/// Splits `template` into literal pieces and slot names.
fn parse(template: &str) -> (Vec<String>, Vec<String>) {
    let mut pieces = Vec::new();
    let mut slots = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let Some(len) = rest[open..].find('}') else {
            break;
        };
        pieces.push(rest[..open].to_string());
        slots.push(rest[open + 1..open + len].to_string());
        rest = &rest[open + len + 1..];
    }
    pieces.push(rest.to_string());
    (pieces, slots)
}

fn humanize(slot: &str) -> String {
    slot.replace('_', " ")
}
