//! The room state machine.
//!
//! ```text
//! Lobby → Instructions → Playing → (Voting →) Finished → Instructions → …
//! ```
//!
//! [`Session`] is the handler of a room's worker lane: it owns the
//! roster, the phase, the rounds, and the vote tally, and is only ever
//! touched by that lane. Every event that changes what players see ends
//! with a broadcast; events that make no sense in the current phase are
//! ignored without one.

use std::collections::BTreeMap;

use partyline_games::{GameKind, GameSettings, MiniGame, ScoringPolicy};
use partyline_protocol::{Phase, PlayerEntry, PlayerId, RoomId, ServerMessage};
use partyline_worker::Handler;
use rand::rngs::StdRng;

use crate::room::{PlayerSender, RoomCommand, RoomSnapshot};
use crate::view::{self, RoundView};
use crate::RoomConfig;

/// Points for the first correct guess in acting games.
const GUESS_POINTS: u32 = 3;

/// Points for every player tied at the top of a vote.
const VOTE_POINTS: u32 = 3;

struct Player {
    name: String,
    score: u32,
    ready: bool,
    sender: Option<PlayerSender>,
}

pub(crate) struct Session {
    room_id: RoomId,
    phase: Phase,
    kind: Option<GameKind>,
    /// Round shown during the instructions, started once all are ready.
    upcoming: Option<Box<dyn MiniGame>>,
    /// Present exactly in playing, voting, and finished.
    game: Option<Box<dyn MiniGame>>,
    /// Keyed by id so iteration (and the broadcast roster) is sorted.
    players: BTreeMap<PlayerId, Player>,
    /// Voter to candidate; only filled while voting.
    votes: BTreeMap<PlayerId, PlayerId>,
    last_winners: Vec<String>,
    allowed: Vec<GameKind>,
    settings: GameSettings,
    rng: StdRng,
}

impl Handler<RoomCommand> for Session {
    fn handle(&mut self, cmd: RoomCommand) {
        match cmd {
            RoomCommand::Join {
                player_id,
                name,
                sender,
            } => self.handle_join(player_id, name, sender),
            RoomCommand::Leave { player_id } => self.handle_leave(player_id),
            RoomCommand::NextRound { player_id } => self.handle_next_round(player_id),
            RoomCommand::SubmitAnswer { player_id, text } => {
                self.handle_submit(player_id, &text)
            }
            RoomCommand::Vote {
                player_id,
                voted_for,
            } => self.handle_vote(player_id, voted_for),
            RoomCommand::RequestPrompt { player_id } => self.handle_request_prompt(player_id),
            RoomCommand::Ping { player_id } => self.handle_ping(&player_id),
            RoomCommand::Tick => self.handle_tick(),
            RoomCommand::Query { reply } => {
                let _ = reply.send(self.snapshot());
            }
        }
        debug_assert_eq!(
            self.phase.has_game(),
            self.game.is_some(),
            "a game instance exists exactly in the round phases"
        );
    }
}

impl Session {
    pub(crate) fn new(room_id: RoomId, config: &RoomConfig) -> Self {
        Self {
            room_id,
            phase: Phase::Lobby,
            kind: None,
            upcoming: None,
            game: None,
            players: BTreeMap::new(),
            votes: BTreeMap::new(),
            last_winners: Vec::new(),
            allowed: config.allowed_kinds(),
            settings: config.game_settings(),
            rng: config.rng(),
        }
    }

    // -----------------------------------------------------------------------
    // Roster
    // -----------------------------------------------------------------------

    fn handle_join(&mut self, player_id: PlayerId, name: String, sender: Option<PlayerSender>) {
        match self.players.get_mut(&player_id) {
            Some(existing) => {
                existing.name = name;
                existing.sender = sender;
                tracing::info!(room_id = %self.room_id, %player_id, "player rejoined");
            }
            None => {
                tracing::info!(
                    room_id = %self.room_id,
                    %player_id,
                    %name,
                    players = self.players.len() + 1,
                    "player joined"
                );
                self.players.insert(
                    player_id,
                    Player {
                        name,
                        score: 0,
                        ready: false,
                        sender,
                    },
                );
            }
        }
        self.broadcast();
    }

    fn handle_leave(&mut self, player_id: PlayerId) {
        if self.players.remove(&player_id).is_none() {
            tracing::debug!(room_id = %self.room_id, %player_id, "leave from non-member, ignoring");
            return;
        }
        self.votes.remove(&player_id);
        tracing::info!(
            room_id = %self.room_id,
            %player_id,
            players = self.players.len(),
            "player left"
        );

        // A departure must never strand the room waiting on someone gone.
        match self.phase {
            Phase::Instructions if !self.staged_kind_fits() => self.repick_for_roster(),
            Phase::Instructions => self.try_start_round(),
            Phase::Playing => {
                let ended = match self.game.as_mut() {
                    Some(game) => game.player_left(&player_id) && game.is_complete(),
                    None => false,
                };
                if ended {
                    self.end_round();
                }
            }
            Phase::Voting => self.try_tally(),
            Phase::Lobby | Phase::Finished => {}
        }
        self.broadcast();
    }

    // -----------------------------------------------------------------------
    // Round flow
    // -----------------------------------------------------------------------

    fn handle_next_round(&mut self, player_id: PlayerId) {
        if !self.is_member(&player_id, "next round") {
            return;
        }

        match self.phase {
            Phase::Lobby => self.pick_next_round(),
            Phase::Instructions => {
                if let Some(player) = self.players.get_mut(&player_id) {
                    player.ready = true;
                }
                tracing::debug!(
                    room_id = %self.room_id,
                    %player_id,
                    ready = self.players.values().filter(|p| p.ready).count(),
                    players = self.players.len(),
                    "player ready"
                );
                self.try_start_round();
            }
            Phase::Finished => {
                self.game = None;
                self.last_winners.clear();
                self.pick_next_round();
            }
            Phase::Playing | Phase::Voting => {
                tracing::debug!(
                    room_id = %self.room_id,
                    %player_id,
                    phase = %self.phase,
                    "next round during a round, ignoring"
                );
                return;
            }
        }
        self.broadcast();
    }

    /// Chooses a kind the current roster can play and stages its round.
    fn pick_next_round(&mut self) {
        let kind = GameKind::choose(self.players.len(), &self.allowed, &mut self.rng);
        self.upcoming = Some(kind.create(&self.settings, &mut self.rng));
        self.kind = Some(kind);
        self.clear_ready();
        self.phase = Phase::Instructions;
        tracing::info!(room_id = %self.room_id, game = %kind, "next game selected");
    }

    /// Whether the roster still has enough players for the staged kind.
    fn staged_kind_fits(&self) -> bool {
        self.kind
            .is_none_or(|kind| kind.min_players() <= self.players.len())
    }

    /// The roster shrank below what the staged kind needs: stage another
    /// kind and wait for everyone to ready up again.
    fn repick_for_roster(&mut self) {
        let previous = self.kind;
        self.pick_next_round();
        tracing::info!(
            room_id = %self.room_id,
            previous = ?previous,
            players = self.players.len(),
            "staged game no longer fits the roster, picked again"
        );
    }

    /// Starts the staged round once every player is ready.
    fn try_start_round(&mut self) {
        if self.players.is_empty() || !self.players.values().all(|p| p.ready) {
            return;
        }
        if !self.staged_kind_fits() {
            self.repick_for_roster();
            return;
        }
        let Some(kind) = self.kind else {
            return;
        };

        let mut game = match self.upcoming.take() {
            Some(game) => game,
            None => kind.create(&self.settings, &mut self.rng),
        };
        let roster: Vec<PlayerId> = self.players.keys().cloned().collect();
        game.setup(&roster, &mut self.rng);
        let already_over = game.is_complete();
        self.game = Some(game);
        self.clear_ready();
        self.phase = Phase::Playing;
        tracing::info!(
            room_id = %self.room_id,
            game = %kind,
            players = roster.len(),
            "round started"
        );

        if already_over {
            self.end_round();
        }
    }

    fn handle_submit(&mut self, player_id: PlayerId, text: &str) {
        if self.phase != Phase::Playing {
            tracing::debug!(
                room_id = %self.room_id,
                %player_id,
                phase = %self.phase,
                "answer outside playing, ignoring"
            );
            return;
        }
        if !self.is_member(&player_id, "answer") {
            return;
        }
        let Some(game) = self.game.as_mut() else {
            return;
        };

        let outcome = game.submit_answer(&player_id, text);
        if outcome.accepted {
            let policy = game.scoring_policy();
            let guessed = policy == ScoringPolicy::FirstCorrectGuess
                && outcome.complete
                && game.winner() == Some(&player_id);
            let points = match policy {
                ScoringPolicy::PerSubmission => 1,
                ScoringPolicy::FirstCorrectGuess if guessed => GUESS_POINTS,
                ScoringPolicy::FirstCorrectGuess | ScoringPolicy::VoteOnly => 0,
            };
            if let Some(player) = self.players.get_mut(&player_id) {
                player.score += points;
                if guessed {
                    self.last_winners = vec![player.name.clone()];
                }
            }
        }

        if outcome.complete {
            self.end_round();
        }
        self.broadcast();
    }

    fn handle_request_prompt(&mut self, player_id: PlayerId) {
        if self.phase != Phase::Playing || !self.is_member(&player_id, "prompt request") {
            return;
        }
        if let Some(game) = self.game.as_mut() {
            game.request_prompt(&player_id);
        }
        self.broadcast();
    }

    fn handle_tick(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        let Some(game) = self.game.as_mut() else {
            return;
        };
        if !game.has_timer() {
            return;
        }

        game.decrement_timer();
        if game.is_complete() {
            self.end_round();
        }
        self.broadcast();
    }

    /// Routes a completed round to the vote or straight to the results.
    fn end_round(&mut self) {
        let needs_vote = self.kind.is_some_and(|k| k.needs_vote());
        if needs_vote {
            self.votes.clear();
            self.phase = Phase::Voting;
        } else {
            self.phase = Phase::Finished;
        }
        tracing::info!(room_id = %self.room_id, phase = %self.phase, "round complete");
    }

    // -----------------------------------------------------------------------
    // Voting
    // -----------------------------------------------------------------------

    fn handle_vote(&mut self, player_id: PlayerId, voted_for: PlayerId) {
        if self.phase != Phase::Voting {
            tracing::debug!(
                room_id = %self.room_id,
                %player_id,
                phase = %self.phase,
                "vote outside voting, ignoring"
            );
            return;
        }
        if !self.is_member(&player_id, "vote") {
            return;
        }
        if !self.players.contains_key(&voted_for) {
            tracing::debug!(
                room_id = %self.room_id,
                %player_id,
                %voted_for,
                "vote for non-member, ignoring"
            );
            return;
        }

        self.votes.insert(player_id, voted_for);
        self.try_tally();
        self.broadcast();
    }

    /// Once every player has voted, awards everyone tied at the top.
    fn try_tally(&mut self) {
        if self.players.is_empty() || !self.players.keys().all(|id| self.votes.contains_key(id)) {
            return;
        }

        let mut counts: BTreeMap<&PlayerId, usize> = BTreeMap::new();
        for candidate in self.votes.values() {
            // Votes for players who left since do not count.
            if self.players.contains_key(candidate) {
                *counts.entry(candidate).or_default() += 1;
            }
        }
        let max = counts.values().copied().max().unwrap_or(0);
        let winners: Vec<PlayerId> = counts
            .into_iter()
            .filter(|&(_, n)| n == max)
            .map(|(id, _)| id.clone())
            .collect();

        self.last_winners.clear();
        for id in &winners {
            if let Some(player) = self.players.get_mut(id) {
                player.score += VOTE_POINTS;
                self.last_winners.push(player.name.clone());
            }
        }
        self.votes.clear();
        self.phase = Phase::Finished;
        tracing::info!(
            room_id = %self.room_id,
            winners = ?self.last_winners,
            "vote tallied"
        );
    }

    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------

    fn handle_ping(&self, player_id: &PlayerId) {
        let Some(player) = self.players.get(player_id) else {
            tracing::debug!(room_id = %self.room_id, %player_id, "ping from non-member, ignoring");
            return;
        };
        self.deliver(player_id, player, ServerMessage::Pong);
    }

    /// Sends every player their rendering of the current state.
    fn broadcast(&self) {
        let shared = view::compose(RoundView {
            phase: self.phase,
            kind: self.kind,
            upcoming: self.upcoming.as_deref(),
            game: self.game.as_deref(),
            players: self.roster(),
            votes: &self.votes,
            winners: &self.last_winners,
        });

        for (player_id, player) in &self.players {
            if player.sender.is_none() {
                continue;
            }
            let state = view::render_for(&shared, self.game.as_deref(), player_id);
            self.deliver(player_id, player, ServerMessage::State(state));
        }
    }

    /// Writes to one player's connection. A dead connection is logged and
    /// skipped; only a leave removes the player.
    fn deliver(&self, player_id: &PlayerId, player: &Player, msg: ServerMessage) {
        let Some(sender) = &player.sender else {
            return;
        };
        if sender.send(msg).is_err() {
            tracing::debug!(
                room_id = %self.room_id,
                %player_id,
                "delivery failed, connection gone"
            );
        }
    }

    fn roster(&self) -> Vec<PlayerEntry> {
        self.players
            .iter()
            .map(|(id, p)| PlayerEntry {
                id: id.clone(),
                name: p.name.clone(),
                score: p.score,
                ready: p.ready,
            })
            .collect()
    }

    fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            room_id: self.room_id.clone(),
            phase: self.phase,
            game_kind: self.kind,
            players: self.roster(),
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn clear_ready(&mut self) {
        for player in self.players.values_mut() {
            player.ready = false;
        }
    }

    fn is_member(&self, player_id: &PlayerId, what: &str) -> bool {
        let member = self.players.contains_key(player_id);
        if !member {
            tracing::warn!(
                room_id = %self.room_id,
                %player_id,
                what,
                "message from non-member, ignoring"
            );
        }
        member
    }
}
