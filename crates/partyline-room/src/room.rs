//! Room handles: the outside world's way into a room's lane.
//!
//! A room is a [`Worker`] whose handler is the session state machine.
//! Everything that touches room state goes through the worker's inbox
//! as a [`RoomCommand`], so the session is only ever mutated by its own
//! lane, one command at a time, in arrival order.

use partyline_games::GameKind;
use partyline_protocol::{ClientMessage, Phase, PlayerEntry, PlayerId, RoomId, ServerMessage};
use partyline_worker::Worker;
use tokio::sync::{mpsc, oneshot};

use crate::session::Session;
use crate::{RoomConfig, RoomError};

/// Channel sender for delivering outbound messages to one player's
/// connection. Dropping the room's copy closes the player's stream once
/// the transport drops its own.
pub type PlayerSender = mpsc::UnboundedSender<ServerMessage>;

/// Commands processed by a room's lane.
pub(crate) enum RoomCommand {
    /// Enter the room, or re-enter under a new name and connection.
    Join {
        player_id: PlayerId,
        name: String,
        sender: Option<PlayerSender>,
    },
    Leave {
        player_id: PlayerId,
    },
    /// The "Next" button.
    NextRound {
        player_id: PlayerId,
    },
    SubmitAnswer {
        player_id: PlayerId,
        text: String,
    },
    Vote {
        player_id: PlayerId,
        voted_for: PlayerId,
    },
    RequestPrompt {
        player_id: PlayerId,
    },
    Ping {
        player_id: PlayerId,
    },
    /// One second of countdown.
    Tick,
    /// Read-only snapshot, answered on `reply`.
    Query {
        reply: oneshot::Sender<RoomSnapshot>,
    },
}

/// What a room looks like from outside, as of the moment the query was
/// processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub phase: Phase,
    /// The selected kind; `None` until the first round is picked.
    pub game_kind: Option<GameKind>,
    /// Roster sorted by player id.
    pub players: Vec<PlayerEntry>,
}

impl RoomSnapshot {
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Looks up one roster entry.
    pub fn player(&self, player_id: &PlayerId) -> Option<&PlayerEntry> {
        self.players.iter().find(|p| &p.id == player_id)
    }
}

/// Handle to a running room. Cheap to clone; all clones drive the same
/// lane.
///
/// Event methods are fire-and-forget: they wait only for inbox space and
/// return immediately once the room is stopped. The room broadcasts the
/// outcome to its players.
#[derive(Clone)]
pub struct RoomHandle {
    room_id: RoomId,
    worker: Worker<RoomCommand>,
}

impl RoomHandle {
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Adds a player. `sender` may be `None` for headless players.
    /// Joining again with the same id keeps the player's score.
    pub async fn join(
        &self,
        player_id: impl Into<PlayerId>,
        name: impl Into<String>,
        sender: Option<PlayerSender>,
    ) {
        self.worker
            .send(RoomCommand::Join {
                player_id: player_id.into(),
                name: name.into(),
                sender,
            })
            .await;
    }

    pub async fn leave(&self, player_id: impl Into<PlayerId>) {
        self.worker
            .send(RoomCommand::Leave {
                player_id: player_id.into(),
            })
            .await;
    }

    /// Starts a round from the lobby, marks the player ready during the
    /// instructions, or moves past a finished round.
    pub async fn next_round(&self, player_id: impl Into<PlayerId>) {
        self.worker
            .send(RoomCommand::NextRound {
                player_id: player_id.into(),
            })
            .await;
    }

    pub async fn submit_answer(
        &self,
        player_id: impl Into<PlayerId>,
        text: impl Into<String>,
    ) {
        self.worker
            .send(RoomCommand::SubmitAnswer {
                player_id: player_id.into(),
                text: text.into(),
            })
            .await;
    }

    pub async fn vote(
        &self,
        player_id: impl Into<PlayerId>,
        voted_for: impl Into<PlayerId>,
    ) {
        self.worker
            .send(RoomCommand::Vote {
                player_id: player_id.into(),
                voted_for: voted_for.into(),
            })
            .await;
    }

    pub async fn request_prompt(&self, player_id: impl Into<PlayerId>) {
        self.worker
            .send(RoomCommand::RequestPrompt {
                player_id: player_id.into(),
            })
            .await;
    }

    /// Asks the room to answer `player_id` alone with a pong.
    pub async fn ping(&self, player_id: impl Into<PlayerId>) {
        self.worker
            .send(RoomCommand::Ping {
                player_id: player_id.into(),
            })
            .await;
    }

    /// Advances the countdown of a timed round by one second.
    pub async fn tick(&self) {
        self.worker.send(RoomCommand::Tick).await;
    }

    /// Like [`tick`](Self::tick) but never waits: with a full inbox the
    /// tick is dropped and `false` returned.
    pub fn try_tick(&self) -> bool {
        self.worker.try_send(RoomCommand::Tick)
    }

    /// Routes a decoded client message from `player_id`.
    ///
    /// `join` is not routed: joining needs the player's connection,
    /// which only the transport has. Use [`join`](Self::join).
    pub async fn dispatch(&self, player_id: PlayerId, msg: ClientMessage) {
        match msg {
            ClientMessage::Join { .. } => {
                tracing::warn!(
                    room_id = %self.room_id,
                    %player_id,
                    "join routed as a room message, ignoring"
                );
            }
            ClientMessage::NextGame => self.next_round(player_id).await,
            ClientMessage::SubmitWord { word } => self.submit_answer(player_id, word).await,
            ClientMessage::Vote { voted_for } => self.vote(player_id, voted_for).await,
            ClientMessage::RequestPrompt => self.request_prompt(player_id).await,
            ClientMessage::Ping => self.ping(player_id).await,
        }
    }

    /// Returns the room's state after every previously sent command.
    pub async fn snapshot(&self) -> Result<RoomSnapshot, RoomError> {
        let (reply, rx) = oneshot::channel();
        self.worker.send(RoomCommand::Query { reply }).await;
        rx.await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// Stops the room's lane and waits for it to exit. Later commands are
    /// dropped.
    pub async fn stop(&self) {
        self.worker.stop().await;
    }

    /// Returns `true` while the lane is taking commands.
    pub fn is_running(&self) -> bool {
        self.worker.is_running()
    }

    /// Returns `true` if both handles drive the same room instance.
    pub fn same_room(&self, other: &Self) -> bool {
        self.worker.same_worker(&other.worker)
    }
}

impl std::fmt::Debug for RoomHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomHandle")
            .field("room_id", &self.room_id)
            .field("running", &self.is_running())
            .finish()
    }
}

/// Creates a room and starts its lane.
pub(crate) fn spawn_room(room_id: RoomId, config: &RoomConfig) -> RoomHandle {
    let session = Session::new(room_id.clone(), config);
    let worker = Worker::spawn(
        format!("room-{room_id}"),
        config.inbox_capacity,
        session,
    );
    RoomHandle { room_id, worker }
}
