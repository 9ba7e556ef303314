//! Core protocol types for Partyline's wire format.
//!
//! Everything here is plain data: the room lane builds these values,
//! the transport serializes them. Field names are part of the browser
//! contract, so renames here are breaking changes.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Identifier of a player, as assigned by the transport layer.
///
/// Newtype over `String` so a `PlayerId` can never be passed where a
/// `RoomId` is expected. `#[serde(transparent)]` keeps it a bare JSON
/// string on the wire.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Returns the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of a room. Rooms are named by their group (the part of
/// the URL players share with each other), so this is a string too.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    /// Returns the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RoomId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Where a room is in its round cycle.
///
/// ```text
/// Lobby → Instructions → Playing → (Voting →) Finished → Instructions → …
/// ```
///
/// Voting is only entered by kinds whose winner is decided by the room.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Lobby,
    Instructions,
    Playing,
    Voting,
    Finished,
}

impl Phase {
    /// Returns `true` in the phases where a mini-game instance exists.
    pub fn has_game(&self) -> bool {
        matches!(self, Self::Playing | Self::Voting | Self::Finished)
    }

    /// The lowercase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lobby => "lobby",
            Self::Instructions => "instructions",
            Self::Playing => "playing",
            Self::Voting => "voting",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// A player intent as sent by the browser.
///
/// Adjacently tagged: `{"action": "submit-word", "data": {"word": "x"}}`.
/// Unit actions carry no `data` at all: `{"action": "ping"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Enter the room named `group` under the display name `name`.
    Join { group: String, name: String },

    /// "Next" button: start, ready up, or advance past a finished round.
    NextGame,

    /// A free-text answer, or a completion signal from the client
    /// (`timer_complete`, `video_complete`).
    SubmitWord { word: String },

    /// Vote for another player during the voting phase.
    Vote { voted_for: PlayerId },

    /// Claim a slot in a word-filling template.
    RequestPrompt,

    /// Keep-alive.
    Ping,
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// One roster row in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub ready: bool,
}

/// The snapshot of a room as one player sees it.
///
/// The room builds one shared view per broadcast; variants that show
/// different things to different players derive a personalized copy
/// per recipient. Optional fields are omitted from the JSON when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateView {
    pub game_title: String,
    pub game_instructions: String,
    pub round_instructions: String,
    pub players: Vec<PlayerEntry>,
    pub game_state: Phase,
    /// Id of the selected mini-game kind, empty in the lobby.
    pub game_type: String,
    pub needs_input: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_timer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_remaining: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_video_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voted_players: Option<Vec<PlayerId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_votes: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_votes: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words_collected: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_words: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winners: Option<Vec<String>>,
}

/// A message from a room to one player's connection.
///
/// Externally tagged with snake_case names, so a snapshot is
/// `{"state": {...}}` and the keep-alive reply is `"pong"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerMessage {
    State(StateView),
    Pong,
}

// =========================================================================
// Tests
// =========================================================================
