//! Error types for the room layer.

use partyline_protocol::RoomId;

/// Errors surfaced by room operations.
///
/// Game-level misuse (a vote outside voting, a guess from the actor) is
/// absorbed inside the room and never becomes an error. What remains is
/// whether there is a room to talk to at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    /// No room is registered under this id.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// The room's lane is stopped or gone and cannot answer.
    #[error("room {0} is unavailable")]
    Unavailable(RoomId),
}
