//! Unified error type for Partyline.

use partyline_games::UnknownKind;
use partyline_protocol::ProtocolError;
use partyline_room::RoomError;

/// Top-level error that wraps the errors of every layer.
///
/// `#[from]` on each variant lets `?` convert sub-crate errors
/// automatically.
#[derive(Debug, thiserror::Error)]
pub enum PartylineError {
    /// Encoding or decoding a wire message failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A room is missing or its lane is gone.
    #[error(transparent)]
    Room(#[from] RoomError),

    /// A game kind name did not parse.
    #[error(transparent)]
    Kind(#[from] UnknownKind),

    /// Installing a signal handler or another OS-level operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use partyline_protocol::RoomId;

    use super::*;

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidMessage("bad".into());
        let partyline_err: PartylineError = err.into();
        assert!(matches!(partyline_err, PartylineError::Protocol(_)));
        assert!(partyline_err.to_string().contains("bad"));
    }

    #[test]
    fn test_from_room_error() {
        let err = RoomError::NotFound(RoomId::from("kitchen"));
        let partyline_err: PartylineError = err.into();
        assert!(matches!(partyline_err, PartylineError::Room(_)));
        assert_eq!(partyline_err.to_string(), "room kitchen not found");
    }

    #[test]
    fn test_from_unknown_kind() {
        let err = "tetris".parse::<partyline_games::GameKind>().unwrap_err();
        let partyline_err: PartylineError = err.into();
        assert!(matches!(partyline_err, PartylineError::Kind(_)));
    }
}
