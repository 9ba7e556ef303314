//! Codecs for the room wire format.
//!
//! The rooms never touch bytes themselves: the transport turns each
//! inbound frame into a [`ClientMessage`] with [`Codec::decode_client`]
//! and each outbound [`ServerMessage`] back into a frame with
//! [`Codec::encode_server`].

use serde::{Serialize, de::DeserializeOwned};

use crate::{ClientMessage, ProtocolError, ServerMessage};

/// Converts wire values to and from bytes.
///
/// `Send + Sync + 'static` because one codec instance is shared by every
/// connection task of the embedding server.
pub trait Codec: Send + Sync + 'static {
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or don't
    /// match `T`.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;

    /// Decodes one frame sent by a player and checks it makes sense
    /// before it reaches a room.
    ///
    /// # Errors
    /// `ProtocolError::Decode` if the frame is not a client message,
    /// `ProtocolError::InvalidMessage` for a `join` with a blank group.
    fn decode_client(&self, frame: &[u8]) -> Result<ClientMessage, ProtocolError> {
        let msg: ClientMessage = self.decode(frame)?;
        if let ClientMessage::Join { group, .. } = &msg {
            if group.trim().is_empty() {
                return Err(ProtocolError::InvalidMessage("join without a group".into()));
            }
        }
        Ok(msg)
    }

    /// Encodes one message for a player's connection.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode_server(&self, msg: &ServerMessage) -> Result<Vec<u8>, ProtocolError> {
        self.encode(msg)
    }
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// JSON text frames via `serde_json`, which is what the browser client
/// speaks. Behind the `json` feature (on by default).
///
/// ```rust
/// use partyline_protocol::{ClientMessage, Codec, JsonCodec};
///
/// let msg = JsonCodec
///     .decode_client(br#"{"action":"submit-word","data":{"word":"llama"}}"#)
///     .unwrap();
/// assert_eq!(msg, ClientMessage::SubmitWord { word: "llama".into() });
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{Phase, StateView};

    #[test]
    fn test_decode_join() {
        let msg = JsonCodec
            .decode_client(br#"{"action":"join","data":{"group":"kitchen","name":"Ada"}}"#)
            .unwrap();
        assert_eq!(
            msg,
            ClientMessage::Join {
                group: "kitchen".into(),
                name: "Ada".into(),
            }
        );
    }

    #[test]
    fn test_decode_join_without_group_is_invalid() {
        let result = JsonCodec.decode_client(br#"{"action":"join","data":{"group":"  ","name":"Ada"}}"#);
        assert!(matches!(result, Err(ProtocolError::InvalidMessage(_))));
    }

    #[test]
    fn test_decode_unit_actions() {
        assert_eq!(
            JsonCodec.decode_client(br#"{"action":"next-game"}"#).unwrap(),
            ClientMessage::NextGame
        );
        assert_eq!(
            JsonCodec.decode_client(br#"{"action":"request-prompt"}"#).unwrap(),
            ClientMessage::RequestPrompt
        );
        assert_eq!(
            JsonCodec.decode_client(br#"{"action":"ping"}"#).unwrap(),
            ClientMessage::Ping
        );
    }

    #[test]
    fn test_decode_vote_names_candidate() {
        let msg = JsonCodec
            .decode_client(br#"{"action":"vote","data":{"voted_for":"p2"}}"#)
            .unwrap();
        assert_eq!(msg, ClientMessage::Vote { voted_for: "p2".into() });
    }

    #[test]
    fn test_decode_unknown_action_fails() {
        let result = JsonCodec.decode_client(br#"{"action":"dance"}"#);
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(JsonCodec.decode_client(b"not json").is_err());
    }

    #[test]
    fn test_encode_state_wraps_in_state_key() {
        let view = StateView {
            game_title: "Ready to play!".into(),
            game_state: Phase::Lobby,
            ..StateView::default()
        };
        let bytes = JsonCodec.encode_server(&ServerMessage::State(view)).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["state"]["game_title"], "Ready to play!");
        assert_eq!(json["state"]["game_state"], "lobby");
    }
}
