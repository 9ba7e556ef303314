//! Per-connection glue between a transport and the room layer.
//!
//! A transport (WebSocket, test harness, anything that moves frames)
//! owns one [`Connection`] per client. It feeds every inbound frame to
//! [`Connection::receive`], forwards whatever arrives on the player's
//! outbound channel through [`Connection::encode`], and calls
//! [`Connection::close`] when the client goes away.

use partyline_protocol::{ClientMessage, Codec, JsonCodec, PlayerId, ServerMessage};
use partyline_room::{Coordinator, PlayerSender, RoomHandle};

use crate::PartylineError;

/// One client's view of the server: who they are, where their snapshots
/// go, and which room (if any) they have joined.
pub struct Connection<C: Codec = JsonCodec> {
    player_id: PlayerId,
    sender: PlayerSender,
    room: Option<RoomHandle>,
    codec: C,
}

impl Connection<JsonCodec> {
    pub fn new(player_id: impl Into<PlayerId>, sender: PlayerSender) -> Self {
        Self::with_codec(player_id, sender, JsonCodec)
    }
}

impl<C: Codec> Connection<C> {
    pub fn with_codec(player_id: impl Into<PlayerId>, sender: PlayerSender, codec: C) -> Self {
        Self {
            player_id: player_id.into(),
            sender,
            room: None,
            codec,
        }
    }

    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    /// The room this connection is currently in.
    pub fn room(&self) -> Option<&RoomHandle> {
        self.room.as_ref()
    }

    /// Decodes one inbound frame and routes it.
    ///
    /// A `join` creates the named room on first use and moves the player
    /// there, leaving any previous room. Every other action goes to the
    /// joined room; before a join it is dropped.
    ///
    /// # Errors
    /// Returns [`PartylineError::Protocol`] if the frame does not decode
    /// or is a `join` without a group. The connection stays usable.
    pub async fn receive(
        &mut self,
        coordinator: &Coordinator,
        frame: &[u8],
    ) -> Result<(), PartylineError> {
        let msg = self.codec.decode_client(frame)?;
        match msg {
            ClientMessage::Join { group, name } => {
                let room = coordinator.get_or_create(group).await;
                if let Some(previous) = self.room.take() {
                    if !previous.same_room(&room) {
                        previous.leave(self.player_id.clone()).await;
                    }
                }
                room.join(self.player_id.clone(), name, Some(self.sender.clone()))
                    .await;
                self.room = Some(room);
            }
            other => match &self.room {
                Some(room) => room.dispatch(self.player_id.clone(), other).await,
                None => {
                    tracing::debug!(player_id = %self.player_id, "message before join, dropped");
                }
            },
        }
        Ok(())
    }

    /// Serializes an outbound message for the wire.
    ///
    /// # Errors
    /// Returns [`PartylineError::Protocol`] if encoding fails.
    pub fn encode(&self, msg: &ServerMessage) -> Result<Vec<u8>, PartylineError> {
        Ok(self.codec.encode_server(msg)?)
    }

    /// Leaves the joined room, if any.
    pub async fn close(self) {
        if let Some(room) = self.room {
            room.leave(self.player_id.clone()).await;
            tracing::debug!(player_id = %self.player_id, room_id = %room.room_id(), "connection closed");
        }
    }
}
