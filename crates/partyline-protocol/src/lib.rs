//! Wire protocol for Partyline.
//!
//! This crate defines what travels between a party room and the
//! transport that owns the player connections:
//!
//! - **Identity** ([`PlayerId`], [`RoomId`]): string newtypes handed to
//!   us by the transport. We never mint or authenticate them.
//! - **Inbound** ([`ClientMessage`]): player intents as decoded from the
//!   socket.
//! - **Outbound** ([`ServerMessage`], [`StateView`], [`PlayerEntry`]):
//!   the snapshot every player receives after each mutating event.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): bytes in, bytes out.
//!
//! ```text
//! Transport (bytes) → Protocol (ClientMessage) → Room lane → Protocol (StateView) → Transport
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    ClientMessage, Phase, PlayerEntry, PlayerId, RoomId, ServerMessage,
    StateView,
};
