//! # Partyline
//!
//! Session core for round-based party games played in shared rooms.
//!
//! Players join a room by name. The room walks them through a lobby,
//! per-round instructions, the round itself, an optional vote, and a
//! results screen, broadcasting a fresh [`StateView`](prelude::StateView)
//! to every player after each change. Each round is one of several
//! mini-games: word fill-ins, charades and imitations, timed scavenger
//! hunts, and a video you must watch without laughing.
//!
//! The layers:
//!
//! - `partyline-protocol`: wire messages and the [`Codec`](prelude::Codec)
//! - `partyline-worker`: single-lane sequential processors
//! - `partyline-games`: the [`MiniGame`](prelude::MiniGame) variants and the answer matcher
//! - `partyline-room`: the round state machine and the [`Coordinator`](prelude::Coordinator)
//!
//! This crate ties them together with a unified error type, server
//! configuration, the periodic [`Maintenance`] loops, and per-client
//! [`Connection`] glue for an embedding transport.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use partyline::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), PartylineError> {
//! let config = ServerConfig::default();
//! let coordinator = Arc::new(Coordinator::new(config.room.clone()));
//! let maintenance = Maintenance::start(Arc::clone(&coordinator), &config);
//!
//! let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut conn = Connection::new("p1", tx);
//! conn.receive(&coordinator, br#"{"action":"join","data":{"group":"kitchen","name":"Ada"}}"#)
//!     .await?;
//!
//! maintenance.shutdown().await;
//! coordinator.shutdown_all().await;
//! # Ok(())
//! # }
//! ```

mod config;
mod connection;
mod error;
mod maintenance;

pub use config::ServerConfig;
pub use connection::Connection;
pub use error::PartylineError;
pub use maintenance::Maintenance;

/// Everything an embedding server usually needs, in one import.
pub mod prelude {
    pub use crate::{Connection, Maintenance, PartylineError, ServerConfig};
    pub use partyline_games::{GameKind, GameSettings, MiniGame, UnknownKind};
    pub use partyline_protocol::{
        ClientMessage, Codec, JsonCodec, Phase, PlayerEntry, PlayerId, ProtocolError, RoomId,
        ServerMessage, StateView,
    };
    pub use partyline_room::{
        Coordinator, PlayerSender, RoomConfig, RoomError, RoomHandle, RoomSnapshot,
    };
    pub use partyline_worker::{Handler, Worker};
}
