//! Party rooms for Partyline.
//!
//! Each room runs as one worker lane (see `partyline-worker`) whose
//! handler is the round state machine. Rooms never share state; the
//! [`Coordinator`] is the only structure touched by more than one lane.
//!
//! # Key types
//!
//! - [`Coordinator`]: creates rooms exactly once, sweeps empty ones
//! - [`RoomHandle`]: sends player events into a running room
//! - [`RoomSnapshot`]: synchronous read of a room's phase and roster
//! - [`RoomConfig`]: inbox size, countdown length, kind rotation, seed

mod config;
mod coordinator;
mod error;
mod room;
mod session;
mod view;

pub use config::RoomConfig;
pub use coordinator::Coordinator;
pub use error::RoomError;
pub use partyline_protocol::Phase;
pub use room::{PlayerSender, RoomHandle, RoomSnapshot};
