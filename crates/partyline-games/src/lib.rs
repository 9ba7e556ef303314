//! Mini-games for Partyline rooms.
//!
//! A room plays one round at a time. Each round is an instance of one
//! [`GameKind`], created through the kind registry and driven through
//! the [`MiniGame`] trait. The room never inspects concrete variant
//! types: anything kind-specific (actor assignment, personalized views,
//! how points are awarded) is a trait capability or a property of the
//! kind discriminator.
//!
//! # Key types
//!
//! - [`MiniGame`]: the capability set every variant implements
//! - [`GameKind`]: the closed registry of variants and their metadata
//! - [`ScoringPolicy`], [`SubmitOutcome`], [`PlayerView`]: what the room
//!   needs to award points and render per-player snapshots
//! - [`matcher`]: fuzzy comparison of free-text guesses

mod acting;
mod consensus;
mod content;
mod countdown;
mod kind;
mod logic;
mod madlib;
pub mod matcher;
mod video;

pub use acting::Acting;
pub use consensus::Consensus;
pub use countdown::Countdown;
pub use kind::{GameKind, GameSettings, UnknownKind};
pub use logic::{
    MiniGame, PlayerView, ScoringPolicy, SubmitOutcome, TIMER_COMPLETE,
    VIDEO_COMPLETE,
};
pub use madlib::MadLib;
pub use video::VideoWatch;
