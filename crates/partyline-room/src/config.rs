//! Room configuration.

use partyline_games::{GameKind, GameSettings};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Settings shared by every room a coordinator creates.
///
/// ```rust
/// use partyline_room::RoomConfig;
///
/// let config = RoomConfig {
///     seed: Some(7),
///     ..RoomConfig::default()
/// };
/// assert_eq!(config.inbox_capacity, 100);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Bound of each room's inbox. Senders wait while it is full.
    pub inbox_capacity: usize,

    /// Countdown length for timed rounds, in seconds (one tick each).
    pub countdown_secs: u32,

    /// Restricts which kinds a room rotates through. `None` means every
    /// registered kind.
    pub allowed_kinds: Option<Vec<GameKind>>,

    /// Seed for the room's random source. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            inbox_capacity: 100,
            countdown_secs: 30,
            allowed_kinds: None,
            seed: None,
        }
    }
}

impl RoomConfig {
    /// The kinds eligible for rotation.
    pub fn allowed_kinds(&self) -> Vec<GameKind> {
        match &self.allowed_kinds {
            Some(kinds) if !kinds.is_empty() => kinds.clone(),
            _ => GameKind::ALL.to_vec(),
        }
    }

    pub fn game_settings(&self) -> GameSettings {
        GameSettings {
            countdown_secs: self.countdown_secs,
        }
    }

    /// A fresh random source for one room.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn test_room_config_default() {
        let config = RoomConfig::default();
        assert_eq!(config.inbox_capacity, 100);
        assert_eq!(config.countdown_secs, 30);
        assert!(config.allowed_kinds.is_none());
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: RoomConfig =
            serde_json::from_str(r#"{"allowed_kinds":["charades","madlibs"],"seed":4}"#).unwrap();
        assert_eq!(config.inbox_capacity, 100);
        assert_eq!(config.countdown_secs, 30);
        assert_eq!(config.allowed_kinds(), vec![GameKind::Charades, GameKind::MadLibs]);
        assert_eq!(config.seed, Some(4));
    }

    #[test]
    fn test_allowed_kinds_defaults_to_all() {
        assert_eq!(RoomConfig::default().allowed_kinds(), GameKind::ALL.to_vec());

        let empty = RoomConfig {
            allowed_kinds: Some(Vec::new()),
            ..RoomConfig::default()
        };
        assert_eq!(empty.allowed_kinds().len(), GameKind::ALL.len());

        let pinned = RoomConfig {
            allowed_kinds: Some(vec![GameKind::Charades]),
            ..RoomConfig::default()
        };
        assert_eq!(pinned.allowed_kinds(), vec![GameKind::Charades]);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = RoomConfig {
            seed: Some(99),
            ..RoomConfig::default()
        };
        let a: u64 = config.rng().random();
        let b: u64 = config.rng().random();
        assert_eq!(a, b);
    }

    #[test]
    fn test_game_settings_carry_countdown() {
        let config = RoomConfig {
            countdown_secs: 5,
            ..RoomConfig::default()
        };
        assert_eq!(config.game_settings().countdown_secs, 5);
    }
}
