//! Server-level configuration: room defaults plus maintenance cadence.

use std::time::Duration;

use partyline_room::RoomConfig;
use serde::{Deserialize, Serialize};

/// Everything the server needs to host rooms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Applied to every room the coordinator creates.
    pub room: RoomConfig,
    /// How often empty rooms are swept. Default: 30 s.
    pub sweep_interval: Duration,
    /// How often each room receives a countdown tick. Default: 1 s.
    pub timer_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            room: RoomConfig::default(),
            sweep_interval: Duration::from_secs(30),
            timer_interval: Duration::from_secs(1),
        }
    }
}

impl ServerConfig {
    /// Shortest interval either maintenance loop will run at.
    pub const MIN_INTERVAL: Duration = Duration::from_millis(10);

    /// Clamp out-of-range values so the config is safe to use.
    ///
    /// Called by [`crate::Maintenance::start`]. Intervals below
    /// [`Self::MIN_INTERVAL`] are raised to it, and a zero inbox capacity
    /// becomes 1.
    pub fn validated(mut self) -> Self {
        if self.sweep_interval < Self::MIN_INTERVAL {
            tracing::warn!(
                interval = ?self.sweep_interval,
                min = ?Self::MIN_INTERVAL,
                "sweep_interval below minimum, clamping"
            );
            self.sweep_interval = Self::MIN_INTERVAL;
        }
        if self.timer_interval < Self::MIN_INTERVAL {
            tracing::warn!(
                interval = ?self.timer_interval,
                min = ?Self::MIN_INTERVAL,
                "timer_interval below minimum, clamping"
            );
            self.timer_interval = Self::MIN_INTERVAL;
        }
        if self.room.inbox_capacity == 0 {
            tracing::warn!("inbox_capacity of 0 is not allowed, using 1");
            self.room.inbox_capacity = 1;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.sweep_interval, Duration::from_secs(30));
        assert_eq!(config.timer_interval, Duration::from_secs(1));
        assert_eq!(config.room.inbox_capacity, 100);
        assert_eq!(config.room.countdown_secs, 30);
    }

    #[test]
    fn test_validated_clamps_zero_intervals() {
        let config = ServerConfig {
            sweep_interval: Duration::ZERO,
            timer_interval: Duration::from_millis(1),
            ..Default::default()
        }
        .validated();
        assert_eq!(config.sweep_interval, ServerConfig::MIN_INTERVAL);
        assert_eq!(config.timer_interval, ServerConfig::MIN_INTERVAL);
    }

    #[test]
    fn test_validated_fixes_zero_inbox() {
        let mut config = ServerConfig::default();
        config.room.inbox_capacity = 0;
        assert_eq!(config.validated().room.inbox_capacity, 1);
    }

    #[test]
    fn test_validated_keeps_sane_values() {
        let config = ServerConfig::default().validated();
        assert_eq!(config.sweep_interval, Duration::from_secs(30));
        assert_eq!(config.timer_interval, Duration::from_secs(1));
    }
}
