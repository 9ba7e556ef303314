//! Periodic housekeeping: countdown ticks and the empty-room sweep.
//!
//! Both loops run as their own Tokio task against a shared
//! [`Coordinator`]. Each waits on a `tokio::time::Interval` inside a
//! biased `select!` so a shutdown request is seen before the next job.
//! Missed ticks are skipped rather than replayed in a burst.

use std::sync::Arc;
use std::time::Duration;

use partyline_room::Coordinator;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::ServerConfig;

/// Handle to the running maintenance loops.
///
/// Dropping it without calling [`Maintenance::shutdown`] also ends the
/// loops (their shutdown receiver sees the sender go away), but does not
/// wait for them.
pub struct Maintenance {
    stop: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl Maintenance {
    /// Spawns the sweep and tick loops. Must be called inside a Tokio
    /// runtime.
    pub fn start(coordinator: Arc<Coordinator>, config: &ServerConfig) -> Self {
        let config = config.clone().validated();
        let (stop, _) = watch::channel(false);

        let sweep = tokio::spawn(sweep_loop(
            Arc::clone(&coordinator),
            config.sweep_interval,
            stop.subscribe(),
        ));
        let tick = tokio::spawn(tick_loop(
            coordinator,
            config.timer_interval,
            stop.subscribe(),
        ));

        tracing::info!(
            sweep_interval = ?config.sweep_interval,
            timer_interval = ?config.timer_interval,
            "maintenance started"
        );

        Self {
            stop,
            tasks: vec![sweep, tick],
        }
    }

    /// Signals both loops to stop and waits for them to finish.
    pub async fn shutdown(self) {
        // A send error only means every loop has already exited.
        let _ = self.stop.send(true);
        for task in self.tasks {
            if let Err(err) = task.await {
                tracing::error!(%err, "maintenance task failed");
            }
        }
        tracing::info!("maintenance stopped");
    }

    /// True while at least one loop is still running.
    pub fn is_running(&self) -> bool {
        self.tasks.iter().any(|task| !task.is_finished())
    }
}

/// An interval whose first tick lands one `period` from now.
fn interval(period: Duration) -> time::Interval {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

async fn sweep_loop(
    coordinator: Arc<Coordinator>,
    period: Duration,
    mut stop: watch::Receiver<bool>,
) {
    let mut interval = interval(period);
    loop {
        tokio::select! {
            biased;
            _ = stop.changed() => break,
            _ = interval.tick() => {
                let removed = coordinator.sweep_empty().await;
                if removed > 0 {
                    tracing::debug!(removed, "sweep finished");
                }
            }
        }
    }
    tracing::debug!("sweep loop exited");
}

async fn tick_loop(
    coordinator: Arc<Coordinator>,
    period: Duration,
    mut stop: watch::Receiver<bool>,
) {
    let mut interval = interval(period);
    loop {
        tokio::select! {
            biased;
            _ = stop.changed() => break,
            _ = interval.tick() => {
                coordinator.tick_all().await;
            }
        }
    }
    tracing::debug!("tick loop exited");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_both_loops() {
        let coordinator = Arc::new(Coordinator::default());
        let maintenance = Maintenance::start(coordinator, &ServerConfig::default());
        assert!(maintenance.is_running());
        maintenance.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_ends_loops() {
        let coordinator = Arc::new(Coordinator::default());
        let maintenance = Maintenance::start(Arc::clone(&coordinator), &ServerConfig::default());
        drop(maintenance);
        // Loops exit once they observe the closed channel; the coordinator
        // is then only held here.
        for _ in 0..10 {
            if Arc::strong_count(&coordinator) == 1 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(Arc::strong_count(&coordinator), 1);
    }
}
