//! Hosts the Partyline room core until Ctrl-C.
//!
//! The binary owns the coordinator and the maintenance loops. A transport
//! embedding the core drives rooms through [`partyline::Connection`].

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use partyline::prelude::*;

/// Partyline server - rooms and rounds for party games
#[derive(Parser, Debug)]
#[command(name = "partyline-server", version, about)]
struct Args {
    /// Seconds between sweeps of empty rooms
    #[arg(long, default_value_t = 30)]
    sweep_secs: u64,

    /// Milliseconds between countdown ticks
    #[arg(long, default_value_t = 1000)]
    timer_ms: u64,

    /// Pending messages each room buffers before senders wait
    #[arg(long, default_value_t = 100)]
    inbox_capacity: usize,

    /// Seconds on the clock for timed rounds
    #[arg(long, default_value_t = 30)]
    countdown_secs: u32,

    /// Game kinds to rotate through, comma separated (default: all)
    #[arg(long, value_delimiter = ',')]
    kinds: Vec<String>,

    /// Seed for every room's random source (reproducible rounds)
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn into_config(self) -> Result<ServerConfig, PartylineError> {
        let kinds = self
            .kinds
            .iter()
            .map(|name| name.trim().parse::<GameKind>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ServerConfig {
            room: RoomConfig {
                inbox_capacity: self.inbox_capacity,
                countdown_secs: self.countdown_secs,
                allowed_kinds: (!kinds.is_empty()).then_some(kinds),
                seed: self.seed,
            },
            sweep_interval: Duration::from_secs(self.sweep_secs),
            timer_interval: Duration::from_millis(self.timer_ms),
        }
        .validated())
    }
}

#[tokio::main]
async fn main() -> Result<(), PartylineError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "partyline=info,partyline_room=info".into()),
        )
        .init();

    let config = Args::parse().into_config()?;
    tracing::info!(
        kinds = ?config.room.allowed_kinds(),
        inbox_capacity = config.room.inbox_capacity,
        "starting partyline server"
    );

    let coordinator = Arc::new(Coordinator::new(config.room.clone()));
    let maintenance = Maintenance::start(Arc::clone(&coordinator), &config);

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown requested");

    maintenance.shutdown().await;
    coordinator.shutdown_all().await;
    Ok(())
}
