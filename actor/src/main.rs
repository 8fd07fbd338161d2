//! Actor - self-play match runner for the UCT engine
//!
//! Plays a series of tic-tac-toe games between two independent engines in
//! one process:
//! 1. Loads settings from config.toml / environment / CLI
//! 2. Alternates which engine moves first from game to game
//! 3. Logs every move at debug level and running totals at info level

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

mod actor;
mod config;

use crate::actor::Actor;
use crate::config::Config;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let actor = Actor::new(config);

    match actor.run() {
        Ok(summary) => {
            info!(
                games = summary.games,
                wins_a = summary.wins_a,
                wins_b = summary.wins_b,
                draws = summary.draws,
                moves = summary.moves,
                avg_iterations = format!("{:.1}", summary.avg_iterations()),
                "Match completed"
            );
            Ok(())
        }
        Err(e) => {
            error!("Match failed: {}", e);
            Err(e)
        }
    }
}
