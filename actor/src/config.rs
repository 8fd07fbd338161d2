//! Configuration for the match runner
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use mcts::{MctsConfig, SearchBudget};
use once_cell::sync::Lazy;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_games() -> u32 {
    CENTRAL_CONFIG.actor.games
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.actor.seed
}

fn default_log_interval() -> u32 {
    CENTRAL_CONFIG.actor.log_interval
}

fn default_exploration() -> f64 {
    CENTRAL_CONFIG.mcts.exploration_constant
}

fn default_win_reward() -> f64 {
    CENTRAL_CONFIG.mcts.win_reward
}

fn default_loss_reward() -> f64 {
    CENTRAL_CONFIG.mcts.loss_reward
}

fn default_budget_mode() -> String {
    CENTRAL_CONFIG.mcts.budget_mode.clone()
}

fn default_iterations() -> u32 {
    CENTRAL_CONFIG.mcts.iterations
}

fn default_time_limit_ms() -> u64 {
    CENTRAL_CONFIG.mcts.time_limit_ms
}

fn default_opening_time_limit_ms() -> u64 {
    CENTRAL_CONFIG.mcts.opening_time_limit_ms
}

fn default_persistent() -> bool {
    CENTRAL_CONFIG.mcts.persistent
}

#[derive(Parser, Debug, Clone)]
#[command(name = "actor")]
#[command(about = "UCT self-play - pits two engines against each other at tic-tac-toe")]
#[command(
    long_about = "Plays a series of tic-tac-toe games between two independent UCT engines,
alternating which one moves first, and reports the results.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Number of games to play
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Base seed; each engine in each game derives its own seed from it
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Log running totals every N games (0 to disable)
    #[arg(long, default_value_t = default_log_interval())]
    pub log_interval: u32,

    /// Exploration constant c
    #[arg(long, default_value_t = default_exploration())]
    pub exploration_constant: f64,

    /// Reward when the simulated winner made the move into a node
    #[arg(long, default_value_t = default_win_reward())]
    pub win_reward: f64,

    /// Reward for simulated losses and draws
    #[arg(long, default_value_t = default_loss_reward(), allow_hyphen_values = true)]
    pub loss_reward: f64,

    /// Per-move budget: "wallclock" or "iterations"
    #[arg(long, default_value_t = default_budget_mode())]
    pub budget_mode: String,

    /// Iterations per move (budget_mode = iterations)
    #[arg(long, default_value_t = default_iterations())]
    pub iterations: u32,

    /// Milliseconds per move (budget_mode = wallclock)
    #[arg(long, default_value_t = default_time_limit_ms())]
    pub time_limit_ms: u64,

    /// Milliseconds for each engine's first move (0 = same as time_limit_ms)
    #[arg(long, default_value_t = default_opening_time_limit_ms())]
    pub opening_time_limit_ms: u64,

    /// Keep the search tree between moves
    #[arg(long, default_value_t = default_persistent(), action = clap::ArgAction::Set)]
    pub persistent: bool,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(anyhow!(
                "exploration_constant must be a finite, non-negative number"
            ));
        }

        if !self.win_reward.is_finite() || !self.loss_reward.is_finite() {
            return Err(anyhow!("win_reward and loss_reward must be finite"));
        }

        match self.budget_mode.as_str() {
            "iterations" if self.iterations == 0 => {
                return Err(anyhow!("iterations must be greater than 0"));
            }
            "wallclock" if self.time_limit_ms == 0 => {
                return Err(anyhow!("time_limit_ms must be greater than 0"));
            }
            "iterations" | "wallclock" => {}
            other => {
                return Err(anyhow!(
                    "invalid budget_mode '{}', expected iterations or wallclock",
                    other
                ));
            }
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    /// Budget for every move after an engine's first.
    pub fn budget(&self) -> SearchBudget {
        if self.budget_mode == "iterations" {
            SearchBudget::Iterations(self.iterations)
        } else {
            SearchBudget::WallClock(Duration::from_millis(self.time_limit_ms))
        }
    }

    /// Budget for an engine's first move, if it differs from `budget`.
    ///
    /// Only applies to wall-clock play; iteration budgets stay fixed.
    pub fn opening_budget(&self) -> Option<SearchBudget> {
        if self.budget_mode == "wallclock" && self.opening_time_limit_ms > 0 {
            Some(SearchBudget::millis(self.opening_time_limit_ms))
        } else {
            None
        }
    }

    /// Engine settings for both sides.
    pub fn mcts_config(&self) -> MctsConfig {
        MctsConfig::for_tournament()
            .with_exploration(self.exploration_constant)
            .with_rewards(self.win_reward, self.loss_reward)
            .with_budget(self.budget())
            .with_opening_budget(self.opening_budget())
            .with_persistent(self.persistent)
    }
}
