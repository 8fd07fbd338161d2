//! Default configuration values loaded from config.defaults.toml.
//!
//! The shared TOML file is embedded at compile time so that the documented
//! defaults and the ones the binaries use cannot drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    mcts: MctsDefaults,
    actor: ActorDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    exploration_constant: f64,
    win_reward: f64,
    loss_reward: f64,
    budget_mode: String,
    iterations: u32,
    time_limit_ms: u64,
    opening_time_limit_ms: u64,
    persistent: bool,
}

#[derive(Debug, Deserialize)]
struct ActorDefaults {
    games: u32,
    seed: u64,
    log_interval: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// MCTS
pub fn exploration_constant() -> f64 {
    DEFAULTS.mcts.exploration_constant
}
pub fn win_reward() -> f64 {
    DEFAULTS.mcts.win_reward
}
pub fn loss_reward() -> f64 {
    DEFAULTS.mcts.loss_reward
}
pub fn budget_mode() -> &'static str {
    &DEFAULTS.mcts.budget_mode
}
pub fn iterations() -> u32 {
    DEFAULTS.mcts.iterations
}
pub fn time_limit_ms() -> u64 {
    DEFAULTS.mcts.time_limit_ms
}
pub fn opening_time_limit_ms() -> u64 {
    DEFAULTS.mcts.opening_time_limit_ms
}
pub fn persistent() -> bool {
    DEFAULTS.mcts.persistent
}

// Actor
pub fn games() -> u32 {
    DEFAULTS.actor.games
}
pub fn seed() -> u64 {
    DEFAULTS.actor.seed
}
pub fn log_interval() -> u32 {
    DEFAULTS.actor.log_interval
}
