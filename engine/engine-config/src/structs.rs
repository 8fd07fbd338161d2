//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_exploration() -> f64 {
    defaults::exploration_constant()
}
fn d_win_reward() -> f64 {
    defaults::win_reward()
}
fn d_loss_reward() -> f64 {
    defaults::loss_reward()
}
fn d_budget_mode() -> String {
    defaults::budget_mode().into()
}
fn d_iterations() -> u32 {
    defaults::iterations()
}
fn d_time_limit() -> u64 {
    defaults::time_limit_ms()
}
fn d_opening_time_limit() -> u64 {
    defaults::opening_time_limit_ms()
}
fn d_persistent() -> bool {
    defaults::persistent()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_log_interval() -> u32 {
    defaults::log_interval()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub mcts: MctsSection,
    #[serde(default)]
    pub actor: ActorConfig,
}

/// Settings shared by every binary
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Search engine settings.
///
/// `budget_mode` picks which budget applies per move: `"wallclock"` uses
/// `time_limit_ms`, `"iterations"` uses `iterations`.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsSection {
    #[serde(default = "d_exploration")]
    pub exploration_constant: f64,
    #[serde(default = "d_win_reward")]
    pub win_reward: f64,
    #[serde(default = "d_loss_reward")]
    pub loss_reward: f64,
    #[serde(default = "d_budget_mode")]
    pub budget_mode: String,
    #[serde(default = "d_iterations")]
    pub iterations: u32,
    #[serde(default = "d_time_limit")]
    pub time_limit_ms: u64,
    /// 0 disables the separate first-move budget
    #[serde(default = "d_opening_time_limit")]
    pub opening_time_limit_ms: u64,
    #[serde(default = "d_persistent")]
    pub persistent: bool,
}

impl Default for MctsSection {
    fn default() -> Self {
        Self {
            exploration_constant: defaults::exploration_constant(),
            win_reward: defaults::win_reward(),
            loss_reward: defaults::loss_reward(),
            budget_mode: defaults::budget_mode().into(),
            iterations: defaults::iterations(),
            time_limit_ms: defaults::time_limit_ms(),
            opening_time_limit_ms: defaults::opening_time_limit_ms(),
            persistent: defaults::persistent(),
        }
    }
}

/// Self-play host configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ActorConfig {
    #[serde(default = "d_games")]
    pub games: u32,
    #[serde(default = "d_seed")]
    pub seed: u64,
    /// Log running totals every this many games
    #[serde(default = "d_log_interval")]
    pub log_interval: u32,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            games: defaults::games(),
            seed: defaults::seed(),
            log_interval: defaults::log_interval(),
        }
    }
}
