//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic used by
//! the engine host binaries.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`UCT_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! UCT_<SECTION>_<KEY>=value
//!
//! Examples:
//!     UCT_COMMON_LOG_LEVEL=debug
//!     UCT_MCTS_BUDGET_MODE=iterations
//!     UCT_MCTS_ITERATIONS=5000
//!     UCT_MCTS_PERSISTENT=false
//!     UCT_ACTOR_GAMES=100
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;

#[cfg(test)]
mod tests;
