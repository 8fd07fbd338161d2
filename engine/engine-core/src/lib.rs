//! Core traits and types shared by the search engine and game implementations
//!
//! This crate defines the contract a host game must satisfy before the UCT
//! engine can search it:
//! - `GameState`: deep-copyable position with rules (apply, legality, outcome)
//! - `PlayerId`: two-player turn identifier
//!
//! The engine never inspects actions or board contents; everything
//! game-specific goes through `GameState`.

pub mod player;
pub mod state;

// Re-export main types for convenience
pub use player::PlayerId;
pub use state::GameState;
