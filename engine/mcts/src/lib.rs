//! Persistent UCT (Monte Carlo Tree Search) engine for two-player games.
//!
//! This crate provides a game-agnostic MCTS implementation that works with any
//! game implementing the `engine-core` [`GameState`](engine_core::GameState)
//! trait.
//!
//! # Overview
//!
//! Each iteration of the search consists of four phases:
//!
//! 1. **Selection**: Descend from the root using the UCB score while nodes
//!    are fully expanded
//! 2. **Expansion**: Add one child for the next untried action
//! 3. **Simulation**: Play uniformly random moves to the end of the game
//! 4. **Backpropagation**: Credit the result to every node on the path, from
//!    the point of view of the player who moved into that node
//!
//! The engine keeps the subtree under the move it played. When the
//! opponent's reply is already in the tree, the next search starts from it
//! with all statistics intact.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{GameState, PlayerId};
//! use games_tictactoe::State;
//! use mcts::{Engine, MctsConfig};
//!
//! let config = MctsConfig::for_testing().with_iterations(200);
//! let mut engine = Engine::with_seed(PlayerId::FIRST, config, 42);
//!
//! let state = State::new();
//! let action = engine.choose_move(&state, None).unwrap();
//! assert!(state.legal_actions().contains(&action));
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `exploration_constant`: `c` in the selection score (default: 1.4)
//! - `rewards`: win/loss rewards credited during backpropagation
//!   (default: 1 / -100)
//! - `budget`: iterations or wall-clock time per move (default: 1900 ms)
//! - `opening_budget`: budget for the first move of a game (default: 25 s)
//! - `persistent`: keep the tree between moves (default: true)

pub mod config;
pub mod engine;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

pub use config::{MctsConfig, Rewards, SearchBudget, DEFAULT_EXPLORATION};
pub use engine::{Engine, SearchResult};
pub use node::{NodeId, SearchNode};
pub use rollout::rollout;
pub use search::{best_child, MctsSearch, SearchError, SearchStats};
pub use tree::{SearchTree, TreeStats};

/// Small games for exercising the search in unit tests.
#[cfg(test)]
pub(crate) mod test_utils {
    use engine_core::{GameState, PlayerId};

    /// Take 1 or 2 stones from a pile; whoever takes the last stone wins.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Countdown {
        pub remaining: u8,
        pub to_move: PlayerId,
        pub last_taker: Option<PlayerId>,
    }

    impl Countdown {
        pub fn new(remaining: u8) -> Self {
            Self {
                remaining,
                to_move: PlayerId::FIRST,
                last_taker: None,
            }
        }
    }

    impl GameState for Countdown {
        type Action = u8;

        fn apply(&mut self, action: &u8) {
            self.remaining = self.remaining.saturating_sub(*action);
            self.last_taker = Some(self.to_move);
            self.to_move = self.to_move.opponent();
        }

        fn is_over(&self) -> bool {
            self.remaining == 0
        }

        fn winner(&self) -> Option<PlayerId> {
            if self.is_over() {
                self.last_taker
            } else {
                None
            }
        }

        fn legal_actions(&self) -> Vec<u8> {
            (1..=2).filter(|&n| n <= self.remaining).collect()
        }
    }

    #[test]
    fn test_countdown_rules() {
        let mut game = Countdown::new(3);
        assert_eq!(game.legal_actions(), vec![1, 2]);

        game.apply(&2);
        assert_eq!(game.legal_actions(), vec![1]);
        assert!(!game.is_over());

        game.apply(&1);
        assert!(game.is_over());
        assert_eq!(game.winner(), Some(PlayerId::SECOND));
        assert!(game.legal_actions().is_empty());
    }
}
