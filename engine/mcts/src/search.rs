//! MCTS search implementation.
//!
//! Implements the core MCTS loop:
//! 1. Selection: descend with UCB while nodes are fully expanded
//! 2. Expansion: add one child for the next untried action
//! 3. Simulation: random playout from the new node
//! 4. Backpropagation: update statistics along the path to the root

use std::time::{Duration, Instant};

use engine_core::GameState;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::{MctsConfig, SearchBudget};
use crate::node::NodeId;
use crate::rollout::rollout;
use crate::tree::SearchTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Counters collected while a search runs.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Completed select/simulate/backpropagate iterations
    pub iterations: u32,
    /// Nodes added to the tree
    pub expansions: u32,
    /// Iterations whose selection ended on a terminal node
    pub terminal_hits: u32,
    /// Wall-clock time spent in `run`
    pub elapsed: Duration,
}

/// One search pass over a tree.
///
/// Borrows the tree so that the caller decides whether it outlives the
/// search (persistent play) or is dropped afterwards.
pub struct MctsSearch<'a, S: GameState> {
    tree: &'a mut SearchTree<S>,
    config: &'a MctsConfig,
    rng: &'a mut ChaCha20Rng,
    stats: SearchStats,
}

impl<'a, S: GameState> MctsSearch<'a, S> {
    /// Prepare a search rooted at `tree.root()`.
    ///
    /// Fails with `InvalidConfig` when `config` could produce NaN scores, and
    /// with `NoLegalMoves` when the root position is over or offers nothing
    /// to play.
    pub fn new(
        tree: &'a mut SearchTree<S>,
        config: &'a MctsConfig,
        rng: &'a mut ChaCha20Rng,
    ) -> Result<Self, SearchError> {
        config.validate()?;

        let root_id = tree.root();
        let root = tree.get_mut(root_id);
        if root.is_terminal() || (root.is_fully_expanded() && root.children.is_empty()) {
            return Err(SearchError::NoLegalMoves);
        }

        Ok(Self {
            tree,
            config,
            rng,
            stats: SearchStats::default(),
        })
    }

    /// Iterate until `budget` is used up.
    pub fn run(&mut self, budget: SearchBudget) -> Result<&SearchStats, SearchError> {
        let started = Instant::now();

        match budget {
            SearchBudget::Iterations(n) => {
                for _ in 0..n {
                    self.iterate()?;
                }
            }
            SearchBudget::WallClock(limit) => {
                let deadline = started + limit;
                while Instant::now() < deadline {
                    self.iterate()?;
                }
            }
        }

        self.stats.elapsed = started.elapsed();

        debug!(
            iterations = self.stats.iterations,
            expansions = self.stats.expansions,
            terminal_hits = self.stats.terminal_hits,
            tree_size = self.tree.len(),
            elapsed_ms = self.stats.elapsed.as_millis() as u64,
            "MCTS search finished"
        );

        Ok(&self.stats)
    }

    /// Run a single iteration (select/expand -> simulate -> backpropagate).
    pub fn iterate(&mut self) -> Result<(), SearchError> {
        let leaf_id = self.select();

        let winner = rollout(&self.tree.get(leaf_id).state, self.rng)?;
        self.tree
            .backpropagate(leaf_id, winner, &self.config.rewards);
        self.stats.iterations += 1;

        trace!(
            leaf = leaf_id.0,
            winner = ?winner,
            "MCTS iteration complete"
        );

        Ok(())
    }

    /// Descend from the root: expand the first node that still has untried
    /// actions, otherwise follow the UCB-best child. Stops at terminal nodes.
    fn select(&mut self) -> NodeId {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get_mut(current);

            if node.is_terminal() {
                self.stats.terminal_hits += 1;
                return current;
            }

            if !node.is_fully_expanded() {
                if let Some(child_id) = self.tree.expand(current) {
                    self.stats.expansions += 1;
                    return child_id;
                }
            }

            match self
                .tree
                .select_child(current, self.config.exploration_constant)
            {
                Some(child_id) => current = child_id,
                None => return current, // Not over but nothing to play
            }
        }
    }

    /// Counters so far.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &SearchTree<S> {
        self.tree
    }
}

/// Child of the root with the best pure exploitation score (`c = 0`).
pub fn best_child<S: GameState>(tree: &SearchTree<S>) -> Option<NodeId> {
    tree.select_child(tree.root(), 0.0)
}
