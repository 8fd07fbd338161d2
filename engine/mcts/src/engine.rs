//! Player-facing engine with tree reuse across turns.

use std::time::Duration;

use engine_core::{GameState, PlayerId};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, warn};

use crate::config::{MctsConfig, SearchBudget};
use crate::search::{best_child, MctsSearch, SearchError};
use crate::tree::SearchTree;

/// Result of one `Engine::search` call.
#[derive(Debug, Clone)]
pub struct SearchResult<A> {
    /// Move to play
    pub action: A,
    /// Exploitation score (`Q/N`) of the chosen child
    pub value: f64,
    /// Visits of the chosen child
    pub visits: u32,
    /// Iterations run by this call
    pub iterations: u32,
    /// Root visits after the search, including reused ones
    pub root_visits: u32,
    /// Nodes in the tree after the search, before re-rooting
    pub tree_size: usize,
    /// Whether the previous tree was reused for this position
    pub reused: bool,
    /// The budget expired before any child existed; `action` is random
    pub fallback: bool,
    pub elapsed: Duration,
}

/// UCT engine playing one side of a two-player game.
///
/// With `MctsConfig::persistent` set, the engine keeps the subtree under the
/// move it played and picks it back up when the opponent's reply (or the same
/// position again) is passed to the next call.
pub struct Engine<S: GameState> {
    player: PlayerId,
    config: MctsConfig,
    tree: Option<SearchTree<S>>,
    rng: ChaCha20Rng,
    searches: u32,
}

impl<S: GameState> Engine<S> {
    /// Engine seeded from OS entropy.
    pub fn new(player: PlayerId, config: MctsConfig) -> Self {
        Self::with_rng(player, config, ChaCha20Rng::from_entropy())
    }

    /// Engine with a fixed seed; identical inputs give identical moves.
    pub fn with_seed(player: PlayerId, config: MctsConfig, seed: u64) -> Self {
        Self::with_rng(player, config, ChaCha20Rng::seed_from_u64(seed))
    }

    fn with_rng(player: PlayerId, config: MctsConfig, rng: ChaCha20Rng) -> Self {
        Self {
            player,
            config,
            tree: None,
            rng,
            searches: 0,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Retained tree, if any.
    pub fn tree(&self) -> Option<&SearchTree<S>> {
        self.tree.as_ref()
    }

    /// Forget the retained tree and treat the next call as the first of a game.
    pub fn reset(&mut self) {
        self.tree = None;
        self.searches = 0;
    }

    /// Move the retained tree onto `state`.
    ///
    /// Looks for `state` among the children of the retained root, then at the
    /// root itself. On a match the tree is re-rooted there (keeping all
    /// statistics) and `true` is returned. Otherwise the engine starts over
    /// with a fresh root for `state`.
    ///
    /// A non-persistent engine keeps no tree: this returns `false` and
    /// leaves `tree()` empty.
    pub fn advance_to(&mut self, state: &S) -> bool {
        if !self.config.persistent {
            self.tree = None;
            return false;
        }

        let (tree, reused) = self.take_tree_for(state);
        self.tree = Some(tree);
        reused
    }

    fn take_tree_for(&mut self, state: &S) -> (SearchTree<S>, bool) {
        // Nodes we can resume from were produced by the opponent's move
        let owner = self.player.opponent();

        if self.config.persistent {
            if let Some(mut tree) = self.tree.take() {
                if let Some(child) = tree.find_root_child(state) {
                    if tree.get(child).owner == owner {
                        tree.reroot(child);
                        debug!(
                            tree_size = tree.len(),
                            root_visits = tree.get(tree.root()).visit_count,
                            "Re-rooted onto opponent reply"
                        );
                        return (tree, true);
                    }
                }

                let root = tree.get(tree.root());
                if root.state == *state && root.owner == owner {
                    debug!(tree_size = tree.len(), "Resuming retained root");
                    return (tree, true);
                }

                debug!("Position not in retained tree, starting fresh");
            }
        }

        (SearchTree::new(state.clone(), owner), false)
    }

    /// Search `state` and pick a move.
    ///
    /// `budget` overrides the configured one. Without it the first call of a
    /// game uses `opening_budget` (when set) and later calls use `budget`.
    pub fn search(
        &mut self,
        state: &S,
        budget: Option<SearchBudget>,
    ) -> Result<SearchResult<S::Action>, SearchError> {
        if state.is_over() {
            return Err(SearchError::NoLegalMoves);
        }

        let budget = budget
            .or(if self.searches == 0 {
                self.config.opening_budget
            } else {
                None
            })
            .unwrap_or(self.config.budget);

        let (mut tree, reused) = self.take_tree_for(state);

        let stats = {
            let mut search = MctsSearch::new(&mut tree, &self.config, &mut self.rng)?;
            search.run(budget)?.clone()
        };
        self.searches += 1;

        let root_visits = tree.get(tree.root()).visit_count;
        let tree_size = tree.len();

        let result = match best_child(&tree) {
            Some(best_id) => {
                let best = tree.get(best_id);
                let action = best.action.clone().ok_or_else(|| {
                    SearchError::InvalidState("root child without an action".to_string())
                })?;
                let value = best.exploitation();
                let visits = best.visit_count;

                if self.config.persistent {
                    tree.reroot(best_id);
                    self.tree = Some(tree);
                } else {
                    self.tree = None;
                }

                SearchResult {
                    action,
                    value,
                    visits,
                    iterations: stats.iterations,
                    root_visits,
                    tree_size,
                    reused,
                    fallback: false,
                    elapsed: stats.elapsed,
                }
            }
            None => {
                warn!(
                    budget = ?budget,
                    "Search budget ran out before any move was expanded, playing a random move"
                );
                let action = state
                    .random_legal_action(&mut self.rng)
                    .ok_or(SearchError::NoLegalMoves)?;
                self.tree = None;

                SearchResult {
                    action,
                    value: 0.0,
                    visits: 0,
                    iterations: stats.iterations,
                    root_visits,
                    tree_size,
                    reused,
                    fallback: true,
                    elapsed: stats.elapsed,
                }
            }
        };

        debug!(
            player = %self.player,
            action = ?result.action,
            value = result.value,
            visits = result.visits,
            iterations = result.iterations,
            root_visits = result.root_visits,
            tree_size = result.tree_size,
            reused = result.reused,
            "Engine picked move"
        );

        Ok(result)
    }

    /// Pick a move for `state` (the engine's player is to move).
    pub fn choose_move(
        &mut self,
        state: &S,
        budget: Option<SearchBudget>,
    ) -> Result<S::Action, SearchError> {
        self.search(state, budget).map(|r| r.action)
    }
}
