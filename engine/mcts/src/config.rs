//! MCTS configuration parameters.

use engine_core::PlayerId;
use std::time::Duration;

use crate::search::SearchError;

/// Exploration constant used while descending the tree.
pub const DEFAULT_EXPLORATION: f64 = 1.4;

/// How much search a single `choose_move` call may spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBudget {
    /// Run exactly this many select/simulate/backpropagate iterations.
    Iterations(u32),

    /// Keep iterating until this much wall-clock time has passed.
    /// The deadline is checked once per iteration, so a search can overrun
    /// by the length of one rollout.
    WallClock(Duration),
}

impl SearchBudget {
    /// Wall-clock budget in milliseconds.
    pub fn millis(ms: u64) -> Self {
        SearchBudget::WallClock(Duration::from_millis(ms))
    }
}

/// Reward pair applied during backpropagation.
///
/// A node scores `on_win` when the simulated winner is the player whose move
/// produced the node, and `on_loss` otherwise (draws count as losses).
/// The asymmetric default punishes losing lines much harder than it rewards
/// winning ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rewards {
    pub on_win: f64,
    pub on_loss: f64,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            on_win: 1.0,
            on_loss: -100.0,
        }
    }
}

impl Rewards {
    pub fn new(on_win: f64, on_loss: f64) -> Self {
        Self { on_win, on_loss }
    }

    /// Reward credited to a node owned by `owner` for a playout won by `winner`
    /// (`None` = draw).
    #[inline]
    pub fn for_outcome(&self, winner: Option<PlayerId>, owner: PlayerId) -> f64 {
        if winner == Some(owner) {
            self.on_win
        } else {
            self.on_loss
        }
    }
}

/// Configuration for the UCT engine.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Exploration constant `c` in the selection score.
    /// Final move choice always uses `c = 0`.
    pub exploration_constant: f64,

    /// Win/loss reward pair used by backpropagation.
    pub rewards: Rewards,

    /// Budget used when `choose_move` is called without an explicit one.
    pub budget: SearchBudget,

    /// Budget for the very first search of a game, when the caller does not
    /// pass one. The first turn usually has the most time available.
    pub opening_budget: Option<SearchBudget>,

    /// Keep the tree between calls and re-root it on the observed position.
    /// When false every call starts from an empty tree.
    pub persistent: bool,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_constant: DEFAULT_EXPLORATION,
            rewards: Rewards::default(),
            budget: SearchBudget::millis(1_900),
            opening_budget: Some(SearchBudget::millis(25_000)),
            persistent: true,
        }
    }
}

impl MctsConfig {
    /// Create config for timed tournament play (persistent tree).
    pub fn for_tournament() -> Self {
        Self::default()
    }

    /// Create config that rebuilds the tree on every call.
    pub fn single_turn() -> Self {
        Self {
            opening_budget: None,
            persistent: false,
            ..Self::default()
        }
    }

    /// Create a fast, deterministic config for testing.
    pub fn for_testing() -> Self {
        Self {
            exploration_constant: DEFAULT_EXPLORATION,
            rewards: Rewards::default(),
            budget: SearchBudget::Iterations(64),
            opening_budget: None,
            persistent: true,
        }
    }

    /// Builder pattern: set exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set the win/loss reward pair.
    ///
    /// Both rewards must be finite. An infinite reward turns running means
    /// into NaN, and `validate` rejects such a config before any search.
    pub fn with_rewards(mut self, on_win: f64, on_loss: f64) -> Self {
        self.rewards = Rewards::new(on_win, on_loss);
        self
    }

    /// Builder pattern: set the per-move budget.
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Builder pattern: fixed number of iterations per move.
    pub fn with_iterations(self, n: u32) -> Self {
        self.with_budget(SearchBudget::Iterations(n))
    }

    /// Builder pattern: wall-clock limit per move.
    pub fn with_time_limit(self, limit: Duration) -> Self {
        self.with_budget(SearchBudget::WallClock(limit))
    }

    /// Builder pattern: set (or clear) the first-move budget.
    pub fn with_opening_budget(mut self, budget: Option<SearchBudget>) -> Self {
        self.opening_budget = budget;
        self
    }

    /// Builder pattern: toggle tree reuse between calls.
    pub fn with_persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    /// Check that every selection score stays a real number.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }

        if !self.rewards.on_win.is_finite() || !self.rewards.on_loss.is_finite() {
            return Err(SearchError::InvalidConfig(format!(
                "rewards must be finite, got win {} / loss {}",
                self.rewards.on_win, self.rewards.on_loss
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert!((config.exploration_constant - 1.4).abs() < 1e-9);
        assert_eq!(config.rewards, Rewards::new(1.0, -100.0));
        assert_eq!(config.budget, SearchBudget::millis(1_900));
        assert_eq!(config.opening_budget, Some(SearchBudget::millis(25_000)));
        assert!(config.persistent);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_iterations(100)
            .with_rewards(100.0, -100.0)
            .with_persistent(false)
            .with_opening_budget(None);

        assert_eq!(config.budget, SearchBudget::Iterations(100));
        assert!((config.rewards.on_win - 100.0).abs() < 1e-9);
        assert!(!config.persistent);
        assert!(config.opening_budget.is_none());
    }

    #[test]
    fn test_single_turn_config() {
        let config = MctsConfig::single_turn();
        assert!(!config.persistent);
        assert!(config.opening_budget.is_none());
    }

    #[test]
    fn test_reward_for_outcome() {
        let rewards = Rewards::default();
        let me = PlayerId::FIRST;

        assert!((rewards.for_outcome(Some(me), me) - 1.0).abs() < 1e-9);
        assert!((rewards.for_outcome(Some(me.opponent()), me) + 100.0).abs() < 1e-9);
        // Draws are scored as losses
        assert!((rewards.for_outcome(None, me) + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate() {
        assert!(MctsConfig::default().validate().is_ok());
        assert!(MctsConfig::for_testing().validate().is_ok());

        let infinite = MctsConfig::default().with_rewards(f64::INFINITY, -1.0);
        assert!(matches!(
            infinite.validate(),
            Err(SearchError::InvalidConfig(_))
        ));

        let nan = MctsConfig::default().with_rewards(1.0, f64::NAN);
        assert!(nan.validate().is_err());

        let negative = MctsConfig::default().with_exploration(-1.0);
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_time_limit_builder() {
        let config = MctsConfig::for_testing().with_time_limit(Duration::from_millis(5));
        assert_eq!(config.budget, SearchBudget::WallClock(Duration::from_millis(5)));
    }
}
