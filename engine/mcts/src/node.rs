//! MCTS tree node representation.
//!
//! Each node owns a snapshot of the position reached by playing `action` from
//! the parent's position. Nodes store the visit statistics used for UCB
//! selection and the memoized list of actions not yet expanded.

use crate::config::Rewards;
use engine_core::{GameState, PlayerId};
use std::collections::VecDeque;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct SearchNode<S: GameState> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Action that led to this node from parent (None for root)
    pub action: Option<S::Action>,

    /// Position at this node. Never shared with another node.
    pub state: S,

    /// Player whose move produced this node. Rewards are credited from this
    /// player's point of view.
    pub owner: PlayerId,

    /// Number of simulations that passed through this node (N)
    pub visit_count: u32,

    /// Running mean of the rewards seen by this node (Q)
    pub action_value: f64,

    /// Children in expansion order.
    pub children: Vec<NodeId>,

    /// Legal actions not yet expanded. `None` until first asked for.
    untried_actions: Option<VecDeque<S::Action>>,
}

impl<S: GameState> SearchNode<S> {
    /// Create a new root node.
    pub fn new_root(state: S, owner: PlayerId) -> Self {
        Self {
            parent: NodeId::NONE,
            action: None,
            state,
            owner,
            visit_count: 0,
            action_value: 0.0,
            children: Vec::new(),
            untried_actions: None,
        }
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, action: S::Action, state: S, owner: PlayerId) -> Self {
        Self {
            parent,
            action: Some(action),
            ..Self::new_root(state, owner)
        }
    }

    /// True iff the position is game over. Terminal nodes are never expanded.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.state.is_over()
    }

    /// Untried actions, computed from the state on first access.
    pub fn untried_actions(&mut self) -> &mut VecDeque<S::Action> {
        let state = &self.state;
        self.untried_actions.get_or_insert_with(|| {
            if state.is_over() {
                VecDeque::new()
            } else {
                state.legal_actions().into()
            }
        })
    }

    /// Untried actions if they have been computed yet.
    pub fn peek_untried(&self) -> Option<&VecDeque<S::Action>> {
        self.untried_actions.as_ref()
    }

    /// True once every legal action has a child.
    #[inline]
    pub fn is_fully_expanded(&mut self) -> bool {
        self.untried_actions().is_empty()
    }

    /// Take the next untried action (FIFO over the legal-action order).
    #[inline]
    pub fn next_untried(&mut self) -> Option<S::Action> {
        self.untried_actions().pop_front()
    }

    /// `(Q, N)` for this node.
    #[inline]
    pub fn statistics(&self) -> (f64, u32) {
        (self.action_value, self.visit_count)
    }

    /// Exploitation term `Q / N`. Returns 0.0 if never visited.
    #[inline]
    pub fn exploitation(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.action_value / self.visit_count as f64
        }
    }

    /// Selection score of this node as a child of a parent with
    /// `parent_visits` visits:
    ///
    /// `Q/N + c * sqrt(N_parent / (N + 1))`
    ///
    /// `N_parent / (N + 1)` is an integer division, rounded down before the
    /// square root; a child visited at least as often as its parent gets no
    /// exploration bonus. The `+ 1` keeps unvisited children finite. With
    /// `c = 0` this is the plain exploitation term used for the final move
    /// choice.
    #[inline]
    pub fn ucb_score(&self, parent_visits: u32, c: f64) -> f64 {
        let ratio = parent_visits / self.visit_count.saturating_add(1);
        self.exploitation() + c * (ratio as f64).sqrt()
    }

    /// Record one simulation outcome: bump N, fold the reward into Q.
    #[inline]
    pub fn record(&mut self, winner: Option<PlayerId>, rewards: &Rewards) {
        self.visit_count += 1;
        let reward = rewards.for_outcome(winner, self.owner);
        self.action_value += (reward - self.action_value) / self.visit_count as f64;
    }
}
