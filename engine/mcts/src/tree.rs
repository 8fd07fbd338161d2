//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices. Re-rooting compacts the arena so
//! that only the retained subtree survives.

use std::collections::VecDeque;

use engine_core::{GameState, PlayerId};

use crate::config::Rewards;
use crate::node::{NodeId, SearchNode};

/// MCTS tree with arena-based node storage.
#[derive(Debug, Clone)]
pub struct SearchTree<S: GameState> {
    /// Arena storing all nodes
    nodes: Vec<SearchNode<S>>,

    /// Root node index (always 0 after construction or re-rooting)
    root: NodeId,
}

impl<S: GameState> SearchTree<S> {
    /// Create a new tree whose root wraps `root_state`.
    ///
    /// `owner` is the player whose move produced `root_state`.
    pub fn new(root_state: S, owner: PlayerId) -> Self {
        Self {
            nodes: vec![SearchNode::new_root(root_state, owner)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.index()]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<S> {
        &mut self.nodes[id.index()]
    }

    /// Allocate a new node and return its ID.
    fn allocate(&mut self, node: SearchNode<S>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[SearchNode<S>] {
        &self.nodes
    }

    /// Select the child of `node_id` with the highest UCB score.
    ///
    /// Ties go to the earliest child. Returns None if the node has no
    /// children.
    pub fn select_child(&self, node_id: NodeId, c: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        let parent_visits = node.visit_count;

        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &node.children {
            let score = self.get(child_id).ucb_score(parent_visits, c);
            if score.is_nan() {
                continue;
            }
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((child_id, score));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Expand one untried action of `node_id` into a new child.
    ///
    /// The parent's state is copied before the action is applied, so the
    /// parent snapshot is never touched. Returns None when nothing is left
    /// to expand.
    pub fn expand(&mut self, node_id: NodeId) -> Option<NodeId> {
        let parent = self.get_mut(node_id);
        let action = parent.next_untried()?;

        let mut state = parent.state.clone();
        state.apply(&action);
        let owner = parent.owner.opponent();

        let child_id = self.allocate(SearchNode::new_child(node_id, action, state, owner));
        self.get_mut(node_id).children.push(child_id);

        Some(child_id)
    }

    /// Backpropagate a playout result from `leaf_id` up to the root.
    ///
    /// Every node on the path gets one more visit and folds its own reward
    /// (from its owner's perspective) into the running mean.
    pub fn backpropagate(&mut self, leaf_id: NodeId, winner: Option<PlayerId>, rewards: &Rewards) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.record(winner, rewards);
            current_id = node.parent;
        }
    }

    /// Find a child of the root whose position equals `state`.
    pub fn find_root_child(&self, state: &S) -> Option<NodeId> {
        self.get(self.root)
            .children
            .iter()
            .copied()
            .find(|&id| self.get(id).state == *state)
    }

    /// Make `new_root` the root, dropping every node outside its subtree.
    ///
    /// The surviving nodes are copied into a fresh arena in breadth-first
    /// order, so the new root ends up at index 0 and ids are remapped.
    /// Statistics and untried-action lists are carried over unchanged.
    pub fn reroot(&mut self, new_root: NodeId) {
        if new_root == self.root {
            return;
        }

        // Pass 1: breadth-first order of the retained subtree
        let mut order = Vec::new();
        let mut queue = VecDeque::from([new_root]);
        while let Some(id) = queue.pop_front() {
            order.push(id);
            queue.extend(self.get(id).children.iter().copied());
        }

        let mut remap = vec![NodeId::NONE; self.nodes.len()];
        for (new_index, old_id) in order.iter().enumerate() {
            remap[old_id.index()] = NodeId(new_index as u32);
        }

        // Pass 2: move nodes into the new arena
        let mut old_nodes: Vec<Option<SearchNode<S>>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();
        let mut nodes = Vec::with_capacity(order.len());
        for old_id in order {
            if let Some(mut node) = old_nodes[old_id.index()].take() {
                node.parent = if old_id == new_root {
                    NodeId::NONE
                } else {
                    remap[node.parent.index()]
                };
                for child in &mut node.children {
                    *child = remap[child.index()];
                }
                nodes.push(node);
            }
        }

        self.nodes = nodes;
        self.root = NodeId(0);
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_value: root.action_value,
            max_depth: self.compute_max_depth(),
        }
    }

    fn compute_max_depth(&self) -> u32 {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0u32)];

        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(self.get(id).children.iter().map(|&c| (c, depth + 1)));
        }

        max_depth
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f64,
    pub max_depth: u32,
}
