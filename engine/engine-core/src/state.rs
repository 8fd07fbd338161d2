//! Game-state trait consumed by the search engine
//!
//! The engine treats states as opaque values that can be copied, compared,
//! advanced and asked about their outcome. Rules, move generation and board
//! representation stay with the game.

use crate::player::PlayerId;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use std::fmt::Debug;

/// Main trait for searchable game positions
///
/// A value of the implementing type is one complete position. The search
/// engine relies on the following guarantees:
///
/// * `Clone` produces an independent deep copy; mutating the copy never
///   affects the original.
/// * `PartialEq` is exact structural equality. The engine uses it to
///   recognise a position it has already explored.
/// * `legal_actions` returns the same actions in the same order every time it
///   is called on equal states.
///
/// # Example
///
/// ```rust
/// use engine_core::{GameState, PlayerId};
///
/// /// Players alternately take one or two stones; taking the last one wins.
/// #[derive(Debug, Clone, PartialEq)]
/// struct Stones {
///     remaining: u8,
///     to_move: PlayerId,
///     winner: Option<PlayerId>,
/// }
///
/// impl GameState for Stones {
///     type Action = u8;
///
///     fn apply(&mut self, take: &u8) {
///         self.remaining -= take;
///         if self.remaining == 0 {
///             self.winner = Some(self.to_move);
///         }
///         self.to_move = self.to_move.opponent();
///     }
///
///     fn is_over(&self) -> bool {
///         self.remaining == 0
///     }
///
///     fn winner(&self) -> Option<PlayerId> {
///         self.winner
///     }
///
///     fn legal_actions(&self) -> Vec<u8> {
///         (1..=self.remaining.min(2)).collect()
///     }
/// }
///
/// let mut stones = Stones { remaining: 2, to_move: PlayerId::FIRST, winner: None };
/// assert_eq!(stones.legal_actions(), vec![1, 2]);
/// stones.apply(&2);
/// assert!(stones.is_over());
/// assert_eq!(stones.winner(), Some(PlayerId::FIRST));
/// ```
pub trait GameState: Clone + PartialEq + Debug {
    /// Action type - treated as an opaque edge label by the engine
    type Action: Clone + PartialEq + Debug;

    /// Play `action` in place.
    ///
    /// Only legal actions are ever passed in; behaviour for illegal actions
    /// is up to the game.
    fn apply(&mut self, action: &Self::Action);

    /// True when no further moves are possible (win or draw reached).
    fn is_over(&self) -> bool;

    /// Winner of a finished game, `None` for a draw.
    ///
    /// Only meaningful when `is_over()` returns true.
    fn winner(&self) -> Option<PlayerId>;

    /// All legal actions from this position, in a stable order.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// One legal action chosen uniformly at random, `None` if there is none.
    ///
    /// Used by rollouts. The default enumerates `legal_actions`; games with an
    /// expensive move generator can override it with a direct sampler.
    fn random_legal_action(&self, rng: &mut ChaCha20Rng) -> Option<Self::Action> {
        self.legal_actions().choose(rng).cloned()
    }
}
