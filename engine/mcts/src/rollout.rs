//! Uniformly random playouts.
//!
//! A rollout copies the position once and plays random legal moves on the
//! copy until the game ends. No tree nodes are created.

use engine_core::{GameState, PlayerId};
use rand_chacha::ChaCha20Rng;

use crate::search::SearchError;

/// Play uniformly random moves from `state` to the end of the game.
///
/// Returns the winner (`None` for a draw). A position that is not over but
/// offers no legal move breaks the `GameState` contract and is reported as
/// `SearchError::InvalidState`.
pub fn rollout<S: GameState>(
    state: &S,
    rng: &mut ChaCha20Rng,
) -> Result<Option<PlayerId>, SearchError> {
    let mut playout = state.clone();

    while !playout.is_over() {
        let action = playout.random_legal_action(rng).ok_or_else(|| {
            SearchError::InvalidState(format!(
                "position is not over but has no legal action: {:?}",
                playout
            ))
        })?;
        playout.apply(&action);
    }

    Ok(playout.winner())
}
