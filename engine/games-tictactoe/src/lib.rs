//! TicTacToe game implementation for the UCT engine
//!
//! This crate provides a complete reference implementation of TicTacToe
//! demonstrating how to implement the `GameState` trait for the search engine.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::GameState;
//! use games_tictactoe::{Action, State};
//!
//! let mut state = State::new();
//! state.apply(&Action::Place(4));
//! assert_eq!(state.legal_actions().len(), 8);
//! ```

use engine_core::{GameState, PlayerId};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use std::fmt;

/// TicTacToe game state
///
/// Represents the complete state of a TicTacToe game including the board,
/// current player, and winner information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State {
    /// Board representation: 0=empty, 1=X, 2=O
    board: [u8; 9],
    /// Current player: 1=X, 2=O
    current_player: u8,
    /// Winner: 0=none/ongoing, 1=X, 2=O, 3=draw
    winner: u8,
}

impl State {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [0; 9],
            current_player: 1, // X goes first
            winner: 0,
        }
    }

    /// Build a state by playing `positions` in order from the empty board.
    ///
    /// Invalid positions are ignored, matching `make_move`.
    pub fn from_moves(positions: &[u8]) -> Self {
        positions
            .iter()
            .fold(Self::new(), |state, &pos| state.make_move(pos))
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner != 0
    }

    /// Player to move next
    pub fn to_move(&self) -> PlayerId {
        cell_owner(self.current_player)
    }

    /// Contents of a square: `None` if empty.
    pub fn cell(&self, position: u8) -> Option<PlayerId> {
        match self.board.get(position as usize) {
            Some(&cell) if cell != 0 => Some(cell_owner(cell)),
            _ => None,
        }
    }

    /// Get legal moves (empty positions)
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..9u8)
            .filter(|&pos| self.board[pos as usize] == 0)
            .collect()
    }

    /// Bit-mask representation of legal moves.
    ///
    /// Bits 0-8 correspond to board positions 0-8. A bit set to 1 indicates the
    /// position is currently legal. When the game is finished the mask is zeroed.
    pub fn legal_moves_mask(&self) -> u16 {
        if self.is_done() {
            return 0;
        }

        self.board
            .iter()
            .enumerate()
            .fold(0u16, |mask, (idx, cell)| {
                if *cell == 0 {
                    mask | (1u16 << idx)
                } else {
                    mask
                }
            })
    }

    /// Make a move and return the new state
    pub fn make_move(&self, position: u8) -> State {
        if self.is_done() || position >= 9 || self.board[position as usize] != 0 {
            return *self; // Invalid move, return unchanged state
        }

        let mut new_state = *self;
        new_state.board[position as usize] = self.current_player;

        // Check for winner
        new_state.winner = Self::check_winner(&new_state.board);

        // Switch player if game not over
        if new_state.winner == 0 {
            new_state.current_player = if self.current_player == 1 { 2 } else { 1 };
        }

        new_state
    }

    /// Check for winner on the board
    fn check_winner(board: &[u8; 9]) -> u8 {
        // Winning positions (rows, columns, diagonals)
        const LINES: [[usize; 3]; 8] = [
            [0, 1, 2],
            [3, 4, 5],
            [6, 7, 8], // rows
            [0, 3, 6],
            [1, 4, 7],
            [2, 5, 8], // columns
            [0, 4, 8],
            [2, 4, 6], // diagonals
        ];

        for line in &LINES {
            let [a, b, c] = *line;
            if board[a] != 0 && board[a] == board[b] && board[b] == board[c] {
                return board[a]; // Return the winning player
            }
        }

        // Check for draw (board full but no winner)
        if board.iter().all(|&cell| cell != 0) {
            return 3; // Draw
        }

        0 // Game ongoing
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            let cells: Vec<char> = (0..3)
                .map(|col| match self.board[row * 3 + col] {
                    1 => 'X',
                    2 => 'O',
                    _ => '.',
                })
                .collect();
            writeln!(f, "{} {} {}", cells[0], cells[1], cells[2])?;
        }
        Ok(())
    }
}

/// X (cell value 1) moves first.
fn cell_owner(cell: u8) -> PlayerId {
    if cell == 1 {
        PlayerId::FIRST
    } else {
        PlayerId::SECOND
    }
}

/// TicTacToe action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Place a piece at the given position (0-8)
    Place(u8),
}

impl Action {
    /// Get the position for this action
    pub fn position(&self) -> u8 {
        match self {
            Action::Place(pos) => *pos,
        }
    }
}

impl GameState for State {
    type Action = Action;

    fn apply(&mut self, action: &Action) {
        *self = self.make_move(action.position());
    }

    fn is_over(&self) -> bool {
        self.is_done()
    }

    fn winner(&self) -> Option<PlayerId> {
        match self.winner {
            1 | 2 => Some(cell_owner(self.winner)),
            _ => None, // Draw (or still running)
        }
    }

    fn legal_actions(&self) -> Vec<Action> {
        self.legal_moves().into_iter().map(Action::Place).collect()
    }

    /// Samples straight from the legal-move mask so rollouts never allocate.
    fn random_legal_action(&self, rng: &mut ChaCha20Rng) -> Option<Action> {
        let mask = self.legal_moves_mask();
        let count = mask.count_ones();
        if count == 0 {
            return None;
        }

        let mut skip = rng.gen_range(0..count);
        for pos in 0..9u8 {
            if mask & (1u16 << pos) != 0 {
                if skip == 0 {
                    return Some(Action::Place(pos));
                }
                skip -= 1;
            }
        }
        None
    }
}
