//! Self-play match between two UCT engines.

use anyhow::{anyhow, Result};
use engine_core::{GameState, PlayerId};
use games_tictactoe::State;
use indicatif::{ProgressBar, ProgressStyle};
use mcts::{Engine, MctsConfig};
use std::time::Instant;
use tracing::{debug, info};

use crate::config::Config;

/// The two competing engines. `A` moves first in even-numbered games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

/// Outcome and search effort of one game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub winner: Option<Side>,
    /// Seat that won, independent of which engine sat there
    pub winning_player: Option<PlayerId>,
    pub moves: u32,
    pub iterations: u64,
    pub reused: u32,
    pub fallbacks: u32,
}

/// Running totals across a match.
#[derive(Debug, Default, Clone)]
pub struct MatchSummary {
    pub games: u32,
    pub wins_a: u32,
    pub wins_b: u32,
    pub draws: u32,
    /// Wins indexed by seat (`PlayerId::index`)
    pub wins_by_seat: [u32; 2],
    pub moves: u32,
    pub iterations: u64,
    pub reused: u32,
    pub fallbacks: u32,
}

impl MatchSummary {
    fn add(&mut self, record: &GameRecord) {
        self.games += 1;
        match record.winner {
            Some(Side::A) => self.wins_a += 1,
            Some(Side::B) => self.wins_b += 1,
            None => self.draws += 1,
        }
        if let Some(player) = record.winning_player {
            self.wins_by_seat[player.index()] += 1;
        }
        self.moves += record.moves;
        self.iterations += record.iterations;
        self.reused += record.reused;
        self.fallbacks += record.fallbacks;
    }

    /// Mean iterations per engine move.
    pub fn avg_iterations(&self) -> f64 {
        if self.moves == 0 {
            0.0
        } else {
            self.iterations as f64 / self.moves as f64
        }
    }

    fn log(&self) {
        info!(
            games = self.games,
            wins_a = self.wins_a,
            wins_b = self.wins_b,
            draws = self.draws,
            first_seat_wins = self.wins_by_seat[PlayerId::FIRST.index()],
            second_seat_wins = self.wins_by_seat[PlayerId::SECOND.index()],
            avg_iterations = format!("{:.1}", self.avg_iterations()),
            reused = self.reused,
            fallbacks = self.fallbacks,
            "Match results"
        );
    }
}

pub struct Actor {
    config: Config,
    mcts_config: MctsConfig,
}

impl Actor {
    pub fn new(config: Config) -> Self {
        let mcts_config = config.mcts_config();
        info!(
            exploration = mcts_config.exploration_constant,
            budget = ?mcts_config.budget,
            opening_budget = ?mcts_config.opening_budget,
            persistent = mcts_config.persistent,
            "Engine configuration"
        );

        Self {
            config,
            mcts_config,
        }
    }

    /// Play every configured game and return the totals.
    pub fn run(&self) -> Result<MatchSummary> {
        info!(
            games = self.config.games,
            seed = self.config.seed,
            "Starting match"
        );

        // Progress bar only when stderr is a TTY
        let progress = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            let pb = ProgressBar::new(self.config.games as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} games ({eta})")?
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut summary = MatchSummary::default();

        for game_index in 0..self.config.games {
            let started = Instant::now();
            let record = self.play_game(game_index)?;
            summary.add(&record);

            debug!(
                game = game_index + 1,
                winner = ?record.winner,
                moves = record.moves,
                duration = started.elapsed().as_secs_f64(),
                "Game finished"
            );

            if let Some(ref pb) = progress {
                pb.inc(1);
            }

            if self.config.log_interval > 0 && summary.games % self.config.log_interval == 0 {
                // Suspend progress bar while logging to avoid visual glitches
                match progress {
                    Some(ref pb) => pb.suspend(|| summary.log()),
                    None => summary.log(),
                }
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message("done");
        }

        Ok(summary)
    }

    /// Play one game with freshly built engines.
    pub fn play_game(&self, game_index: u32) -> Result<GameRecord> {
        let a_player = if game_index % 2 == 0 {
            PlayerId::FIRST
        } else {
            PlayerId::SECOND
        };
        let base_seed = self
            .config
            .seed
            .wrapping_add(2 * game_index as u64);

        let mut engine_a: Engine<State> =
            Engine::with_seed(a_player, self.mcts_config.clone(), base_seed);
        let mut engine_b: Engine<State> = Engine::with_seed(
            a_player.opponent(),
            self.mcts_config.clone(),
            base_seed.wrapping_add(1),
        );

        let mut state = State::new();
        let mut record = GameRecord {
            winner: None,
            winning_player: None,
            moves: 0,
            iterations: 0,
            reused: 0,
            fallbacks: 0,
        };

        while !state.is_over() {
            let (side, engine) = if state.to_move() == a_player {
                (Side::A, &mut engine_a)
            } else {
                (Side::B, &mut engine_b)
            };

            let result = engine.search(&state, None)?;
            if !state.legal_actions().contains(&result.action) {
                return Err(anyhow!(
                    "engine {:?} chose illegal move {:?}",
                    side,
                    result.action
                ));
            }

            debug!(
                game = game_index + 1,
                side = ?side,
                player = %state.to_move(),
                action = result.action.position(),
                value = result.value,
                iterations = result.iterations,
                root_visits = result.root_visits,
                reused = result.reused,
                "Move"
            );

            state.apply(&result.action);
            record.moves += 1;
            record.iterations += result.iterations as u64;
            record.reused += result.reused as u32;
            record.fallbacks += result.fallback as u32;
        }

        debug!(game = game_index + 1, "\n{}", state);

        record.winning_player = state.winner();
        record.winner = state.winner().map(|winner| {
            if winner == a_player {
                Side::A
            } else {
                Side::B
            }
        });

        Ok(record)
    }
}
