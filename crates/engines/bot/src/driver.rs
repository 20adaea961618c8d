//! Iterative deepening under a wall-clock budget.

use std::time::Duration;

use chess_core::{legal_moves, move_to_uci, Move, Position};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::eval::INFINITY;
use crate::search::Searcher;

/// Scores beyond this are treated as a found mate and end the deepening.
const DECISIVE_SCORE: i32 = 5_000;

/// Per-request search limits, usually derived from a strength profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchLimits {
    pub max_depth: i32,
    pub budget: Duration,
    pub use_book: bool,
    /// Chance of playing a uniformly random legal move instead of searching.
    pub random_odds: f64,
}

impl SearchLimits {
    pub fn depth_and_time(max_depth: i32, budget: Duration) -> Self {
        Self {
            max_depth,
            budget,
            use_book: false,
            random_odds: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    Book,
    Random,
    Search,
    /// Nothing completed; the first legal move was played.
    Fallback,
}

/// Outcome of [`Searcher::choose_move`].
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub best_move: Move,
    pub score: i32,
    /// Deepest completed iteration that produced the move (0 if none).
    pub depth: i32,
    pub nodes: u64,
    pub elapsed: Duration,
    pub source: MoveSource,
}

impl Searcher {
    /// Pick a move for the side to move within `limits`.
    ///
    /// # Arguments
    /// * `pos` - Position to move in; left unchanged
    /// * `limits` - Depth cap, time budget, book use and random-move odds
    ///
    /// # Returns
    /// A [`SearchReport`] with the move and where it came from, or `None`
    /// only when the side to move has no legal move. Running out of time is
    /// never an error: the best move of the last completed iteration is
    /// returned, or the first legal move if none completed.
    pub fn choose_move(&mut self, pos: &mut Position, limits: &SearchLimits) -> Option<SearchReport> {
        self.nodes = 0;
        self.use_book = limits.use_book;
        self.clock.start(Some(limits.budget));

        let legal = legal_moves(pos);
        let first = *legal.first()?;

        if let Some(mv) = self.probe_book(pos) {
            return Some(self.report(mv, 0, 0, MoveSource::Book));
        }
        if limits.random_odds > 0.0 && self.rng.gen_bool(limits.random_odds.min(1.0)) {
            let mv = legal.choose(&mut self.rng).copied().unwrap_or(first);
            return Some(self.report(mv, 0, 0, MoveSource::Random));
        }

        let mut best: Option<(Move, i32, i32)> = None;

        // Depth 1 always completes, whatever the budget.
        self.clock.disarm();
        let first_iteration = self.negamax(pos, 1, -INFINITY, INFINITY, true);
        self.clock.arm();
        let mut decisive = false;
        match first_iteration {
            Ok((score, mv)) => {
                if let Some(mv) = mv {
                    best = Some((mv, score, 1));
                }
                decisive = score.abs() > DECISIVE_SCORE;
                debug!(depth = 1, score, nodes = self.nodes, "iteration complete");
            }
            Err(_) => debug!("search stopped during depth 1"),
        }

        if !decisive {
            for depth in 2..=limits.max_depth {
                if !self.clock.has_time() {
                    break;
                }
                match self.negamax(pos, depth, -INFINITY, INFINITY, true) {
                    Ok((score, mv)) => {
                        if let Some(mv) = mv {
                            best = Some((mv, score, depth));
                        }
                        debug!(
                            depth,
                            score,
                            nodes = self.nodes,
                            best = ?mv.map(move_to_uci),
                            "iteration complete"
                        );
                        if score.abs() > DECISIVE_SCORE {
                            break;
                        }
                    }
                    Err(_) => {
                        debug!(depth, "out of time");
                        break;
                    }
                }
            }
        }

        Some(match best {
            Some((mv, score, depth)) => self.report(mv, score, depth, MoveSource::Search),
            None => self.report(first, 0, 0, MoveSource::Fallback),
        })
    }

    fn report(&self, best_move: Move, score: i32, depth: i32, source: MoveSource) -> SearchReport {
        SearchReport {
            best_move,
            score,
            depth,
            nodes: self.nodes,
            elapsed: self.clock.elapsed(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod driver_tests;
