//! Negamax search with alpha-beta pruning, null-move pruning and a widened
//! window at high depths.

use chess_core::{is_capture, legal_moves_into, Move, Position};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::book::OpeningBook;
use crate::clock::{Cancelled, SearchClock, StopHandle};
use crate::eval::{is_endgame, INFINITY};
use crate::ordering::order_moves;
use crate::tables::{HistoryTable, KillerTable, MAX_DEPTH};

const NULL_MOVE_REDUCTION: i32 = 3;
const ASPIRATION_DEPTH: i32 = 6;
const ASPIRATION_MARGIN: i32 = 50;

/// One search instance. Owns its killer/history tables, which persist
/// across calls, so it must not be shared between concurrent searches.
#[derive(Debug)]
pub struct Searcher {
    pub(crate) killers: KillerTable,
    pub(crate) history: HistoryTable,
    pub(crate) clock: SearchClock,
    pub(crate) nodes: u64,
    pub(crate) book: OpeningBook,
    pub(crate) use_book: bool,
    pub(crate) rng: StdRng,
}

impl Searcher {
    pub fn new(book: OpeningBook, rng: StdRng) -> Self {
        Self {
            killers: KillerTable::new(),
            history: HistoryTable::new(),
            clock: SearchClock::new(None),
            nodes: 0,
            book,
            use_book: true,
            rng,
        }
    }

    /// Standard book; seeded for reproducible play when `seed` is given.
    pub fn with_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self::new(OpeningBook::standard(), rng)
    }

    pub fn killers(&self) -> &KillerTable {
        &self.killers
    }

    pub fn history(&self) -> &HistoryTable {
        &self.history
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.clock.stop_handle()
    }

    /// Forget killer and history data, e.g. between games.
    pub fn clear_tables(&mut self) {
        self.killers.clear();
        self.history.clear();
    }

    pub(crate) fn probe_book(&mut self, pos: &Position) -> Option<Move> {
        if !self.use_book {
            return None;
        }
        self.book.pick(pos, &mut self.rng)
    }

    /// Negamax search to `depth` plies, scored from the side to move.
    ///
    /// # Arguments
    /// * `pos` - Position to search; mutated during the search and restored
    ///   before returning, also when `Cancelled` propagates
    /// * `depth` - Remaining plies; at 0 the capture-only search takes over
    /// * `alpha`, `beta` - Search window
    /// * `allow_null` - Whether a null move may be tried at this node
    ///
    /// # Returns
    /// The best score and move. The move is `None` at leaves, after a
    /// null-move cutoff, and when no move beats `-INFINITY`. `Err(Cancelled)`
    /// when the clock ran out or a stop was requested.
    pub fn negamax(
        &mut self,
        pos: &mut Position,
        depth: i32,
        mut alpha: i32,
        mut beta: i32,
        allow_null: bool,
    ) -> Result<(i32, Option<Move>), Cancelled> {
        self.nodes += 1;
        self.clock.poll(self.nodes)?;

        if depth == MAX_DEPTH {
            if let Some(mv) = self.probe_book(pos) {
                return Ok((0, Some(mv)));
            }
        }

        if depth <= 0 {
            return Ok((self.quiescence(pos, alpha, beta, 0)?, None));
        }

        let mover = pos.side_to_move;
        if allow_null && depth >= NULL_MOVE_REDUCTION && !pos.in_check(mover) && !is_endgame(pos) {
            let null = pos.make_null_move();
            let res = self.negamax(pos, depth - NULL_MOVE_REDUCTION, -beta, -beta + 1, false);
            pos.unmake_null_move(null);
            let (score, _) = res?;
            if -score >= beta {
                return Ok((beta, None));
            }
        }

        let mut moves = Vec::with_capacity(64);
        legal_moves_into(pos, &mut moves);
        if moves.is_empty() {
            let score = if pos.in_check(mover) { -INFINITY } else { 0 };
            return Ok((score, None));
        }
        order_moves(pos, &mut moves, depth, &self.killers, &self.history);

        (alpha, beta) = widen_window(depth, alpha, beta);

        let mut best_score = -INFINITY;
        let mut best_move = None;
        for mv in moves {
            let quiet = !is_capture(pos, mv);
            let undo = pos.make_move(mv);
            let res = self.negamax(pos, depth - 1, -beta, -alpha, allow_null);
            pos.unmake_move(mv, undo);
            let score = -res?.0;

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
                alpha = alpha.max(score);
                if quiet {
                    self.history.reward(mv, depth);
                }
            }
            if alpha >= beta {
                if quiet {
                    self.killers.store(depth, mv);
                }
                break;
            }
        }

        Ok((best_score, best_move))
    }
}

/// Deep nodes search a window widened by `ASPIRATION_MARGIN` on both sides.
/// A result outside it is taken as is, never re-searched.
pub(crate) fn widen_window(depth: i32, alpha: i32, beta: i32) -> (i32, i32) {
    if depth > ASPIRATION_DEPTH {
        (
            (alpha - ASPIRATION_MARGIN).max(-INFINITY),
            (beta + ASPIRATION_MARGIN).min(INFINITY),
        )
    } else {
        (alpha, beta)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
