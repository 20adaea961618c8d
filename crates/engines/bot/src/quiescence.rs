//! Capture-only search at the leaves of the main search.

use chess_core::{legal_captures_into, Position};

use crate::clock::Cancelled;
use crate::eval::evaluate;
use crate::ordering::order_moves;
use crate::search::Searcher;

/// Quiescence depth counts down from 0; below this it stops extending.
const QUIESCENCE_FLOOR: i32 = -4;

impl Searcher {
    /// Capture-only search below the main search horizon.
    ///
    /// # Arguments
    /// * `pos` - Position to search, restored before returning
    /// * `alpha`, `beta` - Search window
    /// * `depth` - 0 on entry, one lower per capture; stops at the floor
    ///
    /// # Returns
    /// A score from the side to move, at least the static evaluation unless
    /// it fails high at `beta`. `Err(Cancelled)` when the search was stopped.
    pub fn quiescence(
        &mut self,
        pos: &mut Position,
        mut alpha: i32,
        beta: i32,
        depth: i32,
    ) -> Result<i32, Cancelled> {
        self.nodes += 1;
        self.clock.poll(self.nodes)?;

        let stand_pat = evaluate(pos);
        if stand_pat >= beta {
            return Ok(beta);
        }
        alpha = alpha.max(stand_pat);
        if depth < QUIESCENCE_FLOOR {
            return Ok(stand_pat);
        }

        let mut captures = Vec::with_capacity(16);
        legal_captures_into(pos, &mut captures);
        order_moves(pos, &mut captures, depth, &self.killers, &self.history);

        for mv in captures {
            let undo = pos.make_move(mv);
            let res = self.quiescence(pos, -beta, -alpha, depth - 1);
            pos.unmake_move(mv, undo);
            let score = -res?;

            if score >= beta {
                return Ok(beta);
            }
            alpha = alpha.max(score);
        }
        Ok(alpha)
    }
}

#[cfg(test)]
#[path = "quiescence_tests.rs"]
mod quiescence_tests;
