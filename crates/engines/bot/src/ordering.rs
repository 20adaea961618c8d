//! Move ordering: captures by MVV-LVA, then killer moves, with history
//! weights added on top.

use std::cmp::Reverse;

use chess_core::{is_capture, Move, PieceKind, Position};

use crate::tables::{HistoryTable, KillerTable};

const CAPTURE_BASE: i32 = 10_000;
const KILLER_PRIMARY: i32 = 9_000;
const KILLER_SECONDARY: i32 = 8_000;

pub fn move_score(
    pos: &Position,
    mv: Move,
    depth: i32,
    killers: &KillerTable,
    history: &HistoryTable,
) -> i32 {
    let base = if is_capture(pos, mv) {
        // En passant lands on an empty square; the victim is a pawn.
        let victim = pos
            .piece_at(mv.to)
            .map_or(PieceKind::Pawn, |pc| pc.kind);
        let attacker = pos.piece_at(mv.from).map_or(PieceKind::Pawn, |pc| pc.kind);
        CAPTURE_BASE + 100 * victim.rank() - attacker.rank()
    } else {
        match killers.get(depth) {
            [Some(k), _] if k == mv => KILLER_PRIMARY,
            [_, Some(k)] if k == mv => KILLER_SECONDARY,
            _ => 0,
        }
    };
    base.saturating_add(history.get(mv))
}

/// Sort `moves` best-first. The sort is stable, so equal scores keep the
/// generator's order.
pub fn order_moves(
    pos: &Position,
    moves: &mut [Move],
    depth: i32,
    killers: &KillerTable,
    history: &HistoryTable,
) {
    moves.sort_by_cached_key(|&mv| Reverse(move_score(pos, mv, depth, killers, history)));
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
