//! Static position evaluation.
//!
//! Terms are accumulated from White's point of view and flipped for Black
//! at the end, so the returned score is always from the side to move.

use chess_core::{
    chebyshev_distance, file_of, legal_moves_into, rank_of, sq, Color, Move, PieceKind, Position,
    Square,
};

use crate::pst::square_bonus;

/// Score of a forced mate. Everything else stays far below it.
pub const INFINITY: i32 = 1_000_000;

const CENTER: [Square; 4] = [27, 28, 35, 36]; // d4 e4 d5 e5
const CENTER_BONUS: i32 = 10;

const DOUBLED_PAWN: i32 = -20;
const ISOLATED_PAWN: i32 = -15;
const PASSED_PAWN: i32 = 50;
const BACKWARD_PAWN: i32 = -10;

const SHIELD_PAWN: i32 = 10;
const TROPISM: i32 = 15;
const BISHOP_PAIR: i32 = 50;

/// Returns the material value of a piece in centipawns. Bishops are worth
/// slightly more than knights.
#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 325,
        PieceKind::Bishop => 335,
        PieceKind::Rook => 500,
        PieceKind::Queen => 975,
        PieceKind::King => 20_000,
    }
}

fn mobility_weight(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Bishop => 5,
        PieceKind::Knight => 3,
        PieceKind::Rook => 2,
        PieceKind::Queen => 1,
        PieceKind::Pawn | PieceKind::King => 0,
    }
}

/// No queens left, or both sides keep a queen with at most six non-pawn,
/// non-king pieces on the board.
pub fn is_endgame(pos: &Position) -> bool {
    let white_queens = pos.count(Color::White, PieceKind::Queen);
    let black_queens = pos.count(Color::Black, PieceKind::Queen);
    if white_queens + black_queens == 0 {
        return true;
    }
    let officers = pos
        .pieces()
        .filter(|(_, pc)| !matches!(pc.kind, PieceKind::Pawn | PieceKind::King))
        .count();
    white_queens > 0 && black_queens > 0 && officers <= 6
}

/// Evaluates the position from the side-to-move's perspective.
///
/// A mated side to move scores `-INFINITY`; stalemate and insufficient
/// material score 0. `pos` is never modified; move generation runs on a
/// scratch copy.
pub fn evaluate(pos: &Position) -> i32 {
    let mover = pos.side_to_move;
    let mut scratch = pos.clone();

    // Legal moves of each side as if it were to move.
    let mut moves: [Vec<Move>; 2] = [Vec::with_capacity(64), Vec::with_capacity(64)];
    legal_moves_into(&mut scratch, &mut moves[mover.idx()]);
    if moves[mover.idx()].is_empty() {
        return if pos.in_check(mover) { -INFINITY } else { 0 };
    }
    if pos.is_insufficient_material() {
        return 0;
    }
    let null = scratch.make_null_move();
    legal_moves_into(&mut scratch, &mut moves[mover.other().idx()]);
    scratch.unmake_null_move(null);

    let score = piece_terms(pos, is_endgame(pos))
        + mobility(pos, &moves)
        + development(pos)
        + pawn_structure(pos)
        + king_safety(pos, &moves)
        + bishop_pair(pos)
        + center_control(pos);

    score * mover.sign()
}

/// Material, piece-square tables and the per-piece placement bonuses.
fn piece_terms(pos: &Position, endgame: bool) -> i32 {
    let pawns = pos.count(Color::White, PieceKind::Pawn) + pos.count(Color::Black, PieceKind::Pawn);
    let mut score = 0;

    for (s, pc) in pos.pieces() {
        let mut bonus = square_bonus(pc, s, endgame);
        if CENTER.contains(&s) {
            bonus += CENTER_BONUS;
        }
        match pc.kind {
            // Knights like closed positions, bishops open ones.
            PieceKind::Knight if pawns > 10 => bonus += 15,
            PieceKind::Bishop => {
                if pawns < 10 {
                    bonus += 15;
                }
                if on_long_diagonal(s) {
                    bonus += 10;
                }
            }
            PieceKind::Rook => {
                if file_is_open(pos, file_of(s)) {
                    bonus += 25;
                }
                if rank_of(s) == pc.color.back_rank() + 6 * pc.color.forward() {
                    bonus += 20;
                }
            }
            PieceKind::Queen if pos.fullmove_number < 10 && !on_queen_home(s, pc.color) => {
                bonus -= 15
            }
            _ => {}
        }
        score += pc.color.sign() * (piece_value(pc.kind) + bonus);
    }
    score
}

fn on_long_diagonal(s: Square) -> bool {
    file_of(s) == rank_of(s) || file_of(s) + rank_of(s) == 7
}

fn file_is_open(pos: &Position, file: i8) -> bool {
    (0..8).all(|rank| {
        sq(file, rank)
            .and_then(|s| pos.piece_at(s))
            .map_or(true, |pc| pc.kind != PieceKind::Pawn)
    })
}

fn on_queen_home(s: Square, c: Color) -> bool {
    rank_of(s) == c.back_rank() && (file_of(s) == 3 || file_of(s) == 4)
}

fn mobility(pos: &Position, moves: &[Vec<Move>; 2]) -> i32 {
    Color::BOTH
        .iter()
        .map(|&c| {
            let list = &moves[c.idx()];
            let piece_bonus: i32 = list
                .iter()
                .filter_map(|m| pos.piece_at(m.from))
                .map(|pc| mobility_weight(pc.kind) * 2)
                .sum();
            c.sign() * (list.len() as i32 * 5 + piece_bonus)
        })
        .sum()
}

/// Opening development: minor pieces off their home squares and king
/// safety through castling. Only counted before move 15.
fn development(pos: &Position) -> i32 {
    if pos.fullmove_number >= 15 {
        return 0;
    }
    let mut score = 0;
    for c in Color::BOTH {
        let home = c.back_rank();
        let mut side = 0;
        for (s, pc) in pos.pieces() {
            if pc.color != c {
                continue;
            }
            let home_files: &[i8] = match pc.kind {
                PieceKind::Knight => &[1, 6],
                PieceKind::Bishop => &[2, 5],
                _ => continue,
            };
            if !(rank_of(s) == home && home_files.contains(&file_of(s))) {
                side += 20;
            }
        }
        if pos.castling.any(c) {
            side += 15;
        } else if let Some(k) = pos.king_sq(c) {
            if rank_of(k) == home && (file_of(k) == 6 || file_of(k) == 2) {
                side += 10;
            }
        }
        score += c.sign() * side;
    }
    score
}

/// Doubled, isolated, passed and backward pawns for both sides.
pub(crate) fn pawn_structure(pos: &Position) -> i32 {
    let mut per_file = [[0u8; 8]; 2];
    for (s, pc) in pos.pieces() {
        if pc.kind == PieceKind::Pawn {
            per_file[pc.color.idx()][file_of(s) as usize] += 1;
        }
    }

    let mut score = 0;
    for c in Color::BOTH {
        let files = &per_file[c.idx()];
        let mut side = 0;
        for f in 0..8 {
            if files[f] > 1 {
                side += DOUBLED_PAWN;
            }
            let neighbours = (f > 0 && files[f - 1] > 0) || (f < 7 && files[f + 1] > 0);
            if files[f] > 0 && !neighbours {
                side += ISOLATED_PAWN;
            }
        }
        for (s, pc) in pos.pieces() {
            if pc.kind != PieceKind::Pawn || pc.color != c {
                continue;
            }
            // A pawn can be passed and backward at the same time; both count.
            if !pawn_ahead(pos, s, c, c.other(), &[-1, 0, 1]) {
                side += PASSED_PAWN;
            }
            if pawn_ahead(pos, s, c, c, &[-1, 1]) {
                side += BACKWARD_PAWN;
            }
        }
        score += c.sign() * side;
    }
    score
}

/// Whether a pawn of `owner` stands on one of the file offsets `dfs` from
/// `s`, on any rank strictly ahead of `s` as seen by `c`.
fn pawn_ahead(pos: &Position, s: Square, c: Color, owner: Color, dfs: &[i8]) -> bool {
    let f = file_of(s);
    let mut r = rank_of(s) + c.forward();
    while (0..8).contains(&r) {
        for &df in dfs {
            if let Some(t) = sq(f + df, r) {
                if matches!(pos.piece_at(t), Some(pc) if pc.kind == PieceKind::Pawn && pc.color == owner)
                {
                    return true;
                }
            }
        }
        r += c.forward();
    }
    false
}

/// Pawn shield, enemy piece tropism and king-side mobility.
pub(crate) fn king_safety(pos: &Position, moves: &[Vec<Move>; 2]) -> i32 {
    let mut score = 0;
    for c in Color::BOTH {
        let Some(k) = pos.king_sq(c) else {
            continue;
        };
        let mut side = 0;

        for df in -1..=1 {
            for step in 1..=2 {
                let Some(s) = sq(file_of(k) + df, rank_of(k) + step * c.forward()) else {
                    continue;
                };
                if matches!(pos.piece_at(s), Some(pc) if pc.kind == PieceKind::Pawn && pc.color == c) {
                    side += SHIELD_PAWN;
                }
            }
        }

        for (s, pc) in pos.pieces() {
            let attacker = matches!(
                pc.kind,
                PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
            );
            if attacker && pc.color != c {
                side -= TROPISM / chebyshev_distance(k, s);
            }
        }

        side += moves[c.idx()].len() as i32 / 2;
        score += c.sign() * side;
    }
    score
}

fn bishop_pair(pos: &Position) -> i32 {
    Color::BOTH
        .iter()
        .filter(|&&c| pos.count(c, PieceKind::Bishop) >= 2)
        .map(|c| c.sign() * BISHOP_PAIR)
        .sum()
}

fn center_control(pos: &Position) -> i32 {
    CENTER
        .iter()
        .map(|&s| {
            let white = pos.attackers_count(s, Color::White) as i32;
            let black = pos.attackers_count(s, Color::Black) as i32;
            5 * (white - black)
        })
        .sum()
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
