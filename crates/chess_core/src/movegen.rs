use crate::board::{Position, DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS};
use crate::types::*;

const PROMOTIONS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the position only once.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);
    retain_legal(pos, out);
}

/// Legal moves of the piece standing on `from` (empty when it is not the
/// mover's piece).
pub fn legal_moves_from(pos: &Position, from: Square) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(28);
    if let Some(pc) = tmp.piece_at(from) {
        if pc.color == tmp.side_to_move {
            piece_moves(&tmp, from, pc, &mut out);
            retain_legal(&mut tmp, &mut out);
        }
    }
    out
}

/// Legal captures only, en passant included.
pub fn legal_captures_into(pos: &mut Position, out: &mut Vec<Move>) {
    legal_moves_into(pos, out);
    let pos: &Position = pos;
    out.retain(|&mv| is_capture(pos, mv));
}

/// True if `mv` removes an enemy piece in `pos` (en passant included).
pub fn is_capture(pos: &Position, mv: Move) -> bool {
    mv.is_en_passant || pos.piece_at(mv.to).is_some()
}

impl Position {
    /// Side to move is in check and has no legal move.
    pub fn is_checkmate(&self) -> bool {
        self.in_check(self.side_to_move) && !self.has_legal_move()
    }

    /// Side to move is not in check and has no legal move.
    pub fn is_stalemate(&self) -> bool {
        !self.in_check(self.side_to_move) && !self.has_legal_move()
    }

    pub fn has_legal_move(&self) -> bool {
        !legal_moves(self).is_empty()
    }
}

// Filter illegal moves in-place by playing them on the mutable position.
fn retain_legal(pos: &mut Position, out: &mut Vec<Move>) {
    let mover = pos.side_to_move;
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let illegal = pos.in_check(mover);
        pos.unmake_move(mv, undo);
        !illegal
    });
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    for (from, pc) in pos.pieces() {
        if pc.color == pos.side_to_move {
            piece_moves(pos, from, pc, out);
        }
    }
}

fn piece_moves(pos: &Position, from: Square, pc: Piece, out: &mut Vec<Move>) {
    match pc.kind {
        PieceKind::Pawn => gen_pawn(pos, from, pc.color, out),
        PieceKind::Knight => gen_steps(pos, from, pc.color, &KNIGHT_DELTAS, out),
        PieceKind::Bishop => gen_slider(pos, from, pc.color, &DIAGONALS, out),
        PieceKind::Rook => gen_slider(pos, from, pc.color, &ORTHOGONALS, out),
        PieceKind::Queen => {
            gen_slider(pos, from, pc.color, &DIAGONALS, out);
            gen_slider(pos, from, pc.color, &ORTHOGONALS, out);
        }
        PieceKind::King => {
            gen_steps(pos, from, pc.color, &KING_DELTAS, out);
            gen_castle(pos, from, pc.color, out);
        }
    }
}

fn push_pawn_move(from: Square, to: Square, c: Color, out: &mut Vec<Move>) {
    if rank_of(to) == c.other().back_rank() {
        out.extend(PROMOTIONS.iter().map(|&pk| Move::with_promo(from, to, pk)));
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    let dir = c.forward();
    let start_rank = c.back_rank() + dir;

    if let Some(to) = sq(f, r + dir) {
        if pos.piece_at(to).is_none() {
            push_pawn_move(from, to, c, out);
            if r == start_rank {
                if let Some(to2) = sq(f, r + 2 * dir) {
                    if pos.piece_at(to2).is_none() {
                        out.push(Move::new(from, to2));
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(target) if target.color != c => push_pawn_move(from, to, c, out),
            None if pos.en_passant == Some(to) => {
                let mut mv = Move::new(from, to);
                mv.is_en_passant = true;
                out.push(mv);
            }
            _ => {}
        }
    }
}

fn gen_steps(pos: &Position, from: Square, c: Color, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    for &(df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                Some(pc) if pc.color == c => {}
                _ => out.push(Move::new(from, to)),
            }
        }
    }
}

fn gen_slider(pos: &Position, from: Square, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    let f0 = file_of(from);
    let r0 = rank_of(from);
    for &(df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) => {
                    if pc.color != c {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
            f += df;
            r += dr;
        }
    }
}

fn gen_castle(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let home = c.back_rank() as u8 * 8;
    if from != home + 4 || pos.in_check(c) {
        return;
    }
    let enemy = c.other();
    let rook = Some(Piece::new(c, PieceKind::Rook));

    // King side: f/g empty and not attacked. Queen side: b/c/d empty, c/d not attacked.
    if pos.castling.kingside(c)
        && pos.piece_at(home + 7) == rook
        && all_empty(pos, home, &[5, 6])
        && none_attacked(pos, home, &[5, 6], enemy)
    {
        let mut mv = Move::new(from, home + 6);
        mv.is_castle = true;
        out.push(mv);
    }
    if pos.castling.queenside(c)
        && pos.piece_at(home) == rook
        && all_empty(pos, home, &[1, 2, 3])
        && none_attacked(pos, home, &[2, 3], enemy)
    {
        let mut mv = Move::new(from, home + 2);
        mv.is_castle = true;
        out.push(mv);
    }
}

fn all_empty(pos: &Position, home: Square, files: &[u8]) -> bool {
    files.iter().all(|&f| pos.piece_at(home + f).is_none())
}

fn none_attacked(pos: &Position, home: Square, files: &[u8], by: Color) -> bool {
    files.iter().all(|&f| !pos.is_square_attacked(home + f, by))
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
