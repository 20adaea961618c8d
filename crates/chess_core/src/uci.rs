use crate::{board::Position, error::FenError, movegen::legal_moves, types::*};

pub fn move_to_uci(mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.fen_char());
    }
    s
}

/// Resolve coordinate notation (`e2e4`, `e7e8q`) against the legal moves of
/// `pos`, so castle/en-passant flags come from the generator. A promotion
/// written without a piece letter resolves to the queen promotion.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    let txt = txt.trim();
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt.chars().nth(4) {
        Some(ch) => match PieceKind::from_fen_char(ch)? {
            PieceKind::Pawn | PieceKind::King => return None,
            kind => Some(kind),
        },
        None => None,
    };
    let wanted = promo.or(Some(PieceKind::Queen));

    legal_moves(pos)
        .into_iter()
        .filter(|m| m.from == from && m.to == to)
        .find(|m| m.promo.is_none() || m.promo == wanted)
}

/// Build a position from the arguments of a UCI `position` command:
/// `startpos [moves ...]` or `fen <fields> [moves ...]`.
/// Moves that are not legal end the move list.
pub fn set_position_from_uci(args: &[&str]) -> Result<Position, FenError> {
    let moves_at = args.iter().position(|&a| a == "moves").unwrap_or(args.len());
    let mut pos = match args.first() {
        Some(&"fen") => Position::from_fen(&args[1..moves_at].join(" "))?,
        _ => Position::startpos(),
    };

    for txt in args.iter().skip(moves_at + 1) {
        match parse_uci_move(&pos, txt) {
            Some(mv) => pos.play(mv),
            None => break,
        }
    }
    Ok(pos)
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
