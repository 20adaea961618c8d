use crate::error::FenError;
use crate::types::*;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        wk: true,
        wq: true,
        bk: true,
        bq: true,
    };

    pub fn kingside(&self, c: Color) -> bool {
        match c {
            Color::White => self.wk,
            Color::Black => self.bk,
        }
    }

    pub fn queenside(&self, c: Color) -> bool {
        match c {
            Color::White => self.wq,
            Color::Black => self.bq,
        }
    }

    /// True while `c` keeps at least one castling right.
    pub fn any(&self, c: Color) -> bool {
        self.kingside(c) || self.queenside(c)
    }

    /// Drop every right that depends on a piece standing on `s`.
    fn touch(&mut self, s: Square) {
        match s {
            0 => self.wq = false,
            7 => self.wk = false,
            4 => {
                self.wk = false;
                self.wq = false;
            }
            56 => self.bq = false,
            63 => self.bk = false,
            60 => {
                self.bk = false;
                self.bq = false;
            }
            _ => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// Token returned by [`Position::make_move`]; hand it back to
/// [`Position::unmake_move`] exactly once to restore the position.
#[must_use = "an applied move must be undone with Position::unmake_move"]
#[derive(Clone, Debug)]
pub struct Undo {
    captured: Option<Piece>,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    moved_piece: Option<Piece>,
    rook_move: Option<(Square, Square)>,
    ep_captured_sq: Option<Square>,
}

impl Undo {
    /// The piece removed by the move, if any.
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }
}

/// Token returned by [`Position::make_null_move`].
#[must_use = "a null move must be undone with Position::unmake_null_move"]
#[derive(Clone, Debug)]
pub struct NullUndo {
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        let mut board = [None; 64];
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            board[f] = Some(Piece::new(Color::White, kind));
            board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        Position {
            board,
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Parse Forsyth-Edwards Notation. The move counters may be omitted.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let mut board = [None; 64];
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let kind = PieceKind::from_fen_char(ch).ok_or(FenError::InvalidPiece(ch))?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let s = sq(file, rank).ok_or(FenError::RankWidth { rank: 8 - rank_idx })?;
                    board[s as usize] = Some(Piece::new(color, kind));
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::RankWidth { rank: 8 - rank_idx });
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth { rank: 8 - rank_idx });
            }
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSideToMove(other.to_string())),
        };

        let mut castling = CastlingRights::default();
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => castling.wk = true,
                    'Q' => castling.wq = true,
                    'k' => castling.bk = true,
                    'q' => castling.bq = true,
                    _ => return Err(FenError::InvalidCastling(parts[2].to_string())),
                }
            }
        }

        let en_passant = match parts[3] {
            "-" => None,
            coord => Some(
                coord_to_sq(coord).ok_or_else(|| FenError::InvalidEnPassant(coord.to_string()))?,
            ),
        };

        let counter = |field: Option<&&str>, default: u32| -> Result<u32, FenError> {
            match field {
                Some(txt) => txt
                    .parse()
                    .map_err(|_| FenError::InvalidCounter(txt.to_string())),
                None => Ok(default),
            }
        };
        let halfmove_clock = counter(parts.get(4), 0)?;
        let fullmove_number = counter(parts.get(5), 1)?;

        let pos = Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        };
        for c in Color::BOTH {
            if pos.count(c, PieceKind::King) != 1 {
                return Err(FenError::KingCount);
            }
        }
        Ok(pos)
    }

    /// Serialize to a full six-field FEN string.
    pub fn to_fen(&self) -> String {
        let mut fen = self.placement_fen();
        fen.push(' ');
        fen.push(self.side_char());

        fen.push(' ');
        let mut rights = String::new();
        for (held, ch) in [
            (self.castling.wk, 'K'),
            (self.castling.wq, 'Q'),
            (self.castling.bk, 'k'),
            (self.castling.bq, 'q'),
        ] {
            if held {
                rights.push(ch);
            }
        }
        if rights.is_empty() {
            rights.push('-');
        }
        fen.push_str(&rights);

        fen.push(' ');
        match self.en_passant {
            Some(ep) => fen.push_str(&sq_to_coord(ep)),
            None => fen.push('-'),
        }
        fen.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        fen
    }

    /// Piece placement plus side to move, e.g. `"<placement> w"`.
    /// This is the key opening-book entries are stored under.
    pub fn book_key(&self) -> String {
        format!("{} {}", self.placement_fen(), self.side_char())
    }

    fn side_char(&self) -> char {
        match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    fn placement_fen(&self) -> String {
        let mut out = String::with_capacity(64);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.board[(rank * 8 + file) as usize] {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }

    pub fn king_sq(&self, c: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, pc)| pc.color == c && pc.kind == PieceKind::King)
            .map(|(s, _)| s)
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq as usize]
    }
    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    /// Occupied squares in a1..h8 order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.board
            .iter()
            .enumerate()
            .filter_map(|(i, pc)| pc.map(|pc| (i as Square, pc)))
    }

    pub fn count(&self, c: Color, kind: PieceKind) -> usize {
        self.pieces()
            .filter(|(_, pc)| pc.color == c && pc.kind == kind)
            .count()
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        self.scan_attackers(target, by, true, 1) > 0
    }

    /// Number of `by` pieces, kings excluded, attacking `target`.
    pub fn attackers_count(&self, target: Square, by: Color) -> u32 {
        self.scan_attackers(target, by, false, u32::MAX)
    }

    fn scan_attackers(&self, target: Square, by: Color, with_king: bool, limit: u32) -> u32 {
        let tf = file_of(target);
        let tr = rank_of(target);
        let mut found = 0u32;

        // A pawn of `by` attacks from one rank behind the target, seen from its side.
        let behind = -by.forward();
        for df in [-1, 1] {
            if let Some(s) = sq(tf + df, tr + behind) {
                if self.holds(s, by, &[PieceKind::Pawn]) {
                    found += 1;
                }
            }
        }
        for (df, dr) in KNIGHT_DELTAS {
            if let Some(s) = sq(tf + df, tr + dr) {
                if self.holds(s, by, &[PieceKind::Knight]) {
                    found += 1;
                }
            }
        }
        if with_king {
            for (df, dr) in KING_DELTAS {
                if let Some(s) = sq(tf + df, tr + dr) {
                    if self.holds(s, by, &[PieceKind::King]) {
                        found += 1;
                    }
                }
            }
        }
        if found >= limit {
            return found;
        }

        let rays = [
            (&DIAGONALS, [PieceKind::Bishop, PieceKind::Queen]),
            (&ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen]),
        ];
        for (dirs, sliders) in rays {
            for &(df, dr) in dirs.iter() {
                let mut f = tf + df;
                let mut r = tr + dr;
                while let Some(s) = sq(f, r) {
                    if self.piece_at(s).is_some() {
                        if self.holds(s, by, &sliders) {
                            found += 1;
                            if found >= limit {
                                return found;
                            }
                        }
                        break;
                    }
                    f += df;
                    r += dr;
                }
            }
        }
        found
    }

    fn holds(&self, s: Square, by: Color, kinds: &[PieceKind]) -> bool {
        matches!(self.piece_at(s), Some(pc) if pc.color == by && kinds.contains(&pc.kind))
    }

    /// Neither side can possibly deliver mate: bare kings, a single minor
    /// piece, or only bishops that all stand on one square color.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut knights = 0;
        let mut bishop_colors = [false; 2];
        for (s, pc) in self.pieces() {
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                PieceKind::Knight => {
                    minors += 1;
                    knights += 1;
                }
                PieceKind::Bishop => {
                    minors += 1;
                    bishop_colors[((file_of(s) + rank_of(s)) % 2) as usize] = true;
                }
            }
        }
        minors <= 1 || (knights == 0 && !(bishop_colors[0] && bishop_colors[1]))
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Apply `mv` for good, e.g. replaying a game record. Use
    /// [`Position::make_move`] when the move has to be taken back.
    pub fn play(&mut self, mv: Move) {
        drop(self.make_move(mv));
    }

    pub fn make_move(&mut self, mv: Move) -> Undo {
        let mut undo = Undo {
            captured: self.piece_at(mv.to),
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            moved_piece: self.piece_at(mv.from),
            rook_move: None,
            ep_captured_sq: None,
        };
        let Some(moved) = undo.moved_piece else {
            // Empty from-square: only the turn passes, unmake restores it.
            undo.captured = None;
            self.side_to_move = self.side_to_move.other();
            return undo;
        };

        if mv.is_en_passant {
            if let Some(cs) = sq(file_of(mv.to), rank_of(mv.from)) {
                undo.captured = self.piece_at(cs);
                undo.ep_captured_sq = Some(cs);
                self.set_piece(cs, None);
            }
        }

        self.set_piece(mv.from, None);
        let landed = match mv.promo {
            Some(kind) if moved.kind == PieceKind::Pawn => Piece::new(moved.color, kind),
            _ if moved.kind == PieceKind::Pawn && is_last_rank(moved.color, mv.to) => {
                Piece::new(moved.color, PieceKind::Queen)
            }
            _ => moved,
        };
        self.set_piece(mv.to, Some(landed));

        if mv.is_castle && moved.kind == PieceKind::King {
            if let Some((rf, rt)) = castle_rook_squares(mv.to) {
                let rook = self.piece_at(rf);
                self.set_piece(rf, None);
                self.set_piece(rt, rook);
                undo.rook_move = Some((rf, rt));
            }
        }

        self.castling.touch(mv.from);
        self.castling.touch(mv.to);

        self.en_passant = None;
        if moved.kind == PieceKind::Pawn && (rank_of(mv.to) - rank_of(mv.from)).abs() == 2 {
            self.en_passant = sq(file_of(mv.from), (rank_of(mv.from) + rank_of(mv.to)) / 2);
        }

        let resets = moved.kind == PieceKind::Pawn || undo.captured.is_some();
        self.halfmove_clock = if resets { 0 } else { self.halfmove_clock + 1 };
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        undo
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        let Some(moved) = undo.moved_piece else {
            return;
        };

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt);
            self.set_piece(rt, None);
            self.set_piece(rf, rook);
        }

        // Restoring the original piece also reverts a promotion.
        self.set_piece(mv.from, Some(moved));
        match undo.ep_captured_sq {
            Some(cs) => {
                self.set_piece(mv.to, None);
                self.set_piece(cs, undo.captured);
            }
            None => self.set_piece(mv.to, undo.captured),
        }
    }

    /// Pass the turn without moving a piece. Used by null-move pruning and
    /// by evaluation terms that need the other side's move list.
    pub fn make_null_move(&mut self) -> NullUndo {
        let undo = NullUndo {
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        };
        self.en_passant = None;
        self.halfmove_clock += 1;
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();
        undo
    }

    pub fn unmake_null_move(&mut self, undo: NullUndo) {
        self.side_to_move = self.side_to_move.other();
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
    }
}

fn is_last_rank(c: Color, s: Square) -> bool {
    rank_of(s) == c.other().back_rank()
}

/// Rook (from, to) for a castling king landing on `king_to`.
fn castle_rook_squares(king_to: Square) -> Option<(Square, Square)> {
    match king_to {
        6 => Some((7, 5)),
        2 => Some((0, 3)),
        62 => Some((63, 61)),
        58 => Some((56, 59)),
        _ => None,
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
