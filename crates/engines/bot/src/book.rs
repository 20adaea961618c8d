//! Small built-in opening book.
//!
//! Entries are keyed by [`Position::book_key`] (piece placement plus side to
//! move) and list candidate replies in coordinate notation.

use std::collections::HashMap;

use chess_core::{parse_uci_move, Move, Position};
use rand::seq::SliceRandom;
use rand::Rng;

// One entry per position. Replies that several opening lines share are
// gathered under a single key instead of the last line winning, so 1.e4 and
// 1.d4 each keep their whole set of answers.
const STANDARD_LINES: &[(&str, &[&str])] = &[
    (
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w",
        &["e2e4", "d2d4", "c2c4", "g1f3"],
    ),
    // 1.e4: Sicilian, French, Caro-Kann, open game
    (
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b",
        &["c7c5", "e7e6", "c7c6", "e7e5"],
    ),
    (
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w",
        &["g1f3", "c2c3", "b1c3", "d2d4"],
    ),
    (
        "rnbqkbnr/pppp1ppp/4p3/8/4P3/8/PPPP1PPP/RNBQKBNR w",
        &["d2d4", "b1c3", "g1f3"],
    ),
    (
        "rnbqkbnr/pp1ppppp/2p5/8/4P3/8/PPPP1PPP/RNBQKBNR w",
        &["d2d4", "b1c3", "g1f3"],
    ),
    // 1.d4: Queen's Gambit and Indian setups
    (
        "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b",
        &["d7d5", "g8f6", "e7e6"],
    ),
    (
        "rnbqkbnr/ppp1pppp/8/3p4/3P4/8/PPP1PPPP/RNBQKBNR w",
        &["c2c4", "g1f3", "b1c3"],
    ),
    (
        "rnbqkb1r/pppppppp/5n2/8/3P4/8/PPP1PPPP/RNBQKBNR w",
        &["c2c4", "g1f3", "c1g5"],
    ),
    // 1.e4 e5: Ruy Lopez, Italian, Petrov
    (
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w",
        &["g1f3"],
    ),
    (
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b",
        &["b8c6", "g8f6"],
    ),
    (
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w",
        &["f1b5", "f1c4"],
    ),
    (
        "rnbqkb1r/pppp1ppp/5n2/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w",
        &["f3e5", "d2d4"],
    ),
];

#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    lines: HashMap<String, Vec<String>>,
}

impl OpeningBook {
    /// The built-in repertoire.
    pub fn standard() -> Self {
        let mut book = Self::default();
        for (key, moves) in STANDARD_LINES {
            book.extend(key, moves.iter().copied());
        }
        book
    }

    /// Append candidates to `key`, keeping earlier entries first.
    pub fn extend<'a>(&mut self, key: &str, moves: impl IntoIterator<Item = &'a str>) {
        let entry = self.lines.entry(key.to_string()).or_default();
        for mv in moves {
            if !entry.iter().any(|m| m == mv) {
                entry.push(mv.to_string());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Listed candidates for `pos`, legal or not.
    pub fn candidates(&self, pos: &Position) -> &[String] {
        self.lines
            .get(&pos.book_key())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// A random candidate that is legal in `pos`.
    pub fn pick<R: Rng + ?Sized>(&self, pos: &Position, rng: &mut R) -> Option<Move> {
        let legal: Vec<Move> = self
            .candidates(pos)
            .iter()
            .filter_map(|txt| parse_uci_move(pos, txt))
            .collect();
        legal.choose(rng).copied()
    }
}

#[cfg(test)]
#[path = "book_tests.rs"]
mod book_tests;
