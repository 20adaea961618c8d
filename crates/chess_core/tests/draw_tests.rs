//! Game-end detection: stalemate, checkmate, fifty-move rule and
//! insufficient material.

use chess_core::{legal_moves_into, Color, Position};

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

// =============================================================================
// Stalemate / Checkmate
// =============================================================================

#[test]
fn test_stalemate_king_in_corner() {
    // Black king in corner, white queen stalemates
    let pos = pos("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");

    let mut pos_mut = pos.clone();
    let mut moves = Vec::new();
    legal_moves_into(&mut pos_mut, &mut moves);

    assert!(moves.is_empty(), "Stalemate position should have no legal moves");
    assert!(!pos.in_check(Color::Black), "Stalemate means king is not in check");
    assert!(pos.is_stalemate());
}

#[test]
fn test_stalemate_king_and_pawn_endgame() {
    let pos = pos("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1");
    assert!(pos.is_stalemate());
    assert!(!pos.is_checkmate());
}

#[test]
fn test_checkmate_is_not_stalemate() {
    // Scholar's mate
    let pos = pos("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
    assert!(pos.is_checkmate());
    assert!(!pos.is_stalemate());
}

#[test]
fn test_check_is_not_checkmate() {
    let pos = pos("rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2");
    assert!(pos.in_check(Color::Black));
    assert!(pos.has_legal_move());
    assert!(!pos.is_checkmate());
}

// =============================================================================
// Fifty-Move Rule
// =============================================================================

#[test]
fn test_fifty_move_rule_at_100_halfmoves() {
    assert!(pos("8/8/8/4k3/8/4K3/8/8 w - - 100 60").is_fifty_move_draw());
}

#[test]
fn test_fifty_move_rule_at_99_halfmoves() {
    assert!(!pos("8/8/8/4k3/8/4K3/8/8 w - - 99 60").is_fifty_move_draw());
}

#[test]
fn test_fifty_move_rule_reset_on_pawn_move() {
    let mut pos = pos("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60");
    let mv = chess_core::parse_uci_move(&pos, "e2e4").unwrap();
    pos.play(mv);
    assert_eq!(pos.halfmove_clock, 0);
    assert!(!pos.is_fifty_move_draw());
}

// =============================================================================
// Insufficient Material
// =============================================================================

#[test]
fn test_insufficient_material_cases() {
    for fen in [
        "8/8/8/4k3/8/4K3/8/8 w - - 0 1",
        "8/8/8/4k3/8/4KB2/8/8 w - - 0 1",
        "8/8/8/4k3/8/4KN2/8/8 w - - 0 1",
        "8/8/4b3/4k3/8/4K3/8/8 w - - 0 1",
        "8/8/4n3/4k3/8/4K3/8/8 w - - 0 1",
        // Bishops on f8 and c1 share a square color
        "5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1",
    ] {
        assert!(pos(fen).is_insufficient_material(), "{fen}");
    }
}

#[test]
fn test_sufficient_material_cases() {
    for fen in [
        // Opposite-colored bishops
        "2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1",
        "8/8/8/4k3/8/4K3/4P3/8 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/4R3 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/4Q3 w - - 0 1",
        "8/8/8/4k3/8/4K3/3NN3/8 w - - 0 1",
    ] {
        assert!(!pos(fen).is_insufficient_material(), "{fen}");
    }
}
