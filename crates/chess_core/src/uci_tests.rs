use super::*;

#[test]
fn test_move_to_uci() {
    let mv = Move::new(coord_to_sq("e2").unwrap(), coord_to_sq("e4").unwrap());
    assert_eq!(move_to_uci(mv), "e2e4");

    let promo = Move::with_promo(
        coord_to_sq("a7").unwrap(),
        coord_to_sq("a8").unwrap(),
        PieceKind::Knight,
    );
    assert_eq!(move_to_uci(promo), "a7a8n");
}

#[test]
fn test_parse_resolves_flags_from_generator() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let mv = parse_uci_move(&pos, "e1g1").unwrap();
    assert!(mv.is_castle);

    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
    let mv = parse_uci_move(&pos, "e5d6").unwrap();
    assert!(mv.is_en_passant);
}

#[test]
fn test_parse_promotion_defaults_to_queen() {
    let pos = Position::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
    assert_eq!(
        parse_uci_move(&pos, "e7e8").unwrap().promo,
        Some(PieceKind::Queen)
    );
    assert_eq!(
        parse_uci_move(&pos, "e7e8r").unwrap().promo,
        Some(PieceKind::Rook)
    );
    assert!(parse_uci_move(&pos, "e7e8k").is_none());
}

#[test]
fn test_parse_rejects_garbage_and_illegal() {
    let pos = Position::startpos();
    assert!(parse_uci_move(&pos, "").is_none());
    assert!(parse_uci_move(&pos, "e2").is_none());
    assert!(parse_uci_move(&pos, "z9e4").is_none());
    assert!(parse_uci_move(&pos, "e2e5").is_none());
    assert!(parse_uci_move(&pos, "(none)").is_none());
}

#[test]
fn test_set_position_startpos_with_moves() {
    let pos = set_position_from_uci(&["startpos", "moves", "e2e4", "e7e5", "g1f3"]).unwrap();
    assert_eq!(
        pos.to_fen(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
    );
}

#[test]
fn test_set_position_fen() {
    let args = [
        "fen", "4k3/8/8/8/8/8/4P3/4K3", "w", "-", "-", "0", "1", "moves", "e2e4",
    ];
    let pos = set_position_from_uci(&args).unwrap();
    assert_eq!(pos.to_fen(), "4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1");

    assert!(set_position_from_uci(&["fen", "not", "a", "fen"]).is_err());
}

#[test]
fn test_set_position_stops_at_illegal_move() {
    let pos = set_position_from_uci(&["startpos", "moves", "e2e4", "e2e4", "e7e5"]).unwrap();
    assert_eq!(pos.side_to_move, Color::Black);
    assert!(pos.piece_at(coord_to_sq("e5").unwrap()).is_none());
}
