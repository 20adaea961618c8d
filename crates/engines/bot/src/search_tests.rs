use super::*;
use chess_core::{legal_moves, move_to_uci};
use std::time::Duration;

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

fn searcher() -> Searcher {
    Searcher::with_seed(Some(11))
}

#[test]
fn test_negamax_finds_mate_in_one() {
    let mut p = pos("6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1");
    for depth in 1..=3 {
        let (score, mv) = searcher()
            .negamax(&mut p, depth, -INFINITY, INFINITY, true)
            .unwrap();
        assert!(score > 5000, "depth {depth}: {score}");
        assert_eq!(move_to_uci(mv.unwrap()), "e1e8");
    }
}

#[test]
fn test_negamax_wins_hanging_queen() {
    let mut p = pos("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1");
    let (score, mv) = searcher()
        .negamax(&mut p, 3, -INFINITY, INFINITY, true)
        .unwrap();
    assert_eq!(move_to_uci(mv.unwrap()), "d1d5");
    assert!(score > 300, "{score}");
}

#[test]
fn test_negamax_terminal_positions() {
    let mut s = searcher();
    let mut mated = pos("4R1k1/5ppp/8/8/8/8/5PPP/6K1 b - - 1 1");
    assert_eq!(
        s.negamax(&mut mated, 2, -INFINITY, INFINITY, true).unwrap(),
        (-INFINITY, None)
    );
    let mut stalemate = pos("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert_eq!(
        s.negamax(&mut stalemate, 2, -INFINITY, INFINITY, true).unwrap(),
        (0, None)
    );
}

#[test]
fn test_search_restores_position() {
    let mut p = pos("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let before = p.clone();
    let mut s = searcher();
    s.negamax(&mut p, 2, -INFINITY, INFINITY, true).unwrap();
    assert_eq!(p, before);
    assert!(s.nodes() > 48);
}

#[test]
fn test_cancellation_unwinds_and_restores() {
    let mut p = pos("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let before = p.clone();
    let mut s = searcher();
    s.clock.start(Some(Duration::ZERO));
    assert_eq!(
        s.negamax(&mut p, 4, -INFINITY, INFINITY, true),
        Err(Cancelled)
    );
    assert_eq!(p, before);
}

#[test]
fn test_quiet_cutoff_becomes_killer() {
    let mut p = Position::startpos();
    let first = legal_moves(&p)[0];
    let mut s = searcher();

    // A window that any move fails high on: the first ordered move cuts.
    let beta = -INFINITY + 1;
    let (score, mv) = s.negamax(&mut p, 1, -INFINITY, beta, true).unwrap();
    assert_eq!(mv, Some(first));
    assert!(score >= beta);
    assert_eq!(s.killers().get(1)[0], Some(first));
    assert_eq!(s.history().get(first), 1);

    // The killer survives into the next call on the same instance.
    s.negamax(&mut p, 1, -INFINITY, INFINITY, true).unwrap();
    assert!(s.killers().get(1).contains(&Some(first)));
}

#[test]
fn test_book_probe_at_max_depth() {
    let mut p = Position::startpos();
    let mut s = searcher();
    let (score, mv) = s.negamax(&mut p, MAX_DEPTH, -INFINITY, INFINITY, true).unwrap();
    assert_eq!(score, 0);
    let uci = move_to_uci(mv.unwrap());
    assert!(["e2e4", "d2d4", "c2c4", "g1f3"].contains(&uci.as_str()));
}

#[test]
fn test_clear_tables() {
    let mut p = Position::startpos();
    let mut s = searcher();
    s.negamax(&mut p, 1, -INFINITY, -INFINITY + 1, true).unwrap();
    s.clear_tables();
    assert_eq!(s.killers().get(1), [None, None]);
}

const QUEENS_UP: &str = "4k3/pppppppp/8/8/8/8/PPPPPPPP/R2QK2R w - - 0 20";

#[test]
fn test_null_move_cuts_off_when_far_ahead() {
    let mut p = pos(QUEENS_UP);
    let before = p.clone();
    let mut s = searcher();
    assert_eq!(s.negamax(&mut p, 3, 0, 100, true).unwrap(), (100, None));
    assert_eq!(p, before);
    let pruned_nodes = s.nodes();

    let mut s = searcher();
    let (_, mv) = s.negamax(&mut p, 3, 0, 100, false).unwrap();
    assert!(mv.is_some());
    assert!(s.nodes() > pruned_nodes);
}

#[test]
fn test_no_null_move_in_endgame_or_check() {
    // No queens on the board.
    let mut endgame = pos("4k3/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w - - 0 20");
    let (_, mv) = searcher().negamax(&mut endgame, 3, 0, 100, true).unwrap();
    assert!(mv.is_some());

    // The h1 rook checks e1; Kf2 is the only reply.
    let mut checked = pos("4k3/pppppppp/8/8/8/8/PPPPP1PP/R2QK2r w - - 0 20");
    let (_, mv) = searcher().negamax(&mut checked, 3, 0, 100, true).unwrap();
    assert_eq!(move_to_uci(mv.unwrap()), "e1f2");
}

#[test]
fn test_window_widens_only_above_depth_six() {
    assert_eq!(widen_window(6, -30, -10), (-30, -10));
    assert_eq!(widen_window(7, -30, -10), (-80, 40));
    assert_eq!(widen_window(7, -INFINITY, INFINITY), (-INFINITY, INFINITY));
}

#[test]
fn test_deep_search_keeps_going_inside_widened_window() {
    // bxa5 stalemates Black (score 0). Against beta = -10 that cuts off at
    // once, unless the window was widened to beta = 40.
    let fen = "k7/2K5/1B6/p7/1P6/8/8/8 w - - 0 1";

    let mut p = pos(fen);
    let mut s = searcher();
    let (score, mv) = s.negamax(&mut p, 6, -30, -10, true).unwrap();
    assert_eq!((score, move_to_uci(mv.unwrap()).as_str()), (0, "b4a5"));
    assert_eq!(s.nodes(), 2);

    let mut s = searcher();
    let (_, mv) = s.negamax(&mut p, 7, -30, -10, true).unwrap();
    assert!(mv.is_some());
    assert!(s.nodes() > 2);
    assert_eq!(p, pos(fen));
}

#[test]
fn test_deep_fail_high_is_not_searched_again() {
    // Rxe8 mates and is the only capture, so it is searched first.
    let mut p = pos("4n1k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1");
    let mut s = searcher();
    let (score, mv) = s.negamax(&mut p, 7, 0, 1, true).unwrap();
    assert_eq!(score, INFINITY);
    assert_eq!(move_to_uci(mv.unwrap()), "e1e8");
    assert_eq!(s.nodes(), 2);
}
