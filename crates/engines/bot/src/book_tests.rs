use super::*;
use chess_core::{move_to_uci, set_position_from_uci};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn after(moves: &[&str]) -> Position {
    let mut args = vec!["startpos", "moves"];
    args.extend_from_slice(moves);
    set_position_from_uci(&args).unwrap()
}

#[test]
fn test_startpos_hit_is_a_listed_candidate() {
    let book = OpeningBook::standard();
    let pos = Position::startpos();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let mv = book.pick(&pos, &mut rng).unwrap();
        assert!(["e2e4", "d2d4", "c2c4", "g1f3"].contains(&move_to_uci(mv).as_str()));
    }
}

#[test]
fn test_keys_match_reached_positions() {
    let book = OpeningBook::standard();
    for line in [
        &[][..],
        &["e2e4"][..],
        &["e2e4", "c7c5"][..],
        &["e2e4", "e7e6"][..],
        &["e2e4", "c7c6"][..],
        &["d2d4"][..],
        &["d2d4", "d7d5"][..],
        &["d2d4", "g8f6"][..],
        &["e2e4", "e7e5"][..],
        &["e2e4", "e7e5", "g1f3"][..],
        &["e2e4", "e7e5", "g1f3", "b8c6"][..],
        &["e2e4", "e7e5", "g1f3", "g8f6"][..],
    ] {
        let pos = after(line);
        assert!(!book.candidates(&pos).is_empty(), "no entry after {line:?}");
        assert!(book.pick(&pos, &mut StdRng::seed_from_u64(1)).is_some());
    }
    assert_eq!(book.len(), 12);
}

#[test]
fn test_replies_to_e4_are_merged() {
    let book = OpeningBook::standard();
    let pos = after(&["e2e4"]);
    assert_eq!(book.candidates(&pos), ["c7c5", "e7e6", "c7c6", "e7e5"]);
}

#[test]
fn test_miss_and_illegal_candidates() {
    let book = OpeningBook::standard();
    let mut rng = StdRng::seed_from_u64(3);
    let pos = after(&["a2a3"]);
    assert!(book.candidates(&pos).is_empty());
    assert!(book.pick(&pos, &mut rng).is_none());

    let mut custom = OpeningBook::default();
    let start = Position::startpos();
    custom.extend(&start.book_key(), ["e2e5", "e1e2"]);
    assert!(custom.pick(&start, &mut rng).is_none());
    custom.extend(&start.book_key(), ["e2e5", "b1c3"]);
    assert_eq!(custom.candidates(&start).len(), 3);
    assert_eq!(move_to_uci(custom.pick(&start, &mut rng).unwrap()), "b1c3");
}
