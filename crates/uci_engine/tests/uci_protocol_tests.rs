use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Duration;

use bot_engine::{ExternalBackend, ExternalEngine, ExternalError, StrengthProfile};
use chess_core::{legal_moves, move_to_uci, Position};

const BIN: &str = env!("CARGO_BIN_EXE_uci_engine");

fn run_script(script: &str) -> Vec<String> {
    let mut child = Command::new(BIN)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .env("RUST_LOG", "off")
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(script.as_bytes()).unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    String::from_utf8(out.stdout)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_handshake_lists_options() {
    let lines = run_script("uci\nisready\nquit\n");
    assert!(lines[0].starts_with("id name "));
    assert!(lines.iter().any(|l| l.starts_with("option name Skill Level")));
    assert!(lines.iter().any(|l| l.starts_with("option name Depth")));
    assert_eq!(&lines[lines.len() - 2..], ["uciok", "readyok"]);
}

#[test]
fn test_go_after_moves() {
    let lines = run_script(
        "setoption name Skill Level value 2\nposition startpos moves e2e4 e7e5\ngo depth 2 movetime 200\nquit\n",
    );
    let reply = lines.last().unwrap().strip_prefix("bestmove ").unwrap();
    let mut pos = Position::startpos();
    for m in ["e2e4", "e7e5"] {
        let mv = chess_core::parse_uci_move(&pos, m).unwrap();
        pos.play(mv);
    }
    assert!(legal_moves(&pos).into_iter().map(move_to_uci).any(|m| m == reply));
}

#[test]
fn test_mated_side_answers_null_move() {
    let lines = run_script(
        "position fen rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3\ngo movetime 100\n",
    );
    assert_eq!(lines.last().map(String::as_str), Some("bestmove 0000"));
}

#[test]
fn test_bad_position_keeps_previous() {
    let lines = run_script("position fen nonsense\ngo depth 1\nquit\n");
    let reply = lines.last().unwrap().strip_prefix("bestmove ").unwrap();
    let start = Position::startpos();
    assert!(legal_moves(&start).into_iter().map(move_to_uci).any(|m| m == reply));
}

#[test]
fn test_adapter_drives_front_end() {
    let mut engine = ExternalEngine::spawn(BIN, Duration::from_secs(5)).unwrap();
    assert!(engine.name().starts_with("ML-chess bot"));

    let mut tuning = StrengthProfile::for_level(1).external;
    tuning.move_time = Duration::from_millis(200);

    let pos = Position::startpos();
    let mv = engine.best_move(&pos, &tuning).unwrap().unwrap();
    assert!(legal_moves(&pos).contains(&mv));

    let mated =
        Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
    assert_eq!(engine.best_move(&mated, &tuning).unwrap(), None);
}

#[test]
fn test_locate_skips_missing_candidates() {
    let candidates = ["/nonexistent/stockfish", BIN];
    let engine = ExternalEngine::locate(&candidates, Duration::from_secs(5)).unwrap();
    assert_eq!(engine.path(), BIN);

    let missing: [&str; 0] = [];
    assert!(matches!(
        ExternalEngine::locate(&missing, Duration::from_secs(1)),
        Err(ExternalError::NotFound { .. })
    ));
}
