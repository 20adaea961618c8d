use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use bot_engine::tables::MAX_DEPTH;
use bot_engine::{BotConfig, SearchLimits, Searcher, StrengthProfile};
use chess_core::{move_to_uci, set_position_from_uci, Position};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: i32 = 3;

fn main() -> Result<()> {
    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match config_path() {
        Some(path) => BotConfig::load(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => BotConfig::default(),
    };
    info!(?config, "starting");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut engine = UciFrontEnd::new(config);

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if !engine.handle(&line, &mut stdout)? {
            break;
        }
        stdout.flush()?;
    }
    Ok(())
}

/// `--config <path>` wins over `BOT_ENGINE_CONFIG`.
fn config_path() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(PathBuf::from(path));
        }
    }
    std::env::var_os("BOT_ENGINE_CONFIG").map(PathBuf::from)
}

struct UciFrontEnd {
    config: BotConfig,
    searcher: Searcher,
    pos: Position,
    level: i32,
    /// `None` uses the level's depth.
    depth: Option<i32>,
}

impl UciFrontEnd {
    fn new(config: BotConfig) -> Self {
        Self {
            searcher: Searcher::with_seed(config.seed),
            config,
            pos: Position::startpos(),
            level: DEFAULT_LEVEL,
            depth: None,
        }
    }

    /// Handle one command line; `false` means quit.
    fn handle(&mut self, line: &str, out: &mut impl Write) -> Result<bool> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&cmd) = parts.first() else {
            return Ok(true);
        };
        debug!(line, "command");

        match cmd {
            "uci" => {
                writeln!(out, "id name ML-chess bot {}", env!("CARGO_PKG_VERSION"))?;
                writeln!(out, "id author ML-chess")?;
                writeln!(out, "option name Skill Level type spin default {DEFAULT_LEVEL} min 1 max 5")?;
                writeln!(out, "option name Depth type spin default 0 min 0 max {MAX_DEPTH}")?;
                writeln!(out, "uciok")?;
            }
            "isready" => writeln!(out, "readyok")?,
            "setoption" => self.set_option(&parts[1..]),
            "ucinewgame" => {
                self.pos = Position::startpos();
                self.searcher.clear_tables();
            }
            "position" => match set_position_from_uci(&parts[1..]) {
                Ok(pos) => self.pos = pos,
                Err(e) => warn!(error = %e, "ignoring bad position"),
            },
            "go" => {
                let limits = self.limits(&parts[1..]);
                match self.searcher.choose_move(&mut self.pos, &limits) {
                    Some(report) => {
                        info!(
                            mv = %move_to_uci(report.best_move),
                            score = report.score,
                            depth = report.depth,
                            nodes = report.nodes,
                            source = ?report.source,
                            "bestmove"
                        );
                        writeln!(out, "bestmove {}", move_to_uci(report.best_move))?;
                    }
                    None => writeln!(out, "bestmove 0000")?,
                }
            }
            "quit" => return Ok(false),
            _ => debug!(cmd, "unknown command"),
        }
        Ok(true)
    }

    // setoption name <id...> value <x>
    fn set_option(&mut self, args: &[&str]) {
        let Some(value_at) = args.iter().position(|&a| a == "value") else {
            return;
        };
        let name = args.get(1..value_at).map(|n| n.join(" ")).unwrap_or_default();
        let Some(Ok(value)) = args.get(value_at + 1).map(|v| v.parse::<i32>()) else {
            return;
        };
        match name.as_str() {
            "Skill Level" => self.level = value.clamp(1, 5),
            "Depth" => self.depth = (value > 0).then(|| value.min(MAX_DEPTH)),
            _ => debug!(name, "option ignored"),
        }
    }

    fn limits(&self, args: &[&str]) -> SearchLimits {
        let mut profile =
            StrengthProfile::for_level(self.level).capped(self.config.max_move_time());
        if !self.config.search.use_book {
            profile.use_book = false;
        }
        let mut limits = profile.limits();
        if let Some(depth) = self.depth {
            limits.max_depth = depth;
        }

        let mut it = args.iter();
        while let Some(&arg) = it.next() {
            let value = it.clone().next().and_then(|v| v.parse::<u64>().ok());
            match (arg, value) {
                ("depth", Some(d)) => {
                    limits.max_depth = (d.min(MAX_DEPTH as u64) as i32).max(1);
                }
                ("movetime", Some(ms)) => {
                    limits.budget = limits.budget.min(Duration::from_millis(ms));
                }
                _ => {}
            }
        }
        limits
    }
}
