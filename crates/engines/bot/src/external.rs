//! Client side of the UCI protocol for an external engine process.
//!
//! [`UciSession`] speaks the protocol over any writer plus a channel of
//! reply lines, so it can be driven from memory in tests. [`ExternalEngine`]
//! wraps a spawned child process: a reader thread forwards its stdout into
//! the channel and the session writes to its stdin.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use chess_core::{parse_uci_move, Move, Position};
use tracing::{debug, info, trace};

use crate::error::ExternalError;
use crate::profile::ExternalTuning;

/// Where to look for an engine, in order.
pub const DEFAULT_CANDIDATES: &[&str] = &[
    "engines/stockfish/stockfish",
    "/usr/local/bin/stockfish",
    "/usr/bin/stockfish",
    "stockfish",
];

/// Anything that can answer "best move for this position".
pub trait ExternalBackend {
    fn best_move(
        &mut self,
        pos: &Position,
        tuning: &ExternalTuning,
    ) -> Result<Option<Move>, ExternalError>;

    fn name(&self) -> &str;
}

pub struct UciSession<W: Write> {
    writer: W,
    lines: Receiver<String>,
    /// Extra time granted on top of the requested move time.
    response_timeout: Duration,
    engine_name: String,
}

impl<W: Write> UciSession<W> {
    pub fn new(writer: W, lines: Receiver<String>, response_timeout: Duration) -> Self {
        Self {
            writer,
            lines,
            response_timeout,
            engine_name: String::from("uci engine"),
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn engine_name(&self) -> &str {
        &self.engine_name
    }

    pub fn send(&mut self, cmd: &str) -> Result<(), ExternalError> {
        trace!(cmd, "> engine");
        writeln!(self.writer, "{cmd}")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Read lines until one starts with `token`; earlier lines are skipped.
    pub fn expect(&mut self, token: &str, timeout: Duration) -> Result<String, ExternalError> {
        let deadline = Instant::now() + timeout;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            let line = match self.lines.recv_timeout(left) {
                Ok(line) => line,
                Err(RecvTimeoutError::Timeout) => {
                    return Err(ExternalError::Timeout {
                        expected: token.to_string(),
                        timeout,
                    })
                }
                Err(RecvTimeoutError::Disconnected) => return Err(ExternalError::Closed),
            };
            trace!(line = %line, "< engine");
            if let Some(name) = line.strip_prefix("id name ") {
                self.engine_name = name.trim().to_string();
            }
            if line.split_whitespace().next() == Some(token) {
                return Ok(line);
            }
        }
    }

    /// `uci` / `uciok`, then `isready` / `readyok`.
    pub fn handshake(&mut self) -> Result<(), ExternalError> {
        self.send("uci")?;
        self.expect("uciok", self.response_timeout)?;
        self.sync()
    }

    fn sync(&mut self) -> Result<(), ExternalError> {
        self.send("isready")?;
        self.expect("readyok", self.response_timeout)?;
        Ok(())
    }

    pub fn configure(&mut self, tuning: &ExternalTuning) -> Result<(), ExternalError> {
        self.send(&format!("setoption name Threads value {}", tuning.threads))?;
        self.send(&format!("setoption name Hash value {}", tuning.hash_mb))?;
        self.send("setoption name MultiPV value 1")?;
        self.send(&format!("setoption name Skill Level value {}", tuning.skill_level))?;
        self.send(&format!(
            "setoption name Move Overhead value {}",
            tuning.move_overhead_ms
        ))?;
        match tuning.elo_cap {
            Some(elo) => {
                self.send("setoption name UCI_LimitStrength value true")?;
                self.send(&format!("setoption name UCI_Elo value {elo}"))?;
            }
            None => self.send("setoption name UCI_LimitStrength value false")?,
        }
        self.sync()
    }

    /// Configure, send the position and wait for `bestmove`.
    /// `bestmove (none)` and `bestmove 0000` mean the engine has no move.
    pub fn request_move(
        &mut self,
        pos: &Position,
        tuning: &ExternalTuning,
    ) -> Result<Option<Move>, ExternalError> {
        self.configure(tuning)?;
        self.send(&format!("position fen {}", pos.to_fen()))?;
        self.send(&format!(
            "go depth {} movetime {}",
            tuning.depth,
            tuning.move_time.as_millis()
        ))?;

        let line = self.expect("bestmove", tuning.move_time + self.response_timeout)?;
        let reply = line
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| ExternalError::Malformed(line.clone()))?;
        if reply == "(none)" || reply == "0000" {
            return Ok(None);
        }
        parse_uci_move(pos, reply)
            .map(Some)
            .ok_or_else(|| ExternalError::IllegalMove(reply.to_string()))
    }
}

impl<W: Write> ExternalBackend for UciSession<W> {
    fn best_move(
        &mut self,
        pos: &Position,
        tuning: &ExternalTuning,
    ) -> Result<Option<Move>, ExternalError> {
        self.request_move(pos, tuning)
    }

    fn name(&self) -> &str {
        self.engine_name()
    }
}

/// A long-lived external engine process.
pub struct ExternalEngine {
    session: UciSession<ChildStdin>,
    child: Child,
    path: String,
}

impl ExternalEngine {
    /// Start `path` and complete the UCI handshake.
    pub fn spawn(path: impl AsRef<Path>, response_timeout: Duration) -> Result<Self, ExternalError> {
        let path = path.as_ref().display().to_string();
        let mut child = Command::new(&path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ExternalError::Spawn {
                path: path.clone(),
                source,
            })?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ExternalError::Closed);
        };

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        let mut engine = Self {
            session: UciSession::new(stdin, rx, response_timeout),
            child,
            path,
        };
        engine.session.handshake()?;
        info!(path = %engine.path, name = engine.session.engine_name(), "external engine ready");
        Ok(engine)
    }

    /// Try each candidate in order; the first that starts and answers wins.
    pub fn locate<S: AsRef<str>>(
        candidates: &[S],
        response_timeout: Duration,
    ) -> Result<Self, ExternalError> {
        for candidate in candidates {
            match Self::spawn(candidate.as_ref(), response_timeout) {
                Ok(engine) => return Ok(engine),
                Err(e) => debug!(candidate = candidate.as_ref(), error = %e, "engine candidate rejected"),
            }
        }
        Err(ExternalError::NotFound {
            tried: candidates.iter().map(|c| c.as_ref().to_string()).collect(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl ExternalBackend for ExternalEngine {
    fn best_move(
        &mut self,
        pos: &Position,
        tuning: &ExternalTuning,
    ) -> Result<Option<Move>, ExternalError> {
        self.session.request_move(pos, tuning)
    }

    fn name(&self) -> &str {
        self.session.engine_name()
    }
}

impl Drop for ExternalEngine {
    fn drop(&mut self) {
        let _ = self.session.send("quit");
        for _ in 0..10 {
            if let Ok(Some(_)) = self.child.try_wait() {
                return;
            }
            thread::sleep(Duration::from_millis(20));
        }
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[cfg(test)]
#[path = "external_tests.rs"]
mod external_tests;
