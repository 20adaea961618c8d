//! Error types for the bot.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chess_core::FenError;
use thiserror::Error;

/// Errors surfaced to callers of [`crate::BotPlayer`].
#[derive(Debug, Error)]
pub enum BotError {
    /// The position string could not be decoded; no search was started.
    #[error("invalid position: {0}")]
    InvalidPosition(#[from] FenError),
}

/// Faults of an external UCI engine. These never reach the caller of the
/// bot; the selector logs them and falls back to the internal search.
#[derive(Debug, Error)]
pub enum ExternalError {
    #[error("no engine could be started (tried {tried:?})")]
    NotFound { tried: Vec<String> },

    #[error("failed to start engine `{path}`: {source}")]
    Spawn {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("engine i/o failed: {0}")]
    Io(#[from] io::Error),

    #[error("engine did not answer `{expected}` within {timeout:?}")]
    Timeout { expected: String, timeout: Duration },

    #[error("engine closed its output")]
    Closed,

    #[error("engine replied with illegal move `{0}`")]
    IllegalMove(String),

    #[error("malformed engine reply `{0}`")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
