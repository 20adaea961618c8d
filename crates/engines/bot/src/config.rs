//! Bot configuration, loaded from TOML.
//!
//! ```toml
//! seed = 42
//!
//! [search]
//! max_move_time_ms = 2000
//! use_book = true
//!
//! [external]
//! enabled = true
//! candidates = ["/usr/local/bin/stockfish"]
//! response_timeout_ms = 5000
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::external::DEFAULT_CANDIDATES;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub search: SearchConfig,
    pub external: ExternalConfig,
    /// Fixed RNG seed for reproducible book and random choices.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Upper bound on any single move, whatever the level asks for.
    pub max_move_time_ms: Option<u64>,
    /// Set to false to keep the opening book off at every level.
    pub use_book: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_move_time_ms: None,
            use_book: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalConfig {
    pub enabled: bool,
    pub candidates: Vec<String>,
    pub response_timeout_ms: u64,
}

impl Default for ExternalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            candidates: DEFAULT_CANDIDATES.iter().map(|c| c.to_string()).collect(),
            response_timeout_ms: 5_000,
        }
    }
}

impl ExternalConfig {
    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }
}

impl BotConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn max_move_time(&self) -> Option<Duration> {
        self.search.max_move_time_ms.map(Duration::from_millis)
    }

    /// No external engine; handy for tests and offline play.
    pub fn internal_only() -> Self {
        let mut config = Self::default();
        config.external.enabled = false;
        config
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
