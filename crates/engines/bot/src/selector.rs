//! Move-selection strategies: the built-in search, or an external UCI engine
//! backed by the built-in search.

use chess_core::{move_to_uci, Move, Position};
use tracing::{info, warn};

use crate::external::ExternalBackend;
use crate::profile::StrengthProfile;
use crate::search::Searcher;

pub trait MoveSelector: Send {
    /// A legal move for the side to move, or `None` when there is none.
    fn select(&mut self, pos: &mut Position, profile: &StrengthProfile) -> Option<Move>;

    fn name(&self) -> &str;

    /// Called between games.
    fn new_game(&mut self) {}
}

#[derive(Debug)]
pub struct InternalSelector {
    searcher: Searcher,
}

impl InternalSelector {
    pub fn new(searcher: Searcher) -> Self {
        Self { searcher }
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }
}

impl MoveSelector for InternalSelector {
    fn select(&mut self, pos: &mut Position, profile: &StrengthProfile) -> Option<Move> {
        let report = self.searcher.choose_move(pos, &profile.limits())?;
        info!(
            level = profile.level,
            mv = %move_to_uci(report.best_move),
            score = report.score,
            depth = report.depth,
            nodes = report.nodes,
            elapsed_ms = report.elapsed.as_millis() as u64,
            source = ?report.source,
            "move chosen"
        );
        Some(report.best_move)
    }

    fn name(&self) -> &str {
        "internal"
    }

    fn new_game(&mut self) {
        self.searcher.clear_tables();
    }
}

/// Asks the external engine first. The first fault disables it for good and
/// every later request goes to the internal search.
pub struct ExternalSelector {
    engine: Option<Box<dyn ExternalBackend + Send>>,
    fallback: InternalSelector,
}

impl ExternalSelector {
    pub fn new(engine: Box<dyn ExternalBackend + Send>, fallback: InternalSelector) -> Self {
        Self {
            engine: Some(engine),
            fallback,
        }
    }

    pub fn engine_active(&self) -> bool {
        self.engine.is_some()
    }
}

impl MoveSelector for ExternalSelector {
    fn select(&mut self, pos: &mut Position, profile: &StrengthProfile) -> Option<Move> {
        if let Some(engine) = self.engine.as_mut() {
            match engine.best_move(pos, &profile.external) {
                Ok(Some(mv)) => {
                    info!(level = profile.level, mv = %move_to_uci(mv), engine = engine.name(), "move chosen");
                    return Some(mv);
                }
                Ok(None) if !pos.has_legal_move() => return None,
                Ok(None) => {
                    warn!(engine = engine.name(), "external engine gave no move in a live position");
                    self.engine = None;
                }
                Err(e) => {
                    warn!(engine = engine.name(), error = %e, "external engine failed, using internal search");
                    self.engine = None;
                }
            }
        }
        self.fallback.select(pos, profile)
    }

    fn name(&self) -> &str {
        match &self.engine {
            Some(engine) => engine.name(),
            None => self.fallback.name(),
        }
    }

    fn new_game(&mut self) {
        self.fallback.new_game();
    }
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod selector_tests;
