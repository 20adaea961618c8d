//! Chess bot: alpha-beta search with an opening book, strength levels, and an
//! optional external UCI engine.
//!
//! [`BotPlayer`] is the entry point for the orchestration layer: give it a
//! FEN and a strength level and it answers with a move in coordinate
//! notation, within the level's time budget.

pub mod book;
pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod eval;
pub mod external;
pub mod ordering;
pub mod profile;
pub mod pst;
pub mod quiescence;
pub mod search;
pub mod selector;
pub mod tables;

pub use book::OpeningBook;
pub use clock::{Cancelled, SearchClock, StopHandle};
pub use config::BotConfig;
pub use driver::{MoveSource, SearchLimits, SearchReport};
pub use error::{BotError, ConfigError, ExternalError};
pub use eval::{evaluate, INFINITY};
pub use external::{ExternalBackend, ExternalEngine, UciSession};
pub use profile::{ExternalTuning, StrengthProfile};
pub use search::Searcher;
pub use selector::{ExternalSelector, InternalSelector, MoveSelector};

use chess_core::{coord_to_sq, legal_moves_from, move_to_uci, Move, PieceKind, Position};
use tracing::{info, warn};

/// The bot as seen by a game: one current position plus a move selector.
pub struct BotPlayer {
    selector: Box<dyn MoveSelector>,
    config: BotConfig,
    position: Position,
}

impl BotPlayer {
    /// Uses an external engine when enabled and one of the candidates
    /// starts; otherwise the internal search.
    pub fn new(config: BotConfig) -> Self {
        let internal = InternalSelector::new(Searcher::with_seed(config.seed));
        let selector: Box<dyn MoveSelector> = if config.external.enabled {
            match ExternalEngine::locate(
                config.external.candidates.as_slice(),
                config.external.response_timeout(),
            ) {
                Ok(engine) => {
                    info!(path = engine.path(), "using external engine");
                    Box::new(ExternalSelector::new(Box::new(engine), internal))
                }
                Err(e) => {
                    warn!(error = %e, "no external engine, using internal search");
                    Box::new(internal)
                }
            }
        } else {
            Box::new(internal)
        };
        Self::with_selector(config, selector)
    }

    /// Internal search only, whatever the config says about engines.
    pub fn internal(config: BotConfig) -> Self {
        let selector = Box::new(InternalSelector::new(Searcher::with_seed(config.seed)));
        Self::with_selector(config, selector)
    }

    pub fn with_selector(config: BotConfig, selector: Box<dyn MoveSelector>) -> Self {
        Self {
            selector,
            config,
            position: Position::startpos(),
        }
    }

    /// Best move for the position `fen` at `strength` (clamped to 1..=5).
    ///
    /// The position becomes the bot's current position. `Ok(None)` means the
    /// side to move has no legal move.
    pub fn choose_move(&mut self, fen: &str, strength: i32) -> Result<Option<String>, BotError> {
        self.position = Position::from_fen(fen)?;
        let mut profile = StrengthProfile::for_level(strength).capped(self.config.max_move_time());
        if !self.config.search.use_book {
            profile.use_book = false;
        }
        let mv = self.selector.select(&mut self.position, &profile);
        Ok(mv.map(move_to_uci))
    }

    pub fn load(&mut self, fen: &str) -> Result<(), BotError> {
        self.position = Position::from_fen(fen)?;
        Ok(())
    }

    pub fn is_legal(&self, from: &str, to: &str) -> bool {
        self.find_move(from, to).is_some()
    }

    /// Play `from`-`to` on the current position. A pawn reaching the last
    /// rank becomes a queen.
    pub fn apply(&mut self, from: &str, to: &str) -> bool {
        match self.find_move(from, to) {
            Some(mv) => {
                self.position.play(mv);
                true
            }
            None => false,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn selector_name(&self) -> &str {
        self.selector.name()
    }

    pub fn new_game(&mut self) {
        self.selector.new_game();
        self.position = Position::startpos();
    }

    fn find_move(&self, from: &str, to: &str) -> Option<Move> {
        let from = coord_to_sq(from)?;
        let to = coord_to_sq(to)?;
        legal_moves_from(&self.position, from)
            .into_iter()
            .find(|m| m.to == to && matches!(m.promo, None | Some(PieceKind::Queen)))
    }
}
