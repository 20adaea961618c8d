//! Rules engine for the bot: board representation, FEN encoding, legal move
//! generation with make/undo, and draw/mate detection.

pub mod board;
pub mod error;
pub mod movegen;
pub mod perft;
pub mod types;
pub mod uci;

pub use board::*;
pub use error::FenError;
pub use movegen::*;
pub use perft::perft;
pub use types::*;
pub use uci::*;
