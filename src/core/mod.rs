//! Core value types: letters, bags, board, players, RNG, configuration.
//!
//! These are the leaf building blocks of a game. None of them knows about
//! turns or scoring; the rules engine composes them.

pub mod letter;
pub mod bag;
pub mod board;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use letter::{Letter, ALPHABET_SIZE};
pub use bag::LetterBag;
pub use board::{Board, EMPTY_CELL};
pub use player::{PlayerId, PlayerState, Seat};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, ReminderConfig, WordWarsConfig, DEFAULT_BOARD_SIZE, DEFAULT_RACK_SIZE};
pub use error::{BagError, BoardError, ConfigError};
