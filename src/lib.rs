//! # word-wars
//!
//! A turn-based word-placement game engine in the spirit of Scrabble.
//!
//! ## Design Principles
//!
//! 1. **Atomic Moves**: A move is planned against the board and the
//!    player's rack before anything is written. A rejected move changes
//!    nothing, so callers may simply retry with a corrected one.
//!
//! 2. **N-Player First**: Any number of players from 1 to 255 take turns
//!    in seat order. Nothing assumes two players.
//!
//! 3. **Reproducible Draws**: All randomness goes through a seeded
//!    `GameRng` whose state is persisted with the game, so a restored
//!    game draws the tiles the original would have.
//!
//! ## Rules in Brief
//!
//! - Every letter of a played word scores its value, including letters
//!   already on the board
//! - Only letters landing on empty cells cost a rack tile, and a word must
//!   land at least one
//! - Racks refill from a shared pool after each play
//! - The game ends when every player skips in a row; the leader wins
//!
//! ## Modules
//!
//! - `core`: Letters, bags, board, players, RNG, configuration
//! - `rules`: `GameEngine` state machine, placement and scoring
//! - `store`: Snapshot-based game repository
//! - `history`: Append-only move log
//! - `service`: Request orchestration, rankings, turn reminders

pub mod core;
pub mod rules;
pub mod store;
pub mod history;
pub mod service;

// Re-export commonly used types
pub use crate::core::{
    Letter, LetterBag, Board, PlayerId, PlayerState, Seat,
    GameRng, GameRngState,
    GameConfig, ReminderConfig, WordWarsConfig,
    BagError, BoardError, ConfigError,
};

pub use crate::rules::{
    GameEngine, GameError, GameMode, Direction, Move, Placement,
    GameSnapshot, SnapshotError,
};

pub use crate::store::{GameId, GameRepository, InMemoryRepository, StoreError};

pub use crate::history::{MoveHistory, InMemoryHistory};

pub use crate::service::{
    GameService, ServiceError, MoveRequest, TurnReport, GameView, RankingRecord, Reminder,
};
