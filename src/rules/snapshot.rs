//! Persisted form of a game.
//!
//! `GameSnapshot` is a plain serde struct holding only strings, numbers
//! and timestamps: the board as its flat row-major string, every bag as
//! its canonical letter string. Storage layers keep snapshots, never
//! live engines, and `encode`/`decode` give them a compact bincode form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{BagError, Board, BoardError, GameRng, GameRngState, LetterBag, PlayerId, PlayerState, Seat};

use super::engine::GameEngine;
use super::mode::GameMode;

/// Current snapshot layout.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors turning a snapshot back into a game.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("unsupported snapshot version {0}")]
    Version(u32),

    #[error("invalid board: {0}")]
    Board(#[from] BoardError),

    #[error("invalid bag: {0}")]
    Bag(#[from] BagError),

    #[error("player {player} recorded at {found}, expected seat {expected}")]
    Seat {
        player: PlayerId,
        found: Seat,
        expected: usize,
    },

    #[error("turn points at {0} but only {1} players are seated")]
    Turn(Seat, usize),

    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] bincode::Error),
}

/// One seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub player: PlayerId,
    pub seat: Seat,
    /// Canonical rack string.
    pub letters: String,
    pub score: u32,
}

/// Storage-agnostic form of a `GameEngine`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    pub width: usize,
    pub height: usize,
    /// Row-major cells, `_` for empty.
    pub board: String,
    /// Canonical pool string.
    pub pool: String,
    pub rack_size: usize,
    pub players: Vec<PlayerSnapshot>,
    pub turn: Option<Seat>,
    pub consecutive_passes: u32,
    pub mode: GameMode,
    pub rng: GameRngState,
    pub created_at: DateTime<Utc>,
    pub last_update: DateTime<Utc>,
}

impl GameSnapshot {
    /// Serialize to bincode.
    pub fn encode(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(SnapshotError::Encode)
    }

    /// Deserialize from bincode.
    pub fn decode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(SnapshotError::Decode)
    }

    /// Does `player` hold a seat in this game?
    #[must_use]
    pub fn has_player(&self, player: &PlayerId) -> bool {
        self.players.iter().any(|p| &p.player == player)
    }
}

impl GameEngine {
    /// Capture the full game state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            version: SNAPSHOT_VERSION,
            width: self.board.width(),
            height: self.board.height(),
            board: self.board.to_flat_string(),
            pool: self.pool.as_string(),
            rack_size: self.rack_size,
            players: self
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    player: p.player().clone(),
                    seat: p.seat(),
                    letters: p.rack_string(),
                    score: p.score(),
                })
                .collect(),
            turn: self.turn,
            consecutive_passes: self.consecutive_passes,
            mode: self.mode,
            rng: self.rng.state(),
            created_at: self.created_at,
            last_update: self.last_update,
        }
    }

    /// Rebuild a game from a snapshot.
    ///
    /// The restored game continues exactly where the captured one stood,
    /// including the tiles its next draws will produce.
    pub fn restore(snapshot: &GameSnapshot) -> Result<Self, SnapshotError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version(snapshot.version));
        }

        let board = Board::from_flat_string(snapshot.width, snapshot.height, &snapshot.board)?;
        let pool = LetterBag::from_letters(&snapshot.pool)?;

        let mut players = Vec::with_capacity(snapshot.players.len());
        for (i, p) in snapshot.players.iter().enumerate() {
            if p.seat.index() != i {
                return Err(SnapshotError::Seat {
                    player: p.player.clone(),
                    found: p.seat,
                    expected: i,
                });
            }
            let rack = LetterBag::from_letters(&p.letters)?;
            players.push(PlayerState::restore(p.player.clone(), p.seat, rack, p.score));
        }

        if let Some(seat) = snapshot.turn {
            if seat.index() >= players.len() {
                return Err(SnapshotError::Turn(seat, players.len()));
            }
        }

        Ok(Self {
            board,
            pool,
            players,
            turn: snapshot.turn,
            consecutive_passes: snapshot.consecutive_passes,
            mode: snapshot.mode,
            rack_size: snapshot.rack_size,
            rng: GameRng::from_state(&snapshot.rng),
            created_at: snapshot.created_at,
            last_update: snapshot.last_update,
        })
    }
}
