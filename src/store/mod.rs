//! Game persistence.
//!
//! Games are stored as `GameSnapshot`s, never as live engines. A
//! `GameRepository` hands out a freshly restored `GameEngine` on every
//! `find`, and callers write it back with `update` once they are done.

mod id;
mod memory;

pub use id::GameId;
pub use memory::InMemoryRepository;

use thiserror::Error;

use crate::core::PlayerId;
use crate::rules::{GameEngine, GameMode, SnapshotError};

/// Errors raised by repositories.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No game is stored under this id.
    #[error("no game with id {0}")]
    NotFound(GameId),

    /// Stored bytes could not be turned back into a game.
    #[error("game {id} is unreadable: {source}")]
    Corrupt {
        id: GameId,
        #[source]
        source: SnapshotError,
    },

    /// A game could not be serialized for storage.
    #[error(transparent)]
    Encode(#[from] SnapshotError),
}

impl StoreError {
    /// Machine-readable code for transport layers.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "NOT_FOUND",
            StoreError::Corrupt { .. } => "CORRUPT",
            StoreError::Encode(_) => "ENCODE",
        }
    }

    /// Only a missing game is the caller's to fix.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Storage for games.
///
/// ## Implementation Notes
///
/// - `register` assigns a new id; ids are never reused
/// - `find` returns an independent copy; mutating it changes nothing
///   until `update` is called
/// - `ids` lists games in registration order
pub trait GameRepository {
    /// Store a new game and return its id.
    fn register(&mut self, game: &GameEngine) -> Result<GameId, StoreError>;

    /// Load a game.
    fn find(&self, id: GameId) -> Result<GameEngine, StoreError>;

    /// Overwrite a stored game.
    fn update(&mut self, id: GameId, game: &GameEngine) -> Result<(), StoreError>;

    /// Ids of every stored game.
    fn ids(&self) -> Vec<GameId>;

    /// Every game currently in `mode`.
    fn all_with_mode(&self, mode: GameMode) -> Result<Vec<(GameId, GameEngine)>, StoreError> {
        let mut games = Vec::new();
        for id in self.ids() {
            let game = self.find(id)?;
            if game.mode() == mode {
                games.push((id, game));
            }
        }
        Ok(games)
    }

    /// Ids of every game `player` is seated in.
    fn games_for_player(&self, player: &PlayerId) -> Result<Vec<GameId>, StoreError> {
        let mut ids = Vec::new();
        for id in self.ids() {
            if self.find(id)?.player_state(player).is_some() {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}
