//! In-process repository.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::core::PlayerId;
use crate::rules::{GameEngine, GameSnapshot};

use super::{GameId, GameRepository, StoreError};

/// Repository keeping bincode-encoded snapshots in memory.
///
/// Every load decodes and restores, so games read back from here have
/// been through the same serialization path a durable store would use.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    games: FxHashMap<GameId, Vec<u8>>,
    order: Vec<GameId>,
    next_id: u64,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored games.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn decode(&self, id: GameId) -> Result<GameSnapshot, StoreError> {
        let bytes = self.games.get(&id).ok_or(StoreError::NotFound(id))?;
        GameSnapshot::decode(bytes).map_err(|source| StoreError::Corrupt { id, source })
    }
}

impl GameRepository for InMemoryRepository {
    fn register(&mut self, game: &GameEngine) -> Result<GameId, StoreError> {
        let bytes = game.snapshot().encode()?;
        self.next_id += 1;
        let id = GameId::new(self.next_id);
        self.games.insert(id, bytes);
        self.order.push(id);
        debug!(%id, "game registered");
        Ok(id)
    }

    fn find(&self, id: GameId) -> Result<GameEngine, StoreError> {
        let snapshot = self.decode(id)?;
        GameEngine::restore(&snapshot).map_err(|source| StoreError::Corrupt { id, source })
    }

    fn update(&mut self, id: GameId, game: &GameEngine) -> Result<(), StoreError> {
        let slot = self.games.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *slot = game.snapshot().encode()?;
        Ok(())
    }

    fn ids(&self) -> Vec<GameId> {
        self.order.clone()
    }

    // Player lookup only needs the seat list, so skip restoring the board.
    fn games_for_player(&self, player: &PlayerId) -> Result<Vec<GameId>, StoreError> {
        let mut ids = Vec::new();
        for &id in &self.order {
            if self.decode(id)?.has_player(player) {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}
