//! Append-only move history.
//!
//! Every played or skipped turn is recorded against its game. Records are
//! never edited or removed.

use im::Vector;
use rustc_hash::FxHashMap;

use crate::rules::Move;
use crate::store::GameId;

/// Per-game move log.
pub trait MoveHistory {
    /// Append a move to a game's history.
    fn record(&mut self, game: GameId, entry: Move);

    /// Moves of a game, oldest first.
    ///
    /// Moves with equal timestamps keep the order they were recorded in.
    fn history_for(&self, game: GameId) -> Vec<Move>;
}

/// History kept in memory.
///
/// Each game's log is an `im::Vector`, so handing out a copy of a long
/// history is cheap.
#[derive(Clone, Debug, Default)]
pub struct InMemoryHistory {
    games: FxHashMap<GameId, Vector<Move>>,
}

impl InMemoryHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared view of a game's log in recording order.
    #[must_use]
    pub fn log(&self, game: GameId) -> Vector<Move> {
        self.games.get(&game).cloned().unwrap_or_default()
    }
}

impl MoveHistory for InMemoryHistory {
    fn record(&mut self, game: GameId, entry: Move) {
        self.games.entry(game).or_default().push_back(entry);
    }

    fn history_for(&self, game: GameId) -> Vec<Move> {
        let mut moves: Vec<Move> = self
            .games
            .get(&game)
            .map(|log| log.iter().cloned().collect())
            .unwrap_or_default();
        moves.sort_by_key(Move::time);
        moves
    }
}
