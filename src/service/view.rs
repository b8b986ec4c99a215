//! Request and response shapes of the game service.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::rules::{Direction, GameEngine, GameMode};
use crate::store::GameId;

/// A player's move request. An empty `word` skips the turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub x: usize,
    pub y: usize,
    pub direction: Direction,
    pub word: String,
}

impl MoveRequest {
    #[must_use]
    pub fn play(x: usize, y: usize, direction: Direction, word: impl Into<String>) -> Self {
        Self {
            x,
            y,
            direction,
            word: word.into(),
        }
    }

    #[must_use]
    pub fn skip() -> Self {
        Self::play(0, 0, Direction::Across, "")
    }

    #[must_use]
    pub fn is_skip(&self) -> bool {
        self.word.is_empty()
    }
}

/// What a client sees of a game: the board, and the rack and score of
/// whoever is up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub game: GameId,
    /// Flat row-major board string.
    pub board: String,
    pub rows: Vec<String>,
    pub mode: GameMode,
    /// Player whose turn it is, if the game is in progress.
    pub turn: Option<PlayerId>,
    /// Rack of the player whose turn it is; empty when nobody is up.
    pub letters: String,
    /// Score of the player whose turn it is; zero when nobody is up.
    pub score: u32,
}

impl GameView {
    #[must_use]
    pub fn of(id: GameId, game: &GameEngine) -> Self {
        let up = game.current_player();
        Self {
            game: id,
            board: game.board().to_flat_string(),
            rows: game.board().rows(),
            mode: game.mode(),
            turn: up.map(|p| p.player().clone()),
            letters: up.map(|p| p.rack_string()).unwrap_or_default(),
            score: up.map_or(0, |p| p.score()),
        }
    }
}

/// Outcome of `make_move`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Game state after the move.
    pub view: GameView,
    /// Points the move added.
    pub delta: u32,
    /// Mover's score after the move.
    pub total: u32,
    pub description: String,
}

/// Message shown to a player after their move.
///
/// ```
/// use word_wars::service::last_play_description;
///
/// assert_eq!(last_play_description(0, 0), "");
/// assert_eq!(last_play_description(4, 4), "You added 4 for a total score of 4.");
/// assert_eq!(
///     last_play_description(7, 11),
///     "Good job!  You added 7 for a total score of 11."
/// );
/// ```
#[must_use]
pub fn last_play_description(delta: u32, total: u32) -> String {
    if total == 0 {
        return String::new();
    }
    let summary = format!("You added {delta} for a total score of {total}.");
    if delta > 5 {
        format!("Good job!  {summary}")
    } else {
        summary
    }
}

/// Win/loss tally of one player over completed games.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingRecord {
    pub player: PlayerId,
    pub wins: u32,
    pub losses: u32,
}

impl RankingRecord {
    /// `wins / (1 + losses)`, the ranking key.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        f64::from(self.wins) / (1.0 + f64::from(self.losses))
    }
}
