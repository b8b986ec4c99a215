//! Move records for history tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

use super::placement::Direction;

/// One played or skipped turn.
///
/// Immutable once created. An empty `word` marks a skipped turn; a skip
/// has no position or direction.
///
/// Used for:
/// - Game history shown to players
/// - Replay/debugging
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    player: PlayerId,
    x: Option<usize>,
    y: Option<usize>,
    direction: Option<Direction>,
    word: String,
    score: u32,
    time: DateTime<Utc>,
}

impl Move {
    /// Record a played word.
    #[must_use]
    pub fn played(
        player: PlayerId,
        x: usize,
        y: usize,
        direction: Direction,
        word: impl Into<String>,
        score: u32,
        time: DateTime<Utc>,
    ) -> Self {
        Self {
            player,
            x: Some(x),
            y: Some(y),
            direction: Some(direction),
            word: word.into(),
            score,
            time,
        }
    }

    /// Record a skipped turn.
    #[must_use]
    pub fn skipped(player: PlayerId, time: DateTime<Utc>) -> Self {
        Self {
            player,
            x: None,
            y: None,
            direction: None,
            word: String::new(),
            score: 0,
            time,
        }
    }

    #[must_use]
    pub fn player(&self) -> &PlayerId {
        &self.player
    }

    /// Starting cell, `None` for a skip.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        self.x.zip(self.y)
    }

    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Points this move added to the player's score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    #[must_use]
    pub fn is_skip(&self) -> bool {
        self.word.is_empty()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.position(), self.direction) {
            (Some((x, y)), Some(direction)) if !self.is_skip() => write!(
                f,
                "{} played {} {} at {},{} for {}",
                self.player, self.word, direction, x, y, self.score
            ),
            _ => write!(f, "{} skipped", self.player),
        }
    }
}
