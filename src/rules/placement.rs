//! Word geometry and placement planning.
//!
//! A play is planned against the board and the acting player's rack
//! before anything is written, so a rejected play leaves no trace.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Board, Letter, LetterBag, PlayerId};

use super::error::GameError;

/// Direction a word runs from its starting cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Left to right: `(x + i, y)`.
    Across,
    /// Top to bottom: `(x, y + i)`.
    Down,
}

impl Direction {
    #[must_use]
    pub const fn from_across(across: bool) -> Self {
        if across {
            Direction::Across
        } else {
            Direction::Down
        }
    }

    #[must_use]
    pub const fn is_across(self) -> bool {
        matches!(self, Direction::Across)
    }

    /// Cell holding the `i`-th letter of a word starting at `(x, y)`.
    ///
    /// Saturates instead of overflowing, so absurd coordinates fail the
    /// board bounds check rather than wrapping around.
    #[must_use]
    pub const fn cell(self, x: usize, y: usize, i: usize) -> (usize, usize) {
        match self {
            Direction::Across => (x.saturating_add(i), y),
            Direction::Down => (x, y.saturating_add(i)),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Across => f.write_str("across"),
            Direction::Down => f.write_str("down"),
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "across" | "a" => Ok(Direction::Across),
            "down" | "d" => Ok(Direction::Down),
            other => Err(format!("unknown direction '{other}'")),
        }
    }
}

/// Parse a word into tile letters.
pub fn parse_word(word: &str) -> Result<SmallVec<[Letter; 8]>, GameError> {
    if word.is_empty() {
        return Err(GameError::EmptyWord);
    }
    word.chars()
        .map(|c| Letter::from_char(c).map_err(|_| GameError::InvalidLetter(c)))
        .collect()
}

/// Outcome of planning a word against the board and a rack.
///
/// Nothing has been written yet; `commit` applies the plan.
#[derive(Clone, Debug)]
pub struct PlacementPlan {
    /// Cells to fill, with the letter each receives.
    pub writes: SmallVec<[(usize, usize, Letter); 8]>,
    /// Rack after paying for the new tiles.
    pub rack_after: LetterBag,
    /// Points earned, counting letters on already-filled cells too.
    pub score: u32,
}

impl PlacementPlan {
    /// Plan `letters` starting at `(x, y)`.
    ///
    /// Empty cells consume a tile from `rack`. Filled cells cost nothing
    /// and are left as they are, but their letters still score.
    pub fn plan(
        board: &Board,
        rack: &LetterBag,
        player: &PlayerId,
        x: usize,
        y: usize,
        direction: Direction,
        letters: &[Letter],
    ) -> Result<Self, GameError> {
        let mut rack_after = rack.clone();
        let mut writes = SmallVec::new();
        let mut score = 0;

        for (i, &letter) in letters.iter().enumerate() {
            let (cx, cy) = direction.cell(x, y, i);
            if board.is_empty_at(cx, cy)? {
                rack_after
                    .remove(letter)
                    .map_err(|_| GameError::RackShortage {
                        player: player.clone(),
                        letter,
                    })?;
                writes.push((cx, cy, letter));
            }
            score += letter.value();
        }

        Ok(Self {
            writes,
            rack_after,
            score,
        })
    }

    /// Number of tiles this play puts on the board.
    #[must_use]
    pub fn new_tiles(&self) -> usize {
        self.writes.len()
    }

    /// Write the planned tiles to the board.
    pub fn commit(&self, board: &mut Board) -> Result<(), GameError> {
        for &(x, y, letter) in &self.writes {
            board.set_content(x, y, letter)?;
        }
        Ok(())
    }
}
