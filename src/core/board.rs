//! Fixed-size letter grid.
//!
//! The board is a thin row-major grid: cell `(x, y)` lives at index
//! `x + y * width`. All coordinate access is bounds-checked. Fit checks and
//! overlap handling belong to the rules engine, not here.

use serde::{Deserialize, Serialize};

use super::error::BoardError;
use super::letter::Letter;

/// Character used for an empty cell in the flat string form.
pub const EMPTY_CELL: char = '_';

/// A `width` x `height` grid of optional letters.
///
/// Serializes as `{ width, height, cells }` where `cells` is the flat
/// row-major string, `_` marking empty cells.
///
/// ```
/// use word_wars::core::{Board, Letter};
///
/// let mut board = Board::new(3, 2).unwrap();
/// board.set_content(1, 1, Letter::from_char('q').unwrap()).unwrap();
/// assert_eq!(board.to_flat_string(), "____q_");
/// assert!(board.letter_at(3, 0).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr", into = "BoardRepr")]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Option<Letter>>,
}

impl Board {
    /// Create an empty board.
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        let cells = Self::cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![None; cells],
        })
    }

    /// Cell count of a `width` x `height` grid. Zero or overflowing
    /// dimensions are rejected.
    fn cell_count(width: usize, height: usize) -> Result<usize, BoardError> {
        match width.checked_mul(height) {
            Some(n) if n > 0 => Ok(n),
            _ => Err(BoardError::Dimensions { width, height }),
        }
    }

    /// Parse a board from its flat row-major string.
    ///
    /// The string length is checked before any cells are allocated.
    pub fn from_flat_string(width: usize, height: usize, s: &str) -> Result<Self, BoardError> {
        let expected = Self::cell_count(width, height)?;
        let actual = s.chars().count();
        if actual != expected {
            return Err(BoardError::Length { expected, actual });
        }
        let mut board = Self::new(width, height)?;
        for (cell, c) in board.cells.iter_mut().zip(s.chars()) {
            *cell = if c == EMPTY_CELL {
                None
            } else {
                Some(Letter::from_char(c).map_err(|_| BoardError::Cell(c))?)
            };
        }
        Ok(board)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, BoardError> {
        if x >= self.width || y >= self.height {
            return Err(BoardError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(x + y * self.width)
    }

    /// Letter at `(x, y)`, or `None` for an empty cell.
    pub fn letter_at(&self, x: usize, y: usize) -> Result<Option<Letter>, BoardError> {
        let i = self.index(x, y)?;
        Ok(self.cells[i])
    }

    /// Write a letter into `(x, y)`.
    pub fn set_content(&mut self, x: usize, y: usize, letter: Letter) -> Result<(), BoardError> {
        let i = self.index(x, y)?;
        self.cells[i] = Some(letter);
        Ok(())
    }

    pub fn is_empty_at(&self, x: usize, y: usize) -> Result<bool, BoardError> {
        Ok(self.letter_at(x, y)?.is_none())
    }

    /// Number of cells holding a letter.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Row-major string of `width * height` characters.
    #[must_use]
    pub fn to_flat_string(&self) -> String {
        self.cells
            .iter()
            .map(|cell| cell.map_or(EMPTY_CELL, Letter::as_char))
            .collect()
    }

    /// One string per row, top to bottom.
    #[must_use]
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|cell| cell.map_or(EMPTY_CELL, Letter::as_char)).collect())
            .collect()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct BoardRepr {
    width: usize,
    height: usize,
    cells: String,
}

impl TryFrom<BoardRepr> for Board {
    type Error = BoardError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        Board::from_flat_string(repr.width, repr.height, &repr.cells)
    }
}

impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        BoardRepr {
            width: board.width,
            height: board.height,
            cells: board.to_flat_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(c: char) -> Letter {
        Letter::from_char(c).unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(10, 10).unwrap();
        assert_eq!(board.filled_count(), 0);
        assert_eq!(board.to_flat_string(), "_".repeat(100));
        assert_eq!(board.letter_at(9, 9), Ok(None));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Board::new(0, 5),
            Err(BoardError::Dimensions { width: 0, height: 5 })
        );
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert_eq!(
            Board::new(usize::MAX, 2),
            Err(BoardError::Dimensions {
                width: usize::MAX,
                height: 2
            })
        );
        assert!(matches!(
            Board::from_flat_string(usize::MAX / 2, 4, "abc"),
            Err(BoardError::Dimensions { .. })
        ));
        // A valid product that does not match the string fails before allocating.
        assert_eq!(
            Board::from_flat_string(usize::MAX / 2, 2, "abc"),
            Err(BoardError::Length {
                expected: usize::MAX - 1,
                actual: 3
            })
        );
    }

    #[test]
    fn test_set_and_read() {
        let mut board = Board::new(4, 3).unwrap();
        board.set_content(3, 2, letter('x')).unwrap();
        assert_eq!(board.letter_at(3, 2), Ok(Some(letter('x'))));
        assert_eq!(board.is_empty_at(2, 2), Ok(true));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new(4, 3).unwrap();
        let err = BoardError::OutOfBounds {
            x: 4,
            y: 0,
            width: 4,
            height: 3,
        };
        assert_eq!(board.letter_at(4, 0), Err(err.clone()));
        assert_eq!(board.set_content(4, 0, letter('a')), Err(err));
        // x within the flat length but past the row end must not wrap.
        assert!(board.letter_at(5, 1).is_err());
        assert!(board.letter_at(0, 3).is_err());
    }

    #[test]
    fn test_rows_and_display() {
        let mut board = Board::new(3, 2).unwrap();
        board.set_content(0, 0, letter('c')).unwrap();
        board.set_content(2, 1, letter('t')).unwrap();
        assert_eq!(board.rows(), vec!["c__".to_string(), "__t".to_string()]);
        assert_eq!(board.to_string(), "c__\n__t\n");
    }

    #[test]
    fn test_flat_string_roundtrip() {
        let board = Board::from_flat_string(3, 2, "ca__gt").unwrap();
        assert_eq!(board.letter_at(1, 0), Ok(Some(letter('a'))));
        assert_eq!(board.letter_at(2, 0), Ok(None));
        assert_eq!(board.to_flat_string(), "ca__gt");
    }

    #[test]
    fn test_flat_string_errors() {
        assert_eq!(
            Board::from_flat_string(3, 2, "ca_"),
            Err(BoardError::Length { expected: 6, actual: 3 })
        );
        assert_eq!(
            Board::from_flat_string(3, 1, "c#_"),
            Err(BoardError::Cell('#'))
        );
    }

    #[test]
    fn test_serde_flat_form() {
        let board = Board::from_flat_string(2, 2, "a__b").unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"{"width":2,"height":2,"cells":"a__b"}"#);
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
