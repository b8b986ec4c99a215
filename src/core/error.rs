//! Error types for the core value types and configuration.

use std::path::PathBuf;

use thiserror::Error;

use super::letter::Letter;

/// Errors raised by `LetterBag` and letter parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BagError {
    /// No copy of this letter is left in the bag.
    #[error("no letter '{0}' to remove")]
    Depleted(Letter),

    /// Character is not part of the tile alphabet.
    #[error("'{0}' is not a tile letter")]
    InvalidLetter(char),
}

/// Errors raised by `Board` access and parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Coordinate outside the grid.
    #[error("cannot access board position ({x},{y}) on a {width}x{height} board")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// A board needs at least one row and one column.
    #[error("invalid board dimensions {width}x{height}")]
    Dimensions { width: usize, height: usize },

    /// Flat board string does not match the board dimensions.
    #[error("board string has {actual} cells, expected {expected}")]
    Length { expected: usize, actual: usize },

    /// Flat board string holds a character that is neither a letter nor the empty marker.
    #[error("invalid board cell '{0}'")]
    Cell(char),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
