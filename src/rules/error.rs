//! Game rule errors.
//!
//! Every variant is an expected, recoverable condition at the caller's
//! request boundary: the engine state is unchanged and the caller may
//! retry with a corrected move.
//!
//! | Error | Code |
//! |-------|------|
//! | [`GameError::InvalidState`] | `INVALID_STATE` |
//! | [`GameError::WrongTurn`] | `WRONG_TURN` |
//! | [`GameError::RackShortage`] | `RACK_SHORTAGE` |
//! | [`GameError::NoNewLetters`] | `NO_NEW_LETTERS` |
//! | [`GameError::Board`] | `OUT_OF_BOUNDS` / `INVALID_BOARD` |
//! | [`GameError::UnknownPlayer`] | `UNKNOWN_PLAYER` |
//! | [`GameError::AlreadyEnrolled`] | `ALREADY_ENROLLED` |
//! | [`GameError::InvalidLetter`] | `INVALID_LETTER` |
//! | [`GameError::EmptyWord`] | `EMPTY_WORD` |
//! | [`GameError::InvalidConfig`] | `INVALID_CONFIG` |

use thiserror::Error;

use crate::core::{BoardError, Letter, PlayerId};

use super::mode::GameMode;
use super::placement::Direction;

/// Why an operation is not allowed in the current lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateConflict {
    #[error("game is {0}")]
    Mode(GameMode),

    #[error("no players enrolled")]
    NoPlayers,

    #[error("all {0} seats are taken")]
    TableFull(usize),
}

/// Errors returned by `GameEngine` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Operation is forbidden in the current mode.
    #[error("cannot {operation}: {conflict}")]
    InvalidState {
        operation: &'static str,
        conflict: StateConflict,
    },

    /// Someone other than the player at the turn cursor tried to act.
    #[error("not turn yet for {player}; waiting on {expected}")]
    WrongTurn { player: PlayerId, expected: PlayerId },

    /// The acting player's rack lacks a letter the word needs.
    #[error("{player} has no '{letter}' to play")]
    RackShortage { player: PlayerId, letter: Letter },

    /// The word lies entirely on filled cells.
    #[error("playing {word} {direction} at {x},{y} adds no letters to the board")]
    NoNewLetters {
        word: String,
        x: usize,
        y: usize,
        direction: Direction,
    },

    /// Board coordinate outside the grid, or invalid board dimensions.
    #[error(transparent)]
    Board(#[from] BoardError),

    /// Player never enrolled in this game.
    #[error("{0} is not a player")]
    UnknownPlayer(PlayerId),

    /// Player is already seated in this game.
    #[error("{0} is already a player")]
    AlreadyEnrolled(PlayerId),

    /// Word contains a character outside the tile alphabet.
    #[error("'{0}' is not a tile letter")]
    InvalidLetter(char),

    /// Played words must have at least one letter.
    #[error("word is empty")]
    EmptyWord,

    /// Game setup failed validation.
    #[error("invalid game config: {0}")]
    InvalidConfig(String),
}

impl GameError {
    pub(crate) fn invalid_state(operation: &'static str, conflict: StateConflict) -> Self {
        GameError::InvalidState {
            operation,
            conflict,
        }
    }

    /// Machine-readable code for transport layers.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GameError::InvalidState { .. } => "INVALID_STATE",
            GameError::WrongTurn { .. } => "WRONG_TURN",
            GameError::RackShortage { .. } => "RACK_SHORTAGE",
            GameError::NoNewLetters { .. } => "NO_NEW_LETTERS",
            GameError::Board(BoardError::OutOfBounds { .. }) => "OUT_OF_BOUNDS",
            GameError::Board(_) => "INVALID_BOARD",
            GameError::UnknownPlayer(_) => "UNKNOWN_PLAYER",
            GameError::AlreadyEnrolled(_) => "ALREADY_ENROLLED",
            GameError::InvalidLetter(_) => "INVALID_LETTER",
            GameError::EmptyWord => "EMPTY_WORD",
            GameError::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }

    /// Whether the caller can retry with a corrected request.
    ///
    /// Rule violations never corrupt engine state, so this is always true.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_state_display() {
        let err = GameError::invalid_state("enroll", StateConflict::Mode(GameMode::InProgress));
        assert_eq!(err.to_string(), "cannot enroll: game is playing");
        assert_eq!(err.code(), "INVALID_STATE");

        let err = GameError::invalid_state("start", StateConflict::NoPlayers);
        assert_eq!(err.to_string(), "cannot start: no players enrolled");
    }

    #[test]
    fn test_no_new_letters_display() {
        let err = GameError::NoNewLetters {
            word: "cat".into(),
            x: 0,
            y: 0,
            direction: Direction::Across,
        };
        assert_eq!(
            err.to_string(),
            "playing cat across at 0,0 adds no letters to the board"
        );
    }

    #[test]
    fn test_board_codes() {
        let oob = GameError::from(BoardError::OutOfBounds {
            x: 1,
            y: 12,
            width: 10,
            height: 10,
        });
        assert_eq!(oob.code(), "OUT_OF_BOUNDS");
        let dims = GameError::from(BoardError::Dimensions { width: 0, height: 0 });
        assert_eq!(dims.code(), "INVALID_BOARD");
    }

    #[test]
    fn test_all_recoverable() {
        assert!(GameError::EmptyWord.is_recoverable());
        assert!(GameError::UnknownPlayer(PlayerId::new("x")).is_recoverable());
    }
}
