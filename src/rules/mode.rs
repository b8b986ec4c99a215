//! Game lifecycle mode.

use serde::{Deserialize, Serialize};

/// Lifecycle of a game.
///
/// Transitions only move forward:
/// `Unstarted -> InProgress -> {Completed | Cancelled}`, and
/// `Unstarted -> Cancelled`. Terminal modes are never left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Accepting players; no turns yet.
    #[default]
    Unstarted,
    /// Turns are being played.
    InProgress,
    /// Every player passed in a row.
    Completed,
    /// Abandoned. There is no winner.
    Cancelled,
}

impl GameMode {
    /// Completed or cancelled.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameMode::Completed | GameMode::Cancelled)
    }

    /// Short lowercase label, used for display and status lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            GameMode::Unstarted => "new",
            GameMode::InProgress => "playing",
            GameMode::Completed => "over",
            GameMode::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_modes() {
        assert!(!GameMode::Unstarted.is_terminal());
        assert!(!GameMode::InProgress.is_terminal());
        assert!(GameMode::Completed.is_terminal());
        assert!(GameMode::Cancelled.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(GameMode::InProgress.to_string(), "playing");
        assert_eq!(GameMode::Completed.to_string(), "over");
    }
}
