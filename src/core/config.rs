//! Game configuration types.
//!
//! Board dimensions and rack size vary between deployments, so they are
//! configuration rather than constants:
//! - `GameConfig`: Per-game setup (board size, rack size, seed)
//! - `ReminderConfig`: When an idle player should be reminded to play
//! - `WordWarsConfig`: Combines all configuration, loadable from TOML

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::ConfigError;

/// Default board width and height.
pub const DEFAULT_BOARD_SIZE: usize = 10;

/// Default number of tiles on a full rack.
pub const DEFAULT_RACK_SIZE: usize = 7;

/// Setup for a single game.
///
/// ```
/// use word_wars::core::GameConfig;
///
/// let config = GameConfig::default().with_board(17, 17).with_seed(7);
/// assert_eq!(config.width, 17);
/// assert_eq!(config.rack_size, 7);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board columns.
    pub width: usize,

    /// Board rows.
    pub height: usize,

    /// Tiles dealt at enrollment and refilled after each play.
    pub rack_size: usize,

    /// Seed for tile draws. `None` seeds each game from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_SIZE,
            height: DEFAULT_BOARD_SIZE,
            rack_size: DEFAULT_RACK_SIZE,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Set the board dimensions.
    #[must_use]
    pub fn with_board(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the rack size.
    #[must_use]
    pub fn with_rack_size(mut self, rack_size: usize) -> Self {
        self.rack_size = rack_size;
        self
    }

    /// Fix the seed for reproducible tile draws.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Validation(
                "game.width and game.height must be > 0".into(),
            ));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(ConfigError::Validation(format!(
                "game board {}x{} is too large",
                self.width, self.height
            )));
        }
        if self.rack_size == 0 {
            return Err(ConfigError::Validation("game.rack_size must be > 0".into()));
        }
        Ok(())
    }
}

/// Idle-player reminder policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// A game idle this long reminds the player whose turn it is.
    pub idle_minutes: i64,

    /// A player reminded within this window is not reminded again.
    pub cooldown_hours: i64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            idle_minutes: 5,
            cooldown_hours: 24,
        }
    }
}

/// Top-level configuration, loadable from TOML.
///
/// ```toml
/// [game]
/// width = 17
/// height = 17
/// seed = 42
///
/// [reminders]
/// idle_minutes = 10
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordWarsConfig {
    pub game: GameConfig,
    pub reminders: ReminderConfig,
}

impl WordWarsConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: WordWarsConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;
        self.reminders.validate()
    }
}

impl ReminderConfig {
    /// Both windows must be non-negative and fit in a `chrono::Duration`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.idle_minutes < 0 {
            return Err(ConfigError::Validation(
                "reminders.idle_minutes must be >= 0".into(),
            ));
        }
        if Duration::try_minutes(self.idle_minutes).is_none() {
            return Err(ConfigError::Validation(format!(
                "reminders.idle_minutes is out of range: {}",
                self.idle_minutes
            )));
        }
        if self.cooldown_hours < 0 {
            return Err(ConfigError::Validation(
                "reminders.cooldown_hours must be >= 0".into(),
            ));
        }
        if Duration::try_hours(self.cooldown_hours).is_none() {
            return Err(ConfigError::Validation(format!(
                "reminders.cooldown_hours is out of range: {}",
                self.cooldown_hours
            )));
        }
        Ok(())
    }
}
