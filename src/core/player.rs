//! Player identity and per-game player state.
//!
//! ## PlayerId
//!
//! Opaque identity of a player, owned by whatever account system sits
//! outside the engine. Compared by value.
//!
//! ## Seat
//!
//! Zero-based turn index, fixed at enrollment. Seat order is turn order.
//!
//! ## PlayerState
//!
//! One player's participation in one game: identity, seat, rack and
//! cumulative score.

use serde::{Deserialize, Serialize};

use super::bag::LetterBag;
use super::rng::GameRng;

/// Opaque player identity.
///
/// ```
/// use word_wars::core::PlayerId;
///
/// let joe = PlayerId::new("joe");
/// assert_eq!(joe, PlayerId::from("joe"));
/// assert_eq!(joe.to_string(), "joe");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turn index supporting up to 255 players.
///
/// Seats are 0-based: the first enrolled player sits at `Seat(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat(pub u8);

impl Seat {
    /// Create a new seat.
    #[must_use]
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Seat that plays after this one in a game of `player_count` players.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        if self.index() + 1 >= player_count {
            Seat(0)
        } else {
            Seat(self.0 + 1)
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// One player's state within one game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerState {
    player: PlayerId,
    seat: Seat,
    /// Tiles currently held.
    pub(crate) rack: LetterBag,
    /// Cumulative score. Only ever grows.
    pub(crate) score: u32,
}

impl PlayerState {
    /// Seat a player with an explicit rack and zero score.
    #[must_use]
    pub fn new(player: PlayerId, seat: Seat, rack: LetterBag) -> Self {
        Self {
            player,
            seat,
            rack,
            score: 0,
        }
    }

    /// Seat a player with `rack_size` tiles drawn from `pool`.
    pub fn draw(
        player: PlayerId,
        seat: Seat,
        pool: &mut LetterBag,
        rack_size: usize,
        rng: &mut GameRng,
    ) -> Self {
        let rack = pool.remove_random(rack_size, rng);
        Self::new(player, seat, rack)
    }

    /// Rebuild a player state from persisted parts.
    #[must_use]
    pub(crate) fn restore(player: PlayerId, seat: Seat, rack: LetterBag, score: u32) -> Self {
        Self {
            player,
            seat,
            rack,
            score,
        }
    }

    #[must_use]
    pub fn player(&self) -> &PlayerId {
        &self.player
    }

    #[must_use]
    pub fn seat(&self) -> Seat {
        self.seat
    }

    #[must_use]
    pub fn rack(&self) -> &LetterBag {
        &self.rack
    }

    /// Canonical string of the rack.
    #[must_use]
    pub fn rack_string(&self) -> String {
        self.rack.as_string()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Does this state belong to `player`?
    #[must_use]
    pub fn is(&self, player: &PlayerId) -> bool {
        &self.player == player
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Player {} has score {} and letters '{}'",
            self.player, self.score, self.rack
        )
    }
}
