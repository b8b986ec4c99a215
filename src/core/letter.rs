//! Tile letters and their point values.
//!
//! The alphabet is fixed at the 26 lowercase ASCII letters. A `Letter` is
//! an index into that alphabet, so it is `Copy`, hashes cheaply, and can
//! index the per-letter count array of a `LetterBag` directly.

use serde::{Deserialize, Serialize};

use super::error::BagError;

/// Number of letters in the alphabet.
pub const ALPHABET_SIZE: usize = 26;

/// Point value of each letter, in alphabet order.
const LETTER_VALUES: [u32; ALPHABET_SIZE] = [
    1, 2, 2, 2, 1, 3, 3, 2, 1, 5, 3, 2, 1, // a..=m
    1, 1, 2, 5, 2, 1, 1, 2, 3, 3, 9, 5, 5, // n..=z
];

/// A single tile letter.
///
/// ```
/// use word_wars::core::Letter;
///
/// let c = Letter::from_char('C').unwrap();
/// assert_eq!(c.as_char(), 'c');
/// assert_eq!(c.value(), 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Letter(u8);

impl Letter {
    /// Parse a letter, case-insensitively.
    pub fn from_char(c: char) -> Result<Self, BagError> {
        let lower = c.to_ascii_lowercase();
        if lower.is_ascii_lowercase() {
            Ok(Self(lower as u8 - b'a'))
        } else {
            Err(BagError::InvalidLetter(c))
        }
    }

    /// Alphabet position (0 = 'a').
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Lowercase character for this letter.
    #[must_use]
    pub const fn as_char(self) -> char {
        (b'a' + self.0) as char
    }

    /// Points scored for this letter when it is part of a played word.
    #[must_use]
    pub const fn value(self) -> u32 {
        LETTER_VALUES[self.0 as usize]
    }

    /// Copies of this letter in the standard starting pool.
    ///
    /// Cheap letters are common: `10 / value`, rounded down.
    #[must_use]
    pub const fn standard_count(self) -> u32 {
        10 / self.value()
    }

    /// Iterate the alphabet in order.
    pub fn all() -> impl Iterator<Item = Letter> {
        (0..ALPHABET_SIZE as u8).map(Letter)
    }
}

impl TryFrom<char> for Letter {
    type Error = BagError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c)
    }
}

impl From<Letter> for char {
    fn from(letter: Letter) -> Self {
        letter.as_char()
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
