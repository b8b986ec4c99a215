//! Multiset of tile letters.
//!
//! A `LetterBag` is used both for a player's rack and for the shared draw
//! pool. It stores one count per alphabet letter rather than a list of
//! tiles, so its canonical string form is independent of insertion order.
//!
//! ## Random removal
//!
//! `remove_random` picks tiles uniformly over the individual tiles in the
//! bag, not over distinct letters: it draws an index in
//! `0..content_count()` and walks the counts in alphabet order to find
//! the letter at that index.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::BagError;
use super::letter::{Letter, ALPHABET_SIZE};
use super::rng::GameRng;

/// Count of each alphabet letter held.
///
/// Serializes as its canonical string (`"aabccz"`).
///
/// ```
/// use word_wars::core::LetterBag;
///
/// let bag: LetterBag = "zbcaac".parse().unwrap();
/// assert_eq!(bag.to_string(), "aabccz");
/// assert_eq!(bag.content_count(), 6);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LetterBag {
    counts: [u32; ALPHABET_SIZE],
}

impl LetterBag {
    /// Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bag holding the standard starting pool.
    #[must_use]
    pub fn standard_set() -> Self {
        let mut bag = Self::new();
        for letter in Letter::all() {
            bag.counts[letter.index()] = letter.standard_count();
        }
        bag
    }

    /// Parse a bag from a string of letters, in any order.
    pub fn from_letters(s: &str) -> Result<Self, BagError> {
        let mut bag = Self::new();
        for c in s.chars() {
            bag.add(Letter::from_char(c)?);
        }
        Ok(bag)
    }

    /// Add one tile.
    pub fn add(&mut self, letter: Letter) {
        self.counts[letter.index()] += 1;
    }

    /// Add every tile of `other` to this bag. `other` is left untouched.
    pub fn add_all(&mut self, other: &LetterBag) {
        for (count, extra) in self.counts.iter_mut().zip(other.counts.iter()) {
            *count += extra;
        }
    }

    /// Remove one tile.
    ///
    /// Fails with `BagError::Depleted` when no copy of `letter` is left.
    pub fn remove(&mut self, letter: Letter) -> Result<(), BagError> {
        let count = &mut self.counts[letter.index()];
        if *count == 0 {
            return Err(BagError::Depleted(letter));
        }
        *count -= 1;
        Ok(())
    }

    /// Remove up to `n` tiles chosen at random and return them as a new bag.
    ///
    /// Draws fewer than `n` tiles, without error, when the bag runs out.
    pub fn remove_random(&mut self, n: usize, rng: &mut GameRng) -> LetterBag {
        let mut removed = LetterBag::new();
        let mut remaining = self.content_count();
        for _ in 0..n {
            if remaining == 0 {
                break;
            }
            let index = rng.gen_index(remaining);
            if let Some(letter) = self.letter_at_index(index) {
                self.counts[letter.index()] -= 1;
                removed.add(letter);
                remaining -= 1;
            }
        }
        removed
    }

    /// The tile at position `i` when the bag is laid out in alphabet order.
    #[must_use]
    pub fn letter_at_index(&self, i: usize) -> Option<Letter> {
        let mut to_go = i;
        for letter in Letter::all() {
            let count = self.counts[letter.index()] as usize;
            if count > to_go {
                return Some(letter);
            }
            to_go -= count;
        }
        None
    }

    /// Copies of `letter` held.
    #[must_use]
    pub fn count(&self, letter: Letter) -> u32 {
        self.counts[letter.index()]
    }

    /// Total number of tiles held.
    #[must_use]
    pub fn content_count(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Iterate tiles in alphabet order, one item per tile.
    pub fn tiles(&self) -> impl Iterator<Item = Letter> + '_ {
        Letter::all().flat_map(move |letter| {
            std::iter::repeat(letter).take(self.counts[letter.index()] as usize)
        })
    }

    /// Canonical string: every tile, grouped in alphabet order.
    #[must_use]
    pub fn as_string(&self) -> String {
        self.tiles().map(Letter::as_char).collect()
    }
}

impl std::fmt::Display for LetterBag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl FromStr for LetterBag {
    type Err = BagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_letters(s)
    }
}

impl TryFrom<String> for LetterBag {
    type Error = BagError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_letters(&s)
    }
}

impl From<LetterBag> for String {
    fn from(bag: LetterBag) -> Self {
        bag.as_string()
    }
}

impl FromIterator<Letter> for LetterBag {
    fn from_iter<I: IntoIterator<Item = Letter>>(iter: I) -> Self {
        let mut bag = Self::new();
        for letter in iter {
            bag.add(letter);
        }
        bag
    }
}
