//! Alphabet to bit-position mapping.

use crate::codec::Mask;
use crate::error::{CoreError, CoreResult};
use std::collections::HashMap;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum number of letters an alphabet may hold (one bit per letter).
pub const MAX_LETTERS: usize = Mask::BITS as usize;

/// Alphabet used when neither a flag nor a config file provides one.
///
/// Polish, in dictionary order.
pub const DEFAULT_ALPHABET: &str = "aąbcćdeęfghijklłmnńoóprsśtuwyzźż";

/// Normalizes a raw alphabet string.
///
/// The input is NFC-composed, all whitespace is removed, and repeated
/// letters are dropped keeping the first occurrence. Order is otherwise
/// preserved because it defines the bit positions.
#[must_use]
pub fn sanitize_alphabet(raw: &str) -> String {
    let mut seen = Vec::new();
    for ch in raw.nfc().filter(|c| !c.is_whitespace()) {
        if !seen.contains(&ch) {
            seen.push(ch);
        }
    }
    seen.into_iter().collect()
}

/// Bidirectional mapping between the letters of an alphabet and bit positions.
///
/// Letter `i` of the (sanitized) alphabet owns bit `1 << i`. The index is
/// immutable once constructed, and the same alphabet string always yields
/// the same positions, so a dictionary built with it can be searched with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphabetIndex {
    letters: Vec<char>,
    positions: HashMap<char, u32>,
}

impl AlphabetIndex {
    /// Builds an index from an alphabet string.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the sanitized alphabet is empty or
    /// holds more than [`MAX_LETTERS`] letters.
    pub fn new(alphabet: &str) -> CoreResult<Self> {
        let letters: Vec<char> = sanitize_alphabet(alphabet).chars().collect();

        if letters.is_empty() {
            return Err(CoreError::config("alphabet is empty"));
        }
        if letters.len() > MAX_LETTERS {
            return Err(CoreError::config(format!(
                "alphabet has {} letters, at most {MAX_LETTERS} fit in a mask",
                letters.len()
            )));
        }

        let positions = letters
            .iter()
            .enumerate()
            .map(|(i, &ch)| (ch, i as u32))
            .collect();

        Ok(Self { letters, positions })
    }

    /// Returns the bit position of a letter, if it belongs to the alphabet.
    #[must_use]
    pub fn position(&self, letter: char) -> Option<u32> {
        self.positions.get(&letter).copied()
    }

    /// Returns the letter owning a bit position.
    #[must_use]
    pub fn letter(&self, position: u32) -> Option<char> {
        self.letters.get(position as usize).copied()
    }

    /// Number of letters in the alphabet.
    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Always false: an empty alphabet cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Mask with every letter of the alphabet set.
    #[must_use]
    pub fn full_mask(&self) -> Mask {
        if self.letters.len() == MAX_LETTERS {
            Mask::MAX
        } else {
            (1 << self.letters.len()) - 1
        }
    }

    /// Spells out the letters of a mask in alphabet order.
    ///
    /// Bits beyond the alphabet are ignored.
    #[must_use]
    pub fn letters_of(&self, mask: Mask) -> String {
        self.letters
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << *i) != 0)
            .map(|(_, &ch)| ch)
            .collect()
    }
}

impl fmt::Display for AlphabetIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.letters {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}
