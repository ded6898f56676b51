//! Word to mask encoding.
//!
//! A word's mask has bit `i` set when the word contains letter `i` of the
//! alphabet. Only words whose letters all belong to the alphabet and never
//! repeat have a mask; every other word is rejected.

use crate::alphabet::AlphabetIndex;
use unicode_normalization::UnicodeNormalization;

/// Bitmask of alphabet letters.
pub type Mask = u64;

/// Number of distinct letters in a mask.
#[inline]
#[must_use]
pub fn popcount(mask: Mask) -> u32 {
    mask.count_ones()
}

/// True if every bit of `mask` is also set in `allowed`.
#[inline]
#[must_use]
pub fn is_subset(mask: Mask, allowed: Mask) -> bool {
    mask & !allowed == 0
}

/// NFC-normalizes `text` without case folding.
#[must_use]
pub fn compose(text: &str) -> String {
    text.nfc().collect()
}

/// Canonical folding shared by build and query paths.
///
/// NFC composition followed by Unicode full case folding, so multi-letter
/// expansions such as `ß` -> `ss` are treated the same way for dictionary
/// words and query letters.
#[must_use]
pub fn fold(text: &str) -> String {
    caseless::default_case_fold_str(&compose(text))
}

/// Encodes words and query letter sets against one alphabet.
#[derive(Debug, Clone)]
pub struct MaskCodec {
    alphabet: AlphabetIndex,
}

impl MaskCodec {
    /// Creates a codec over the given alphabet.
    #[must_use]
    pub fn new(alphabet: AlphabetIndex) -> Self {
        Self { alphabet }
    }

    /// Returns the alphabet.
    #[must_use]
    pub fn alphabet(&self) -> &AlphabetIndex {
        &self.alphabet
    }

    /// Encodes a word.
    ///
    /// Returns `None` if the folded word contains a letter outside the
    /// alphabet, repeats a letter, or is empty.
    #[must_use]
    pub fn encode(&self, word: &str) -> Option<Mask> {
        self.encode_folded(&fold(word))
    }

    /// Encodes a word that has already been passed through [`fold`].
    #[must_use]
    pub fn encode_folded(&self, folded: &str) -> Option<Mask> {
        let mut mask: Mask = 0;
        for ch in folded.chars() {
            let bit: Mask = 1 << self.alphabet.position(ch)?;
            if mask & bit != 0 {
                return None;
            }
            mask |= bit;
        }
        (mask != 0).then_some(mask)
    }

    /// Encodes a set of available letters.
    ///
    /// Looser than [`encode`](Self::encode): repeated letters are harmless
    /// and letters outside the alphabet are dropped. A result of `0` means
    /// no letter overlapped the alphabet.
    #[must_use]
    pub fn query_mask(&self, letters: &str) -> Mask {
        fold(letters)
            .chars()
            .filter_map(|ch| self.alphabet.position(ch))
            .fold(0, |mask: Mask, pos| mask | (1 << pos))
    }
}
