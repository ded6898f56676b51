//! Property-based test generators using proptest.
//!
//! Provides strategies for alphabets, words and query letter sets that
//! exercise the case-folding and validity rules.

use maskdict_core::Mask;
use proptest::prelude::*;

/// Strategy for a short alphabet of distinct lowercase letters, in random
/// order.
pub fn alphabet_strategy() -> impl Strategy<Value = String> {
    Just(
        "abcdefghijklmnopqrstuvwxyząćęłńóśźż"
            .chars()
            .collect::<Vec<_>>(),
    )
    .prop_shuffle()
    .prop_flat_map(|letters| {
        let len = letters.len();
        (Just(letters), 1..=len)
    })
    .prop_map(|(letters, n)| letters.into_iter().take(n).collect())
}

/// Strategy for words mixing alphabet letters, their uppercase forms, and
/// characters with non-trivial case folding.
pub fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-ZąĄęĘłŁóÓżŻßẞİﬁ\u{0301}\u{0328}]{0,12}")
        .expect("Invalid regex")
}

/// Strategy for words that use only distinct letters drawn from `alphabet`.
pub fn valid_word_strategy(alphabet: &str) -> impl Strategy<Value = String> {
    let letters: Vec<char> = alphabet.chars().collect();
    let max = letters.len();
    Just(letters)
        .prop_shuffle()
        .prop_flat_map(move |letters| (Just(letters), 1..=max))
        .prop_map(|(letters, n)| letters.into_iter().take(n).collect())
}

/// Strategy for arbitrary masks confined to the low `bits` bits.
pub fn mask_strategy(bits: u32) -> impl Strategy<Value = Mask> {
    let limit = if bits >= Mask::BITS {
        Mask::MAX
    } else {
        (1 << bits) - 1
    };
    any::<Mask>().prop_map(move |m| m & limit)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
