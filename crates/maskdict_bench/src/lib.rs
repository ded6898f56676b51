//! Benchmark utilities.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Alphabet used by the generated wordlists.
pub const BENCH_ALPHABET: &str = maskdict_core::DEFAULT_ALPHABET;

/// Generates `count` random words of 2 to 12 letters over `alphabet`.
///
/// Roughly half the words repeat a letter and so fail validation, which
/// keeps the rejection path in the measurement.
pub fn random_words(alphabet: &str, count: usize, seed: u64) -> Vec<String> {
    let letters: Vec<char> = alphabet.chars().collect();
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(2..=12.min(letters.len()));
            if rng.gen_bool(0.5) {
                letters.choose_multiple(&mut rng, len).collect()
            } else {
                (0..len)
                    .map(|_| letters[rng.gen_range(0..letters.len())])
                    .collect()
            }
        })
        .collect()
}

/// Joins words into wordlist file contents.
pub fn wordlist(words: &[String]) -> Vec<u8> {
    let mut out = words.join("\n").into_bytes();
    out.push(b'\n');
    out
}
