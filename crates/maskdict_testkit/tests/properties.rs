//! Property tests for encoding, sharding and matching.

use maskdict_core::{
    fold, is_subset, popcount, AlphabetIndex, BuildOptions, MaskCodec, MatchMode, Reservoir,
    SearchOptions, ShardReader,
};
use maskdict_testkit::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyząęłóżś";

fn codec() -> MaskCodec {
    MaskCodec::new(AlphabetIndex::new(ALPHABET).unwrap())
}

proptest! {
    #![proptest_config(PropTestConfig::default().to_proptest_config())]

    #[test]
    fn fold_is_idempotent_under_encode(word in word_strategy()) {
        let c = codec();
        let once = fold(&word);
        let twice = fold(&once);
        prop_assert_eq!(c.encode(&once), c.encode(&twice));
    }

    #[test]
    fn encode_is_deterministic(word in word_strategy()) {
        let c = codec();
        prop_assert_eq!(c.encode(&word), c.encode(&word));
    }

    #[test]
    fn foreign_letters_invalidate(word in word_strategy(), foreign in "[0-9 #\\-]") {
        let c = codec();
        let mut polluted = word.clone();
        polluted.push_str(&foreign);
        prop_assert_eq!(c.encode(&polluted), None);
        let mut prefixed = foreign.clone();
        prefixed.push_str(&word);
        prop_assert_eq!(c.encode(&prefixed), None);
    }

    #[test]
    fn repeated_letters_invalidate(word in valid_word_strategy("abcdefgh"), pick in 0usize..8, upper: bool) {
        let c = codec();
        let letters: Vec<char> = word.chars().collect();
        let repeat = letters[pick % letters.len()];
        let repeat = if upper { repeat.to_ascii_uppercase() } else { repeat };
        let doubled: String = word.chars().chain(std::iter::once(repeat)).collect();
        prop_assert_eq!(c.encode(&doubled), None);
    }

    #[test]
    fn valid_mask_matches_letter_count(word in valid_word_strategy(ALPHABET)) {
        let mask = codec().encode(&word).unwrap();
        prop_assert_eq!(popcount(mask) as usize, word.chars().count());
        prop_assert_eq!(codec().encode(&word.to_uppercase()), Some(mask));
    }

    #[test]
    fn subset_is_monotonic(m in mask_strategy(16), allowed in mask_strategy(16), extra in mask_strategy(16)) {
        if is_subset(m, allowed) {
            prop_assert!(is_subset(m, allowed | extra));
        }
    }

    #[test]
    fn exact_implies_subset(m in mask_strategy(8), allowed in mask_strategy(8)) {
        if MatchMode::Exact.accepts(m, allowed) {
            prop_assert!(MatchMode::Subset.accepts(m, allowed));
        }
    }

    #[test]
    fn query_mask_ignores_duplicates(letters in valid_word_strategy("abcdef")) {
        let c = codec();
        let doubled = format!("{letters}{letters}");
        prop_assert_eq!(c.query_mask(&letters), c.query_mask(&doubled));
        prop_assert_eq!(c.query_mask(&letters), c.encode(&letters).unwrap());
    }
}

proptest! {
    #![proptest_config(PropTestConfig::quick().to_proptest_config())]

    #[test]
    fn every_valid_word_lands_in_one_shard(words in prop::collection::vec(word_strategy(), 0..40)) {
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let dict = TestDictionary::build(ALPHABET, &refs);
        let c = codec();

        let mut expected: HashMap<String, usize> = HashMap::new();
        for word in &words {
            let trimmed = word.trim();
            if trimmed.is_empty() {
                continue;
            }
            if c.encode(trimmed).is_some() {
                *expected.entry(fold(trimmed)).or_default() += 1;
            }
        }

        let mut seen: HashMap<String, usize> = HashMap::new();
        for key in dict.manifest.shard_keys() {
            let path = dict.shard_path(key).unwrap();
            for record in ShardReader::open(&path).unwrap() {
                let record = record.unwrap();
                prop_assert_eq!(popcount(record.mask), key);
                prop_assert_eq!(c.encode(&record.word), Some(record.mask));
                *seen.entry(record.word).or_default() += 1;
            }
        }

        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn search_agrees_with_brute_force(
        words in prop::collection::vec(valid_word_strategy("abcdef"), 1..30),
        letters in valid_word_strategy("abcdef"),
        exact: bool,
    ) {
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let dict = TestDictionary::build_with(BuildOptions::new().alphabet("abcdef"), &refs);
        let mode = if exact { MatchMode::Exact } else { MatchMode::Subset };
        let report = dict
            .searcher()
            .search(&letters, &SearchOptions::new().mode(mode).limit(usize::MAX))
            .unwrap();

        let c = MaskCodec::new(AlphabetIndex::new("abcdef").unwrap());
        let allowed = c.query_mask(&letters);
        let mut expected: Vec<String> = words
            .iter()
            .filter(|w| mode.accepts(c.encode(w).unwrap(), allowed))
            .cloned()
            .collect();
        expected.sort();

        prop_assert_eq!(report.found as usize, expected.len());
        prop_assert_eq!(report.words, expected);
    }
}

#[test]
fn reservoir_frequency_converges() {
    const N: usize = 12;
    const K: usize = 4;
    const TRIALS: u64 = 30_000;

    let mut hits = [0u32; N];
    for seed in 0..TRIALS {
        let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);
        let mut reservoir = Reservoir::new(K);
        for i in 0..N {
            reservoir.offer(i, &mut rng);
        }
        for &i in reservoir.items() {
            hits[i] += 1;
        }
    }

    let expected = K as f64 / N as f64;
    for (i, &h) in hits.iter().enumerate() {
        let freq = f64::from(h) / TRIALS as f64;
        assert!(
            (freq - expected).abs() < 0.015,
            "item {i}: frequency {freq}, expected {expected}"
        );
    }
}

#[test]
fn shuffled_search_is_fair() {
    let words = ["a", "b", "c", "d", "e", "f", "g", "h"];
    let dict = TestDictionary::build("abcdefgh", &words);
    let searcher = dict.searcher();

    let mut hits: HashMap<String, u32> = HashMap::new();
    let trials = 4_000u64;
    for seed in 0..trials {
        let options = SearchOptions::new().limit(2).shuffle(true).seed(seed);
        let report = searcher.search("abcdefgh", &options).unwrap();
        assert_eq!(report.found, 8);
        assert_eq!(report.shown(), 2);
        for w in report.words {
            *hits.entry(w).or_default() += 1;
        }
    }

    for w in words {
        let freq = f64::from(hits[w]) / trials as f64;
        assert!((freq - 0.25).abs() < 0.04, "{w}: frequency {freq}");
    }
}
