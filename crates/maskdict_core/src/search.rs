//! Letter-set search over a built dictionary.

use crate::alphabet::AlphabetIndex;
use crate::codec::{popcount, Mask, MaskCodec};
use crate::config::{MatchMode, SearchOptions};
use crate::error::{CoreError, CoreResult};
use crate::manifest::Manifest;
use crate::sample::{FirstN, Reservoir};
use crate::shard::{RowError, ShardReader};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Per-run counters, including the absorbed shard problems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Shards opened and streamed.
    pub shards_scanned: usize,
    /// Shards listed in the manifest but absent or unopenable.
    pub missing_shards: usize,
    /// Rows skipped because they did not parse.
    pub bad_rows: u64,
    /// Shards abandoned part-way because the stream failed.
    pub truncated_shards: usize,
    /// Rows tested against the allowed mask.
    pub rows_scanned: u64,
}

/// Outcome of a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    /// Mask of the query letters.
    pub allowed: Mask,
    /// Number of distinct query letters in the alphabet.
    pub target_pop: u32,
    /// Total matching words, including those beyond the limit.
    pub found: u64,
    /// Collected words: sorted, or in reservoir order when shuffled.
    /// Empty in count-only mode.
    pub words: Vec<String>,
    /// Run counters.
    pub stats: SearchStats,
}

impl SearchReport {
    /// Number of collected words.
    #[must_use]
    pub fn shown(&self) -> usize {
        self.words.len()
    }
}

enum Collector {
    CountOnly,
    First(FirstN<String>),
    Sample(Reservoir<String>),
}

/// Read-only handle on a built dictionary.
#[derive(Debug, Clone)]
pub struct Searcher {
    root: PathBuf,
    manifest: Manifest,
    codec: MaskCodec,
}

impl Searcher {
    /// Opens the dictionary at `root`.
    ///
    /// The alphabet always comes from the manifest.
    ///
    /// # Errors
    ///
    /// Fails if the manifest is missing or unparsable, if it maps no shard
    /// files (`EmptyManifest`), or if its alphabet is unusable.
    pub fn open(root: &Path) -> CoreResult<Self> {
        let manifest = Manifest::load(root)?;
        Self::with_manifest(root, manifest)
    }

    /// Wraps an already-loaded manifest.
    ///
    /// # Errors
    ///
    /// Same as [`open`](Self::open), minus the loading step.
    pub fn with_manifest(root: &Path, manifest: Manifest) -> CoreResult<Self> {
        if manifest.files.is_empty() {
            return Err(CoreError::EmptyManifest);
        }
        let alphabet = AlphabetIndex::new(&manifest.alphabet).map_err(|e| {
            CoreError::invalid_manifest(format!("unusable alphabet: {e}"))
        })?;
        Ok(Self {
            root: root.to_path_buf(),
            manifest,
            codec: MaskCodec::new(alphabet),
        })
    }

    /// The dictionary manifest.
    #[must_use]
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// The codec built from the manifest alphabet.
    #[must_use]
    pub fn codec(&self) -> &MaskCodec {
        &self.codec
    }

    /// Encodes query letters.
    ///
    /// # Errors
    ///
    /// Returns `EmptySelection` if no letter belongs to the alphabet.
    pub fn allowed_mask(&self, letters: &str) -> CoreResult<Mask> {
        match self.codec.query_mask(letters) {
            0 => Err(CoreError::EmptySelection),
            mask => Ok(mask),
        }
    }

    /// Shard keys worth scanning for `allowed`, ascending.
    #[must_use]
    pub fn candidate_shards(&self, allowed: Mask, mode: MatchMode) -> Vec<u32> {
        let target_pop = popcount(allowed);
        self.manifest
            .shard_keys()
            .filter(|&key| mode.selects_shard(key, target_pop))
            .collect()
    }

    /// Runs a search, seeding the sampler from `options.seed` or entropy.
    ///
    /// # Errors
    ///
    /// Returns `EmptySelection` if the letters miss the alphabet entirely.
    /// Shard-level problems are logged and counted, not returned.
    pub fn search(&self, letters: &str, options: &SearchOptions) -> CoreResult<SearchReport> {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.search_with_rng(letters, options, &mut rng)
    }

    /// Runs a search drawing sampling decisions from `rng`.
    ///
    /// # Errors
    ///
    /// See [`search`](Self::search).
    pub fn search_with_rng<R: Rng + ?Sized>(
        &self,
        letters: &str,
        options: &SearchOptions,
        rng: &mut R,
    ) -> CoreResult<SearchReport> {
        let allowed = self.allowed_mask(letters)?;
        let target_pop = popcount(allowed);
        let keys = self.candidate_shards(allowed, options.mode);
        debug!(
            allowed,
            target_pop,
            mode = %options.mode,
            ?keys,
            "selected shards"
        );
        if keys.is_empty() {
            info!(target_pop, mode = %options.mode, "No shards match the selection");
        }

        let mut collector = if options.count_only {
            Collector::CountOnly
        } else if options.shuffle {
            Collector::Sample(Reservoir::new(options.limit))
        } else {
            Collector::First(FirstN::new(options.limit))
        };
        let mut stats = SearchStats::default();
        let mut found = 0u64;

        for key in keys {
            let Some(path) = self.manifest.shard_path(&self.root, key) else {
                continue;
            };
            let reader = match ShardReader::open(&path) {
                Ok(reader) => reader,
                Err(e) => {
                    if e.kind() == io::ErrorKind::NotFound {
                        warn!("Shard {key} missing at {:?}, skipping", path);
                    } else {
                        warn!("Shard {key} at {:?} cannot be opened: {e}", path);
                    }
                    stats.missing_shards += 1;
                    continue;
                }
            };
            stats.shards_scanned += 1;
            debug!(key, ?path, "scanning shard");

            for row in reader {
                let record = match row {
                    Ok(record) => record,
                    Err(RowError::Malformed { line, message }) => {
                        warn!("Skipping bad row {line} in {:?}: {message}", path);
                        stats.bad_rows += 1;
                        continue;
                    }
                    Err(RowError::Io(e)) => {
                        warn!("Failed reading {:?}: {e}", path);
                        stats.truncated_shards += 1;
                        break;
                    }
                };
                stats.rows_scanned += 1;

                if !options.mode.accepts(record.mask, allowed) {
                    continue;
                }
                found += 1;
                match &mut collector {
                    Collector::CountOnly => {}
                    Collector::First(first) => first.offer(record.word),
                    Collector::Sample(reservoir) => reservoir.offer(record.word, &mut *rng),
                }
            }
        }

        let words = match collector {
            Collector::CountOnly => Vec::new(),
            Collector::First(first) => {
                let mut words = first.into_vec();
                words.sort();
                words
            }
            Collector::Sample(reservoir) => reservoir.into_vec(),
        };

        Ok(SearchReport {
            allowed,
            target_pop,
            found,
            words,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::config::BuildOptions;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn dictionary(alphabet: &str, words: &[&str]) -> (TempDir, Searcher) {
        let dir = TempDir::new().unwrap();
        let input = words.join("\n");
        Builder::new(BuildOptions::new().alphabet(alphabet))
            .unwrap()
            .build(Cursor::new(input.into_bytes()), dir.path())
            .unwrap();
        let searcher = Searcher::open(dir.path()).unwrap();
        (dir, searcher)
    }

    #[test]
    fn subset_search() {
        let (_dir, searcher) = dictionary("abcd", &["ab", "ac", "abc", "d", "bd"]);
        let report = searcher
            .search("cba", &SearchOptions::new().limit(10))
            .unwrap();
        assert_eq!(report.allowed, 0b0111);
        assert_eq!(report.target_pop, 3);
        assert_eq!(report.found, 3);
        assert_eq!(report.words, vec!["ab", "abc", "ac"]);
    }

    #[test]
    fn exact_search() {
        let (_dir, searcher) = dictionary("abc", &["ab", "ba", "abc", "a"]);
        let options = SearchOptions::new().mode(MatchMode::Exact);
        let report = searcher.search("ab", &options).unwrap();
        assert_eq!(report.words, vec!["ab", "ba"]);
        assert_eq!(report.stats.shards_scanned, 1);
    }

    #[test]
    fn candidate_shards_by_mode() {
        let (_dir, searcher) = dictionary("abcd", &["a", "ab", "abc", "abcd"]);
        assert_eq!(
            searcher.candidate_shards(0b0111, MatchMode::Subset),
            vec![1, 2, 3]
        );
        assert_eq!(
            searcher.candidate_shards(0b0111, MatchMode::Exact),
            vec![3]
        );
    }

    #[test]
    fn limit_counts_everything() {
        let (_dir, searcher) = dictionary("abcde", &["e", "d", "c", "b", "a"]);
        let report = searcher
            .search("abcde", &SearchOptions::new().limit(2))
            .unwrap();
        assert_eq!(report.found, 5);
        // first two in encounter order, then sorted
        assert_eq!(report.words, vec!["d", "e"]);
    }

    #[test]
    fn count_only_collects_nothing() {
        let (_dir, searcher) = dictionary("abc", &["a", "b", "ab"]);
        let report = searcher
            .search("abc", &SearchOptions::new().count_only(true))
            .unwrap();
        assert_eq!(report.found, 3);
        assert_eq!(report.shown(), 0);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let words: Vec<String> = ["a", "b", "c", "d", "e", "f"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let (_dir, searcher) = dictionary("abcdef", &refs);
        let options = SearchOptions::new().limit(3).shuffle(true).seed(7);

        let first = searcher.search("abcdef", &options).unwrap();
        let second = searcher.search("abcdef", &options).unwrap();
        assert_eq!(first.words, second.words);
        assert_eq!(first.found, 6);
        assert_eq!(first.shown(), 3);
        assert!(first.words.iter().all(|w| words.contains(w)));
    }

    #[test]
    fn empty_selection_is_an_error() {
        let (_dir, searcher) = dictionary("abc", &["ab"]);
        assert!(matches!(
            searcher.search("xyz", &SearchOptions::new()),
            Err(CoreError::EmptySelection)
        ));
    }

    #[test]
    fn empty_files_map_is_an_error() {
        let dir = TempDir::new().unwrap();
        Manifest::new("abc").save(dir.path()).unwrap();
        assert!(matches!(
            Searcher::open(dir.path()),
            Err(CoreError::EmptyManifest)
        ));
    }

    #[test]
    fn bad_manifest_alphabet_is_invalid_manifest() {
        let dir = TempDir::new().unwrap();
        let mut manifest = Manifest::new("   ");
        manifest.files.insert(1, "pop-1.jsonl".into());
        manifest.save(dir.path()).unwrap();
        assert!(matches!(
            Searcher::open(dir.path()),
            Err(CoreError::InvalidManifest { .. })
        ));
    }

    #[test]
    fn missing_shard_is_skipped() {
        let (dir, searcher) = dictionary("abc", &["a", "ab", "abc"]);
        fs::remove_file(dir.path().join("pop-2.jsonl")).unwrap();
        let report = searcher.search("abc", &SearchOptions::new()).unwrap();
        assert_eq!(report.words, vec!["a", "abc"]);
        assert_eq!(report.stats.missing_shards, 1);
        assert_eq!(report.stats.shards_scanned, 2);
    }

    #[test]
    fn bad_rows_are_skipped() {
        let (dir, searcher) = dictionary("abc", &["ab"]);
        fs::write(
            dir.path().join("pop-2.jsonl"),
            "[3,\"ab\"]\n{garbage\n[\"ba\",3]\n[5,\"ac\"]\n",
        )
        .unwrap();
        let report = searcher.search("abc", &SearchOptions::new()).unwrap();
        assert_eq!(report.words, vec!["ab", "ac"]);
        assert_eq!(report.stats.bad_rows, 2);
        assert_eq!(report.stats.rows_scanned, 2);
    }
}
