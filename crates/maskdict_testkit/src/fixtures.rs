//! Test fixtures for built dictionaries.
//!
//! Provides a dictionary built into a temporary directory from an
//! in-memory word list, removed again when the fixture is dropped.

use maskdict_core::{BuildOptions, Builder, Manifest, Searcher};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A dictionary in a temporary directory.
pub struct TestDictionary {
    /// Manifest written by the build.
    pub manifest: Manifest,
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestDictionary {
    /// Builds `words` with the given alphabet and default options.
    pub fn build(alphabet: &str, words: &[&str]) -> Self {
        Self::build_with(BuildOptions::new().alphabet(alphabet), words)
    }

    /// Builds `words` with explicit options.
    pub fn build_with(options: BuildOptions, words: &[&str]) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("dict");
        let input = words.join("\n");

        let manifest = Builder::new(options)
            .expect("Invalid build options")
            .build(Cursor::new(input.into_bytes()), &root)
            .expect("Failed to build dictionary");

        Self {
            manifest,
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Dictionary root directory.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Path of the shard holding popcount `key`, if one was written.
    pub fn shard_path(&self, key: u32) -> Option<PathBuf> {
        self.manifest.shard_path(&self.root, key)
    }

    /// Opens a searcher over the dictionary.
    pub fn searcher(&self) -> Searcher {
        Searcher::open(&self.root).expect("Failed to open dictionary")
    }
}

/// Runs `f` against a freshly built dictionary.
///
/// # Example
///
/// ```rust
/// use maskdict_testkit::with_dictionary;
///
/// with_dictionary("abc", &["ab", "abc"], |dict| {
///     assert_eq!(dict.manifest.max_pop, 3);
/// });
/// ```
pub fn with_dictionary<F, R>(alphabet: &str, words: &[&str], f: F) -> R
where
    F: FnOnce(&TestDictionary) -> R,
{
    let dict = TestDictionary::build(alphabet, words);
    f(&dict)
}

/// Canned word lists.
pub mod wordlists {
    /// Alphabet for [`POLISH`].
    pub const POLISH_ALPHABET: &str = maskdict_core::DEFAULT_ALPHABET;

    /// Small Polish sample, mixed case, with rejects.
    pub const POLISH: &[&str] = &[
        "ząb", "Kot", "kto", "tok", "lis", "las", "mama", "Łódź", "żaba", "ćma", "dom", "sok",
        "kos", "oko", "", "pies", "Wąż", "x-ray", "mąka",
    ];

    /// Alphabet for [`ENGLISH`].
    pub const ENGLISH_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

    /// Small English sample.
    pub const ENGLISH: &[&str] = &[
        "bead", "bad", "dab", "abed", "bed", "deb", "ebb", "add", "cab", "face", "fade", "decaf",
        "faced", "bade", "be", "a",
    ];
}
