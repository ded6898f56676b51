//! Dictionary manifest.
//!
//! The manifest is the single JSON document describing a built dictionary:
//!
//! ```text
//! {
//!   "alphabet": "abc",
//!   "maxPop": 3,
//!   "files": { "2": "pop-2.jsonl", "3": "pop-3.jsonl" },
//!   "count": { "total_lines_read": 5, "kept_unique_letter_words": 3 }
//! }
//! ```

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name written by the builder.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Names probed, in order, when opening a dictionary.
pub const MANIFEST_CANDIDATES: [&str; 2] = [MANIFEST_FILE, "manifest.jsonl"];

/// Counters recorded by a build run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildCounts {
    /// Every input line, blank ones included.
    pub total_lines_read: u64,
    /// Words that passed validation and were written to a shard.
    pub kept_unique_letter_words: u64,
}

/// Metadata for a built dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Sanitized alphabet the dictionary was built with.
    pub alphabet: String,
    /// Highest populated shard key.
    #[serde(rename = "maxPop", default)]
    pub max_pop: u32,
    /// Shard key (popcount) to shard path, relative to the dictionary root.
    #[serde(default)]
    pub files: BTreeMap<u32, String>,
    /// Build counters.
    #[serde(default)]
    pub count: BuildCounts,
}

impl Manifest {
    /// Creates a manifest with no shards.
    pub fn new(alphabet: impl Into<String>) -> Self {
        Self {
            alphabet: alphabet.into(),
            max_pop: 0,
            files: BTreeMap::new(),
            count: BuildCounts::default(),
        }
    }

    /// Locates the manifest file under a dictionary root.
    #[must_use]
    pub fn locate(root: &Path) -> Option<PathBuf> {
        MANIFEST_CANDIDATES
            .iter()
            .map(|name| root.join(name))
            .find(|path| path.is_file())
    }

    /// Loads the manifest of the dictionary at `root`.
    ///
    /// # Errors
    ///
    /// Returns `ManifestNotFound` if neither candidate file exists,
    /// `InvalidManifest` if the file does not parse, or an I/O error.
    pub fn load(root: &Path) -> CoreResult<Self> {
        let path = Self::locate(root).ok_or_else(|| CoreError::ManifestNotFound {
            root: root.to_path_buf(),
        })?;
        let text = fs::read_to_string(&path).map_err(|e| CoreError::io_at(&path, e))?;
        Self::from_json(&text)
            .map_err(|e| CoreError::invalid_manifest(format!("{}: {e}", path.display())))
    }

    /// Parses a manifest document.
    ///
    /// # Errors
    ///
    /// Returns the parse error if the text is not a valid manifest.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Writes the manifest as pretty JSON into `dir`, returning its path.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn save(&self, dir: &Path) -> CoreResult<PathBuf> {
        let path = dir.join(MANIFEST_FILE);
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        let mut file = fs::File::create(&path).map_err(|e| CoreError::io_at(&path, e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| CoreError::io_at(&path, e))?;
        Ok(path)
    }

    /// Resolves the on-disk path of shard `key` under `root`.
    #[must_use]
    pub fn shard_path(&self, root: &Path, key: u32) -> Option<PathBuf> {
        self.files.get(&key).map(|rel| root.join(rel))
    }

    /// Shard keys in ascending order.
    pub fn shard_keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.files.keys().copied()
    }
}
