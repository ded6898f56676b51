//! Build and search configuration.

use crate::alphabet::{sanitize_alphabet, DEFAULT_ALPHABET};
use crate::codec::{is_subset, Mask};
use crate::error::{CoreError, CoreResult};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// The alphabet-bearing subset of an application config file.
///
/// Other fields in the file are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigFile {
    /// Preferred alphabet field.
    #[serde(default)]
    pub letters: Option<String>,
    /// Fallback alphabet field.
    #[serde(default)]
    pub alphabet: Option<String>,
}

impl ConfigFile {
    /// Reads a config file.
    ///
    /// Returns `Ok(None)` if `path` is not a regular file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> CoreResult<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        let text = fs::read_to_string(path).map_err(|e| CoreError::io_at(path, e))?;
        let config = serde_json::from_str(&text).map_err(|e| {
            CoreError::config(format!("cannot parse {}: {e}", path.display()))
        })?;
        Ok(Some(config))
    }
}

/// Picks the alphabet for a build.
///
/// Resolution order is the explicit value, then the config file's `letters`,
/// then its `alphabet`, then [`DEFAULT_ALPHABET`]. Empty strings count as
/// absent. The winner is sanitized (see [`sanitize_alphabet`]).
#[must_use]
pub fn resolve_alphabet(explicit: Option<&str>, config: Option<&ConfigFile>) -> String {
    let present = |s: &&str| !s.is_empty();
    let raw = explicit
        .filter(present)
        .or_else(|| config.and_then(|c| c.letters.as_deref()).filter(present))
        .or_else(|| config.and_then(|c| c.alphabet.as_deref()).filter(present))
        .unwrap_or(DEFAULT_ALPHABET);
    sanitize_alphabet(raw)
}

/// Which form of a word is written to the shards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoredCase {
    /// The case-folded form used for encoding.
    #[default]
    Folded,
    /// The NFC-composed input, original case preserved.
    Original,
}

/// Options for a build run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Alphabet, already resolved.
    pub alphabet: String,
    /// Stored word form.
    pub stored_case: StoredCase,
    /// Gzip the shard files.
    pub compress: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.to_string(),
            stored_case: StoredCase::Folded,
            compress: false,
        }
    }
}

impl BuildOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the alphabet.
    #[must_use]
    pub fn alphabet(mut self, alphabet: impl Into<String>) -> Self {
        self.alphabet = alphabet.into();
        self
    }

    /// Sets the stored word form.
    #[must_use]
    pub const fn stored_case(mut self, stored_case: StoredCase) -> Self {
        self.stored_case = stored_case;
        self
    }

    /// Sets whether shards are gzip-compressed.
    #[must_use]
    pub const fn compress(mut self, value: bool) -> Self {
        self.compress = value;
        self
    }
}

/// How a word's mask is compared to the allowed mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// The word uses only allowed letters.
    #[default]
    Subset,
    /// The word uses exactly the allowed letters.
    Exact,
}

impl MatchMode {
    /// Tests a word mask against the allowed mask.
    #[inline]
    #[must_use]
    pub fn accepts(self, mask: Mask, allowed: Mask) -> bool {
        match self {
            Self::Subset => is_subset(mask, allowed),
            Self::Exact => mask == allowed,
        }
    }

    /// Tests whether shard `key` can hold matches for a query of
    /// `target_pop` distinct letters.
    #[inline]
    #[must_use]
    pub fn selects_shard(self, key: u32, target_pop: u32) -> bool {
        match self {
            Self::Subset => key > 0 && key <= target_pop,
            Self::Exact => key == target_pop,
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subset => f.write_str("subset"),
            Self::Exact => f.write_str("exact"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subset" => Ok(Self::Subset),
            "exact" => Ok(Self::Exact),
            other => Err(format!(
                "unknown match mode '{other}' (expected 'subset' or 'exact')"
            )),
        }
    }
}

/// Options for a search run.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Match mode.
    pub mode: MatchMode,
    /// Maximum number of words returned.
    pub limit: usize,
    /// Sample results uniformly instead of keeping the first ones.
    pub shuffle: bool,
    /// Count matches without collecting words.
    pub count_only: bool,
    /// Seed for the sampling RNG; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            mode: MatchMode::Subset,
            limit: 100,
            shuffle: false,
            count_only: false,
            seed: None,
        }
    }
}

impl SearchOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the match mode.
    #[must_use]
    pub const fn mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the result limit.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Enables reservoir sampling.
    #[must_use]
    pub const fn shuffle(mut self, value: bool) -> Self {
        self.shuffle = value;
        self
    }

    /// Enables count-only mode.
    #[must_use]
    pub const fn count_only(mut self, value: bool) -> Self {
        self.count_only = value;
        self
    }

    /// Seeds the sampling RNG.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
