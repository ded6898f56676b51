//! # maskdict core
//!
//! Bitmask word index for letter-constrained word games.
//!
//! Every word is encoded as a mask with one bit per distinct letter of a
//! configured alphabet. Only words made of alphabet letters with no letter
//! repeated are indexed. Entries are sharded by popcount, so a query over
//! `n` available letters never has to look at a word with more than `n`
//! distinct letters.
//!
//! This crate provides:
//! - [`AlphabetIndex`] and [`MaskCodec`] for encoding words and queries
//! - [`Builder`] to turn a wordlist into shards plus a [`Manifest`]
//! - [`Searcher`] for subset and exact queries, with reservoir sampling
//! - [`verify_dictionary`] to check a built artifact
//!
//! ## Example
//!
//! ```rust,no_run
//! use maskdict_core::{BuildOptions, Builder, SearchOptions, Searcher};
//! use std::path::Path;
//!
//! let builder = Builder::new(BuildOptions::new().alphabet("abcdefgh"))?;
//! builder.build_from_path(Path::new("words.txt"), Path::new("dict"))?;
//!
//! let searcher = Searcher::open(Path::new("dict"))?;
//! let report = searcher.search("bead", &SearchOptions::new().limit(20))?;
//! println!("Found: {} (showing {})", report.found, report.shown());
//! # Ok::<(), maskdict_core::CoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod alphabet;
mod builder;
mod codec;
mod config;
mod error;
mod manifest;
mod record;
mod sample;
mod search;
mod shard;
mod verify;

pub use alphabet::{sanitize_alphabet, AlphabetIndex, DEFAULT_ALPHABET, MAX_LETTERS};
pub use builder::Builder;
pub use codec::{compose, fold, is_subset, popcount, Mask, MaskCodec};
pub use config::{
    resolve_alphabet, BuildOptions, ConfigFile, MatchMode, SearchOptions, StoredCase,
};
pub use error::{CoreError, CoreResult};
pub use manifest::{BuildCounts, Manifest, MANIFEST_CANDIDATES, MANIFEST_FILE};
pub use record::ShardRecord;
pub use sample::{FirstN, Reservoir};
pub use search::{SearchReport, SearchStats, Searcher};
pub use shard::{shard_file_name, RowError, ShardReader, ShardWriters, GZIP_SUFFIX};
pub use verify::{verify_dictionary, ShardCheck, VerifyReport};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
