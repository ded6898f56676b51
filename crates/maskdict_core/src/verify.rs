//! Artifact integrity checks.
//!
//! Re-reads every shard of a dictionary and checks that each row parses,
//! that its mask has the shard's popcount, and that the stored word
//! re-encodes to the recorded mask.

use crate::alphabet::AlphabetIndex;
use crate::codec::{popcount, MaskCodec};
use crate::error::{CoreError, CoreResult};
use crate::manifest::Manifest;
use crate::shard::{RowError, ShardReader};
use serde::Serialize;
use std::path::Path;

/// Verification result for one shard.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShardCheck {
    /// Shard key.
    pub key: u32,
    /// Path relative to the dictionary root.
    pub path: String,
    /// Whether the file could be opened.
    pub present: bool,
    /// Rows examined.
    pub records_checked: u64,
    /// Rows satisfying every invariant.
    pub valid_records: u64,
    /// Rows violating an invariant or failing to parse.
    pub corrupt_records: u64,
}

/// Verification result for a whole dictionary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VerifyReport {
    /// Per-shard results in key order.
    pub shards: Vec<ShardCheck>,
    /// Human-readable description of every problem found.
    pub errors: Vec<String>,
}

impl VerifyReport {
    /// True if no problem was found.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total rows examined.
    #[must_use]
    pub fn records_checked(&self) -> u64 {
        self.shards.iter().map(|s| s.records_checked).sum()
    }
}

/// Maximum problems recorded per shard before only counting.
const MAX_ERRORS_PER_SHARD: u64 = 20;

/// Verifies the dictionary at `root`.
///
/// # Errors
///
/// Fails only when the manifest cannot be loaded or its alphabet is
/// unusable. Everything else is reported in the returned [`VerifyReport`].
pub fn verify_dictionary(root: &Path) -> CoreResult<VerifyReport> {
    let manifest = Manifest::load(root)?;
    let alphabet = AlphabetIndex::new(&manifest.alphabet)
        .map_err(|e| CoreError::invalid_manifest(format!("unusable alphabet: {e}")))?;
    let codec = MaskCodec::new(alphabet);

    let mut report = VerifyReport::default();
    if manifest.files.is_empty() {
        report.errors.push("manifest has no 'files' map".to_string());
    }
    if let Some(&highest) = manifest.files.keys().next_back() {
        if highest != manifest.max_pop {
            report.errors.push(format!(
                "maxPop is {} but the highest shard key is {highest}",
                manifest.max_pop
            ));
        }
    }

    let mut kept = 0u64;
    for (&key, rel) in &manifest.files {
        let check = verify_shard(root, key, rel, &codec, &mut report.errors);
        kept += check.valid_records;
        report.shards.push(check);
    }

    if report.is_ok() && kept != manifest.count.kept_unique_letter_words {
        report.errors.push(format!(
            "manifest counts {} kept words, shards hold {kept}",
            manifest.count.kept_unique_letter_words
        ));
    }

    Ok(report)
}

fn verify_shard(
    root: &Path,
    key: u32,
    rel: &str,
    codec: &MaskCodec,
    errors: &mut Vec<String>,
) -> ShardCheck {
    let mut check = ShardCheck {
        key,
        path: rel.to_string(),
        ..ShardCheck::default()
    };

    if key == 0 {
        errors.push(format!("{rel}: shard key 0 cannot hold any word"));
    }

    let reader = match ShardReader::open(&root.join(rel)) {
        Ok(reader) => reader,
        Err(e) => {
            errors.push(format!("{rel}: cannot open shard: {e}"));
            return check;
        }
    };
    check.present = true;

    let mut report = |check: &mut ShardCheck, message: String| {
        check.corrupt_records += 1;
        if check.corrupt_records <= MAX_ERRORS_PER_SHARD {
            errors.push(format!("{rel}: {message}"));
        }
    };

    for row in reader {
        let record = match row {
            Ok(record) => record,
            Err(RowError::Malformed { line, message }) => {
                check.records_checked += 1;
                report(&mut check, format!("line {line}: {message}"));
                continue;
            }
            Err(RowError::Io(e)) => {
                report(&mut check, format!("read failed: {e}"));
                break;
            }
        };
        check.records_checked += 1;

        let pop = popcount(record.mask);
        if pop != key {
            report(
                &mut check,
                format!("'{}' has popcount {pop}, expected {key}", record.word),
            );
        } else if codec.encode(&record.word) != Some(record.mask) {
            report(
                &mut check,
                format!(
                    "'{}' does not encode to recorded mask {:#b}",
                    record.word, record.mask
                ),
            );
        } else {
            check.valid_records += 1;
        }
    }

    check
}
