//! Dictionary builder.
//!
//! Turns a wordlist (one word per line) into popcount shards plus a
//! manifest:
//!
//! ```text
//! <out_dir>/
//! ├─ manifest.json
//! ├─ pop-1.jsonl
//! ├─ pop-2.jsonl
//! └─ ...
//! ```

use crate::alphabet::AlphabetIndex;
use crate::codec::{compose, fold, popcount, MaskCodec};
use crate::config::{BuildOptions, StoredCase};
use crate::error::{CoreError, CoreResult};
use crate::manifest::{BuildCounts, Manifest};
use crate::record::ShardRecord;
use crate::shard::ShardWriters;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Builds dictionaries with a fixed alphabet and options.
#[derive(Debug, Clone)]
pub struct Builder {
    codec: MaskCodec,
    options: BuildOptions,
}

impl Builder {
    /// Creates a builder.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the alphabet is unusable. No file is
    /// touched in that case.
    pub fn new(options: BuildOptions) -> CoreResult<Self> {
        let alphabet = AlphabetIndex::new(&options.alphabet)?;
        Ok(Self {
            codec: MaskCodec::new(alphabet),
            options,
        })
    }

    /// Returns the codec used for encoding.
    #[must_use]
    pub fn codec(&self) -> &MaskCodec {
        &self.codec
    }

    /// Builds a dictionary from a wordlist file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the source cannot be read or the output
    /// directory cannot be written.
    pub fn build_from_path(&self, source: &Path, out_dir: &Path) -> CoreResult<Manifest> {
        let file = File::open(source).map_err(|e| CoreError::io_at(source, e))?;
        info!("Building dictionary from {:?} into {:?}", source, out_dir);
        self.build(BufReader::new(file), out_dir)
    }

    /// Builds a dictionary from any line-oriented reader.
    ///
    /// Lines are trimmed; blank lines are counted but skipped. Bytes that
    /// are not valid UTF-8 are replaced, which makes the affected word
    /// invalid. Valid words go to the shard matching their popcount in the
    /// order they were read.
    ///
    /// # Errors
    ///
    /// Returns an I/O error on read or write failure. Shards already opened
    /// are closed before the error is returned.
    pub fn build<R: BufRead>(&self, mut reader: R, out_dir: &Path) -> CoreResult<Manifest> {
        fs::create_dir_all(out_dir).map_err(|e| CoreError::io_at(out_dir, e))?;

        let mut writers = ShardWriters::new(out_dir, self.options.compress);
        let scanned = self.scan(&mut reader, &mut writers);
        let closed = writers.finish();
        let (counts, max_pop) = scanned?;
        let files = closed?;
        debug!(shards = files.len(), max_pop, "closed shards");

        let manifest = Manifest {
            alphabet: self.codec.alphabet().to_string(),
            max_pop,
            files,
            count: counts,
        };
        let path = manifest.save(out_dir)?;

        info!(
            "Done. Read {}, kept {}. Shards and manifest in {:?}",
            counts.total_lines_read,
            counts.kept_unique_letter_words,
            path.parent().unwrap_or(out_dir)
        );
        Ok(manifest)
    }

    fn scan<R: BufRead>(
        &self,
        reader: &mut R,
        writers: &mut ShardWriters,
    ) -> CoreResult<(BuildCounts, u32)> {
        let mut counts = BuildCounts::default();
        let mut max_pop = 0;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(CoreError::Io)?;
            if n == 0 {
                break;
            }
            counts.total_lines_read += 1;

            let raw = String::from_utf8_lossy(&buf);
            let word = raw.trim();
            if word.is_empty() {
                continue;
            }

            let folded = fold(word);
            let Some(mask) = self.codec.encode_folded(&folded) else {
                continue;
            };
            let stored = match self.options.stored_case {
                StoredCase::Folded => folded,
                StoredCase::Original => compose(word),
            };

            let key = popcount(mask);
            writers.append(key, &ShardRecord::new(mask, stored))?;
            max_pop = max_pop.max(key);
            counts.kept_unique_letter_words += 1;
        }

        Ok((counts, max_pop))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shard::ShardReader;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn build(words: &str, options: BuildOptions) -> (TempDir, Manifest) {
        let dir = TempDir::new().unwrap();
        let manifest = Builder::new(options)
            .unwrap()
            .build(Cursor::new(words.as_bytes().to_vec()), dir.path())
            .unwrap();
        (dir, manifest)
    }

    fn shard(dir: &TempDir, manifest: &Manifest, key: u32) -> Vec<ShardRecord> {
        let path = manifest.shard_path(dir.path(), key).unwrap();
        ShardReader::open(&path)
            .unwrap()
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn partitions_by_popcount() {
        let (dir, manifest) = build("ab\nba\naabb\nabc\nd\n", BuildOptions::new().alphabet("abc"));

        assert_eq!(manifest.alphabet, "abc");
        assert_eq!(manifest.max_pop, 3);
        assert_eq!(manifest.shard_keys().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(manifest.files[&2], "pop-2.jsonl");
        assert_eq!(manifest.count.total_lines_read, 5);
        assert_eq!(manifest.count.kept_unique_letter_words, 3);

        assert_eq!(
            shard(&dir, &manifest, 2),
            vec![ShardRecord::new(0b011, "ab"), ShardRecord::new(0b011, "ba")]
        );
        assert_eq!(
            shard(&dir, &manifest, 3),
            vec![ShardRecord::new(0b111, "abc")]
        );
        assert!(!dir.path().join("pop-1.jsonl").exists());
        assert_eq!(Manifest::load(dir.path()).unwrap(), manifest);
    }

    #[test]
    fn blank_lines_counted_but_skipped() {
        let (_dir, manifest) = build("  a \n\n\t\nb\n", BuildOptions::new().alphabet("ab"));
        assert_eq!(manifest.count.total_lines_read, 4);
        assert_eq!(manifest.count.kept_unique_letter_words, 2);
    }

    #[test]
    fn stores_folded_by_default() {
        let (dir, manifest) = build("Ab\n", BuildOptions::new().alphabet("ab"));
        assert_eq!(shard(&dir, &manifest, 2), vec![ShardRecord::new(3, "ab")]);
    }

    #[test]
    fn stores_original_case_on_request() {
        let options = BuildOptions::new()
            .alphabet("ząb")
            .stored_case(StoredCase::Original);
        let (dir, manifest) = build("Za\u{328}B\n", options);
        assert_eq!(
            shard(&dir, &manifest, 3),
            vec![ShardRecord::new(0b111, "ZąB")]
        );
    }

    #[test]
    fn invalid_utf8_rejects_only_that_word() {
        let dir = TempDir::new().unwrap();
        let input: &[u8] = b"ab\n\xffa\nb\n";
        let manifest = Builder::new(BuildOptions::new().alphabet("ab"))
            .unwrap()
            .build(Cursor::new(input.to_vec()), dir.path())
            .unwrap();
        assert_eq!(manifest.count.total_lines_read, 3);
        assert_eq!(manifest.count.kept_unique_letter_words, 2);
    }

    #[test]
    fn compressed_build() {
        let (dir, manifest) = build("ab\nc\n", BuildOptions::new().alphabet("abc").compress(true));
        assert_eq!(manifest.files[&1], "pop-1.jsonl.gz");
        assert_eq!(shard(&dir, &manifest, 1), vec![ShardRecord::new(0b100, "c")]);
    }

    #[test]
    fn empty_input_writes_empty_manifest() {
        let (dir, manifest) = build("", BuildOptions::new().alphabet("abc"));
        assert!(manifest.files.is_empty());
        assert_eq!(manifest.max_pop, 0);
        assert!(dir.path().join("manifest.json").is_file());
    }

    #[test]
    fn bad_alphabet_fails_before_io() {
        assert!(matches!(
            Builder::new(BuildOptions::new().alphabet("  ")),
            Err(CoreError::Config { .. })
        ));
    }

    #[test]
    fn missing_source_is_io_error() {
        let dir = TempDir::new().unwrap();
        let builder = Builder::new(BuildOptions::new().alphabet("abc")).unwrap();
        let out = dir.path().join("out");
        assert!(matches!(
            builder.build_from_path(&dir.path().join("nope.txt"), &out),
            Err(CoreError::IoAt { .. })
        ));
        assert!(!out.exists());
    }

    #[test]
    fn unwritable_output_is_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let builder = Builder::new(BuildOptions::new().alphabet("abc")).unwrap();
        let result = builder.build(Cursor::new(b"ab\n".to_vec()), &blocker.join("out"));
        assert!(matches!(result, Err(CoreError::IoAt { .. })));
    }
}
