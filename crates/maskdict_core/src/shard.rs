//! Shard file I/O.
//!
//! Shards are newline-delimited [`ShardRecord`]s, one file per popcount.
//! Files whose name ends in `.gz` are gzip streams and are inflated
//! transparently when read.

use crate::error::{CoreError, CoreResult};
use crate::record::ShardRecord;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Write buffer per open shard.
const WRITE_BUFFER: usize = 1024 * 1024;

/// Extension marking a gzip-compressed shard.
pub const GZIP_SUFFIX: &str = ".gz";

/// File name of the shard holding popcount `key`.
#[must_use]
pub fn shard_file_name(key: u32, compress: bool) -> String {
    if compress {
        format!("pop-{key}.jsonl{GZIP_SUFFIX}")
    } else {
        format!("pop-{key}.jsonl")
    }
}

fn is_gzip(path: &Path) -> bool {
    path.to_string_lossy().ends_with(GZIP_SUFFIX)
}

/// An open shard destination.
enum ShardSink {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl ShardSink {
    fn create(path: &Path, compress: bool) -> io::Result<Self> {
        let file = BufWriter::with_capacity(WRITE_BUFFER, File::create(path)?);
        Ok(if compress {
            Self::Gzip(GzEncoder::new(file, Compression::default()))
        } else {
            Self::Plain(file)
        })
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let out: &mut dyn Write = match self {
            Self::Plain(w) => w,
            Self::Gzip(w) => w,
        };
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")
    }

    fn close(self) -> io::Result<()> {
        let mut file = match self {
            Self::Plain(w) => w,
            Self::Gzip(w) => w.finish()?,
        };
        file.flush()?;
        file.get_ref().sync_all()
    }
}

/// Table of shard destinations opened on first use.
///
/// Every destination is owned by the table. [`finish`](Self::finish)
/// flushes and closes them all in ascending key order; if the table is
/// dropped instead (an aborted build), the handles are still released by
/// their destructors.
pub struct ShardWriters {
    dir: PathBuf,
    compress: bool,
    open: BTreeMap<u32, (String, ShardSink)>,
}

impl ShardWriters {
    /// Creates an empty table writing into `dir`.
    #[must_use]
    pub fn new(dir: &Path, compress: bool) -> Self {
        Self {
            dir: dir.to_path_buf(),
            compress,
            open: BTreeMap::new(),
        }
    }

    /// Appends a record to the shard for `key`, creating the shard if needed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the shard cannot be created or written.
    pub fn append(&mut self, key: u32, record: &ShardRecord) -> CoreResult<()> {
        let line = record.to_json_line()?;
        let (name, sink) = match self.open.entry(key) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => {
                let name = shard_file_name(key, self.compress);
                let path = self.dir.join(&name);
                let sink = ShardSink::create(&path, self.compress)
                    .map_err(|e| CoreError::io_at(&path, e))?;
                tracing::debug!(key, path = %path.display(), "opened shard");
                slot.insert((name, sink))
            }
        };
        sink.write_line(&line)
            .map_err(|e| CoreError::io_at(self.dir.join(name.as_str()), e))
    }

    /// Keys of the shards opened so far.
    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.open.keys().copied()
    }

    /// Closes every shard and returns the key to file-name mapping.
    ///
    /// All shards are closed even if one of them fails; the first error is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error raised while flushing.
    pub fn finish(self) -> CoreResult<BTreeMap<u32, String>> {
        let mut files = BTreeMap::new();
        let mut first_error = None;
        for (key, (name, sink)) in self.open {
            if let Err(e) = sink.close() {
                if first_error.is_none() {
                    first_error = Some(CoreError::io_at(self.dir.join(&name), e));
                }
            }
            files.insert(key, name);
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(files),
        }
    }
}

/// A row that could not be turned into a record.
#[derive(Debug)]
pub enum RowError {
    /// The line is not a valid `[mask, word]` row; reading can continue.
    Malformed {
        /// 1-based line number.
        line: u64,
        /// Parser message.
        message: String,
    },
    /// The stream itself failed; nothing more can be read.
    Io(io::Error),
}

/// Streaming reader over the records of one shard.
///
/// Yields `Err(RowError::Malformed)` for a bad line and keeps going; after
/// `Err(RowError::Io)` the iterator is exhausted. Blank lines are skipped.
pub struct ShardReader {
    reader: Box<dyn BufRead>,
    line: u64,
    buf: Vec<u8>,
    done: bool,
}

impl ShardReader {
    /// Opens a shard file, inflating it if the name ends in `.gz`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be opened.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let reader: Box<dyn Read> = if is_gzip(path) {
            Box::new(MultiGzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Ok(Self::from_reader(reader))
    }

    /// Wraps an already-decoded line stream.
    pub fn from_reader(reader: impl Read + 'static) -> Self {
        Self {
            reader: Box::new(BufReader::new(reader)),
            line: 0,
            buf: Vec::new(),
            done: false,
        }
    }
}

impl Iterator for ShardReader {
    type Item = Result<ShardRecord, RowError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line += 1;
                    let parsed = std::str::from_utf8(&self.buf)
                        .map_err(|e| e.to_string())
                        .map(str::trim);
                    let row = match parsed {
                        Ok("") => continue,
                        Ok(text) => ShardRecord::from_json_line(text).map_err(|e| e.to_string()),
                        Err(message) => Err(message),
                    };
                    return Some(row.map_err(|message| RowError::Malformed {
                        line: self.line,
                        message,
                    }));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(RowError::Io(e)));
                }
            }
        }
        None
    }
}
