//! Error types for maskdict core.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can abort a build or search run.
///
/// Per-item conditions (a rejected word, a malformed shard row, a missing
/// shard file) are never reported through this type. They are absorbed
/// locally and surface only as counters and `tracing` warnings.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The alphabet or another configuration value is unusable.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the problem.
        message: String,
    },

    /// I/O error without path context.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// I/O error on a specific file or directory.
    #[error("I/O error on {}: {source}", path.display())]
    IoAt {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// No manifest file exists under the dictionary root.
    #[error("no manifest.json(.l) under {}", root.display())]
    ManifestNotFound {
        /// The dictionary root that was searched.
        root: PathBuf,
    },

    /// The manifest exists but could not be understood.
    #[error("invalid manifest: {message}")]
    InvalidManifest {
        /// Description of the problem.
        message: String,
    },

    /// The manifest has no shard files mapped.
    #[error("manifest has no 'files' map")]
    EmptyManifest,

    /// The query letters share nothing with the dictionary alphabet.
    #[error("selected letters produced empty mask (no overlap with alphabet)")]
    EmptySelection,

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid manifest error.
    pub fn invalid_manifest(message: impl Into<String>) -> Self {
        Self::InvalidManifest {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it happened on.
    pub fn io_at(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::IoAt {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
