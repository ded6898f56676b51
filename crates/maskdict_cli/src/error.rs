//! CLI error type and exit codes.

use maskdict_core::CoreError;
use std::process::ExitCode;
use thiserror::Error;

/// Normal completion, including searches with zero matches.
pub const EXIT_SUCCESS: u8 = 0;
/// Any fatal error not covered below.
pub const EXIT_ERROR: u8 = 1;
/// Manifest carries no shard mapping.
pub const EXIT_EMPTY_MANIFEST: u8 = 3;
/// Query letters share nothing with the alphabet. Kept apart from 2, which
/// clap uses for usage errors.
pub const EXIT_EMPTY_SELECTION: u8 = 4;

/// Unified error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error from the core library.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// `verify` found problems.
    #[error("verification failed with {0} error(s)")]
    VerificationFailed(usize),

    /// Failed to render JSON output.
    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Core(CoreError::EmptySelection) => EXIT_EMPTY_SELECTION,
            CliError::Core(CoreError::EmptyManifest) => EXIT_EMPTY_MANIFEST,
            _ => EXIT_ERROR,
        }
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = std::result::Result<T, CliError>;

/// Prints the error and converts it into the process exit code.
pub fn report(err: &CliError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(err.exit_code())
}
