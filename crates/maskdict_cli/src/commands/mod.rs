//! CLI command implementations.

pub mod build;
pub mod inspect;
pub mod search;
pub mod verify;

use clap::ValueEnum;

/// Output format for reporting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}
