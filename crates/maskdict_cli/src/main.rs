//! maskdict CLI
//!
//! Command-line tools for bitmask word dictionaries.
//!
//! # Commands
//!
//! - `build` - Turn a wordlist into popcount shards plus a manifest
//! - `search` - Find words spelled from a set of letters
//! - `inspect` - Display manifest and shard statistics
//! - `verify` - Check a built dictionary for consistency

mod commands;
mod error;

use clap::{Parser, Subcommand};
use commands::OutputFormat;
use error::{CliResult, EXIT_SUCCESS};
use maskdict_core::MatchMode;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Bitmask word dictionary tools.
#[derive(Parser)]
#[command(name = "maskdict")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a dictionary from a wordlist (one word per line)
    Build {
        /// Input wordlist
        input: PathBuf,

        /// Output directory for shards and manifest
        outdir: PathBuf,

        /// Alphabet letters (overrides the config file)
        #[arg(short, long)]
        alphabet: Option<String>,

        /// JSON config file with `letters` or `alphabet`
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Store words as written instead of case-folded
        #[arg(long)]
        keep_original: bool,

        /// Gzip the shard files
        #[arg(long)]
        gzip: bool,
    },

    /// Search a dictionary for words made of the given letters
    Search {
        /// Dictionary directory
        #[arg(short, long)]
        dict_root: PathBuf,

        /// Available letters
        #[arg(short, long)]
        letters: String,

        /// Match mode (subset, exact)
        #[arg(short, long, default_value_t = MatchMode::Subset)]
        mode: MatchMode,

        /// Maximum number of words to print
        #[arg(long, default_value_t = 100)]
        limit: usize,

        /// Sample uniformly instead of taking the first matches
        #[arg(long)]
        shuffle: bool,

        /// Only report the number of matches
        #[arg(long)]
        show_count_only: bool,

        /// Seed for the sampler
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Display dictionary metadata and shard statistics
    Inspect {
        /// Dictionary directory
        dict_root: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Verify dictionary integrity
    Verify {
        /// Dictionary directory
        dict_root: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for results
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => error::report(&e),
    }
}

fn run(command: Commands) -> CliResult<()> {
    match command {
        Commands::Build {
            input,
            outdir,
            alphabet,
            config,
            keep_original,
            gzip,
        } => commands::build::run(&commands::build::BuildArgs {
            input: &input,
            outdir: &outdir,
            alphabet: alphabet.as_deref(),
            config: config.as_deref(),
            keep_original,
            gzip,
        }),
        Commands::Search {
            dict_root,
            letters,
            mode,
            limit,
            shuffle,
            show_count_only,
            seed,
            format,
        } => {
            let mut options = maskdict_core::SearchOptions::new()
                .mode(mode)
                .limit(limit)
                .shuffle(shuffle)
                .count_only(show_count_only);
            if let Some(seed) = seed {
                options = options.seed(seed);
            }
            commands::search::run(&dict_root, &letters, &options, format)
        }
        Commands::Inspect { dict_root, format } => commands::inspect::run(&dict_root, format),
        Commands::Verify { dict_root } => commands::verify::run(&dict_root),
        Commands::Version => {
            println!("maskdict CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("maskdict core v{}", maskdict_core::VERSION);
            Ok(())
        }
    }
}
