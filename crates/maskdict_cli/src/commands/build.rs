//! Build command implementation.

use crate::error::CliResult;
use maskdict_core::{resolve_alphabet, BuildOptions, Builder, ConfigFile, StoredCase};
use std::path::Path;
use tracing::{debug, info};

/// Arguments of the build command.
pub struct BuildArgs<'a> {
    /// Input wordlist.
    pub input: &'a Path,
    /// Output directory.
    pub outdir: &'a Path,
    /// Alphabet given on the command line.
    pub alphabet: Option<&'a str>,
    /// Config file consulted when no alphabet is given.
    pub config: Option<&'a Path>,
    /// Store words as written.
    pub keep_original: bool,
    /// Gzip the shards.
    pub gzip: bool,
}

/// Runs the build command.
pub fn run(args: &BuildArgs<'_>) -> CliResult<()> {
    let config = match args.config {
        Some(path) => {
            let config = ConfigFile::load(path)?;
            if config.is_none() {
                debug!("Config {:?} is not a file, ignoring", path);
            }
            config
        }
        None => None,
    };
    let alphabet = resolve_alphabet(args.alphabet, config.as_ref());
    info!("Using alphabet: {alphabet}");

    let stored_case = if args.keep_original {
        StoredCase::Original
    } else {
        StoredCase::Folded
    };
    let options = BuildOptions::new()
        .alphabet(alphabet)
        .stored_case(stored_case)
        .compress(args.gzip);

    let manifest = Builder::new(options)?.build_from_path(args.input, args.outdir)?;
    println!(
        "Read {} lines, kept {} words in {} shards (maxPop {})",
        manifest.count.total_lines_read,
        manifest.count.kept_unique_letter_words,
        manifest.files.len(),
        manifest.max_pop
    );
    Ok(())
}
