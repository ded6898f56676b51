//! Search command implementation.

use super::OutputFormat;
use crate::error::CliResult;
use maskdict_core::{SearchOptions, SearchReport, SearchStats, Searcher};
use serde::Serialize;
use std::path::Path;

/// JSON form of a search report.
#[derive(Debug, Serialize)]
struct SearchOutput<'a> {
    letters: &'a str,
    mode: String,
    found: u64,
    shown: usize,
    words: &'a [String],
    stats: SearchStats,
}

/// Runs the search command.
pub fn run(
    dict_root: &Path,
    letters: &str,
    options: &SearchOptions,
    format: OutputFormat,
) -> CliResult<()> {
    let searcher = Searcher::open(dict_root)?;
    let report = searcher.search(letters, options)?;

    match format {
        OutputFormat::Json => {
            let output = SearchOutput {
                letters,
                mode: options.mode.to_string(),
                found: report.found,
                shown: report.shown(),
                words: &report.words,
                stats: report.stats,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => print_text(&report),
    }
    Ok(())
}

fn print_text(report: &SearchReport) {
    println!("Found: {} (showing {})", report.found, report.shown());
    for word in &report.words {
        println!("{word}");
    }
}
