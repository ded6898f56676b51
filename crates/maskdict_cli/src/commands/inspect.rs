//! Inspect command implementation.

use super::OutputFormat;
use crate::error::CliResult;
use maskdict_core::Manifest;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Dictionary inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Dictionary root.
    pub path: String,
    /// Alphabet recorded in the manifest.
    pub alphabet: String,
    /// Number of alphabet letters.
    pub alphabet_len: usize,
    /// Highest shard key.
    #[serde(rename = "maxPop")]
    pub max_pop: u32,
    /// Input lines read by the build.
    pub total_lines_read: u64,
    /// Words written to shards.
    pub kept_unique_letter_words: u64,
    /// Total on-disk size of the present shards in bytes.
    pub total_size: u64,
    /// Per-shard statistics.
    pub shards: Vec<ShardStats>,
}

/// Statistics for a single shard.
#[derive(Debug, Serialize)]
pub struct ShardStats {
    /// Shard key (distinct letter count).
    pub key: u32,
    /// Path relative to the dictionary root.
    pub path: String,
    /// File size in bytes, `None` if the file is missing.
    pub size: Option<u64>,
}

/// Runs the inspect command.
pub fn run(path: &Path, format: OutputFormat) -> CliResult<()> {
    let manifest = Manifest::load(path)?;
    let alphabet_len = manifest.alphabet.chars().count();

    let shards: Vec<ShardStats> = manifest
        .files
        .iter()
        .map(|(&key, rel)| ShardStats {
            key,
            path: rel.clone(),
            size: fs::metadata(path.join(rel)).ok().map(|m| m.len()),
        })
        .collect();

    let result = InspectResult {
        path: path.display().to_string(),
        alphabet: manifest.alphabet.clone(),
        alphabet_len,
        max_pop: manifest.max_pop,
        total_lines_read: manifest.count.total_lines_read,
        kept_unique_letter_words: manifest.count.kept_unique_letter_words,
        total_size: shards.iter().filter_map(|s| s.size).sum(),
        shards,
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_text(&result),
    }

    Ok(())
}

fn print_text(result: &InspectResult) {
    println!("Dictionary: {}", result.path);
    println!();
    println!("Manifest:");
    println!(
        "  Alphabet:      {} ({} letters)",
        result.alphabet, result.alphabet_len
    );
    println!("  maxPop:        {}", result.max_pop);
    println!("  Lines read:    {}", result.total_lines_read);
    println!("  Words kept:    {}", result.kept_unique_letter_words);
    println!();
    println!("Shards:");
    if result.shards.is_empty() {
        println!("  (none)");
    }
    for shard in &result.shards {
        match shard.size {
            Some(size) => println!(
                "  {:>3}  {:<20} {}",
                shard.key,
                shard.path,
                format_size(size)
            ),
            None => println!("  {:>3}  {:<20} MISSING", shard.key, shard.path),
        }
    }
    println!();
    println!("  Total size:    {}", format_size(result.total_size));
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}
