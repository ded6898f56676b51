//! Verify command implementation.

use crate::error::{CliError, CliResult};
use maskdict_core::{verify_dictionary, ShardCheck};
use std::path::Path;

/// Runs the verify command.
pub fn run(path: &Path) -> CliResult<()> {
    println!("Verifying dictionary at {:?}", path);
    println!();

    let report = verify_dictionary(path)?;
    for shard in &report.shards {
        print_shard(shard);
    }

    if !report.errors.is_empty() {
        println!();
        println!("Errors:");
        for error in &report.errors {
            println!("  - {error}");
        }
    }

    println!();
    println!("Records checked: {}", report.records_checked());
    if report.is_ok() {
        println!("✓ Dictionary verification passed");
        Ok(())
    } else {
        println!("✗ Dictionary verification failed");
        Err(CliError::VerificationFailed(report.errors.len()))
    }
}

fn print_shard(shard: &ShardCheck) {
    if !shard.present {
        println!("  pop {:>2}  {}: missing", shard.key, shard.path);
        return;
    }
    println!(
        "  pop {:>2}  {}: {} checked, {} valid, {} corrupt",
        shard.key, shard.path, shard.records_checked, shard.valid_records, shard.corrupt_records
    );
}
