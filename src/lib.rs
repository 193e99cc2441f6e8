//! dupescan - duplicate file finder.
//!
//! Finds groups of byte-identical files under a directory tree using a
//! two-phase pipeline: a single-threaded walk buckets files by size, then a
//! bounded worker pool confirms duplicates by content hash (BLAKE3).
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::Dispatcher;
//! use dupescan::report::TextReporter;
//! use dupescan::scanner::Walker;
//! use std::path::Path;
//!
//! let outcome = Walker::new(Path::new("/some/path")).scan();
//! let reporter = TextReporter::new();
//! let stats = Dispatcher::new(4).run(outcome.index, &reporter);
//! println!("{} duplicate groups", stats.duplicate_groups);
//! ```

pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod report;
pub mod scanner;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};

use crate::cli::{Cli, OutputFormat};
use crate::duplicates::{Dispatcher, ScanSummary};
use crate::error::ExitCode;
use crate::report::{JsonReporter, Reporter, TextReporter};
use crate::scanner::Walker;

/// Run the application with parsed CLI arguments.
///
/// Returns the exit code to report, or an error for fatal failures
/// (an invalid root path given as an argument, or stdin closing during
/// the interactive prompt).
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let root = resolve_root(&cli)?;
    log::info!("Scanning {}", root.display());

    let walk_started = Instant::now();
    let outcome = Walker::new(&root).scan();
    let walk_duration = walk_started.elapsed();

    let total_files: usize = outcome.index.values().map(Vec::len).sum();
    let total_size: u64 = outcome
        .index
        .iter()
        .map(|(size, paths)| size * paths.len() as u64)
        .sum();
    log::info!(
        "Walk complete: {} files, {} bytes, {} errors",
        total_files,
        total_size,
        outcome.errors.len()
    );

    let reporter: Box<dyn Reporter> = match cli.output {
        OutputFormat::Text => Box::new(TextReporter::new()),
        OutputFormat::Json => Box::new(JsonReporter::new()),
    };

    let hash_started = Instant::now();
    let stats = Dispatcher::new(cli.threads).run(outcome.index, reporter.as_ref());
    let hash_duration = hash_started.elapsed();

    let summary = ScanSummary {
        root,
        total_files,
        total_size,
        candidate_buckets: stats.candidate_buckets,
        candidate_files: stats.candidate_files,
        hashed_files: stats.hashed_files,
        failed_files: stats.failed_files,
        duplicate_groups: stats.duplicate_groups,
        duplicate_files: stats.duplicate_files,
        reclaimable_space: stats.reclaimable_space,
        walk_duration,
        hash_duration,
        scan_errors: outcome.errors,
    };
    reporter.scan_complete(&summary);

    Ok(exit_code_for(&summary))
}

/// Resolve the root directory from the CLI argument or the interactive prompt.
///
/// An explicit argument must already be a directory; the prompt re-asks
/// until one is entered.
fn resolve_root(cli: &Cli) -> Result<PathBuf> {
    let root = match &cli.path {
        Some(path) => {
            if !path.is_dir() {
                bail!("not a directory: {}", path.display());
            }
            path.clone()
        }
        None => cli::prompt_for_root().context("failed to read root path from stdin")?,
    };
    // Absolute paths keep diagnostics and reports unambiguous when the tool
    // is launched from elsewhere.
    Ok(std::fs::canonicalize(&root).unwrap_or(root))
}

/// Map a completed scan to its exit code.
///
/// Non-fatal scan errors take precedence: the result set may be incomplete.
fn exit_code_for(summary: &ScanSummary) -> ExitCode {
    if !summary.scan_errors.is_empty() {
        ExitCode::PartialSuccess
    } else if summary.duplicate_groups > 0 {
        ExitCode::Success
    } else {
        ExitCode::NoDuplicates
    }
}
