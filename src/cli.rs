//! Command-line interface definitions for dupescan.
//!
//! Defines the CLI arguments using the clap derive API. The root path can be
//! given as a positional argument; when omitted, an interactive prompt reads
//! it from standard input and re-asks until an existing directory is entered.
//!
//! # Example
//!
//! ```bash
//! # Scan a directory
//! dupescan ~/Downloads
//!
//! # Scan with JSON output for scripting
//! dupescan ~/Downloads --output json
//!
//! # Limit the hashing worker pool
//! dupescan ~/Downloads --threads 2
//!
//! # No argument: prompt for the path on stdin
//! dupescan
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::duplicates::DEFAULT_POOL_SIZE;

/// Find groups of byte-identical files under a directory tree.
///
/// Files are bucketed by size first, then confirmed as duplicates by
/// content hash (BLAKE3). Unreadable directories and files are skipped
/// with a diagnostic; they never abort the scan.
#[derive(Debug, Parser)]
#[command(name = "dupescan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan; prompts on standard input when omitted
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and results
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Number of hashing worker threads
    ///
    /// Never more workers are started than there are candidate buckets.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_POOL_SIZE)]
    pub threads: usize,

    /// Output format (text for humans, json for scripting)
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Output formats for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable groups streamed as they are found
    Text,
    /// Machine-readable JSON document emitted after the scan
    Json,
}

/// Prompt for a root directory on standard input.
///
/// Re-prompts indefinitely while the entered path is not an existing
/// directory. Fails only when stdin is closed.
pub fn prompt_for_root() -> io::Result<PathBuf> {
    let stdin = io::stdin();
    let mut line = String::new();

    print!("Type a path: ");
    io::stdout().flush()?;

    loop {
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed before a valid path was entered",
            ));
        }

        let candidate = PathBuf::from(line.trim());
        if candidate.is_dir() {
            return Ok(candidate);
        }

        print!("Path does not exist, try again: ");
        io::stdout().flush()?;
    }
}
