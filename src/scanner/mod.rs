//! Scanner module for directory traversal and file hashing.
//!
//! The scanner is divided into submodules:
//! - [`walker`]: single-threaded depth-first traversal building the size index
//! - [`hasher`]: BLAKE3 content hashing (streaming)
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::Walker;
//! use std::path::Path;
//!
//! let outcome = Walker::new(Path::new(".")).scan();
//! for (size, paths) in &outcome.index {
//!     println!("{} bytes: {} files", size, paths.len());
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::collections::HashMap;
use std::path::PathBuf;

pub use hasher::{digest_to_hex, Digest, Hasher};
pub use walker::{ScanOutcome, Walker};

/// Index from file size to the paths of every file with that size.
///
/// Built once by the walker, read-only afterwards. Every scanned path
/// appears under exactly one size key, the key matching the file's size
/// at scan time.
pub type SizeIndex = HashMap<u64, Vec<PathBuf>>;

/// Errors that can occur during directory traversal.
///
/// All of these are non-fatal: the walk skips the affected subtree or
/// entry and continues.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when listing a directory or reading metadata.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The entry disappeared between listing and inspection.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while traversing.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while hashing a file.
///
/// A hash failure marks the file as unhashable; it is excluded from
/// duplicate grouping and never aborts the bucket or the scan.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The file was not found (deleted since the walk).
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when opening or reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
