//! Duplicate detection pipeline.
//!
//! # Overview
//!
//! The pipeline has two phases:
//! 1. **Size bucketing** (see [`crate::scanner::Walker`]): files that differ
//!    in size cannot be duplicates, so singleton buckets are dropped without
//!    any hashing. This is the core cost-saving step.
//! 2. **Content confirmation**: the [`Dispatcher`] distributes the remaining
//!    buckets across a fixed worker pool; each worker runs the grouper over
//!    one bucket at a time and forwards confirmed groups to the reporter.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::Dispatcher;
//! use dupescan::report::TextReporter;
//! use dupescan::scanner::Walker;
//! use std::path::Path;
//!
//! let outcome = Walker::new(Path::new(".")).scan();
//! let reporter = TextReporter::new();
//! let stats = Dispatcher::new(4).run(outcome.index, &reporter);
//! println!("{} groups, {} bytes reclaimable", stats.duplicate_groups, stats.reclaimable_space);
//! ```

pub mod dispatcher;
pub mod grouper;
pub mod queue;

use std::path::PathBuf;
use std::time::Duration;

use crate::scanner::{digest_to_hex, Digest, ScanError};

pub use dispatcher::{DispatchStats, Dispatcher, DEFAULT_POOL_SIZE};
pub use grouper::{process_bucket, BucketOutcome};
pub use queue::{Bucket, WorkQueue};

/// Confirmed group of byte-identical files.
///
/// Always holds at least two paths sharing the same size and digest.
/// Immutable once emitted; ownership passes to the reporter.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    /// Content digest shared by every member
    pub digest: Digest,
    /// File size in bytes shared by every member
    pub size: u64,
    /// Paths of the duplicate files
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of redundant copies (total minus one original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }

    /// Space reclaimable by keeping a single copy.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }

    /// Digest as a hexadecimal string.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        digest_to_hex(&self.digest)
    }
}

/// Summary statistics for a completed scan.
#[derive(Debug)]
pub struct ScanSummary {
    /// Root directory that was scanned
    pub root: PathBuf,
    /// Total number of files walked
    pub total_files: usize,
    /// Total size of all walked files in bytes
    pub total_size: u64,
    /// Size buckets with 2+ files (candidate groups)
    pub candidate_buckets: usize,
    /// Files that entered the hashing phase
    pub candidate_files: usize,
    /// Files successfully hashed
    pub hashed_files: usize,
    /// Files that failed to hash (excluded from grouping)
    pub failed_files: usize,
    /// Confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Redundant copies across all groups (excluding one original each)
    pub duplicate_files: usize,
    /// Space reclaimable by removing all redundant copies
    pub reclaimable_space: u64,
    /// Duration of the walk phase
    pub walk_duration: Duration,
    /// Duration of the hashing phase
    pub hash_duration: Duration,
    /// Non-fatal errors collected during the walk
    pub scan_errors: Vec<ScanError>,
}
