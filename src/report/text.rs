//! Human-readable text reporter.

use std::io::{self, Write};

use crate::duplicates::{DuplicateGroup, ScanSummary};

use super::Reporter;

/// Streams each group to stdout as it is confirmed.
///
/// Output per group: a header line, one ` -- ` prefixed line per member,
/// and a blank separator line.
#[derive(Debug, Default)]
pub struct TextReporter;

impl TextReporter {
    /// Create a new text reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for TextReporter {
    fn group_found(&self, group: &DuplicateGroup) {
        use std::fmt::Write as _;

        // One locked write per group so concurrent workers never
        // interleave lines.
        let mut block = format!("Duplicates ({} bytes):\n", group.size);
        for path in &group.paths {
            let _ = writeln!(block, " -- {}", path.display());
        }
        block.push('\n');

        let mut out = io::stdout().lock();
        let _ = out.write_all(block.as_bytes());
    }

    fn scan_complete(&self, summary: &ScanSummary) {
        let mut out = io::stdout().lock();
        let _ = writeln!(
            out,
            "Scanned {} files ({} bytes) under {} in {:.2?}.",
            summary.total_files,
            summary.total_size,
            summary.root.display(),
            summary.walk_duration + summary.hash_duration,
        );
        let _ = writeln!(
            out,
            "{} duplicate groups, {} redundant copies, {} bytes reclaimable.",
            summary.duplicate_groups, summary.duplicate_files, summary.reclaimable_space,
        );
        if summary.failed_files > 0 || !summary.scan_errors.is_empty() {
            let _ = writeln!(
                out,
                "{} paths could not be read (see diagnostics above); results may be incomplete.",
                summary.failed_files + summary.scan_errors.len(),
            );
        }
    }
}
