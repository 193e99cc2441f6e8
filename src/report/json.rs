//! JSON reporter for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     {
//!       "digest": "abc123...",
//!       "size": 1024,
//!       "files": ["/path/to/file1.txt", "/path/to/file2.txt"]
//!     }
//!   ],
//!   "summary": {
//!     "root": "/path",
//!     "total_files": 100,
//!     "total_size": 1048576,
//!     "duplicate_groups": 5,
//!     "duplicate_files": 10,
//!     "reclaimable_space": 51200,
//!     "failed_files": 0,
//!     "scan_errors": 0,
//!     "walk_duration_ms": 12,
//!     "hash_duration_ms": 345
//!   }
//! }
//! ```

use std::io::{self, Write};
use std::sync::Mutex;

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, ScanSummary};

use super::Reporter;

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonGroup {
    /// Content digest as a hexadecimal string (64 characters)
    pub digest: String,
    /// File size in bytes
    pub size: u64,
    /// Paths of all duplicate files
    pub files: Vec<String>,
}

impl JsonGroup {
    fn from_group(group: &DuplicateGroup) -> Self {
        Self {
            digest: group.digest_hex(),
            size: group.size,
            files: group
                .paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Root directory that was scanned
    pub root: String,
    /// Total number of files walked
    pub total_files: usize,
    /// Total size of all walked files in bytes
    pub total_size: u64,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Redundant copies across all groups (excluding originals)
    pub duplicate_files: usize,
    /// Space reclaimable by removing redundant copies (bytes)
    pub reclaimable_space: u64,
    /// Files that could not be hashed
    pub failed_files: usize,
    /// Directories or entries that could not be inspected
    pub scan_errors: usize,
    /// Duration of the walk phase in milliseconds
    pub walk_duration_ms: u64,
    /// Duration of the hashing phase in milliseconds
    pub hash_duration_ms: u64,
}

/// Full JSON document: all groups plus the summary.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    duplicates: &'a [JsonGroup],
    summary: JsonSummary,
}

/// Buffers groups and writes one JSON document at completion.
#[derive(Debug, Default)]
pub struct JsonReporter {
    groups: Mutex<Vec<JsonGroup>>,
}

impl JsonReporter {
    /// Create a new JSON reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for JsonReporter {
    fn group_found(&self, group: &DuplicateGroup) {
        let mut groups = self.groups.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        groups.push(JsonGroup::from_group(group));
    }

    fn scan_complete(&self, summary: &ScanSummary) {
        let groups = self.groups.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let report = JsonReport {
            duplicates: &groups,
            summary: JsonSummary {
                root: summary.root.display().to_string(),
                total_files: summary.total_files,
                total_size: summary.total_size,
                duplicate_groups: summary.duplicate_groups,
                duplicate_files: summary.duplicate_files,
                reclaimable_space: summary.reclaimable_space,
                failed_files: summary.failed_files,
                scan_errors: summary.scan_errors.len(),
                walk_duration_ms: summary.walk_duration.as_millis() as u64,
                hash_duration_ms: summary.hash_duration.as_millis() as u64,
            },
        };

        match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                let mut out = io::stdout().lock();
                let _ = writeln!(out, "{json}");
            }
            Err(e) => log::error!("Failed to serialize JSON report: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_json_group_from_group() {
        let group = DuplicateGroup {
            digest: [0xab; 32],
            size: 42,
            paths: vec![PathBuf::from("/a"), PathBuf::from("/b")],
        };

        let json = JsonGroup::from_group(&group);
        assert_eq!(json.size, 42);
        assert_eq!(json.files, vec!["/a", "/b"]);
        assert_eq!(json.digest, "ab".repeat(32));
    }

    #[test]
    fn test_reporter_buffers_groups() {
        let reporter = JsonReporter::new();
        let group = DuplicateGroup {
            digest: [0u8; 32],
            size: 1,
            paths: vec![PathBuf::from("/x"), PathBuf::from("/y")],
        };

        reporter.group_found(&group);
        reporter.group_found(&group);

        assert_eq!(reporter.groups.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_report_serializes() {
        let groups = vec![JsonGroup {
            digest: "00".repeat(32),
            size: 10,
            files: vec!["/a".into(), "/b".into()],
        }];
        let report = JsonReport {
            duplicates: &groups,
            summary: JsonSummary {
                root: "/tmp".into(),
                total_files: 2,
                total_size: 20,
                duplicate_groups: 1,
                duplicate_files: 1,
                reclaimable_space: 10,
                failed_files: 0,
                scan_errors: 0,
                walk_duration_ms: 1,
                hash_duration_ms: 2,
            },
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"duplicates\""));
        assert!(json.contains("\"reclaimable_space\":10"));
    }
}
