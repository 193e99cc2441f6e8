//! Directory walker building the size index.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and bucketing every regular file by its byte size. The walk is
//! single-threaded and depth-first (walkdir); only the hashing phase of the
//! pipeline is parallel.
//!
//! Directories that cannot be listed are skipped with a diagnostic and the
//! walk continues with their siblings. Symbolic links are not followed, so
//! link cycles cannot cause infinite recursion.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::Walker;
//! use std::path::Path;
//!
//! let outcome = Walker::new(Path::new("/home/user/Downloads")).scan();
//! println!("{} distinct sizes", outcome.index.len());
//! for err in &outcome.errors {
//!     eprintln!("Warning: {}", err);
//! }
//! ```

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{ScanError, SizeIndex};

/// Directory walker for file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
}

/// Result of a completed walk.
///
/// The index is fully populated before any hashing begins; errors are the
/// non-fatal diagnostics collected along the way.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Every discovered file, bucketed by size
    pub index: SizeIndex,
    /// Subtrees and entries that could not be inspected
    pub errors: Vec<ScanError>,
}

impl Walker {
    /// Create a new walker for the given root directory.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            root: path.to_path_buf(),
        }
    }

    /// Walk the tree and build the size index.
    ///
    /// Visits every nested directory depth-first. For each regular file the
    /// size and path are recorded; entry paths are built by joining the
    /// parent directory path with the entry name, so no oversized
    /// precomputed path string is relied upon. Sibling order within a
    /// directory is whatever the OS listing provides.
    ///
    /// Never fails as a whole: an unreadable directory or a file whose
    /// metadata cannot be read produces one [`ScanError`] and a `warn`
    /// diagnostic, and the walk moves on.
    #[must_use]
    pub fn scan(&self) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        for entry in WalkDir::new(&self.root).follow_links(false) {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    match entry.metadata() {
                        Ok(meta) => {
                            log::trace!("{}: {} bytes", entry.path().display(), meta.len());
                            outcome
                                .index
                                .entry(meta.len())
                                .or_default()
                                .push(entry.into_path());
                        }
                        Err(e) => {
                            let err = classify(entry.path().to_path_buf(), e);
                            log::warn!("{}", err);
                            outcome.errors.push(err);
                        }
                    }
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map_or_else(|| self.root.clone(), Path::to_path_buf);
                    let err = classify(path, e);
                    log::warn!("{}", err);
                    outcome.errors.push(err);
                }
            }
        }

        outcome
    }
}

/// Convert a walkdir error into a [`ScanError`].
fn classify(path: PathBuf, error: walkdir::Error) -> ScanError {
    use std::io::ErrorKind;

    match error.io_error().map(std::io::Error::kind) {
        Some(ErrorKind::PermissionDenied) => ScanError::PermissionDenied(path),
        Some(ErrorKind::NotFound) => ScanError::NotFound(path),
        _ => ScanError::Io {
            path,
            source: std::io::Error::other(error.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    /// Create a test directory with files of known sizes.
    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        File::create(dir.path().join("a.txt"))
            .unwrap()
            .write_all(b"xxxxxxxxxx")
            .unwrap();
        File::create(dir.path().join("b.txt"))
            .unwrap()
            .write_all(b"yyyyyyyyyy")
            .unwrap();

        let subdir = dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();
        File::create(subdir.join("nested.txt"))
            .unwrap()
            .write_all(b"zzzzz")
            .unwrap();

        dir
    }

    #[test]
    fn test_walker_buckets_by_size() {
        let dir = create_test_dir();
        let outcome = Walker::new(dir.path()).scan();

        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.index.len(), 2);
        assert_eq!(outcome.index[&10].len(), 2);
        assert_eq!(outcome.index[&5].len(), 1);
    }

    #[test]
    fn test_walker_each_path_under_one_key() {
        let dir = create_test_dir();
        let outcome = Walker::new(dir.path()).scan();

        let mut seen = std::collections::HashSet::new();
        for (size, paths) in &outcome.index {
            for path in paths {
                assert!(seen.insert(path.clone()), "{} listed twice", path.display());
                assert_eq!(fs::metadata(path).unwrap().len(), *size);
            }
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_walker_includes_empty_files() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("empty1")).unwrap();
        File::create(dir.path().join("empty2")).unwrap();

        let outcome = Walker::new(dir.path()).scan();

        assert_eq!(outcome.index[&0].len(), 2);
    }

    #[test]
    fn test_walker_skips_directories_themselves() {
        let dir = create_test_dir();
        let outcome = Walker::new(dir.path()).scan();

        for paths in outcome.index.values() {
            for path in paths {
                assert!(path.is_file());
            }
        }
    }

    #[test]
    fn test_walker_empty_tree() {
        let dir = TempDir::new().unwrap();
        let outcome = Walker::new(dir.path()).scan();

        assert!(outcome.index.is_empty());
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_walker_nonexistent_root() {
        let outcome = Walker::new(Path::new("/nonexistent/path/12345")).scan();

        assert!(outcome.index.is_empty());
        assert_eq!(outcome.errors.len(), 1);
    }

    #[test]
    #[cfg(unix)]
    fn test_walker_skips_unreadable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let dir = create_test_dir();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        File::create(locked.join("hidden.txt"))
            .unwrap()
            .write_all(b"secret")
            .unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Running as root bypasses permissions; nothing to assert then.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let outcome = Walker::new(dir.path()).scan();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(outcome.errors.len(), 1);
        assert!(matches!(
            outcome.errors[0],
            ScanError::PermissionDenied(_)
        ));
        // Files outside the locked subtree are still indexed.
        let total: usize = outcome.index.values().map(Vec::len).sum();
        assert_eq!(total, 3);
    }
}
