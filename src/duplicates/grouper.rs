//! Per-bucket grouping: hash every candidate, partition by digest.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::scanner::{Digest, Hasher};

use super::{Bucket, DuplicateGroup};

/// Result of processing one bucket.
#[derive(Debug, Default)]
pub struct BucketOutcome {
    /// Groups with 2+ successfully hashed, digest-equal members
    pub groups: Vec<DuplicateGroup>,
    /// Files successfully hashed
    pub hashed: usize,
    /// Files whose hashing failed (excluded from grouping)
    pub failed: usize,
}

/// Hash every path in one bucket and partition by digest.
///
/// Paths are hashed strictly sequentially; parallelism exists only across
/// buckets via the worker pool. A path whose hashing fails is logged and
/// excluded: it never matches anything, not even another unhashable file
/// with identical content. Groups are emitted in first-occurrence order of
/// their digest within the bucket.
#[must_use]
pub fn process_bucket(bucket: Bucket, hasher: &Hasher) -> BucketOutcome {
    let mut outcome = BucketOutcome::default();
    let mut by_digest: HashMap<Digest, Vec<PathBuf>> = HashMap::with_capacity(bucket.len());
    let mut order: Vec<Digest> = Vec::new();

    let size = bucket.size;
    for path in bucket.paths {
        match hasher.digest(&path) {
            Ok(digest) => {
                outcome.hashed += 1;
                by_digest
                    .entry(digest)
                    .or_insert_with(|| {
                        order.push(digest);
                        Vec::new()
                    })
                    .push(path);
            }
            Err(e) => {
                outcome.failed += 1;
                log::warn!("Failed to hash {}: {}", path.display(), e);
            }
        }
    }

    for digest in order {
        if let Some(paths) = by_digest.remove(&digest) {
            if paths.len() > 1 {
                log::debug!(
                    "Duplicate group {}: {} files, {} bytes each",
                    crate::scanner::digest_to_hex(&digest),
                    paths.len(),
                    size
                );
                outcome.groups.push(DuplicateGroup {
                    digest,
                    size,
                    paths,
                });
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        File::create(&path).unwrap().write_all(content).unwrap();
        path
    }

    #[test]
    fn test_bucket_with_duplicates_yields_one_group() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a", b"xxxxxxxxxx");
        let b = write_file(&dir, "b", b"xxxxxxxxxx");
        let c = write_file(&dir, "c", b"yyyyyyyyyy");

        let outcome = process_bucket(Bucket::new(10, vec![a.clone(), b.clone(), c]), &Hasher::new());

        assert_eq!(outcome.hashed, 3);
        assert_eq!(outcome.failed, 0);
        assert_eq!(outcome.groups.len(), 1);
        assert_eq!(outcome.groups[0].paths, vec![a, b]);
        assert_eq!(outcome.groups[0].size, 10);
    }

    #[test]
    fn test_all_distinct_yields_no_groups() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a", b"aaaa");
        let b = write_file(&dir, "b", b"bbbb");

        let outcome = process_bucket(Bucket::new(4, vec![a, b]), &Hasher::new());

        assert!(outcome.groups.is_empty());
        assert_eq!(outcome.hashed, 2);
    }

    #[test]
    fn test_unhashable_file_is_excluded() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a", b"same content");
        let b = write_file(&dir, "b", b"same content");
        let gone = dir.path().join("gone");

        let outcome = process_bucket(Bucket::new(12, vec![a.clone(), b.clone(), gone]), &Hasher::new());

        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.groups.len(), 1);
        assert_eq!(outcome.groups[0].paths, vec![a, b]);
    }

    #[test]
    fn test_two_unhashable_files_never_match_each_other() {
        let dir = TempDir::new().unwrap();
        let gone1 = dir.path().join("gone1");
        let gone2 = dir.path().join("gone2");

        let outcome = process_bucket(Bucket::new(0, vec![gone1, gone2]), &Hasher::new());

        assert_eq!(outcome.failed, 2);
        assert!(outcome.groups.is_empty());
    }

    #[test]
    fn test_groups_emitted_in_first_occurrence_order() {
        let dir = TempDir::new().unwrap();
        let a1 = write_file(&dir, "a1", b"aaaa");
        let b1 = write_file(&dir, "b1", b"bbbb");
        let a2 = write_file(&dir, "a2", b"aaaa");
        let b2 = write_file(&dir, "b2", b"bbbb");

        let outcome = process_bucket(
            Bucket::new(4, vec![a1.clone(), b1.clone(), a2, b2]),
            &Hasher::new(),
        );

        assert_eq!(outcome.groups.len(), 2);
        assert_eq!(outcome.groups[0].paths[0], a1);
        assert_eq!(outcome.groups[1].paths[0], b1);
    }
}
