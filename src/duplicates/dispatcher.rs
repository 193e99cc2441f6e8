//! Work distribution across the fixed hashing pool.
//!
//! # Overview
//!
//! The [`Dispatcher`] turns the size index into a queue of candidate
//! buckets, starts a bounded pool of worker threads over it, and joins them
//! all before returning. Confirmed groups are forwarded to the reporter as
//! each bucket completes; no ordering is guaranteed across buckets, and no
//! worker outlives the call.

use std::thread;

use crate::report::Reporter;
use crate::scanner::{Hasher, SizeIndex};

use super::grouper::process_bucket;
use super::queue::{Bucket, WorkQueue};

/// Default number of hashing worker threads.
pub const DEFAULT_POOL_SIZE: usize = 4;

/// Statistics from the hashing phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Size buckets with 2+ files that entered the queue
    pub candidate_buckets: usize,
    /// Files across all candidate buckets
    pub candidate_files: usize,
    /// Worker threads actually started
    pub workers: usize,
    /// Files successfully hashed
    pub hashed_files: usize,
    /// Files whose hashing failed
    pub failed_files: usize,
    /// Confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Redundant copies across all groups
    pub duplicate_files: usize,
    /// Space reclaimable by removing all redundant copies
    pub reclaimable_space: u64,
}

/// Per-worker tally, merged after the join.
#[derive(Debug, Default)]
struct WorkerStats {
    buckets: usize,
    hashed: usize,
    failed: usize,
    groups: usize,
    duplicates: usize,
    reclaimable: u64,
}

/// Distributes candidate buckets across a fixed worker pool.
#[derive(Debug)]
pub struct Dispatcher {
    pool_size: usize,
    hasher: Hasher,
}

impl Dispatcher {
    /// Create a dispatcher with the given maximum pool size (clamped to 1+).
    #[must_use]
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool_size: pool_size.max(1),
            hasher: Hasher::new(),
        }
    }

    /// Run the hashing phase over a fully built size index.
    ///
    /// Buckets with fewer than two paths can never contain a duplicate and
    /// are dropped without hashing. The remaining buckets are loaded into
    /// the work queue once, and `min(pool_size, bucket_count)` workers
    /// consume it; each worker exits when [`WorkQueue::pop`] signals the
    /// drain. Every worker is joined before this method returns.
    ///
    /// The reporter receives each confirmed group from the worker that
    /// found it, in no particular order across buckets.
    pub fn run(&self, index: SizeIndex, reporter: &dyn Reporter) -> DispatchStats {
        let buckets: Vec<Bucket> = index
            .into_iter()
            .filter(|(_, paths)| paths.len() > 1)
            .map(|(size, paths)| Bucket::new(size, paths))
            .collect();

        let mut stats = DispatchStats {
            candidate_buckets: buckets.len(),
            candidate_files: buckets.iter().map(Bucket::len).sum(),
            ..DispatchStats::default()
        };

        let workers = self.pool_size.min(buckets.len());
        stats.workers = workers;
        if workers == 0 {
            log::debug!("No candidate buckets, skipping hashing phase");
            return stats;
        }

        log::info!(
            "Hashing {} files in {} buckets with {} workers",
            stats.candidate_files,
            stats.candidate_buckets,
            workers
        );

        let queue = WorkQueue::new(buckets);
        let queue = &queue;
        let hasher = &self.hasher;
        let merged = thread::scope(|s| {
            let handles: Vec<_> = (0..workers)
                .map(|id| s.spawn(move || worker_loop(id, queue, hasher, reporter)))
                .collect();

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(worker) => worker,
                    Err(_) => {
                        log::error!("Hashing worker panicked");
                        WorkerStats::default()
                    }
                })
                .fold(WorkerStats::default(), |mut acc, w| {
                    acc.buckets += w.buckets;
                    acc.hashed += w.hashed;
                    acc.failed += w.failed;
                    acc.groups += w.groups;
                    acc.duplicates += w.duplicates;
                    acc.reclaimable += w.reclaimable;
                    acc
                })
        });

        stats.hashed_files = merged.hashed;
        stats.failed_files = merged.failed;
        stats.duplicate_groups = merged.groups;
        stats.duplicate_files = merged.duplicates;
        stats.reclaimable_space = merged.reclaimable;
        stats
    }
}

/// Worker run-loop: take buckets until the queue signals the drain.
fn worker_loop(id: usize, queue: &WorkQueue, hasher: &Hasher, reporter: &dyn Reporter) -> WorkerStats {
    let mut stats = WorkerStats::default();

    while let Some(bucket) = queue.pop() {
        let outcome = process_bucket(bucket, hasher);
        stats.buckets += 1;
        stats.hashed += outcome.hashed;
        stats.failed += outcome.failed;

        for group in &outcome.groups {
            stats.groups += 1;
            stats.duplicates += group.duplicate_count();
            stats.reclaimable += group.wasted_space();
            reporter.group_found(group);
        }
    }

    log::debug!(
        "Worker {}: {} buckets, {} files hashed, {} groups",
        id,
        stats.buckets,
        stats.hashed,
        stats.groups
    );
    stats
}
