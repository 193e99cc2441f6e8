//! Work queue shared by the dispatcher and its workers.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

/// One size bucket: the unit of work handed to a worker.
///
/// Immutable once enqueued; every path in it has the same byte size.
#[derive(Debug)]
pub struct Bucket {
    /// Byte size shared by all paths
    pub size: u64,
    /// Candidate paths (always 2+)
    pub paths: Vec<PathBuf>,
}

impl Bucket {
    /// Create a bucket for one size key.
    #[must_use]
    pub fn new(size: u64, paths: Vec<PathBuf>) -> Self {
        Self { size, paths }
    }

    /// Number of candidate paths in this bucket.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Thread-safe FIFO of buckets.
///
/// The queue itself provides all synchronization; callers never lock
/// around it. Each bucket is dequeued exactly once.
#[derive(Debug)]
pub struct WorkQueue {
    buckets: Mutex<VecDeque<Bucket>>,
}

impl WorkQueue {
    /// Create a queue preloaded with every bucket to process.
    #[must_use]
    pub fn new(buckets: Vec<Bucket>) -> Self {
        Self {
            buckets: Mutex::new(buckets.into()),
        }
    }

    /// Take the next bucket, or `None` when the queue is drained.
    ///
    /// The emptiness check and the take happen under a single lock
    /// acquisition, so two workers can never race between observing a
    /// non-empty queue and removing from it: a bucket is either taken by
    /// exactly one worker or the worker sees the drain signal.
    pub fn pop(&self) -> Option<Bucket> {
        self.buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    /// Number of buckets not yet taken.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if every bucket has been taken.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
