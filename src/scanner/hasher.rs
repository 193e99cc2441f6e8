//! BLAKE3 file hasher with streaming reads.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct for computing a content digest
//! of one file. The digest is a duplicate-detection checksum, not a security
//! primitive; BLAKE3 is used for its speed and fixed width.
//!
//! Files are opened without an exclusive lock (`File::open` shares read and
//! write access with other processes on every supported platform), so
//! scanning a live filesystem does not produce spurious "in use" failures.
//! The handle is scoped to the call and released on success and failure
//! alike, which keeps descriptor usage flat across large scans.

use std::fs::File;
use std::io;
use std::path::Path;

use super::HashError;

/// Content digest of a file, 32 raw BLAKE3 bytes.
///
/// Compared byte-for-byte; rendered as lowercase hex for display.
pub type Digest = [u8; 32];

/// Render a digest as a lowercase hex string (64 characters).
#[must_use]
pub fn digest_to_hex(digest: &Digest) -> String {
    digest.iter().fold(String::with_capacity(64), |mut s, b| {
        use std::fmt::Write;
        let _ = write!(s, "{b:02x}");
        s
    })
}

/// Computes content digests for files.
#[derive(Debug, Default)]
pub struct Hasher;

impl Hasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compute the content digest of a file.
    ///
    /// Streams the full file through BLAKE3. On open or read failure the
    /// error is returned; callers treat such files as unhashable and
    /// exclude them from grouping.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] when the file cannot be opened or read.
    pub fn digest(&self, path: &Path) -> Result<Digest, HashError> {
        let mut file = File::open(path).map_err(|e| classify(path, e))?;
        let mut hasher = blake3::Hasher::new();
        io::copy(&mut file, &mut hasher).map_err(|e| classify(path, e))?;
        Ok(*hasher.finalize().as_bytes())
    }
}

/// Convert an I/O error into a [`HashError`].
fn classify(path: &Path, error: io::Error) -> HashError {
    use io::ErrorKind;

    match error.kind() {
        ErrorKind::NotFound => HashError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => HashError::PermissionDenied(path.to_path_buf()),
        _ => HashError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}
