//! Error types shared by the storage layer.

use thiserror::Error;

/// Failure while accessing byte-addressable non-volatile storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Access past the end of the storage region
    #[error("access of {len} bytes at offset {offset} exceeds capacity {capacity}")]
    OutOfBounds {
        offset: u32,
        len: usize,
        capacity: usize,
    },

    /// Underlying file I/O failed
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Check that `len` bytes starting at `offset` fit inside `capacity`.
pub(crate) fn check_bounds(offset: u32, len: usize, capacity: usize) -> Result<usize, StorageError> {
    let start = usize::try_from(offset).unwrap_or(usize::MAX);
    match start.checked_add(len) {
        Some(end) if end <= capacity => Ok(start),
        _ => Err(StorageError::OutOfBounds {
            offset,
            len,
            capacity,
        }),
    }
}
