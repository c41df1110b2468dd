//! Error types shared by every engine component.
//!
//! The distilled taxonomy is three kinds: out-of-memory, range/contract
//! violations, and assertable precondition violations. The first two are
//! runtime conditions a caller can observe and handle; the third indicates a
//! caller bug and is checked with `debug_assert!` rather than returned as a
//! `Result` (see `index.rs` and `sparse.rs`).

use std::fmt;

/// Errors returned by the sparse engine's public operations.
#[derive(Debug, thiserror::Error)]
pub enum SparseError {
    /// A page, L2 directory, L1 entry, or extent slot could not be
    /// allocated. The engine never pre-reserves memory, so this can surface
    /// from any mutating operation.
    #[error("out of memory")]
    OutOfMemory,

    /// An `ExtentList` was constructed with invalid bounds, or
    /// `add_extent` was called out of the strictly ascending, contiguous
    /// order it requires. Indicates a bug in the extent producer.
    #[error("range violation: {0}")]
    Range(String),
}

impl SparseError {
    pub(crate) fn range(msg: impl fmt::Display) -> Self {
        SparseError::Range(msg.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SparseError>;
