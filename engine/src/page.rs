//! Fixed-size, zero-initialised page allocation.
//!
//! A `Page` is exclusively owned by the L2 slot that holds it (see
//! `index.rs`); there is no pooling or reuse across generations, since the
//! engine takes no on-disk persistence or cross-process sharing Non-goals
//! that would make a freelist worthwhile.

use crate::error::{Result, SparseError};
use crate::PAGE_SIZE;

/// `PAGE_SIZE` contiguous bytes of virtual disk content.
pub type Page = Box<[u8; PAGE_SIZE]>;

/// Allocates a new, zero-initialised page.
///
/// Uses `try_reserve_exact` so an allocation failure surfaces as
/// `SparseError::OutOfMemory` instead of aborting the process the way a
/// plain `vec![0u8; PAGE_SIZE]` would on allocation failure.
pub fn alloc_page() -> Result<Page> {
    let mut buf: Vec<u8> = Vec::new();
    buf.try_reserve_exact(PAGE_SIZE)
        .map_err(|_| SparseError::OutOfMemory)?;
    buf.resize(PAGE_SIZE, 0);
    let boxed: Box<[u8; PAGE_SIZE]> = buf
        .into_boxed_slice()
        .try_into()
        .unwrap_or_else(|_| unreachable!("buf was reserved to exactly PAGE_SIZE elements"));
    Ok(boxed)
}

/// Returns `true` if every byte of `page` is zero.
///
/// Scans a word at a time where possible; this is the same trade-off the
/// distilled spec calls out as acceptable for an `O(PAGE_SIZE)` scan. Uses
/// `from_ne_bytes` on 8-byte chunks rather than casting to `&[u64]`, since
/// the latter would require the slice to be 8-byte aligned.
pub fn is_all_zero(page: &[u8]) -> bool {
    let chunks = page.chunks_exact(8);
    let tail = chunks.remainder();
    let tail_zero = tail.iter().all(|&b| b == 0);
    tail_zero && chunks.all(|c| u64::from_ne_bytes(c.try_into().unwrap()) == 0)
}
