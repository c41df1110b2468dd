//! `vsparse-engine` — a sparse, in-memory virtual block store.
//!
//! A [`SparseArray`] behaves like a byte-addressable virtual disk of up to
//! 2⁶³−1 bytes that reads as zero everywhere until written, while only
//! allocating memory for the regions that actually hold non-zero content.
//! It is backed by a two-level, page-table-like index ([`TwoLevelIndex`],
//! private) over fixed-size [`Page`]s, and pairs with [`ExtentList`] to
//! report which subranges of a byte range are holes, explicit zero pages,
//! or real data — the same three-way classification an NBD server reports
//! to a client asking "what does this range actually contain".
//!
//! The engine takes no filesystem or network dependency and performs no
//! internal locking: see the crate-level docs on [`SparseArray`] for the
//! concurrency contract an embedder must provide.

mod error;
mod extents;
mod index;
mod page;
mod sparse;

pub use error::{Result, SparseError};
pub use extents::{Extent, ExtentList, ExtentType};
pub use sparse::SparseArray;

use index::TwoLevelIndex;

/// Length in bytes of one page. Fixed at build time; tune only by changing
/// this constant and rebuilding, since it is baked into every `Page`
/// allocation and every offset/page-index computation in [`index`].
pub const PAGE_SIZE: usize = 32768;

/// Number of page slots in one L2 directory. Each L1 entry therefore covers
/// `PAGE_SIZE * L2_SIZE` bytes of the virtual address space (128 MiB with
/// the defaults above).
pub const L2_SIZE: usize = 4096;

/// Maximum number of extents any single [`ExtentList`] will ever hold,
/// regardless of how many times a producer calls `add_extent`. Bounds both
/// the memory an extent query can consume and the size of a reply an
/// embedding NBD server would send to a client.
pub const MAX_EXTENTS: usize = 1 << 20;
