//! The append-only, window-clipped, coalescing extent list.
//!
//! `ExtentList` is the consumer-facing half of the extent-enumeration
//! protocol: [`crate::SparseArray::extents`] walks pages and feeds
//! classified subranges into it via [`ExtentList::add_extent`], which
//! enforces strict ascending, contiguous order and coalesces adjacent
//! extents of the same type.

use crate::error::{Result, SparseError};
use crate::MAX_EXTENTS;

bitflags::bitflags! {
    /// Classification of a subrange reported by [`crate::SparseArray::extents`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ExtentType: u32 {
        /// Never written; reads as zero.
        const HOLE = 0b01;
        /// Backed by a page, but that page is entirely zero.
        const ZERO = 0b10;
    }
}

impl ExtentType {
    /// Normal allocated, non-zero data. Distinct constant for readability;
    /// equal to [`ExtentType::empty`].
    pub const DATA: ExtentType = ExtentType::empty();
}

/// A contiguous, classified subrange of a [`ExtentList`]'s window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub offset: u64,
    pub length: u64,
    pub ty: ExtentType,
}

/// An ordered, coalescing sequence of [`Extent`]s over `[start, end)`.
///
/// Producers call [`ExtentList::add_extent`] in strictly ascending,
/// contiguous order; consumers read the result with [`ExtentList::count`]
/// and [`ExtentList::get`], or by iterating `&extent_list`.
pub struct ExtentList {
    start: u64,
    end: u64,
    /// Where the next extent is expected to start. `None` until the first
    /// call to `add_extent`; updated on every call regardless of whether
    /// the extent is materialised, since it exists purely to check the
    /// producer's contiguity contract.
    next: Option<u64>,
    extents: Vec<Extent>,
}

impl ExtentList {
    /// Creates an empty extent list over `[start, end)`.
    ///
    /// `start == end` (a zero-length window) is allowed. `start > end`, or
    /// either bound exceeding `i64::MAX`, is a range error (mirroring the
    /// producer-facing surface's `INT64_MAX` bound so offsets stay
    /// representable as signed 64-bit values on the wire).
    pub fn new(start: u64, end: u64) -> Result<Self> {
        if start > i64::MAX as u64 || end > i64::MAX as u64 {
            return Err(SparseError::range(format!(
                "start ({start}) or end ({end}) exceeds i64::MAX"
            )));
        }
        if start > end {
            return Err(SparseError::range(format!(
                "start ({start}) > end ({end})"
            )));
        }
        Ok(ExtentList { start, end, next: None, extents: Vec::new() })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn count(&self) -> usize {
        self.extents.len()
    }

    /// Returns the `i`th extent. Panics if `i >= self.count()`, matching
    /// the distilled spec's "infallible" reads: an out-of-range index is a
    /// caller bug, not a runtime condition.
    pub fn get(&self, i: usize) -> Extent {
        self.extents[i]
    }

    /// Appends (or coalesces into the previous extent) a classified
    /// subrange.
    ///
    /// # Contract
    /// Extents must be added in strictly ascending, contiguous order: once
    /// any extent has been added, `offset` must equal the previous call's
    /// `offset + length`. A violation is a [`SparseError::Range`].
    ///
    /// A first extent that starts strictly after `start` is also a range
    /// error. Quirk preserved from the producer this protocol is modeled
    /// on: a first extent that ends at or before `start` is accepted and
    /// silently dropped, even though such a producer arguably "skipped"
    /// `start` without ever covering it.
    pub fn add_extent(&mut self, offset: u64, length: u64, ty: ExtentType) -> Result<()> {
        if let Some(next) = self.next {
            if next != offset {
                return Err(SparseError::range(format!(
                    "extents must be added in ascending order and must be contiguous \
                     (expected offset {next}, got {offset})"
                )));
            }
        }
        self.next = Some(offset + length);

        if length == 0 {
            return Ok(());
        }
        if offset >= self.end || self.extents.len() >= MAX_EXTENTS {
            return Ok(());
        }

        let mut offset = offset;
        let mut length = length;
        if offset + length > self.end {
            length -= offset + length - self.end;
        }

        if self.extents.is_empty() {
            if offset + length <= self.start {
                return Ok(());
            }
            if offset > self.start {
                return Err(SparseError::range(format!(
                    "first extent must not be > start ({})",
                    self.start
                )));
            }
            let overlap = self.start - offset;
            length -= overlap;
            offset += overlap;
        }

        if let Some(last) = self.extents.last_mut() {
            if last.ty == ty {
                last.length += length;
                return Ok(());
            }
        }

        self.extents
            .try_reserve(1)
            .map_err(|_| SparseError::OutOfMemory)?;
        self.extents.push(Extent { offset, length, ty });
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ExtentList {
    type Item = Extent;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Extent>>;

    fn into_iter(self) -> Self::IntoIter {
        self.extents.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_bounds() {
        assert!(ExtentList::new(10, 5).is_err());
        assert!(ExtentList::new(u64::MAX, u64::MAX).is_err());
    }

    #[test]
    fn zero_length_window_is_allowed() {
        let list = ExtentList::new(100, 100).unwrap();
        assert_eq!(list.count(), 0);
    }

    #[test]
    fn coalesces_adjacent_equal_types() {
        // S5 from the testable-properties scenarios.
        let mut list = ExtentList::new(0, 1 << 20).unwrap();
        list.add_extent(0, 4096, ExtentType::ZERO).unwrap();
        list.add_extent(4096, 4096, ExtentType::ZERO).unwrap();
        list.add_extent(8192, 4096, ExtentType::DATA).unwrap();
        assert_eq!(list.count(), 2);
        assert_eq!(list.get(0), Extent { offset: 0, length: 8192, ty: ExtentType::ZERO });
        assert_eq!(list.get(1), Extent { offset: 8192, length: 4096, ty: ExtentType::DATA });
    }

    #[test]
    fn out_of_order_extent_is_rejected() {
        // S6.
        let mut list = ExtentList::new(0, 1 << 20).unwrap();
        list.add_extent(0, 4096, ExtentType::DATA).unwrap();
        let err = list.add_extent(8192, 4096, ExtentType::DATA);
        assert!(err.is_err());
        assert_eq!(list.count(), 1);
    }

    #[test]
    fn truncates_extent_overlapping_end() {
        let mut list = ExtentList::new(0, 100).unwrap();
        list.add_extent(0, 150, ExtentType::DATA).unwrap();
        assert_eq!(list.count(), 1);
        assert_eq!(list.get(0).length, 100);
    }

    #[test]
    fn truncates_first_extent_overlapping_start() {
        let mut list = ExtentList::new(50, 200).unwrap();
        list.add_extent(0, 100, ExtentType::DATA).unwrap();
        assert_eq!(list.count(), 1);
        assert_eq!(list.get(0), Extent { offset: 50, length: 50, ty: ExtentType::DATA });
    }

    #[test]
    fn first_extent_entirely_before_start_is_dropped_not_an_error() {
        let mut list = ExtentList::new(50, 200).unwrap();
        list.add_extent(0, 50, ExtentType::DATA).unwrap();
        assert_eq!(list.count(), 0);
        // The cursor still advanced, so the next contiguous extent is fine.
        list.add_extent(50, 10, ExtentType::DATA).unwrap();
        assert_eq!(list.count(), 1);
    }

    #[test]
    fn first_extent_starting_after_start_is_a_bug() {
        let mut list = ExtentList::new(50, 200).unwrap();
        assert!(list.add_extent(60, 10, ExtentType::DATA).is_err());
    }

    #[test]
    fn zero_length_extent_advances_cursor_without_appending() {
        let mut list = ExtentList::new(0, 100).unwrap();
        list.add_extent(0, 0, ExtentType::DATA).unwrap();
        assert_eq!(list.count(), 0);
        list.add_extent(0, 10, ExtentType::DATA).unwrap();
        assert_eq!(list.count(), 1);
    }

    #[test]
    fn capacity_cap_is_enforced() {
        let mut list = ExtentList::new(0, u64::MAX / 2).unwrap();
        let mut offset = 0u64;
        for i in 0..(MAX_EXTENTS + 10) {
            let ty = if i % 2 == 0 { ExtentType::DATA } else { ExtentType::ZERO };
            list.add_extent(offset, 1, ty).unwrap();
            offset += 1;
        }
        assert!(list.count() <= MAX_EXTENTS);
    }

    #[test]
    fn iterates_by_value() {
        let mut list = ExtentList::new(0, 10).unwrap();
        list.add_extent(0, 10, ExtentType::DATA).unwrap();
        let collected: Vec<Extent> = (&list).into_iter().collect();
        assert_eq!(collected.len(), 1);
    }
}
