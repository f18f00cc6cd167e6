//! Array-backed binary heaps used by the query engine.
//!
//! Both heaps are 1-indexed: slot 0 is unused, the head lives at index 1, the parent
//! of `i` is `i >> 1` and its children are `i << 1` and `i << 1 | 1`. Storage is
//! allocated up front and reused across queries; clearing only resets the count.

mod k_smallest;
mod min_max;

pub use k_smallest::KSmallestHeap;
pub use min_max::{HeapOrder, MinMaxHeap};

#[inline(always)]
pub(crate) fn parent(index: usize) -> usize {
    index >> 1
}

#[inline(always)]
pub(crate) fn left(index: usize) -> usize {
    index << 1
}

#[inline(always)]
pub(crate) fn right(index: usize) -> usize {
    (index << 1) | 1
}
