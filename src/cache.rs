use crate::Point;
use crate::heap::{KSmallestHeap, MinMaxHeap};

/// Starting capacity of the traversal and range heaps.
///
/// Enough for any reasonably balanced tree; deeper trees grow the heap on demand.
pub const TRAVERSAL_CAPACITY: usize = 64;

/// A node waiting to be visited during a search.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct QueryNode {
    pub node: usize,
    /// Closest point of the node's bounds to the query, as far as is known.
    pub closest: Point,
}

/// Scratch memory for queries against a [`KdTree`](crate::KdTree).
///
/// Holds every heap a search needs so that repeated queries do not allocate inside
/// the search loop. One cache serves one query at a time; parallel workers each need
/// their own, which the batch functions take care of.
///
/// ```
/// use knnthree::{KdTree, QueryCache};
///
/// let points = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [5.0, 5.0, 5.0]];
/// let mut tree = KdTree::new();
/// tree.build(&points).unwrap();
///
/// let mut cache = QueryCache::new(2);
/// let mut result = [0; 2];
/// tree.k_nearest_with(&points, [0.1, 0.0, 0.0], &mut result, &mut cache).unwrap();
/// result.sort();
/// assert_eq!(result, [0, 1]);
/// ```
#[derive(Clone, Debug)]
pub struct QueryCache {
    pub(crate) k_smallest: KSmallestHeap,
    pub(crate) traversal: MinMaxHeap<QueryNode>,
    pub(crate) range: MinMaxHeap<usize>,
}

impl QueryCache {
    /// Creates a cache sized for queries of up to `max_k` neighbours.
    ///
    /// Larger `k` still works, the k-heap is then grown on the next [`reset`](Self::reset).
    pub fn new(max_k: usize) -> Self {
        QueryCache {
            k_smallest: KSmallestHeap::new(max_k),
            traversal: MinMaxHeap::min(TRAVERSAL_CAPACITY),
            range: MinMaxHeap::max(TRAVERSAL_CAPACITY),
        }
    }

    /// Clears all heaps for a new query retaining `k` neighbours.
    pub fn reset(&mut self, k: usize) {
        self.k_smallest.reset(k);
        self.traversal.clear();
        self.range.clear();
    }

    /// Number of neighbours the k-heap currently retains.
    pub fn max_k(&self) -> usize {
        self.k_smallest.capacity()
    }

    /// Current capacity of the traversal heap.
    pub fn traversal_capacity(&self) -> usize {
        self.traversal.capacity()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(1)
    }
}
