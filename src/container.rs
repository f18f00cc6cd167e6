use crate::Point;
use crate::cache::QueryCache;
use crate::error::{KnnError, Result};
use crate::kdtree::{KdTree, KdTreeConfig};
use crate::range_result::RangeQueryResult;

/// A [`KdTree`] bound to the point slice it indexes.
///
/// This is the convenient way to use the index when the points outlive the queries:
/// the slice is passed once at construction instead of with every call.
///
/// ```
/// use knnthree::KnnContainer;
///
/// let points = vec![
///     [0.0, 0.0, 0.0],
///     [1.0, 0.0, 0.0],
///     [0.0, 1.0, 0.0],
///     [9.0, 9.0, 9.0],
/// ];
/// let container = KnnContainer::new(&points, true).unwrap();
///
/// let mut nearest = [0; 3];
/// container.k_nearest([0.1, 0.1, 0.0], &mut nearest).unwrap();
/// nearest.sort();
/// assert_eq!(nearest, [0, 1, 2]);
///
/// let mut within = Vec::new();
/// container.query_range([9.0, 9.0, 8.0], 1.5, &mut within).unwrap();
/// assert_eq!(within, vec![3]);
/// ```
#[derive(Clone, Debug)]
pub struct KnnContainer<'a> {
    points: &'a [Point],
    tree: KdTree,
}

impl<'a> KnnContainer<'a> {
    /// Creates a container over `points`, building the tree right away if `build_now`.
    ///
    /// Fails with [`KnnError::EmptyPointSet`] if `points` is empty, also when the build
    /// is deferred.
    pub fn new(points: &'a [Point], build_now: bool) -> Result<Self> {
        Self::with_config(points, KdTreeConfig::default(), build_now)
    }

    pub fn with_config(points: &'a [Point], config: KdTreeConfig, build_now: bool) -> Result<Self> {
        if points.is_empty() {
            return Err(KnnError::EmptyPointSet);
        }
        let mut container = KnnContainer {
            points,
            tree: KdTree::with_config(config)?,
        };
        if build_now {
            container.rebuild()?;
        }
        Ok(container)
    }

    /// Builds the tree again over the same points.
    pub fn rebuild(&mut self) -> Result<()> {
        self.tree.build(self.points)
    }

    /// Switches to a new point slice, typically the same buffer after the points moved,
    /// and rebuilds. Storage of the previous build is reused.
    pub fn rebuild_with(&mut self, points: &'a [Point]) -> Result<()> {
        self.tree.build(points)?;
        self.points = points;
        Ok(())
    }

    pub fn points(&self) -> &'a [Point] {
        self.points
    }

    pub fn tree(&self) -> &KdTree {
        &self.tree
    }

    /// Releases the borrow of the points and keeps the tree storage for later reuse.
    pub fn into_tree(self) -> KdTree {
        self.tree
    }

    /// Wraps an existing tree; `points` must be the slice it was built over for queries
    /// to succeed.
    pub fn from_tree(points: &'a [Point], tree: KdTree) -> Self {
        KnnContainer { points, tree }
    }

    pub fn k_nearest(&self, query: Point, result: &mut [usize]) -> Result<()> {
        self.tree.k_nearest(self.points, query, result)
    }

    pub fn k_nearest_with(&self, query: Point, result: &mut [usize], cache: &mut QueryCache) -> Result<()> {
        self.tree.k_nearest_with(self.points, query, result, cache)
    }

    pub fn closest(&self, query: Point) -> Result<usize> {
        self.tree.closest(self.points, query)
    }

    pub fn closest_with(&self, query: Point, cache: &mut QueryCache) -> Result<usize> {
        self.tree.closest_with(self.points, query, cache)
    }

    pub fn query_range(&self, query: Point, radius: f64, sink: &mut Vec<usize>) -> Result<()> {
        self.tree.query_range(self.points, query, radius, sink)
    }

    pub fn query_range_with(&self, query: Point, radius: f64, sink: &mut Vec<usize>, cache: &mut QueryCache) -> Result<()> {
        self.tree.query_range_with(self.points, query, radius, sink, cache)
    }

    pub fn query_range_into(&self, query: Point, radius: f64, result: &mut RangeQueryResult, cache: &mut QueryCache) -> Result<()> {
        self.tree.query_range_into(self.points, query, radius, result, cache)
    }

    pub fn k_nearest_batch(&self, queries: &[Point], results: &mut [usize], workers: usize) -> Result<()> {
        self.tree.k_nearest_batch(self.points, queries, results, workers)
    }

    pub fn k_nearest_batch_with_caches(&self, queries: &[Point], results: &mut [usize], caches: &mut [QueryCache]) -> Result<()> {
        self.tree.k_nearest_batch_with_caches(self.points, queries, results, caches)
    }

    pub fn query_range_batch(&self, queries: &[Point], radius: f64, results: &mut [RangeQueryResult], workers: usize) -> Result<()> {
        self.tree.query_range_batch(self.points, queries, radius, results, workers)
    }
}
