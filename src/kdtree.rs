use std::collections::VecDeque;
use std::ops::Range;

use log::debug;

use crate::Point;
use crate::bounds::{BoundingBox, distance_sq};
use crate::cache::{QueryCache, QueryNode};
use crate::error::{KnnError, Result};
use crate::heap::MinMaxHeap;
use crate::range_result::RangeQueryResult;
use crate::util::Timed;

/// Default leaf size.
///
/// Scanning a point in a leaf costs a handful of cycles, a cache miss on the way to
/// another node costs hundreds, so leaves are kept fairly large.
pub const DEFAULT_MAX_POINTS_PER_LEAF: usize = 32;

/// Build parameters of a [`KdTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KdTreeConfig {
    /// Nodes with more points than this are split. Smaller values give deeper trees
    /// with more node hops per query, larger values more linear work per leaf.
    pub max_points_per_leaf: usize,
}

impl Default for KdTreeConfig {
    fn default() -> Self {
        KdTreeConfig {
            max_points_per_leaf: DEFAULT_MAX_POINTS_PER_LEAF,
        }
    }
}

/// A node of the tree, stored in a flat arena and addressed by index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KdNode {
    pub bounds: BoundingBox,
    /// Points of this subtree: `permutation[start..end]`.
    pub start: usize,
    pub end: usize,
    /// Split axis, `None` for leaves.
    pub axis: Option<usize>,
    /// Split coordinate along `axis`. Coordinates `< split` go to the negative child.
    pub split: f64,
    pub negative: Option<usize>,
    pub positive: Option<usize>,
}

impl KdNode {
    fn leaf(bounds: BoundingBox, start: usize, end: usize) -> Self {
        KdNode {
            bounds,
            start,
            end,
            axis: None,
            split: 0.0,
            negative: None,
            positive: None,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.axis.is_none()
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.end - self.start
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

enum Pivot {
    /// Split at this coordinate.
    Split(f64),
    /// Every point has this coordinate on the axis.
    Flat(f64),
}

/// A kd-tree over a borrowed set of 3D points.
///
/// The tree does not own the points. It keeps a permutation of their indices, in which
/// every leaf owns a contiguous range, and an arena of nodes. Queries take the same
/// point slice the tree was built over.
///
/// Nodes are split on the longest axis of their bounding box using the sliding midpoint
/// rule, breadth first from a queue. Building again reuses all storage.
#[derive(Clone, Debug)]
pub struct KdTree {
    nodes: Vec<KdNode>,
    permutation: Vec<usize>,
    build_queue: VecDeque<usize>,
    config: KdTreeConfig,
}

impl Default for KdTree {
    fn default() -> Self {
        Self::new()
    }
}

impl KdTree {
    /// Creates an empty tree with the default configuration.
    pub fn new() -> Self {
        KdTree {
            nodes: Vec::new(),
            permutation: Vec::new(),
            build_queue: VecDeque::new(),
            config: KdTreeConfig::default(),
        }
    }

    /// Creates an empty tree with the given configuration.
    pub fn with_config(config: KdTreeConfig) -> Result<Self> {
        if config.max_points_per_leaf == 0 {
            return Err(KnnError::InvalidLeafSize(config.max_points_per_leaf));
        }
        Ok(KdTree {
            config,
            ..Self::new()
        })
    }

    pub fn config(&self) -> &KdTreeConfig {
        &self.config
    }

    /// Number of indexed points, zero before the first build.
    pub fn len(&self) -> usize {
        self.permutation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permutation.is_empty()
    }

    pub fn is_built(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// The node arena. The root is at index 0.
    pub fn nodes(&self) -> &[KdNode] {
        &self.nodes
    }

    pub fn root(&self) -> Option<&KdNode> {
        self.nodes.first()
    }

    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    pub fn leaves(&self) -> impl Iterator<Item = &KdNode> + '_ {
        self.nodes.iter().filter(|node| node.is_leaf())
    }

    /// Indices of the points owned by `node`.
    pub fn node_indices(&self, node: &KdNode) -> &[usize] {
        &self.permutation[node.range()]
    }

    /// Builds the tree over `points`, discarding any previous contents.
    ///
    /// On error the previous tree is left untouched.
    pub fn build(&mut self, points: &[Point]) -> Result<()> {
        if points.is_empty() {
            return Err(KnnError::EmptyPointSet);
        }
        if let Some(i) = points.iter().position(|p| !p.iter().all(|c| c.is_finite())) {
            return Err(KnnError::NonFinitePoint(i));
        }

        let count = points.len();
        let _t = Timed::build(count);
        let leaf_size = self.config.max_points_per_leaf;

        self.permutation.clear();
        self.permutation.extend(0..count);
        self.nodes.clear();
        self.build_queue.clear();

        let estimate = 4 * (count.div_ceil(leaf_size) + 1) + 1;
        self.nodes.reserve(estimate);

        let root = self.push_node(BoundingBox::from_points(points), 0, count);
        if count > leaf_size {
            self.build_queue.push_back(root);
        }

        while let Some(index) = self.build_queue.pop_front() {
            if let Some((negative, positive)) = self.split_node(points, index) {
                if self.nodes[negative].count() > leaf_size {
                    self.build_queue.push_back(negative);
                }
                if self.nodes[positive].count() > leaf_size {
                    self.build_queue.push_back(positive);
                }
            }
        }

        if log::log_enabled!(log::Level::Debug) {
            let leaves = self.leaves().count();
            let oversized = self.leaves().filter(|n| n.count() > leaf_size).count();
            debug!(
                "kd-tree over {} points: {} nodes, {} leaves, {} oversized",
                count,
                self.nodes.len(),
                leaves,
                oversized
            );
        }
        Ok(())
    }

    fn push_node(&mut self, bounds: BoundingBox, start: usize, end: usize) -> usize {
        self.nodes.push(KdNode::leaf(bounds, start, end));
        self.nodes.len() - 1
    }

    /// Splits a node in two, returning `(negative, positive)` child indices.
    ///
    /// Returns `None` if all points of the node coincide; it then stays a leaf.
    fn split_node(&mut self, points: &[Point], index: usize) -> Option<(usize, usize)> {
        let KdNode { mut bounds, start, end, .. } = self.nodes[index];

        loop {
            let axis = bounds.largest_axis();
            if bounds.max[axis] <= bounds.min[axis] {
                self.nodes[index].bounds = bounds;
                debug!(
                    "node {} holds {} coincident points, keeping it as a leaf",
                    index,
                    end - start
                );
                return None;
            }

            match self.calculate_pivot(points, start, end, bounds.min[axis], bounds.max[axis], axis) {
                Pivot::Flat(value) => {
                    // nothing to separate on this axis, shrink it away and try the next
                    bounds.min[axis] = value;
                    bounds.max[axis] = value;
                }
                Pivot::Split(pivot) => {
                    let split = start + partition(&mut self.permutation[start..end], points, pivot, axis);

                    let mut negative_bounds = bounds;
                    negative_bounds.max[axis] = pivot;
                    let negative = self.push_node(negative_bounds, start, split);

                    let mut positive_bounds = bounds;
                    positive_bounds.min[axis] = pivot;
                    let positive = self.push_node(positive_bounds, split, end);

                    let node = &mut self.nodes[index];
                    node.bounds = bounds;
                    node.axis = Some(axis);
                    node.split = pivot;
                    node.negative = Some(negative);
                    node.positive = Some(positive);
                    return Some((negative, positive));
                }
            }
        }
    }

    /// Sliding midpoint rule.
    ///
    /// 1. Take the middle of the bounds along `axis`.
    /// 2. If points lie on both sides of it, split there.
    /// 3. Otherwise slide the pivot onto the points: to the largest value if all are on
    ///    the negative side, to the smallest if all are on the positive side.
    ///
    /// Sliding to the smallest value leaves the negative child empty but shrinks the
    /// positive child's bounds onto the points. If that would not shrink anything the
    /// pivot goes to the largest value instead, which always separates points.
    fn calculate_pivot(&self, points: &[Point], start: usize, end: usize, lo: f64, hi: f64, axis: usize) -> Pivot {
        let mid = 0.5 * lo + 0.5 * hi;
        let indices = &self.permutation[start..end];

        let mut negative = false;
        let mut positive = false;
        for &i in indices {
            if points[i][axis] < mid {
                negative = true;
            } else {
                positive = true;
            }
            if negative && positive {
                return Pivot::Split(mid);
            }
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &i in indices {
            let v = points[i][axis];
            if v < min { min = v; }
            if v > max { max = v; }
        }

        if min == max {
            Pivot::Flat(min)
        } else if negative || min <= lo {
            Pivot::Split(max)
        } else {
            Pivot::Split(min)
        }
    }

    pub(crate) fn check_points(&self, points: &[Point]) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(KnnError::NotBuilt);
        }
        if points.len() != self.permutation.len() {
            return Err(KnnError::PointCountMismatch {
                expected: self.permutation.len(),
                actual: points.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_k(&self, k: usize) -> Result<()> {
        if k == 0 || k > self.permutation.len() {
            return Err(KnnError::InvalidK {
                k,
                len: self.permutation.len(),
            });
        }
        Ok(())
    }

    /// Finds the `result.len()` points nearest to `query` and writes their indices into
    /// `result`.
    ///
    /// Allocates a fresh [`QueryCache`]; use [`k_nearest_with`](Self::k_nearest_with) to
    /// reuse one. The order of the results is unspecified.
    pub fn k_nearest(&self, points: &[Point], query: Point, result: &mut [usize]) -> Result<()> {
        let mut cache = QueryCache::new(result.len());
        self.k_nearest_with(points, query, result, &mut cache)
    }

    /// Like [`k_nearest`](Self::k_nearest), using `cache` as scratch memory.
    ///
    /// Fails with [`KnnError::InvalidK`] if `result` is empty or longer than the number of
    /// points.
    pub fn k_nearest_with(&self, points: &[Point], query: Point, result: &mut [usize], cache: &mut QueryCache) -> Result<()> {
        self.check_points(points)?;
        check_query(&query)?;
        self.check_k(result.len())?;
        self.k_nearest_unchecked(points, query, result, cache);
        Ok(())
    }

    /// Index of the point nearest to `query`.
    pub fn closest(&self, points: &[Point], query: Point) -> Result<usize> {
        let mut cache = QueryCache::new(1);
        self.closest_with(points, query, &mut cache)
    }

    pub fn closest_with(&self, points: &[Point], query: Point, cache: &mut QueryCache) -> Result<usize> {
        let mut result = [0];
        self.k_nearest_with(points, query, &mut result, cache)?;
        Ok(result[0])
    }

    /// k-nearest search without argument checks. Callers validate once per batch.
    pub(crate) fn k_nearest_unchecked(&self, points: &[Point], query: Point, result: &mut [usize], cache: &mut QueryCache) {
        let k = result.len();
        cache.reset(k);

        let heap = &mut cache.k_smallest;
        self.search(points, query, &mut cache.traversal, f64::INFINITY, |index, dist_sq, bssr| {
            heap.push(index, dist_sq);
            if heap.is_full() {
                heap.head_value().unwrap_or(bssr)
            } else {
                bssr
            }
        });

        debug_assert_eq!(cache.k_smallest.len(), k);
        for slot in result.iter_mut() {
            match cache.k_smallest.pop() {
                Some(index) => *slot = index,
                None => break,
            }
        }
    }

    /// Collects the indices of all points within `radius` of `query` into `sink`.
    ///
    /// `sink` is cleared first. The order of the results is unspecified.
    pub fn query_range(&self, points: &[Point], query: Point, radius: f64, sink: &mut Vec<usize>) -> Result<()> {
        let mut cache = QueryCache::new(1);
        self.query_range_with(points, query, radius, sink, &mut cache)
    }

    pub fn query_range_with(
        &self,
        points: &[Point],
        query: Point,
        radius: f64,
        sink: &mut Vec<usize>,
        cache: &mut QueryCache,
    ) -> Result<()> {
        self.check_points(points)?;
        check_query(&query)?;
        check_radius(radius)?;

        self.range_unchecked(points, query, radius, cache);
        sink.clear();
        sink.reserve(cache.range.len());
        while let Some((index, _)) = cache.range.pop() {
            sink.push(index);
        }
        Ok(())
    }

    /// Range query into a fixed-capacity result.
    ///
    /// Matches beyond the capacity of `result` are dropped and counted in
    /// [`RangeQueryResult::dropped`]. Which ones are kept is not specified; in particular
    /// they are not guaranteed to be the closest.
    pub fn query_range_into(
        &self,
        points: &[Point],
        query: Point,
        radius: f64,
        result: &mut RangeQueryResult,
        cache: &mut QueryCache,
    ) -> Result<()> {
        self.check_points(points)?;
        check_query(&query)?;
        check_radius(radius)?;
        self.range_into_unchecked(points, query, radius, result, cache);
        Ok(())
    }

    pub(crate) fn range_into_unchecked(
        &self,
        points: &[Point],
        query: Point,
        radius: f64,
        result: &mut RangeQueryResult,
        cache: &mut QueryCache,
    ) {
        self.range_unchecked(points, query, radius, cache);
        result.clear();
        while let Some((index, _)) = cache.range.pop() {
            result.push(index);
        }
        if result.is_truncated() {
            log::trace!(
                "range query at {:?} kept {} of {} matches",
                query,
                result.len(),
                result.len() + result.dropped()
            );
        }
    }

    fn range_unchecked(&self, points: &[Point], query: Point, radius: f64, cache: &mut QueryCache) {
        cache.traversal.clear();
        cache.range.clear();

        let found = &mut cache.range;
        self.search(points, query, &mut cache.traversal, radius * radius, |index, dist_sq, bssr| {
            found.push_or_grow(index, dist_sq);
            bssr
        });
    }

    /// Branch-and-bound traversal shared by all queries.
    ///
    /// Nodes are visited nearest lower bound first. Every point of a visited leaf whose
    /// squared distance is at most `bssr` is passed to `visit`, which returns the new,
    /// possibly tighter, `bssr`. Subtrees whose lower bound exceeds `bssr` are skipped.
    fn search<F>(&self, points: &[Point], query: Point, traversal: &mut MinMaxHeap<QueryNode>, mut bssr: f64, mut visit: F)
    where
        F: FnMut(usize, f64, f64) -> f64,
    {
        let root = &self.nodes[0];
        let closest = root.bounds.closest_point(&query);
        traversal.push_or_grow(QueryNode { node: 0, closest }, distance_sq(&closest, &query));

        while let Some((query_node, dist_sq)) = traversal.pop() {
            if dist_sq > bssr {
                continue;
            }

            let node = &self.nodes[query_node.node];
            match (node.axis, node.negative, node.positive) {
                (Some(axis), Some(negative), Some(positive)) => {
                    let (near, far) = if query_node.closest[axis] < node.split {
                        (negative, positive)
                    } else {
                        (positive, negative)
                    };

                    // the closest point already lies on the near side, its bound holds as is
                    if self.nodes[near].count() != 0 {
                        traversal.push_or_grow(QueryNode { node: near, closest: query_node.closest }, dist_sq);
                    }

                    if self.nodes[far].count() != 0 {
                        let mut closest = query_node.closest;
                        closest[axis] = node.split;
                        let far_dist_sq = distance_sq(&closest, &query);
                        if far_dist_sq <= bssr {
                            traversal.push_or_grow(QueryNode { node: far, closest }, far_dist_sq);
                        }
                    }
                }
                _ => {
                    debug_assert!(node.is_leaf());
                    for &index in &self.permutation[node.range()] {
                        let d = distance_sq(&points[index], &query);
                        if d <= bssr {
                            bssr = visit(index, d, bssr);
                        }
                    }
                }
            }
        }
    }
}

/// Hoare-style partition of `indices` around `pivot` on `axis`.
///
/// Returns `s` such that points of `indices[..s]` have a coordinate `< pivot` and those
/// of `indices[s..]` a coordinate `>= pivot`. Only the index slice is permuted.
fn partition(indices: &mut [usize], points: &[Point], pivot: f64, axis: usize) -> usize {
    let mut lp = 0;
    let mut rp = indices.len();
    loop {
        while lp < rp && points[indices[lp]][axis] < pivot {
            lp += 1;
        }
        while lp < rp && points[indices[rp - 1]][axis] >= pivot {
            rp -= 1;
        }
        if lp >= rp {
            return lp;
        }
        indices.swap(lp, rp - 1);
        lp += 1;
        rp -= 1;
    }
}

pub(crate) fn check_query(query: &Point) -> Result<()> {
    if query.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(KnnError::NonFiniteQuery(*query))
    }
}

pub(crate) fn check_radius(radius: f64) -> Result<()> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(())
    } else {
        Err(KnnError::InvalidRadius(radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_points(n: usize) -> Vec<Point> {
        let mut points = Vec::with_capacity(n * n * n);
        for z in 0..n {
            for y in 0..n {
                for x in 0..n {
                    points.push([x as f64, y as f64, z as f64]);
                }
            }
        }
        points
    }

    fn assert_leaves_cover(tree: &KdTree, count: usize) {
        let mut seen = vec![0u32; count];
        for leaf in tree.leaves() {
            for &i in tree.node_indices(leaf) {
                seen[i] += 1;
            }
        }
        assert!(seen.iter().all(|&c| c == 1), "every point must be in exactly one leaf");
    }

    #[test]
    fn test_partition() {
        let points: Vec<Point> = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]
            .iter()
            .map(|&x| [x, 0.0, 0.0])
            .collect();
        let mut indices: Vec<usize> = (0..points.len()).collect();
        let s = partition(&mut indices, &points, 4.0, 0);
        assert_eq!(s, 4);
        assert!(indices[..s].iter().all(|&i| points[i][0] < 4.0));
        assert!(indices[s..].iter().all(|&i| points[i][0] >= 4.0));

        let s = partition(&mut indices, &points, 0.0, 0);
        assert_eq!(s, 0);
        let s = partition(&mut indices, &points, 100.0, 0);
        assert_eq!(s, points.len());
    }

    #[test]
    fn test_build_structure() {
        let points = grid_points(10);
        let mut tree = KdTree::with_config(KdTreeConfig { max_points_per_leaf: 8 }).unwrap();
        tree.build(&points).unwrap();

        let root = tree.root().unwrap();
        assert_eq!(root.range(), 0..points.len());
        assert_eq!(root.bounds, BoundingBox::new([0.0; 3], [9.0; 3]));

        for node in tree.nodes() {
            assert_eq!(node.is_leaf(), node.negative.is_none());
            assert_eq!(node.is_leaf(), node.positive.is_none());
            if node.is_leaf() {
                assert!(node.count() <= 8);
            } else {
                let axis = node.axis.unwrap();
                let neg = &tree.nodes()[node.negative.unwrap()];
                let pos = &tree.nodes()[node.positive.unwrap()];
                assert_eq!(neg.start, node.start);
                assert_eq!(neg.end, pos.start);
                assert_eq!(pos.end, node.end);
                assert!(tree.node_indices(neg).iter().all(|&i| points[i][axis] < node.split));
                assert!(tree.node_indices(pos).iter().all(|&i| points[i][axis] >= node.split));
            }
        }
        assert_leaves_cover(&tree, points.len());
    }

    #[test]
    fn test_small_set_is_single_leaf() {
        let points = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];
        let mut tree = KdTree::new();
        tree.build(&points).unwrap();
        assert_eq!(tree.nodes().len(), 1);
        assert!(tree.root().unwrap().is_leaf());
    }

    #[test]
    fn test_coincident_points_terminate() {
        let points = vec![[0.5, 0.5, 0.5]; 500];
        let mut tree = KdTree::with_config(KdTreeConfig { max_points_per_leaf: 4 }).unwrap();
        tree.build(&points).unwrap();
        assert_eq!(tree.nodes().len(), 1);
        assert_leaves_cover(&tree, points.len());
    }

    #[test]
    fn test_flat_axis_is_skipped() {
        // all points on the plane z = 2
        let points: Vec<Point> = (0..200).map(|i| [(i % 20) as f64, (i / 20) as f64, 2.0]).collect();
        let mut tree = KdTree::with_config(KdTreeConfig { max_points_per_leaf: 4 }).unwrap();
        tree.build(&points).unwrap();
        assert!(tree.nodes().iter().all(|n| n.axis != Some(2)));
        assert!(tree.leaves().all(|n| n.count() <= 4));
        assert_leaves_cover(&tree, points.len());
    }

    #[test]
    fn test_clustered_pair_splits() {
        // two far clusters force the sliding pivot on both sides
        let mut points = vec![[0.0, 0.0, 0.0]; 10];
        points.extend(vec![[1.0, 0.0, 0.0]; 10]);
        points.push([100.0, 0.0, 0.0]);
        let mut tree = KdTree::with_config(KdTreeConfig { max_points_per_leaf: 10 }).unwrap();
        tree.build(&points).unwrap();
        assert!(tree.leaves().all(|n| n.count() <= 10));
        assert_leaves_cover(&tree, points.len());
    }

    #[test]
    fn test_invalid_arguments() {
        let mut tree = KdTree::new();
        assert_eq!(tree.build(&[]), Err(KnnError::EmptyPointSet));
        assert_eq!(
            tree.build(&[[0.0, 0.0, 0.0], [f64::NAN, 0.0, 0.0]]),
            Err(KnnError::NonFinitePoint(1))
        );
        assert_eq!(
            KdTree::with_config(KdTreeConfig { max_points_per_leaf: 0 }).unwrap_err(),
            KnnError::InvalidLeafSize(0)
        );

        let points = grid_points(3);
        let mut result = [0; 2];
        assert_eq!(tree.k_nearest(&points, [0.0; 3], &mut result), Err(KnnError::NotBuilt));

        tree.build(&points).unwrap();
        let mut empty: [usize; 0] = [];
        assert!(matches!(tree.k_nearest(&points, [0.0; 3], &mut empty), Err(KnnError::InvalidK { k: 0, .. })));
        let mut too_many = vec![0; points.len() + 1];
        assert!(matches!(tree.k_nearest(&points, [0.0; 3], &mut too_many), Err(KnnError::InvalidK { .. })));
        assert!(matches!(
            tree.k_nearest(&points[..5], [0.0; 3], &mut result),
            Err(KnnError::PointCountMismatch { expected: 27, actual: 5 })
        ));
        assert!(matches!(
            tree.k_nearest(&points, [f64::INFINITY, 0.0, 0.0], &mut result),
            Err(KnnError::NonFiniteQuery(_))
        ));

        let mut sink = Vec::new();
        assert_eq!(tree.query_range(&points, [0.0; 3], -1.0, &mut sink), Err(KnnError::InvalidRadius(-1.0)));
    }

    #[test]
    fn test_k_nearest_on_grid() {
        let points = grid_points(5);
        let mut tree = KdTree::with_config(KdTreeConfig { max_points_per_leaf: 4 }).unwrap();
        tree.build(&points).unwrap();

        // center of the grid and its six face neighbours
        let mut result = [0; 7];
        tree.k_nearest(&points, [2.0, 2.0, 2.0], &mut result).unwrap();
        result.sort();
        let mut expected: Vec<usize> = [
            [2.0, 2.0, 2.0],
            [1.0, 2.0, 2.0],
            [3.0, 2.0, 2.0],
            [2.0, 1.0, 2.0],
            [2.0, 3.0, 2.0],
            [2.0, 2.0, 1.0],
            [2.0, 2.0, 3.0],
        ]
        .iter()
        .map(|p| points.iter().position(|q| q == p).unwrap())
        .collect();
        expected.sort();
        assert_eq!(result.to_vec(), expected);

        assert_eq!(tree.closest(&points, [4.2, -1.0, 0.1]).unwrap(), 4);
    }

    #[test]
    fn test_query_range_on_grid() {
        let points = grid_points(5);
        let mut tree = KdTree::with_config(KdTreeConfig { max_points_per_leaf: 4 }).unwrap();
        tree.build(&points).unwrap();

        let mut sink = vec![123];
        tree.query_range(&points, [0.0, 0.0, 0.0], 1.0, &mut sink).unwrap();
        sink.sort();
        // origin plus its three axis neighbours
        assert_eq!(sink, vec![0, 1, 5, 25]);

        tree.query_range(&points, [-10.0, 0.0, 0.0], 1.0, &mut sink).unwrap();
        assert!(sink.is_empty());

        tree.query_range(&points, [2.0, 2.0, 2.0], 0.0, &mut sink).unwrap();
        assert_eq!(sink, vec![62]);
    }
}
