//! # knnthree
//!
//! `knnthree` is a Rust library for k-nearest-neighbour and radius queries over 3D point
//! sets that are rebuilt every so often, for example once per frame of a particle
//! simulation, and then queried thousands of times.
//!
//! ## Features
//!
//! - **Sliding midpoint kd-tree**: built breadth first from a queue into a flat node arena,
//!   over a permutation of point indices. The points themselves are never moved or copied.
//! - **Branch and bound search**: nodes are visited nearest bound first and pruned against
//!   the current k-th smallest distance.
//! - **Allocation-free queries**: all search state lives in a reusable [`QueryCache`].
//! - **Parallel batches**: batches of queries are split into chunks and run on rayon,
//!   one cache per chunk, results written to disjoint slices.
//!
//! ## Example
//!
//! ```
//! use knnthree::{KdTree, QueryCache};
//!
//! let points: Vec<[f64; 3]> = (0..1000)
//!     .map(|i| [(i % 10) as f64, ((i / 10) % 10) as f64, (i / 100) as f64])
//!     .collect();
//!
//! let mut tree = KdTree::new();
//! tree.build(&points).unwrap();
//!
//! // 8 nearest neighbours of every tenth point, in parallel
//! let queries: Vec<[f64; 3]> = points.iter().step_by(10).copied().collect();
//! let mut results = vec![0; queries.len() * 8];
//! tree.k_nearest_batch(&points, &queries, &mut results, 0).unwrap();
//!
//! // a single query reusing a cache
//! let mut cache = QueryCache::new(8);
//! let mut nearest = [0; 8];
//! tree.k_nearest_with(&points, [4.5, 4.5, 4.5], &mut nearest, &mut cache).unwrap();
//! ```
//!
//! ## Main Interface
//!
//! [`KdTree`] holds the index and takes the point slice with every call.
//! [`KnnContainer`] binds a tree to its points.
//!
//! Logging goes through the `log` facade; install any logger to see build statistics and
//! timings.

mod batch;
mod bounds;
mod cache;
mod container;
mod error;
mod heap;
mod kdtree;
mod range_result;
mod util;

/// A point in 3D space.
pub type Point = [f64; 3];

pub use batch::chunk_ranges;
pub use bounds::BoundingBox;
pub use bounds::distance_sq;
pub use cache::QueryCache;
pub use cache::TRAVERSAL_CAPACITY;
pub use container::KnnContainer;
pub use error::KnnError;
pub use error::Result;
pub use heap::HeapOrder;
pub use heap::KSmallestHeap;
pub use heap::MinMaxHeap;
pub use kdtree::DEFAULT_MAX_POINTS_PER_LEAF;
pub use kdtree::KdNode;
pub use kdtree::KdTree;
pub use kdtree::KdTreeConfig;
pub use range_result::RangeQueryResult;
