//! Error types for building and querying the index.

use std::fmt;

/// Errors reported at the API boundary, before any work is done.
///
/// Every variant is an invalid-argument condition: the call was made with input the
/// index cannot accept. Running out of room in a [`RangeQueryResult`](crate::RangeQueryResult)
/// is not an error, see [`RangeQueryResult::dropped`](crate::RangeQueryResult::dropped).
#[derive(Debug, Clone, PartialEq)]
pub enum KnnError {
    /// The point set passed to a build was empty.
    EmptyPointSet,

    /// `max_points_per_leaf` must be at least 1.
    InvalidLeafSize(usize),

    /// The point at this index has a NaN or infinite coordinate.
    NonFinitePoint(usize),

    /// A query position has a NaN or infinite coordinate.
    NonFiniteQuery([f64; 3]),

    /// `k` is zero or larger than the number of indexed points.
    InvalidK { k: usize, len: usize },

    /// The radius of a range query is negative, NaN or infinite.
    InvalidRadius(f64),

    /// In batch mode the results buffer does not line up with the query positions.
    ResultLengthMismatch { results: usize, queries: usize },

    /// The point slice passed to a query is not the one the tree was built over.
    PointCountMismatch { expected: usize, actual: usize },

    /// The tree has not been built yet.
    NotBuilt,

    /// A batch was given an empty set of caches to spread its work over.
    EmptyCachePool,
}

impl fmt::Display for KnnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnnError::EmptyPointSet => write!(f, "invalid argument: point set is empty"),
            KnnError::InvalidLeafSize(n) => {
                write!(f, "invalid argument: max points per leaf must be at least 1, got {}", n)
            }
            KnnError::NonFinitePoint(i) => {
                write!(f, "invalid argument: point {} has a non-finite coordinate", i)
            }
            KnnError::NonFiniteQuery(p) => {
                write!(f, "invalid argument: query position {:?} has a non-finite coordinate", p)
            }
            KnnError::InvalidK { k, len } => {
                write!(f, "invalid argument: k must be in 1..={}, got {}", len, k)
            }
            KnnError::InvalidRadius(r) => {
                write!(f, "invalid argument: radius must be finite and non-negative, got {}", r)
            }
            KnnError::ResultLengthMismatch { results, queries } => {
                write!(
                    f,
                    "invalid argument: results length {} does not match {} query positions",
                    results, queries
                )
            }
            KnnError::PointCountMismatch { expected, actual } => {
                write!(
                    f,
                    "invalid argument: tree was built over {} points, got {}",
                    expected, actual
                )
            }
            KnnError::NotBuilt => write!(f, "invalid argument: tree has not been built"),
            KnnError::EmptyCachePool => write!(f, "invalid argument: no query caches given for the batch"),
        }
    }
}

impl std::error::Error for KnnError {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KnnError>;
