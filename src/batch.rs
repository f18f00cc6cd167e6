//! Parallel batch queries.
//!
//! A batch of query positions is cut into contiguous chunks, one per worker. Every
//! chunk runs as one rayon task with its own [`QueryCache`] and writes into its own
//! sub-slice of the results, so workers share nothing mutable and need no locks. The
//! tree and the points are only read. Batches borrow the tree immutably, so it cannot
//! be rebuilt while one is running.
//!
//! Batches run on the current rayon thread pool; wrap the call in
//! `ThreadPool::install` to pick a different one.

use std::ops::Range;

use log::trace;
use rayon::prelude::*;

use crate::Point;
use crate::cache::QueryCache;
use crate::error::{KnnError, Result};
use crate::kdtree::{KdTree, check_query, check_radius};
use crate::range_result::RangeQueryResult;
use crate::util::Timed;

/// Splits `0..count` into `workers` contiguous ranges.
///
/// Every range has `count / workers` elements, the last one also takes the remainder.
/// `workers` is clamped to `1..=count` so no range is empty. Returns no ranges when
/// `count` is zero.
pub fn chunk_ranges(count: usize, workers: usize) -> Vec<Range<usize>> {
    if count == 0 {
        return Vec::new();
    }
    let workers = workers.clamp(1, count);
    let size = count / workers;
    (0..workers)
        .map(|w| {
            let start = w * size;
            let end = if w + 1 == workers { count } else { start + size };
            start..end
        })
        .collect()
}

fn resolve_workers(workers: usize) -> usize {
    if workers == 0 { rayon::current_num_threads() } else { workers }
}

/// Pairs every chunk of queries with its disjoint slice of `results`, `stride` result
/// slots per query.
fn split_jobs<'q, 'r, T>(
    queries: &'q [Point],
    mut results: &'r mut [T],
    stride: usize,
    chunks: &[Range<usize>],
) -> Vec<(&'q [Point], &'r mut [T])> {
    let mut jobs = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let (head, tail) = std::mem::take(&mut results).split_at_mut(chunk.len() * stride);
        jobs.push((&queries[chunk.clone()], head));
        results = tail;
    }
    jobs
}

impl KdTree {
    /// Validates a k-nearest batch and returns `k`.
    fn check_k_nearest_batch(&self, points: &[Point], queries: &[Point], results: usize) -> Result<usize> {
        self.check_points(points)?;
        if queries.is_empty() || results == 0 || results % queries.len() != 0 {
            return Err(KnnError::ResultLengthMismatch {
                results,
                queries: queries.len(),
            });
        }
        let k = results / queries.len();
        self.check_k(k)?;
        queries.iter().try_for_each(check_query)?;
        Ok(k)
    }

    fn k_nearest_chunk(&self, points: &[Point], queries: &[Point], results: &mut [usize], k: usize, cache: &mut QueryCache) {
        for (query, result) in queries.iter().zip(results.chunks_exact_mut(k)) {
            self.k_nearest_unchecked(points, *query, result, cache);
        }
    }

    /// k-nearest query for every position in `queries`, in parallel.
    ///
    /// `results` holds `k` slots per query, so `k = results.len() / queries.len()`; the
    /// neighbours of `queries[i]` land in `results[i * k..(i + 1) * k]`. `workers` is the
    /// number of chunks, zero means one per thread of the current rayon pool. Each chunk
    /// gets a fresh [`QueryCache`].
    ///
    /// Everything is validated before any query runs.
    pub fn k_nearest_batch(&self, points: &[Point], queries: &[Point], results: &mut [usize], workers: usize) -> Result<()> {
        let k = self.check_k_nearest_batch(points, queries, results.len())?;
        let chunks = chunk_ranges(queries.len(), resolve_workers(workers));
        trace!("k-nearest batch: {} queries, k = {}, {} chunks", queries.len(), k, chunks.len());
        let _t = Timed::batch("k-nearest batch", queries.len());

        split_jobs(queries, results, k, &chunks)
            .into_par_iter()
            .for_each(|(queries, results)| {
                let mut cache = QueryCache::new(k);
                self.k_nearest_chunk(points, queries, results, k, &mut cache);
            });
        Ok(())
    }

    /// Like [`k_nearest_batch`](Self::k_nearest_batch) with caller-owned caches, one
    /// chunk per cache.
    ///
    /// Lets callers keep a pool of caches alive across frames instead of allocating new
    /// ones for every batch. Caches beyond the number of queries stay unused.
    pub fn k_nearest_batch_with_caches(
        &self,
        points: &[Point],
        queries: &[Point],
        results: &mut [usize],
        caches: &mut [QueryCache],
    ) -> Result<()> {
        if caches.is_empty() {
            return Err(KnnError::EmptyCachePool);
        }
        let k = self.check_k_nearest_batch(points, queries, results.len())?;
        let chunks = chunk_ranges(queries.len(), caches.len());
        trace!("k-nearest batch: {} queries, k = {}, {} pooled caches", queries.len(), k, chunks.len());
        let _t = Timed::batch("k-nearest batch", queries.len());

        split_jobs(queries, results, k, &chunks)
            .into_par_iter()
            .zip(caches.par_iter_mut())
            .for_each(|((queries, results), cache)| {
                self.k_nearest_chunk(points, queries, results, k, cache);
            });
        Ok(())
    }

    /// Range query for every position in `queries`, in parallel.
    ///
    /// `results[i]` receives the matches of `queries[i]`, truncated to its capacity.
    pub fn query_range_batch(
        &self,
        points: &[Point],
        queries: &[Point],
        radius: f64,
        results: &mut [RangeQueryResult],
        workers: usize,
    ) -> Result<()> {
        self.check_points(points)?;
        if results.len() != queries.len() {
            return Err(KnnError::ResultLengthMismatch {
                results: results.len(),
                queries: queries.len(),
            });
        }
        check_radius(radius)?;
        queries.iter().try_for_each(check_query)?;

        let chunks = chunk_ranges(queries.len(), resolve_workers(workers));
        trace!("range batch: {} queries, radius = {}, {} chunks", queries.len(), radius, chunks.len());
        let _t = Timed::batch("range batch", queries.len());

        split_jobs(queries, results, 1, &chunks)
            .into_par_iter()
            .for_each(|(queries, results)| {
                let mut cache = QueryCache::new(1);
                for (query, result) in queries.iter().zip(results.iter_mut()) {
                    self.range_into_unchecked(points, *query, radius, result, &mut cache);
                }
            });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_ranges() {
        assert_eq!(chunk_ranges(10, 3), vec![0..3, 3..6, 6..10]);
        assert_eq!(chunk_ranges(8, 4), vec![0..2, 2..4, 4..6, 6..8]);
        assert_eq!(chunk_ranges(5, 1), vec![0..5]);
        // more workers than items
        assert_eq!(chunk_ranges(3, 8), vec![0..1, 1..2, 2..3]);
        assert_eq!(chunk_ranges(4, 0), vec![0..4]);
        assert!(chunk_ranges(0, 4).is_empty());
    }

    #[test]
    fn test_split_jobs_is_disjoint() {
        let queries = vec![[0.0; 3]; 5];
        let mut results = vec![0usize; 10];
        let chunks = chunk_ranges(5, 2);
        let jobs = split_jobs(&queries, &mut results, 2, &chunks);
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].0.len(), 2);
        assert_eq!(jobs[0].1.len(), 4);
        assert_eq!(jobs[1].0.len(), 3);
        assert_eq!(jobs[1].1.len(), 6);
    }

    #[test]
    fn test_batch_matches_single_queries() {
        let points: Vec<Point> = (0..400)
            .map(|i| {
                let f = i as f64;
                [(f * 0.37).sin() * 10.0, (f * 0.11).cos() * 10.0, (f * 0.07).sin() * 5.0]
            })
            .collect();
        let mut tree = KdTree::new();
        tree.build(&points).unwrap();

        let queries: Vec<Point> = points.iter().step_by(13).copied().collect();
        let k = 4;
        let mut batch = vec![0; queries.len() * k];
        tree.k_nearest_batch(&points, &queries, &mut batch, 3).unwrap();

        let mut single = vec![0; k];
        for (i, query) in queries.iter().enumerate() {
            tree.k_nearest(&points, *query, &mut single).unwrap();
            let mut a = batch[i * k..(i + 1) * k].to_vec();
            let mut b = single.clone();
            a.sort();
            b.sort();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_batch_rejects_bad_lengths() {
        let points = vec![[0.0; 3], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]];
        let mut tree = KdTree::new();
        tree.build(&points).unwrap();

        let queries = vec![[0.0; 3], [1.0; 3]];
        let mut results = vec![0; 3];
        assert_eq!(
            tree.k_nearest_batch(&points, &queries, &mut results, 2),
            Err(KnnError::ResultLengthMismatch { results: 3, queries: 2 })
        );
        let mut results = vec![0; 8];
        assert!(matches!(
            tree.k_nearest_batch(&points, &queries, &mut results, 2),
            Err(KnnError::InvalidK { k: 4, len: 3 })
        ));
        let mut results = vec![0; 2];
        assert_eq!(
            tree.k_nearest_batch_with_caches(&points, &queries, &mut results, &mut []),
            Err(KnnError::EmptyCachePool)
        );
        let mut ranged = vec![RangeQueryResult::new(4)];
        assert!(matches!(
            tree.query_range_batch(&points, &queries, 1.0, &mut ranged, 2),
            Err(KnnError::ResultLengthMismatch { .. })
        ));
    }
}
