use std::ops::Index;

/// Fixed-capacity buffer of point indices found by a range query.
///
/// The capacity is the most matches the caller is willing to record for one query.
/// A query that finds more keeps `capacity` of them and counts the rest in
/// [`dropped`](Self::dropped); this is not treated as an error because the number of
/// points within a radius depends on the data. Which matches are kept is not
/// specified, they are not necessarily the closest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeQueryResult {
    indices: Vec<usize>,
    capacity: usize,
    dropped: usize,
}

impl RangeQueryResult {
    pub fn new(capacity: usize) -> Self {
        RangeQueryResult {
            indices: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of matches that did not fit.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn is_truncated(&self) -> bool {
        self.dropped > 0
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.indices.iter()
    }

    pub fn get(&self, index: usize) -> Option<usize> {
        self.indices.get(index).copied()
    }

    pub fn clear(&mut self) {
        self.indices.clear();
        self.dropped = 0;
    }

    /// Appends one index, returns `false` (and counts it as dropped) when full.
    #[inline]
    pub fn push(&mut self, index: usize) -> bool {
        if self.indices.len() < self.capacity {
            self.indices.push(index);
            true
        } else {
            self.dropped += 1;
            false
        }
    }

    /// Replaces the contents with the first `capacity` entries of `results`.
    ///
    /// Bulk-copy entry point for matches gathered elsewhere, for example by
    /// [`KdTree::query_range`](crate::KdTree::query_range) into a `Vec`. The queries of
    /// this crate fill results one match at a time through [`push`](Self::push).
    pub fn set_results(&mut self, results: &[usize]) {
        let kept = results.len().min(self.capacity);
        self.indices.clear();
        self.indices.extend_from_slice(&results[..kept]);
        self.dropped = results.len() - kept;
    }
}

impl Index<usize> for RangeQueryResult {
    type Output = usize;

    fn index(&self, index: usize) -> &usize {
        &self.indices[index]
    }
}

impl<'a> IntoIterator for &'a RangeQueryResult {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter()
    }
}
