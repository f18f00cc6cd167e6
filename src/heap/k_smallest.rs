use super::{left, parent, right};

/// Bounded max-heap that retains the `k` smallest values pushed into it.
///
/// Once full, a new value only gets in by replacing the current maximum (the head),
/// so after any sequence of pushes the heap holds the `k` smallest seen so far and
/// [`head_value`](Self::head_value) is the largest of those: the pruning radius of a
/// k-nearest search.
#[derive(Clone, Debug)]
pub struct KSmallestHeap {
    values: Vec<f64>,
    objs: Vec<usize>,
    count: usize,
    max_size: usize,
}

impl KSmallestHeap {
    pub fn new(max_entries: usize) -> Self {
        KSmallestHeap {
            values: vec![0.0; max_entries + 1],
            objs: vec![0; max_entries + 1],
            count: 0,
            max_size: max_entries,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.max_size
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }

    /// Largest retained value, `None` when empty.
    #[inline]
    pub fn head_value(&self) -> Option<f64> {
        if self.count == 0 { None } else { Some(self.values[1]) }
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Clears the heap and changes how many entries it retains.
    ///
    /// Storage only grows; shrinking `k` keeps the existing allocation.
    pub fn reset(&mut self, k: usize) {
        if self.values.len() < k + 1 {
            self.values.resize(k + 1, 0.0);
            self.objs.resize(k + 1, 0);
        }
        self.max_size = k;
        self.count = 0;
    }

    #[inline]
    pub fn push(&mut self, obj: usize, value: f64) {
        if self.count == self.max_size {
            if self.max_size == 0 || self.values[1] < value {
                return;
            }
            self.values[1] = value;
            self.objs[1] = obj;
            self.bubble_down(1);
        } else {
            self.count += 1;
            self.values[self.count] = value;
            self.objs[self.count] = obj;
            self.bubble_up(self.count);
        }
    }

    /// Removes the entry with the largest value.
    pub fn pop(&mut self) -> Option<usize> {
        self.pop_with_value().map(|(obj, _)| obj)
    }

    pub fn pop_with_value(&mut self) -> Option<(usize, f64)> {
        if self.count == 0 {
            return None;
        }
        let result = (self.objs[1], self.values[1]);
        self.values[1] = self.values[self.count];
        self.objs[1] = self.objs[self.count];
        self.count -= 1;
        self.bubble_down(1);
        Some(result)
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
        self.objs.swap(a, b);
    }

    fn bubble_up(&mut self, mut index: usize) {
        let mut p = parent(index);
        while p > 0 && self.values[p] < self.values[index] {
            self.swap(p, index);
            index = p;
            p = parent(index);
        }
    }

    fn bubble_down(&mut self, mut index: usize) {
        loop {
            let l = left(index);
            let r = right(index);
            let mut largest = index;
            if l <= self.count && self.values[l] > self.values[largest] {
                largest = l;
            }
            if r <= self.count && self.values[r] > self.values[largest] {
                largest = r;
            }
            if largest == index {
                break;
            }
            self.swap(index, largest);
            index = largest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_k_smallest() {
        let mut heap = KSmallestHeap::new(3);
        for (i, v) in [5.0, 1.0, 9.0, 3.0, 7.0, 2.0, 8.0].iter().enumerate() {
            heap.push(i, *v);
        }
        assert!(heap.is_full());
        assert_eq!(heap.head_value(), Some(3.0));

        let mut popped = Vec::new();
        while let Some((obj, value)) = heap.pop_with_value() {
            popped.push((obj, value));
        }
        // drained largest first
        assert_eq!(popped, vec![(3, 3.0), (5, 2.0), (1, 1.0)]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_not_full_accepts_everything() {
        let mut heap = KSmallestHeap::new(4);
        heap.push(0, 10.0);
        heap.push(1, 20.0);
        assert!(!heap.is_full());
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.head_value(), Some(20.0));
    }

    #[test]
    fn test_reset_grows_and_clears() {
        let mut heap = KSmallestHeap::new(2);
        heap.push(0, 1.0);
        heap.push(1, 2.0);
        heap.reset(5);
        assert!(heap.is_empty());
        assert_eq!(heap.capacity(), 5);
        for i in 0..10 {
            heap.push(i, (10 - i) as f64);
        }
        assert_eq!(heap.len(), 5);
        assert_eq!(heap.head_value(), Some(5.0));

        heap.reset(1);
        heap.push(7, 3.0);
        heap.push(8, 1.0);
        assert_eq!(heap.pop(), Some(8));
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn test_zero_capacity_ignores_pushes() {
        let mut heap = KSmallestHeap::new(0);
        heap.push(0, 1.0);
        assert!(heap.is_empty());
        assert_eq!(heap.head_value(), None);
    }
}
