use super::{left, parent, right};

/// Which end of the value range sits at the head of a [`MinMaxHeap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeapOrder {
    /// Smallest value at the head.
    Min,
    /// Largest value at the head.
    Max,
}

/// Binary heap of `(key, value)` pairs ordered by an `f64` value.
///
/// The same type serves as the traversal queue of a search (min-ordered, nearest
/// bound first) and as the result store of a range query (max-ordered). It has a
/// capacity and can be used two ways:
///
/// * [`push`](Self::push) keeps it bounded: when full, a new entry replaces the head
///   if it belongs further from the head, otherwise it is dropped.
/// * [`push_or_grow`](Self::push_or_grow) doubles the capacity instead, for when the
///   number of entries is not known ahead of time.
#[derive(Clone, Debug)]
pub struct MinMaxHeap<T> {
    keys: Vec<T>,
    values: Vec<f64>,
    count: usize,
    capacity: usize,
    order: HeapOrder,
}

impl<T: Copy + Default> MinMaxHeap<T> {
    pub fn new(order: HeapOrder, capacity: usize) -> Self {
        MinMaxHeap {
            keys: vec![T::default(); capacity + 1],
            values: vec![0.0; capacity + 1],
            count: 0,
            capacity,
            order,
        }
    }

    /// Min-ordered heap with the given starting capacity.
    pub fn min(capacity: usize) -> Self {
        Self::new(HeapOrder::Min, capacity)
    }

    /// Max-ordered heap with the given starting capacity.
    pub fn max(capacity: usize) -> Self {
        Self::new(HeapOrder::Max, capacity)
    }

    pub fn order(&self) -> HeapOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn head_value(&self) -> Option<f64> {
        if self.count == 0 { None } else { Some(self.values[1]) }
    }

    pub fn peek(&self) -> Option<(T, f64)> {
        if self.count == 0 { None } else { Some((self.keys[1], self.values[1])) }
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Changes the capacity, keeping the current entries.
    ///
    /// # Panics
    ///
    /// If `new_capacity` is smaller than the number of entries.
    pub fn resize(&mut self, new_capacity: usize) {
        assert!(
            new_capacity >= self.count,
            "cannot resize heap holding {} entries to {}",
            self.count,
            new_capacity
        );
        self.keys.resize(new_capacity + 1, T::default());
        self.values.resize(new_capacity + 1, 0.0);
        self.capacity = new_capacity;
    }

    /// Bounded push, see the type docs.
    #[inline]
    pub fn push(&mut self, key: T, value: f64) {
        if self.count == self.capacity {
            if self.capacity > 0 && self.precedes(self.values[1], value) {
                self.values[1] = value;
                self.keys[1] = key;
                self.bubble_down(1);
            }
        } else {
            self.insert(key, value);
        }
    }

    /// Push that doubles the capacity when the heap is full.
    #[inline]
    pub fn push_or_grow(&mut self, key: T, value: f64) {
        if self.count == self.capacity {
            self.resize((self.capacity * 2).max(1));
        }
        self.insert(key, value);
    }

    /// Removes and returns the head.
    pub fn pop(&mut self) -> Option<(T, f64)> {
        if self.count == 0 {
            return None;
        }
        let result = (self.keys[1], self.values[1]);
        self.values[1] = self.values[self.count];
        self.keys[1] = self.keys[self.count];
        self.count -= 1;
        if self.count > 0 {
            self.bubble_down(1);
        }
        Some(result)
    }

    #[inline]
    fn insert(&mut self, key: T, value: f64) {
        self.count += 1;
        self.values[self.count] = value;
        self.keys[self.count] = key;
        self.bubble_up(self.count);
    }

    /// Whether a value of `a` belongs closer to the head than `b`.
    #[inline(always)]
    fn precedes(&self, a: f64, b: f64) -> bool {
        match self.order {
            HeapOrder::Min => a < b,
            HeapOrder::Max => a > b,
        }
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
        self.keys.swap(a, b);
    }

    fn bubble_up(&mut self, mut index: usize) {
        let mut p = parent(index);
        while p > 0 && self.precedes(self.values[index], self.values[p]) {
            self.swap(p, index);
            index = p;
            p = parent(index);
        }
    }

    fn bubble_down(&mut self, mut index: usize) {
        loop {
            let l = left(index);
            let r = right(index);
            let mut best = index;
            if l <= self.count && self.precedes(self.values[l], self.values[best]) {
                best = l;
            }
            if r <= self.count && self.precedes(self.values[r], self.values[best]) {
                best = r;
            }
            if best == index {
                break;
            }
            self.swap(index, best);
            index = best;
        }
    }
}
