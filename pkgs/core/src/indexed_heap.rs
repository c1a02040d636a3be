use std::{borrow::Borrow, fmt, hash::Hash, mem};

use crate::{Error, HashIndex, Result};

/// A 4-ary min-heap of unique elements that allows removing or replacing any element
/// in `O(log n)`, by keeping track of the heap position of every element.
///
/// The position index is updated together with the heap array on every swap,
/// insertion and removal, so that for every live position `i`,
/// `positions[heap[i]] == i`.
pub struct IndexedHeap<T> {
    /// The array representation of the heap.
    heap: Vec<T>,
    /// Mapping from element to its index in the heap.
    positions: HashIndex<T, usize>,
}

impl<T> IndexedHeap<T> {
    /// Children per node.
    pub const NUM_CHILDREN: usize = 4;
    const INITIAL_CAPACITY: usize = 16;

    pub fn new() -> Self {
        Self::with_capacity(Self::INITIAL_CAPACITY)
    }

    /// Creates a new empty IndexedHeap whose array can hold `capacity` elements before growing.
    pub fn with_capacity(capacity: usize) -> Self {
        IndexedHeap {
            heap: Vec::with_capacity(capacity.max(1)),
            positions: HashIndex::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the smallest element without removing it.
    pub fn peek_min(&self) -> Result<&T> {
        self.heap.first().ok_or(Error::EmptyContainer)
    }

    /// The heap array, in heap order.
    #[cfg(any(test, debug_assertions))]
    pub fn as_slice(&self) -> &[T] {
        &self.heap
    }

    #[inline(always)]
    fn parent_of(idx: usize) -> usize {
        (idx - 1) / Self::NUM_CHILDREN
    }

    #[inline(always)]
    fn first_child_of(idx: usize) -> usize {
        idx * Self::NUM_CHILDREN + 1
    }
}

impl<T: Ord + Hash + Clone> IndexedHeap<T> {
    /// Checks whether the heap contains `item`.
    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.contains_key(item)
    }

    /// Inserts a new element into the heap.
    ///
    /// Fails with [`Error::DuplicateElement`] if an equal element is already present.
    pub fn add(&mut self, item: T) -> Result<()> {
        if self.positions.contains_key(&item) {
            return Err(Error::DuplicateElement);
        }

        if self.heap.len() == self.heap.capacity() {
            // Double the array. Positions don't change, so the index is untouched.
            let additional = self.heap.capacity().max(1);
            self.heap.reserve_exact(additional);
        }

        let idx = self.heap.len();
        self.positions.put(item.clone(), idx);
        self.heap.push(item);
        self.percolate(idx);
        Ok(())
    }

    /// Pops and returns the smallest element.
    pub fn remove_min(&mut self) -> Result<T> {
        if self.heap.is_empty() {
            return Err(Error::EmptyContainer);
        }

        // Move the last element to the root and sift down
        let min = self.heap.swap_remove(0);
        self.forget(&min);

        if !self.heap.is_empty() {
            self.set_position(0);
            self.sift_down(0);
        }

        Ok(min)
    }

    /// Removes `item` from anywhere in the heap and returns the stored element.
    pub fn remove<Q>(&mut self, item: &Q) -> Result<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.positions.remove(item).map_err(|_| Error::NotFound)?;
        let last = self.heap.len() - 1;
        let removed = self.heap.swap_remove(idx);

        // If the removed element sat in the last slot, nothing was moved into `idx`.
        // Touching the index here would re-register the element we just removed.
        if idx != last {
            self.set_position(idx);
            self.percolate(idx);
        }

        Ok(removed)
    }

    /// Replaces `old` with `new` in place and restores the heap order, which may move
    /// `new` either up or down. Returns the replaced element.
    pub fn replace<Q>(&mut self, old: &Q, new: T) -> Result<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.positions.get(old).map_err(|_| Error::NotFound)?;
        if self.positions.contains_key::<T>(&new) {
            return Err(Error::DuplicateElement);
        }

        self.positions.remove(old)?;
        self.positions.put(new.clone(), idx);
        let replaced = mem::replace(&mut self.heap[idx], new);

        self.percolate(idx);
        Ok(replaced)
    }

    /// Empties the heap in ascending order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.heap.len());
        while let Ok(min) = self.remove_min() {
            sorted.push(min);
        }
        sorted
    }

    /// Restores the heap property for the element at `idx`, which may be out of
    /// order with its parent or its children, but not both.
    fn percolate(&mut self, idx: usize) {
        if idx > 0 && self.heap[idx] < self.heap[Self::parent_of(idx)] {
            self.sift_up(idx);
        } else {
            self.sift_down(idx);
        }
    }

    /// Sifts the element at `idx` up the heap to restore the heap property.
    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = Self::parent_of(idx);
            if self.heap[idx] >= self.heap[parent] {
                break; // Not smaller than parent => heap property satisfied
            }

            self.swap(idx, parent);
            idx = parent;
        }
    }

    /// Sifts the element at `idx` down the heap to restore the heap property.
    fn sift_down(&mut self, mut idx: usize) {
        loop {
            let first = Self::first_child_of(idx);
            if first >= self.heap.len() {
                break; // No children
            }
            let end = (first + Self::NUM_CHILDREN).min(self.heap.len());

            // Find the smallest child, the leftmost one on ties
            let mut smallest = first;
            for child in first + 1..end {
                if self.heap[child] < self.heap[smallest] {
                    smallest = child;
                }
            }

            if self.heap[smallest] >= self.heap[idx] {
                break; // No child is smaller => heap property satisfied
            }

            self.swap(idx, smallest);
            idx = smallest;
        }
    }

    /// Swaps two heap slots and updates both of their index entries.
    #[inline(always)]
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.set_position(a);
        self.set_position(b);
    }

    /// Records `idx` as the position of the element currently stored there.
    #[inline(always)]
    fn set_position(&mut self, idx: usize) {
        *self
            .positions
            .get_mut(&self.heap[idx])
            .expect("Every heap element has an entry in the position index") = idx;
    }

    fn forget(&mut self, item: &T) {
        self.positions
            .remove(item)
            .expect("Every heap element has an entry in the position index");
    }

    /// Verifies the heap order and that the position index mirrors the heap array.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        for idx in 1..self.heap.len() {
            if self.heap[idx] < self.heap[Self::parent_of(idx)] {
                return Err(format!(
                    "element at {} is smaller than its parent at {}",
                    idx,
                    Self::parent_of(idx)
                ));
            }
        }

        if self.positions.len() != self.heap.len() {
            return Err(format!(
                "index holds {} entries for {} elements",
                self.positions.len(),
                self.heap.len()
            ));
        }
        for (idx, item) in self.heap.iter().enumerate() {
            match self.positions.get(item) {
                Ok(&pos) if pos == idx => {}
                Ok(&pos) => return Err(format!("element at {} is indexed at {}", idx, pos)),
                Err(_) => return Err(format!("element at {} is not indexed", idx)),
            }
        }
        Ok(())
    }
}

impl<T> Default for IndexedHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for IndexedHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedHeap")
            .field("heap", &self.heap)
            .finish_non_exhaustive()
    }
}
