use std::hash::Hash;

use heapdex_core::{IndexedHeap, Result};

/// Returns the `k` largest elements of `input` in ascending order, or all of them if
/// `input` has fewer than `k` elements. `input` is not modified.
///
/// Runs in `O(n log k)` by keeping the `k` largest elements seen so far in a heap and
/// replacing its minimum whenever a larger element comes along.
///
/// # Errors
/// [`heapdex_core::Error::DuplicateElement`] if equal elements compete for the result.
pub fn top_k<T>(k: usize, input: &[T]) -> Result<Vec<T>>
where
    T: Ord + Hash + Clone,
{
    if k == 0 {
        return Ok(Vec::new());
    }

    let mut heap = IndexedHeap::with_capacity(k.min(input.len()));
    for item in input {
        if heap.len() < k {
            heap.add(item.clone())?;
            continue;
        }

        let min = heap.peek_min()?;
        if item > min {
            let min = min.clone();
            heap.replace(&min, item.clone())?;
        }
    }

    Ok(heap.into_sorted_vec())
}
