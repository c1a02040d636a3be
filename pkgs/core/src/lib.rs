//! In-memory containers: a chained hash index and a 4-ary indexed min-heap that uses
//! it to track element positions.

mod error;
mod hash_index;
mod hash_set;
mod indexed_heap;

pub use error::{Error, Result};
pub use hash_index::{DefaultHashBuilder, HashIndex, Iter};
pub use hash_set::HashIndexSet;
pub use indexed_heap::IndexedHeap;
