//! Document ranking on top of `heapdex_core`: top-k selection, page rank and TF-IDF
//! relevance, and a small search engine combining them.

pub mod analyzers;
pub mod document;
pub mod search;
pub mod top_k;
pub mod utils;

pub use document::Document;
pub use heapdex_core::{Error, HashIndex, HashIndexSet, IndexedHeap, Result};
pub use search::{SearchEngine, SearchHit};
pub use top_k::top_k;
