//! Query engine: linear scan plus key-based stable sort over a loaded
//! collection.

mod sort;

pub use sort::{sort, QueryError, QueryResult, SortKey, SortOrder, SORT_KEYS};
