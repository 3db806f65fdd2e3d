//! Persistent collection storage
//!
//! The collection is loaded in full at the start of every operation and
//! saved in full at the end of every mutating one. There is no cache
//! between operations.

mod errors;
mod file_store;

pub use errors::{StoreError, StoreResult};
pub use file_store::{JsonFileStore, DEFAULT_DATA_FILE};

use indexmap::IndexMap;

use crate::schema::StudentProfile;

/// Ordered mapping from record id to stored body.
///
/// Iteration order is file order for loaded records, then insertion order.
pub type Collection = IndexMap<String, StudentProfile>;
