//! Sorting the collection by an allow-listed field

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::schema::{StudentProfile, StudentView};
use crate::store::Collection;

/// Fields a collection may be sorted by, in the order shown to callers
pub const SORT_KEYS: &[&str] = &["height", "weight", "gender", "age"];

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Invalid sort arguments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Invalid sort field '{0}', choose from {keys}", keys = SORT_KEYS.join(", "))]
    InvalidSortKey(String),

    #[error("Invalid order '{0}', order must be 'asc' or 'desc'")]
    InvalidSortOrder(String),
}

/// Field to sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Height,
    Weight,
    Gender,
    Age,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Height => "height",
            SortKey::Weight => "weight",
            SortKey::Gender => "gender",
            SortKey::Age => "age",
        }
    }

    /// Natural ordering of two bodies on this key: numeric for height,
    /// weight and age, lexicographic on the wire string for gender.
    fn compare(&self, a: &StudentProfile, b: &StudentProfile) -> Ordering {
        match self {
            SortKey::Height => a.height.total_cmp(&b.height),
            SortKey::Weight => a.weight.total_cmp(&b.weight),
            SortKey::Gender => a.gender.as_str().cmp(b.gender.as_str()),
            SortKey::Age => a.age.cmp(&b.age),
        }
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> QueryResult<Self> {
        match s {
            "height" => Ok(SortKey::Height),
            "weight" => Ok(SortKey::Weight),
            "gender" => Ok(SortKey::Gender),
            "age" => Ok(SortKey::Age),
            other => Err(QueryError::InvalidSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> QueryResult<Self> {
        match s {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(QueryError::InvalidSortOrder(other.to_string())),
        }
    }
}

/// Returns every record ordered by `key`.
///
/// The sort is stable in both directions: records that compare equal keep
/// their collection order.
pub fn sort(collection: &Collection, key: SortKey, order: SortOrder) -> Vec<StudentView> {
    let mut entries: Vec<(&String, &StudentProfile)> = collection.iter().collect();

    entries.sort_by(|(_, a), (_, b)| match order {
        SortOrder::Ascending => key.compare(a, b),
        SortOrder::Descending => key.compare(b, a),
    });

    entries
        .into_iter()
        .map(|(id, profile)| StudentView::with_id(id, profile))
        .collect()
}
