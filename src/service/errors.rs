//! Record service errors

use thiserror::Error;

use crate::query::QueryError;
use crate::schema::SchemaError;
use crate::store::StoreError;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors returned by record operations
#[derive(Debug, Error)]
pub enum ServiceError {
    // ==================
    // Caller errors
    // ==================
    /// Candidate record or partial update violates the schema
    #[error("{0}")]
    Validation(#[from] SchemaError),

    /// Referenced id is not in the collection
    #[error("Student ID '{0}' not found")]
    NotFound(String),

    /// Id already present on create
    #[error("Student ID '{0}' already exists")]
    Conflict(String),

    /// Bad sort field or direction
    #[error("{0}")]
    InvalidArgument(#[from] QueryError),

    // ==================
    // Internal errors
    // ==================
    /// Filesystem or encoding failure in the store
    #[error("{0}")]
    Storage(#[from] StoreError),

    /// A previous operation panicked while holding the store lock
    #[error("store lock poisoned")]
    LockPoisoned,
}

impl ServiceError {
    /// Returns true for errors caused by the caller's input
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, ServiceError::Storage(_) | ServiceError::LockPoisoned)
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        ServiceError::Storage(StoreError::Encode(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_id() {
        assert_eq!(
            ServiceError::NotFound("s9".into()).to_string(),
            "Student ID 's9' not found"
        );
        assert_eq!(
            ServiceError::Conflict("s1".into()).to_string(),
            "Student ID 's1' already exists"
        );
    }

    #[test]
    fn test_caller_error_classification() {
        assert!(ServiceError::NotFound("x".into()).is_caller_error());
        assert!(ServiceError::InvalidArgument(QueryError::InvalidSortKey("name".into()))
            .is_caller_error());
        assert!(!ServiceError::LockPoisoned.is_caller_error());
    }
}
