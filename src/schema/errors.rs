//! Schema error types
//!
//! Error codes:
//! - STUDENTDB_VALIDATION_FAILED (REJECT)
//!
//! A validation error always carries every violated field, never just the
//! first one found.

use std::fmt;

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Candidate record violates one or more field constraints
    ValidationFailed,
}

impl SchemaErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::ValidationFailed => "STUDENTDB_VALIDATION_FAILED",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One violated field constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    /// Field path (e.g., "contact.phone", "hobbies[2]")
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(field: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, "field to be present", "missing")
    }

    pub fn extra_field(field: impl Into<String>) -> Self {
        Self::new(field, "no undeclared fields", "extra field present")
    }

    pub fn read_only(field: impl Into<String>) -> Self {
        Self::new(field, "no value (derived field, computed on read)", "value supplied")
    }

    pub fn type_mismatch(field: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(field, expected, actual)
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        Self::new(field, "non-null value", "null")
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': expected {}, got {}", self.field, self.expected, self.actual)
    }
}

/// Schema error type with full context
#[derive(Debug, Clone)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    violations: Vec<ValidationDetails>,
}

impl SchemaError {
    /// Create a validation failed error from a non-empty list of violations
    pub fn validation_failed(violations: Vec<ValidationDetails>) -> Self {
        let summary = violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            code: SchemaErrorCode::ValidationFailed,
            message: format!("Record validation failed: {}", summary),
            violations,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns every violated constraint
    pub fn violations(&self) -> &[ValidationDetails] {
        &self.violations
    }

    /// Returns true if any violation names the given field path
    pub fn names_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_string() {
        assert_eq!(SchemaErrorCode::ValidationFailed.code(), "STUDENTDB_VALIDATION_FAILED");
    }

    #[test]
    fn test_validation_details_display() {
        let details = ValidationDetails::type_mismatch("age", "int", "string");
        let display = format!("{}", details);
        assert!(display.contains("age"));
        assert!(display.contains("int"));
        assert!(display.contains("string"));
    }

    #[test]
    fn test_message_lists_every_violation() {
        let err = SchemaError::validation_failed(vec![
            ValidationDetails::missing_field("name"),
            ValidationDetails::null_value("age"),
        ]);
        assert!(err.message().contains("'name'"));
        assert!(err.message().contains("'age'"));
        assert_eq!(err.violations().len(), 2);
        assert!(err.names_field("age"));
        assert!(!err.names_field("gender"));
    }

    #[test]
    fn test_display_includes_code() {
        let err = SchemaError::validation_failed(vec![ValidationDetails::read_only("bmi")]);
        let display = format!("{}", err);
        assert!(display.starts_with("STUDENTDB_VALIDATION_FAILED"));
        assert!(display.contains("bmi"));
    }
}
