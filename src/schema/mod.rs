//! Record schema for studentdb
//!
//! Defines what a student record is, which fields a caller may send, and
//! the typed shapes a record takes once validated.
//!
//! # Design Principles
//!
//! - Validation happens before any storage write
//! - Unknown fields are rejected, `bmi` is derived and never accepted
//! - Every violated field is reported, not just the first
//! - No coercion: ints are ints, strings are strings

mod errors;
mod patch;
mod record;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, ValidationDetails};
pub use patch::{PartialUpdate, Patch};
pub use record::{Gender, Student, StudentProfile, StudentView};
pub use types::{field, FieldDef, FieldType, Pattern, BMI_FIELD, GENDERS, ID_FIELD, STUDENT_FIELDS};
pub use validator::{validate_full, validate_partial};
