//! Schema Invariant Tests
//!
//! - Valid records pass and carry bmi = weight / height²
//! - Every violated field is named
//! - Validation is deterministic
//! - Unknown fields and caller-supplied bmi are rejected
//! - Partial updates check only present fields

use serde_json::{json, Value};
use studentdb::schema::{validate_full, validate_partial, Patch};

// =============================================================================
// Helper Functions
// =============================================================================

fn record(id: &str, height: f64, weight: f64) -> Value {
    json!({
        "id": id,
        "name": "Katherine Johnson",
        "age": 35,
        "gender": "female",
        "height": height,
        "weight": weight,
        "DOB": "1918-08-26",
        "email": "katherine@nasa.gov",
        "contact": {"office": "Langley"}
    })
}

// =============================================================================
// Valid Records
// =============================================================================

/// bmi is exactly weight / height² for a spread of valid records.
#[test]
fn test_bmi_exact_for_valid_records() {
    let samples = [(1.5, 45.0), (1.62, 58.3), (1.91, 102.7), (170.0, 65.0), (0.5, 3.2)];

    for (i, (height, weight)) in samples.iter().enumerate() {
        let student = validate_full(&record(&format!("s{}", i), *height, *weight)).unwrap();
        assert_eq!(student.profile.bmi(), weight / (height * height));
    }
}

/// Minimal record: only required fields.
#[test]
fn test_minimal_record_passes() {
    let doc = json!({
        "id": "ab",
        "name": "Bob",
        "age": 0,
        "gender": "male",
        "height": 1,
        "weight": 1,
        "DOB": "2024-01-01",
        "contact": {}
    });

    assert!(validate_full(&doc).is_ok());
}

/// Same document validates the same way every time.
#[test]
fn test_validation_is_deterministic() {
    let good = record("s1", 1.6, 60.0);
    let mut bad = record("s1", 1.6, 60.0);
    bad["age"] = json!(-1);

    for _ in 0..100 {
        assert!(validate_full(&good).is_ok());
        let err = validate_full(&bad).unwrap_err();
        assert_eq!(err.violations().len(), 1);
    }
}

// =============================================================================
// Constraint Violations
// =============================================================================

#[test]
fn test_age_below_range() {
    let mut doc = record("s1", 1.6, 60.0);
    doc["age"] = json!(-1);
    assert!(validate_full(&doc).unwrap_err().names_field("age"));
}

#[test]
fn test_unknown_gender() {
    let mut doc = record("s1", 1.6, 60.0);
    doc["gender"] = json!("x");
    assert!(validate_full(&doc).unwrap_err().names_field("gender"));
}

#[test]
fn test_slashed_date_of_birth() {
    let mut doc = record("s1", 1.6, 60.0);
    doc["DOB"] = json!("2020/01/01");
    assert!(validate_full(&doc).unwrap_err().names_field("DOB"));
}

/// Each missing required field is reported by name.
#[test]
fn test_each_missing_required_field_named() {
    for field in ["id", "name", "age", "gender", "height", "weight", "DOB", "contact"] {
        let mut doc = record("s1", 1.6, 60.0);
        doc.as_object_mut().unwrap().remove(field);

        let err = validate_full(&doc).unwrap_err();
        assert!(err.names_field(field), "missing {} not reported: {}", field, err);
    }
}

/// Optional fields may be dropped without error.
#[test]
fn test_optional_fields_may_be_missing() {
    for field in ["email", "linkedin", "hobbies"] {
        let mut doc = record("s1", 1.6, 60.0);
        doc.as_object_mut().unwrap().remove(field);
        assert!(validate_full(&doc).is_ok(), "{} should be optional", field);
    }
}

/// The id may be long, but not longer than 10000 characters.
#[test]
fn test_id_length_bounds() {
    assert!(validate_full(&record(&"x".repeat(10000), 1.6, 60.0)).is_ok());
    let err = validate_full(&record(&"x".repeat(10001), 1.6, 60.0)).unwrap_err();
    assert!(err.names_field("id"));
}

// =============================================================================
// Undeclared Fields
// =============================================================================

#[test]
fn test_unknown_field_rejected() {
    let mut doc = record("s1", 1.6, 60.0);
    doc["favourite_colour"] = json!("blue");
    assert!(validate_full(&doc).unwrap_err().names_field("favourite_colour"));
}

#[test]
fn test_bmi_never_accepted_as_input() {
    let mut doc = record("s1", 1.6, 60.0);
    doc["bmi"] = json!(23.4);
    assert!(validate_full(&doc).unwrap_err().names_field("bmi"));

    assert!(validate_partial(&json!({"bmi": 23.4}))
        .unwrap_err()
        .names_field("bmi"));
}

// =============================================================================
// Partial Updates
// =============================================================================

#[test]
fn test_partial_tracks_presence() {
    let update = validate_partial(&json!({"age": 30, "linkedin": null})).unwrap();
    assert_eq!(update.age, Patch::Set(30));
    assert_eq!(update.linkedin, Patch::Null);
    assert_eq!(update.name, Patch::Unset);
    assert_eq!(update.contact, Patch::Unset);
}

#[test]
fn test_partial_rules_match_full_rules() {
    let err = validate_partial(&json!({"name": "X1", "DOB": "1/1/2000"})).unwrap_err();
    assert!(err.names_field("name"));
    assert!(err.names_field("DOB"));
}

#[test]
fn test_partial_must_be_object() {
    assert!(validate_partial(&json!("age=30")).is_err());
}
