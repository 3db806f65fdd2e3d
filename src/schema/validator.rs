//! Record validation
//!
//! Validation semantics:
//! - Every required field is present (full records only)
//! - No undeclared fields exist; `bmi` is derived and never accepted
//! - Field types match exactly, ints are not coerced from floats or strings
//! - Length, range, pattern, enum and email constraints hold
//! - Null is accepted only on optional fields (any field in a partial update)
//!
//! All violations are collected before failing, so a caller sees every
//! offending field in one response.

use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::errors::{SchemaError, SchemaResult, ValidationDetails};
use super::patch::PartialUpdate;
use super::record::Student;
use super::types::{FieldDef, FieldType, BMI_FIELD, ID_FIELD, STUDENT_FIELDS};

/// Which shape of record a candidate is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Complete record including `id`
    Full,
    /// Partial update: no `id`, every field optional and nullable
    Partial,
}

impl Mode {
    fn declares(&self, key: &str) -> bool {
        match self {
            Mode::Full => STUDENT_FIELDS.iter().any(|f| f.name == key),
            Mode::Partial => key != ID_FIELD && STUDENT_FIELDS.iter().any(|f| f.name == key),
        }
    }

    fn fields(&self) -> impl Iterator<Item = &'static FieldDef> + '_ {
        STUDENT_FIELDS
            .iter()
            .filter(move |f| *self == Mode::Full || f.name != ID_FIELD)
    }
}

/// Validates a complete record.
///
/// # Errors
///
/// Returns `SchemaError` listing every violated field if the candidate is
/// not an object, misses a required field, carries an undeclared field or
/// `bmi`, or breaks any field constraint.
pub fn validate_full(candidate: &Value) -> SchemaResult<Student> {
    let obj = check(candidate, Mode::Full)?;
    decode(obj)
}

/// Validates a partial update.
///
/// Only present fields are checked. `id` is not updatable and is rejected
/// as an undeclared field.
pub fn validate_partial(candidate: &Value) -> SchemaResult<PartialUpdate> {
    let obj = check(candidate, Mode::Partial)?;
    decode(obj)
}

fn check(candidate: &Value, mode: Mode) -> SchemaResult<&Map<String, Value>> {
    let obj = candidate.as_object().ok_or_else(|| {
        SchemaError::validation_failed(vec![ValidationDetails::type_mismatch(
            "$root",
            "object",
            json_type_name(candidate),
        )])
    })?;

    let mut violations = Vec::new();

    for key in obj.keys() {
        if key == BMI_FIELD {
            violations.push(ValidationDetails::read_only(key.as_str()));
        } else if !mode.declares(key) {
            violations.push(ValidationDetails::extra_field(key.as_str()));
        }
    }

    for def in mode.fields() {
        match obj.get(def.name) {
            Some(Value::Null) => {
                if mode == Mode::Full && !def.nullable() {
                    violations.push(ValidationDetails::null_value(def.name));
                }
            }
            Some(value) => validate_value(value, &def.field_type, def.name, &mut violations),
            None => {
                if mode == Mode::Full && def.required {
                    violations.push(ValidationDetails::missing_field(def.name));
                }
            }
        }
    }

    if violations.is_empty() {
        Ok(obj)
    } else {
        Err(SchemaError::validation_failed(violations))
    }
}

/// Decodes an already-checked object into its typed form.
fn decode<T: DeserializeOwned>(obj: &Map<String, Value>) -> SchemaResult<T> {
    serde_json::from_value(Value::Object(obj.clone())).map_err(|e| {
        SchemaError::validation_failed(vec![ValidationDetails::new(
            "$root",
            "well-formed record",
            e.to_string(),
        )])
    })
}

/// Checks a non-null value against a field type, appending any violations.
fn validate_value(
    value: &Value,
    expected: &FieldType,
    field_path: &str,
    violations: &mut Vec<ValidationDetails>,
) {
    match expected {
        FieldType::Text {
            min_len,
            max_len,
            pattern,
        } => {
            let Some(s) = value.as_str() else {
                violations.push(type_error(field_path, "string", value));
                return;
            };
            let len = s.chars().count();
            if len < *min_len || len > *max_len {
                violations.push(ValidationDetails::new(
                    field_path,
                    length_expectation(*min_len, *max_len),
                    format!("{} characters", len),
                ));
            }
            if let Some(pattern) = pattern {
                if !pattern.is_match(s) {
                    violations.push(ValidationDetails::new(
                        field_path,
                        format!("string matching {}", pattern.source()),
                        format!("'{}'", s),
                    ));
                }
            }
        }
        FieldType::Int { min, max } => {
            if !value.is_i64() && !value.is_u64() {
                violations.push(type_error(field_path, "int", value));
                return;
            }
            let in_range = value.as_i64().is_some_and(|n| n >= *min && n <= *max);
            if !in_range {
                violations.push(ValidationDetails::new(
                    field_path,
                    format!("int between {} and {}", min, max),
                    value.to_string(),
                ));
            }
        }
        FieldType::Float => {
            if !value.is_number() {
                violations.push(type_error(field_path, "float", value));
            }
        }
        FieldType::OneOf(allowed) => {
            let Some(s) = value.as_str() else {
                violations.push(type_error(field_path, "string", value));
                return;
            };
            if !allowed.contains(&s) {
                violations.push(ValidationDetails::new(
                    field_path,
                    format!("one of {}", quoted_list(allowed)),
                    format!("'{}'", s),
                ));
            }
        }
        FieldType::Email => {
            let Some(s) = value.as_str() else {
                violations.push(type_error(field_path, "string", value));
                return;
            };
            if !is_valid_email(s) {
                violations.push(ValidationDetails::new(
                    field_path,
                    "valid email address",
                    format!("'{}'", s),
                ));
            }
        }
        FieldType::String => {
            if !value.is_string() {
                violations.push(type_error(field_path, "string", value));
            }
        }
        FieldType::StringMap => {
            let Some(map) = value.as_object() else {
                violations.push(type_error(field_path, "object", value));
                return;
            };
            for (key, entry) in map {
                if !entry.is_string() {
                    violations.push(type_error(&format!("{}.{}", field_path, key), "string", entry));
                }
            }
        }
        FieldType::StringList => {
            let Some(items) = value.as_array() else {
                violations.push(type_error(field_path, "array", value));
                return;
            };
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    violations.push(type_error(&format!("{}[{}]", field_path, i), "string", item));
                }
            }
        }
    }
}

/// Checks an address of the form `local@domain.tld`.
fn is_valid_email(s: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    // Pattern literal is static and known-valid
    let re = EMAIL.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@([A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
        )
        .expect("email pattern is valid")
    });

    s.len() <= 254 && s.split('@').next().is_some_and(|local| local.len() <= 64) && re.is_match(s)
}

fn length_expectation(min: usize, max: usize) -> String {
    if max == usize::MAX {
        format!("at least {} characters", min)
    } else {
        format!("between {} and {} characters", min, max)
    }
}

fn quoted_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|s| format!("'{}'", s))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_error(field_path: &str, expected: &str, actual: &Value) -> ValidationDetails {
    ValidationDetails::type_mismatch(field_path, expected, json_type_name(actual))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Gender, Patch};
    use serde_json::json;

    fn valid_student() -> Value {
        json!({
            "id": "s1",
            "name": "Grace Hopper",
            "age": 30,
            "gender": "female",
            "height": 1.7,
            "weight": 60.0,
            "DOB": "1906-12-09",
            "email": "grace@navy.mil",
            "linkedin": "gracehopper",
            "contact": {"phone": "555-0101"},
            "hobbies": ["cobol", "sailing"]
        })
    }

    fn with(field: &str, value: Value) -> Value {
        let mut doc = valid_student();
        doc[field] = value;
        doc
    }

    fn without(field: &str) -> Value {
        let mut doc = valid_student();
        doc.as_object_mut().unwrap().remove(field);
        doc
    }

    #[test]
    fn test_valid_document_passes() {
        let student = validate_full(&valid_student()).unwrap();
        assert_eq!(student.id, "s1");
        assert_eq!(student.profile.gender, Gender::Female);
        assert_eq!(student.profile.hobbies.as_deref().map(<[String]>::len), Some(2));
        assert_eq!(student.profile.bmi(), 60.0 / (1.7 * 1.7));
    }

    #[test]
    fn test_optional_fields_may_be_absent_or_null() {
        let mut doc = without("email");
        doc.as_object_mut().unwrap().remove("hobbies");
        doc["linkedin"] = Value::Null;

        let student = validate_full(&doc).unwrap();
        assert_eq!(student.profile.email, None);
        assert_eq!(student.profile.linkedin, None);
        assert_eq!(student.profile.hobbies, None);
    }

    #[test]
    fn test_empty_contact_allowed() {
        assert!(validate_full(&with("contact", json!({}))).is_ok());
    }

    #[test]
    fn test_float_accepts_integers() {
        let student = validate_full(&with("height", json!(180))).unwrap();
        assert_eq!(student.profile.height, 180.0);
    }

    #[test]
    fn test_constraint_violations_name_the_field() {
        let cases = [
            ("age", json!(-1)),
            ("age", json!(151)),
            ("age", json!(30.5)),
            ("age", json!("30")),
            ("gender", json!("x")),
            ("DOB", json!("2020/01/01")),
            ("name", json!("Al")),
            ("name", json!("R2 D2")),
            ("name", json!("A".repeat(51))),
            ("id", json!("s")),
            ("email", json!("not-an-email")),
            ("height", json!("tall")),
            ("linkedin", json!(42)),
            ("contact", json!(["555"])),
        ];

        for (field, value) in cases {
            let err = validate_full(&with(field, value.clone())).unwrap_err();
            assert!(
                err.names_field(field),
                "{} = {} should be rejected naming the field, got {}",
                field,
                value,
                err
            );
        }
    }

    #[test]
    fn test_missing_required_fields_all_reported() {
        let mut doc = without("name");
        doc.as_object_mut().unwrap().remove("contact");

        let err = validate_full(&doc).unwrap_err();
        assert!(err.names_field("name"));
        assert!(err.names_field("contact"));
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_many_violations_collected_at_once() {
        let mut doc = with("age", json!(999));
        doc["gender"] = json!("x");
        doc["DOB"] = json!("yesterday");

        let err = validate_full(&doc).unwrap_err();
        assert!(err.names_field("age"));
        assert!(err.names_field("gender"));
        assert!(err.names_field("DOB"));
    }

    #[test]
    fn test_null_on_required_field_rejected() {
        let err = validate_full(&with("age", Value::Null)).unwrap_err();
        let details = &err.violations()[0];
        assert_eq!(details.field, "age");
        assert_eq!(details.actual, "null");
    }

    #[test]
    fn test_extra_field_rejected() {
        let err = validate_full(&with("nickname", json!("amazing grace"))).unwrap_err();
        assert!(err.names_field("nickname"));
    }

    #[test]
    fn test_bmi_input_rejected() {
        let err = validate_full(&with("bmi", json!(20.0))).unwrap_err();
        assert!(err.names_field("bmi"));
        assert!(err.violations()[0].expected.contains("derived"));
    }

    #[test]
    fn test_nested_paths_in_violations() {
        let mut doc = with("contact", json!({"phone": 5550101}));
        doc["hobbies"] = json!(["cobol", 7]);

        let err = validate_full(&doc).unwrap_err();
        assert!(err.names_field("contact.phone"));
        assert!(err.names_field("hobbies[1]"));
    }

    #[test]
    fn test_root_must_be_object() {
        let err = validate_full(&json!(["s1"])).unwrap_err();
        assert!(err.names_field("$root"));
    }

    #[test]
    fn test_name_length_counts_characters() {
        // 50 letters is the upper bound
        assert!(validate_full(&with("name", json!("A".repeat(50)))).is_ok());
        assert!(validate_full(&with("name", json!("Bob"))).is_ok());
    }

    #[test]
    fn test_email_formats() {
        assert!(is_valid_email("grace@navy.mil"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
        assert!(!is_valid_email("grace@localhost"));
        assert!(!is_valid_email("@navy.mil"));
        assert!(!is_valid_email("grace@@navy.mil"));
        assert!(!is_valid_email("grace..hopper@navy.mil"));
        assert!(!is_valid_email("grace hopper@navy.mil"));
    }

    #[test]
    fn test_partial_checks_only_present_fields() {
        let update = validate_partial(&json!({"age": 30})).unwrap();
        assert_eq!(update.age, Patch::Set(30));
        assert!(update.name.is_unset());
    }

    #[test]
    fn test_partial_accepts_null_on_any_field() {
        let update = validate_partial(&json!({"age": null, "email": null})).unwrap();
        assert_eq!(update.age, Patch::Null);
        assert_eq!(update.email, Patch::Null);
    }

    #[test]
    fn test_partial_applies_field_rules() {
        let err = validate_partial(&json!({"age": 999, "gender": "x"})).unwrap_err();
        assert!(err.names_field("age"));
        assert!(err.names_field("gender"));
    }

    #[test]
    fn test_partial_rejects_id_and_bmi() {
        let err = validate_partial(&json!({"id": "s2", "bmi": 1.0})).unwrap_err();
        assert!(err.names_field("id"));
        assert!(err.names_field("bmi"));
    }
}
