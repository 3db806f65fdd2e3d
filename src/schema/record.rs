//! Typed student records
//!
//! A `Student` only exists after validation. The persisted body is a
//! `StudentProfile` (no id, no bmi); outward representations are
//! `StudentView`s, which carry the derived bmi.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Student gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Returns the wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored body of a student record.
///
/// The id is the collection key and is not part of the body. Unknown keys
/// in a stored body (such as a `bmi` written by older tooling) are ignored
/// on load and dropped on the next save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
    #[serde(rename = "DOB")]
    pub date_of_birth: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    pub contact: IndexMap<String, String>,
    #[serde(default)]
    pub hobbies: Option<Vec<String>>,
}

impl StudentProfile {
    /// Body-mass index, `weight / height²`.
    ///
    /// A zero height yields an infinite or NaN value, which serializes as
    /// JSON `null`.
    pub fn bmi(&self) -> f64 {
        self.weight / (self.height * self.height)
    }
}

/// A validated student record
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Student {
    pub id: String,
    #[serde(flatten)]
    pub profile: StudentProfile,
}

impl Student {
    /// Splits the record into its collection key and stored body
    pub fn into_parts(self) -> (String, StudentProfile) {
        (self.id, self.profile)
    }
}

/// Outward-facing representation of a record, with the derived bmi
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub profile: StudentProfile,
    pub bmi: f64,
}

impl StudentView {
    /// View of a stored body, keyed by its id
    pub fn with_id(id: &str, profile: &StudentProfile) -> Self {
        Self {
            id: Some(id.to_string()),
            profile: profile.clone(),
            bmi: profile.bmi(),
        }
    }

    /// View of a stored body whose id is carried by the enclosing mapping
    pub fn body(profile: &StudentProfile) -> Self {
        Self {
            id: None,
            profile: profile.clone(),
            bmi: profile.bmi(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile() -> StudentProfile {
        serde_json::from_value(json!({
            "name": "Ada Lovelace",
            "age": 36,
            "gender": "female",
            "height": 1.65,
            "weight": 55.0,
            "DOB": "1815-12-10",
            "contact": {"phone": "555-0100"}
        }))
        .unwrap()
    }

    #[test]
    fn test_bmi_formula() {
        let p = profile();
        assert_eq!(p.bmi(), 55.0 / (1.65 * 1.65));
    }

    #[test]
    fn test_optional_fields_default_to_none() {
        let p = profile();
        assert_eq!(p.email, None);
        assert_eq!(p.linkedin, None);
        assert_eq!(p.hobbies, None);
    }

    #[test]
    fn test_body_serializes_without_id_or_bmi() {
        let value = serde_json::to_value(profile()).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("id"));
        assert!(!obj.contains_key("bmi"));
        assert_eq!(obj["DOB"], "1815-12-10");
        assert!(obj["email"].is_null());
    }

    #[test]
    fn test_view_includes_bmi_and_optional_id() {
        let p = profile();
        let with_id = serde_json::to_value(StudentView::with_id("s1", &p)).unwrap();
        assert_eq!(with_id["id"], "s1");
        assert_eq!(with_id["bmi"].as_f64().unwrap(), p.bmi());

        let body = serde_json::to_value(StudentView::body(&p)).unwrap();
        assert!(body.get("id").is_none());
        assert!(body.get("bmi").is_some());
    }

    #[test]
    fn test_zero_height_bmi_serializes_as_null() {
        let mut p = profile();
        p.height = 0.0;
        let view = serde_json::to_value(StudentView::body(&p)).unwrap();
        assert!(view["bmi"].is_null());
    }

    #[test]
    fn test_legacy_bmi_key_ignored_on_load() {
        let p: StudentProfile = serde_json::from_value(json!({
            "name": "Ada Lovelace",
            "age": 36,
            "gender": "female",
            "height": 1.65,
            "weight": 55.0,
            "DOB": "1815-12-10",
            "email": null,
            "linkedin": null,
            "contact": {},
            "hobbies": null,
            "bmi": 20.2
        }))
        .unwrap();
        assert_eq!(p.name, "Ada Lovelace");
    }
}
