//! Field definitions for the student record
//!
//! Supported field types:
//! - text: UTF-8 string with character-length bounds and an optional pattern
//! - int: integer within an inclusive range
//! - float: any JSON number
//! - one_of: string from a fixed set
//! - email: string in email address format
//! - string_map: object whose values are all strings
//! - string_list: array whose elements are all strings

use std::sync::OnceLock;

use regex::Regex;

/// Named string patterns a text field can be checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Letters and spaces only
    LettersAndSpaces,
    /// `YYYY-MM-DD`
    IsoDate,
}

impl Pattern {
    /// Returns the source of the pattern, as shown in error messages
    pub fn source(&self) -> &'static str {
        match self {
            Pattern::LettersAndSpaces => r"^[A-Za-z ]+$",
            Pattern::IsoDate => r"^\d{4}-\d{2}-\d{2}$",
        }
    }

    /// Returns the compiled pattern
    pub fn regex(&self) -> &'static Regex {
        static LETTERS_AND_SPACES: OnceLock<Regex> = OnceLock::new();
        static ISO_DATE: OnceLock<Regex> = OnceLock::new();

        let cell = match self {
            Pattern::LettersAndSpaces => &LETTERS_AND_SPACES,
            Pattern::IsoDate => &ISO_DATE,
        };
        // Pattern literals are static and known-valid
        cell.get_or_init(|| Regex::new(self.source()).expect("built-in pattern is valid"))
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex().is_match(value)
    }
}

/// Supported field types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldType {
    /// String with inclusive character-length bounds
    Text {
        min_len: usize,
        max_len: usize,
        pattern: Option<Pattern>,
    },
    /// Integer with inclusive bounds
    Int { min: i64, max: i64 },
    /// 64-bit floating point; integers are accepted
    Float,
    /// One of a fixed set of strings
    OneOf(&'static [&'static str]),
    /// Email address
    Email,
    /// Unconstrained string
    String,
    /// Object with string values
    StringMap,
    /// Array of strings
    StringList,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Text { .. } | FieldType::String | FieldType::OneOf(_) | FieldType::Email => {
                "string"
            }
            FieldType::Int { .. } => "int",
            FieldType::Float => "float",
            FieldType::StringMap => "object",
            FieldType::StringList => "array",
        }
    }
}

/// Field definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDef {
    /// Wire key of the field
    pub name: &'static str,
    /// Field data type and constraints
    pub field_type: FieldType,
    /// Whether field must be present in a full record
    pub required: bool,
}

impl FieldDef {
    const fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: true,
        }
    }

    const fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: false,
        }
    }

    /// Optional fields accept an explicit null in a full record
    pub fn nullable(&self) -> bool {
        !self.required
    }
}

/// Wire key of the record identifier
pub const ID_FIELD: &str = "id";

/// Wire key of the derived body-mass index
pub const BMI_FIELD: &str = "bmi";

/// Allowed values of the `gender` field
pub const GENDERS: &[&str] = &["male", "female"];

/// Field table of a full student record, in wire order
pub const STUDENT_FIELDS: &[FieldDef] = &[
    FieldDef::required(
        ID_FIELD,
        FieldType::Text {
            min_len: 2,
            max_len: 10000,
            pattern: None,
        },
    ),
    FieldDef::required(
        "name",
        FieldType::Text {
            min_len: 3,
            max_len: 50,
            pattern: Some(Pattern::LettersAndSpaces),
        },
    ),
    FieldDef::required("age", FieldType::Int { min: 0, max: 150 }),
    FieldDef::required("gender", FieldType::OneOf(GENDERS)),
    FieldDef::required("height", FieldType::Float),
    FieldDef::required("weight", FieldType::Float),
    FieldDef::required(
        "DOB",
        FieldType::Text {
            min_len: 0,
            max_len: usize::MAX,
            pattern: Some(Pattern::IsoDate),
        },
    ),
    FieldDef::optional("email", FieldType::Email),
    FieldDef::optional("linkedin", FieldType::String),
    FieldDef::required("contact", FieldType::StringMap),
    FieldDef::optional("hobbies", FieldType::StringList),
];

/// Looks up a field definition by wire key
pub fn field(name: &str) -> Option<&'static FieldDef> {
    STUDENT_FIELDS.iter().find(|f| f.name == name)
}
