//! Partial updates with explicit presence tracking

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::record::Gender;

/// State of one field in a partial update.
///
/// `Unset` (the key was absent) is distinct from `Null` (the key was
/// present with a JSON null). Only `Null` and `Set` take part in a merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    #[default]
    Unset,
    Null,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Patch::Unset)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key is present; absent keys take the default
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Set(value),
            None => Patch::Null,
        })
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Patch::Set(value) => value.serialize(serializer),
            Patch::Null | Patch::Unset => serializer.serialize_none(),
        }
    }
}

/// A validated partial update: every record field except `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialUpdate {
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub age: Patch<u8>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub gender: Patch<Gender>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub height: Patch<f64>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub weight: Patch<f64>,
    #[serde(rename = "DOB", default, skip_serializing_if = "Patch::is_unset")]
    pub date_of_birth: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub email: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub linkedin: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub contact: Patch<IndexMap<String, String>>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub hobbies: Patch<Vec<String>>,
}

impl PartialUpdate {
    /// Overlays every present field onto a record body.
    ///
    /// Fields are replaced whole: a present `contact` or `hobbies` replaces
    /// the stored mapping or list rather than merging into it.
    pub fn apply_to(&self, body: &mut Map<String, Value>) -> serde_json::Result<()> {
        if let Value::Object(present) = serde_json::to_value(self)? {
            for (key, value) in present {
                body.insert(key, value);
            }
        }
        Ok(())
    }
}
