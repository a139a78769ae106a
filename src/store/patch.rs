//! Shallow-merge patches for `update`.
//!
//! A [`Patch`] is a JSON object whose top-level keys replace the same keys of
//! the stored record. Nested objects are replaced whole, not merged, so
//! patching `salary` swaps the entire salary. The identifier cannot be
//! patched.

use super::entity::{Entity, ID_FIELD};
use crate::domain::error::{JobBoardError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Top-level field replacements, keyed by serialized field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch(Map<String, Value>);

impl Patch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces one field.
    ///
    /// # Examples
    ///
    /// ```
    /// use jobboard::store::Patch;
    /// use serde_json::json;
    ///
    /// let patch = Patch::new().set("status", json!("viewed")).set("remote", json!(true));
    /// assert_eq!(patch.len(), 2);
    /// ```
    #[must_use]
    pub fn set(mut self, field: impl Into<String>, value: Value) -> Self {
        self.0.insert(field.into(), value);
        self
    }

    /// Builds a patch from any value that serializes to a JSON object.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming `patch` when the value is not an object.
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self> {
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(JobBoardError::validation(["patch"])),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merges this patch over `record` and returns the merged copy.
    ///
    /// `record` is never modified, so a failed merge leaves stored state as it was.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming:
    /// - `Id` if the patch tries to change the identifier
    /// - every key whose value does not fit the entity's field type
    /// - every non-null key the entity does not have
    ///
    /// A `null` under a key the entity does not have is dropped without
    /// error. Unset optional fields are omitted from the encoded record, so
    /// such a key cannot be told apart from clearing an already empty field.
    pub fn apply<E: Entity>(&self, record: &E) -> Result<E> {
        if self.0.contains_key(ID_FIELD) {
            return Err(JobBoardError::validation([ID_FIELD]));
        }

        let base = match serde_json::to_value(record)? {
            Value::Object(map) => map,
            other => {
                return Err(JobBoardError::Storage(format!(
                    "{} serialized to a non-object: {other}",
                    E::KIND
                )))
            }
        };

        let Ok(merged) = decode::<E>(&base, self.0.iter()) else {
            return Err(JobBoardError::validation(self.rejected_keys::<E>(&base)));
        };

        let unknown = self.unknown_keys(&merged)?;
        if !unknown.is_empty() {
            return Err(JobBoardError::validation(unknown));
        }

        Ok(merged)
    }

    /// Keys that fail to decode on their own; all keys when only the
    /// combination fails.
    fn rejected_keys<E: Entity>(&self, base: &Map<String, Value>) -> Vec<String> {
        let rejected: Vec<String> = self
            .0
            .iter()
            .filter(|entry| decode::<E>(base, std::iter::once(*entry)).is_err())
            .map(|(key, _)| key.clone())
            .collect();

        if rejected.is_empty() {
            self.0.keys().cloned().collect()
        } else {
            rejected
        }
    }

    /// Non-null keys that did not survive a decode/encode round through the entity.
    fn unknown_keys<E: Entity>(&self, merged: &E) -> Result<Vec<String>> {
        let Value::Object(encoded) = serde_json::to_value(merged)? else {
            return Ok(Vec::new());
        };
        Ok(self
            .0
            .iter()
            .filter(|(key, value)| !value.is_null() && !encoded.contains_key(*key))
            .map(|(key, _)| key.clone())
            .collect())
    }
}

fn decode<'a, E: Entity>(
    base: &Map<String, Value>,
    fields: impl Iterator<Item = (&'a String, &'a Value)>,
) -> std::result::Result<E, serde_json::Error> {
    let mut merged = base.clone();
    for (key, value) in fields {
        merged.insert(key.clone(), value.clone());
    }
    serde_json::from_value(Value::Object(merged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Company;
    use serde_json::json;

    fn company() -> Company {
        Company {
            id: 4,
            name: "Acme".into(),
            industry: "Retail".into(),
            size: "10-50".into(),
            description: String::new(),
            logo: None,
            verified: false,
            benefits: vec![],
            open_positions: 1,
        }
    }

    #[test]
    fn replaces_only_named_fields() {
        let patch = Patch::new()
            .set("verified", json!(true))
            .set("benefits", json!(["Dental"]));
        let merged = patch.apply(&company()).unwrap();
        assert!(merged.verified);
        assert_eq!(merged.benefits, vec!["Dental".to_string()]);
        assert_eq!(merged.name, "Acme");
        assert_eq!(merged.id, 4);
    }

    #[test]
    fn identifier_is_immutable() {
        let err = Patch::new().set("Id", json!(99)).apply(&company()).unwrap_err();
        assert_eq!(err.fields(), ["Id"]);
    }

    #[test]
    fn mistyped_fields_are_named() {
        let err = Patch::new()
            .set("openPositions", json!("many"))
            .set("name", json!("Still fine"))
            .apply(&company())
            .unwrap_err();
        assert_eq!(err.fields(), ["openPositions"]);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Patch::new().set("ceo", json!("Ada")).apply(&company()).unwrap_err();
        assert_eq!(err.fields(), ["ceo"]);
    }

    #[test]
    fn null_clears_optional_fields() {
        let mut original = company();
        original.logo = Some("https://logo".into());
        let merged = Patch::new().set("logo", Value::Null).apply(&original).unwrap();
        assert_eq!(merged.logo, None);
    }

    #[test]
    fn null_under_absent_key_is_dropped() {
        let merged = Patch::new()
            .set("ceo", Value::Null)
            .set("logo", Value::Null)
            .apply(&company())
            .unwrap();
        assert_eq!(merged, company());
        let encoded = serde_json::to_value(&merged).unwrap();
        assert!(encoded.get("ceo").is_none());
    }

    #[test]
    fn from_serializable_requires_object() {
        assert!(Patch::from_serializable(&json!({"name": "x"})).is_ok());
        let err = Patch::from_serializable(&json!([1, 2])).unwrap_err();
        assert_eq!(err.fields(), ["patch"]);
    }
}
