//! Schema-flexible document values as held by a document store.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{Error, InvalidInputError};

/// A stored document.
///
/// This type guarantees the value is a JSON object. Beyond that it is
/// schema-agnostic; the person schema is applied by the service before
/// anything is written.
///
/// # Example
///
/// ```
/// use people_core::Document;
/// use serde_json::json;
///
/// let doc = Document::new(json!({"nationalId": "1", "name": "Ann"})).unwrap();
/// assert_eq!(doc.get("name").unwrap(), "Ann");
/// assert!(Document::new(json!([1, 2])).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Create a new `Document` from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a JSON object.
    pub fn new(value: Value) -> Result<Self, Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(Error::InvalidInput(InvalidInputError::Document {
                reason: format!("expected a JSON object, got {}", json_kind(&other)),
            })),
        }
    }

    /// Create a document from an already-built field map.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Get a field from the document.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the document's fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Overwrite fields of this document with the fields of `partial`.
    ///
    /// Replacement is per top-level field; nested objects are not merged.
    pub fn merge(&mut self, partial: &Document) {
        for (key, value) in &partial.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Returns the document as a JSON value.
    pub fn as_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Consume and return the inner JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Document::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn not_object_fails() {
        assert!(Document::new(json!([1, 2, 3])).is_err());
        assert!(Document::new(json!(null)).is_err());
        assert!(Document::new(json!("string")).is_err());
    }

    #[test]
    fn merge_replaces_top_level_fields() {
        let mut doc = Document::new(json!({
            "nationalId": "1",
            "name": "Ann",
            "meta": {"a": 1, "b": 2}
        }))
        .unwrap();
        let partial = Document::new(json!({
            "name": "Anna",
            "age": 30,
            "meta": {"a": 5}
        }))
        .unwrap();

        doc.merge(&partial);

        assert_eq!(
            doc.into_value(),
            json!({
                "nationalId": "1",
                "name": "Anna",
                "age": 30,
                "meta": {"a": 5}
            })
        );
    }

    #[test]
    fn deserialize_invalid_fails() {
        assert!(serde_json::from_str::<Document>("[1]").is_err());
        let doc: Document = serde_json::from_str(r#"{"name": "Ann"}"#).unwrap();
        assert_eq!(doc.get("name").unwrap(), "Ann");
    }
}
