//! Canonical person record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Document;
use crate::types::NationalId;

use super::{AGE, LAST_NAME, NAME, NATIONAL_ID, ORIGIN_PLANET, PICTURE_URL};

/// A person record in canonical form: only recognized fields, coerced types.
///
/// Produced by [`Schema::validate`](super::Schema::validate). Absent
/// optional fields are omitted from the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersonRecord {
    /// Unique id; also the key the record is stored under.
    pub national_id: NationalId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Age in years, 1..=99.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_planet: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
}

impl PersonRecord {
    /// Create a record carrying only a national id.
    pub fn new(national_id: NationalId) -> Self {
        Self {
            national_id,
            name: None,
            last_name: None,
            age: None,
            origin_planet: None,
            picture_url: None,
        }
    }

    /// Convert into the document written to the store.
    pub fn to_document(&self) -> Document {
        let mut fields = Map::new();
        fields.insert(
            NATIONAL_ID.to_string(),
            Value::String(self.national_id.to_string()),
        );

        let texts = [
            (NAME, &self.name),
            (LAST_NAME, &self.last_name),
            (ORIGIN_PLANET, &self.origin_planet),
            (PICTURE_URL, &self.picture_url),
        ];
        for (key, value) in texts {
            if let Some(value) = value {
                fields.insert(key.to_string(), Value::String(value.clone()));
            }
        }

        if let Some(age) = self.age {
            fields.insert(AGE.to_string(), Value::from(age));
        }

        Document::from_fields(fields)
    }
}
