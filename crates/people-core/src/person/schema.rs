//! Declarative person schema and the routine that interprets it.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::{Error, InvalidInputError, ValidationError};
use crate::types::NationalId;

use super::{AGE, LAST_NAME, NAME, NATIONAL_ID, ORIGIN_PLANET, PICTURE_URL, PersonRecord};

/// Which revision of the person contract is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaGeneration {
    /// Full create/read/update/delete. Only `nationalId` is required and a
    /// duplicate create is refused.
    #[default]
    Crud,
    /// Final revision: `name` and `lastName` are also required, create only
    /// validates and echoes, and update/delete are not offered.
    Echo,
}

impl SchemaGeneration {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaGeneration::Crud => "crud",
            SchemaGeneration::Echo => "echo",
        }
    }
}

impl fmt::Display for SchemaGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaGeneration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crud" => Ok(SchemaGeneration::Crud),
            "echo" => Ok(SchemaGeneration::Echo),
            other => Err(InvalidInputError::Other {
                message: format!("unknown schema generation '{}'", other),
            }
            .into()),
        }
    }
}

/// Type and refinement of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-empty string usable as a [`NationalId`].
    Key,
    /// Non-empty string.
    Text,
    /// Integer within an inclusive range; numeric strings are coerced.
    Integer { min: i64, max: i64 },
}

/// One entry of the declarative schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Generations in which the field must be present.
    pub required_in: &'static [SchemaGeneration],
}

impl FieldSpec {
    fn is_required(&self, generation: SchemaGeneration) -> bool {
        self.required_in.contains(&generation)
    }
}

const ALL: &[SchemaGeneration] = &[SchemaGeneration::Crud, SchemaGeneration::Echo];
const ECHO_ONLY: &[SchemaGeneration] = &[SchemaGeneration::Echo];

/// The person record schema.
pub const PERSON_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: NATIONAL_ID,
        kind: FieldKind::Key,
        required_in: ALL,
    },
    FieldSpec {
        name: NAME,
        kind: FieldKind::Text,
        required_in: ECHO_ONLY,
    },
    FieldSpec {
        name: LAST_NAME,
        kind: FieldKind::Text,
        required_in: ECHO_ONLY,
    },
    FieldSpec {
        name: AGE,
        kind: FieldKind::Integer { min: 1, max: 99 },
        required_in: &[],
    },
    FieldSpec {
        name: ORIGIN_PLANET,
        kind: FieldKind::Text,
        required_in: &[],
    },
    FieldSpec {
        name: PICTURE_URL,
        kind: FieldKind::Text,
        required_in: &[],
    },
];

/// Validator for incoming person payloads.
///
/// The schema is closed: unrecognized fields are rejected. Validation has no
/// side effects and is safe to share across requests.
///
/// # Example
///
/// ```
/// use people_core::{Schema, SchemaGeneration};
/// use serde_json::json;
///
/// let schema = Schema::new(SchemaGeneration::Crud);
/// let person = schema.validate(&json!({"nationalId": "1", "age": "42"})).unwrap();
/// assert_eq!(person.age, Some(42));
///
/// assert!(schema.validate(&json!({"nationalId": "1", "age": 150})).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    generation: SchemaGeneration,
    fields: &'static [FieldSpec],
}

impl Schema {
    /// Create the person schema for a generation.
    pub fn new(generation: SchemaGeneration) -> Self {
        Self {
            generation,
            fields: PERSON_FIELDS,
        }
    }

    /// Returns the generation this schema enforces.
    pub fn generation(&self) -> SchemaGeneration {
        self.generation
    }

    /// Validate a payload and produce its canonical record.
    pub fn validate(&self, payload: &Value) -> Result<PersonRecord, ValidationError> {
        let normalized = self.normalize(payload)?;
        assemble(normalized)
    }

    /// Validate a payload after stamping `id` into its `nationalId` field,
    /// overriding any value the caller supplied.
    pub fn validate_with_id(
        &self,
        payload: &Value,
        id: &NationalId,
    ) -> Result<PersonRecord, ValidationError> {
        let mut payload = payload.clone();
        if let Some(obj) = payload.as_object_mut() {
            obj.insert(NATIONAL_ID.to_string(), Value::String(id.to_string()));
        }
        self.validate(&payload)
    }

    /// Check every field against the table and return the coerced mapping.
    fn normalize(&self, payload: &Value) -> Result<Map<String, Value>, ValidationError> {
        let obj = payload.as_object().ok_or(ValidationError::NotAnObject)?;

        if let Some(unknown) = obj
            .keys()
            .find(|key| !self.fields.iter().any(|spec| spec.name == key.as_str()))
        {
            return Err(ValidationError::UnknownField {
                field: unknown.clone(),
            });
        }

        let mut normalized = Map::new();
        for spec in self.fields {
            match obj.get(spec.name) {
                Some(value) => {
                    normalized.insert(spec.name.to_string(), coerce(spec, value)?);
                }
                None if spec.is_required(self.generation) => {
                    return Err(ValidationError::MissingField { field: spec.name });
                }
                None => {}
            }
        }

        Ok(normalized)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new(SchemaGeneration::default())
    }
}

fn coerce(spec: &FieldSpec, value: &Value) -> Result<Value, ValidationError> {
    match spec.kind {
        FieldKind::Key => {
            let text = non_empty_text(spec.name, value)?;
            NationalId::new(text)
                .map_err(|_| ValidationError::InvalidKey { field: spec.name })?;
            Ok(Value::String(text.to_string()))
        }
        FieldKind::Text => Ok(Value::String(non_empty_text(spec.name, value)?.to_string())),
        FieldKind::Integer { min, max } => {
            let n = integer(spec.name, value)?;
            if n < min || n > max {
                return Err(ValidationError::OutOfRange {
                    field: spec.name,
                    value: n,
                    min,
                    max,
                });
            }
            Ok(Value::from(n))
        }
    }
}

fn non_empty_text<'a>(field: &'static str, value: &'a Value) -> Result<&'a str, ValidationError> {
    let text = value.as_str().ok_or(ValidationError::WrongType {
        field,
        expected: "a string",
    })?;
    if text.is_empty() {
        return Err(ValidationError::EmptyText { field });
    }
    Ok(text)
}

fn integer(field: &'static str, value: &Value) -> Result<i64, ValidationError> {
    let wrong_type = ValidationError::WrongType {
        field,
        expected: "an integer",
    };

    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            // u64 beyond i64::MAX or a float; only whole floats coerce.
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
                    Ok(f as i64)
                }
                _ => Err(wrong_type),
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| wrong_type),
        _ => Err(wrong_type),
    }
}

/// Build the typed record from a mapping that already passed `normalize`.
fn assemble(mut fields: Map<String, Value>) -> Result<PersonRecord, ValidationError> {
    let mut text = |key: &str| match fields.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    };

    let national_id = text(NATIONAL_ID);
    let name = text(NAME);
    let last_name = text(LAST_NAME);
    let origin_planet = text(ORIGIN_PLANET);
    let picture_url = text(PICTURE_URL);
    let age = fields
        .remove(AGE)
        .and_then(|v| v.as_u64())
        .and_then(|v| u8::try_from(v).ok());

    let national_id = national_id
        .and_then(|id| NationalId::new(id).ok())
        .ok_or(ValidationError::MissingField { field: NATIONAL_ID })?;

    Ok(PersonRecord {
        national_id,
        name,
        last_name,
        age,
        origin_planet,
        picture_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn crud() -> Schema {
        Schema::new(SchemaGeneration::Crud)
    }

    fn echo() -> Schema {
        Schema::new(SchemaGeneration::Echo)
    }

    #[test]
    fn full_payload_is_canonicalized() {
        let payload = json!({
            "nationalId": "1",
            "name": "Ann",
            "lastName": "Lee",
            "age": 33,
            "originPlanet": "Earth",
            "pictureUrl": "https://example.com/ann.png"
        });

        let person = crud().validate(&payload).unwrap();
        assert_eq!(serde_json::to_value(&person).unwrap(), payload);
    }

    #[test]
    fn output_contains_only_present_fields() {
        let person = crud()
            .validate(&json!({"nationalId": "7", "originPlanet": "Mars"}))
            .unwrap();
        assert_eq!(
            person.to_document().into_value(),
            json!({"nationalId": "7", "originPlanet": "Mars"})
        );
    }

    #[test]
    fn numeric_string_age_is_coerced() {
        let person = crud()
            .validate(&json!({"nationalId": "1", "age": "42"}))
            .unwrap();
        assert_eq!(person.age, Some(42));

        let person = crud()
            .validate(&json!({"nationalId": "1", "age": 42.0}))
            .unwrap();
        assert_eq!(person.age, Some(42));
    }

    #[test]
    fn age_bounds_are_inclusive() {
        assert!(crud().validate(&json!({"nationalId": "1", "age": 1})).is_ok());
        assert!(crud().validate(&json!({"nationalId": "1", "age": 99})).is_ok());

        for age in [json!(0), json!(100), json!(150), json!(-3), json!("150")] {
            let err = crud()
                .validate(&json!({"nationalId": "1", "age": age}))
                .unwrap_err();
            assert!(matches!(err, ValidationError::OutOfRange { field: "age", .. }));
        }
    }

    #[test]
    fn age_of_wrong_type_is_rejected() {
        for age in [json!(true), json!(null), json!(4.5), json!("forty"), json!([1])] {
            let err = crud()
                .validate(&json!({"nationalId": "1", "age": age}))
                .unwrap_err();
            assert_eq!(
                err,
                ValidationError::WrongType {
                    field: "age",
                    expected: "an integer"
                }
            );
        }
    }

    #[test]
    fn missing_national_id_is_rejected() {
        let err = crud().validate(&json!({"name": "Ann"})).unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "nationalId" });
    }

    #[test]
    fn names_required_only_in_echo_generation() {
        let payload = json!({"nationalId": "1", "name": "X"});
        assert!(crud().validate(&payload).is_ok());
        assert_eq!(
            echo().validate(&payload).unwrap_err(),
            ValidationError::MissingField { field: "lastName" }
        );

        let payload = json!({"nationalId": "1", "name": "Ann", "lastName": "Lee"});
        assert!(echo().validate(&payload).is_ok());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = crud()
            .validate(&json!({"nationalId": "1", "height": 180}))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownField {
                field: "height".to_string()
            }
        );
    }

    #[test]
    fn empty_and_non_string_text_is_rejected() {
        assert_eq!(
            crud()
                .validate(&json!({"nationalId": "1", "name": ""}))
                .unwrap_err(),
            ValidationError::EmptyText { field: "name" }
        );
        assert_eq!(
            crud()
                .validate(&json!({"nationalId": "", "name": "Ann"}))
                .unwrap_err(),
            ValidationError::EmptyText { field: "nationalId" }
        );
        assert!(matches!(
            crud()
                .validate(&json!({"nationalId": 12}))
                .unwrap_err(),
            ValidationError::WrongType { field: "nationalId", .. }
        ));
        assert!(matches!(
            crud()
                .validate(&json!({"nationalId": "1", "pictureUrl": null}))
                .unwrap_err(),
            ValidationError::WrongType { field: "pictureUrl", .. }
        ));
    }

    #[test]
    fn unusable_key_is_rejected() {
        assert_eq!(
            crud().validate(&json!({"nationalId": "a/b"})).unwrap_err(),
            ValidationError::InvalidKey { field: "nationalId" }
        );
    }

    #[test]
    fn non_object_payload_is_rejected() {
        for payload in [json!([]), json!("person"), json!(null), json!(3)] {
            assert_eq!(
                crud().validate(&payload).unwrap_err(),
                ValidationError::NotAnObject
            );
        }
    }

    #[test]
    fn path_id_overrides_payload_id() {
        let id = NationalId::new("A123").unwrap();
        let person = crud()
            .validate_with_id(&json!({"nationalId": "B999", "name": "X"}), &id)
            .unwrap();
        assert_eq!(person.national_id, id);
        assert_eq!(person.name.as_deref(), Some("X"));
    }

    #[test]
    fn path_id_satisfies_required_national_id() {
        let id = NationalId::new("1").unwrap();
        let err = crud()
            .validate_with_id(&json!({"age": 150}), &id)
            .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));

        assert!(crud().validate_with_id(&json!({}), &id).is_ok());
    }

    #[test]
    fn generation_parses() {
        assert_eq!("crud".parse::<SchemaGeneration>().unwrap(), SchemaGeneration::Crud);
        assert_eq!("echo".parse::<SchemaGeneration>().unwrap(), SchemaGeneration::Echo);
        assert!("v2".parse::<SchemaGeneration>().is_err());
    }
}
