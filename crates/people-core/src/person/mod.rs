//! The person record: its canonical type and the schema that produces it.

mod record;
mod schema;

pub use record::PersonRecord;
pub use schema::{FieldKind, FieldSpec, PERSON_FIELDS, Schema, SchemaGeneration};

/// Wire name of the national id field.
pub const NATIONAL_ID: &str = "nationalId";
/// Wire name of the first name field.
pub const NAME: &str = "name";
/// Wire name of the last name field.
pub const LAST_NAME: &str = "lastName";
/// Wire name of the age field.
pub const AGE: &str = "age";
/// Wire name of the origin planet field.
pub const ORIGIN_PLANET: &str = "originPlanet";
/// Wire name of the picture URL field.
pub const PICTURE_URL: &str = "pictureUrl";
