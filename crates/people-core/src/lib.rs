//! people-core - Core types, schema and traits for the person record service.

pub mod credentials;
pub mod document;
pub mod error;
pub mod person;
pub mod traits;
pub mod types;

pub use credentials::StoreCredentials;
pub use document::Document;
pub use error::Error;
pub use person::{PersonRecord, Schema, SchemaGeneration};
pub use traits::{DocumentStore, DocumentStream, SecretPayload, SecretsProvider};
pub use types::{NationalId, SecretName, ServiceUrl};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
