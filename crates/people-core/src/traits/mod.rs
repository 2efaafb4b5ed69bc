//! Traits for the backing services: document store and secrets provider.

mod secrets;
mod store;

pub use secrets::{SecretPayload, SecretsProvider};
pub use store::{DocumentStore, DocumentStream};
