//! people-http - REST-backed document store and secrets provider.

mod client;
mod secrets;
mod store;
mod wire;

pub use client::HttpClient;
pub use secrets::HttpSecretsProvider;
pub use store::HttpDocumentStore;
