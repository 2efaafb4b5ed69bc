//! people-file - Filesystem-backed document store and secrets provider.

mod secrets;
mod store;

pub use secrets::FileSecretsProvider;
pub use store::FileDocumentStore;
