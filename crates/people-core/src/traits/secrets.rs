//! Secrets provider trait.

use std::fmt;

use async_trait::async_trait;

use crate::Result;
use crate::types::SecretName;

/// Raw bytes of a secret version.
///
/// The content is never exposed in Debug output.
#[derive(Clone)]
pub struct SecretPayload(Vec<u8>);

impl SecretPayload {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Returns the secret bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretPayload")
            .field(&format_args!("[{} bytes REDACTED]", self.0.len()))
            .finish()
    }
}

/// A service that stores and serves versioned secrets.
#[async_trait]
pub trait SecretsProvider: Send + Sync {
    /// Fetch the latest version of the named secret.
    async fn latest(&self, name: &SecretName) -> Result<SecretPayload>;
}
