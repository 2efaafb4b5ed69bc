//! Document store credentials.

use std::fmt;

use serde::Deserialize;

use crate::error::{AuthError, Error};

/// Credentials for the network document store, as delivered by the secrets
/// provider.
///
/// The secret payload is a JSON object:
///
/// ```json
/// {"projectId": "people-ae72e", "accessToken": "…", "clientEmail": "svc@…"}
/// ```
///
/// # Security
///
/// The access token is never exposed in Debug output.
///
/// # Example
///
/// ```
/// use people_core::StoreCredentials;
///
/// let creds = StoreCredentials::from_secret(
///     br#"{"projectId": "people", "accessToken": "t0k3n"}"#,
/// ).unwrap();
/// assert_eq!(creds.project_id(), "people");
/// assert!(!format!("{:?}", creds).contains("t0k3n"));
/// ```
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreCredentials {
    project_id: String,
    access_token: String,
    #[serde(default)]
    client_email: Option<String>,
}

impl StoreCredentials {
    /// Create credentials directly.
    pub fn new(project_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            access_token: access_token.into(),
            client_email: None,
        }
    }

    /// Parse credentials from raw secret bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedCredentials`] if the bytes are not the
    /// expected JSON object or a field is empty.
    pub fn from_secret(bytes: &[u8]) -> Result<Self, Error> {
        let creds: StoreCredentials =
            serde_json::from_slice(bytes).map_err(|e| AuthError::MalformedCredentials {
                reason: e.to_string(),
            })?;

        if creds.project_id.is_empty() {
            return Err(AuthError::MalformedCredentials {
                reason: "projectId is empty".to_string(),
            }
            .into());
        }
        if creds.access_token.is_empty() {
            return Err(AuthError::MalformedCredentials {
                reason: "accessToken is empty".to_string(),
            }
            .into());
        }

        Ok(creds)
    }

    /// Returns the project the store is scoped to.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Returns the service account identity, if the secret named one.
    pub fn client_email(&self) -> Option<&str> {
        self.client_email.as_deref()
    }

    /// Returns the bearer token.
    ///
    /// # Security
    ///
    /// Use only when constructing authorization headers.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreCredentials")
            .field("project_id", &self.project_id)
            .field("access_token", &"[REDACTED]")
            .field("client_email", &self.client_email)
            .finish()
    }
}
