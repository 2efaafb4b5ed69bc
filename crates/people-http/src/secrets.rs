//! REST-backed secrets provider.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, instrument};

use people_core::error::{Error, InvalidInputError};
use people_core::traits::{SecretPayload, SecretsProvider};
use people_core::types::{SecretName, ServiceUrl};
use people_core::Result;

use crate::client::HttpClient;
use crate::wire::AccessSecretVersionResponse;

/// A secrets provider reached over its REST API.
///
/// The latest version of a secret is read from
/// `{base}/v1/secrets/{name}/versions/latest:access`, whose payload data is
/// base64-encoded.
#[derive(Debug, Clone)]
pub struct HttpSecretsProvider {
    client: HttpClient,
}

impl HttpSecretsProvider {
    /// Create a provider for `base`, sending `token` as a bearer token if given.
    pub fn new(base: ServiceUrl, token: Option<&str>) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(base, token)?,
        })
    }
}

#[async_trait]
impl SecretsProvider for HttpSecretsProvider {
    #[instrument(skip(self))]
    async fn latest(&self, name: &SecretName) -> Result<SecretPayload> {
        let url = self
            .client
            .url(["v1", "secrets", name.as_str(), "versions", "latest:access"])?;

        let response: AccessSecretVersionResponse = self.client.get(url, &()).await?;

        let bytes = STANDARD.decode(response.payload.data.as_bytes()).map_err(|e| {
            Error::InvalidInput(InvalidInputError::Other {
                message: format!("secret payload is not valid base64: {}", e),
            })
        })?;

        debug!(%name, len = bytes.len(), "Fetched secret");
        Ok(SecretPayload::new(bytes))
    }
}
