//! Startup: secrets, credentials and store construction.
//!
//! Any failure here aborts the process before it listens.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::{info, instrument};

use people_core::{
    DocumentStore, Schema, SecretName, SecretsProvider, ServiceUrl, StoreCredentials,
};
use people_file::{FileDocumentStore, FileSecretsProvider};
use people_http::{HttpDocumentStore, HttpSecretsProvider};

use crate::api::AppState;
use crate::cli::ServeArgs;

/// Build the secrets provider for a URL.
pub fn secrets_provider(
    url: &ServiceUrl,
    token: Option<&str>,
) -> Result<Box<dyn SecretsProvider>> {
    if url.is_local() {
        let path = url
            .to_file_path()
            .context("Failed to convert file:// URL to path")?;
        Ok(Box::new(FileSecretsProvider::new(path)))
    } else {
        let provider =
            HttpSecretsProvider::new(url.clone(), token).context("Invalid secrets provider")?;
        Ok(Box::new(provider))
    }
}

/// Fetch and parse the store credentials secret.
#[instrument(skip(provider))]
pub async fn fetch_credentials(
    provider: &dyn SecretsProvider,
    name: &SecretName,
) -> Result<StoreCredentials> {
    let payload = provider
        .latest(name)
        .await
        .with_context(|| format!("Failed to fetch secret '{}'", name))?;

    let credentials = StoreCredentials::from_secret(payload.as_bytes())
        .with_context(|| format!("Secret '{}' does not hold store credentials", name))?;

    info!(
        project = credentials.project_id(),
        client = credentials.client_email().unwrap_or("-"),
        "Loaded store credentials"
    );
    Ok(credentials)
}

/// Build the document store described by the arguments.
///
/// A `file://` store needs no credentials, but if a secrets provider is
/// configured the credential secret is still fetched so a broken secret
/// fails locally too. A network store requires a secrets provider.
pub async fn document_store(args: &ServeArgs) -> Result<Arc<dyn DocumentStore>> {
    let credentials = match &args.secrets {
        Some(url) => {
            let provider = secrets_provider(url, args.secrets_token.as_deref())?;
            Some(fetch_credentials(provider.as_ref(), &args.credentials_secret).await?)
        }
        None => None,
    };

    if args.store.is_local() {
        let path = args
            .store
            .to_file_path()
            .context("Failed to convert file:// URL to path")?;
        let store = FileDocumentStore::new(&path, &args.collection)
            .context("Invalid collection")?;
        info!(path = %path.display(), collection = %args.collection, "Using file store");
        return Ok(Arc::new(store));
    }

    let Some(credentials) = credentials else {
        bail!("A network store ({}) requires --secrets", args.store);
    };

    let store = HttpDocumentStore::new(args.store.clone(), &credentials, &args.collection)
        .context("Invalid document store")?;
    info!(store = %args.store, collection = %args.collection, "Using network store");
    Ok(Arc::new(store))
}

/// Build the shared request state.
pub async fn app_state(args: &ServeArgs) -> Result<AppState> {
    let store = document_store(args).await?;
    let schema = Schema::new(args.schema_generation.into());
    info!(generation = %schema.generation(), "Schema ready");

    Ok(AppState::new(store, schema))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::GenerationArg;
    use tempfile::TempDir;

    fn file_url(dir: &std::path::Path) -> ServiceUrl {
        ServiceUrl::new(url::Url::from_directory_path(dir).unwrap().as_str()).unwrap()
    }

    fn args(store: ServiceUrl, secrets: Option<ServiceUrl>) -> ServeArgs {
        ServeArgs {
            listen: "127.0.0.1:0".parse().unwrap(),
            store,
            collection: "persons".to_string(),
            secrets,
            credentials_secret: SecretName::new("people-store-credentials").unwrap(),
            secrets_token: None,
            schema_generation: GenerationArg::Crud,
        }
    }

    #[tokio::test]
    async fn file_store_without_secrets() {
        let dir = TempDir::new().unwrap();
        let store = document_store(&args(file_url(dir.path()), None))
            .await
            .unwrap();
        assert_eq!(store.collection(), "persons");
    }

    #[tokio::test]
    async fn network_store_requires_secrets() {
        let store = ServiceUrl::new("https://docs.example.com").unwrap();
        let err = document_store(&args(store, None)).await.err().unwrap();
        assert!(err.to_string().contains("--secrets"));
    }

    #[tokio::test]
    async fn missing_secret_aborts() {
        let dir = TempDir::new().unwrap();
        let url = file_url(dir.path());
        let result = document_store(&args(url.clone(), Some(url))).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn malformed_secret_aborts() {
        let dir = TempDir::new().unwrap();
        let url = file_url(dir.path());
        FileSecretsProvider::new(dir.path())
            .add_version(&SecretName::new("people-store-credentials").unwrap(), b"nope")
            .unwrap();

        let result = document_store(&args(url.clone(), Some(url))).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn credentials_from_file_secrets() {
        let dir = TempDir::new().unwrap();
        let name = SecretName::new("people-store-credentials").unwrap();
        let provider = FileSecretsProvider::new(dir.path());
        provider
            .add_version(&name, br#"{"projectId": "p", "accessToken": "t"}"#)
            .unwrap();

        let credentials = fetch_credentials(&provider, &name).await.unwrap();
        assert_eq!(credentials.project_id(), "p");

        let url = file_url(dir.path());
        assert!(document_store(&args(url.clone(), Some(url))).await.is_ok());
    }
}
