//! Filesystem secrets provider.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use people_core::error::{Error, ProtocolError, TransportError};
use people_core::traits::{SecretPayload, SecretsProvider};
use people_core::types::SecretName;
use people_core::Result;

fn map_io(err: std::io::Error) -> Error {
    Error::Transport(TransportError::from(err))
}

/// A secrets provider backed by versioned files.
///
/// Layout: `{root}/secrets/{name}/{version}`, where each version is a file
/// named by a positive integer. The highest version is the latest.
#[derive(Debug, Clone)]
pub struct FileSecretsProvider {
    root: PathBuf,
}

impl FileSecretsProvider {
    /// Create a provider reading secrets below the given root directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn secret_dir(&self, name: &SecretName) -> PathBuf {
        self.root.join("secrets").join(name.as_str())
    }

    /// Highest version number stored for a secret, if any.
    fn latest_version(&self, name: &SecretName) -> Result<Option<u64>> {
        let entries = match fs::read_dir(self.secret_dir(name)) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(map_io(e)),
        };

        Ok(entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .filter_map(|e| e.file_name().to_str()?.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .max())
    }

    /// Store a new version of a secret and return its version number.
    #[instrument(skip(self, bytes))]
    pub fn add_version(&self, name: &SecretName, bytes: &[u8]) -> Result<u64> {
        let version = self.latest_version(name)?.unwrap_or(0) + 1;
        let dir = self.secret_dir(name);
        fs::create_dir_all(&dir).map_err(map_io)?;
        fs::write(dir.join(version.to_string()), bytes).map_err(map_io)?;

        debug!(%name, version, "Added secret version");
        Ok(version)
    }
}

#[async_trait]
impl SecretsProvider for FileSecretsProvider {
    #[instrument(skip(self))]
    async fn latest(&self, name: &SecretName) -> Result<SecretPayload> {
        let version = self.latest_version(name)?.ok_or_else(|| {
            Error::Protocol(ProtocolError::new(
                404,
                Some("SecretNotFound".to_string()),
                Some(format!("Secret {} has no versions", name)),
            ))
        })?;

        let bytes = fs::read(self.secret_dir(name).join(version.to_string())).map_err(map_io)?;
        debug!(%name, version, "Read secret");

        Ok(SecretPayload::new(bytes))
    }
}
