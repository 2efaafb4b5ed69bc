//! Service URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

const LOOPBACK_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "[::1]"];

/// Base URL of a backing service, the document store or the secrets
/// provider.
///
/// `file:///path` selects the filesystem backends in `people-file`.
/// `https://host[/prefix]` selects the REST backends in `people-http`;
/// plain `http` is only accepted for loopback hosts. A trailing slash on the
/// path is dropped, so `https://host/api/` and `https://host/api` are equal.
///
/// ```
/// use people_core::ServiceUrl;
///
/// let remote = ServiceUrl::new("https://docs.example.com/api/").unwrap();
/// assert_eq!(remote.to_string(), "https://docs.example.com/api");
/// assert!(remote.is_network());
///
/// assert!(ServiceUrl::new("file:///tmp/people").unwrap().is_local());
/// assert!(ServiceUrl::new("http://docs.example.com").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ServiceUrl(Url);

impl ServiceUrl {
    /// Parse and check a service URL.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInputError::ServiceUrl` for relative URLs, unsupported
    /// schemes, plain `http` to a non-loopback host, or a missing host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let reject = |reason: &str| -> Error {
            InvalidInputError::ServiceUrl {
                value: s.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        let mut url = Url::parse(s).map_err(|e| reject(&e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(reject("must be an absolute URL"));
        }

        match url.scheme() {
            "file" => {}
            "https" if url.host_str().is_some() => {}
            "http" if url.host_str().is_some_and(|h| LOOPBACK_HOSTS.contains(&h)) => {}
            "http" | "https" if url.host_str().is_none() => return Err(reject("must have a host")),
            "http" => return Err(reject("plain http is only allowed for loopback hosts")),
            _ => return Err(reject("scheme must be file, https or http")),
        }

        let trimmed = url.path().trim_end_matches('/').to_string();
        if !trimmed.is_empty() {
            url.set_path(&trimmed);
        }

        Ok(Self(url))
    }

    /// The parsed URL, for building request paths below it.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns true for `file://` URLs.
    pub fn is_local(&self) -> bool {
        self.0.scheme() == "file"
    }

    /// Returns true for `http://` and `https://` URLs.
    pub fn is_network(&self) -> bool {
        matches!(self.0.scheme(), "http" | "https")
    }

    /// Filesystem path of a `file://` URL, `None` for network URLs.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        self.is_local().then(|| self.0.to_file_path().ok()).flatten()
    }
}

impl fmt::Display for ServiceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl FromStr for ServiceUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ServiceUrl {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ServiceUrl {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}
