//! HTTP client shared by the REST backends.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, Url};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use people_core::error::{AuthError, Error, InvalidInputError, ProtocolError, TransportError};
use people_core::types::ServiceUrl;

use crate::wire::ErrorResponse;

fn map_reqwest(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

/// JSON-over-HTTP client bound to one service base URL.
///
/// Requests are sent once; there is no retry.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base: ServiceUrl,
    headers: HeaderMap,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Create a client for `base`, sending `token` as a bearer token if given.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not a network URL, the token contains
    /// characters not allowed in a header, or the TLS backend fails to start.
    pub fn new(base: ServiceUrl, token: Option<&str>) -> Result<Self, Error> {
        if !base.is_network() {
            return Err(InvalidInputError::ServiceUrl {
                value: base.to_string(),
                reason: "expected an http(s) URL".to_string(),
            }
            .into());
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                AuthError::MalformedCredentials {
                    reason: "token contains invalid header characters".to_string(),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("people/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(map_reqwest)?;

        Ok(Self {
            client,
            base,
            headers,
        })
    }

    /// Returns the service base URL.
    pub fn base(&self) -> &ServiceUrl {
        &self.base
    }

    /// Build an endpoint URL from path segments, percent-encoding each one.
    pub fn url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, Error> {
        let mut url = self.base.as_url().clone();
        url.path_segments_mut()
            .map_err(|_| {
                Error::InvalidInput(InvalidInputError::ServiceUrl {
                    value: self.base.to_string(),
                    reason: "cannot be a base URL".to_string(),
                })
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a JSON resource.
    #[instrument(skip_all, fields(%url))]
    pub async fn get<Q, R>(&self, url: Url, query: &Q) -> Result<R, Error>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        debug!("GET");
        trace!(?query, "query parameters");

        let response = self
            .client
            .get(url)
            .query(query)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(map_reqwest)?;

        self.handle_response(response).await
    }

    /// Send a JSON body with `method`, ignoring any response body.
    #[instrument(skip_all, fields(%method, %url))]
    pub async fn send_json<B>(&self, method: Method, url: Url, body: &B) -> Result<(), Error>
    where
        B: Serialize,
    {
        debug!("sending JSON body");

        let response = self
            .client
            .request(method, url)
            .json(body)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(map_reqwest)?;

        self.handle_empty_response(response).await
    }

    /// DELETE a resource.
    #[instrument(skip_all, fields(%url))]
    pub async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE");

        let response = self
            .client
            .delete(url)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(map_reqwest)?;

        self.handle_empty_response(response).await
    }

    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            response.json::<R>().await.map_err(map_reqwest)
        } else {
            Err(self.parse_error_response(response).await)
        }
    }

    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), Error> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error_response(response).await)
        }
    }

    async fn parse_error_response(&self, response: reqwest::Response) -> Error {
        let status = response.status().as_u16();

        let error = match response.json::<ErrorResponse>().await {
            Ok(body) => ProtocolError::new(status, body.error, body.message),
            Err(_) => ProtocolError::new(status, None, None),
        };

        if error.is_auth_error() {
            debug!(%error, "credentials rejected");
            return Error::Auth(AuthError::Rejected);
        }

        Error::Protocol(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_segments_are_encoded() {
        let base = ServiceUrl::new("https://docs.example.com/api/").unwrap();
        let client = HttpClient::new(base, None).unwrap();

        let url = client
            .url(["v1", "documents", "0012 445/98"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://docs.example.com/api/v1/documents/0012%20445%2F98"
        );
    }

    #[test]
    fn file_url_is_rejected() {
        let base = ServiceUrl::new("file:///tmp/people").unwrap();
        assert!(HttpClient::new(base, None).is_err());
    }

    #[test]
    fn bad_token_is_rejected() {
        let base = ServiceUrl::new("https://docs.example.com").unwrap();
        assert!(HttpClient::new(base, Some("bad\ntoken")).is_err());
    }
}
