//! Request body checks shared by the body-bearing verbs.

use axum::body::Bytes;
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::debug;

use super::ApiError;

/// Returns true if the Content-Type declares JSON (`application/json` or an
/// `application/*+json` type, parameters ignored).
pub fn declares_json(headers: &HeaderMap) -> bool {
    let Some(media_type) = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
    else {
        return false;
    };

    let media_type = media_type.trim().to_ascii_lowercase();
    media_type == "application/json"
        || (media_type.starts_with("application/") && media_type.ends_with("+json"))
}

/// Check the Content-Type and parse the body as JSON.
pub fn json_body(headers: &HeaderMap, body: &Bytes) -> Result<Value, ApiError> {
    if !declares_json(headers) {
        debug!(content_type = ?headers.get(CONTENT_TYPE), "rejecting non-JSON content type");
        return Err(ApiError::BadRequest);
    }

    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "rejecting unparsable body");
        ApiError::BadRequest
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn json_media_types() {
        assert!(declares_json(&headers("application/json")));
        assert!(declares_json(&headers("application/json; charset=utf-8")));
        assert!(declares_json(&headers("Application/JSON")));
        assert!(declares_json(&headers("application/merge-patch+json")));
    }

    #[test]
    fn non_json_media_types() {
        assert!(!declares_json(&HeaderMap::new()));
        assert!(!declares_json(&headers("text/plain")));
        assert!(!declares_json(&headers("application/x-www-form-urlencoded")));
        assert!(!declares_json(&headers("text/json+xml")));
    }

    #[test]
    fn body_must_parse() {
        let ok = json_body(&headers("application/json"), &Bytes::from_static(b"{\"a\": 1}"));
        assert!(ok.is_ok());

        let bad = json_body(&headers("application/json"), &Bytes::from_static(b"{oops"));
        assert_eq!(bad.unwrap_err(), ApiError::BadRequest);

        let wrong_header = json_body(&headers("text/plain"), &Bytes::from_static(b"{}"));
        assert_eq!(wrong_header.unwrap_err(), ApiError::BadRequest);
    }
}
