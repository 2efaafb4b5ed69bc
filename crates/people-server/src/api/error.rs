//! Mapping of request failures to HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

/// A failed request. Every variant renders as a bare status with an empty
/// body; clients cannot tell a bad header from a bad payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// Missing/incorrect Content-Type, unparsable JSON, or a payload the
    /// schema rejects.
    BadRequest,
    /// The addressed record does not exist.
    NotFound,
    /// A create for an id that already exists.
    Conflict,
    /// The store failed.
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            // Duplicate creates answer 500, not 409.
            ApiError::Conflict => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.status().into_response()
    }
}

impl From<people_core::Error> for ApiError {
    fn from(err: people_core::Error) -> Self {
        if err.is_not_found() {
            return ApiError::NotFound;
        }
        error!(error = %err, "store request failed");
        ApiError::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_is_server_error() {
        assert_eq!(ApiError::Conflict.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::BadRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_errors_map_to_status() {
        let err = people_core::Error::NotFound {
            id: "1".to_string(),
        };
        assert_eq!(ApiError::from(err), ApiError::NotFound);

        let err = people_core::Error::Transport(people_core::error::TransportError::Timeout);
        assert_eq!(ApiError::from(err), ApiError::Internal);
    }
}
