//! Error types for the person record service.
//!
//! A single error type with explicit variants for transport, authentication,
//! protocol, input and schema validation failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for store, secrets and validation operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport errors (network, filesystem I/O).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Credential errors (missing, malformed or rejected credentials).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Non-success responses from a remote service.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Malformed identifiers, URLs or stored documents.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// A payload rejected by the person schema.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The addressed document does not exist.
    #[error("document '{id}' not found")]
    NotFound { id: String },
}

impl Error {
    /// Returns true if this error means the addressed document is absent.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound { .. } => true,
            Error::Protocol(err) => err.status == 404,
            _ => false,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// Local filesystem error.
    #[error("IO error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io {
            message: err.to_string(),
        }
    }
}

/// Credential errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The credential secret could not be parsed.
    #[error("malformed credentials: {reason}")]
    MalformedCredentials { reason: String },

    /// A remote service rejected the credentials.
    #[error("credentials rejected")]
    Rejected,
}

/// A non-success response from a remote service.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error code (if present).
    pub error: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

/// Input errors for identifiers, URLs and stored data.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid national id (record key).
    #[error("invalid national id '{value}': {reason}")]
    NationalId { value: String, reason: String },

    /// Invalid service URL.
    #[error("invalid service URL '{value}': {reason}")]
    ServiceUrl { value: String, reason: String },

    /// Invalid secret name.
    #[error("invalid secret name '{value}': {reason}")]
    SecretName { value: String, reason: String },

    /// A value that is not a JSON object where a document is required.
    #[error("invalid document: {reason}")]
    Document { reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

/// Reasons a payload fails the person schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The payload is not a JSON object.
    #[error("payload must be a JSON object")]
    NotAnObject,

    /// A field the schema does not recognize.
    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    /// A required field is absent.
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    /// A field has the wrong JSON type.
    #[error("field '{field}' must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    /// A key field holds text that cannot be used as a record key.
    #[error("field '{field}' is not a usable record key")]
    InvalidKey { field: &'static str },

    /// A text field is empty.
    #[error("field '{field}' must not be empty")]
    EmptyText { field: &'static str },

    /// An integer field is outside its inclusive range.
    #[error("field '{field}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}
