//! Request/response bodies of the document and secret REST APIs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Document API
// ============================================================================

/// A document as returned by the store.
#[derive(Debug, Deserialize)]
pub struct DocumentResource {
    #[allow(dead_code)]
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// Body of a write (PUT) or merge (PATCH).
#[derive(Debug, Serialize)]
pub struct WriteDocumentRequest<'a> {
    pub fields: &'a Map<String, Value>,
}

/// Query for listing documents.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsQuery<'a> {
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<&'a str>,
}

/// One page of documents.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<DocumentResource>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

// ============================================================================
// Secret API
// ============================================================================

/// Response from accessing a secret version.
#[derive(Debug, Deserialize)]
pub struct AccessSecretVersionResponse {
    #[allow(dead_code)]
    #[serde(default)]
    pub name: Option<String>,
    pub payload: SecretPayloadBody,
}

/// Base64-encoded secret bytes.
#[derive(Debug, Deserialize)]
pub struct SecretPayloadBody {
    pub data: String,
}

// ============================================================================
// Errors
// ============================================================================

/// Error body returned by either API.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}
