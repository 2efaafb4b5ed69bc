//! Collection resource: `/people`.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use futures_util::TryStreamExt;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use people_core::{Document, PersonRecord, SchemaGeneration};

use super::request::json_body;
use super::{ApiError, AppState};

/// GET: every stored record, in store order.
#[instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Value>>, ApiError> {
    let documents: Vec<Document> = state.store.stream_all().try_collect().await?;
    debug!(count = documents.len(), "listed records");

    Ok(Json(documents.into_iter().map(Document::into_value).collect()))
}

/// POST: validate and store a new record under its `nationalId`.
///
/// In the echo generation the validated record is returned without being
/// stored and without the existence check.
#[instrument(skip(state, headers, body))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<PersonRecord>), ApiError> {
    let payload = json_body(&headers, &body)?;
    let person = state.schema.validate(&payload).map_err(|e| {
        debug!(error = %e, "rejecting payload");
        ApiError::BadRequest
    })?;

    if state.schema.generation() == SchemaGeneration::Echo {
        return Ok((StatusCode::CREATED, Json(person)));
    }

    let id = &person.national_id;
    // Not atomic with the write below; concurrent creates of one id can both pass.
    if state.store.get(id).await?.is_some() {
        warn!(%id, "record already exists");
        return Err(ApiError::Conflict);
    }

    state.store.set(id, &person.to_document()).await?;
    debug!(%id, "created record");

    Ok((StatusCode::CREATED, Json(person)))
}
