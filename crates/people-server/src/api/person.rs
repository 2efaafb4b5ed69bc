//! Single-record resource: `/people/{id}`.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

use people_core::{NationalId, PersonRecord};

use super::request::json_body;
use super::{ApiError, AppState};

/// An id that is not a valid store key cannot name an existing record.
fn lookup_id(raw: &str) -> Result<NationalId, ApiError> {
    NationalId::new(raw).map_err(|_| ApiError::NotFound)
}

/// GET: the stored record, or 404.
#[instrument(skip(state))]
pub async fn fetch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = lookup_id(&id)?;

    match state.store.get(&id).await? {
        Some(document) => Ok(Json(document.into_value())),
        None => Err(ApiError::NotFound),
    }
}

/// PUT: overwrite the fields present in the payload of an existing record.
///
/// The path id is stamped into `nationalId` before validation, so the
/// payload can never move a record to another id.
#[instrument(skip(state, headers, body))]
pub async fn replace(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PersonRecord>, ApiError> {
    let payload = json_body(&headers, &body)?;
    let id = NationalId::new(id).map_err(|e| {
        debug!(error = %e, "rejecting unusable id");
        ApiError::BadRequest
    })?;

    let person = state.schema.validate_with_id(&payload, &id).map_err(|e| {
        debug!(error = %e, "rejecting payload");
        ApiError::BadRequest
    })?;

    if state.store.get(&id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    state.store.update(&id, &person.to_document()).await?;
    debug!(%id, "replaced record");

    Ok(Json(person))
}

/// DELETE: remove an existing record permanently.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = lookup_id(&id)?;

    if state.store.get(&id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    state.store.delete(&id).await?;
    debug!(%id, "removed record");

    Ok(StatusCode::OK)
}
