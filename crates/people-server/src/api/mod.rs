//! HTTP surface: routing and shared handler state.

mod error;
mod people;
mod person;
mod request;

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;

use people_core::{DocumentStore, Schema, SchemaGeneration};

pub use error::ApiError;

/// State shared by every request, fixed at startup.
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub schema: Schema,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, schema: Schema) -> Self {
        Self { store, schema }
    }
}

/// Build the router for the state's schema generation.
///
/// `/people/{id}` serves GET, PUT and DELETE in the CRUD generation and only
/// GET in the echo generation; other verbs answer 405.
pub fn router(state: AppState) -> Router {
    let record = match state.schema.generation() {
        SchemaGeneration::Crud => get(person::fetch)
            .put(person::replace)
            .delete(person::remove),
        SchemaGeneration::Echo => get(person::fetch),
    };

    Router::new()
        .route("/people", get(people::list).post(people::create))
        .route("/people/{id}", record)
        .with_state(Arc::new(state))
}

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
