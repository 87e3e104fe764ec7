//! HTTP routes. Everything but `/health` and `/metrics` is handed to the path
//! grammar.

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    routing::get,
    Json, Router,
};
use prometheus::{Encoder, TextEncoder};
use tracing::{info_span, Instrument};

use query_engine_execution::geojson::GeoJson;

use crate::error::ServerError;
use crate::handler;
use crate::state::ServerState;

pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/metrics", get(get_metrics))
        .fallback(serve_path)
        .with_state(state)
}

async fn get_health() -> StatusCode {
    StatusCode::OK
}

async fn get_metrics(State(state): State<ServerState>) -> Result<String, ServerError> {
    let encoder = TextEncoder::new();
    let mut buffer = vec![];
    encoder
        .encode(&state.metrics_registry.gather(), &mut buffer)
        .map_err(|err| ServerError::Internal(err.to_string()))?;
    String::from_utf8(buffer).map_err(|err| ServerError::Internal(err.to_string()))
}

async fn serve_path(
    State(state): State<ServerState>,
    method: Method,
    uri: Uri,
    body: String,
) -> Result<Json<GeoJson>, ServerError> {
    let result = handler::handle(&state, method.as_str(), uri.path(), &body)
        .instrument(info_span!("Handle request", %method, path = uri.path()))
        .await;

    if let Some(kind) = result.as_ref().err().and_then(ServerError::kind) {
        state.metrics.record_error(kind);
    }
    result.map(Json)
}
