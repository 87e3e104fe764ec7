//! Errors returned to HTTP clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use query_engine_execution::error as execution;
use query_engine_translation::translation::error as translation;

#[derive(Debug)]
pub enum ServerError {
    /// The request is malformed or cannot be translated.
    BadRequest(String),
    /// The table does not exist.
    NotFound(String),
    /// The statement ran, but no row matches the requested id.
    NoRows(String),
    /// The database rejected the statement or could not be reached.
    DatabaseError(String),
    Internal(String),
}

impl ServerError {
    /// A short name for the kind of failure, used as a metric label. `None`
    /// for an empty result, which is not a failure.
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            ServerError::BadRequest(_) => Some("bad_request"),
            ServerError::NotFound(_) => Some("not_found"),
            ServerError::NoRows(_) => None,
            ServerError::DatabaseError(_) => Some("database"),
            ServerError::Internal(_) => Some("internal"),
        }
    }
}

#[derive(Serialize)]
struct JsonErrorResponse {
    message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::NotFound(msg) | ServerError::NoRows(msg) => {
                (StatusCode::NOT_FOUND, msg)
            }
            ServerError::DatabaseError(msg) | ServerError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        tracing::error!("Returning error: {message} with status code: {status}");
        (status, Json(JsonErrorResponse { message })).into_response()
    }
}

impl From<translation::Error> for ServerError {
    fn from(value: translation::Error) -> Self {
        ServerError::BadRequest(value.to_string())
    }
}

impl From<execution::Error> for ServerError {
    fn from(value: execution::Error) -> Self {
        match value {
            execution::Error::DB(err) => ServerError::DatabaseError(err.to_string()),
            execution::Error::TableNotFound { .. } => ServerError::NotFound(value.to_string()),
            execution::Error::InvalidGeometry(_) | execution::Error::UnexpectedResult(_) => {
                ServerError::Internal(value.to_string())
            }
        }
    }
}
