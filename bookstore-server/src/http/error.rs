//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Underlying database causes are logged, never returned to the client;
//! the one exception is /health, which reports its cause inline (see
//! routes::health).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: i32 },

    /// Pool exhausted or store unreachable (503, logged)
    Unavailable { cause: String },

    /// Any other database failure (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} {} not found", resource, id)
                }),
            ),
            Self::Unavailable { cause } => {
                tracing::error!("Service unavailable: {}", cause);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    json!({
                        "error": "service_unavailable",
                        "message": "database unavailable"
                    }),
                )
            }
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Sqlx(err @ (sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed)) => {
                Self::Unavailable {
                    cause: err.to_string(),
                }
            }
            other => Self::Database(other),
        }
    }
}
