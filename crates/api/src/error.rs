//! HTTP error mapping for the API layer.
//!
//! Handlers return [`AppError`]; the [`IntoResponse`] impl turns every
//! variant into a JSON body of the shape `{"error": ..., "code": ...}` so
//! the admin frontend can branch on `code` without parsing messages.

use atelier_core::error::CoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Error type for HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Domain error from `atelier_core`; carries its own HTTP semantics.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Database failure. `RowNotFound` and unique-constraint violations get
    /// dedicated statuses; everything else is a sanitized 500.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A resource addressed by URL (slug or id) does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Malformed request payload.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unexpected server-side failure. The message is logged, never sent to
    /// the client.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Status, machine-readable code, and public message for one response.
type ErrorParts = (StatusCode, &'static str, String);

impl AppError {
    fn into_parts(self) -> ErrorParts {
        match self {
            AppError::Core(core) => core_parts(core),
            AppError::Database(err) => sqlx_parts(err),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_parts()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.into_parts();
        let body = json!({
            "error": message,
            "code": code,
        });
        (status, Json(body)).into_response()
    }
}

fn core_parts(err: CoreError) -> ErrorParts {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal_parts()
        }
    }
}

/// `RowNotFound` maps to 404. Unique violations (PostgreSQL error 23505) on
/// `uq_`-prefixed constraints map to 409. Anything else is logged server-side
/// and sanitized.
fn sqlx_parts(err: sqlx::Error) -> ErrorParts {
    match &err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                )
            } else {
                tracing::error!(error = %db_err, "Database error");
                internal_parts()
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal_parts()
        }
    }
}

fn internal_parts() -> ErrorParts {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
