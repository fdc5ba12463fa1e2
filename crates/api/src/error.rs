use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use clubdir_core::error::CoreError;
use clubdir_core::ingest::IngestError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent `{message, code}` JSON.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `clubdir_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bulk upload that could not be processed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unknown user or wrong password. Deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Bulk upload ---
            AppError::Ingest(IngestError::MalformedInput(msg)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "MALFORMED_INPUT",
                format!("Failed to process CSV: {msg}"),
            ),
            AppError::Ingest(IngestError::Store(err)) => {
                tracing::error!(error = %err, "Club store failed during bulk upload");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Failed to process CSV: storage unavailable".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                "INVALID_CREDENTIALS",
                "Invalid credentials".to_string(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Check constraint violations (constraint name starting with `ck_`) map to 400.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                // PostgreSQL unique_violation
                Some("23505") if constraint.starts_with("uq_") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
                // PostgreSQL check_violation
                Some("23514") if constraint.starts_with("ck_") => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        format!("Value violates check constraint: {constraint}"),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
