use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use medidor_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the service's
/// `{ "error_code": ..., "error_description": ... }` JSON envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `medidor_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, description) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_DATA", msg.clone())
                }
                CoreError::DoubleReport => (
                    StatusCode::CONFLICT,
                    "DOUBLE_REPORT",
                    "Monthly reading already recorded".to_string(),
                ),
                CoreError::MeasureNotFound => (
                    StatusCode::NOT_FOUND,
                    "INVALID_DATA",
                    "Reading not found".to_string(),
                ),
                CoreError::AlreadyConfirmed => (
                    StatusCode::CONFLICT,
                    "INVALID_DATA",
                    "Reading already confirmed".to_string(),
                ),
                CoreError::MeasuresNotFound => (
                    StatusCode::NOT_FOUND,
                    "MEASURES_NOT_FOUND",
                    "No readings found for this customer".to_string(),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_DATA", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        // Historical wire format: the duplicate-report envelope misspells its
        // description field. Existing clients match on it, so it stays.
        let body = if code == "DOUBLE_REPORT" {
            json!({
                "error_code": code,
                "error_descritpion": description,
            })
        } else {
            json!({
                "error_code": code,
                "error_description": description,
            })
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and description.
///
/// - `RowNotFound` maps to 404.
/// - A unique violation on the monthly reading index maps to 409
///   `DOUBLE_REPORT`; the index is what closes the check-then-insert race
///   in the upload handler.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "INVALID_DATA",
            "Reading not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some("uq_measures_customer_type_month")
            {
                return (
                    StatusCode::CONFLICT,
                    "DOUBLE_REPORT",
                    "Monthly reading already recorded".to_string(),
                );
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
