//! Tests for `AppError` -> HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code, error code, and description. They do NOT need an HTTP server --
//! they call `IntoResponse` directly on `AppError` values.

use axum::response::IntoResponse;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use sqlx::PgPool;
use uuid::Uuid;

use medidor_api::error::AppError;
use medidor_core::error::CoreError;
use medidor_db::models::measure::CreateMeasure;
use medidor_db::repositories::MeasureRepo;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (axum::http::StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with INVALID_DATA code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("The image field is required".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["error_code"], "INVALID_DATA");
    assert_eq!(json["error_description"], "The image field is required");
}

// ---------------------------------------------------------------------------
// Test: CoreError::DoubleReport maps to 409 with the misspelled field
// ---------------------------------------------------------------------------

#[tokio::test]
async fn double_report_returns_409_with_historical_field() {
    let err = AppError::Core(CoreError::DoubleReport);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::CONFLICT);
    assert_eq!(json["error_code"], "DOUBLE_REPORT");
    // The duplicate-report envelope carries `error_descritpion`, not
    // `error_description`; clients match on the historical spelling.
    assert!(json["error_descritpion"].is_string());
    assert!(json.get("error_description").is_none());
}

// ---------------------------------------------------------------------------
// Test: CoreError::MeasureNotFound maps to 404 with INVALID_DATA code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn measure_not_found_returns_404() {
    let err = AppError::Core(CoreError::MeasureNotFound);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["error_code"], "INVALID_DATA");
    assert_eq!(json["error_description"], "Reading not found");
}

// ---------------------------------------------------------------------------
// Test: CoreError::AlreadyConfirmed maps to 409 with INVALID_DATA code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn already_confirmed_returns_409() {
    let err = AppError::Core(CoreError::AlreadyConfirmed);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::CONFLICT);
    assert_eq!(json["error_code"], "INVALID_DATA");
    assert_eq!(json["error_description"], "Reading already confirmed");
}

// ---------------------------------------------------------------------------
// Test: CoreError::MeasuresNotFound maps to 404 with MEASURES_NOT_FOUND code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn measures_not_found_returns_404() {
    let err = AppError::Core(CoreError::MeasuresNotFound);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["error_code"], "MEASURES_NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400 with INVALID_DATA code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["error_code"], "INVALID_DATA");
    assert_eq!(json["error_description"], "invalid field value");
}

// ---------------------------------------------------------------------------
// Test: AppError::InternalError maps to 500 and sanitizes the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error_code"], "INTERNAL_ERROR");

    // The response body must NOT contain the original error details.
    let body_text = json.to_string();
    assert!(
        !body_text.contains("secret"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["error_description"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Internal maps to 500 and sanitizes the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn core_internal_error_returns_500() {
    let err = AppError::Core(CoreError::Internal("Gemini exploded".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error_code"], "INTERNAL_ERROR");
    assert_eq!(json["error_description"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: sqlx RowNotFound maps to 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sqlx_row_not_found_returns_404() {
    let err = AppError::Database(sqlx::Error::RowNotFound);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["error_code"], "INVALID_DATA");
}

// ---------------------------------------------------------------------------
// Test: a 23505 from the monthly unique index maps to 409 DOUBLE_REPORT
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unique_index_violation_maps_to_double_report(pool: PgPool) {
    let date_measured = NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    let reading = |day_offset: u32| CreateMeasure {
        id: Uuid::new_v4(),
        measure_type: "WATER".to_string(),
        image_url: "data:image/png;base64,aGVsbG8=".to_string(),
        value: 100.0,
        date_measured: date_measured + chrono::Duration::days(day_offset as i64),
        customer_code: "C1".to_string(),
    };

    MeasureRepo::create(&pool, &reading(0)).await.unwrap();
    // Same customer, type, and calendar month: rejected by the index.
    let err = MeasureRepo::create(&pool, &reading(5)).await.unwrap_err();

    let (status, json) = error_to_response(AppError::Database(err)).await;

    assert_eq!(status, axum::http::StatusCode::CONFLICT);
    assert_eq!(json["error_code"], "DOUBLE_REPORT");
    // The duplicate-report envelope carries the historical field spelling.
    assert!(json["error_descritpion"].is_string());
    assert!(json.get("error_description").is_none());
}
