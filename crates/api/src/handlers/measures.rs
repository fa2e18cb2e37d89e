//! Handlers for the measure resource: upload, confirm, and per-customer list.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use medidor_core::error::CoreError;
use medidor_core::measure::{self, MeasureType};
use medidor_core::types::MeasureDate;
use medidor_db::models::measure::CreateMeasure;
use medidor_db::repositories::MeasureRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Body of `POST /upload`. `measure_datetime` and `measure_type` arrive as
/// strings and are coerced/validated by the handler so failures surface as
/// field-level 400 responses.
#[derive(Debug, Deserialize)]
pub struct UploadMeasureRequest {
    pub image: String,
    pub customer_code: String,
    pub measure_datetime: String,
    pub measure_type: String,
}

#[derive(Debug, Serialize)]
pub struct UploadMeasureResponse {
    pub measure_uuid: Uuid,
    pub image_url: String,
    pub measure_value: f64,
}

/// POST /upload
///
/// Validates the request, rejects a second reading for the same customer,
/// meter type, and calendar month, asks the injected model reader for the
/// numeric value, and persists the row. No transaction spans the
/// duplicate check and the insert; the monthly unique index is what makes
/// the rule hold under concurrent uploads, surfacing as `DOUBLE_REPORT`
/// through the sqlx error classifier.
pub async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<UploadMeasureRequest>,
) -> AppResult<Json<UploadMeasureResponse>> {
    let mime_type = headers
        .get("x-mime-type")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "The x-mime-type header is required".to_string(),
            ))
        })?
        .to_string();

    measure::validate_mime_type(&mime_type)?;
    measure::validate_base64(&input.image)?;
    if input.customer_code.is_empty() {
        return Err(CoreError::Validation("The customer_code field is required".to_string()).into());
    }
    let measure_type = MeasureType::from_str(&input.measure_type)?;
    let date_measured: MeasureDate = measure::parse_measure_datetime(&input.measure_datetime)?;

    let already_measured = MeasureRepo::find_monthly(
        &state.pool,
        &input.customer_code,
        measure_type.as_str(),
        date_measured,
    )
    .await?;
    if already_measured.is_some() {
        return Err(CoreError::DoubleReport.into());
    }

    let value = state
        .meter_reader
        .read_meter(&input.image, &mime_type)
        .await?;

    let image_url = measure::image_data_url(&mime_type, &input.image);

    MeasureRepo::create(
        &state.pool,
        &CreateMeasure {
            id: Uuid::new_v4(),
            measure_type: measure_type.as_str().to_string(),
            image_url,
            value,
            date_measured,
            customer_code: input.customer_code.clone(),
        },
    )
    .await?;

    // The response is built from a read-back of the customer's newest row,
    // matching the original service's behaviour.
    let created = MeasureRepo::latest_for_customer(&state.pool, &input.customer_code)
        .await?
        .ok_or_else(|| AppError::InternalError("inserted measure missing on read-back".into()))?;

    Ok(Json(UploadMeasureResponse {
        measure_uuid: created.id,
        image_url: created.image_url,
        measure_value: created.value,
    }))
}

/// Body of `PATCH /confirm`. `measure_uuid` arrives as a string so a
/// malformed UUID produces a field-level 400 instead of a body rejection.
#[derive(Debug, Deserialize)]
pub struct ConfirmMeasureRequest {
    pub measure_uuid: String,
    pub confirmed_value: f64,
}

/// PATCH /confirm
///
/// Overwrites the model-read value with the human-confirmed one, exactly
/// once per measure.
pub async fn confirm(
    State(state): State<AppState>,
    Json(input): Json<ConfirmMeasureRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let id = Uuid::parse_str(&input.measure_uuid).map_err(|_| {
        AppError::Core(CoreError::Validation(
            "The measure_uuid field is not a valid UUID".to_string(),
        ))
    })?;

    let existing = MeasureRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::MeasureNotFound)?;
    if existing.confirm_measure {
        return Err(CoreError::AlreadyConfirmed.into());
    }

    let updated = MeasureRepo::confirm(&state.pool, id, input.confirmed_value).await?;
    if !updated {
        // The flag flipped between the read and the update.
        return Err(CoreError::AlreadyConfirmed.into());
    }

    // "sucess" is the historical field name; clients depend on it.
    Ok(Json(serde_json::json!({ "sucess": true })))
}

#[derive(Debug, Deserialize)]
pub struct ListMeasuresQuery {
    /// Optional meter type filter, case-normalized to upper-case.
    #[serde(rename = "type")]
    pub measure_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListMeasureItem {
    pub measure_uuid: Uuid,
    pub measure_datetime: MeasureDate,
    pub measure_type: String,
    pub has_confirmed: bool,
    pub image_url: String,
}

/// Wrapper reproducing the original wire contract, which nests the measure
/// list one level deeper than a flat array.
#[derive(Debug, Serialize)]
pub struct MeasureGroup {
    #[serde(rename = "listMeasures")]
    pub list_measures: Vec<ListMeasureItem>,
}

#[derive(Debug, Serialize)]
pub struct ListMeasuresResponse {
    pub customer_code: String,
    pub measures: Vec<MeasureGroup>,
}

/// GET /{customer_code}/list?type=WATER|GAS
pub async fn list(
    State(state): State<AppState>,
    Path(customer_code): Path<String>,
    Query(query): Query<ListMeasuresQuery>,
) -> AppResult<Json<ListMeasuresResponse>> {
    let type_filter = match &query.measure_type {
        Some(raw) => Some(MeasureType::from_str(&raw.to_uppercase())?),
        None => None,
    };

    let rows = MeasureRepo::list_by_customer(
        &state.pool,
        &customer_code,
        type_filter.map(|t| t.as_str()),
    )
    .await?;

    if rows.is_empty() {
        return Err(CoreError::MeasuresNotFound.into());
    }

    let list_measures = rows
        .into_iter()
        .map(|m| ListMeasureItem {
            measure_uuid: m.id,
            measure_datetime: m.date_measured,
            measure_type: m.measure_type,
            has_confirmed: m.confirm_measure,
            image_url: m.image_url,
        })
        .collect();

    Ok(Json(ListMeasuresResponse {
        customer_code,
        measures: vec![MeasureGroup { list_measures }],
    }))
}
