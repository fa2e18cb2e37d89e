//! Measure entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use medidor_core::types::{MeasureDate, Timestamp};

/// A meter reading row from the `measures` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Measure {
    pub id: Uuid,
    /// `WATER` or `GAS`. The column is named `type`.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub measure_type: String,
    /// Data URI embedding the original base64 image and MIME type.
    pub image_url: String,
    /// Value read off the meter; mutable exactly once via confirmation.
    pub value: f64,
    pub date_measured: MeasureDate,
    pub customer_code: String,
    pub confirm_measure: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new measure. `confirm_measure` starts false and the
/// bookkeeping timestamps come from database defaults.
#[derive(Debug, Clone)]
pub struct CreateMeasure {
    pub id: Uuid,
    pub measure_type: String,
    pub image_url: String,
    pub value: f64,
    pub date_measured: MeasureDate,
    pub customer_code: String,
}
