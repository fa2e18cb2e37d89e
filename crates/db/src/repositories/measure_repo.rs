//! Repository for the `measures` table.

use sqlx::PgPool;
use uuid::Uuid;

use medidor_core::types::MeasureDate;

use crate::models::measure::{CreateMeasure, Measure};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, type, image_url, value, date_measured, customer_code, confirm_measure, \
     created_at, updated_at";

/// Provides the persistence operations for meter readings.
pub struct MeasureRepo;

impl MeasureRepo {
    /// Insert a new measure, returning the created row.
    ///
    /// The `uq_measures_customer_type_month` index rejects a second reading
    /// for the same customer, type, and calendar month with a 23505 error.
    pub async fn create(pool: &PgPool, input: &CreateMeasure) -> Result<Measure, sqlx::Error> {
        let query = format!(
            "INSERT INTO measures (id, type, image_url, value, date_measured, customer_code, confirm_measure)
             VALUES ($1, $2, $3, $4, $5, $6, FALSE)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Measure>(&query)
            .bind(input.id)
            .bind(&input.measure_type)
            .bind(&input.image_url)
            .bind(input.value)
            .bind(input.date_measured)
            .bind(&input.customer_code)
            .fetch_one(pool)
            .await
    }

    /// Find a measure by its UUID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Measure>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM measures WHERE id = $1");
        sqlx::query_as::<_, Measure>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the reading for a customer and meter type in the calendar month
    /// of `date_measured`, if one exists.
    pub async fn find_monthly(
        pool: &PgPool,
        customer_code: &str,
        measure_type: &str,
        date_measured: MeasureDate,
    ) -> Result<Option<Measure>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM measures
             WHERE customer_code = $1
               AND type = $2
               AND date_trunc('month', date_measured) = date_trunc('month', $3)"
        );
        sqlx::query_as::<_, Measure>(&query)
            .bind(customer_code)
            .bind(measure_type)
            .bind(date_measured)
            .fetch_optional(pool)
            .await
    }

    /// The most recently created measure for a customer, if any.
    pub async fn latest_for_customer(
        pool: &PgPool,
        customer_code: &str,
    ) -> Result<Option<Measure>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM measures
             WHERE customer_code = $1
             ORDER BY created_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Measure>(&query)
            .bind(customer_code)
            .fetch_optional(pool)
            .await
    }

    /// List all measures for a customer, optionally filtered by meter type,
    /// ordered by measurement date ascending.
    pub async fn list_by_customer(
        pool: &PgPool,
        customer_code: &str,
        measure_type: Option<&str>,
    ) -> Result<Vec<Measure>, sqlx::Error> {
        match measure_type {
            Some(measure_type) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM measures
                     WHERE customer_code = $1 AND type = $2
                     ORDER BY date_measured ASC"
                );
                sqlx::query_as::<_, Measure>(&query)
                    .bind(customer_code)
                    .bind(measure_type)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM measures
                     WHERE customer_code = $1
                     ORDER BY date_measured ASC"
                );
                sqlx::query_as::<_, Measure>(&query)
                    .bind(customer_code)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Overwrite `value` with the human-confirmed reading and flip
    /// `confirm_measure`. The `AND NOT confirm_measure` guard makes the
    /// false -> true transition one-way even under concurrent confirms.
    ///
    /// Returns `true` if a row was updated.
    pub async fn confirm(pool: &PgPool, id: Uuid, value: f64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE measures
             SET value = $2, confirm_measure = TRUE, updated_at = NOW()
             WHERE id = $1 AND NOT confirm_measure",
        )
        .bind(id)
        .bind(value)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
