/// Bookkeeping timestamps (`created_at`, `updated_at`) are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// `date_measured` is stored without a time zone; the calendar month of
/// this value is the dedup key for readings.
pub type MeasureDate = chrono::NaiveDateTime;
