#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Monthly reading already recorded")]
    DoubleReport,

    #[error("Reading not found")]
    MeasureNotFound,

    #[error("Reading already confirmed")]
    AlreadyConfirmed,

    #[error("No readings found for this customer")]
    MeasuresNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}
