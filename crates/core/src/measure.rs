//! Measure vocabulary and request validation.
//!
//! Validation helpers return [`CoreError::Validation`] with a field-level
//! message; handlers surface these as 400 `INVALID_DATA` responses.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::types::MeasureDate;

/// MIME types accepted for uploaded meter photographs.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/heic",
    "image/heif",
];

/// Syntactic base64 check: groups of four alphabet characters with an
/// optional padded tail.
static BASE64_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=)?$")
        .expect("base64 regex is valid")
});

/// The kind of meter a reading was taken from. Crosses the wire as the
/// upper-case string from [`MeasureType::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureType {
    Water,
    Gas,
}

impl MeasureType {
    /// Return the type as the upper-case string stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Water => "WATER",
            Self::Gas => "GAS",
        }
    }

    /// Parse a measure type from a string slice. Only the exact upper-case
    /// spellings are accepted; callers that allow lower-case input normalize
    /// before calling.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "WATER" => Ok(Self::Water),
            "GAS" => Ok(Self::Gas),
            _ => Err(CoreError::Validation(format!(
                "Invalid measure type '{s}'. Must be one of: WATER, GAS"
            ))),
        }
    }
}

/// Validate that a MIME type is on the image allow-list.
pub fn validate_mime_type(mime_type: &str) -> Result<(), CoreError> {
    if ALLOWED_MIME_TYPES.contains(&mime_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid MIME type '{mime_type}'. Must be one of: {}",
            ALLOWED_MIME_TYPES.join(", ")
        )))
    }
}

/// Validate that an image payload is a non-empty, syntactically valid
/// base64 string. The payload is not decoded.
pub fn validate_base64(image: &str) -> Result<(), CoreError> {
    if image.is_empty() {
        return Err(CoreError::Validation(
            "The image field is required".to_string(),
        ));
    }
    if !BASE64_RE.is_match(image) {
        return Err(CoreError::Validation(
            "The image field must be a valid base64 string".to_string(),
        ));
    }
    Ok(())
}

/// Coerce a client-supplied measurement date from string form.
///
/// Accepts RFC 3339 (offset dropped), a bare `YYYY-MM-DDTHH:MM:SS`
/// timestamp with `T` or space separator, or a bare date (midnight).
pub fn parse_measure_datetime(raw: &str) -> Result<MeasureDate, CoreError> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt);
        }
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }
    Err(CoreError::Validation(format!(
        "The measure_datetime field is not a valid date: '{raw}'"
    )))
}

/// Build the canonical stored image reference: a data URI embedding the
/// original base64 payload and MIME type. No external object storage.
pub fn image_data_url(mime_type: &str, image_base64: &str) -> String {
    format!("data:{mime_type};base64,{image_base64}")
}
