//! The image-understanding capability.
//!
//! The model call is modelled as an injected trait so the HTTP handlers are
//! decoupled from any specific provider and tests can substitute a
//! deterministic stand-in.

use async_trait::async_trait;

use crate::error::CoreError;

/// Reads the numeric value off a meter photograph.
///
/// Implementations receive the raw base64 payload and its MIME type and
/// return the value as reported by the model. The value is trusted as-is;
/// no plausibility check is applied.
#[async_trait]
pub trait MeterReader: Send + Sync {
    async fn read_meter(&self, image_base64: &str, mime_type: &str) -> Result<f64, CoreError>;
}
