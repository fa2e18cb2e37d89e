//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! [`GeminiClient`] holds the API key and target model. It is constructed
//! once at startup and shared through the application state; there is no
//! timeout, retry, or circuit breaker around the call, so a slow provider
//! stalls only the request that invoked it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use medidor_core::error::CoreError;
use medidor_core::reader::MeterReader;

use crate::parts::{inline_data_part, Part};

/// Fixed prompt: the model must answer with the bare numeric value.
pub const METER_PROMPT: &str =
    "Look up the value of the meter in m\u{b3}, and just give me the value without any description";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Client for one Gemini model.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a client for the default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the API base URL. Used by tests to point at a local server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the target model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Send a single-turn request and return the first text part of the
    /// first candidate.
    async fn generate_content(&self, parts: Vec<Part>) -> Result<String, GeminiError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let request = GenerateContentRequest {
            contents: vec![RequestContent { parts }],
        };

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let payload: GenerateContentResponse = response.json().await?;
        payload
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
            .ok_or(GeminiError::EmptyResponse)
    }
}

#[async_trait]
impl MeterReader for GeminiClient {
    async fn read_meter(&self, image_base64: &str, mime_type: &str) -> Result<f64, CoreError> {
        let parts = vec![
            Part::Text(METER_PROMPT.to_string()),
            inline_data_part(image_base64, mime_type),
        ];

        let text = self
            .generate_content(parts)
            .await
            .map_err(|err| CoreError::Internal(err.to_string()))?;

        tracing::debug!(model = %self.model, raw = %text, "Gemini returned a reading");

        parse_meter_value(&text).map_err(|err| CoreError::Internal(err.to_string()))
    }
}

/// Errors from the Gemini REST call.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("Request to Gemini failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini returned no text candidate")]
    EmptyResponse,

    #[error("Gemini returned a non-numeric reading: {0:?}")]
    NonNumeric(String),
}

/// Parse the model's answer as a reading. The value is trusted as-is; only
/// surrounding whitespace is tolerated.
fn parse_meter_value(text: &str) -> Result<f64, GeminiError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| GeminiError::NonNumeric(text.to_string()))
}

// --- Wire types -----------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}
