//! Multimodal request parts for the `generateContent` endpoint.

use serde::Serialize;

/// A base64 payload plus its MIME type, as the API expects it.
#[derive(Debug, Clone, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// One part of a multimodal prompt: either prose or inline binary data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    Text(String),
    InlineData(InlineData),
}

/// Wrap a base64 image and MIME type into the inline-data part the model
/// expects. Pure data transformation; the payload is not inspected.
pub fn inline_data_part(image_base64: &str, mime_type: &str) -> Part {
    Part::InlineData(InlineData {
        mime_type: mime_type.to_string(),
        data: image_base64.to_string(),
    })
}
