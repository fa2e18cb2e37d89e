//! REST client for the Google Gemini `generateContent` API.
//!
//! Provides the multimodal request part types, the inline-data adapter for
//! base64 images, and [`client::GeminiClient`], which implements the
//! [`medidor_core::reader::MeterReader`] capability.

pub mod client;
pub mod parts;

pub use client::GeminiClient;
