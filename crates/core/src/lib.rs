//! Domain types, validation, and errors for the meter-reading service.
//!
//! This crate has no I/O. It defines the [`error::CoreError`] taxonomy,
//! the measure vocabulary and validation helpers in [`measure`], and the
//! [`reader::MeterReader`] capability implemented by the Gemini client and
//! substituted with a stub in tests.

pub mod error;
pub mod measure;
pub mod reader;
pub mod types;
