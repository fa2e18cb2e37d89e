use std::sync::Arc;

use medidor_core::reader::MeterReader;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// All dependencies are constructed once in `main` and injected here; there
/// is no module-level ambient state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: medidor_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Image-understanding capability (Gemini in production, a stub in tests).
    pub meter_reader: Arc<dyn MeterReader>,
}
