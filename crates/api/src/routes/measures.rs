//! Route definitions for the measure resource.
//!
//! Mounted at the root to preserve the original endpoint paths.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::measures;
use crate::state::AppState;

/// Routes mounted at `/`.
///
/// ```text
/// POST  /upload                  -> upload
/// PATCH /confirm                 -> confirm
/// GET   /{customer_code}/list    -> list (optional ?type=WATER|GAS)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(measures::upload))
        .route("/confirm", patch(measures::confirm))
        .route("/{customer_code}/list", get(measures::list))
}
