//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input via `medidor_core`, delegate persistence to the
//! repositories in `medidor_db`, and map errors via [`crate::error::AppError`].

pub mod measures;
