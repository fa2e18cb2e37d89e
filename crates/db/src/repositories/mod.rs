//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod measure_repo;

pub use measure_repo::MeasureRepo;
