pub mod health;
pub mod measures;
