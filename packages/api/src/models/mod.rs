//! Data models for the application.

mod user;

pub use user::{ErrorBody, HealthStatus, UpdateUsername, User};
