//! # API crate: shared wire types and client for the Dino Camp roster
//!
//! This crate is the contract between the `server` crate and the roster UI. It
//! compiles for both native and WASM targets and carries no server-only code.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | JSON bodies: [`User`], [`UpdateUsername`], [`ErrorBody`], [`HealthStatus`] |
//! | [`client`] | [`ApiClient`], a typed `reqwest` client for the three endpoints |
//!
//! ## Endpoints
//!
//! - `GET /api/health`: liveness, no store access
//! - `GET /api/users`: every camper ordered by id
//! - `PUT /api/users/{id}/username`: set one camper's username

pub mod client;
pub mod models;

pub use client::{api_url, ApiClient, ClientError, DEFAULT_API_URL};
pub use models::{ErrorBody, HealthStatus, UpdateUsername, User};
