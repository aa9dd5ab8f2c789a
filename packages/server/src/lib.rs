//! # Server crate: the Dino Camp roster API
//!
//! A stateless axum service over a single `users` table. Each business
//! operation is one parameterised SQL statement against a shared sqlx pool.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`settings`] | Layered configuration: defaults, `config.toml`, `.env`, environment |
//! | [`database`] | Process-wide `PgPool` and the Postgres [`store::UserStore`] |
//! | [`store`] | The [`store::UserStore`] port, [`store::StoreError`], and an in-memory store |
//! | [`routes`] | Router, CORS, and the three handlers |
//! | [`error`] | [`error::ApiError`] and its JSON responses |

mod application;
pub mod database;
pub mod error;
pub mod routes;
pub mod settings;
pub mod store;
mod user;

pub use application::{init_tracing, launch};
pub use routes::{router, AppState};
pub use settings::Settings;
pub use store::{MemoryUserStore, StoreError, UserStore};
