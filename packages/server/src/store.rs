//! # Store port for the roster
//!
//! Handlers only ever talk to a [`UserStore`]. Production wires in the Postgres
//! implementation from [`crate::database`]; tests use [`MemoryUserStore`].
//!
//! Each method maps to exactly one statement against the store. There are no
//! transactions and no retries at this layer.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use api::User;
use async_trait::async_trait;

/// A failure reported by the underlying data store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    /// Human-readable message from the store driver.
    pub message: String,
    /// Additional detail provided by the database server, if any.
    pub detail: Option<String>,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err.as_database_error() {
            // The server's own message, without sqlx's "error returned from database" prefix.
            Some(db) => Self {
                message: db.message().to_string(),
                detail: db
                    .try_downcast_ref::<sqlx::postgres::PgDatabaseError>()
                    .and_then(|pg| pg.detail())
                    .map(str::to_string),
            },
            None => Self::new(err.to_string()),
        }
    }
}

/// Data access for [`User`] rows.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every user, ordered by ascending id.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Set `username` on the user with `id`. Returns `None` when no such user exists.
    async fn update_username(&self, id: i32, username: &str) -> Result<Option<User>, StoreError>;
}

/// In-memory UserStore for tests and local development without Postgres.
#[derive(Clone, Debug, Default)]
pub struct MemoryUserStore {
    users: Arc<Mutex<BTreeMap<i32, User>>>,
    failure: Arc<Mutex<Option<StoreError>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding `users`, in whatever order they are given.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let store = Self::new();
        for user in users {
            store.insert(user);
        }
        store
    }

    /// Insert or replace a row out-of-band.
    pub fn insert(&self, user: User) {
        self.users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user.id, user);
    }

    pub fn get(&self, id: i32) -> Option<User> {
        self.users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// Make every following operation fail with `err` until cleared with `None`.
    pub fn fail_with(&self, err: Option<StoreError>) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = err;
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match self
            .failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.check_failure()?;
        Ok(self
            .users
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect())
    }

    async fn update_username(&self, id: i32, username: &str) -> Result<Option<User>, StoreError> {
        self.check_failure()?;
        let mut users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(users.get_mut(&id).map(|user| {
            user.username = Some(username.to_string());
            user.clone()
        }))
    }
}
