//! # Database module: the PostgreSQL pool and its [`UserStore`]
//!
//! The pool is a **process-wide singleton** backed by a [`tokio::sync::OnceCell`].
//! Unlike a lazily connected pool it is initialised explicitly at startup by
//! [`init_pool`]; when that fails the server has nothing to serve and exits.
//!
//! [`PgUserStore`] issues exactly one parameterised statement per operation and
//! never opens a transaction.

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tokio::sync::OnceCell;

use api::User;

use crate::settings::Database;
use crate::store::{StoreError, UserStore};
use crate::user::SqlUser;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

const MAX_CONNECTIONS: u32 = 5;

const LIST_USERS: &str = "SELECT id, name, username, emoji FROM users ORDER BY id";

const UPDATE_USERNAME: &str =
    "UPDATE users SET username = $1 WHERE id = $2 RETURNING id, name, username, emoji";

/// Connection options for the configured database.
pub fn connect_options(db: &Database) -> PgConnectOptions {
    let options = PgConnectOptions::new()
        .host(&db.host)
        .port(db.port)
        .database(&db.name)
        .username(&db.user);
    if db.password.is_empty() {
        options
    } else {
        options.password(&db.password)
    }
}

/// Initialise the connection pool. Later calls return the pool created by the first.
pub async fn init_pool(db: &Database) -> Result<&'static PgPool, sqlx::Error> {
    POOL.get_or_try_init(|| async {
        PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .after_connect(|_conn, _meta| {
                Box::pin(async move {
                    tracing::debug!("Connected to PostgreSQL database");
                    Ok(())
                })
            })
            .connect_with(connect_options(db))
            .await
    })
    .await
}

/// [`UserStore`] over the `users` table.
#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let rows: Vec<SqlUser> = sqlx::query_as(LIST_USERS).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(SqlUser::into_user).collect())
    }

    async fn update_username(&self, id: i32, username: &str) -> Result<Option<User>, StoreError> {
        let row: Option<SqlUser> = sqlx::query_as(UPDATE_USERNAME)
            .bind(username)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(SqlUser::into_user))
    }
}
