use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

use crate::database::{init_pool, PgUserStore};
use crate::routes::{router, AppState};
use crate::settings::Settings;

const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Install the global fmt subscriber, honouring `RUST_LOG`.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connect to the database and serve the roster API until the process exits.
///
/// A pool that cannot be established is fatal; the caller is expected to exit.
pub async fn launch(settings: Settings) -> anyhow::Result<()> {
    let db = &settings.db;
    tracing::info!(
        host = %db.host,
        port = db.port,
        database = %db.name,
        user = %db.user,
        password_set = !db.password.is_empty(),
        password_length = db.password.len(),
        "Database config"
    );

    let pool = init_pool(db)
        .await
        .context("Failed to connect to database")?;

    let state =
        AppState::new(PgUserStore::new(pool.clone())).with_error_detail(settings.errors.detail);
    let app = router(state);

    let addr = settings.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server is running on port {}", settings.port);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")
}
