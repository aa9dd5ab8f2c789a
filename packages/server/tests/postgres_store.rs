//! Round trip against a real database.
//!
//! Run with `TEST_DATABASE_URL=postgres://... cargo test -p server -- --ignored`.
//! The test creates and drops its own `users` table in that database.

use sqlx::PgPool;

use server::database::PgUserStore;
use server::UserStore;

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn pg_store_lists_and_updates() {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    let pool = PgPool::connect(&url).await.unwrap();

    sqlx::query("DROP TABLE IF EXISTS users")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            username TEXT,
            emoji TEXT NOT NULL,
            enrolled_at TIMESTAMPTZ DEFAULT now()
        )",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO users (id, name, emoji) VALUES (2, 'Trixie', '🦕'), (1, 'Rex', '🦖')")
        .execute(&pool)
        .await
        .unwrap();

    let store = PgUserStore::new(pool.clone());

    let users = store.list_users().await.unwrap();
    assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(users[0].username, None);

    let updated = store.update_username(1, "rex_99").await.unwrap().unwrap();
    assert_eq!(updated.username.as_deref(), Some("rex_99"));
    assert_eq!(updated.emoji, "🦖");

    assert!(store.update_username(999, "x").await.unwrap().is_none());

    sqlx::query("DROP TABLE users").execute(&pool).await.unwrap();

    let err = store.list_users().await.unwrap_err();
    assert_eq!(err.message, r#"relation "users" does not exist"#);
}
