use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS accounts (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        phone TEXT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT accounts_email_key UNIQUE (email),
        CONSTRAINT accounts_phone_key UNIQUE (phone)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS books (
        id UUID PRIMARY KEY,
        title TEXT NOT NULL,
        author TEXT NOT NULL,
        year_published INTEGER NOT NULL CHECK (year_published >= 0),
        genre TEXT NOT NULL DEFAULT ''
    )
    "#,
    "CREATE INDEX IF NOT EXISTS books_title_idx ON books (title)",
    "CREATE INDEX IF NOT EXISTS books_author_idx ON books (author)",
];

/// Open the shared connection pool.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}

/// Create tables and indexes when absent. Safe to run on every start.
///
/// NULL phones never collide on the unique constraint, so accounts without
/// a phone are unrestricted.
pub async fn ensure_collections(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::info!("Database collections and indexes ensured");
    Ok(())
}
