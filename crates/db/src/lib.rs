//! PostgreSQL persistence for the club directory.
//!
//! - [`models`]: row structs and DTOs.
//! - [`repositories`]: zero-sized repos with async query methods.
//! - [`store::PgClubStore`]: the [`clubdir_core::store::ClubStore`] the
//!   ingestion pipeline runs against in production.

pub mod models;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
