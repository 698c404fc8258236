//! Schema definitions and migration utilities.
//!
//! The schema is embedded at compile time and applied on connect when
//! `StoreConfig::run_migrations` is set.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Embedded migration SQL for the books table (001_books.sql).
pub const BOOKS_MIGRATION: &str = include_str!("../../../migrations/001_books.sql");

/// Run all pending migrations against the database.
///
/// Idempotent: every statement checks for existing objects first.
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running database migrations...");

    tracing::debug!("Running books migration (001_books.sql)...");
    sqlx::raw_sql(BOOKS_MIGRATION)
        .execute(pool)
        .await
        .map_err(|e| StoreError::MigrationError(format!("Books migration failed: {}", e)))?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}
