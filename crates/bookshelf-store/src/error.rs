//! Error types for the storage layer.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection error.
    #[error("database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    /// Book not found.
    #[error("Book with id = [{0}] not found")]
    BookNotFound(Uuid),

    /// Migration error.
    #[error("migration error: {0}")]
    MigrationError(String),
}
