//! bookshelf-store: storage layer for the bookshelf service.
//!
//! This crate provides:
//! - The [`BookRepository`] capability trait the service layer depends on
//! - [`MemoryBookStore`], an insertion-ordered in-memory implementation
//! - [`PgBookStore`], a PostgreSQL implementation via sqlx
//! - Embedded schema migration
//!
//! # Usage
//!
//! ```rust,ignore
//! use bookshelf_store::{BookRepository, PgBookStore, StoreConfig};
//!
//! let config = StoreConfig::with_url(std::env::var("DATABASE_URL")?);
//! let store = PgBookStore::connect(config).await?;
//!
//! store.save(book).await?;
//! let page = store.find_page(0, 10).await?;
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryBookStore;
pub use models::BookRow;
pub use repository::BookRepository;
pub use store::{PgBookStore, StoreConfig};

// Re-export bookshelf-core for downstream crates
pub use bookshelf_core;
