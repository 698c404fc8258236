//! bookshelf-server: HTTP API server for the bookshelf service.
//!
//! This crate provides:
//! - REST endpoints for creating, reading, updating and deleting books
//! - Request validation with per-field error reporting
//! - A Server-Sent Events (SSE) stream of all books
//!
//! # Architecture
//!
//! Requests flow controller → validation → service → repository → mapper →
//! response. The server is built on Axum with a middleware stack for:
//! - Request tracing and logging
//! - CORS handling
//! - Request ID generation
//! - JSON error responses
//!
//! # Usage
//!
//! ```rust,ignore
//! use bookshelf_server::{config::ServerConfig, routes, state::AppState};
//! use bookshelf_store::MemoryBookStore;
//!
//! let config = ServerConfig::from_env()?;
//! let state = AppState::new(Arc::new(MemoryBookStore::new()), config);
//! let app = routes::build_router(state);
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod state;
pub mod stream;
pub mod validation;

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig, StorageBackend};
pub use dto::BookDto;
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use service::{BookService, ServiceError};
pub use state::AppState;

// Re-export dependent crates
pub use bookshelf_core;
pub use bookshelf_store;
