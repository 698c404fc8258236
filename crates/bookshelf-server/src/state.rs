//! Application state shared across handlers.

use std::sync::Arc;

use bookshelf_store::BookRepository;

use crate::config::ServerConfig;
use crate::service::BookService;

/// Application state shared across all handlers.
///
/// This is cloneable and can be extracted in handlers using `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Book operations over the configured repository.
    service: BookService,
    /// Server configuration.
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Create new application state over `repository`.
    pub fn new(repository: Arc<dyn BookRepository>, config: ServerConfig) -> Self {
        Self {
            service: BookService::new(repository, config.stream_delay),
            config: Arc::new(config),
        }
    }

    /// Get a reference to the book service.
    pub fn service(&self) -> &BookService {
        &self.service
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
