//! Entry point for the bookshelf-server binary.

use std::sync::Arc;

use axum::middleware;
use bookshelf_server::{
    config::{ServerConfig, StorageBackend},
    middleware::request_id::{propagate_request_id, request_id_layer, request_span},
    routes,
    state::AppState,
};
use bookshelf_store::{BookRepository, MemoryBookStore, PgBookStore, StoreConfig};
use http::HeaderValue;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ServerConfig::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    tracing::info!("Starting bookshelf-server");
    tracing::info!(
        "Configuration: port={}, log_level={}, storage={}",
        config.port,
        config.log_level,
        config.storage
    );

    let repository = open_repository(&config).await?;

    // Build CORS layer
    let cors = build_cors_layer(&config.cors_allowed_origins)?;

    let addr = config.socket_addr();

    // Build router with middleware. The request id is assigned outermost so
    // the trace span can record it.
    let state = AppState::new(repository, config);
    let app = routes::build_router(state)
        .layer(middleware::from_fn(propagate_request_id))
        .layer(TraceLayer::new_for_http().make_span_with(request_span::<axum::body::Body>))
        .layer(cors)
        .layer(request_id_layer());

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Open the configured storage backend.
async fn open_repository(
    config: &ServerConfig,
) -> Result<Arc<dyn BookRepository>, Box<dyn std::error::Error>> {
    match (config.storage, config.database_url.as_deref()) {
        (StorageBackend::Postgres, Some(url)) => {
            let store = PgBookStore::connect(StoreConfig::with_url(url)).await?;
            Ok(Arc::new(store))
        }
        (StorageBackend::Postgres, None) => Err("DATABASE_URL is required for postgres storage".into()),
        (StorageBackend::Memory, _) => {
            tracing::warn!("Using in-memory storage; books are lost on restart");
            Ok(Arc::new(MemoryBookStore::new()))
        }
    }
}

/// Initialize the tracing subscriber.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build CORS layer from configuration.
fn build_cors_layer(allowed_origins: &str) -> Result<CorsLayer, http::header::InvalidHeaderValue> {
    if allowed_origins == "*" {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    // Parse comma-separated origins
    let origins = allowed_origins
        .split(',')
        .map(|s| s.trim().parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
