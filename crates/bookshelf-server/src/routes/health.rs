//! Liveness probe.
//!
//! Endpoint: GET /health
//!
//! Reports the configured storage backend and whether it answered a count
//! query. The route itself always answers 200 so load balancers can tell a
//! slow database from a dead process.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::config::StorageBackend;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the store did not answer.
    pub status: &'static str,
    pub storage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub books: Option<u64>,
}

impl HealthResponse {
    fn probe(storage: StorageBackend, count: Option<u64>) -> Self {
        Self {
            status: if count.is_some() { "ok" } else { "degraded" },
            storage: storage.to_string(),
            books: count,
        }
    }
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let count = match state.service().count_books().await {
        Ok(n) => Some(n),
        Err(e) => {
            tracing::warn!(error = %e, "Health probe could not reach the store");
            None
        }
    };
    Json(HealthResponse::probe(state.config().storage, count))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use bookshelf_store::MemoryBookStore;

    use crate::config::ServerConfig;

    #[tokio::test]
    async fn test_health_reports_store() {
        let state = AppState::new(Arc::new(MemoryBookStore::new()), ServerConfig::default());
        let Json(body) = health_check(State(state)).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.storage, "memory");
        assert_eq!(body.books, Some(0));
    }

    #[test]
    fn test_unreachable_store_is_degraded() {
        let body = HealthResponse::probe(StorageBackend::Postgres, None);
        assert_eq!(body.status, "degraded");
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("books").is_none());
    }
}
