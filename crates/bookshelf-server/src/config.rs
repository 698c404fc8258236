//! Server configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default pacing between streamed books.
pub const DEFAULT_STREAM_DELAY_MS: u64 = 1000;

/// Which [`BookRepository`](bookshelf_store::BookRepository) backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local, insertion-ordered map. Lost on restart.
    Memory,
    /// PostgreSQL via `DATABASE_URL`.
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(ConfigError::InvalidValue {
                name: "BOOK_STORAGE".to_string(),
                reason: format!("expected \"memory\" or \"postgres\", got \"{}\"", other),
            }),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Postgres => f.write_str("postgres"),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Storage backend.
    pub storage: StorageBackend,
    /// Database connection URL, required for the Postgres backend.
    pub database_url: Option<String>,
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// Delay before each book emitted on `/books/stream`.
    pub stream_delay: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::Memory,
            database_url: None,
            port: 3000,
            log_level: "info".to_string(),
            cors_allowed_origins: "*".to_string(),
            stream_delay: Duration::from_millis(DEFAULT_STREAM_DELAY_MS),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `BOOK_STORAGE`: "memory" or "postgres" (default: "postgres" when
    ///   `DATABASE_URL` is set, otherwise "memory")
    /// - `DATABASE_URL`: Database connection string (required for "postgres")
    /// - `PORT`: Server port (default: 3000)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    /// - `STREAM_DELAY_MS`: Pacing of the book stream (default: 1000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());

        let storage = match lookup("BOOK_STORAGE") {
            Some(value) => value.parse()?,
            None if database_url.is_some() => StorageBackend::Postgres,
            None => StorageBackend::Memory,
        };

        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingEnvVar("DATABASE_URL".to_string()));
        }

        let port = parse_or(&lookup, "PORT", defaults.port)?;

        let log_level = lookup("LOG_LEVEL").unwrap_or(defaults.log_level);

        let cors_allowed_origins =
            lookup("CORS_ALLOWED_ORIGINS").unwrap_or(defaults.cors_allowed_origins);

        let stream_delay = Duration::from_millis(parse_or(
            &lookup,
            "STREAM_DELAY_MS",
            DEFAULT_STREAM_DELAY_MS,
        )?);

        Ok(Self {
            storage,
            database_url,
            port,
            log_level,
            cors_allowed_origins,
            stream_delay,
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            name: name.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = load(&[]).unwrap();

        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.database_url, None);
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.cors_allowed_origins, "*");
        assert_eq!(config.stream_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_database_url_selects_postgres() {
        let config = load(&[("DATABASE_URL", "postgres://u:p@localhost/books")]).unwrap();
        assert_eq!(config.storage, StorageBackend::Postgres);
    }

    #[test]
    fn test_explicit_memory_overrides_database_url() {
        let config = load(&[
            ("DATABASE_URL", "postgres://u:p@localhost/books"),
            ("BOOK_STORAGE", "memory"),
        ])
        .unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let err = load(&[("BOOK_STORAGE", "postgres")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(name) if name == "DATABASE_URL"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidValue { name, .. }) if name == "PORT"
        ));
        assert!(matches!(
            load(&[("BOOK_STORAGE", "sqlite")]),
            Err(ConfigError::InvalidValue { name, .. }) if name == "BOOK_STORAGE"
        ));
        assert!(matches!(
            load(&[("STREAM_DELAY_MS", "-5")]),
            Err(ConfigError::InvalidValue { name, .. }) if name == "STREAM_DELAY_MS"
        ));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("LOG_LEVEL", "debug"),
            ("STREAM_DELAY_MS", "250"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.stream_delay, Duration::from_millis(250));
        assert_eq!(config.socket_addr().port(), 8080);
    }
}
