use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
}

/// Contains parameters for the PostgreSQL connection pool.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Connection string. Falls back to the `DATABASE_URL` environment variable.
    #[serde(default)]
    pub url: Option<String>,
    pub max_connections: u32,
    /// How long a request waits for a free connection before failing.
    pub acquire_timeout_secs: u64,
    /// Apply the embedded migrations when the server starts.
    pub run_migrations: bool,
}

/// Contains parameters for the HTTP listener.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body, in bytes.
    pub body_limit_bytes: usize,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            ConfigError::ValidationError(format!(
                "server.host '{}' is not an IP address",
                self.host
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Contains parameters for the tracing subscriber.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive, e.g. `info,web_server=debug`. `RUST_LOG` wins when set.
    pub filter: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Settings {
    /// Fills `database.url` from `database_url` when the sources left it empty.
    pub(crate) fn with_database_url_fallback(mut self, database_url: Option<String>) -> Self {
        let missing = self
            .database
            .url
            .as_deref()
            .is_none_or(|url| url.trim().is_empty());
        if missing {
            self.database.url = database_url.filter(|url| !url.trim().is_empty());
        }
        self
    }

    pub(crate) fn validate(self) -> Result<Self, ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.server.body_limit_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "server.body_limit_bytes must be positive".to_string(),
            ));
        }
        self.server.socket_addr()?;
        Ok(self)
    }
}
