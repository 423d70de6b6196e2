//! Startup configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `CHATTE_*` environment variables and config
//! files, layered by `ortho_config`. Only the database URL is mandatory.

use std::net::SocketAddr;
use std::time::Duration;

use chatte_backend::outbound::persistence::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DbPool, PoolConfig,
};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Invalid or missing settings detected before the server starts.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("CHATTE_DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Configuration values controlling the HTTP listener and database pool.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CHATTE")]
pub struct AppSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Listener address.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: String,
    /// Upper bound on pooled connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_connection_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Return the socket address to listen on.
    ///
    /// # Errors
    /// [`SettingsError::InvalidBindAddr`] when the configured value does not
    /// parse as `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: self.bind_addr.clone(),
                source,
            })
    }

    /// Return the pool configuration, applying defaults for unset limits.
    ///
    /// # Errors
    /// [`SettingsError::MissingDatabaseUrl`] when no URL is configured.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let url = self
            .database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)?;
        let timeout = self
            .pool_connection_timeout_secs
            .map_or(DEFAULT_CONNECTION_TIMEOUT, Duration::from_secs);
        Ok(PoolConfig::new(url)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_MAX_SIZE))
            .with_connection_timeout(timeout))
    }
}

/// Everything `create_server` needs once settings have been validated.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    /// Construct a server configuration.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self { bind_addr, db_pool }
    }
}
