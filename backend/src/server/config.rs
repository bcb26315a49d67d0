//! Server settings loaded via OrthoConfig.

use std::net::SocketAddr;
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tender_backend::outbound::persistence::{DbPool, PoolConfig};

const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Process-level settings. Every field can be set through `TENDER_*`
/// environment variables, a configuration file or CLI flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TENDER")]
pub struct ServerSettings {
    /// `host:port` the HTTP listener binds to.
    pub server_address: Option<String>,
    /// PostgreSQL connection URL.
    pub postgres_conn: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub connection_timeout_secs: Option<u64>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl ServerSettings {
    /// Bind address, defaulting to all interfaces on port 8080.
    pub fn server_address(&self) -> Result<SocketAddr> {
        let raw = self
            .server_address
            .as_deref()
            .unwrap_or(DEFAULT_SERVER_ADDRESS);
        raw.parse()
            .wrap_err_with(|| format!("invalid TENDER_SERVER_ADDRESS {raw:?}"))
    }

    /// Database URL; there is no sensible default.
    pub fn postgres_conn(&self) -> Result<&str> {
        self.postgres_conn
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| eyre!("TENDER_POSTGRES_CONN must be set"))
    }

    /// Pool sizing and timeouts derived from the settings.
    pub fn pool_config(&self) -> Result<PoolConfig> {
        Ok(PoolConfig::new(self.postgres_conn()?)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
            .with_connection_timeout(Duration::from_secs(
                self.connection_timeout_secs
                    .unwrap_or(DEFAULT_CONNECTION_TIMEOUT_SECS),
            )))
    }
}

/// Resolved configuration handed to [`super::create_server`].
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    /// Pair a bind address with a ready pool.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self { bind_addr, db_pool }
    }
}
