//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::cache::CacheConfig;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Errors from reading the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `BIND_ADDR` is not a socket address.
    #[error("invalid BIND_ADDR {value:?}: {reason}")]
    BindAddr { value: String, reason: String },

    /// `ROUTE_CACHE_TTL_SECS` is not a whole number of seconds.
    #[error("invalid ROUTE_CACHE_TTL_SECS {0:?}")]
    CacheTtl(String),
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// OpenRouteService key. Without one the server plans against
    /// built-in straight-line distances.
    pub openroute_api_key: Option<String>,
    pub bind_addr: SocketAddr,
    pub cache: CacheConfig,
    /// JSON snapshot of stored trips, if persistence is wanted.
    pub trip_store_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind.trim().parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::BindAddr {
                value: bind.clone(),
                reason: e.to_string(),
            }
        })?;

        let mut cache = CacheConfig::default();
        if let Some(ttl) = var("ROUTE_CACHE_TTL_SECS") {
            let secs: u64 = ttl
                .trim()
                .parse()
                .map_err(|_| ConfigError::CacheTtl(ttl.clone()))?;
            cache = cache.with_ttl(Duration::from_secs(secs));
        }

        Ok(Self {
            openroute_api_key: var("OPENROUTE_API_KEY"),
            bind_addr,
            cache,
            trip_store_path: var("TRIP_STORE_PATH").map(PathBuf::from),
        })
    }
}
