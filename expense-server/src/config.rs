//! Server configuration - environment loading
//!
//! Configuration is loaded from environment variables:
//! - `DATABASE_URL`: PostgreSQL connection string (no default)
//! - `HANDLER_SECRET_CODE`: shared secret for `/become_handler` (default: iiit123)
//! - `EXPENSES_BIND`: listen address (default: 127.0.0.1:8000)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use secrecy::{ExposeSecret, Secret};
use subtle::ConstantTimeEq;

use crate::db::DEFAULT_MAX_CONNECTIONS;

pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const HANDLER_SECRET_VAR: &str = "HANDLER_SECRET_CODE";
pub const BIND_VAR: &str = "EXPENSES_BIND";
pub const MAX_CONNECTIONS_VAR: &str = "DATABASE_MAX_CONNECTIONS";

/// Secret accepted by `/become_handler` when no override is configured
pub const DEFAULT_HANDLER_SECRET: &str = "iiit123";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Shared secret gating handler grants.
///
/// Never printed; compared in constant time.
#[derive(Clone)]
pub struct HandlerSecret(Arc<Secret<String>>);

impl HandlerSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Arc::new(Secret::new(secret.into())))
    }

    /// Check a caller-supplied code against the configured secret.
    pub fn verify(&self, candidate: &str) -> bool {
        self.0
            .expose_secret()
            .as_bytes()
            .ct_eq(candidate.as_bytes())
            .into()
    }
}

impl Default for HandlerSecret {
    fn default() -> Self {
        Self::new(DEFAULT_HANDLER_SECRET)
    }
}

impl fmt::Debug for HandlerSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HandlerSecret([REDACTED])")
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,
    /// PostgreSQL connection string; absent when running ephemeral
    pub database_url: Option<String>,
    /// Maximum pooled connections
    pub max_connections: u32,
    /// Secret for `/become_handler`
    pub handler_secret: HandlerSecret,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            handler_secret: HandlerSecret::default(),
        }
    }
}

impl AppConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Create config from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(value) = get(BIND_VAR) {
            config.bind_addr = value
                .parse()
                .map_err(|_| ConfigError::Invalid { var: BIND_VAR, value })?;
        }

        if let Some(value) = get(MAX_CONNECTIONS_VAR) {
            config.max_connections = value
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid {
                    var: MAX_CONNECTIONS_VAR,
                    value,
                })?;
        }

        config.database_url = get(DATABASE_URL_VAR);

        if let Some(secret) = get(HANDLER_SECRET_VAR) {
            config.handler_secret = HandlerSecret::new(secret);
        }

        Ok(config)
    }
}
