//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional, with defaults suitable for local development:
//! - `MALISEK_HOST` - Bind address (default: 127.0.0.1)
//! - `MALISEK_PORT` - Listen port (default: 3000)
//! - `MALISEK_CATALOG_PATH` - Catalog JSON document
//!   (default: data/catalog.json)
//! - `MALISEK_SNAPSHOT_PATH` - Store snapshot file
//!   (default: data/malisek-cart-storage.json)
//! - `MALISEK_CHECKOUT_DELAY_MS` - Simulated checkout processing delay
//!   in milliseconds (default: 2000)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Catalog JSON document loaded at startup.
    pub catalog_path: PathBuf,
    /// Store snapshot file, loaded at startup and overwritten on every
    /// mutation.
    pub snapshot_path: PathBuf,
    /// Simulated checkout processing delay.
    pub checkout_delay: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be
    /// parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("MALISEK_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("MALISEK_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("MALISEK_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("MALISEK_PORT".to_string(), e.to_string()))?;
        let catalog_path = PathBuf::from(get_env_or_default(
            "MALISEK_CATALOG_PATH",
            "data/catalog.json",
        ));
        let snapshot_path = PathBuf::from(get_env_or_default(
            "MALISEK_SNAPSHOT_PATH",
            "data/malisek-cart-storage.json",
        ));
        let checkout_delay_ms = get_env_or_default("MALISEK_CHECKOUT_DELAY_MS", "2000")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("MALISEK_CHECKOUT_DELAY_MS".to_string(), e.to_string())
            })?;

        Ok(Self {
            host,
            port,
            catalog_path,
            snapshot_path,
            checkout_delay: Duration::from_millis(checkout_delay_ms),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
