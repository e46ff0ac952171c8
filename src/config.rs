//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use anyhow::bail;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Beacon node REST API endpoint
    pub beacon_endpoint: String,
    /// HTTP server port
    pub server_port: u16,
    /// Timeout in seconds for each beacon node request
    pub request_timeout_secs: u64,
    /// Cache entry TTL in seconds
    pub cache_ttl_secs: u64,
    /// Maximum number of entries the cache can hold
    pub cache_max_size: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `BEACON_API_ENDPOINT` - Beacon node REST endpoint (default: http://127.0.0.1:5052)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `REQUEST_TIMEOUT_SECS` - Beacon node request timeout (default: 30)
    /// - `CACHE_TTL_SECS` - Cache entry TTL in seconds (default: 300)
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 1000)
    pub fn from_env() -> Self {
        Self {
            beacon_endpoint: env::var("BEACON_API_ENDPOINT")
                .unwrap_or_else(|_| "http://127.0.0.1:5052".to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            cache_ttl_secs: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            cache_max_size: env::var("CACHE_MAX_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
        }
    }

    /// Validates configured values.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.beacon_endpoint.is_empty() {
            bail!("beacon endpoint must not be empty");
        }
        if self.request_timeout_secs == 0 {
            bail!("request timeout must be positive");
        }
        if self.cache_ttl_secs == 0 {
            bail!("cache TTL must be positive");
        }
        if self.cache_max_size == 0 {
            bail!("cache max size must be positive");
        }
        Ok(())
    }

    /// Per-request timeout for beacon node calls.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// TTL applied to every cache entry.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            beacon_endpoint: "http://127.0.0.1:5052".to_string(),
            server_port: 8080,
            request_timeout_secs: 30,
            cache_ttl_secs: 300,
            cache_max_size: 1000,
        }
    }
}
