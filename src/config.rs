//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default number of seconds between expiry sweeps.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 5;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Raw auction duration setting (e.g. "10m"), resolved by `DurationResolver`
    pub auction_interval: Option<String>,
    /// Expiry sweep interval in seconds
    pub sweep_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// SQLite connection URL; the in-memory store is used when unset
    pub database_url: Option<String>,
}

/// The pair of settings the expiry scheduler is started with.
#[derive(Debug, Clone)]
pub struct ExpirySettings {
    /// Raw auction duration setting
    pub auction_interval: Option<String>,
    /// Time between two sweeps
    pub sweep_interval: Duration,
}

impl Default for ExpirySettings {
    fn default() -> Self {
        Self {
            auction_interval: None,
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `AUCTION_INTERVAL` - Auction duration, e.g. "10m" (default: 10 minutes)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 5)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `DATABASE_URL` - SQLite URL (default: in-memory store)
    pub fn from_env() -> Self {
        Self {
            auction_interval: env::var("AUCTION_INTERVAL").ok(),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            database_url: env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
        }
    }

    /// Returns the settings consumed by the expiry scheduler.
    pub fn expiry_settings(&self) -> ExpirySettings {
        ExpirySettings {
            auction_interval: self.auction_interval.clone(),
            sweep_interval: Duration::from_secs(self.sweep_interval),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auction_interval: None,
            sweep_interval: DEFAULT_SWEEP_INTERVAL_SECS,
            server_port: 8080,
            database_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.auction_interval.is_none());
        assert_eq!(config.sweep_interval, 5);
        assert_eq!(config.server_port, 8080);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_expiry_settings_from_config() {
        let config = Config {
            auction_interval: Some("30s".to_string()),
            sweep_interval: 2,
            ..Config::default()
        };

        let settings = config.expiry_settings();
        assert_eq!(settings.auction_interval.as_deref(), Some("30s"));
        assert_eq!(settings.sweep_interval, Duration::from_secs(2));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("AUCTION_INTERVAL");
        env::remove_var("SWEEP_INTERVAL");
        env::remove_var("SERVER_PORT");
        env::remove_var("DATABASE_URL");

        let config = Config::from_env();
        assert!(config.auction_interval.is_none());
        assert_eq!(config.sweep_interval, 5);
        assert_eq!(config.server_port, 8080);
        assert!(config.database_url.is_none());
    }
}
