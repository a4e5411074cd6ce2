//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use chrono::Duration;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// How long a new session stays open.
    pub session_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `TASTEBUD_ADDR` | Server bind address | `127.0.0.1:8790` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:tastebud.db?mode=rwc` |
    /// | `SESSION_TTL_DAYS` | Lifetime of a new session in days | `30` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("TASTEBUD_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8790".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = env::var("SQLITE_PATH")
            .unwrap_or_else(|_| "sqlite:tastebud.db?mode=rwc".to_string());

        let session_ttl = match env::var("SESSION_TTL_DAYS") {
            Ok(days) => parse_ttl_days(&days)?,
            Err(_) => Duration::days(DEFAULT_SESSION_TTL_DAYS),
        };

        Ok(Self {
            addr,
            database_url,
            session_ttl,
        })
    }
}

/// Default session lifetime.
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 30;

fn parse_ttl_days(value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<i64>() {
        Ok(days) if days > 0 => Ok(Duration::days(days)),
        _ => Err(ConfigError::InvalidSessionTtl),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TASTEBUD_ADDR format")]
    InvalidAddr,

    #[error("SESSION_TTL_DAYS must be a positive integer")]
    InvalidSessionTtl,
}
