//! Environment configuration.

use std::net::SocketAddr;

use tracing::Level;

use crate::server::error::config::ConfigError;

/// Database used when `DATABASE_URL` is unset, a SQLite file created on first start.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./data/cache.db?mode=rwc";

/// Address the HTTP server listens on when `BIND_ADDRESS` is unset.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

/// Runtime configuration read from the environment.
pub struct Config {
    /// GitHub personal access token. Optional at startup, fork and delete calls fail
    /// without it.
    pub github_pat: Option<String>,
    /// SeaORM connection string.
    pub database_url: String,
    /// Maximum log verbosity.
    pub log_level: Level,
    /// HTTP listen address.
    pub bind_address: SocketAddr,
}

impl Config {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let bind_address = non_empty("BIND_ADDRESS")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string())
            .trim()
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidEnvValue {
                var: "BIND_ADDRESS".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            github_pat: non_empty("GITHUB_PAT").map(|pat| pat.trim().to_string()),
            database_url: non_empty("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            log_level: parse_log_level(lookup("LOG_LEVEL").as_deref()),
            bind_address,
        })
    }
}

/// Maps a `LOG_LEVEL` value onto a tracing level, defaulting to `INFO`.
///
/// Accepts `DEBUG`, `INFO`, `WARNING`, `ERROR` and `CRITICAL` in any case; `CRITICAL`
/// maps to `ERROR`. Unknown values fall back to `INFO`.
pub fn parse_log_level(value: Option<&str>) -> Level {
    let Some(value) = value else {
        return Level::INFO;
    };

    match value.trim().to_ascii_uppercase().as_str() {
        "DEBUG" => Level::DEBUG,
        "WARNING" | "WARN" => Level::WARN,
        "ERROR" | "CRITICAL" => Level::ERROR,
        _ => Level::INFO,
    }
}
