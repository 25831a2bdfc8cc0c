//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `sensorboard.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use sensorboard_adapter_http_axum::DashboardConfig;
use sensorboard_adapter_http_reqwest::{FeedConfig, StreamConfig};
use sensorboard_app::aggregator::DuplicatePolicy;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Polled backend endpoints.
    pub feed: FeedConfig,
    /// Server-sent event channel.
    pub stream: StreamConfig,
    /// Live counters.
    pub aggregator: AggregatorConfig,
    /// Page refresh and chart appearance.
    pub dashboard: DashboardConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Capacity of the dashboard event channel.
    pub event_capacity: usize,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// What to do with batches whose sequence number does not increase.
    pub duplicates: DuplicatePolicy,
}

impl Config {
    /// Load configuration from `sensorboard.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("sensorboard.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SENSORBOARD_HOST") {
            self.server.host = val;
        }
        if let Some(port) = lookup("SENSORBOARD_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some((host, port)) = lookup("SENSORBOARD_BIND")
            .as_deref()
            .and_then(|val| val.rsplit_once(':'))
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("SENSORBOARD_BASE_URL") {
            self.feed.base_url = val;
        }
        if let Some(val) = lookup("SENSORBOARD_STREAM_URL") {
            self.stream.url = val;
        }
        if let Some(val) = lookup("SENSORBOARD_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Validation(msg.to_string()));
        if self.server.port == 0 {
            return invalid("port must be non-zero");
        }
        if self.server.event_capacity == 0 {
            return invalid("event_capacity must be non-zero");
        }
        if self.feed.timeout_secs == 0 {
            return invalid("feed timeout_secs must be non-zero");
        }
        self.feed
            .base_url()
            .map_err(|err| ConfigError::Validation(err.to_string()))?;
        if self.stream.enabled {
            if self.stream.retry_ms == 0 {
                return invalid("stream retry_ms must be non-zero");
            }
            if self.stream.connect_timeout_secs == 0 {
                return invalid("stream connect_timeout_secs must be non-zero");
            }
            self.stream
                .url()
                .map_err(|err| ConfigError::Validation(err.to_string()))?;
        }
        if self.dashboard.chart_width == 0 || self.dashboard.chart_height == 0 {
            return invalid("chart size must be non-zero");
        }
        self.dashboard
            .settings()
            .map_err(|err| ConfigError::Validation(err.to_string()))?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            event_capacity: 256,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "sensorboardd=info,sensorboard=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
