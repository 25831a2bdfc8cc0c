//! Backend connection configuration.

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use sensorboard_app::services::poller::PollSchedule;

use crate::error::HttpError;

/// Configuration of the interval-polled endpoints.
///
/// A poll period of `0` disables that target.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Root URL the endpoint paths are resolved against.
    pub base_url: String,
    /// Whole-request timeout, in seconds.
    pub timeout_secs: u64,
    /// Period of `/api/latest-readings/` (and the per-sensor histories).
    pub latest_readings_secs: u64,
    /// Period of `/realtime-redis/`.
    pub realtime_summary_secs: u64,
    /// Period of `/api/realtime/`.
    pub realtime_secs: u64,
    /// Period of `/api/historical/`.
    pub historical_secs: u64,
    /// How far back the per-sensor histories reach, in minutes.
    pub history_window_mins: u64,
    /// `limit` sent to `/api/historical/`.
    pub historical_limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/".to_string(),
            timeout_secs: 10,
            latest_readings_secs: 2,
            realtime_summary_secs: 5,
            realtime_secs: 3,
            historical_secs: 30,
            history_window_mins: 180,
            historical_limit: 100,
        }
    }
}

impl FeedConfig {
    /// Parsed base URL, with a trailing slash so relative paths append to it.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] if `base_url` is not an absolute URL.
    pub fn base_url(&self) -> Result<Url, HttpError> {
        let raw = if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        };
        parse_url(&raw)
    }

    /// Polling periods, for the application poller.
    #[must_use]
    pub fn schedule(&self) -> PollSchedule {
        let period = |secs: u64| Some(Duration::from_secs(secs)).filter(|p| !p.is_zero());
        PollSchedule {
            latest_readings: period(self.latest_readings_secs),
            realtime_summary: period(self.realtime_summary_secs),
            realtime: period(self.realtime_secs),
            historical: period(self.historical_secs),
            history_window: Duration::from_secs(self.history_window_mins.saturating_mul(60)),
            historical_limit: self.historical_limit,
        }
    }
}

/// Configuration of the server-sent event channel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Whether to connect to the stream at all.
    pub enabled: bool,
    /// Absolute URL of the event stream.
    pub url: String,
    /// Reconnect delay used until the server sends a `retry:` field, in milliseconds.
    pub retry_ms: u64,
    /// Connection timeout, in seconds. The stream itself never times out.
    pub connect_timeout_secs: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "http://127.0.0.1:8000/stream/".to_string(),
            retry_ms: 3000,
            connect_timeout_secs: 10,
        }
    }
}

impl StreamConfig {
    /// Parsed stream URL.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] if `url` is not an absolute URL.
    pub fn url(&self) -> Result<Url, HttpError> {
        parse_url(&self.url)
    }
}

pub(crate) fn parse_url(raw: &str) -> Result<Url, HttpError> {
    Url::parse(raw).map_err(|err| HttpError::InvalidUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })
}
