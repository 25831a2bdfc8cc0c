//! [`ReadingsSource`] implementation over the backend JSON endpoints.

use std::time::Duration;

use chrono::SecondsFormat;
use reqwest::Url;
use serde::de::DeserializeOwned;

use sensorboard_app::ports::ReadingsSource;
use sensorboard_domain::aggregate::Summary;
use sensorboard_domain::error::{PayloadError, SensorboardError};
use sensorboard_domain::payload::{
    HistoricalResponse, HistoryResponse, LatestReadingsResponse, RealtimeSummaryResponse,
};
use sensorboard_domain::reading::{HistoricalPoint, HistoryRecord, LatestReading, RealtimeSnapshot};
use sensorboard_domain::time::Timestamp;

use crate::config::FeedConfig;
use crate::error::HttpError;

const LATEST_READINGS: &str = "api/latest-readings/";
const HISTORY: &str = "api/history/";
const REALTIME_SUMMARY: &str = "realtime-redis/";
const REALTIME: &str = "api/realtime/";
const HISTORICAL: &str = "api/historical/";

/// Polls the readings backend.
#[derive(Debug, Clone)]
pub struct HttpFeedClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpFeedClient {
    /// Build a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] for a bad base URL, or
    /// [`HttpError::Client`] if the TLS backend cannot be initialised.
    pub fn new(config: &FeedConfig) -> Result<Self, HttpError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(HttpError::Client)?;
        Ok(Self {
            http,
            base_url: config.base_url()?,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, HttpError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|err| HttpError::InvalidUrl {
                url: path.to_string(),
                reason: err.to_string(),
            })?;
        tracing::trace!(%url, "polling endpoint");

        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(HttpError::Request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status(status));
        }
        let body = response.bytes().await.map_err(HttpError::Request)?;
        serde_json::from_slice(&body).map_err(|err| HttpError::Payload(PayloadError::Json(err)))
    }
}

impl ReadingsSource for HttpFeedClient {
    async fn fetch_latest_readings(&self) -> Result<Vec<LatestReading>, SensorboardError> {
        let response: LatestReadingsResponse = self.get_json(LATEST_READINGS, &[]).await?;
        Ok(response.results)
    }

    async fn fetch_history(
        &self,
        sensor: &str,
        from: Timestamp,
    ) -> Result<Vec<HistoryRecord>, SensorboardError> {
        let query = [
            ("sensor", sensor.to_string()),
            ("from", from.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ];
        let response: HistoryResponse = self.get_json(HISTORY, &query).await?;
        Ok(response.into_chronological())
    }

    async fn fetch_realtime_summary(&self) -> Result<Summary, SensorboardError> {
        let response: RealtimeSummaryResponse = self.get_json(REALTIME_SUMMARY, &[]).await?;
        Ok(response.into())
    }

    async fn fetch_realtime(&self) -> Result<RealtimeSnapshot, SensorboardError> {
        Ok(self.get_json(REALTIME, &[]).await?)
    }

    async fn fetch_historical(
        &self,
        limit: usize,
    ) -> Result<Vec<HistoricalPoint>, SensorboardError> {
        let response: HistoricalResponse = self
            .get_json(HISTORICAL, &[("limit", limit.to_string())])
            .await?;
        Ok(response.data)
    }
}
