//! Server-sent event client feeding the `BatchStream` port.

use std::time::Duration;

use reqwest::Url;
use reqwest::header::ACCEPT;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;

use sensorboard_app::ports::StreamEvent;
use sensorboard_domain::event::ConnectionStatus;

use crate::config::StreamConfig;
use crate::error::HttpError;
use crate::sse::SseDecoder;

/// Connects to the event stream and keeps reconnecting.
///
/// Emits `Connecting` before each attempt, `Connected` once the response
/// headers arrived, and `Error` whenever the connection fails or closes.
/// The reconnect delay is the last `retry:` value sent by the server, or the
/// configured default.
#[derive(Debug, Clone)]
pub struct SseClient {
    http: reqwest::Client,
    url: Url,
    default_retry: Duration,
}

impl SseClient {
    /// Build a client for the configured stream.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] for a bad URL, or
    /// [`HttpError::Client`] if the TLS backend cannot be initialised.
    pub fn new(config: &StreamConfig) -> Result<Self, HttpError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(HttpError::Client)?;
        Ok(Self {
            http,
            url: config.url()?,
            default_retry: Duration::from_millis(config.retry_ms),
        })
    }

    /// Start the connection loop.
    ///
    /// The loop stops once the returned receiver is dropped.
    pub fn spawn(self, capacity: usize) -> (mpsc::Receiver<StreamEvent>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(async move { self.run(tx).await });
        (rx, handle)
    }

    async fn run(self, tx: mpsc::Sender<StreamEvent>) {
        let mut retry = self.default_retry;
        loop {
            if tx
                .send(StreamEvent::Status(ConnectionStatus::Connecting))
                .await
                .is_err()
            {
                return;
            }
            match self.consume(&tx, &mut retry).await {
                Ok(()) => tracing::info!(url = %self.url, "event stream closed"),
                Err(err) => tracing::warn!(url = %self.url, error = %err, "event stream failed"),
            }
            if tx
                .send(StreamEvent::Status(ConnectionStatus::Error))
                .await
                .is_err()
            {
                return;
            }
            tracing::debug!(?retry, "reconnecting to event stream");
            tokio::time::sleep(retry).await;
        }
    }

    /// Read one connection to its end, forwarding every message frame.
    async fn consume(
        &self,
        tx: &mpsc::Sender<StreamEvent>,
        retry: &mut Duration,
    ) -> Result<(), HttpError> {
        let response = self
            .http
            .get(self.url.clone())
            .header(ACCEPT, "text/event-stream")
            .send()
            .await
            .map_err(HttpError::Request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status(status));
        }
        if tx
            .send(StreamEvent::Status(ConnectionStatus::Connected))
            .await
            .is_err()
        {
            return Ok(());
        }

        let mut decoder = SseDecoder::new();
        let mut body = std::pin::pin!(response.bytes_stream());
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(HttpError::Request)?;
            for frame in decoder.push(&chunk) {
                if !frame.is_message() {
                    tracing::debug!(event = ?frame.event, "skipping non-message event");
                    continue;
                }
                if tx.send(StreamEvent::Message(frame.data)).await.is_err() {
                    return Ok(());
                }
            }
            if let Some(announced) = decoder.retry() {
                *retry = announced;
            }
        }
        Ok(())
    }
}
