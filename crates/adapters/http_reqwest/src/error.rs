//! HTTP adapter error types.

use sensorboard_domain::error::{PayloadError, SensorboardError};

/// Errors specific to the HTTP client adapter.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// A configured URL could not be parsed.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The reqwest client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or the body could not be read.
    #[error("request failed")]
    Request(#[source] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    /// The body does not match the expected schema.
    #[error("invalid response body")]
    Payload(#[source] PayloadError),
}

impl HttpError {
    /// Convert into a [`SensorboardError`] for propagation across port
    /// boundaries.
    pub fn into_domain(self) -> SensorboardError {
        match self {
            Self::Payload(err) => SensorboardError::Payload(err),
            other => SensorboardError::Transport(Box::new(other)),
        }
    }
}

impl From<HttpError> for SensorboardError {
    fn from(err: HttpError) -> Self {
        err.into_domain()
    }
}
