//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SensorboardError`] via `#[from]` when crossing a port boundary.

/// Base error for everything that crosses a port boundary.
#[derive(Debug, thiserror::Error)]
pub enum SensorboardError {
    /// The backend answered, but the body could not be turned into domain types.
    #[error("invalid payload")]
    Payload(#[from] PayloadError),

    /// The backend could not be reached or answered with a failure status.
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Reasons a wire payload is rejected at the boundary.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The body is not valid JSON or does not match the expected shape.
    #[error("malformed JSON payload")]
    Json(#[from] serde_json::Error),

    /// A timestamp field could not be parsed.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
