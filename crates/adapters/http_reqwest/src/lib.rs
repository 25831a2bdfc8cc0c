//! # sensorboard-adapter-http-reqwest
//!
//! Driven adapter for the readings backend, built on `reqwest`.
//!
//! ## Responsibilities
//! - Implement the `ReadingsSource` port over the interval-polled JSON endpoints
//!   ([`HttpFeedClient`])
//! - Consume the server-sent event channel, decode its frames and reconnect
//!   after failures ([`SseClient`])
//! - Translate wire schemas into domain types; never hold dashboard state
//!
//! ## Dependency rule
//! Depends on `sensorboard-app` (for port traits) and `sensorboard-domain`.

pub mod config;
pub mod error;
pub mod feed;
pub mod sse;
pub mod stream;

pub use config::{FeedConfig, StreamConfig};
pub use error::HttpError;
pub use feed::HttpFeedClient;
pub use stream::SseClient;
