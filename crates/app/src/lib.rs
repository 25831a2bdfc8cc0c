//! # sensorboard-app
//!
//! Application layer — use-cases, the chart renderer and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ReadingsSource` — pull the backend's polled endpoints
//!   - `BatchStream` — receive raw push-stream messages and connection changes
//!   - `Surface` — a 2D drawing target for charts
//!   - `EventPublisher` — broadcast dashboard changes
//! - Own the **live aggregator** (daily counters over streamed batches)
//! - Render line, bar and binary-event charts onto any `Surface`
//! - Orchestrate polling and stream consumption into a render-ready snapshot
//!
//! ## Dependency rule
//! Depends on `sensorboard-domain` only (plus `tokio` for locks, channels and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod aggregator;
pub mod chart;
pub mod event_bus;
pub mod ports;
pub mod services;
