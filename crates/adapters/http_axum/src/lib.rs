//! # sensorboard-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **server-side-rendered HTML dashboard** (askama) that refreshes
//!   itself with `<meta http-equiv="refresh">`
//! - Serve **JSON snapshots** of the live summary and the latest readings
//! - Stream every dashboard change as **server-sent events**
//! - Serve **SVG charts** drawn by the chart renderers onto a
//!   [`PlottersSurface`](sensorboard_adapter_render_plotters::PlottersSurface)
//!
//! ## Dependency rule
//! Depends on `sensorboard-app` (services and renderers), `sensorboard-domain`
//! (response types) and the plotters surface. Never leaks axum types into the
//! application layer.

pub mod api;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;

pub use config::{DashboardConfig, DashboardSettings, InvalidColor, Palette};
pub use state::AppState;
