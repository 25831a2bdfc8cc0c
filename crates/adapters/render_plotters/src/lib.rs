//! # sensorboard-adapter-render-plotters
//!
//! Driven adapter implementing the chart `Surface` port with `plotters`.
//!
//! ## Responsibilities
//! - Record the primitives a renderer draws ([`PlottersSurface`])
//! - Replay them onto a plotters `SVGBackend` to produce an SVG document
//!
//! ## Dependency rule
//! Depends on `sensorboard-app` (for the `Surface` port) only.

pub mod error;
pub mod surface;

pub use error::RenderError;
pub use surface::PlottersSurface;
