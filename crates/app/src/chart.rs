//! Chart rendering — line, bar and binary-event charts drawn onto a [`Surface`].
//!
//! Renderers are pure functions of `(surface, points, options)`: every call
//! clears the surface first, so redrawing with the same inputs produces the
//! same picture.
//!
//! [`Surface`]: crate::ports::Surface

pub mod labels;
pub mod render;
pub mod scale;
pub mod series;
pub mod smoothing;

#[cfg(test)]
pub(crate) mod recording;

pub use render::{ChartOptions, RenderOutcome, render_bar, render_binary_events, render_line};
pub use series::SensorMetric;
