//! Chart points — immutable inputs of the chart renderers.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Horizontal key of a chart point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisKey {
    /// Placed proportionally to its instant.
    Time(Timestamp),
    /// Placed by index, labelled with the text.
    Label(String),
}

/// One `{ time, value }` or `{ label, value }` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub key: AxisKey,
    pub value: f64,
}

impl ChartPoint {
    /// A point placed on a time axis.
    #[must_use]
    pub fn timed(time: Timestamp, value: f64) -> Self {
        Self {
            key: AxisKey::Time(time),
            value,
        }
    }

    /// A point placed by index and labelled.
    #[must_use]
    pub fn labeled(label: impl Into<String>, value: f64) -> Self {
        Self {
            key: AxisKey::Label(label.into()),
            value,
        }
    }

    /// A `0`/`1` point for binary event series.
    #[must_use]
    pub fn flag(time: Timestamp, on: bool) -> Self {
        Self::timed(time, if on { 1.0 } else { 0.0 })
    }

    /// Whether the value counts as "on" in a binary series.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.value != 0.0 && !self.value.is_nan()
    }

    /// Instant of the point, if it lives on a time axis.
    #[must_use]
    pub fn time(&self) -> Option<Timestamp> {
        match &self.key {
            AxisKey::Time(t) => Some(*t),
            AxisKey::Label(_) => None,
        }
    }

    /// Text shown under the point on the horizontal axis.
    #[must_use]
    pub fn axis_label(&self) -> String {
        match &self.key {
            AxisKey::Time(t) => t.format("%H:%M").to_string(),
            AxisKey::Label(label) => label.clone(),
        }
    }
}
