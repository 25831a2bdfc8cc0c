//! Series extraction — turn readings into chart points.

use std::fmt;
use std::str::FromStr;

use sensorboard_domain::aggregate::Summary;
use sensorboard_domain::chart::ChartPoint;
use sensorboard_domain::reading::{HistoricalPoint, HistoryRecord};

/// Which field of a sensor history to plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorMetric {
    Humidity,
    Tilt,
    Vibration,
}

impl SensorMetric {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Humidity => "humidity",
            Self::Tilt => "tilt",
            Self::Vibration => "vibration",
        }
    }

    /// Whether the metric is an on/off signal rather than a level.
    #[must_use]
    pub fn is_binary(self) -> bool {
        !matches!(self, Self::Humidity)
    }
}

impl fmt::Display for SensorMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a metric name is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric: {0}")]
pub struct UnknownMetric(pub String);

impl FromStr for SensorMetric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "humidity" => Ok(Self::Humidity),
            "tilt" | "inclination" => Ok(Self::Tilt),
            "vibration" | "hit" => Ok(Self::Vibration),
            other => Err(UnknownMetric(other.to_string())),
        }
    }
}

/// One point per history record, in the order given.
#[must_use]
pub fn history_series(records: &[HistoryRecord], metric: SensorMetric) -> Vec<ChartPoint> {
    records
        .iter()
        .map(|r| match metric {
            SensorMetric::Humidity => ChartPoint::timed(r.recorded_at, r.humidity_pct),
            SensorMetric::Tilt => ChartPoint::flag(r.recorded_at, r.tilt),
            SensorMetric::Vibration => ChartPoint::flag(r.recorded_at, r.vibration),
        })
        .collect()
}

/// Humidity trend points.
#[must_use]
pub fn historical_series(points: &[HistoricalPoint]) -> Vec<ChartPoint> {
    points
        .iter()
        .map(|p| ChartPoint::timed(p.timestamp, p.humidity))
        .collect()
}

/// Labelled tilt and hit counters of a summary, for the events bar chart.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn event_counts_series(summary: &Summary) -> Vec<ChartPoint> {
    vec![
        ChartPoint::labeled("Tilt", summary.tilt_events as f64),
        ChartPoint::labeled("Hits", summary.hit_events as f64),
    ]
}
