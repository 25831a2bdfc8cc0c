//! Readings returned by the polling endpoints, and the alert rules applied
//! to them.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Humidity below this value is an alert.
pub const HUMIDITY_ALERT_LOW: f64 = 10.0;

/// Humidity above this value is an alert.
pub const HUMIDITY_ALERT_HIGH: f64 = 90.0;

/// Latest known reading of one sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestReading {
    #[serde(deserialize_with = "crate::payload::lenient::string")]
    pub sensor: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::payload::lenient::number")]
    pub humidity_pct: f64,
    #[serde(default, deserialize_with = "crate::payload::lenient::flag")]
    pub tilt: bool,
    #[serde(default, deserialize_with = "crate::payload::lenient::flag")]
    pub vibration: bool,
    #[serde(deserialize_with = "crate::payload::lenient::timestamp")]
    pub recorded_at: Timestamp,
}

impl LatestReading {
    /// Name to show for the sensor, falling back to its identifier.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.sensor,
        }
    }

    /// Whether this reading should be flagged on the dashboard.
    #[must_use]
    pub fn is_alert(&self) -> bool {
        humidity_out_of_range(self.humidity_pct) || self.tilt || self.vibration
    }
}

/// One point of a sensor history, as returned newest-first by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(deserialize_with = "crate::payload::lenient::timestamp")]
    pub recorded_at: Timestamp,
    #[serde(default, deserialize_with = "crate::payload::lenient::number")]
    pub humidity_pct: f64,
    #[serde(default, deserialize_with = "crate::payload::lenient::flag")]
    pub tilt: bool,
    #[serde(default, deserialize_with = "crate::payload::lenient::flag")]
    pub vibration: bool,
}

/// One point of the long-term humidity series (already time-ordered).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    #[serde(deserialize_with = "crate::payload::lenient::timestamp")]
    pub timestamp: Timestamp,
    #[serde(default, deserialize_with = "crate::payload::lenient::number")]
    pub humidity: f64,
}

/// Most recent reading plus today's statistics computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeSnapshot {
    #[serde(default, deserialize_with = "crate::payload::lenient::number")]
    pub humidity: f64,
    #[serde(default, deserialize_with = "crate::payload::lenient::flag")]
    pub inclination: bool,
    #[serde(default, deserialize_with = "crate::payload::lenient::flag")]
    pub vibration: bool,
    #[serde(deserialize_with = "crate::payload::lenient::timestamp")]
    pub timestamp: Timestamp,
    #[serde(default)]
    pub stats: RealtimeStats,
}

impl RealtimeSnapshot {
    /// Same rule as [`LatestReading::is_alert`].
    #[must_use]
    pub fn is_alert(&self) -> bool {
        humidity_out_of_range(self.humidity) || self.inclination || self.vibration
    }
}

/// Day statistics attached to a [`RealtimeSnapshot`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RealtimeStats {
    #[serde(default, deserialize_with = "crate::payload::lenient::number")]
    pub avg_humidity_today: f64,
    #[serde(default, deserialize_with = "crate::payload::lenient::number")]
    pub alert_percentage_today: f64,
}

/// Overall dashboard status derived from the latest readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardStatus {
    NoData,
    Ok,
    Alert,
}

impl BoardStatus {
    /// `Alert` if any reading is in alert, `NoData` if there are none.
    #[must_use]
    pub fn from_readings(readings: &[LatestReading]) -> Self {
        if readings.is_empty() {
            Self::NoData
        } else if readings.iter().any(LatestReading::is_alert) {
            Self::Alert
        } else {
            Self::Ok
        }
    }

    /// Short label shown on the status badge.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NoData => "No data",
            Self::Ok => "OK",
            Self::Alert => "Alert",
        }
    }
}

/// Whether a humidity value lies outside the safe band.
#[must_use]
pub fn humidity_out_of_range(humidity_pct: f64) -> bool {
    humidity_pct < HUMIDITY_ALERT_LOW || humidity_pct > HUMIDITY_ALERT_HIGH
}

/// Humidity clamped to `[0, 100]` for meters.
#[must_use]
pub fn meter_percent(humidity_pct: f64) -> f64 {
    if humidity_pct.is_nan() {
        0.0
    } else {
        humidity_pct.clamp(0.0, 100.0)
    }
}

/// Most recent `recorded_at` across readings.
#[must_use]
pub fn last_updated(readings: &[LatestReading]) -> Option<Timestamp> {
    readings.iter().map(|r| r.recorded_at).max()
}
