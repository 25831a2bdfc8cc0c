//! Interval-poll response schemas.

use serde::{Deserialize, Serialize};

use crate::aggregate::Summary;
use crate::reading::{HistoricalPoint, HistoryRecord, LatestReading};
use crate::time::parse_wall_clock;

/// `GET /api/latest-readings/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatestReadingsResponse {
    #[serde(default)]
    pub results: Vec<LatestReading>,
}

/// `GET /api/history/?sensor=<id>&from=<ISO8601>` — newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub results: Vec<HistoryRecord>,
}

impl HistoryResponse {
    /// Records in chronological order.
    #[must_use]
    pub fn into_chronological(self) -> Vec<HistoryRecord> {
        let mut records = self.results;
        records.reverse();
        records
    }
}

/// `GET /api/historical/?limit=N` — already time-ordered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalResponse {
    #[serde(default)]
    pub data: Vec<HistoricalPoint>,
}

/// `GET /realtime-redis/` — day counters computed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RealtimeSummaryResponse {
    #[serde(default, deserialize_with = "super::lenient::count")]
    pub total_readings: u64,
    #[serde(default, deserialize_with = "super::lenient::number")]
    pub humidity_avg: f64,
    #[serde(default, deserialize_with = "super::lenient::count")]
    pub inclination_events: u64,
    #[serde(default, deserialize_with = "super::lenient::count")]
    pub hit_events: u64,
    #[serde(default, deserialize_with = "super::lenient::optional_string")]
    pub last_timestamp: Option<String>,
    #[serde(default, deserialize_with = "super::lenient::optional_count")]
    pub last_seq: Option<u64>,
}

impl From<RealtimeSummaryResponse> for Summary {
    fn from(resp: RealtimeSummaryResponse) -> Self {
        Self {
            total_samples: resp.total_readings,
            avg_humidity: resp.humidity_avg,
            tilt_events: resp.inclination_events,
            hit_events: resp.hit_events,
            last_timestamp: resp.last_timestamp.as_deref().and_then(parse_wall_clock),
            last_sequence_number: resp.last_seq,
        }
    }
}
