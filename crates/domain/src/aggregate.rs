//! Daily aggregate — running counters since the last observed day boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::sample::Batch;
use crate::time::WallClock;

/// Running counters for one day of live samples.
///
/// Invariant: `total_samples` is the sum of the sizes of every batch applied
/// since the aggregate was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub day: NaiveDate,
    pub total_samples: u64,
    pub humidity_sum: f64,
    pub tilt_events: u64,
    pub hit_events: u64,
    pub last_timestamp: Option<WallClock>,
    pub last_sequence_number: Option<u64>,
}

impl DailyAggregate {
    /// Create zeroed counters for `day`.
    #[must_use]
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day,
            total_samples: 0,
            humidity_sum: 0.0,
            tilt_events: 0,
            hit_events: 0,
            last_timestamp: None,
            last_sequence_number: None,
        }
    }

    /// Fold a batch into the counters. The caller is responsible for the day
    /// check; this never resets.
    pub fn apply(&mut self, batch: &Batch) {
        self.total_samples += batch.samples.len() as u64;
        self.humidity_sum += batch
            .samples
            .iter()
            .map(|s| if s.humidity_pct.is_finite() { s.humidity_pct } else { 0.0 })
            .sum::<f64>();
        self.tilt_events += batch.samples.iter().filter(|s| s.tilt).count() as u64;
        self.hit_events += batch.samples.iter().filter(|s| s.vibration).count() as u64;
        self.last_timestamp = Some(batch.timestamp);
        self.last_sequence_number = Some(batch.sequence_number);
    }

    /// Average humidity, or `0.0` when nothing was counted yet.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_humidity(&self) -> f64 {
        if self.total_samples == 0 {
            0.0
        } else {
            self.humidity_sum / self.total_samples as f64
        }
    }

    /// Render-ready snapshot of the counters.
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary {
            total_samples: self.total_samples,
            avg_humidity: self.avg_humidity(),
            tilt_events: self.tilt_events,
            hit_events: self.hit_events,
            last_timestamp: self.last_timestamp,
            last_sequence_number: self.last_sequence_number,
        }
    }
}

/// Render-ready view of the live counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_samples: u64,
    pub avg_humidity: f64,
    pub tilt_events: u64,
    pub hit_events: u64,
    pub last_timestamp: Option<WallClock>,
    pub last_sequence_number: Option<u64>,
}

impl Summary {
    /// Share of hit and tilt events among all detected events.
    #[must_use]
    pub fn event_breakdown(&self) -> EventBreakdown {
        EventBreakdown::new(self.hit_events, self.tilt_events)
    }
}

/// Hit vs. tilt event split, in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBreakdown {
    pub hit_events: u64,
    pub tilt_events: u64,
    pub hit_percent: u64,
    pub tilt_percent: u64,
}

impl EventBreakdown {
    /// Compute percentages; a zero total is treated as 1.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn new(hit_events: u64, tilt_events: u64) -> Self {
        let total = (hit_events + tilt_events).max(1) as f64;
        let percent = |n: u64| (n as f64 / total * 100.0).round() as u64;
        Self {
            hit_events,
            tilt_events,
            hit_percent: percent(hit_events),
            tilt_percent: percent(tilt_events),
        }
    }
}
