//! Samples and batches — the unit of work of the live aggregate.

use serde::{Deserialize, Serialize};

use crate::time::{WallClock, day_of};

/// One sensor reading carried by a stream message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: WallClock,
    pub sensor_id: String,
    /// Soil humidity in percent. Missing or non-numeric inputs read as `0.0`.
    pub humidity_pct: f64,
    pub tilt: bool,
    pub vibration: bool,
}

/// An ordered group of samples that arrived in one stream message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub sequence_number: u64,
    pub timestamp: WallClock,
    pub samples: Vec<Sample>,
}

impl Batch {
    /// Create a batch with no samples yet.
    #[must_use]
    pub fn new(sequence_number: u64, timestamp: WallClock) -> Self {
        Self {
            sequence_number,
            timestamp,
            samples: Vec::new(),
        }
    }

    /// Append a sample stamped with the batch timestamp.
    #[must_use]
    pub fn with_sample(
        mut self,
        sensor_id: impl Into<String>,
        humidity_pct: f64,
        tilt: bool,
        vibration: bool,
    ) -> Self {
        self.samples.push(Sample {
            timestamp: self.timestamp,
            sensor_id: sensor_id.into(),
            humidity_pct,
            tilt,
            vibration,
        });
        self
    }

    /// Number of samples in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the batch carries no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Day key of the batch (date part of its wall-clock timestamp).
    #[must_use]
    pub fn day(&self) -> chrono::NaiveDate {
        day_of(&self.timestamp)
    }
}
