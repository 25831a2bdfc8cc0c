//! Live aggregator — the "since midnight" state machine behind the live cards.
//!
//! ```text
//!            batch(day)                    batch(day' != day)
//!   Idle ──────────────▶ Accumulating(day) ───────────────────▶ Accumulating(day')
//!                              │  ▲          (counters reset)
//!                              └──┘ batch(day)
//! ```
//!
//! The day key is the date part of the batch wall-clock timestamp, not a
//! reset signal from the server. Across timezones or DST changes of the
//! source this can reset early or late; it is kept as-is on purpose so the
//! counters match what the source calls "today".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use sensorboard_domain::aggregate::{DailyAggregate, Summary};
use sensorboard_domain::sample::Batch;

/// What to do with a batch whose sequence number was already seen today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// At-least-once delivery: every batch counts, duplicates included.
    #[default]
    AcceptAll,
    /// Ignore a same-day batch whose sequence number is not greater than
    /// the last applied one.
    DropNonIncreasing,
}

/// Aggregator state.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregatorState {
    /// No batch seen yet.
    Idle,
    /// Counting samples of the contained day.
    Accumulating(DailyAggregate),
}

/// Result of offering a batch (or a raw message) to the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The batch was counted.
    Applied {
        /// Whether the counters were reset first because the day changed.
        day_changed: bool,
    },
    /// The batch left the state untouched.
    Ignored(IgnoreReason),
}

/// Why a batch left the state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The message could not be turned into a batch.
    Malformed(String),
    /// Dropped by [`DuplicatePolicy::DropNonIncreasing`].
    StaleSequence { sequence_number: u64, last: u64 },
}

/// Running daily counters over a stream of batches.
#[derive(Debug, Clone)]
pub struct LiveAggregator {
    state: AggregatorState,
    policy: DuplicatePolicy,
}

impl Default for LiveAggregator {
    fn default() -> Self {
        Self::new(DuplicatePolicy::default())
    }
}

impl LiveAggregator {
    /// Create an idle aggregator.
    #[must_use]
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            state: AggregatorState::Idle,
            policy,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &AggregatorState {
        &self.state
    }

    /// Day being accumulated, if any.
    #[must_use]
    pub fn current_day(&self) -> Option<NaiveDate> {
        match &self.state {
            AggregatorState::Idle => None,
            AggregatorState::Accumulating(agg) => Some(agg.day),
        }
    }

    /// Fold a batch into the counters, resetting them first when the batch
    /// belongs to a different day than the current one.
    pub fn apply_batch(&mut self, batch: &Batch) -> ApplyOutcome {
        let day = batch.day();
        match &mut self.state {
            AggregatorState::Accumulating(agg) if agg.day == day => {
                if let Some(reason) = self.policy.check(agg, batch) {
                    return ApplyOutcome::Ignored(reason);
                }
                agg.apply(batch);
                ApplyOutcome::Applied { day_changed: false }
            }
            _ => {
                let mut agg = DailyAggregate::new(day);
                agg.apply(batch);
                self.state = AggregatorState::Accumulating(agg);
                ApplyOutcome::Applied { day_changed: true }
            }
        }
    }

    /// Render-ready snapshot. All zeros while idle.
    #[must_use]
    pub fn current_summary(&self) -> Summary {
        match &self.state {
            AggregatorState::Idle => Summary::default(),
            AggregatorState::Accumulating(agg) => agg.summary(),
        }
    }
}

impl DuplicatePolicy {
    fn check(self, agg: &DailyAggregate, batch: &Batch) -> Option<IgnoreReason> {
        match (self, agg.last_sequence_number) {
            (Self::DropNonIncreasing, Some(last)) if batch.sequence_number <= last => {
                Some(IgnoreReason::StaleSequence {
                    sequence_number: batch.sequence_number,
                    last,
                })
            }
            _ => None,
        }
    }
}
