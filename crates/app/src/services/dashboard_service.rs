//! Dashboard service — the render-ready snapshot fed by the pollers and the
//! stream forwarder.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tokio::sync::RwLock;

use sensorboard_domain::aggregate::Summary;
use sensorboard_domain::error::SensorboardError;
use sensorboard_domain::event::{ConnectionStatus, DashboardEvent, PollTarget};
use sensorboard_domain::reading::{
    BoardStatus, HistoricalPoint, HistoryRecord, LatestReading, RealtimeSnapshot, last_updated,
};
use sensorboard_domain::time::Timestamp;

use crate::ports::EventPublisher;

/// Everything the dashboard shows, apart from the live counters.
///
/// Every field keeps its last good value when a refresh fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub readings: Vec<LatestReading>,
    /// Chronological history per sensor id.
    pub histories: BTreeMap<String, Vec<HistoryRecord>>,
    pub remote_summary: Option<Summary>,
    pub realtime: Option<RealtimeSnapshot>,
    pub historical: Vec<HistoricalPoint>,
    pub stream_status: ConnectionStatus,
    pub poll_status: HashMap<PollTarget, ConnectionStatus>,
}

impl DashboardSnapshot {
    /// Overall status derived from the latest readings.
    #[must_use]
    pub fn board_status(&self) -> BoardStatus {
        BoardStatus::from_readings(&self.readings)
    }

    /// Most recent `recorded_at` across the latest readings.
    #[must_use]
    pub fn last_updated(&self) -> Option<Timestamp> {
        last_updated(&self.readings)
    }

    /// Status of one poll target; `Connecting` until its first attempt.
    #[must_use]
    pub fn poll_status(&self, target: PollTarget) -> ConnectionStatus {
        self.poll_status.get(&target).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn history(&self, sensor: &str) -> &[HistoryRecord] {
        self.histories
            .get(sensor)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Application service owning the [`DashboardSnapshot`].
///
/// Every mutation publishes a [`DashboardEvent`].
pub struct DashboardService<EP> {
    state: RwLock<DashboardSnapshot>,
    publisher: EP,
}

impl<EP: EventPublisher> DashboardService<EP> {
    pub fn new(publisher: EP) -> Self {
        Self {
            state: RwLock::new(DashboardSnapshot::default()),
            publisher,
        }
    }

    /// A copy of the current snapshot.
    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.state.read().await.clone()
    }

    /// Chronological history of one sensor, empty when unknown.
    pub async fn history(&self, sensor: &str) -> Vec<HistoryRecord> {
        self.state.read().await.history(sensor).to_vec()
    }

    /// Replace the latest readings. Histories of sensors that disappeared
    /// are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the change event cannot be published.
    pub async fn replace_readings(
        &self,
        readings: Vec<LatestReading>,
    ) -> Result<(), SensorboardError> {
        let event = {
            let mut state = self.state.write().await;
            state
                .histories
                .retain(|sensor, _| readings.iter().any(|r| &r.sensor == sensor));
            state.readings = readings;
            DashboardEvent::ReadingsUpdated {
                status: state.board_status(),
                count: state.readings.len(),
            }
        };
        self.publisher.publish(event).await
    }

    /// Replace the chart dataset of one sensor.
    ///
    /// # Errors
    ///
    /// Returns an error if the change event cannot be published.
    pub async fn replace_history(
        &self,
        sensor: &str,
        records: Vec<HistoryRecord>,
    ) -> Result<(), SensorboardError> {
        let points = records.len();
        self.state
            .write()
            .await
            .histories
            .insert(sensor.to_string(), records);
        self.publisher
            .publish(DashboardEvent::HistoryUpdated {
                sensor: sensor.to_string(),
                points,
            })
            .await
    }

    /// Store the backend-computed day summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the change event cannot be published.
    pub async fn set_remote_summary(&self, summary: Summary) -> Result<(), SensorboardError> {
        self.state.write().await.remote_summary = Some(summary.clone());
        self.publisher
            .publish(DashboardEvent::RemoteSummaryUpdated { summary })
            .await
    }

    /// Store the most recent single reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the change event cannot be published.
    pub async fn set_realtime(&self, snapshot: RealtimeSnapshot) -> Result<(), SensorboardError> {
        let event = DashboardEvent::RealtimeUpdated {
            humidity: snapshot.humidity,
            alert: snapshot.is_alert(),
        };
        self.state.write().await.realtime = Some(snapshot);
        self.publisher.publish(event).await
    }

    /// Replace the humidity trend series.
    ///
    /// # Errors
    ///
    /// Returns an error if the change event cannot be published.
    pub async fn set_historical(
        &self,
        points: Vec<HistoricalPoint>,
    ) -> Result<(), SensorboardError> {
        let count = points.len();
        self.state.write().await.historical = points;
        self.publisher
            .publish(DashboardEvent::HistoricalUpdated { points: count })
            .await
    }

    /// Record the push-stream connection status. Publishes only on change.
    ///
    /// # Errors
    ///
    /// Returns an error if the change event cannot be published.
    pub async fn set_stream_status(&self, status: ConnectionStatus) -> Result<(), SensorboardError> {
        {
            let mut state = self.state.write().await;
            if state.stream_status == status {
                return Ok(());
            }
            state.stream_status = status;
        }
        tracing::info!(%status, "stream status changed");
        self.publisher
            .publish(DashboardEvent::StreamStatusChanged { status })
            .await
    }

    /// Record the outcome of a poll. Publishes only on change.
    ///
    /// # Errors
    ///
    /// Returns an error if the change event cannot be published.
    pub async fn set_poll_status(
        &self,
        target: PollTarget,
        status: ConnectionStatus,
    ) -> Result<(), SensorboardError> {
        {
            let mut state = self.state.write().await;
            if state.poll_status.insert(target, status) == Some(status) {
                return Ok(());
            }
        }
        tracing::debug!(poll = target.name(), %status, "poll status changed");
        self.publisher
            .publish(DashboardEvent::PollStatusChanged { target, status })
            .await
    }
}
