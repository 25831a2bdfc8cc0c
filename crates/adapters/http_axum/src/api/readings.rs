//! `GET /api/readings` — latest reading of every sensor with its alert flag.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use sensorboard_app::ports::EventPublisher;
use sensorboard_app::services::dashboard_service::DashboardSnapshot;
use sensorboard_domain::event::{ConnectionStatus, PollTarget};
use sensorboard_domain::reading::{BoardStatus, LatestReading, meter_percent};
use sensorboard_domain::time::Timestamp;

use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingView {
    #[serde(flatten)]
    pub reading: LatestReading,
    pub alert: bool,
    /// Humidity clamped to `[0, 100]`.
    pub meter_percent: f64,
}

impl From<LatestReading> for ReadingView {
    fn from(reading: LatestReading) -> Self {
        Self {
            alert: reading.is_alert(),
            meter_percent: meter_percent(reading.humidity_pct),
            reading,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingsResponse {
    pub status: BoardStatus,
    pub poll_status: ConnectionStatus,
    pub last_updated: Option<Timestamp>,
    pub results: Vec<ReadingView>,
}

impl From<DashboardSnapshot> for ReadingsResponse {
    fn from(snapshot: DashboardSnapshot) -> Self {
        Self {
            status: snapshot.board_status(),
            poll_status: snapshot.poll_status(PollTarget::LatestReadings),
            last_updated: snapshot.last_updated(),
            results: snapshot
                .readings
                .into_iter()
                .map(ReadingView::from)
                .collect(),
        }
    }
}

/// `GET /api/readings`
pub async fn list<EP>(State(state): State<AppState<EP>>) -> Json<ReadingsResponse>
where
    EP: EventPublisher + Send + Sync + 'static,
{
    Json(ReadingsResponse::from(state.dashboard.snapshot().await))
}
