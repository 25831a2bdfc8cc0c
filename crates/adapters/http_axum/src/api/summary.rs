//! `GET /api/summary` — the day counters shown on the live cards.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use sensorboard_app::ports::EventPublisher;
use sensorboard_app::services::dashboard_service::DashboardSnapshot;
use sensorboard_domain::aggregate::{EventBreakdown, Summary};
use sensorboard_domain::event::{ConnectionStatus, PollTarget};

use crate::state::AppState;

/// Where the displayed counters come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySource {
    /// Aggregated here from the push stream.
    Live,
    /// Computed by the backend and polled.
    Remote,
}

impl SummarySource {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Remote => "remote",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResponse {
    pub source: SummarySource,
    /// Status of the transport feeding `source`.
    pub status: ConnectionStatus,
    #[serde(flatten)]
    pub summary: Summary,
    pub breakdown: EventBreakdown,
}

impl SummaryResponse {
    /// Prefer the live counters once they have absorbed a sample, fall back
    /// to the polled backend summary otherwise.
    #[must_use]
    pub fn select(live: Summary, snapshot: &DashboardSnapshot) -> Self {
        match &snapshot.remote_summary {
            Some(remote) if live.total_samples == 0 => Self {
                source: SummarySource::Remote,
                status: snapshot.poll_status(PollTarget::RealtimeSummary),
                breakdown: remote.event_breakdown(),
                summary: remote.clone(),
            },
            _ => Self {
                source: SummarySource::Live,
                status: snapshot.stream_status,
                breakdown: live.event_breakdown(),
                summary: live,
            },
        }
    }
}

pub(crate) async fn current<EP>(state: &AppState<EP>) -> (SummaryResponse, DashboardSnapshot)
where
    EP: EventPublisher + Send + Sync + 'static,
{
    let live = state.live.current_summary().await;
    let snapshot = state.dashboard.snapshot().await;
    (SummaryResponse::select(live, &snapshot), snapshot)
}

/// `GET /api/summary`
pub async fn get<EP>(State(state): State<AppState<EP>>) -> Json<SummaryResponse>
where
    EP: EventPublisher + Send + Sync + 'static,
{
    let (summary, _) = current(&state).await;
    Json(summary)
}
