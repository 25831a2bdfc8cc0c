//! Server-side rendered HTML dashboard.

use askama::Template;
use axum::Router;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;

use sensorboard_app::ports::EventPublisher;
use sensorboard_domain::aggregate::EventBreakdown;
use sensorboard_domain::event::PollTarget;
use sensorboard_domain::reading::{BoardStatus, LatestReading, RealtimeSnapshot, meter_percent};
use sensorboard_domain::time::Timestamp;

use crate::api::summary::{self, SummaryResponse};
use crate::error::ApiError;
use crate::state::AppState;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct SummaryCard {
    source: &'static str,
    status: &'static str,
    total_samples: u64,
    avg_humidity: String,
    tilt_events: u64,
    hit_events: u64,
    last_timestamp: String,
    last_sequence: String,
}

impl From<&SummaryResponse> for SummaryCard {
    fn from(response: &SummaryResponse) -> Self {
        let summary = &response.summary;
        Self {
            source: response.source.label(),
            status: response.status.label(),
            total_samples: summary.total_samples,
            avg_humidity: format!("{:.1}", summary.avg_humidity),
            tilt_events: summary.tilt_events,
            hit_events: summary.hit_events,
            last_timestamp: summary
                .last_timestamp
                .map_or_else(dash, |t| t.format(TIME_FORMAT).to_string()),
            last_sequence: summary
                .last_sequence_number
                .map_or_else(dash, |seq| seq.to_string()),
        }
    }
}

pub struct RealtimeCard {
    humidity: String,
    inclination: bool,
    vibration: bool,
    alert: bool,
    timestamp: String,
    avg_today: String,
    alert_percent: String,
}

impl From<&RealtimeSnapshot> for RealtimeCard {
    fn from(snapshot: &RealtimeSnapshot) -> Self {
        Self {
            humidity: format!("{:.1}", snapshot.humidity),
            inclination: snapshot.inclination,
            vibration: snapshot.vibration,
            alert: snapshot.is_alert(),
            timestamp: format_instant(Some(snapshot.timestamp)),
            avg_today: format!("{:.1}", snapshot.stats.avg_humidity_today),
            alert_percent: format!("{:.0}", snapshot.stats.alert_percentage_today),
        }
    }
}

pub struct ReadingRow {
    sensor: String,
    name: String,
    humidity: String,
    meter: String,
    tilt: bool,
    vibration: bool,
    alert: bool,
    recorded_at: String,
}

impl From<&LatestReading> for ReadingRow {
    fn from(reading: &LatestReading) -> Self {
        Self {
            sensor: reading.sensor.clone(),
            name: reading.display_name().to_string(),
            humidity: format!("{:.1}", reading.humidity_pct),
            meter: format!("{:.0}", meter_percent(reading.humidity_pct)),
            tilt: reading.tilt,
            vibration: reading.vibration,
            alert: reading.is_alert(),
            recorded_at: format_instant(Some(reading.recorded_at)),
        }
    }
}

pub struct PollRow {
    name: &'static str,
    status: &'static str,
}

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    refresh_seconds: u32,
    board_status: &'static str,
    board_class: &'static str,
    last_updated: String,
    stream_status: &'static str,
    summary: SummaryCard,
    breakdown: EventBreakdown,
    realtime: Option<RealtimeCard>,
    readings: Vec<ReadingRow>,
    polls: Vec<PollRow>,
}

impl IntoResponse for DashboardTemplate {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => ApiError::from(err).into_response(),
        }
    }
}

/// Build the dashboard sub-router.
pub fn routes<EP>() -> Router<AppState<EP>>
where
    EP: EventPublisher + Send + Sync + 'static,
{
    Router::new().route("/", get(index::<EP>))
}

/// `GET /` — status badge, live cards, event breakdown and readings table.
pub async fn index<EP>(State(state): State<AppState<EP>>) -> DashboardTemplate
where
    EP: EventPublisher + Send + Sync + 'static,
{
    let (summary, snapshot) = summary::current(&state).await;
    let board = snapshot.board_status();

    DashboardTemplate {
        refresh_seconds: state.settings.refresh_secs,
        board_status: board.label(),
        board_class: match board {
            BoardStatus::NoData => "nodata",
            BoardStatus::Ok => "ok",
            BoardStatus::Alert => "alert",
        },
        last_updated: format_instant(snapshot.last_updated()),
        stream_status: snapshot.stream_status.label(),
        breakdown: summary.breakdown,
        summary: SummaryCard::from(&summary),
        realtime: snapshot.realtime.as_ref().map(RealtimeCard::from),
        readings: snapshot.readings.iter().map(ReadingRow::from).collect(),
        polls: PollTarget::ALL
            .iter()
            .map(|target| PollRow {
                name: target.name(),
                status: snapshot.poll_status(*target).label(),
            })
            .collect(),
    }
}

fn dash() -> String {
    "-".to_string()
}

fn format_instant(at: Option<Timestamp>) -> String {
    at.map_or_else(dash, |t| t.format(TIME_FORMAT).to_string())
}
