//! SVG chart endpoints.
//!
//! Every request renders onto a fresh [`PlottersSurface`]; an empty dataset
//! yields the placeholder image rather than an error.

use axum::Router;
use axum::extract::{Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use sensorboard_adapter_render_plotters::PlottersSurface;
use sensorboard_app::chart::series::{event_counts_series, historical_series, history_series};
use sensorboard_app::chart::{
    ChartOptions, RenderOutcome, SensorMetric, render_bar, render_binary_events, render_line,
};
use sensorboard_app::ports::EventPublisher;

use crate::api::summary;
use crate::config::DashboardSettings;
use crate::error::ApiError;
use crate::state::AppState;

/// An `image/svg+xml` response.
#[derive(Debug)]
pub struct Svg(pub String);

impl IntoResponse for Svg {
    fn into_response(self) -> Response {
        (
            [(CONTENT_TYPE, "image/svg+xml"), (CACHE_CONTROL, "no-store")],
            self.0,
        )
            .into_response()
    }
}

/// Build the `/charts` sub-router.
pub fn routes<EP>() -> Router<AppState<EP>>
where
    EP: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/sensors/{sensor}/{metric}", get(sensor::<EP>))
        .route("/humidity-trend", get(humidity_trend::<EP>))
        .route("/events", get(events::<EP>))
}

fn draw<F>(settings: &DashboardSettings, render: F) -> Result<Svg, ApiError>
where
    F: FnOnce(&mut PlottersSurface) -> RenderOutcome,
{
    let mut surface = PlottersSurface::new(settings.chart_width, settings.chart_height);
    let outcome = render(&mut surface);
    tracing::trace!(?outcome, "chart drawn");
    Ok(Svg(surface.to_svg()?))
}

/// `GET /charts/sensors/{sensor}/{metric}` — humidity line, or tilt and
/// vibration timelines, over the sensor's recent history.
pub async fn sensor<EP>(
    State(state): State<AppState<EP>>,
    Path((sensor, metric)): Path<(String, String)>,
) -> Result<Svg, ApiError>
where
    EP: EventPublisher + Send + Sync + 'static,
{
    let metric: SensorMetric = metric.parse()?;
    let records = state.dashboard.history(&sensor).await;
    let points = history_series(&records, metric);
    let palette = state.settings.palette;
    let color = match metric {
        SensorMetric::Humidity => palette.humidity,
        SensorMetric::Tilt => palette.tilt,
        SensorMetric::Vibration => palette.vibration,
    };
    let options = ChartOptions::default().with_color(color);

    draw(&state.settings, |surface| {
        if metric.is_binary() {
            render_binary_events(Some(surface), &points, &options)
        } else {
            render_line(Some(surface), &points, &options)
        }
    })
}

/// `GET /charts/humidity-trend` — the long-term humidity series.
pub async fn humidity_trend<EP>(State(state): State<AppState<EP>>) -> Result<Svg, ApiError>
where
    EP: EventPublisher + Send + Sync + 'static,
{
    let points = historical_series(&state.dashboard.snapshot().await.historical);
    let options = ChartOptions::default().with_color(state.settings.palette.trend);
    draw(&state.settings, |surface| {
        render_line(Some(surface), &points, &options)
    })
}

/// `GET /charts/events` — today's tilt and hit counters.
pub async fn events<EP>(State(state): State<AppState<EP>>) -> Result<Svg, ApiError>
where
    EP: EventPublisher + Send + Sync + 'static,
{
    let (summary, _) = summary::current(&state).await;
    let points = event_counts_series(&summary.summary);
    let options = ChartOptions::default().with_color(state.settings.palette.events);
    draw(&state.settings, |surface| render_bar(Some(surface), &points, &options))
}
