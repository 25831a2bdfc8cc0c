//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use sensorboard_app::ports::EventPublisher;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// JSON routes live under `/api`, SVG charts under `/charts` and the
/// dashboard page at `/`. A [`TraceLayer`] logs each request/response at
/// the `DEBUG` level.
pub fn build<EP>(state: AppState<EP>) -> Router
where
    EP: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .nest("/charts", crate::charts::routes())
        .merge(crate::dashboard::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
