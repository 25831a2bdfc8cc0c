//! JSON API handlers.

pub mod readings;
pub mod sse;
pub mod summary;

use axum::Router;
use axum::routing::get;

use sensorboard_app::ports::EventPublisher;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<EP>() -> Router<AppState<EP>>
where
    EP: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/summary", get(summary::get::<EP>))
        .route("/summary/stream", get(sse::stream::<EP>))
        .route("/readings", get(readings::list::<EP>))
}
