//! Server-Sent Events stream of dashboard changes.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use sensorboard_app::ports::EventPublisher;

use crate::state::AppState;

/// `GET /api/summary/stream` — every [`DashboardEvent`] as a JSON `data:` frame.
///
/// Subscribes to the event bus when the request arrives; the stream lasts
/// until the client disconnects. Lagging clients skip the events they missed.
///
/// [`DashboardEvent`]: sensorboard_domain::event::DashboardEvent
pub async fn stream<EP>(
    State(state): State<AppState<EP>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    EP: EventPublisher + Send + Sync + 'static,
{
    let receiver = state.event_bus.subscribe();
    tracing::debug!(
        streams = state.event_bus.subscriber_count(),
        "dashboard stream opened"
    );
    let events = BroadcastStream::new(receiver).filter_map(|result| match result {
        Ok(event) => match serde_json::to_string(&event) {
            Ok(json) => Some(Ok(Event::default().data(json))),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize dashboard event for SSE stream");
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "SSE subscriber lagged, some events were dropped");
            None
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
