//! Fan-out of [`DashboardEvent`]s to the SSE clients of the dashboard.

use std::future::Future;

use tokio::sync::broadcast;

use sensorboard_domain::error::SensorboardError;
use sensorboard_domain::event::DashboardEvent;

use crate::ports::EventPublisher;

/// Broadcast hub shared by the services and the HTTP layer.
///
/// Each subscriber holds its own cursor into a ring of `capacity` events.
/// A subscriber that falls further behind sees `RecvError::Lagged` and
/// resumes at the oldest retained event.
pub struct InProcessEventBus {
    sender: broadcast::Sender<DashboardEvent>,
}

impl InProcessEventBus {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// New cursor positioned after the latest published event.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers, i.e. open dashboard streams.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl EventPublisher for InProcessEventBus {
    fn publish(
        &self,
        event: DashboardEvent,
    ) -> impl Future<Output = Result<(), SensorboardError>> + Send {
        if self.sender.send(event).is_err() {
            tracing::trace!("no dashboard stream listening");
        }
        async { Ok(()) }
    }
}
