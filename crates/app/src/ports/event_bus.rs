//! Event bus port — publish/subscribe for dashboard events.

use std::future::Future;

use sensorboard_domain::error::SensorboardError;
use sensorboard_domain::event::DashboardEvent;

/// Publishes dashboard events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(
        &self,
        event: DashboardEvent,
    ) -> impl Future<Output = Result<(), SensorboardError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        event: DashboardEvent,
    ) -> impl Future<Output = Result<(), SensorboardError>> + Send {
        (**self).publish(event)
    }
}
