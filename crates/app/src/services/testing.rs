//! Port stubs shared by the service tests.

use std::future::Future;
use std::sync::Mutex;

use sensorboard_domain::error::SensorboardError;
use sensorboard_domain::event::DashboardEvent;

use crate::ports::EventPublisher;

/// Keeps every published event.
#[derive(Default)]
pub(crate) struct RecordingPublisher {
    events: Mutex<Vec<DashboardEvent>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<DashboardEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventPublisher for RecordingPublisher {
    fn publish(
        &self,
        event: DashboardEvent,
    ) -> impl Future<Output = Result<(), SensorboardError>> + Send {
        self.events.lock().unwrap().push(event);
        async { Ok(()) }
    }
}
