//! Shared application state for axum handlers.

use std::sync::Arc;

use sensorboard_app::event_bus::InProcessEventBus;
use sensorboard_app::ports::EventPublisher;
use sensorboard_app::services::dashboard_service::DashboardService;
use sensorboard_app::services::live_service::LiveService;

use crate::config::DashboardSettings;

/// Application state shared across all axum handlers.
///
/// Generic over the event publisher the services were built with.
/// `Clone` is implemented manually so the services themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<EP> {
    /// Live daily counters fed by the push stream.
    pub live: Arc<LiveService<EP>>,
    /// Polled readings, histories and transport status.
    pub dashboard: Arc<DashboardService<EP>>,
    /// Bus the SSE endpoint subscribes to.
    pub event_bus: Arc<InProcessEventBus>,
    pub settings: DashboardSettings,
}

impl<EP> Clone for AppState<EP> {
    fn clone(&self) -> Self {
        Self {
            live: Arc::clone(&self.live),
            dashboard: Arc::clone(&self.dashboard),
            event_bus: Arc::clone(&self.event_bus),
            settings: self.settings,
        }
    }
}

impl<EP> AppState<EP>
where
    EP: EventPublisher + Send + Sync + 'static,
{
    /// Create the state from services already shared with background tasks.
    pub fn new(
        live: Arc<LiveService<EP>>,
        dashboard: Arc<DashboardService<EP>>,
        event_bus: Arc<InProcessEventBus>,
        settings: DashboardSettings,
    ) -> Self {
        Self {
            live,
            dashboard,
            event_bus,
            settings,
        }
    }
}
