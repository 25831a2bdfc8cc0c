//! Stream forwarder — feeds push-stream messages into the live service.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::ports::{BatchStream, EventPublisher, StreamEvent};
use crate::services::dashboard_service::DashboardService;
use crate::services::live_service::LiveService;

/// Consumes a [`BatchStream`] until it ends.
///
/// Messages go to [`LiveService::apply_message`], connection changes to the
/// dashboard stream status. Nothing here is fatal.
pub struct StreamForwarder<EP> {
    live: Arc<LiveService<EP>>,
    dashboard: Arc<DashboardService<EP>>,
}

impl<EP> StreamForwarder<EP>
where
    EP: EventPublisher + Send + Sync + 'static,
{
    pub fn new(live: Arc<LiveService<EP>>, dashboard: Arc<DashboardService<EP>>) -> Self {
        Self { live, dashboard }
    }

    /// Forward events in arrival order until the stream returns `None`.
    pub async fn run<B: BatchStream>(&self, mut stream: B) {
        while let Some(event) = stream.next_event().await {
            let result = match event {
                StreamEvent::Status(status) => self.dashboard.set_stream_status(status).await,
                StreamEvent::Message(raw) => self.live.apply_message(&raw).await.map(|_| ()),
            };
            if let Err(err) = result {
                tracing::warn!(error = %err, "unable to forward stream event");
            }
        }
        tracing::info!("push stream ended");
    }

    /// Run the forwarder on its own task.
    pub fn spawn<B>(self, stream: B) -> JoinHandle<()>
    where
        B: BatchStream + Send + 'static,
    {
        tokio::spawn(async move { self.run(stream).await })
    }
}
