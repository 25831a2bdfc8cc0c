//! Push-stream port — raw messages and connection changes.

use std::future::Future;

use tokio::sync::mpsc;

use sensorboard_domain::event::ConnectionStatus;

/// One item delivered by a push stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// The connection changed state.
    Status(ConnectionStatus),
    /// A raw message body, not yet parsed.
    Message(String),
}

/// A source of stream events. `None` means the stream is over for good.
pub trait BatchStream {
    /// Wait for the next event.
    fn next_event(&mut self) -> impl Future<Output = Option<StreamEvent>> + Send;
}

impl BatchStream for mpsc::Receiver<StreamEvent> {
    fn next_event(&mut self) -> impl Future<Output = Option<StreamEvent>> + Send {
        self.recv()
    }
}
