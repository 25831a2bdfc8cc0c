//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod event_bus;
pub mod feed;
pub mod stream;
pub mod surface;

pub use event_bus::EventPublisher;
pub use feed::ReadingsSource;
pub use stream::{BatchStream, StreamEvent};
pub use surface::{Color, Point, Rect, Stroke, Surface, TextAnchor, TextStyle};
