//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod dashboard_service;
pub mod live_service;
pub mod poller;
pub mod stream_forwarder;

#[cfg(test)]
pub(crate) mod testing;
