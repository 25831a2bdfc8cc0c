//! # sensorboard-domain
//!
//! Pure domain model for the sensorboard live monitoring dashboard.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps and day keys
//! - Define **Samples** and **Batches** (sensor readings grouped by stream message)
//! - Define the **Daily aggregate** (running counters since the last day boundary)
//!   and its render-ready **Summary**
//! - Define **Readings** returned by the polling endpoints and their alert rules
//! - Define **Chart points** fed to the renderers
//! - Define **Dashboard events** (what changed, and transport status)
//! - Define the **wire payloads** of every backend endpoint and validate them
//!   into domain types
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod aggregate;
pub mod chart;
pub mod event;
pub mod payload;
pub mod reading;
pub mod sample;
