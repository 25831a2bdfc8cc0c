//! Wire payloads of the sensor backend.
//!
//! Every endpoint has an explicit schema here. Field-level leniency
//! (numeric flags, numeric strings, missing values) is handled by
//! [`lenient`]; shape mismatches surface as [`PayloadError`] and are treated
//! by callers as a skipped cycle.
//!
//! [`PayloadError`]: crate::error::PayloadError

pub mod lenient;
pub mod poll;
pub mod stream;

pub use poll::{HistoricalResponse, HistoryResponse, LatestReadingsResponse, RealtimeSummaryResponse};
pub use stream::{SoilReading, StreamMessage, StreamSample, VibrationReading};
