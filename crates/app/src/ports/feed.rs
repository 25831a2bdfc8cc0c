//! Readings source port — the backend's interval-polled endpoints.

use std::future::Future;

use sensorboard_domain::aggregate::Summary;
use sensorboard_domain::error::SensorboardError;
use sensorboard_domain::reading::{HistoricalPoint, HistoryRecord, LatestReading, RealtimeSnapshot};
use sensorboard_domain::time::Timestamp;

/// Pull access to the readings backend.
///
/// Implementations translate wire schemas into domain types; a failed call
/// leaves it to the caller to keep its last good state.
pub trait ReadingsSource {
    /// Latest reading of every sensor.
    fn fetch_latest_readings(
        &self,
    ) -> impl Future<Output = Result<Vec<LatestReading>, SensorboardError>> + Send;

    /// History of one sensor since `from`, in chronological order.
    fn fetch_history(
        &self,
        sensor: &str,
        from: Timestamp,
    ) -> impl Future<Output = Result<Vec<HistoryRecord>, SensorboardError>> + Send;

    /// Day counters computed by the backend.
    fn fetch_realtime_summary(
        &self,
    ) -> impl Future<Output = Result<Summary, SensorboardError>> + Send;

    /// Most recent single reading with today's stats.
    fn fetch_realtime(
        &self,
    ) -> impl Future<Output = Result<RealtimeSnapshot, SensorboardError>> + Send;

    /// The last `limit` humidity points, time-ordered.
    fn fetch_historical(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<HistoricalPoint>, SensorboardError>> + Send;
}

impl<T: ReadingsSource + Send + Sync> ReadingsSource for std::sync::Arc<T> {
    fn fetch_latest_readings(
        &self,
    ) -> impl Future<Output = Result<Vec<LatestReading>, SensorboardError>> + Send {
        (**self).fetch_latest_readings()
    }

    fn fetch_history(
        &self,
        sensor: &str,
        from: Timestamp,
    ) -> impl Future<Output = Result<Vec<HistoryRecord>, SensorboardError>> + Send {
        (**self).fetch_history(sensor, from)
    }

    fn fetch_realtime_summary(
        &self,
    ) -> impl Future<Output = Result<Summary, SensorboardError>> + Send {
        (**self).fetch_realtime_summary()
    }

    fn fetch_realtime(
        &self,
    ) -> impl Future<Output = Result<RealtimeSnapshot, SensorboardError>> + Send {
        (**self).fetch_realtime()
    }

    fn fetch_historical(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<HistoricalPoint>, SensorboardError>> + Send {
        (**self).fetch_historical(limit)
    }
}
