//! Interval poller — refreshes the dashboard snapshot from a [`ReadingsSource`].
//!
//! Each [`PollTarget`] runs in its own task on its own period. A tick never
//! overlaps the previous one: a slow round-trip delays the next tick and
//! missed ticks are skipped. A failed tick keeps the last good state and
//! flips the target status to `Error`; there is no backoff.

use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use sensorboard_domain::error::SensorboardError;
use sensorboard_domain::event::{ConnectionStatus, PollTarget};
use sensorboard_domain::time::{Timestamp, now};

use crate::ports::{EventPublisher, ReadingsSource};
use crate::services::dashboard_service::DashboardService;

/// Polling periods and query parameters.
///
/// A target with no period is never polled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSchedule {
    pub latest_readings: Option<Duration>,
    pub realtime_summary: Option<Duration>,
    pub realtime: Option<Duration>,
    pub historical: Option<Duration>,
    /// How far back the per-sensor histories reach.
    pub history_window: Duration,
    /// Number of points requested from the historical endpoint.
    pub historical_limit: usize,
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self {
            latest_readings: Some(Duration::from_secs(2)),
            realtime_summary: Some(Duration::from_secs(5)),
            realtime: Some(Duration::from_secs(3)),
            historical: Some(Duration::from_secs(30)),
            history_window: Duration::from_secs(3 * 60 * 60),
            historical_limit: 100,
        }
    }
}

impl PollSchedule {
    /// Period of `target`, if it is polled at all.
    #[must_use]
    pub fn interval(&self, target: PollTarget) -> Option<Duration> {
        let period = match target {
            PollTarget::LatestReadings => self.latest_readings,
            PollTarget::RealtimeSummary => self.realtime_summary,
            PollTarget::Realtime => self.realtime,
            PollTarget::Historical => self.historical,
        };
        period.filter(|p| !p.is_zero())
    }
}

/// Drives the [`ReadingsSource`] on a [`PollSchedule`].
pub struct IntervalPoller<S, EP> {
    source: S,
    dashboard: Arc<DashboardService<EP>>,
    schedule: PollSchedule,
}

impl<S, EP> IntervalPoller<S, EP>
where
    S: ReadingsSource + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    pub fn new(source: S, dashboard: Arc<DashboardService<EP>>, schedule: PollSchedule) -> Self {
        Self {
            source,
            dashboard,
            schedule,
        }
    }

    /// Refresh one target and record its status.
    ///
    /// # Errors
    ///
    /// Returns the fetch error after the status was set to `Error`; the
    /// snapshot keeps its previous data for that target.
    pub async fn poll_once(&self, target: PollTarget) -> Result<(), SensorboardError> {
        let result = self.refresh(target).await;
        let status = if result.is_ok() {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Error
        };
        self.dashboard.set_poll_status(target, status).await?;
        result
    }

    /// Spawn one polling task per scheduled target.
    ///
    /// The tasks run until aborted.
    pub fn spawn(self: Arc<Self>) -> Vec<JoinHandle<()>> {
        PollTarget::ALL
            .into_iter()
            .filter_map(|target| {
                let period = self.schedule.interval(target)?;
                let poller = Arc::clone(&self);
                tracing::info!(poll = target.name(), ?period, "starting poller");
                Some(tokio::spawn(async move { poller.run(target, period).await }))
            })
            .collect()
    }

    async fn run(&self, target: PollTarget, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if let Err(err) = self.poll_once(target).await {
                tracing::warn!(poll = target.name(), error = %err, "poll failed, keeping last state");
            }
        }
    }

    async fn refresh(&self, target: PollTarget) -> Result<(), SensorboardError> {
        match target {
            PollTarget::LatestReadings => self.refresh_readings().await,
            PollTarget::RealtimeSummary => {
                let summary = self.source.fetch_realtime_summary().await?;
                self.dashboard.set_remote_summary(summary).await
            }
            PollTarget::Realtime => {
                let snapshot = self.source.fetch_realtime().await?;
                self.dashboard.set_realtime(snapshot).await
            }
            PollTarget::Historical => {
                let points = self
                    .source
                    .fetch_historical(self.schedule.historical_limit)
                    .await?;
                self.dashboard.set_historical(points).await
            }
        }
    }

    /// Latest readings, then the history of each listed sensor.
    ///
    /// A failed history fetch only keeps that sensor's previous chart.
    async fn refresh_readings(&self) -> Result<(), SensorboardError> {
        let readings = self.source.fetch_latest_readings().await?;
        let sensors: Vec<String> = readings.iter().map(|r| r.sensor.clone()).collect();
        self.dashboard.replace_readings(readings).await?;

        let from = self.history_start();
        for sensor in sensors {
            match self.source.fetch_history(&sensor, from).await {
                Ok(records) => self.dashboard.replace_history(&sensor, records).await?,
                Err(err) => {
                    tracing::warn!(%sensor, error = %err, "history fetch failed, keeping last chart");
                }
            }
        }
        Ok(())
    }

    fn history_start(&self) -> Timestamp {
        let now = now();
        TimeDelta::from_std(self.schedule.history_window)
            .ok()
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(now)
    }
}
