//! Dashboard events — notifications emitted whenever render-ready state changes.

use serde::{Deserialize, Serialize};

use crate::aggregate::Summary;
use crate::reading::BoardStatus;

/// Transport connection status, for display only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Connected,
    Error,
}

impl ConnectionStatus {
    /// Short label shown on the status badge.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Endpoint family polled on its own period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollTarget {
    /// `/api/latest-readings/` followed by `/api/history/` per sensor.
    LatestReadings,
    /// `/realtime-redis/`
    RealtimeSummary,
    /// `/api/realtime/`
    Realtime,
    /// `/api/historical/`
    Historical,
}

impl PollTarget {
    /// Every target, in display order.
    pub const ALL: [Self; 4] = [
        Self::LatestReadings,
        Self::RealtimeSummary,
        Self::Realtime,
        Self::Historical,
    ];

    /// Stable name used in logs and JSON.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::LatestReadings => "latest_readings",
            Self::RealtimeSummary => "realtime_summary",
            Self::Realtime => "realtime",
            Self::Historical => "historical",
        }
    }
}

/// Something on the dashboard changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    /// The live aggregate absorbed a batch.
    SummaryUpdated { summary: Summary },
    /// The backend-computed day summary was refreshed.
    RemoteSummaryUpdated { summary: Summary },
    /// Latest readings were replaced.
    ReadingsUpdated { status: BoardStatus, count: usize },
    /// A sensor history (chart dataset) was replaced.
    HistoryUpdated { sensor: String, points: usize },
    /// The single most recent reading was refreshed.
    RealtimeUpdated { humidity: f64, alert: bool },
    /// The humidity trend series was replaced.
    HistoricalUpdated { points: usize },
    /// The push-stream connection changed state.
    StreamStatusChanged { status: ConnectionStatus },
    /// A poll target succeeded or failed.
    PollStatusChanged {
        target: PollTarget,
        status: ConnectionStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_connecting() {
        assert_eq!(ConnectionStatus::default(), ConnectionStatus::Connecting);
    }

    #[test]
    fn should_serialize_event_with_type_tag() {
        let event = DashboardEvent::StreamStatusChanged {
            status: ConnectionStatus::Connected,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "stream_status_changed");
        assert_eq!(json["status"], "connected");
    }

    #[test]
    fn should_roundtrip_summary_event() {
        let event = DashboardEvent::SummaryUpdated {
            summary: Summary {
                total_samples: 2,
                avg_humidity: 60.0,
                ..Summary::default()
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: DashboardEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
