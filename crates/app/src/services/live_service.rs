//! Live service — the aggregator shared between the stream consumer and readers.

use tokio::sync::RwLock;

use sensorboard_domain::aggregate::Summary;
use sensorboard_domain::error::SensorboardError;
use sensorboard_domain::event::DashboardEvent;
use sensorboard_domain::payload::StreamMessage;
use sensorboard_domain::sample::Batch;

use crate::aggregator::{ApplyOutcome, DuplicatePolicy, IgnoreReason, LiveAggregator};
use crate::ports::EventPublisher;

/// Owns the [`LiveAggregator`] behind a single-writer lock.
///
/// The write lock is held for the whole apply, so readers never observe a
/// half-applied batch.
pub struct LiveService<EP> {
    aggregator: RwLock<LiveAggregator>,
    publisher: EP,
}

impl<EP: EventPublisher> LiveService<EP> {
    pub fn new(policy: DuplicatePolicy, publisher: EP) -> Self {
        Self {
            aggregator: RwLock::new(LiveAggregator::new(policy)),
            publisher,
        }
    }

    /// Fold a batch into today's counters and announce the new summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the summary event cannot be published. The
    /// counters are updated either way.
    pub async fn apply_batch(&self, batch: &Batch) -> Result<ApplyOutcome, SensorboardError> {
        let (outcome, summary) = {
            let mut aggregator = self.aggregator.write().await;
            let outcome = aggregator.apply_batch(batch);
            (outcome, aggregator.current_summary())
        };

        match &outcome {
            ApplyOutcome::Applied { day_changed } => {
                if *day_changed {
                    tracing::info!(day = %batch.day(), "live counters reset for new day");
                }
                tracing::debug!(
                    seq = batch.sequence_number,
                    samples = batch.len(),
                    total = summary.total_samples,
                    "batch applied"
                );
                self.publisher
                    .publish(DashboardEvent::SummaryUpdated { summary })
                    .await?;
            }
            ApplyOutcome::Ignored(reason) => {
                tracing::warn!(seq = batch.sequence_number, ?reason, "batch ignored");
            }
        }
        Ok(outcome)
    }

    /// Parse a raw stream message and apply it.
    ///
    /// A message that is not a batch of samples leaves the counters untouched
    /// and is reported as [`ApplyOutcome::Ignored`], not as an error.
    ///
    /// # Errors
    ///
    /// Same as [`Self::apply_batch`].
    pub async fn apply_message(&self, raw: &str) -> Result<ApplyOutcome, SensorboardError> {
        match StreamMessage::from_json(raw).and_then(Batch::try_from) {
            Ok(batch) => self.apply_batch(&batch).await,
            Err(err) => {
                tracing::warn!(%err, "ignoring malformed stream message");
                Ok(ApplyOutcome::Ignored(IgnoreReason::Malformed(err.to_string())))
            }
        }
    }

    /// Snapshot of today's counters.
    pub async fn current_summary(&self) -> Summary {
        self.aggregator.read().await.current_summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::RecordingPublisher;
    use std::sync::Arc;

    fn make_service() -> (LiveService<Arc<RecordingPublisher>>, Arc<RecordingPublisher>) {
        let publisher = Arc::new(RecordingPublisher::default());
        (
            LiveService::new(DuplicatePolicy::AcceptAll, Arc::clone(&publisher)),
            publisher,
        )
    }

    #[tokio::test]
    async fn should_apply_stream_messages() {
        let (service, _) = make_service();
        service
            .apply_message(r#"{"ts":"2024-01-01 10:00:00","seq":1,"samples":[{"soil":{"pct":50},"tilt":0,"vib":{"hit":0}}]}"#)
            .await
            .unwrap();
        service
            .apply_message(r#"{"ts":"2024-01-01 10:00:05","seq":2,"samples":[{"soil":{"pct":70},"tilt":1,"vib":{"hit":1}}]}"#)
            .await
            .unwrap();

        let summary = service.current_summary().await;
        assert_eq!(summary.total_samples, 2);
        assert!((summary.avg_humidity - 60.0).abs() < 1e-9);
        assert_eq!(summary.tilt_events, 1);
        assert_eq!(summary.hit_events, 1);
    }

    #[tokio::test]
    async fn should_publish_summary_for_each_applied_batch() {
        let (service, publisher) = make_service();
        service
            .apply_message(r#"{"ts":"2024-01-01T10:00:00","seq":1,"samples":[{"soil":{"pct":"42"},"tilt":"1","vib":{"hit":0}}]}"#)
            .await
            .unwrap();

        let events = publisher.events();
        assert_eq!(events.len(), 1);
        let DashboardEvent::SummaryUpdated { summary } = &events[0] else {
            panic!("unexpected event: {:?}", events[0]);
        };
        assert_eq!(summary.tilt_events, 1);
        assert_eq!(summary.last_sequence_number, Some(1));
    }

    #[tokio::test]
    async fn should_ignore_malformed_messages_without_state_change() {
        let (service, publisher) = make_service();
        service
            .apply_message(r#"{"ts":"2024-01-01 10:00:00","seq":1,"samples":[{"soil":{"pct":50},"tilt":0,"vib":{"hit":0}}]}"#)
            .await
            .unwrap();
        let before = service.current_summary().await;

        for raw in [
            "not json",
            r#"{"message":"heartbeat"}"#,
            r#"{"ts":"2024-01-01 10:00:00","seq":2,"samples":{"soil":1}}"#,
            r#"{"ts":"soon","seq":3,"samples":[]}"#,
        ] {
            let outcome = service.apply_message(raw).await.unwrap();
            assert!(
                matches!(outcome, ApplyOutcome::Ignored(IgnoreReason::Malformed(_))),
                "{raw} should be ignored"
            );
        }

        assert_eq!(service.current_summary().await, before);
        assert_eq!(publisher.events().len(), 1);
    }

    #[tokio::test]
    async fn should_not_publish_when_batch_is_dropped_as_duplicate() {
        let publisher = Arc::new(RecordingPublisher::default());
        let service = LiveService::new(DuplicatePolicy::DropNonIncreasing, Arc::clone(&publisher));
        let raw = r#"{"ts":"2024-01-01 10:00:00","seq":9,"samples":[{"soil":{"pct":50},"tilt":0,"vib":{"hit":0}}]}"#;

        service.apply_message(raw).await.unwrap();
        let outcome = service.apply_message(raw).await.unwrap();

        assert!(matches!(
            outcome,
            ApplyOutcome::Ignored(IgnoreReason::StaleSequence { .. })
        ));
        assert_eq!(publisher.events().len(), 1);
        assert_eq!(service.current_summary().await.total_samples, 1);
    }

    #[tokio::test]
    async fn should_report_zero_summary_before_any_batch() {
        let (service, _) = make_service();
        assert_eq!(service.current_summary().await, Summary::default());
    }
}
