//! Event processor.
//!
//! Classifies one event and hands each resulting request to a
//! [`NotificationSender`]. Send failures are logged and counted, never
//! retried.

use crate::classifier::{ErrorReporter, EventClassifier, TracingReporter};
use crate::config::NotifierConfig;
use crate::models::Event;
use crate::providers::NotificationSender;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// What happened to the requests derived from one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Requests the classifier derived from the event
    pub produced: usize,
    /// Requests the sender accepted
    pub sent: usize,
    /// Requests the sender rejected; these are not retried
    pub failed: usize,
}

impl ProcessOutcome {
    pub fn merge(&mut self, other: ProcessOutcome) {
        self.produced += other.produced;
        self.sent += other.sent;
        self.failed += other.failed;
    }
}

/// Classifier + config + sender, wired for processing a stream of events.
pub struct NotificationProcessor<S: NotificationSender, R: ErrorReporter = TracingReporter> {
    classifier: EventClassifier<R>,
    config: Arc<NotifierConfig>,
    sender: Arc<S>,
}

impl<S: NotificationSender> NotificationProcessor<S> {
    pub fn new(config: NotifierConfig, sender: S) -> Self {
        Self::with_classifier(EventClassifier::new(), Arc::new(config), Arc::new(sender))
    }
}

impl<S: NotificationSender, R: ErrorReporter> NotificationProcessor<S, R> {
    pub fn with_classifier(
        classifier: EventClassifier<R>,
        config: Arc<NotifierConfig>,
        sender: Arc<S>,
    ) -> Self {
        Self {
            classifier,
            config,
            sender,
        }
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    #[instrument(skip_all, fields(event_type = %event.event_type))]
    pub async fn process(&self, event: &Event) -> ProcessOutcome {
        let requests = self.classifier.classify(event, &self.config);
        let mut outcome = ProcessOutcome {
            produced: requests.len(),
            ..Default::default()
        };

        for request in &requests {
            match self.sender.send(request).await {
                Ok(sent) => {
                    outcome.sent += 1;
                    info!(
                        sender = self.sender.name(),
                        template = %request.template,
                        recipients = sent.recipients,
                        message_id = ?sent.message_id,
                        "Notification handed over"
                    );
                }
                Err(e) => {
                    outcome.failed += 1;
                    error!(
                        sender = self.sender.name(),
                        template = %request.template,
                        error = %e,
                        "Failed to send notification"
                    );
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventType;
    use crate::providers::RecordingSender;
    use crate::test_support::config;
    use serde_json::json;

    #[tokio::test]
    async fn test_process_sends_every_request() {
        let processor = NotificationProcessor::new(config(), RecordingSender::new());
        let event = Event::new(EventType::ManifestCreated, "user@example.com")
            .with_metadata("manifest_id", "M1")
            .with_metadata("hmdmc", json!(["H1"]));

        let outcome = processor.process(&event).await;
        assert_eq!(outcome, ProcessOutcome { produced: 2, sent: 2, failed: 0 });

        let sent = processor.sender().sent().await;
        assert_eq!(sent[0].to, vec!["user@example.com"]);
        assert_eq!(sent[1].to, vec!["ethics@example.com"]);
    }

    #[tokio::test]
    async fn test_process_counts_send_failures() {
        let processor = NotificationProcessor::new(config(), RecordingSender::failing("down"));
        let event = Event::new(EventType::CatalogueNew, "user@example.com");

        let outcome = processor.process(&event).await;
        assert_eq!(outcome, ProcessOutcome { produced: 1, sent: 0, failed: 1 });
    }

    #[tokio::test]
    async fn test_process_unknown_event() {
        let processor = NotificationProcessor::new(config(), RecordingSender::new());
        let outcome = processor.process(&Event::new("sample.shipped", "u")).await;
        assert_eq!(outcome, ProcessOutcome::default());
        assert_eq!(processor.sender().sent_count().await, 0);
    }

    #[test]
    fn test_outcome_merge() {
        let mut total = ProcessOutcome::default();
        total.merge(ProcessOutcome { produced: 2, sent: 1, failed: 1 });
        total.merge(ProcessOutcome { produced: 1, sent: 1, failed: 0 });
        assert_eq!(total, ProcessOutcome { produced: 3, sent: 2, failed: 1 });
    }
}
