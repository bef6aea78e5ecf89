//! Event classification.
//!
//! Looks the event type up in a static rule table and runs the matching
//! handler. Unknown event types yield nothing. A handler failure is handed to
//! the [`ErrorReporter`] and also yields nothing; it never reaches the caller.

use crate::config::NotifierConfig;
use crate::error::NotifierError;
use crate::handlers::{self, Handler};
use crate::models::{Event, EventType, NotificationRequest};
use tracing::{debug, error};

const RULES: &[(EventType, Handler)] = &[
    (EventType::ManifestCreated, handlers::manifest_created as Handler),
    (EventType::ManifestReceived, handlers::manifest_received as Handler),
    (EventType::WorkOrderDispatched, handlers::work_order_event as Handler),
    (EventType::WorkOrderConcluded, handlers::work_order_event as Handler),
    (EventType::CatalogueNew, handlers::catalogue_new as Handler),
    (EventType::CatalogueProcessed, handlers::catalogue_processed as Handler),
    (EventType::CatalogueRejected, handlers::catalogue_rejected as Handler),
];

/// Rule registered for `event_type`, if any.
pub fn handler_for(event_type: &EventType) -> Option<Handler> {
    RULES
        .iter()
        .find(|(tag, _)| tag == event_type)
        .map(|(_, handler)| *handler)
}

/// Receives handler failures the classifier swallows.
#[cfg_attr(test, mockall::automock)]
pub trait ErrorReporter: Send + Sync {
    fn report(&self, event: &Event, error: &NotifierError);
}

/// Reports handler failures as `error` level tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, event: &Event, error: &NotifierError) {
        error!(
            event_type = %event.event_type,
            user = %event.user_identifier,
            error = %error,
            "Failed to derive notification"
        );
    }
}

/// Maps events to the notification requests they imply.
///
/// Holds no per-event state; classifying the same event twice yields the same
/// requests.
#[derive(Debug, Clone, Default)]
pub struct EventClassifier<R: ErrorReporter = TracingReporter> {
    reporter: R,
}

impl EventClassifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: ErrorReporter> EventClassifier<R> {
    pub fn with_reporter(reporter: R) -> Self {
        Self { reporter }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn classify(&self, event: &Event, config: &NotifierConfig) -> Vec<NotificationRequest> {
        let Some(handler) = handler_for(&event.event_type) else {
            debug!(event_type = %event.event_type, "No rule for event type, ignoring");
            return Vec::new();
        };

        match handler(event, config) {
            Ok(requests) => requests,
            Err(err) => {
                self.reporter.report(event, &err);
                Vec::new()
            }
        }
    }
}

/// Classify with the default tracing reporter.
pub fn classify(event: &Event, config: &NotifierConfig) -> Vec<NotificationRequest> {
    EventClassifier::new().classify(event, config)
}
