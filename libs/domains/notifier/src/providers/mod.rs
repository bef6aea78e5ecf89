//! Notification senders.
//!
//! The classifier's contract ends at a [`NotificationRequest`]; a
//! [`NotificationSender`] takes it from there.

mod logging;
mod recording;
mod smtp;

pub use logging::LogSender;
pub use recording::RecordingSender;
pub use smtp::{SmtpConfig, SmtpSender};

use crate::error::NotifierResult;
use crate::models::NotificationRequest;
use async_trait::async_trait;

/// Outcome of handing one request to a sender.
#[derive(Debug, Clone)]
pub struct SentNotification {
    /// Provider-specific message ID for tracking.
    pub message_id: Option<String>,
    /// Number of recipients the message was addressed to.
    pub recipients: usize,
}

/// Trait for notification senders.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Deliver one request. Called once per request.
    async fn send(&self, request: &NotificationRequest) -> NotifierResult<SentNotification>;

    /// Get the sender name for logging.
    fn name(&self) -> &'static str;

    /// Check if the sender is able to deliver.
    async fn health_check(&self) -> NotifierResult<bool>;
}
