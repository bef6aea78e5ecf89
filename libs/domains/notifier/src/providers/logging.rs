//! Dry-run sender that only logs what would be sent.

use super::{NotificationSender, SentNotification};
use crate::error::NotifierResult;
use crate::models::NotificationRequest;
use async_trait::async_trait;
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogSender;

#[async_trait]
impl NotificationSender for LogSender {
    async fn send(&self, request: &NotificationRequest) -> NotifierResult<SentNotification> {
        info!(
            subject = %request.subject,
            from = %request.from_address,
            to = ?request.to,
            template = %request.template,
            data_keys = request.data.len(),
            "Dry run: notification not sent"
        );

        Ok(SentNotification {
            message_id: None,
            recipients: request.to.len(),
        })
    }

    fn name(&self) -> &'static str {
        "log"
    }

    async fn health_check(&self) -> NotifierResult<bool> {
        Ok(true)
    }
}
