//! In-memory sender that captures requests.

use super::{NotificationSender, SentNotification};
use crate::error::{NotifierError, NotifierResult};
use crate::models::NotificationRequest;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Sender that records every request instead of delivering it.
#[derive(Clone, Default)]
pub struct RecordingSender {
    sent: Arc<Mutex<Vec<NotificationRequest>>>,
    failure_message: Option<String>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender whose every `send` fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sent: Arc::default(),
            failure_message: Some(message.into()),
        }
    }

    pub async fn sent(&self) -> Vec<NotificationRequest> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    pub async fn was_sent_to(&self, address: &str) -> bool {
        self.sent
            .lock()
            .await
            .iter()
            .any(|r| r.to.iter().any(|to| to == address))
    }
}

#[async_trait]
impl NotificationSender for RecordingSender {
    async fn send(&self, request: &NotificationRequest) -> NotifierResult<SentNotification> {
        if let Some(message) = &self.failure_message {
            return Err(NotifierError::ProviderError(message.clone()));
        }

        let mut sent = self.sent.lock().await;
        sent.push(request.clone());

        Ok(SentNotification {
            message_id: Some(format!("recorded-{}", sent.len())),
            recipients: request.to.len(),
        })
    }

    fn name(&self) -> &'static str {
        "recording"
    }

    async fn health_check(&self) -> NotifierResult<bool> {
        Ok(self.failure_message.is_none())
    }
}
