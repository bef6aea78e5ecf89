//! SMTP sender using lettre.
//!
//! Renders the request's template and sends a single multipart message
//! addressed to every recipient of the request.

use super::{NotificationSender, SentNotification};
use crate::error::{NotifierError, NotifierResult};
use crate::models::NotificationRequest;
use crate::templates::TemplateEngine;
use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_flag, env_optional, env_or_default, env_parse};
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use std::sync::Arc;
use tracing::{debug, error, info};

/// SMTP configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    /// SMTP server hostname
    pub host: String,
    /// SMTP server port
    pub port: u16,
    /// Login user; optional for dev servers like Mailpit.
    pub username: Option<String>,
    /// Login password, only used together with `username`
    pub password: Option<String>,
    /// Connect over TLS (`relay`) instead of plain text
    pub use_tls: bool,
}

impl SmtpConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            username: None,
            password: None,
            use_tls: false,
        }
    }

    pub fn with_tls(mut self, use_tls: bool) -> Self {
        self.use_tls = use_tls;
        self
    }

    pub fn with_credentials(mut self, username: String, password: String) -> Self {
        self.username = Some(username);
        self.password = Some(password);
        self
    }
}

impl FromEnv for SmtpConfig {
    /// Reads SMTP_HOST (`localhost`), SMTP_PORT (`1025`), SMTP_USERNAME,
    /// SMTP_PASSWORD and SMTP_USE_TLS (`false`).
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_or_default("SMTP_HOST", "localhost"),
            port: env_parse("SMTP_PORT", 1025)?,
            username: env_optional("SMTP_USERNAME"),
            password: env_optional("SMTP_PASSWORD"),
            use_tls: env_flag("SMTP_USE_TLS"),
        })
    }
}

/// Sends rendered notifications over SMTP.
pub struct SmtpSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    templates: Arc<TemplateEngine>,
    config: Arc<SmtpConfig>,
}

impl SmtpSender {
    pub fn new(config: SmtpConfig, templates: TemplateEngine) -> NotifierResult<Self> {
        let transport = Self::build_transport(&config)?;
        Ok(Self {
            transport,
            templates: Arc::new(templates),
            config: Arc::new(config),
        })
    }

    fn build_transport(config: &SmtpConfig) -> NotifierResult<AsyncSmtpTransport<Tokio1Executor>> {
        let credentials = match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                Some(Credentials::new(username.clone(), password.clone()))
            }
            _ => None,
        };

        let transport = if config.use_tls {
            let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| {
                    NotifierError::ProviderError(format!("Failed to create SMTP relay: {}", e))
                })?
                .port(config.port);
            if let Some(credentials) = credentials {
                builder = builder.credentials(credentials);
            }
            builder.build()
        } else {
            let mut builder =
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                    .port(config.port);
            if let Some(credentials) = credentials {
                builder = builder.credentials(credentials);
            }
            builder.build()
        };

        Ok(transport)
    }

    fn build_message(&self, request: &NotificationRequest) -> NotifierResult<Message> {
        let rendered = self.templates.render(request.template, &request.data)?;

        let from: Mailbox = request.from_address.parse().map_err(|e| {
            NotifierError::ProviderError(format!("Invalid from address: {}", e))
        })?;

        let mut builder = Message::builder().from(from).subject(&request.subject);
        for to in &request.to {
            let mailbox: Mailbox = to.parse().map_err(|e| {
                NotifierError::ProviderError(format!("Invalid to address '{}': {}", to, e))
            })?;
            builder = builder.to(mailbox);
        }

        let message = builder.multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(rendered.text),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(rendered.html),
                ),
        )?;

        Ok(message)
    }
}

#[async_trait]
impl NotificationSender for SmtpSender {
    async fn send(&self, request: &NotificationRequest) -> NotifierResult<SentNotification> {
        debug!(
            to = ?request.to,
            subject = %request.subject,
            template = %request.template,
            host = %self.config.host,
            port = %self.config.port,
            "Sending notification via SMTP"
        );

        let message = self.build_message(request)?;

        let response = self.transport.send(message).await.map_err(|e| {
            error!(to = ?request.to, error = %e, "Failed to send notification via SMTP");
            NotifierError::ProviderError(format!("SMTP send failed: {}", e))
        })?;

        let message_id = response.message().next().map(|s| s.to_string());

        info!(
            to = ?request.to,
            message_id = ?message_id,
            "Notification sent via SMTP"
        );

        Ok(SentNotification {
            message_id,
            recipients: request.to.len(),
        })
    }

    fn name(&self) -> &'static str {
        "SMTP"
    }

    async fn health_check(&self) -> NotifierResult<bool> {
        self.transport.test_connection().await.map_err(|e| {
            NotifierError::ProviderError(format!("SMTP health check failed: {}", e))
        })
    }
}
