//! Error types for the notifier domain.

use thiserror::Error;

/// Result type for notifier operations.
pub type NotifierResult<T> = Result<T, NotifierError>;

/// Errors that can occur while classifying events or sending notifications.
#[derive(Debug, Error)]
pub enum NotifierError {
    /// A field the handler cannot do without is absent from the event.
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// The event could not be decoded.
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// Template rendering error.
    #[error("Template rendering error: {0}")]
    TemplateError(String),

    /// Notification sender error.
    #[error("Sender error: {0}")]
    ProviderError(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl NotifierError {
    /// Build a [`NotifierError::MissingRequiredField`] for `field`.
    pub fn missing(field: &str) -> Self {
        NotifierError::MissingRequiredField(field.to_string())
    }
}

impl From<core_config::ConfigError> for NotifierError {
    fn from(err: core_config::ConfigError) -> Self {
        NotifierError::ConfigError(err.to_string())
    }
}

impl From<handlebars::RenderError> for NotifierError {
    fn from(err: handlebars::RenderError) -> Self {
        NotifierError::TemplateError(err.to_string())
    }
}

impl From<serde_json::Error> for NotifierError {
    fn from(err: serde_json::Error) -> Self {
        NotifierError::InvalidEvent(err.to_string())
    }
}

impl From<lettre::error::Error> for NotifierError {
    fn from(err: lettre::error::Error) -> Self {
        NotifierError::ProviderError(format!("Failed to build email message: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message_names_field() {
        let err = NotifierError::missing("work_order_id");
        assert_eq!(err.to_string(), "Missing required field: work_order_id");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: NotifierError = core_config::ConfigError::MissingEnvVar("X".to_string()).into();
        assert!(matches!(err, NotifierError::ConfigError(ref msg) if msg.contains("'X'")));
    }

    #[test]
    fn test_render_and_message_errors_map_to_variants() {
        let err: NotifierError =
            handlebars::RenderError::from(handlebars::RenderErrorReason::Other("boom".to_string()))
                .into();
        assert!(matches!(err, NotifierError::TemplateError(ref msg) if msg.contains("boom")));

        let err: NotifierError = lettre::error::Error::MissingFrom.into();
        assert!(matches!(err, NotifierError::ProviderError(_)));
        assert!(err.to_string().starts_with("Sender error: "));
    }
}
