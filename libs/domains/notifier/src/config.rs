//! Notifier settings.
//!
//! Loaded once at start-up and shared read-only by every classification.

use core_config::{ConfigError, FromEnv, env_or_default, env_parse, env_required};

/// Sender settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub from_address: String,
}

/// Fixed recipients for team-facing notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactConfig {
    pub email_dev_team: String,
    pub email_hmdmc_verify: String,
}

/// Where links in notifications point to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    pub protocol: String,
    pub root: String,
    pub port: u16,
}

/// Complete notifier configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub link: LinkConfig,
}

impl FromEnv for NotifierConfig {
    /// Reads:
    /// - NOTIFIER_FROM_ADDRESS, NOTIFIER_EMAIL_DEV_TEAM, NOTIFIER_EMAIL_HMDMC_VERIFY (required)
    /// - NOTIFIER_LINK_PROTOCOL (default `http`)
    /// - NOTIFIER_LINK_ROOT (default `localhost`)
    /// - NOTIFIER_LINK_PORT (default `3000`)
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            email: EmailConfig {
                from_address: env_required("NOTIFIER_FROM_ADDRESS")?,
            },
            contact: ContactConfig {
                email_dev_team: env_required("NOTIFIER_EMAIL_DEV_TEAM")?,
                email_hmdmc_verify: env_required("NOTIFIER_EMAIL_HMDMC_VERIFY")?,
            },
            link: LinkConfig {
                protocol: env_or_default("NOTIFIER_LINK_PROTOCOL", "http"),
                root: env_or_default("NOTIFIER_LINK_ROOT", "localhost"),
                port: env_parse("NOTIFIER_LINK_PORT", 3000)?,
            },
        })
    }
}
