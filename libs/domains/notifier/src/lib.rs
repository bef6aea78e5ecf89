//! Notifier Domain
//!
//! Turns domain events (manifest, work order and catalogue lifecycle) into
//! notification requests: who to notify, with which template, subject and
//! template data.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Event source  │  ← JSON events, one at a time
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ EventClassifier │  ← rule table keyed by event type
//! └────────┬────────┘
//!          │ handlers + payload assembler + link builder
//! ┌────────▼────────┐
//! │ Notification    │
//! │ Request(s)      │
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ NotificationSdr │  ← SMTP, log (dry run), recording
//! └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_notifier::{Event, EventClassifier, NotifierConfig};
//!
//! let event = Event::from_json(line)?;
//! for request in EventClassifier::new().classify(&event, &config) {
//!     sender.send(&request).await?;
//! }
//! ```

pub mod assembler;
pub mod classifier;
pub mod config;
pub mod consts;
pub mod error;
pub mod handlers;
pub mod link;
pub mod models;
pub mod payload;
pub mod processor;
pub mod providers;
pub mod templates;

pub use classifier::{ErrorReporter, EventClassifier, TracingReporter, classify};
pub use config::{ContactConfig, EmailConfig, LinkConfig, NotifierConfig};
pub use error::{NotifierError, NotifierResult};
pub use link::build_link;
pub use models::{Event, EventType, NotificationRequest, Template};
pub use payload::{Payload, PayloadBuilder};
pub use processor::{NotificationProcessor, ProcessOutcome};
pub use providers::{LogSender, NotificationSender, RecordingSender, SmtpConfig, SmtpSender};
pub use templates::TemplateEngine;
