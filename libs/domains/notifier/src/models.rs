//! Data models for the notifier domain.

use crate::consts::*;
use crate::payload::{Payload, is_present};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumIter};

// ============================================================================
// Events
// ============================================================================

/// Event-type tag carried by every incoming event.
///
/// Tags this notifier has no rule for land in [`EventType::Other`] so they
/// can still be decoded and then ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    ManifestCreated,
    ManifestReceived,
    WorkOrderDispatched,
    WorkOrderConcluded,
    CatalogueNew,
    CatalogueProcessed,
    CatalogueRejected,
    Other(String),
}

impl EventType {
    /// The wire tag, e.g. `work_order.dispatched`.
    pub fn as_str(&self) -> &str {
        match self {
            EventType::ManifestCreated => EVENT_MAN_CREATED,
            EventType::ManifestReceived => EVENT_MAN_RECEIVED,
            EventType::WorkOrderDispatched => EVENT_WO_DISPATCHED,
            EventType::WorkOrderConcluded => EVENT_WO_CONCLUDED,
            EventType::CatalogueNew => EVENT_CAT_NEW,
            EventType::CatalogueProcessed => EVENT_CAT_PROCESSED,
            EventType::CatalogueRejected => EVENT_CAT_REJECTED,
            EventType::Other(tag) => tag,
        }
    }

    /// Segment after the last `.` of the tag (`work_order.concluded` -> `concluded`).
    pub fn suffix(&self) -> &str {
        let tag = self.as_str();
        tag.rsplit('.').next().unwrap_or(tag)
    }
}

impl From<&str> for EventType {
    fn from(tag: &str) -> Self {
        match tag {
            EVENT_MAN_CREATED => EventType::ManifestCreated,
            EVENT_MAN_RECEIVED => EventType::ManifestReceived,
            EVENT_WO_DISPATCHED => EventType::WorkOrderDispatched,
            EVENT_WO_CONCLUDED => EventType::WorkOrderConcluded,
            EVENT_CAT_NEW => EventType::CatalogueNew,
            EVENT_CAT_PROCESSED => EventType::CatalogueProcessed,
            EVENT_CAT_REJECTED => EventType::CatalogueRejected,
            other => EventType::Other(other.to_string()),
        }
    }
}

impl From<String> for EventType {
    fn from(tag: String) -> Self {
        EventType::from(tag.as_str())
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        event_type.as_str().to_string()
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An incoming domain event.
///
/// Built once (by deserializing or through the `with_*` builders) and then
/// only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_type: EventType,
    pub user_identifier: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub metadata: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notifier_info: Map<String, Value>,
    #[serde(default)]
    pub timestamp: Value,
}

/// `null` reads the same as a missing object.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Event {
    /// Create an event with empty metadata and no timestamp.
    pub fn new(event_type: impl Into<EventType>, user_identifier: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            user_identifier: user_identifier.into(),
            metadata: Map::new(),
            notifier_info: Map::new(),
            timestamp: Value::Null,
        }
    }

    /// Decode an event from a JSON document.
    pub fn from_json(raw: &str) -> crate::NotifierResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn with_notifier_info(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.notifier_info.insert(key.to_string(), value.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<Value>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Metadata value for `key`, only if it carries something.
    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key).filter(|v| is_present(v))
    }

    /// Notifier-info value for `key`, only if it carries something.
    pub fn notifier_info_value(&self, key: &str) -> Option<&Value> {
        self.notifier_info.get(key).filter(|v| is_present(v))
    }
}

// ============================================================================
// Notification requests
// ============================================================================

/// Message template identifiers understood by the rendering side.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Template {
    ManifestCreated,
    ManifestCreatedHmdmc,
    ManifestReceived,
    WoEvent,
    CatalogueNew,
    CatalogueProcessed,
    CatalogueRejected,
}

/// One outbound message derived from an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub subject: String,
    pub from_address: String,
    /// Never empty. Order is the order recipients were derived in.
    pub to: Vec<String>,
    pub template: Template,
    pub data: Payload,
}

impl NotificationRequest {
    pub fn new(
        subject: String,
        from_address: String,
        to: Vec<String>,
        template: Template,
        data: Payload,
    ) -> Self {
        debug_assert!(!to.is_empty(), "notification request without recipients");
        Self {
            subject,
            from_address,
            to,
            template,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::IntoEnumIterator;

    #[test]
    fn test_event_type_round_trips_known_tags() {
        for tag in [
            EVENT_MAN_CREATED,
            EVENT_MAN_RECEIVED,
            EVENT_WO_DISPATCHED,
            EVENT_WO_CONCLUDED,
            EVENT_CAT_NEW,
            EVENT_CAT_PROCESSED,
            EVENT_CAT_REJECTED,
        ] {
            let event_type = EventType::from(tag);
            assert!(!matches!(event_type, EventType::Other(_)), "{tag} should be known");
            assert_eq!(event_type.as_str(), tag);
        }
    }

    #[test]
    fn test_unknown_tag_is_kept_verbatim() {
        let event_type = EventType::from("submission.created");
        assert_eq!(event_type, EventType::Other("submission.created".to_string()));
        assert_eq!(event_type.to_string(), "submission.created");
    }

    #[test]
    fn test_suffix() {
        assert_eq!(EventType::WorkOrderConcluded.suffix(), "concluded");
        assert_eq!(EventType::WorkOrderDispatched.suffix(), "dispatched");
        assert_eq!(EventType::Other("plain".to_string()).suffix(), "plain");
    }

    #[test]
    fn test_template_identifiers() {
        let names: Vec<String> = Template::iter().map(|t| t.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "manifest_created",
                "manifest_created_hmdmc",
                "manifest_received",
                "wo_event",
                "catalogue_new",
                "catalogue_processed",
                "catalogue_rejected",
            ]
        );
        assert_eq!(serde_json::to_value(Template::WoEvent).unwrap(), json!("wo_event"));
    }

    #[test]
    fn test_event_deserializes_with_defaults() {
        let event = Event::from_json(r#"{"event_type":"catalogue.new","user_identifier":"u@x"}"#)
            .unwrap();
        assert_eq!(event.event_type, EventType::CatalogueNew);
        assert!(event.metadata.is_empty());
        assert!(event.notifier_info.is_empty());
        assert_eq!(event.timestamp, Value::Null);
    }

    #[test]
    fn test_event_accepts_null_maps() {
        let event = Event::from_json(
            r#"{"event_type":"catalogue.new","user_identifier":"u@x","metadata":null,"notifier_info":null}"#,
        )
        .unwrap();
        assert!(event.metadata.is_empty());
        assert!(event.notifier_info.is_empty());
    }

    #[test]
    fn test_event_rejects_missing_user() {
        let err = Event::from_json(r#"{"event_type":"catalogue.new"}"#).unwrap_err();
        assert!(err.to_string().contains("user_identifier"));
    }

    #[test]
    fn test_metadata_value_skips_empty() {
        let event = Event::new(EventType::ManifestReceived, "u@x")
            .with_metadata("barcode", "")
            .with_metadata("all_received", true);
        assert!(event.metadata_value("barcode").is_none());
        assert_eq!(event.metadata_value("all_received"), Some(&json!(true)));
        assert!(event.metadata_value("created_at").is_none());
    }
}
