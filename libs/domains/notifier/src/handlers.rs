//! Per-event-type rules.
//!
//! Each handler turns one event into the notification requests it implies.

use crate::assembler::{
    assemble_manifest_common, assemble_work_order_common, catalogue_recipients,
};
use crate::config::NotifierConfig;
use crate::consts::*;
use crate::error::NotifierResult;
use crate::models::{Event, NotificationRequest, Template};
use crate::payload::Payload;
use tracing::debug;

/// Signature shared by every rule in the dispatch table.
pub type Handler = fn(&Event, &NotifierConfig) -> NotifierResult<Vec<NotificationRequest>>;

fn subject_with_id(prefix: &str, id: Option<&str>) -> String {
    match id {
        Some(id) => format!("{} {}", prefix, id),
        None => prefix.to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Manifest created: notify the submitter side, and the HMDMC verifier when
/// the manifest lists HMDMC numbers.
pub fn manifest_created(
    event: &Event,
    config: &NotifierConfig,
) -> NotifierResult<Vec<NotificationRequest>> {
    debug!(event_type = %event.event_type, "manifest_created triggered");
    let common = assemble_manifest_common(event, config);
    let manifest_id = common.manifest_id.as_deref();
    let data = common
        .data
        .with("user_identifier", event.user_identifier.as_str())
        .build();

    let mut requests = Vec::with_capacity(2);

    if let Some(hmdmc) = event.metadata_value("hmdmc") {
        let hmdmc_data = data.to_builder().with("hmdmc_list", hmdmc.clone()).build();
        requests.push(NotificationRequest::new(
            subject_with_id(SBJ_MAN_CREATED, manifest_id),
            config.email.from_address.clone(),
            common.to,
            Template::ManifestCreated,
            data,
        ));
        requests.push(NotificationRequest::new(
            subject_with_id(SBJ_MAN_CREATED_HMDMC, manifest_id),
            config.email.from_address.clone(),
            vec![config.contact.email_hmdmc_verify.clone()],
            Template::ManifestCreatedHmdmc,
            hmdmc_data,
        ));
    } else {
        requests.push(NotificationRequest::new(
            subject_with_id(SBJ_MAN_CREATED, manifest_id),
            config.email.from_address.clone(),
            common.to,
            Template::ManifestCreated,
            data,
        ));
    }

    Ok(requests)
}

/// Manifest received: material for a manifest arrived at reception.
pub fn manifest_received(
    event: &Event,
    config: &NotifierConfig,
) -> NotifierResult<Vec<NotificationRequest>> {
    debug!(event_type = %event.event_type, "manifest_received triggered");
    let common = assemble_manifest_common(event, config);
    let data = common
        .data
        .with_present("barcode", event.metadata_value("barcode"))
        .with_present("created_at", event.metadata_value("created_at"))
        .with_present("all_received", event.metadata_value("all_received"))
        .build();

    Ok(vec![NotificationRequest::new(
        subject_with_id(SBJ_MAN_RECEIVED, common.manifest_id.as_deref()),
        config.email.from_address.clone(),
        common.to,
        Template::ManifestReceived,
        data,
    )])
}

/// Work order dispatched or concluded.
pub fn work_order_event(
    event: &Event,
    config: &NotifierConfig,
) -> NotifierResult<Vec<NotificationRequest>> {
    debug!(event_type = %event.event_type, "work_order_event triggered");
    let common = assemble_work_order_common(event, config)?;
    let status = event.event_type.suffix();

    let subject = format!(
        "{} {} {} [Data release:{}]",
        SBJ_PREFIX_WO,
        common.work_order_id,
        capitalize(status),
        common.drs_study_code
    );
    let data = common
        .data
        .with("user_identifier", event.user_identifier.as_str())
        .with("work_order_status", status)
        .build();

    Ok(vec![NotificationRequest::new(
        subject,
        config.email.from_address.clone(),
        common.to,
        Template::WoEvent,
        data,
    )])
}

pub fn catalogue_new(
    event: &Event,
    config: &NotifierConfig,
) -> NotifierResult<Vec<NotificationRequest>> {
    debug!(event_type = %event.event_type, "catalogue_new triggered");
    Ok(vec![NotificationRequest::new(
        SBJ_CAT_NEW.to_string(),
        config.email.from_address.clone(),
        catalogue_recipients(config),
        Template::CatalogueNew,
        Payload::default(),
    )])
}

pub fn catalogue_processed(
    event: &Event,
    config: &NotifierConfig,
) -> NotifierResult<Vec<NotificationRequest>> {
    debug!(event_type = %event.event_type, "catalogue_processed triggered");
    Ok(vec![NotificationRequest::new(
        SBJ_CAT_PROCESSED.to_string(),
        config.email.from_address.clone(),
        catalogue_recipients(config),
        Template::CatalogueProcessed,
        Payload::default(),
    )])
}

/// Catalogue rejected; carries the rejection reason when there is one.
pub fn catalogue_rejected(
    event: &Event,
    config: &NotifierConfig,
) -> NotifierResult<Vec<NotificationRequest>> {
    debug!(event_type = %event.event_type, "catalogue_rejected triggered");
    let data = match event.metadata_value("error") {
        Some(error) => {
            let mut data = Payload::builder().with("error", error.clone());
            if !event.timestamp.is_null() {
                data = data.with("timestamp", event.timestamp.clone());
            }
            data.build()
        }
        None => Payload::default(),
    };

    Ok(vec![NotificationRequest::new(
        SBJ_CAT_REJECTED.to_string(),
        config.email.from_address.clone(),
        catalogue_recipients(config),
        Template::CatalogueRejected,
        data,
    )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventType;
    use crate::test_support::config;
    use serde_json::json;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("concluded"), "Concluded");
        assert_eq!(capitalize("dispatched"), "Dispatched");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_manifest_created_without_hmdmc() {
        let event = Event::new(EventType::ManifestCreated, "user@example.com")
            .with_metadata("manifest_id", "M7")
            .with_metadata("sample_custodian", "sc@example.com");

        let requests = manifest_created(&event, &config()).unwrap();
        assert_eq!(requests.len(), 1);

        let request = &requests[0];
        assert_eq!(request.subject, "Manifest Created M7");
        assert_eq!(request.from_address, "noreply@example.com");
        assert_eq!(request.to, vec!["user@example.com", "sc@example.com"]);
        assert_eq!(request.template, Template::ManifestCreated);
        assert_eq!(
            request.data.clone().into_value(),
            json!({
                "manifest_id": "M7",
                "link": "http://host:80/reception/M7",
                "user_identifier": "user@example.com",
            })
        );
    }

    #[test]
    fn test_manifest_created_with_hmdmc() {
        let event = Event::new(EventType::ManifestCreated, "user@example.com")
            .with_metadata("manifest_id", "M7")
            .with_metadata("hmdmc", json!(["12/345", "67/890"]));

        let requests = manifest_created(&event, &config()).unwrap();
        assert_eq!(requests.len(), 2);

        assert!(!requests[0].data.contains_key("hmdmc_list"));

        let hmdmc = &requests[1];
        assert_eq!(hmdmc.subject, "Manifest Created HMDMC M7");
        assert_eq!(hmdmc.to, vec!["ethics@example.com"]);
        assert_eq!(hmdmc.template, Template::ManifestCreatedHmdmc);
        assert_eq!(hmdmc.data.get("hmdmc_list"), Some(&json!(["12/345", "67/890"])));
        assert_eq!(hmdmc.data.get("link"), requests[0].data.get("link"));
        assert_eq!(hmdmc.data.get("manifest_id"), Some(&json!("M7")));
    }

    #[test]
    fn test_manifest_created_with_empty_hmdmc() {
        let event = Event::new(EventType::ManifestCreated, "user@example.com")
            .with_metadata("manifest_id", "M7")
            .with_metadata("hmdmc", json!([]));

        assert_eq!(manifest_created(&event, &config()).unwrap().len(), 1);
    }

    #[test]
    fn test_manifest_created_without_manifest_id() {
        let event = Event::new(EventType::ManifestCreated, "user@example.com");

        let requests = manifest_created(&event, &config()).unwrap();
        assert_eq!(requests[0].subject, "Manifest Created");
        assert!(!requests[0].data.contains_key("manifest_id"));
        assert!(!requests[0].data.contains_key("link"));
        assert!(requests[0].data.contains_key("user_identifier"));
    }

    #[test]
    fn test_manifest_received_copies_optional_fields() {
        let event = Event::new(EventType::ManifestReceived, "user@example.com")
            .with_metadata("manifest_id", "M8")
            .with_metadata("barcode", "AKER-1")
            .with_metadata("created_at", "2024-01-02T03:04:05Z")
            .with_metadata("deputies", json!(["dep@example.com"]));

        let requests = manifest_received(&event, &config()).unwrap();
        assert_eq!(requests.len(), 1);

        let request = &requests[0];
        assert_eq!(request.subject, "Manifest Received M8");
        assert_eq!(request.template, Template::ManifestReceived);
        assert_eq!(request.to, vec!["user@example.com", "dep@example.com"]);
        assert_eq!(request.data.get("barcode"), Some(&json!("AKER-1")));
        assert_eq!(request.data.get("created_at"), Some(&json!("2024-01-02T03:04:05Z")));
        assert!(!request.data.contains_key("all_received"));
        assert!(!request.data.contains_key("user_identifier"));
    }

    #[test]
    fn test_work_order_event_concluded() {
        let event = Event::new(EventType::WorkOrderConcluded, "user@example.com")
            .with_metadata("work_order_id", 99)
            .with_notifier_info("work_plan_id", 12)
            .with_notifier_info("drs_study_code", "S1234");

        let requests = work_order_event(&event, &config()).unwrap();
        assert_eq!(requests.len(), 1);

        let request = &requests[0];
        assert_eq!(request.subject, "Work Order 99 Concluded [Data release:S1234]");
        assert_eq!(request.to, vec!["user@example.com"]);
        assert_eq!(request.template, Template::WoEvent);
        assert_eq!(request.data.get("work_order_status"), Some(&json!("concluded")));
        assert_eq!(request.data.get("user_identifier"), Some(&json!("user@example.com")));
        assert_eq!(
            request.data.get("link"),
            Some(&json!("http://host:80/work-orders/work_plans/12/build"))
        );
    }

    #[test]
    fn test_work_order_event_missing_id_fails() {
        let event = Event::new(EventType::WorkOrderDispatched, "user@example.com")
            .with_notifier_info("work_plan_id", 12)
            .with_notifier_info("drs_study_code", "S1234");

        assert!(work_order_event(&event, &config()).is_err());
    }

    #[test]
    fn test_catalogue_new_and_processed() {
        let new = catalogue_new(&Event::new(EventType::CatalogueNew, "u"), &config()).unwrap();
        assert_eq!(new[0].subject, SBJ_CAT_NEW);
        assert_eq!(new[0].to, vec!["dev@example.com"]);
        assert_eq!(new[0].template, Template::CatalogueNew);
        assert!(new[0].data.is_empty());

        let processed =
            catalogue_processed(&Event::new(EventType::CatalogueProcessed, "u"), &config())
                .unwrap();
        assert_eq!(processed[0].subject, SBJ_CAT_PROCESSED);
        assert_eq!(processed[0].template, Template::CatalogueProcessed);
        assert!(processed[0].data.is_empty());
    }

    #[test]
    fn test_catalogue_rejected_data() {
        let plain = Event::new(EventType::CatalogueRejected, "u").with_timestamp("2024-05-06");
        let requests = catalogue_rejected(&plain, &config()).unwrap();
        assert!(requests[0].data.is_empty());

        let with_error = plain.with_metadata("error", "X");
        let requests = catalogue_rejected(&with_error, &config()).unwrap();
        assert_eq!(requests[0].subject, SBJ_CAT_REJECTED);
        assert_eq!(requests[0].to, vec!["dev@example.com"]);
        assert_eq!(
            requests[0].data.clone().into_value(),
            json!({"error": "X", "timestamp": "2024-05-06"})
        );
    }

    #[test]
    fn test_catalogue_rejected_keeps_zero_timestamp() {
        let event = Event::new(EventType::CatalogueRejected, "u")
            .with_metadata("error", "X")
            .with_timestamp(0);

        let requests = catalogue_rejected(&event, &config()).unwrap();
        assert_eq!(
            requests[0].data.clone().into_value(),
            json!({"error": "X", "timestamp": 0})
        );
    }

    #[test]
    fn test_catalogue_rejected_without_timestamp() {
        let event = Event::new(EventType::CatalogueRejected, "u").with_metadata("error", "X");

        let requests = catalogue_rejected(&event, &config()).unwrap();
        assert_eq!(requests[0].data.clone().into_value(), json!({"error": "X"}));
    }
}
