//! Fields shared by all handlers of one event family.

use crate::config::NotifierConfig;
use crate::error::{NotifierError, NotifierResult};
use crate::models::Event;
use crate::payload::{PayloadBuilder, value_to_text};
use serde_json::Value;

/// Recipients and base data common to manifest notifications.
#[derive(Debug, Clone)]
pub struct ManifestCommon {
    pub to: Vec<String>,
    /// Text form of `manifest_id`, for subjects and links.
    pub manifest_id: Option<String>,
    /// Holds the raw `manifest_id` value and `link`, or nothing if the id is absent.
    pub data: PayloadBuilder,
}

/// Recipients and base data common to work-order notifications.
#[derive(Debug, Clone)]
pub struct WorkOrderCommon {
    pub to: Vec<String>,
    /// Text form of `work_order_id`, for the subject.
    pub work_order_id: String,
    pub drs_study_code: String,
    /// Holds the raw `work_order_id` value and `link`.
    pub data: PayloadBuilder,
}

/// The submitter, then the sample custodian, then every deputy in order.
///
/// A missing `manifest_id` only drops `manifest_id`/`link` from the data.
pub fn assemble_manifest_common(event: &Event, config: &NotifierConfig) -> ManifestCommon {
    let mut to = vec![event.user_identifier.clone()];
    if let Some(custodian) = event.metadata_value("sample_custodian") {
        to.push(value_to_text(custodian));
    }
    match event.metadata_value("deputies") {
        Some(Value::Array(deputies)) => to.extend(deputies.iter().map(value_to_text)),
        Some(deputy) => to.push(value_to_text(deputy)),
        None => {}
    }

    let raw_id = event.metadata_value("manifest_id");
    let manifest_id = raw_id.map(value_to_text);
    let mut data = PayloadBuilder::new();
    if let (Some(raw), Some(id)) = (raw_id, &manifest_id) {
        data = data
            .with("manifest_id", raw.clone())
            .with("link", config.link.manifest_link(id));
    }

    ManifestCommon {
        to,
        manifest_id,
        data,
    }
}

/// Work-order notifications go to the submitter only.
///
/// Fails when `work_order_id`, `work_plan_id` or `drs_study_code` is absent.
pub fn assemble_work_order_common(
    event: &Event,
    config: &NotifierConfig,
) -> NotifierResult<WorkOrderCommon> {
    let raw_work_order_id = event
        .metadata_value("work_order_id")
        .ok_or_else(|| NotifierError::missing("work_order_id"))?;
    let work_order_id = value_to_text(raw_work_order_id);
    let work_plan_id = event
        .notifier_info_value("work_plan_id")
        .map(value_to_text)
        .ok_or_else(|| NotifierError::missing("work_plan_id"))?;
    let drs_study_code = event
        .notifier_info_value("drs_study_code")
        .map(value_to_text)
        .ok_or_else(|| NotifierError::missing("drs_study_code"))?;

    let data = PayloadBuilder::new()
        .with("work_order_id", raw_work_order_id.clone())
        .with("link", config.link.work_order_link(&work_plan_id));

    Ok(WorkOrderCommon {
        to: vec![event.user_identifier.clone()],
        work_order_id,
        drs_study_code,
        data,
    })
}

/// Catalogue notifications always go to the dev team.
pub fn catalogue_recipients(config: &NotifierConfig) -> Vec<String> {
    vec![config.contact.email_dev_team.clone()]
}
