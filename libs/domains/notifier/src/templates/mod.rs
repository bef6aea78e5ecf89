//! Notification template rendering.
//!
//! Handlebars templates for every [`Template`], one HTML and one plain text
//! variant each. Optional keys are wrapped in `{{#if}}` so an omitted key
//! renders nothing.

use crate::error::{NotifierError, NotifierResult};
use crate::models::Template;
use crate::payload::Payload;
use handlebars::Handlebars;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::debug;

/// Rendered message bodies.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub html: String,
    pub text: String,
}

/// Template engine holding every notification template.
#[derive(Clone)]
pub struct TemplateEngine {
    handlebars: Arc<Handlebars<'static>>,
}

impl TemplateEngine {
    /// Create an engine with all templates registered.
    pub fn new() -> NotifierResult<Self> {
        let mut handlebars = Handlebars::new();

        for template in Template::iter() {
            let (html, text) = sources(template);
            handlebars
                .register_template_string(&html_name(template), html)
                .map_err(|e| {
                    NotifierError::TemplateError(format!("Failed to register {}_html: {}", template, e))
                })?;
            handlebars
                .register_template_string(&text_name(template), text)
                .map_err(|e| {
                    NotifierError::TemplateError(format!("Failed to register {}_text: {}", template, e))
                })?;
        }

        Ok(Self {
            handlebars: Arc::new(handlebars),
        })
    }

    /// Render both bodies of `template` with `data`.
    pub fn render(&self, template: Template, data: &Payload) -> NotifierResult<RenderedEmail> {
        debug!(template = %template, keys = data.len(), "Rendering notification");

        let html = self.handlebars.render(&html_name(template), data)?;
        let text = self.handlebars.render(&text_name(template), data)?;

        Ok(RenderedEmail { html, text })
    }
}

fn html_name(template: Template) -> String {
    format!("{}_html", template)
}

fn text_name(template: Template) -> String {
    format!("{}_text", template)
}

fn sources(template: Template) -> (&'static str, &'static str) {
    match template {
        Template::ManifestCreated => (MANIFEST_CREATED_HTML, MANIFEST_CREATED_TEXT),
        Template::ManifestCreatedHmdmc => (MANIFEST_CREATED_HMDMC_HTML, MANIFEST_CREATED_HMDMC_TEXT),
        Template::ManifestReceived => (MANIFEST_RECEIVED_HTML, MANIFEST_RECEIVED_TEXT),
        Template::WoEvent => (WO_EVENT_HTML, WO_EVENT_TEXT),
        Template::CatalogueNew => (CATALOGUE_NEW_HTML, CATALOGUE_NEW_TEXT),
        Template::CatalogueProcessed => (CATALOGUE_PROCESSED_HTML, CATALOGUE_PROCESSED_TEXT),
        Template::CatalogueRejected => (CATALOGUE_REJECTED_HTML, CATALOGUE_REJECTED_TEXT),
    }
}

// ============================================================================
// Templates
// ============================================================================

const MANIFEST_CREATED_HTML: &str = r#"<html>
<body style="font-family: sans-serif;">
  <p>A manifest has been created{{#if user_identifier}} by {{user_identifier}}{{/if}}.</p>
  {{#if manifest_id}}
  <p>Manifest: <strong>{{manifest_id}}</strong></p>
  <p><a href="{{link}}">View the manifest in Reception</a></p>
  {{/if}}
</body>
</html>"#;

const MANIFEST_CREATED_TEXT: &str = r#"A manifest has been created{{#if user_identifier}} by {{{user_identifier}}}{{/if}}.
{{#if manifest_id}}
Manifest: {{{manifest_id}}}
View it in Reception: {{{link}}}
{{/if}}"#;

const MANIFEST_CREATED_HMDMC_HTML: &str = r#"<html>
<body style="font-family: sans-serif;">
  <p>Manifest {{manifest_id}} was created{{#if user_identifier}} by {{user_identifier}}{{/if}} and lists the following HMDMC numbers, which need verifying:</p>
  <ul>
  {{#each hmdmc_list}}
    <li>{{this}}</li>
  {{/each}}
  </ul>
  {{#if link}}<p><a href="{{link}}">View the manifest in Reception</a></p>{{/if}}
</body>
</html>"#;

const MANIFEST_CREATED_HMDMC_TEXT: &str = r#"Manifest {{{manifest_id}}} was created{{#if user_identifier}} by {{{user_identifier}}}{{/if}} and lists the following HMDMC numbers, which need verifying:
{{#each hmdmc_list}}
- {{{this}}}
{{/each}}
{{#if link}}View it in Reception: {{{link}}}{{/if}}"#;

const MANIFEST_RECEIVED_HTML: &str = r#"<html>
<body style="font-family: sans-serif;">
  <p>Material for manifest <strong>{{manifest_id}}</strong> has been received.</p>
  {{#if barcode}}<p>Labware barcode: {{barcode}}</p>{{/if}}
  {{#if created_at}}<p>Received at: {{created_at}}</p>{{/if}}
  {{#if all_received}}<p>All labware for this manifest has now been received.</p>{{/if}}
  {{#if link}}<p><a href="{{link}}">View the manifest in Reception</a></p>{{/if}}
</body>
</html>"#;

const MANIFEST_RECEIVED_TEXT: &str = r#"Material for manifest {{{manifest_id}}} has been received.
{{#if barcode}}Labware barcode: {{{barcode}}}
{{/if}}{{#if created_at}}Received at: {{{created_at}}}
{{/if}}{{#if all_received}}All labware for this manifest has now been received.
{{/if}}{{#if link}}View it in Reception: {{{link}}}{{/if}}"#;

const WO_EVENT_HTML: &str = r#"<html>
<body style="font-family: sans-serif;">
  <p>Work order <strong>{{work_order_id}}</strong> has been {{work_order_status}}.</p>
  <p><a href="{{link}}">View the work plan</a></p>
</body>
</html>"#;

const WO_EVENT_TEXT: &str = r#"Work order {{{work_order_id}}} has been {{{work_order_status}}}.
View the work plan: {{{link}}}"#;

const CATALOGUE_NEW_HTML: &str = r#"<html>
<body style="font-family: sans-serif;">
  <p>A new catalogue has been submitted.</p>
</body>
</html>"#;

const CATALOGUE_NEW_TEXT: &str = "A new catalogue has been submitted.";

const CATALOGUE_PROCESSED_HTML: &str = r#"<html>
<body style="font-family: sans-serif;">
  <p>The submitted catalogue has been processed.</p>
</body>
</html>"#;

const CATALOGUE_PROCESSED_TEXT: &str = "The submitted catalogue has been processed.";

const CATALOGUE_REJECTED_HTML: &str = r#"<html>
<body style="font-family: sans-serif;">
  <p>The submitted catalogue has been rejected.</p>
  {{#if error}}
  <p>Reason: {{error}}</p>
  {{#if timestamp}}<p>At: {{timestamp}}</p>{{/if}}
  {{/if}}
</body>
</html>"#;

const CATALOGUE_REJECTED_TEXT: &str = r#"The submitted catalogue has been rejected.
{{#if error}}Reason: {{{error}}}
{{#if timestamp}}At: {{{timestamp}}}{{/if}}{{/if}}"#;
