//! Links back into the applications an event refers to.
//!
//! Identifiers are inserted verbatim; nothing is percent-encoded.

use crate::config::LinkConfig;
use crate::consts::{PATH_RECEPTION, PATH_WORK_ORDER_BEGIN, PATH_WORK_ORDER_END};

/// Format `protocol://host:port/seg1/.../segN`.
pub fn build_link(protocol: &str, host: &str, port: u16, segments: &[&str]) -> String {
    let mut link = format!("{}://{}:{}", protocol, host, port);
    for segment in segments {
        link.push('/');
        link.push_str(segment);
    }
    link
}

impl LinkConfig {
    /// Link to a manifest in the reception app.
    pub fn manifest_link(&self, manifest_id: &str) -> String {
        build_link(
            &self.protocol,
            &self.root,
            self.port,
            &[PATH_RECEPTION, manifest_id],
        )
    }

    /// Link to the work plan a work order belongs to.
    pub fn work_order_link(&self, work_plan_id: &str) -> String {
        build_link(
            &self.protocol,
            &self.root,
            self.port,
            &[PATH_WORK_ORDER_BEGIN, work_plan_id, PATH_WORK_ORDER_END],
        )
    }
}
