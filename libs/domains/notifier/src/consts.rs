//! Event-type tags, subject lines and link path segments.
//!
//! These strings are read by operators and matched by existing templates;
//! keep them byte-for-byte stable.

pub const EVENT_MAN_CREATED: &str = "manifest.created";
pub const EVENT_MAN_RECEIVED: &str = "manifest.received";
pub const EVENT_WO_DISPATCHED: &str = "work_order.dispatched";
pub const EVENT_WO_CONCLUDED: &str = "work_order.concluded";
pub const EVENT_CAT_NEW: &str = "catalogue.new";
pub const EVENT_CAT_PROCESSED: &str = "catalogue.processed";
pub const EVENT_CAT_REJECTED: &str = "catalogue.rejected";

pub const SBJ_MAN_CREATED: &str = "Manifest Created";
pub const SBJ_MAN_CREATED_HMDMC: &str = "Manifest Created HMDMC";
pub const SBJ_MAN_RECEIVED: &str = "Manifest Received";
pub const SBJ_PREFIX_WO: &str = "Work Order";
pub const SBJ_CAT_NEW: &str = "New Catalogue";
pub const SBJ_CAT_PROCESSED: &str = "Catalogue Processed";
pub const SBJ_CAT_REJECTED: &str = "Catalogue Rejected";

pub const PATH_RECEPTION: &str = "reception";
pub const PATH_WORK_ORDER_BEGIN: &str = "work-orders/work_plans";
pub const PATH_WORK_ORDER_END: &str = "build";
