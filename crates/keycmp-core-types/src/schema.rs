//! Canonical schema constants for structured logging and events
//!
//! These constants keep log events from the core and the CLI consistent.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Comparison inputs
pub const FIELD_COLLECTION: &str = "collection";
pub const FIELD_BASE_LEN: &str = "base_len";
pub const FIELD_WORKING_LEN: &str = "working_len";
pub const FIELD_ITEM_LEN: &str = "item_len";

// Comparison outcome
pub const FIELD_ADDED: &str = "added";
pub const FIELD_REMOVED: &str = "removed";
pub const FIELD_UPDATED: &str = "updated";
pub const FIELD_UNCHANGED: &str = "unchanged";
pub const FIELD_CHANGES_COUNT: &str = "changes_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
