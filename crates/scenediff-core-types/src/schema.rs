//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Entity identifiers
pub const FIELD_FILE_ID: &str = "file_id";
pub const FIELD_LINE: &str = "line";

// Collection sizes
pub const FIELD_LINE_COUNT: &str = "line_count";
pub const FIELD_OBJECT_COUNT: &str = "object_count";
pub const FIELD_ROOT_COUNT: &str = "root_count";
pub const FIELD_ADDED_COUNT: &str = "added_count";
pub const FIELD_REMOVED_COUNT: &str = "removed_count";
pub const FIELD_MODIFIED_COUNT: &str = "modified_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
