// =============================================================================
// STATUS CONSTANTS
// =============================================================================

/// Settlement (KS) status: cost accepted into settlement
pub const STATUS_KS_TAKEN_IN: i32 = 1;

/// Settlement (KS) status: not accepted, the default for new records
pub const STATUS_KS_NOT_TAKEN_IN: i32 = 2;

/// Execution status: new work, the default for new records
pub const STATUS_EXECUTION_NEW: i32 = 1;

/// Execution status: work completed
pub const STATUS_EXECUTION_COMPLETED: i32 = 2;

// =============================================================================
// DATE FORMATS
// =============================================================================

/// Wire format for supervision time windows
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Wire format for date-only filters
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used inside spreadsheet exports
pub const EXPORT_DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M";
