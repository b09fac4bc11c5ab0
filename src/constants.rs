/// Activity type recorded for the behavior row derived from an upload
pub const ACTIVITY_UPLOAD: &str = "upload";

/// Activity type recorded for the behavior row derived from an interaction
pub const ACTIVITY_INTERACTION: &str = "interaction";

/// Largest count accepted for a single submitted field
///
/// Keeps every per-group SUM far below SQLite's 64-bit integer range.
pub const MAX_COUNT: i64 = 1_000_000;

/// Past this many categories the chart's x labels are drawn rotated
pub const ROTATE_LABELS_AFTER: usize = 8;

/// Rendered chart width in pixels
pub const CHART_WIDTH: u32 = 1000;

/// Rendered chart height in pixels
pub const CHART_HEIGHT: u32 = 500;

/// Days covered by the rolling report when `window` is given without a count
pub const DEFAULT_ROLLING_DAYS: u32 = 7;

// =============================================================================
// Form Field Names
// =============================================================================

pub const FIELD_ADMIN_ID: &str = "admin_id";
pub const FIELD_NUM_IMAGES: &str = "num_images";
pub const FIELD_NUM_COMMENTS: &str = "num_comments";
pub const FIELD_NUM_REACTIONS: &str = "num_reactions";
pub const FIELD_ACTIVITY_TYPE: &str = "activity_type";
pub const FIELD_DETAILS: &str = "details";
