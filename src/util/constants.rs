// ctsl-report - util/constants.rs
//
// Single source of truth for named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "ctsl-report";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Rendering
// =============================================================================

/// Heading shown for matches whose compound name is absent.
pub const UNNAMED_COMPOUND: &str = "Unnamed Compound";

/// Raw-view toggle label while the raw view is hidden.
pub const SHOW_RAW_LABEL: &str = "Show Raw JSON";

/// Raw-view toggle label while the raw view is visible.
pub const HIDE_RAW_LABEL: &str = "Hide Raw JSON";

// =============================================================================
// Export
// =============================================================================

/// Filename prefix for both export formats (`ctsl_<timestamp>.csv|json`).
pub const EXPORT_FILE_PREFIX: &str = "ctsl";

/// ISO-8601 timestamp at seconds precision, used in export filenames.
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Maximum number of CSV data rows in a single export. A result set large
/// enough to hit this indicates a runaway upstream response, not a user
/// export that should be materialised in memory.
pub const MAX_EXPORT_ROWS: usize = 1_000_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
