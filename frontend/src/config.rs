//! Application configuration.
//!
//! Centralized configuration for the email generator frontend.

/// Backend API base URL.
///
/// The ctmail backend server that normalizes uploaded workbooks.
pub const BACKEND_URL: &str = "http://localhost:3000";

/// Workbook upload endpoint, relative to [`BACKEND_URL`].
pub const PARSE_ENDPOINT: &str = "/api/parse";

/// Log stream endpoint, relative to [`BACKEND_URL`].
pub const LOGS_ENDPOINT: &str = "/api/logs";

/// Maximum file size for upload (in bytes).
///
/// 50 MB limit, same as the backend.
pub const MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

/// Maximum logs to keep in memory.
pub const MAX_LOG_ENTRIES: usize = 100;

/// How long the "Copied!" confirmation stays visible.
pub const COPY_FEEDBACK_MS: u32 = 2000;

/// Fallback values for report settings missing from the `Config` sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportDefaults {
    pub month: &'static str,
    pub year: &'static str,
    pub greeting: &'static str,
    pub closing: &'static str,
    /// Brand listed first in the email
    pub client_product: &'static str,
}

pub const REPORT_DEFAULTS: ReportDefaults = ReportDefaults {
    month: "December",
    year: "2025",
    greeting: "Good afternoon Sun Pharma team,",
    closing: "Kind regards,",
    client_product: "ILUMYA®",
};
