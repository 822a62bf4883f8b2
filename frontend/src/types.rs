//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Report Types** - What the backend returns for an upload
//! - **Log Types** - Real-time log streaming
//! - **Error Types** - Frontend error handling

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// =============================================================================
// Report Types
// =============================================================================

/// A normalized clinical trial, keyed by the spreadsheet column names.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Study {
    #[serde(rename = "Brand", default)]
    pub brand: String,
    #[serde(rename = "Is_New_Study", default)]
    pub is_new_study: bool,
    #[serde(rename = "Updated_Fields", default)]
    pub updated_fields: String,
    #[serde(rename = "NCT_Number", default)]
    pub nct_number: String,
    #[serde(rename = "Study_Title", default)]
    pub study_title: String,
    #[serde(rename = "Study_URL", default)]
    pub study_url: String,
    #[serde(rename = "Phase", default)]
    pub phase: String,
    #[serde(rename = "Study_Type", default)]
    pub study_type: String,
    #[serde(rename = "Sponsor", default)]
    pub sponsor: String,
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "Start_Date", default)]
    pub start_date: String,
    #[serde(rename = "Primary_Completion_Date", default)]
    pub primary_completion_date: String,
    #[serde(rename = "Completion_Date", default)]
    pub completion_date: String,
    #[serde(rename = "Results_First_Posted", default)]
    pub results_first_posted: String,
    #[serde(rename = "Strategic_Implications", default)]
    pub strategic_implications: String,
}

/// Summary counts computed by the backend. Displayed as received.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_studies: usize,
    pub new_studies: usize,
    pub updated_studies: usize,
    pub brand_count: usize,
}

/// Report settings from the `Config` sheet, values as scalar JSON.
pub type ReportConfig = Map<String, Value>;

/// Response from the backend parse endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResponse {
    #[serde(default)]
    pub config: ReportConfig,
    #[serde(default)]
    pub studies: Vec<Study>,
    #[serde(default)]
    pub stats: Stats,
}

/// Error body returned by the backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: String,
}

// =============================================================================
// Log Types
// =============================================================================

/// Log severity level.
///
/// Matches the backend's log levels for SSE streaming.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Informational message
    Info,
    /// Success/completion message
    Success,
    /// Warning message
    Warning,
    /// Error message
    Error,
}

impl LogLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            LogLevel::Info => "log-info",
            LogLevel::Success => "log-success",
            LogLevel::Warning => "log-warning",
            LogLevel::Error => "log-error",
        }
    }
}

/// A single log entry, from the backend stream or the app itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Severity level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Timestamp string (HH:MM:SS)
    pub timestamp: String,
    /// Nesting depth for sub-steps
    #[serde(default)]
    pub indent: u8,
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    /// The chosen file cannot be uploaded.
    Validation(String),
    /// The backend rejected the upload.
    Upload(String),
    /// Network/HTTP error.
    Network(String),
    /// Clipboard write failed.
    Clipboard(String),
}

impl AppError {
    /// The message without its category, for display next to the control.
    pub fn message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::Upload(msg)
            | AppError::Network(msg)
            | AppError::Clipboard(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Upload(msg) => write!(f, "Upload error: {}", msg),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Clipboard(msg) => write!(f, "Clipboard error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_deserialization() {
        let json = r#"{
            "config": { "Report_Month": "January", "Report_Year": 2026 },
            "studies": [
                {
                    "Brand": "ILUMYA®",
                    "Is_New_Study": true,
                    "Updated_Fields": "",
                    "NCT_Number": "NCT002",
                    "Study_Title": "Tildrakizumab registry",
                    "Study_URL": "https://clinicaltrials.gov/study/NCT002",
                    "Phase": "Observational",
                    "Study_Type": "Observational",
                    "Sponsor": "Sun Pharma",
                    "Status": "Recruiting",
                    "Start_Date": "1/15/2024",
                    "Primary_Completion_Date": "",
                    "Completion_Date": "",
                    "Results_First_Posted": "",
                    "Strategic_Implications": ""
                }
            ],
            "stats": { "totalStudies": 1, "newStudies": 1, "updatedStudies": 0, "brandCount": 1 }
        }"#;

        let response: ParseResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.studies.len(), 1);
        assert_eq!(response.studies[0].brand, "ILUMYA®");
        assert!(response.studies[0].is_new_study);
        assert_eq!(response.stats.total_studies, 1);
        assert_eq!(response.stats.brand_count, 1);
        assert_eq!(response.config["Report_Year"], 2026);
    }

    #[test]
    fn test_log_entry_from_backend() {
        let json = r#"{"level":"warning","message":"Ignoring rank","timestamp":"10:42:07","indent":1}"#;
        let entry: LogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.level, LogLevel::Warning);
        assert_eq!(entry.indent, 1);
        assert_eq!(entry.level.css_class(), "log-warning");
    }

    #[test]
    fn test_app_error_message() {
        let err = AppError::Validation("Please upload an Excel file (.xlsx or .xls)".into());
        assert_eq!(err.message(), "Please upload an Excel file (.xlsx or .xls)");
        assert_eq!(
            err.to_string(),
            "Validation error: Please upload an Excel file (.xlsx or .xls)"
        );
    }
}
