//! REST API types for frontend integration.
//!
//! A successful parse answers with [`ParsedReport`] as-is:
//! `{ "config": {...}, "studies": [...], "stats": {...} }`.
//! Every failure answers with [`ErrorResponse`].

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ServerError;
use crate::models::ParsedReport;

/// Body of a successful `POST /api/parse`.
pub type ParseResponse = ParsedReport;

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable reason
    pub message: String,
}

/// Create an error response
pub fn error_response(message: &str) -> Value {
    json!({ "message": message })
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status(), Json(error_response(&self.to_string()))).into_response()
    }
}

/// One-line description of a finished upload for the operator trace.
#[derive(Debug, Clone)]
pub struct UploadSummary<'a> {
    pub file_name: Option<&'a str>,
    pub bytes: usize,
    pub report: &'a ParsedReport,
}

impl UploadSummary<'_> {
    pub fn lines(&self) -> Vec<String> {
        let stats = &self.report.stats;
        vec![
            format!("   File:           {}", self.file_name.unwrap_or("unknown")),
            format!("   Size:           {} bytes", self.bytes),
            format!("   Studies:        {}", stats.total_studies),
            format!("   New:            {}", stats.new_studies),
            format!("   Updated:        {}", stats.updated_studies),
            format!("   Brands:         {}", stats.brand_count),
            format!("   Config keys:    {}", self.report.config.len()),
        ]
    }
}
