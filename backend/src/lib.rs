//! # ctmail - Clinical trials spreadsheet normalizer
//!
//! Reads a clinical-trials workbook export and produces the typed data the
//! email renderer needs: report settings, brand-ordered studies, and stats.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌──────────────────────┐
//! │  Workbook   │────▶│   Parser    │────▶│  Transform  │────▶│ {config, studies,    │
//! │ (xlsx/ods)  │     │ (raw cells) │     │ (normalize) │     │  stats} JSON         │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ctmail::normalize_file;
//!
//! let report = normalize_file("trials.xlsx").unwrap();
//! println!("Normalized {} studies", report.studies.len());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Study, Stats, ReportConfig, BrandSortMap
//! - [`parser`] - Workbook reading into typed cells
//! - [`transform`] - Field normalization, ranking, and pipeline
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ParseError, ServerError, WorkbookError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{BrandSortMap, ParsedReport, ReportConfig, Stats, Study, UNRANKED};

// =============================================================================
// Re-exports - Workbook parsing
// =============================================================================

pub use parser::{RawCell, SheetRow, SheetTable, Workbook};

// =============================================================================
// Re-exports - Normalizer
// =============================================================================

pub use transform::{
    format_date, format_phase, format_status, normalize, normalize_file, normalize_workbook,
    parse_boolean, select_sheets, sort_by_brand_rank, SheetSelection,
};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, ErrorResponse, ParseResponse};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
