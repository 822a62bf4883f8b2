//! Transformation module.
//!
//! This module turns workbook rows into the report:
//! - Fields: per-column normalization into typed studies
//! - Ranking: stable brand-rank ordering
//! - Pipeline: the full normalizer

pub mod fields;
pub mod pipeline;
pub mod ranking;

pub use fields::{format_date, format_phase, format_status, parse_boolean, study_from_row};
pub use pipeline::*;
pub use ranking::sort_by_brand_rank;
