//! Domain models for the clinical trials report.
//!
//! - [`Study`] - One normalized trial row
//! - [`Stats`] - Aggregate counts over the final study list
//! - [`ReportConfig`] - Settings read from the `Config` sheet
//! - [`BrandSortMap`] - Brand ranks read from the `Drug_Brand_Map` sheet
//! - [`ParsedReport`] - Everything the normalizer hands to the renderer

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

// =============================================================================
// Study
// =============================================================================

/// A single clinical trial entry.
///
/// Field names serialize exactly as the spreadsheet column headers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Study {
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "Is_New_Study")]
    pub is_new_study: bool,
    /// Free text naming the fields changed this period.
    #[serde(rename = "Updated_Fields")]
    pub updated_fields: String,
    #[serde(rename = "NCT_Number")]
    pub nct_number: String,
    #[serde(rename = "Study_Title")]
    pub study_title: String,
    #[serde(rename = "Study_URL")]
    pub study_url: String,
    #[serde(rename = "Phase")]
    pub phase: String,
    #[serde(rename = "Study_Type")]
    pub study_type: String,
    #[serde(rename = "Sponsor")]
    pub sponsor: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Start_Date")]
    pub start_date: String,
    #[serde(rename = "Primary_Completion_Date")]
    pub primary_completion_date: String,
    #[serde(rename = "Completion_Date")]
    pub completion_date: String,
    #[serde(rename = "Results_First_Posted")]
    pub results_first_posted: String,
    #[serde(rename = "Strategic_Implications")]
    pub strategic_implications: String,
}

impl Study {
    /// Whether anything was reported as updated for this study.
    pub fn has_updates(&self) -> bool {
        !self.updated_fields.is_empty()
    }
}

// =============================================================================
// Stats
// =============================================================================

/// Summary counts shown next to the generated email.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_studies: usize,
    pub new_studies: usize,
    pub updated_studies: usize,
    pub brand_count: usize,
}

impl Stats {
    /// Compute stats over the final (filtered, sorted) study list.
    pub fn from_studies(studies: &[Study]) -> Self {
        let brands: HashSet<&str> = studies
            .iter()
            .map(|s| s.brand.as_str())
            .filter(|b| !b.is_empty())
            .collect();

        Self {
            total_studies: studies.len(),
            new_studies: studies.iter().filter(|s| s.is_new_study).count(),
            updated_studies: studies.iter().filter(|s| s.has_updates()).count(),
            brand_count: brands.len(),
        }
    }
}

// =============================================================================
// Report Config
// =============================================================================

/// Key/value settings from the `Config` sheet.
///
/// Values keep their scalar JSON type. Keys the renderer does not know
/// about are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportConfig(Map<String, Value>);

impl ReportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key; later rows overwrite earlier ones.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}

// =============================================================================
// Brand Sort Map
// =============================================================================

/// Rank given to brands missing from the brand map.
pub const UNRANKED: f64 = 999.0;

/// Explicit brand ordering from the `Drug_Brand_Map` sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrandSortMap {
    ranks: HashMap<String, f64>,
}

impl BrandSortMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, brand: impl Into<String>, rank: f64) {
        self.ranks.insert(brand.into(), rank);
    }

    /// Rank for a brand, [`UNRANKED`] when absent.
    pub fn rank_of(&self, brand: &str) -> f64 {
        self.ranks.get(brand).copied().unwrap_or(UNRANKED)
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

// =============================================================================
// Parsed Report
// =============================================================================

/// Output of the normalizer: `{ config, studies, stats }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedReport {
    pub config: ReportConfig,
    pub studies: Vec<Study>,
    pub stats: Stats,
}

impl ParsedReport {
    /// Assemble a report, deriving stats from the studies.
    pub fn new(config: ReportConfig, studies: Vec<Study>) -> Self {
        let stats = Stats::from_studies(&studies);
        Self { config, studies, stats }
    }
}

// =============================================================================
// Tests
// =============================================================================
