//! High-level normalizer API: workbook bytes to `{config, studies, stats}`.
//!
//! # Example
//!
//! ```rust,ignore
//! use ctmail::transform::pipeline::normalize_file;
//!
//! let report = normalize_file("trials.xlsx")?;
//! println!("{} studies across {} brands", report.stats.total_studies, report.stats.brand_count);
//! ```

use serde::Serialize;
use std::path::Path;

use super::fields::study_from_row;
use super::ranking::sort_by_brand_rank;
use crate::api::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::error::{ParseResult, WorkbookError};
use crate::models::{BrandSortMap, ParsedReport, ReportConfig, Study};
use crate::parser::{RawCell, SheetTable, Workbook};

/// Optional sheet holding `key | value` report settings.
pub const CONFIG_SHEET: &str = "Config";
/// Optional sheet holding `Brand_Name | Sort_Order`.
pub const BRAND_MAP_SHEET: &str = "Drug_Brand_Map";
/// Preferred data sheet; the first sheet is used otherwise.
pub const DATA_SHEET: &str = "Clinical Trials Data";

/// Which sheets the normalizer will read from a workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSelection {
    pub sheet_names: Vec<String>,
    pub data_sheet: Option<String>,
    pub has_config: bool,
    pub has_brand_map: bool,
}

/// Normalize workbook bytes (xlsx, xls, xlsb, ods).
pub fn normalize_workbook(bytes: &[u8]) -> ParseResult<ParsedReport> {
    log_info(format!("📖 Reading workbook ({} bytes)...", bytes.len()));
    let mut workbook = Workbook::from_bytes(bytes)?;
    normalize(&mut workbook)
}

/// Normalize a workbook file on disk.
pub fn normalize_file<P: AsRef<Path>>(path: P) -> ParseResult<ParsedReport> {
    log_info(format!("📖 Reading workbook: {}", path.as_ref().display()));
    let mut workbook = Workbook::open(path)?;
    normalize(&mut workbook)
}

/// Run every normalization step on an opened workbook.
pub fn normalize(workbook: &mut Workbook) -> ParseResult<ParsedReport> {
    let selection = select_sheets(workbook);
    log_success(format!("Found {} sheet(s): {}", selection.sheet_names.len(), selection.sheet_names.join(", ")));

    // Step 1: Config
    let config = if selection.has_config {
        let config = read_config(&workbook.sheet(CONFIG_SHEET)?);
        log_success(format!("Config: {} setting(s)", config.len()));
        config
    } else {
        log_info("No Config sheet, using defaults");
        ReportConfig::new()
    };

    // Step 2: Brand order
    let ranks = if selection.has_brand_map {
        let ranks = read_brand_sort_map(&workbook.sheet(BRAND_MAP_SHEET)?);
        log_success(format!("Brand map: {} ranked brand(s)", ranks.len()));
        ranks
    } else {
        log_info("No Drug_Brand_Map sheet, keeping row order");
        BrandSortMap::new()
    };

    // Step 3: Data rows
    let data_sheet = selection.data_sheet.ok_or(WorkbookError::NoSheets)?;
    log_info(format!("📋 Reading data sheet \"{}\"", data_sheet));
    let table = workbook.sheet(&data_sheet)?;

    let studies = read_studies(&table);
    let studies = sort_by_brand_rank(studies, &ranks);

    let report = ParsedReport::new(config, studies);
    log_success(format!(
        "{} studies ({} new, {} updated, {} brands)",
        report.stats.total_studies,
        report.stats.new_studies,
        report.stats.updated_studies,
        report.stats.brand_count
    ));

    Ok(report)
}

/// Report which sheets a workbook offers and which ones will be read.
pub fn select_sheets(workbook: &Workbook) -> SheetSelection {
    let names = workbook.sheet_names().to_vec();
    SheetSelection {
        data_sheet: select_data_sheet(&names).map(str::to_string),
        has_config: workbook.has_sheet(CONFIG_SHEET),
        has_brand_map: workbook.has_sheet(BRAND_MAP_SHEET),
        sheet_names: names,
    }
}

/// Prefer the named data sheet, fall back to the first one.
pub fn select_data_sheet(names: &[String]) -> Option<&str> {
    names
        .iter()
        .find(|n| n.as_str() == DATA_SHEET)
        .or_else(|| names.first())
        .map(String::as_str)
}

/// Read `key | value` rows below the header row.
///
/// Rows need a truthy key and a non-blank value.
pub fn read_config(table: &SheetTable) -> ReportConfig {
    let mut config = ReportConfig::new();

    for row in 1..table.rows().len() {
        let key = table.cell(row, 0);
        let value = table.cell(row, 1);
        if key.is_truthy() && !value.is_empty() {
            config.insert(key.to_display_string(), value.to_json());
        }
    }

    config
}

/// Read the `Brand_Name` / `Sort_Order` table.
///
/// Rows where either column is falsy are ignored, as are ranks that are
/// not numbers.
pub fn read_brand_sort_map(table: &SheetTable) -> BrandSortMap {
    let mut ranks = BrandSortMap::new();

    for row in table.records() {
        let brand = row.get("Brand_Name");
        let order = row.get("Sort_Order");
        if !brand.is_truthy() || !order.is_truthy() {
            continue;
        }

        match sort_rank(order) {
            Some(rank) => ranks.insert(brand.to_display_string(), rank),
            None => log_warning(format!(
                "Ignoring non-numeric Sort_Order \"{}\" for {}",
                order.to_display_string(),
                brand.to_display_string()
            )),
        }
    }

    ranks
}

fn sort_rank(cell: &RawCell) -> Option<f64> {
    match cell {
        RawCell::Number(n) => Some(*n),
        RawCell::Bool(true) => Some(1.0),
        RawCell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
        _ => None,
    }
}

/// Map every data row to a study, dropping rows without an NCT number.
pub fn read_studies(table: &SheetTable) -> Vec<Study> {
    let rows = table.records();
    let total = rows.len();

    let studies: Vec<Study> = rows
        .iter()
        .map(study_from_row)
        .filter(|s| !s.nct_number.is_empty())
        .collect();

    let dropped = total - studies.len();
    if dropped > 0 {
        log_info_indent(format!("{} row(s) without NCT_Number skipped", dropped), 1);
    }

    studies
}
