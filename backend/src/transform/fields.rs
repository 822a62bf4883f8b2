//! Per-field normalization of spreadsheet rows into [`Study`] records.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Study;
use crate::parser::{RawCell, SheetRow};

const DEFAULT_STUDY_TYPE: &str = "Interventional";
const OBSERVATIONAL: &str = "Observational";

static ACTIVE_NOT_RECRUITING_SPACED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Active,\s*Not,\s*Recruiting").expect("valid regex"));
static ACTIVE_NOT_RECRUITING_ENUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)ACTIVE_NOT_RECRUITING").expect("valid regex"));
static RECRUITING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^RECRUITING$").expect("valid regex"));
static COMPLETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^COMPLETED$").expect("valid regex"));

/// Build a study from one row of the data sheet.
pub fn study_from_row(row: &SheetRow) -> Study {
    let raw_study_type = row.get("Study_Type");

    Study {
        brand: row.get("Brand").text_or_empty(),
        is_new_study: parse_boolean(row.get("Is_New_Study")),
        updated_fields: row.get("Updated_Fields").text_or_empty(),
        nct_number: row.get("NCT_Number").text_or_empty(),
        study_title: row.get("Study_Title").text_or_empty(),
        study_url: row.get("Study_URL").text_or_empty(),
        phase: format_phase(row.get("Phase"), raw_study_type.as_str()),
        study_type: if raw_study_type.is_truthy() {
            raw_study_type.to_display_string()
        } else {
            DEFAULT_STUDY_TYPE.to_string()
        },
        sponsor: row.get("Sponsor").text_or_empty(),
        status: format_status(row.get("Status")),
        start_date: format_date(row.get("Start_Date")),
        primary_completion_date: format_date(row.get("Primary_Completion_Date")),
        completion_date: format_date(row.get("Completion_Date")),
        results_first_posted: format_date(row.get("Results_First_Posted")),
        strategic_implications: row.get("Strategic_Implications").text_or_empty(),
    }
}

/// Booleans pass through, text is compared to "true" ignoring case,
/// anything else goes by truthiness.
pub fn parse_boolean(value: &RawCell) -> bool {
    match value {
        RawCell::Bool(b) => *b,
        RawCell::Text(s) => s.eq_ignore_ascii_case("true"),
        other => other.is_truthy(),
    }
}

/// Normalize the phase column.
///
/// A blank phase on an observational study reads "Observational". Numeric
/// phases lose the `.0` a spreadsheet puts on them.
pub fn format_phase(value: &RawCell, study_type: Option<&str>) -> String {
    let blank = match value {
        RawCell::Number(n) => n.is_nan(),
        other => !other.is_truthy(),
    };
    if blank {
        return if study_type == Some(OBSERVATIONAL) {
            OBSERVATIONAL.to_string()
        } else {
            String::new()
        };
    }

    let s = value.to_display_string();
    match s.strip_suffix(".0") {
        Some(stripped) => stripped.to_string(),
        None => s,
    }
}

/// Normalize recruitment status spelling and casing.
pub fn format_status(value: &RawCell) -> String {
    if !value.is_truthy() {
        return String::new();
    }
    let s = value.to_display_string();
    let s = ACTIVE_NOT_RECRUITING_SPACED.replace_all(&s, "Active, not recruiting");
    let s = ACTIVE_NOT_RECRUITING_ENUM.replace_all(&s, "Active, not recruiting");
    let s = RECRUITING.replace(&s, "Recruiting");
    let s = COMPLETED.replace(&s, "Completed");
    s.into_owned()
}

/// Format a date cell as `M/D/YYYY` without zero padding.
///
/// Text passes through unchanged; other values are stringified.
pub fn format_date(value: &RawCell) -> String {
    if !value.is_truthy() {
        return String::new();
    }
    match value {
        RawCell::Text(s) => s.clone(),
        RawCell::Date(dt) => dt.format("%-m/%-d/%Y").to_string(),
        other => other.to_display_string(),
    }
}
