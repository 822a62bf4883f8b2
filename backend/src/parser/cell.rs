//! Typed spreadsheet cell values.
//!
//! Every cell read from a workbook is converted once into a [`RawCell`],
//! so the normalizer never has to deal with reader-specific types.

use calamine::Data;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Value};

/// A decoded spreadsheet cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RawCell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Calendar date/time as decoded from the workbook (no timezone).
    Date(NaiveDateTime),
}

pub(crate) static EMPTY_CELL: RawCell = RawCell::Empty;

impl RawCell {
    pub fn text(s: impl Into<String>) -> Self {
        RawCell::Text(s.into())
    }

    /// Date at midnight. Returns `Empty` for an impossible calendar day.
    pub fn date(year: i32, month: u32, day: u32) -> Self {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(RawCell::Date)
            .unwrap_or(RawCell::Empty)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RawCell::Empty)
    }

    /// Truthiness: empty text, zero, NaN, `false` and blank cells are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            RawCell::Empty => false,
            RawCell::Text(s) => !s.is_empty(),
            RawCell::Number(n) => *n != 0.0 && !n.is_nan(),
            RawCell::Bool(b) => *b,
            RawCell::Date(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawCell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Plain string form of the value.
    pub fn to_display_string(&self) -> String {
        match self {
            RawCell::Empty => String::new(),
            RawCell::Text(s) => s.clone(),
            RawCell::Number(n) => format_number(*n),
            RawCell::Bool(b) => b.to_string(),
            RawCell::Date(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }

    /// String form, or empty when the value is falsy.
    pub fn text_or_empty(&self) -> String {
        if self.is_truthy() {
            self.to_display_string()
        } else {
            String::new()
        }
    }

    /// JSON value, keeping the scalar type. Whole numbers become integers.
    pub fn to_json(&self) -> Value {
        match self {
            RawCell::Empty => Value::Null,
            RawCell::Number(n) if is_whole(*n) => json!(*n as i64),
            RawCell::Number(n) => json!(n),
            RawCell::Bool(b) => json!(b),
            other => json!(other.to_display_string()),
        }
    }
}

impl From<&Data> for RawCell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => RawCell::Empty,
            Data::String(s) => RawCell::Text(s.clone()),
            Data::Float(f) => RawCell::Number(*f),
            Data::Int(i) => RawCell::Number(*i as f64),
            Data::Bool(b) => RawCell::Bool(*b),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(naive) if dt.is_datetime() => RawCell::Date(naive),
                _ => RawCell::Number(dt.as_f64()),
            },
            Data::DateTimeIso(s) => parse_iso_datetime(s)
                .map(RawCell::Date)
                .unwrap_or_else(|| RawCell::Text(s.clone())),
            Data::DurationIso(s) => RawCell::Text(s.clone()),
            // `#N/A`, `#REF!` and friends read as blank
            Data::Error(_) => RawCell::Empty,
        }
    }
}

fn is_whole(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15
}

/// Format a number the way a spreadsheet user expects to read it back:
/// `2` not `2.0`, `2.5` stays `2.5`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if is_whole(n) {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
