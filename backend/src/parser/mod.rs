//! Generic workbook reader.
//!
//! Opens xlsx/xls/xlsb/ods bytes, exposes sheets as rectangular tables of
//! [`RawCell`], and turns header-row tables into keyed rows.
//! No clinical-trial specific logic here.

pub mod cell;

pub use cell::{format_number, RawCell};

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use crate::error::{WorkbookError, WorkbookResult};
use cell::EMPTY_CELL;

/// An opened workbook held in memory.
pub struct Workbook {
    inner: Sheets<Cursor<Vec<u8>>>,
    names: Vec<String>,
}

impl std::fmt::Debug for Workbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbook").field("sheets", &self.names).finish()
    }
}

impl Workbook {
    /// Open a workbook from raw bytes, auto-detecting the format.
    pub fn from_bytes(bytes: &[u8]) -> WorkbookResult<Self> {
        let inner = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
        let names = inner.sheet_names().to_vec();
        Ok(Self { inner, names })
    }

    /// Open a workbook file.
    pub fn open<P: AsRef<Path>>(path: P) -> WorkbookResult<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> &[String] {
        &self.names
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Read a sheet by name.
    pub fn sheet(&mut self, name: &str) -> WorkbookResult<SheetTable> {
        let range = self
            .inner
            .worksheet_range(name)
            .map_err(|e| WorkbookError::Sheet {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        Ok(SheetTable::from_range(name, &range))
    }
}

/// A sheet as rows of cells.
///
/// Column indices are absolute: index 0 is always column A, even when
/// the used area of the sheet starts further right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetTable {
    pub name: String,
    rows: Vec<Vec<RawCell>>,
}

impl SheetTable {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<RawCell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    fn from_range(name: &str, range: &Range<Data>) -> Self {
        let start_col = range.start().map(|(_, c)| c as usize).unwrap_or(0);

        let rows = range
            .rows()
            .map(|row| {
                let mut cells = vec![RawCell::Empty; start_col];
                cells.extend(row.iter().map(RawCell::from));
                cells
            })
            .collect();

        Self::new(name, rows)
    }

    /// All rows, header included.
    pub fn rows(&self) -> &[Vec<RawCell>] {
        &self.rows
    }

    /// Cell at (row, column), empty when out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> &RawCell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Interpret the first row as headers and key every following
    /// non-blank row by header name.
    ///
    /// Blank header cells are skipped; for duplicate headers the first
    /// column wins.
    pub fn records(&self) -> Vec<SheetRow> {
        let Some((header, body)) = self.rows.split_first() else {
            return Vec::new();
        };

        let mut columns: Vec<(String, usize)> = Vec::new();
        for (idx, cell) in header.iter().enumerate() {
            let name = cell.to_display_string();
            if name.is_empty() || columns.iter().any(|(n, _)| *n == name) {
                continue;
            }
            columns.push((name, idx));
        }

        body.iter()
            .filter(|row| row.iter().any(|c| !c.is_empty()))
            .map(|row| {
                let cells = columns
                    .iter()
                    .map(|(name, idx)| {
                        let value = row.get(*idx).cloned().unwrap_or_default();
                        (name.clone(), value)
                    })
                    .collect();
                SheetRow { cells }
            })
            .collect()
    }
}

/// One data row keyed by column header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRow {
    cells: HashMap<String, RawCell>,
}

impl SheetRow {
    /// Build a row directly from `(header, value)` pairs.
    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, RawCell)>) -> Self {
        Self {
            cells: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Value under a header; missing columns read as empty.
    pub fn get(&self, column: &str) -> &RawCell {
        self.cells.get(column).unwrap_or(&EMPTY_CELL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<Vec<RawCell>>) -> SheetTable {
        SheetTable::new("Sheet1", rows)
    }

    #[test]
    fn test_records_keyed_by_header() {
        let t = table(vec![
            vec![RawCell::text("Brand"), RawCell::text("NCT_Number")],
            vec![RawCell::text("Taltz®"), RawCell::text("NCT001")],
        ]);
        let records = t.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Brand"), &RawCell::text("Taltz®"));
        assert_eq!(records[0].get("NCT_Number"), &RawCell::text("NCT001"));
        assert_eq!(records[0].get("Phase"), &RawCell::Empty);
    }

    #[test]
    fn test_blank_rows_skipped() {
        let t = table(vec![
            vec![RawCell::text("a")],
            vec![RawCell::Empty],
            vec![RawCell::text("1")],
        ]);
        assert_eq!(t.records().len(), 1);
    }

    #[test]
    fn test_short_rows_padded() {
        let t = table(vec![
            vec![RawCell::text("a"), RawCell::text("b")],
            vec![RawCell::text("1")],
        ]);
        let records = t.records();
        assert_eq!(records[0].get("b"), &RawCell::Empty);
    }

    #[test]
    fn test_duplicate_header_first_wins() {
        let t = table(vec![
            vec![RawCell::text("a"), RawCell::text("a")],
            vec![RawCell::text("first"), RawCell::text("second")],
        ]);
        assert_eq!(t.records()[0].get("a"), &RawCell::text("first"));
    }

    #[test]
    fn test_cell_out_of_bounds_is_empty() {
        let t = table(vec![vec![RawCell::text("x")]]);
        assert_eq!(t.cell(0, 0), &RawCell::text("x"));
        assert_eq!(t.cell(0, 5), &RawCell::Empty);
        assert_eq!(t.cell(9, 0), &RawCell::Empty);
    }

    #[test]
    fn test_empty_table_has_no_records() {
        assert!(table(vec![]).records().is_empty());
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let err = Workbook::from_bytes(b"not a spreadsheet").unwrap_err();
        assert!(matches!(err, WorkbookError::Open(_)));
    }
}
