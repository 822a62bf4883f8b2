//! Workbook fixtures built in memory.

#![allow(dead_code)]

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook as XlsxWorkbook};

/// One cell of a fixture sheet.
#[derive(Debug, Clone)]
pub enum Cell {
    Blank,
    Text(&'static str),
    Number(f64),
    Bool(bool),
    /// A real date cell: serial number with a date format.
    Date(u16, u8, u8),
}

pub use Cell::{Blank, Bool, Date, Number, Text};

/// A named sheet and its rows, starting at A1.
pub struct Sheet {
    pub name: &'static str,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: &'static str, rows: Vec<Vec<Cell>>) -> Self {
        Self { name, rows }
    }
}

/// Write the sheets to an xlsx file in memory.
pub fn build_xlsx(sheets: &[Sheet]) -> Vec<u8> {
    let mut workbook = XlsxWorkbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name).unwrap();

        for (r, row) in sheet.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                match cell {
                    Blank => {}
                    Text(s) => {
                        worksheet.write_string(r, c, *s).unwrap();
                    }
                    Number(n) => {
                        worksheet.write_number(r, c, *n).unwrap();
                    }
                    Bool(b) => {
                        worksheet.write_boolean(r, c, *b).unwrap();
                    }
                    Date(y, m, d) => {
                        let date = ExcelDateTime::from_ymd(*y, *m, *d).unwrap();
                        worksheet
                            .write_datetime_with_format(r, c, &date, &date_format)
                            .unwrap();
                    }
                }
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}

pub const DATA_HEADERS: [&str; 15] = [
    "Brand",
    "Is_New_Study",
    "Updated_Fields",
    "NCT_Number",
    "Study_Title",
    "Study_URL",
    "Phase",
    "Study_Type",
    "Sponsor",
    "Status",
    "Start_Date",
    "Primary_Completion_Date",
    "Completion_Date",
    "Results_First_Posted",
    "Strategic_Implications",
];

pub fn header_row() -> Vec<Cell> {
    DATA_HEADERS.into_iter().map(Text).collect()
}

/// The two-brand workbook used across tests:
/// Taltz® (new, unranked) listed before ILUMYA® (rank 1), plus a row
/// without an NCT number.
pub fn sample_sheets() -> Vec<Sheet> {
    vec![
        Sheet::new(
            "Config",
            vec![
                vec![Text("Setting"), Text("Value")],
                vec![Text("Report_Month"), Text("January")],
                vec![Text("Report_Year"), Number(2026.0)],
                vec![Text("Client_Product"), Text("ILUMYA®")],
            ],
        ),
        Sheet::new(
            "Drug_Brand_Map",
            vec![
                vec![Text("Brand_Name"), Text("Sort_Order")],
                vec![Text("ILUMYA®"), Number(1.0)],
            ],
        ),
        Sheet::new(
            "Clinical Trials Data",
            vec![
                header_row(),
                vec![
                    Text("Taltz®"),
                    Text("TRUE"),
                    Blank,
                    Text("NCT001"),
                    Text("Ixekizumab in plaque psoriasis"),
                    Text("https://clinicaltrials.gov/study/NCT001"),
                    Number(3.0),
                    Text("Interventional"),
                    Text("Eli Lilly"),
                    Text("RECRUITING"),
                    Date(2025, 12, 3),
                    Blank,
                    Blank,
                    Blank,
                    Text("Competes directly"),
                ],
                vec![
                    Text("ILUMYA®"),
                    Bool(false),
                    Text("Primary Completion Date"),
                    Text("NCT002"),
                    Text("Tildrakizumab registry"),
                    Text("https://clinicaltrials.gov/study/NCT002"),
                    Blank,
                    Text("Observational"),
                    Text("Sun Pharma"),
                    Text("ACTIVE_NOT_RECRUITING"),
                    Date(2024, 1, 15),
                    Date(2026, 6, 30),
                    Text("TBD"),
                    Blank,
                    Blank,
                ],
                vec![Text("Taltz®"), Blank, Blank, Blank, Text("No NCT number")],
            ],
        ),
    ]
}

pub fn sample_xlsx() -> Vec<u8> {
    build_xlsx(&sample_sheets())
}
