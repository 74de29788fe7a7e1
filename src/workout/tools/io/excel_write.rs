use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet};

use crate::workout::tools::error::Result;
use crate::workout::tools::model::{DailyTable, PersonalRecordSeries, VolumeSeries};

const MAX_SHEET_NAME: usize = 31;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Value of one exported cell. Numbers stay numeric so the sheet can be
/// sorted and charted; `Blank` leaves the cell empty.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetCell {
    Text(String),
    Number(f64),
    Blank,
}

impl SheetCell {
    fn number(value: Option<f64>) -> Self {
        value.map_or(SheetCell::Blank, SheetCell::Number)
    }

    fn count(value: Option<u32>) -> Self {
        Self::number(value.map(f64::from))
    }
}

impl From<String> for SheetCell {
    fn from(value: String) -> Self {
        SheetCell::Text(value)
    }
}

/// A table that will be materialised as an Excel sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<SheetCell>>,
}

/// Pivoted daily view: the set number followed by one column per exercise.
pub fn daily_sheet(table: &DailyTable) -> SheetTable {
    let mut columns = Vec::with_capacity(table.columns.len() + 1);
    columns.push("Set".to_string());
    columns.extend(table.columns.iter().cloned());

    let rows = table
        .sets
        .iter()
        .zip(&table.cells)
        .map(|(set, cells)| {
            let mut row = Vec::with_capacity(cells.len() + 1);
            row.push(SheetCell::Number(f64::from(*set)));
            row.extend(cells.iter().cloned().map(SheetCell::from));
            row
        })
        .collect();

    SheetTable {
        sheet_name: sanitize_sheet_name(&table.date.format(DATE_FORMAT).to_string()),
        columns,
        rows,
    }
}

pub fn pr_sheet(title: &str, series: &PersonalRecordSeries) -> SheetTable {
    SheetTable {
        sheet_name: sanitize_sheet_name(title),
        columns: vec!["Date".into(), "Weight".into(), "Count".into()],
        rows: series
            .entries
            .iter()
            .map(|entry| {
                vec![
                    entry.date.format(DATE_FORMAT).to_string().into(),
                    SheetCell::Number(entry.weight),
                    SheetCell::count(entry.count),
                ]
            })
            .collect(),
    }
}

pub fn volume_sheet(title: &str, series: &VolumeSeries) -> SheetTable {
    SheetTable {
        sheet_name: sanitize_sheet_name(title),
        columns: vec![
            "Date".into(),
            "Volume".into(),
            "Weight".into(),
            "Count".into(),
            "Set".into(),
        ],
        rows: series
            .entries
            .iter()
            .map(|entry| {
                vec![
                    entry.date.format(DATE_FORMAT).to_string().into(),
                    SheetCell::number(entry.volume),
                    entry.weight_label.clone().into(),
                    SheetCell::count(entry.count),
                    SheetCell::number(entry.set),
                ]
            })
            .collect(),
    }
}

/// Writes the provided tables to the given path, one worksheet each.
pub fn write_tables(path: &Path, tables: &[SheetTable]) -> Result<()> {
    let mut workbook_writer = Workbook::new();

    for table in tables {
        let worksheet = workbook_writer.add_worksheet();
        worksheet.set_name(&table.sheet_name)?;

        for (col_idx, header) in table.columns.iter().enumerate() {
            worksheet.write_string(0, col_idx as u16, header)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                write_cell(worksheet, (row_idx + 1) as u32, col_idx as u16, cell)?;
            }
        }

        worksheet.autofit();
    }

    workbook_writer.save(path)?;
    Ok(())
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &SheetCell) -> Result<()> {
    match cell {
        SheetCell::Text(value) => {
            worksheet.write_string(row, col, value)?;
        }
        SheetCell::Number(value) => {
            worksheet.write_number(row, col, *value)?;
        }
        SheetCell::Blank => {}
    }
    Ok(())
}

fn sanitize_sheet_name(raw: &str) -> String {
    let invalid = [':', '\\', '/', '?', '*', '[', ']', '\'', '"'];
    let mut sanitized: String = raw
        .chars()
        .map(|ch| {
            if invalid.contains(&ch) || ch.is_control() {
                '_'
            } else {
                ch
            }
        })
        .collect();

    sanitized = sanitized.trim().to_string();
    if sanitized.is_empty() {
        sanitized = "Sheet".to_string();
    }

    if sanitized.chars().count() > MAX_SHEET_NAME {
        sanitized = sanitized.chars().take(MAX_SHEET_NAME).collect();
    }

    sanitized
}
