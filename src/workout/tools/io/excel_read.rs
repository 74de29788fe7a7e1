use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::workout::tools::error::{Result, ToolError};
use crate::workout::tools::model::{Cell, RawDataset, RawTable};

/// Sheet holding one row per logged set.
pub const RECORD_SHEET: &str = "Record";
/// Sheet holding bodyweight measurements.
pub const WEIGHT_SHEET: &str = "Weight";

/// Reads the workout and bodyweight sheets from an Excel workbook.
pub fn read_dataset(path: &Path, record_sheet: &str, weight_sheet: &str) -> Result<RawDataset> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let workouts = read_table(&mut workbook, record_sheet)?;
    let bodyweight = read_table(&mut workbook, weight_sheet)?;

    Ok(RawDataset {
        workouts,
        bodyweight,
    })
}

fn read_table<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<RawTable> {
    let range = read_required_sheet(workbook, name)?;

    let headers: Vec<String> = match range.rows().next() {
        Some(first_row) => first_row
            .iter()
            .map(|cell| cell_to_string(Some(cell)).trim().to_string())
            .collect(),
        None => Vec::new(),
    };

    let rows = range
        .rows()
        .skip(1)
        .map(|row| {
            let mut cells: Vec<Cell> = row.iter().map(to_cell).collect();
            cells.resize(headers.len().max(cells.len()), Cell::Missing);
            cells
        })
        .collect();

    Ok(RawTable {
        sheet_name: name.to_string(),
        headers,
        rows,
    })
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<calamine::Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing sheet '{name}'")))?;
    let range = range_result.map_err(ToolError::from)?;
    Ok(range)
}

fn to_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::String(value) => Cell::text(value.clone()),
        DataType::Float(value) => Cell::Number(*value),
        DataType::Int(value) => Cell::Number(*value as f64),
        DataType::Bool(value) => Cell::Text(value.to_string()),
        DataType::DateTime(serial) => excel_serial_to_datetime(*serial)
            .map(Cell::Date)
            .unwrap_or(Cell::Number(*serial)),
        DataType::Empty => Cell::Missing,
        other => Cell::text(other.to_string()),
    }
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Converts an Excel serial date (days since 1899-12-30, fraction = time of day).
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    // Upper bound is 9999-12-31, the last date Excel can represent.
    if !serial.is_finite() || !(0.0..2_958_466.0).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let seconds = (serial * 86_400.0).round() as i64;
    epoch.checked_add_signed(Duration::seconds(seconds))
}
