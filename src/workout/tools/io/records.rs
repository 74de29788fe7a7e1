use chrono::{NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::workout::tools::error::Result;
use crate::workout::tools::io::excel_read::excel_serial_to_datetime;
use crate::workout::tools::model::{
    BodyweightRecord, Cell, Dataset, NO_VARIATION, RawDataset, RawTable, WorkoutRecord,
};

pub const DATE_COLUMN: &str = "Date";
pub const EXERCISE_COLUMN: &str = "Exercise";
pub const VARIATION_COLUMN: &str = "Variation";
pub const SET_COLUMN: &str = "Set";
pub const WEIGHT_COLUMN: &str = "Weight";
pub const COUNT_COLUMN: &str = "Count";

static MISSING: Cell = Cell::Missing;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Converts both raw sheets into typed records.
pub fn parse_dataset(raw: &RawDataset) -> Result<Dataset> {
    Ok(Dataset {
        workouts: parse_workouts(&raw.workouts)?,
        bodyweight: parse_bodyweight(&raw.bodyweight)?,
    })
}

/// Converts the workout sheet into one record per logged set.
///
/// Only the header is checked: a missing column fails the whole sheet. Rows
/// without a readable date or exercise cannot be placed anywhere and are
/// skipped; numeric cells that are blank or unreadable load as `None`. A
/// missing variation reads as [`NO_VARIATION`].
pub fn parse_workouts(table: &RawTable) -> Result<Vec<WorkoutRecord>> {
    let date = table.column_index(DATE_COLUMN)?;
    let exercise = table.column_index(EXERCISE_COLUMN)?;
    let variation = table.column_index(VARIATION_COLUMN)?;
    let set = table.column_index(SET_COLUMN)?;
    let weight = table.column_index(WEIGHT_COLUMN)?;
    let count = table.column_index(COUNT_COLUMN)?;

    let mut records = Vec::new();
    for (index, row) in table.rows.iter().enumerate() {
        if row.iter().all(Cell::is_missing) {
            continue;
        }
        let field = RowFields {
            sheet: &table.sheet_name,
            row,
            index,
        };
        let (Some(day), Some(name)) = (field.date(date), field.text(exercise)) else {
            warn!(
                sheet = %table.sheet_name,
                row = field.spreadsheet_row(),
                "skipping row without a readable date or exercise"
            );
            continue;
        };

        records.push(WorkoutRecord {
            date: day,
            exercise: name,
            variation: field
                .text(variation)
                .unwrap_or_else(|| NO_VARIATION.to_string()),
            set: field.number(set, SET_COLUMN),
            weight: field.number(weight, WEIGHT_COLUMN),
            count: field.whole_number(count, COUNT_COLUMN),
        });
    }

    Ok(records)
}

/// Converts the bodyweight sheet. Rows without a readable date are skipped and
/// days without a reading keep a `None` weight.
pub fn parse_bodyweight(table: &RawTable) -> Result<Vec<BodyweightRecord>> {
    let date = table.column_index(DATE_COLUMN)?;
    let weight = table.column_index(WEIGHT_COLUMN)?;

    let mut records = Vec::new();
    for (index, row) in table.rows.iter().enumerate() {
        if row.iter().all(Cell::is_missing) {
            continue;
        }
        let field = RowFields {
            sheet: &table.sheet_name,
            row,
            index,
        };
        let Some(day) = field.date(date) else {
            warn!(
                sheet = %table.sheet_name,
                row = field.spreadsheet_row(),
                "skipping row without a readable date"
            );
            continue;
        };
        records.push(BodyweightRecord {
            date: day,
            weight: field.number(weight, WEIGHT_COLUMN),
        });
    }

    Ok(records)
}

struct RowFields<'a> {
    sheet: &'a str,
    row: &'a [Cell],
    index: usize,
}

impl RowFields<'_> {
    fn cell(&self, column: usize) -> &Cell {
        self.row.get(column).unwrap_or(&MISSING)
    }

    fn spreadsheet_row(&self) -> usize {
        // Header occupies the first spreadsheet row.
        self.index + 2
    }

    fn unreadable(&self, column: &str, cell: &Cell) {
        warn!(
            sheet = self.sheet,
            row = self.spreadsheet_row(),
            column,
            value = %cell,
            "unreadable cell treated as missing"
        );
    }

    fn date(&self, column: usize) -> Option<NaiveDate> {
        match self.cell(column) {
            Cell::Date(value) => Some(value.date()),
            Cell::Number(serial) => excel_serial_to_datetime(*serial).map(|value| value.date()),
            Cell::Text(value) => parse_date_text(value.trim()),
            Cell::Missing => None,
        }
    }

    fn text(&self, column: usize) -> Option<String> {
        match self.cell(column) {
            Cell::Missing => None,
            other => Some(other.to_string().trim().to_string()),
        }
    }

    fn number(&self, column: usize, name: &str) -> Option<f64> {
        let cell = self.cell(column);
        let parsed = match cell {
            Cell::Number(value) => Some(*value),
            Cell::Text(value) => value.trim().parse::<f64>().ok(),
            Cell::Date(_) => None,
            Cell::Missing => return None,
        };
        let parsed = parsed.filter(|value| value.is_finite());
        if parsed.is_none() {
            self.unreadable(name, cell);
        }
        parsed
    }

    fn whole_number(&self, column: usize, name: &str) -> Option<u32> {
        let value = self.number(column, name)?;
        if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
            self.unreadable(name, self.cell(column));
            return None;
        }
        Some(value as u32)
    }
}

fn parse_date_text(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DATETIME_FORMATS.iter().find_map(|format| {
                NaiveDateTime::parse_from_str(value, format)
                    .ok()
                    .map(|datetime| datetime.date())
            })
        })
}
