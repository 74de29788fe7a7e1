use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::workout::tools::error::{Result, ToolError};

/// Variation value the log uses for exercises performed without a variation.
pub const NO_VARIATION: &str = "/";

/// A single worksheet cell after blank-to-missing normalisation.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Empty cell, or a string made only of whitespace.
    Missing,
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
}

impl Cell {
    /// Builds a text cell, mapping blank strings to [`Cell::Missing`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Cell::Missing
        } else {
            Cell::Text(value)
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Text(value) => f.write_str(value),
            Cell::Number(value) => write!(f, "{value}"),
            Cell::Date(value) => write!(f, "{value}"),
        }
    }
}

/// A worksheet as read from the source: a header row and the data rows below it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub sheet_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Position of a named column; a missing column is a structural failure.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| ToolError::MissingColumn {
                sheet: self.sheet_name.clone(),
                column: name.to_string(),
            })
    }
}

/// The two tables the workout log consists of.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDataset {
    pub workouts: RawTable,
    pub bodyweight: RawTable,
}

/// One logged set. Numeric cells that are blank or unreadable load as `None`
/// and are dealt with by the view that needs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub date: NaiveDate,
    pub exercise: String,
    /// Variation name, or [`NO_VARIATION`].
    pub variation: String,
    /// Set number as stored in the log. The daily view coerces it to an integer.
    pub set: Option<f64>,
    pub weight: Option<f64>,
    pub count: Option<u32>,
}

impl WorkoutRecord {
    pub fn key(&self) -> ExerciseKey {
        ExerciseKey::new(self.exercise.clone(), self.variation.clone())
    }
}

/// A bodyweight measurement; days without a reading keep a `None` weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyweightRecord {
    pub date: NaiveDate,
    pub weight: Option<f64>,
}

/// Typed contents of the workout log.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub workouts: Vec<WorkoutRecord>,
    pub bodyweight: Vec<BodyweightRecord>,
}

/// Identifies an exercise+variation pair, the unit the progression views work on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExerciseKey {
    pub exercise: String,
    pub variation: String,
}

impl ExerciseKey {
    pub fn new(exercise: impl Into<String>, variation: impl Into<String>) -> Self {
        Self {
            exercise: exercise.into(),
            variation: variation.into(),
        }
    }

    /// Variation as shown to the user: the no-variation marker becomes empty.
    pub fn display_variation(&self) -> &str {
        display_variation(&self.variation)
    }

    /// Column label used by the daily view, e.g. `"Bench Close Grip"` or `"Bench"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.exercise, self.display_variation())
            .trim_end()
            .to_string()
    }
}

impl fmt::Display for ExerciseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Maps the no-variation marker to an empty string.
pub fn display_variation(variation: &str) -> &str {
    if variation == NO_VARIATION { "" } else { variation }
}

/// Shown for a set that was not performed, or a value that was not logged.
pub const NOT_APPLICABLE: &str = "N/A";

/// Formats a logged value, falling back to [`NOT_APPLICABLE`].
pub fn display_or_na<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_APPLICABLE.to_string(), |value| value.to_string())
}

/// Sets of one day pivoted by exercise: one row per set number, one column per
/// exercise+variation label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTable {
    pub date: NaiveDate,
    pub sets: Vec<u32>,
    pub columns: Vec<String>,
    /// `cells[row][column]`, aligned with `sets` and `columns`.
    pub cells: Vec<Vec<String>>,
}

impl DailyTable {
    /// Looks up the cell for a set number and column label.
    pub fn get(&self, set: u32, column: &str) -> Option<&str> {
        let row = self.sets.iter().position(|candidate| *candidate == set)?;
        let col = self.columns.iter().position(|candidate| candidate == column)?;
        self.cells.get(row)?.get(col).map(String::as_str)
    }
}

/// A new personal record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrEntry {
    pub date: NaiveDate,
    pub weight: f64,
    /// Highest repetition count performed at `weight` on `date`, if any was logged.
    pub count: Option<u32>,
}

/// Personal-record progression; weights strictly increase along the series.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PersonalRecordSeries {
    pub entries: Vec<PrEntry>,
}

impl PersonalRecordSeries {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Weight of the latest record, if any.
    pub fn current(&self) -> Option<f64> {
        self.entries.last().map(|entry| entry.weight)
    }
}

/// Training volume of a single set. `volume` is `None` when weight or count
/// was not logged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeEntry {
    pub date: NaiveDate,
    pub volume: Option<f64>,
    pub weight_label: String,
    pub count: Option<u32>,
    pub set: Option<f64>,
}

/// Volume per set along with the date range the chart should display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeSeries {
    pub entries: Vec<VolumeEntry>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl VolumeSeries {
    /// Entries dated inside `[start_date, end_date]`.
    pub fn in_window(&self) -> impl Iterator<Item = &VolumeEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.date >= self.start_date && entry.date <= self.end_date)
    }
}
