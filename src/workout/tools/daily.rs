use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::workout::tools::error::{Result, ToolError};
use crate::workout::tools::io::records::SET_COLUMN;
use crate::workout::tools::model::{DailyTable, NOT_APPLICABLE, WorkoutRecord, display_or_na};

/// What to do when two records land on the same set and exercise column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateSets {
    /// Fail with [`ToolError::InvalidData`].
    #[default]
    Reject,
    /// Join the display values in input order, e.g. `"60 x 560 x 5"`.
    Concatenate,
}

/// Pivots the sets logged on `date` into a Set x exercise table, rejecting
/// duplicate sets.
pub fn aggregate_daily(records: &[WorkoutRecord], date: NaiveDate) -> Result<DailyTable> {
    aggregate_daily_with(records, date, DuplicateSets::default())
}

/// Pivots the sets logged on `date`. Rows are set numbers in ascending order,
/// columns are exercise labels in lexicographic order, and cells read
/// `"{weight} x {count}"` or `N/A` when the set was not performed. A blank
/// weight or count prints as `N/A` inside the cell.
///
/// Only records on `date` are inspected, so a malformed set number elsewhere
/// in the log never blocks this view.
#[instrument(level = "debug", skip(records), fields(record_count = records.len()))]
pub fn aggregate_daily_with(
    records: &[WorkoutRecord],
    date: NaiveDate,
    duplicates: DuplicateSets,
) -> Result<DailyTable> {
    let mut pivot: BTreeMap<u32, BTreeMap<String, String>> = BTreeMap::new();
    let mut columns: BTreeSet<String> = BTreeSet::new();

    for (index, record) in records.iter().enumerate() {
        if record.date != date {
            continue;
        }

        let set = record
            .set
            .and_then(coerce_set)
            .ok_or_else(|| ToolError::InvalidData {
                record: index,
                column: SET_COLUMN.to_string(),
                value: display_or_na(record.set),
            })?;
        let label = record.key().label();
        let value = format!(
            "{} x {}",
            display_or_na(record.weight),
            display_or_na(record.count)
        );

        columns.insert(label.clone());
        let row = pivot.entry(set).or_default();
        match row.get_mut(&label) {
            None => {
                row.insert(label, value);
            }
            Some(existing) => match duplicates {
                DuplicateSets::Concatenate => existing.push_str(&value),
                DuplicateSets::Reject => {
                    return Err(ToolError::InvalidData {
                        record: index,
                        column: SET_COLUMN.to_string(),
                        value: format!("duplicate set {set} for {label}"),
                    });
                }
            },
        }
    }

    if pivot.is_empty() {
        return Err(ToolError::EmptyResult { date });
    }

    let columns: Vec<String> = columns.into_iter().collect();
    let mut sets = Vec::with_capacity(pivot.len());
    let mut cells = Vec::with_capacity(pivot.len());
    for (set, mut row) in pivot {
        sets.push(set);
        cells.push(
            columns
                .iter()
                .map(|column| {
                    row.remove(column)
                        .unwrap_or_else(|| NOT_APPLICABLE.to_string())
                })
                .collect(),
        );
    }

    debug!(sets = sets.len(), columns = columns.len(), "daily table built");
    Ok(DailyTable {
        date,
        sets,
        columns,
        cells,
    })
}

/// Set numbers must be whole and non-negative.
fn coerce_set(set: f64) -> Option<u32> {
    if set.is_finite() && set >= 0.0 && set.fract() == 0.0 && set <= f64::from(u32::MAX) {
        Some(set as u32)
    } else {
        None
    }
}
