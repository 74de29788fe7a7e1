use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::workout::tools::model::{ExerciseKey, WorkoutRecord};

/// Distinct exercise+variation pairs in the log, sorted.
pub fn exercise_variations(records: &[WorkoutRecord]) -> Vec<ExerciseKey> {
    records
        .iter()
        .map(WorkoutRecord::key)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Records of one exercise+variation, in log order.
pub fn select(records: &[WorkoutRecord], key: &ExerciseKey) -> Vec<WorkoutRecord> {
    records
        .iter()
        .filter(|record| record.exercise == key.exercise && record.variation == key.variation)
        .cloned()
        .collect()
}

/// Dates with at least one logged set, newest first.
pub fn workout_dates(records: &[WorkoutRecord]) -> Vec<NaiveDate> {
    records
        .iter()
        .map(|record| record.date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}
