use chrono::NaiveDate;
use tracing::{debug, instrument};

use crate::workout::tools::model::{PersonalRecordSeries, PrEntry, WorkoutRecord};

/// Order in which dates are visited while tracking the running maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateOrder {
    /// Ascending calendar order, independent of how the log is sorted.
    #[default]
    Chronological,
    /// Order of first appearance in the input. A record set on a date listed
    /// after a heavier date is not reported.
    Input,
}

/// Personal-record progression of a single exercise+variation, visiting dates
/// chronologically.
pub fn extract_pr_series(records: &[WorkoutRecord]) -> PersonalRecordSeries {
    extract_pr_series_with(records, DateOrder::default())
}

/// Emits a date whenever its heaviest set beats every date visited before it.
/// The count reported is the highest rep count performed at that weight on that
/// date. Sets without a logged weight cannot set a record and are ignored.
/// Callers pass the records of one exercise+variation only.
#[instrument(level = "debug", skip(records), fields(record_count = records.len()))]
pub fn extract_pr_series_with(records: &[WorkoutRecord], order: DateOrder) -> PersonalRecordSeries {
    let mut dates: Vec<NaiveDate> = Vec::new();
    for record in records {
        if !dates.contains(&record.date) {
            dates.push(record.date);
        }
    }
    if order == DateOrder::Chronological {
        dates.sort();
    }

    let mut pr = f64::NEG_INFINITY;
    let mut entries = Vec::new();
    for date in dates {
        let Some((weight, count)) = peak_of_day(records, date) else {
            continue;
        };
        if weight > pr {
            pr = weight;
            entries.push(PrEntry {
                date,
                weight,
                count,
            });
        }
    }

    debug!(records_set = entries.len(), "personal record series built");
    PersonalRecordSeries { entries }
}

/// Heaviest weight on `date` and the most reps performed at it.
fn peak_of_day(records: &[WorkoutRecord], date: NaiveDate) -> Option<(f64, Option<u32>)> {
    records
        .iter()
        .filter(|record| record.date == date)
        .filter_map(|record| record.weight.map(|weight| (weight, record.count)))
        .fold(None, |peak, (weight, count)| match peak {
            None => Some((weight, count)),
            Some((best, _)) if weight > best => Some((weight, count)),
            Some((best, best_count)) if weight == best => Some((best, best_count.max(count))),
            keep => keep,
        })
}
