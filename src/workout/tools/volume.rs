use chrono::Duration;
use tracing::{debug, instrument};

use crate::workout::tools::error::{Result, ToolError};
use crate::workout::tools::model::{NOT_APPLICABLE, VolumeEntry, VolumeSeries, WorkoutRecord};

/// Weights the log uses as codes for resistance bands.
const BAND_LABELS: [(f64, &str); 5] = [
    (1.0, "Body Weight"),
    (0.1, "Purple"),
    (0.2, "Black"),
    (0.6, "Green"),
    (0.8, "Orange"),
];

/// Trailing window shown by the volume chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Last1Month,
    Last3Months,
    Last6Months,
    Last12Months,
}

impl Period {
    pub fn days(self) -> i64 {
        match self {
            Period::Last1Month => 30,
            Period::Last3Months => 90,
            Period::Last6Months => 180,
            Period::Last12Months => 365,
        }
    }
}

/// Volume (weight x reps) of every record of one exercise+variation. All
/// records are kept; `period` only sets the display window, which ends on the
/// latest logged date. A record missing its weight or count has no volume.
#[instrument(level = "debug", skip(records), fields(record_count = records.len()))]
pub fn aggregate_volume(records: &[WorkoutRecord], period: Period) -> Result<VolumeSeries> {
    let end_date = records
        .iter()
        .map(|record| record.date)
        .max()
        .ok_or(ToolError::EmptyInput("volume aggregation"))?;
    let start_date = end_date - Duration::days(period.days());

    let entries: Vec<VolumeEntry> = records
        .iter()
        .map(|record| VolumeEntry {
            date: record.date,
            volume: record
                .weight
                .zip(record.count)
                .map(|(weight, count)| weight * f64::from(count)),
            weight_label: record
                .weight
                .map_or_else(|| NOT_APPLICABLE.to_string(), weight_label),
            count: record.count,
            set: record.set,
        })
        .collect();

    debug!(
        entries = entries.len(),
        %start_date,
        %end_date,
        "volume series built"
    );
    Ok(VolumeSeries {
        entries,
        start_date,
        end_date,
    })
}

/// `"{weight} kg"`, or the band colour when the weight is a band code.
pub fn weight_label(weight: f64) -> String {
    BAND_LABELS
        .iter()
        .find(|(code, _)| *code == weight)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| format!("{weight} kg"))
}
