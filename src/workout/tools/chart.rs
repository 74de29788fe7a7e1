//! Chart descriptions handed to a renderer.
//!
//! Nothing here draws; the types carry the points, marker sizes, hover text and
//! axis ranges a plotting front end needs, and serialise to JSON.

use chrono::NaiveDate;
use serde::Serialize;

use crate::workout::tools::model::{
    ExerciseKey, PersonalRecordSeries, VolumeSeries, display_or_na,
};

/// Reference marker size of a PR chart; the largest rep count is drawn at half
/// of it.
pub const MAX_MARKER_SIZE: f64 = 40.0;
/// Smallest marker size drawn, whatever the rep count.
pub const MIN_MARKER_SIZE: f64 = 4.0;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub points: Vec<PrPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrPoint {
    pub date: NaiveDate,
    pub weight: f64,
    pub count: Option<u32>,
    pub marker_size: f64,
    pub hover: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    /// Visible x-axis range, `[start, end]` as `YYYY-MM-DD`.
    pub x_range: [String; 2],
    pub bars: Vec<VolumeBar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeBar {
    pub date: NaiveDate,
    /// `None` when the record lacks a weight or count; drawn as no bar.
    pub volume: Option<f64>,
    /// Bars are coloured by set number.
    pub set: Option<f64>,
    pub hover: String,
}

pub fn pr_chart(key: &ExerciseKey, series: &PersonalRecordSeries) -> PrChart {
    // An unknown count is drawn at the minimum size.
    let counts: Vec<u32> = series
        .entries
        .iter()
        .map(|entry| entry.count.unwrap_or(0))
        .collect();
    let sizes = marker_sizes(&counts);

    let points = series
        .entries
        .iter()
        .zip(sizes)
        .map(|(entry, marker_size)| PrPoint {
            date: entry.date,
            weight: entry.weight,
            count: entry.count,
            marker_size,
            hover: format!(
                "Date: {}<br>Weight: {} kg<br>Count: {}",
                entry.date.format(DATE_FORMAT),
                entry.weight,
                display_or_na(entry.count)
            ),
        })
        .collect();

    PrChart {
        title: format!("{} PR", key.label()),
        x_title: "Date".into(),
        y_title: "kg".into(),
        points,
    }
}

pub fn volume_chart(key: &ExerciseKey, series: &VolumeSeries) -> VolumeChart {
    let bars = series
        .entries
        .iter()
        .map(|entry| VolumeBar {
            date: entry.date,
            volume: entry.volume,
            set: entry.set,
            hover: format!(
                "Date: {}<br>Volume: {}<br>Weight: {}<br>Count: {}",
                entry.date.format(DATE_FORMAT),
                display_or_na(entry.volume),
                entry.weight_label,
                display_or_na(entry.count)
            ),
        })
        .collect();

    VolumeChart {
        title: format!("{} Volume", key.label()),
        x_title: "Date".into(),
        y_title: "Volume".into(),
        x_range: [
            series.start_date.format(DATE_FORMAT).to_string(),
            series.end_date.format(DATE_FORMAT).to_string(),
        ],
        bars,
    }
}

/// Area-proportional marker sizes: a marker's area grows linearly with its
/// rep count, the largest count maps to half of [`MAX_MARKER_SIZE`] and
/// nothing is drawn smaller than [`MIN_MARKER_SIZE`].
pub fn marker_sizes(counts: &[u32]) -> Vec<f64> {
    let Some(max_count) = counts.iter().copied().max().filter(|max| *max > 0) else {
        return vec![MIN_MARKER_SIZE; counts.len()];
    };
    let sizeref = 2.0 * f64::from(max_count) / MAX_MARKER_SIZE.powi(2);

    counts
        .iter()
        .map(|count| ((f64::from(*count) / 2.0) / sizeref).sqrt().max(MIN_MARKER_SIZE))
        .collect()
}
