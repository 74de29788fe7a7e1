use chrono::NaiveDate;
use workout_tools::ToolError;
use workout_tools::chart;
use workout_tools::daily::{self, DuplicateSets};
use workout_tools::model::{ExerciseKey, NO_VARIATION, WorkoutRecord};
use workout_tools::partition;
use workout_tools::personal_record::{self, DateOrder};
use workout_tools::volume::{self, Period};

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid date")
}

fn record(
    day: &str,
    exercise: &str,
    variation: &str,
    set: f64,
    weight: f64,
    count: u32,
) -> WorkoutRecord {
    WorkoutRecord {
        date: date(day),
        exercise: exercise.into(),
        variation: variation.into(),
        set: Some(set),
        weight: Some(weight),
        count: Some(count),
    }
}

#[test]
fn daily_table_pivots_sets_by_exercise() {
    let records = vec![
        record("2024-01-01", "Bench", NO_VARIATION, 1.0, 60.0, 5),
        record("2024-01-01", "Bench", NO_VARIATION, 2.0, 65.0, 3),
    ];

    let table = daily::aggregate_daily(&records, date("2024-01-01")).expect("table built");

    assert_eq!(table.sets, vec![1, 2]);
    assert_eq!(table.columns, vec!["Bench".to_string()]);
    assert_eq!(table.get(1, "Bench"), Some("60 x 5"));
    assert_eq!(table.get(2, "Bench"), Some("65 x 3"));
}

#[test]
fn daily_table_fills_missing_cells_and_ignores_other_days() {
    let records = vec![
        record("2024-01-01", "Squat", NO_VARIATION, 1.0, 100.0, 5),
        record("2024-01-01", "Squat", NO_VARIATION, 2.0, 100.0, 5),
        record("2024-01-01", "Squat", NO_VARIATION, 3.0, 102.5, 3),
        record("2024-01-01", "Row", "Pendlay", 1.0, 70.0, 8),
        record("2024-01-02", "Deadlift", NO_VARIATION, 1.0, 140.0, 5),
    ];

    let table = daily::aggregate_daily(&records, date("2024-01-01")).expect("table built");

    assert_eq!(table.sets, vec![1, 2, 3]);
    assert_eq!(
        table.columns,
        vec!["Row Pendlay".to_string(), "Squat".to_string()]
    );
    assert_eq!(table.get(1, "Row Pendlay"), Some("70 x 8"));
    assert_eq!(table.get(3, "Row Pendlay"), Some("N/A"));
    assert_eq!(table.get(3, "Squat"), Some("102.5 x 3"));
    assert!(table.columns.iter().all(|column| column != "Deadlift"));
}

#[test]
fn daily_table_ignores_input_order() {
    let mut records = vec![
        record("2024-01-01", "Bench", NO_VARIATION, 2.0, 65.0, 3),
        record("2024-01-01", "Curl", "Hammer", 1.0, 12.0, 10),
        record("2024-01-01", "Bench", NO_VARIATION, 1.0, 60.0, 5),
    ];
    let first = daily::aggregate_daily(&records, date("2024-01-01")).expect("table built");
    records.reverse();
    let second = daily::aggregate_daily(&records, date("2024-01-01")).expect("table built");

    assert_eq!(first, second);
}

#[test]
fn daily_table_without_matching_date_is_an_error() {
    let records = vec![record("2024-01-01", "Bench", NO_VARIATION, 1.0, 60.0, 5)];

    match daily::aggregate_daily(&records, date("2024-02-01")) {
        Err(ToolError::EmptyResult { date: missing }) => assert_eq!(missing, date("2024-02-01")),
        other => panic!("expected empty result, got {other:?}"),
    }
}

#[test]
fn daily_table_rejects_fractional_sets() {
    let records = vec![record("2024-01-01", "Bench", NO_VARIATION, 1.5, 60.0, 5)];

    assert!(matches!(
        daily::aggregate_daily(&records, date("2024-01-01")),
        Err(ToolError::InvalidData { .. })
    ));
}

#[test]
fn malformed_set_on_another_day_does_not_block_the_view() {
    let mut unnumbered = record("2024-01-08", "Bench", NO_VARIATION, 1.0, 60.0, 5);
    unnumbered.set = None;
    let mut unweighed = record("2024-01-08", "Bench", NO_VARIATION, 2.0, 60.0, 5);
    unweighed.weight = None;
    let records = vec![
        record("2024-01-01", "Bench", NO_VARIATION, 1.0, 60.0, 5),
        unnumbered,
        unweighed,
    ];

    let table = daily::aggregate_daily(&records, date("2024-01-01")).expect("table built");
    assert_eq!(table.get(1, "Bench"), Some("60 x 5"));

    match daily::aggregate_daily(&records, date("2024-01-08")) {
        Err(ToolError::InvalidData { record, column, .. }) => {
            assert_eq!(record, 1);
            assert_eq!(column, "Set");
        }
        other => panic!("expected invalid set, got {other:?}"),
    }
}

#[test]
fn blank_weight_and_count_print_as_not_applicable() {
    let mut unweighed = record("2024-01-01", "Plank", NO_VARIATION, 1.0, 0.0, 0);
    unweighed.weight = None;
    unweighed.count = None;

    let table = daily::aggregate_daily(&[unweighed], date("2024-01-01")).expect("table built");
    assert_eq!(table.get(1, "Plank"), Some("N/A x N/A"));
}

#[test]
fn duplicate_sets_are_rejected_unless_concatenation_is_requested() {
    let records = vec![
        record("2024-01-01", "Bench", NO_VARIATION, 1.0, 60.0, 5),
        record("2024-01-01", "Bench", NO_VARIATION, 1.0, 62.5, 4),
    ];

    assert!(matches!(
        daily::aggregate_daily(&records, date("2024-01-01")),
        Err(ToolError::InvalidData { .. })
    ));

    let table =
        daily::aggregate_daily_with(&records, date("2024-01-01"), DuplicateSets::Concatenate)
            .expect("table built");
    assert_eq!(table.get(1, "Bench"), Some("60 x 562.5 x 4"));
}

#[test]
fn pr_series_keeps_only_new_maxima() {
    let records = vec![
        record("2024-01-01", "Bench", NO_VARIATION, 1.0, 60.0, 5),
        record("2024-01-08", "Bench", NO_VARIATION, 1.0, 55.0, 8),
        record("2024-01-15", "Bench", NO_VARIATION, 1.0, 70.0, 2),
    ];

    let series = personal_record::extract_pr_series(&records);

    let points: Vec<(NaiveDate, f64)> = series
        .entries
        .iter()
        .map(|entry| (entry.date, entry.weight))
        .collect();
    assert_eq!(
        points,
        vec![(date("2024-01-01"), 60.0), (date("2024-01-15"), 70.0)]
    );
    assert_eq!(series.current(), Some(70.0));
}

#[test]
fn pr_count_is_the_most_reps_at_the_peak_weight() {
    let records = vec![
        record("2024-01-01", "Bench", NO_VARIATION, 1.0, 60.0, 3),
        record("2024-01-01", "Bench", NO_VARIATION, 2.0, 60.0, 5),
        record("2024-01-01", "Bench", NO_VARIATION, 3.0, 50.0, 12),
    ];

    let series = personal_record::extract_pr_series(&records);

    assert_eq!(series.len(), 1);
    assert_eq!(series.entries[0].weight, 60.0);
    assert_eq!(series.entries[0].count, Some(5));
}

#[test]
fn pr_weights_strictly_increase() {
    let records = vec![
        record("2024-01-01", "Squat", NO_VARIATION, 1.0, 100.0, 5),
        record("2024-01-03", "Squat", NO_VARIATION, 1.0, 100.0, 6),
        record("2024-01-05", "Squat", NO_VARIATION, 1.0, 105.0, 3),
        record("2024-01-07", "Squat", NO_VARIATION, 1.0, 90.0, 10),
        record("2024-01-09", "Squat", NO_VARIATION, 1.0, 110.0, 1),
    ];

    let series = personal_record::extract_pr_series(&records);

    assert_eq!(series.len(), 3);
    assert!(
        series
            .entries
            .windows(2)
            .all(|pair| pair[0].weight < pair[1].weight)
    );
}

#[test]
fn pr_date_order_decides_unsorted_logs() {
    let records = vec![
        record("2024-01-15", "Bench", NO_VARIATION, 1.0, 70.0, 2),
        record("2024-01-01", "Bench", NO_VARIATION, 1.0, 60.0, 5),
    ];

    let chronological = personal_record::extract_pr_series(&records);
    assert_eq!(chronological.len(), 2);
    assert_eq!(chronological.entries[0].date, date("2024-01-01"));

    let input = personal_record::extract_pr_series_with(&records, DateOrder::Input);
    assert_eq!(input.len(), 1);
    assert_eq!(input.entries[0].date, date("2024-01-15"));
}

#[test]
fn pr_series_skips_sets_without_weight() {
    let mut unweighed = record("2024-01-08", "Bench", NO_VARIATION, 1.0, 0.0, 20);
    unweighed.weight = None;
    let mut uncounted = record("2024-01-15", "Bench", NO_VARIATION, 1.0, 65.0, 0);
    uncounted.count = None;
    let records = vec![
        record("2024-01-01", "Bench", NO_VARIATION, 1.0, 60.0, 5),
        unweighed,
        uncounted,
    ];

    let series = personal_record::extract_pr_series(&records);

    let dates: Vec<NaiveDate> = series.entries.iter().map(|entry| entry.date).collect();
    assert_eq!(dates, vec![date("2024-01-01"), date("2024-01-15")]);
    assert_eq!(series.entries[1].count, None);

    let pr = chart::pr_chart(&ExerciseKey::new("Bench", NO_VARIATION), &series);
    assert_eq!(pr.points[1].hover, "Date: 2024-01-15<br>Weight: 65 kg<br>Count: N/A");
    assert_eq!(pr.points[1].marker_size, chart::MIN_MARKER_SIZE);
}

#[test]
fn pr_series_of_nothing_is_empty() {
    assert!(personal_record::extract_pr_series(&[]).is_empty());
}

#[test]
fn volume_is_weight_times_count_with_band_labels() {
    let records = vec![
        record("2024-03-01", "Pull Up", "Assisted", 1.0, 0.2, 8),
        record("2024-03-01", "Pull Up", "Assisted", 2.0, 1.0, 5),
        record("2024-03-08", "Pull Up", "Assisted", 1.0, 12.5, 4),
    ];

    let series = volume::aggregate_volume(&records, Period::Last1Month).expect("series built");

    let labels: Vec<&str> = series
        .entries
        .iter()
        .map(|entry| entry.weight_label.as_str())
        .collect();
    assert_eq!(labels, vec!["Black", "Body Weight", "12.5 kg"]);
    let volumes: Vec<Option<f64>> = series.entries.iter().map(|entry| entry.volume).collect();
    assert_eq!(volumes, vec![Some(0.2 * 8.0), Some(5.0), Some(50.0)]);
}

#[test]
fn volume_needs_both_weight_and_count() {
    let mut unweighed = record("2024-03-01", "Bench", NO_VARIATION, 1.0, 0.0, 5);
    unweighed.weight = None;
    let mut uncounted = record("2024-03-01", "Bench", NO_VARIATION, 2.0, 60.0, 0);
    uncounted.count = None;

    let series =
        volume::aggregate_volume(&[unweighed, uncounted], Period::Last1Month).expect("series built");

    assert_eq!(series.entries[0].volume, None);
    assert_eq!(series.entries[0].weight_label, "N/A");
    assert_eq!(series.entries[1].volume, None);
    assert_eq!(series.entries[1].weight_label, "60 kg");
}

#[test]
fn volume_window_ends_on_latest_date_and_keeps_all_rows() {
    let records = vec![
        record("2023-01-01", "Bench", NO_VARIATION, 1.0, 50.0, 5),
        record("2024-06-30", "Bench", NO_VARIATION, 1.0, 60.0, 5),
        record("2024-05-01", "Bench", NO_VARIATION, 1.0, 55.0, 5),
    ];

    let series = volume::aggregate_volume(&records, Period::Last3Months).expect("series built");

    assert_eq!(series.end_date, date("2024-06-30"));
    assert_eq!(series.start_date, date("2024-04-01"));
    assert_eq!(series.entries.len(), 3);
    assert_eq!(series.in_window().count(), 2);
}

#[test]
fn volume_periods_resolve_to_days() {
    assert_eq!(Period::Last1Month.days(), 30);
    assert_eq!(Period::Last3Months.days(), 90);
    assert_eq!(Period::Last6Months.days(), 180);
    assert_eq!(Period::Last12Months.days(), 365);
}

#[test]
fn volume_of_nothing_is_an_error() {
    assert!(matches!(
        volume::aggregate_volume(&[], Period::Last12Months),
        Err(ToolError::EmptyInput(_))
    ));
}

#[test]
fn weight_labels_pass_through_non_band_weights() {
    assert_eq!(volume::weight_label(0.1), "Purple");
    assert_eq!(volume::weight_label(0.6), "Green");
    assert_eq!(volume::weight_label(0.8), "Orange");
    assert_eq!(volume::weight_label(0.5), "0.5 kg");
    assert_eq!(volume::weight_label(20.0), "20 kg");
}

#[test]
fn partition_lists_pairs_and_dates() {
    let records = vec![
        record("2024-01-01", "Bench", NO_VARIATION, 1.0, 60.0, 5),
        record("2024-01-03", "Bench", "Close Grip", 1.0, 50.0, 8),
        record("2024-01-03", "Bench", NO_VARIATION, 1.0, 62.5, 5),
    ];

    let keys = partition::exercise_variations(&records);
    assert_eq!(
        keys,
        vec![
            ExerciseKey::new("Bench", NO_VARIATION),
            ExerciseKey::new("Bench", "Close Grip"),
        ]
    );

    let selected = partition::select(&records, &ExerciseKey::new("Bench", NO_VARIATION));
    assert_eq!(selected.len(), 2);
    assert!(selected.iter().all(|record| record.variation == NO_VARIATION));

    assert_eq!(
        partition::workout_dates(&records),
        vec![date("2024-01-03"), date("2024-01-01")]
    );
}

#[test]
fn charts_describe_series_for_rendering() {
    let key = ExerciseKey::new("Bench", NO_VARIATION);
    let records = vec![
        record("2024-01-01", "Bench", NO_VARIATION, 1.0, 60.0, 5),
        record("2024-01-15", "Bench", NO_VARIATION, 1.0, 70.0, 2),
    ];

    let pr = chart::pr_chart(&key, &personal_record::extract_pr_series(&records));
    assert_eq!(pr.title, "Bench PR");
    assert_eq!(pr.y_title, "kg");
    assert_eq!(pr.points.len(), 2);
    assert_eq!(pr.points[0].hover, "Date: 2024-01-01<br>Weight: 60 kg<br>Count: 5");
    assert!(pr.points[0].marker_size > pr.points[1].marker_size);

    let series = volume::aggregate_volume(&records, Period::Last1Month).expect("series built");
    let volume_chart = chart::volume_chart(&key, &series);
    assert_eq!(
        volume_chart.x_range,
        ["2023-12-16".to_string(), "2024-01-15".to_string()]
    );
    assert_eq!(
        volume_chart.bars[0].hover,
        "Date: 2024-01-01<br>Volume: 300<br>Weight: 60 kg<br>Count: 5"
    );

    let json = serde_json::to_value(&pr).expect("chart serialised");
    assert_eq!(json["points"][0]["date"], "2024-01-01");
}
