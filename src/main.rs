use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use workout_tools::chart;
use workout_tools::config::Config;
use workout_tools::daily::{self, DuplicateSets};
use workout_tools::io::excel_write::{self, SheetTable};
use workout_tools::model::{DailyTable, Dataset, ExerciseKey, NO_VARIATION};
use workout_tools::partition;
use workout_tools::personal_record::{self, DateOrder};
use workout_tools::source::{DataSource, WorkbookSource};
use workout_tools::volume::{self, Period};
use workout_tools::{Result, ToolError};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?.with_workbook(cli.workbook)?;
    // One fetch per invocation, so the TTL cache has nothing to save here.
    let dataset = WorkbookSource::from_config(&config)?.fetch()?;

    match cli.command {
        Command::Daily(args) => execute_daily(&dataset, args),
        Command::Pr(args) => execute_pr(&dataset, args),
        Command::Volume(args) => execute_volume(&dataset, args),
        Command::Exercises => print_json(&partition::exercise_variations(&dataset.workouts)),
        Command::Bodyweight => print_json(&dataset.bodyweight),
    }
}

fn execute_daily(dataset: &Dataset, args: DailyArgs) -> Result<()> {
    let date = match args.date {
        Some(date) => date,
        None => *partition::workout_dates(&dataset.workouts)
            .first()
            .ok_or(ToolError::EmptyInput("daily view"))?,
    };
    let duplicates = if args.concat_duplicates {
        DuplicateSets::Concatenate
    } else {
        DuplicateSets::Reject
    };

    let table = daily::aggregate_daily_with(&dataset.workouts, date, duplicates)?;
    print!("{}", render_daily(&table));
    write_xlsx(args.xlsx, || vec![excel_write::daily_sheet(&table)])
}

fn execute_pr(dataset: &Dataset, args: PrArgs) -> Result<()> {
    let key = args.exercise.key();
    let records = partition::select(&dataset.workouts, &key);
    let series = personal_record::extract_pr_series_with(&records, args.order.into());
    let chart = chart::pr_chart(&key, &series);

    print_json(&chart)?;
    write_xlsx(args.xlsx, || vec![excel_write::pr_sheet(&chart.title, &series)])
}

fn execute_volume(dataset: &Dataset, args: VolumeArgs) -> Result<()> {
    let key = args.exercise.key();
    let records = partition::select(&dataset.workouts, &key);
    let series = volume::aggregate_volume(&records, args.period.into())?;
    let chart = chart::volume_chart(&key, &series);

    print_json(&chart)?;
    write_xlsx(args.xlsx, || {
        vec![excel_write::volume_sheet(&chart.title, &series)]
    })
}

fn write_xlsx<F>(path: Option<PathBuf>, tables: F) -> Result<()>
where
    F: FnOnce() -> Vec<SheetTable>,
{
    match path {
        Some(path) => excel_write::write_tables(&path, &tables()),
        None => Ok(()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Plain-text grid with one line per set.
fn render_daily(table: &DailyTable) -> String {
    let mut grid: Vec<Vec<String>> = Vec::with_capacity(table.sets.len() + 1);
    grid.push(
        std::iter::once("Set".to_string())
            .chain(table.columns.iter().cloned())
            .collect(),
    );
    for (set, cells) in table.sets.iter().zip(&table.cells) {
        grid.push(
            std::iter::once(set.to_string())
                .chain(cells.iter().cloned())
                .collect(),
        );
    }

    let widths: Vec<usize> = (0..grid[0].len())
        .map(|col| {
            grid.iter()
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut output = format!("{}\n", table.date.format("%Y-%m-%d"));
    for row in &grid {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        output.push_str(line.join("  ").trim_end());
        output.push('\n');
    }
    output
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Daily tables and progression charts from a workout log."
)]
struct Cli {
    /// Workbook to read; takes precedence over WORKOUT_WORKBOOK and the default locations.
    #[arg(long, global = true)]
    workbook: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the sets of one day as a Set x exercise table.
    Daily(DailyArgs),
    /// Personal-record progression of an exercise as chart JSON.
    Pr(PrArgs),
    /// Training volume of an exercise as chart JSON.
    Volume(VolumeArgs),
    /// List the exercise/variation pairs in the log.
    Exercises,
    /// List bodyweight measurements.
    Bodyweight,
}

#[derive(clap::Args)]
struct DailyArgs {
    /// Day to show (YYYY-MM-DD). Defaults to the latest logged day.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Join duplicate set entries instead of failing.
    #[arg(long)]
    concat_duplicates: bool,

    /// Also write the table to this Excel file.
    #[arg(long)]
    xlsx: Option<PathBuf>,
}

#[derive(clap::Args)]
struct ExerciseArgs {
    /// Exercise name as logged.
    #[arg(long)]
    exercise: String,

    /// Variation name; omit for exercises logged without one.
    #[arg(long, default_value = NO_VARIATION)]
    variation: String,
}

impl ExerciseArgs {
    fn key(&self) -> ExerciseKey {
        ExerciseKey::new(self.exercise.clone(), self.variation.clone())
    }
}

#[derive(clap::Args)]
struct PrArgs {
    #[command(flatten)]
    exercise: ExerciseArgs,

    /// Order in which logged dates are visited.
    #[arg(long, value_enum, default_value_t = DateOrderKind::Chronological)]
    order: DateOrderKind,

    /// Also write the series to this Excel file.
    #[arg(long)]
    xlsx: Option<PathBuf>,
}

#[derive(clap::Args)]
struct VolumeArgs {
    #[command(flatten)]
    exercise: ExerciseArgs,

    /// Trailing window shown on the chart.
    #[arg(long, value_enum, default_value_t = PeriodKind::Last3Months)]
    period: PeriodKind,

    /// Also write the series to this Excel file.
    #[arg(long)]
    xlsx: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum DateOrderKind {
    Chronological,
    Input,
}

impl From<DateOrderKind> for DateOrder {
    fn from(kind: DateOrderKind) -> Self {
        match kind {
            DateOrderKind::Chronological => DateOrder::Chronological,
            DateOrderKind::Input => DateOrder::Input,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PeriodKind {
    #[value(name = "1m")]
    Last1Month,
    #[value(name = "3m")]
    Last3Months,
    #[value(name = "6m")]
    Last6Months,
    #[value(name = "12m")]
    Last12Months,
}

impl From<PeriodKind> for Period {
    fn from(kind: PeriodKind) -> Self {
        match kind {
            PeriodKind::Last1Month => Period::Last1Month,
            PeriodKind::Last3Months => Period::Last3Months,
            PeriodKind::Last6Months => Period::Last6Months,
            PeriodKind::Last12Months => Period::Last12Months,
        }
    }
}
