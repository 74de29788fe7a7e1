use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool loads the workout log, derives views from it, or emits them.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a workbook does not contain an expected sheet.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when a sheet lacks one of the columns the log schema requires.
    #[error("sheet '{sheet}' has no column named '{column}'")]
    MissingColumn { sheet: String, column: String },

    /// Raised when a filter matched no rows.
    #[error("no workout records found for {date}")]
    EmptyResult { date: NaiveDate },

    /// Raised when a record cannot be placed in a derived view. `record` is
    /// the zero-based position in the slice handed to the aggregation.
    #[error("invalid value '{value}' in column {column} (record {record})")]
    InvalidData {
        record: usize,
        column: String,
        value: String,
    },

    /// Raised when an aggregation needs at least one record.
    #[error("{0} requires at least one workout record")]
    EmptyInput(&'static str),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when none of the configured workbook locations exist.
    #[error("no workout workbook found; looked in {}", display_paths(.0))]
    NoWorkbook(Vec<PathBuf>),

    /// Raised when an environment setting cannot be interpreted.
    #[error("configuration error: {0}")]
    Config(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
