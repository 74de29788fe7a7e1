use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::workout::tools::error::{Result, ToolError};
use crate::workout::tools::io::excel_read::{RECORD_SHEET, WEIGHT_SHEET};

/// Staleness window applied to cached fetches unless configured otherwise.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);
/// Workbook file name looked up in the default locations.
pub const DEFAULT_WORKBOOK: &str = "Workout.xlsx";

/// Runtime settings for locating and reading the workout log.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub locator: WorkbookLocator,
    pub record_sheet: String,
    pub weight_sheet: String,
    pub cache_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Reads configuration values through the provided lookup so tests never
    /// touch the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut candidates = Vec::new();
        if let Some(path) = get("WORKOUT_WORKBOOK") {
            candidates.push(PathBuf::from(path));
        }
        if let Some(home) = get("HOME") {
            candidates.push(
                Path::new(&home)
                    .join(".config")
                    .join("workout")
                    .join(DEFAULT_WORKBOOK),
            );
        }
        candidates.push(PathBuf::from(DEFAULT_WORKBOOK));

        let cache_ttl = match get("WORKOUT_CACHE_TTL_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse().map_err(|_| {
                ToolError::Config(format!("WORKOUT_CACHE_TTL_SECS is not a number: '{raw}'"))
            })?),
            None => DEFAULT_CACHE_TTL,
        };

        Ok(Self {
            locator: WorkbookLocator::new(candidates),
            record_sheet: get("WORKOUT_RECORD_SHEET").unwrap_or_else(|| RECORD_SHEET.into()),
            weight_sheet: get("WORKOUT_WEIGHT_SHEET").unwrap_or_else(|| WEIGHT_SHEET.into()),
            cache_ttl,
        })
    }

    /// Puts an explicitly requested workbook ahead of every other candidate.
    /// An explicit path must exist; it is never silently passed over in favour
    /// of a default location.
    pub fn with_workbook(mut self, path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            if !path.is_file() {
                return Err(ToolError::MissingInput(path));
            }
            self.locator.candidates.insert(0, path);
        }
        Ok(self)
    }
}

/// Ordered list of places the workbook may live; the first existing file wins.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkbookLocator {
    pub candidates: Vec<PathBuf>,
}

impl WorkbookLocator {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    pub fn resolve(&self) -> Result<PathBuf> {
        self.candidates
            .iter()
            .find(|candidate| candidate.is_file())
            .cloned()
            .ok_or_else(|| ToolError::NoWorkbook(self.candidates.clone()))
    }
}
