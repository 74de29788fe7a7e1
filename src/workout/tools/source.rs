use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument};

use crate::workout::tools::config::Config;
use crate::workout::tools::error::Result;
use crate::workout::tools::io::{excel_read, records};
use crate::workout::tools::model::Dataset;

/// Anything able to produce the workout log.
pub trait DataSource {
    fn fetch(&self) -> Result<Dataset>;
}

/// Reads the workout log from an Excel workbook on disk.
#[derive(Clone, Debug)]
pub struct WorkbookSource {
    path: PathBuf,
    record_sheet: String,
    weight_sheet: String,
}

impl WorkbookSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            record_sheet: excel_read::RECORD_SHEET.to_string(),
            weight_sheet: excel_read::WEIGHT_SHEET.to_string(),
        }
    }

    /// Resolves the workbook location and sheet names from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let path = config.locator.resolve()?;
        Ok(Self::new(path).with_sheets(&config.record_sheet, &config.weight_sheet))
    }

    pub fn with_sheets(mut self, record_sheet: &str, weight_sheet: &str) -> Self {
        self.record_sheet = record_sheet.to_string();
        self.weight_sheet = weight_sheet.to_string();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for WorkbookSource {
    #[instrument(level = "info", skip_all, fields(path = %self.path.display()))]
    fn fetch(&self) -> Result<Dataset> {
        let raw = excel_read::read_dataset(&self.path, &self.record_sheet, &self.weight_sheet)?;
        let dataset = records::parse_dataset(&raw)?;
        info!(
            workouts = dataset.workouts.len(),
            bodyweight = dataset.bodyweight.len(),
            "read workout log"
        );
        Ok(dataset)
    }
}

/// Cache-aside wrapper: a fetched dataset is reused until it is older than `ttl`.
///
/// Meant for long-lived callers that render several views from one log, such
/// as a dashboard process. The CLI fetches once per run and reads the workbook
/// directly.
#[derive(Debug)]
pub struct CachedSource<S> {
    inner: S,
    ttl: Duration,
    cached: RefCell<Option<(Instant, Dataset)>>,
}

impl<S: DataSource> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cached: RefCell::new(None),
        }
    }

    /// Drops the cached dataset so the next fetch reads from the source.
    pub fn invalidate(&self) {
        self.cached.borrow_mut().take();
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: DataSource> DataSource for CachedSource<S> {
    fn fetch(&self) -> Result<Dataset> {
        if let Some((fetched_at, dataset)) = self.cached.borrow().as_ref() {
            if fetched_at.elapsed() < self.ttl {
                debug!("serving workout log from cache");
                return Ok(dataset.clone());
            }
        }

        let dataset = self.inner.fetch()?;
        *self.cached.borrow_mut() = Some((Instant::now(), dataset.clone()));
        Ok(dataset)
    }
}
