//! Results storage and retrieval
//!
//! Each run is written as a pretty-printed JSON array to
//! `test-results-<epoch_ms>.json` in the output directory.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::models::{RunSummary, TestResult};

const REPORT_PREFIX: &str = "test-results-";
const REPORT_EXTENSION: &str = ".json";

/// Results storage manager
pub struct ResultsStorage {
    /// Base directory for reports
    base_dir: PathBuf,
}

impl ResultsStorage {
    /// Create a new results storage
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get path for a report written at `epoch_ms`
    pub fn report_path(&self, epoch_ms: i64) -> PathBuf {
        self.base_dir
            .join(format!("{REPORT_PREFIX}{epoch_ms}{REPORT_EXTENSION}"))
    }

    /// Save a run's results, named after the current time
    pub fn save(&self, results: &[TestResult]) -> Result<PathBuf> {
        self.save_at(results, Utc::now().timestamp_millis())
    }

    /// Save a run's results under an explicit epoch
    pub fn save_at(&self, results: &[TestResult], epoch_ms: i64) -> Result<PathBuf> {
        fs::create_dir_all(&self.base_dir).with_context(|| {
            format!("Failed to create results directory: {}", self.base_dir.display())
        })?;

        let path = self.report_path(epoch_ms);
        let file = File::create(&path)
            .with_context(|| format!("Failed to create results file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, results).context("Failed to write results")?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush results file: {}", path.display()))?;

        info!("Saved {} results to {}", results.len(), path.display());
        Ok(path)
    }

    /// Load a report back
    pub fn load(&self, path: &Path) -> Result<Vec<TestResult>> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open results file: {}", path.display()))?;
        let reader = BufReader::new(file);

        let results: Vec<TestResult> = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse results: {}", path.display()))?;

        debug!("Loaded {} results from {}", results.len(), path.display());
        Ok(results)
    }

    /// List reports in the base directory, newest first
    pub fn list_reports(&self) -> Result<Vec<ReportInfo>> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }

        let mut reports = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let path = entry.path();

            let Some(epoch_ms) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(parse_report_epoch)
            else {
                continue;
            };

            match self.load(&path) {
                Ok(results) => reports.push(ReportInfo {
                    path,
                    written_at: Utc.timestamp_millis_opt(epoch_ms).single(),
                    epoch_ms,
                    summary: RunSummary::from_results(&results),
                }),
                Err(e) => {
                    debug!("Skipping {}: {:#}", path.display(), e);
                }
            }
        }

        reports.sort_by(|a, b| b.epoch_ms.cmp(&a.epoch_ms));
        Ok(reports)
    }

    /// Get the newest report, if any
    pub fn latest(&self) -> Result<Option<ReportInfo>> {
        Ok(self.list_reports()?.into_iter().next())
    }
}

/// Brief report information
#[derive(Clone, Debug)]
pub struct ReportInfo {
    pub path: PathBuf,
    pub epoch_ms: i64,
    pub written_at: Option<DateTime<Utc>>,
    pub summary: RunSummary,
}

/// Extract the epoch from `test-results-<epoch_ms>.json`
fn parse_report_epoch(file_name: &str) -> Option<i64> {
    file_name
        .strip_prefix(REPORT_PREFIX)?
        .strip_suffix(REPORT_EXTENSION)?
        .parse()
        .ok()
}
