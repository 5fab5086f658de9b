//! Sequential trigger runner
//!
//! Fires each configured suite in order, one request at a time, pausing
//! between requests. A failed trigger is recorded and the run moves on; only
//! errors outside the per-trigger boundary (report write) abort the run.

use anyhow::Result;
use chrono::Local;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, warn};

use super::{Delay, TokioDelay};
use crate::config::RunnerConfig;
use crate::http::{EndpointClient, HttpClient, TriggerError};
use crate::models::{RunSummary, TestResult};
use crate::output::ResultFormatter;
use crate::results::ResultsStorage;

/// Outcome of a complete run
#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub results: Vec<TestResult>,
    pub summary: RunSummary,
    pub report_path: PathBuf,
}

/// Sequential runner for the configured suites
pub struct SequentialRunner {
    config: RunnerConfig,
    client: Box<dyn EndpointClient>,
    delay: Box<dyn Delay>,
    storage: ResultsStorage,
    formatter: ResultFormatter,
    quiet: bool,
}

impl SequentialRunner {
    /// Create a runner talking HTTP to `config.base_url`
    pub fn new(config: RunnerConfig) -> Result<Self> {
        let client = HttpClient::new(&config.base_url, config.timeout_secs)?;
        let storage = ResultsStorage::new(&config.output_dir);

        Ok(Self {
            config,
            client: Box::new(client),
            delay: Box::new(TokioDelay),
            storage,
            formatter: ResultFormatter::default(),
            quiet: false,
        })
    }

    /// Replace the trigger client
    pub fn with_client(mut self, client: impl EndpointClient + 'static) -> Self {
        self.client = Box::new(client);
        self
    }

    /// Replace the inter-trigger pause
    pub fn with_delay(mut self, delay: impl Delay + 'static) -> Self {
        self.delay = Box::new(delay);
        self
    }

    pub fn with_formatter(mut self, formatter: ResultFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Suppress console output
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    fn emit(&self, text: &str) {
        if !self.quiet {
            println!("{text}");
        }
    }

    /// Trigger one endpoint
    pub async fn run_single_test(&self, endpoint: &str) -> std::result::Result<Value, TriggerError> {
        self.client.trigger(endpoint).await
    }

    /// Trigger every configured suite in order and persist the results
    pub async fn run_all_tests(&self) -> Result<RunOutcome> {
        let cases = &self.config.endpoints;
        if cases.is_empty() {
            anyhow::bail!("No endpoints configured");
        }

        let total = cases.len();
        info!(
            "Triggering {} suites against {} ({}ms apart)",
            total, self.config.base_url, self.config.delay_ms
        );

        self.emit(&self.formatter.format_banner(Local::now()));

        let mut results = Vec::with_capacity(total);

        for (i, case) in cases.iter().enumerate() {
            self.emit(&self.formatter.format_progress(i, total, case));

            let result = match self.run_single_test(&case.endpoint).await {
                Ok(_) => TestResult::success(case),
                Err(e) => {
                    warn!("Trigger for {} failed: {}", case, e);
                    TestResult::failed(case, e.to_string())
                }
            };

            self.emit(&self.formatter.format_outcome(&result));
            results.push(result);

            if i + 1 < total {
                self.emit(&self.formatter.format_waiting(self.config.delay()));
                self.delay.wait(self.config.delay()).await;
            }
        }

        let summary = RunSummary::from_results(&results);

        self.emit(&self.formatter.format_summary(&results, Local::now()));

        self.emit(&self.formatter.format_next_steps(&self.config.base_url));

        let report_path = self.storage.save(&results)?;
        self.emit(&self.formatter.format_saved(&report_path));

        info!(
            "Run finished: {}/{} triggers succeeded",
            summary.succeeded, summary.total
        );

        Ok(RunOutcome {
            results,
            summary,
            report_path,
        })
    }
}
