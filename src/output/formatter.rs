//! Console formatting for trigger runs
//!
//! Every method takes data and returns a string; nothing here writes to the
//! terminal. Color is a formatter setting rather than process state.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::path::Path;
use std::time::Duration;

use crate::http::upload_command;
use crate::models::{RunSummary, TestCase, TestResult, TestStatus};

const RESET: &str = "\x1b[0m";
const BRIGHT: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";

/// Output format options for listings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            _ => None,
        }
    }
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    fn paint(&self, text: &str, codes: &[&str]) -> String {
        if self.colorize {
            format!("{}{text}{RESET}", codes.concat())
        } else {
            text.to_string()
        }
    }

    fn boxed_title(&self, title: &str) -> String {
        let lines = [
            "╔══════════════════════════════════════════════════════════════╗".to_string(),
            format!("║{title:^62}║"),
            "╚══════════════════════════════════════════════════════════════╝".to_string(),
        ];
        self.paint(&lines.join("\n"), &[BRIGHT, BLUE])
    }

    /// Banner printed before the first trigger
    pub fn format_banner(&self, started_at: DateTime<Local>) -> String {
        format!(
            "{}\n{}\n",
            self.boxed_title("Test Suite - Sequential Runner"),
            self.paint(
                &format!(
                    "Starting test execution at: {}",
                    started_at.format("%Y-%m-%d %H:%M:%S")
                ),
                &[CYAN]
            )
        )
    }

    /// `[i/N] Running: <name>` followed by the endpoint path
    ///
    /// `index` is zero-based.
    pub fn format_progress(&self, index: usize, total: usize, case: &TestCase) -> String {
        format!(
            "{}\n{}",
            self.paint(
                &format!("[{}/{}] Running: {}", index + 1, total, case.name),
                &[BRIGHT]
            ),
            self.paint(&format!("Endpoint: {}", case.endpoint), &[YELLOW])
        )
    }

    /// Outcome line for a single trigger
    pub fn format_outcome(&self, result: &TestResult) -> String {
        match result.status {
            TestStatus::Success => self.paint(
                &format!("{} Test triggered successfully", result.status.symbol()),
                &[GREEN],
            ),
            TestStatus::Failed => self.paint(
                &format!(
                    "{} Failed to trigger test: {}",
                    result.status.symbol(),
                    result.error.as_deref().unwrap_or("unknown error")
                ),
                &[RED],
            ),
        }
    }

    pub fn format_waiting(&self, delay: Duration) -> String {
        self.paint(
            &format!(
                "Waiting {}s before next test...\n",
                delay.as_millis() as f64 / 1000.0
            ),
            &[CYAN],
        )
    }

    /// Summary block printed after the last trigger
    ///
    /// Counts and the failed list are both derived from `results`.
    pub fn format_summary(&self, results: &[TestResult], completed_at: DateTime<Local>) -> String {
        let summary = RunSummary::from_results(results);
        let mut output = String::new();

        output.push('\n');
        output.push_str(&self.boxed_title("Test Execution Summary"));
        output.push('\n');
        output.push_str(&self.paint(
            &format!(
                "Completed at: {}",
                completed_at.format("%Y-%m-%d %H:%M:%S")
            ),
            &[CYAN],
        ));
        output.push_str("\n\n");
        output.push_str(&self.paint(&format!("Successful: {}", summary.succeeded), &[GREEN]));
        output.push('\n');
        output.push_str(&self.paint(&format!("Failed: {}", summary.failed), &[RED]));
        output.push('\n');
        output.push_str(&format!("Total: {}\n", summary.total));

        let failures = self.format_failures(results);
        if !failures.is_empty() {
            output.push('\n');
            output.push_str(&failures);
        }

        output
    }

    /// Failed triggers with their error text; empty when nothing failed
    fn format_failures(&self, results: &[TestResult]) -> String {
        let failed: Vec<_> = results
            .iter()
            .filter(|r| r.status == TestStatus::Failed)
            .collect();

        if failed.is_empty() {
            return String::new();
        }

        let mut output = String::new();
        output.push_str(&self.paint("Failed Tests:", &[RED, BRIGHT]));
        output.push('\n');
        for result in failed {
            output.push_str(&self.paint(
                &format!("  - {} ({})", result.name, result.endpoint),
                &[RED],
            ));
            output.push('\n');
            output.push_str(&format!(
                "    Error: {}\n",
                result.error.as_deref().unwrap_or("unknown error")
            ));
        }

        output
    }

    /// Follow-up instructions for publishing the remote report
    pub fn format_next_steps(&self, base_url: &str) -> String {
        format!(
            "{}\n{}\n{}\n",
            self.paint("Next Steps:", &[BRIGHT, YELLOW]),
            self.paint(
                "Wait for all tests to complete, then upload the report:",
                &[CYAN]
            ),
            self.paint(&format!("  {}", upload_command(base_url)), &[GREEN])
        )
    }

    pub fn format_saved(&self, path: &Path) -> String {
        self.paint(&format!("Results saved to: {}\n", path.display()), &[CYAN])
    }

    /// Closing line once the report is written
    pub fn format_completed(&self, summary: &RunSummary) -> String {
        if summary.is_all_succeeded() {
            self.paint("All tests triggered successfully!", &[GREEN, BRIGHT])
        } else {
            self.paint(
                &format!(
                    "Run complete: {} of {} triggers failed",
                    summary.failed, summary.total
                ),
                &[YELLOW, BRIGHT],
            )
        }
    }

    /// One line per stored result
    pub fn format_result(&self, result: &TestResult) -> String {
        let status = match result.status {
            TestStatus::Success => self.paint("✓ SUCCESS", &[GREEN]),
            TestStatus::Failed => self.paint("✗ FAILED ", &[RED]),
        };

        let mut line = format!(
            "{:30} {:36} {} {}",
            result.name,
            result.endpoint,
            status,
            result.timestamp.format("%Y-%m-%d %H:%M:%S")
        );
        if let Some(err) = &result.error {
            line.push_str(&format!(" - {err}"));
        }
        line
    }

    /// Configured suites, in trigger order
    pub fn format_cases(&self, cases: &[TestCase], detailed: bool) -> Result<String> {
        let output = match self.format {
            OutputFormat::Json => {
                serde_json::to_string(cases).context("Failed to serialize suites")?
            }
            OutputFormat::JsonPretty => {
                serde_json::to_string_pretty(cases).context("Failed to serialize suites")?
            }
            OutputFormat::Table => {
                let mut output = String::new();
                for (i, case) in cases.iter().enumerate() {
                    if detailed {
                        output.push_str(&format!(
                            "{:2}. {:30} {:36} [{}]\n",
                            i + 1,
                            case.name,
                            case.endpoint,
                            case.category()
                        ));
                    } else {
                        output.push_str(&format!("{:2}. {:30} {}\n", i + 1, case.name, case.endpoint));
                    }
                }
                output.push_str(&format!("\nTotal: {} suites\n", cases.len()));
                output
            }
        };
        Ok(output)
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}
