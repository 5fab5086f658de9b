//! Trigger result models
//!
//! Defines the recorded outcome of triggering one suite and the derived
//! run summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::TestCase;

/// Trigger outcome
///
/// `Success` means the remote service accepted the trigger. It says nothing
/// about whether the remote suite itself passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Success,
    Failed,
}

impl TestStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            TestStatus::Success => "✓",
            TestStatus::Failed => "✗",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TestStatus::Success)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Success => write!(f, "success"),
            TestStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Result of triggering a single suite
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub endpoint: String,
    pub status: TestStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TestResult {
    pub fn success(test_case: &TestCase) -> Self {
        Self {
            name: test_case.name.clone(),
            endpoint: test_case.endpoint.clone(),
            status: TestStatus::Success,
            timestamp: Utc::now(),
            error: None,
        }
    }

    pub fn failed(test_case: &TestCase, error: impl Into<String>) -> Self {
        Self {
            name: test_case.name.clone(),
            endpoint: test_case.endpoint.clone(),
            status: TestStatus::Failed,
            timestamp: Utc::now(),
            error: Some(error.into()),
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.status.symbol(), self.name, self.endpoint)?;
        if let Some(err) = &self.error {
            write!(f, " - {err}")?;
        }
        Ok(())
    }
}

/// Counts over a finished run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn from_results(results: &[TestResult]) -> Self {
        let succeeded = results.iter().filter(|r| r.status.is_success()).count();

        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.succeeded as f64 / self.total as f64) * 100.0
        }
    }

    pub fn is_all_succeeded(&self) -> bool {
        self.succeeded == self.total
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {} | Successful: {} | Failed: {} ({:.1}% accepted)",
            self.total,
            self.succeeded,
            self.failed,
            self.success_rate()
        )
    }
}
