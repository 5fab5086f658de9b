//! Configuration module
//!
//! Handles loading and resolving the runner configuration. Values are layered:
//! built-in defaults, then the config file, then `SUITE_RUNNER_*` environment
//! variables, then command-line flags.

mod env;
mod file;

pub use env::{print_env_help, EnvConfig};
pub use file::ConfigFile;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use crate::models::TestCase;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_DELAY_MS: u64 = 5000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runner configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Host and port prefix every endpoint is resolved against
    pub base_url: String,

    /// Pause between consecutive triggers in milliseconds
    pub delay_ms: u64,

    /// Per-request HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Directory receiving `test-results-<epoch_ms>.json`
    pub output_dir: PathBuf,

    /// Ordered suites to trigger
    pub endpoints: Vec<TestCase>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            delay_ms: DEFAULT_DELAY_MS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            output_dir: PathBuf::from("."),
            endpoints: TestCase::defaults(),
        }
    }
}

impl RunnerConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_endpoints(mut self, endpoints: Vec<TestCase>) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self, env: &EnvConfig) {
        if let Some(url) = &env.base_url {
            self.base_url = url.clone();
        }
        if let Some(delay) = env.delay_ms {
            self.delay_ms = delay;
        }
        if let Some(timeout) = env.timeout {
            self.timeout_secs = timeout;
        }
        if let Some(dir) = &env.output_dir {
            self.output_dir = PathBuf::from(dir);
        }
    }

    /// Drop the given endpoints, keeping the order of the rest
    ///
    /// Returns the entries that matched no configured endpoint.
    pub fn skip_endpoints(&mut self, skip: &[String]) -> Vec<String> {
        if skip.is_empty() {
            return Vec::new();
        }
        let normalized: Vec<String> = skip.iter().map(|s| normalize_endpoint(s)).collect();

        let unmatched: Vec<String> = normalized
            .iter()
            .filter(|endpoint| !self.endpoints.iter().any(|case| &case.endpoint == *endpoint))
            .cloned()
            .collect();
        for endpoint in &unmatched {
            warn!("--skip {} matches no configured endpoint", endpoint);
        }

        self.endpoints.retain(|case| !normalized.contains(&case.endpoint));
        unmatched
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            anyhow::bail!(
                "Invalid base URL '{}': must start with http:// or https://",
                self.base_url
            );
        }

        if self.timeout_secs == 0 {
            anyhow::bail!("Timeout must be greater than 0 seconds");
        }

        if self.endpoints.is_empty() {
            anyhow::bail!("No endpoints configured");
        }

        let mut seen = std::collections::HashSet::new();
        for case in &self.endpoints {
            if !case.endpoint.starts_with('/') {
                anyhow::bail!(
                    "Invalid endpoint '{}' for '{}': must start with '/'",
                    case.endpoint,
                    case.name
                );
            }
            if !seen.insert(case.endpoint.as_str()) {
                anyhow::bail!("Duplicate endpoint '{}'", case.endpoint);
            }
        }

        Ok(())
    }
}

/// Accept `test-login` as shorthand for `/test-login`
fn normalize_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
