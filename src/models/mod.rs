//! Data models for suite triggering
//!
//! Test cases, per-trigger results and run summaries.

mod test_case;
mod test_result;

pub use test_case::TestCase;
pub use test_result::{RunSummary, TestResult, TestStatus};
