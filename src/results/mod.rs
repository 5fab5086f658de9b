//! Results storage module
//!
//! Persists run reports and reads them back for inspection.

mod storage;

pub use storage::ResultsStorage;
