//! Output formatting module
//!
//! Pure string formatting for progress, summaries and listings.

mod formatter;

pub use formatter::{OutputFormat, ResultFormatter};
