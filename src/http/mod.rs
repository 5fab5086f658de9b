//! HTTP module for suite triggering
//!
//! Provides the trigger client abstraction and the report upload call.

mod client;
mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{EndpointClient, HttpClient, TriggerError};
pub use upload::{request_report_upload, upload_command};
