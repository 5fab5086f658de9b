//! Report upload trigger
//!
//! After the remote suites finish, the service can bundle their results and
//! publish them. This is a separate step the operator runs by hand; the
//! sequential runner never calls it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::HttpClient;

/// Endpoint that generates and publishes the aggregated report
pub const UPLOAD_REPORT_ENDPOINT: &str = "/upload-report";

/// Response body of the upload endpoint
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReportResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcs_console_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_folder: Option<String>,
}

impl UploadReportResponse {
    /// Turn a `success: false` body into an error
    pub fn into_result(self) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            anyhow::bail!(
                "Report upload failed: {}",
                self.error.as_deref().unwrap_or("no error message returned")
            )
        }
    }
}

/// Ask the service to generate and publish the report
pub async fn request_report_upload(client: &HttpClient) -> Result<UploadReportResponse> {
    let url = client.build_url(UPLOAD_REPORT_ENDPOINT);
    info!("Requesting report upload from {}", url);

    let body = client
        .post_json(UPLOAD_REPORT_ENDPOINT)
        .await
        .with_context(|| format!("Failed to call {url}"))?;

    let response: UploadReportResponse =
        serde_json::from_value(body).context("Unexpected upload-report response")?;

    Ok(response)
}

/// Shell command an operator can run to publish the report
pub fn upload_command(base_url: &str) -> String {
    format!(
        "curl -X POST {}{}",
        base_url.trim_end_matches('/'),
        UPLOAD_REPORT_ENDPOINT
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::serve_once;

    #[test]
    fn test_parse_success_response() {
        let body = serde_json::json!({
            "success": true,
            "message": "Report uploaded and cleaned up",
            "public_url": "https://storage.example/reports/20260101_120000/index.html",
            "report_folder": "allure-reports/20260101_120000"
        });

        let response: UploadReportResponse = serde_json::from_value(body).unwrap();
        assert!(response.success);
        assert_eq!(
            response.report_folder.as_deref(),
            Some("allure-reports/20260101_120000")
        );
        assert!(response.gcs_console_url.is_none());
        assert!(response.into_result().is_ok());
    }

    #[test]
    fn test_failed_response_is_error() {
        let body = serde_json::json!({
            "success": false,
            "error": "Allure report generation failed"
        });

        let response: UploadReportResponse = serde_json::from_value(body).unwrap();
        let err = response.into_result().unwrap_err();
        assert!(err.to_string().contains("Allure report generation failed"));
    }

    #[tokio::test]
    async fn test_request_report_upload_over_http() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"success":true,"message":"Report uploaded","report_folder":"allure-reports/20260101_120000"}"#,
        )
        .await;
        let client = HttpClient::new(base, 5).unwrap();

        let response = request_report_upload(&client).await.unwrap();
        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some("Report uploaded"));

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("post /upload-report http/1.1\r\n"));
        assert!(request.contains("content-type: application/json\r\n"));
    }

    #[tokio::test]
    async fn test_request_report_upload_server_error() {
        let (base, server) = serve_once("503 Service Unavailable", "").await;
        let client = HttpClient::new(base, 5).unwrap();

        let err = request_report_upload(&client).await.unwrap_err();
        assert!(format!("{err:#}").contains("HTTP error! status: 503"));
        server.await.unwrap();
    }

    #[test]
    fn test_upload_command() {
        assert_eq!(
            upload_command("http://localhost:8000/"),
            "curl -X POST http://localhost:8000/upload-report"
        );
    }
}
