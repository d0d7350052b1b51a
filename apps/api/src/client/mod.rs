//! Analysis client: the single request/response client for `POST /api/upload`.
//!
//! Responses are decoded into the strongly typed `MatchReport` and checked
//! against its invariants; a malformed report is an error, never rendered.
//! There are no retries: identical bytes fail identically.
use std::time::Duration;

use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::analysis::handlers::{JOB_DESCRIPTION_FIELD, RESUME_FIELD};
use crate::models::report::{MatchReport, ReportViolation};

const UPLOAD_PATH: &str = "/api/upload";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service refused the request; `category` is `client` or `server`.
    #[error("Request rejected (status {status}, {code}): {message}")]
    Rejected {
        status: u16,
        code: String,
        category: String,
        message: String,
    },

    #[error("Malformed response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid report: {0}")]
    InvalidReport(#[from] ReportViolation),
}

impl ClientError {
    /// True when resubmitting a corrected request could succeed.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, ClientError::Rejected { category, .. } if category == "client")
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(default)]
    category: Option<String>,
}

/// A resume file as the client submits it.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct AnalysisClient {
    client: Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Submits a resume and job description and returns the validated report.
    pub async fn analyze(
        &self,
        resume: ResumeUpload,
        job_description: &str,
    ) -> Result<MatchReport, ClientError> {
        let part = Part::bytes(resume.bytes)
            .file_name(resume.file_name)
            .mime_str(&resume.media_type)?;
        let form = Form::new()
            .part(RESUME_FIELD, part)
            .text(JOB_DESCRIPTION_FIELD, job_description.to_string());

        let response = self
            .client
            .post(format!("{}{UPLOAD_PATH}", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Analysis service responded with {status}");

        if status != StatusCode::OK {
            return Err(rejection(status, &body));
        }

        decode_report(&body)
    }
}

/// Parses and validates a success body.
pub fn decode_report(body: &str) -> Result<MatchReport, ClientError> {
    let report: MatchReport = serde_json::from_str(body)?;
    report.validate()?;
    Ok(report)
}

fn rejection(status: StatusCode, body: &str) -> ClientError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => ClientError::Rejected {
            status: status.as_u16(),
            code: envelope.error.code,
            category: envelope.error.category.unwrap_or_else(|| category_for(status)),
            message: envelope.error.message,
        },
        Err(_) => ClientError::Rejected {
            status: status.as_u16(),
            code: "UNKNOWN".to_string(),
            category: category_for(status),
            message: status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string(),
        },
    }
}

fn category_for(status: StatusCode) -> String {
    if status.is_client_error() { "client" } else { "server" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_report() {
        let body = r#"{"score":40,"matchingKeywords":["python","aws"],"missingKeywords":["kubernetes"],"suggestions":"Low match."}"#;
        let report = decode_report(body).unwrap();
        assert_eq!(report.score, 40);
        assert_eq!(report.matching_keywords, vec!["python", "aws"]);
    }

    #[test]
    fn test_decode_rejects_missing_field() {
        let body = r#"{"score":40,"matchingKeywords":[],"suggestions":"x"}"#;
        assert!(matches!(decode_report(body), Err(ClientError::Parse(_))));
    }

    #[test]
    fn test_decode_rejects_invariant_violation() {
        let body = r#"{"score":40,"matchingKeywords":["aws"],"missingKeywords":["aws"],"suggestions":"x"}"#;
        assert!(matches!(
            decode_report(body),
            Err(ClientError::InvalidReport(ReportViolation::OverlappingKeyword(_)))
        ));
    }

    #[test]
    fn test_rejection_reads_error_envelope() {
        let body = r#"{"error":{"code":"UNSUPPORTED_FORMAT","message":"Unsupported resume format.","category":"client"}}"#;
        let err = rejection(StatusCode::UNSUPPORTED_MEDIA_TYPE, body);
        assert!(err.is_client_fault());
        match err {
            ClientError::Rejected { status, code, .. } => {
                assert_eq!(status, 415);
                assert_eq!(code, "UNSUPPORTED_FORMAT");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_rejection_without_envelope_falls_back_to_status() {
        let err = rejection(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert!(!err.is_client_fault());
        match err {
            ClientError::Rejected { code, category, .. } => {
                assert_eq!(code, "UNKNOWN");
                assert_eq!(category, "server");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
