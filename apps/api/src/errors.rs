use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Reasons a submitted document could not be turned into usable text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Corrupt document: {0}")]
    CorruptDocument(String),

    #[error("Document contains no extractable text")]
    EmptyContent,
}

/// Error type of a single analysis call.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AnalysisError>`.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Analysis failed: {cause}")]
    AnalysisFailed { cause: ExtractError },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractError> for AnalysisError {
    fn from(cause: ExtractError) -> Self {
        AnalysisError::AnalysisFailed { cause }
    }
}

/// Who is expected to act on an error: the caller (fix the request) or the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Client,
    Server,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Client => "client",
            ErrorCategory::Server => "server",
        }
    }
}

impl AnalysisError {
    /// Status, machine-readable code, category and the user-facing message.
    /// Messages never carry diagnostic detail; that only goes to the log.
    pub fn describe(&self) -> (StatusCode, &'static str, ErrorCategory, String) {
        match self {
            AnalysisError::InvalidInput(msg) => (
                StatusCode::BAD_REQUEST,
                "INVALID_INPUT",
                ErrorCategory::Client,
                msg.clone(),
            ),
            AnalysisError::AnalysisFailed { cause } => match cause {
                ExtractError::UnsupportedFormat(_) => (
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    "UNSUPPORTED_FORMAT",
                    ErrorCategory::Client,
                    "Unsupported resume format. Please upload a PDF or plain text file.".to_string(),
                ),
                ExtractError::EmptyContent => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EMPTY_CONTENT",
                    ErrorCategory::Client,
                    "No text could be read from the resume. Scanned or image-only documents are not supported."
                        .to_string(),
                ),
                ExtractError::CorruptDocument(_) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "CORRUPT_DOCUMENT",
                    ErrorCategory::Server,
                    "The resume could not be read. Please resubmit a valid file.".to_string(),
                ),
            },
            AnalysisError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                ErrorCategory::Server,
                "An internal server error occurred".to_string(),
            ),
        }
    }
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        match &self {
            AnalysisError::AnalysisFailed { cause } => {
                tracing::warn!("Document extraction failed: {cause}");
            }
            AnalysisError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
            }
            AnalysisError::InvalidInput(_) => {}
        }

        let (status, code, category, message) = self.describe();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
                "category": category.as_str(),
            }
        }));

        (status, body).into_response()
    }
}
