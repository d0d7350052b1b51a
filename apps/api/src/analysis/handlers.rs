//! Axum route handler for the upload-and-analyze endpoint.

use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{info_span, warn};
use uuid::Uuid;

use crate::errors::AnalysisError;
use crate::models::document::Document;
use crate::models::report::MatchReport;
use crate::state::AppState;

/// Multipart part carrying the resume file.
pub const RESUME_FIELD: &str = "resume";
/// Multipart part carrying the job description text.
pub const JOB_DESCRIPTION_FIELD: &str = "jobDescription";

/// POST /api/upload
///
/// Accepts `multipart/form-data` with a `resume` file and a `jobDescription`
/// text part and returns the match report. The engine runs on the blocking
/// pool since PDF parsing is CPU-bound.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchReport>, AnalysisError> {
    let mut document: Option<Document> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().map(String::from);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let media_type = field.content_type().map(String::from);
                let file_name = field.file_name().map(String::from);
                let bytes = field.bytes().await.map_err(malformed)?;

                let mut doc = Document::new(bytes, media_type);
                if let Some(name) = file_name {
                    doc = doc.with_file_name(name);
                }
                document = Some(doc);
            }
            Some(JOB_DESCRIPTION_FIELD) => {
                job_description = Some(field.text().await.map_err(malformed)?);
            }
            _ => {}
        }
    }

    let job_description = job_description.unwrap_or_default();
    let analyzer = Arc::clone(&state.analyzer);
    let span = info_span!("analysis", id = %Uuid::new_v4());

    let report = tokio::task::spawn_blocking(move || {
        span.in_scope(|| analyzer.analyze(document, &job_description))
    })
    .await
    .map_err(|e| AnalysisError::Internal(anyhow!("Analysis task failed: {e}")))??;

    Ok(Json(report))
}

fn malformed(e: axum::extract::multipart::MultipartError) -> AnalysisError {
    warn!("Rejected multipart body: {e}");
    AnalysisError::InvalidInput("Malformed or oversized multipart request".to_string())
}
