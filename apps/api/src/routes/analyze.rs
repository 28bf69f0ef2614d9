//! Axum route handlers for the Analyze API.

use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::{info, info_span, Instrument, Span};
use uuid::Uuid;

use crate::analysis::AnalysisResult;
use crate::errors::AppError;
use crate::extraction::extract_text;
use crate::state::AppState;
use crate::upload::{Submission, UploadedFile, ValidatedSubmission};

const RESUME_FIELD: &str = "resume";
const DESCRIPTION_FIELD: &str = "jobDescription";

/// GET /api/analyze
///
/// Liveness check for the analyze route itself.
pub async fn handle_analyze_status() -> Json<Value> {
    Json(json!({
        "message": "ATS Analyze API is working!",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// POST /api/analyze
///
/// Multipart form with a `resume` file and a `jobDescription` text field.
/// Validates the upload, extracts its text and returns the `AnalysisResult`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let request_id = Uuid::new_v4();

    async move {
        let multipart = multipart.map_err(|r| AppError::Validation(r.body_text()))?;
        let submission = read_submission(multipart).await?;
        let ValidatedSubmission {
            resume,
            kind,
            job_description,
        } = state.upload_policy.validate(submission)?;

        info!(
            file_name = %resume.file_name,
            kind = ?kind,
            bytes = resume.data.len(),
            "Analyzing upload"
        );

        let analyzer = Arc::clone(&state.analyzer);
        let span = Span::current();
        let result = tokio::task::spawn_blocking(move || {
            span.in_scope(|| -> Result<AnalysisResult, AppError> {
                let text = extract_text(&resume.data, kind)?;
                analyzer.analyze(&text, &job_description)
            })
        })
        .await
        .map_err(|e| {
            if e.is_panic() {
                AppError::Extraction("the document could not be parsed".to_string())
            } else {
                AppError::Internal(e.into())
            }
        })??;

        info!(
            score = result.overall_score,
            matched = result.matched_keywords.len(),
            missing = result.missing_keywords.len(),
            "Analysis finished"
        );

        Ok(Json(result))
    }
    .instrument(info_span!("analyze", %request_id))
    .await
}

async fn read_submission(mut multipart: Multipart) -> Result<Submission, AppError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            RESUME_FIELD => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(multipart_error)?;
                submission.resume = Some(UploadedFile {
                    file_name,
                    content_type,
                    data,
                });
            }
            DESCRIPTION_FIELD => {
                submission.job_description = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    Ok(submission)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Malformed multipart body: {}", err.body_text()))
    }
}
