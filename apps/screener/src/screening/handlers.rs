//! Axum route handlers for the Screening API.

use anyhow::anyhow;
use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extract::extract_text;
use crate::feedback::{feedback_or_placeholder, FeedbackRequest};
use crate::models::role::RoleCategory;
use crate::state::AppState;

/// Multipart field carrying the résumé document.
pub const RESUME_FIELD: &str = "resume";

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub role: RoleCategory,
    pub match_percentage: f64,
    pub ai_feedback: String,
    pub filename: String,
}

struct Upload {
    filename: String,
    bytes: Bytes,
}

/// POST /predict
///
/// Upload → store → extract → classify → score → feedback.
pub async fn handle_predict(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PredictResponse>, AppError> {
    let upload = read_resume_field(multipart).await?;
    let stored = state.uploads.save(&upload.filename, &upload.bytes).await?;

    let path = stored.path.clone();
    let extracted = tokio::task::spawn_blocking(move || extract_text(&path))
        .await
        .map_err(|e| AppError::Internal(anyhow!("extraction task failed: {e}")));
    state.uploads.release(&stored).await;
    let raw_text = extracted??;

    let screening = state.inference.screen(&raw_text)?;

    info!(
        key = %stored.key,
        chars = raw_text.len(),
        role = %screening.role,
        match_percentage = screening.match_percentage,
        "Resume screened"
    );

    let ai_feedback = feedback_or_placeholder(
        state.feedback.as_ref(),
        &FeedbackRequest {
            resume_text: &screening.cleaned_text,
            role: screening.role,
            match_percentage: screening.match_percentage,
        },
    )
    .await;

    Ok(Json(PredictResponse {
        role: screening.role,
        match_percentage: screening.match_percentage,
        ai_feedback,
        filename: upload.filename,
    }))
}

/// Finds the `resume` field and reads it fully. Other fields are skipped.
async fn read_resume_field(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.trim().is_empty() {
            return Err(AppError::Validation("No file selected".to_string()));
        }

        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }

        return Ok(Upload { filename, bytes });
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}
