//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::analysis::engine::AnalysisReport;
use crate::auth::{AuthUser, MaybeUser};
use crate::errors::AppError;
use crate::extraction::UploadedDocument;
use crate::models::analysis::AnalysisSummary;
use crate::state::AppState;
use crate::storage::NewAnalysis;

const DEFAULT_UPLOAD_NAME: &str = "resume";
const DEFAULT_TEXT_NAME: &str = "pasted-resume";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub resume_text: String,
    pub job_description: String,
    pub resume_name: Option<String>,
}

/// `id` and `created_at` are present only when the analysis was stored.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub resume_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub report: AnalysisReport,
}

#[derive(Debug, Serialize)]
pub struct AnalysisListResponse {
    pub analyses: Vec<AnalysisSummary>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisDetailResponse {
    pub id: Uuid,
    pub resume_name: String,
    pub created_at: DateTime<Utc>,
    pub report: Value,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart upload: `file` (PDF or plain text résumé) and `job_description`.
/// Without `x-user-id` the report is returned but not stored.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut document: Option<UploadedDocument> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {}", e.body_text())))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read file: {}", e.body_text())))?;
                document = Some(UploadedDocument {
                    file_name,
                    content_type,
                    data,
                });
            }
            Some("job_description") => {
                job_description = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("failed to read job_description: {}", e.body_text()))
                })?);
            }
            _ => {}
        }
    }

    let document =
        document.ok_or_else(|| AppError::Validation("file part is required".to_string()))?;
    let job_description = job_description
        .ok_or_else(|| AppError::Validation("job_description part is required".to_string()))?;
    validate_job_description(&job_description)?;

    let resume_name = document
        .file_name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_UPLOAD_NAME.to_string());
    let resume_text = state.extractor.extract_text(document).await?;

    run_analysis(&state, user, resume_name, resume_text, job_description).await
}

/// POST /api/v1/analyze/text
///
/// Same pipeline as the upload endpoint for résumés already in text form.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    validate_job_description(&request.job_description)?;

    let resume_name = request
        .resume_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TEXT_NAME.to_string());

    run_analysis(&state, user, resume_name, request.resume_text, request.job_description).await
}

/// GET /api/v1/analyses
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<AnalysisListResponse>, AppError> {
    let analyses = state.store.list(&user.owner).await?;
    Ok(Json(AnalysisListResponse { analyses }))
}

/// GET /api/v1/analyses/:id
///
/// Analyses owned by someone else are reported as not found.
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisDetailResponse>, AppError> {
    let row = state
        .store
        .get(&user.owner, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("analysis {id} not found")))?;

    Ok(Json(AnalysisDetailResponse {
        id: row.id,
        resume_name: row.resume_name,
        created_at: row.created_at,
        report: row.report,
    }))
}

/// DELETE /api/v1/analyses/:id
pub async fn handle_delete_analysis(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete(&user.owner, id).await? {
        return Err(AppError::NotFound(format!("analysis {id} not found")));
    }
    info!(analysis_id = %id, "Analysis deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn validate_job_description(job_description: &str) -> Result<(), AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Scores on the blocking pool, then persists the result when a caller is named.
async fn run_analysis(
    state: &AppState,
    user: Option<AuthUser>,
    resume_name: String,
    resume_text: String,
    job_description: String,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let engine = state.engine.clone();
    let report = tokio::task::spawn_blocking(move || engine.analyze(&resume_text, &job_description))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in analysis: {e}")))?;

    let Some(user) = user else {
        info!(
            match_score = report.match_score,
            readiness = %report.readiness_level,
            "Anonymous analysis completed; not stored"
        );
        return Ok(Json(AnalyzeResponse {
            id: None,
            resume_name,
            created_at: None,
            report,
        }));
    };

    let row = state
        .store
        .insert(NewAnalysis {
            owner: user.owner,
            resume_name,
            report: report.clone(),
        })
        .await?;

    info!(
        analysis_id = %row.id,
        match_score = report.match_score,
        readiness = %report.readiness_level,
        "Analysis completed"
    );

    Ok(Json(AnalyzeResponse {
        id: Some(row.id),
        resume_name: row.resume_name,
        created_at: Some(row.created_at),
        report,
    }))
}
