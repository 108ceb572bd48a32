//! Axum route handlers for the Analysis API.
//!
//! One analyze action runs the whole pipeline in order:
//! extract text → build prompt → model call → tolerant parse → store in session.
//! Extraction and model failures stop the pipeline; parse problems never do.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::parser::{parse_response, ParseDegraded};
use crate::analysis::prompts::build_analysis_prompt;
use crate::analysis::result::AnalysisResult;
use crate::analysis::session::StoredAnalysis;
use crate::errors::AppError;
use crate::extraction::{extract_text_blocking, UploadedFile};
use crate::presentation::tabs::{
    industry_tab, insights_tab, interview_tab, overview_tab, IndustryTab, InsightsTab,
    InterviewTab, OverviewTab,
};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "job_description";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeQuery {
    /// Include the raw and cleaned model reply in the response.
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub file_name: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct DebugInfo {
    pub raw_response: String,
    pub cleaned_response: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub analysis: AnalysisResult,
    pub warnings: Vec<String>,
    pub overview: OverviewTab,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugInfo>,
}

/// Fields of an analyze/preview upload.
#[derive(Debug, Default)]
struct UploadForm {
    resume: Option<UploadedFile>,
    job_description: Option<String>,
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content = field.bytes().await?;
                form.resume = Some(UploadedFile::new(file_name, content));
            }
            Some(JOB_DESCRIPTION_FIELD) => {
                form.job_description = Some(field.text().await?);
            }
            other => warn!("Ignoring unexpected upload field {other:?}"),
        }
    }

    Ok(form)
}

fn require_resume(form: &mut UploadForm) -> Result<UploadedFile, AppError> {
    form.resume
        .take()
        .ok_or_else(|| AppError::Validation("a resume file is required".to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/preview
///
/// Extracts and returns the resume text without calling the model.
pub async fn handle_preview(multipart: Multipart) -> Result<Json<PreviewResponse>, AppError> {
    let mut form = read_upload_form(multipart).await?;
    let resume = require_resume(&mut form)?;
    let file_name = resume.file_name.clone();

    let text = extract_text_blocking(resume).await?;

    Ok(Json(PreviewResponse { file_name, text }))
}

/// POST /api/v1/analyze
///
/// Runs a full analysis and makes it the session's current analysis.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeQuery>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut form = read_upload_form(multipart).await?;
    let resume = require_resume(&mut form)?;
    let job_description = form
        .job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| AppError::Validation("job_description cannot be empty".to_string()))?;

    let file_name = resume.file_name.clone();
    let resume_text = extract_text_blocking(resume).await?;
    info!(
        file = %file_name,
        resume_chars = resume_text.len(),
        jd_chars = job_description.len(),
        "Starting analysis"
    );

    let prompt = build_analysis_prompt(&resume_text, &job_description);
    let raw = state.generator.generate(&prompt).await?;

    let outcome = parse_response(&raw);
    let warnings = outcome.warnings();
    let stored = StoredAnalysis::new(file_name, outcome.result.clone(), warnings.clone());
    let analysis_id = stored.analysis_id;
    let analyzed_at = stored.analyzed_at;
    state.session.replace(stored).await;

    let defaulted = outcome.diagnostics.iter().any(ParseDegraded::is_total);
    info!(%analysis_id, warnings = warnings.len(), defaulted, "Analysis complete");

    let debug = query.debug.then(|| DebugInfo {
        raw_response: raw,
        cleaned_response: outcome.cleaned,
    });

    Ok(Json(AnalyzeResponse {
        analysis_id,
        analyzed_at,
        overview: overview_tab(&outcome.result),
        analysis: outcome.result,
        warnings,
        debug,
    }))
}

async fn current_analysis(state: &AppState) -> Result<StoredAnalysis, AppError> {
    state
        .session
        .current()
        .await
        .ok_or_else(|| AppError::NotFound("no analysis has been run in this session".to_string()))
}

/// GET /api/v1/analysis
pub async fn handle_get_analysis(
    State(state): State<AppState>,
) -> Result<Json<StoredAnalysis>, AppError> {
    Ok(Json(current_analysis(&state).await?))
}

/// GET /api/v1/analysis/overview
pub async fn handle_overview_tab(
    State(state): State<AppState>,
) -> Result<Json<OverviewTab>, AppError> {
    let stored = current_analysis(&state).await?;
    Ok(Json(overview_tab(&stored.analysis)))
}

/// GET /api/v1/analysis/insights
pub async fn handle_insights_tab(
    State(state): State<AppState>,
) -> Result<Json<InsightsTab>, AppError> {
    let stored = current_analysis(&state).await?;
    Ok(Json(insights_tab(&stored.analysis)))
}

/// GET /api/v1/analysis/interview-prep
pub async fn handle_interview_tab(
    State(state): State<AppState>,
) -> Result<Json<InterviewTab>, AppError> {
    let stored = current_analysis(&state).await?;
    Ok(Json(interview_tab(&stored.analysis)))
}

/// GET /api/v1/analysis/industry
pub async fn handle_industry_tab(
    State(state): State<AppState>,
) -> Result<Json<IndustryTab>, AppError> {
    let stored = current_analysis(&state).await?;
    Ok(Json(industry_tab(&stored.analysis)))
}
