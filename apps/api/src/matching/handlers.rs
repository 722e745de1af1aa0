//! Axum route handlers for the Match API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::pdf::read_pdf_upload;
use crate::matching::pipeline::{run_match, MatchOutcome, PipelineOptions};
use crate::models::bundle::{JdAttributes, ResumeAttributes};
use crate::scoring::{evaluate, ScoreCard};
use crate::state::AppState;

const JD_FIELD: &str = "job_description";
const RESUME_FIELD: &str = "resume";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub jd: Value,
    pub resume: Value,
    #[serde(default)]
    pub matched_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub jd_summary: JdAttributes,
    pub resume_summary: ResumeAttributes,
    #[serde(flatten)]
    pub score: ScoreCard,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Multipart body: `job_description` (text) and `resume` (PDF file).
pub async fn handle_match(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchOutcome>, AppError> {
    let mut jd_text: Option<String> = None;
    let mut resume_pdf: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            JD_FIELD => {
                jd_text = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Unreadable '{JD_FIELD}' field: {e}"))
                })?);
            }
            RESUME_FIELD => {
                resume_pdf = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Unreadable '{RESUME_FIELD}' field: {e}"))
                })?);
            }
            _ => {}
        }
    }

    let jd_text = jd_text
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| AppError::Validation(format!("'{JD_FIELD}' is required")))?;
    let resume_pdf = resume_pdf
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::Validation(format!("'{RESUME_FIELD}' PDF is required")))?;

    info!("Received match request ({} byte resume)", resume_pdf.len());
    let resume_text = read_pdf_upload(resume_pdf).await?;

    let options = PipelineOptions {
        scoring: state.config.scoring,
        feedback_enabled: state.config.feedback_enabled,
    };
    let outcome = run_match(state.backend.as_ref(), options, &jd_text, &resume_text).await?;
    Ok(Json(outcome))
}

/// POST /api/v1/score
///
/// Scores pre-extracted bundles. No LLM call; `matched_skills` is re-checked
/// against the JD skills before scoring.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(req): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let jd = JdAttributes::from_value(&req.jd)?;
    let resume = ResumeAttributes::from_value(&req.resume)?;
    let score = evaluate(&jd, &resume, &req.matched_skills, &state.config.scoring)?;

    Ok(Json(ScoreResponse {
        jd_summary: jd,
        resume_summary: resume,
        score,
    }))
}
