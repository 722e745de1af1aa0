//! Match pipeline: one extraction pass for both documents, then skill
//! matching, scoring and optional recruiter feedback over the same bundles.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::MatchingBackend;
use crate::matching::feedback::{build_feedback_prompt, FEEDBACK_SYSTEM};
use crate::models::bundle::{JdAttributes, ResumeAttributes};
use crate::scoring::weights::ScoringConfig;
use crate::scoring::{evaluate, ScoreCard};

#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub scoring: ScoringConfig,
    pub feedback_enabled: bool,
}

/// Everything produced for one JD/resume pair.
#[derive(Debug, Serialize)]
pub struct MatchOutcome {
    pub request_id: Uuid,
    pub jd_summary: JdAttributes,
    pub resume_summary: ResumeAttributes,
    #[serde(flatten)]
    pub score: ScoreCard,
    pub comments: String,
}

pub async fn run_match(
    backend: &dyn MatchingBackend,
    options: PipelineOptions,
    jd_text: &str,
    resume_text: &str,
) -> Result<MatchOutcome, AppError> {
    if jd_text.trim().is_empty() {
        return Err(AppError::Validation("Job description is empty".to_string()));
    }
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation("Resume text is empty".to_string()));
    }

    let request_id = Uuid::new_v4();
    info!(%request_id, backend = backend.name(), "Starting match");

    let (jd, resume) = tokio::try_join!(
        backend.extract_jd(jd_text),
        backend.extract_resume(resume_text)
    )?;
    info!(
        %request_id,
        jd_skills = jd.key_skills.len(),
        resume_skills = resume.key_skills.len(),
        experience = %resume.total_experience,
        "Extracted attributes"
    );

    let matched = backend
        .match_skills(
            &jd.key_skills,
            &resume.key_skills,
            options.scoring.fuzzy_threshold,
        )
        .await?;

    let score = evaluate(&jd, &resume, &matched, &options.scoring)?;
    info!(
        %request_id,
        matched = score.matched_skills.len(),
        final_score = score.final_score,
        rating = %score.rating,
        "Scored candidate"
    );

    let comments = if options.feedback_enabled {
        let prompt = build_feedback_prompt(&jd, &resume, &score);
        match backend.write_feedback(&prompt, FEEDBACK_SYSTEM).await {
            Ok(text) => text,
            Err(e) => {
                warn!(%request_id, "Feedback generation failed, returning empty comments: {e}");
                String::new()
            }
        }
    } else {
        String::new()
    };

    Ok(MatchOutcome {
        request_id,
        jd_summary: jd,
        resume_summary: resume,
        score,
        comments,
    })
}
