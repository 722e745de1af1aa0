//! External collaborators of the scoring engine: attribute extraction,
//! semantic skill matching, recruiter feedback and PDF reading.
//!
//! The pipeline talks to them through `MatchingBackend`, carried in
//! `AppState` as `Arc<dyn MatchingBackend>`. `LlmBackend` is the production
//! implementation; tests swap in a canned one.

pub mod jd;
pub mod pdf;
pub mod prompts;
pub mod resume;
pub mod skills;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::bundle::{JdAttributes, ResumeAttributes};
use crate::scoring::weights::FuzzyThreshold;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait MatchingBackend: Send + Sync {
    async fn extract_jd(&self, jd_text: &str) -> Result<JdAttributes, AppError>;

    async fn extract_resume(&self, resume_text: &str) -> Result<ResumeAttributes, AppError>;

    /// JD skills covered by the resume. Implementations must only return
    /// entries that fuzzy-match a JD skill at `threshold`.
    async fn match_skills(
        &self,
        jd_skills: &[String],
        resume_skills: &[String],
        threshold: FuzzyThreshold,
    ) -> Result<Vec<String>, AppError>;

    /// Free-text recruiter feedback for a fully built prompt.
    async fn write_feedback(&self, prompt: &str, system: &str) -> Result<String, AppError>;

    /// Short identifier logged with each request.
    fn name(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmBackend: Claude-backed implementation
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmBackend {
    llm: LlmClient,
}

impl LlmBackend {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl MatchingBackend for LlmBackend {
    async fn extract_jd(&self, jd_text: &str) -> Result<JdAttributes, AppError> {
        jd::extract_jd_attributes(jd_text, &self.llm).await
    }

    async fn extract_resume(&self, resume_text: &str) -> Result<ResumeAttributes, AppError> {
        resume::extract_resume_attributes(resume_text, &self.llm).await
    }

    async fn match_skills(
        &self,
        jd_skills: &[String],
        resume_skills: &[String],
        threshold: FuzzyThreshold,
    ) -> Result<Vec<String>, AppError> {
        skills::find_common_skills(jd_skills, resume_skills, &self.llm, threshold).await
    }

    async fn write_feedback(&self, prompt: &str, system: &str) -> Result<String, AppError> {
        self.llm
            .call_text(prompt, system)
            .await
            .map_err(|e| AppError::Llm(format!("Feedback generation failed: {e}")))
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Canned backend for pipeline and router tests
// ────────────────────────────────────────────────────────────────────────────
