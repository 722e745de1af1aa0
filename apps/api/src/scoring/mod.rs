// Scoring engine: normalized JD + resume bundles and a matched-skill list in,
// attribute scores, final score, rating and a text breakdown out.
// Synchronous and pure. No I/O, no shared state, no LLM calls.

pub mod aggregate;
pub mod attributes;
pub mod experience;
pub mod fuzzy;
pub mod normalize;
pub mod report;
pub mod weights;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::models::bundle::{JdAttributes, ResumeAttributes};
use crate::scoring::aggregate::{aggregate, Rating};
use crate::scoring::attributes::{
    retain_jd_skills, score_attributes, AttributeScores, MatchResult, OtherBreakdown,
};
use crate::scoring::report::build_breakdown;
use crate::scoring::weights::ScoringConfig;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Invalid {field}: {reason}")]
    InvalidBundle { field: String, reason: String },

    #[error("Invalid scoring config: {0}")]
    InvalidConfig(String),
}

/// Complete, immutable result of scoring one JD/resume pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    pub attribute_scores: AttributeScores,
    pub other_breakdown: OtherBreakdown,
    pub final_score: f64,
    pub rating: Rating,
    pub skill_matches: MatchResult,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub matched_other_requirements: Vec<String>,
    pub breakdown: String,
}

/// Scores a JD/resume pair.
///
/// `matched_skills` comes from an external matcher; entries that do not
/// fuzzy-match a JD skill are dropped before scoring.
pub fn evaluate(
    jd: &JdAttributes,
    resume: &ResumeAttributes,
    matched_skills: &[String],
    config: &ScoringConfig,
) -> Result<ScoreCard, ScoringError> {
    config.validate()?;

    let matched_skills = retain_jd_skills(matched_skills, &jd.key_skills, config.fuzzy_threshold);
    let evaluation = score_attributes(jd, resume, &matched_skills, config.fuzzy_threshold);
    let final_score = aggregate(&evaluation.scores, &config.weights, &config.cutoffs);
    let breakdown = build_breakdown(
        &evaluation.scores,
        &final_score,
        Some(&evaluation.other_breakdown),
        &config.weights,
    );

    debug!("Score breakdown:\n{breakdown}");

    Ok(ScoreCard {
        attribute_scores: evaluation.scores,
        other_breakdown: evaluation.other_breakdown,
        final_score: final_score.score,
        rating: final_score.rating,
        skill_matches: evaluation.match_result,
        matched_skills,
        missing_skills: evaluation.missing_skills,
        matched_other_requirements: evaluation.matched_other_requirements,
        breakdown,
    })
}
