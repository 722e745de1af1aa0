use std::fmt;

use serde::Serialize;

use crate::scoring::attributes::{round2, AttributeScores};
use crate::scoring::weights::{AttributeWeights, RatingCutoffs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rating {
    #[serde(rename = "Strong Match")]
    StrongMatch,
    #[serde(rename = "Moderate Match")]
    ModerateMatch,
    #[serde(rename = "Weak Match")]
    WeakMatch,
}

impl Rating {
    pub fn label(&self) -> &'static str {
        match self {
            Rating::StrongMatch => "Strong Match",
            Rating::ModerateMatch => "Moderate Match",
            Rating::WeakMatch => "Weak Match",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinalScore {
    pub score: f64,
    pub rating: Rating,
}

/// Weighted sum of the attribute scores, rounded to 2 decimals.
pub fn aggregate(
    scores: &AttributeScores,
    weights: &AttributeWeights,
    cutoffs: &RatingCutoffs,
) -> FinalScore {
    let weighted: f64 = scores
        .iter()
        .map(|(attribute, score)| score * attribute.weight(weights))
        .sum();
    let score = round2(weighted).clamp(0.0, 100.0);

    FinalScore {
        score,
        rating: rate(score, cutoffs),
    }
}

pub fn rate(score: f64, cutoffs: &RatingCutoffs) -> Rating {
    if score >= cutoffs.strong {
        Rating::StrongMatch
    } else if score >= cutoffs.moderate {
        Rating::ModerateMatch
    } else {
        Rating::WeakMatch
    }
}
