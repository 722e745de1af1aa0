use serde::{Deserialize, Serialize};

use crate::scoring::ScoringError;

/// Per-attribute weights used by the aggregator. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeWeights {
    pub skills: f64,
    pub experience: f64,
    pub location: f64,
    pub notice_period: f64,
    pub other_requirements: f64,
}

impl Default for AttributeWeights {
    fn default() -> Self {
        Self {
            skills: 0.35,
            experience: 0.25,
            location: 0.15,
            notice_period: 0.10,
            other_requirements: 0.15,
        }
    }
}

impl AttributeWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.location + self.notice_period + self.other_requirements
    }
}

/// Score cutoffs for the discrete rating buckets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingCutoffs {
    pub strong: f64,
    pub moderate: f64,
}

impl Default for RatingCutoffs {
    fn default() -> Self {
        Self {
            strong: 80.0,
            moderate: 50.0,
        }
    }
}

/// Everything tunable about the scoring engine. Passed explicitly into every
/// scorer call; nothing in `scoring` reads globals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ScoringConfig {
    pub fuzzy_threshold: FuzzyThreshold,
    pub weights: AttributeWeights,
    pub cutoffs: RatingCutoffs,
}

/// Minimum similarity ratio for two strings to count as the same entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FuzzyThreshold(pub f64);

impl Default for FuzzyThreshold {
    fn default() -> Self {
        Self(0.7)
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ScoringError> {
        let threshold = self.fuzzy_threshold.0;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ScoringError::InvalidConfig(format!(
                "fuzzy threshold must lie in [0, 1], got {threshold}"
            )));
        }

        let w = &self.weights;
        let all = [
            ("skills", w.skills),
            ("experience", w.experience),
            ("location", w.location),
            ("notice_period", w.notice_period),
            ("other_requirements", w.other_requirements),
        ];
        if let Some((name, value)) = all.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(ScoringError::InvalidConfig(format!(
                "weight '{name}' must be a non-negative number, got {value}"
            )));
        }
        if (w.sum() - 1.0).abs() > 1e-6 {
            return Err(ScoringError::InvalidConfig(format!(
                "weights must sum to 1.0, got {}",
                w.sum()
            )));
        }

        let c = &self.cutoffs;
        if let Some((name, value)) = [("strong", c.strong), ("moderate", c.moderate)]
            .iter()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(ScoringError::InvalidConfig(format!(
                "{name} cutoff must be a finite number, got {value}"
            )));
        }
        if self.cutoffs.moderate > self.cutoffs.strong {
            return Err(ScoringError::InvalidConfig(format!(
                "moderate cutoff ({}) exceeds strong cutoff ({})",
                self.cutoffs.moderate, self.cutoffs.strong
            )));
        }

        Ok(())
    }
}
