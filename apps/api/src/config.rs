use std::str::FromStr;

use anyhow::{Context, Result};

use crate::scoring::weights::{AttributeWeights, FuzzyThreshold, RatingCutoffs, ScoringConfig};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or the scoring
/// configuration is invalid.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub scoring: ScoringConfig,
    pub feedback_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = ScoringConfig::default();
        let scoring = ScoringConfig {
            fuzzy_threshold: FuzzyThreshold(env_or(
                "MATCH_FUZZY_THRESHOLD",
                defaults.fuzzy_threshold.0,
            )?),
            weights: AttributeWeights {
                skills: env_or("MATCH_WEIGHT_SKILLS", defaults.weights.skills)?,
                experience: env_or("MATCH_WEIGHT_EXPERIENCE", defaults.weights.experience)?,
                location: env_or("MATCH_WEIGHT_LOCATION", defaults.weights.location)?,
                notice_period: env_or("MATCH_WEIGHT_NOTICE", defaults.weights.notice_period)?,
                other_requirements: env_or(
                    "MATCH_WEIGHT_OTHER",
                    defaults.weights.other_requirements,
                )?,
            },
            cutoffs: RatingCutoffs {
                strong: env_or("MATCH_STRONG_CUTOFF", defaults.cutoffs.strong)?,
                moderate: env_or("MATCH_MODERATE_CUTOFF", defaults.cutoffs.moderate)?,
            },
        };
        scoring.validate().context("Invalid MATCH_* configuration")?;

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: env_or("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            scoring,
            feedback_enabled: env_or("MATCH_FEEDBACK_ENABLED", true)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Parses `key` if set, otherwise returns `default`.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_trims_input() {
        let port: u16 = parse_value("PORT", " 9090 ").unwrap();
        assert_eq!(port, 9090);
        let weight: f64 = parse_value("MATCH_WEIGHT_SKILLS", "0.4").unwrap();
        assert_eq!(weight, 0.4);
    }

    #[test]
    fn test_parse_value_reports_key() {
        let err = parse_value::<bool>("MATCH_FEEDBACK_ENABLED", "maybe").unwrap_err();
        assert!(err.to_string().contains("MATCH_FEEDBACK_ENABLED"));
    }

    #[test]
    fn test_unset_variable_uses_default() {
        let value: f64 = env_or("MATCH_TEST_SURELY_UNSET_VARIABLE", 0.25).unwrap();
        assert_eq!(value, 0.25);
    }
}
