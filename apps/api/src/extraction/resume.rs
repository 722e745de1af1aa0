//! Resume extractor. Total experience is computed locally from the date
//! ranges in the text; the model only supplies the remaining fields.

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::extraction::prompts::{EXTRACT_SYSTEM, RESUME_EXTRACT_PROMPT_TEMPLATE};
use crate::llm_client::prompts::FIXED_SCHEMA_RULES;
use crate::llm_client::{parse_json_object, LlmClient};
use crate::models::bundle::{
    empty_resume_schema, ResumeAttributes, RAW_TEXT, TOTAL_EXPERIENCE_MONTHS,
    YEARS_OF_EXPERIENCE,
};
use crate::scoring::experience::{parse_duration_months, ExperienceDuration};

pub async fn extract_resume_attributes(
    resume_text: &str,
    llm: &LlmClient,
) -> Result<ResumeAttributes, AppError> {
    let total = parse_duration_months(resume_text);
    debug!("Resume experience from date ranges: {total}");

    let prompt = RESUME_EXTRACT_PROMPT_TEMPLATE
        .replace("{rules}", FIXED_SCHEMA_RULES)
        .replace("{experience}", &total.to_string())
        .replace("{resume_text}", resume_text);

    let reply = llm
        .call_text(&prompt, EXTRACT_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Resume extraction failed: {e}")))?;

    resume_from_reply(&reply, resume_text, total)
}

/// Builds the bundle from the model's reply, overwriting whatever experience
/// the model reported with the locally computed `total`.
pub fn resume_from_reply(
    reply: &str,
    resume_text: &str,
    total: ExperienceDuration,
) -> Result<ResumeAttributes, AppError> {
    let mut value = parse_json_object(reply).unwrap_or_else(|e| {
        warn!("Resume extraction reply had no usable JSON ({e}), using empty schema");
        empty_resume_schema()
    });

    if let Value::Object(obj) = &mut value {
        obj.insert(YEARS_OF_EXPERIENCE.to_string(), json!(total.to_string()));
        obj.insert(TOTAL_EXPERIENCE_MONTHS.to_string(), json!(total.months()));
        obj.insert(RAW_TEXT.to_string(), json!(resume_text));
    }

    Ok(ResumeAttributes::from_value(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bundle::{JdAttributes, ListEntry};
    use crate::scoring::evaluate;
    use crate::scoring::weights::ScoringConfig;

    const RESUME_TEXT: &str = "Backend Engineer, Acme (Jan 2020 - Dec 2022)\nSkills: Rust, Go";

    #[test]
    fn test_computed_experience_overrides_model_value() {
        let reply = r#"{
            "Key Skills": "Rust, Go, rust",
            "Notice Period": "15 days",
            "Location": "Berlin",
            "Degrees": [{"degree": "M.Sc. Informatics", "institute": "TU Berlin"}],
            "Courses": [],
            "Interpersonal Skills": ["Mentoring"],
            "Awards": [],
            "Years of Experience": "10 years"
        }"#;
        let resume = resume_from_reply(reply, RESUME_TEXT, ExperienceDuration(36)).unwrap();

        assert_eq!(resume.experience, "3 years 0 months");
        assert_eq!(resume.total_experience, ExperienceDuration(36));
        assert_eq!(resume.key_skills, vec!["Rust", "Go"]);
        assert_eq!(resume.raw_text, RESUME_TEXT);
        assert_eq!(resume.degrees[0].display_name(), "M.Sc. Informatics");
        assert_eq!(resume.interpersonal_skills, vec![ListEntry::from("Mentoring")]);
    }

    #[test]
    fn test_reply_without_json_keeps_computed_fields() {
        let resume =
            resume_from_reply("Sorry, no resume found.", RESUME_TEXT, ExperienceDuration(8))
                .unwrap();
        assert!(resume.key_skills.is_empty());
        assert_eq!(resume.notice_period.as_deref(), Some(""));
        assert_eq!(resume.experience, "8 months");
        assert_eq!(resume.raw_text, RESUME_TEXT);
    }

    #[test]
    fn test_fallback_resume_passes_notice_check() {
        let resume =
            resume_from_reply("Sorry, I cannot parse this.", RESUME_TEXT, ExperienceDuration(36))
                .unwrap();
        let jd = JdAttributes::from_value(&json!({"Notice Period": "15 days"})).unwrap();

        let card = evaluate(&jd, &resume, &[], &ScoringConfig::default()).unwrap();
        assert_eq!(card.attribute_scores.notice_period, 100.0);
    }

    #[test]
    fn test_invalid_list_shape_is_rejected() {
        let reply = r#"{"Degrees": [true]}"#;
        let err = resume_from_reply(reply, RESUME_TEXT, ExperienceDuration(0)).unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }
}
