//! Semantic skill matching via the LLM, filtered against the JD so the model
//! can never introduce a skill the JD did not ask for.

use tracing::{debug, warn};

use crate::errors::AppError;
use crate::extraction::prompts::{SKILL_MATCH_PROMPT_TEMPLATE, SKILL_MATCH_SYSTEM};
use crate::llm_client::{parse_json_array, LlmClient};
use crate::scoring::attributes::retain_jd_skills;
use crate::scoring::weights::FuzzyThreshold;

/// JD skills the model considers covered by the resume. Returns `[]` without
/// calling the model when either side is empty.
pub async fn find_common_skills(
    jd_skills: &[String],
    resume_skills: &[String],
    llm: &LlmClient,
    threshold: FuzzyThreshold,
) -> Result<Vec<String>, AppError> {
    if jd_skills.is_empty() || resume_skills.is_empty() {
        return Ok(Vec::new());
    }

    let prompt = SKILL_MATCH_PROMPT_TEMPLATE
        .replace("{jd_skills}", &jd_skills.join(", "))
        .replace("{resume_skills}", &resume_skills.join(", "));

    let reply = match llm.call_text(&prompt, SKILL_MATCH_SYSTEM).await {
        Ok(reply) => reply,
        Err(e) if e.is_malformed_reply() => {
            warn!("Skill matcher returned an unusable reply ({e}), treating as no matches");
            return Ok(Vec::new());
        }
        Err(e) => return Err(AppError::Llm(format!("Skill matching failed: {e}"))),
    };

    Ok(skills_from_reply(&reply, jd_skills, threshold))
}

/// Parses the matched-skill list out of the model's reply and applies the
/// JD guard. Unparseable replies yield no matches.
pub fn skills_from_reply(reply: &str, jd_skills: &[String], threshold: FuzzyThreshold) -> Vec<String> {
    let value = match parse_json_array(reply) {
        Ok(value) => value,
        Err(e) => {
            warn!("Could not parse skill matcher reply ({e}), treating as no matches");
            return Vec::new();
        }
    };

    let candidates: Vec<String> = value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    let kept = retain_jd_skills(&candidates, jd_skills, threshold);
    if kept.len() < candidates.len() {
        debug!(
            "Skill matcher: kept {} of {} reported skills",
            kept.len(),
            candidates.len()
        );
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jd_skills() -> Vec<String> {
        ["Python", "Machine Learning", "AWS", "Docker"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_fenced_reply_is_parsed() {
        let reply = "```json\n[\"Python\", \"AWS\"]\n```";
        assert_eq!(
            skills_from_reply(reply, &jd_skills(), FuzzyThreshold::default()),
            vec!["Python", "AWS"]
        );
    }

    #[test]
    fn test_hallucinated_skills_are_dropped() {
        let reply = r#"["Python", "Kubernetes", "Haskell", "Docker"]"#;
        assert_eq!(
            skills_from_reply(reply, &jd_skills(), FuzzyThreshold::default()),
            vec!["Python", "Docker"]
        );
    }

    #[test]
    fn test_non_string_entries_and_duplicates_are_dropped() {
        let reply = r#"Matched: ["aws", 42, null, "AWS", {"skill": "Docker"}]"#;
        assert_eq!(
            skills_from_reply(reply, &jd_skills(), FuzzyThreshold::default()),
            vec!["AWS"]
        );
    }

    #[test]
    fn test_near_variant_takes_jd_spelling() {
        let reply = r#"["Dockers", "python3"]"#;
        assert_eq!(
            skills_from_reply(reply, &jd_skills(), FuzzyThreshold::default()),
            vec!["Docker", "Python"]
        );
    }

    #[test]
    fn test_unparseable_reply_is_no_matches() {
        assert!(
            skills_from_reply("Python and AWS match.", &jd_skills(), FuzzyThreshold::default())
                .is_empty()
        );
        assert!(
            skills_from_reply("[Python, AWS]", &jd_skills(), FuzzyThreshold::default())
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_empty_inputs_skip_the_model() {
        // An unroutable key: any network call would fail the test.
        let llm = LlmClient::new(String::new());
        let resume = vec!["Python".to_string()];

        let none = find_common_skills(&[], &resume, &llm, FuzzyThreshold::default())
            .await
            .unwrap();
        assert!(none.is_empty());

        let none = find_common_skills(&jd_skills(), &[], &llm, FuzzyThreshold::default())
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
