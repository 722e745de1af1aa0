//! Recruiter feedback prompt, built from an already-computed score card.

use crate::models::bundle::{JdAttributes, ListEntry, ResumeAttributes};
use crate::scoring::ScoreCard;

pub const FEEDBACK_SYSTEM: &str =
    "You are an experienced technical recruiter writing concise, factual candidate feedback. \
    Respond in plain markdown.";

const NOT_SPECIFIED: &str = "Not specified";

pub fn build_feedback_prompt(
    jd: &JdAttributes,
    resume: &ResumeAttributes,
    card: &ScoreCard,
) -> String {
    let scores = &card.attribute_scores;

    format!(
        r#"You are generating a recruiter-facing candidate feedback report. Do not include a title or heading for the report itself.

Candidate Final Score: {final_score:.2}% ({rating})

Detailed Attribute Scores:
- Skills Match: {skills}%
- Experience Match: {experience}%
- Location Match: {location}%
- Notice Period Match: {notice}%
- Other Requirements Match: {other}%

Skills Analysis:
- Matched Skills: {matched}
- Missing Skills: {missing}

Experience:
- JD Requirement: {jd_experience}
- Candidate Experience: {resume_experience}

Notice Period:
- JD Requirement: {jd_notice}
- Candidate Notice Period: {resume_notice}

Education:
- JD Degrees Requirement: {jd_degrees}
- Candidate Degrees: {resume_degrees}
- Candidate Courses/Certifications: {resume_courses}

Instructions for feedback:
1. Write the report in under 200 words.
2. Use exactly 3 sections: Strengths, Weaknesses, Summary.
3. In Strengths:
   - Mention if experience, location, or notice period requirements are matched.
   - Compare the candidate's degrees/certifications with the JD. If they are extra or relevant, highlight as a plus.
   - Mention matching skills explicitly and classify the skills match:
     * >80% : Good skills match
     * 50-80% : Moderate skills match
     * <50% : Poor skills match
4. In Weaknesses:
   - Only mention a weakness if its Attribute Score is less than 100%.
   - Do not mention experience as a weakness if its score is 100%.
   - Focus on the specific skills listed under Missing Skills.
   - Do not mention other requirements like courses or interpersonal skills here.
5. In Summary:
   - Provide a concise recruiter-focused overview balancing strengths and weaknesses.
   - Avoid repetition, keep it professional and precise."#,
        final_score = card.final_score,
        rating = card.rating,
        skills = scores.skills,
        experience = scores.experience,
        location = scores.location,
        notice = scores.notice_period,
        other = scores.other_requirements,
        matched = join_or_none(&card.matched_skills),
        missing = join_or_none(&card.missing_skills),
        jd_experience = or_not_specified(&jd.experience),
        resume_experience = or_not_specified(&resume.experience),
        jd_notice = or_not_specified(jd.notice_period.as_deref().unwrap_or_default()),
        resume_notice = or_not_specified(resume.notice_period.as_deref().unwrap_or_default()),
        jd_degrees = entry_names(&jd.other_requirements.degrees),
        resume_degrees = entry_names(&resume.degrees),
        resume_courses = entry_names(&resume.courses),
    )
}

fn or_not_specified(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_SPECIFIED
    } else {
        value
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

fn entry_names(entries: &[ListEntry]) -> String {
    let names: Vec<String> = entries
        .iter()
        .map(|e| e.display_name().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    join_or_none(&names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::evaluate;
    use crate::scoring::weights::ScoringConfig;
    use serde_json::json;

    #[test]
    fn test_prompt_carries_scores_and_skill_lists() {
        let jd = JdAttributes::from_value(&json!({
            "Key Skills": "Rust, Tokio, gRPC",
            "Years of Experience": "4 years",
            "Location": "Remote",
            "Other Requirements": {"Degrees": ["B.Tech"]}
        }))
        .unwrap();
        let resume = ResumeAttributes::from_value(&json!({
            "Key Skills": "Rust, Tokio",
            "Years of Experience": "5 years 1 months",
            "Degrees": [{"degree": "B.Tech", "institute": "NIT"}]
        }))
        .unwrap();
        let matched = vec!["Rust".to_string(), "Tokio".to_string()];
        let card = evaluate(&jd, &resume, &matched, &ScoringConfig::default()).unwrap();

        let prompt = build_feedback_prompt(&jd, &resume, &card);

        assert!(prompt.contains(&format!("Candidate Final Score: {:.2}%", card.final_score)));
        assert!(prompt.contains("- Matched Skills: Rust, Tokio"));
        assert!(prompt.contains("- Missing Skills: gRPC"));
        assert!(prompt.contains("- JD Requirement: 4 years"));
        assert!(prompt.contains("- Candidate Notice Period: Not specified"));
        assert!(prompt.contains("- Candidate Degrees: B.Tech"));
        assert!(prompt.contains("- Candidate Courses/Certifications: None"));
        assert!(prompt.contains("under 200 words"));
    }
}
