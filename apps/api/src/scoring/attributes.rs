//! Attribute scoring: five independent sub-scorers, each producing 0–100.
//!
//! | Attribute           | Rule                                                        |
//! |---------------------|-------------------------------------------------------------|
//! | Skills              | matched / JD skills × 100 (100 when the JD lists none)      |
//! | Experience          | resume years vs JD years; zero resume experience scores 0   |
//! | Location            | remote JD or overlap → 100, differing cities → 50           |
//! | Notice Period       | resume ≤ JD → 100; unknown resume notice is ignored (100)   |
//! | Other Requirements  | four categories worth 0 / 15 / 25 each, summed              |

use std::collections::HashSet;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::models::bundle::{comparable_names, JdAttributes, ListEntry, ResumeAttributes};
use crate::scoring::experience::extract_years;
use crate::scoring::fuzzy::{best_match, fuzzy_match};
use crate::scoring::weights::{AttributeWeights, FuzzyThreshold};

/// Notice period assumed when a JD has no notice key at all.
const DEFAULT_JD_NOTICE_DAYS: u64 = 30;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Skills,
    Experience,
    Location,
    NoticePeriod,
    OtherRequirements,
}

impl Attribute {
    /// Report order.
    pub const ALL: [Attribute; 5] = [
        Attribute::Skills,
        Attribute::Experience,
        Attribute::Location,
        Attribute::NoticePeriod,
        Attribute::OtherRequirements,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Attribute::Skills => "Skills Match",
            Attribute::Experience => "Experience Match",
            Attribute::Location => "Location Match",
            Attribute::NoticePeriod => "Notice Period Match",
            Attribute::OtherRequirements => "Other Requirements Match",
        }
    }

    pub fn weight(&self, weights: &AttributeWeights) -> f64 {
        match self {
            Attribute::Skills => weights.skills,
            Attribute::Experience => weights.experience,
            Attribute::Location => weights.location,
            Attribute::NoticePeriod => weights.notice_period,
            Attribute::OtherRequirements => weights.other_requirements,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One score per attribute, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttributeScores {
    #[serde(rename = "Skills Match")]
    pub skills: f64,
    #[serde(rename = "Experience Match")]
    pub experience: f64,
    #[serde(rename = "Location Match")]
    pub location: f64,
    #[serde(rename = "Notice Period Match")]
    pub notice_period: f64,
    #[serde(rename = "Other Requirements Match")]
    pub other_requirements: f64,
}

impl AttributeScores {
    pub fn get(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Skills => self.skills,
            Attribute::Experience => self.experience,
            Attribute::Location => self.location,
            Attribute::NoticePeriod => self.notice_period,
            Attribute::OtherRequirements => self.other_requirements,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, f64)> + '_ {
        Attribute::ALL.into_iter().map(|a| (a, self.get(a)))
    }
}

/// Score of one Other Requirements category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubScore {
    Unmatched,
    Partial,
    Full,
}

impl SubScore {
    pub const MAX: f64 = 25.0;

    pub fn value(&self) -> f64 {
        match self {
            SubScore::Unmatched => 0.0,
            SubScore::Partial => 15.0,
            SubScore::Full => 25.0,
        }
    }
}

impl Serialize for SubScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.value() as u8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtherCategory {
    Degrees,
    Courses,
    InterpersonalSkills,
    Awards,
}

impl OtherCategory {
    pub const ALL: [OtherCategory; 4] = [
        OtherCategory::Degrees,
        OtherCategory::Courses,
        OtherCategory::InterpersonalSkills,
        OtherCategory::Awards,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OtherCategory::Degrees => "Degrees",
            OtherCategory::Courses => "Courses",
            OtherCategory::InterpersonalSkills => "Interpersonal Skills",
            OtherCategory::Awards => "Awards",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OtherBreakdown {
    #[serde(rename = "Degrees")]
    pub degrees: SubScore,
    #[serde(rename = "Courses")]
    pub courses: SubScore,
    #[serde(rename = "Interpersonal Skills")]
    pub interpersonal_skills: SubScore,
    #[serde(rename = "Awards")]
    pub awards: SubScore,
}

impl OtherBreakdown {
    pub fn get(&self, category: OtherCategory) -> SubScore {
        match category {
            OtherCategory::Degrees => self.degrees,
            OtherCategory::Courses => self.courses,
            OtherCategory::InterpersonalSkills => self.interpersonal_skills,
            OtherCategory::Awards => self.awards,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (OtherCategory, SubScore)> + '_ {
        OtherCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    pub fn total(&self) -> f64 {
        self.iter().map(|(_, s)| s.value()).sum()
    }
}

/// Which JD skills the resume covers, in JD order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchResult {
    entries: Vec<(String, bool)>,
}

impl MatchResult {
    /// `matched_skills` must already be validated against `jd_skills`;
    /// membership is case-insensitive.
    pub fn new(jd_skills: &[String], matched_skills: &[String]) -> Self {
        let matched: HashSet<String> = matched_skills.iter().map(|s| s.to_lowercase()).collect();
        let entries = jd_skills
            .iter()
            .map(|skill| (skill.clone(), matched.contains(&skill.to_lowercase())))
            .collect();
        Self { entries }
    }

    pub fn matched_count(&self) -> usize {
        self.entries.iter().filter(|(_, m)| *m).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn missing(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, m)| !m)
            .map(|(s, _)| s.clone())
            .collect()
    }
}

impl Serialize for MatchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (skill, matched) in &self.entries {
            map.serialize_entry(skill, matched)?;
        }
        map.end()
    }
}

/// Everything the attribute pass produces for one JD/resume pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeEvaluation {
    pub scores: AttributeScores,
    pub other_breakdown: OtherBreakdown,
    pub match_result: MatchResult,
    pub missing_skills: Vec<String>,
    pub matched_other_requirements: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Scores all five attributes. Pure: identical inputs give identical output.
pub fn score_attributes(
    jd: &JdAttributes,
    resume: &ResumeAttributes,
    matched_skills: &[String],
    threshold: FuzzyThreshold,
) -> AttributeEvaluation {
    let match_result = MatchResult::new(&jd.key_skills, matched_skills);
    let (other_breakdown, matched_other_requirements) =
        other_requirements_breakdown(jd, resume, threshold);

    let scores = AttributeScores {
        skills: skills_score(&match_result),
        experience: experience_score(&jd.experience, &resume.experience),
        location: location_score(&jd.location, &resume.location),
        notice_period: notice_period_score(
            jd.notice_period.as_deref(),
            resume.notice_period.as_deref(),
        ),
        other_requirements: other_breakdown.total(),
    };

    AttributeEvaluation {
        scores,
        other_breakdown,
        missing_skills: match_result.missing(),
        match_result,
        matched_other_requirements,
    }
}

/// Maps each reported skill to its closest JD skill and drops the ones with
/// no JD skill within `threshold`. The result uses JD spelling, in
/// first-seen order, without duplicates. Guards against matchers that
/// report skills the JD never asked for.
pub fn retain_jd_skills(
    matched_skills: &[String],
    jd_skills: &[String],
    threshold: FuzzyThreshold,
) -> Vec<String> {
    let mut seen = HashSet::new();
    matched_skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| best_match(s, jd_skills, threshold))
        .filter(|jd_skill| seen.insert(jd_skill.to_lowercase()))
        .cloned()
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Sub-scorers
// ────────────────────────────────────────────────────────────────────────────

pub fn skills_score(match_result: &MatchResult) -> f64 {
    if match_result.is_empty() {
        return 100.0;
    }
    round2(match_result.matched_count() as f64 / match_result.len() as f64 * 100.0)
}

/// Zero resume experience scores 0 even when the JD states no requirement.
pub fn experience_score(jd_experience: &str, resume_experience: &str) -> f64 {
    let jd_years = extract_years(jd_experience);
    let resume_years = extract_years(resume_experience);

    let score = if jd_years == 0.0 && resume_years > 0.0 {
        100.0
    } else if resume_years == 0.0 {
        0.0
    } else if resume_years >= jd_years {
        100.0
    } else {
        resume_years / jd_years * 100.0
    };
    round2(score)
}

pub fn location_score(jd_location: &str, resume_location: &str) -> f64 {
    let jd = jd_location.trim().to_lowercase();
    let resume = resume_location.trim().to_lowercase();

    if jd.contains("remote") {
        return 100.0;
    }
    if resume.is_empty() {
        return 0.0;
    }
    if resume.contains("remote") {
        return 100.0;
    }

    let overlaps = jd
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .any(|l| resume.contains(l) || l.contains(resume.as_str()));

    if overlaps {
        100.0
    } else if !jd.is_empty() && jd != resume {
        50.0
    } else {
        0.0
    }
}

/// A resume notice that is absent or has no digits is ignored (100). A JD
/// with no notice key defaults to 30 days; JD text without digits is an
/// unbounded notice period.
pub fn notice_period_score(jd_notice: Option<&str>, resume_notice: Option<&str>) -> f64 {
    let Some(resume) = resume_notice.and_then(notice_days) else {
        return 100.0;
    };
    let jd = match jd_notice {
        Some(text) => notice_days(text),
        None => Some(DEFAULT_JD_NOTICE_DAYS),
    };

    match jd {
        Some(limit) if resume > limit => 0.0,
        _ => 100.0,
    }
}

/// Leading digit run of the notice text; `None` when there is none.
fn notice_days(text: &str) -> Option<u64> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn other_requirements_breakdown(
    jd: &JdAttributes,
    resume: &ResumeAttributes,
    threshold: FuzzyThreshold,
) -> (OtherBreakdown, Vec<String>) {
    let other = &jd.other_requirements;
    let mut matched = Vec::new();

    let breakdown = OtherBreakdown {
        degrees: first_match_score(&other.degrees, &resume.degrees, threshold, &mut matched),
        courses: first_match_score(&other.courses, &resume.courses, threshold, &mut matched),
        interpersonal_skills: coverage_score(
            &other.interpersonal_skills,
            &resume.interpersonal_skills,
            threshold,
            &mut matched,
        ),
        awards: first_match_score(&other.awards, &resume.awards, threshold, &mut matched),
    };

    let mut seen = HashSet::new();
    matched.retain(|m| seen.insert(m.clone()));
    (breakdown, matched)
}

/// Degrees, courses and awards: any JD entry found on the resume is full
/// credit; a resume with unrelated entries gets partial credit.
fn first_match_score(
    jd_entries: &[ListEntry],
    resume_entries: &[ListEntry],
    threshold: FuzzyThreshold,
    matched: &mut Vec<String>,
) -> SubScore {
    let jd = comparable_names(jd_entries);
    let resume = comparable_names(resume_entries);

    if jd.is_empty() {
        return if resume.is_empty() {
            SubScore::Unmatched
        } else {
            SubScore::Full
        };
    }

    if let Some(hit) = jd.iter().find(|j| fuzzy_match(j, &resume, threshold)) {
        matched.push(hit.clone());
        SubScore::Full
    } else if !resume.is_empty() {
        SubScore::Partial
    } else {
        SubScore::Unmatched
    }
}

/// Interpersonal skills: full credit only when every JD skill is covered.
fn coverage_score(
    jd_entries: &[ListEntry],
    resume_entries: &[ListEntry],
    threshold: FuzzyThreshold,
    matched: &mut Vec<String>,
) -> SubScore {
    let jd = comparable_names(jd_entries);
    let resume = comparable_names(resume_entries);

    if jd.is_empty() {
        return if resume.is_empty() {
            SubScore::Unmatched
        } else {
            SubScore::Full
        };
    }

    let hits: Vec<&String> = jd
        .iter()
        .filter(|j| fuzzy_match(j, &resume, threshold))
        .collect();
    matched.extend(hits.iter().map(|h| (*h).clone()));

    if hits.len() == jd.len() {
        SubScore::Full
    } else if !hits.is_empty() {
        SubScore::Partial
    } else {
        SubScore::Unmatched
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
