//! Attribute bundles: the structured form of a job description and a resume
//! as handed to the scoring engine.
//!
//! Bundles are built from loosely-typed JSON (LLM output or API input) by
//! `from_value`, which coerces tolerable shapes, normalizes free text, and
//! rejects structurally invalid data with `ScoringError::InvalidBundle`.

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::scoring::experience::ExperienceDuration;
use crate::scoring::normalize::{
    normalize_experience, normalize_text_field, split_skills,
};
use crate::scoring::ScoringError;

pub const KEY_SKILLS: &str = "Key Skills";
pub const YEARS_OF_EXPERIENCE: &str = "Years of Experience";
pub const NOTICE_PERIOD: &str = "Notice Period";
pub const LOCATION: &str = "Location";
pub const OTHER_REQUIREMENTS: &str = "Other Requirements";
pub const DEGREES: &str = "Degrees";
pub const COURSES: &str = "Courses";
pub const INTERPERSONAL_SKILLS: &str = "Interpersonal Skills";
pub const AWARDS: &str = "Awards";
pub const NOTES: &str = "Notes";
pub const RAW_TEXT: &str = "Raw Text";
pub const TOTAL_EXPERIENCE_MONTHS: &str = "Total Experience Months";

/// Keys probed, in order, for the display name of a structured entry.
const NAME_KEYS: &[&str] = &["degree", "course", "name", "title", "award"];

// ────────────────────────────────────────────────────────────────────────────
// List entries
// ────────────────────────────────────────────────────────────────────────────

/// One item of a Degrees / Courses / Interpersonal Skills / Awards list.
/// Extractors return either bare strings or records such as
/// `{"degree": "B.Tech", "institute": "IIT"}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEntry {
    Plain(String),
    Named(NamedEntry),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedEntry {
    pub name: String,
    /// The full record as received, including the name field.
    pub fields: Map<String, Value>,
}

impl ListEntry {
    pub fn display_name(&self) -> &str {
        match self {
            ListEntry::Plain(s) => s,
            ListEntry::Named(entry) => &entry.name,
        }
    }

    /// Lower-cased, trimmed display name used for fuzzy comparison.
    pub fn comparable(&self) -> String {
        self.display_name().trim().to_lowercase()
    }

    fn from_value(field: &str, value: &Value) -> Result<Self, ScoringError> {
        match value {
            Value::String(s) => Ok(ListEntry::Plain(s.clone())),
            Value::Number(n) => Ok(ListEntry::Plain(n.to_string())),
            Value::Object(fields) => {
                let name = NAME_KEYS
                    .iter()
                    .find_map(|key| fields.get(*key).and_then(Value::as_str))
                    .unwrap_or_default()
                    .to_string();
                Ok(ListEntry::Named(NamedEntry {
                    name,
                    fields: fields.clone(),
                }))
            }
            other => Err(invalid(
                field,
                format!("list entries must be strings or objects, got {}", kind(other)),
            )),
        }
    }
}

impl From<&str> for ListEntry {
    fn from(s: &str) -> Self {
        ListEntry::Plain(s.to_string())
    }
}

impl Serialize for ListEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ListEntry::Plain(s) => serializer.serialize_str(s),
            ListEntry::Named(entry) => entry.fields.serialize(serializer),
        }
    }
}

/// Comparable names of a list, dropping entries that have no name at all.
pub fn comparable_names(entries: &[ListEntry]) -> Vec<String> {
    entries
        .iter()
        .map(ListEntry::comparable)
        .filter(|s| !s.is_empty())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Bundles
// ────────────────────────────────────────────────────────────────────────────

/// Degrees, courses, interpersonal skills and awards requested by a JD.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OtherRequirements {
    #[serde(rename = "Degrees")]
    pub degrees: Vec<ListEntry>,
    #[serde(rename = "Courses")]
    pub courses: Vec<ListEntry>,
    #[serde(rename = "Interpersonal Skills")]
    pub interpersonal_skills: Vec<ListEntry>,
    #[serde(rename = "Awards")]
    pub awards: Vec<ListEntry>,
    /// Free-text requirements that fit none of the lists.
    #[serde(rename = "Notes")]
    pub notes: String,
}

/// Normalized job description attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JdAttributes {
    #[serde(rename = "Key Skills")]
    pub key_skills: Vec<String>,
    #[serde(rename = "Years of Experience")]
    pub experience: String,
    /// `None` when the key was absent; `Some("")` when present but empty.
    #[serde(rename = "Notice Period")]
    pub notice_period: Option<String>,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Other Requirements")]
    pub other_requirements: OtherRequirements,
}

/// Normalized resume attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumeAttributes {
    #[serde(rename = "Key Skills")]
    pub key_skills: Vec<String>,
    #[serde(rename = "Notice Period")]
    pub notice_period: Option<String>,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Degrees")]
    pub degrees: Vec<ListEntry>,
    #[serde(rename = "Courses")]
    pub courses: Vec<ListEntry>,
    #[serde(rename = "Interpersonal Skills")]
    pub interpersonal_skills: Vec<ListEntry>,
    #[serde(rename = "Awards")]
    pub awards: Vec<ListEntry>,
    #[serde(rename = "Years of Experience")]
    pub experience: String,
    #[serde(rename = "Total Experience Months")]
    pub total_experience: ExperienceDuration,
    #[serde(skip_serializing)]
    pub raw_text: String,
}

impl JdAttributes {
    pub fn from_value(value: &Value) -> Result<Self, ScoringError> {
        let obj = as_object("job description", value)?;

        Ok(Self {
            key_skills: skills_field(obj, KEY_SKILLS)?,
            experience: normalize_experience(&string_field(obj, YEARS_OF_EXPERIENCE)?),
            notice_period: optional_string_field(obj, NOTICE_PERIOD)?
                .map(|s| normalize_text_field(&s)),
            location: normalize_text_field(&string_field(obj, LOCATION)?),
            other_requirements: other_requirements_field(obj)?,
        })
    }
}

impl ResumeAttributes {
    pub fn from_value(value: &Value) -> Result<Self, ScoringError> {
        let obj = as_object("resume", value)?;

        let total_experience = match obj.get(TOTAL_EXPERIENCE_MONTHS) {
            None | Some(Value::Null) => ExperienceDuration::default(),
            Some(v) => v
                .as_u64()
                .and_then(|m| u32::try_from(m).ok())
                .map(ExperienceDuration)
                .ok_or_else(|| {
                    invalid(TOTAL_EXPERIENCE_MONTHS, "must be a non-negative integer")
                })?,
        };

        Ok(Self {
            key_skills: skills_field(obj, KEY_SKILLS)?,
            notice_period: optional_string_field(obj, NOTICE_PERIOD)?
                .map(|s| normalize_text_field(&s)),
            location: normalize_text_field(&string_field(obj, LOCATION)?),
            degrees: list_field(obj, DEGREES)?,
            courses: list_field(obj, COURSES)?,
            interpersonal_skills: list_field(obj, INTERPERSONAL_SKILLS)?,
            awards: list_field(obj, AWARDS)?,
            experience: normalize_experience(&string_field(obj, YEARS_OF_EXPERIENCE)?),
            total_experience,
            raw_text: string_field(obj, RAW_TEXT)?,
        })
    }
}

/// The JD schema with every key present and nothing filled in.
pub fn empty_jd_schema() -> Value {
    json!({
        KEY_SKILLS: "",
        YEARS_OF_EXPERIENCE: "",
        NOTICE_PERIOD: "",
        LOCATION: "",
        OTHER_REQUIREMENTS: {
            DEGREES: [],
            COURSES: [],
            INTERPERSONAL_SKILLS: [],
            AWARDS: [],
            NOTES: ""
        }
    })
}

/// The resume schema with every key present and nothing filled in.
pub fn empty_resume_schema() -> Value {
    json!({
        KEY_SKILLS: "",
        NOTICE_PERIOD: "",
        LOCATION: "",
        DEGREES: [],
        COURSES: [],
        INTERPERSONAL_SKILLS: [],
        AWARDS: [],
        YEARS_OF_EXPERIENCE: ""
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Field readers
// ────────────────────────────────────────────────────────────────────────────

fn as_object<'a>(what: &str, value: &'a Value) -> Result<&'a Map<String, Value>, ScoringError> {
    value
        .as_object()
        .ok_or_else(|| invalid(what, format!("expected a JSON object, got {}", kind(value))))
}

/// Missing and null read as "". Numbers are accepted ("5" for `5`).
fn string_field(obj: &Map<String, Value>, key: &str) -> Result<String, ScoringError> {
    Ok(optional_string_field(obj, key)?.unwrap_or_default())
}

fn optional_string_field(
    obj: &Map<String, Value>,
    key: &str,
) -> Result<Option<String>, ScoringError> {
    match obj.get(key) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(String::new())),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(invalid(key, format!("expected text, got {}", kind(other)))),
    }
}

/// A comma/semicolon separated string, or an array of strings.
fn skills_field(obj: &Map<String, Value>, key: &str) -> Result<Vec<String>, ScoringError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(split_skills(s)),
        Some(Value::Array(items)) => {
            let parts = items
                .iter()
                .map(|item| {
                    item.as_str().map(String::from).ok_or_else(|| {
                        invalid(key, format!("skill entries must be text, got {}", kind(item)))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(split_skills(&parts.join(", ")))
        }
        Some(other) => Err(invalid(
            key,
            format!("expected text or a list of text, got {}", kind(other)),
        )),
    }
}

/// An array of entries. A lone string or record is read as a one-item list.
fn list_field(obj: &Map<String, Value>, key: &str) -> Result<Vec<ListEntry>, ScoringError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| ListEntry::from_value(key, item))
            .collect(),
        Some(single) => Ok(vec![ListEntry::from_value(key, single)?]),
    }
}

/// The JD "Other Requirements" value: an object of lists, or plain notes.
fn other_requirements_field(obj: &Map<String, Value>) -> Result<OtherRequirements, ScoringError> {
    match obj.get(OTHER_REQUIREMENTS) {
        None | Some(Value::Null) => Ok(OtherRequirements::default()),
        Some(Value::String(s)) => Ok(OtherRequirements {
            notes: normalize_text_field(s),
            ..OtherRequirements::default()
        }),
        Some(Value::Object(inner)) => Ok(OtherRequirements {
            degrees: list_field(inner, DEGREES)?,
            courses: list_field(inner, COURSES)?,
            interpersonal_skills: list_field(inner, INTERPERSONAL_SKILLS)?,
            awards: list_field(inner, AWARDS)?,
            notes: normalize_text_field(&string_field(inner, NOTES)?),
        }),
        Some(other) => Err(invalid(
            OTHER_REQUIREMENTS,
            format!("expected an object or text, got {}", kind(other)),
        )),
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ScoringError {
    ScoringError::InvalidBundle {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "text",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jd_bundle_is_normalized_on_ingestion() {
        let jd = JdAttributes::from_value(&json!({
            "Key Skills": "Python, python; Java",
            "Years of Experience": "3\u{2013}5",
            "Notice Period": "  30   days ",
            "Location": "Pune,\n Remote",
            "Other Requirements": ""
        }))
        .unwrap();

        assert_eq!(jd.key_skills, vec!["Python", "Java"]);
        assert_eq!(jd.experience, "3-5 years");
        assert_eq!(jd.notice_period.as_deref(), Some("30 days"));
        assert_eq!(jd.location, "Pune, Remote");
        assert_eq!(jd.other_requirements, OtherRequirements::default());
    }

    #[test]
    fn test_jd_other_requirements_object_is_read() {
        let jd = JdAttributes::from_value(&json!({
            "Other Requirements": {
                "Degrees": ["B.Tech in Computer Science"],
                "Interpersonal Skills": ["Communication", "Teamwork"],
                "Notes": "Fintech domain"
            }
        }))
        .unwrap();

        let other = &jd.other_requirements;
        assert_eq!(other.degrees, vec![ListEntry::from("B.Tech in Computer Science")]);
        assert_eq!(other.interpersonal_skills.len(), 2);
        assert!(other.courses.is_empty());
        assert_eq!(other.notes, "Fintech domain");
    }

    #[test]
    fn test_jd_other_requirements_text_becomes_notes() {
        let jd = JdAttributes::from_value(&json!({
            "Other Requirements": "AWS certification preferred"
        }))
        .unwrap();
        assert_eq!(jd.other_requirements.notes, "AWS certification preferred");
        assert!(jd.other_requirements.degrees.is_empty());
    }

    #[test]
    fn test_missing_notice_period_is_none_but_empty_is_some() {
        let absent = JdAttributes::from_value(&json!({})).unwrap();
        assert_eq!(absent.notice_period, None);

        let empty = JdAttributes::from_value(&json!({"Notice Period": ""})).unwrap();
        assert_eq!(empty.notice_period.as_deref(), Some(""));
    }

    #[test]
    fn test_empty_schemas_carry_empty_notice_period() {
        let jd = JdAttributes::from_value(&empty_jd_schema()).unwrap();
        assert_eq!(jd.notice_period.as_deref(), Some(""));
        assert_eq!(jd.other_requirements, OtherRequirements::default());

        let resume = ResumeAttributes::from_value(&empty_resume_schema()).unwrap();
        assert_eq!(resume.notice_period.as_deref(), Some(""));
        assert!(resume.degrees.is_empty());
    }

    #[test]
    fn test_skills_accept_a_list() {
        let jd = JdAttributes::from_value(&json!({"Key Skills": ["Rust", "Go", "rust"]})).unwrap();
        assert_eq!(jd.key_skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_resume_structured_entries_use_display_name() {
        let resume = ResumeAttributes::from_value(&json!({
            "Degrees": [{"degree": "M.Sc Physics", "institute": "IISc", "CGPA/grade": "8.9"}],
            "Courses": [{"course": "Deep Learning", "provider": "Coursera"}, "Rust Basics"],
            "Awards": "Best Paper 2022",
            "Years of Experience": "2 years 6 months",
            "Total Experience Months": 30
        }))
        .unwrap();

        assert_eq!(resume.degrees[0].display_name(), "M.Sc Physics");
        assert_eq!(
            comparable_names(&resume.courses),
            vec!["deep learning", "rust basics"]
        );
        assert_eq!(resume.awards, vec![ListEntry::from("Best Paper 2022")]);
        assert_eq!(resume.experience, "2 years 6 months");
        assert_eq!(resume.total_experience.months(), 30);
    }

    #[test]
    fn test_named_entry_serializes_as_original_record() {
        let entry = ListEntry::from_value(
            DEGREES,
            &json!({"degree": "B.E", "institute": "VIT"}),
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"degree": "B.E", "institute": "VIT"})
        );
    }

    #[test]
    fn test_entries_without_name_are_not_comparable() {
        let entries = vec![
            ListEntry::from_value(DEGREES, &json!({"institute": "VIT"})).unwrap(),
            ListEntry::from("  "),
        ];
        assert!(comparable_names(&entries).is_empty());
    }

    #[test]
    fn test_rejects_non_object_bundle() {
        let err = ResumeAttributes::from_value(&json!(["not", "a", "bundle"])).unwrap_err();
        assert!(err.to_string().contains("resume"));
    }

    #[test]
    fn test_rejects_structured_location() {
        let err = JdAttributes::from_value(&json!({"Location": {"city": "Pune"}})).unwrap_err();
        match err {
            ScoringError::InvalidBundle { field, .. } => assert_eq!(field, LOCATION),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_boolean_list_entry() {
        let err = ResumeAttributes::from_value(&json!({"Degrees": [true]})).unwrap_err();
        assert!(err.to_string().contains(DEGREES));
    }

    #[test]
    fn test_rejects_negative_total_experience() {
        assert!(ResumeAttributes::from_value(&json!({"Total Experience Months": -3})).is_err());
    }
}
