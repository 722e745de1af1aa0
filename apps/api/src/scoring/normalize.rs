//! Text normalization for free-text attribute values.
//!
//! All functions are total: empty input yields empty output, nothing panics.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SKILL_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[;,]").unwrap());

/// Tokens that already carry an experience unit; anything else gets " years" appended.
const EXPERIENCE_UNITS: &[&str] = &["year", "yr", "month"];

/// Replaces en/em dashes with hyphens and trims. Appends " years" when no
/// unit is present, so "3-5" becomes "3-5 years".
pub fn normalize_experience(text: &str) -> String {
    let text = replace_dashes(text);
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let lower = text.to_lowercase();
    if EXPERIENCE_UNITS.iter().any(|unit| lower.contains(unit)) {
        text.to_string()
    } else {
        format!("{text} years")
    }
}

/// Splits on `;` or `,`, trims, drops case-insensitive duplicates (first
/// spelling wins) and rejoins with ", ".
pub fn normalize_skills(text: &str) -> String {
    split_skills(text).join(", ")
}

/// Same split/dedup as [`normalize_skills`], returned as a list.
pub fn split_skills(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    SKILL_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .map(String::from)
        .collect()
}

/// Collapses whitespace runs to a single space and trims.
pub fn normalize_text_field(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

pub(crate) fn replace_dashes(text: &str) -> String {
    text.replace(['\u{2013}', '\u{2014}'], "-")
}
