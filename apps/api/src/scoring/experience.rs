//! Experience parsing: total tenure from resume date ranges, and a tolerant
//! years heuristic for free-text requirements.

use std::fmt;

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scoring::normalize::replace_dashes;

/// `(Jan 2024 - Aug 2024)` or `(Jan 2025 - Present)`
static DATE_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\((\w+)\s(\d{4})\s*-\s*(?:(\w+)\s(\d{4})|(Present))\)").unwrap());

static NUMERIC_RANGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*-\s*(\d+)").unwrap());

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Total experience, stored as whole months.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExperienceDuration(pub u32);

impl ExperienceDuration {
    pub fn months(&self) -> u32 {
        self.0
    }

    pub fn years(&self) -> u32 {
        self.0 / 12
    }
}

impl fmt::Display for ExperienceDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (years, months) = (self.years(), self.0 % 12);
        if years > 0 {
            write!(f, "{years} years {months} months")
        } else {
            write!(f, "{months} months")
        }
    }
}

/// Sums every `(Mon YYYY - Mon YYYY|Present)` range in `text`, resolving
/// "Present" against the current month.
pub fn parse_duration_months(text: &str) -> ExperienceDuration {
    let now = Utc::now();
    parse_duration_months_at(text, now.year(), now.month())
}

/// Same as [`parse_duration_months`] with an explicit "Present".
///
/// Both endpoints count, so Jan–Aug of one year is 8 months. Negative ranges
/// contribute 0. A range with an unknown month name is skipped.
pub fn parse_duration_months_at(text: &str, current_year: i32, current_month: u32) -> ExperienceDuration {
    let text = replace_dashes(text);
    let mut total: i64 = 0;

    for caps in DATE_RANGE.captures_iter(&text) {
        let start = month_index(&caps[1]).zip(caps[2].parse::<i32>().ok());
        let end = if caps.get(5).is_some() {
            Some((current_month, current_year))
        } else {
            caps.get(3)
                .and_then(|m| month_index(m.as_str()))
                .zip(caps.get(4).and_then(|y| y.as_str().parse::<i32>().ok()))
        };

        let (Some((start_month, start_year)), Some((end_month, end_year))) = (start, end) else {
            debug!("Skipping unparseable date range {:?}", &caps[0]);
            continue;
        };

        let months = i64::from(end_year - start_year) * 12
            + (i64::from(end_month) - i64::from(start_month))
            + 1;
        total += months.max(0);
    }

    ExperienceDuration(u32::try_from(total).unwrap_or(u32::MAX))
}

/// 1-based month from the first three letters of `token` (case-sensitive).
fn month_index(token: &str) -> Option<u32> {
    let prefix: String = token.chars().take(3).collect();
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|idx| idx as u32 + 1)
}

/// Best-effort years from a free-text requirement such as "5+ years" or
/// "2-4 years". A numeric range yields its midpoint; otherwise the first
/// standalone integer token; otherwise 0.
pub fn extract_years(text: &str) -> f64 {
    let text = replace_dashes(text).replace('+', "");

    if let Some(caps) = NUMERIC_RANGE.captures(&text) {
        if let (Ok(low), Ok(high)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
            return (low + high) / 2.0;
        }
    }

    text.split_whitespace()
        .find(|token| token.chars().all(|c| c.is_ascii_digit()))
        .and_then(|token| token.parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_range_counts_both_endpoints() {
        let d = parse_duration_months_at("(Jan 2024 - Aug 2024)", 2025, 3);
        assert_eq!(d.months(), 8);
    }

    #[test]
    fn test_present_resolves_to_given_month() {
        let d = parse_duration_months_at("(Jan 2025 - Present)", 2025, 3);
        assert_eq!(d.months(), 3);
    }

    #[test]
    fn test_ranges_are_summed() {
        let text = "Engineer, Acme (Jan 2020 \u{2013} Dec 2021)\nLead, Initech (Jan 2022 \u{2014} Jun 2022)";
        assert_eq!(parse_duration_months_at(text, 2025, 3).months(), 30);
    }

    #[test]
    fn test_full_month_names_use_first_three_letters() {
        let d = parse_duration_months_at("(September 2023 - February 2024)", 2025, 3);
        assert_eq!(d.months(), 6);
    }

    #[test]
    fn test_unknown_month_skips_only_that_range() {
        let text = "(Foo 2020 - Mar 2020) (Jan 2021 - Mar 2021)";
        assert_eq!(parse_duration_months_at(text, 2025, 3).months(), 3);
    }

    #[test]
    fn test_month_lookup_is_case_sensitive() {
        assert_eq!(parse_duration_months_at("(jan 2021 - Mar 2021)", 2025, 3).months(), 0);
    }

    #[test]
    fn test_negative_range_clamps_to_zero() {
        let text = "(Dec 2024 - Jan 2023) (Jan 2024 - Jan 2024)";
        assert_eq!(parse_duration_months_at(text, 2025, 3).months(), 1);
    }

    #[test]
    fn test_no_ranges_is_zero() {
        assert_eq!(parse_duration_months_at("no dates here", 2025, 3).months(), 0);
        assert_eq!(parse_duration_months_at("", 2025, 3).months(), 0);
    }

    #[test]
    fn test_duration_display() {
        assert_eq!(ExperienceDuration(8).to_string(), "8 months");
        assert_eq!(ExperienceDuration(30).to_string(), "2 years 6 months");
        assert_eq!(ExperienceDuration(24).to_string(), "2 years 0 months");
    }

    #[test]
    fn test_extract_years_plus_suffix() {
        assert_eq!(extract_years("5+ years"), 5.0);
    }

    #[test]
    fn test_extract_years_range_is_midpoint() {
        assert_eq!(extract_years("2-4 years"), 3.0);
        assert_eq!(extract_years("3 \u{2013} 6 years"), 4.5);
    }

    #[test]
    fn test_extract_years_first_standalone_integer() {
        assert_eq!(extract_years("2 years 6 months"), 2.0);
        assert_eq!(extract_years("at least 7 years"), 7.0);
    }

    #[test]
    fn test_extract_years_unparseable_is_zero() {
        assert_eq!(extract_years(""), 0.0);
        assert_eq!(extract_years("several years"), 0.0);
        assert_eq!(extract_years("2.5years"), 0.0);
    }
}
