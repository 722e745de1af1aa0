//! Approximate string equality.
//!
//! The similarity ratio is `2 * M / T`, where `M` is the number of characters
//! in the longest matching blocks (found recursively left and right of the
//! longest common substring) and `T` is the combined length of both strings.
//! Identical strings score 1.0, disjoint strings 0.0.

use std::collections::HashMap;

use crate::scoring::weights::FuzzyThreshold;

/// Returns true if any element of `collection` is at least `threshold`
/// similar to `candidate`, compared case-insensitively.
pub fn fuzzy_match<S: AsRef<str>>(
    candidate: &str,
    collection: &[S],
    threshold: FuzzyThreshold,
) -> bool {
    let candidate = candidate.to_lowercase();
    collection
        .iter()
        .any(|item| similarity_ratio(&candidate, &item.as_ref().to_lowercase()) >= threshold.0)
}

/// The element of `collection` most similar to `candidate`, provided it
/// reaches `threshold`. Ties go to the earliest element.
pub fn best_match<'a, S: AsRef<str>>(
    candidate: &str,
    collection: &'a [S],
    threshold: FuzzyThreshold,
) -> Option<&'a S> {
    let candidate = candidate.to_lowercase();
    let mut best: Option<(&'a S, f64)> = None;
    for item in collection {
        let ratio = similarity_ratio(&candidate, &item.as_ref().to_lowercase());
        if ratio >= threshold.0 && best.map_or(true, |(_, top)| ratio > top) {
            best = Some((item, ratio));
        }
    }
    best.map(|(item, _)| item)
}

/// Sequence similarity ratio in [0, 1]. Case-sensitive; callers lower-case.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        b2j.entry(c).or_default().push(j);
    }

    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }
    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, len)`.
/// Ties resolve to the earliest position in `a`, then in `b`.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);
    // run length of the match ending at b[j], for the previous row of a
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(c) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let len = if j > 0 {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                } else {
                    1
                };
                next.insert(j, len);
                if len > best_len {
                    best_i = i + 1 - len;
                    best_j = j + 1 - len;
                    best_len = len;
                }
            }
        }
        j2len = next;
    }

    (best_i, best_j, best_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: FuzzyThreshold = FuzzyThreshold(0.7);

    #[test]
    fn test_identical_strings_score_one() {
        assert_eq!(similarity_ratio("kubernetes", "kubernetes"), 1.0);
        assert_eq!(similarity_ratio("", ""), 1.0);
    }

    #[test]
    fn test_disjoint_strings_score_zero() {
        assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
        assert_eq!(similarity_ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_known_ratios() {
        // "abcd" vs "bcde": block "bcd" → 2*3/8
        assert!((similarity_ratio("abcd", "bcde") - 0.75).abs() < 1e-9);
        let r = similarity_ratio("b.tech", "b.tech computer science");
        assert!((r - 12.0 / 29.0).abs() < 1e-9, "ratio was {r}");
    }

    #[test]
    fn test_ratio_counts_blocks_on_both_sides() {
        // longest block "cd", then "a" to its left: 2*3/(4+4)
        assert!((similarity_ratio("abcd", "axcd") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_is_bounded() {
        for (a, b) in [("python", "pyhton"), ("java", "javascript"), ("x", "xxxxxxxx")] {
            let r = similarity_ratio(a, b);
            assert!((0.0..=1.0).contains(&r), "{a} vs {b} gave {r}");
        }
    }

    #[test]
    fn test_fuzzy_match_is_case_insensitive() {
        assert!(fuzzy_match("PostgreSQL", &["postgresql"], DEFAULT));
        assert!(fuzzy_match("Bachelor of Technology", &["bachelor of technology (cse)"], DEFAULT));
    }

    #[test]
    fn test_fuzzy_match_rejects_dissimilar() {
        assert!(!fuzzy_match("Java", &["JavaScript"], DEFAULT));
        assert!(!fuzzy_match("leadership", &["teamwork", "communication"], DEFAULT));
    }

    #[test]
    fn test_fuzzy_match_empty_collection_is_false() {
        let empty: [&str; 0] = [];
        assert!(!fuzzy_match("rust", &empty, DEFAULT));
    }

    #[test]
    fn test_best_match_prefers_highest_ratio() {
        let jd = ["PostgreSQL", "Postman", "Docker"];
        assert_eq!(best_match("postgres", &jd, DEFAULT), Some(&"PostgreSQL"));
        assert_eq!(best_match("Haskell", &jd, DEFAULT), None);
    }

    #[test]
    fn test_threshold_is_respected() {
        // "abcd" vs "bcde" = 0.75
        assert!(fuzzy_match("abcd", &["bcde"], FuzzyThreshold(0.75)));
        assert!(!fuzzy_match("abcd", &["bcde"], FuzzyThreshold(0.76)));
    }
}
