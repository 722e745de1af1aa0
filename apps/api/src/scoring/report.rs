//! Plain-text score breakdown. Formatting only.

use std::fmt::Write;

use crate::scoring::aggregate::FinalScore;
use crate::scoring::attributes::{round2, AttributeScores, OtherBreakdown, SubScore};
use crate::scoring::weights::AttributeWeights;

const HEADER: &str = "===== Resume Match Breakdown =====";
const RULE: &str = "-----------------------------------";
const FOOTER: &str = "===================================";
const OTHER_HEADER: &str = "--- Other Requirements Breakdown ---";

/// Renders one line per attribute (weight and weighted contribution), the
/// final score, and the Other Requirements sub-categories when given.
pub fn build_breakdown(
    scores: &AttributeScores,
    final_score: &FinalScore,
    other: Option<&OtherBreakdown>,
    weights: &AttributeWeights,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{HEADER}");
    for (attribute, score) in scores.iter() {
        let weight = attribute.weight(weights);
        let _ = writeln!(
            out,
            "{:<25}: Total: {:.2}% → Contribution: {:.2}%",
            attribute.label(),
            weight * 100.0,
            round2(score * weight)
        );
    }
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "{:<25}: {:.2}% → {}",
        "Final Score", final_score.score, final_score.rating
    );
    let _ = writeln!(out, "{FOOTER}");

    if let Some(other) = other {
        let other_weight = weights.other_requirements;
        let sub_max = SubScore::MAX * other_weight;

        let _ = writeln!(out);
        let _ = writeln!(out, "{OTHER_HEADER}");
        for (category, sub) in other.iter() {
            let _ = writeln!(
                out,
                "  {:<20}: Total: {:.2}% → Contribution: {:.2}%",
                category.label(),
                sub_max,
                round2(sub.value() * other_weight)
            );
        }
        let _ = writeln!(out, "{RULE}");
    }

    out.trim().to_string()
}
