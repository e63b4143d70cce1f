//! Spacing analyzer: flags interactive targets rendered too close together.

use crate::inventory::ElementSnapshot;

use super::heuristics::{
    DUPLICATE_POSITION_EPSILON, MIN_TARGET_DIMENSION, MIN_TARGET_SPACING, SPACING_PENALTY,
};
use super::AnalyzerOutcome;

/// Exhaustive pairwise scan over interactive targets.
///
/// Candidates are clickable elements with visible text and both dimensions
/// above `MIN_TARGET_DIMENSION`. Same-text pairs within
/// `DUPLICATE_POSITION_EPSILON` on both axes are one logical control
/// (duplicated DOM nodes) and never a violation; otherwise a Euclidean
/// distance under `MIN_TARGET_SPACING` between top-left corners is flagged.
///
/// This is O(n^2) in the candidate count, which is fine for typical pages
/// (hundreds to low thousands of elements). Very large pages would want a
/// spatial index with the same thresholds.
pub fn analyze(inventory: &[ElementSnapshot]) -> AnalyzerOutcome {
    let candidates: Vec<&ElementSnapshot> = inventory
        .iter()
        .filter(|e| {
            e.is_clickable
                && !e.text.is_empty()
                && e.size.width > MIN_TARGET_DIMENSION
                && e.size.height > MIN_TARGET_DIMENSION
        })
        .collect();

    let mut violations = 0u32;
    let mut issues = Vec::new();

    for i in 0..candidates.len() {
        for j in (i + 1)..candidates.len() {
            let (a, b) = (candidates[i], candidates[j]);

            let same_text = a.text == b.text;
            let same_spot = (a.position.x - b.position.x).abs() < DUPLICATE_POSITION_EPSILON
                && (a.position.y - b.position.y).abs() < DUPLICATE_POSITION_EPSILON;
            if same_text && same_spot {
                continue;
            }

            let distance =
                (a.position.x - b.position.x).hypot(a.position.y - b.position.y);
            if distance < MIN_TARGET_SPACING {
                violations += 1;
                issues.push(format!(
                    "Clickable elements too close: \"{}\" and \"{}\"",
                    a.text, b.text
                ));
            }
        }
    }

    let score = if violations == 0 {
        100.0
    } else {
        (100.0 - f64::from(violations) * SPACING_PENALTY).max(0.0)
    };

    AnalyzerOutcome {
        score,
        issues,
        notes: Vec::new(),
    }
}
