//! The scoring engine: five deterministic heuristics over one element
//! inventory, reduced into a single [`ScoreReport`].
//!
//! Each analyzer is a pure function `&[ElementSnapshot] -> AnalyzerOutcome`;
//! none reads another's result, so they can run in any order. [`score`] is
//! the only reduction step and fixes the report order: contrast, spacing,
//! underline, font-size, mobile.
//!
//! The heuristics carry two known quirks that are preserved deliberately so
//! existing score baselines stay stable (see DESIGN.md): the contrast bonus
//! band rewards a low-contrast range, and the mobile analyzer re-reads the
//! same inventory the desktop analyzers use.

use serde::{Deserialize, Serialize};

use crate::inventory::ElementSnapshot;

pub mod contrast;
pub mod font_size;
pub mod mobile;
pub mod spacing;
pub mod underline;

/// Heuristic weights and thresholds, named so tests can target boundaries.
pub mod heuristics {
    /// Exclusive bounds of the contrast ratio band that earns the
    /// decorative-element bonus instead of a penalty. Note this is a
    /// low-contrast band; see the module docs.
    pub const CONTRAST_BONUS_BAND_LOW: f64 = 0.99;
    pub const CONTRAST_BONUS_BAND_HIGH: f64 = 3.5;
    /// Flat accumulator deduction per contrast violation
    pub const CONTRAST_PENALTY: f64 = 5.0;
    /// Per-violation deduction applied after the accumulator is normalized
    pub const CONTRAST_PENALTY_WEIGHT: f64 = 1.5;

    /// Both dimensions of a clickable element must exceed this to count as
    /// an interactive target
    pub const MIN_TARGET_DIMENSION: f64 = 10.0;
    /// Same-text elements closer than this on both axes are one logical
    /// control (duplicated DOM nodes), never a spacing violation
    pub const DUPLICATE_POSITION_EPSILON: f64 = 2.0;
    /// Minimum Euclidean distance between interactive targets
    pub const MIN_TARGET_SPACING: f64 = 4.0;
    pub const SPACING_PENALTY: f64 = 1.5;

    pub const UNDERLINE_PENALTY: f64 = 10.0;

    /// Font sizes below this many pixels are flagged as small text
    pub const MIN_LEGIBLE_FONT_PX: f64 = 10.0;
    pub const SMALL_FONT_PENALTY: f64 = 5.0;

    /// Element text is truncated to this many characters in messages
    pub const TEXT_PREVIEW_CHARS: usize = 30;
}

/// Result of one analyzer: a sub-score in [0, 100] plus the issues (hard
/// defects) and notes (advisories) it collected, in snapshot order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzerOutcome {
    pub score: f64,
    pub issues: Vec<String>,
    pub notes: Vec<String>,
}

impl AnalyzerOutcome {
    fn clean(score: f64) -> Self {
        Self {
            score,
            issues: Vec::new(),
            notes: Vec::new(),
        }
    }
}

/// The engine's sole output: five sub-scores, their rounded mean, and the
/// collected issues and notes. Constructed once per analysis and immutable
/// afterwards; serialized field names are part of the report contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub contrast_score: f64,
    pub clickable_spacing_score: f64,
    pub underlined_links_score: f64,
    pub font_size_score: f64,
    pub mobile_responsive_score: f64,
    /// Rounded arithmetic mean of the five sub-scores
    pub total_score: u32,
    /// Hard defects in analyzer order, each analyzer's in snapshot order
    pub issues: Vec<String>,
    /// Reserved: no current heuristic emits contrast notes, but the field is
    /// part of the report shape and stays present (and empty)
    pub contrast_notes: Vec<String>,
    pub font_size_notes: Vec<String>,
}

/// First `TEXT_PREVIEW_CHARS` characters of an element's text, used when a
/// message quotes the element.
pub(crate) fn preview(text: &str) -> String {
    text.chars().take(heuristics::TEXT_PREVIEW_CHARS).collect()
}

/// Score an element inventory.
///
/// Pure and deterministic: the same inventory always yields a byte-identical
/// report. An empty inventory is a perfect report (nothing to penalize).
pub fn score(inventory: &[ElementSnapshot]) -> ScoreReport {
    let contrast = contrast::analyze(inventory);
    let spacing = spacing::analyze(inventory);
    let underline = underline::analyze(inventory);
    let font_size = font_size::analyze(inventory);
    let mobile = mobile::analyze(inventory);

    let total_score = ((contrast.score
        + spacing.score
        + underline.score
        + font_size.score
        + mobile.score)
        / 5.0)
        .round() as u32;

    let mut issues = contrast.issues;
    issues.extend(spacing.issues);
    issues.extend(underline.issues);
    issues.extend(font_size.issues);
    issues.extend(mobile.issues);

    ScoreReport {
        contrast_score: contrast.score,
        clickable_spacing_score: spacing.score,
        underlined_links_score: underline.score,
        font_size_score: font_size.score,
        mobile_responsive_score: mobile.score,
        total_score,
        issues,
        contrast_notes: contrast.notes,
        font_size_notes: font_size.notes,
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{element, styled};
    use super::*;

    #[test]
    fn empty_inventory_is_a_perfect_defined_report() {
        let report = score(&[]);
        assert_eq!(report.contrast_score, 100.0);
        assert_eq!(report.clickable_spacing_score, 100.0);
        assert_eq!(report.underlined_links_score, 100.0);
        assert_eq!(report.font_size_score, 100.0);
        assert_eq!(report.mobile_responsive_score, 100.0);
        assert_eq!(report.total_score, 100);
        assert!(report.issues.is_empty());
        assert!(report.contrast_notes.is_empty());
        assert!(report.font_size_notes.is_empty());
    }

    #[test]
    fn total_is_the_rounded_mean_of_the_sub_scores() {
        // One non-underlined link drags the underline score to 90; the rest
        // stay perfect except contrast, which sees the default black text on
        // transparent (ratio 1.0, inside the bonus band).
        let inventory = vec![element("a", "Home", 0.0, 0.0, 40.0, 20.0)];
        let report = score(&inventory);
        let mean = (report.contrast_score
            + report.clickable_spacing_score
            + report.underlined_links_score
            + report.font_size_score
            + report.mobile_responsive_score)
            / 5.0;
        assert_eq!(report.total_score, mean.round() as u32);
    }

    #[test]
    fn sub_scores_and_total_stay_in_range() {
        // Pile up enough defects to push raw scores past the floor
        let mut inventory = Vec::new();
        for i in 0..40 {
            inventory.push(styled("a", &format!("link {}", i), "#777777", "#666666", "8px"));
        }
        let report = score(&inventory);
        for s in [
            report.contrast_score,
            report.clickable_spacing_score,
            report.underlined_links_score,
            report.font_size_score,
            report.mobile_responsive_score,
        ] {
            assert!((0.0..=100.0).contains(&s), "sub-score out of range: {}", s);
        }
        assert!(report.total_score <= 100);
    }

    #[test]
    fn issues_keep_analyzer_order() {
        // A high-contrast paragraph (contrast issue) plus a bare link
        // (underline issue): contrast issues must come first.
        let inventory = vec![
            styled("p", "legible body text", "#000000", "#ffffff", "16px"),
            element("a", "Home", 0.0, 100.0, 40.0, 20.0),
        ];
        let report = score(&inventory);
        assert_eq!(report.issues.len(), 2);
        assert!(report.issues[0].starts_with("Low contrast"));
        assert!(report.issues[1].starts_with("Link not underlined"));
    }

    #[test]
    fn scoring_is_deterministic() {
        let inventory = vec![
            styled("p", "some text here", "#333333", "#ffffff", "9px"),
            element("a", "Home", 0.0, 100.0, 40.0, 20.0),
            element("button", "Go", 10.0, 10.0, 40.0, 20.0),
        ];
        assert_eq!(score(&inventory), score(&inventory));
    }

    #[test]
    fn sub_scores_are_order_insensitive() {
        let mut inventory = vec![
            styled("p", "first paragraph", "#000000", "#ffffff", "16px"),
            styled("span", "tiny print", "#333333", "#eeeeee", "8px"),
            element("a", "Home", 0.0, 100.0, 40.0, 20.0),
            element("button", "Go", 200.0, 200.0, 40.0, 20.0),
        ];
        let forward = score(&inventory);
        inventory.reverse();
        let reversed = score(&inventory);
        assert_eq!(forward.contrast_score, reversed.contrast_score);
        assert_eq!(forward.clickable_spacing_score, reversed.clickable_spacing_score);
        assert_eq!(forward.underlined_links_score, reversed.underlined_links_score);
        assert_eq!(forward.font_size_score, reversed.font_size_score);
        assert_eq!(forward.mobile_responsive_score, reversed.mobile_responsive_score);
        assert_eq!(forward.total_score, reversed.total_score);
    }

    #[test]
    fn report_field_names_match_the_contract() {
        let json = serde_json::to_string(&score(&[])).unwrap();
        for field in [
            "contrastScore",
            "clickableSpacingScore",
            "underlinedLinksScore",
            "fontSizeScore",
            "mobileResponsiveScore",
            "totalScore",
            "issues",
            "contrastNotes",
            "fontSizeNotes",
        ] {
            assert!(json.contains(field), "missing field {}", field);
        }
    }
}
