//! Link-underline analyzer: scores text-link affordance.

use crate::inventory::ElementSnapshot;

use super::heuristics::UNDERLINE_PENALTY;
use super::AnalyzerOutcome;

/// Flag anchors that give no underline affordance.
///
/// A link counts as underlined when its computed `textDecoration` contains
/// `underline`, or when `borderBottom` is anything other than the literal
/// `none` (a bottom border is a common underline surrogate). Only resting
/// computed styles are available, so hover-only underlines are not seen.
pub fn analyze(inventory: &[ElementSnapshot]) -> AnalyzerOutcome {
    let mut issues = Vec::new();

    for link in inventory.iter().filter(|e| e.tag == "a") {
        let underlined = link.style.text_decoration.contains("underline")
            || link.style.border_bottom != "none";
        if !underlined {
            issues.push(format!("Link not underlined: \"{}\"", link.text));
        }
    }

    let score = (100.0 - issues.len() as f64 * UNDERLINE_PENALTY).max(0.0);

    AnalyzerOutcome {
        score,
        issues,
        notes: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::element;
    use super::*;

    fn link(text: &str, text_decoration: &str, border_bottom: &str) -> ElementSnapshot {
        let mut el = element("a", text, 0.0, 0.0, 40.0, 20.0);
        el.style.text_decoration = text_decoration.to_string();
        el.style.border_bottom = border_bottom.to_string();
        el
    }

    #[test]
    fn bare_link_is_one_issue_and_minus_ten() {
        // Scenario: a single "Home" link with no affordance scores 90
        let outcome = analyze(&[link("Home", "none", "none")]);
        assert_eq!(outcome.issues, vec!["Link not underlined: \"Home\""]);
        assert_eq!(outcome.score, 90.0);
    }

    #[test]
    fn text_decoration_underline_counts() {
        let outcome = analyze(&[link("Home", "underline", "none")]);
        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.score, 100.0);
    }

    #[test]
    fn decoration_substring_match_is_enough() {
        // Computed values look like "underline solid rgb(0, 0, 0)"
        let outcome = analyze(&[link("Home", "underline solid rgb(0, 0, 0)", "none")]);
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn border_bottom_is_an_underline_surrogate() {
        let outcome = analyze(&[link("Docs", "none", "1px solid rgb(0, 0, 255)")]);
        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.score, 100.0);
    }

    #[test]
    fn non_anchor_elements_are_ignored() {
        let outcome = analyze(&[element("button", "Go", 0.0, 0.0, 40.0, 20.0)]);
        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.score, 100.0);
    }

    #[test]
    fn score_floors_at_zero() {
        let links: Vec<ElementSnapshot> = (0..12)
            .map(|i| link(&format!("link {}", i), "none", "none"))
            .collect();
        let outcome = analyze(&links);
        assert_eq!(outcome.issues.len(), 12);
        assert_eq!(outcome.score, 0.0);
    }
}
