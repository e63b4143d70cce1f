//! Font-size analyzer: advisory notes for text below the legibility floor.

use crate::inventory::ElementSnapshot;

use super::heuristics::{MIN_LEGIBLE_FONT_PX, SMALL_FONT_PENALTY};
use super::{preview, AnalyzerOutcome};

/// Parse the leading numeric magnitude of a computed length, discarding the
/// unit suffix (`parseFloat` semantics: `"9px"` is 9, `"bold"` is nothing).
pub(crate) fn leading_number(value: &str) -> Option<f64> {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, b) in bytes.iter().enumerate() {
        match b {
            b'+' | b'-' if i == 0 => end = i + 1,
            b'0'..=b'9' => {
                seen_digit = true;
                end = i + 1;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }
    if !seen_digit {
        return None;
    }
    s[..end].trim_end_matches('.').parse().ok()
}

fn is_small(element: &ElementSnapshot) -> bool {
    matches!(leading_number(&element.style.font_size), Some(px) if px < MIN_LEGIBLE_FONT_PX)
}

/// Emit a note (not an issue) per small-text element; the layout may be a
/// deliberate design choice, so the message says as much.
pub fn analyze(inventory: &[ElementSnapshot]) -> AnalyzerOutcome {
    let mut notes = Vec::new();

    for element in inventory.iter().filter(|e| is_small(e)) {
        notes.push(format!(
            "Small font size ({}) for text: \"{}...\" (Design choice?)",
            element.style.font_size,
            preview(&element.text)
        ));
    }

    let score = (100.0 - notes.len() as f64 * SMALL_FONT_PENALTY).max(0.0);

    AnalyzerOutcome {
        score,
        issues: Vec::new(),
        notes,
    }
}

/// Shared predicate count for this analyzer and the mobile one.
pub(crate) fn small_text_count(inventory: &[ElementSnapshot]) -> usize {
    inventory.iter().filter(|e| is_small(e)).count()
}
