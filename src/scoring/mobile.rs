//! Mobile-responsiveness analyzer: small-text legibility, score only.

use crate::inventory::ElementSnapshot;

use super::font_size::small_text_count;
use super::heuristics::SMALL_FONT_PENALTY;
use super::AnalyzerOutcome;

/// Apply the small-font predicate as a mobile legibility proxy.
///
/// Known quirk, preserved: the inventory is harvested once at the desktop
/// viewport, so this re-scores the desktop layout rather than a true mobile
/// re-render. A mobile-specific inventory would be needed for the score to
/// reflect mobile-only legibility; until that is decided this analyzer stays
/// a mirror of the font-size count, emitting no issues or notes of its own.
pub fn analyze(inventory: &[ElementSnapshot]) -> AnalyzerOutcome {
    let small = small_text_count(inventory);
    AnalyzerOutcome::clean((100.0 - small as f64 * SMALL_FONT_PENALTY).max(0.0))
}
