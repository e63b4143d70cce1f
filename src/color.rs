//! WCAG luminance contrast over computed CSS color strings.
//!
//! Input is whatever the harvester captured as a computed style value
//! (`rgb(0, 0, 0)`, `rgba(255, 255, 255, 1)`, hex, named colors). Parsing is
//! delegated to `csscolorparser`; strings it rejects resolve to black, which
//! matches the tolerant color stacks browsers and the common JS color
//! libraries use.

/// Relative luminance per WCAG 2.1.
/// <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
pub fn relative_luminance(css: &str) -> f64 {
    let color = csscolorparser::parse(css)
        .unwrap_or_else(|_| csscolorparser::Color::new(0.0, 0.0, 0.0, 1.0));
    0.2126 * linearize(color.r as f64)
        + 0.7152 * linearize(color.g as f64)
        + 0.0722 * linearize(color.b as f64)
}

fn linearize(channel: f64) -> f64 {
    if channel <= 0.03928 {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}

/// Contrast ratio between two computed color strings.
/// Ranges from 1 (identical luminance) to 21 (black on white).
pub fn contrast_ratio(foreground: &str, background: &str) -> f64 {
    let fg = relative_luminance(foreground);
    let bg = relative_luminance(background);
    let (lighter, darker) = if fg > bg { (fg, bg) } else { (bg, fg) };
    (lighter + 0.05) / (darker + 0.05)
}
