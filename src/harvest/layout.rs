//! Approximate geometry for fetched (non-rendered) documents.
//!
//! Without a renderer there are no real bounding boxes, so the fetch
//! harvester stacks text-bearing elements vertically at the viewport width:
//! each element with direct text advances a cursor by its estimated height,
//! pure containers sit at the cursor with zero height. The coordinates only
//! need to be stable and roughly proportional for the proximity heuristics
//! to be meaningful.

use crate::inventory::{Position, Size};
use crate::Viewport;

const PAGE_MARGIN: f64 = 8.0;
const BLOCK_GAP: f64 = 6.0;
const BLOCK_PADDING: f64 = 6.0;
/// Rough average glyph advance as a fraction of the font size
const CHAR_WIDTH_FACTOR: f64 = 0.5;
const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Stateful block-stacking cursor; one per harvest pass.
pub struct GeometrySolver {
    cursor_y: f64,
    page_width: f64,
}

impl GeometrySolver {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            cursor_y: PAGE_MARGIN,
            page_width: f64::from(viewport.width),
        }
    }

    /// Place the next element in document order.
    ///
    /// `own_text` is the element's direct text (not descendant text), which
    /// decides whether it occupies vertical space of its own.
    pub fn place(&mut self, own_text: &str, font_px: f64) -> (Position, Size) {
        let content_width = (self.page_width - 2.0 * PAGE_MARGIN).max(0.0);
        let position = Position {
            x: PAGE_MARGIN,
            y: self.cursor_y,
        };

        let chars = own_text.chars().count();
        if chars == 0 {
            return (
                position,
                Size {
                    width: content_width,
                    height: 0.0,
                },
            );
        }

        let char_w = (font_px * CHAR_WIDTH_FACTOR).max(1.0);
        let line_h = font_px * LINE_HEIGHT_FACTOR;
        let usable = (content_width - 2.0 * BLOCK_PADDING).max(char_w);
        let per_line = ((usable / char_w).floor() as usize).max(1);
        let lines = (chars + per_line - 1) / per_line;

        let width =
            ((chars.min(per_line) as f64) * char_w + 2.0 * BLOCK_PADDING).min(content_width);
        let height = lines as f64 * line_h + 2.0 * BLOCK_PADDING;

        self.cursor_y += height + BLOCK_GAP;
        (position, Size { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_blocks_stack_vertically() {
        let mut solver = GeometrySolver::new(Viewport {
            width: 800,
            height: 600,
        });
        let (first_pos, first_size) = solver.place("Hello world", 16.0);
        let (second_pos, _) = solver.place("More text", 16.0);
        assert_eq!(first_pos.y, PAGE_MARGIN);
        assert!(second_pos.y >= first_pos.y + first_size.height);
    }

    #[test]
    fn containers_take_no_vertical_space() {
        let mut solver = GeometrySolver::new(Viewport {
            width: 800,
            height: 600,
        });
        let (container_pos, container_size) = solver.place("", 16.0);
        let (text_pos, _) = solver.place("child text", 16.0);
        assert_eq!(container_size.height, 0.0);
        assert_eq!(container_pos.y, text_pos.y);
    }

    #[test]
    fn short_labels_exceed_the_interactive_target_minimum() {
        // A two-character button label must still produce a box bigger than
        // the 10-unit candidate threshold used by the spacing analyzer
        let mut solver = GeometrySolver::new(Viewport {
            width: 800,
            height: 600,
        });
        let (_, size) = solver.place("Go", 16.0);
        assert!(size.width > 10.0);
        assert!(size.height > 10.0);
    }

    #[test]
    fn long_text_wraps_instead_of_widening() {
        let mut solver = GeometrySolver::new(Viewport {
            width: 200,
            height: 600,
        });
        let long = "word ".repeat(100);
        let (_, size) = solver.place(&long, 16.0);
        assert!(size.width <= 200.0 - 2.0 * PAGE_MARGIN);
        let (_, short_size) = solver.place("short", 16.0);
        assert!(size.height > short_size.height);
    }

    #[test]
    fn narrow_viewports_do_not_panic() {
        let mut solver = GeometrySolver::new(Viewport {
            width: 4,
            height: 600,
        });
        let (_, size) = solver.place("text on a sliver", 16.0);
        assert!(size.height > 0.0);
    }
}
