//! The element inventory: one flat, ordered record per rendered DOM node.
//!
//! These types are the wire contract between a harvester backend and the
//! scoring engine, and they are also what the analyze API returns verbatim.
//! Serialized field names (camelCase, `type` for the tag) are stable;
//! downstream consumers read them without validation.

use serde::{Deserialize, Serialize};

/// Viewport-relative coordinates of a bounding box top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Bounding box dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Resolved (computed) style strings for the properties the heuristics read.
///
/// Values are computed-style strings, not authored CSS: `color` looks like
/// `rgb(0, 0, 0)`, `fontSize` like `16px`, and absent properties resolve to
/// browser-like defaults rather than empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedStyle {
    pub background_color: String,
    pub color: String,
    pub font_size: String,
    pub font_family: String,
    pub text_decoration: String,
    pub cursor: String,
    pub font_weight: String,
    pub border: String,
    pub border_radius: String,
    pub box_shadow: String,
    pub border_bottom: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            background_color: "rgba(0, 0, 0, 0)".to_string(),
            color: "rgb(0, 0, 0)".to_string(),
            font_size: "16px".to_string(),
            font_family: "serif".to_string(),
            text_decoration: "none".to_string(),
            cursor: "auto".to_string(),
            font_weight: "400".to_string(),
            border: "none".to_string(),
            border_radius: "0px".to_string(),
            box_shadow: "none".to_string(),
            border_bottom: "none".to_string(),
        }
    }
}

/// One inventoried DOM element: geometry, computed style, and clickability.
///
/// Snapshots are read-only values once captured; the scoring engine never
/// mutates them. An inventory is an ordered `Vec<ElementSnapshot>` in DOM
/// traversal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    /// Lower-cased tag name
    #[serde(rename = "type")]
    pub tag: String,
    /// Trimmed visible text content (unbounded; display code truncates)
    pub text: String,
    pub position: Position,
    pub size: Size,
    pub style: ComputedStyle,
    /// True for anchors, buttons, or any element with a `pointer` cursor
    pub is_clickable: bool,
}

impl ElementSnapshot {
    /// Build a snapshot, deriving `is_clickable` from the tag and cursor.
    pub fn new(tag: &str, text: &str, position: Position, size: Size, style: ComputedStyle) -> Self {
        let tag = tag.to_lowercase();
        let is_clickable = tag == "a" || tag == "button" || style.cursor == "pointer";
        Self {
            tag,
            text: text.trim().to_string(),
            position,
            size,
            style,
            is_clickable,
        }
    }
}

/// Pass-through page metadata captured alongside the inventory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub favicon: String,
}
