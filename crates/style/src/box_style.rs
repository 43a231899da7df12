//! Per-node box properties: dimensions, constraints, position, insets.

use geometry::Edges;

use crate::Dimension;

// ─────────────────────────────────────────────────────────────────────────────
// Position
// ─────────────────────────────────────────────────────────────────────────────

/// How a node participates in its parent's flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    /// Normal flow: the parent's solver places the node.
    Static,
    /// Removed from flow; positioned against the parent's content box.
    Absolute,
}

impl Default for Position {
    fn default() -> Self {
        Position::Static
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// BoxStyle
// ─────────────────────────────────────────────────────────────────────────────

/// The box properties of a single node.
///
/// `min_*` beats `max_*` when the two conflict: sizes are clamped against the
/// maximum first and the minimum last.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxStyle {
    pub width: Dimension,
    pub height: Dimension,

    pub min_width: f32,
    pub min_height: f32,
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,

    /// Width ÷ height. Fills in whichever of width/height is `Auto` when the
    /// other is explicit.
    pub aspect_ratio: Option<f32>,

    pub position: Position,

    /// Insets for absolutely positioned nodes.
    pub top: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
    pub left: Option<f32>,

    pub margin: Edges<f32>,
    pub padding: Edges<f32>,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            width: Dimension::Auto,
            height: Dimension::Auto,
            min_width: 0.0,
            min_height: 0.0,
            max_width: None,
            max_height: None,
            aspect_ratio: None,
            position: Position::Static,
            top: None,
            right: None,
            bottom: None,
            left: None,
            margin: Edges::zero(),
            padding: Edges::zero(),
        }
    }
}

impl BoxStyle {
    /// A style with explicit pixel width and height.
    pub fn sized(width: f32, height: f32) -> Self {
        Self {
            width: Dimension::Px(width),
            height: Dimension::Px(height),
            ..Self::default()
        }
    }

    /// Clamp a width to this style's min/max constraints. The minimum is
    /// applied last, so it wins a min > max conflict.
    pub fn clamp_width(&self, width: f32) -> f32 {
        let w = match self.max_width {
            Some(max) => width.min(max),
            None => width,
        };
        w.max(self.min_width).max(0.0)
    }

    /// Clamp a height to this style's min/max constraints.
    pub fn clamp_height(&self, height: f32) -> f32 {
        let h = match self.max_height {
            Some(max) => height.min(max),
            None => height,
        };
        h.max(self.min_height).max(0.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
