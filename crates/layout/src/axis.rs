//! Main/cross axis projection.
//!
//! Parameterized on the flex direction so the flex solver is written once
//! for all four directions. Reversal is applied only when emitting final
//! main positions, never inside these projections.

use geometry::{Edges, Size};
use style::{BoxStyle, Dimension, FlexDirection};

/// Projects width/height and left/right/top/bottom onto main/cross axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axis {
    /// The main axis is horizontal (row-like).
    pub horizontal: bool,
    /// The main axis runs end-to-start.
    pub reversed: bool,
}

impl Axis {
    pub fn from_direction(direction: FlexDirection) -> Self {
        Self {
            horizontal: direction.is_horizontal(),
            reversed: direction.is_reversed(),
        }
    }

    // ── size projections ──

    #[inline]
    pub fn main_size(self, size: Size) -> f32 {
        if self.horizontal { size.width } else { size.height }
    }

    #[inline]
    pub fn cross_size(self, size: Size) -> f32 {
        if self.horizontal { size.height } else { size.width }
    }

    /// Recombine main/cross extents into a width/height pair.
    #[inline]
    pub fn to_size(self, main: f32, cross: f32) -> Size {
        if self.horizontal {
            Size::new(main, cross)
        } else {
            Size::new(cross, main)
        }
    }

    /// Recombine main/cross positions into an `(x, y)` pair.
    #[inline]
    pub fn to_point(self, main: f32, cross: f32) -> (f32, f32) {
        if self.horizontal { (main, cross) } else { (cross, main) }
    }

    // ── edge projections ──

    #[inline]
    pub fn main_start(self, edges: Edges<f32>) -> f32 {
        if self.horizontal { edges.left } else { edges.top }
    }

    #[inline]
    pub fn main_end(self, edges: Edges<f32>) -> f32 {
        if self.horizontal { edges.right } else { edges.bottom }
    }

    #[inline]
    pub fn cross_start(self, edges: Edges<f32>) -> f32 {
        if self.horizontal { edges.top } else { edges.left }
    }

    #[inline]
    pub fn cross_end(self, edges: Edges<f32>) -> f32 {
        if self.horizontal { edges.bottom } else { edges.right }
    }

    /// Sum of both main-axis edges.
    #[inline]
    pub fn main_sum(self, edges: Edges<f32>) -> f32 {
        if self.horizontal { edges.horizontal() } else { edges.vertical() }
    }

    /// Sum of both cross-axis edges.
    #[inline]
    pub fn cross_sum(self, edges: Edges<f32>) -> f32 {
        if self.horizontal { edges.vertical() } else { edges.horizontal() }
    }

    // ── style projections ──

    #[inline]
    pub fn main_dim(self, style: &BoxStyle) -> Dimension {
        if self.horizontal { style.width } else { style.height }
    }

    #[inline]
    pub fn cross_dim(self, style: &BoxStyle) -> Dimension {
        if self.horizontal { style.height } else { style.width }
    }

    /// Clamp a main-axis size to the style's min/max (min wins a conflict).
    pub fn clamp_main(self, style: &BoxStyle, value: f32) -> f32 {
        if self.horizontal {
            style.clamp_width(value)
        } else {
            style.clamp_height(value)
        }
    }

    /// Clamp a cross-axis size to the style's min/max.
    pub fn clamp_cross(self, style: &BoxStyle, value: f32) -> f32 {
        if self.horizontal {
            style.clamp_height(value)
        } else {
            style.clamp_width(value)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
