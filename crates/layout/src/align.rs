//! Single-item alignment within an available extent.
//!
//! Shared by grid cell positioning and the flex cross axis.

use style::AlignItems;

/// Align an item of `size` within `avail_inner` (the extent left after
/// margin insets), starting at `inner`. Returns the item's position and its
/// possibly stretched size.
///
/// `Baseline` behaves as `FlexStart` here; callers that have baseline data
/// handle that keyword before falling back to this table.
pub fn align_in_cell(align: AlignItems, inner: f32, avail_inner: f32, size: f32) -> (f32, f32) {
    match align {
        AlignItems::Stretch => (inner, avail_inner),
        AlignItems::FlexStart | AlignItems::Baseline => (inner, size),
        AlignItems::FlexEnd => (inner + avail_inner - size, size),
        AlignItems::Center => (inner + (avail_inner - size) / 2.0, size),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
