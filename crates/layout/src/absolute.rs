//! Absolutely positioned children.
//!
//! Resolved independently against the parent's content box; they never
//! affect in-flow siblings, track sizing, or placement.

use geometry::{Edges, Rect, Size};

use crate::result::ComputedLayout;
use crate::tree::Node;

/// Lay out one absolute child of a container whose content box has size
/// `avail`. The returned rect is relative to the container's border box
/// (hence the padding shift).
pub(crate) fn layout_absolute_child(
    child: &Node,
    avail: Size,
    padding: Edges<f32>,
    intrinsic: Size,
) -> ComputedLayout {
    let style = &child.style;
    let margin = style.margin;

    // Size: explicit dimension, else both insets, else intrinsic.
    let width = if !style.width.is_auto() {
        style.width.resolve(avail.width, intrinsic.width)
    } else if let (Some(left), Some(right)) = (style.left, style.right) {
        avail.width - left - right
    } else {
        intrinsic.width
    };
    let height = if !style.height.is_auto() {
        style.height.resolve(avail.height, intrinsic.height)
    } else if let (Some(top), Some(bottom)) = (style.top, style.bottom) {
        avail.height - top - bottom
    } else {
        intrinsic.height
    };
    let width = style.clamp_width(width);
    let height = style.clamp_height(height);

    // Position: start inset, else end inset, else 0.
    let x = match (style.left, style.right) {
        (Some(left), _) => left,
        (None, Some(right)) => avail.width - right - width,
        (None, None) => 0.0,
    };
    let y = match (style.top, style.bottom) {
        (Some(top), _) => top,
        (None, Some(bottom)) => avail.height - bottom - height,
        (None, None) => 0.0,
    };

    let rect = Rect::new(
        x + padding.left + margin.left,
        y + padding.top + margin.top,
        width,
        height,
    );
    ComputedLayout::new(child.id, rect, style.padding)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
