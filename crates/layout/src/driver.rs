//! Top-down layout driver.
//!
//! Walks the tree with an explicit work stack (depth is unbounded): the
//! intrinsic pre-pass runs once, then each container's solver lays out its
//! children against the container's content box and the results are
//! translated into tree coordinates.

use geometry::Rect;
use style::FlexContainerStyle;
use tracing::debug;

use crate::aspect::apply_aspect_ratio;
use crate::intrinsic::{self, IntrinsicSizes};
use crate::result::{ComputedLayout, LayoutResult};
use crate::tree::{ContainerKind, MeasureFn, Node};
use crate::{flex, grid};

/// Compute layout for the whole tree within the available space, reading
/// intrinsic sizes from each node's own `content_size`.
pub fn layout(root: &Node, available_width: f32, available_height: f32) -> LayoutResult {
    layout_with_measure(root, available_width, available_height, &|node: &Node| {
        node.content_size
    })
}

/// Compute layout with a caller-provided content-size source. The callback
/// must be pure; it may be invoked more than once per node.
pub fn layout_with_measure(
    root: &Node,
    available_width: f32,
    available_height: f32,
    measure: &MeasureFn<'_>,
) -> LayoutResult {
    debug!(root = root.id, available_width, available_height, "layout pass");
    let intrinsic = intrinsic::measure_tree(root, measure);
    let mut result = LayoutResult::new();

    // The root is the only node that emits its own layout; every other
    // node's geometry comes from its parent's solver.
    let root_rect = resolve_root_rect(root, available_width, available_height, &intrinsic);
    result.push(ComputedLayout::new(root.id, root_rect, root.style.padding));

    let mut stack: Vec<(&Node, Rect)> = vec![(root, root_rect)];
    while let Some((node, rect)) = stack.pop() {
        if node.children.is_empty() {
            continue;
        }
        let content = rect.inset(node.style.padding);
        let avail = content.size();

        let mut child_layouts = Vec::with_capacity(node.children.len());
        match &node.container {
            ContainerKind::Grid(style) => {
                grid::layout_grid(node, style, avail, &intrinsic, &mut child_layouts);
            }
            ContainerKind::Flex(style) => {
                flex::layout_flex(node, style, avail, &intrinsic, &mut child_layouts);
            }
            ContainerKind::None => {
                // Children without a container model flow as a default row.
                let style = FlexContainerStyle::default();
                flex::layout_flex(node, &style, avail, &intrinsic, &mut child_layouts);
            }
        }

        // Solver output is relative to the node's border box.
        for layout in child_layouts {
            result.push(layout.translate(rect.x, rect.y));
        }

        for child in &node.children {
            if child.children.is_empty() {
                continue;
            }
            if let Some(layout) = result.get(child.id) {
                stack.push((child, layout.border_rect));
            }
        }
    }

    result
}

/// Resolve the root's own rectangle: auto fills the available space for
/// containers and the intrinsic size for leaves, the aspect ratio fills a
/// lone auto side, and the min/max clamps apply last (min wins).
fn resolve_root_rect(
    root: &Node,
    available_width: f32,
    available_height: f32,
    intrinsic: &IntrinsicSizes,
) -> Rect {
    let style = &root.style;
    let intrinsic_size = intrinsic.get(root.id);
    let is_container = !root.children.is_empty();

    let width_auto = style.width.is_auto();
    let height_auto = style.height.is_auto();
    let width = if width_auto {
        if is_container { available_width } else { intrinsic_size.width }
    } else {
        style.width.resolve(available_width, intrinsic_size.width)
    };
    let height = if height_auto {
        if is_container { available_height } else { intrinsic_size.height }
    } else {
        style.height.resolve(available_height, intrinsic_size.height)
    };

    let (width, height) =
        apply_aspect_ratio(width, height, width_auto, height_auto, style.aspect_ratio);
    Rect::new(0.0, 0.0, style.clamp_width(width), style.clamp_height(height))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
