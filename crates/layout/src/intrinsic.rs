//! Intrinsic size measurement.
//!
//! A post-order pre-pass over the tree that records an intrinsic
//! (width, height) for every node. Containers derive theirs from their
//! children; leaves use their measured content size or (0, 0). The pass
//! never fails; anything it cannot size is (0, 0).

use ahash::AHashMap;
use geometry::Size;
use style::{FlexContainerStyle, GridContainerStyle, Position};

use crate::axis::Axis;
use crate::grid::template::expanded_track_count;
use crate::tree::{ContainerKind, MeasureFn, Node, NodeId};

// ─────────────────────────────────────────────────────────────────────────────
// IntrinsicSizes
// ─────────────────────────────────────────────────────────────────────────────

/// Intrinsic sizes for every node of one tree, keyed by node id.
#[derive(Debug, Default)]
pub struct IntrinsicSizes {
    map: AHashMap<NodeId, Size>,
}

impl IntrinsicSizes {
    /// The recorded intrinsic size, or (0, 0) for unknown ids.
    pub fn get(&self, id: NodeId) -> Size {
        self.map.get(&id).copied().unwrap_or(Size::ZERO)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Measuring pass
// ─────────────────────────────────────────────────────────────────────────────

/// Measure the whole tree. Uses an explicit stack: tree depth is unbounded.
pub fn measure_tree(root: &Node, measure: &MeasureFn<'_>) -> IntrinsicSizes {
    let mut sizes = IntrinsicSizes::default();

    // Post-order: children are recorded before their parent is computed.
    let mut stack: Vec<(&Node, bool)> = vec![(root, false)];
    while let Some((node, visited)) = stack.pop() {
        if visited {
            let size = measure_node(node, measure, &sizes);
            sizes.map.insert(node.id, size);
        } else {
            stack.push((node, true));
            for child in node.children.iter().rev() {
                stack.push((child, false));
            }
        }
    }

    sizes
}

/// Measure a single node's intrinsic size using the default content-size
/// source ([`Node::content_size`]).
pub fn measure_intrinsic_size(root: &Node) -> Size {
    let sizes = measure_tree(root, &|node: &Node| node.content_size);
    sizes.get(root.id)
}

fn measure_node(node: &Node, measure: &MeasureFn<'_>, sizes: &IntrinsicSizes) -> Size {
    // A measured content size wins even for nodes with children; the
    // children were still visited so solvers can read their sizes.
    if let Some(content) = measure(node) {
        return content.size();
    }
    if node.children.is_empty() {
        return Size::ZERO;
    }
    match &node.container {
        ContainerKind::Grid(style) => grid_intrinsic(node, style, sizes),
        ContainerKind::Flex(style) => flex_intrinsic(node, style, sizes),
        ContainerKind::None => flex_intrinsic(node, &FlexContainerStyle::default(), sizes),
    }
}

/// A child's contribution: its explicit pixel dimensions where set,
/// otherwise its recorded intrinsic size.
fn child_contribution(child: &Node, sizes: &IntrinsicSizes) -> Size {
    let intrinsic = sizes.get(child.id);
    Size::new(
        child.style.width.px().unwrap_or(intrinsic.width),
        child.style.height.px().unwrap_or(intrinsic.height),
    )
}

fn flex_intrinsic(node: &Node, style: &FlexContainerStyle, sizes: &IntrinsicSizes) -> Size {
    let axis = Axis::from_direction(style.direction);

    let mut sum_main = 0.0f32;
    let mut max_cross = 0.0f32;
    let mut count = 0usize;

    for child in &node.children {
        if child.style.position == Position::Absolute {
            continue;
        }
        let size = child_contribution(child, sizes);
        sum_main += axis.main_size(size) + axis.main_sum(child.style.margin);
        max_cross = max_cross.max(axis.cross_size(size) + axis.cross_sum(child.style.margin));
        count += 1;
    }
    if count > 1 {
        sum_main += style.gap * (count - 1) as f32;
    }

    let content = axis.to_size(sum_main, max_cross);
    let padding = node.style.padding;
    Size::new(content.width + padding.horizontal(), content.height + padding.vertical())
}

fn grid_intrinsic(node: &Node, style: &GridContainerStyle, sizes: &IntrinsicSizes) -> Size {
    let in_flow: Vec<&Node> = node
        .children
        .iter()
        .filter(|c| c.style.position != Position::Absolute)
        .collect();
    let padding = node.style.padding;
    if in_flow.is_empty() {
        return Size::new(padding.horizontal(), padding.vertical());
    }

    let n = in_flow.len();
    let div_ceil = |a: usize, b: usize| a.div_ceil(b.max(1));

    // Notional track counts from the templates (measured with gap 0), with
    // the unspecified axis derived from the child count.
    let mut cols = expanded_track_count(&style.template_columns);
    let mut rows = expanded_track_count(&style.template_rows);
    match (cols, rows) {
        (0, 0) if style.auto_flow.is_row_flow() => {
            cols = 1;
            rows = n;
        }
        (0, 0) => {
            rows = 1;
            cols = n;
        }
        (0, r) => cols = div_ceil(n, r),
        (c, 0) => rows = div_ceil(n, c),
        _ => {}
    }
    if style.auto_flow.is_row_flow() {
        rows = rows.max(div_ceil(n, cols));
    } else {
        cols = cols.max(div_ceil(n, rows));
    }

    // Assign children to cells in auto-flow order and collect per-track
    // maxima.
    let mut col_widths = vec![0.0f32; cols];
    let mut row_heights = vec![0.0f32; rows];
    for (i, child) in in_flow.iter().enumerate() {
        let (row, col) = if style.auto_flow.is_row_flow() {
            (i / cols, i % cols)
        } else {
            (i % rows, i / rows)
        };
        let size = child_contribution(child, sizes);
        let margin = child.style.margin;
        if let Some(w) = col_widths.get_mut(col) {
            *w = w.max(size.width + margin.horizontal());
        }
        if let Some(h) = row_heights.get_mut(row) {
            *h = h.max(size.height + margin.vertical());
        }
    }

    let width: f32 =
        col_widths.iter().sum::<f32>() + style.column_gap * (cols.saturating_sub(1)) as f32;
    let height: f32 =
        row_heights.iter().sum::<f32>() + style.row_gap * (rows.saturating_sub(1)) as f32;
    Size::new(width + padding.horizontal(), height + padding.vertical())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ContentSize;
    use geometry::Edges;
    use style::{BoxStyle, Dimension, FlexContainerStyle, GridAutoFlow, GridTemplate, TrackSize};

    fn leaf(id: NodeId, w: f32, h: f32) -> Node {
        Node::leaf(id, ContentSize::new(w, h))
    }

    #[test]
    fn leaf_without_content_is_zero() {
        assert_eq!(measure_intrinsic_size(&Node::new(1)), Size::ZERO);
    }

    #[test]
    fn leaf_uses_content_size() {
        assert_eq!(measure_intrinsic_size(&leaf(1, 40.0, 20.0)), Size::new(40.0, 20.0));
    }

    #[test]
    fn row_sums_widths_and_maxes_heights() {
        let container = Node::flex(
            1,
            FlexContainerStyle { gap: 10.0, ..FlexContainerStyle::row() },
            vec![leaf(2, 100.0, 50.0), leaf(3, 150.0, 30.0)],
        );
        // 100 + 10 + 150 wide, max(50, 30) tall.
        assert_eq!(measure_intrinsic_size(&container), Size::new(260.0, 50.0));
    }

    #[test]
    fn column_swaps_axes_and_adds_padding() {
        let mut container = Node::flex(
            1,
            FlexContainerStyle::column(),
            vec![leaf(2, 100.0, 50.0), leaf(3, 150.0, 30.0)],
        );
        container.style.padding = Edges::all(5.0);
        // max(100, 150) wide, 50 + 30 tall, plus 10 padding each way.
        assert_eq!(measure_intrinsic_size(&container), Size::new(160.0, 90.0));
    }

    #[test]
    fn margins_count_toward_contribution() {
        let mut child = leaf(2, 100.0, 50.0);
        child.style.margin = Edges::symmetric(4.0, 6.0);
        let container = Node::flex(1, FlexContainerStyle::row(), vec![child]);
        assert_eq!(measure_intrinsic_size(&container), Size::new(112.0, 58.0));
    }

    #[test]
    fn explicit_child_dimension_beats_intrinsic() {
        let mut child = leaf(2, 100.0, 50.0);
        child.style.width = Dimension::Px(70.0);
        let container = Node::flex(1, FlexContainerStyle::row(), vec![child]);
        assert_eq!(measure_intrinsic_size(&container), Size::new(70.0, 50.0));
    }

    #[test]
    fn measured_container_still_records_children() {
        let mut container = Node::flex(1, FlexContainerStyle::row(), vec![leaf(2, 40.0, 20.0)]);
        container.content_size = Some(ContentSize::new(10.0, 10.0));
        let sizes = measure_tree(&container, &|node: &Node| node.content_size);
        assert_eq!(sizes.get(1), Size::new(10.0, 10.0));
        assert_eq!(sizes.get(2), Size::new(40.0, 20.0));
    }

    #[test]
    fn grid_sums_track_maxima() {
        let container = Node::grid(
            1,
            style::GridContainerStyle {
                template_columns: GridTemplate::from_tracks(vec![
                    TrackSize::auto(),
                    TrackSize::auto(),
                ]),
                row_gap: 10.0,
                column_gap: 20.0,
                ..style::GridContainerStyle::default()
            },
            vec![
                leaf(2, 100.0, 40.0),
                leaf(3, 60.0, 50.0),
                leaf(4, 80.0, 30.0),
            ],
        );
        // Two columns: row 0 = [2, 3], row 1 = [4].
        // Col widths: max(100, 80) = 100, 60. Row heights: max(40, 50), 30.
        // Width: 100 + 20 + 60. Height: 50 + 10 + 30.
        assert_eq!(measure_intrinsic_size(&container), Size::new(180.0, 90.0));
    }

    #[test]
    fn grid_column_flow_assignment() {
        let container = Node::grid(
            1,
            style::GridContainerStyle {
                template_rows: GridTemplate::from_tracks(vec![
                    TrackSize::auto(),
                    TrackSize::auto(),
                ]),
                auto_flow: GridAutoFlow::Column,
                ..style::GridContainerStyle::default()
            },
            vec![
                leaf(2, 10.0, 10.0),
                leaf(3, 20.0, 20.0),
                leaf(4, 30.0, 30.0),
            ],
        );
        // Two rows, column flow: col 0 = [2, 3], col 1 = [4].
        // Col widths: max(10, 20), 30. Row heights: max(10, 30), 20.
        assert_eq!(measure_intrinsic_size(&container), Size::new(50.0, 50.0));
    }

    #[test]
    fn absolute_children_do_not_contribute() {
        let mut abs = leaf(3, 500.0, 500.0);
        abs.style = BoxStyle {
            position: Position::Absolute,
            ..BoxStyle::default()
        };
        let container = Node::flex(1, FlexContainerStyle::row(), vec![leaf(2, 40.0, 20.0), abs]);
        assert_eq!(measure_intrinsic_size(&container), Size::new(40.0, 20.0));
    }

    #[test]
    fn deep_tree_does_not_overflow_stack() {
        let mut node = leaf(100_000, 10.0, 10.0);
        for depth in (0..10_000u64).rev() {
            node = Node::flex(depth, FlexContainerStyle::column(), vec![node]);
        }
        assert_eq!(measure_intrinsic_size(&node), Size::new(10.0, 10.0));
    }
}
