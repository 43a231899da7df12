//! Grid solver.
//!
//! Lays out one container's children in ten phases:
//! expand templates → resolve named lines/areas → place items (explicit then
//! auto) → initialize tracks → base-size from content → distribute fr →
//! position tracks → row baselines → position items in cells → absolutes.

pub(crate) mod placement;
pub(crate) mod template;
pub(crate) mod tracks;

use geometry::{Rect, Size};
use style::{AlignItems, GridContainerStyle, GridItemStyle, Position};
use tracing::trace;

use crate::absolute::layout_absolute_child;
use crate::align::align_in_cell;
use crate::intrinsic::IntrinsicSizes;
use crate::result::ComputedLayout;
use crate::tree::Node;

use self::placement::PlacedItem;
use self::tracks::Track;

/// Lay out `container`'s children into `out`, relative to the container's
/// border box. `avail` is the container's content-box size.
pub(crate) fn layout_grid(
    container: &Node,
    style: &GridContainerStyle,
    avail: Size,
    intrinsic: &IntrinsicSizes,
    out: &mut Vec<ComputedLayout>,
) {
    let padding = container.style.padding;

    // G1: expand both templates against the available space.
    let col_tracks = template::expand_template(&style.template_columns, avail.width, style.column_gap);
    let row_tracks = template::expand_template(&style.template_rows, avail.height, style.row_gap);

    // G2: line names from the expanded tracks, plus the synthetic
    // `<area>-start` / `<area>-end` lines from template areas.
    let mut col_names = template::collect_line_names(&col_tracks);
    let mut row_names = template::collect_line_names(&row_tracks);
    let areas = style
        .template_areas
        .as_deref()
        .map(template::parse_areas)
        .unwrap_or_default();
    for (name, bounds) in &areas {
        row_names.add(&format!("{name}-start"), bounds.row_start);
        row_names.add(&format!("{name}-end"), bounds.row_end);
        col_names.add(&format!("{name}-start"), bounds.col_start);
        col_names.add(&format!("{name}-end"), bounds.col_end);
    }

    // G3: partition children and place the in-flow ones.
    let mut in_flow: Vec<&Node> = Vec::new();
    let mut absolutes: Vec<&Node> = Vec::new();
    for child in &container.children {
        if child.style.position == Position::Absolute {
            absolutes.push(child);
        } else {
            in_flow.push(child);
        }
    }
    let item_styles: Vec<GridItemStyle> = in_flow.iter().map(|c| c.grid_item_style()).collect();
    let placements = placement::place_items(
        &item_styles,
        row_tracks.len(),
        col_tracks.len(),
        &row_names,
        &col_names,
        &areas,
        style.auto_flow,
    );
    trace!(
        container = container.id,
        in_flow = in_flow.len(),
        absolute = absolutes.len(),
        "grid solve"
    );

    // G4: final track counts cover both the templates and the placements.
    let placed_rows = placements.iter().map(|p| p.row_end).max().unwrap_or(0);
    let placed_cols = placements.iter().map(|p| p.col_end).max().unwrap_or(0);
    let row_count = row_tracks.len().max(placed_rows);
    let col_count = col_tracks.len().max(placed_cols);
    let mut cols = tracks::init_tracks(
        &col_tracks,
        col_count,
        &style.template_columns.auto_size,
        avail.width,
    );
    let mut rows = tracks::init_tracks(
        &row_tracks,
        row_count,
        &style.template_rows.auto_size,
        avail.height,
    );

    // Per-track content maxima: each item spreads its outer size evenly
    // over the tracks it spans.
    let mut col_content = vec![0.0f32; col_count];
    let mut row_content = vec![0.0f32; row_count];
    for placed in &placements {
        let child = in_flow[placed.child_index];
        let outer = item_outer_size(child, intrinsic);
        let col_share = outer.width / placed.col_span() as f32;
        for col in placed.col_start..placed.col_end.min(col_count) {
            col_content[col] = col_content[col].max(col_share);
        }
        let row_share = outer.height / placed.row_span() as f32;
        for row in placed.row_start..placed.row_end.min(row_count) {
            row_content[row] = row_content[row].max(row_share);
        }
    }

    // G5–G7: size and position both axes.
    tracks::compute_base_sizes(&mut cols, &col_content, avail.width);
    tracks::distribute_fr(&mut cols, avail.width, style.column_gap);
    tracks::position_tracks(&mut cols, padding.left, style.column_gap);

    tracks::compute_base_sizes(&mut rows, &row_content, avail.height);
    tracks::distribute_fr(&mut rows, avail.height, style.row_gap);
    tracks::position_tracks(&mut rows, padding.top, style.row_gap);

    // G8: row baselines over single-row, baseline-aligned items.
    let mut row_baselines = vec![0.0f32; row_count];
    for placed in &placements {
        if placed.row_span() != 1 {
            continue;
        }
        let child = in_flow[placed.child_index];
        let align = item_styles[placed.child_index]
            .align_self
            .unwrap_or(style.align_items);
        if align == AlignItems::Baseline {
            let baseline = child.style.margin.top + item_baseline(child, intrinsic);
            let slot = &mut row_baselines[placed.row_start];
            *slot = slot.max(baseline);
        }
    }

    // G9: position each item within its cell rect.
    for placed in &placements {
        let child = in_flow[placed.child_index];
        out.push(position_in_cell(
            child,
            &item_styles[placed.child_index],
            placed,
            &cols,
            &rows,
            &row_baselines,
            style,
            intrinsic,
        ));
    }

    // G10: absolute children against the content box.
    for child in absolutes {
        out.push(layout_absolute_child(child, avail, padding, intrinsic.get(child.id)));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Item helpers
// ─────────────────────────────────────────────────────────────────────────────

/// An item's content contribution to track sizing: explicit pixel dimension
/// where set, else intrinsic, plus margins.
fn item_outer_size(child: &Node, intrinsic: &IntrinsicSizes) -> Size {
    let intrinsic_size = intrinsic.get(child.id);
    let margin = child.style.margin;
    Size::new(
        child.style.width.px().unwrap_or(intrinsic_size.width) + margin.horizontal(),
        child.style.height.px().unwrap_or(intrinsic_size.height) + margin.vertical(),
    )
}

/// The item's own baseline: measured content baseline, else its
/// hypothetical height.
fn item_baseline(child: &Node, intrinsic: &IntrinsicSizes) -> f32 {
    match child.content_size {
        Some(content) => content.baseline,
        None => child.style.height.px().unwrap_or(intrinsic.get(child.id).height),
    }
}

#[allow(clippy::too_many_arguments)]
fn position_in_cell(
    child: &Node,
    item_style: &GridItemStyle,
    placed: &PlacedItem,
    cols: &[Track],
    rows: &[Track],
    row_baselines: &[f32],
    style: &GridContainerStyle,
    intrinsic: &IntrinsicSizes,
) -> ComputedLayout {
    let cell_x = cols.get(placed.col_start).map_or(0.0, |t| t.position);
    let cell_y = rows.get(placed.row_start).map_or(0.0, |t| t.position);
    let cell_w = tracks::span_size(cols, placed.col_start, placed.col_end, style.column_gap);
    let cell_h = tracks::span_size(rows, placed.row_start, placed.row_end, style.row_gap);

    let margin = child.style.margin;
    let avail_w = (cell_w - margin.horizontal()).max(0.0);
    let avail_h = (cell_h - margin.vertical()).max(0.0);

    // Percent item sizes resolve against the cell inner size minus margins.
    let intrinsic_size = intrinsic.get(child.id);
    let width = if child.style.width.is_auto() {
        intrinsic_size.width
    } else {
        child.style.width.resolve(avail_w, intrinsic_size.width)
    };
    let height = if child.style.height.is_auto() {
        intrinsic_size.height
    } else {
        child.style.height.resolve(avail_h, intrinsic_size.height)
    };

    let justify = item_style.justify_self.unwrap_or(style.justify_items);
    let align = item_style.align_self.unwrap_or(style.align_items);

    let (x, width) = align_in_cell(justify, cell_x + margin.left, avail_w, width);
    let (y, height) = if align == AlignItems::Baseline && placed.row_span() == 1 {
        let row_baseline = row_baselines.get(placed.row_start).copied().unwrap_or(0.0);
        (cell_y + (row_baseline - item_baseline(child, intrinsic)), height)
    } else if align == AlignItems::Baseline {
        // Multi-row spanners never participate in baseline alignment.
        (cell_y + margin.top, height)
    } else {
        align_in_cell(align, cell_y + margin.top, avail_h, height)
    };

    let width = child.style.clamp_width(width);
    let height = child.style.clamp_height(height);
    ComputedLayout::new(child.id, Rect::new(x, y, width, height), child.style.padding)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intrinsic::measure_tree;
    use crate::tree::{ContainerKind, ContentSize, ItemKind};
    use style::{
        BoxStyle, Dimension, GridAutoFlow, GridSpan, GridTemplate, RepeatMode, TrackEntry,
        TrackSize,
    };

    const EPS: f32 = 0.1;

    fn solve(container: &Node, avail: Size) -> Vec<ComputedLayout> {
        let style = match &container.container {
            ContainerKind::Grid(style) => style.clone(),
            _ => panic!("not a grid container"),
        };
        let intrinsic = measure_tree(container, &|node: &Node| node.content_size);
        let mut out = Vec::new();
        layout_grid(container, &style, avail, &intrinsic, &mut out);
        out
    }

    fn rect_of(out: &[ComputedLayout], id: u64) -> Rect {
        out.iter()
            .find(|l| l.node_id == id)
            .unwrap_or_else(|| panic!("no layout for {id}"))
            .border_rect
    }

    fn leaf(id: u64, w: f32, h: f32) -> Node {
        Node::leaf(id, ContentSize::new(w, h))
    }

    #[test]
    fn three_equal_columns() {
        let container = Node::grid(
            0,
            GridContainerStyle::columns(3),
            vec![Node::new(1), Node::new(2), Node::new(3)],
        );
        let out = solve(&container, Size::new(300.0, 100.0));
        for (id, x) in [(1, 0.0), (2, 100.0), (3, 200.0)] {
            let r = rect_of(&out, id);
            assert!((r.x - x).abs() < EPS);
            assert!((r.width - 100.0).abs() < EPS);
        }
    }

    #[test]
    fn fixed_and_fr_columns() {
        let container = Node::grid(
            0,
            GridContainerStyle::with_columns(vec![
                TrackSize::px(50.0),
                TrackSize::fr(1.0),
                TrackSize::fr(2.0),
            ]),
            vec![Node::new(1), Node::new(2), Node::new(3)],
        );
        let out = solve(&container, Size::new(350.0, 100.0));
        for (id, x, w) in [(1, 0.0, 50.0), (2, 50.0, 100.0), (3, 150.0, 200.0)] {
            let r = rect_of(&out, id);
            assert!((r.x - x).abs() < EPS, "item {id}");
            assert!((r.width - w).abs() < EPS, "item {id}");
        }
    }

    #[test]
    fn auto_fill_minmax_two_tracks() {
        let container = Node::grid(
            0,
            GridContainerStyle {
                template_columns: GridTemplate {
                    entries: vec![TrackEntry::repeat(
                        RepeatMode::AutoFill,
                        vec![TrackSize::minmax(TrackSize::px(100.0), TrackSize::fr(1.0))],
                    )],
                    auto_size: TrackSize::default(),
                },
                ..GridContainerStyle::default()
            },
            vec![Node::new(1), Node::new(2)],
        );
        let out = solve(&container, Size::new(250.0, 100.0));
        assert!((rect_of(&out, 1).width - 125.0).abs() < EPS);
        assert!((rect_of(&out, 2).width - 125.0).abs() < EPS);
        assert!((rect_of(&out, 2).x - 125.0).abs() < EPS);
    }

    #[test]
    fn gaps_offset_cells() {
        let container = Node::grid(
            0,
            GridContainerStyle {
                template_columns: GridTemplate::from_tracks(vec![
                    TrackSize::px(100.0),
                    TrackSize::px(100.0),
                ]),
                column_gap: 20.0,
                row_gap: 10.0,
                ..GridContainerStyle::default()
            },
            vec![leaf(1, 0.0, 50.0), leaf(2, 0.0, 50.0), leaf(3, 0.0, 50.0)],
        );
        let out = solve(&container, Size::new(600.0, 300.0));
        assert!((rect_of(&out, 1).x - 0.0).abs() < EPS);
        assert!((rect_of(&out, 2).x - 120.0).abs() < EPS);
        // Item 3 wraps to row 1: below the 50-tall row plus the row gap.
        assert!((rect_of(&out, 3).x - 0.0).abs() < EPS);
        assert!((rect_of(&out, 3).y - 60.0).abs() < EPS);
    }

    #[test]
    fn padding_offsets_tracks() {
        let mut container = Node::grid(
            0,
            GridContainerStyle::with_columns(vec![TrackSize::px(100.0)]),
            vec![Node::new(1)],
        );
        container.style.padding = geometry::Edges::new(5.0, 0.0, 0.0, 8.0);
        // The driver passes the content-box size; positions still start at
        // the padding edge of the border box.
        let out = solve(&container, Size::new(200.0, 100.0));
        let r = rect_of(&out, 1);
        assert!((r.x - 8.0).abs() < EPS);
        assert!((r.y - 5.0).abs() < EPS);
    }

    #[test]
    fn auto_rows_size_to_content() {
        let container = Node::grid(
            0,
            GridContainerStyle::with_columns(vec![TrackSize::px(100.0), TrackSize::px(100.0)]),
            vec![leaf(1, 0.0, 30.0), leaf(2, 0.0, 50.0), leaf(3, 0.0, 20.0)],
        );
        let out = solve(&container, Size::new(600.0, 300.0));
        // Row 0 is max(30, 50) tall; row 1 starts at 50.
        assert!((rect_of(&out, 3).y - 50.0).abs() < EPS);
    }

    #[test]
    fn explicit_placement_spans_tracks() {
        let mut wide = Node::new(1);
        wide.item = ItemKind::Grid(GridItemStyle {
            row: GridSpan::line(1),
            column: GridSpan::between(1, 3),
            ..GridItemStyle::default()
        });
        let container = Node::grid(
            0,
            GridContainerStyle {
                template_columns: GridTemplate::from_tracks(vec![
                    TrackSize::px(100.0),
                    TrackSize::px(100.0),
                ]),
                column_gap: 10.0,
                ..GridContainerStyle::default()
            },
            vec![wide],
        );
        let out = solve(&container, Size::new(600.0, 100.0));
        // Spans both tracks plus the interior gap.
        assert!((rect_of(&out, 1).width - 210.0).abs() < EPS);
    }

    #[test]
    fn template_areas_place_items() {
        let header = || Some("header".to_string());
        let side = || Some("side".to_string());
        let main = || Some("main".to_string());
        let container = Node::grid(
            0,
            GridContainerStyle {
                template_columns: GridTemplate::from_tracks(vec![
                    TrackSize::px(100.0),
                    TrackSize::px(200.0),
                ]),
                template_rows: GridTemplate::from_tracks(vec![
                    TrackSize::px(40.0),
                    TrackSize::px(160.0),
                ]),
                template_areas: Some(vec![
                    vec![header(), header()],
                    vec![side(), main()],
                ]),
                ..GridContainerStyle::default()
            },
            vec![
                Node {
                    item: ItemKind::Grid(GridItemStyle::in_area("header")),
                    ..Node::new(1)
                },
                Node {
                    item: ItemKind::Grid(GridItemStyle::in_area("main")),
                    ..Node::new(2)
                },
                Node {
                    item: ItemKind::Grid(GridItemStyle::in_area("side")),
                    ..Node::new(3)
                },
            ],
        );
        let out = solve(&container, Size::new(300.0, 200.0));
        assert_eq!(rect_of(&out, 1), Rect::new(0.0, 0.0, 300.0, 40.0));
        assert_eq!(rect_of(&out, 2), Rect::new(100.0, 40.0, 200.0, 160.0));
        assert_eq!(rect_of(&out, 3), Rect::new(0.0, 40.0, 100.0, 160.0));
    }

    #[test]
    fn synthetic_area_lines_resolve() {
        let a = || Some("a".to_string());
        let mut item = Node::new(1);
        item.item = ItemKind::Grid(GridItemStyle {
            row: GridSpan::line(1),
            column: GridSpan {
                start: style::GridLine::Named("a-start".into()),
                end: style::GridLine::Named("a-end".into()),
            },
            ..GridItemStyle::default()
        });
        let container = Node::grid(
            0,
            GridContainerStyle {
                template_columns: GridTemplate::from_tracks(vec![
                    TrackSize::px(50.0),
                    TrackSize::px(50.0),
                    TrackSize::px(50.0),
                ]),
                template_areas: Some(vec![vec![None, a(), a()]]),
                ..GridContainerStyle::default()
            },
            vec![item],
        );
        let out = solve(&container, Size::new(300.0, 100.0));
        let r = rect_of(&out, 1);
        assert!((r.x - 50.0).abs() < EPS);
        assert!((r.width - 100.0).abs() < EPS);
    }

    #[test]
    fn percent_child_resolves_against_cell() {
        let mut child = Node::new(1);
        child.style.width = Dimension::Percent(0.5);
        child.style.height = Dimension::Px(10.0);
        child.item = ItemKind::Grid(GridItemStyle {
            justify_self: Some(AlignItems::FlexStart),
            ..GridItemStyle::default()
        });
        let container = Node::grid(
            0,
            GridContainerStyle::with_columns(vec![TrackSize::px(200.0)]),
            vec![child],
        );
        let out = solve(&container, Size::new(600.0, 100.0));
        assert!((rect_of(&out, 1).width - 100.0).abs() < EPS);
    }

    #[test]
    fn stretch_fills_cell_start_keeps_size() {
        let stretched = Node::new(1);
        let mut pinned = leaf(2, 40.0, 20.0);
        pinned.item = ItemKind::Grid(GridItemStyle {
            justify_self: Some(AlignItems::FlexEnd),
            align_self: Some(AlignItems::Center),
            ..GridItemStyle::default()
        });
        let container = Node::grid(
            0,
            GridContainerStyle {
                template_columns: GridTemplate::from_tracks(vec![
                    TrackSize::px(100.0),
                    TrackSize::px(100.0),
                ]),
                template_rows: GridTemplate::from_tracks(vec![TrackSize::px(60.0)]),
                ..GridContainerStyle::default()
            },
            vec![stretched, pinned],
        );
        let out = solve(&container, Size::new(300.0, 100.0));
        // Default stretch fills the whole cell.
        assert_eq!(rect_of(&out, 1), Rect::new(0.0, 0.0, 100.0, 60.0));
        // FlexEnd / Center keep the content size.
        let r = rect_of(&out, 2);
        assert!((r.x - 160.0).abs() < EPS);
        assert!((r.y - 20.0).abs() < EPS);
        assert!((r.width - 40.0).abs() < EPS);
    }

    #[test]
    fn row_baseline_alignment() {
        let mut a = Node::leaf(1, ContentSize::with_baseline(40.0, 40.0, 30.0));
        a.item = ItemKind::Grid(GridItemStyle {
            align_self: Some(AlignItems::Baseline),
            ..GridItemStyle::default()
        });
        let mut b = Node::leaf(2, ContentSize::with_baseline(40.0, 60.0, 50.0));
        b.item = ItemKind::Grid(GridItemStyle {
            align_self: Some(AlignItems::Baseline),
            ..GridItemStyle::default()
        });
        let container = Node::grid(
            0,
            GridContainerStyle {
                template_columns: GridTemplate::from_tracks(vec![
                    TrackSize::px(100.0),
                    TrackSize::px(100.0),
                ]),
                template_rows: GridTemplate::from_tracks(vec![TrackSize::px(80.0)]),
                ..GridContainerStyle::default()
            },
            vec![a, b],
        );
        let out = solve(&container, Size::new(300.0, 100.0));
        let r1 = rect_of(&out, 1);
        let r2 = rect_of(&out, 2);
        assert!(((r1.y + 30.0) - (r2.y + 50.0)).abs() < EPS, "baselines line up");
    }

    #[test]
    fn multi_row_spanner_skips_baseline() {
        let mut spanner = Node::leaf(1, ContentSize::with_baseline(40.0, 40.0, 30.0));
        spanner.item = ItemKind::Grid(GridItemStyle {
            row: GridSpan::span(2),
            align_self: Some(AlignItems::Baseline),
            ..GridItemStyle::default()
        });
        let container = Node::grid(
            0,
            GridContainerStyle {
                template_columns: GridTemplate::from_tracks(vec![TrackSize::px(100.0)]),
                template_rows: GridTemplate::from_tracks(vec![
                    TrackSize::px(50.0),
                    TrackSize::px(50.0),
                ]),
                ..GridContainerStyle::default()
            },
            vec![spanner],
        );
        let out = solve(&container, Size::new(300.0, 200.0));
        // Falls back to start positioning.
        assert!((rect_of(&out, 1).y - 0.0).abs() < EPS);
    }

    #[test]
    fn column_dense_backfills() {
        let mut tall = Node::new(1);
        tall.item = ItemKind::Grid(GridItemStyle {
            row: GridSpan::span(2),
            ..GridItemStyle::default()
        });
        let container = Node::grid(
            0,
            GridContainerStyle {
                template_rows: GridTemplate::from_tracks(vec![
                    TrackSize::px(50.0),
                    TrackSize::px(50.0),
                    TrackSize::px(50.0),
                ]),
                auto_flow: GridAutoFlow::ColumnDense,
                ..GridContainerStyle::default()
            },
            vec![tall, Node::new(2), Node::new(3)],
        );
        let out = solve(&container, Size::new(300.0, 200.0));
        // Item 1 spans rows 0-1 of column 0; 2 and 3 fill rows 2 then the
        // gap-free continuation.
        assert!((rect_of(&out, 1).y - 0.0).abs() < EPS);
        assert!((rect_of(&out, 2).y - 100.0).abs() < EPS);
        assert!((rect_of(&out, 2).x - rect_of(&out, 1).x).abs() < EPS);
    }

    #[test]
    fn absolute_child_skips_tracks() {
        let mut abs = Node::new(9);
        abs.style = BoxStyle {
            position: Position::Absolute,
            width: Dimension::Px(10.0),
            height: Dimension::Px(10.0),
            left: Some(3.0),
            top: Some(4.0),
            ..BoxStyle::default()
        };
        let container = Node::grid(
            0,
            GridContainerStyle::columns(2),
            vec![Node::new(1), abs, Node::new(2)],
        );
        let out = solve(&container, Size::new(200.0, 100.0));
        // Both flow items land in row 0; the absolute child is positioned
        // by its insets.
        assert!((rect_of(&out, 1).x - 0.0).abs() < EPS);
        assert!((rect_of(&out, 2).x - 100.0).abs() < EPS);
        assert_eq!(rect_of(&out, 9), Rect::new(3.0, 4.0, 10.0, 10.0));
    }

    #[test]
    fn empty_container_emits_nothing() {
        let container = Node::grid(0, GridContainerStyle::default(), vec![]);
        assert!(solve(&container, Size::new(100.0, 100.0)).is_empty());
    }
}
