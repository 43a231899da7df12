//! Flexbox solver.
//!
//! Lays out one container's children in eight phases:
//! 1. Collect in-flow items with base / hypothetical sizes.
//! 2. Partition items into lines (wrapping).
//! 3. Resolve flexible lengths (iterative grow/shrink with freezing).
//! 4. Position lines on the cross axis (align-content).
//! 5. Resolve per-item cross sizes (align-items / align-self).
//! 6. Position items on the main axis (justify-content, margin collapsing).
//! 7. Position items on the cross axis within their line.
//! 8. Emit layouts; resolve absolute children against the content box.

use geometry::{Rect, Size};
use smallvec::SmallVec;
use style::{AlignContent, AlignItems, FlexContainerStyle, FlexWrap, JustifyContent, Position};
use tracing::trace;

use crate::absolute::layout_absolute_child;
use crate::align::align_in_cell;
use crate::axis::Axis;
use crate::intrinsic::IntrinsicSizes;
use crate::result::ComputedLayout;
use crate::tree::Node;

/// Safety bound on the freeze-and-redistribute loop. Convergence needs at
/// most one iteration per item; the cap guards float edge cases.
const MAX_FLEX_ITERATIONS: usize = 100;

type LineItems = SmallVec<[usize; 8]>;

// ─────────────────────────────────────────────────────────────────────────────
// Item / line state
// ─────────────────────────────────────────────────────────────────────────────

struct FlexItem<'t> {
    node: &'t Node,
    source_index: usize,
    order: i32,
    grow: f32,
    shrink: f32,
    flex_base: f32,
    hypo_main: f32,
    hypo_cross: f32,
    baseline: f32,
    align_self: Option<AlignItems>,
    /// Resolved sizes and in-line positions, filled by phases 3–7.
    main: f32,
    cross: f32,
    main_pos: f32,
    cross_pos: f32,
    /// Effective main-axis margins; collapsing rewrites these.
    margin_main_start: f32,
    margin_main_end: f32,
    frozen: bool,
}

impl FlexItem<'_> {
    fn margin_main_sum(&self) -> f32 {
        self.margin_main_start + self.margin_main_end
    }
}

struct FlexLine {
    items: LineItems,
    cross_size: f32,
    max_baseline: f32,
    cross_pos: f32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Solver
// ─────────────────────────────────────────────────────────────────────────────

/// Lay out `container`'s children into `out`, relative to the container's
/// border box. `avail` is the container's content-box size.
pub(crate) fn layout_flex(
    container: &Node,
    style: &FlexContainerStyle,
    avail: Size,
    intrinsic: &IntrinsicSizes,
    out: &mut Vec<ComputedLayout>,
) {
    let axis = Axis::from_direction(style.direction);
    let avail_main = axis.main_size(avail);
    let avail_cross = axis.cross_size(avail);

    // Phase 1: collect in-flow items; set absolutes aside.
    let mut items: Vec<FlexItem<'_>> = Vec::with_capacity(container.children.len());
    let mut absolutes: Vec<&Node> = Vec::new();
    for (source_index, child) in container.children.iter().enumerate() {
        if child.style.position == Position::Absolute {
            absolutes.push(child);
            continue;
        }
        items.push(collect_item(child, source_index, axis, avail_main, avail_cross, intrinsic));
    }
    trace!(
        container = container.id,
        in_flow = items.len(),
        absolute = absolutes.len(),
        "flex solve"
    );

    // Phase 1.5: stable order. Ties keep source order via the index key.
    items.sort_by_key(|item| (item.order, item.source_index));

    // Phase 2: partition into lines.
    let mut lines = partition_lines(&items, style.wrap, avail_main, style.gap, axis);

    // Phase 3: resolve flexible lengths per line.
    for line in &lines {
        resolve_flexible_lengths(&mut items, line, avail_main, style.gap, axis);
    }

    // Phase 4: position lines on the cross axis.
    position_lines(&mut lines, style, avail_cross);

    // Phases 5–7: per-line cross sizes, main positions, cross positions.
    for line in &lines {
        resolve_cross_sizes(&mut items, line, style, axis);
        position_main(&mut items, line, style, avail_main, axis);
        position_cross(&mut items, line, style, axis);
    }

    // Phase 8: emit, offsetting by the container padding.
    let padding = container.style.padding;
    let pad_main = axis.main_start(padding);
    let pad_cross = axis.cross_start(padding);
    for line in &lines {
        for &i in &line.items {
            let item = &items[i];
            let (x, y) = axis.to_point(
                pad_main + item.main_pos,
                pad_cross + line.cross_pos + item.cross_pos,
            );
            let size = axis.to_size(item.main, item.cross);
            out.push(ComputedLayout::new(
                item.node.id,
                Rect::from_origin_size(x, y, size),
                item.node.style.padding,
            ));
        }
    }

    for child in absolutes {
        out.push(layout_absolute_child(child, avail, padding, intrinsic.get(child.id)));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Phase 1 — item collection
// ─────────────────────────────────────────────────────────────────────────────

fn collect_item<'t>(
    child: &'t Node,
    source_index: usize,
    axis: Axis,
    avail_main: f32,
    avail_cross: f32,
    intrinsic: &IntrinsicSizes,
) -> FlexItem<'t> {
    let item_style = child.flex_item_style();
    let intrinsic_size = intrinsic.get(child.id);
    let intrinsic_main = axis.main_size(intrinsic_size);
    let intrinsic_cross = axis.cross_size(intrinsic_size);

    // An explicit main dimension wins over the basis; an auto basis (and the
    // content keywords) falls back to the intrinsic main size.
    let main_dim = axis.main_dim(&child.style);
    let flex_base = if !main_dim.is_auto() {
        main_dim.resolve(avail_main, intrinsic_main)
    } else {
        item_style.basis.resolve(avail_main, intrinsic_main)
    };
    let hypo_main = axis.clamp_main(&child.style, flex_base);

    let cross_dim = axis.cross_dim(&child.style);
    let hypo_cross = axis.clamp_cross(&child.style, cross_dim.resolve(avail_cross, intrinsic_cross));

    let baseline = child.content_size.map_or(hypo_cross, |c| c.baseline);
    let margin = child.style.margin;

    FlexItem {
        node: child,
        source_index,
        order: item_style.order,
        grow: item_style.grow,
        shrink: item_style.shrink,
        flex_base,
        hypo_main,
        hypo_cross,
        baseline,
        align_self: item_style.align_self,
        main: hypo_main,
        cross: hypo_cross,
        main_pos: 0.0,
        cross_pos: 0.0,
        margin_main_start: axis.main_start(margin),
        margin_main_end: axis.main_end(margin),
        frozen: false,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Phase 2 — line partitioning
// ─────────────────────────────────────────────────────────────────────────────

fn partition_lines(
    items: &[FlexItem<'_>],
    wrap: FlexWrap,
    avail_main: f32,
    gap: f32,
    axis: Axis,
) -> Vec<FlexLine> {
    let mut lines: Vec<FlexLine> = Vec::new();
    let mut current = LineItems::new();
    let mut used = 0.0f32;

    for (i, item) in items.iter().enumerate() {
        let outer = item.hypo_main + item.margin_main_sum();
        if wrap != FlexWrap::NoWrap && !current.is_empty() && used + gap + outer > avail_main {
            lines.push(finish_line(std::mem::take(&mut current), items, axis));
            used = 0.0;
        }
        if !current.is_empty() {
            used += gap;
        }
        used += outer;
        current.push(i);
    }
    if !current.is_empty() {
        lines.push(finish_line(current, items, axis));
    }
    lines
}

/// Close a line: its cross size is the tallest baseline plus the tallest
/// below-baseline extent, so baseline participation can grow the line.
fn finish_line(line_items: LineItems, items: &[FlexItem<'_>], axis: Axis) -> FlexLine {
    let mut max_baseline = 0.0f32;
    let mut max_below = 0.0f32;
    for &i in &line_items {
        let item = &items[i];
        max_baseline = max_baseline.max(item.baseline);
        max_below = max_below
            .max(item.hypo_cross - item.baseline + axis.cross_end(item.node.style.margin));
    }
    FlexLine {
        items: line_items,
        cross_size: max_baseline + max_below,
        max_baseline,
        cross_pos: 0.0,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Phase 3 — flexible lengths
// ─────────────────────────────────────────────────────────────────────────────

fn resolve_flexible_lengths(
    items: &mut [FlexItem<'_>],
    line: &FlexLine,
    avail_main: f32,
    gap: f32,
    axis: Axis,
) {
    let count = line.items.len();
    if count == 0 {
        return;
    }
    let used: f32 = line
        .items
        .iter()
        .map(|&i| items[i].hypo_main + items[i].margin_main_sum())
        .sum::<f32>()
        + gap * (count - 1) as f32;
    let free = avail_main - used;
    let growing = free >= 0.0;

    for &i in &line.items {
        let item = &mut items[i];
        item.main = item.hypo_main;
        item.frozen = if growing {
            item.grow <= 0.0
        } else {
            item.shrink <= 0.0 || item.flex_base <= 0.0
        };
    }

    for _ in 0..MAX_FLEX_ITERATIONS {
        // Free space not yet claimed by frozen items, measured against the
        // hypothetical sizes.
        let consumed: f32 = line
            .items
            .iter()
            .filter(|&&i| items[i].frozen)
            .map(|&i| items[i].main - items[i].hypo_main)
            .sum();
        let remaining = free - consumed;

        let unfrozen: LineItems = line.items.iter().copied().filter(|&i| !items[i].frozen).collect();
        if unfrozen.is_empty() {
            break;
        }

        let mut froze_any = false;
        if growing {
            if remaining <= 0.0 {
                break;
            }
            let total_grow: f32 = unfrozen.iter().map(|&i| items[i].grow).sum();
            if total_grow <= 0.0 {
                break;
            }
            let per_grow = remaining / total_grow;
            for &i in &unfrozen {
                let min = axis_min(&items[i], axis);
                let max = axis_max(&items[i], axis);
                let item = &mut items[i];
                let candidate = item.hypo_main + per_grow * item.grow;
                if let Some(max) = max.filter(|&max| candidate > max) {
                    item.main = max;
                    item.frozen = true;
                    froze_any = true;
                } else if candidate < min {
                    item.main = min;
                    item.frozen = true;
                    froze_any = true;
                } else {
                    item.main = candidate;
                }
            }
        } else {
            if remaining >= 0.0 {
                break;
            }
            let overflow = -remaining;
            let total_weight: f32 =
                unfrozen.iter().map(|&i| items[i].shrink * items[i].flex_base).sum();
            if total_weight <= 0.0 {
                break;
            }
            let per_weight = overflow / total_weight;
            for &i in &unfrozen {
                let min = axis_min(&items[i], axis);
                let item = &mut items[i];
                let weight = item.shrink * item.flex_base;
                let candidate = item.hypo_main - per_weight * weight;
                if candidate < min {
                    item.main = min;
                    item.frozen = true;
                    froze_any = true;
                } else {
                    item.main = candidate;
                }
            }
        }

        if !froze_any {
            for &i in &unfrozen {
                items[i].frozen = true;
            }
            break;
        }
    }
}

fn axis_min(item: &FlexItem<'_>, axis: Axis) -> f32 {
    if axis.horizontal { item.node.style.min_width } else { item.node.style.min_height }
}

fn axis_max(item: &FlexItem<'_>, axis: Axis) -> Option<f32> {
    if axis.horizontal { item.node.style.max_width } else { item.node.style.max_height }
}

// ─────────────────────────────────────────────────────────────────────────────
// Phase 4 — line packing
// ─────────────────────────────────────────────────────────────────────────────

/// Leading offset and extra per-item gap for one distribution keyword.
/// Shared by align-content (lines) and justify-content (items).
fn distribute(free: f32, count: usize, mode: JustifyContent) -> (f32, f32) {
    match mode {
        JustifyContent::FlexStart => (0.0, 0.0),
        JustifyContent::FlexEnd => (free, 0.0),
        JustifyContent::Center => (free / 2.0, 0.0),
        JustifyContent::SpaceBetween => {
            if count > 1 { (0.0, free / (count - 1) as f32) } else { (0.0, 0.0) }
        }
        JustifyContent::SpaceAround => {
            let share = free / count as f32;
            (share / 2.0, share)
        }
        JustifyContent::SpaceEvenly => {
            let share = free / (count + 1) as f32;
            (share, share)
        }
    }
}

/// Align-content shares the justify distribution table; stretch packs lines
/// like flex-start (a single stretched line is special-cased separately).
fn align_content_mode(align: AlignContent) -> JustifyContent {
    match align {
        AlignContent::FlexStart | AlignContent::Stretch => JustifyContent::FlexStart,
        AlignContent::FlexEnd => JustifyContent::FlexEnd,
        AlignContent::Center => JustifyContent::Center,
        AlignContent::SpaceBetween => JustifyContent::SpaceBetween,
        AlignContent::SpaceAround => JustifyContent::SpaceAround,
        AlignContent::SpaceEvenly => JustifyContent::SpaceEvenly,
    }
}

fn position_lines(lines: &mut [FlexLine], style: &FlexContainerStyle, avail_cross: f32) {
    let count = lines.len();
    if count == 0 {
        return;
    }
    // A lone stretched line takes the whole cross extent.
    if count == 1 && style.align_content == AlignContent::Stretch {
        lines[0].cross_size = avail_cross;
    }

    let total: f32 = lines.iter().map(|l| l.cross_size).sum::<f32>()
        + style.row_gap * (count - 1) as f32;
    let free = (avail_cross - total).max(0.0);
    let (start, extra) = distribute(free, count, align_content_mode(style.align_content));

    let mut pos = start;
    for line in lines.iter_mut() {
        line.cross_pos = pos;
        pos += line.cross_size + style.row_gap + extra;
    }

    // Wrap-reverse stacks lines from the cross end downward.
    if style.wrap == FlexWrap::WrapReverse {
        for line in lines.iter_mut() {
            line.cross_pos = avail_cross - line.cross_pos - line.cross_size;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Phase 5 — cross sizes
// ─────────────────────────────────────────────────────────────────────────────

fn resolve_cross_sizes(
    items: &mut [FlexItem<'_>],
    line: &FlexLine,
    style: &FlexContainerStyle,
    axis: Axis,
) {
    for &i in &line.items {
        let item = &mut items[i];
        let align = item.align_self.unwrap_or(style.align_items);
        item.cross = if align == AlignItems::Stretch {
            let stretched = line.cross_size - axis.cross_sum(item.node.style.margin);
            axis.clamp_cross(&item.node.style, stretched)
        } else {
            item.hypo_cross
        };
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Phase 6 — main positions
// ─────────────────────────────────────────────────────────────────────────────

/// Collapse two adjacent margins: both non-negative → max, both negative →
/// min, mixed signs → algebraic sum.
fn collapse_margins(end: f32, start: f32) -> f32 {
    if end >= 0.0 && start >= 0.0 {
        end.max(start)
    } else if end < 0.0 && start < 0.0 {
        end.min(start)
    } else {
        end + start
    }
}

fn position_main(
    items: &mut [FlexItem<'_>],
    line: &FlexLine,
    style: &FlexContainerStyle,
    avail_main: f32,
    axis: Axis,
) {
    let count = line.items.len();
    if count == 0 {
        return;
    }

    // Margin collapsing between adjacent siblings, column-like only. The
    // first item keeps its start margin, the last its end margin.
    if style.margin_collapse && !axis.horizontal {
        for k in 0..count - 1 {
            let a = line.items[k];
            let b = line.items[k + 1];
            let collapsed = collapse_margins(items[a].margin_main_end, items[b].margin_main_start);
            items[b].margin_main_start = collapsed;
            items[a].margin_main_end = 0.0;
        }
    }

    let used: f32 = line
        .items
        .iter()
        .map(|&i| items[i].main + items[i].margin_main_sum())
        .sum::<f32>()
        + style.gap * (count - 1) as f32;
    let remaining = (avail_main - used).max(0.0);
    let (start, extra) = distribute(remaining, count, style.justify_content);

    let mut pos = start;
    for &i in &line.items {
        let item = &mut items[i];
        item.main_pos = pos + item.margin_main_start;
        pos += item.margin_main_sum() + item.main + style.gap + extra;
    }

    if axis.reversed {
        for &i in &line.items {
            let item = &mut items[i];
            item.main_pos = avail_main - item.main_pos - item.main;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Phase 7 — cross positions
// ─────────────────────────────────────────────────────────────────────────────

fn position_cross(
    items: &mut [FlexItem<'_>],
    line: &FlexLine,
    style: &FlexContainerStyle,
    axis: Axis,
) {
    for &i in &line.items {
        let item = &mut items[i];
        let align = item.align_self.unwrap_or(style.align_items);
        item.cross_pos = if align == AlignItems::Baseline {
            line.max_baseline - item.baseline
        } else {
            let margin = item.node.style.margin;
            let inner = axis.cross_start(margin);
            let avail_inner = line.cross_size - axis.cross_sum(margin);
            align_in_cell(align, inner, avail_inner, item.cross).0
        };
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
