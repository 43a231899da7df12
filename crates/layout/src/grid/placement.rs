//! Item placement: explicit line/area resolution and cursor-based
//! auto-placement over a growable occupancy matrix.

use ahash::AHashMap;
use style::{GridAutoFlow, GridItemStyle, GridLine, GridSpan};

use super::template::{AreaBounds, LineNames};

// ─────────────────────────────────────────────────────────────────────────────
// Occupancy
// ─────────────────────────────────────────────────────────────────────────────

/// Row-major boolean occupancy matrix; grows on demand. Cells beyond the
/// current extent read as free.
#[derive(Debug, Default)]
struct Occupancy {
    cells: Vec<Vec<bool>>,
}

impl Occupancy {
    fn rows(&self) -> usize {
        self.cells.len()
    }

    fn cols(&self) -> usize {
        self.cells.iter().map(|row| row.len()).max().unwrap_or(0)
    }

    fn is_free(&self, row_start: usize, row_end: usize, col_start: usize, col_end: usize) -> bool {
        for row in row_start..row_end.min(self.cells.len()) {
            let cells = &self.cells[row];
            for col in col_start..col_end.min(cells.len()) {
                if cells[col] {
                    return false;
                }
            }
        }
        true
    }

    fn mark(&mut self, row_start: usize, row_end: usize, col_start: usize, col_end: usize) {
        if self.cells.len() < row_end {
            self.cells.resize_with(row_end, Vec::new);
        }
        for row in row_start..row_end {
            let cells = &mut self.cells[row];
            if cells.len() < col_end {
                cells.resize(col_end, false);
            }
            for cell in &mut cells[col_start..col_end] {
                *cell = true;
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Placement
// ─────────────────────────────────────────────────────────────────────────────

/// A child's resolved cell range, end-exclusive, 0-indexed tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PlacedItem {
    /// Index into the in-flow children list.
    pub child_index: usize,
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl PlacedItem {
    pub fn row_span(&self) -> usize {
        self.row_end - self.row_start
    }

    pub fn col_span(&self) -> usize {
        self.col_end - self.col_start
    }
}

/// Resolve one axis of an explicit placement to `(start, end)` track
/// indices. Returns `None` when the axis pins no line (auto or standalone
/// span).
fn resolve_explicit_axis(
    span: &GridSpan,
    names: &LineNames,
    explicit_tracks: usize,
) -> Option<(usize, usize)> {
    let line_count = explicit_tracks + 1;
    let resolve = |line: &GridLine, as_end: bool| -> Option<usize> {
        match line {
            GridLine::Line(n) => {
                // 1-indexed; negatives count from the end; clamp into range.
                let index = if *n > 0 {
                    *n as i64 - 1
                } else if *n < 0 {
                    line_count as i64 + *n as i64
                } else {
                    0
                };
                Some(index.max(0) as usize)
            }
            GridLine::Named(name) => Some(if as_end {
                names.end_index(name)
            } else {
                names.start_index(name)
            }),
            GridLine::Auto | GridLine::Span(_) => None,
        }
    };

    let start = resolve(&span.start, false);
    let end = resolve(&span.end, true);
    match (start, end) {
        (Some(start), Some(end)) => {
            let end = if end <= start { start + 1 } else { end };
            Some((start, end))
        }
        (Some(start), None) => {
            let span_count = match span.end {
                GridLine::Span(n) => n.max(1),
                _ => 1,
            };
            Some((start, start + span_count))
        }
        (None, Some(end)) => {
            let span_count = match span.start {
                GridLine::Span(n) => n.max(1),
                _ => 1,
            };
            let start = end.saturating_sub(span_count);
            Some((start, end.max(start + 1)))
        }
        (None, None) => None,
    }
}

/// Place every in-flow child. Explicitly placed items go first and mark the
/// matrix; the rest are auto-placed with a cursor in `auto_flow` order.
pub(crate) fn place_items(
    item_styles: &[GridItemStyle],
    explicit_rows: usize,
    explicit_cols: usize,
    row_names: &LineNames,
    col_names: &LineNames,
    areas: &AHashMap<String, AreaBounds>,
    auto_flow: GridAutoFlow,
) -> Vec<PlacedItem> {
    let mut occupancy = Occupancy::default();
    let mut placements: Vec<Option<PlacedItem>> = vec![None; item_styles.len()];

    // Pass A: explicit placements (areas, lines, names).
    let mut pending: Vec<usize> = Vec::new();
    for (index, style) in item_styles.iter().enumerate() {
        let area = style.area.as_ref().and_then(|name| areas.get(name));
        let (row, col) = match area {
            Some(bounds) => (
                Some((bounds.row_start, bounds.row_end)),
                Some((bounds.col_start, bounds.col_end)),
            ),
            None => (
                resolve_explicit_axis(&style.row, row_names, explicit_rows),
                resolve_explicit_axis(&style.column, col_names, explicit_cols),
            ),
        };
        match (row, col) {
            (Some((row_start, row_end)), Some((col_start, col_end))) => {
                occupancy.mark(row_start, row_end, col_start, col_end);
                placements[index] = Some(PlacedItem {
                    child_index: index,
                    row_start,
                    row_end,
                    col_start,
                    col_end,
                });
            }
            _ => pending.push(index),
        }
    }

    // Pass B: auto-placement. The cursor advances across the flow axis;
    // dense flows restart the search from the origin for every item.
    let mut cursor_outer = 0usize;
    let mut cursor_inner = 0usize;
    for index in pending {
        let style = &item_styles[index];
        let row = resolve_explicit_axis(&style.row, row_names, explicit_rows);
        let col = resolve_explicit_axis(&style.column, col_names, explicit_cols);
        let row_span = style.row.span_count();
        let col_span = style.column.span_count();

        let placed = if auto_flow.is_row_flow() {
            // Row flow never creates implicit columns.
            let col_limit = explicit_cols.max(occupancy.cols()).max(col_span).max(1);
            match (row, col) {
                (Some((row_start, row_end)), Some((col_start, col_end))) => {
                    PlacedItem { child_index: index, row_start, row_end, col_start, col_end }
                }
                (Some((row_start, row_end)), None) => place_in_fixed_outer(
                    &occupancy, index, row_start, row_end, col_span, col_limit, false,
                ),
                (None, fixed_col) => {
                    let start = if auto_flow.is_dense() { (0, 0) } else { (cursor_outer, cursor_inner) };
                    place_scanning(
                        &occupancy, index, start, row_span, col_span, col_limit, fixed_col, false,
                    )
                }
            }
        } else {
            // Column flow: outer axis is columns, rows are bounded.
            let row_limit = explicit_rows.max(occupancy.rows()).max(row_span).max(1);
            match (col, row) {
                (Some((col_start, col_end)), Some((row_start, row_end))) => {
                    PlacedItem { child_index: index, row_start, row_end, col_start, col_end }
                }
                (Some((col_start, col_end)), None) => place_in_fixed_outer(
                    &occupancy, index, col_start, col_end, row_span, row_limit, true,
                ),
                (None, fixed_row) => {
                    let start = if auto_flow.is_dense() { (0, 0) } else { (cursor_outer, cursor_inner) };
                    place_scanning(
                        &occupancy, index, start, col_span, row_span, row_limit, fixed_row, true,
                    )
                }
            }
        };

        occupancy.mark(placed.row_start, placed.row_end, placed.col_start, placed.col_end);
        placements[index] = Some(placed);

        if !auto_flow.is_dense() {
            // Advance the cursor past the placed cell, wrapping on the
            // bounded axis.
            let (outer_end, inner_end, inner_limit) = if auto_flow.is_row_flow() {
                let limit = explicit_cols.max(occupancy.cols()).max(1);
                (placed.row_start, placed.col_end, limit)
            } else {
                let limit = explicit_rows.max(occupancy.rows()).max(1);
                (placed.col_start, placed.row_end, limit)
            };
            cursor_outer = outer_end;
            cursor_inner = inner_end;
            if cursor_inner >= inner_limit {
                cursor_outer += 1;
                cursor_inner = 0;
            }
        }
    }

    placements.into_iter().flatten().collect()
}

/// Place an item whose outer (flow) axis is pinned: scan the bounded inner
/// axis for a free region. When the row is full, the item spills into a new
/// inner track at the end.
fn place_in_fixed_outer(
    occupancy: &Occupancy,
    child_index: usize,
    outer_start: usize,
    outer_end: usize,
    inner_span: usize,
    inner_limit: usize,
    column_flow: bool,
) -> PlacedItem {
    let max_inner = inner_limit.saturating_sub(inner_span);
    let inner = (0..=max_inner)
        .find(|&inner| {
            region_free(occupancy, outer_start, outer_end, inner, inner + inner_span, column_flow)
        })
        .unwrap_or(inner_limit);
    make_placement(child_index, outer_start, outer_end, inner, inner + inner_span, column_flow)
}

/// Scan the flow axis outward for the first free region. `fixed_inner`
/// constrains the inner axis when the item pinned it explicitly.
#[allow(clippy::too_many_arguments)]
fn place_scanning(
    occupancy: &Occupancy,
    child_index: usize,
    start: (usize, usize),
    outer_span: usize,
    inner_span: usize,
    inner_limit: usize,
    fixed_inner: Option<(usize, usize)>,
    column_flow: bool,
) -> PlacedItem {
    let (start_outer, start_inner) = start;
    let mut outer = start_outer;
    loop {
        if let Some((inner_start, inner_end)) = fixed_inner {
            if region_free(occupancy, outer, outer + outer_span, inner_start, inner_end, column_flow)
            {
                return make_placement(
                    child_index, outer, outer + outer_span, inner_start, inner_end, column_flow,
                );
            }
        } else {
            let first_inner = if outer == start_outer { start_inner } else { 0 };
            let max_inner = inner_limit.saturating_sub(inner_span);
            for inner in first_inner..=max_inner {
                if region_free(
                    occupancy, outer, outer + outer_span, inner, inner + inner_span, column_flow,
                ) {
                    return make_placement(
                        child_index, outer, outer + outer_span, inner, inner + inner_span,
                        column_flow,
                    );
                }
            }
        }
        // The outer axis grows on demand, so the scan always terminates.
        outer += 1;
    }
}

fn region_free(
    occupancy: &Occupancy,
    outer_start: usize,
    outer_end: usize,
    inner_start: usize,
    inner_end: usize,
    column_flow: bool,
) -> bool {
    if column_flow {
        occupancy.is_free(inner_start, inner_end, outer_start, outer_end)
    } else {
        occupancy.is_free(outer_start, outer_end, inner_start, inner_end)
    }
}

fn make_placement(
    child_index: usize,
    outer_start: usize,
    outer_end: usize,
    inner_start: usize,
    inner_end: usize,
    column_flow: bool,
) -> PlacedItem {
    if column_flow {
        PlacedItem {
            child_index,
            row_start: inner_start,
            row_end: inner_end,
            col_start: outer_start,
            col_end: outer_end,
        }
    } else {
        PlacedItem {
            child_index,
            row_start: outer_start,
            row_end: outer_end,
            col_start: inner_start,
            col_end: inner_end,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> LineNames {
        LineNames::default()
    }

    fn place(
        styles: &[GridItemStyle],
        rows: usize,
        cols: usize,
        flow: GridAutoFlow,
    ) -> Vec<PlacedItem> {
        place_items(styles, rows, cols, &names(), &names(), &AHashMap::new(), flow)
    }

    fn cell(p: &PlacedItem) -> (usize, usize) {
        (p.row_start, p.col_start)
    }

    #[test]
    fn row_flow_fills_columns_first() {
        let styles = vec![GridItemStyle::default(); 5];
        let placed = place(&styles, 0, 3, GridAutoFlow::Row);
        let cells: Vec<_> = placed.iter().map(cell).collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1)]);
    }

    #[test]
    fn column_flow_fills_rows_first() {
        let styles = vec![GridItemStyle::default(); 5];
        let placed = place(&styles, 2, 0, GridAutoFlow::Column);
        let cells: Vec<_> = placed.iter().map(cell).collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
    }

    #[test]
    fn explicit_lines_resolve_one_indexed() {
        let styles = vec![GridItemStyle::at(2, 3)];
        let placed = place(&styles, 3, 3, GridAutoFlow::Row);
        assert_eq!(cell(&placed[0]), (1, 2));
        assert_eq!(placed[0].row_span(), 1);
    }

    #[test]
    fn negative_lines_count_from_the_end() {
        let styles = vec![GridItemStyle {
            row: GridSpan::between(1, -1),
            column: GridSpan::line(-1),
            ..GridItemStyle::default()
        }];
        // 3 explicit rows → lines 1..4; -1 is line 4 (index 3).
        let placed = place(&styles, 3, 3, GridAutoFlow::Row);
        assert_eq!(placed[0].row_start, 0);
        assert_eq!(placed[0].row_end, 3);
        assert_eq!(placed[0].col_start, 3);
        assert_eq!(placed[0].col_end, 4);
    }

    #[test]
    fn span_continues_from_explicit_start() {
        let styles = vec![GridItemStyle {
            row: GridSpan::line_span(1, 2),
            column: GridSpan::line_span(2, 2),
            ..GridItemStyle::default()
        }];
        let placed = place(&styles, 3, 4, GridAutoFlow::Row);
        assert_eq!((placed[0].row_start, placed[0].row_end), (0, 2));
        assert_eq!((placed[0].col_start, placed[0].col_end), (1, 3));
    }

    #[test]
    fn auto_items_flow_around_explicit_ones() {
        let styles = vec![
            GridItemStyle::at(1, 2),
            GridItemStyle::default(),
            GridItemStyle::default(),
        ];
        let placed = place(&styles, 0, 2, GridAutoFlow::Row);
        assert_eq!(cell(&placed[0]), (0, 1));
        // Auto items take the remaining cells.
        assert_eq!(cell(&placed[1]), (0, 0));
        assert_eq!(cell(&placed[2]), (1, 0));
    }

    #[test]
    fn sparse_flow_leaves_gaps_dense_backfills() {
        let wide = GridItemStyle {
            column: GridSpan::span(2),
            ..GridItemStyle::default()
        };
        let styles = vec![GridItemStyle::default(), wide, GridItemStyle::default()];

        // Sparse: the wide item wraps to row 1; the next item resumes after
        // it rather than backfilling (0, 1).
        let placed = place(&styles, 0, 3, GridAutoFlow::Row);
        assert_eq!(cell(&placed[0]), (0, 0));
        assert_eq!(cell(&placed[1]), (0, 1));
        assert_eq!(cell(&placed[2]), (1, 0));

        // Make the wide item wrap: narrow the grid to 2 columns.
        let placed = place(&styles, 0, 2, GridAutoFlow::Row);
        assert_eq!(cell(&placed[0]), (0, 0));
        assert_eq!(cell(&placed[1]), (1, 0));
        assert_eq!(cell(&placed[2]), (2, 0), "sparse cursor does not back up");

        let placed = place(&styles, 0, 2, GridAutoFlow::RowDense);
        assert_eq!(cell(&placed[2]), (0, 1), "dense backfills the gap");
    }

    #[test]
    fn spans_occupy_all_their_cells() {
        let big = GridItemStyle {
            row: GridSpan::span(2),
            column: GridSpan::span(2),
            ..GridItemStyle::default()
        };
        let styles = vec![big, GridItemStyle::default()];
        let placed = place(&styles, 0, 3, GridAutoFlow::Row);
        assert_eq!((placed[0].row_span(), placed[0].col_span()), (2, 2));
        // The 1×1 item lands in the free remainder of row 0.
        assert_eq!(cell(&placed[1]), (0, 2));
    }

    #[test]
    fn row_flow_extends_rows_not_columns() {
        let styles = vec![GridItemStyle::default(); 4];
        let placed = place(&styles, 0, 1, GridAutoFlow::Row);
        let max_col = placed.iter().map(|p| p.col_end).max().unwrap();
        let max_row = placed.iter().map(|p| p.row_end).max().unwrap();
        assert_eq!(max_col, 1, "no implicit columns in row flow");
        assert_eq!(max_row, 4);
    }

    #[test]
    fn fixed_row_auto_column_scans_the_row() {
        let styles = vec![
            GridItemStyle::at(1, 1),
            GridItemStyle {
                row: GridSpan::line(1),
                ..GridItemStyle::default()
            },
        ];
        let placed = place(&styles, 1, 3, GridAutoFlow::Row);
        assert_eq!(cell(&placed[0]), (0, 0));
        assert_eq!(cell(&placed[1]), (0, 1));
    }

    #[test]
    fn named_lines_resolve_first_as_start_last_as_end() {
        let mut col_names = LineNames::default();
        col_names.add("edge", 1);
        col_names.add("edge", 3);
        let styles = vec![GridItemStyle {
            row: GridSpan::line(1),
            column: GridSpan {
                start: GridLine::Named("edge".into()),
                end: GridLine::Named("edge".into()),
            },
            ..GridItemStyle::default()
        }];
        let placed =
            place_items(&styles, 1, 4, &names(), &col_names, &AHashMap::new(), GridAutoFlow::Row);
        assert_eq!(placed[0].col_start, 1);
        assert_eq!(placed[0].col_end, 3);
    }

    #[test]
    fn unknown_named_line_resolves_to_zero() {
        let styles = vec![GridItemStyle {
            row: GridSpan::line(1),
            column: GridSpan::named("missing"),
            ..GridItemStyle::default()
        }];
        let placed = place(&styles, 1, 3, GridAutoFlow::Row);
        assert_eq!(placed[0].col_start, 0);
        assert_eq!(placed[0].col_end, 1);
    }

    #[test]
    fn area_pins_both_axes() {
        let mut areas = AHashMap::new();
        areas.insert(
            "hero".to_string(),
            AreaBounds { row_start: 0, row_end: 2, col_start: 1, col_end: 3 },
        );
        let styles = vec![GridItemStyle::in_area("hero")];
        let placed =
            place_items(&styles, 2, 3, &names(), &names(), &areas, GridAutoFlow::Row);
        assert_eq!((placed[0].row_start, placed[0].row_end), (0, 2));
        assert_eq!((placed[0].col_start, placed[0].col_end), (1, 3));
    }
}
