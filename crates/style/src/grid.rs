//! Grid container and item properties: track sizes, templates, placement.

use crate::{AlignContent, AlignItems, Dimension, JustifyContent};

// ─────────────────────────────────────────────────────────────────────────────
// TrackSize
// ─────────────────────────────────────────────────────────────────────────────

/// The size of a single grid track.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackSize {
    /// A fixed dimension; `Fixed(Dimension::Auto)` is an auto track sized to
    /// its content.
    Fixed(Dimension),
    /// A fractional share of the leftover space.
    Fr(f32),
    /// At least the first size, at most the second. An `Fr` maximum makes the
    /// minimum the floor and the fraction the growth weight.
    MinMax(Box<TrackSize>, Box<TrackSize>),
    /// Sized to content, capped at the given pixel limit.
    FitContent(f32),
}

impl TrackSize {
    /// A fixed pixel track.
    pub fn px(px: f32) -> Self {
        TrackSize::Fixed(Dimension::Px(px))
    }

    /// A content-sized track.
    pub fn auto() -> Self {
        TrackSize::Fixed(Dimension::Auto)
    }

    /// A fractional track.
    pub fn fr(factor: f32) -> Self {
        TrackSize::Fr(factor)
    }

    /// `minmax(min, max)`.
    pub fn minmax(min: TrackSize, max: TrackSize) -> Self {
        TrackSize::MinMax(Box::new(min), Box::new(max))
    }

    /// `fit-content(limit)`.
    pub fn fit_content(limit: f32) -> Self {
        TrackSize::FitContent(limit)
    }

    /// The fr growth factor, recursing into the maximum side of `minmax`.
    pub fn fr_factor(&self) -> f32 {
        match self {
            TrackSize::Fr(fr) => *fr,
            TrackSize::MinMax(_, max) => max.fr_factor(),
            _ => 0.0,
        }
    }
}

impl Default for TrackSize {
    fn default() -> Self {
        TrackSize::Fixed(Dimension::Auto)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Template entries
// ─────────────────────────────────────────────────────────────────────────────

/// Repetition mode of a `repeat(...)` template entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RepeatMode {
    /// Repeat exactly this many times.
    Count(usize),
    /// As many repetitions as fit the available space.
    AutoFill,
    /// Like `AutoFill`; empty-track collapsing is not implemented, so the
    /// two modes currently behave identically.
    AutoFit,
}

/// One entry of a grid template: a single (optionally named) track or a
/// repeat group.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackEntry {
    Single {
        size: TrackSize,
        /// Line names attached to this track's start line.
        start_names: Vec<String>,
        /// Line names attached to this track's end line.
        end_names: Vec<String>,
    },
    Repeat {
        mode: RepeatMode,
        sizes: Vec<TrackSize>,
    },
}

impl TrackEntry {
    /// A single unnamed track.
    pub fn track(size: TrackSize) -> Self {
        TrackEntry::Single {
            size,
            start_names: Vec::new(),
            end_names: Vec::new(),
        }
    }

    /// A repeat group.
    pub fn repeat(mode: RepeatMode, sizes: Vec<TrackSize>) -> Self {
        TrackEntry::Repeat { mode, sizes }
    }
}

/// The explicit track list for one grid axis.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridTemplate {
    pub entries: Vec<TrackEntry>,
    /// Size of implicit tracks created by placement beyond the explicit list.
    pub auto_size: TrackSize,
}

impl GridTemplate {
    /// Build a template from a plain list of track sizes.
    pub fn from_tracks(tracks: Vec<TrackSize>) -> Self {
        Self {
            entries: tracks.into_iter().map(TrackEntry::track).collect(),
            auto_size: TrackSize::default(),
        }
    }

    /// `repeat(count, sizes)` as the whole template.
    pub fn repeat(count: usize, sizes: Vec<TrackSize>) -> Self {
        Self {
            entries: vec![TrackEntry::repeat(RepeatMode::Count(count), sizes)],
            auto_size: TrackSize::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Placement
// ─────────────────────────────────────────────────────────────────────────────

/// One end of a grid span.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridLine {
    /// Placed by the auto-placement algorithm.
    Auto,
    /// An explicit line number, 1-indexed; negative counts from the end.
    Line(i32),
    /// Span this many tracks from the opposite edge.
    Span(usize),
    /// A named line (or the synthetic `<area>-start` / `<area>-end` names).
    Named(String),
}

impl Default for GridLine {
    fn default() -> Self {
        GridLine::Auto
    }
}

/// Start/end pair for one axis of an item's placement.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpan {
    pub start: GridLine,
    pub end: GridLine,
}

impl GridSpan {
    /// Fully automatic placement on this axis.
    pub fn auto() -> Self {
        Self::default()
    }

    /// Start at the given 1-indexed line, spanning one track.
    pub fn line(line: i32) -> Self {
        Self {
            start: GridLine::Line(line),
            end: GridLine::Auto,
        }
    }

    /// Auto-placed, spanning the given number of tracks.
    pub fn span(count: usize) -> Self {
        Self {
            start: GridLine::Span(count),
            end: GridLine::Auto,
        }
    }

    /// Start at the given line and span the given number of tracks.
    pub fn line_span(line: i32, count: usize) -> Self {
        Self {
            start: GridLine::Line(line),
            end: GridLine::Span(count),
        }
    }

    /// Between two explicit 1-indexed lines.
    pub fn between(start: i32, end: i32) -> Self {
        Self {
            start: GridLine::Line(start),
            end: GridLine::Line(end),
        }
    }

    /// Start at a named line, spanning one track.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            start: GridLine::Named(name.into()),
            end: GridLine::Auto,
        }
    }

    /// The requested span count when one is derivable without resolving
    /// lines: an explicit `Span(n)` on either end, else 1.
    pub fn span_count(&self) -> usize {
        match (&self.start, &self.end) {
            (GridLine::Span(n), _) | (_, GridLine::Span(n)) => (*n).max(1),
            _ => 1,
        }
    }

    /// Does this span pin the axis to specific lines (as opposed to auto or
    /// a standalone span)?
    pub fn is_explicit(&self) -> bool {
        let pins = |line: &GridLine| matches!(line, GridLine::Line(_) | GridLine::Named(_));
        pins(&self.start) || pins(&self.end)
    }
}

/// Direction and density of grid auto-placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridAutoFlow {
    Row,
    Column,
    RowDense,
    ColumnDense,
}

impl GridAutoFlow {
    /// Does placement advance along rows (filling columns first)?
    #[inline]
    pub fn is_row_flow(self) -> bool {
        matches!(self, GridAutoFlow::Row | GridAutoFlow::RowDense)
    }

    /// Does placement backfill earlier gaps?
    #[inline]
    pub fn is_dense(self) -> bool {
        matches!(self, GridAutoFlow::RowDense | GridAutoFlow::ColumnDense)
    }
}

impl Default for GridAutoFlow {
    fn default() -> Self {
        GridAutoFlow::Row
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Container / item records
// ─────────────────────────────────────────────────────────────────────────────

/// Properties of a grid container.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridContainerStyle {
    pub template_rows: GridTemplate,
    pub template_columns: GridTemplate,
    /// Rectangular grid of area names; `None` cells are unnamed.
    pub template_areas: Option<Vec<Vec<Option<String>>>>,
    pub row_gap: f32,
    pub column_gap: f32,
    /// Default horizontal alignment of items within their cells.
    pub justify_items: AlignItems,
    /// Default vertical alignment of items within their cells.
    pub align_items: AlignItems,
    /// Carried for completeness; track positioning packs tracks from the
    /// padding edge and does not distribute leftover space.
    pub justify_content: JustifyContent,
    pub align_content: AlignContent,
    pub auto_flow: GridAutoFlow,
}

impl Default for GridContainerStyle {
    fn default() -> Self {
        Self {
            template_rows: GridTemplate::default(),
            template_columns: GridTemplate::default(),
            template_areas: None,
            row_gap: 0.0,
            column_gap: 0.0,
            justify_items: AlignItems::Stretch,
            align_items: AlignItems::Stretch,
            justify_content: JustifyContent::FlexStart,
            align_content: AlignContent::FlexStart,
            auto_flow: GridAutoFlow::Row,
        }
    }
}

impl GridContainerStyle {
    /// A grid with the given column tracks and default rows.
    pub fn with_columns(tracks: Vec<TrackSize>) -> Self {
        Self {
            template_columns: GridTemplate::from_tracks(tracks),
            ..Self::default()
        }
    }

    /// A grid of `count` equal fractional columns.
    pub fn columns(count: usize) -> Self {
        Self {
            template_columns: GridTemplate::repeat(count, vec![TrackSize::fr(1.0)]),
            ..Self::default()
        }
    }
}

/// Per-item grid properties.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridItemStyle {
    pub row: GridSpan,
    pub column: GridSpan,
    /// Place into a named template area; pins both axes when the name
    /// matches a parsed area.
    pub area: Option<String>,
    pub justify_self: Option<AlignItems>,
    pub align_self: Option<AlignItems>,
}

impl GridItemStyle {
    /// Place into the named area.
    pub fn in_area(name: impl Into<String>) -> Self {
        Self {
            area: Some(name.into()),
            ..Self::default()
        }
    }

    /// Place at the given 1-indexed row and column lines.
    pub fn at(row: i32, column: i32) -> Self {
        Self {
            row: GridSpan::line(row),
            column: GridSpan::line(column),
            ..Self::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
