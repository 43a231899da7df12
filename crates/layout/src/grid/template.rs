//! Template expansion, named lines, and template areas.

use ahash::AHashMap;
use style::{GridTemplate, RepeatMode, TrackEntry, TrackSize};

// ─────────────────────────────────────────────────────────────────────────────
// Expansion
// ─────────────────────────────────────────────────────────────────────────────

/// One track of an expanded template, with the line names attached to its
/// start and end lines.
#[derive(Debug, Clone)]
pub(crate) struct ExpandedTrack {
    pub size: TrackSize,
    pub start_names: Vec<String>,
    pub end_names: Vec<String>,
}

impl ExpandedTrack {
    fn unnamed(size: TrackSize) -> Self {
        Self {
            size,
            start_names: Vec::new(),
            end_names: Vec::new(),
        }
    }
}

/// The notional minimum extent of a track, used to size auto-fill
/// repetitions.
fn min_track_size(size: &TrackSize, available: f32) -> f32 {
    match size {
        TrackSize::Fixed(dim) => dim.resolve(available, 0.0),
        TrackSize::Fr(_) => 0.0,
        TrackSize::MinMax(min, _) => min_track_size(min, available),
        TrackSize::FitContent(limit) => *limit,
    }
}

/// Expand a template's entries into a flat track list.
///
/// Auto-fill and auto-fit repeat as many times as their minimum extent fits
/// the available space, never less than once. Auto-fit does not collapse
/// empty tracks; it expands exactly like auto-fill.
pub(crate) fn expand_template(
    template: &GridTemplate,
    available: f32,
    gap: f32,
) -> Vec<ExpandedTrack> {
    let mut tracks = Vec::new();
    for entry in &template.entries {
        match entry {
            TrackEntry::Single { size, start_names, end_names } => {
                tracks.push(ExpandedTrack {
                    size: size.clone(),
                    start_names: start_names.clone(),
                    end_names: end_names.clone(),
                });
            }
            TrackEntry::Repeat { mode, sizes } => {
                if sizes.is_empty() {
                    continue;
                }
                let count = match mode {
                    RepeatMode::Count(n) => *n,
                    RepeatMode::AutoFill | RepeatMode::AutoFit => {
                        let min_total: f32 = sizes
                            .iter()
                            .map(|s| min_track_size(s, available))
                            .sum::<f32>()
                            + gap * (sizes.len() - 1) as f32;
                        if min_total <= 0.0 {
                            1
                        } else {
                            ((available / min_total).floor() as usize).max(1)
                        }
                    }
                };
                for _ in 0..count {
                    for size in sizes {
                        tracks.push(ExpandedTrack::unnamed(size.clone()));
                    }
                }
            }
        }
    }
    tracks
}

/// Track count of a template measured with no available space and no gap,
/// as the intrinsic pre-pass needs it.
pub(crate) fn expanded_track_count(template: &GridTemplate) -> usize {
    expand_template(template, 0.0, 0.0).len()
}

// ─────────────────────────────────────────────────────────────────────────────
// Line names
// ─────────────────────────────────────────────────────────────────────────────

/// Map from line name to every line index carrying it. A name may sit on
/// multiple lines; indices are never deduplicated. Resolving as a start uses
/// the first (lowest) index, as an end the last.
#[derive(Debug, Default)]
pub(crate) struct LineNames {
    map: AHashMap<String, Vec<usize>>,
}

impl LineNames {
    pub fn add(&mut self, name: &str, index: usize) {
        self.map.entry(name.to_owned()).or_default().push(index);
    }

    /// First line carrying the name; unknown names resolve to 0.
    pub fn start_index(&self, name: &str) -> usize {
        self.map
            .get(name)
            .and_then(|v| v.iter().min())
            .copied()
            .unwrap_or(0)
    }

    /// Last line carrying the name; unknown names resolve to 0.
    pub fn end_index(&self, name: &str) -> usize {
        self.map
            .get(name)
            .and_then(|v| v.iter().max())
            .copied()
            .unwrap_or(0)
    }
}

/// Collect line names from an expanded track list. Track `i` runs from line
/// `i` to line `i + 1`.
pub(crate) fn collect_line_names(tracks: &[ExpandedTrack]) -> LineNames {
    let mut names = LineNames::default();
    for (i, track) in tracks.iter().enumerate() {
        for name in &track.start_names {
            names.add(name, i);
        }
        for name in &track.end_names {
            names.add(name, i + 1);
        }
    }
    names
}

// ─────────────────────────────────────────────────────────────────────────────
// Template areas
// ─────────────────────────────────────────────────────────────────────────────

/// The bounding cell range of a named template area, end-exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AreaBounds {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

/// Compute the bounding rectangle of every named area in a template-areas
/// grid.
pub(crate) fn parse_areas(cells: &[Vec<Option<String>>]) -> AHashMap<String, AreaBounds> {
    let mut areas: AHashMap<String, AreaBounds> = AHashMap::new();
    for (row, row_cells) in cells.iter().enumerate() {
        for (col, cell) in row_cells.iter().enumerate() {
            let Some(name) = cell else { continue };
            areas
                .entry(name.clone())
                .and_modify(|b| {
                    b.row_start = b.row_start.min(row);
                    b.row_end = b.row_end.max(row + 1);
                    b.col_start = b.col_start.min(col);
                    b.col_end = b.col_end.max(col + 1);
                })
                .or_insert(AreaBounds {
                    row_start: row,
                    row_end: row + 1,
                    col_start: col,
                    col_end: col + 1,
                });
        }
    }
    areas
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
