//! Track sizing: base sizes from content, fr distribution, positions.

use style::TrackSize;

use super::template::ExpandedTrack;

// ─────────────────────────────────────────────────────────────────────────────
// Track
// ─────────────────────────────────────────────────────────────────────────────

/// One sizing track (a row or a column) of a grid axis.
#[derive(Debug, Clone)]
pub(crate) struct Track {
    pub size: TrackSize,
    /// fr growth factor, recursing into the max side of minmax.
    pub fr: f32,
    /// Resolved lower bound (minmax minimum).
    pub min_bound: Option<f32>,
    /// Resolved upper bound (minmax maximum / fit-content limit).
    pub max_bound: Option<f32>,
    /// Content-derived base size (fr tracks start at 0).
    pub base: f32,
    /// Final size after fr distribution.
    pub resolved: f32,
    /// Start offset along the axis.
    pub position: f32,
}

/// Resolve a minmax bound to pixels. Auto and fr bounds resolve to 0.
fn resolve_bound(size: &TrackSize, available: f32) -> f32 {
    match size {
        TrackSize::Fixed(dim) => dim.resolve(available, 0.0),
        TrackSize::Fr(_) => 0.0,
        TrackSize::MinMax(min, _) => resolve_bound(min, available),
        TrackSize::FitContent(limit) => *limit,
    }
}

/// Build the track list for one axis: the expanded explicit tracks followed
/// by implicit tracks sized by the template's `auto_size`.
pub(crate) fn init_tracks(
    expanded: &[ExpandedTrack],
    total: usize,
    auto_size: &TrackSize,
    available: f32,
) -> Vec<Track> {
    (0..total)
        .map(|i| {
            let size = expanded.get(i).map_or_else(|| auto_size.clone(), |t| t.size.clone());
            let (min_bound, max_bound) = match &size {
                TrackSize::MinMax(min, max) => {
                    let upper = if max.fr_factor() > 0.0 {
                        None
                    } else {
                        Some(resolve_bound(max, available))
                    };
                    (Some(resolve_bound(min, available)), upper)
                }
                TrackSize::FitContent(limit) => (None, Some(*limit)),
                _ => (None, None),
            };
            Track {
                fr: size.fr_factor(),
                min_bound,
                max_bound,
                base: 0.0,
                resolved: 0.0,
                position: 0.0,
                size,
            }
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Sizing
// ─────────────────────────────────────────────────────────────────────────────

/// Base-size every track from the per-track content maxima.
pub(crate) fn compute_base_sizes(tracks: &mut [Track], content: &[f32], available: f32) {
    for (i, track) in tracks.iter_mut().enumerate() {
        let content_size = content.get(i).copied().unwrap_or(0.0);
        track.base = match &track.size {
            // Px/Percent resolve against the available space; auto and the
            // content keywords take the content maximum.
            TrackSize::Fixed(dim) => dim.resolve(available, content_size),
            TrackSize::Fr(_) => 0.0,
            TrackSize::MinMax(_, max) => {
                let lower = track.min_bound.unwrap_or(0.0);
                if max.fr_factor() > 0.0 {
                    // The fr phase grows the track from its minimum.
                    lower
                } else {
                    let upper = track.max_bound.unwrap_or(f32::INFINITY).max(lower);
                    content_size.clamp(lower, upper)
                }
            }
            TrackSize::FitContent(limit) => content_size.min(*limit),
        };
        track.resolved = track.base;
    }
}

/// Distribute the leftover space to fr tracks. With no fr weight the
/// distribution short-circuits and fr tracks keep their base size.
pub(crate) fn distribute_fr(tracks: &mut [Track], available: f32, gap: f32) {
    if tracks.is_empty() {
        return;
    }
    let total_fr: f32 = tracks.iter().map(|t| t.fr).sum();
    if total_fr <= 0.0 {
        return;
    }
    let bases: f32 = tracks.iter().map(|t| t.base).sum();
    let gaps = gap * (tracks.len() - 1) as f32;
    let remaining = (available - bases - gaps).max(0.0);
    let per_fr = remaining / total_fr;
    for track in tracks.iter_mut().filter(|t| t.fr > 0.0) {
        let grown = track.base + per_fr * track.fr;
        track.resolved = match track.min_bound {
            Some(min) => grown.max(min),
            None => grown,
        };
    }
}

/// Prefix-sum track positions from `start`, with `gap` between tracks.
pub(crate) fn position_tracks(tracks: &mut [Track], start: f32, gap: f32) {
    let mut pos = start;
    for track in tracks.iter_mut() {
        track.position = pos;
        pos += track.resolved + gap;
    }
}

/// Total extent of the tracks in `[start, end)` including interior gaps.
pub(crate) fn span_size(tracks: &[Track], start: usize, end: usize, gap: f32) -> f32 {
    let end = end.min(tracks.len());
    if start >= end {
        return 0.0;
    }
    let total: f32 = tracks[start..end].iter().map(|t| t.resolved).sum();
    total + gap * (end - start - 1) as f32
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
