//! Aspect-ratio fallback sizing.

/// Derive the automatic side of a width/height pair from the explicit side
/// and an aspect ratio (width ÷ height).
///
/// When exactly one side was `Auto`, it is replaced by the other side scaled
/// through the ratio. Both-auto and both-explicit pairs are returned
/// unchanged, as are pairs with a missing or non-positive ratio.
pub fn apply_aspect_ratio(
    width: f32,
    height: f32,
    width_is_auto: bool,
    height_is_auto: bool,
    ratio: Option<f32>,
) -> (f32, f32) {
    let Some(ratio) = ratio.filter(|r| *r > 0.0) else {
        return (width, height);
    };
    match (width_is_auto, height_is_auto) {
        (true, false) => (height * ratio, height),
        (false, true) => (width, width / ratio),
        _ => (width, height),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
