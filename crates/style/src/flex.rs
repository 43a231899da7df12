//! Flexbox container and item properties.

use crate::Dimension;

// ─────────────────────────────────────────────────────────────────────────────
// Direction / wrap
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlexDirection {
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl FlexDirection {
    /// Is the main axis horizontal?
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
    }

    /// Does the main axis run from end to start?
    #[inline]
    pub fn is_reversed(self) -> bool {
        matches!(self, FlexDirection::RowReverse | FlexDirection::ColumnReverse)
    }
}

impl Default for FlexDirection {
    fn default() -> Self {
        FlexDirection::Row
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlexWrap {
    NoWrap,
    Wrap,
    WrapReverse,
}

impl Default for FlexWrap {
    fn default() -> Self {
        FlexWrap::NoWrap
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Alignment keywords
// ─────────────────────────────────────────────────────────────────────────────

/// Main-axis distribution of items within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JustifyContent {
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl Default for JustifyContent {
    fn default() -> Self {
        JustifyContent::FlexStart
    }
}

/// Cross-axis alignment of an item within its line or cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlignItems {
    Stretch,
    FlexStart,
    FlexEnd,
    Center,
    Baseline,
}

impl Default for AlignItems {
    fn default() -> Self {
        AlignItems::Stretch
    }
}

/// Cross-axis distribution of lines within a wrapped container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlignContent {
    Stretch,
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl Default for AlignContent {
    fn default() -> Self {
        AlignContent::Stretch
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Container / item records
// ─────────────────────────────────────────────────────────────────────────────

/// Properties of a flex container.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlexContainerStyle {
    pub direction: FlexDirection,
    pub wrap: FlexWrap,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub align_content: AlignContent,
    /// Gap between adjacent items on the main axis.
    pub gap: f32,
    /// Gap between adjacent lines on the cross axis.
    pub row_gap: f32,
    /// Collapse adjacent sibling margins (column-like containers only).
    pub margin_collapse: bool,
}

impl Default for FlexContainerStyle {
    fn default() -> Self {
        Self {
            direction: FlexDirection::default(),
            wrap: FlexWrap::default(),
            justify_content: JustifyContent::default(),
            align_items: AlignItems::default(),
            align_content: AlignContent::default(),
            gap: 0.0,
            row_gap: 0.0,
            margin_collapse: false,
        }
    }
}

impl FlexContainerStyle {
    /// A default row container.
    pub fn row() -> Self {
        Self::default()
    }

    /// A default column container.
    pub fn column() -> Self {
        Self {
            direction: FlexDirection::Column,
            ..Self::default()
        }
    }
}

/// Per-item flex properties.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlexItemStyle {
    pub grow: f32,
    pub shrink: f32,
    pub basis: Dimension,
    /// Overrides the container's `align_items` for this item.
    pub align_self: Option<AlignItems>,
    /// Display order; ties keep source order.
    pub order: i32,
}

impl Default for FlexItemStyle {
    fn default() -> Self {
        Self {
            grow: 0.0,
            shrink: 1.0,
            basis: Dimension::Auto,
            align_self: None,
            order: 0,
        }
    }
}

impl FlexItemStyle {
    /// An item that grows with the given factor from a zero basis.
    pub fn grow(factor: f32) -> Self {
        Self {
            grow: factor,
            basis: Dimension::Px(0.0),
            ..Self::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_axes() {
        assert!(FlexDirection::Row.is_horizontal());
        assert!(FlexDirection::RowReverse.is_horizontal());
        assert!(!FlexDirection::Column.is_horizontal());
        assert!(FlexDirection::RowReverse.is_reversed());
        assert!(FlexDirection::ColumnReverse.is_reversed());
        assert!(!FlexDirection::Row.is_reversed());
    }

    #[test]
    fn container_defaults() {
        let c = FlexContainerStyle::default();
        assert_eq!(c.direction, FlexDirection::Row);
        assert_eq!(c.wrap, FlexWrap::NoWrap);
        assert_eq!(c.justify_content, JustifyContent::FlexStart);
        assert_eq!(c.align_items, AlignItems::Stretch);
        assert_eq!(c.align_content, AlignContent::Stretch);
        assert!(!c.margin_collapse);
    }

    #[test]
    fn column_constructor() {
        assert_eq!(FlexContainerStyle::column().direction, FlexDirection::Column);
    }

    #[test]
    fn item_defaults() {
        let i = FlexItemStyle::default();
        assert_eq!(i.grow, 0.0);
        assert_eq!(i.shrink, 1.0);
        assert_eq!(i.basis, Dimension::Auto);
        assert_eq!(i.order, 0);
        assert!(i.align_self.is_none());
    }

    #[test]
    fn grow_constructor() {
        let i = FlexItemStyle::grow(2.0);
        assert_eq!(i.grow, 2.0);
        assert_eq!(i.basis, Dimension::Px(0.0));
    }
}
