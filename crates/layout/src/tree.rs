//! The layout node tree.
//!
//! Callers own the tree: each node embeds its children and carries a dense,
//! caller-assigned id. Ids must be unique within one layout call; duplicates
//! make later layouts overwrite earlier ones in the result map.

use geometry::Size;
use style::{BoxStyle, FlexContainerStyle, FlexItemStyle, GridContainerStyle, GridItemStyle};

/// Caller-assigned node identifier, unique within one layout call.
pub type NodeId = u64;

// ─────────────────────────────────────────────────────────────────────────────
// ContentSize
// ─────────────────────────────────────────────────────────────────────────────

/// Pre-measured intrinsic content size of a leaf (text, image, ...).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentSize {
    pub width: f32,
    pub height: f32,
    /// Offset from the top of the border box to the text baseline.
    pub baseline: f32,
}

impl ContentSize {
    /// A content size whose baseline sits at the bottom edge.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, baseline: height }
    }

    pub fn with_baseline(width: f32, height: f32, baseline: f32) -> Self {
        Self { width, height, baseline }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Container / item kinds
// ─────────────────────────────────────────────────────────────────────────────

/// Which layout model a node applies to its children.
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerKind {
    Flex(FlexContainerStyle),
    Grid(GridContainerStyle),
    /// No container model. Children, if any, are laid out as a default flex
    /// row.
    None,
}

/// The item properties a node carries for its parent's layout model.
///
/// A kind that does not match the parent's container model is ignored and
/// the parent uses default item properties instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Flex(FlexItemStyle),
    Grid(GridItemStyle),
    None,
}

// ─────────────────────────────────────────────────────────────────────────────
// Node
// ─────────────────────────────────────────────────────────────────────────────

/// A single node of the layout tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub style: BoxStyle,
    pub container: ContainerKind,
    pub item: ItemKind,
    /// Intrinsic content size for leaves; read by the default measurer.
    pub content_size: Option<ContentSize>,
    pub children: Vec<Node>,
}

impl Node {
    /// A childless node with default style.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            style: BoxStyle::default(),
            container: ContainerKind::None,
            item: ItemKind::None,
            content_size: None,
            children: Vec::new(),
        }
    }

    /// A leaf carrying a pre-measured content size.
    pub fn leaf(id: NodeId, content: ContentSize) -> Self {
        Self {
            content_size: Some(content),
            ..Self::new(id)
        }
    }

    /// A flex container with the given children.
    pub fn flex(id: NodeId, style: FlexContainerStyle, children: Vec<Node>) -> Self {
        Self {
            container: ContainerKind::Flex(style),
            children,
            ..Self::new(id)
        }
    }

    /// A grid container with the given children.
    pub fn grid(id: NodeId, style: GridContainerStyle, children: Vec<Node>) -> Self {
        Self {
            container: ContainerKind::Grid(style),
            children,
            ..Self::new(id)
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The node's flex item properties, or defaults when the item kind does
    /// not match.
    pub fn flex_item_style(&self) -> FlexItemStyle {
        match &self.item {
            ItemKind::Flex(s) => s.clone(),
            _ => FlexItemStyle::default(),
        }
    }

    /// The node's grid item properties, or defaults when the item kind does
    /// not match.
    pub fn grid_item_style(&self) -> GridItemStyle {
        match &self.item {
            ItemKind::Grid(s) => s.clone(),
            _ => GridItemStyle::default(),
        }
    }
}

/// Source of intrinsic content sizes during the measuring pre-pass.
///
/// Must be pure: the measurer may call it more than once for the same node.
/// The default implementation reads [`Node::content_size`].
pub type MeasureFn<'a> = dyn Fn(&Node) -> Option<ContentSize> + 'a;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
