//! Layout output: one computed rectangle pair per node, with O(1) id lookup.

use std::ops::Index;

use ahash::AHashMap;
use geometry::{Edges, Rect};

use crate::tree::NodeId;

// ─────────────────────────────────────────────────────────────────────────────
// ComputedLayout
// ─────────────────────────────────────────────────────────────────────────────

/// The computed geometry of a single node, in tree (root-relative)
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedLayout {
    pub node_id: NodeId,
    /// The node's border box.
    pub border_rect: Rect,
    /// The border box inset by the node's padding.
    pub content_rect: Rect,
}

impl ComputedLayout {
    /// Build from a border rect and the node's padding.
    pub fn new(node_id: NodeId, border_rect: Rect, padding: Edges<f32>) -> Self {
        Self {
            node_id,
            border_rect,
            content_rect: border_rect.inset(padding),
        }
    }

    /// Translate both rectangles by `(dx, dy)`.
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            node_id: self.node_id,
            border_rect: self.border_rect.translate(dx, dy),
            content_rect: self.content_rect.translate(dx, dy),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// LayoutResult
// ─────────────────────────────────────────────────────────────────────────────

/// All computed layouts of one `layout` call, in traversal order, with an
/// id-keyed index. Callers should rely on [`LayoutResult::get`], not on the
/// iteration order.
#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    layouts: Vec<ComputedLayout>,
    index: AHashMap<NodeId, usize>,
}

impl LayoutResult {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a layout. A duplicate id overwrites the index entry, so the
    /// later layout wins the lookup.
    pub(crate) fn push(&mut self, layout: ComputedLayout) {
        self.index.insert(layout.node_id, self.layouts.len());
        self.layouts.push(layout);
    }

    /// O(1) lookup by node id.
    pub fn get(&self, id: NodeId) -> Option<&ComputedLayout> {
        self.index.get(&id).map(|&i| &self.layouts[i])
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Layouts in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = &ComputedLayout> {
        self.layouts.iter()
    }
}

impl Index<NodeId> for LayoutResult {
    type Output = ComputedLayout;

    /// Panicking lookup variant.
    fn index(&self, id: NodeId) -> &ComputedLayout {
        self.get(id)
            .unwrap_or_else(|| panic!("no layout for node id {id}"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
