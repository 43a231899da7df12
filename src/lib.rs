//! # flexgrid
//!
//! CSS-style flexbox and grid layout for a caller-owned node tree.
//!
//! Build a [`Node`] tree, call [`layout`] with the available space, and read
//! back a border and content rectangle per node id:
//!
//! ```
//! use flexgrid::{layout, ContentSize, FlexContainerStyle, Node};
//!
//! let root = Node::flex(
//!     0,
//!     FlexContainerStyle { gap: 10.0, ..FlexContainerStyle::row() },
//!     vec![
//!         Node::leaf(1, ContentSize::new(100.0, 50.0)),
//!         Node::leaf(2, ContentSize::new(150.0, 50.0)),
//!     ],
//! );
//! let result = layout(&root, 500.0, 200.0);
//! assert_eq!(result.get(2).unwrap().border_rect.x, 110.0);
//! ```

pub use geometry::{Edges, Rect, Size};
pub use style::{
    AlignContent, AlignItems, BoxStyle, Dimension, FlexContainerStyle, FlexDirection,
    FlexItemStyle, FlexWrap, GridAutoFlow, GridContainerStyle, GridItemStyle, GridLine, GridSpan,
    GridTemplate, JustifyContent, Position, RepeatMode, TrackEntry, TrackSize,
};

pub use layout::{
    align_in_cell, apply_aspect_ratio, layout, layout_with_measure, measure_intrinsic_size,
    measure_tree, Axis, ComputedLayout, ContainerKind, ContentSize, IntrinsicSizes, ItemKind,
    LayoutResult, MeasureFn, Node, NodeId,
};
