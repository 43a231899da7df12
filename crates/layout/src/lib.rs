//! # Layout Engine
//!
//! Flexbox and grid box layout for a caller-owned node tree. `layout` is a
//! pure function: a root node, the available space, and a content-size
//! source go in; a border/content rectangle per node comes out. No I/O, no
//! mutation of the input tree, and no failure path.

#![forbid(unsafe_code)]

pub mod align;
pub mod aspect;
pub mod axis;
pub mod driver;
pub mod intrinsic;
pub mod result;
pub mod tree;

mod absolute;
mod flex;
mod grid;

pub use align::align_in_cell;
pub use aspect::apply_aspect_ratio;
pub use axis::Axis;
pub use driver::{layout, layout_with_measure};
pub use intrinsic::{measure_intrinsic_size, measure_tree, IntrinsicSizes};
pub use result::{ComputedLayout, LayoutResult};
pub use tree::{ContainerKind, ContentSize, ItemKind, MeasureFn, Node, NodeId};
