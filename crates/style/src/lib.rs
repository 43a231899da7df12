//! # Style Data Model
//!
//! The value types a caller attaches to layout nodes: dimensions, box
//! constraints, and the flex / grid container and item property records.

#![forbid(unsafe_code)]

pub mod box_style;
pub mod dimension;
pub mod flex;
pub mod grid;

pub use box_style::{BoxStyle, Position};
pub use dimension::Dimension;
pub use flex::{
    AlignContent, AlignItems, FlexContainerStyle, FlexDirection, FlexItemStyle, FlexWrap,
    JustifyContent,
};
pub use grid::{
    GridAutoFlow, GridContainerStyle, GridItemStyle, GridLine, GridSpan, GridTemplate, RepeatMode,
    TrackEntry, TrackSize,
};
