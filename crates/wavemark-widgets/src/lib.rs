//! iced widgets for wavemark
//!
//! Follows the iced 0.14 patterns:
//!
//! - **State structs**: [`SegmentEditorState`] owns the view, segments and markers
//! - **View functions**: [`segment_editor`] takes state + callback, returns `Element`
//! - **Canvas Programs**: [`SegmentCanvas`] turns pointer input into
//!   [`SegmentEditorEvent`]s and paints through [`FrameContext`]

pub mod frame_context;
pub mod segments;
pub mod theme;

pub use frame_context::FrameContext;
pub use segments::{
    segment_editor, DragTarget, MarkerInput, SegmentCanvas, SegmentEditorEvent,
    SegmentEditorState, SegmentInteraction, INITIAL_VIEW_WIDTH,
};
pub use theme::{from_color, to_color};
