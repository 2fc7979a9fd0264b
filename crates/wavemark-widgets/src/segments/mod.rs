//! Segment editor widget
//!
//! Shows segment regions over a waveform with draggable boundary markers.

mod canvas;
mod message;
mod state;
mod view;

pub use canvas::{DragTarget, SegmentCanvas, SegmentInteraction};
pub use message::{MarkerInput, SegmentEditorEvent};
pub use state::{SegmentEditorState, INITIAL_VIEW_WIDTH};
pub use view::segment_editor;
