//! Messages published by the segment editor canvas

use wavemark_core::{MarkerEvent, MarkerRole, SegmentId};

/// Pointer event addressed to one boundary marker
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerInput {
    pub id: SegmentId,
    pub role: MarkerRole,
    pub event: MarkerEvent,
}

impl MarkerInput {
    pub fn new(id: SegmentId, role: MarkerRole, event: MarkerEvent) -> Self {
        Self { id, role, event }
    }
}

/// Events from the segment editor canvas, applied by
/// [`SegmentEditorState::apply`](super::SegmentEditorState::apply)
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentEditorEvent {
    /// Hover and drag transitions, in the order they happened
    Markers(Vec<MarkerInput>),
    /// A boundary was dragged to a pointer time (not yet constrained)
    BoundaryDragged {
        id: SegmentId,
        role: MarkerRole,
        time: f64,
    },
    /// The canvas was laid out at a new size
    Resized { width: f32, height: f32 },
    /// Scroll the view by a number of pixels
    Scrolled(i64),
}
