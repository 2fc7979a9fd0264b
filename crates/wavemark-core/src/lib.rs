//! Wavemark Core - segment regions and boundary markers over a waveform view
//!
//! This crate holds everything that does not depend on a UI toolkit:
//!
//! - **View model**: [`View`] trait and the scrollable/zoomable [`ZoomView`]
//! - **Region renderer**: [`WaveformRegionRenderer`] clips a segment's time
//!   range to the visible window and fills it
//! - **Boundary markers**: [`SegmentMarker`] (guide line, handle, time label and
//!   the hover/drag state machine) and the [`SegmentMarkers`] layer that owns
//!   marker lifecycle
//! - **Segments**: validated [`Segments`] collection
//! - **Configuration**: YAML-backed [`config::SegmentDisplayConfig`]
//!
//! Drawing goes through the [`RenderContext`] trait so the same code paints
//! into an iced canvas frame or a recording fake in tests.

pub mod config;
pub mod marker;
pub mod markers;
pub mod region;
pub mod render;
pub mod segment;
pub mod time;
pub mod types;
pub mod view;
pub mod waveform;

pub use marker::{
    CursorStyle, GuideLine, MarkerEvent, MarkerGroup, MarkerHandle, MarkerLabel, MarkerOptions,
    MarkerPart, MarkerState, SegmentMarker, HANDLE_HEIGHT, HANDLE_WIDTH, MARKER_INSET,
};
pub use markers::{BoundaryMarker, MarkerHit, MarkerPair, SegmentMarkers};
pub use region::{clip_region, region_pixels, RegionBounds, WaveformRegionRenderer};
pub use render::{
    ApproxTextMeasure, Drawable, RedrawFlag, RedrawRequester, RenderContext, Scene, TextMeasure,
    TextStyle,
};
pub use segment::{Segment, SegmentError, SegmentId, SegmentOptions, SegmentResult, Segments};
pub use time::format_time;
pub use types::{parse_hex_color, MarkerRole, PointF, RectF, Rgba};
pub use view::{View, ZoomView};
pub use waveform::WaveformData;
