//! Waveform region renderer
//!
//! Paints the band of the waveform covered by a segment (or by the whole
//! visible waveform when there is no segment), clipped to the visible window
//! and to the available waveform data.

use crate::render::{Drawable, RenderContext, Scene};
use crate::segment::Segment;
use crate::types::{RectF, Rgba};
use crate::view::View;
use crate::waveform::WaveformData;

/// Clipped region in view-local pixel coordinates
///
/// `width` is negative when the requested range lies entirely outside the
/// visible window; such regions are painted as degenerate rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionBounds {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl RegionBounds {
    pub fn to_rect(&self) -> RectF {
        RectF::new(
            self.x as f32,
            self.y as f32,
            self.width as f32,
            self.height as f32,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Clip `[start_pixels, end_pixels)` to the visible window and the waveform
///
/// All pixel arguments are in waveform pixel space. Only one band is
/// produced: `floor(height / channels)` tall, starting at the top.
pub fn clip_region(
    waveform: &WaveformData,
    frame_offset: i64,
    start_pixels: i64,
    end_pixels: i64,
    width: i64,
    height: i64,
) -> RegionBounds {
    let start_pixels = start_pixels.max(frame_offset);

    let limit = frame_offset + width;
    let end_pixels = end_pixels.min(limit).min(waveform.length);

    let channels = i64::from(waveform.channels.max(1));
    let waveform_top = 0;
    let waveform_height = height.div_euclid(channels);

    RegionBounds {
        x: start_pixels - frame_offset,
        y: waveform_top,
        width: end_pixels - start_pixels,
        height: waveform_height,
    }
}

/// Pixel range of a segment in a view, or the visible window without one
pub fn region_pixels(view: &dyn View, segment: Option<&Segment>) -> (i64, i64) {
    let frame_offset = view.frame_offset();
    match segment {
        Some(segment) => (
            view.time_to_pixels(segment.start_time),
            view.time_to_pixels(segment.end_time),
        ),
        None => (frame_offset, frame_offset + view.width()),
    }
}

/// Fills the waveform band covered by a segment
///
/// Holds only static styling; the region itself is recomputed on every
/// paint from the view and segment passed in the [`Scene`].
#[derive(Debug, Clone)]
pub struct WaveformRegionRenderer {
    color: Rgba,
    opacity: f32,
}

impl WaveformRegionRenderer {
    pub fn new(color: Rgba, opacity: f32) -> Self {
        Self {
            color,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    /// Change the fill color without rebuilding the renderer
    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Clip the pixel range and issue the fill
    ///
    /// Returns the painted region so callers can hit-test or log it.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        context: &mut dyn RenderContext,
        waveform: &WaveformData,
        frame_offset: i64,
        start_pixels: i64,
        end_pixels: i64,
        width: i64,
        height: i64,
    ) -> RegionBounds {
        let region = clip_region(waveform, frame_offset, start_pixels, end_pixels, width, height);
        context.fill_rect(region.to_rect(), self.color.with_opacity(self.opacity));
        region
    }
}

impl Drawable for WaveformRegionRenderer {
    fn paint(&self, context: &mut dyn RenderContext, scene: &Scene<'_>) {
        let view = scene.view;
        let (start_pixels, end_pixels) = region_pixels(view, scene.segment);

        self.draw(
            context,
            view.waveform_data(),
            view.frame_offset(),
            start_pixels,
            end_pixels,
            view.width(),
            view.height(),
        );
    }
}
