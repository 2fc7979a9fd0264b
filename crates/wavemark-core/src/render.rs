//! Rendering capabilities consumed by the region renderer and markers
//!
//! The core never talks to a concrete drawing surface. Painting goes through
//! [`RenderContext`], redraw requests through [`RedrawRequester`] and text
//! measurement through [`TextMeasure`]. The widgets crate implements these
//! over the iced canvas.

use crate::segment::Segment;
use crate::types::{PointF, RectF, Rgba};
use crate::view::View;
use std::cell::Cell;
use std::rc::Rc;

/// Label text styling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub bold: bool,
    pub color: Rgba,
}

/// Drawing surface in view-local pixel coordinates
pub trait RenderContext {
    /// Fill a rectangle; degenerate rectangles must be accepted and draw nothing
    fn fill_rect(&mut self, rect: RectF, color: Rgba);

    /// Outline a rectangle
    fn stroke_rect(&mut self, rect: RectF, color: Rgba, width: f32);

    /// Stroke a straight line
    fn stroke_line(&mut self, from: PointF, to: PointF, color: Rgba, width: f32);

    /// Draw text with its top-left corner at `position`
    fn fill_text(&mut self, text: &str, position: PointF, style: TextStyle);
}

/// What a drawable needs to know about the current paint
#[derive(Clone, Copy)]
pub struct Scene<'a> {
    pub view: &'a dyn View,
    /// Segment being drawn, `None` for whole-waveform drawables
    pub segment: Option<&'a Segment>,
}

impl<'a> Scene<'a> {
    pub fn new(view: &'a dyn View, segment: Option<&'a Segment>) -> Self {
        Self { view, segment }
    }
}

/// Something the host's paint loop can draw
pub trait Drawable {
    fn paint(&self, context: &mut dyn RenderContext, scene: &Scene<'_>);
}

/// Asks the host layer to repaint
pub trait RedrawRequester {
    fn request_redraw(&self);
}

/// Redraw requester that records requests until the host polls it
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct RedrawFlag {
    requested: Rc<Cell<bool>>,
}

impl RedrawFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return whether a redraw was requested since the last call, clearing it
    pub fn take(&self) -> bool {
        self.requested.replace(false)
    }

    pub fn is_requested(&self) -> bool {
        self.requested.get()
    }
}

impl RedrawRequester for RedrawFlag {
    fn request_redraw(&self) {
        self.requested.set(true);
    }
}

/// Measures rendered text width
pub trait TextMeasure {
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

/// Width estimate from average glyph advance
///
/// Label text is digits, colons and a dot, for which a fixed advance per
/// character is close to the real metrics of common sans-serif fonts.
#[derive(Debug, Clone, Copy)]
pub struct ApproxTextMeasure {
    /// Glyph advance as a fraction of the font size
    pub advance: f32,
}

impl Default for ApproxTextMeasure {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasure for ApproxTextMeasure {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * self.advance
    }
}
