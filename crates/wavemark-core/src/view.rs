//! View abstraction over the waveform pixel space
//!
//! A view is a scrollable window over the waveform: `frame_offset` is the
//! leftmost visible pixel column, `width`/`height` the visible drawing area.
//! Renderers and markers only consume the [`View`] trait; [`ZoomView`] is the
//! concrete scrollable/zoomable implementation used by the widgets.

use crate::waveform::WaveformData;

/// Slack added before flooring so `time_to_pixels(pixels_to_time(p)) == p`
/// despite float error in the round trip
const PIXEL_EPSILON: f64 = 1e-6;

/// Read-only view of the visible waveform window
pub trait View {
    /// Leftmost visible pixel column in waveform pixel space
    fn frame_offset(&self) -> i64;

    /// Visible width in pixels
    fn width(&self) -> i64;

    /// Visible height in pixels
    fn height(&self) -> i64;

    /// Absolute pixel column of `time` (seconds) in waveform pixel space
    ///
    /// Must be monotonic and deterministic.
    fn time_to_pixels(&self, time: f64) -> i64;

    /// Waveform currently displayed
    fn waveform_data(&self) -> &WaveformData;
}

/// Scrollable, zoomable view over a waveform
#[derive(Debug, Clone)]
pub struct ZoomView {
    waveform: WaveformData,
    frame_offset: i64,
    width: i64,
    height: i64,
}

impl ZoomView {
    /// Create a view showing the start of `waveform`
    pub fn new(waveform: WaveformData, width: i64, height: i64) -> Self {
        Self {
            waveform,
            frame_offset: 0,
            width: width.max(0),
            height: height.max(0),
        }
    }

    /// Time in seconds at absolute pixel column `pixels`
    pub fn pixels_to_time(&self, pixels: i64) -> f64 {
        pixels as f64 * self.waveform.scale as f64 / self.waveform.sample_rate as f64
    }

    /// Time in seconds at the left edge of the view
    pub fn start_time(&self) -> f64 {
        self.pixels_to_time(self.frame_offset)
    }

    /// Time in seconds at the right edge of the view
    pub fn end_time(&self) -> f64 {
        self.pixels_to_time(self.frame_offset + self.width)
    }

    /// Largest frame offset that still fills the view with waveform
    pub fn max_frame_offset(&self) -> i64 {
        (self.waveform.length - self.width).max(0)
    }

    /// Scroll so that `frame_offset` is the leftmost visible column
    ///
    /// The offset is clamped so the view never scrolls past either end.
    /// Returns true if the offset changed.
    pub fn scroll_to(&mut self, frame_offset: i64) -> bool {
        let clamped = frame_offset.clamp(0, self.max_frame_offset());
        let changed = clamped != self.frame_offset;
        self.frame_offset = clamped;
        changed
    }

    /// Scroll by `delta` pixel columns (negative scrolls left)
    pub fn scroll_by(&mut self, delta: i64) -> bool {
        self.scroll_to(self.frame_offset.saturating_add(delta))
    }

    /// Scroll so that `time` is at the left edge of the view
    pub fn scroll_to_time(&mut self, time: f64) -> bool {
        self.scroll_to(self.time_to_pixels(time))
    }

    /// Change the visible area
    ///
    /// Returns true if the size changed (callers then refit markers).
    pub fn resize(&mut self, width: i64, height: i64) -> bool {
        let width = width.max(0);
        let height = height.max(0);
        if width == self.width && height == self.height {
            return false;
        }

        log::debug!(
            "ZoomView::resize: {}x{} -> {}x{}",
            self.width,
            self.height,
            width,
            height
        );
        self.width = width;
        self.height = height;
        self.scroll_to(self.frame_offset);
        true
    }

    /// Change the zoom level (samples per pixel)
    ///
    /// The time at the left edge of the view is kept in place.
    /// Returns true if the scale changed.
    pub fn set_scale(&mut self, scale: u32) -> bool {
        let scale = scale.max(1);
        if scale == self.waveform.scale {
            return false;
        }

        let left_time = self.start_time();
        self.waveform = self.waveform.resample(scale);
        self.frame_offset = 0;
        self.scroll_to_time(left_time);

        log::debug!(
            "ZoomView::set_scale: {} samples/px, {} columns, offset {}",
            scale,
            self.waveform.length,
            self.frame_offset
        );
        true
    }

    /// Current zoom level in samples per pixel
    pub fn scale(&self) -> u32 {
        self.waveform.scale
    }
}

impl View for ZoomView {
    fn frame_offset(&self) -> i64 {
        self.frame_offset
    }

    fn width(&self) -> i64 {
        self.width
    }

    fn height(&self) -> i64 {
        self.height
    }

    fn time_to_pixels(&self, time: f64) -> i64 {
        let pixels = time * self.waveform.sample_rate as f64 / self.waveform.scale as f64;
        (pixels + PIXEL_EPSILON).floor() as i64
    }

    fn waveform_data(&self) -> &WaveformData {
        &self.waveform
    }
}
