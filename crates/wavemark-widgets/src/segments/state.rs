//! State for the segment editor widget
//!
//! Owns the zoomable view, the segment collection, one region renderer per
//! segment and the boundary marker layer. All mutations keep the marker layer
//! in sync with the segments and report whether a repaint is needed.

use std::collections::BTreeMap;
use std::rc::Rc;

use wavemark_core::config::SegmentDisplayConfig;
use wavemark_core::{
    ApproxTextMeasure, CursorStyle, Drawable, MarkerRole, RedrawFlag, RenderContext, Rgba, Scene,
    SegmentError, SegmentId, SegmentMarkers, SegmentOptions, SegmentResult, Segments, View,
    WaveformData, WaveformRegionRenderer, ZoomView,
};

use super::message::{MarkerInput, SegmentEditorEvent};

/// Width used until the canvas reports its real size
pub const INITIAL_VIEW_WIDTH: i64 = 800;

/// Segment editor state
#[derive(Debug)]
pub struct SegmentEditorState {
    view: ZoomView,
    segments: Segments,
    markers: SegmentMarkers,
    /// Whole-waveform band drawn under the segments
    waveform_region: WaveformRegionRenderer,
    regions: BTreeMap<SegmentId, WaveformRegionRenderer>,
    config: SegmentDisplayConfig,
    redraw: RedrawFlag,
}

impl SegmentEditorState {
    /// Create an editor over `waveform`, zoomed to the configured scale
    pub fn new(waveform: WaveformData, config: SegmentDisplayConfig) -> Self {
        let waveform = waveform.resample(config.view.scale);
        let view = ZoomView::new(waveform, INITIAL_VIEW_WIDTH, i64::from(config.view.height));
        let redraw = RedrawFlag::new();
        let markers = SegmentMarkers::new(
            config.markers.clone(),
            Rc::new(redraw.clone()),
            Rc::new(ApproxTextMeasure::default()),
        );

        Self {
            view,
            segments: Segments::new(config.colors.segment_color()),
            markers,
            waveform_region: WaveformRegionRenderer::new(config.colors.waveform_color(), 1.0),
            regions: BTreeMap::new(),
            config,
            redraw,
        }
    }

    pub fn view(&self) -> &ZoomView {
        &self.view
    }

    pub fn segments(&self) -> &Segments {
        &self.segments
    }

    pub fn markers(&self) -> &SegmentMarkers {
        &self.markers
    }

    pub fn config(&self) -> &SegmentDisplayConfig {
        &self.config
    }

    pub fn background(&self) -> Rgba {
        self.config.colors.background_color()
    }

    /// Cursor the canvas should show
    pub fn cursor(&self) -> CursorStyle {
        self.markers.cursor()
    }

    /// Duration of the loaded waveform in seconds
    pub fn duration(&self) -> f64 {
        self.view.waveform_data().duration()
    }

    /// Add a segment and create its region and markers
    pub fn add_segment(&mut self, options: SegmentOptions) -> SegmentResult<SegmentId> {
        let id = self.segments.add(options)?;
        if let Some(segment) = self.segments.get(&id) {
            let renderer = WaveformRegionRenderer::new(
                segment.color,
                self.config.colors.validated_region_opacity(),
            );
            self.regions.insert(id.clone(), renderer);
        }
        self.sync();
        log::info!("Added segment {}", id);
        Ok(id)
    }

    /// Remove a segment together with its region and markers
    ///
    /// Returns true if the segment existed.
    pub fn remove_segment(&mut self, id: &SegmentId) -> bool {
        if self.segments.remove_by_id(id).is_none() {
            return false;
        }
        self.regions.remove(id);
        self.sync();
        log::info!("Removed segment {}", id);
        true
    }

    pub fn remove_all_segments(&mut self) {
        self.segments.remove_all();
        self.regions.clear();
        self.sync();
    }

    /// Toggle whether a segment shows boundary markers
    pub fn set_editable(&mut self, id: &SegmentId, editable: bool) -> SegmentResult<()> {
        self.segments.set_editable(id, editable)?;
        self.sync();
        Ok(())
    }

    /// Recolor a segment's region and markers in place
    pub fn set_segment_color(&mut self, id: &SegmentId, color: Rgba) -> SegmentResult<()> {
        let segment = self
            .segments
            .get_mut(id)
            .ok_or_else(|| SegmentError::NotFound(id.clone()))?;
        segment.color = color;

        if let Some(renderer) = self.regions.get_mut(id) {
            renderer.set_color(color);
        }
        self.markers.set_color(id, color);
        Ok(())
    }

    /// Move a segment boundary, clamped so the segment stays valid
    ///
    /// Returns true if the boundary moved.
    pub fn move_boundary(
        &mut self,
        id: &SegmentId,
        role: MarkerRole,
        time: f64,
    ) -> SegmentResult<bool> {
        let duration = self.duration();
        let segment = self
            .segments
            .get(id)
            .ok_or_else(|| SegmentError::NotFound(id.clone()))?;

        let time = segment.constrain_boundary(role, time, duration);
        if time == segment.boundary_time(role) {
            return Ok(false);
        }

        self.segments.update_boundary(id, role, time)?;
        self.markers.time_updated(id, role, time);
        Ok(true)
    }

    /// Resize the view and refit the markers
    pub fn resize(&mut self, width: i64, height: i64) -> bool {
        if !self.view.resize(width, height) {
            return false;
        }
        self.markers.fit_to_view(&self.view);
        true
    }

    /// Step to the next configured zoom level
    pub fn zoom(&mut self, zoom_in: bool) -> bool {
        let scale = self.config.view.step_zoom(self.view.scale(), zoom_in);
        let changed = self.view.set_scale(scale);
        if changed {
            log::info!("Zoom: {} samples per pixel", scale);
        }
        changed
    }

    pub fn scroll_by(&mut self, pixels: i64) -> bool {
        self.view.scroll_by(pixels)
    }

    pub fn scroll_to_time(&mut self, time: f64) -> bool {
        self.view.scroll_to_time(time)
    }

    /// Apply a canvas event
    ///
    /// Returns true if the canvas needs a repaint.
    pub fn apply(&mut self, event: SegmentEditorEvent) -> bool {
        let changed = match event {
            SegmentEditorEvent::Markers(inputs) => {
                let mut handled = false;
                for MarkerInput { id, role, event } in inputs {
                    handled |= self.markers.dispatch(&id, role, event);
                }
                handled
            }
            SegmentEditorEvent::BoundaryDragged { id, role, time } => {
                match self.move_boundary(&id, role, time) {
                    Ok(moved) => moved,
                    Err(e) => {
                        log::warn!("Ignoring drag of {} {}: {}", id, role.name(), e);
                        false
                    }
                }
            }
            SegmentEditorEvent::Resized { width, height } => {
                self.resize(width.round() as i64, height.round() as i64)
            }
            SegmentEditorEvent::Scrolled(pixels) => self.scroll_by(pixels),
        };

        // Markers request redraws on their own; drain the flag either way
        self.redraw.take() || changed
    }

    /// Paint the waveform band, segment regions and markers in that order
    pub fn paint(&self, context: &mut dyn RenderContext) {
        self.waveform_region.paint(context, &Scene::new(&self.view, None));

        for segment in self.segments.iter() {
            if let Some(renderer) = self.regions.get(&segment.id) {
                renderer.paint(context, &Scene::new(&self.view, Some(segment)));
            }
        }

        self.markers.paint(context, &self.segments, &self.view);
    }

    fn sync(&mut self) {
        if self.markers.sync(&self.segments, &self.view) {
            log::debug!("Marker layer now holds {} segments", self.markers.len());
        }
        self.redraw.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavemark_core::{MarkerEvent, MarkerState, View};

    // 100 px per second at the default scale of 441
    fn state() -> SegmentEditorState {
        let mut config = SegmentDisplayConfig::default();
        config.view.scale = 441;
        let waveform = WaveformData::for_duration(44100, 441, 60.0, 1);
        SegmentEditorState::new(waveform, config)
    }

    fn options(start: f64, end: f64, editable: bool) -> SegmentOptions {
        SegmentOptions {
            start_time: start,
            end_time: end,
            editable,
            ..SegmentOptions::default()
        }
    }

    #[test]
    fn test_add_segment_creates_markers_for_editable_only() {
        let mut state = state();
        let editable = state.add_segment(options(1.0, 2.0, true)).unwrap();
        let fixed = state.add_segment(options(3.0, 4.0, false)).unwrap();

        assert_eq!(state.segments().len(), 2);
        assert!(state.markers().get(&editable).is_some());
        assert!(state.markers().get(&fixed).is_none());
    }

    #[test]
    fn test_invalid_segment_rejected() {
        let mut state = state();
        assert!(state.add_segment(options(5.0, 1.0, true)).is_err());
        assert!(state.segments().is_empty());
        assert!(state.markers().is_empty());
    }

    #[test]
    fn test_remove_segment_destroys_markers() {
        let mut state = state();
        let id = state.add_segment(options(1.0, 2.0, true)).unwrap();

        assert!(state.remove_segment(&id));
        assert!(state.markers().is_empty());
        assert!(!state.remove_segment(&id));
    }

    #[test]
    fn test_set_editable_toggles_markers() {
        let mut state = state();
        let id = state.add_segment(options(1.0, 2.0, false)).unwrap();
        assert!(state.markers().is_empty());

        state.set_editable(&id, true).unwrap();
        assert_eq!(state.markers().len(), 1);

        state.set_editable(&id, false).unwrap();
        assert!(state.markers().is_empty());
    }

    #[test]
    fn test_drag_is_constrained() {
        let mut state = state();
        let id = state.add_segment(options(10.0, 20.0, true)).unwrap();

        let redraw = state.apply(SegmentEditorEvent::BoundaryDragged {
            id: id.clone(),
            role: MarkerRole::Start,
            time: 25.0,
        });
        assert!(redraw);
        assert_eq!(state.segments().get(&id).unwrap().start_time, 20.0);

        state.apply(SegmentEditorEvent::BoundaryDragged {
            id: id.clone(),
            role: MarkerRole::End,
            time: 90.0,
        });
        assert_eq!(state.segments().get(&id).unwrap().end_time, 60.0);
    }

    #[test]
    fn test_drag_updates_label() {
        let mut state = state();
        let id = state.add_segment(options(10.0, 20.0, true)).unwrap();

        state.apply(SegmentEditorEvent::BoundaryDragged {
            id: id.clone(),
            role: MarkerRole::End,
            time: 75.5,
        });
        let pair = state.markers().get(&id).unwrap();
        assert_eq!(pair.end.marker.label().text, "01:00.00");
    }

    #[test]
    fn test_drag_of_unknown_segment_is_ignored() {
        let mut state = state();
        let redraw = state.apply(SegmentEditorEvent::BoundaryDragged {
            id: SegmentId::new("missing"),
            role: MarkerRole::Start,
            time: 1.0,
        });
        assert!(!redraw);
    }

    #[test]
    fn test_marker_events_request_redraw() {
        let mut state = state();
        let id = state.add_segment(options(1.0, 2.0, true)).unwrap();

        let redraw = state.apply(SegmentEditorEvent::Markers(vec![MarkerInput::new(
            id.clone(),
            MarkerRole::Start,
            MarkerEvent::DragStart,
        )]));
        assert!(redraw);

        let pair = state.markers().get(&id).unwrap();
        assert_eq!(pair.start.marker.state(), MarkerState::Dragging);
        assert!(pair.start.marker.label().visible);

        state.apply(SegmentEditorEvent::Markers(vec![MarkerInput::new(
            id.clone(),
            MarkerRole::Start,
            MarkerEvent::DragEnd,
        )]));
        let pair = state.markers().get(&id).unwrap();
        assert!(!pair.start.marker.label().visible);
    }

    #[test]
    fn test_resize_and_scroll() {
        let mut state = state();
        assert!(state.apply(SegmentEditorEvent::Resized {
            width: 500.0,
            height: 120.0,
        }));
        assert_eq!(state.view().width(), 500);
        assert_eq!(state.view().height(), 120);
        assert!(!state.apply(SegmentEditorEvent::Resized {
            width: 500.0,
            height: 120.0,
        }));

        assert!(state.apply(SegmentEditorEvent::Scrolled(300)));
        assert_eq!(state.view().frame_offset(), 300);
    }

    #[test]
    fn test_zoom_steps_through_levels() {
        let mut state = state();
        assert_eq!(state.view().scale(), 441);

        assert!(state.zoom(true));
        assert_eq!(state.view().scale(), 256);
        assert!(state.zoom(true));
        assert_eq!(state.view().scale(), 128);
        assert!(!state.zoom(true));
    }

    #[test]
    fn test_set_segment_color() {
        let mut state = state();
        let id = state.add_segment(options(1.0, 2.0, true)).unwrap();
        let red = Rgba::from_rgb(1.0, 0.0, 0.0);

        state.set_segment_color(&id, red).unwrap();
        assert_eq!(state.segments().get(&id).unwrap().color, red);
        assert_eq!(state.markers().get(&id).unwrap().start.marker.options().color, red);
        assert!(state.set_segment_color(&SegmentId::new("missing"), red).is_err());
    }
}
