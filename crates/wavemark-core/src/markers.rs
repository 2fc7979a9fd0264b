//! Marker layer: one start/end marker pair per editable segment
//!
//! [`SegmentMarkers`] owns the marker lifecycle. Markers are created when an
//! editable segment appears, destroyed when it is removed or stops being
//! editable, and never reused for another segment.

use crate::config::MarkerConfig;
use crate::marker::{
    CursorStyle, MarkerEvent, MarkerGroup, MarkerOptions, MarkerPart, SegmentMarker,
};
use crate::render::{Drawable, RedrawRequester, RenderContext, Scene, TextMeasure};
use crate::segment::{Segment, SegmentId, Segments};
use crate::types::{MarkerRole, PointF, Rgba};
use crate::view::View;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A marker together with the group that positions it
#[derive(Debug)]
pub struct BoundaryMarker {
    pub group: MarkerGroup,
    pub marker: SegmentMarker,
}

impl BoundaryMarker {
    /// View-local x of the group origin: the boundary's pixel column
    pub fn origin_x(&self, view: &dyn View, segment: &Segment) -> f32 {
        let boundary = segment.boundary_time(self.marker.role());
        (view.time_to_pixels(boundary) - view.frame_offset()) as f32
    }
}

impl Drawable for BoundaryMarker {
    fn paint(&self, context: &mut dyn RenderContext, scene: &Scene<'_>) {
        let segment = scene.segment.unwrap_or(&self.marker.options().segment);
        let origin_x = self.origin_x(scene.view, segment);
        for part in self.group.children() {
            self.marker.paint_part(context, *part, origin_x);
        }
    }
}

/// Markers of one segment
#[derive(Debug)]
pub struct MarkerPair {
    pub start: BoundaryMarker,
    pub end: BoundaryMarker,
}

impl MarkerPair {
    pub fn get(&self, role: MarkerRole) -> &BoundaryMarker {
        match role {
            MarkerRole::Start => &self.start,
            MarkerRole::End => &self.end,
        }
    }

    pub fn get_mut(&mut self, role: MarkerRole) -> &mut BoundaryMarker {
        match role {
            MarkerRole::Start => &mut self.start,
            MarkerRole::End => &mut self.end,
        }
    }
}

/// Marker part under the pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerHit {
    pub id: SegmentId,
    pub role: MarkerRole,
    pub part: MarkerPart,
}

/// All boundary markers of a view
///
/// The pointer cursor is shared by every marker: whichever marker handled a
/// cursor-changing event last decides it.
pub struct SegmentMarkers {
    markers: BTreeMap<SegmentId, MarkerPair>,
    cursor: CursorStyle,
    config: MarkerConfig,
    redraw: Rc<dyn RedrawRequester>,
    measure: Rc<dyn TextMeasure>,
}

impl SegmentMarkers {
    pub fn new(
        config: MarkerConfig,
        redraw: Rc<dyn RedrawRequester>,
        measure: Rc<dyn TextMeasure>,
    ) -> Self {
        Self {
            markers: BTreeMap::new(),
            cursor: CursorStyle::Default,
            config,
            redraw,
            measure,
        }
    }

    pub fn config(&self) -> &MarkerConfig {
        &self.config
    }

    /// Bring the marker set in line with `segments`
    ///
    /// New editable segments get a fresh marker pair; markers of removed or
    /// no longer editable segments are destroyed; surviving markers get their
    /// label text refreshed. Returns true if markers were created or destroyed.
    pub fn sync(&mut self, segments: &Segments, view: &dyn View) -> bool {
        let before = self.markers.len();
        let mut changed = false;

        self.markers.retain(|id, _| {
            let keep = segments.get(id).is_some_and(|s| s.editable);
            if !keep {
                log::debug!("SegmentMarkers::sync: destroying markers for {}", id);
            }
            keep
        });
        changed |= self.markers.len() != before;
        if self.markers.is_empty() {
            self.cursor = CursorStyle::Default;
        }

        for segment in segments.iter().filter(|s| s.editable) {
            match self.markers.get_mut(&segment.id) {
                Some(pair) => {
                    pair.start.marker.time_updated(segment.start_time);
                    pair.end.marker.time_updated(segment.end_time);
                }
                None => {
                    let pair = self.create_pair(segment, view);
                    self.markers.insert(segment.id.clone(), pair);
                    changed = true;
                }
            }
        }

        changed
    }

    /// Rerun the resize pass on every marker
    pub fn fit_to_view(&mut self, view: &dyn View) {
        for pair in self.markers.values_mut() {
            pair.start.marker.fit_to_view(view);
            pair.end.marker.fit_to_view(view);
        }
    }

    /// Forward a boundary time change to its marker label
    pub fn time_updated(&mut self, id: &SegmentId, role: MarkerRole, time: f64) {
        if let Some(pair) = self.markers.get_mut(id) {
            pair.get_mut(role).marker.time_updated(time);
        }
    }

    /// Route a pointer event to one marker; returns true if it was handled
    pub fn dispatch(&mut self, id: &SegmentId, role: MarkerRole, event: MarkerEvent) -> bool {
        let Some(pair) = self.markers.get_mut(id) else {
            log::trace!("SegmentMarkers::dispatch: no markers for {}", id);
            return false;
        };

        let marker = &mut pair.get_mut(role).marker;
        let handled = marker.handle_event(event);
        let sets_cursor = matches!(
            event,
            MarkerEvent::LineEnter
                | MarkerEvent::LineLeave
                | MarkerEvent::HandleEnter
                | MarkerEvent::HandleLeave
        );
        if handled && sets_cursor {
            self.cursor = marker.cursor();
        }
        handled
    }

    /// Marker part under a view-local point
    ///
    /// Later segments are drawn on top and win ties.
    pub fn hit_test(&self, segments: &Segments, view: &dyn View, point: PointF) -> Option<MarkerHit> {
        let mut hit = None;
        for segment in segments.iter() {
            let Some(pair) = self.markers.get(&segment.id) else {
                continue;
            };
            for role in MarkerRole::ALL {
                let boundary = pair.get(role);
                let origin_x = boundary.origin_x(view, segment);
                let local = PointF::new(point.x - origin_x, point.y);
                if let Some(part) = boundary.marker.hit_part(local) {
                    hit = Some(MarkerHit {
                        id: segment.id.clone(),
                        role,
                        part,
                    });
                }
            }
        }
        hit
    }

    /// Cursor last set by a marker
    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    /// Recolor both markers of a segment
    pub fn set_color(&mut self, id: &SegmentId, color: Rgba) {
        if let Some(pair) = self.markers.get_mut(id) {
            pair.start.marker.set_color(color);
            pair.end.marker.set_color(color);
        }
    }

    pub fn get(&self, id: &SegmentId) -> Option<&MarkerPair> {
        self.markers.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SegmentId, &MarkerPair)> {
        self.markers.iter()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Draw every marker of the segments in `segments`
    pub fn paint(&self, context: &mut dyn RenderContext, segments: &Segments, view: &dyn View) {
        for segment in segments.iter() {
            if let Some(pair) = self.markers.get(&segment.id) {
                let scene = Scene::new(view, Some(segment));
                pair.start.paint(context, &scene);
                pair.end.paint(context, &scene);
            }
        }
    }

    fn create_pair(&self, segment: &Segment, view: &dyn View) -> MarkerPair {
        log::debug!("SegmentMarkers::sync: creating markers for {}", segment.id);
        MarkerPair {
            start: self.create_marker(segment, MarkerRole::Start, view),
            end: self.create_marker(segment, MarkerRole::End, view),
        }
    }

    fn create_marker(&self, segment: &Segment, role: MarkerRole, view: &dyn View) -> BoundaryMarker {
        let mut options = MarkerOptions::for_segment(
            segment,
            role,
            self.config.show_markers,
            self.config.draggable,
        );
        options.font_size = self.config.label_font_size;
        let mut group = MarkerGroup::new(options.draggable);
        let mut marker = SegmentMarker::new(options, self.redraw.clone(), self.measure.clone());
        marker.init(&mut group, view);
        BoundaryMarker { group, marker }
    }
}

impl std::fmt::Debug for SegmentMarkers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentMarkers")
            .field("markers", &self.markers)
            .field("cursor", &self.cursor)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::MarkerState;
    use crate::render::testing::{DrawCall, RecordingContext};
    use crate::render::{ApproxTextMeasure, RedrawFlag};
    use crate::segment::SegmentOptions;
    use crate::view::ZoomView;
    use crate::waveform::WaveformData;

    fn view() -> ZoomView {
        // 100 px per second
        ZoomView::new(WaveformData::new(44100, 441, 10_000, 1), 500, 240)
    }

    fn layer(flag: &RedrawFlag) -> SegmentMarkers {
        SegmentMarkers::new(
            MarkerConfig::default(),
            Rc::new(flag.clone()),
            Rc::new(ApproxTextMeasure::default()),
        )
    }

    fn add(segments: &mut Segments, id: &str, start: f64, end: f64, editable: bool) -> SegmentId {
        segments
            .add(SegmentOptions {
                id: Some(id.to_string()),
                start_time: start,
                end_time: end,
                editable,
                ..Default::default()
            })
            .unwrap()
    }

    #[test]
    fn test_sync_creates_markers_for_editable_segments_only() {
        let flag = RedrawFlag::new();
        let mut markers = layer(&flag);
        let mut segments = Segments::default();
        add(&mut segments, "a", 0.0, 1.0, true);
        add(&mut segments, "b", 2.0, 3.0, false);

        assert!(markers.sync(&segments, &view()));
        assert_eq!(markers.len(), 1);
        assert!(markers.get(&SegmentId::new("a")).is_some());
        assert!(markers.get(&SegmentId::new("b")).is_none());

        assert!(!markers.sync(&segments, &view()));
    }

    #[test]
    fn test_sync_destroys_removed_and_read_only() {
        let flag = RedrawFlag::new();
        let mut markers = layer(&flag);
        let mut segments = Segments::default();
        let a = add(&mut segments, "a", 0.0, 1.0, true);
        let b = add(&mut segments, "b", 2.0, 3.0, true);
        markers.sync(&segments, &view());
        assert_eq!(markers.len(), 2);

        segments.remove_by_id(&a);
        segments.set_editable(&b, false).unwrap();
        assert!(markers.sync(&segments, &view()));
        assert!(markers.is_empty());
    }

    #[test]
    fn test_markers_not_reused_after_readd() {
        let flag = RedrawFlag::new();
        let mut markers = layer(&flag);
        let mut segments = Segments::default();
        let a = add(&mut segments, "a", 0.0, 1.0, true);
        markers.sync(&segments, &view());
        markers.dispatch(&a, MarkerRole::Start, MarkerEvent::DragStart);

        segments.remove_by_id(&a);
        markers.sync(&segments, &view());
        add(&mut segments, "a", 0.0, 1.0, true);
        markers.sync(&segments, &view());

        let pair = markers.get(&a).unwrap();
        assert_eq!(pair.start.marker.state(), MarkerState::Idle);
        assert!(!pair.start.marker.label().visible);
    }

    #[test]
    fn test_sync_refreshes_label_text() {
        let flag = RedrawFlag::new();
        let mut markers = layer(&flag);
        let mut segments = Segments::default();
        let a = add(&mut segments, "a", 0.0, 1.0, true);
        markers.sync(&segments, &view());

        segments.update_boundary(&a, MarkerRole::End, 2.5).unwrap();
        markers.sync(&segments, &view());
        assert_eq!(markers.get(&a).unwrap().end.marker.label().text, "00:02.50");
    }

    #[test]
    fn test_hit_test_uses_boundary_pixels() {
        let flag = RedrawFlag::new();
        let mut markers = layer(&flag);
        let mut segments = Segments::default();
        let a = add(&mut segments, "a", 12.0, 13.0, true);
        let mut view = view();
        view.scroll_to(1000);
        markers.sync(&segments, &view);

        // start boundary at local x 200, handle extends to the right
        assert_eq!(
            markers.hit_test(&segments, &view, PointF::new(205.0, 10.0)),
            Some(MarkerHit { id: a.clone(), role: MarkerRole::Start, part: MarkerPart::Handle })
        );
        // end boundary at local x 300, handle extends to the left
        assert_eq!(
            markers.hit_test(&segments, &view, PointF::new(295.0, 10.0)),
            Some(MarkerHit { id: a.clone(), role: MarkerRole::End, part: MarkerPart::Handle })
        );
        assert_eq!(
            markers.hit_test(&segments, &view, PointF::new(300.0, 120.0)),
            Some(MarkerHit { id: a, role: MarkerRole::End, part: MarkerPart::Line })
        );
        assert_eq!(markers.hit_test(&segments, &view, PointF::new(250.0, 120.0)), None);
    }

    #[test]
    fn test_fit_to_view_updates_all_lines() {
        let flag = RedrawFlag::new();
        let mut markers = layer(&flag);
        let mut segments = Segments::default();
        let a = add(&mut segments, "a", 0.0, 1.0, true);
        let mut view = view();
        markers.sync(&segments, &view);

        view.resize(500, 120);
        markers.fit_to_view(&view);
        let pair = markers.get(&a).unwrap();
        assert_eq!(pair.start.marker.line().points[3], 120.0);
        assert_eq!(pair.end.marker.line().points[3], 120.0);
    }

    #[test]
    fn test_cursor_and_redraw_through_dispatch() {
        let flag = RedrawFlag::new();
        let mut markers = layer(&flag);
        let mut segments = Segments::default();
        let a = add(&mut segments, "a", 0.0, 1.0, true);
        markers.sync(&segments, &view());

        assert_eq!(markers.cursor(), CursorStyle::Default);
        assert!(markers.dispatch(&a, MarkerRole::End, MarkerEvent::HandleEnter));
        assert_eq!(markers.cursor(), CursorStyle::EwResize);
        assert!(flag.take());

        assert!(!markers.dispatch(&SegmentId::new("missing"), MarkerRole::End, MarkerEvent::DragStart));
    }

    #[test]
    fn test_cursor_is_shared_between_markers() {
        let flag = RedrawFlag::new();
        let mut markers = layer(&flag);
        let mut segments = Segments::default();
        let a = add(&mut segments, "a", 0.0, 1.0, true);
        let b = add(&mut segments, "b", 2.0, 3.0, true);
        markers.sync(&segments, &view());

        // Leaving a handle keeps the resize cursor
        markers.dispatch(&a, MarkerRole::End, MarkerEvent::HandleEnter);
        markers.dispatch(&a, MarkerRole::End, MarkerEvent::HandleLeave);
        assert_eq!(markers.cursor(), CursorStyle::EwResize);

        // Leaving any other marker's line resets it
        markers.dispatch(&b, MarkerRole::Start, MarkerEvent::LineEnter);
        assert_eq!(markers.cursor(), CursorStyle::EwResize);
        markers.dispatch(&b, MarkerRole::Start, MarkerEvent::LineLeave);
        assert_eq!(markers.cursor(), CursorStyle::Default);

        // Drag events leave the cursor alone
        markers.dispatch(&b, MarkerRole::Start, MarkerEvent::DragStart);
        assert_eq!(markers.cursor(), CursorStyle::Default);
    }

    #[test]
    fn test_paint_draws_markers_at_boundaries() {
        let flag = RedrawFlag::new();
        let mut markers = layer(&flag);
        let mut segments = Segments::default();
        add(&mut segments, "a", 1.0, 2.0, true);
        let view = view();
        markers.sync(&segments, &view);

        let mut context = RecordingContext::default();
        markers.paint(&mut context, &segments, &view);

        let lines: Vec<f32> = context
            .calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Line(from, _, _, _) => Some(from.x),
                _ => None,
            })
            .collect();
        assert_eq!(lines, vec![100.5, 200.5]);
    }
}
