//! Segment boundary marker controller
//!
//! One [`SegmentMarker`] represents one boundary (start or end) of a segment:
//! a vertical guide line spanning the view height, an optional handle
//! rectangle and a floating time label. Markers are positioned by their
//! [`MarkerGroup`] at the boundary's pixel column; all geometry stored here is
//! local to that origin.
//!
//! ## Interaction states
//!
//! ```text
//! Idle ──HandleEnter──▶ Hovering ──HandleLeave──▶ Idle
//!  │                       │
//!  └──────DragStart────────┴──▶ Dragging ──DragEnd──▶ Idle
//! ```
//!
//! The label is hidden in `Idle` and shown while hovering the handle or
//! dragging. Every visibility change asks the host for a redraw.

use crate::render::{RedrawRequester, RenderContext, TextMeasure, TextStyle};
use crate::segment::Segment;
use crate::time::format_time;
use crate::types::{MarkerRole, PointF, RectF, Rgba};
use crate::view::View;
use std::rc::Rc;

/// Handle rectangle width in pixels
pub const HANDLE_WIDTH: f32 = 10.0;

/// Handle rectangle height in pixels
pub const HANDLE_HEIGHT: f32 = 20.0;

/// Horizontal distance between a boundary and its label anchor
pub const MARKER_INSET: f32 = 8.0;

/// Label top before the first resize pass
pub const LABEL_DEFAULT_Y: f32 = 13.0;

/// Label font size in pixels
pub const LABEL_FONT_SIZE: f32 = 10.0;

/// Guide line x in local coordinates (centers a 1px stroke on the pixel)
pub const LINE_X: f32 = 0.5;

/// Guide line stroke width
pub const LINE_STROKE_WIDTH: f32 = 2.0;

/// Horizontal distance from the guide line that still counts as a hit
pub const LINE_HIT_TOLERANCE: f32 = 3.0;

impl MarkerRole {
    /// Label anchor relative to the boundary: left of a start, right of an end
    pub fn x_position(&self) -> f32 {
        match self {
            MarkerRole::Start => -MARKER_INSET,
            MarkerRole::End => MARKER_INSET,
        }
    }

    /// Handle x so that it sits flush against its own side of the boundary
    pub fn handle_offset(&self) -> f32 {
        match self {
            MarkerRole::Start => 0.0,
            MarkerRole::End => -HANDLE_WIDTH,
        }
    }
}

/// Pointer cursor requested by the marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    /// Horizontal resize ("ew-resize")
    EwResize,
}

/// Interaction state of a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerState {
    Idle,
    Hovering,
    Dragging,
}

/// Pointer events routed to a marker by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerEvent {
    /// The containing group started being dragged
    DragStart,
    /// The drag ended (also sent when a drag is abandoned)
    DragEnd,
    /// Pointer entered the handle
    HandleEnter,
    /// Pointer left the handle
    HandleLeave,
    /// Pointer entered the guide line
    LineEnter,
    /// Pointer left the guide line
    LineLeave,
}

/// Visual parts of a marker, in the order they are attached to the group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPart {
    Label,
    Line,
    Handle,
}

/// Options a marker is created with
#[derive(Debug, Clone)]
pub struct MarkerOptions {
    pub role: MarkerRole,
    /// Snapshot of the segment at creation time
    pub segment: Segment,
    /// Whether handles are shown for editable segments
    pub show_markers: bool,
    /// Whether the containing group responds to pointer drags
    pub draggable: bool,
    /// Line and handle color
    pub color: Rgba,
    pub font_size: f32,
}

impl MarkerOptions {
    /// Options for one boundary of `segment`, colored like the segment
    pub fn for_segment(segment: &Segment, role: MarkerRole, show_markers: bool, draggable: bool) -> Self {
        Self {
            role,
            segment: segment.clone(),
            show_markers,
            draggable,
            color: segment.color,
            font_size: LABEL_FONT_SIZE,
        }
    }

    /// Whether a handle rectangle should exist
    pub fn has_handle(&self) -> bool {
        self.segment.editable && self.show_markers
    }
}

/// Container positioned at the boundary pixel column
///
/// Children are painted in the order they were attached.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerGroup {
    draggable: bool,
    children: Vec<MarkerPart>,
}

impl MarkerGroup {
    pub fn new(draggable: bool) -> Self {
        Self {
            draggable,
            children: Vec::new(),
        }
    }

    pub fn add(&mut self, part: MarkerPart) {
        if !self.children.contains(&part) {
            self.children.push(part);
        }
    }

    pub fn children(&self) -> &[MarkerPart] {
        &self.children
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }
}

/// Floating time label
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLabel {
    pub x: f32,
    pub y: f32,
    pub text: String,
    /// Rendered width of `text`
    pub width: f32,
    pub visible: bool,
}

/// Vertical guide line, `points` is `[x1, y1, x2, y2]`
#[derive(Debug, Clone, PartialEq)]
pub struct GuideLine {
    pub x: f32,
    pub points: [f32; 4],
}

/// Draggable handle rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerHandle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl MarkerHandle {
    pub fn rect(&self) -> RectF {
        RectF::new(self.x, self.y, self.width, self.height)
    }
}

/// Which handlers have been bound by [`SegmentMarker::bind_event_handlers`]
#[derive(Debug, Clone, Copy, Default)]
struct Bindings {
    drag: bool,
    handle_hover: bool,
}

/// Controller for one segment boundary
pub struct SegmentMarker {
    options: MarkerOptions,
    label: MarkerLabel,
    line: GuideLine,
    handle: Option<MarkerHandle>,
    cursor: CursorStyle,
    state: MarkerState,
    bindings: Bindings,
    redraw: Rc<dyn RedrawRequester>,
    measure: Rc<dyn TextMeasure>,
}

impl SegmentMarker {
    /// Create an uninitialized marker; call [`SegmentMarker::init`] next
    pub fn new(
        options: MarkerOptions,
        redraw: Rc<dyn RedrawRequester>,
        measure: Rc<dyn TextMeasure>,
    ) -> Self {
        Self {
            options,
            label: MarkerLabel {
                x: 0.0,
                y: LABEL_DEFAULT_Y,
                text: String::new(),
                width: 0.0,
                visible: false,
            },
            line: GuideLine {
                x: 0.0,
                points: [LINE_X, 0.0, LINE_X, 0.0],
            },
            handle: None,
            cursor: CursorStyle::Default,
            state: MarkerState::Idle,
            bindings: Bindings::default(),
            redraw,
            measure,
        }
    }

    /// Build the label, handle and guide line and attach them to `group`
    ///
    /// Runs the resize pass once against `view`, then binds the interaction
    /// handlers.
    pub fn init(&mut self, group: &mut MarkerGroup, view: &dyn View) {
        let role = self.options.role;
        let time = self.options.segment.boundary_time(role);

        // Real vertical placement is left to the resize pass.
        self.label = MarkerLabel {
            x: role.x_position(),
            y: LABEL_DEFAULT_Y,
            text: String::new(),
            width: 0.0,
            visible: false,
        };
        self.set_label_text(format_time(time, true));

        self.handle = if self.options.has_handle() {
            Some(MarkerHandle {
                x: role.handle_offset(),
                y: 0.0,
                width: HANDLE_WIDTH,
                height: HANDLE_HEIGHT,
            })
        } else {
            None
        };

        self.line = GuideLine {
            x: 0.0,
            points: [LINE_X, 0.0, LINE_X, 0.0],
        };

        group.add(MarkerPart::Label);
        group.add(MarkerPart::Line);
        if self.handle.is_some() {
            group.add(MarkerPart::Handle);
        }

        self.fit_to_view(view);
        self.bind_event_handlers(group);

        log::debug!(
            "SegmentMarker::init: {} {} at {:.3}s, handle={}",
            self.options.segment.id,
            role.name(),
            time,
            self.handle.is_some()
        );
    }

    /// Enable drag and hover handling
    ///
    /// Drag handling requires both the marker option and a draggable group;
    /// hover handling requires a handle.
    pub fn bind_event_handlers(&mut self, group: &MarkerGroup) {
        self.bindings.drag = self.options.draggable && group.is_draggable();
        self.bindings.handle_hover = self.handle.is_some();
    }

    /// Recompute geometry from the current view height
    ///
    /// Idempotent; never touches label visibility.
    pub fn fit_to_view(&mut self, view: &dyn View) {
        let height = view.height() as f32;

        if let Some(handle) = self.handle.as_mut() {
            handle.y = 0.0;
        }

        self.line.points = [LINE_X, 0.0, LINE_X, height];
    }

    /// Replace the label text for a new boundary time
    ///
    /// Position and visibility are left alone; the next hover or drag
    /// repositions the label for the new width.
    pub fn time_updated(&mut self, time: f64) {
        self.set_label_text(format_time(time, true));
    }

    /// Route a pointer event to the bound handlers
    ///
    /// Returns true if a handler ran.
    pub fn handle_event(&mut self, event: MarkerEvent) -> bool {
        match event {
            // Line cursor feedback is always on, draggable or not
            MarkerEvent::LineEnter => {
                self.cursor = CursorStyle::EwResize;
            }
            MarkerEvent::LineLeave => {
                self.cursor = CursorStyle::Default;
            }
            MarkerEvent::DragStart if self.bindings.drag => {
                self.state = MarkerState::Dragging;
                self.anchor_start_label();
                self.label.visible = true;
                self.redraw.request_redraw();
                log::debug!(
                    "SegmentMarker: drag start {} {}",
                    self.options.segment.id,
                    self.options.role.name()
                );
            }
            MarkerEvent::DragEnd if self.bindings.drag => {
                self.state = MarkerState::Idle;
                self.label.visible = false;
                self.redraw.request_redraw();
                log::debug!(
                    "SegmentMarker: drag end {} {}",
                    self.options.segment.id,
                    self.options.role.name()
                );
            }
            MarkerEvent::HandleEnter if self.bindings.handle_hover => {
                if self.state == MarkerState::Idle {
                    self.state = MarkerState::Hovering;
                }
                self.cursor = CursorStyle::EwResize;
                self.anchor_start_label();
                self.label.visible = true;
                self.redraw.request_redraw();
            }
            MarkerEvent::HandleLeave if self.bindings.handle_hover => {
                // The reset to the default cursor only happens on LineLeave.
                if self.state == MarkerState::Hovering {
                    self.state = MarkerState::Idle;
                }
                self.cursor = CursorStyle::EwResize;
                self.label.visible = false;
                self.redraw.request_redraw();
            }
            _ => return false,
        }

        log::trace!(
            "SegmentMarker: {:?} -> {:?}, label visible={}",
            event,
            self.state(),
            self.label.visible
        );
        true
    }

    pub fn state(&self) -> MarkerState {
        self.state
    }

    pub fn role(&self) -> MarkerRole {
        self.options.role
    }

    pub fn options(&self) -> &MarkerOptions {
        &self.options
    }

    /// Anchor of the label relative to the boundary
    pub fn x_position(&self) -> f32 {
        self.options.role.x_position()
    }

    pub fn label(&self) -> &MarkerLabel {
        &self.label
    }

    pub fn line(&self) -> &GuideLine {
        &self.line
    }

    pub fn handle(&self) -> Option<&MarkerHandle> {
        self.handle.as_ref()
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    /// Change the line and handle color
    pub fn set_color(&mut self, color: Rgba) {
        self.options.color = color;
    }

    /// Part under `point`, given relative to the group origin
    ///
    /// The handle is attached last and so wins over the line.
    pub fn hit_part(&self, point: PointF) -> Option<MarkerPart> {
        if let Some(handle) = &self.handle {
            if handle.rect().contains(point) {
                return Some(MarkerPart::Handle);
            }
        }

        let [x1, y1, _, y2] = self.line.points;
        let line_x = self.line.x + x1;
        if (point.x - line_x).abs() <= LINE_HIT_TOLERANCE && point.y >= y1 && point.y <= y2 {
            return Some(MarkerPart::Line);
        }

        None
    }

    /// Paint one part with the group origin at `origin_x`
    pub fn paint_part(&self, context: &mut dyn RenderContext, part: MarkerPart, origin_x: f32) {
        match part {
            MarkerPart::Label => {
                if !self.label.visible {
                    return;
                }
                context.fill_text(
                    &self.label.text,
                    PointF::new(origin_x + self.label.x, self.label.y),
                    TextStyle {
                        font_size: self.options.font_size,
                        bold: true,
                        color: Rgba::BLACK,
                    },
                );
            }
            MarkerPart::Line => {
                let [x1, y1, x2, y2] = self.line.points;
                let x = origin_x + self.line.x;
                context.stroke_line(
                    PointF::new(x + x1, y1),
                    PointF::new(x + x2, y2),
                    self.options.color,
                    LINE_STROKE_WIDTH,
                );
            }
            MarkerPart::Handle => {
                if let Some(handle) = &self.handle {
                    let rect = handle.rect().translate(origin_x, 0.0);
                    context.fill_rect(rect, self.options.color);
                    context.stroke_rect(rect, self.options.color, 1.0);
                }
            }
        }
    }

    /// A start label grows leftward so it never covers the segment
    fn anchor_start_label(&mut self) {
        if self.options.role.is_start() {
            self.label.x = self.x_position() - self.label.width;
        }
    }

    fn set_label_text(&mut self, text: String) {
        self.label.width = self.measure.text_width(&text, self.options.font_size);
        self.label.text = text;
    }
}

impl std::fmt::Debug for SegmentMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentMarker")
            .field("segment", &self.options.segment.id)
            .field("role", &self.options.role)
            .field("state", &self.state())
            .field("label", &self.label)
            .field("line", &self.line)
            .field("handle", &self.handle)
            .field("cursor", &self.cursor)
            .finish()
    }
}
