//! Canvas Program for the segment editor
//!
//! Translates pointer input into [`SegmentEditorEvent`]s. Hit testing reads
//! the marker layer in [`SegmentEditorState`]; all mutation happens in the
//! application's update through [`SegmentEditorState::apply`].

use iced::widget::canvas::{self, Event, Frame, Geometry, Program};
use iced::{mouse, Point, Rectangle, Theme};
use wavemark_core::{CursorStyle, MarkerEvent, MarkerHit, MarkerPart, MarkerRole, PointF, SegmentId, View};

use super::message::{MarkerInput, SegmentEditorEvent};
use super::state::SegmentEditorState;
use crate::frame_context::FrameContext;
use crate::theme::to_color;

/// Pixels scrolled per wheel line
const SCROLL_LINE_PIXELS: f32 = 40.0;

/// Boundary being dragged
#[derive(Debug, Clone, PartialEq)]
pub struct DragTarget {
    pub id: SegmentId,
    pub role: MarkerRole,
    /// Pointer x minus the boundary x at press time
    pub grab_offset: f32,
}

/// Canvas state for hover and drag tracking
#[derive(Debug, Clone, Default)]
pub struct SegmentInteraction {
    /// Marker part currently under the pointer
    pub hovered: Option<MarkerHit>,
    pub dragging: Option<DragTarget>,
}

/// Canvas program drawing the waveform band, segment regions and markers
pub struct SegmentCanvas<'a, Message, F>
where
    F: Fn(SegmentEditorEvent) -> Message,
{
    pub state: &'a SegmentEditorState,
    pub on_event: F,
}

impl<'a, Message, F> SegmentCanvas<'a, Message, F>
where
    F: Fn(SegmentEditorEvent) -> Message,
{
    fn hit_at(&self, position: Point) -> Option<MarkerHit> {
        let state = self.state;
        state.markers().hit_test(
            state.segments(),
            state.view(),
            PointF::new(position.x, position.y),
        )
    }

    fn boundary_x(&self, id: &SegmentId, role: MarkerRole) -> Option<f32> {
        let view = self.state.view();
        let segment = self.state.segments().get(id)?;
        Some((view.time_to_pixels(segment.boundary_time(role)) - view.frame_offset()) as f32)
    }

    fn is_draggable(&self, hit: &MarkerHit) -> bool {
        self.state
            .markers()
            .get(&hit.id)
            .is_some_and(|pair| pair.get(hit.role).group.is_draggable())
    }

    /// Turn a canvas event into an editor event, updating hover and drag
    /// tracking in `interaction`
    pub fn translate(
        &self,
        interaction: &mut SegmentInteraction,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<SegmentEditorEvent> {
        // Released anywhere, including outside the canvas or mid-relayout
        if let Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) = event {
            let target = interaction.dragging.take()?;
            return Some(SegmentEditorEvent::Markers(vec![MarkerInput::new(
                target.id,
                target.role,
                MarkerEvent::DragEnd,
            )]));
        }

        let view = self.state.view();
        if bounds.width.round() as i64 != view.width()
            || bounds.height.round() as i64 != view.height()
        {
            return Some(SegmentEditorEvent::Resized {
                width: bounds.width,
                height: bounds.height,
            });
        }

        match event {
            Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                if let Some(target) = &interaction.dragging {
                    // Keep following the pointer outside the canvas
                    let position = cursor.position()?;
                    let x = position.x - bounds.x - target.grab_offset;
                    let pixels = view.frame_offset() + x.round() as i64;
                    return Some(SegmentEditorEvent::BoundaryDragged {
                        id: target.id.clone(),
                        role: target.role,
                        time: view.pixels_to_time(pixels),
                    });
                }

                let hit = cursor
                    .position_in(bounds)
                    .and_then(|position| self.hit_at(position));
                let inputs = hover_transition(interaction.hovered.as_ref(), hit.as_ref());
                interaction.hovered = hit;
                if inputs.is_empty() {
                    None
                } else {
                    Some(SegmentEditorEvent::Markers(inputs))
                }
            }
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                let hit = self.hit_at(position)?;
                if !self.is_draggable(&hit) {
                    return None;
                }

                let boundary_x = self.boundary_x(&hit.id, hit.role)?;
                interaction.dragging = Some(DragTarget {
                    id: hit.id.clone(),
                    role: hit.role,
                    grab_offset: position.x - boundary_x,
                });
                Some(SegmentEditorEvent::Markers(vec![MarkerInput::new(
                    hit.id,
                    hit.role,
                    MarkerEvent::DragStart,
                )]))
            }
            Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                if !cursor.is_over(bounds) {
                    return None;
                }
                let pixels = scroll_pixels(delta);
                if pixels == 0 {
                    return None;
                }
                Some(SegmentEditorEvent::Scrolled(pixels))
            }
            _ => None,
        }
    }
}

/// Horizontal scroll amount for a wheel delta; wheel down scrolls right
fn scroll_pixels(delta: &mouse::ScrollDelta) -> i64 {
    let pixels = match delta {
        mouse::ScrollDelta::Lines { x, y } => (x - y) * SCROLL_LINE_PIXELS,
        mouse::ScrollDelta::Pixels { x, y } => x - y,
    };
    pixels.round() as i64
}

/// Leave/enter events for a hover change
fn hover_transition(previous: Option<&MarkerHit>, next: Option<&MarkerHit>) -> Vec<MarkerInput> {
    let mut inputs = Vec::new();
    if previous == next {
        return inputs;
    }

    if let Some(hit) = previous {
        let event = match hit.part {
            MarkerPart::Handle => Some(MarkerEvent::HandleLeave),
            MarkerPart::Line => Some(MarkerEvent::LineLeave),
            MarkerPart::Label => None,
        };
        if let Some(event) = event {
            inputs.push(MarkerInput::new(hit.id.clone(), hit.role, event));
        }
    }

    if let Some(hit) = next {
        let event = match hit.part {
            MarkerPart::Handle => Some(MarkerEvent::HandleEnter),
            MarkerPart::Line => Some(MarkerEvent::LineEnter),
            MarkerPart::Label => None,
        };
        if let Some(event) = event {
            inputs.push(MarkerInput::new(hit.id.clone(), hit.role, event));
        }
    }

    inputs
}

impl<'a, Message, F> Program<Message> for SegmentCanvas<'a, Message, F>
where
    Message: Clone,
    F: Fn(SegmentEditorEvent) -> Message,
{
    type State = SegmentInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        self.translate(interaction, event, bounds, cursor)
            .map(|event| canvas::Action::publish((self.on_event)(event)))
    }

    fn mouse_interaction(
        &self,
        interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if interaction.dragging.is_some() {
            return mouse::Interaction::ResizingHorizontally;
        }
        match self.state.cursor() {
            CursorStyle::EwResize if cursor.is_over(bounds) => {
                mouse::Interaction::ResizingHorizontally
            }
            _ => mouse::Interaction::default(),
        }
    }

    fn draw(
        &self,
        _interaction: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            to_color(self.state.background()),
        );

        self.state.paint(&mut FrameContext::new(&mut frame));

        vec![frame.into_geometry()]
    }
}
