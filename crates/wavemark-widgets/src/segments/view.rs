//! Segment editor view function

use super::canvas::SegmentCanvas;
use super::message::SegmentEditorEvent;
use super::state::SegmentEditorState;
use iced::widget::Canvas;
use iced::{Element, Length};

/// Create the segment editor element
///
/// `on_event` wraps canvas events into the application's message type; pass
/// them back to [`SegmentEditorState::apply`] in the update function.
///
/// ```ignore
/// let editor = segment_editor(&self.editor, Message::Editor);
/// ```
pub fn segment_editor<'a, Message>(
    state: &'a SegmentEditorState,
    on_event: impl Fn(SegmentEditorEvent) -> Message + 'a,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    Canvas::new(SegmentCanvas { state, on_event })
        .width(Length::Fill)
        .height(Length::Fixed(state.config().view.height as f32))
        .into()
}
