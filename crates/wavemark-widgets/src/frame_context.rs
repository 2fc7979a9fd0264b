//! [`RenderContext`] over an iced canvas frame

use crate::theme::to_color;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::canvas::{Frame, Path, Stroke, Text};
use iced::{font, Font, Point, Size};
use wavemark_core::{PointF, RectF, RenderContext, Rgba, TextStyle};

const BOLD: Font = Font {
    weight: font::Weight::Bold,
    ..Font::DEFAULT
};

/// Draws core drawables into an iced [`Frame`]
pub struct FrameContext<'a> {
    frame: &'a mut Frame,
}

impl<'a> FrameContext<'a> {
    pub fn new(frame: &'a mut Frame) -> Self {
        Self { frame }
    }
}

impl RenderContext for FrameContext<'_> {
    fn fill_rect(&mut self, rect: RectF, color: Rgba) {
        if rect.is_empty() {
            return;
        }
        self.frame.fill_rectangle(
            Point::new(rect.x, rect.y),
            Size::new(rect.width, rect.height),
            to_color(color),
        );
    }

    fn stroke_rect(&mut self, rect: RectF, color: Rgba, width: f32) {
        if rect.is_empty() {
            return;
        }
        let path = Path::rectangle(
            Point::new(rect.x, rect.y),
            Size::new(rect.width, rect.height),
        );
        self.frame.stroke(
            &path,
            Stroke::default().with_color(to_color(color)).with_width(width),
        );
    }

    fn stroke_line(&mut self, from: PointF, to: PointF, color: Rgba, width: f32) {
        self.frame.stroke(
            &Path::line(Point::new(from.x, from.y), Point::new(to.x, to.y)),
            Stroke::default().with_color(to_color(color)).with_width(width),
        );
    }

    fn fill_text(&mut self, text: &str, position: PointF, style: TextStyle) {
        self.frame.fill_text(Text {
            content: text.to_string(),
            position: Point::new(position.x, position.y),
            size: style.font_size.into(),
            color: to_color(style.color),
            font: if style.bold { BOLD } else { Font::DEFAULT },
            align_x: Horizontal::Left.into(),
            align_y: Vertical::Top.into(),
            ..Text::default()
        });
    }
}
