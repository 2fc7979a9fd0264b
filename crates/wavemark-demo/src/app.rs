//! Demo application state, update and view

use std::path::Path;

use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{Alignment, Color, Element, Length, Task};
use wavemark_core::config::SegmentDisplayConfig;
use wavemark_core::{format_time, parse_hex_color, SegmentId, SegmentOptions, WaveformData};
use wavemark_widgets::{segment_editor, to_color, SegmentEditorEvent, SegmentEditorState};

use crate::segments_file::load_segments;

/// Synthetic track: three minutes of stereo at 44.1 kHz
const SAMPLE_RATE: u32 = 44100;
const TRACK_SECONDS: f64 = 180.0;
const CHANNELS: u32 = 2;

/// Length of segments added from the toolbar
const NEW_SEGMENT_SECONDS: f64 = 5.0;

/// Pixels moved by the scroll buttons
const SCROLL_STEP: i64 = 200;

const SEGMENT_COLORS: [&str; 4] = ["#ff8800", "#44aaff", "#66cc66", "#cc66cc"];

const TEXT_COLOR: Color = Color::from_rgb(0.85, 0.85, 0.85);
const DIM_TEXT_COLOR: Color = Color::from_rgb(0.6, 0.6, 0.6);

#[derive(Debug, Clone)]
pub enum Message {
    Editor(SegmentEditorEvent),
    ZoomIn,
    ZoomOut,
    ScrollLeft,
    ScrollRight,
    AddSegment,
    ClearSegments,
    RemoveSegment(SegmentId),
    ToggleEditable(SegmentId),
    /// Scroll the view to a segment's start
    ShowSegment(SegmentId),
    /// Cycle a segment through the palette
    RecolorSegment(SegmentId),
}

pub struct DemoApp {
    editor: SegmentEditorState,
    /// Palette index of the next segment or recolor
    added: usize,
}

impl DemoApp {
    pub fn new(config: SegmentDisplayConfig, segments_path: Option<&Path>) -> Self {
        let waveform =
            WaveformData::for_duration(SAMPLE_RATE, config.view.scale, TRACK_SECONDS, CHANNELS);
        let mut editor = SegmentEditorState::new(waveform, config);

        let segments = match segments_path {
            Some(path) => load_segments(path).unwrap_or_else(|e| {
                log::warn!("{:#}, using built-in segments", e);
                builtin_segments()
            }),
            None => builtin_segments(),
        };

        for options in segments {
            if let Err(e) = editor.add_segment(options) {
                log::warn!("Skipping segment: {}", e);
            }
        }

        Self { editor, added: 0 }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Editor(event) => {
                if self.editor.apply(event) {
                    log::trace!("Segment editor repaint");
                }
            }
            Message::ZoomIn => {
                self.editor.zoom(true);
            }
            Message::ZoomOut => {
                self.editor.zoom(false);
            }
            Message::ScrollLeft => {
                self.editor.scroll_by(-SCROLL_STEP);
            }
            Message::ScrollRight => {
                self.editor.scroll_by(SCROLL_STEP);
            }
            Message::AddSegment => self.add_segment(),
            Message::ClearSegments => {
                self.editor.remove_all_segments();
                log::info!("Cleared all segments");
            }
            Message::RemoveSegment(id) => {
                self.editor.remove_segment(&id);
            }
            Message::ToggleEditable(id) => {
                let editable = self.editor.segments().get(&id).map(|s| s.editable);
                if let Some(editable) = editable {
                    if let Err(e) = self.editor.set_editable(&id, !editable) {
                        log::warn!("Toggle editable failed: {}", e);
                    }
                }
            }
            Message::ShowSegment(id) => {
                let start = self.editor.segments().get(&id).map(|s| s.start_time);
                if let Some(start) = start {
                    self.editor.scroll_to_time(start);
                }
            }
            Message::RecolorSegment(id) => {
                let color = parse_hex_color(self.next_color());
                if let Err(e) = self.editor.set_segment_color(&id, color) {
                    log::warn!("Recolor failed: {}", e);
                }
            }
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let view = self.editor.view();
        let position = text(format!(
            "{} - {}  |  {} samples/px",
            format_time(view.start_time(), false),
            format_time(view.end_time(), false),
            view.scale()
        ))
        .size(12)
        .color(DIM_TEXT_COLOR);

        let toolbar = row![
            button(text("Zoom in").size(12)).on_press(Message::ZoomIn),
            button(text("Zoom out").size(12)).on_press(Message::ZoomOut),
            button(text("<").size(12)).on_press(Message::ScrollLeft),
            button(text(">").size(12)).on_press(Message::ScrollRight),
            button(text("Add segment").size(12)).on_press(Message::AddSegment),
            button(text("Clear").size(12)).on_press(Message::ClearSegments),
            Space::new().width(Length::Fill),
            position,
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        column![
            toolbar,
            segment_editor(&self.editor, Message::Editor),
            scrollable(self.segment_list()).height(Length::Fill),
        ]
        .spacing(10)
        .padding(12)
        .into()
    }

    fn segment_list(&self) -> Element<'_, Message> {
        let rows: Vec<Element<'_, Message>> = self.editor.segments().iter().map(|segment| {
            let swatch_color = to_color(segment.color);
            let swatch = container(Space::new().width(12.0).height(12.0)).style(move |_| {
                container::Style {
                    background: Some(swatch_color.into()),
                    ..Default::default()
                }
            });

            let label = if segment.label_text.is_empty() {
                segment.id.to_string()
            } else {
                segment.label_text.clone()
            };

            row![
                swatch,
                text(label).size(12).color(TEXT_COLOR).width(Length::Fixed(160.0)),
                text(format!(
                    "{} - {}",
                    format_time(segment.start_time, true),
                    format_time(segment.end_time, true)
                ))
                .size(12)
                .color(DIM_TEXT_COLOR)
                .width(Length::Fixed(200.0)),
                text(format!("{:.2}s", segment.duration()))
                    .size(12)
                    .color(DIM_TEXT_COLOR)
                    .width(Length::Fixed(70.0)),
                button(text("Show").size(11)).on_press(Message::ShowSegment(segment.id.clone())),
                button(text("Color").size(11))
                    .on_press(Message::RecolorSegment(segment.id.clone())),
                button(text(if segment.editable { "Lock" } else { "Edit" }).size(11))
                    .on_press(Message::ToggleEditable(segment.id.clone())),
                button(text("Remove").size(11)).on_press(Message::RemoveSegment(segment.id.clone())),
            ]
            .spacing(8)
            .align_y(Alignment::Center)
            .into()
        }).collect();

        column(rows).spacing(4).into()
    }

    /// Add a short segment at the left of the visible window
    fn add_segment(&mut self) {
        let duration = self.editor.duration();
        let start = self.editor.view().start_time().min(duration);
        let end = (start + NEW_SEGMENT_SECONDS).min(duration);
        let color = self.next_color();

        let options = SegmentOptions {
            start_time: start,
            end_time: end,
            editable: true,
            color: Some(color.to_string()),
            ..SegmentOptions::default()
        };
        if let Err(e) = self.editor.add_segment(options) {
            log::warn!("Could not add segment: {}", e);
        }
    }

    fn next_color(&mut self) -> &'static str {
        let color = SEGMENT_COLORS[self.added % SEGMENT_COLORS.len()];
        self.added += 1;
        color
    }
}

/// Segments shown when no segments file is given
fn builtin_segments() -> Vec<SegmentOptions> {
    [
        (0.0, 24.5, true, "Intro"),
        (24.5, 96.0, false, "Verse"),
        (96.0, 140.25, true, "Chorus"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (start, end, editable, label))| SegmentOptions {
        start_time: start,
        end_time: end,
        editable,
        color: Some(SEGMENT_COLORS[i % SEGMENT_COLORS.len()].to_string()),
        label_text: Some(label.to_string()),
        ..SegmentOptions::default()
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavemark_core::View;

    fn app() -> DemoApp {
        DemoApp::new(SegmentDisplayConfig::default(), None)
    }

    #[test]
    fn test_builtin_segments_loaded() {
        let app = app();
        assert_eq!(app.editor.segments().len(), 3);
        // Only the editable ones get markers
        assert_eq!(app.editor.markers().len(), 2);
    }

    #[test]
    fn test_builtin_colors_parse() {
        for color in SEGMENT_COLORS {
            assert_ne!(parse_hex_color(color), parse_hex_color("invalid"));
        }
    }

    #[test]
    fn test_add_and_remove_segment() {
        let mut app = app();
        let _ = app.update(Message::AddSegment);
        assert_eq!(app.editor.segments().len(), 4);

        let id = app.editor.segments().iter().last().map(|s| s.id.clone()).unwrap();
        let _ = app.update(Message::RemoveSegment(id));
        assert_eq!(app.editor.segments().len(), 3);
    }

    fn segment_id(app: &DemoApp, label: &str) -> SegmentId {
        app.editor
            .segments()
            .iter()
            .find(|s| s.label_text == label)
            .map(|s| s.id.clone())
            .unwrap()
    }

    #[test]
    fn test_clear_segments() {
        let mut app = app();
        let _ = app.update(Message::ClearSegments);
        assert!(app.editor.segments().is_empty());
        assert!(app.editor.markers().is_empty());
    }

    #[test]
    fn test_show_segment_scrolls_to_start() {
        let mut app = app();
        let chorus = segment_id(&app, "Chorus");
        let _ = app.update(Message::ShowSegment(chorus));

        let view = app.editor.view();
        let expected = view.time_to_pixels(96.0);
        assert_eq!(view.frame_offset(), expected);
    }

    #[test]
    fn test_recolor_cycles_palette() {
        let mut app = app();
        let verse = segment_id(&app, "Verse");
        let before = app.editor.segments().get(&verse).unwrap().color;

        let _ = app.update(Message::RecolorSegment(verse.clone()));
        let after = app.editor.segments().get(&verse).unwrap().color;
        assert_ne!(before, after);
        assert_eq!(after, parse_hex_color(SEGMENT_COLORS[0]));
    }

    #[test]
    fn test_segment_length() {
        let app = app();
        let verse = segment_id(&app, "Verse");
        assert_eq!(app.editor.segments().get(&verse).unwrap().duration(), 71.5);
    }

    #[test]
    fn test_toggle_editable() {
        let mut app = app();
        let verse = segment_id(&app, "Verse");

        let _ = app.update(Message::ToggleEditable(verse.clone()));
        assert!(app.editor.segments().get(&verse).unwrap().editable);
        assert_eq!(app.editor.markers().len(), 3);
    }
}
