//! Common types for Wavemark
//!
//! Colors, boundary roles and the small geometry primitives shared by the
//! region renderer and the boundary markers. Pixel columns in waveform pixel
//! space are integers; local drawing coordinates are `f32`.

use serde::{Deserialize, Serialize};

/// Which boundary of a segment a marker represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerRole {
    Start,
    End,
}

impl MarkerRole {
    /// Both roles, start first
    pub const ALL: [MarkerRole; 2] = [MarkerRole::Start, MarkerRole::End];

    pub fn is_start(&self) -> bool {
        matches!(self, MarkerRole::Start)
    }

    pub fn name(&self) -> &'static str {
        match self {
            MarkerRole::Start => "start",
            MarkerRole::End => "end",
        }
    }
}

/// RGBA color with components in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::from_rgb(0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::from_rgb(1.0, 1.0, 1.0);

    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Same color with the alpha channel multiplied by `opacity`
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            a: self.a * opacity.clamp(0.0, 1.0),
            ..self
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Parse a hex color string
///
/// Supports formats: "#RRGGBB" or "RRGGBB"
/// Returns white on parse failure
pub fn parse_hex_color(hex: &str) -> Rgba {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        log::warn!("Invalid hex color '{}', using white", hex);
        return Rgba::WHITE;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

    Rgba::from_rgb8(r, g, b)
}

/// A point in local drawing coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in local drawing coordinates
///
/// Width and height may be zero or negative; such rectangles are degenerate
/// and cover no pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// True when the rectangle covers no area
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Hit test, inclusive of the left/top edges and exclusive of the right/bottom
    pub fn contains(&self, point: PointF) -> bool {
        !self.is_empty()
            && point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Same rectangle moved by `(dx, dy)`
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        let color = parse_hex_color("#FF0000");
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert_eq!(color.b, 0.0);

        let color = parse_hex_color("00FF00");
        assert_eq!(color.r, 0.0);
        assert_eq!(color.g, 1.0);
        assert_eq!(color.b, 0.0);
    }

    #[test]
    fn test_parse_hex_color_invalid_is_white() {
        assert_eq!(parse_hex_color("#abc"), Rgba::WHITE);
        assert_eq!(parse_hex_color("zzzzzz"), Rgba::from_rgb8(255, 255, 255));
    }

    #[test]
    fn test_marker_role() {
        assert!(MarkerRole::Start.is_start());
        assert!(!MarkerRole::End.is_start());
    }

    #[test]
    fn test_degenerate_rect_contains_nothing() {
        let rect = RectF::new(10.0, 0.0, -5.0, 20.0);
        assert!(rect.is_empty());
        assert!(!rect.contains(PointF::new(8.0, 5.0)));

        let rect = RectF::new(10.0, 0.0, 5.0, 20.0);
        assert!(rect.contains(PointF::new(10.0, 0.0)));
        assert!(!rect.contains(PointF::new(15.0, 0.0)));
    }
}
