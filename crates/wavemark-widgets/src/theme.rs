//! Color conversion between wavemark and iced
//!
//! The core crate carries its own [`Rgba`] so it stays toolkit-free; these
//! helpers convert at the canvas boundary.

use iced::Color;
use wavemark_core::Rgba;

/// Convert a core color to an iced color
pub fn to_color(color: Rgba) -> Color {
    Color::from_rgba(color.r, color.g, color.b, color.a)
}

/// Convert an iced color to a core color
pub fn from_color(color: Color) -> Rgba {
    Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavemark_core::parse_hex_color;

    #[test]
    fn test_color_roundtrip() {
        let rgba = parse_hex_color("#33CC66").with_opacity(0.5);
        let color = to_color(rgba);
        assert_eq!(color.a, 0.5);
        assert_eq!(from_color(color), rgba);
    }
}
