//! Segment display configuration
//!
//! Controls marker behavior, colors and the initial view. Colors are stored
//! as hex strings (e.g. "#aaaaaa") and parsed on use.

use crate::marker::LABEL_FONT_SIZE;
use crate::types::{parse_hex_color, Rgba};
use serde::{Deserialize, Serialize};

/// Root display configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentDisplayConfig {
    /// Boundary marker behavior
    pub markers: MarkerConfig,
    /// Waveform and segment colors
    pub colors: ColorConfig,
    /// Initial view settings
    pub view: ViewConfig,
}

/// Marker configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Show drag handles on editable segments
    pub show_markers: bool,
    /// Allow dragging boundaries of editable segments
    pub draggable: bool,
    /// Time label font size in pixels
    pub label_font_size: f32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            show_markers: true,
            draggable: true,
            label_font_size: LABEL_FONT_SIZE,
        }
    }
}

/// Color configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Whole-waveform band color
    pub waveform: String,
    /// Color for segments added without one
    pub segment: String,
    /// Opacity of segment regions (0.0-1.0)
    pub region_opacity: f32,
    /// View background color
    pub background: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            waveform: "#ccccff".to_string(),
            segment: "#aaaaaa".to_string(),
            region_opacity: 0.35,
            background: "#1a1a1f".to_string(),
        }
    }
}

impl ColorConfig {
    pub fn waveform_color(&self) -> Rgba {
        parse_hex_color(&self.waveform)
    }

    pub fn segment_color(&self) -> Rgba {
        parse_hex_color(&self.segment)
    }

    pub fn background_color(&self) -> Rgba {
        parse_hex_color(&self.background)
    }

    /// Region opacity clamped to 0.0-1.0
    pub fn validated_region_opacity(&self) -> f32 {
        self.region_opacity.clamp(0.0, 1.0)
    }
}

/// View configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Initial zoom in samples per pixel
    pub scale: u32,
    /// View height in pixels
    pub height: u32,
    /// Zoom levels (samples per pixel) stepped through by zoom in/out
    pub zoom_levels: Vec<u32>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            scale: 512,
            height: 240,
            zoom_levels: vec![128, 256, 512, 1024, 2048, 4096],
        }
    }
}

impl ViewConfig {
    /// Next zoom level in the given direction from `scale`
    ///
    /// `zoom_in` moves to fewer samples per pixel. Stays put at either end.
    pub fn step_zoom(&self, scale: u32, zoom_in: bool) -> u32 {
        let mut levels = self.zoom_levels.clone();
        levels.sort_unstable();
        levels.dedup();

        let next = if zoom_in {
            levels.iter().rev().find(|&&level| level < scale)
        } else {
            levels.iter().find(|&&level| level > scale)
        };
        next.copied().unwrap_or(scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SegmentDisplayConfig::default();
        assert!(config.markers.show_markers);
        assert!(config.markers.draggable);
        assert_eq!(config.markers.label_font_size, 10.0);
        assert_eq!(config.colors.segment_color(), parse_hex_color("#aaaaaa"));
        assert_eq!(config.view.height, 240);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "markers:\n  draggable: false\ncolors:\n  region_opacity: 2.5\n";
        let config: SegmentDisplayConfig = serde_yaml::from_str(yaml).unwrap();

        assert!(!config.markers.draggable);
        assert!(config.markers.show_markers);
        assert_eq!(config.colors.validated_region_opacity(), 1.0);
        assert_eq!(config.colors.segment, "#aaaaaa");
        assert_eq!(config.view.scale, 512);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = SegmentDisplayConfig {
            markers: MarkerConfig {
                show_markers: false,
                draggable: true,
                label_font_size: 12.0,
            },
            colors: ColorConfig {
                waveform: "#00FF00".to_string(),
                ..ColorConfig::default()
            },
            view: ViewConfig {
                scale: 1024,
                height: 180,
                zoom_levels: vec![256, 1024],
            },
        };

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: SegmentDisplayConfig = serde_yaml::from_str(&yaml).unwrap();

        assert!(!parsed.markers.show_markers);
        assert_eq!(parsed.markers.label_font_size, 12.0);
        assert_eq!(parsed.colors.waveform, "#00FF00");
        assert_eq!(parsed.view.zoom_levels, vec![256, 1024]);
    }

    #[test]
    fn test_step_zoom() {
        let view = ViewConfig::default();
        assert_eq!(view.step_zoom(512, true), 256);
        assert_eq!(view.step_zoom(512, false), 1024);
        assert_eq!(view.step_zoom(128, true), 128);
        assert_eq!(view.step_zoom(4096, false), 4096);
        // Off-grid scales snap to the neighbouring level
        assert_eq!(view.step_zoom(700, true), 512);
    }
}
