//! Segment lists stored as YAML
//!
//! ```yaml
//! - start_time: 12.0
//!   end_time: 30.5
//!   editable: true
//!   color: "#ff8800"
//!   label_text: Intro
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use wavemark_core::SegmentOptions;

/// Read a segment list from a YAML file
pub fn load_segments(path: &Path) -> Result<Vec<SegmentOptions>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read segments file: {:?}", path))?;
    parse_segments(&contents).with_context(|| format!("Invalid segments file: {:?}", path))
}

pub fn parse_segments(yaml: &str) -> Result<Vec<SegmentOptions>> {
    let segments: Vec<SegmentOptions> = serde_yaml::from_str(yaml)?;
    Ok(segments)
}
