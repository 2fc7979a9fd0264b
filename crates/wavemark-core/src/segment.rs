//! Segments: application-level time ranges drawn over the waveform
//!
//! [`Segments`] is the ordered collection the host edits. Validation of time
//! ranges happens here so that the renderer and markers can assume
//! `0 <= start_time <= end_time`.

use crate::types::{parse_hex_color, MarkerRole, Rgba};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when editing the segment collection
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SegmentError {
    /// Start or end time is negative or not a finite number
    #[error("Invalid segment time: {0}")]
    InvalidTime(f64),

    /// Start time is after end time
    #[error("Segment start time {start} is after end time {end}")]
    InvertedRange { start: f64, end: f64 },

    /// A segment with this id already exists
    #[error("Duplicate segment id: {0}")]
    DuplicateId(SegmentId),

    /// No segment with this id
    #[error("Segment not found: {0}")]
    NotFound(SegmentId),
}

/// Result type for segment operations
pub type SegmentResult<T> = Result<T, SegmentError>;

/// Segment identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(pub String);

impl SegmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A time range of interest over the waveform
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub id: SegmentId,
    /// Start time in seconds
    pub start_time: f64,
    /// End time in seconds (>= start_time)
    pub end_time: f64,
    /// Whether boundary handles exist for this segment
    pub editable: bool,
    /// Fill and marker color
    pub color: Rgba,
    /// Free-form label shown in segment lists
    pub label_text: String,
}

impl Segment {
    /// Time of the given boundary
    pub fn boundary_time(&self, role: MarkerRole) -> f64 {
        match role {
            MarkerRole::Start => self.start_time,
            MarkerRole::End => self.end_time,
        }
    }

    /// Length in seconds
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Clamp a dragged boundary time so the segment stays valid
    ///
    /// A start boundary cannot pass the end, an end boundary cannot pass the
    /// start, and neither leaves `[0, duration]`.
    pub fn constrain_boundary(&self, role: MarkerRole, time: f64, duration: f64) -> f64 {
        let duration = duration.max(0.0);
        let time = if time.is_finite() { time } else { 0.0 };
        match role {
            MarkerRole::Start => time.clamp(0.0, self.end_time.min(duration)),
            MarkerRole::End => time.clamp(self.start_time.min(duration), duration),
        }
    }
}

/// Options for adding a segment
///
/// Deserializable so that segment lists can be loaded from YAML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentOptions {
    /// Explicit id; generated when omitted
    pub id: Option<String>,
    pub start_time: f64,
    pub end_time: f64,
    pub editable: bool,
    /// Hex color ("#RRGGBB"); the collection default is used when omitted
    pub color: Option<String>,
    pub label_text: Option<String>,
}

/// Ordered collection of segments
#[derive(Debug, Clone)]
pub struct Segments {
    segments: Vec<Segment>,
    default_color: Rgba,
    next_id: u64,
}

impl Default for Segments {
    fn default() -> Self {
        Self::new(parse_hex_color("#aaaaaa"))
    }
}

impl Segments {
    /// Create an empty collection with the color used when a segment has none
    pub fn new(default_color: Rgba) -> Self {
        Self {
            segments: Vec::new(),
            default_color,
            next_id: 0,
        }
    }

    /// Add a segment, returning its id
    pub fn add(&mut self, options: SegmentOptions) -> SegmentResult<SegmentId> {
        validate_range(options.start_time, options.end_time)?;

        let id = match options.id {
            Some(id) => SegmentId(id),
            None => self.generate_id(),
        };

        if self.get(&id).is_some() {
            return Err(SegmentError::DuplicateId(id));
        }

        let segment = Segment {
            id: id.clone(),
            start_time: options.start_time,
            end_time: options.end_time,
            editable: options.editable,
            color: options
                .color
                .as_deref()
                .map(parse_hex_color)
                .unwrap_or(self.default_color),
            label_text: options.label_text.unwrap_or_default(),
        };

        log::debug!(
            "Segments::add: {} [{:.3}, {:.3}] editable={}",
            id,
            segment.start_time,
            segment.end_time,
            segment.editable
        );
        self.segments.push(segment);
        Ok(id)
    }

    /// Remove a segment, returning it if it existed
    pub fn remove_by_id(&mut self, id: &SegmentId) -> Option<Segment> {
        let index = self.segments.iter().position(|s| &s.id == id)?;
        log::debug!("Segments::remove_by_id: {}", id);
        Some(self.segments.remove(index))
    }

    /// Remove every segment
    pub fn remove_all(&mut self) {
        self.segments.clear();
    }

    pub fn get(&self, id: &SegmentId) -> Option<&Segment> {
        self.segments.iter().find(|s| &s.id == id)
    }

    pub fn get_mut(&mut self, id: &SegmentId) -> Option<&mut Segment> {
        self.segments.iter_mut().find(|s| &s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Make a segment editable or read-only
    pub fn set_editable(&mut self, id: &SegmentId, editable: bool) -> SegmentResult<()> {
        let segment = self
            .get_mut(id)
            .ok_or_else(|| SegmentError::NotFound(id.clone()))?;
        segment.editable = editable;
        Ok(())
    }

    /// Move one boundary of a segment
    ///
    /// The new time must keep the range valid.
    pub fn update_boundary(
        &mut self,
        id: &SegmentId,
        role: MarkerRole,
        time: f64,
    ) -> SegmentResult<()> {
        let segment = self
            .get_mut(id)
            .ok_or_else(|| SegmentError::NotFound(id.clone()))?;

        let (start, end) = match role {
            MarkerRole::Start => (time, segment.end_time),
            MarkerRole::End => (segment.start_time, time),
        };
        validate_range(start, end)?;

        segment.start_time = start;
        segment.end_time = end;
        Ok(())
    }

    fn generate_id(&mut self) -> SegmentId {
        loop {
            let id = SegmentId(format!("segment.{}", self.next_id));
            self.next_id += 1;
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

fn validate_range(start: f64, end: f64) -> SegmentResult<()> {
    for time in [start, end] {
        if !time.is_finite() || time < 0.0 {
            return Err(SegmentError::InvalidTime(time));
        }
    }
    if start > end {
        return Err(SegmentError::InvertedRange { start, end });
    }
    Ok(())
}
