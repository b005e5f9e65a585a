/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Message model for HL7 v2 pipe-delimited messages.
//!
//! This module provides:
//! - [`Message`]: Owned, ordered list of segments
//! - [`Segment`]: Owned segment type plus positional fields
//! - [`SegmentRef`]: Zero-copy view of a segment inside the input text
//!
//! The model is a flat container. Field text is opaque: component,
//! sub-component and repetition delimiters stay inside the field string.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Inline capacity for field references in a [`SegmentRef`].
pub const INLINE_FIELDS: usize = 16;

/// A single HL7 segment: a type code and its fields in wire order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Segment {
    /// Segment type code (e.g., "MSH", "PID").
    #[serde(rename = "Type")]
    segment_type: String,
    /// Field values, excluding the type code.
    #[serde(rename = "Fields", default)]
    fields: Vec<String>,
}

impl Segment {
    /// Creates a segment with no fields.
    ///
    /// # Arguments
    /// * `segment_type` - The segment type code
    #[must_use]
    pub fn new(segment_type: impl Into<String>) -> Self {
        Self {
            segment_type: segment_type.into(),
            fields: Vec::new(),
        }
    }

    /// Creates a segment from a type code and field values.
    ///
    /// # Arguments
    /// * `segment_type` - The segment type code
    /// * `fields` - Field values in positional order
    #[must_use]
    pub fn with_fields<I, S>(segment_type: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segment_type: segment_type.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the segment type code.
    #[inline]
    #[must_use]
    pub fn segment_type(&self) -> &str {
        &self.segment_type
    }

    /// Returns all field values in order.
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Gets a field by zero-based position, not counting the type code.
    #[inline]
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Returns the number of fields.
    #[inline]
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Appends a field value.
    #[inline]
    pub fn push_field(&mut self, value: impl Into<String>) {
        self.fields.push(value.into());
    }
}

impl From<SegmentRef<'_>> for Segment {
    fn from(view: SegmentRef<'_>) -> Self {
        view.to_owned_segment()
    }
}

/// A complete HL7 message.
///
/// Segment order is preserved exactly as appended or parsed. Segment types
/// may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "Segments", default)]
    segments: Vec<Segment>,
}

impl Message {
    /// Creates an empty message.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Creates an empty message with room for `capacity` segments.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            segments: Vec::with_capacity(capacity),
        }
    }

    /// Appends a new segment built from a type code and field values.
    ///
    /// No validation is performed on either the type or the fields.
    ///
    /// # Arguments
    /// * `segment_type` - The segment type code
    /// * `fields` - Field values in positional order
    pub fn add_segment<I, S>(&mut self, segment_type: impl Into<String>, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.segments.push(Segment::with_fields(segment_type, fields));
    }

    /// Appends an already built segment.
    #[inline]
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Returns all segments in order.
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Gets a segment by zero-based position.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Returns an iterator over the segments.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Returns the number of segments.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the message has no segments.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Consumes the message and returns its segments.
    #[must_use]
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }
}

impl From<Vec<Segment>> for Message {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl FromIterator<Segment> for Message {
    fn from_iter<T: IntoIterator<Item = Segment>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl Extend<Segment> for Message {
    fn extend<T: IntoIterator<Item = Segment>>(&mut self, iter: T) {
        self.segments.extend(iter);
    }
}

impl<'m> IntoIterator for &'m Message {
    type Item = &'m Segment;
    type IntoIter = std::slice::Iter<'m, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl IntoIterator for Message {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

/// Zero-copy view of one segment inside the parsed text.
///
/// The type and field slices borrow from the input, so decoding a segment
/// allocates nothing until [`SegmentRef::to_owned_segment`] is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentRef<'a> {
    segment_type: &'a str,
    fields: SmallVec<[&'a str; INLINE_FIELDS]>,
}

impl<'a> SegmentRef<'a> {
    /// Creates a segment view from already split parts.
    ///
    /// # Arguments
    /// * `segment_type` - The segment type slice
    /// * `fields` - Field slices in wire order
    #[must_use]
    pub fn new(segment_type: &'a str, fields: SmallVec<[&'a str; INLINE_FIELDS]>) -> Self {
        Self {
            segment_type,
            fields,
        }
    }

    /// Returns the segment type code.
    #[inline]
    #[must_use]
    pub const fn segment_type(&self) -> &'a str {
        self.segment_type
    }

    /// Returns the field slices.
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[&'a str] {
        &self.fields
    }

    /// Gets a field by zero-based position.
    #[inline]
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }

    /// Returns the number of fields.
    #[inline]
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Copies this view into an owned [`Segment`].
    #[must_use]
    pub fn to_owned_segment(&self) -> Segment {
        Segment::with_fields(self.segment_type, self.fields.iter().copied())
    }
}
