/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! HL7 message encoder.
//!
//! This module writes messages back to the pipe-delimited wire format:
//! each segment is its type, then `|` + value for every field, then `\r`.
//! Field text is written verbatim; nothing is escaped.

use bytes::{BufMut, BytesMut};
use ironhl7_core::delimiters::{FIELD_SEPARATOR, SEGMENT_SEPARATOR};
use ironhl7_core::message::{Message, Segment};

/// HL7 message encoder.
///
/// The encoder appends segments to an internal byte buffer. It can be
/// cleared and reused across messages.
#[derive(Debug, Default)]
pub struct Encoder {
    /// Buffer holding the encoded segments.
    buf: BytesMut,
}

impl Encoder {
    /// Creates a new encoder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(256),
        }
    }

    /// Creates a new encoder with pre-allocated capacity.
    ///
    /// # Arguments
    /// * `capacity` - Initial buffer capacity in bytes
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Appends every segment of a message.
    pub fn encode(&mut self, message: &Message) {
        self.buf.reserve(encoded_len(message));
        for segment in message {
            self.put_segment(segment);
        }
    }

    /// Appends one segment.
    #[inline]
    pub fn put_segment(&mut self, segment: &Segment) {
        self.buf.put_slice(segment.segment_type().as_bytes());
        for field in segment.fields() {
            self.buf.put_u8(FIELD_SEPARATOR);
            self.buf.put_slice(field.as_bytes());
        }
        self.buf.put_u8(SEGMENT_SEPARATOR);
    }

    /// Appends one segment from borrowed parts.
    ///
    /// # Arguments
    /// * `segment_type` - The segment type code
    /// * `fields` - Field values in positional order
    #[inline]
    pub fn put_segment_parts(&mut self, segment_type: &str, fields: &[&str]) {
        self.buf.put_slice(segment_type.as_bytes());
        for field in fields {
            self.buf.put_u8(FIELD_SEPARATOR);
            self.buf.put_slice(field.as_bytes());
        }
        self.buf.put_u8(SEGMENT_SEPARATOR);
    }

    /// Finalizes the encoder and returns the encoded bytes.
    #[must_use]
    pub fn finish(self) -> BytesMut {
        self.buf
    }

    /// Returns the number of bytes written so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Clears the encoder for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

/// Returns the exact length in bytes of the serialized message.
#[must_use]
pub fn encoded_len(message: &Message) -> usize {
    message
        .iter()
        .map(|segment| {
            // type + one separator per field + field text + terminator
            segment.segment_type().len()
                + segment.fields().iter().map(|f| f.len() + 1).sum::<usize>()
                + 1
        })
        .sum()
}

/// Serializes a message to HL7 text.
///
/// Never fails. Serialization does not modify the message.
#[must_use]
pub fn serialize(message: &Message) -> String {
    let mut out = String::with_capacity(encoded_len(message));
    for segment in message {
        out.push_str(segment.segment_type());
        for field in segment.fields() {
            out.push(char::from(FIELD_SEPARATOR));
            out.push_str(field);
        }
        out.push(char::from(SEGMENT_SEPARATOR));
    }
    out
}
