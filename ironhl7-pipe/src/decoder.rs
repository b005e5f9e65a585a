/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Zero-copy HL7 message decoder.
//!
//! This module splits pipe-delimited HL7 text into segments and fields in a
//! single pass. Segment views borrow from the input; an owned [`Message`] is
//! only built when the caller asks for one.
//!
//! The splitter is lenient:
//! - every `\r` splits, wherever it appears
//! - empty chunks between separators are skipped
//! - a trailing chunk without a final `\r` is still a segment
//! - segment types are not validated

use ironhl7_core::delimiters::{FIELD_SEPARATOR, SEGMENT_SEPARATOR};
use ironhl7_core::error::{FormatError, Hl7Error};
use ironhl7_core::message::{INLINE_FIELDS, Message, SegmentRef};
use memchr::{memchr, memchr_iter};
use smallvec::SmallVec;
use std::io::Read;
use tracing::trace;

/// Zero-copy HL7 message decoder.
///
/// The decoder walks the input one segment at a time, yielding
/// [`SegmentRef`] views into the original text.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    /// Input text.
    input: &'a str,
    /// Current position in the input.
    offset: usize,
    /// Number of non-empty segments produced so far.
    index: usize,
}

impl<'a> Decoder<'a> {
    /// Creates a new decoder for the given input.
    ///
    /// # Arguments
    /// * `input` - The HL7 message text to decode
    #[inline]
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            index: 0,
        }
    }

    /// Decodes all remaining segments into an owned message.
    ///
    /// # Errors
    /// Returns `FormatError` if a segment chunk cannot be split into a type
    /// and fields.
    pub fn decode(&mut self) -> Result<Message, FormatError> {
        let mut message = Message::new();
        while let Some(segment) = self.next_segment() {
            message.push(segment?.to_owned_segment());
        }
        Ok(message)
    }

    /// Parses the next non-empty segment.
    ///
    /// # Returns
    /// The next segment view, or `None` once the input is exhausted.
    pub fn next_segment(&mut self) -> Option<Result<SegmentRef<'a>, FormatError>> {
        loop {
            if self.offset >= self.input.len() {
                return None;
            }

            let remaining = &self.input[self.offset..];
            let (chunk, advance) = match memchr(SEGMENT_SEPARATOR, remaining.as_bytes()) {
                Some(pos) => (&remaining[..pos], pos + 1),
                // No separator left: whatever remains is the last segment.
                None => (remaining, remaining.len()),
            };
            self.offset += advance;

            if chunk.is_empty() {
                continue;
            }

            let index = self.index;
            self.index += 1;
            return Some(split_segment(chunk, index));
        }
    }

    /// Returns the current offset in the input.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the text not yet consumed.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.offset..]
    }

    /// Returns true if the input has been fully consumed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offset >= self.input.len()
    }

    /// Resets the decoder to the beginning of the input.
    #[inline]
    pub fn reset(&mut self) {
        self.offset = 0;
        self.index = 0;
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = Result<SegmentRef<'a>, FormatError>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next_segment()
    }
}

/// Splits one segment chunk on the field separator.
///
/// The first token is the segment type, the rest are fields. Consecutive
/// separators produce empty fields.
fn split_segment(chunk: &str, index: usize) -> Result<SegmentRef<'_>, FormatError> {
    let mut tokens: SmallVec<[&str; INLINE_FIELDS]> = SmallVec::new();
    let mut start = 0;
    for pos in memchr_iter(FIELD_SEPARATOR, chunk.as_bytes()) {
        tokens.push(&chunk[start..pos]);
        start = pos + 1;
    }
    tokens.push(&chunk[start..]);

    let Some((&segment_type, fields)) = tokens.split_first() else {
        return Err(FormatError::InvalidSegment {
            index,
            reason: "segment has no type".to_string(),
        });
    };

    Ok(SegmentRef::new(segment_type, SmallVec::from_slice(fields)))
}

/// Parses HL7 text into an owned message.
///
/// # Errors
/// Returns `FormatError` if a segment chunk cannot be split.
pub fn parse(raw: &str) -> Result<Message, FormatError> {
    let message = Decoder::new(raw).decode()?;
    trace!(
        segments = message.len(),
        bytes = raw.len(),
        "parsed hl7 message"
    );
    Ok(message)
}

/// Parses HL7 bytes into an owned message.
///
/// # Errors
/// Returns `Hl7Error::Scan` if the bytes are not UTF-8, or
/// `Hl7Error::Format` if a segment cannot be split.
pub fn parse_bytes(raw: &[u8]) -> Result<Message, Hl7Error> {
    let text = std::str::from_utf8(raw)?;
    Ok(parse(text)?)
}

/// Reads a whole stream and parses it as an HL7 message.
///
/// Read failures are returned as they came from the reader.
///
/// # Errors
/// Returns `Hl7Error::Scan` on read or UTF-8 failure, or
/// `Hl7Error::Format` if a segment cannot be split.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Message, Hl7Error> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    parse_bytes(&buf)
}
