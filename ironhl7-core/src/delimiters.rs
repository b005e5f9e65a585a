/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! HL7 v2 wire delimiters.
//!
//! Only [`SEGMENT_SEPARATOR`] and [`FIELD_SEPARATOR`] are interpreted by the
//! codec. The remaining characters belong to the wire vocabulary and pass
//! through field text untouched.

/// Terminates every segment.
pub const SEGMENT_SEPARATOR: u8 = b'\r';

/// Separates the segment type and each field.
pub const FIELD_SEPARATOR: u8 = b'|';

/// Separates components inside a field.
pub const COMPONENT_SEPARATOR: u8 = b'^';

/// Separates sub-components inside a component.
pub const SUB_COMPONENT_SEPARATOR: u8 = b'&';

/// Separates repetitions of a field.
pub const REPETITION_SEPARATOR: u8 = b'~';

/// Escapes delimiter characters inside field text.
pub const ESCAPE_CHARACTER: u8 = b'\\';

/// Encoding characters as declared in MSH-2.
pub const ENCODING_CHARACTERS: &str = "^~\\&";

/// Returns true if `byte` is interpreted by the codec.
#[inline]
#[must_use]
pub const fn is_structural(byte: u8) -> bool {
    byte == SEGMENT_SEPARATOR || byte == FIELD_SEPARATOR
}
