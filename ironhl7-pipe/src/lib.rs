/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! # IronHL7 Pipe
//!
//! Pipe-delimited HL7 v2 parsing and serialization for IronHL7.
//!
//! Messages are split on `\r` into segments and on `|` into fields. Nothing
//! below field granularity is interpreted, so `^`, `&`, `~` and `\` survive a
//! parse/serialize round trip untouched.
//!
//! ## Features
//!
//! - **Zero-copy parsing**: Segment views reference the original text
//! - **SIMD-accelerated**: Uses `memchr` for delimiter search
//! - **Round-trip safe**: `parse(&serialize(&m)) == m` for any message whose
//!   strings contain no `\r` or `|`

pub mod decoder;
pub mod encoder;
pub mod sample;

pub use decoder::{Decoder, parse, parse_bytes, parse_reader};
pub use encoder::{Encoder, encoded_len, serialize};
pub use ironhl7_core::message::{Message, Segment, SegmentRef};
pub use sample::{sample_message, sample_message_at};
