/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! # IronHL7 Core
//!
//! Core types and error definitions for the IronHL7 message codec.
//!
//! This crate provides the building blocks used across all IronHL7 crates:
//! - **Error types**: `FormatError`, `ScanError` and the unified `Hl7Error`
//! - **Message model**: `Message`, `Segment`, and the borrowed `SegmentRef`
//! - **Delimiters**: The fixed HL7 v2 wire vocabulary
//! - **Value types**: `Timestamp`
//!
//! ## Flat Model
//!
//! A message is an ordered list of segments, each a type code plus an ordered
//! list of opaque field strings. Nothing below field granularity is decoded.

pub mod delimiters;
pub mod error;
pub mod message;
pub mod types;

pub use error::{FormatError, Hl7Error, Result, ScanError};
pub use message::{Message, Segment, SegmentRef};
pub use types::Timestamp;
