/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Error types for the IronHL7 message codec.
//!
//! Parsing can fail in two distinct ways: the text was read but a segment
//! could not be split into a type and fields ([`FormatError`]), or the
//! input itself could not be read ([`ScanError`]). Both roll up into
//! [`Hl7Error`].

use thiserror::Error;

/// Result type alias using [`Hl7Error`] as the error type.
pub type Result<T> = std::result::Result<T, Hl7Error>;

/// Top-level error type for all IronHL7 codec operations.
#[derive(Debug, Error)]
pub enum Hl7Error {
    /// A segment could not be split into a type and fields.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// The underlying input could not be read.
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),
}

impl Hl7Error {
    /// Returns true if this error came from the segment splitter.
    #[must_use]
    pub const fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }

    /// Returns true if this error came from reading the input.
    #[must_use]
    pub const fn is_scan(&self) -> bool {
        matches!(self, Self::Scan(_))
    }
}

/// Errors raised while splitting segment text into a type and fields.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A non-empty segment chunk did not yield a segment type.
    #[error("invalid segment format at segment {index}: {reason}")]
    InvalidSegment {
        /// Zero-based position of the segment among the non-empty chunks.
        index: usize,
        /// Description of what was wrong with the chunk.
        reason: String,
    },
}

/// Errors raised while reading raw input before it is split.
///
/// The wrapped error is the one produced by the reader, untouched.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The reader failed.
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The input bytes are not valid UTF-8.
    #[error("input is not valid utf-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

impl From<std::io::Error> for Hl7Error {
    fn from(err: std::io::Error) -> Self {
        Self::Scan(ScanError::Io(err))
    }
}

impl From<std::str::Utf8Error> for Hl7Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::Scan(ScanError::InvalidUtf8(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_format_error_display() {
        let err = FormatError::InvalidSegment {
            index: 2,
            reason: "missing segment type".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid segment format at segment 2: missing segment type"
        );
    }

    #[test]
    fn test_hl7_error_from_format() {
        let err: Hl7Error = FormatError::InvalidSegment {
            index: 0,
            reason: "x".to_string(),
        }
        .into();
        assert!(err.is_format());
        assert!(!err.is_scan());
    }

    #[test]
    fn test_io_error_kept_unchanged() {
        let err: Hl7Error = io::Error::new(io::ErrorKind::UnexpectedEof, "truncated").into();
        match err {
            Hl7Error::Scan(ScanError::Io(inner)) => {
                assert_eq!(inner.kind(), io::ErrorKind::UnexpectedEof);
                assert_eq!(inner.to_string(), "truncated");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_utf8_error_is_scan() {
        let bytes = [0x4d, 0xff];
        let utf8 = std::str::from_utf8(&bytes).unwrap_err();
        let err: Hl7Error = utf8.into();
        assert!(err.is_scan());
        assert!(err.to_string().starts_with("scan error: input is not valid utf-8"));
    }
}
