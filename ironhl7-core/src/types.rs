/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Value types shared across IronHL7 crates.
//!
//! - [`Timestamp`]: HL7 `DTM` date/time with second precision

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// `strftime` pattern for an HL7 `DTM` value with second precision.
pub const DTM_FORMAT: &str = "%Y%m%d%H%M%S";

/// HL7 date/time value, formatted as `YYYYMMDDHHMMSS`.
///
/// Values carry no zone; HL7 senders conventionally stamp local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Returns the current local time.
    #[inline]
    #[must_use]
    pub fn now() -> Self {
        Self(Local::now().naive_local())
    }

    /// Wraps an existing date/time.
    #[inline]
    #[must_use]
    pub const fn from_datetime(dt: NaiveDateTime) -> Self {
        Self(dt)
    }

    /// Builds a timestamp from calendar parts.
    ///
    /// Returns `None` if any part is out of range.
    #[must_use]
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
    ) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, min, sec))
            .map(Self)
    }

    /// Returns the wrapped date/time.
    #[inline]
    #[must_use]
    pub const fn as_datetime(&self) -> &NaiveDateTime {
        &self.0
    }

    /// Formats the value as an HL7 `DTM` string.
    #[must_use]
    pub fn to_hl7(&self) -> String {
        self.0.format(DTM_FORMAT).to_string()
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Self(dt)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DTM_FORMAT))
    }
}
