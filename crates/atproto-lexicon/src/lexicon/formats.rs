//! Datetime format for lexicon records
//!
//! Records store timestamps as RFC 3339 strings (`datetime` string format).
//! The codec calls [`format_datetime`] and [`parse_datetime`] explicitly while
//! encoding and decoding instead of hiding the conversion behind the field
//! type, so the transform can be tested on its own.

use chrono::{DateTime, Datelike, SecondsFormat, SubsecRound, TimeZone, Utc};
use thiserror::Error;

/// Years a wire timestamp can carry (four digits, no sign)
const WIRE_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Errors produced while formatting or parsing a datetime
#[derive(Debug, Error, PartialEq)]
pub enum DatetimeError {
    /// Not a valid RFC 3339 timestamp
    #[error("Invalid datetime '{value}': {reason}")]
    Invalid {
        /// The rejected value
        value: String,
        /// Parser message
        reason: String,
    },

    /// The year cannot be written as four RFC 3339 digits
    #[error("Datetime {value} is outside years 0000-9999")]
    OutOfRange {
        /// The rejected timestamp
        value: DateTime<Utc>,
    },
}

/// Format a timestamp the way records carry it on the wire
///
/// Millisecond precision, UTC, `Z` suffix: `2024-01-01T00:00:00.000Z`.
/// Years outside 0000-9999 are rejected; [`parse_datetime`] could not read
/// them back.
pub fn format_datetime(value: &DateTime<Utc>) -> Result<String, DatetimeError> {
    if !WIRE_YEARS.contains(&value.year()) {
        return Err(DatetimeError::OutOfRange { value: *value });
    }
    Ok(value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Drop sub-millisecond precision
///
/// Record timestamps are held at wire precision so that a decoded record
/// equals the one that was encoded.
pub fn wire_precision(value: DateTime<Utc>) -> DateTime<Utc> {
    value.trunc_subsecs(3)
}

/// Parse a wire timestamp into UTC
///
/// Any RFC 3339 offset is accepted and normalized to UTC. Digits past the
/// millisecond are dropped.
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, DatetimeError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| wire_precision(dt.with_timezone(&Utc)))
        .map_err(|e| DatetimeError::Invalid {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Source of "now" for record creation timestamps
///
/// Record constructors never read the system clock implicitly; callers pass a
/// timestamp or a clock.
pub trait Clock {
    /// Current time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant, for deterministic records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Fix the clock at a Unix timestamp in milliseconds
    ///
    /// Out-of-range values fall back to the Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        let instant = Utc
            .timestamp_millis_opt(millis)
            .single()
            .unwrap_or(DateTime::<Utc>::default());
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
