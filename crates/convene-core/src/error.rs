//! Error types for the meeting temporal model.
//!
//! Every fallible operation in this crate returns a [`TemporalError`]. Callers
//! that only need to branch on the category (for example to pick a UI message)
//! can use [`TemporalError::kind`].

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use thiserror::Error;

/// The category of a [`TemporalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalErrorKind {
    /// A 12-hour clock string could not be parsed.
    MalformedTime,
    /// A long-form display date could not be parsed.
    MalformedDate,
    /// A time-range string did not split into exactly two times.
    InvalidTimeRange,
    /// A decoded interval does not satisfy `start < end`.
    InvalidInterval,
    /// A local wall-clock time does not exist in the configured zone.
    NonexistentLocalTime,
    /// A month index outside 0-11, or a month chrono cannot represent.
    InvalidMonth,
}

impl TemporalErrorKind {
    /// Returns a stable snake_case name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedTime => "malformed_time",
            Self::MalformedDate => "malformed_date",
            Self::InvalidTimeRange => "invalid_time_range",
            Self::InvalidInterval => "invalid_interval",
            Self::NonexistentLocalTime => "nonexistent_local_time",
            Self::InvalidMonth => "invalid_month",
        }
    }
}

impl fmt::Display for TemporalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while parsing, transcoding or validating meeting times.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemporalError {
    /// The input is not a `H:MM AM|PM` clock string.
    #[error("malformed time {input:?}: {reason}")]
    MalformedTime { input: String, reason: &'static str },

    /// The input is not a `Weekday, Month Day[, Year]` date string.
    #[error("malformed date {input:?}: {reason}")]
    MalformedDate { input: String, reason: &'static str },

    /// Splitting on `" - "` did not yield exactly two segments.
    #[error("invalid time range {input:?}: expected 2 segments separated by \" - \", found {segments}")]
    InvalidTimeRange { input: String, segments: usize },

    /// The start instant is not strictly before the end instant.
    #[error("invalid interval: start {start} is not before end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The wall-clock time falls in a gap of the configured time zone.
    #[error("local time {date} {time} does not exist in the configured time zone")]
    NonexistentLocalTime { date: NaiveDate, time: NaiveTime },

    /// The month cannot be built into a calendar.
    #[error("invalid month {month} for year {year}")]
    InvalidMonth { year: i32, month: u32 },
}

impl TemporalError {
    pub(crate) fn malformed_time(input: &str, reason: &'static str) -> Self {
        Self::MalformedTime {
            input: input.to_string(),
            reason,
        }
    }

    pub(crate) fn malformed_date(input: &str, reason: &'static str) -> Self {
        Self::MalformedDate {
            input: input.to_string(),
            reason,
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> TemporalErrorKind {
        match self {
            Self::MalformedTime { .. } => TemporalErrorKind::MalformedTime,
            Self::MalformedDate { .. } => TemporalErrorKind::MalformedDate,
            Self::InvalidTimeRange { .. } => TemporalErrorKind::InvalidTimeRange,
            Self::InvalidInterval { .. } => TemporalErrorKind::InvalidInterval,
            Self::NonexistentLocalTime { .. } => TemporalErrorKind::NonexistentLocalTime,
            Self::InvalidMonth { .. } => TemporalErrorKind::InvalidMonth,
        }
    }

    /// Returns true if this error comes from parsing user or display text.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self.kind(),
            TemporalErrorKind::MalformedTime
                | TemporalErrorKind::MalformedDate
                | TemporalErrorKind::InvalidTimeRange
        )
    }
}

/// A specialized Result type for temporal operations.
pub type TemporalResult<T> = Result<T, TemporalError>;
