//! Time types for meetings.
//!
//! This module provides [`TimeOfDay`], the hour/minute pair edited through the
//! 12-hour time picker, and [`MeetingInterval`], the validated `[start, end)`
//! pair of instants a meeting occupies.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TemporalError, TemporalResult};
use crate::status::MeetingStatus;

/// A wall-clock time with minute precision.
///
/// Text form is the 12-hour clock used by the display representation:
/// `"10:00 AM"`, `"12:30 PM"`. Midnight renders as `"12:00 AM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

impl TimeOfDay {
    /// 12:00 AM.
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Creates a time from a 24-hour hour (0-23) and a minute (0-59).
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Returns the hour, 0-23.
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Returns the minute, 0-59.
    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Parses a `H:MM AM|PM` clock string.
    ///
    /// The hour may be zero-padded (`"09:30 AM"`) or not (`"9:30 AM"`).
    /// `12 AM` is hour 0, `12 PM` stays 12, other PM hours add 12.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::MalformedTime`] unless the input is exactly two
    /// space-separated tokens with an hour in 1-12, a two-digit minute in 0-59
    /// and an `AM`/`PM` meridiem.
    pub fn parse(text: &str) -> TemporalResult<Self> {
        let tokens: Vec<&str> = text.split(' ').collect();
        let [clock, meridiem] = tokens.as_slice() else {
            return Err(TemporalError::malformed_time(
                text,
                "expected \"H:MM AM\" or \"H:MM PM\"",
            ));
        };

        let Some((hour_text, minute_text)) = clock.split_once(':') else {
            return Err(TemporalError::malformed_time(
                text,
                "missing ':' between hour and minute",
            ));
        };

        let hour = parse_digits(hour_text, 1..=2)
            .ok_or_else(|| TemporalError::malformed_time(text, "hour is not a number"))?;
        if !(1..=12).contains(&hour) {
            return Err(TemporalError::malformed_time(
                text,
                "hour must be between 1 and 12",
            ));
        }

        let minute = parse_digits(minute_text, 2..=2)
            .ok_or_else(|| TemporalError::malformed_time(text, "minute must be two digits"))?;
        if minute > 59 {
            return Err(TemporalError::malformed_time(
                text,
                "minute must be between 00 and 59",
            ));
        }

        let hour = if meridiem.eq_ignore_ascii_case("AM") {
            hour % 12
        } else if meridiem.eq_ignore_ascii_case("PM") {
            hour % 12 + 12
        } else {
            return Err(TemporalError::malformed_time(
                text,
                "meridiem must be AM or PM",
            ));
        };

        Ok(Self { hour, minute })
    }

    /// Formats as `H:MM AM|PM`, never emitting hour `0`.
    pub fn format_12h(&self) -> String {
        self.to_string()
    }

    /// Returns the time one hour later, wrapping 23:xx to 0:xx.
    ///
    /// The wrap is silent: callers combining the result with the same date get
    /// an end before the start, which [`MeetingInterval::new`] rejects.
    #[must_use]
    pub fn add_one_hour(self) -> Self {
        Self {
            hour: (self.hour + 1) % 24,
            minute: self.minute,
        }
    }

    /// Returns the on-the-hour slots from `first_hour` to `last_hour` inclusive.
    ///
    /// Hours past 23 are ignored; an inverted range yields no slots.
    pub fn hourly_slots(first_hour: u32, last_hour: u32) -> Vec<Self> {
        (first_hour..=last_hour.min(23))
            .map(|hour| Self { hour, minute: 0 })
            .collect()
    }

    /// Converts to a chrono time (seconds are zero).
    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::MIN
            + Duration::hours(i64::from(self.hour))
            + Duration::minutes(i64::from(self.minute))
    }

    /// Converts from a chrono time, dropping seconds.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
        }
    }
}

/// Parses an all-digit string whose length falls in `len`.
fn parse_digits(text: &str, len: std::ops::RangeInclusive<usize>) -> Option<u32> {
    if !len.contains(&text.len()) || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        let meridiem = if self.hour < 12 { "AM" } else { "PM" };
        write!(f, "{}:{:02} {}", hour, self.minute, meridiem)
    }
}

impl FromStr for TimeOfDay {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The half-open interval `[start, end)` a meeting occupies, in UTC.
///
/// `start < end` always holds: [`MeetingInterval::new`] and deserialization
/// both reject anything else with [`TemporalError::InvalidInterval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IntervalFields", into = "IntervalFields")]
pub struct MeetingInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Wire shape of an interval: two ISO-8601 instants.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntervalFields {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
}

impl TryFrom<IntervalFields> for MeetingInterval {
    type Error = TemporalError;

    fn try_from(fields: IntervalFields) -> Result<Self, Self::Error> {
        Self::new(fields.start_time, fields.end_time)
    }
}

impl From<MeetingInterval> for IntervalFields {
    fn from(interval: MeetingInterval) -> Self {
        Self {
            start_time: interval.start,
            end_time: interval.end,
        }
    }
}

impl MeetingInterval {
    /// Creates an interval.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::InvalidInterval`] if `start >= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> TemporalResult<Self> {
        if start >= end {
            return Err(TemporalError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Start instant (inclusive).
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// End instant (exclusive).
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns the length of the interval; always positive.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Checks if an instant falls within `[start, end)`.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    /// Checks if two intervals share at least one instant.
    pub fn overlaps(&self, other: &MeetingInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Classifies the interval relative to `now`.
    pub fn status_at(&self, now: DateTime<Utc>) -> MeetingStatus {
        MeetingStatus::classify(self.start, self.end, now)
    }
}
