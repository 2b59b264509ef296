//! Meeting lifecycle status derived from wall-clock time.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a meeting sits relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    /// `start <= now < end`.
    Current,
    /// `now < start`.
    Upcoming,
    /// `now >= end`.
    Past,
}

impl MeetingStatus {
    /// Classifies `[start, end)` relative to `now`.
    ///
    /// Total over all inputs; with `start < end` exactly one variant holds.
    pub fn classify(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if now < start {
            Self::Upcoming
        } else if now < end {
            Self::Current
        } else {
            Self::Past
        }
    }

    /// Returns the lowercase name used in JSON and UI tabs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Upcoming => "upcoming",
            Self::Past => "past",
        }
    }
}

impl fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
