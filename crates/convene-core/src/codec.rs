//! Conversion between the display and wire representations of meeting times.
//!
//! The display representation is a long-form date string plus a
//! `"<start> - <end>"` time-range string, both in local wall-clock time. The
//! wire representation is a [`MeetingInterval`] of two UTC instants.
//!
//! ```text
//! "Tuesday, August 19, 2025"  ─┐                 ┌─> 2025-08-19T10:00:00Z
//!                              ├─ to_wire() ─────┤
//! "10:00 AM - 12:00 PM"       ─┘                 └─> 2025-08-19T12:00:00Z
//! ```
//!
//! The codec is bound to a time zone (the zone "local" means for display) and
//! a [`Clock`], which supplies the year for dates written without one.

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{Clock, SharedClock};
use crate::config::{ConfigError, DisplayZone, TimeSettings};
use crate::date::CalendarDate;
use crate::error::{TemporalError, TemporalResult};
use crate::meeting::{MeetingDraft, NewMeeting};
use crate::time::{MeetingInterval, TimeOfDay};

/// Separator between the two times of a time-range string.
pub const TIME_RANGE_SEPARATOR: &str = " - ";

/// Splits a time-range string into its start and end times.
///
/// # Errors
///
/// Returns [`TemporalError::InvalidTimeRange`] unless splitting on
/// [`TIME_RANGE_SEPARATOR`] yields exactly two segments, and
/// [`TemporalError::MalformedTime`] if either segment does not parse.
pub fn parse_time_range(text: &str) -> TemporalResult<(TimeOfDay, TimeOfDay)> {
    let segments: Vec<&str> = text.split(TIME_RANGE_SEPARATOR).collect();
    let [start, end] = segments.as_slice() else {
        return Err(TemporalError::InvalidTimeRange {
            input: text.to_string(),
            segments: segments.len(),
        });
    };
    Ok((TimeOfDay::parse(start)?, TimeOfDay::parse(end)?))
}

/// Joins two times into a time-range string.
pub fn format_time_range(start: TimeOfDay, end: TimeOfDay) -> String {
    format!("{start}{TIME_RANGE_SEPARATOR}{end}")
}

/// The display form of a meeting's date and time range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayTime {
    /// Long-form date, e.g. `"Tuesday, August 19, 2025"`.
    pub date_text: String,
    /// Time range, e.g. `"10:00 AM - 12:00 PM"`.
    pub time_text: String,
}

/// Bidirectional converter between display text and wire instants.
#[derive(Clone)]
pub struct MeetingTimeCodec<Tz: TimeZone = Local> {
    tz: Tz,
    clock: SharedClock,
}

impl MeetingTimeCodec<Local> {
    /// Creates a codec for the system's local time zone.
    pub fn local(clock: SharedClock) -> Self {
        Self::new(Local, clock)
    }
}

impl MeetingTimeCodec<DisplayZone> {
    /// Creates a codec for the zone named in the time settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOffset`] if `utc_offset` does not parse.
    pub fn from_settings(settings: &TimeSettings, clock: SharedClock) -> Result<Self, ConfigError> {
        Ok(Self::new(settings.display_zone()?, clock))
    }
}

impl<Tz: TimeZone> MeetingTimeCodec<Tz> {
    /// Creates a codec interpreting wall-clock times in `tz`.
    pub fn new(tz: Tz, clock: SharedClock) -> Self {
        Self { tz, clock }
    }

    /// Returns the display time zone.
    pub fn time_zone(&self) -> &Tz {
        &self.tz
    }

    /// Returns the current instant from the codec's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Returns the current year in the display time zone.
    pub fn current_year(&self) -> i32 {
        self.now().with_timezone(&self.tz).year()
    }

    /// Returns today's date in the display time zone.
    pub fn today(&self) -> CalendarDate {
        self.date_of(self.now())
    }

    /// Returns the local date an instant falls on.
    pub fn date_of(&self, instant: DateTime<Utc>) -> CalendarDate {
        CalendarDate::from_naive(instant.with_timezone(&self.tz).date_naive())
    }

    /// Parses a display date, defaulting a missing year to [`Self::current_year`].
    pub fn parse_date(&self, date_text: &str) -> TemporalResult<CalendarDate> {
        CalendarDate::parse_display(date_text, self.current_year())
    }

    /// Combines a date and a wall-clock time in the display zone into an instant.
    ///
    /// An ambiguous local time (the repeated hour when clocks fall back)
    /// resolves to the earlier instant.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::NonexistentLocalTime`] if the time is skipped
    /// by a forward clock change.
    pub fn combine(&self, date: CalendarDate, time: TimeOfDay) -> TemporalResult<DateTime<Utc>> {
        let naive = date.as_naive().and_time(time.to_naive_time());
        self.tz
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or(TemporalError::NonexistentLocalTime {
                date: date.as_naive(),
                time: time.to_naive_time(),
            })
    }

    /// Splits an instant into its local date and wall-clock time.
    pub fn decompose(&self, instant: DateTime<Utc>) -> (CalendarDate, TimeOfDay) {
        let local = instant.with_timezone(&self.tz).naive_local();
        (
            CalendarDate::from_naive(local.date()),
            TimeOfDay::from_naive_time(local.time()),
        )
    }

    /// Encodes display text into a wire interval.
    ///
    /// When `reference_date` is given (a date-picker selection), it is used as
    /// the meeting date and `date_text` is not parsed at all.
    ///
    /// # Errors
    ///
    /// Surfaces every parse error unchanged, and returns
    /// [`TemporalError::InvalidInterval`] if the end time is not after the start.
    pub fn to_wire(
        &self,
        date_text: &str,
        time_range_text: &str,
        reference_date: Option<CalendarDate>,
    ) -> TemporalResult<MeetingInterval> {
        let (start_time, end_time) = parse_time_range(time_range_text)?;
        let date = match reference_date {
            Some(date) => {
                debug!(%date, date_text, "using structured date instead of display text");
                date
            }
            None => self.parse_date(date_text)?,
        };
        MeetingInterval::new(
            self.combine(date, start_time)?,
            self.combine(date, end_time)?,
        )
    }

    /// Decodes a wire interval into display text.
    ///
    /// The date comes from the start instant only.
    pub fn to_display(&self, interval: &MeetingInterval) -> DisplayTime {
        let (date, start_time) = self.decompose(interval.start());
        let (_, end_time) = self.decompose(interval.end());
        DisplayTime {
            date_text: date.format_display(),
            time_text: format_time_range(start_time, end_time),
        }
    }

    /// Encodes a meeting form into the create payload sent to the repository.
    ///
    /// The draft's structured `selected_date`, when present, wins over its
    /// date text.
    pub fn encode_draft(&self, draft: &MeetingDraft) -> TemporalResult<NewMeeting> {
        let interval = self.to_wire(&draft.date_text, &draft.time_text, draft.selected_date)?;
        Ok(NewMeeting {
            title: draft.title.clone(),
            description: draft.description.clone(),
            meeting_type: draft.meeting_type,
            interval,
            location: draft.location.clone(),
            group_id: draft.group_id.clone(),
            recurrence: draft.recurrence,
        })
    }
}
