//! Calendar dates without a time component.
//!
//! [`CalendarDate`] is the canonical date type: grid cells, picker selections
//! and decoded display dates are all compared as values of this type rather
//! than as formatted text. [`YearMonth`] is the month a calendar is focused
//! on, with the previous/next arithmetic used for month navigation.
//!
//! Months are 0-indexed (`0` = January) throughout the public API.

use std::fmt;

use chrono::{Datelike, Days, Month, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{TemporalError, TemporalResult};

/// Weekday names, Sunday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// A (year, month, day) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Creates a date from a year, a 0-indexed month and a day of month.
    pub fn new(year: i32, month0: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month0.checked_add(1)?, day).map(Self)
    }

    /// Wraps a chrono date.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the chrono date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month, 0-11.
    pub fn month0(&self) -> u32 {
        self.0.month0()
    }

    /// Returns the day of month, 1-31.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the weekday index, 0 = Sunday.
    pub fn weekday_from_sunday(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    /// Returns the month this date belongs to.
    pub fn year_month(&self) -> YearMonth {
        YearMonth {
            year: self.year(),
            month0: self.month0(),
        }
    }

    /// Returns the following day, or `None` at the end of the representable range.
    pub fn succ(&self) -> Option<Self> {
        self.0.checked_add_days(Days::new(1)).map(Self)
    }

    /// Parses a long-form display date.
    ///
    /// Accepted forms are `"Tuesday, August 19, 2025"`, `"Tuesday, August 19 2025"`
    /// and `"Tuesday, August 19"`; the latter takes `default_year`. The weekday
    /// token is required for structure but not checked against the date. Month
    /// names are the twelve full English names, matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::MalformedDate`] if there are fewer than two
    /// comma-separated segments, the month name is unknown, the day or year is
    /// not an integer, or the day does not exist in that month.
    pub fn parse_display(text: &str, default_year: i32) -> TemporalResult<Self> {
        let segments: Vec<&str> = text.split(',').map(str::trim).collect();
        if segments.len() < 2 {
            return Err(TemporalError::malformed_date(
                text,
                "expected \"Weekday, Month Day[, Year]\"",
            ));
        }
        if segments.len() > 3 {
            return Err(TemporalError::malformed_date(
                text,
                "too many comma-separated segments",
            ));
        }

        let mut tokens = segments[1].split_whitespace();
        let month_name = tokens
            .next()
            .ok_or_else(|| TemporalError::malformed_date(text, "missing month name"))?;
        let day_text = tokens
            .next()
            .ok_or_else(|| TemporalError::malformed_date(text, "missing day of month"))?;
        let inline_year = tokens.next();
        if tokens.next().is_some() {
            return Err(TemporalError::malformed_date(
                text,
                "unexpected text after the year",
            ));
        }

        let month = month_from_name(month_name)
            .ok_or_else(|| TemporalError::malformed_date(text, "unknown month name"))?;
        let day: u32 = parse_unsigned(day_text)
            .ok_or_else(|| TemporalError::malformed_date(text, "day is not a number"))?;
        let year = match (inline_year, segments.get(2).copied()) {
            (Some(_), Some(_)) => {
                return Err(TemporalError::malformed_date(text, "year given twice"));
            }
            (Some(year), None) | (None, Some(year)) => year
                .parse::<i32>()
                .map_err(|_| TemporalError::malformed_date(text, "year is not a number"))?,
            (None, None) => default_year,
        };

        NaiveDate::from_ymd_opt(year, month.number_from_month(), day)
            .map(Self)
            .ok_or_else(|| TemporalError::malformed_date(text, "day does not exist in that month"))
    }

    /// Formats the canonical long form, always with weekday and year.
    pub fn format_display(&self) -> String {
        self.0.format("%A, %B %-d, %Y").to_string()
    }
}

fn month_from_name(name: &str) -> Option<Month> {
    (1..=12u8)
        .filter_map(|n| Month::try_from(n).ok())
        .find(|month| month.name().eq_ignore_ascii_case(name))
}

fn parse_unsigned(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// A focused calendar month.
///
/// The year always lies within the range chrono can represent, so stepping
/// one month either way never overflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "YearMonthFields", into = "YearMonthFields")]
pub struct YearMonth {
    year: i32,
    month0: u32,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YearMonthFields {
    year: i32,
    month0: u32,
}

impl TryFrom<YearMonthFields> for YearMonth {
    type Error = TemporalError;

    fn try_from(fields: YearMonthFields) -> Result<Self, Self::Error> {
        Self::new(fields.year, fields.month0)
    }
}

impl From<YearMonth> for YearMonthFields {
    fn from(month: YearMonth) -> Self {
        Self {
            year: month.year,
            month0: month.month0,
        }
    }
}

impl YearMonth {
    /// Creates a month from a year and a 0-indexed month.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::InvalidMonth`] if `month0 > 11` or the year
    /// is outside chrono's date range.
    pub fn new(year: i32, month0: u32) -> TemporalResult<Self> {
        let years = NaiveDate::MIN.year()..=NaiveDate::MAX.year();
        if month0 > 11 || !years.contains(&year) {
            return Err(TemporalError::InvalidMonth {
                year,
                month: month0,
            });
        }
        Ok(Self { year, month0 })
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month, 0-11.
    pub fn month0(&self) -> u32 {
        self.month0
    }

    /// The month before this one; January steps back to December.
    #[must_use]
    pub fn previous(self) -> Self {
        if self.month0 == 0 {
            Self {
                year: self.year - 1,
                month0: 11,
            }
        } else {
            Self {
                year: self.year,
                month0: self.month0 - 1,
            }
        }
    }

    /// The month after this one; December steps forward to January.
    #[must_use]
    pub fn next(self) -> Self {
        if self.month0 == 11 {
            Self {
                year: self.year + 1,
                month0: 0,
            }
        } else {
            Self {
                year: self.year,
                month0: self.month0 + 1,
            }
        }
    }

    /// Returns the first day of the month.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::InvalidMonth`] if the year is outside the
    /// range chrono can represent.
    pub fn first_day(&self) -> TemporalResult<CalendarDate> {
        CalendarDate::new(self.year, self.month0, 1).ok_or(TemporalError::InvalidMonth {
            year: self.year,
            month: self.month0,
        })
    }

    /// Checks if a date falls in this month.
    pub fn contains(&self, date: CalendarDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }

    /// Returns the month title, e.g. `"August 2025"`.
    pub fn title(&self) -> String {
        let name = u8::try_from(self.month0 + 1)
            .ok()
            .and_then(|n| Month::try_from(n).ok())
            .map_or("", |m| m.name());
        format!("{} {}", name, self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month0 + 1)
    }
}
