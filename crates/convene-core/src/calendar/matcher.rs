use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use tracing::warn;

use crate::calendar::grid::MonthGrid;
use crate::codec::MeetingTimeCodec;
use crate::date::CalendarDate;
use crate::meeting::DisplayMeeting;

/// Everything a month picker needs to render one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMarker {
    pub date: CalendarDate,
    pub in_focused_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub has_meeting: bool,
}

/// Membership queries over calendar dates.
///
/// Meeting dates are decoded from display text through the codec's zone and
/// clock, so a date written without a year lands in the current year.
#[derive(Clone)]
pub struct CalendarMatcher<Tz: TimeZone> {
    codec: MeetingTimeCodec<Tz>,
}

impl<Tz: TimeZone> CalendarMatcher<Tz> {
    /// Creates a matcher sharing the codec's zone and clock.
    pub fn new(codec: MeetingTimeCodec<Tz>) -> Self {
        Self { codec }
    }

    /// Checks if `date` is the local date of `now`.
    pub fn is_today(&self, date: CalendarDate, now: DateTime<Utc>) -> bool {
        self.codec.date_of(now) == date
    }

    /// Checks if `date` is the selected date.
    pub fn is_selected(date: CalendarDate, selected: Option<CalendarDate>) -> bool {
        selected == Some(date)
    }

    /// Checks if at least one meeting falls on `date`.
    ///
    /// A meeting whose date text does not parse is logged and treated as
    /// occurring on no date; it never fails the query.
    pub fn has_meeting_on(&self, date: CalendarDate, meetings: &[DisplayMeeting]) -> bool {
        meetings
            .iter()
            .filter_map(|meeting| self.meeting_date(meeting))
            .any(|meeting_date| meeting_date == date)
    }

    /// Returns the set of dates with at least one meeting.
    ///
    /// Unparsable meetings are skipped as in [`Self::has_meeting_on`].
    pub fn meeting_dates(&self, meetings: &[DisplayMeeting]) -> BTreeSet<CalendarDate> {
        meetings
            .iter()
            .filter_map(|meeting| self.meeting_date(meeting))
            .collect()
    }

    /// Marks every cell of a grid, decoding each meeting once.
    pub fn mark(
        &self,
        grid: &MonthGrid,
        meetings: &[DisplayMeeting],
        selected: Option<CalendarDate>,
        now: DateTime<Utc>,
    ) -> Vec<DayMarker> {
        let meeting_dates = self.meeting_dates(meetings);
        let today = self.codec.date_of(now);
        grid.cells()
            .iter()
            .map(|cell| DayMarker {
                date: cell.date,
                in_focused_month: cell.belongs_to_focused_month,
                is_today: cell.date == today,
                is_selected: Self::is_selected(cell.date, selected),
                has_meeting: meeting_dates.contains(&cell.date),
            })
            .collect()
    }

    fn meeting_date(&self, meeting: &DisplayMeeting) -> Option<CalendarDate> {
        match self.codec.parse_date(&meeting.date_text) {
            Ok(date) => Some(date),
            Err(err) => {
                warn!(
                    meeting_id = %meeting.id,
                    error = %err,
                    "skipping meeting with unparsable date"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::meeting::MeetingType;
    use crate::recurrence::Recurrence;
    use crate::status::MeetingStatus;
    use chrono::FixedOffset;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn date(y: i32, m0: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m0, d).unwrap()
    }

    fn matcher() -> CalendarMatcher<Utc> {
        let clock = FixedClock::new(utc(2025, 8, 19, 11, 0)).shared();
        CalendarMatcher::new(MeetingTimeCodec::new(Utc, clock))
    }

    fn meeting(id: &str, date_text: &str) -> DisplayMeeting {
        DisplayMeeting {
            id: id.to_string(),
            title: "Networking lunch".to_string(),
            meeting_type: MeetingType::General,
            status: MeetingStatus::Upcoming,
            date_text: date_text.to_string(),
            time_text: "12:00 PM - 1:00 PM".to_string(),
            location: "Bistro".to_string(),
            description: None,
            attendee_count: None,
            recurrence: Recurrence::None,
            group_id: None,
        }
    }

    #[test]
    fn malformed_sibling_does_not_hide_meetings() {
        let meetings = [
            meeting("bad", "sometime next week"),
            meeting("good", "Friday, August 22, 2025"),
        ];
        let matcher = matcher();
        assert!(matcher.has_meeting_on(date(2025, 7, 22), &meetings));
        assert!(!matcher.has_meeting_on(date(2025, 7, 23), &meetings));
    }

    #[test]
    fn yearless_dates_use_current_year() {
        let meetings = [meeting("m", "Friday, August 22")];
        let matcher = matcher();
        assert!(matcher.has_meeting_on(date(2025, 7, 22), &meetings));
        assert!(!matcher.has_meeting_on(date(2024, 7, 22), &meetings));
    }

    #[test]
    fn empty_meeting_list() {
        assert!(!matcher().has_meeting_on(date(2025, 7, 22), &[]));
        assert!(matcher().meeting_dates(&[]).is_empty());
    }

    #[test]
    fn is_today_uses_zone() {
        let now = utc(2025, 8, 19, 23, 30);
        assert!(matcher().is_today(date(2025, 7, 19), now));

        let clock = FixedClock::new(now).shared();
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let east = CalendarMatcher::new(MeetingTimeCodec::new(tz, clock));
        assert!(east.is_today(date(2025, 7, 20), now));
        assert!(!east.is_today(date(2025, 7, 19), now));
    }

    #[test]
    fn is_selected() {
        let d = date(2025, 7, 22);
        assert!(CalendarMatcher::<Utc>::is_selected(d, Some(d)));
        assert!(!CalendarMatcher::<Utc>::is_selected(d, Some(date(2025, 7, 23))));
        assert!(!CalendarMatcher::<Utc>::is_selected(d, None));
    }

    #[test]
    fn meeting_dates_deduplicates() {
        let meetings = [
            meeting("a", "Friday, August 22, 2025"),
            meeting("b", "Friday, August 22, 2025"),
            meeting("c", "Monday, September 1, 2025"),
            meeting("d", ""),
        ];
        let dates = matcher().meeting_dates(&meetings);
        assert_eq!(
            dates.into_iter().collect::<Vec<_>>(),
            vec![date(2025, 7, 22), date(2025, 8, 1)]
        );
    }

    #[test]
    fn mark_combines_all_flags() {
        let grid = MonthGrid::build(2025, 7).unwrap();
        let meetings = [
            meeting("a", "Friday, August 22, 2025"),
            meeting("b", "Monday, September 1, 2025"),
        ];
        let now = utc(2025, 8, 19, 11, 0);
        let markers = matcher().mark(&grid, &meetings, Some(date(2025, 7, 26)), now);
        assert_eq!(markers.len(), 42);

        let at = |d: CalendarDate| markers.iter().find(|m| m.date == d).copied().unwrap();
        let today = at(date(2025, 7, 19));
        assert!(today.is_today && today.in_focused_month && !today.has_meeting);

        let friday = at(date(2025, 7, 22));
        assert!(friday.has_meeting && !friday.is_today && !friday.is_selected);

        assert!(at(date(2025, 7, 26)).is_selected);

        let trailing = at(date(2025, 8, 1));
        assert!(trailing.has_meeting && !trailing.in_focused_month);

        assert_eq!(markers.iter().filter(|m| m.has_meeting).count(), 2);
        assert_eq!(markers.iter().filter(|m| m.is_today).count(), 1);
    }
}
