//! Golden tests for month grid layout.
//!
//! Grids are rendered as text tables: days of the focused month are shown
//! plain, borrowed days in parentheses. Run with `cargo insta review` to
//! update snapshots after intentional changes.

use chrono::{DateTime, TimeZone, Utc};

use crate::calendar::{CalendarCell, CalendarMatcher, DayMarker, MonthGrid, WEEKDAY_LABELS};
use crate::clock::FixedClock;
use crate::codec::MeetingTimeCodec;
use crate::date::{CalendarDate, YearMonth};
use crate::meeting::{DisplayMeeting, MeetingType, WireMeeting};
use crate::time::MeetingInterval;

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn render_cell(cell: &CalendarCell) -> String {
    if cell.belongs_to_focused_month {
        format!(" {:>2} ", cell.date.day())
    } else {
        format!("({:>2})", cell.date.day())
    }
}

fn render(grid: &MonthGrid) -> String {
    let mut lines = vec![grid.title()];
    lines.push(format!(
        "|{}|",
        WEEKDAY_LABELS.map(|label| format!("{label} ")).join("|")
    ));
    for week in grid.weeks() {
        let cells: Vec<String> = week.iter().map(render_cell).collect();
        lines.push(format!("|{}|", cells.join("|")));
    }
    lines.join("\n")
}

fn describe(marker: &DayMarker) -> Option<String> {
    let mut flags = Vec::new();
    if marker.is_today {
        flags.push("today");
    }
    if marker.is_selected {
        flags.push("selected");
    }
    if marker.has_meeting {
        flags.push("meeting");
    }
    if flags.is_empty() {
        return None;
    }
    if !marker.in_focused_month {
        flags.push("adjacent");
    }
    Some(format!("{} {}", marker.date, flags.join(",")))
}

#[test]
fn grid_august_2025() {
    let grid = MonthGrid::build(2025, 7).unwrap();
    insta::assert_snapshot!(render(&grid), @r"
    August 2025
    |Sun |Mon |Tue |Wed |Thu |Fri |Sat |
    |(27)|(28)|(29)|(30)|(31)|  1 |  2 |
    |  3 |  4 |  5 |  6 |  7 |  8 |  9 |
    | 10 | 11 | 12 | 13 | 14 | 15 | 16 |
    | 17 | 18 | 19 | 20 | 21 | 22 | 23 |
    | 24 | 25 | 26 | 27 | 28 | 29 | 30 |
    | 31 |( 1)|( 2)|( 3)|( 4)|( 5)|( 6)|
    ");
}

#[test]
fn grid_february_starting_on_sunday() {
    let grid = MonthGrid::for_month(YearMonth::new(2026, 1).unwrap()).unwrap();
    insta::assert_snapshot!(render(&grid), @r"
    February 2026
    |Sun |Mon |Tue |Wed |Thu |Fri |Sat |
    |  1 |  2 |  3 |  4 |  5 |  6 |  7 |
    |  8 |  9 | 10 | 11 | 12 | 13 | 14 |
    | 15 | 16 | 17 | 18 | 19 | 20 | 21 |
    | 22 | 23 | 24 | 25 | 26 | 27 | 28 |
    |( 1)|( 2)|( 3)|( 4)|( 5)|( 6)|( 7)|
    |( 8)|( 9)|(10)|(11)|(12)|(13)|(14)|
    ");
}

#[test]
fn markers_for_fetched_meetings() {
    let now = utc(2025, 8, 19, 11, 0);
    let codec = MeetingTimeCodec::new(Utc, FixedClock::new(now).shared());

    let wire = [
        ("m-1", utc(2025, 8, 19, 10, 0), utc(2025, 8, 19, 12, 0)),
        ("m-2", utc(2025, 8, 22, 7, 0), utc(2025, 8, 22, 8, 30)),
        ("m-3", utc(2025, 9, 1, 18, 0), utc(2025, 9, 1, 19, 0)),
        ("m-4", utc(2025, 10, 3, 18, 0), utc(2025, 10, 3, 19, 0)),
    ];
    let mut meetings: Vec<DisplayMeeting> = wire
        .iter()
        .map(|(id, start, end)| {
            let interval = MeetingInterval::new(*start, *end).unwrap();
            let meeting =
                WireMeeting::new(*id, "Chapter meeting", MeetingType::General, interval, "Hall", "g");
            DisplayMeeting::from_wire(&meeting, &codec, now)
        })
        .collect();
    meetings[3].date_text = "Friday the third".to_string();

    let matcher = CalendarMatcher::new(codec);
    let grid = MonthGrid::build(2025, 7).unwrap();
    let selected = CalendarDate::new(2025, 7, 26);
    let markers = matcher.mark(&grid, &meetings, selected, now);

    let described: Vec<String> = markers.iter().filter_map(describe).collect();
    insta::assert_snapshot!(described.join("\n"), @r"
    2025-08-19 today,meeting
    2025-08-22 meeting
    2025-08-26 selected
    2025-09-01 meeting,adjacent
    ");
}
