//! Month-calendar data for date pickers.
//!
//! - [`MonthGrid`]: the fixed 6 x 7 grid of dates for a focused month
//! - [`CalendarMatcher`]: today / selected / has-meeting queries over grid dates
//!
//! Grid construction is a pure function of the month. Everything that depends
//! on "now" or on meeting data lives in the matcher, so a grid can be built
//! once and re-marked as meetings load.
//!
//! # Example
//!
//! ```
//! use convene_core::calendar::MonthGrid;
//! use convene_core::date::YearMonth;
//!
//! let august = YearMonth::new(2025, 7).unwrap();
//! let grid = MonthGrid::for_month(august).unwrap();
//! assert_eq!(grid.cells().len(), 42);
//! assert_eq!(grid.first().date.to_string(), "2025-07-27");
//!
//! let september = MonthGrid::for_month(august.next()).unwrap();
//! assert_eq!(september.title(), "September 2025");
//! ```

mod grid;
mod matcher;

#[cfg(test)]
mod golden_tests;

pub use grid::{CalendarCell, GRID_CELLS, MonthGrid, WEEKDAY_LABELS};
pub use matcher::{CalendarMatcher, DayMarker};
