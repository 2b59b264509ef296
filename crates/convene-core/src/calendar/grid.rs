use chrono::Days;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::date::{CalendarDate, YearMonth};
use crate::error::{TemporalError, TemporalResult};

/// Number of cells in every month grid: six weeks of seven days.
pub const GRID_CELLS: usize = 42;

/// Column headers, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One day of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub date: CalendarDate,
    /// False for the days borrowed from the previous and next month.
    pub belongs_to_focused_month: bool,
}

/// The 42 consecutive days shown for a focused month.
///
/// The first cell is the most recent Sunday on or before the 1st of the
/// month. Days before the 1st come from the previous month and the grid is
/// padded with days of the next month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    month: YearMonth,
    cells: Vec<CalendarCell>,
}

impl MonthGrid {
    /// Builds the grid for a year and a 0-indexed month.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::InvalidMonth`] if `month0 > 11`.
    pub fn build(year: i32, month0: u32) -> TemporalResult<Self> {
        Self::for_month(YearMonth::new(year, month0)?)
    }

    /// Builds the grid for a focused month.
    ///
    /// # Errors
    ///
    /// Returns [`TemporalError::InvalidMonth`] if the grid would leave the
    /// range of dates chrono can represent.
    pub fn for_month(month: YearMonth) -> TemporalResult<Self> {
        let out_of_range = || TemporalError::InvalidMonth {
            year: month.year(),
            month: month.month0(),
        };

        let first = month.first_day()?;
        let leading = u64::from(first.weekday_from_sunday());
        let start = first
            .as_naive()
            .checked_sub_days(Days::new(leading))
            .ok_or_else(out_of_range)?;

        let cells: Vec<CalendarCell> = start
            .iter_days()
            .take(GRID_CELLS)
            .map(|day| {
                let date = CalendarDate::from_naive(day);
                CalendarCell {
                    date,
                    belongs_to_focused_month: month.contains(date),
                }
            })
            .collect();
        if cells.len() != GRID_CELLS {
            return Err(out_of_range());
        }

        trace!(%month, leading, "built month grid");
        Ok(Self { month, cells })
    }

    /// Returns the focused month.
    pub fn month(&self) -> YearMonth {
        self.month
    }

    /// Returns the month title, e.g. `"August 2025"`.
    pub fn title(&self) -> String {
        self.month.title()
    }

    /// Returns all 42 cells in order.
    pub fn cells(&self) -> &[CalendarCell] {
        &self.cells
    }

    /// Returns the six rows of seven cells, Sunday first.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(WEEKDAY_LABELS.len())
    }

    /// Returns the first cell, a Sunday.
    pub fn first(&self) -> &CalendarCell {
        &self.cells[0]
    }

    /// Returns the last cell, a Saturday.
    pub fn last(&self) -> &CalendarCell {
        &self.cells[GRID_CELLS - 1]
    }

    /// Checks if a date is shown anywhere on the grid.
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.first().date <= date && date <= self.last().date
    }

    /// Returns the grid position of a date, if shown.
    pub fn position(&self, date: CalendarDate) -> Option<usize> {
        self.cells.iter().position(|cell| cell.date == date)
    }
}

impl<'a> IntoIterator for &'a MonthGrid {
    type Item = &'a CalendarCell;
    type IntoIter = std::slice::Iter<'a, CalendarCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
