//! Fixed-size month grids, six weeks of seven days, Monday first

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::calendar::AnchorMonth;
use crate::date::{encode, IsoDate};
use crate::error::Result;

/// Number of cells in a grid (6 weeks)
pub const GRID_SIZE: usize = 42;

/// A day in a [`CalendarGrid`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub iso: IsoDate,
    /// Whether this day belongs to the month of the grid (other days are padding from the adjacent months)
    pub in_month: bool,
}

impl CalendarCell {
    /// Whether this day is one of `dates_with_tasks` (see [`crate::filter::dates_with_tasks`])
    pub fn has_tasks(&self, dates_with_tasks: &HashSet<IsoDate>) -> bool {
        dates_with_tasks.contains(&self.iso)
    }
}

/// 42 consecutive days, starting on a Monday, that cover a whole month
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CalendarGrid {
    anchor: AnchorMonth,
    cells: Vec<CalendarCell>,
}

impl CalendarGrid {
    /// Build the grid for a month. `month` is 1-based
    pub fn for_month(year: i32, month: u32) -> Result<Self> {
        Ok(build_grid(AnchorMonth::new(year, month)?))
    }

    pub fn anchor(&self) -> AnchorMonth { self.anchor }
    pub fn cells(&self) -> &[CalendarCell] { &self.cells }

    /// The grid split into its six rows
    pub fn weeks(&self) -> std::slice::Chunks<'_, CalendarCell> {
        self.cells.chunks(7)
    }

    /// Find the cell of a given day, if it is displayed in this grid
    pub fn cell(&self, iso: &IsoDate) -> Option<&CalendarCell> {
        self.cells.iter().find(|cell| &cell.iso == iso)
    }

    /// The top-left day
    pub fn first(&self) -> NaiveDate {
        self.cells[0].date
    }

    /// The bottom-right day
    pub fn last(&self) -> NaiveDate {
        self.cells[GRID_SIZE - 1].date
    }
}

/// Build the 42-day grid that displays `anchor`.
///
/// The grid starts on the Monday on or before the first day of the month.
pub fn build_grid(anchor: AnchorMonth) -> CalendarGrid {
    let first = anchor.first_day();
    let weekday = first.weekday().num_days_from_sunday() as i64;
    let shift = (weekday + 6) % 7;
    let start = first - Duration::days(shift);

    let cells = start.iter_days()
        .take(GRID_SIZE)
        .map(|date| CalendarCell {
            date,
            iso: encode(date),
            in_month: date.month() == anchor.month(),
        })
        .collect();

    CalendarGrid { anchor, cells }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use crate::calendar::{MAX_YEAR, MIN_YEAR};
    use crate::error::Error;

    fn check_grid_invariants(grid: &CalendarGrid) {
        let anchor = grid.anchor();
        let cells = grid.cells();
        assert_eq!(cells.len(), GRID_SIZE);
        assert_eq!(cells[0].date.weekday(), Weekday::Mon, "{}", anchor);
        for pair in cells.windows(2) {
            assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
        }
        for cell in cells {
            assert_eq!(cell.iso, encode(cell.date));
            assert_eq!(cell.in_month, cell.date.month() == anchor.month());
        }
        assert!(cells.iter().any(|cell| cell.in_month && cell.date.day() == 1), "{}", anchor);
        assert_eq!(cells.iter().filter(|cell| cell.in_month).count(), anchor.first_day().iter_days()
            .take_while(|d| d.month() == anchor.month()).count());
    }

    #[test]
    fn every_month_of_a_few_years() {
        for year in 1999..=2030 {
            for month in 1..=12 {
                let grid = CalendarGrid::for_month(year, month).unwrap();
                check_grid_invariants(&grid);
            }
        }
    }

    #[test]
    fn every_month_of_the_boundary_years() {
        for year in [MIN_YEAR, MIN_YEAR + 1, MAX_YEAR - 1, MAX_YEAR].iter() {
            for month in 1..=12 {
                let grid = CalendarGrid::for_month(*year, month).unwrap();
                check_grid_invariants(&grid);
            }
        }

        // The padding days of the extreme months are outside of the supported years
        let first = CalendarGrid::for_month(MIN_YEAR, 1).unwrap();
        assert_eq!(first.first().year(), MIN_YEAR - 1);
        let last = CalendarGrid::for_month(MAX_YEAR, 12).unwrap();
        assert_eq!(last.last().year(), MAX_YEAR + 1);
    }

    #[test]
    fn unsupported_years_are_refused() {
        assert!(matches!(CalendarGrid::for_month(300_000, 1), Err(Error::InvalidYear(300_000))));
        assert!(matches!(CalendarGrid::for_month(-1, 12), Err(Error::InvalidYear(-1))));
    }

    #[test]
    fn month_starting_on_a_monday() {
        // June 2026 starts on a Monday
        let grid = CalendarGrid::for_month(2026, 6).unwrap();
        assert_eq!(grid.first(), NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        assert!(grid.cells()[0].in_month);
        assert_eq!(grid.last(), NaiveDate::from_ymd_opt(2026, 7, 12).unwrap());
    }

    #[test]
    fn month_starting_on_a_sunday() {
        // February 2026 starts on a Sunday: the first row is almost entirely January
        let grid = CalendarGrid::for_month(2026, 2).unwrap();
        assert_eq!(grid.first(), NaiveDate::from_ymd_opt(2026, 1, 26).unwrap());
        let first_week: Vec<bool> = grid.weeks().next().unwrap().iter().map(|c| c.in_month).collect();
        assert_eq!(first_week, vec![false, false, false, false, false, false, true]);
    }

    #[test]
    fn grids_are_deterministic() {
        let anchor = AnchorMonth::new(2025, 12).unwrap();
        assert_eq!(build_grid(anchor), build_grid(anchor));
    }

    #[test]
    fn cells_lookup() {
        let grid = CalendarGrid::for_month(2026, 1).unwrap();
        assert_eq!(grid.weeks().count(), 6);

        let padding: IsoDate = "2025-12-29".parse().unwrap();
        assert_eq!(grid.cell(&padding).map(|c| c.in_month), Some(false));
        let outside: IsoDate = "2026-03-01".parse().unwrap();
        assert!(grid.cell(&outside).is_none());
    }

    #[test]
    fn task_markers() {
        let grid = CalendarGrid::for_month(2026, 1).unwrap();
        let mut marked = HashSet::new();
        marked.insert("2026-01-10".parse::<IsoDate>().unwrap());

        let with_tasks: Vec<String> = grid.cells().iter()
            .filter(|cell| cell.has_tasks(&marked))
            .map(|cell| cell.iso.to_string())
            .collect();
        assert_eq!(with_tasks, vec!["2026-01-10".to_string()]);
    }
}
