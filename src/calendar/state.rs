//! The state of the calendar widget: which month is displayed, and which day (if any) filters the task list

use crate::calendar::grid::{build_grid, CalendarGrid};
use crate::calendar::AnchorMonth;
use crate::config::YEAR_OPTIONS_SPAN;
use crate::date::IsoDate;
use crate::error::Result;
use crate::filter::filter_by_date;
use crate::task::Task;
use crate::traits::{Clock, SystemClock};

/// Displayed month and date filter.
///
/// Both are independent: navigating between months never changes the filter, and selecting a day
/// never changes the displayed month.
#[derive(Clone, Debug)]
pub struct CalendarState<C: Clock = SystemClock> {
    anchor: AnchorMonth,
    filter_date: Option<IsoDate>,
    clock: C,
}

impl CalendarState<SystemClock> {
    /// A calendar that displays the current month, with no date filter
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for CalendarState<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> CalendarState<C> {
    /// A calendar that displays the month `clock` is in, with no date filter
    pub fn with_clock(clock: C) -> Self {
        let anchor = AnchorMonth::containing(clock.today());
        Self { anchor, filter_date: None, clock }
    }

    pub fn anchor(&self) -> AnchorMonth { self.anchor }
    pub fn year(&self) -> i32 { self.anchor.year() }
    /// 1-based
    pub fn month(&self) -> u32 { self.anchor.month() }
    pub fn month_name(&self) -> &'static str { self.anchor.name() }
    /// The day the task list is filtered on, if any
    pub fn selected_date(&self) -> Option<&IsoDate> { self.filter_date.as_ref() }

    /// Display the previous month. Nothing happens on the first supported month
    pub fn prev_month(&mut self) {
        self.move_to(self.anchor.previous());
    }

    /// Display the next month. Nothing happens on the last supported month
    pub fn next_month(&mut self) {
        self.move_to(self.anchor.next());
    }

    fn move_to(&mut self, anchor: Option<AnchorMonth>) {
        match anchor {
            Some(anchor) => {
                self.anchor = anchor;
                log::debug!("Calendar moved to {}", self.anchor);
            },
            None => log::warn!("Calendar cannot move past {}", self.anchor),
        }
    }

    /// Display the same month in another year.
    ///
    /// A year out of [`MIN_YEAR`](crate::calendar::MIN_YEAR)..=[`MAX_YEAR`](crate::calendar::MAX_YEAR)
    /// is rejected and leaves the calendar untouched
    pub fn set_year(&mut self, year: i32) -> Result<()> {
        self.anchor = self.anchor.with_year(year)?;
        Ok(())
    }

    /// Display another month of the same year. `month` is 1-based.
    ///
    /// An invalid month is rejected and leaves the calendar untouched
    pub fn set_month(&mut self, month: u32) -> Result<()> {
        self.anchor = self.anchor.with_month(month)?;
        Ok(())
    }

    /// Display the current month
    pub fn go_to_today(&mut self) {
        self.anchor = AnchorMonth::containing(self.clock.today());
    }

    /// Filter the task list on `iso`.
    ///
    /// Any day is accepted, even one that is not displayed in the current grid.
    /// Selecting the already selected day keeps it selected.
    pub fn select_day(&mut self, iso: IsoDate) {
        log::debug!("Filtering tasks on {}", iso);
        self.filter_date = Some(iso);
    }

    pub fn clear_date_filter(&mut self) {
        self.filter_date = None;
    }

    /// The years offered in the year selector: two years before the current one to two years after.
    ///
    /// This reads the clock every time it is called
    pub fn year_options(&self) -> Vec<i32> {
        let this_year = AnchorMonth::containing(self.clock.today()).year();
        ((this_year - YEAR_OPTIONS_SPAN)..=(this_year + YEAR_OPTIONS_SPAN)).collect()
    }

    /// The grid of the displayed month
    pub fn grid(&self) -> CalendarGrid {
        build_grid(self.anchor)
    }

    /// The tasks that match the date filter (all of them when there is no filter)
    pub fn visible_tasks<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        filter_by_date(tasks, self.selected_date())
    }
}
