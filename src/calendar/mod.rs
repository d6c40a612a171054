//! The month calendar used to pick a due date and to filter tasks by date

pub mod grid;
pub mod state;

use std::fmt::{Display, Formatter};

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Month names, as shown in the month selector. `MONTH_NAMES[0]` is January
pub static MONTH_NAMES: [&str; 12] = [
    "Januar", "Februar", "März", "April", "Mai", "Juni",
    "Juli", "August", "September", "Oktober", "November", "Dezember",
];

/// The first year the calendar can display
pub const MIN_YEAR: i32 = 0;
/// The last year the calendar can display (years are written with four digits)
pub const MAX_YEAR: i32 = 9999;

/// The month a calendar grid is built for.
///
/// Its year is always within [`MIN_YEAR`]..=[`MAX_YEAR`], so that every grid (padding days included)
/// can be built with chrono.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorMonth {
    /// The 1st of the month
    first: NaiveDate,
}

impl AnchorMonth {
    /// `month` is 1-based
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if (1..=12).contains(&month) == false {
            return Err(Error::InvalidMonth(month));
        }
        if (MIN_YEAR..=MAX_YEAR).contains(&year) == false {
            return Err(Error::InvalidYear(year));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(Error::InvalidYear(year))?;
        Ok(Self { first })
    }

    /// The month `date` is in.
    ///
    /// A date out of the supported years is moved to the same month of the closest supported year
    pub fn containing(date: NaiveDate) -> Self {
        let first = date - Duration::days(i64::from(date.day0()));
        let year = first.year().clamp(MIN_YEAR, MAX_YEAR);
        if year == first.year() {
            return Self { first };
        }

        log::warn!("{} cannot be displayed, using year {} instead", date, year);
        Self::new(year, first.month()).unwrap_or(Self { first })
    }

    pub fn year(&self) -> i32  { self.first.year() }
    /// 1-based, 1 is January
    pub fn month(&self) -> u32 { self.first.month() }

    /// The first day of this month
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.first.month0() as usize]
    }

    /// The month before, or `None` for the first supported month
    pub fn previous(&self) -> Option<Self> {
        self.first.checked_sub_months(Months::new(1))
            .filter(|first| first.year() >= MIN_YEAR)
            .map(|first| Self { first })
    }

    /// The month after, or `None` for the last supported month
    pub fn next(&self) -> Option<Self> {
        self.first.checked_add_months(Months::new(1))
            .filter(|first| first.year() <= MAX_YEAR)
            .map(|first| Self { first })
    }

    pub fn with_year(&self, year: i32) -> Result<Self> {
        Self::new(year, self.month())
    }

    pub fn with_month(&self, month: u32) -> Result<Self> {
        Self::new(self.year(), month)
    }
}

impl Display for AnchorMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Serialized as `{"year": 2026, "month": 1}`
impl Serialize for AnchorMonth {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut anchor = serializer.serialize_struct("AnchorMonth", 2)?;
        anchor.serialize_field("year", &self.year())?;
        anchor.serialize_field("month", &self.month())?;
        anchor.end()
    }
}
