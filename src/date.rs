//! Conversions between calendar dates and their `YYYY-MM-DD` representation

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// A calendar date, always written as `YYYY-MM-DD`.
///
/// It can only be built from a valid [`NaiveDate`], so its textual form is never arbitrary text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IsoDate {
    date: NaiveDate,
}

impl IsoDate {
    pub fn date(&self) -> NaiveDate { self.date }

    /// `DD.MM.YYYY`, whatever the locale
    pub fn format_for_display(&self) -> String {
        self.date.format("%d.%m.%Y").to_string()
    }
}

impl From<NaiveDate> for IsoDate {
    fn from(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl FromStr for IsoDate {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        decode(s).map(encode)
    }
}

impl Display for IsoDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.date.format("%Y-%m-%d"))
    }
}

/// Used to support serde
impl Serialize for IsoDate {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for IsoDate {
    fn deserialize<D>(deserializer: D) -> std::result::Result<IsoDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}


/// Encode a date as `YYYY-MM-DD`
pub fn encode(date: NaiveDate) -> IsoDate {
    IsoDate::from(date)
}

/// Parse a `YYYY-MM-DD` string.
///
/// Parsing is lenient: a missing or non-numeric month or day falls back to `1`
/// (so `"2026-03"` is the 1st of March), and out-of-range values roll over like calendar arithmetic
/// (`"2026-13-01"` is the 1st of January 2027, `"2026-01-32"` is the 1st of February).
/// Only a missing or non-numeric year is an error.
///
/// Years before 0 are written with a leading `-` (`"-0001-03-04"`), as [`encode`] does.
pub fn decode(iso: &str) -> Result<NaiveDate> {
    let trimmed = iso.trim();
    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(unsigned) => (-1, unsigned),
        None => (1, trimmed),
    };
    let mut parts = unsigned.split('-');

    let year = parts.next()
        .and_then(parse_component)
        .map(|year| sign * year)
        .ok_or_else(|| Error::InvalidDate(iso.to_string()))?;
    let month = parts.next().and_then(parse_component).unwrap_or(1);
    let day = parts.next().and_then(parse_component).unwrap_or(1);

    from_components(year, month, day)
        .ok_or_else(|| Error::InvalidDate(iso.to_string()))
}

/// `DD.MM.YYYY`, whatever the locale
pub fn format_for_display(iso: &IsoDate) -> String {
    iso.format_for_display()
}

fn parse_component(part: &str) -> Option<i32> {
    part.trim().parse().ok()
}

/// Builds `year-01-01`, then moves forward (or backward) by `month - 1` months and `day - 1` days
fn from_components(year: i32, month: i32, day: i32) -> Option<NaiveDate> {
    let january_first = NaiveDate::from_ymd_opt(year, 1, 1)?;

    let month_offset = i64::from(month) - 1;
    let first_of_month = if month_offset >= 0 {
        january_first.checked_add_months(Months::new(u32::try_from(month_offset).ok()?))?
    } else {
        january_first.checked_sub_months(Months::new(u32::try_from(-month_offset).ok()?))?
    };

    first_of_month.checked_add_signed(Duration::days(i64::from(day) - 1))
}


#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn encode_pads_with_zeroes() {
        assert_eq!(encode(ymd(2026, 1, 5)).to_string(), "2026-01-05");
        assert_eq!(encode(ymd(2025, 12, 31)).to_string(), "2025-12-31");
        assert_eq!(encode(ymd(987, 3, 4)).to_string(), "0987-03-04");
    }

    #[test]
    fn decode_reverts_encode() {
        let mut day = ymd(2023, 11, 1);
        let end = ymd(2025, 3, 31);
        while day <= end {
            let iso = encode(day).to_string();
            assert_eq!(decode(&iso).unwrap(), day, "round trip of {}", iso);
            day = day.succ_opt().unwrap();
        }
        assert_eq!(decode("2024-02-29").unwrap(), ymd(2024, 2, 29));
    }

    #[test]
    fn decode_reverts_encode_for_signed_years() {
        let dates = [
            ymd(-1, 3, 4), ymd(-1, 12, 27), ymd(0, 1, 1), ymd(-2024, 2, 29),
            ymd(10_000, 1, 9), NaiveDate::MIN, NaiveDate::MAX,
        ];
        for date in dates.iter() {
            let iso = encode(*date);
            assert_eq!(decode(&iso.to_string()).unwrap(), *date, "round trip of {}", iso);
            assert_eq!(iso.to_string().parse::<IsoDate>().unwrap(), iso);

            let json = serde_json::to_string(&iso).unwrap();
            assert_eq!(serde_json::from_str::<IsoDate>(&json).unwrap(), iso);
        }
        assert_eq!(encode(ymd(-1, 3, 4)).to_string(), "-0001-03-04");
        assert!(matches!(decode("-"), Err(Error::InvalidDate(_))));
    }

    #[test]
    fn decode_defaults_missing_parts_to_one() {
        assert_eq!(decode("2026").unwrap(), ymd(2026, 1, 1));
        assert_eq!(decode("2026-03").unwrap(), ymd(2026, 3, 1));
        assert_eq!(decode("2026-03-").unwrap(), ymd(2026, 3, 1));
        assert_eq!(decode("2026-xx-05").unwrap(), ymd(2026, 1, 5));
    }

    #[test]
    fn decode_rolls_over_out_of_range_parts() {
        assert_eq!(decode("2026-13-01").unwrap(), ymd(2027, 1, 1));
        assert_eq!(decode("2026-01-32").unwrap(), ymd(2026, 2, 1));
        assert_eq!(decode("2026-03-00").unwrap(), ymd(2026, 2, 28));
        assert_eq!(decode("2026-00-10").unwrap(), ymd(2025, 12, 10));
        assert_eq!(decode("2025-02-29").unwrap(), ymd(2025, 3, 1));
    }

    #[test]
    fn decode_rejects_a_bad_year() {
        assert!(matches!(decode(""), Err(Error::InvalidDate(_))));
        assert!(matches!(decode("abc"), Err(Error::InvalidDate(_))));
        assert!(matches!(decode("twenty-01-01"), Err(Error::InvalidDate(_))));
    }

    #[test]
    fn display_format() {
        let iso: IsoDate = "2026-01-10".parse().unwrap();
        assert_eq!(format_for_display(&iso), "10.01.2026");
        assert_eq!(encode(ymd(2025, 12, 3)).format_for_display(), "03.12.2025");
    }

    #[test]
    fn parsing_canonicalises() {
        let iso: IsoDate = "2026-1-5".parse().unwrap();
        assert_eq!(iso.to_string(), "2026-01-05");
    }

    #[test]
    fn serde_iso_date() {
        let iso: IsoDate = "2026-01-10".parse().unwrap();
        assert_eq!(serde_json::to_string(&iso).unwrap(), "\"2026-01-10\"");

        let back: IsoDate = serde_json::from_str("\"2026-01-10\"").unwrap();
        assert_eq!(back, iso);

        assert!(serde_json::from_str::<IsoDate>("\"not a date\"").is_err());
    }
}
