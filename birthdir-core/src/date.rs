//! Date utilities for recurring yearly dates.
//!
//! Everything here is pure: callers pass `today` explicitly so results are
//! reproducible. Use [`today_local`] at the edge of the program to read the
//! wall clock.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{BirthdirError, BirthdirResult};

/// Days per month in a leap year. Feb 29 is a valid month/day.
const MAX_DAYS_IN_MONTH: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A calendar month and day without a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> BirthdirResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(BirthdirError::Validation(format!(
                "month {month} is out of range"
            )));
        }

        let max_day = MAX_DAYS_IN_MONTH[(month - 1) as usize];
        if day == 0 || day > max_day {
            return Err(BirthdirError::Validation(format!(
                "day {day} is out of range for month {month}"
            )));
        }

        Ok(MonthDay { month, day })
    }

    pub fn of(date: NaiveDate) -> Self {
        MonthDay {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn is_leap_day(&self) -> bool {
        self.month == 2 && self.day == 29
    }

    /// Resolve this month/day in `year`.
    ///
    /// Feb 29 falls back to Feb 28 when `year` is not a leap year.
    pub fn in_year(&self, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
            .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
            // unwrap safe: month/day is validated, so only Feb 29 can miss and Feb 28 always exists
            .unwrap()
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// Returns the nearest date on or after `today` that carries `month_day`.
///
/// An exact match returns `today` itself. A month/day already passed this
/// year rolls over to next year.
pub fn next_occurrence(month_day: MonthDay, today: NaiveDate) -> NaiveDate {
    let this_year = month_day.in_year(today.year());
    if this_year >= today {
        this_year
    } else {
        month_day.in_year(today.year() + 1)
    }
}

/// Whole days from `today` until the next occurrence of `month_day`.
pub fn days_until(month_day: MonthDay, today: NaiveDate) -> u32 {
    let days = (next_occurrence(month_day, today) - today).num_days();
    u32::try_from(days).unwrap_or(0)
}

/// Today's date on the local wall clock.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// A birth date: month/day plus the birth year when known.
///
/// Textual forms are `YYYY-MM-DD`, `*-MM-DD` and `--MM-DD` (the last two
/// mean "year unknown"). The year only feeds age calculations; recurrence
/// uses the month/day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BirthDate {
    year: Option<i32>,
    month_day: MonthDay,
}

impl BirthDate {
    pub fn new(year: Option<i32>, month: u32, day: u32) -> BirthdirResult<Self> {
        let month_day = MonthDay::new(month, day)?;

        if let Some(y) = year {
            if NaiveDate::from_ymd_opt(y, month, day).is_none() {
                return Err(BirthdirError::Validation(format!(
                    "{y:04}-{month:02}-{day:02} is not a calendar date"
                )));
            }
        }

        Ok(BirthDate { year, month_day })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        BirthDate {
            year: Some(date.year()),
            month_day: MonthDay::of(date),
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn month_day(&self) -> MonthDay {
        self.month_day
    }
}

impl FromStr for BirthDate {
    type Err = BirthdirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || {
            BirthdirError::Validation(format!(
                "Invalid date '{s}'. Expected YYYY-MM-DD, *-MM-DD or --MM-DD"
            ))
        };

        let (year_part, rest) = if let Some(rest) = s.strip_prefix("--") {
            (None, rest)
        } else if let Some(rest) = s.strip_prefix("*-") {
            (None, rest)
        } else {
            let (year, rest) = s.split_once('-').ok_or_else(invalid)?;
            (Some(year), rest)
        };

        let (month, day) = rest.split_once('-').ok_or_else(invalid)?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let day: u32 = day.parse().map_err(|_| invalid())?;

        let year = match year_part {
            Some(y) if y.len() == 4 => Some(y.parse::<i32>().map_err(|_| invalid())?),
            Some(_) => return Err(invalid()),
            None => None,
        };

        BirthDate::new(year, month, day)
    }
}

impl TryFrom<String> for BirthDate {
    type Error = BirthdirError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BirthDate> for String {
    fn from(date: BirthDate) -> Self {
        date.to_string()
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(y) => write!(f, "{:04}-{}", y, self.month_day),
            None => write!(f, "*-{}", self.month_day),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn md(m: u32, d: u32) -> MonthDay {
        MonthDay::new(m, d).unwrap()
    }

    #[test]
    fn test_exact_match_is_today() {
        let today = date(2024, 10, 10);
        assert_eq!(next_occurrence(md(10, 10), today), today);
        assert_eq!(days_until(md(10, 10), today), 0);
    }

    #[test]
    fn test_later_this_year() {
        let today = date(2024, 10, 10);
        assert_eq!(next_occurrence(md(10, 15), today), date(2024, 10, 15));
        assert_eq!(days_until(md(10, 15), today), 5);
    }

    #[test]
    fn test_passed_rolls_to_next_year() {
        let today = date(2024, 10, 10);
        assert_eq!(next_occurrence(md(10, 9), today), date(2025, 10, 9));
        assert_eq!(days_until(md(10, 9), today), 364);
        assert_eq!(days_until(md(1, 1), date(2024, 12, 31)), 1);
    }

    #[test]
    fn test_leap_day_in_non_leap_year_is_feb_28() {
        assert_eq!(next_occurrence(md(2, 29), date(2025, 1, 10)), date(2025, 2, 28));
        assert_eq!(next_occurrence(md(2, 29), date(2024, 1, 10)), date(2024, 2, 29));
        assert_eq!(days_until(md(2, 29), date(2025, 2, 28)), 0);
        // Past Feb 28 of a non-leap year, the next one is the real leap day.
        assert_eq!(next_occurrence(md(2, 29), date(2027, 3, 1)), date(2028, 2, 29));
    }

    #[test]
    fn test_days_until_zero_only_on_matching_month_day() {
        let today = date(2023, 6, 15);
        for month in 1..=12 {
            for day in 1..=31 {
                let Ok(month_day) = MonthDay::new(month, day) else {
                    continue;
                };
                if month_day.is_leap_day() {
                    continue;
                }
                let days = days_until(month_day, today);
                assert_eq!(days == 0, month_day == MonthDay::of(today), "{month_day}");
                assert!(days <= 365);
                assert_eq!(days, days_until(month_day, today));
            }
        }
    }

    #[test]
    fn test_month_day_validation() {
        assert!(MonthDay::new(0, 1).is_err());
        assert!(MonthDay::new(13, 1).is_err());
        assert!(MonthDay::new(2, 30).is_err());
        assert!(MonthDay::new(4, 31).is_err());
        assert!(MonthDay::new(2, 29).is_ok());
    }

    #[test]
    fn test_parse_birth_date_forms() {
        let full: BirthDate = "1990-10-15".parse().unwrap();
        assert_eq!(full.year(), Some(1990));
        assert_eq!(full.month_day(), md(10, 15));

        let wildcard: BirthDate = "*-10-12".parse().unwrap();
        assert_eq!(wildcard.year(), None);
        assert_eq!(wildcard.month_day(), md(10, 12));

        let dashed: BirthDate = "--02-29".parse().unwrap();
        assert!(dashed.month_day().is_leap_day());
    }

    #[test]
    fn test_parse_birth_date_rejects_garbage() {
        assert!("".parse::<BirthDate>().is_err());
        assert!("tomorrow".parse::<BirthDate>().is_err());
        assert!("2023-02-29".parse::<BirthDate>().is_err());
        assert!("90-10-15".parse::<BirthDate>().is_err());
        assert!("*-13-01".parse::<BirthDate>().is_err());
    }

    #[test]
    fn test_birth_date_display() {
        assert_eq!(BirthDate::new(Some(1990), 3, 7).unwrap().to_string(), "1990-03-07");
        assert_eq!(BirthDate::new(None, 12, 25).unwrap().to_string(), "*-12-25");
    }
}
