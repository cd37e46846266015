use crate::easter::easter_sunday;
use crate::error::{CalendarError, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A public holiday in the reporting calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

/// Hours in a full reporting workday.
const WORKDAY_HOURS: i64 = 8;

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(CalendarError::UnsupportedYear { year })
}

/// Midsummer Eve is the Friday falling between June 19 and June 25.
fn midsummer_eve(year: i32) -> Result<NaiveDate> {
    let mut date = ymd(year, 6, 19)?;
    while date.weekday() != Weekday::Fri {
        date = date + Duration::days(1);
    }
    Ok(date)
}

/// All Saints' Day is the Saturday falling between October 31 and
/// November 6.
fn all_saints_day(year: i32) -> Result<NaiveDate> {
    let mut date = ymd(year, 10, 31)?;
    while date.weekday() != Weekday::Sat {
        date = date + Duration::days(1);
    }
    Ok(date)
}

/// Returns the public holidays of `year`, fixed dates first and the
/// Easter-floating ones after, each in calendar order within its group.
pub fn holidays(year: i32) -> Result<Vec<Holiday>> {
    let easter = easter_sunday(year)?;
    let holiday = |date: NaiveDate, name: &str| Holiday {
        date,
        name: name.to_string(),
    };

    Ok(vec![
        holiday(ymd(year, 1, 1)?, "New Year's Day"),
        holiday(ymd(year, 1, 6)?, "Epiphany"),
        holiday(ymd(year, 5, 1)?, "May Day"),
        holiday(ymd(year, 6, 6)?, "National Day"),
        holiday(ymd(year, 12, 24)?, "Christmas Eve"),
        holiday(ymd(year, 12, 25)?, "Christmas Day"),
        holiday(ymd(year, 12, 26)?, "Second Day of Christmas"),
        holiday(ymd(year, 12, 31)?, "New Year's Eve"),
        holiday(easter - Duration::days(2), "Good Friday"),
        holiday(easter, "Easter Sunday"),
        holiday(easter + Duration::days(1), "Easter Monday"),
        holiday(easter + Duration::days(39), "Ascension Day"),
        holiday(easter + Duration::days(49), "Whit Sunday"),
        holiday(midsummer_eve(year)?, "Midsummer Eve"),
        holiday(midsummer_eve(year)? + Duration::days(1), "Midsummer Day"),
        holiday(all_saints_day(year)?, "All Saints' Day"),
    ])
}

/// Workable hours in the closed range `from..=to`: eight hours per
/// Monday-Friday day that is not a public holiday. An inverted range
/// yields zero. This is the denominator behind the invoice-basis
/// percentage figures.
pub fn workable_hours(from: NaiveDate, to: NaiveDate) -> Result<Decimal> {
    if from > to {
        return Ok(Decimal::ZERO);
    }

    let mut holiday_dates: HashSet<NaiveDate> = HashSet::new();
    for year in from.year()..=to.year() {
        for holiday in holidays(year)? {
            holiday_dates.insert(holiday.date);
        }
    }

    let mut days: i64 = 0;
    let mut date = from;
    while date <= to {
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        if !weekend && !holiday_dates.contains(&date) {
            days += 1;
        }
        date = date + Duration::days(1);
    }

    Ok(Decimal::from(days * WORKDAY_HOURS))
}
