use crate::error::{CalendarError, Result};
use chrono::{Datelike, Duration, NaiveDate};

/// Century-correction constants (M, N) for the Gauss computus.
/// The published table ends at 2599; later years are unsupported.
fn century_constants(year: i32) -> Option<(i32, i32)> {
    Some(match year {
        1583..=1699 => (22, 2),
        1700..=1799 => (23, 3),
        1800..=1899 => (23, 4),
        1900..=2099 => (24, 5),
        2100..=2199 => (24, 6),
        2200..=2299 => (25, 0),
        2300..=2399 => (26, 1),
        2400..=2499 => (25, 1),
        2500..=2599 => (26, 2),
        _ => return None,
    })
}

/// Computes the Gregorian date of Easter Sunday via Gauss's algorithm.
///
/// Valid for 1583-2599 inclusive; outside that span the century table
/// has no entry and the call fails with
/// [`CalendarError::UnsupportedYear`].
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use dtime_calendar::easter::easter_sunday;
///
/// let easter = easter_sunday(2024).unwrap();
/// assert_eq!(easter, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
/// ```
pub fn easter_sunday(year: i32) -> Result<NaiveDate> {
    let (m, n) = century_constants(year).ok_or(CalendarError::UnsupportedYear { year })?;

    let a = year % 19;
    let b = year % 4;
    let c = year % 7;
    let d = (19 * a + m) % 30;
    let e = (2 * b + 4 * c + 6 * d + n) % 7;

    let march_22 =
        NaiveDate::from_ymd_opt(year, 3, 22).ok_or(CalendarError::UnsupportedYear { year })?;
    let raw = march_22 + Duration::days((d + e) as i64);

    // Two historical exceptions: a raw result of April 26 always shifts
    // back a week, and April 25 shifts back when d=28, e=6 and the
    // golden-number remainder exceeds 10.
    let date = if raw.month() == 4 && raw.day() == 26 {
        raw - Duration::days(7)
    } else if raw.month() == 4 && raw.day() == 25 && d == 28 && e == 6 && a > 10 {
        raw - Duration::days(7)
    } else {
        raw
    };

    Ok(date)
}
