//! Gregorian calendar math over tick counts.
//!
//! Tick 0 is midnight of 0001-01-01. Day counts use the classic
//! decomposition into 400, 100, 4 and 1 year blocks, which keeps every
//! operation in integer arithmetic.

use crate::{TimeError, TimeResult, MAX_TICKS, TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MINUTE, TICKS_PER_SECOND};

/// Cumulative days before each month in a regular year. Index 12 is the
/// length of the year.
const DAYS_TO_MONTH_365: [u16; 13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];
/// Cumulative days before each month in a leap year.
const DAYS_TO_MONTH_366: [u16; 13] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366];

const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_4_YEARS: i64 = DAYS_PER_YEAR * 4 + 1;
const DAYS_PER_100_YEARS: i64 = DAYS_PER_4_YEARS * 25 - 1;
const DAYS_PER_400_YEARS: i64 = DAYS_PER_100_YEARS * 4 + 1;

/// The smallest supported year.
pub const MIN_YEAR: i32 = 1;
/// The largest supported year.
pub const MAX_YEAR: i32 = 9999;

/// The part of a date to recover from a tick count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateElement {
    Year,
    Month,
    /// Zero-based day of the year.
    DayOfYear,
    /// One-based day of the month.
    Day,
}

/// Whether `year` is a Gregorian leap year.
#[inline]
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[inline]
const fn days_to_month_table(leap: bool) -> &'static [u16; 13] {
    if leap {
        &DAYS_TO_MONTH_366
    } else {
        &DAYS_TO_MONTH_365
    }
}

/// Returns the number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: u8) -> TimeResult<u8> {
    if !(1..=12).contains(&month) {
        return Err(TimeError::range().with_message("month is not within 1..=12."));
    }
    let table = days_to_month_table(is_leap_year(year));
    let month = usize::from(month);
    Ok((table[month] - table[month - 1]) as u8)
}

/// Returns the number of days in `year`.
#[inline]
#[must_use]
pub const fn days_in_year(year: i32) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Validates a calendar date and returns the ticks at its midnight.
pub fn date_to_ticks(year: i32, month: u8, day: u8) -> TimeResult<i64> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(TimeError::range().with_message("year is not within 1..=9999."));
    }
    let month_days = days_in_month(year, month)?;
    if !(1..=month_days).contains(&day) {
        return Err(TimeError::range().with_message("day is not valid for the month."));
    }

    let table = days_to_month_table(is_leap_year(year));
    let y = i64::from(year - 1);
    let days = y * DAYS_PER_YEAR + y / 4 - y / 100 + y / 400
        + i64::from(table[usize::from(month) - 1])
        + i64::from(day)
        - 1;
    Ok(days * TICKS_PER_DAY)
}

/// Validates a time of day and returns its ticks since midnight.
pub fn time_to_ticks(hour: u8, minute: u8, second: u8) -> TimeResult<i64> {
    if hour > 23 {
        return Err(TimeError::range().with_message("hour is not within 0..=23."));
    }
    if minute > 59 {
        return Err(TimeError::range().with_message("minute is not within 0..=59."));
    }
    if second > 59 {
        return Err(TimeError::range().with_message("second is not within 0..=59."));
    }
    Ok(i64::from(hour) * TICKS_PER_HOUR
        + i64::from(minute) * TICKS_PER_MINUTE
        + i64::from(second) * TICKS_PER_SECOND)
}

/// The result of splitting a day count into its calendar parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateParts {
    pub(crate) year: i32,
    pub(crate) month: u8,
    pub(crate) day: u8,
    pub(crate) day_of_year: u16,
}

/// Splits a valid tick count into year, month, day and day of year.
pub(crate) fn ticks_to_date_parts(ticks: i64) -> DateParts {
    debug_assert!((0..=MAX_TICKS).contains(&ticks));
    let mut n = ticks.div_euclid(TICKS_PER_DAY);

    let y400 = n / DAYS_PER_400_YEARS;
    n -= y400 * DAYS_PER_400_YEARS;

    // The last day of a 400 year block belongs to the 4th century.
    let mut y100 = n / DAYS_PER_100_YEARS;
    if y100 == 4 {
        y100 = 3;
    }
    n -= y100 * DAYS_PER_100_YEARS;

    let y4 = n / DAYS_PER_4_YEARS;
    n -= y4 * DAYS_PER_4_YEARS;

    // Likewise, the last day of a leap quadrennium belongs to its 4th year.
    let mut y1 = n / DAYS_PER_YEAR;
    if y1 == 4 {
        y1 = 3;
    }
    n -= y1 * DAYS_PER_YEAR;

    let year = (y400 * 400 + y100 * 100 + y4 * 4 + y1 + 1) as i32;
    let day_of_year = n as u16;

    // Only the 4th year of a quadrennium can be a leap year, and the 4th
    // year of a century block only when it closes a 400 year block.
    let leap = y1 == 3 && (y4 != 24 || y100 == 3);
    let table = days_to_month_table(leap);

    let mut month = usize::from(day_of_year >> 5) + 1;
    while day_of_year >= table[month] {
        month += 1;
    }
    let day = (day_of_year - table[month - 1] + 1) as u8;

    DateParts {
        year,
        month: month as u8,
        day,
        day_of_year,
    }
}

/// Recovers one calendar element from a tick count.
pub fn ticks_to_date_element(ticks: i64, element: DateElement) -> TimeResult<i32> {
    if !(0..=MAX_TICKS).contains(&ticks) {
        return Err(TimeError::range().with_message("ticks are not within a valid range."));
    }
    let parts = ticks_to_date_parts(ticks);
    Ok(match element {
        DateElement::Year => parts.year,
        DateElement::Month => i32::from(parts.month),
        DateElement::DayOfYear => i32::from(parts.day_of_year),
        DateElement::Day => i32::from(parts.day),
    })
}

/// Returns the ISO day of week, 1 = Monday through 7 = Sunday.
#[inline]
#[must_use]
pub fn day_of_week(ticks: i64) -> u8 {
    // 0001-01-01 is a Monday.
    (ticks.div_euclid(TICKS_PER_DAY).rem_euclid(7) + 1) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(ticks: i64) -> (i32, u8, u8) {
        let parts = ticks_to_date_parts(ticks);
        (parts.year, parts.month, parts.day)
    }

    #[test]
    fn leap_years() {
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(is_leap_year(4));
        assert!(!is_leap_year(100));
        assert!(is_leap_year(400));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(1900, 2).unwrap(), 28);
        assert_eq!(days_in_month(2024, 4).unwrap(), 30);
        assert_eq!(days_in_month(2024, 12).unwrap(), 31);
        assert!(days_in_month(2024, 0).unwrap_err().is_range_error());
        assert!(days_in_month(2024, 13).unwrap_err().is_range_error());
    }

    #[test]
    fn date_to_ticks_bounds() {
        assert_eq!(date_to_ticks(1, 1, 1).unwrap(), 0);
        assert_eq!(date_to_ticks(1, 1, 2).unwrap(), TICKS_PER_DAY);
        assert_eq!(
            date_to_ticks(9999, 12, 31).unwrap() + TICKS_PER_DAY - 1,
            MAX_TICKS
        );
        assert_eq!(
            date_to_ticks(1970, 1, 1).unwrap(),
            crate::UNIX_EPOCH_TICKS
        );

        assert!(date_to_ticks(0, 1, 1).unwrap_err().is_range_error());
        assert!(date_to_ticks(10000, 1, 1).unwrap_err().is_range_error());
        assert!(date_to_ticks(2023, 13, 1).unwrap_err().is_range_error());
        assert!(date_to_ticks(2023, 2, 29).unwrap_err().is_range_error());
        assert!(date_to_ticks(2023, 4, 0).unwrap_err().is_range_error());
        assert!(date_to_ticks(2024, 2, 29).is_ok());
    }

    #[test]
    fn time_to_ticks_bounds() {
        assert_eq!(time_to_ticks(0, 0, 0).unwrap(), 0);
        assert_eq!(
            time_to_ticks(23, 59, 59).unwrap(),
            TICKS_PER_DAY - TICKS_PER_SECOND
        );
        assert!(time_to_ticks(24, 0, 0).is_err());
        assert!(time_to_ticks(0, 60, 0).is_err());
        assert!(time_to_ticks(0, 0, 60).is_err());
    }

    #[test]
    fn block_boundaries() {
        for year in [1, 4, 100, 400, 401, 4800, 9999] {
            let start = date_to_ticks(year, 1, 1).unwrap();
            assert_eq!(ymd(start), (year, 1, 1), "start of {year}");

            let end = date_to_ticks(year, 12, 31).unwrap();
            assert_eq!(ymd(end), (year, 12, 31), "end of {year}");
            assert_eq!(
                ticks_to_date_element(end, DateElement::DayOfYear).unwrap(),
                i32::from(days_in_year(year)) - 1,
                "day of year at end of {year}"
            );

            // The last tick of the year stays in the year.
            let last_tick = end + TICKS_PER_DAY - 1;
            assert_eq!(ymd(last_tick), (year, 12, 31), "last tick of {year}");
        }
    }

    #[test]
    fn leap_days_at_block_boundaries() {
        for year in [4, 400, 4800, 2000, 2024] {
            let ticks = date_to_ticks(year, 2, 29).unwrap();
            assert_eq!(ymd(ticks), (year, 2, 29));
            assert_eq!(ymd(ticks + TICKS_PER_DAY), (year, 3, 1));
        }
        for year in [100, 1900, 2100] {
            let ticks = date_to_ticks(year, 2, 28).unwrap();
            assert_eq!(ymd(ticks + TICKS_PER_DAY), (year, 3, 1));
        }
    }

    #[test]
    fn every_day_of_selected_years() {
        for year in [1, 3, 4, 99, 100, 101, 399, 400, 401, 1900, 2000, 2023, 2024, 9999] {
            let mut ticks = date_to_ticks(year, 1, 1).unwrap();
            for month in 1..=12 {
                for day in 1..=days_in_month(year, month).unwrap() {
                    assert_eq!(ymd(ticks), (year, month, day));
                    ticks += TICKS_PER_DAY;
                }
            }
        }
    }

    #[test]
    fn element_rejects_invalid_ticks() {
        assert!(ticks_to_date_element(-1, DateElement::Year).is_err());
        assert!(ticks_to_date_element(MAX_TICKS + 1, DateElement::Year).is_err());
        assert_eq!(
            ticks_to_date_element(MAX_TICKS, DateElement::Year).unwrap(),
            9999
        );
    }

    #[test]
    fn weekdays() {
        assert_eq!(day_of_week(0), 1);
        // 1970-01-01 was a Thursday.
        assert_eq!(day_of_week(crate::UNIX_EPOCH_TICKS), 4);
        // 2024-03-10 was a Sunday.
        assert_eq!(day_of_week(date_to_ticks(2024, 3, 10).unwrap()), 7);
    }
}
