//! Unix epoch based Gregorian helpers used while resolving POSIX rules.

pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

pub(crate) fn is_leap(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Days from 1970-01-01 to January 1st of `year`.
pub(crate) fn epoch_days_for_year(year: i32) -> i32 {
    365 * (year - 1970) + (year - 1969).div_euclid(4) - (year - 1901).div_euclid(100)
        + (year - 1601).div_euclid(400)
}

/// Days in the year before the zero-indexed `month`.
pub(crate) fn month_to_day(month: u8, is_leap: bool) -> u16 {
    const DAYS: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
    let leap_day = u16::from(is_leap && month >= 2);
    DAYS[usize::from(month % 12)] + leap_day
}

pub(crate) fn iso_days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => 28 + u8::from(is_leap(year)),
    }
}

/// Day of week with 0 = Sunday.
pub(crate) fn epoch_seconds_to_day_of_week(seconds: i64) -> u8 {
    // 1970-01-01 was a Thursday.
    (seconds.div_euclid(SECONDS_PER_DAY) + 4).rem_euclid(7) as u8
}

pub(crate) fn epoch_seconds_to_year(seconds: i64) -> i32 {
    let days = seconds.div_euclid(SECONDS_PER_DAY);
    // Overestimate, then step back to the containing year.
    let mut year = (days.div_euclid(365) + 1971) as i32;
    while i64::from(epoch_days_for_year(year)) > days {
        year -= 1;
    }
    year
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_starts() {
        assert_eq!(epoch_days_for_year(1970), 0);
        assert_eq!(epoch_days_for_year(1971), 365);
        assert_eq!(epoch_days_for_year(2000), 10_957);
        assert_eq!(epoch_days_for_year(1969), -365);
    }

    #[test]
    fn year_from_seconds() {
        assert_eq!(epoch_seconds_to_year(0), 1970);
        assert_eq!(epoch_seconds_to_year(-1), 1969);
        // 2024-12-31T23:59:59Z
        assert_eq!(epoch_seconds_to_year(1_735_689_599), 2024);
        assert_eq!(epoch_seconds_to_year(1_735_689_600), 2025);
    }

    #[test]
    fn weekdays() {
        assert_eq!(epoch_seconds_to_day_of_week(0), 4);
        // 2024-03-10 was a Sunday.
        assert_eq!(epoch_seconds_to_day_of_week(1_710_028_800), 0);
    }
}
