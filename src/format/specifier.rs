//! The format specifier table.

use core::ops::RangeInclusive;

use crate::Instant;

/// A value read from an `Instant` for a specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    Year,
    /// The year modulo 100.
    TwoDigitYear,
    /// The year divided by 100.
    Century,
    Month,
    Day,
    /// The one based day of the year.
    DayOfYear,
    Hour,
    /// The hour on a 12-hour clock, `1..=12`.
    Hour12,
    Minute,
    Second,
    /// 1 = Monday through 7 = Sunday.
    Weekday,
    /// 0 = Sunday through 6 = Saturday.
    WeekdayFromSunday,
    /// 0 = AM, 1 = PM.
    Meridiem,
}

impl Accessor {
    pub(crate) const COUNT: usize = 13;

    /// Computes this value for `instant`.
    pub(crate) fn value(self, instant: &Instant) -> i32 {
        match self {
            Self::Year => instant.year(),
            Self::TwoDigitYear => instant.year() % 100,
            Self::Century => instant.year() / 100,
            Self::Month => i32::from(instant.month()),
            Self::Day => i32::from(instant.day()),
            Self::DayOfYear => i32::from(instant.day_of_year()) + 1,
            Self::Hour => i32::from(instant.hour()),
            Self::Hour12 => match instant.hour() % 12 {
                0 => 12,
                hour => i32::from(hour),
            },
            Self::Minute => i32::from(instant.minute()),
            Self::Second => i32::from(instant.second()),
            Self::Weekday => i32::from(instant.day_of_week()),
            Self::WeekdayFromSunday => i32::from(instant.day_of_week() % 7),
            Self::Meridiem => i32::from(instant.hour() >= 12),
        }
    }
}

/// The field a specifier fills when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Year,
    TwoDigitYear,
    Month,
    Day,
    Hour,
    Hour12,
    Minute,
    Second,
    Meridiem,
    Weekday,
    /// Checked when parsing, then discarded.
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecifierKind {
    /// A number, zero padded to `width` digits when set.
    Numeric {
        accessor: Accessor,
        bounds: RangeInclusive<i32>,
        width: Option<usize>,
        role: FieldRole,
    },
    /// A localized name, stored in the `"date"` container as
    /// `{domain}{index}`.
    TextDomain {
        accessor: Accessor,
        domain: &'static str,
        bounds: RangeInclusive<i32>,
        role: FieldRole,
    },
    /// A fixed sub-pattern.
    ComplexExpansion(&'static str),
    /// A sub-pattern read from the `"date"` container under this key.
    LocaleLinkedPattern(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    pub symbol: char,
    pub kind: SpecifierKind,
}

impl Specifier {
    /// Whether this specifier is replaced while unwrapping a pattern.
    #[inline]
    #[must_use]
    pub fn is_expansion(&self) -> bool {
        matches!(
            self.kind,
            SpecifierKind::ComplexExpansion(_) | SpecifierKind::LocaleLinkedPattern(_)
        )
    }
}

const fn numeric(
    symbol: char,
    accessor: Accessor,
    bounds: RangeInclusive<i32>,
    width: Option<usize>,
    role: FieldRole,
) -> Specifier {
    Specifier {
        symbol,
        kind: SpecifierKind::Numeric {
            accessor,
            bounds,
            width,
            role,
        },
    }
}

const fn text(
    symbol: char,
    accessor: Accessor,
    domain: &'static str,
    bounds: RangeInclusive<i32>,
    role: FieldRole,
) -> Specifier {
    Specifier {
        symbol,
        kind: SpecifierKind::TextDomain {
            accessor,
            domain,
            bounds,
            role,
        },
    }
}

const fn expansion(symbol: char, pattern: &'static str) -> Specifier {
    Specifier {
        symbol,
        kind: SpecifierKind::ComplexExpansion(pattern),
    }
}

const fn locale_linked(symbol: char, key: &'static str) -> Specifier {
    Specifier {
        symbol,
        kind: SpecifierKind::LocaleLinkedPattern(key),
    }
}

/// Every supported specifier.
pub static SPECIFIERS: [Specifier; 29] = [
    numeric('Y', Accessor::Year, 1..=9999, Some(4), FieldRole::Year),
    numeric('y', Accessor::TwoDigitYear, 0..=99, Some(2), FieldRole::TwoDigitYear),
    numeric('C', Accessor::Century, 0..=99, Some(2), FieldRole::None),
    numeric('m', Accessor::Month, 1..=12, Some(2), FieldRole::Month),
    numeric('d', Accessor::Day, 1..=31, Some(2), FieldRole::Day),
    numeric('e', Accessor::Day, 1..=31, None, FieldRole::Day),
    numeric('j', Accessor::DayOfYear, 1..=366, Some(3), FieldRole::None),
    numeric('H', Accessor::Hour, 0..=23, Some(2), FieldRole::Hour),
    numeric('I', Accessor::Hour12, 1..=12, Some(2), FieldRole::Hour12),
    numeric('M', Accessor::Minute, 0..=59, Some(2), FieldRole::Minute),
    numeric('S', Accessor::Second, 0..=59, Some(2), FieldRole::Second),
    numeric('u', Accessor::Weekday, 1..=7, Some(1), FieldRole::None),
    numeric('w', Accessor::WeekdayFromSunday, 0..=6, Some(1), FieldRole::None),
    text('a', Accessor::Weekday, "weekday_short_", 1..=7, FieldRole::Weekday),
    text('A', Accessor::Weekday, "weekday_", 1..=7, FieldRole::Weekday),
    text('b', Accessor::Month, "month_short_", 1..=12, FieldRole::Month),
    text('B', Accessor::Month, "month_", 1..=12, FieldRole::Month),
    text('p', Accessor::Meridiem, "ampm_", 0..=1, FieldRole::Meridiem),
    expansion('c', "%x %X"),
    expansion('D', "%m/%d/%y"),
    expansion('F', "%Y-%m-%d"),
    expansion('T', "%H:%M:%S"),
    expansion('R', "%H:%M"),
    expansion('r', "%I:%M:%S %p"),
    expansion('n', "\n"),
    expansion('t', "\t"),
    locale_linked('x', "short_date_format"),
    locale_linked('E', "long_date_format"),
    locale_linked('X', "time_format"),
];

/// Returns the specifier for `symbol`, if there is one.
#[must_use]
pub fn lookup(symbol: char) -> Option<&'static Specifier> {
    SPECIFIERS.iter().find(|specifier| specifier.symbol == symbol)
}

#[cfg(test)]
mod tests {
    use super::{lookup, Accessor, SpecifierKind, SPECIFIERS};
    use crate::Instant;

    #[test]
    fn symbols_are_unique() {
        for (i, specifier) in SPECIFIERS.iter().enumerate() {
            assert!(
                SPECIFIERS[i + 1..].iter().all(|s| s.symbol != specifier.symbol),
                "duplicate %{}",
                specifier.symbol
            );
        }
        assert!(lookup('E').is_some());
        assert!(lookup('q').is_none());
        assert!(lookup('%').is_none());
    }

    #[test]
    fn expansion_kinds() {
        assert_eq!(
            lookup('F').map(|s| &s.kind),
            Some(&SpecifierKind::ComplexExpansion("%Y-%m-%d"))
        );
        assert!(lookup('x').is_some_and(|s| s.is_expansion()));
        assert!(!lookup('Y').is_some_and(|s| s.is_expansion()));
    }

    #[test]
    fn accessor_values() {
        // 2024-03-10 was a Sunday.
        let instant = Instant::try_new_utc(2024, 3, 10, 0, 5, 9).unwrap();
        assert_eq!(Accessor::Year.value(&instant), 2024);
        assert_eq!(Accessor::TwoDigitYear.value(&instant), 24);
        assert_eq!(Accessor::Century.value(&instant), 20);
        assert_eq!(Accessor::DayOfYear.value(&instant), 70);
        assert_eq!(Accessor::Hour12.value(&instant), 12);
        assert_eq!(Accessor::Meridiem.value(&instant), 0);
        assert_eq!(Accessor::Weekday.value(&instant), 7);
        assert_eq!(Accessor::WeekdayFromSunday.value(&instant), 0);

        let afternoon = instant.add_hours(13).unwrap();
        assert_eq!(Accessor::Hour12.value(&afternoon), 1);
        assert_eq!(Accessor::Meridiem.value(&afternoon), 1);
    }
}
