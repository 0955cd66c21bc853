//! An implementation of `Instant`.

use alloc::string::String;
use core::{
    cmp::Ordering,
    hash::{Hash, Hasher},
    str::FromStr,
};

use num_traits::Euclid;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    calendar::{self, DateParts, MAX_YEAR, MIN_YEAR},
    format::FormatContext,
    formattable::{FormattableDate, FormattableDateTime, FormattableTime},
    locale::{LocaleData, LocaleLookup},
    provider::TimeZoneProvider,
    Duration, TimeError, TimeResult, TimeZone, UtcOffset, MAX_TICKS, TICKS_PER_DAY,
    TICKS_PER_HOUR, TICKS_PER_MINUTE, TICKS_PER_SECOND, UNIX_EPOCH_TICKS,
};

/// A point in time, stored as a wall-clock tick count in its own time zone.
///
/// Equality, ordering and hashing only look at the tick count. Two
/// `Instant`s with equal readings in different zones compare as equal even
/// though they name different moments; use
/// [`Instant::compare_absolute_with_provider`]
/// to compare moments.
///
/// ```rust
/// use ticktime::{Instant, TimeZone};
///
/// let start = Instant::try_new_utc(2021, 1, 31, 9, 0, 0).unwrap();
/// let end = start.add_months(1).unwrap();
/// assert_eq!(end.to_date_string(), "2021-02-28");
///
/// let elapsed = end.subtract(&start);
/// assert_eq!(elapsed.days(), 28);
/// assert!(start.add_interval(&elapsed).unwrap().equals(&end));
/// ```
#[derive(Debug, Clone)]
pub struct Instant {
    ticks: i64,
    timezone: TimeZone,
}

// ==== Private API ====

impl Instant {
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(ticks: i64, timezone: TimeZone) -> Self {
        Self { ticks, timezone }
    }

    #[inline]
    fn date_parts(&self) -> DateParts {
        calendar::ticks_to_date_parts(self.ticks)
    }

    /// Creates a new `Instant` in this zone, range checking `ticks`.
    fn with_ticks(&self, ticks: i64) -> TimeResult<Self> {
        Self::checked(ticks, self.timezone.clone())
    }

    /// Range checks `ticks`. `timezone` must already have been checked.
    pub(crate) fn checked(ticks: i64, timezone: TimeZone) -> TimeResult<Self> {
        if !(0..=MAX_TICKS).contains(&ticks) {
            return Err(TimeError::range().with_message("ticks are not within a valid range."));
        }
        Ok(Self::new_unchecked(ticks, timezone))
    }

    /// Builds an `Instant` from calendar components. `timezone` must already
    /// have been checked.
    pub(crate) fn from_components(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        timezone: TimeZone,
    ) -> TimeResult<Self> {
        let date = calendar::date_to_ticks(year, month, day)?;
        let time = calendar::time_to_ticks(hour, minute, second)?;
        Ok(Self::new_unchecked(date + time, timezone))
    }

    /// Scales `value` by `unit` and adds it.
    fn add_scaled(&self, value: i64, unit: i64) -> TimeResult<Self> {
        value
            .checked_mul(unit)
            .and_then(|delta| self.ticks.checked_add(delta))
            .ok_or_else(out_of_range)
            .and_then(|ticks| self.with_ticks(ticks))
    }

    /// Returns the UTC tick count of this `Instant`.
    fn utc_ticks(&self, provider: &(impl TimeZoneProvider + ?Sized)) -> TimeResult<i64> {
        let offset = self.timezone.offset_for_local_ticks(self.ticks, provider)?;
        Ok(self.ticks - offset.as_ticks())
    }
}

// ==== Public API ====

impl Instant {
    /// Creates a new `Instant` from calendar components.
    ///
    /// Fails with an `ErrorKind::TimeZone` error if `timezone` is an offset
    /// beyond `±23:59` or a name `provider` does not know.
    #[allow(clippy::too_many_arguments)]
    pub fn try_new_with_provider(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        timezone: TimeZone,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> TimeResult<Self> {
        timezone.check_with_provider(provider)?;
        Self::from_components(year, month, day, hour, minute, second, timezone)
    }

    /// Creates a new UTC `Instant` from calendar components.
    pub fn try_new_utc(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> TimeResult<Self> {
        Self::from_components(year, month, day, hour, minute, second, TimeZone::Utc)
    }

    /// Creates a new `Instant` from a wall-clock tick count.
    ///
    /// `timezone` is checked as in [`Instant::try_new_with_provider`].
    pub fn from_ticks_with_provider(
        ticks: i64,
        timezone: TimeZone,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> TimeResult<Self> {
        timezone.check_with_provider(provider)?;
        Self::checked(ticks, timezone)
    }

    /// Creates a new UTC `Instant` from a tick count.
    pub fn from_utc_ticks(ticks: i64) -> TimeResult<Self> {
        Self::checked(ticks, TimeZone::Utc)
    }

    /// Returns the wall-clock tick count.
    #[inline]
    #[must_use]
    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    #[inline]
    #[must_use]
    pub const fn timezone(&self) -> &TimeZone {
        &self.timezone
    }

    #[inline]
    #[must_use]
    pub fn year(&self) -> i32 {
        self.date_parts().year
    }

    #[inline]
    #[must_use]
    pub fn month(&self) -> u8 {
        self.date_parts().month
    }

    #[inline]
    #[must_use]
    pub fn day(&self) -> u8 {
        self.date_parts().day
    }

    #[inline]
    #[must_use]
    pub const fn hour(&self) -> u8 {
        (self.ticks.rem_euclid(TICKS_PER_DAY) / TICKS_PER_HOUR) as u8
    }

    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        (self.ticks.rem_euclid(TICKS_PER_HOUR) / TICKS_PER_MINUTE) as u8
    }

    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        (self.ticks.rem_euclid(TICKS_PER_MINUTE) / TICKS_PER_SECOND) as u8
    }

    /// Returns the day of the week, 1 = Monday through 7 = Sunday.
    #[inline]
    #[must_use]
    pub fn day_of_week(&self) -> u8 {
        calendar::day_of_week(self.ticks)
    }

    /// Returns the zero based day of the year.
    #[inline]
    #[must_use]
    pub fn day_of_year(&self) -> u16 {
        self.date_parts().day_of_year
    }

    /// Returns the time elapsed since midnight.
    #[inline]
    #[must_use]
    pub const fn time_of_day(&self) -> Duration {
        Duration::new_unchecked(self.ticks.rem_euclid(TICKS_PER_DAY))
    }

    /// Returns midnight of the same day.
    #[inline]
    #[must_use]
    pub fn date(&self) -> Self {
        Self::new_unchecked(
            self.ticks - self.ticks.rem_euclid(TICKS_PER_DAY),
            self.timezone.clone(),
        )
    }

    /// Adds `years` calendar years, clamping the day to the end of the month.
    pub fn add_years(&self, years: i64) -> TimeResult<Self> {
        years
            .checked_mul(12)
            .ok_or_else(out_of_range)
            .and_then(|months| self.add_months(months))
    }

    /// Adds `months` calendar months.
    ///
    /// A day past the end of the target month is clamped to its last day, so
    /// January 31st plus one month is February 28th, or 29th in a leap year.
    pub fn add_months(&self, months: i64) -> TimeResult<Self> {
        let parts = self.date_parts();
        let total = i64::from(parts.year) * 12 + i64::from(parts.month) - 1;
        let total = total.checked_add(months).ok_or_else(out_of_range)?;
        let year = Euclid::div_euclid(&total, &12);
        let month = Euclid::rem_euclid(&total, &12) as u8 + 1;
        if !(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR)).contains(&year) {
            return Err(out_of_range());
        }
        let year = year as i32;
        let day = parts.day.min(calendar::days_in_month(year, month)?);
        let date = calendar::date_to_ticks(year, month, day)?;
        self.with_ticks(date + self.ticks.rem_euclid(TICKS_PER_DAY))
    }

    pub fn add_weeks(&self, weeks: i64) -> TimeResult<Self> {
        self.add_scaled(weeks, 7 * TICKS_PER_DAY)
    }

    pub fn add_days(&self, days: i64) -> TimeResult<Self> {
        self.add_scaled(days, TICKS_PER_DAY)
    }

    pub fn add_hours(&self, hours: i64) -> TimeResult<Self> {
        self.add_scaled(hours, TICKS_PER_HOUR)
    }

    pub fn add_minutes(&self, minutes: i64) -> TimeResult<Self> {
        self.add_scaled(minutes, TICKS_PER_MINUTE)
    }

    pub fn add_seconds(&self, seconds: i64) -> TimeResult<Self> {
        self.add_scaled(seconds, TICKS_PER_SECOND)
    }

    /// Adds a `Duration`.
    pub fn add_interval(&self, duration: &Duration) -> TimeResult<Self> {
        self.add_scaled(duration.ticks(), 1)
    }

    /// Returns the `Duration` from `other` to `self`.
    ///
    /// Both tick counts are read as is, whatever their time zones.
    #[inline]
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Duration {
        Duration::new_unchecked(self.ticks - other.ticks)
    }

    /// Compares the wall-clock readings of two `Instant`s.
    #[inline]
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.ticks.cmp(&other.ticks)
    }

    #[inline]
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self.ticks == other.ticks
    }

    /// Compares the moments two `Instant`s name, after moving both to UTC.
    pub fn compare_absolute_with_provider(
        &self,
        other: &Self,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> TimeResult<Ordering> {
        Ok(self.utc_ticks(provider)?.cmp(&other.utc_ticks(provider)?))
    }

    /// Returns the UTC offset in effect at this `Instant`.
    pub fn utc_offset_with_provider(
        &self,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> TimeResult<UtcOffset> {
        self.timezone.offset_for_local_ticks(self.ticks, provider)
    }

    /// Returns the same moment expressed in `timezone`.
    ///
    /// The tick count is shifted by the difference between the two zones'
    /// offsets, so the absolute moment is preserved.
    pub fn set_timezone_with_provider(
        &self,
        timezone: TimeZone,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> TimeResult<Self> {
        timezone.check_with_provider(provider)?;
        let utc = self.utc_ticks(provider)?;
        let offset = timezone.offset_for_utc_ticks(utc, provider)?;
        Self::checked(utc + offset.as_ticks(), timezone)
    }

    /// Returns this moment expressed in UTC.
    pub fn to_utc_with_provider(
        &self,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> TimeResult<Self> {
        self.set_timezone_with_provider(TimeZone::Utc, provider)
    }

    /// Returns this wall-clock reading labelled with `timezone`.
    ///
    /// The tick count is kept, so unless both zones share an offset the
    /// result names a different moment than `self`. Use
    /// [`Instant::set_timezone_with_provider`] to keep the moment.
    pub fn assign_timezone_with_provider(
        &self,
        timezone: TimeZone,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> TimeResult<Self> {
        timezone.check_with_provider(provider)?;
        Ok(Self::new_unchecked(self.ticks, timezone))
    }

    /// Returns the Unix epoch in seconds of this `Instant`.
    pub fn epoch_seconds_with_provider(
        &self,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> TimeResult<i64> {
        Ok((self.utc_ticks(provider)? - UNIX_EPOCH_TICKS).div_euclid(TICKS_PER_SECOND))
    }

    /// Writes this `Instant` with `pattern`.
    pub fn format(
        &self,
        pattern: &str,
        context: &mut FormatContext,
        locale: &impl LocaleLookup,
    ) -> TimeResult<String> {
        context.format(self, pattern, locale)
    }

    /// Returns the canonical `YYYY-MM-DD` form.
    #[must_use]
    pub fn to_date_string(&self) -> String {
        self.formattable_date().write_to_string().into_owned()
    }

    /// Returns the canonical `HH:MM:SS` form.
    #[must_use]
    pub fn to_time_string(&self) -> String {
        self.formattable_time().write_to_string().into_owned()
    }

    fn formattable_date(&self) -> FormattableDate {
        let parts = self.date_parts();
        FormattableDate(parts.year, parts.month, parts.day)
    }

    fn formattable_time(&self) -> FormattableTime {
        FormattableTime {
            hour: self.hour(),
            minute: self.minute(),
            second: self.second(),
        }
    }
}

// ==== Compiled data and system API ====

#[cfg(feature = "compiled_data")]
impl Instant {
    /// Creates a new `Instant` from calendar components, checking named
    /// zones against the compiled tzdb.
    pub fn try_new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        timezone: TimeZone,
    ) -> TimeResult<Self> {
        crate::compiled::with_provider(|provider| {
            Self::try_new_with_provider(year, month, day, hour, minute, second, timezone, provider)
        })
    }

    pub fn from_ticks(ticks: i64, timezone: TimeZone) -> TimeResult<Self> {
        crate::compiled::with_provider(|provider| {
            Self::from_ticks_with_provider(ticks, timezone, provider)
        })
    }

    /// Relabels this wall-clock reading, see
    /// [`Instant::assign_timezone_with_provider`].
    pub fn assign_timezone(&self, timezone: TimeZone) -> TimeResult<Self> {
        crate::compiled::with_provider(|provider| {
            self.assign_timezone_with_provider(timezone, provider)
        })
    }

    /// Returns the same moment expressed in `timezone`, using the compiled
    /// tzdb for named zones.
    pub fn set_timezone(&self, timezone: TimeZone) -> TimeResult<Self> {
        crate::compiled::with_provider(|provider| {
            self.set_timezone_with_provider(timezone, provider)
        })
    }

    pub fn utc_offset(&self) -> TimeResult<UtcOffset> {
        crate::compiled::with_provider(|provider| self.utc_offset_with_provider(provider))
    }

    pub fn to_utc(&self) -> TimeResult<Self> {
        crate::compiled::with_provider(|provider| self.to_utc_with_provider(provider))
    }

    pub fn compare_absolute(&self, other: &Self) -> TimeResult<Ordering> {
        crate::compiled::with_provider(|provider| {
            self.compare_absolute_with_provider(other, provider)
        })
    }
}

#[cfg(feature = "sys")]
impl Instant {
    /// Returns the current time in `timezone`, or in the system time zone.
    pub fn now(timezone: Option<TimeZone>) -> TimeResult<Self> {
        crate::Now::instant(timezone)
    }

    /// Parses `text` with English names, filling missing fields from the
    /// current time.
    ///
    /// `format` defaults to `%Y-%m-%d %H:%M:%S`, which also accepts a plain
    /// `YYYY-MM-DD` date at midnight.
    pub fn parse(text: &str, format: Option<&str>, timezone: Option<TimeZone>) -> TimeResult<Self> {
        let reference = Self::now(timezone)?;
        FormatContext::new().parse(text, format, &LocaleData::english(), &reference)
    }
}

// ==== Trait impls ====

impl PartialEq for Instant {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Instant {}

impl PartialOrd for Instant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Instant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Hash for Instant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ticks.hash(state);
    }
}

impl Writeable for Instant {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        FormattableDateTime {
            date: self.formattable_date(),
            time: self.formattable_time(),
        }
        .write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::exact(19)
    }
}

impl_display_with_writeable!(Instant);

impl FromStr for Instant {
    type Err = TimeError;

    /// Parses the canonical `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD` forms as UTC.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Every field is present in the canonical forms, so the reference is
        // never consulted.
        let reference = Self::new_unchecked(UNIX_EPOCH_TICKS, TimeZone::Utc);
        FormatContext::new().parse(s, None, &LocaleData::english(), &reference)
    }
}

#[inline]
fn out_of_range() -> TimeError {
    TimeError::range().with_message("instant is out of range.")
}
