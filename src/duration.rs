//! This module implements `Duration`.

use alloc::{format, string::String, vec::Vec};
use core::{cmp::Ordering, ops::Neg};

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    formattable::{FormattableDuration, FormattableTime},
    locale::{LocaleLookup, INTERVAL_CONTAINER},
    TimeError, TimeResult, MAX_DURATION_TICKS, TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MINUTE,
    TICKS_PER_SECOND,
};

/// A signed span of elapsed time, counted in 100 nanosecond ticks.
///
/// A `Duration` carries no time zone. Values built by the checked
/// constructors and arithmetic stay within ±[`MAX_DURATION_TICKS`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    ticks: i64,
}

// ==== Private API ====

impl Duration {
    /// Creates a `Duration` without checking the bound.
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(ticks: i64) -> Self {
        Self { ticks }
    }

    fn from_scaled(value: i64, scale: i64) -> TimeResult<Self> {
        value
            .checked_mul(scale)
            .ok_or_else(out_of_range)
            .and_then(Self::from_ticks)
    }
}

// ==== Public API ====

impl Duration {
    /// The zero length `Duration`.
    pub const ZERO: Self = Self::new_unchecked(0);

    /// Creates a `Duration` from a day count and a time of day.
    ///
    /// `hours` must be within `0..24`, `minutes` and `seconds` within `0..60`.
    /// A negative `days` moves the whole value backwards, so
    /// `from_days_and_time(-1, 6, 0, 0)` is minus eighteen hours.
    pub fn from_days_and_time(days: i64, hours: i64, minutes: i64, seconds: i64) -> TimeResult<Self> {
        if !(0..24).contains(&hours) {
            return Err(TimeError::range().with_message("hours are not within 0..24."));
        }
        if !(0..60).contains(&minutes) {
            return Err(TimeError::range().with_message("minutes are not within 0..60."));
        }
        if !(0..60).contains(&seconds) {
            return Err(TimeError::range().with_message("seconds are not within 0..60."));
        }
        let time = hours * TICKS_PER_HOUR + minutes * TICKS_PER_MINUTE + seconds * TICKS_PER_SECOND;
        days.checked_mul(TICKS_PER_DAY)
            .and_then(|ticks| ticks.checked_add(time))
            .ok_or_else(out_of_range)
            .and_then(Self::from_ticks)
    }

    /// Creates a `Duration` from a tick count.
    pub fn from_ticks(ticks: i64) -> TimeResult<Self> {
        if !(-MAX_DURATION_TICKS..=MAX_DURATION_TICKS).contains(&ticks) {
            return Err(out_of_range());
        }
        Ok(Self::new_unchecked(ticks))
    }

    pub fn from_days(days: i64) -> TimeResult<Self> {
        Self::from_scaled(days, TICKS_PER_DAY)
    }

    pub fn from_hours(hours: i64) -> TimeResult<Self> {
        Self::from_scaled(hours, TICKS_PER_HOUR)
    }

    pub fn from_minutes(minutes: i64) -> TimeResult<Self> {
        Self::from_scaled(minutes, TICKS_PER_MINUTE)
    }

    pub fn from_seconds(seconds: i64) -> TimeResult<Self> {
        Self::from_scaled(seconds, TICKS_PER_SECOND)
    }

    /// Returns the signed tick count.
    #[inline]
    #[must_use]
    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    /// Returns whole days, truncated toward zero.
    #[inline]
    #[must_use]
    pub const fn days(&self) -> i64 {
        self.ticks / TICKS_PER_DAY
    }

    /// Returns the hours component, `-23..=23` with the sign of the value.
    #[inline]
    #[must_use]
    pub const fn hours(&self) -> i64 {
        (self.ticks / TICKS_PER_HOUR) % 24
    }

    /// Returns the minutes component, `-59..=59` with the sign of the value.
    #[inline]
    #[must_use]
    pub const fn minutes(&self) -> i64 {
        (self.ticks / TICKS_PER_MINUTE) % 60
    }

    /// Returns the seconds component, `-59..=59` with the sign of the value.
    #[inline]
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        (self.ticks / TICKS_PER_SECOND) % 60
    }

    /// Returns the ticks below one second, with the sign of the value.
    #[inline]
    #[must_use]
    pub const fn subsecond_ticks(&self) -> i64 {
        self.ticks % TICKS_PER_SECOND
    }

    #[must_use]
    pub fn days_total(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_DAY as f64
    }

    #[must_use]
    pub fn hours_total(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_HOUR as f64
    }

    #[must_use]
    pub fn minutes_total(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_MINUTE as f64
    }

    #[must_use]
    pub fn seconds_total(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_SECOND as f64
    }

    #[inline]
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.ticks < 0
    }

    #[inline]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.ticks == 0
    }

    /// Adds two `Duration`s.
    pub fn add(&self, other: &Self) -> TimeResult<Self> {
        self.ticks
            .checked_add(other.ticks)
            .ok_or_else(out_of_range)
            .and_then(Self::from_ticks)
    }

    /// Subtracts `other` from this `Duration`.
    pub fn subtract(&self, other: &Self) -> TimeResult<Self> {
        self.ticks
            .checked_sub(other.ticks)
            .ok_or_else(out_of_range)
            .and_then(Self::from_ticks)
    }

    /// Returns this `Duration` with the opposite sign.
    #[inline]
    #[must_use]
    pub const fn negate(&self) -> Self {
        Self::new_unchecked(self.ticks.saturating_neg())
    }

    /// Returns the absolute value of this `Duration`.
    #[inline]
    #[must_use]
    pub const fn length(&self) -> Self {
        Self::new_unchecked(self.ticks.saturating_abs())
    }

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

    /// Describes the magnitude of this `Duration` with the phrases of `locale`.
    ///
    /// Under a minute this is the locale's `now` phrase. Otherwise the two
    /// largest units out of days, hours and minutes are used, and zero
    /// parts are left out: `"2 days 3 hrs"`, `"5 hrs"`, `"1 hr 1 min"`.
    pub fn interval_as_string(&self, locale: &impl LocaleLookup) -> TimeResult<String> {
        let magnitude = self.ticks.unsigned_abs();
        if magnitude < TICKS_PER_MINUTE as u64 {
            return locale
                .get_string(INTERVAL_CONTAINER, "now")
                .map(|phrase| phrase.into_owned());
        }

        let days = magnitude / TICKS_PER_DAY as u64;
        let hours = magnitude / TICKS_PER_HOUR as u64 % 24;
        let minutes = magnitude / TICKS_PER_MINUTE as u64 % 60;
        let parts = if days > 0 {
            [("day", days), ("hour", hours)]
        } else if hours > 0 {
            [("hour", hours), ("minute", minutes)]
        } else {
            [("minute", minutes), ("minute", 0)]
        };

        let rule = locale.plural_rule()?;
        let mut phrases = Vec::with_capacity(2);
        for (unit, count) in parts.into_iter().filter(|(_, count)| *count > 0) {
            let key = format!("{unit}_{}", rule.category(count).as_str());
            let template = locale.get_string(INTERVAL_CONTAINER, &key)?;
            phrases.push(template.replace("{0}", &format!("{count}")));
        }
        Ok(phrases.join(" "))
    }
}

impl Writeable for Duration {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        let magnitude = self.ticks.unsigned_abs();
        let seconds = magnitude / TICKS_PER_SECOND as u64;
        FormattableDuration {
            negative: self.ticks < 0,
            days: seconds / 86_400,
            time: FormattableTime {
                hour: (seconds / 3600 % 24) as u8,
                minute: (seconds / 60 % 60) as u8,
                second: (seconds % 60) as u8,
            },
            fraction: (magnitude % TICKS_PER_SECOND as u64) as u32,
        }
        .write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::between(8, 30)
    }
}

impl_display_with_writeable!(Duration);

impl Neg for Duration {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

#[inline]
fn out_of_range() -> TimeError {
    TimeError::range().with_message("duration is out of range.")
}
