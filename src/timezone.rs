//! This module implements `TimeZone` and `UtcOffset`.

use alloc::string::{String, ToString};
use core::{fmt, iter::Peekable, str::Chars};

use writeable::Writeable;

use crate::{
    formattable::FormattableOffset,
    provider::TimeZoneProvider,
    TimeError, TimeResult, TICKS_PER_SECOND, UNIX_EPOCH_TICKS,
};

/// A resolved UTC offset in seconds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcOffset(i64);

impl UtcOffset {
    /// Creates an offset from whole seconds east of UTC.
    #[inline]
    #[must_use]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Creates an offset from whole minutes east of UTC.
    #[inline]
    #[must_use]
    pub const fn from_minutes(minutes: i16) -> Self {
        Self(minutes as i64 * 60)
    }

    #[inline]
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn as_ticks(&self) -> i64 {
        self.0 * TICKS_PER_SECOND
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        FormattableOffset::from_minutes(self.0.div_euclid(60)).write_to(f)
    }
}

/// The largest fixed offset, in minutes, either side of UTC.
pub const MAX_OFFSET_MINUTES: i16 = 23 * 60 + 59;

/// The time zone an `Instant` is expressed in.
///
/// The variants can be built directly; constructors taking a `TimeZone`
/// run [`TimeZone::check_with_provider`] on it.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeZone {
    /// Coordinated Universal Time.
    #[default]
    Utc,
    /// A fixed offset in minutes east of UTC.
    OffsetMinutes(i16),
    /// A named zone, resolved through a `TimeZoneProvider`.
    IanaIdentifier(String),
}

impl TimeZone {
    /// Parses a `TimeZone` from a provided `&str`.
    ///
    /// Accepts `UTC`, `Z`, `±HH`, `±HHMM` and `±HH:MM` offsets, and any
    /// identifier the provider knows. Named zones are stored under their
    /// canonical spelling.
    pub fn try_from_str_with_provider(
        source: &str,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> TimeResult<Self> {
        if source == "Z" || source.eq_ignore_ascii_case("UTC") {
            return Ok(Self::Utc);
        }
        let mut cursor = source.chars().peekable();
        if cursor.peek().is_some_and(is_ascii_sign) {
            return parse_offset(&mut cursor);
        }
        let canonical = provider
            .normalize_identifier(source)
            .map_err(|_| TimeError::timezone().with_message("valid time zone was not provided."))?;
        Ok(Self::IanaIdentifier(canonical.into_owned()))
    }

    /// Parses a `TimeZone` using the compiled tzdb.
    #[cfg(feature = "compiled_data")]
    pub fn try_from_str(source: &str) -> TimeResult<Self> {
        crate::compiled::with_provider(|provider| Self::try_from_str_with_provider(source, provider))
    }

    /// Returns the identifier of this `TimeZone`.
    #[must_use]
    pub fn identifier(&self) -> String {
        match self {
            Self::Utc => String::from("UTC"),
            Self::OffsetMinutes(minutes) => {
                FormattableOffset::from_minutes(i64::from(*minutes)).to_string()
            }
            Self::IanaIdentifier(name) => name.clone(),
        }
    }

    /// Checks that this zone can be used.
    ///
    /// Fixed offsets must be within `±23:59`, and named zones must be known to
    /// `provider`.
    pub fn check_with_provider(
        &self,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> TimeResult<()> {
        match self {
            Self::Utc => Ok(()),
            Self::OffsetMinutes(minutes) if minutes.unsigned_abs() > MAX_OFFSET_MINUTES as u16 => {
                Err(TimeError::timezone().with_message("Offset is out of range"))
            }
            Self::OffsetMinutes(_) => Ok(()),
            Self::IanaIdentifier(identifier) if provider.check_identifier(identifier) => Ok(()),
            Self::IanaIdentifier(_) => {
                Err(TimeError::timezone().with_message("time zone identifier does not exist."))
            }
        }
    }

    /// Whether resolving offsets for this zone needs a provider.
    #[inline]
    #[must_use]
    pub fn is_named(&self) -> bool {
        matches!(self, Self::IanaIdentifier(_))
    }

    /// Returns the offset in effect at the UTC moment `utc_ticks`.
    pub fn offset_for_utc_ticks(
        &self,
        utc_ticks: i64,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> TimeResult<UtcOffset> {
        match self {
            Self::Utc => Ok(UtcOffset::default()),
            Self::OffsetMinutes(minutes) => Ok(UtcOffset::from_minutes(*minutes)),
            Self::IanaIdentifier(identifier) => {
                let epoch_seconds = (utc_ticks - UNIX_EPOCH_TICKS).div_euclid(TICKS_PER_SECOND);
                let info = provider.get_named_tz_offset(identifier, epoch_seconds)?;
                Ok(UtcOffset::from_seconds(info.offset.0))
            }
        }
    }

    /// Returns the offset in effect for the wall-clock reading `local_ticks`.
    ///
    /// Wall-clock readings inside a gap or an overlap resolve to the offset
    /// found after one correction step.
    pub fn offset_for_local_ticks(
        &self,
        local_ticks: i64,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> TimeResult<UtcOffset> {
        if !self.is_named() {
            return self.offset_for_utc_ticks(local_ticks, provider);
        }
        let guess = self.offset_for_utc_ticks(local_ticks, provider)?;
        self.offset_for_utc_ticks(local_ticks - guess.as_ticks(), provider)
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}

impl From<UtcOffset> for TimeZone {
    fn from(value: UtcOffset) -> Self {
        if value.0 == 0 {
            return Self::Utc;
        }
        Self::OffsetMinutes(value.0.div_euclid(60) as i16)
    }
}

#[inline]
pub(crate) fn parse_offset(chars: &mut Peekable<Chars<'_>>) -> TimeResult<TimeZone> {
    let sign = chars.next().map_or(1, |c| if c == '+' { 1 } else { -1 });
    // First offset portion
    let hours = parse_digit_pair(chars)?;

    let sep = chars.peek().is_some_and(|ch| *ch == ':');
    if sep {
        let _ = chars.next();
    }

    let digit_peek = chars.peek().map(char::is_ascii_digit);

    let minutes = match digit_peek {
        Some(true) => parse_digit_pair(chars)?,
        Some(false) => return Err(non_ascii_digit()),
        None if sep => return Err(abrupt_end()),
        None => 0,
    };

    if chars.next().is_some() {
        return Err(TimeError::timezone().with_message("Unexpected trailing characters in offset string"));
    }
    if hours > MAX_OFFSET_MINUTES / 60 || minutes > 59 {
        return Err(TimeError::timezone().with_message("Offset string is out of range"));
    }

    Ok(TimeZone::OffsetMinutes((hours * 60 + minutes) * sign))
}

fn parse_digit_pair(chars: &mut Peekable<Chars<'_>>) -> TimeResult<i16> {
    let mut value = 0;
    for _ in 0..2 {
        let digit = chars
            .next()
            .ok_or_else(abrupt_end)?
            .to_digit(10)
            .ok_or_else(non_ascii_digit)?;
        value = value * 10 + digit as i16;
    }
    Ok(value)
}

fn abrupt_end() -> TimeError {
    TimeError::timezone().with_message("Abrupt end while parsing offset string")
}

fn non_ascii_digit() -> TimeError {
    TimeError::timezone().with_message("Non ascii digit found while parsing offset string")
}

fn is_ascii_sign(ch: &char) -> bool {
    *ch == '+' || *ch == '-'
}

#[cfg(test)]
pub(crate) mod tests {
    use alloc::borrow::Cow;

    use super::{TimeZone, UtcOffset, MAX_OFFSET_MINUTES};
    use crate::error::ErrorKind;
    use crate::provider::{
        NeverProvider, TimeZoneProvider, TimeZoneProviderError, TimeZoneProviderResult,
        TimeZoneTransitionInfo, UtcOffsetSeconds,
    };
    use crate::UNIX_EPOCH_TICKS;

    /// A two-zone provider for tests.
    ///
    /// `Test/Fixed` is always +03:00. `Test/Summer` is +01:00, or +02:00 for
    /// epoch seconds in `[1_000_000, 2_000_000)`.
    pub(crate) struct TestProvider;

    impl TimeZoneProvider for TestProvider {
        fn normalize_identifier<'a>(
            &'a self,
            ident: &'a str,
        ) -> TimeZoneProviderResult<Cow<'a, str>> {
            match ident {
                "Test/Fixed" | "Test/Summer" => Ok(Cow::Borrowed(ident)),
                "test/fixed" => Ok(Cow::Borrowed("Test/Fixed")),
                _ => Err(TimeZoneProviderError::UnknownIdentifier),
            }
        }

        fn get_named_tz_offset(
            &self,
            identifier: &str,
            epoch_seconds: i64,
        ) -> TimeZoneProviderResult<TimeZoneTransitionInfo> {
            let seconds = match identifier {
                "Test/Fixed" => 3 * 3600,
                "Test/Summer" if (1_000_000..2_000_000).contains(&epoch_seconds) => 2 * 3600,
                "Test/Summer" => 3600,
                _ => return Err(TimeZoneProviderError::UnknownIdentifier),
            };
            Ok(TimeZoneTransitionInfo::from(UtcOffsetSeconds(seconds)))
        }
    }

    #[test]
    fn from_and_to_string() {
        for src in ["+09:30", "-09:30", "-12:30", "+00:00"] {
            let tz = TimeZone::try_from_str_with_provider(src, &NeverProvider).unwrap();
            assert_eq!(tz.identifier(), src);
        }
        let tz = TimeZone::try_from_str_with_provider("+0545", &NeverProvider).unwrap();
        assert_eq!(tz, TimeZone::OffsetMinutes(345));
        let tz = TimeZone::try_from_str_with_provider("-03", &NeverProvider).unwrap();
        assert_eq!(tz, TimeZone::OffsetMinutes(-180));
    }

    #[test]
    fn utc_spellings() {
        for src in ["UTC", "utc", "Z"] {
            let tz = TimeZone::try_from_str_with_provider(src, &NeverProvider).unwrap();
            assert_eq!(tz, TimeZone::Utc);
        }
    }

    #[test]
    fn invalid_zones() {
        for src in ["+24:00", "+05:60", "+5", "+05:", "+05:3x", "+05:30:00", "Nowhere/City"] {
            let err = TimeZone::try_from_str_with_provider(src, &TestProvider).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TimeZone, "{src}");
        }
    }

    #[test]
    fn zone_checks() {
        let valid = [
            TimeZone::Utc,
            TimeZone::OffsetMinutes(MAX_OFFSET_MINUTES),
            TimeZone::OffsetMinutes(-MAX_OFFSET_MINUTES),
            TimeZone::IanaIdentifier("Test/Summer".into()),
        ];
        for tz in valid {
            assert!(tz.check_with_provider(&TestProvider).is_ok(), "{tz}");
        }
        let invalid = [
            TimeZone::OffsetMinutes(MAX_OFFSET_MINUTES + 1),
            TimeZone::OffsetMinutes(i16::MIN),
            TimeZone::OffsetMinutes(i16::MAX),
            TimeZone::IanaIdentifier("Bogus/Nowhere".into()),
        ];
        for tz in invalid {
            let err = tz.check_with_provider(&TestProvider).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TimeZone, "{tz}");
        }
    }

    #[test]
    fn named_zones_are_canonicalized() {
        let tz = TimeZone::try_from_str_with_provider("test/fixed", &TestProvider).unwrap();
        assert_eq!(tz, TimeZone::IanaIdentifier("Test/Fixed".into()));
    }

    #[test]
    fn local_offset_resolution() {
        let tz = TimeZone::IanaIdentifier("Test/Summer".into());
        let inside = UNIX_EPOCH_TICKS + 1_500_000 * crate::TICKS_PER_SECOND;
        assert_eq!(
            tz.offset_for_utc_ticks(inside, &TestProvider).unwrap(),
            UtcOffset::from_seconds(7200)
        );
        let outside = UNIX_EPOCH_TICKS + 3_000_000 * crate::TICKS_PER_SECOND;
        assert_eq!(
            tz.offset_for_local_ticks(outside, &TestProvider).unwrap(),
            UtcOffset::from_seconds(3600)
        );
        let fixed = TimeZone::OffsetMinutes(-90);
        assert_eq!(
            fixed.offset_for_local_ticks(0, &NeverProvider).unwrap(),
            UtcOffset::from_minutes(-90)
        );
    }

    #[test]
    fn offset_display() {
        assert_eq!(alloc::format!("{}", UtcOffset::from_minutes(-330)), "-05:30");
        assert_eq!(TimeZone::from(UtcOffset::from_seconds(0)), TimeZone::Utc);
        assert_eq!(
            TimeZone::from(UtcOffset::from_minutes(60)),
            TimeZone::OffsetMinutes(60)
        );
    }
}
