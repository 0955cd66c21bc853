//! The `Now` component.

use crate::{
    host::HostHooks, provider::TimeZoneProvider, Instant, TimeError, TimeResult, TimeZone,
};

/// Access to the current time.
pub struct Now;

impl Now {
    /// Returns the current `Instant` from the provided host hooks.
    ///
    /// ## Order of operations
    ///
    /// The time zone is resolved before the clock is read:
    ///
    ///   1. Resolve the user provided `TimeZone`, falling back to the host's.
    ///   2. Read the host's UTC ticks.
    ///   3. Shift the ticks into the resolved zone.
    pub fn instant_with_host(
        host: &impl HostHooks,
        timezone: Option<TimeZone>,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> TimeResult<Instant> {
        let timezone = match timezone {
            Some(timezone) => timezone,
            None => host.get_system_time_zone(provider)?,
        };
        let utc_ticks = host.get_system_utc_ticks()?;
        Self::instant_with_utc_ticks(utc_ticks, timezone, provider)
    }

    /// Returns the `Instant` for `utc_ticks` expressed in `timezone`.
    pub fn instant_with_utc_ticks(
        utc_ticks: i64,
        timezone: TimeZone,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> TimeResult<Instant> {
        timezone.check_with_provider(provider)?;
        let offset = timezone.offset_for_utc_ticks(utc_ticks, provider)?;
        let local = utc_ticks
            .checked_add(offset.as_ticks())
            .ok_or(TimeError::range().with_message("current time is out of range."))?;
        Instant::checked(local, timezone)
    }
}

#[cfg(feature = "sys")]
impl Now {
    /// Returns the current `Instant` in `timezone`, or in the system time
    /// zone when none is provided.
    ///
    /// Enable with the `sys` feature flag.
    pub fn instant(timezone: Option<TimeZone>) -> TimeResult<Instant> {
        crate::compiled::with_provider(|provider| {
            Self::instant_with_host(&crate::SystemHost, timezone, provider)
        })
    }

    /// Returns the system time zone.
    ///
    /// Enable with the `sys` feature flag.
    pub fn time_zone() -> TimeResult<TimeZone> {
        crate::compiled::with_provider(|provider| crate::sys::get_system_timezone(provider))
    }
}

#[cfg(test)]
mod tests {
    use super::Now;
    use crate::error::ErrorKind;
    use crate::host::{HostClock, HostHooks, HostTimeZone};
    use crate::provider::{NeverProvider, TimeZoneProvider};
    use crate::timezone::tests::TestProvider;
    use crate::{TimeResult, TimeZone, TICKS_PER_HOUR, UNIX_EPOCH_TICKS};

    struct FixedHost(i64);

    impl HostClock for FixedHost {
        fn get_host_utc_ticks(&self) -> TimeResult<i64> {
            Ok(self.0)
        }
    }

    impl HostTimeZone for FixedHost {
        fn get_host_time_zone(
            &self,
            provider: &(impl TimeZoneProvider + ?Sized),
        ) -> TimeResult<TimeZone> {
            TimeZone::try_from_str_with_provider("Test/Fixed", provider)
        }
    }

    impl HostHooks for FixedHost {}

    #[test]
    fn empty_host_is_the_epoch() {
        let now = Now::instant_with_host(&(), None, &NeverProvider).unwrap();
        assert_eq!(now.ticks(), UNIX_EPOCH_TICKS);
        assert_eq!(now.timezone(), &TimeZone::Utc);
        assert_eq!(now.to_string(), "1970-01-01 00:00:00");
    }

    #[test]
    fn host_time_zone_is_the_fallback() {
        let host = FixedHost(UNIX_EPOCH_TICKS);
        let now = Now::instant_with_host(&host, None, &TestProvider).unwrap();
        assert_eq!(now.timezone(), &TimeZone::IanaIdentifier("Test/Fixed".into()));
        assert_eq!(now.ticks(), UNIX_EPOCH_TICKS + 3 * TICKS_PER_HOUR);

        let now =
            Now::instant_with_host(&host, Some(TimeZone::OffsetMinutes(-60)), &TestProvider)
                .unwrap();
        assert_eq!(now.hour(), 23);
        assert_eq!(now.year(), 1969);
    }

    #[test]
    fn unknown_zones_are_rejected() {
        let host = FixedHost(UNIX_EPOCH_TICKS);
        for timezone in [
            TimeZone::IanaIdentifier("Bogus/Nowhere".into()),
            TimeZone::OffsetMinutes(24 * 60),
        ] {
            let err = Now::instant_with_host(&host, Some(timezone), &TestProvider).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TimeZone);
        }
    }

    #[test]
    fn out_of_range_clock() {
        let host = FixedHost(-1);
        assert!(Now::instant_with_host(&host, Some(TimeZone::Utc), &NeverProvider)
            .unwrap_err()
            .is_range_error());
    }
}
