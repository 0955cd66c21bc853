use crate::host::{HostClock, HostHooks, HostTimeZone};
use crate::provider::TimeZoneProvider;
use crate::{TimeError, TimeResult, TimeZone, TICKS_PER_SECOND, UNIX_EPOCH_TICKS};

use web_time::{SystemTime, UNIX_EPOCH};

/// A host system implementation backed by [`web_time::SystemTime`] and
/// [`iana_time_zone`].
///
/// The system time zone is used whenever no time zone is provided.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl HostHooks for SystemHost {}

impl HostClock for SystemHost {
    fn get_host_utc_ticks(&self) -> TimeResult<i64> {
        get_system_utc_ticks()
    }
}

impl HostTimeZone for SystemHost {
    fn get_host_time_zone(
        &self,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> TimeResult<TimeZone> {
        get_system_timezone(provider)
    }
}

#[inline]
pub(crate) fn get_system_timezone(
    provider: &(impl TimeZoneProvider + ?Sized),
) -> TimeResult<TimeZone> {
    iana_time_zone::get_timezone()
        .map(|s| TimeZone::try_from_str_with_provider(&s, provider))
        .map_err(|_| TimeError::general("Error fetching system time zone"))?
}

/// Returns the system time in ticks since 0001-01-01.
pub(crate) fn get_system_utc_ticks() -> TimeResult<i64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| TimeError::general("Error fetching system time"))?;
    let seconds = i64::try_from(elapsed.as_secs())
        .map_err(|_| TimeError::range().with_message("system time is out of range."))?;
    let sub_ticks = i64::from(elapsed.subsec_nanos()) / crate::NS_PER_TICK;
    seconds
        .checked_mul(TICKS_PER_SECOND)
        .and_then(|t| t.checked_add(UNIX_EPOCH_TICKS + sub_ticks))
        .ok_or(TimeError::range().with_message("system time is out of range."))
}

#[cfg(test)]
mod tests {
    use super::SystemHost;
    use crate::host::HostClock;
    use crate::{calendar, UNIX_EPOCH_TICKS};

    #[test]
    fn system_clock_is_after_the_epoch() {
        let ticks = SystemHost.get_host_utc_ticks().unwrap();
        assert!(ticks > UNIX_EPOCH_TICKS);
        assert!(ticks > calendar::date_to_ticks(2024, 1, 1).unwrap());
        assert!(ticks <= crate::MAX_TICKS);
    }
}
