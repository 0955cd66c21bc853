//! Trait definitions for accessing values from the host environment.
//!
//! NOTE: This is a power user API.

use crate::{provider::TimeZoneProvider, TimeResult, TimeZone, UNIX_EPOCH_TICKS};

/// The `HostClock` trait defines an accessor to the host's clock.
pub trait HostClock {
    /// Returns the current UTC time as ticks since 0001-01-01.
    fn get_host_utc_ticks(&self) -> TimeResult<i64>;
}

/// The `HostTimeZone` trait defines the host's time zone.
pub trait HostTimeZone {
    fn get_host_time_zone(
        &self,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> TimeResult<TimeZone>;
}

/// `HostHooks` marks whether a trait implements the required host hooks with some
/// system methods.
pub trait HostHooks: HostClock + HostTimeZone {
    fn get_system_utc_ticks(&self) -> TimeResult<i64> {
        self.get_host_utc_ticks()
    }

    fn get_system_time_zone(
        &self,
        provider: &(impl TimeZoneProvider + ?Sized),
    ) -> TimeResult<TimeZone> {
        self.get_host_time_zone(provider)
    }
}

// Implement empty providers

impl HostClock for () {
    fn get_host_utc_ticks(&self) -> TimeResult<i64> {
        Ok(UNIX_EPOCH_TICKS)
    }
}

impl HostTimeZone for () {
    fn get_host_time_zone(&self, _: &(impl TimeZoneProvider + ?Sized)) -> TimeResult<TimeZone> {
        Ok(TimeZone::Utc)
    }
}

impl HostHooks for () {}
