//! The `TimeZoneProvider` trait.

use alloc::borrow::Cow;

use crate::TimeZoneProviderError;

pub type TimeZoneProviderResult<T> = Result<T, TimeZoneProviderError>;

/// `UtcOffsetSeconds` represents the amount of seconds we need to add to the UTC to reach the local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct UtcOffsetSeconds(pub i64);

/// `TimeZoneTransitionInfo` represents information about a timezone transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeZoneTransitionInfo {
    /// The transition time epoch at which the offset needs to be applied.
    pub transition_epoch: Option<i64>,
    /// The time zone offset in seconds.
    pub offset: UtcOffsetSeconds,
}

impl From<UtcOffsetSeconds> for TimeZoneTransitionInfo {
    fn from(offset: UtcOffsetSeconds) -> Self {
        Self {
            transition_epoch: None,
            offset,
        }
    }
}

/// The `TimeZoneProvider` trait provides methods required for a provider
/// to implement in order to source time zone data from that provider.
///
/// All epoch values are seconds relative to the Unix epoch in UTC.
pub trait TimeZoneProvider {
    /// Returns the canonical spelling of `ident`, or an error when the
    /// provider does not know it.
    fn normalize_identifier<'a>(&'a self, ident: &'a str) -> TimeZoneProviderResult<Cow<'a, str>>;

    /// Returns the offset in effect for `identifier` at `epoch_seconds`.
    fn get_named_tz_offset(
        &self,
        identifier: &str,
        epoch_seconds: i64,
    ) -> TimeZoneProviderResult<TimeZoneTransitionInfo>;

    /// Whether `ident` names a zone this provider can resolve.
    fn check_identifier(&self, ident: &str) -> bool {
        self.normalize_identifier(ident).is_ok()
    }
}

impl<P: TimeZoneProvider + ?Sized> TimeZoneProvider for &P {
    fn normalize_identifier<'a>(&'a self, ident: &'a str) -> TimeZoneProviderResult<Cow<'a, str>> {
        (**self).normalize_identifier(ident)
    }

    fn get_named_tz_offset(
        &self,
        identifier: &str,
        epoch_seconds: i64,
    ) -> TimeZoneProviderResult<TimeZoneTransitionInfo> {
        (**self).get_named_tz_offset(identifier, epoch_seconds)
    }
}

/// A provider that knows no named zones.
///
/// Useful when every zone in play is UTC or a fixed offset.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverProvider;

impl TimeZoneProvider for NeverProvider {
    fn normalize_identifier<'a>(&'a self, _: &'a str) -> TimeZoneProviderResult<Cow<'a, str>> {
        Err(TimeZoneProviderError::UnknownIdentifier)
    }

    fn get_named_tz_offset(&self, _: &str, _: i64) -> TimeZoneProviderResult<TimeZoneTransitionInfo> {
        Err(TimeZoneProviderError::UnknownIdentifier)
    }
}

#[cfg(test)]
mod tests {
    use super::{NeverProvider, TimeZoneProvider};
    use crate::TimeZoneProviderError;

    #[test]
    fn never_provider_rejects_everything() {
        assert!(!NeverProvider.check_identifier("UTC"));
        assert_eq!(
            NeverProvider.get_named_tz_offset("Europe/Paris", 0),
            Err(TimeZoneProviderError::UnknownIdentifier)
        );
    }
}
