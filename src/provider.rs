//! The `TimeZoneProvider` trait and its supporting types.
//!
//! Named zones are resolved through a provider. `TimeZone::Utc` and
//! `TimeZone::OffsetMinutes` never call into one, so [`NeverProvider`] is
//! enough for them.

pub use ticktime_provider::{
    provider::{
        NeverProvider, TimeZoneProvider, TimeZoneProviderResult, TimeZoneTransitionInfo,
        UtcOffsetSeconds,
    },
    TimeZoneProviderError,
};
