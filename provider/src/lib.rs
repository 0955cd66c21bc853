//! Time zone offset providers for `ticktime`.
//!
//! A provider answers one question: what UTC offset applies in a named time
//! zone at a given UTC moment. The `tzif` feature adds
//! [`CompiledTzdbProvider`], which reads the tzdb compiled into `jiff-tzdb`.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod provider;

#[cfg(feature = "tzif")]
pub(crate) mod posix;
#[cfg(feature = "tzif")]
pub(crate) mod utils;
#[cfg(feature = "tzif")]
pub mod tzif;

#[cfg(feature = "tzif")]
pub use tzif::CompiledTzdbProvider;

use core::fmt;

/// The errors a [`provider::TimeZoneProvider`] can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeZoneProviderError {
    /// The identifier is not known to the provider.
    UnknownIdentifier,
    /// The requested moment is outside of what the provider can resolve.
    Range(&'static str),
    /// The provider's backing data could not be read.
    Malformed(&'static str),
}

impl fmt::Display for TimeZoneProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownIdentifier => f.write_str("time zone identifier does not exist"),
            Self::Range(msg) => write!(f, "time zone lookup out of range: {msg}"),
            Self::Malformed(msg) => write!(f, "malformed time zone data: {msg}"),
        }
    }
}

impl core::error::Error for TimeZoneProviderError {}
