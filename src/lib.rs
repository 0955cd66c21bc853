//! The `ticktime` crate is a tick based calendar arithmetic and localized
//! date/time text engine.
//!
//! Points in time are [`Instant`]s and elapsed spans are [`Duration`]s. Both
//! are a signed 64-bit count of 100 nanosecond ticks, where tick 0 is
//! `0001-01-01 00:00:00` in the proleptic Gregorian calendar.
//!
//! ```rust
//! use ticktime::{format::FormatContext, locale::LocaleData, Instant};
//!
//! let instant = Instant::try_new_utc(2024, 1, 31, 18, 30, 0).unwrap();
//! let next = instant.add_months(1).unwrap();
//! assert_eq!(next.to_string(), "2024-02-29 18:30:00");
//!
//! let mut context = FormatContext::new();
//! let english = LocaleData::english();
//! let text = context.format(&next, "%A %e %B, %I:%M %p", &english).unwrap();
//! assert_eq!(text, "Thursday 29 February, 06:30 PM");
//! ```
//!
//! Text conversion goes through a `strftime`-like specifier language. Some
//! specifiers expand to fixed sub-patterns (`%F`, `%T`, ...) and some to
//! patterns provided by a [`locale::LocaleLookup`] (`%x`, `%X`, `%E`). The
//! caches for those expansions live in a [`format::FormatContext`] owned by
//! the caller.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_lines,
    clippy::missing_errors_doc,
    clippy::option_if_let_else,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
    clippy::too_many_arguments
)]

extern crate alloc;
extern crate core;

#[cfg(feature = "std")]
extern crate std;

pub mod calendar;
pub mod error;
pub mod format;
pub mod host;
pub mod locale;
pub mod provider;

mod duration;
mod formattable;
mod instant;
mod now;
mod timezone;

#[cfg(feature = "sys")]
pub(crate) mod sys;

#[cfg(feature = "compiled_data")]
pub(crate) mod compiled;

#[cfg(feature = "tzdb")]
pub mod tzdb {
    //! The compiled tzdb provider.
    pub use ticktime_provider::tzif::{CompiledTzdbProvider, Tzif};
}

#[doc(inline)]
pub use error::TimeError;

/// The `ticktime` result type
pub type TimeResult<T> = Result<T, TimeError>;

pub use crate::{
    duration::Duration,
    instant::Instant,
    now::Now,
    timezone::{TimeZone, UtcOffset},
};

#[cfg(feature = "sys")]
pub use crate::sys::SystemHost;

/// A library specific trait for unwrapping assertions.
pub(crate) trait TimeUnwrap {
    type Output;

    /// `ticktime` based assertion for unwrapping. This will panic in
    /// debug builds, but throws error during runtime.
    fn time_unwrap(self) -> TimeResult<Self::Output>;
}

impl<T> TimeUnwrap for Option<T> {
    type Output = T;

    fn time_unwrap(self) -> TimeResult<Self::Output> {
        debug_assert!(self.is_some());
        self.ok_or(TimeError::assert())
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! time_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err($crate::TimeError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err($crate::TimeError::assert());
        }
    };
}

// Relevant numeric constants
/// One tick is 100 nanoseconds.
pub const NS_PER_TICK: i64 = 100;
/// Ticks per second constant: 1e+7
pub const TICKS_PER_SECOND: i64 = 10_000_000;
/// Ticks per minute constant: 6e+8
pub const TICKS_PER_MINUTE: i64 = TICKS_PER_SECOND * 60;
/// Ticks per hour constant: 3.6e+10
pub const TICKS_PER_HOUR: i64 = TICKS_PER_MINUTE * 60;
/// Ticks per day constant: 8.64e+11
pub const TICKS_PER_DAY: i64 = TICKS_PER_HOUR * 24;

/// Days from 0001-01-01 to 1970-01-01.
pub(crate) const UNIX_EPOCH_DAYS: i64 = 719_162;
/// The tick value of the Unix epoch.
pub(crate) const UNIX_EPOCH_TICKS: i64 = UNIX_EPOCH_DAYS * TICKS_PER_DAY;

/// The largest valid `Instant` tick value, 9999-12-31 23:59:59.9999999.
pub const MAX_TICKS: i64 = 3_652_059 * TICKS_PER_DAY - 1;
/// The largest `Duration` magnitude: 10,000 Gregorian years.
pub const MAX_DURATION_TICKS: i64 = 3_652_425 * TICKS_PER_DAY;
