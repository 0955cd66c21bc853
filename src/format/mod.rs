//! Converting `Instant`s to and from text.
//!
//! Patterns use `strftime`-like specifiers, see [`specifier::SPECIFIERS`]
//! for the full table. A pattern is first *unwrapped*: fixed expansions such
//! as `%F` and locale patterns such as `%x` are substituted until none are
//! left. The flat pattern is then split into literal text and specifiers,
//! which are rendered or matched against input.
//!
//! `%%` is a literal `%`. Unknown specifiers are kept as literal text.
//!
//! ```rust
//! use ticktime::{format::FormatContext, locale::LocaleData, Instant};
//!
//! let english = LocaleData::english();
//! let mut context = FormatContext::new();
//!
//! let instant = Instant::try_new_utc(2023, 7, 4, 9, 5, 0).unwrap();
//! assert_eq!(
//!     context.format(&instant, "%a %d %b %Y, %r", &english).unwrap(),
//!     "Tue 04 Jul 2023, 09:05:00 AM"
//! );
//!
//! let parsed = context
//!     .parse("July 4 2023 9:05 pm", Some("%B %e %Y %I:%M %p"), &english, &instant)
//!     .unwrap();
//! assert_eq!(parsed.to_string(), "2023-07-04 21:05:00");
//! ```

mod parse;
mod render;
pub mod specifier;
mod unwrap;


use alloc::{borrow::Cow, collections::BTreeMap, format, string::String, vec::Vec};

use icu_locale::Locale;

use self::unwrap::FormatItem;
use crate::{locale::LocaleLookup, Instant, TimeResult, TimeUnwrap};

/// The pattern of the canonical `YYYY-MM-DD HH:MM:SS` form.
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The default limit on how deeply expansions may nest while unwrapping.
pub const DEFAULT_MAX_EXPANSION_DEPTH: usize = 16;

/// Caches the unwrapped and split forms of patterns.
///
/// Locale patterns make the cached forms depend on the locale. Every call
/// first checks the locale of the lookup it is given, and both caches are
/// cleared when it differs from the locale they were filled for.
#[derive(Debug, Clone)]
pub struct FormatContext {
    language: Option<Locale>,
    unwrapped: BTreeMap<String, String>,
    parsed: BTreeMap<String, Vec<FormatItem>>,
    max_expansion_depth: usize,
}

impl Default for FormatContext {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatContext {
    /// Creates an empty `FormatContext`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: None,
            unwrapped: BTreeMap::new(),
            parsed: BTreeMap::new(),
            max_expansion_depth: DEFAULT_MAX_EXPANSION_DEPTH,
        }
    }

    /// Sets how deeply expansions may nest before a pattern is rejected.
    ///
    /// A pattern that refers back to itself is rejected at any depth.
    #[must_use]
    pub fn with_max_expansion_depth(mut self, depth: usize) -> Self {
        self.max_expansion_depth = depth;
        self
    }

    #[inline]
    #[must_use]
    pub fn max_expansion_depth(&self) -> usize {
        self.max_expansion_depth
    }

    /// The locale the caches were filled for.
    #[inline]
    #[must_use]
    pub fn cached_locale(&self) -> Option<&Locale> {
        self.language.as_ref()
    }

    /// Whether `pattern` has been unwrapped for the cached locale.
    #[must_use]
    pub fn is_cached(&self, pattern: &str) -> bool {
        self.unwrapped.contains_key(pattern)
    }

    /// Empties both caches.
    pub fn clear(&mut self) {
        self.unwrapped.clear();
        self.parsed.clear();
    }

    /// Points the caches at the locale of `locale`, clearing them if it
    /// changed. Returns whether they were cleared.
    pub fn init(&mut self, locale: &impl LocaleLookup) -> bool {
        let current = locale.locale();
        if self.language.as_ref() == Some(current) {
            return false;
        }
        #[cfg(feature = "log")]
        log::debug!("format caches switched to locale {current}");
        self.clear();
        self.language = Some(current.clone());
        true
    }

    /// Returns `pattern` with every expansion substituted.
    pub fn unwrap_pattern(
        &mut self,
        pattern: &str,
        locale: &impl LocaleLookup,
    ) -> TimeResult<String> {
        self.init(locale);
        self.unwrap_cached(pattern, locale)
    }

    fn unwrap_cached(&mut self, pattern: &str, locale: &impl LocaleLookup) -> TimeResult<String> {
        if let Some(flat) = self.unwrapped.get(pattern) {
            return Ok(flat.clone());
        }
        let flat = unwrap::unwrap_pattern(pattern, locale, self.max_expansion_depth)?;
        self.unwrapped.insert(pattern.into(), flat.clone());
        Ok(flat)
    }

    fn items(&mut self, pattern: &str, locale: &impl LocaleLookup) -> TimeResult<&[FormatItem]> {
        self.init(locale);
        if !self.parsed.contains_key(pattern) {
            let flat = self.unwrap_cached(pattern, locale)?;
            self.parsed.insert(pattern.into(), unwrap::split_items(&flat));
        }
        self.parsed.get(pattern).map(Vec::as_slice).time_unwrap()
    }

    /// Writes `instant` with `pattern`.
    pub fn format(
        &mut self,
        instant: &Instant,
        pattern: &str,
        locale: &impl LocaleLookup,
    ) -> TimeResult<String> {
        let items = self.items(pattern, locale)?;
        render::render(instant, items, locale)
    }

    /// Reads an `Instant` from `text`.
    ///
    /// `pattern` defaults to [`DEFAULT_FORMAT`], in which case a plain
    /// `YYYY-MM-DD` date is read as midnight. Fields the pattern does not
    /// provide are taken from `reference`, and a two digit year is placed in
    /// the century of `reference`. The result is in the time zone of
    /// `reference`.
    ///
    /// Input is split into runs of letters, digits and `_`, and each run must
    /// line up with one specifier or literal word of the pattern. A field
    /// directly followed by letters, such as `08h30` from `%Hh%M`, is a
    /// single run, so such text does not parse back. Patterns meant for
    /// parsing need non word characters between fields.
    ///
    /// Text that does not fit the pattern is an `ErrorKind::Parse` error.
    /// Text that fits but names an invalid date, such as February 30th, is
    /// an `ErrorKind::Range` error.
    pub fn parse(
        &mut self,
        text: &str,
        pattern: Option<&str>,
        locale: &impl LocaleLookup,
        reference: &Instant,
    ) -> TimeResult<Instant> {
        let pattern = pattern.unwrap_or(DEFAULT_FORMAT);
        let text = if pattern == DEFAULT_FORMAT && text.len() == 10 {
            Cow::Owned(format!("{text} 00:00:00"))
        } else {
            Cow::Borrowed(text)
        };
        let items = self.items(pattern, locale)?;
        parse::parse(&text, items, locale, reference)
    }
}
