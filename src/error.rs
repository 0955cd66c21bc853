//! This module implements `TimeError`.

use alloc::borrow::Cow;
use core::fmt;

use ticktime_provider::TimeZoneProviderError;

/// `TimeError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Error.
    #[default]
    Generic,
    /// A calendar or duration component is outside of its bounds.
    Range,
    /// Input text did not match the requested format.
    Parse,
    /// A format pattern could not be expanded.
    Syntax,
    /// A locale string or plural rule is not defined.
    Locale,
    /// A time zone identifier or offset is not valid.
    TimeZone,
    /// An internal invariant did not hold.
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Range => "RangeError",
            Self::Parse => "ParseError",
            Self::Syntax => "SyntaxError",
            Self::Locale => "LocaleDefinitionNotFoundError",
            Self::TimeZone => "InvalidTimezoneError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The error type for `ticktime`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl TimeError {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Create a generic error
    #[must_use]
    pub fn general<S>(msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Create a range error.
    #[must_use]
    pub fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Create a parse error.
    #[must_use]
    pub fn parse() -> Self {
        Self::new(ErrorKind::Parse)
    }

    /// Create a syntax error.
    #[must_use]
    pub fn syntax() -> Self {
        Self::new(ErrorKind::Syntax)
    }

    /// Create a locale definition not found error.
    #[must_use]
    pub fn locale() -> Self {
        Self::new(ErrorKind::Locale)
    }

    /// Create an invalid time zone error.
    #[must_use]
    pub fn timezone() -> Self {
        Self::new(ErrorKind::TimeZone)
    }

    /// Create an assertion error
    #[must_use]
    pub fn assert() -> Self {
        Self::new(ErrorKind::Assert)
    }

    /// Add a message to the error.
    #[must_use]
    pub fn with_message<S>(mut self, msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.msg = msg.into();
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Extracts the error message.
    #[inline]
    #[must_use]
    pub fn into_message(self) -> Cow<'static, str> {
        self.msg
    }

    /// Whether this error came from input text not matching a format.
    #[inline]
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        self.kind == ErrorKind::Parse
    }

    /// Whether this error came from a value outside of its valid range.
    #[inline]
    #[must_use]
    pub fn is_range_error(&self) -> bool {
        self.kind == ErrorKind::Range
    }
}

impl fmt::Display for TimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.trim();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        Ok(())
    }
}

impl core::error::Error for TimeError {}

impl From<TimeZoneProviderError> for TimeError {
    fn from(value: TimeZoneProviderError) -> Self {
        match value {
            TimeZoneProviderError::UnknownIdentifier => {
                Self::timezone().with_message("time zone identifier does not exist.")
            }
            TimeZoneProviderError::Range(msg) => Self::range().with_message(msg),
            TimeZoneProviderError::Malformed(msg) => Self::general(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{ErrorKind, TimeError};
    use ticktime_provider::TimeZoneProviderError;

    #[test]
    fn display_includes_kind_and_message() {
        let err = TimeError::range().with_message("month is out of range.");
        assert_eq!(err.to_string(), "RangeError: month is out of range.");
        assert_eq!(TimeError::parse().to_string(), "ParseError");
    }

    #[test]
    fn provider_errors_convert() {
        let err = TimeError::from(TimeZoneProviderError::UnknownIdentifier);
        assert_eq!(err.kind(), ErrorKind::TimeZone);
        let err = TimeError::from(TimeZoneProviderError::Range("too far"));
        assert!(err.is_range_error());
    }
}
