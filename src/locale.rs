//! Localized strings and plural rules.
//!
//! The text engine never hard codes names or phrases. Weekday and month
//! names, AM/PM markers, the locale date and time patterns, and the
//! interval phrases are all fetched through [`LocaleLookup`].
//!
//! Date strings live in the `"date"` container and interval phrases in the
//! `"interval"` container. See [`LocaleData::english`] for the full key set.

use alloc::{
    borrow::Cow,
    collections::BTreeMap,
    format,
    string::String,
};

use icu_locale::{locale, Locale};

use crate::{TimeError, TimeResult};

/// The container holding weekday, month and AM/PM names and the locale
/// date/time patterns.
pub const DATE_CONTAINER: &str = "date";
/// The container holding the phrases used by `Duration::interval_as_string`.
pub const INTERVAL_CONTAINER: &str = "interval";

/// A source of localized strings.
pub trait LocaleLookup {
    /// The locale this lookup serves.
    fn locale(&self) -> &Locale;

    /// Returns the string stored under `key` in `container`.
    ///
    /// Missing keys are an `ErrorKind::Locale` error.
    fn get_string(&self, container: &str, key: &str) -> TimeResult<Cow<'_, str>>;

    /// Returns the cardinal plural rule of this locale.
    fn plural_rule(&self) -> TimeResult<PluralRule>;
}

impl<L: LocaleLookup + ?Sized> LocaleLookup for &L {
    fn locale(&self) -> &Locale {
        (**self).locale()
    }

    fn get_string(&self, container: &str, key: &str) -> TimeResult<Cow<'_, str>> {
        (**self).get_string(container, key)
    }

    fn plural_rule(&self) -> TimeResult<PluralRule> {
        (**self).plural_rule()
    }
}

/// A CLDR cardinal plural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    /// The lowercase CLDR name, used as a key suffix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }
}

/// The closed set of supported cardinal plural rules for whole numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralRule {
    /// No plural forms: Chinese, Japanese, Korean, ...
    Invariant,
    /// `one` for 1: English, German, Dutch, Spanish, ...
    OneOther,
    /// `one` for 0 and 1: French, Portuguese.
    ZeroOneOther,
    /// Russian, Ukrainian, Belarusian.
    EastSlavic,
    Polish,
    /// Czech, Slovak.
    WestSlavic,
    Arabic,
}

impl PluralRule {
    /// Returns the category of `n`.
    #[must_use]
    pub fn category(self, n: u64) -> PluralCategory {
        let n10 = n % 10;
        let n100 = n % 100;
        match self {
            Self::Invariant => PluralCategory::Other,
            Self::OneOther if n == 1 => PluralCategory::One,
            Self::OneOther => PluralCategory::Other,
            Self::ZeroOneOther if n <= 1 => PluralCategory::One,
            Self::ZeroOneOther => PluralCategory::Other,
            Self::EastSlavic if n10 == 1 && n100 != 11 => PluralCategory::One,
            Self::EastSlavic if (2..=4).contains(&n10) && !(12..=14).contains(&n100) => {
                PluralCategory::Few
            }
            Self::EastSlavic => PluralCategory::Many,
            Self::Polish if n == 1 => PluralCategory::One,
            Self::Polish if (2..=4).contains(&n10) && !(12..=14).contains(&n100) => {
                PluralCategory::Few
            }
            Self::Polish => PluralCategory::Many,
            Self::WestSlavic if n == 1 => PluralCategory::One,
            Self::WestSlavic if (2..=4).contains(&n) => PluralCategory::Few,
            Self::WestSlavic => PluralCategory::Other,
            Self::Arabic => match n {
                0 => PluralCategory::Zero,
                1 => PluralCategory::One,
                2 => PluralCategory::Two,
                _ if (3..=10).contains(&n100) => PluralCategory::Few,
                _ if (11..=99).contains(&n100) => PluralCategory::Many,
                _ => PluralCategory::Other,
            },
        }
    }

    /// Returns the rule for the language of `locale`, if it is known.
    #[must_use]
    pub fn for_locale(locale: &Locale) -> Option<Self> {
        let rule = match locale.id.language.as_str() {
            "ja" | "ko" | "zh" | "th" | "vi" | "id" | "ms" => Self::Invariant,
            "en" | "de" | "nl" | "sv" | "da" | "nb" | "fi" | "et" | "el" | "it" | "es" | "ca"
            | "hu" | "tr" | "bg" => Self::OneOther,
            "fr" | "pt" => Self::ZeroOneOther,
            "ru" | "uk" | "be" => Self::EastSlavic,
            "pl" => Self::Polish,
            "cs" | "sk" => Self::WestSlavic,
            "ar" => Self::Arabic,
            _ => return None,
        };
        Some(rule)
    }
}

/// An in-memory [`LocaleLookup`].
#[derive(Debug, Clone)]
pub struct LocaleData {
    locale: Locale,
    containers: BTreeMap<String, BTreeMap<String, String>>,
    plural_rule: Option<PluralRule>,
}

impl LocaleData {
    /// Creates an empty `LocaleData` for `locale`.
    ///
    /// The plural rule is preselected from the locale's language when known.
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        let plural_rule = PluralRule::for_locale(&locale);
        Self {
            locale,
            containers: BTreeMap::new(),
            plural_rule,
        }
    }

    /// Stores `value` under `key` in `container`.
    pub fn insert(&mut self, container: &str, key: &str, value: impl Into<String>) {
        self.containers
            .entry(container.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    #[must_use]
    pub fn with_string(mut self, container: &str, key: &str, value: impl Into<String>) -> Self {
        self.insert(container, key, value);
        self
    }

    #[must_use]
    pub fn with_plural_rule(mut self, rule: PluralRule) -> Self {
        self.plural_rule = Some(rule);
        self
    }

    /// Stores a `{domain}{index}` family, with indices counted from `first`.
    fn insert_domain(&mut self, domain: &str, first: usize, values: &[&str]) {
        for (i, value) in values.iter().enumerate() {
            self.insert(DATE_CONTAINER, &format!("{domain}{}", first + i), *value);
        }
    }

    /// The built in English (`en`) data.
    #[must_use]
    pub fn english() -> Self {
        let mut data = Self::new(locale!("en"));
        data.insert_domain(
            "weekday_",
            1,
            &["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"],
        );
        data.insert_domain(
            "weekday_short_",
            1,
            &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        );
        data.insert_domain(
            "month_",
            1,
            &[
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ],
        );
        data.insert_domain(
            "month_short_",
            1,
            &[
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ],
        );
        data.insert_domain("ampm_", 0, &["AM", "PM"]);
        data.insert(DATE_CONTAINER, "short_date_format", "%m/%d/%y");
        data.insert(DATE_CONTAINER, "long_date_format", "%A, %B %e, %Y");
        data.insert(DATE_CONTAINER, "time_format", "%H:%M:%S");

        data.insert(INTERVAL_CONTAINER, "now", "just now");
        for (unit, one, other) in [
            ("minute", "{0} min", "{0} mins"),
            ("hour", "{0} hr", "{0} hrs"),
            ("day", "{0} day", "{0} days"),
        ] {
            data.insert(INTERVAL_CONTAINER, &format!("{unit}_one"), one);
            data.insert(INTERVAL_CONTAINER, &format!("{unit}_other"), other);
        }
        data
    }
}

impl LocaleLookup for LocaleData {
    fn locale(&self) -> &Locale {
        &self.locale
    }

    fn get_string(&self, container: &str, key: &str) -> TimeResult<Cow<'_, str>> {
        self.containers
            .get(container)
            .and_then(|strings| strings.get(key))
            .map(|value| Cow::Borrowed(value.as_str()))
            .ok_or_else(|| {
                TimeError::locale().with_message(format!(
                    "no string for '{key}' in '{container}' for locale {}.",
                    self.locale
                ))
            })
    }

    fn plural_rule(&self) -> TimeResult<PluralRule> {
        self.plural_rule.ok_or_else(|| {
            TimeError::locale()
                .with_message(format!("no plural rule for locale {}.", self.locale))
        })
    }
}

#[cfg(test)]
mod tests {
    use icu_locale::locale;

    use super::{LocaleData, LocaleLookup, PluralCategory, PluralRule, DATE_CONTAINER};
    use crate::error::ErrorKind;

    #[test]
    fn english_strings() {
        let en = LocaleData::english();
        assert_eq!(en.get_string(DATE_CONTAINER, "weekday_1").unwrap(), "Monday");
        assert_eq!(en.get_string(DATE_CONTAINER, "month_short_12").unwrap(), "Dec");
        assert_eq!(en.get_string(DATE_CONTAINER, "ampm_1").unwrap(), "PM");
        assert_eq!(en.get_string("interval", "hour_other").unwrap(), "{0} hrs");
        assert_eq!(en.plural_rule().unwrap(), PluralRule::OneOther);
    }

    #[test]
    fn missing_definitions() {
        let en = LocaleData::english();
        let err = en.get_string(DATE_CONTAINER, "weekday_8").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Locale);
        let err = en.get_string("nowhere", "now").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Locale);

        let unknown = LocaleData::new(locale!("haw"));
        assert_eq!(unknown.plural_rule().unwrap_err().kind(), ErrorKind::Locale);
        let unknown = unknown.with_plural_rule(PluralRule::OneOther);
        assert!(unknown.plural_rule().is_ok());
    }

    #[test]
    fn plural_categories() {
        use PluralCategory::{Few, Many, One, Other, Two, Zero};

        let cases = [
            (PluralRule::OneOther, [Other, One, Other, Other, Other, Other]),
            (PluralRule::ZeroOneOther, [One, One, Other, Other, Other, Other]),
            (PluralRule::EastSlavic, [Many, One, Few, Many, Many, One]),
            (PluralRule::Polish, [Many, One, Few, Many, Many, Many]),
            (PluralRule::WestSlavic, [Other, One, Few, Other, Other, Other]),
            (PluralRule::Arabic, [Zero, One, Two, Many, Many, Other]),
            (PluralRule::Invariant, [Other; 6]),
        ];
        for (rule, expected) in cases {
            for (n, category) in [0, 1, 2, 11, 12, 101].into_iter().zip(expected) {
                assert_eq!(rule.category(n), category, "{rule:?} {n}");
            }
        }
        assert_eq!(PluralRule::EastSlavic.category(22), Few);
        assert_eq!(PluralRule::Polish.category(22), Few);
        assert_eq!(PluralRule::Arabic.category(103), Few);
    }

    #[test]
    fn rules_by_language() {
        assert_eq!(
            PluralRule::for_locale(&locale!("fr-CA")),
            Some(PluralRule::ZeroOneOther)
        );
        assert_eq!(PluralRule::for_locale(&locale!("ru")), Some(PluralRule::EastSlavic));
        assert_eq!(PluralRule::for_locale(&locale!("haw")), None);
    }
}
