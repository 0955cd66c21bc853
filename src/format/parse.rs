//! Reading an `Instant` back out of text.

use alloc::{format, vec::Vec};
use core::ops::RangeInclusive;

use super::{
    specifier::{FieldRole, Specifier, SpecifierKind},
    unwrap::FormatItem,
};
use crate::{
    locale::{LocaleLookup, DATE_CONTAINER},
    time_assert, Instant, TimeError, TimeResult,
};

/// A word the input must contain at some position.
enum Token<'a> {
    Literal(&'a str),
    Field(&'static Specifier),
}

#[inline]
fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Splits `text` into maximal runs of word characters.
fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|ch: char| !is_word_char(ch))
        .filter(|word| !word.is_empty())
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

fn tokens(items: &[FormatItem]) -> Vec<Token<'_>> {
    let mut tokens = Vec::with_capacity(items.len());
    for item in items {
        match item {
            FormatItem::Literal(text) => tokens.extend(words(text).map(Token::Literal)),
            FormatItem::Specifier(specifier) => tokens.push(Token::Field(specifier)),
            FormatItem::Percent => {}
        }
    }
    tokens
}

/// The fields recognized in the input.
#[derive(Debug, Default)]
struct ParsedFields {
    year: Option<i32>,
    two_digit_year: Option<i32>,
    month: Option<i32>,
    day: Option<i32>,
    hour: Option<i32>,
    hour12: Option<i32>,
    minute: Option<i32>,
    second: Option<i32>,
    meridiem: Option<i32>,
}

impl ParsedFields {
    fn set(&mut self, role: FieldRole, value: i32) {
        let field = match role {
            FieldRole::Year => &mut self.year,
            FieldRole::TwoDigitYear => &mut self.two_digit_year,
            FieldRole::Month => &mut self.month,
            FieldRole::Day => &mut self.day,
            FieldRole::Hour => &mut self.hour,
            FieldRole::Hour12 => &mut self.hour12,
            FieldRole::Minute => &mut self.minute,
            FieldRole::Second => &mut self.second,
            FieldRole::Meridiem => &mut self.meridiem,
            FieldRole::Weekday | FieldRole::None => return,
        };
        *field = Some(value);
    }

    /// Builds the `Instant`, taking missing fields from `reference`.
    fn assemble(self, reference: &Instant) -> TimeResult<Instant> {
        let year = match (self.year, self.two_digit_year) {
            (Some(year), _) => year,
            (None, Some(short)) => reference.year() / 100 * 100 + short,
            (None, None) => reference.year(),
        };

        let mut hour = self
            .hour12
            .or(self.hour)
            .unwrap_or_else(|| i32::from(reference.hour()));
        match self.meridiem {
            Some(1) if hour < 12 => hour += 12,
            Some(0) if hour == 12 => hour = 0,
            _ => {}
        }

        let month = self.month.unwrap_or_else(|| i32::from(reference.month()));
        let day = self.day.unwrap_or_else(|| i32::from(reference.day()));
        let minute = self.minute.unwrap_or_else(|| i32::from(reference.minute()));
        let second = self.second.unwrap_or_else(|| i32::from(reference.second()));

        // The reference zone was checked when the reference was built.
        Instant::from_components(
            year,
            to_u8(month)?,
            to_u8(day)?,
            to_u8(hour)?,
            to_u8(minute)?,
            to_u8(second)?,
            reference.timezone().clone(),
        )
    }
}

#[inline]
fn to_u8(value: i32) -> TimeResult<u8> {
    u8::try_from(value).map_err(|_| TimeError::range().with_message("field is out of range."))
}

fn parse_number(word: &str, bounds: &RangeInclusive<i32>) -> TimeResult<i32> {
    if !word.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeError::parse().with_message("expected a number."));
    }
    let value = word
        .parse::<i32>()
        .map_err(|_| TimeError::parse().with_message("number is too long."))?;
    if !bounds.contains(&value) {
        return Err(TimeError::parse().with_message("number is out of bounds for its field."));
    }
    Ok(value)
}

fn match_domain(
    word: &str,
    domain: &str,
    bounds: &RangeInclusive<i32>,
    locale: &impl LocaleLookup,
) -> TimeResult<i32> {
    for index in bounds.clone() {
        let name = locale.get_string(DATE_CONTAINER, &format!("{domain}{index}"))?;
        if eq_ignore_case(&name, word) {
            return Ok(index);
        }
    }
    Err(TimeError::parse().with_message("text does not name a known value."))
}

pub(crate) fn parse(
    text: &str,
    items: &[FormatItem],
    locale: &impl LocaleLookup,
    reference: &Instant,
) -> TimeResult<Instant> {
    let expected = tokens(items);
    let input: Vec<&str> = words(text).collect();
    if input.len() != expected.len() {
        return Err(TimeError::parse().with_message("input does not match the format."));
    }

    let mut fields = ParsedFields::default();
    for (token, word) in expected.iter().zip(input) {
        let specifier = match token {
            Token::Literal(literal) if eq_ignore_case(literal, word) => continue,
            Token::Literal(_) => {
                return Err(TimeError::parse().with_message("input does not match the format."))
            }
            Token::Field(specifier) => specifier,
        };
        time_assert!(
            !specifier.is_expansion(),
            "%{} reached parsing unexpanded",
            specifier.symbol
        );
        match &specifier.kind {
            SpecifierKind::Numeric { bounds, role, .. } => {
                fields.set(*role, parse_number(word, bounds)?);
            }
            SpecifierKind::TextDomain {
                domain,
                bounds,
                role,
                ..
            } => {
                fields.set(*role, match_domain(word, domain, bounds, locale)?);
            }
            // Rejected above.
            SpecifierKind::ComplexExpansion(_) | SpecifierKind::LocaleLinkedPattern(_) => {}
        }
    }
    fields.assemble(reference)
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{eq_ignore_case, words};

    #[test]
    fn word_runs() {
        let found: Vec<&str> = words("2024-01-02  10:3_0, Ünïcode!").collect();
        assert_eq!(found, ["2024", "01", "02", "10", "3_0", "Ünïcode"]);
        assert_eq!(words(" - :: ").count(), 0);
    }

    #[test]
    fn case_insensitive_words() {
        assert!(eq_ignore_case("MARCH", "march"));
        assert!(eq_ignore_case("ÉTÉ", "été"));
        assert!(!eq_ignore_case("Mar", "March"));
    }
}
