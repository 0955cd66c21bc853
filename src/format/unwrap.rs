//! Pattern expansion and splitting.

use alloc::{borrow::Cow, string::String, vec::Vec};
use core::str::Chars;

use super::specifier::{lookup, Specifier, SpecifierKind};
use crate::{
    locale::{LocaleLookup, DATE_CONTAINER},
    TimeError, TimeResult,
};

/// A piece of an expanded pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FormatItem {
    Literal(String),
    Specifier(&'static Specifier),
    /// `%%`
    Percent,
}

/// Expands complex and locale linked specifiers until none are left.
///
/// Expansions may nest at most `max_depth` levels deep, and a specifier may
/// not appear inside its own expansion.
pub(crate) fn unwrap_pattern(
    pattern: &str,
    locale: &impl LocaleLookup,
    max_depth: usize,
) -> TimeResult<String> {
    let mut out = String::with_capacity(pattern.len());
    let mut active = Vec::new();
    expand_into(pattern, locale, max_depth, &mut active, &mut out).inspect_err(|_err| {
        #[cfg(feature = "log")]
        log::error!("failed to unwrap format pattern {pattern:?}: {_err}");
    })?;
    Ok(out)
}

/// Writes `pattern` to `out`, expanding specifiers in place.
///
/// `active` holds the symbols whose expansions are being written.
fn expand_into(
    pattern: &str,
    locale: &impl LocaleLookup,
    max_depth: usize,
    active: &mut Vec<char>,
    out: &mut String,
) -> TimeResult<()> {
    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        let specifier = match next_symbol(&mut chars) {
            Symbol::Percent => {
                out.push_str("%%");
                continue;
            }
            Symbol::Unknown(symbol) => {
                out.push('%');
                out.push(symbol);
                continue;
            }
            Symbol::End => {
                out.push('%');
                continue;
            }
            Symbol::Known(specifier) => specifier,
        };
        let sub = match specifier.kind {
            SpecifierKind::ComplexExpansion(sub) => Cow::Borrowed(sub),
            SpecifierKind::LocaleLinkedPattern(key) => {
                locale.get_string(DATE_CONTAINER, key)?
            }
            _ => {
                out.push('%');
                out.push(specifier.symbol);
                continue;
            }
        };
        if active.contains(&specifier.symbol) {
            return Err(TimeError::syntax()
                .with_message("format pattern expansion refers back to itself."));
        }
        if active.len() >= max_depth {
            return Err(TimeError::syntax()
                .with_message("format pattern expansion nests too deeply."));
        }
        active.push(specifier.symbol);
        expand_into(&sub, locale, max_depth, active, out)?;
        active.pop();
    }
    Ok(())
}

/// Splits an expanded pattern into items.
///
/// Unknown specifiers and a trailing `%` are kept as literal text.
pub(crate) fn split_items(pattern: &str) -> Vec<FormatItem> {
    let mut items = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            literal.push(ch);
            continue;
        }
        let item = match next_symbol(&mut chars) {
            Symbol::Percent => FormatItem::Percent,
            Symbol::Known(specifier) => FormatItem::Specifier(specifier),
            Symbol::Unknown(symbol) => {
                literal.push('%');
                literal.push(symbol);
                continue;
            }
            Symbol::End => {
                literal.push('%');
                continue;
            }
        };
        if !literal.is_empty() {
            items.push(FormatItem::Literal(core::mem::take(&mut literal)));
        }
        items.push(item);
    }
    if !literal.is_empty() {
        items.push(FormatItem::Literal(literal));
    }
    items
}

enum Symbol {
    Percent,
    Known(&'static Specifier),
    Unknown(char),
    End,
}

#[inline]
fn next_symbol(chars: &mut Chars<'_>) -> Symbol {
    match chars.next() {
        Some('%') => Symbol::Percent,
        Some(symbol) => lookup(symbol).map_or(Symbol::Unknown(symbol), Symbol::Known),
        None => Symbol::End,
    }
}
