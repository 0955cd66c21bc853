//! Rendering an `Instant` through a split pattern.

use alloc::{format, string::String};
use core::fmt::Write;

use super::{
    specifier::{Accessor, SpecifierKind},
    unwrap::FormatItem,
};
use crate::{
    formattable::write_padded,
    locale::{LocaleLookup, DATE_CONTAINER},
    time_assert, Instant, TimeError, TimeResult,
};

/// Accessor values of one `Instant`, each computed at most once.
struct AccessorValues<'a> {
    instant: &'a Instant,
    values: [Option<i32>; Accessor::COUNT],
}

impl<'a> AccessorValues<'a> {
    fn new(instant: &'a Instant) -> Self {
        Self {
            instant,
            values: [None; Accessor::COUNT],
        }
    }

    fn get(&mut self, accessor: Accessor) -> i32 {
        let instant = self.instant;
        *self.values[accessor as usize].get_or_insert_with(|| accessor.value(instant))
    }
}

pub(crate) fn render(
    instant: &Instant,
    items: &[FormatItem],
    locale: &impl LocaleLookup,
) -> TimeResult<String> {
    let mut values = AccessorValues::new(instant);
    let mut out = String::new();
    for item in items {
        let specifier = match item {
            FormatItem::Literal(text) => {
                out.push_str(text);
                continue;
            }
            FormatItem::Percent => {
                out.push('%');
                continue;
            }
            FormatItem::Specifier(specifier) => specifier,
        };
        time_assert!(
            !specifier.is_expansion(),
            "%{} reached rendering unexpanded",
            specifier.symbol
        );
        match specifier.kind {
            SpecifierKind::Numeric {
                accessor, width, ..
            } => {
                let value = values.get(accessor);
                match width {
                    Some(width) => write_padded(value, width, &mut out),
                    None => write!(out, "{value}"),
                }
                .map_err(|_| TimeError::assert().with_message("failed to write a number."))?;
            }
            SpecifierKind::TextDomain {
                accessor, domain, ..
            } => {
                let key = format!("{domain}{}", values.get(accessor));
                out.push_str(&locale.get_string(DATE_CONTAINER, &key)?);
            }
            // Rejected above.
            SpecifierKind::ComplexExpansion(_) | SpecifierKind::LocaleLinkedPattern(_) => {}
        }
    }
    Ok(out)
}
