//! `Writeable` implementations of the canonical text forms.
//!
//! These are the forms persisted by collaborators: `YYYY-MM-DD HH:MM:SS`,
//! `YYYY-MM-DD`, `HH:MM:SS`, and `±HH:MM` offsets.

use core::fmt::Write;

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

#[derive(Debug, Clone, Copy)]
pub(crate) struct FormattableDate(pub(crate) i32, pub(crate) u8, pub(crate) u8);

impl Writeable for FormattableDate {
    fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        write_padded(self.0.unsigned_abs(), 4, sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.1, sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.2, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::exact(10)
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct FormattableTime {
    pub(crate) hour: u8,
    pub(crate) minute: u8,
    pub(crate) second: u8,
}

impl Writeable for FormattableTime {
    fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        write_padded_u8(self.hour, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.minute, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.second, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::exact(8)
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct FormattableDateTime {
    pub(crate) date: FormattableDate,
    pub(crate) time: FormattableTime,
}

impl Writeable for FormattableDateTime {
    fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        self.date.write_to(sink)?;
        sink.write_char(' ')?;
        self.time.write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.date.writeable_length_hint() + 1 + self.time.writeable_length_hint()
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct FormattableOffset {
    pub(crate) negative: bool,
    pub(crate) hour: u8,
    pub(crate) minute: u8,
}

impl FormattableOffset {
    pub(crate) fn from_minutes(minutes: i64) -> Self {
        let abs = minutes.unsigned_abs();
        Self {
            negative: minutes < 0,
            hour: (abs / 60) as u8,
            minute: (abs % 60) as u8,
        }
    }
}

impl Writeable for FormattableOffset {
    fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        sink.write_char(if self.negative { '-' } else { '+' })?;
        write_padded_u8(self.hour, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.minute, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::exact(6)
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct FormattableDuration {
    pub(crate) negative: bool,
    pub(crate) days: u64,
    pub(crate) time: FormattableTime,
    /// Sub-second ticks, 0..10_000_000.
    pub(crate) fraction: u32,
}

impl Writeable for FormattableDuration {
    fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        if self.negative {
            sink.write_char('-')?;
        }
        if self.days != 0 {
            write!(sink, "{}", self.days)?;
            sink.write_char('.')?;
        }
        self.time.write_to(sink)?;
        if self.fraction != 0 {
            sink.write_char('.')?;
            write_padded(self.fraction, 7, sink)?;
        }
        Ok(())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let sign = usize::from(self.negative);
        let fraction = if self.fraction == 0 { 0 } else { 8 };
        if self.days == 0 {
            return LengthHint::exact(sign + 8 + fraction);
        }
        LengthHint::between(sign + 10 + fraction, sign + 29 + fraction)
    }
}

impl_display_with_writeable!(FormattableDate);
impl_display_with_writeable!(FormattableTime);
impl_display_with_writeable!(FormattableDateTime);
impl_display_with_writeable!(FormattableOffset);
impl_display_with_writeable!(FormattableDuration);

fn write_padded_u8<W: Write + ?Sized>(num: u8, sink: &mut W) -> core::fmt::Result {
    if num < 10 {
        sink.write_char('0')?;
    }
    num.write_to(sink)
}

/// Writes `num` zero padded to at least `width` digits.
pub(crate) fn write_padded<W, N>(num: N, width: usize, sink: &mut W) -> core::fmt::Result
where
    W: Write + ?Sized,
    N: core::fmt::Display,
{
    write!(sink, "{num:0width$}")
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn canonical_forms() {
        let date = FormattableDate(2024, 2, 9);
        let time = FormattableTime {
            hour: 7,
            minute: 5,
            second: 0,
        };
        assert_eq!(date.to_string(), "2024-02-09");
        assert_eq!(time.to_string(), "07:05:00");
        assert_eq!(
            FormattableDateTime { date, time }.to_string(),
            "2024-02-09 07:05:00"
        );
        assert_eq!(FormattableDate(33, 1, 1).to_string(), "0033-01-01");
    }

    #[test]
    fn offsets() {
        assert_eq!(FormattableOffset::from_minutes(570).to_string(), "+09:30");
        assert_eq!(FormattableOffset::from_minutes(-330).to_string(), "-05:30");
        assert_eq!(FormattableOffset::from_minutes(0).to_string(), "+00:00");
    }

    #[test]
    fn durations() {
        let duration = FormattableDuration {
            negative: true,
            days: 2,
            time: FormattableTime {
                hour: 3,
                minute: 0,
                second: 1,
            },
            fraction: 5_000_000,
        };
        assert_eq!(duration.to_string(), "-2.03:00:01.5000000");
    }
}
