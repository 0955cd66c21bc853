//! A `TimeZoneProvider` backed by the TZif data compiled into `jiff-tzdb`.
//!
//! `TZif` is laid out by [RFC 8536][rfc8536]. Parsing is delegated to the
//! `tzif` [crate][tzif-crate]; this module only searches the parsed data.
//!
//! [rfc8536]: https://datatracker.ietf.org/doc/html/rfc8536
//! [tzif-crate]: https://docs.rs/tzif/latest/tzif/

use alloc::borrow::Cow;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::cell::RefCell;

use combine::Parser;
use tzif::data::{
    posix::PosixTzString,
    time::Seconds,
    tzif::{DataBlock, LocalTimeTypeRecord, TzifData},
};

use crate::{
    posix,
    provider::{TimeZoneProvider, TimeZoneProviderResult, TimeZoneTransitionInfo, UtcOffsetSeconds},
    TimeZoneProviderError,
};

impl From<LocalTimeTypeRecord> for UtcOffsetSeconds {
    fn from(value: LocalTimeTypeRecord) -> Self {
        Self(value.utoff.0)
    }
}

/// The parsed contents of a single TZif file.
#[derive(Debug, Clone)]
pub struct Tzif {
    data_block2: Option<DataBlock>,
    footer: Option<PosixTzString>,
}

impl From<TzifData> for Tzif {
    fn from(value: TzifData) -> Self {
        Self {
            data_block2: value.data_block2,
            footer: value.footer,
        }
    }
}

impl Tzif {
    pub fn from_bytes(data: &[u8]) -> TimeZoneProviderResult<Self> {
        let Ok((parse_result, _)) = tzif::parse::tzif::tzif().parse(data) else {
            return Err(TimeZoneProviderError::Malformed("ill-formed TZif data"));
        };
        Ok(Self::from(parse_result))
    }

    pub fn posix_tz_string(&self) -> Option<&PosixTzString> {
        self.footer.as_ref()
    }

    pub fn get_data_block2(&self) -> TimeZoneProviderResult<&DataBlock> {
        self.data_block2
            .as_ref()
            .ok_or(TimeZoneProviderError::Malformed("only TZif v2+ is supported"))
    }

    /// Returns the offset in effect at `epoch_seconds`.
    pub fn get(&self, epoch_seconds: i64) -> TimeZoneProviderResult<TimeZoneTransitionInfo> {
        let db = self.get_data_block2()?;
        let transition_at = |idx: usize| TimeZoneTransitionInfo {
            transition_epoch: db.transition_times.get(idx).map(|s| s.0),
            offset: get_local_record(db, idx).into(),
        };

        match db.transition_times.binary_search(&Seconds(epoch_seconds)) {
            Ok(idx) => Ok(transition_at(idx)),
            // Before the first transition the first local time type applies.
            Err(0) => Ok(TimeZoneTransitionInfo::from(UtcOffsetSeconds::from(
                first_local_record(db)?,
            ))),
            Err(idx) if idx >= db.transition_times.len() => match self.posix_tz_string() {
                Some(posix_tz_string) => Ok(posix::resolve_posix_tz_string(
                    posix_tz_string,
                    epoch_seconds,
                )),
                None => Ok(transition_at(idx - 1)),
            },
            Err(idx) => Ok(transition_at(idx - 1)),
        }
    }
}

#[inline]
fn get_local_record(db: &DataBlock, idx: usize) -> LocalTimeTypeRecord {
    // NOTE: Transition type can be empty. If no transition_type exists,
    // then use 0 as the default index of local_time_type_records.
    db.local_time_type_records[db.transition_types.get(idx).copied().unwrap_or(0)]
}

#[inline]
fn first_local_record(db: &DataBlock) -> TimeZoneProviderResult<LocalTimeTypeRecord> {
    db.local_time_type_records
        .first()
        .copied()
        .ok_or(TimeZoneProviderError::Malformed("no local time type records"))
}

/// A provider over the tzdb bundled by `jiff-tzdb`.
///
/// Parsed zones are cached per provider instance.
#[derive(Debug, Default)]
pub struct CompiledTzdbProvider {
    cache: RefCell<BTreeMap<String, Tzif>>,
}

impl CompiledTzdbProvider {
    pub fn get(&self, identifier: &str) -> TimeZoneProviderResult<Tzif> {
        if let Some(tzif) = self.cache.borrow().get(identifier) {
            return Ok(tzif.clone());
        }
        let Some((canonical_name, data)) = jiff_tzdb::get(identifier) else {
            return Err(TimeZoneProviderError::UnknownIdentifier);
        };
        let tzif = Tzif::from_bytes(data)?;

        Ok(self
            .cache
            .borrow_mut()
            .entry(canonical_name.into())
            .or_insert(tzif)
            .clone())
    }
}

impl TimeZoneProvider for CompiledTzdbProvider {
    fn normalize_identifier<'a>(&'a self, ident: &'a str) -> TimeZoneProviderResult<Cow<'a, str>> {
        jiff_tzdb::get(ident)
            .map(|(canonical, _)| Cow::Borrowed(canonical))
            .ok_or(TimeZoneProviderError::UnknownIdentifier)
    }

    fn get_named_tz_offset(
        &self,
        identifier: &str,
        epoch_seconds: i64,
    ) -> TimeZoneProviderResult<TimeZoneTransitionInfo> {
        let canonical = self.normalize_identifier(identifier)?;
        self.get(&canonical)?.get(epoch_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::CompiledTzdbProvider;
    use crate::provider::{TimeZoneProvider, UtcOffsetSeconds};
    use crate::TimeZoneProviderError;

    #[test]
    fn unknown_zone() {
        let provider = CompiledTzdbProvider::default();
        assert_eq!(
            provider.get_named_tz_offset("Mars/Olympus_Mons", 0),
            Err(TimeZoneProviderError::UnknownIdentifier)
        );
        assert!(!provider.check_identifier("Mars/Olympus_Mons"));
    }

    #[test]
    fn normalizes_case() {
        let provider = CompiledTzdbProvider::default();
        assert_eq!(
            provider.normalize_identifier("america/new_york").unwrap(),
            "America/New_York"
        );
    }

    #[test]
    fn new_york_summer_and_winter() {
        let provider = CompiledTzdbProvider::default();
        // 2017-01-15T12:00:00Z
        let winter = provider
            .get_named_tz_offset("America/New_York", 1_484_481_600)
            .unwrap();
        assert_eq!(winter.offset, UtcOffsetSeconds(-5 * 3600));
        // 2017-07-15T12:00:00Z
        let summer = provider
            .get_named_tz_offset("America/New_York", 1_500_120_000)
            .unwrap();
        assert_eq!(summer.offset, UtcOffsetSeconds(-4 * 3600));
    }

    #[test]
    fn far_future_uses_posix_rule() {
        let provider = CompiledTzdbProvider::default();
        // 2080-07-01T12:00:00Z
        let summer = provider
            .get_named_tz_offset("Europe/Berlin", 3_487_060_800)
            .unwrap();
        assert_eq!(summer.offset, UtcOffsetSeconds(2 * 3600));
        // 2080-01-01T12:00:00Z
        let winter = provider
            .get_named_tz_offset("Europe/Berlin", 3_471_336_000)
            .unwrap();
        assert_eq!(winter.offset, UtcOffsetSeconds(3600));
    }

    #[test]
    fn southern_hemisphere() {
        let provider = CompiledTzdbProvider::default();
        // 2080-01-01T12:00:00Z is summer in Sydney.
        let summer = provider
            .get_named_tz_offset("Australia/Sydney", 3_471_336_000)
            .unwrap();
        assert_eq!(summer.offset, UtcOffsetSeconds(11 * 3600));
        // 2080-07-01T12:00:00Z
        let winter = provider
            .get_named_tz_offset("Australia/Sydney", 3_487_060_800)
            .unwrap();
        assert_eq!(winter.offset, UtcOffsetSeconds(10 * 3600));
    }

    #[test]
    fn far_future_standard_only_footer() {
        let provider = CompiledTzdbProvider::default();
        // Footers "JST-9" and "IST-5:30" flip sign into east of UTC offsets.
        let tokyo = provider
            .get_named_tz_offset("Asia/Tokyo", 3_487_060_800)
            .unwrap();
        assert_eq!(tokyo.offset, UtcOffsetSeconds(9 * 3600));
        let kolkata = provider
            .get_named_tz_offset("Asia/Kolkata", 3_487_060_800)
            .unwrap();
        assert_eq!(kolkata.offset, UtcOffsetSeconds(5 * 3600 + 1800));
    }
}
