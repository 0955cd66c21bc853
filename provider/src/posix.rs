//! Resolution of POSIX tz footers for moments past the last TZif transition.

use core::ops::Range;

use tzif::data::posix::{
    DstTransitionInfo, PosixTzString, TimeZoneVariantInfo, TransitionDate, TransitionDay,
};

use crate::{
    provider::{TimeZoneTransitionInfo, UtcOffsetSeconds},
    utils,
};

impl From<&TimeZoneVariantInfo> for UtcOffsetSeconds {
    fn from(value: &TimeZoneVariantInfo) -> Self {
        // The POSIX tz string stores offsets as negative offsets;
        // i.e. "seconds that must be added to reach UTC"
        Self(-value.offset.0)
    }
}

/// Stores the information about DST transitions for a given year
pub(crate) struct DstTransitionInfoForYear {
    pub(crate) dst_start_seconds: i64,
    pub(crate) dst_end_seconds: i64,
    pub(crate) std_offset: UtcOffsetSeconds,
    pub(crate) dst_offset: UtcOffsetSeconds,
}

impl DstTransitionInfoForYear {
    pub(crate) fn compute(
        posix_tz_string: &PosixTzString,
        dst_variant: &DstTransitionInfo,
        year: i32,
    ) -> Self {
        let std_offset = UtcOffsetSeconds::from(&posix_tz_string.std_info);
        let dst_offset = UtcOffsetSeconds::from(&dst_variant.variant_info);
        let dst_start_seconds =
            calculate_transition_seconds_for_year(year, dst_variant.start_date, std_offset);
        let dst_end_seconds =
            calculate_transition_seconds_for_year(year, dst_variant.end_date, dst_offset);
        Self {
            dst_start_seconds,
            dst_end_seconds,
            std_offset,
            dst_offset,
        }
    }

    // Returns the range between offsets in this year
    // This may cover DST or standard time, whichever starts first
    pub(crate) fn transition_range(&self) -> Range<i64> {
        if self.dst_start_seconds > self.dst_end_seconds {
            self.dst_end_seconds..self.dst_start_seconds
        } else {
            self.dst_start_seconds..self.dst_end_seconds
        }
    }

    pub(crate) fn is_dst(&self, seconds: i64) -> bool {
        let in_range = self.transition_range().contains(&seconds);
        // Southern hemisphere rules end DST before they start it, so the
        // range covers standard time instead.
        if self.dst_start_seconds < self.dst_end_seconds {
            in_range
        } else {
            !in_range
        }
    }
}

pub(crate) fn calculate_transition_seconds_for_year(
    year: i32,
    transition_date: TransitionDate,
    offset: UtcOffsetSeconds,
) -> i64 {
    let year_epoch_seconds = i64::from(utils::epoch_days_for_year(year)) * utils::SECONDS_PER_DAY;
    let is_leap = utils::is_leap(year);

    // Zero-indexed day of the year for the transition.
    let days = match transition_date.day {
        TransitionDay::NoLeap(day) if day > 59 => day - 1 + u16::from(is_leap),
        TransitionDay::NoLeap(day) => day - 1,
        TransitionDay::WithLeap(day) => day,
        TransitionDay::Mwd(month, week, day) => {
            let days_to_month = utils::month_to_day((month - 1) as u8, is_leap);
            let days_in_month = u16::from(utils::iso_days_in_month(year, month as u8));

            // Day of week the month starts on.
            let day_offset = (u16::from(utils::epoch_seconds_to_day_of_week(year_epoch_seconds))
                + days_to_month)
                .rem_euclid(7);

            // Zero-indexed day of the month for the `week`th `day`.
            let mut day_of_month = (week - u16::from(day_offset <= day)) * 7 + day - day_offset;

            // Week 5 means "last <weekday> of the month".
            if day_of_month + 1 > days_in_month {
                day_of_month -= 7
            }

            days_to_month + day_of_month
        }
    };

    // Transition time is local, so remove the offset in effect before it.
    year_epoch_seconds + i64::from(days) * utils::SECONDS_PER_DAY + transition_date.time.0
        - offset.0
}

/// Resolves the offset for `seconds` using only the POSIX footer.
pub(crate) fn resolve_posix_tz_string(
    posix_tz_string: &PosixTzString,
    seconds: i64,
) -> TimeZoneTransitionInfo {
    let std_offset = UtcOffsetSeconds::from(&posix_tz_string.std_info);
    let Some(dst_variant) = &posix_tz_string.dst_info else {
        // Regardless of the time, there is one variant and we can return it.
        return TimeZoneTransitionInfo::from(std_offset);
    };

    let year = utils::epoch_seconds_to_year(seconds + std_offset.0);
    let info = DstTransitionInfoForYear::compute(posix_tz_string, dst_variant, year);

    let offset = if info.is_dst(seconds) {
        info.dst_offset
    } else {
        info.std_offset
    };
    let transition_epoch = [info.dst_start_seconds, info.dst_end_seconds]
        .into_iter()
        .filter(|transition| *transition <= seconds)
        .max();

    TimeZoneTransitionInfo {
        transition_epoch,
        offset,
    }
}
