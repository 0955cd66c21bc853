use proptest::prelude::*;
use ticktime::{
    calendar,
    format::{FormatContext, DEFAULT_FORMAT},
    locale::LocaleData,
    Instant, MAX_TICKS,
};

fn components() -> impl Strategy<Value = (i32, u8, u8, u8, u8, u8)> {
    // Day 28 exists in every month.
    (1i32..=9999, 1u8..=12, 1u8..=28, 0u8..24, 0u8..60, 0u8..60)
}

/// Dates on the 29th, 30th or 31st of a month that has that day.
fn late_in_month() -> impl Strategy<Value = (i32, u8, u8)> {
    (1i32..=9999, 1u8..=12, 29u8..=31).prop_filter("day exists", |&(y, m, d)| {
        calendar::days_in_month(y, m).is_ok_and(|last| d <= last)
    })
}

fn instant() -> impl Strategy<Value = Instant> {
    (0..=MAX_TICKS).prop_map(|ticks| Instant::from_utc_ticks(ticks).unwrap())
}

proptest! {
    #[test]
    fn format_then_parse_round_trips((y, m, d, h, mi, s) in components()) {
        let english = LocaleData::english();
        let mut context = FormatContext::new();
        let original = Instant::try_new_utc(y, m, d, h, mi, s).unwrap();

        let text = context.format(&original, DEFAULT_FORMAT, &english).unwrap();
        let parsed = context.parse(&text, Some(DEFAULT_FORMAT), &english, &original).unwrap();
        prop_assert_eq!(parsed, original);
    }

    #[test]
    fn display_matches_components((y, m, d, h, mi, s) in components()) {
        let instant = Instant::try_new_utc(y, m, d, h, mi, s).unwrap();
        prop_assert_eq!(
            (instant.year(), instant.month(), instant.day()),
            (y, m, d)
        );
        prop_assert_eq!(
            instant.to_string(),
            format!("{y:04}-{m:02}-{d:02} {h:02}:{mi:02}:{s:02}")
        );
    }

    #[test]
    fn subtract_then_add_is_identity(a in instant(), b in instant()) {
        let between = a.subtract(&b);
        prop_assert!(b.add_interval(&between).unwrap().equals(&a));
    }

    #[test]
    fn ordering_follows_ticks(a in instant(), b in instant()) {
        prop_assert_eq!(a.compare(&b), a.ticks().cmp(&b.ticks()));
        prop_assert_eq!(a.compare(&b), b.compare(&a).reverse());
    }

    #[test]
    fn month_arithmetic_keeps_early_days((y, m, d, h, mi, s) in components(), months in -1200i64..=1200) {
        let start = Instant::try_new_utc(y, m, d, h, mi, s).unwrap();
        if let Ok(moved) = start.add_months(months) {
            prop_assert_eq!(moved.day(), d);
            prop_assert_eq!(moved.time_of_day(), start.time_of_day());
            let month_delta = (i64::from(moved.year()) - i64::from(y)) * 12
                + i64::from(moved.month())
                - i64::from(m);
            prop_assert_eq!(month_delta, months);
        }
    }

    #[test]
    fn month_arithmetic_clamps_late_days((y, m, d) in late_in_month(), months in -1200i64..=1200) {
        let start = Instant::try_new_utc(y, m, d, 6, 30, 0).unwrap();
        if let Ok(moved) = start.add_months(months) {
            let last = calendar::days_in_month(moved.year(), moved.month()).unwrap();
            prop_assert_eq!(moved.day(), d.min(last));
            prop_assert_eq!(moved.time_of_day(), start.time_of_day());
            let month_delta = (i64::from(moved.year()) - i64::from(y)) * 12
                + i64::from(moved.month())
                - i64::from(m);
            prop_assert_eq!(month_delta, months);
        }
    }
}
