//! Property-based tests for business-day counting.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use proptest::prelude::*;

use crate::calendar::{HolidaySet, count_business_days};

/// Any day in 2024..2030.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..2555).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Days::new(offset)
    })
}

/// A period of up to 60 days and an offset picking one of its days.
fn arb_period_with_day() -> impl Strategy<Value = (NaiveDate, NaiveDate, NaiveDate)> {
    (arb_date(), 0u64..60)
        .prop_flat_map(|(start, len)| (Just(start), Just(len), 0..=len))
        .prop_map(|(start, len, pick)| (start, start + Days::new(len), start + Days::new(pick)))
}

fn arb_holidays() -> impl Strategy<Value = HolidaySet> {
    prop::collection::hash_set(arb_date(), 0..30)
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Declaring one more in-range weekday a holiday removes exactly one day.
    #[test]
    fn prop_new_weekday_holiday_subtracts_one(
        (from, to, day) in arb_period_with_day(),
        holidays in arb_holidays(),
    ) {
        prop_assume!(!is_weekend(day) && !holidays.contains(&day));

        let before = count_business_days(Some(from), Some(to), &holidays);
        let mut more = holidays.clone();
        more.insert(day);
        let after = count_business_days(Some(from), Some(to), &more);

        prop_assert_eq!(after + 1, before);
    }

    /// Weekend and out-of-range holidays never change the count.
    #[test]
    fn prop_irrelevant_holiday_changes_nothing(
        (from, to, _) in arb_period_with_day(),
        holidays in arb_holidays(),
        extra in arb_date(),
    ) {
        prop_assume!(is_weekend(extra) || extra < from || extra > to);

        let before = count_business_days(Some(from), Some(to), &holidays);
        let mut more = holidays.clone();
        more.insert(extra);

        prop_assert_eq!(count_business_days(Some(from), Some(to), &more), before);
    }
}
