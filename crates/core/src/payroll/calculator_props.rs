//! Property-based tests for the payroll calculator.

use chrono::{Days, NaiveDate};
use hrpay_shared::StatutoryRates;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::calendar::{HolidaySet, count_business_days};
use crate::payroll::calculator::PayrollCalculator;

/// Monthly wages from 1.00 to 50 000.00.
fn arb_wage() -> impl Strategy<Value = Decimal> {
    (100i64..=5_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Any day in 2024..2030.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..2555).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Days::new(offset)
    })
}

/// A period of up to 40 days starting at an arbitrary date.
fn arb_period() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (arb_date(), 0u64..40).prop_map(|(start, len)| (start, start + Days::new(len)))
}

/// A handful of holiday dates near 2024..2030.
fn arb_holidays() -> impl Strategy<Value = HolidaySet> {
    prop::collection::hash_set(arb_date(), 0..30)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Gross never decreases as more days are paid.
    #[test]
    fn prop_gross_monotonic_in_paid_days(
        wage in arb_wage(),
        (from, to) in arb_period(),
        holidays in arb_holidays(),
        fewer in 0u32..25,
        extra in 0u32..10,
    ) {
        let calc = PayrollCalculator::new(StatutoryRates::default());
        let low = calc.compute_period(wage, from, to, Some(fewer), true, &holidays);
        let high = calc.compute_period(wage, from, to, Some(fewer + extra), true, &holidays);
        prop_assert!(low.gross <= high.gross);
    }

    /// Net plus withholdings always equals gross.
    #[test]
    fn prop_net_reconciles_with_gross(
        wage in arb_wage(),
        (from, to) in arb_period(),
        holidays in arb_holidays(),
        participant in any::<bool>(),
    ) {
        let calc = PayrollCalculator::new(StatutoryRates::default());
        let result = calc.compute_period(wage, from, to, None, participant, &holidays);

        prop_assert_eq!(result.net + result.pension_employee + result.income_tax, result.gross);
        prop_assert!(result.net >= Decimal::ZERO);
        prop_assert!(result.income_tax >= Decimal::ZERO);
        if !participant {
            prop_assert_eq!(result.pension_employee, Decimal::ZERO);
            prop_assert_eq!(result.pension_employer, Decimal::ZERO);
        }
    }

    /// Every amount has at most two decimal places.
    #[test]
    fn prop_amounts_are_rounded_to_cents(
        wage in arb_wage(),
        (from, to) in arb_period(),
        holidays in arb_holidays(),
    ) {
        let calc = PayrollCalculator::new(StatutoryRates::default());
        let result = calc.compute_period(wage, from, to, None, true, &holidays);

        for amount in [
            result.gross,
            result.pension_employee,
            result.pension_employer,
            result.income_tax,
            result.net,
        ] {
            prop_assert_eq!(amount, amount.round_dp(2));
        }
    }

    /// Same inputs, same outputs.
    #[test]
    fn prop_compute_is_deterministic(
        wage in arb_wage(),
        (from, to) in arb_period(),
        holidays in arb_holidays(),
        paid in prop::option::of(0u32..25),
    ) {
        let calc = PayrollCalculator::new(StatutoryRates::default());
        prop_assert_eq!(
            calc.compute_period(wage, from, to, paid, true, &holidays),
            calc.compute_period(wage, from, to, paid, true, &holidays)
        );
    }

    /// Working days never exceed the days in the range, and holidays only lower the count.
    #[test]
    fn prop_business_days_bounded(
        (from, to) in arb_period(),
        holidays in arb_holidays(),
    ) {
        let plain = count_business_days(Some(from), Some(to), &HolidaySet::new());
        let with_holidays = count_business_days(Some(from), Some(to), &holidays);
        let span = u32::try_from((to - from).num_days() + 1).unwrap();

        prop_assert!(plain <= span);
        prop_assert!(with_holidays <= plain);
    }

    /// Any seven consecutive days hold exactly five weekdays.
    #[test]
    fn prop_full_week_has_five_business_days(start in arb_date()) {
        let end = start + Days::new(6);
        prop_assert_eq!(count_business_days(Some(start), Some(end), &HolidaySet::new()), 5);
    }
}
