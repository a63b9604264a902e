//! Proration and statutory deduction engine.
//!
//! Every amount is rounded to two places, half away from zero, as soon as it
//! is produced, and later steps start from the rounded value:
//!
//! 1. gross = round(wage / month business days * days to pay)
//! 2. pension (employee and employer) = round(gross * pension rate)
//! 3. income tax = round((gross - employee pension) * tax rate)
//! 4. net = gross - employee pension - income tax
//!
//! Changing this order changes results by a tetri here and there.

use chrono::NaiveDate;
use hrpay_shared::StatutoryRates;
use hrpay_shared::types::{ZERO_MONEY, round_money};
use rust_decimal::Decimal;

use super::types::{Contract, Payslip};
use crate::calendar::{HolidaySet, count_business_days, month_bounds};

/// Everything derived for one payslip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputedAmounts {
    /// Monthly wage the computation started from.
    pub wage: Decimal,
    /// Business days in the month containing `date_from`.
    pub total_month_business_days: u32,
    /// Business days in `[date_from, date_to]`.
    pub working_days: u32,
    /// Days actually paid (override or `working_days`).
    pub days_to_pay: u32,
    /// Gross salary.
    pub gross: Decimal,
    /// Employee pension contribution.
    pub pension_employee: Decimal,
    /// Employer pension contribution.
    pub pension_employer: Decimal,
    /// Income tax base after the employee pension.
    pub taxable_base: Decimal,
    /// Income tax withheld.
    pub income_tax: Decimal,
    /// Net salary.
    pub net: Decimal,
}

/// Computes payslip amounts from a contract and a period.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayrollCalculator {
    rates: StatutoryRates,
}

impl PayrollCalculator {
    /// Creates a calculator applying `rates`.
    #[must_use]
    pub const fn new(rates: StatutoryRates) -> Self {
        Self { rates }
    }

    /// The statutory rates in effect.
    #[must_use]
    pub const fn rates(&self) -> &StatutoryRates {
        &self.rates
    }

    /// Computes amounts for `payslip`.
    ///
    /// Returns `None` when either period bound is missing; the payslip is
    /// then skipped rather than failed.
    #[must_use]
    pub fn compute(
        &self,
        payslip: &Payslip,
        contract: &Contract,
        holidays: &HolidaySet,
    ) -> Option<ComputedAmounts> {
        let (date_from, date_to) = (payslip.date_from?, payslip.date_to?);
        Some(self.compute_period(
            contract.wage,
            date_from,
            date_to,
            payslip.paid_days,
            contract.pension_participant,
            holidays,
        ))
    }

    /// Computes amounts for an explicit period.
    #[must_use]
    pub fn compute_period(
        &self,
        wage: Decimal,
        date_from: NaiveDate,
        date_to: NaiveDate,
        paid_days: Option<u32>,
        pension_participant: bool,
        holidays: &HolidaySet,
    ) -> ComputedAmounts {
        let (month_start, month_end) = month_bounds(date_from);
        let total_month_business_days =
            count_business_days(Some(month_start), Some(month_end), holidays);
        let working_days = count_business_days(Some(date_from), Some(date_to), holidays);
        let days_to_pay = paid_days.unwrap_or(working_days);

        let gross = Self::prorate(wage, total_month_business_days, days_to_pay);

        let (pension_employee, pension_employer) = if pension_participant && gross > Decimal::ZERO {
            (
                round_money(gross * self.rates.pension_employee),
                round_money(gross * self.rates.pension_employer),
            )
        } else {
            (ZERO_MONEY, ZERO_MONEY)
        };

        let taxable_base = gross - pension_employee;
        let income_tax = if taxable_base > Decimal::ZERO {
            round_money(taxable_base * self.rates.income_tax)
        } else {
            ZERO_MONEY
        };

        let net = gross - pension_employee - income_tax;

        ComputedAmounts {
            wage,
            total_month_business_days,
            working_days,
            days_to_pay,
            gross,
            pension_employee,
            pension_employer,
            taxable_base,
            income_tax,
            net,
        }
    }

    /// Prorates a monthly wage over `days_to_pay` of `month_days` business days.
    ///
    /// A month without business days pays the full wage for any paid day.
    #[must_use]
    pub fn prorate(wage: Decimal, month_days: u32, days_to_pay: u32) -> Decimal {
        if days_to_pay == 0 {
            return ZERO_MONEY;
        }
        if month_days == 0 {
            return round_money(wage);
        }
        let daily_rate = wage / Decimal::from(month_days);
        round_money(daily_rate * Decimal::from(days_to_pay))
    }

    /// Per-day wage shown on the basic salary line.
    ///
    /// Falls back to `gross` for a month without business days.
    #[must_use]
    pub fn daily_rate(computed: &ComputedAmounts) -> Decimal {
        if computed.total_month_business_days == 0 {
            computed.gross
        } else {
            round_money(computed.wage / Decimal::from(computed.total_month_business_days))
        }
    }
}
