//! Itemized payslip lines.

use hrpay_shared::StatutoryRates;
use rust_decimal::Decimal;

use super::calculator::{ComputedAmounts, PayrollCalculator};
use super::types::{LineCategory, PayslipLine};

/// Turns computed amounts into at most five display lines of a payslip.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineItemGenerator {
    rates: StatutoryRates,
}

impl LineItemGenerator {
    /// Creates a generator labelling lines with `rates`.
    #[must_use]
    pub const fn new(rates: StatutoryRates) -> Self {
        Self { rates }
    }

    /// Generates the lines in display order, omitting zero amounts.
    ///
    /// Deductions and tax carry negative amounts, so summing basic,
    /// deduction and tax lines yields the net line.
    #[must_use]
    pub fn generate(&self, computed: &ComputedAmounts) -> Vec<PayslipLine> {
        let employee_label = StatutoryRates::percent_label(self.rates.pension_employee);
        let employer_label = StatutoryRates::percent_label(self.rates.pension_employer);
        let tax_label = StatutoryRates::percent_label(self.rates.income_tax);

        let lines = [
            PayslipLine {
                description: format!(
                    "Basic Salary ({}/{} days)",
                    computed.days_to_pay, computed.total_month_business_days
                ),
                code: "BASIC".to_string(),
                category: LineCategory::Basic,
                quantity: Decimal::from(computed.days_to_pay),
                rate: PayrollCalculator::daily_rate(computed),
                amount: computed.gross,
            },
            single(
                format!("Pension (Employee {employee_label})"),
                "PEN_EMP",
                LineCategory::Deduction,
                -computed.pension_employee,
            ),
            single(
                format!("Pension (Employer {employer_label})"),
                "PEN_ER",
                LineCategory::Other,
                computed.pension_employer,
            ),
            single(
                format!("Income Tax {tax_label}"),
                "TAX",
                LineCategory::Tax,
                -computed.income_tax,
            ),
            single("Net Salary".to_string(), "NET", LineCategory::Other, computed.net),
        ];

        lines
            .into_iter()
            .filter(|line| !line.amount.is_zero())
            .collect()
    }
}

fn single(description: String, code: &str, category: LineCategory, amount: Decimal) -> PayslipLine {
    PayslipLine {
        description,
        code: code.to_string(),
        category,
        quantity: Decimal::ONE,
        rate: amount,
        amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn computed() -> ComputedAmounts {
        ComputedAmounts {
            wage: dec!(2000.00),
            total_month_business_days: 20,
            working_days: 20,
            days_to_pay: 10,
            gross: dec!(1000.00),
            pension_employee: dec!(20.00),
            pension_employer: dec!(20.00),
            taxable_base: dec!(980.00),
            income_tax: dec!(196.00),
            net: dec!(784.00),
        }
    }

    #[test]
    fn test_generates_five_lines_in_order() {
        let lines = LineItemGenerator::new(StatutoryRates::default()).generate(&computed());
        let codes: Vec<_> = lines.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, ["BASIC", "PEN_EMP", "PEN_ER", "TAX", "NET"]);
    }

    #[test]
    fn test_basic_line() {
        let lines = LineItemGenerator::new(StatutoryRates::default()).generate(&computed());
        let basic = &lines[0];
        assert_eq!(basic.description, "Basic Salary (10/20 days)");
        assert_eq!(basic.quantity, dec!(10));
        assert_eq!(basic.rate, dec!(100.00));
        assert_eq!(basic.amount, dec!(1000.00));
    }

    #[test]
    fn test_labels_follow_rates() {
        let lines = LineItemGenerator::new(StatutoryRates::default()).generate(&computed());
        assert_eq!(lines[1].description, "Pension (Employee 2%)");
        assert_eq!(lines[2].description, "Pension (Employer 2%)");
        assert_eq!(lines[3].description, "Income Tax 20%");

        let rates = StatutoryRates {
            income_tax: dec!(0.15),
            ..StatutoryRates::default()
        };
        let lines = LineItemGenerator::new(rates).generate(&computed());
        assert_eq!(lines[3].description, "Income Tax 15%");
    }

    #[test]
    fn test_reductions_are_negative_and_sum_to_net() {
        let lines = LineItemGenerator::new(StatutoryRates::default()).generate(&computed());
        assert_eq!(lines[1].amount, dec!(-20.00));
        assert_eq!(lines[3].amount, dec!(-196.00));

        let net: Decimal = lines
            .iter()
            .filter(|l| l.category == LineCategory::Basic || l.category.is_reduction())
            .map(|l| l.amount)
            .sum();
        assert_eq!(net, lines[4].amount);
    }

    #[test]
    fn test_zero_amounts_are_omitted() {
        let without_pension = ComputedAmounts {
            pension_employee: Decimal::ZERO,
            pension_employer: Decimal::ZERO,
            taxable_base: dec!(1000.00),
            income_tax: dec!(200.00),
            net: dec!(800.00),
            ..computed()
        };
        let lines = LineItemGenerator::new(StatutoryRates::default()).generate(&without_pension);
        let codes: Vec<_> = lines.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, ["BASIC", "TAX", "NET"]);

        let nothing = ComputedAmounts {
            days_to_pay: 0,
            gross: Decimal::ZERO,
            taxable_base: Decimal::ZERO,
            income_tax: Decimal::ZERO,
            net: Decimal::ZERO,
            ..without_pension
        };
        assert!(LineItemGenerator::new(StatutoryRates::default()).generate(&nothing).is_empty());
    }

    #[test]
    fn test_single_lines_have_unit_quantity() {
        let lines = LineItemGenerator::new(StatutoryRates::default()).generate(&computed());
        for line in &lines[1..] {
            assert_eq!(line.quantity, Decimal::ONE);
            assert_eq!(line.rate, line.amount);
        }
    }
}
