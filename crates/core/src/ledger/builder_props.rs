//! Property-based tests for the payroll ledger entry builder.

use chrono::NaiveDate;
use hrpay_shared::StatutoryRates;
use hrpay_shared::types::{AccountId, EmployeeId, JournalId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::calendar::HolidaySet;
use crate::ledger::builder::LedgerEntryBuilder;
use crate::payroll::calculator::PayrollCalculator;
use crate::payroll::types::{Contract, PayrollAccounts, Payslip};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

fn contract(wage: Decimal, participant: bool) -> Contract {
    let mut contract = Contract::new(EmployeeId::new(), date(1), wage);
    contract.journal = Some(JournalId::new());
    contract.pension_participant = participant;
    contract.accounts = PayrollAccounts {
        expense: Some(AccountId::new()),
        payable: Some(AccountId::new()),
        tax: Some(AccountId::new()),
        pension: Some(AccountId::new()),
        employer_pension_expense: Some(AccountId::new()),
    };
    contract
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// With every account configured, debits equal credits.
    #[test]
    fn prop_fully_configured_entry_balances(
        cents in 1i64..=10_000_000,
        participant in any::<bool>(),
        start in 1u32..=31,
        len in 0u32..31,
    ) {
        let end = (start + len).min(31);
        let contract = contract(Decimal::new(cents, 2), participant);
        let mut payslip = Payslip::new(contract.employee_id, contract.id, date(start), date(end));

        let computed = PayrollCalculator::new(StatutoryRates::default())
            .compute(&payslip, &contract, &HolidaySet::new())
            .unwrap();
        payslip.gross = Some(computed.gross);
        payslip.pension_employee = Some(computed.pension_employee);
        payslip.pension_employer = Some(computed.pension_employer);
        payslip.income_tax = Some(computed.income_tax);
        payslip.net = Some(computed.net);

        match LedgerEntryBuilder::build(&payslip, &contract, None, &StatutoryRates::default()) {
            Some(request) => {
                let totals = request.totals();
                prop_assert!(totals.is_balanced);
                prop_assert_eq!(totals.debit, computed.gross + computed.pension_employer);
                prop_assert!(request.postings.len() <= 5);
                prop_assert!(request.postings.iter().all(|p| !p.signed_amount().is_zero()));
            }
            None => prop_assert_eq!(computed.gross, Decimal::ZERO),
        }
    }
}
