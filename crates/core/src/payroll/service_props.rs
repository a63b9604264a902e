//! Property-based tests for PayrollService batch operations.

use chrono::NaiveDate;
use hrpay_shared::StatutoryRates;
use hrpay_shared::types::{AccountId, EmployeeId, JournalId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::calendar::HolidaySet;
use crate::ledger::InMemoryLedger;
use crate::payroll::directory::InMemoryDirectory;
use crate::payroll::service::{Outcome, PayrollService, SkipReason};
use crate::payroll::state::PayslipState;
use crate::payroll::types::{Contract, PayrollAccounts, Payslip};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn accounts() -> PayrollAccounts {
    PayrollAccounts {
        expense: Some(AccountId::new()),
        payable: Some(AccountId::new()),
        tax: Some(AccountId::new()),
        pension: Some(AccountId::new()),
        employer_pension_expense: Some(AccountId::new()),
    }
}

/// One contract per wage, all posting into the same journal unless `journal` is false.
fn batch(wages: &[Decimal], journal: bool) -> (InMemoryDirectory, Vec<Payslip>) {
    let journal_id = JournalId::new();
    let mut directory = InMemoryDirectory::new();
    let mut payslips = Vec::with_capacity(wages.len());

    for wage in wages {
        let mut contract = Contract::new(EmployeeId::new(), date(2026, 1, 1), *wage);
        contract.journal = journal.then_some(journal_id);
        contract.accounts = accounts();
        payslips.push(Payslip::new(
            contract.employee_id,
            contract.id,
            date(2026, 6, 1),
            date(2026, 6, 30),
        ));
        directory.add_contract(contract);
    }
    (directory, payslips)
}

fn service() -> PayrollService<HolidaySet, InMemoryLedger> {
    PayrollService::new(HolidaySet::new(), InMemoryLedger::new(), StatutoryRates::default())
}

fn arb_wages() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec((100i64..=5_000_000).prop_map(|c| Decimal::new(c, 2)), 1..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Completing a batch twice leaves exactly one entry per payslip.
    #[test]
    fn prop_double_complete_creates_one_entry_each(wages in arb_wages()) {
        let (directory, mut payslips) = batch(&wages, true);
        let mut svc = service();
        svc.compute(&mut payslips, &directory);

        svc.complete(&mut payslips, &directory);
        let refs: Vec<_> = payslips.iter().map(|p| p.ledger_entry).collect();
        svc.complete(&mut payslips, &directory);

        prop_assert_eq!(svc.ledger().len(), wages.len());
        prop_assert_eq!(payslips.iter().map(|p| p.ledger_entry).collect::<Vec<_>>(), refs);
        prop_assert!(payslips.iter().all(|p| p.state == PayslipState::Done));
    }

    /// A ledger entry exists exactly for done payslips, through reset and re-complete.
    #[test]
    fn prop_entry_iff_done(wages in arb_wages(), reset_count in 0usize..8) {
        let (directory, mut payslips) = batch(&wages, true);
        let mut svc = service();
        svc.compute(&mut payslips, &directory);
        svc.complete(&mut payslips, &directory);

        let split = reset_count.min(payslips.len());
        svc.reset_to_draft(&mut payslips[..split]);

        for payslip in &payslips {
            prop_assert_eq!(payslip.ledger_entry.is_some(), payslip.state == PayslipState::Done);
        }
        prop_assert_eq!(svc.ledger().len(), payslips.len() - split);

        svc.complete(&mut payslips, &directory);
        prop_assert_eq!(svc.ledger().len(), payslips.len());
    }

    /// Without a journal, completion changes nothing.
    #[test]
    fn prop_no_journal_leaves_batch_unchanged(wages in arb_wages()) {
        let (directory, mut payslips) = batch(&wages, false);
        let mut svc = service();
        svc.compute(&mut payslips, &directory);
        let before = payslips.clone();

        let report = svc.complete(&mut payslips, &directory);

        prop_assert_eq!(&payslips, &before);
        prop_assert!(svc.ledger().is_empty());
        prop_assert!(report
            .outcomes
            .iter()
            .all(|r| r.outcome == Outcome::Skipped(SkipReason::MissingJournal)));
    }

    /// Recomputing a computed batch changes nothing.
    #[test]
    fn prop_compute_idempotent(wages in arb_wages()) {
        let (directory, mut payslips) = batch(&wages, true);
        let svc = service();
        svc.compute(&mut payslips, &directory);
        let first = payslips.clone();
        svc.compute(&mut payslips, &directory);
        prop_assert_eq!(payslips, first);
    }
}
