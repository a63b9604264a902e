//! Builds the payroll ledger entry for a completed payslip.
//!
//! ```text
//! Dr Salary Expense                 gross
//! Dr Pension Expense (Employer)     pension_employer
//!     Cr Pension Liability          pension_employee + pension_employer
//!     Cr Income Tax Liability       income_tax
//!     Cr Net Salary Payable         net
//! ```
//!
//! Since `net = gross - pension_employee - income_tax`, both sides total
//! `gross + pension_employer` when every account is configured.

use rust_decimal::Decimal;

use hrpay_shared::StatutoryRates;

use super::entry::{LedgerEntryRequest, Posting};
use crate::payroll::types::{Contract, Employee, Payslip};

/// Stateless builder of payroll ledger entries.
pub struct LedgerEntryBuilder;

impl LedgerEntryBuilder {
    /// Builds the entry request for `payslip` against `contract`'s accounts.
    ///
    /// Each posting is included only when its amount is non-zero and its
    /// account is configured. Returns `None` when the contract has no
    /// journal or no posting survives. Balance is not checked here.
    #[must_use]
    pub fn build(
        payslip: &Payslip,
        contract: &Contract,
        employee: Option<&Employee>,
        rates: &StatutoryRates,
    ) -> Option<LedgerEntryRequest> {
        let journal = contract.journal?;
        let accounts = &contract.accounts;
        let amounts = payslip.amounts();
        let mut postings = Vec::with_capacity(5);

        if let Some(expense) = accounts.expense
            && !amounts.gross.is_zero()
        {
            postings.push(Posting::debit("Salary Expense", expense, amounts.gross));
        }

        if amounts.pension_employer > Decimal::ZERO
            && let Some(account) = accounts.employer_pension_expense.or(accounts.expense)
        {
            postings.push(Posting::debit(
                format!(
                    "Pension Expense (Employer {})",
                    StatutoryRates::percent_label(rates.pension_employer)
                ),
                account,
                amounts.pension_employer,
            ));
        }

        let total_pension = amounts.pension_employee + amounts.pension_employer;
        if total_pension > Decimal::ZERO
            && let Some(pension) = accounts.pension
        {
            postings.push(Posting::credit("Pension Liability", pension, total_pension));
        }

        if let Some(tax) = accounts.tax
            && !amounts.income_tax.is_zero()
        {
            postings.push(Posting::credit("Income Tax Liability", tax, amounts.income_tax));
        }

        if let Some(payable) = accounts.payable
            && !amounts.net.is_zero()
        {
            postings.push(
                Posting::credit("Net Salary Payable", payable, amounts.net)
                    .with_party(employee.and_then(|e| e.party)),
            );
        }

        if postings.is_empty() {
            return None;
        }

        let employee_name = employee.map_or_else(|| payslip.employee_id.to_string(), |e| e.name.clone());
        let period_start = payslip
            .date_from
            .map(|d| d.to_string())
            .unwrap_or_default();

        Some(LedgerEntryRequest {
            journal,
            date: payslip.date_to.or(payslip.date_from).unwrap_or(contract.start_date),
            description: format!("Payroll {employee_name} {period_start}"),
            currency: payslip.currency,
            payslip: payslip.id,
            postings,
        })
    }
}
