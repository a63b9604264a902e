//! Payroll domain types.
//!
//! Records reference each other by typed ID; the contract and employee
//! stores are read through [`super::Directory`].

use chrono::NaiveDate;
use hrpay_shared::AppError;
use hrpay_shared::types::{
    AccountId, ContractId, Currency, EmployeeId, JournalId, LedgerEntryId, PartyId, PayslipId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::state::PayslipState;

/// An employee as seen by payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier.
    pub id: EmployeeId,
    /// Display name used in ledger descriptions.
    pub name: String,
    /// External party used to track the net salary payable.
    #[serde(default)]
    pub party: Option<PartyId>,
}

/// Accounts a contract posts payroll into.
///
/// Any unset account simply drops the posting that would target it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollAccounts {
    /// Salary expense (debit gross).
    #[serde(default)]
    pub expense: Option<AccountId>,
    /// Salary payable (credit net).
    #[serde(default)]
    pub payable: Option<AccountId>,
    /// Income tax payable.
    #[serde(default)]
    pub tax: Option<AccountId>,
    /// Pension payable (employee and employer shares).
    #[serde(default)]
    pub pension: Option<AccountId>,
    /// Employer pension expense; falls back to `expense` when unset.
    #[serde(default)]
    pub employer_pension_expense: Option<AccountId>,
}

impl PayrollAccounts {
    /// Returns true if all five accounts are configured.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.expense.is_some()
            && self.payable.is_some()
            && self.tax.is_some()
            && self.pension.is_some()
            && self.employer_pension_expense.is_some()
    }
}

/// Employment contract. Read-only to payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Unique identifier.
    pub id: ContractId,
    /// Employee bound by the contract.
    pub employee_id: EmployeeId,
    /// First day of employment.
    pub start_date: NaiveDate,
    /// Last day of employment, if fixed.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Monthly wage with two fractional digits.
    pub wage: Decimal,
    /// Wage currency.
    #[serde(default)]
    pub currency: Currency,
    /// Payroll journal; completion is skipped without one.
    #[serde(default)]
    pub journal: Option<JournalId>,
    /// Posting accounts.
    #[serde(default)]
    pub accounts: PayrollAccounts,
    /// Whether the employee participates in the pension scheme.
    #[serde(default = "default_true")]
    pub pension_participant: bool,
    /// Inactive contracts are kept for history only.
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Contract {
    /// Creates an active pension-participating contract without journal or accounts.
    #[must_use]
    pub fn new(employee_id: EmployeeId, start_date: NaiveDate, wage: Decimal) -> Self {
        Self {
            id: ContractId::new(),
            employee_id,
            start_date,
            end_date: None,
            wage,
            currency: Currency::default(),
            journal: None,
            accounts: PayrollAccounts::default(),
            pension_participant: true,
            active: true,
        }
    }

    /// Checks the structural invariants callers must uphold.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a non-positive wage or an end date
    /// before the start date.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.wage <= Decimal::ZERO {
            return Err(AppError::Validation(format!(
                "contract {} wage must be positive, got {}",
                self.id, self.wage
            )));
        }
        if self.end_date.is_some_and(|end| end < self.start_date) {
            return Err(AppError::Validation(format!(
                "contract {} ends before it starts",
                self.id
            )));
        }
        Ok(())
    }
}

/// Semantic category of a payslip line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCategory {
    /// Basic salary.
    Basic,
    /// Allowance paid on top of salary.
    Allowance,
    /// Deduction from gross (negative amount).
    Deduction,
    /// Tax withheld (negative amount).
    Tax,
    /// Informational or summary line.
    Other,
}

impl LineCategory {
    /// Returns true if lines of this category reduce the net amount.
    #[must_use]
    pub fn is_reduction(&self) -> bool {
        matches!(self, Self::Deduction | Self::Tax)
    }
}

/// One itemized payslip row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipLine {
    /// Human-readable description.
    pub description: String,
    /// Short machine code, e.g. `BASIC`.
    pub code: String,
    /// Line category.
    pub category: LineCategory,
    /// Quantity (days for the basic line, 1 otherwise).
    pub quantity: Decimal,
    /// Unit rate.
    pub rate: Decimal,
    /// Signed amount; deductions and taxes are negative.
    pub amount: Decimal,
}

/// One pay computation for one employee over `[date_from, date_to]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Unique identifier.
    #[serde(default)]
    pub id: PayslipId,
    /// Employee paid by this payslip.
    pub employee_id: EmployeeId,
    /// Contract the wage comes from.
    #[serde(default)]
    pub contract_id: Option<ContractId>,
    /// First day of the period.
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    /// Last day of the period.
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    /// Business days in the period (computed).
    #[serde(default)]
    pub working_days: Option<u32>,
    /// Days to pay; defaults to `working_days` on first computation.
    #[serde(default)]
    pub paid_days: Option<u32>,
    /// Gross salary.
    #[serde(default)]
    pub gross: Option<Decimal>,
    /// Employee pension contribution.
    #[serde(default)]
    pub pension_employee: Option<Decimal>,
    /// Employer pension contribution.
    #[serde(default)]
    pub pension_employer: Option<Decimal>,
    /// Income tax withheld.
    #[serde(default)]
    pub income_tax: Option<Decimal>,
    /// Net salary.
    #[serde(default)]
    pub net: Option<Decimal>,
    /// Payslip currency, taken from the contract on computation.
    #[serde(default)]
    pub currency: Currency,
    /// Workflow state.
    #[serde(default)]
    pub state: PayslipState,
    /// Itemized lines, regenerated on every computation.
    #[serde(default)]
    pub lines: Vec<PayslipLine>,
    /// Ledger entry created on completion.
    #[serde(default)]
    pub ledger_entry: Option<LedgerEntryId>,
}

/// Monetary fields of a payslip with missing values read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayslipAmounts {
    /// Gross salary.
    pub gross: Decimal,
    /// Employee pension contribution.
    pub pension_employee: Decimal,
    /// Employer pension contribution.
    pub pension_employer: Decimal,
    /// Income tax withheld.
    pub income_tax: Decimal,
    /// Net salary.
    pub net: Decimal,
}

impl Payslip {
    /// Creates a draft payslip for a contract and period.
    #[must_use]
    pub fn new(
        employee_id: EmployeeId,
        contract_id: ContractId,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Self {
        Self {
            id: PayslipId::new(),
            employee_id,
            contract_id: Some(contract_id),
            date_from: Some(date_from),
            date_to: Some(date_to),
            working_days: None,
            paid_days: None,
            gross: None,
            pension_employee: None,
            pension_employer: None,
            income_tax: None,
            net: None,
            currency: Currency::default(),
            state: PayslipState::Draft,
            lines: Vec::new(),
            ledger_entry: None,
        }
    }

    /// Returns the monetary fields, reading unset values as zero.
    #[must_use]
    pub fn amounts(&self) -> PayslipAmounts {
        PayslipAmounts {
            gross: self.gross.unwrap_or_default(),
            pension_employee: self.pension_employee.unwrap_or_default(),
            pension_employer: self.pension_employer.unwrap_or_default(),
            income_tax: self.income_tax.unwrap_or_default(),
            net: self.net.unwrap_or_default(),
        }
    }

    /// Returns true once a computation has stored amounts.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        self.gross.is_some()
    }

    /// Checks the period bounds.
    ///
    /// Missing dates are allowed (the payslip is skipped on computation).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when `date_from > date_to`.
    pub fn validate(&self) -> Result<(), AppError> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to)
            && from > to
        {
            return Err(AppError::Validation(format!(
                "payslip {} period starts {from} after it ends {to}",
                self.id
            )));
        }
        Ok(())
    }
}
