//! Ledger entry request types.

use chrono::NaiveDate;
use hrpay_shared::types::{AccountId, Currency, JournalId, PartyId, PayslipId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Type of posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit posting (increases expenses, decreases liabilities).
    Debit,
    /// Credit posting (increases liabilities, decreases expenses).
    Credit,
}

/// One debit or credit line of a ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Free-text line description.
    pub description: String,
    /// The account affected by this posting.
    pub account: AccountId,
    /// Debit amount (zero on credit postings).
    pub debit: Decimal,
    /// Credit amount (zero on debit postings).
    pub credit: Decimal,
    /// Counterparty for payables tracking.
    pub party: Option<PartyId>,
}

impl Posting {
    /// Creates a debit posting.
    #[must_use]
    pub fn debit(description: impl Into<String>, account: AccountId, amount: Decimal) -> Self {
        Self {
            description: description.into(),
            account,
            debit: amount,
            credit: Decimal::ZERO,
            party: None,
        }
    }

    /// Creates a credit posting.
    #[must_use]
    pub fn credit(description: impl Into<String>, account: AccountId, amount: Decimal) -> Self {
        Self {
            description: description.into(),
            account,
            debit: Decimal::ZERO,
            credit: amount,
            party: None,
        }
    }

    /// Tags the posting with a counterparty.
    #[must_use]
    pub fn with_party(mut self, party: Option<PartyId>) -> Self {
        self.party = party;
        self
    }

    /// Returns whether this is a debit or a credit posting.
    #[must_use]
    pub fn entry_type(&self) -> EntryType {
        if self.debit > Decimal::ZERO {
            EntryType::Debit
        } else {
            EntryType::Credit
        }
    }

    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// Debit and credit sums of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryTotals {
    /// Total debit amount.
    pub debit: Decimal,
    /// Total credit amount.
    pub credit: Decimal,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(debit: Decimal, credit: Decimal) -> Self {
        Self {
            debit,
            credit,
            is_balanced: debit == credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// A request to create one ledger entry in the accounting service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntryRequest {
    /// Payroll journal to post into.
    pub journal: JournalId,
    /// Accounting date.
    pub date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Currency of every posting.
    pub currency: Currency,
    /// The payslip this entry was built from.
    pub payslip: PayslipId,
    /// Debit and credit lines.
    pub postings: Vec<Posting>,
}

impl LedgerEntryRequest {
    /// Sums the debit and credit sides.
    #[must_use]
    pub fn totals(&self) -> EntryTotals {
        let debit: Decimal = self.postings.iter().map(|p| p.debit).sum();
        let credit: Decimal = self.postings.iter().map(|p| p.credit).sum();
        EntryTotals::new(debit, credit)
    }
}
