//! Ledger error types.

use hrpay_shared::types::LedgerEntryId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors reported by the accounting collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The entry has no postings.
    #[error("Ledger entry has no postings")]
    EmptyEntry,

    /// Debits do not equal credits.
    #[error("Ledger entry is not balanced: debit {debit}, credit {credit}")]
    Unbalanced {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// The referenced entry does not exist.
    #[error("Ledger entry {0} not found")]
    EntryNotFound(LedgerEntryId),

    /// The accounting service refused the request.
    #[error("Accounting service rejected the entry: {0}")]
    Rejected(String),
}

impl LedgerError {
    /// Returns the stable error code for reports.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyEntry => "EMPTY_ENTRY",
            Self::Unbalanced { .. } => "UNBALANCED_ENTRY",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::Rejected(_) => "ENTRY_REJECTED",
        }
    }
}
