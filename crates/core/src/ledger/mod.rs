//! Payroll ledger postings.
//!
//! This module turns a completed payslip into a double-entry request:
//! - Posting and entry request types (debits and credits)
//! - The builder mapping payslip amounts onto contract accounts
//! - The accounting collaborator interface and an in-memory implementation
//! - Error types for ledger operations

pub mod builder;
pub mod entry;
pub mod error;
pub mod service;

#[cfg(test)]
mod builder_props;

pub use builder::LedgerEntryBuilder;
pub use entry::{EntryTotals, EntryType, LedgerEntryRequest, Posting};
pub use error::LedgerError;
pub use service::{AccountingService, InMemoryLedger};
