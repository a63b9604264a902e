//! Accounting collaborator interface.
//!
//! Payroll never owns ledger entries: it hands a balanced request to an
//! [`AccountingService`] and keeps the returned reference.

use std::collections::BTreeMap;

use hrpay_shared::types::LedgerEntryId;

use super::entry::LedgerEntryRequest;
use super::error::LedgerError;

/// External accounting service that records ledger entries.
pub trait AccountingService {
    /// Records an entry and returns its reference.
    fn create_entry(&mut self, request: &LedgerEntryRequest) -> Result<LedgerEntryId, LedgerError>;

    /// Removes a previously created entry.
    fn remove_entry(&mut self, id: LedgerEntryId) -> Result<(), LedgerError>;
}

/// In-memory accounting service.
///
/// Rejects empty and unbalanced entries the way a real ledger would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    entries: BTreeMap<LedgerEntryId, LedgerEntryRequest>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a recorded entry.
    #[must_use]
    pub fn get(&self, id: LedgerEntryId) -> Option<&LedgerEntryRequest> {
        self.entries.get(&id)
    }

    /// Iterates over recorded entries ordered by reference.
    pub fn entries(&self) -> impl Iterator<Item = (&LedgerEntryId, &LedgerEntryRequest)> {
        self.entries.iter()
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entry is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AccountingService for InMemoryLedger {
    fn create_entry(&mut self, request: &LedgerEntryRequest) -> Result<LedgerEntryId, LedgerError> {
        if request.postings.is_empty() {
            return Err(LedgerError::EmptyEntry);
        }
        let totals = request.totals();
        if !totals.is_balanced {
            return Err(LedgerError::Unbalanced {
                debit: totals.debit,
                credit: totals.credit,
            });
        }

        let id = LedgerEntryId::new();
        self.entries.insert(id, request.clone());
        Ok(id)
    }

    fn remove_entry(&mut self, id: LedgerEntryId) -> Result<(), LedgerError> {
        self.entries
            .remove(&id)
            .map(|_| ())
            .ok_or(LedgerError::EntryNotFound(id))
    }
}
