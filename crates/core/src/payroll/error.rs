//! Payroll error types.

use thiserror::Error;

use super::state::PayslipState;
use crate::ledger::LedgerError;

/// Errors reported for a single payslip.
///
/// Batch operations record these per payslip and carry on with the rest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayrollError {
    /// Attempted a transition not in the state table.
    #[error("Invalid payslip transition from {from} to {to}")]
    InvalidTransition {
        /// The current state.
        from: PayslipState,
        /// The attempted target state.
        to: PayslipState,
    },

    /// Attempted to recompute a payslip outside draft.
    #[error("Payslip in state {0} cannot be recomputed")]
    NotEditable(PayslipState),

    /// The accounting collaborator failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl PayrollError {
    /// Returns the stable error code for reports.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotEditable(_) => "NOT_EDITABLE",
            Self::Ledger(err) => err.error_code(),
        }
    }
}
