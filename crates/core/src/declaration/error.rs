//! Income declaration error types.

use hrpay_shared::types::DeclarationId;
use thiserror::Error;

use super::types::DeclarationState;

/// Errors raised by declaration operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// A sent declaration is frozen.
    #[error("Declaration {0} was already sent")]
    AlreadySent(DeclarationId),

    /// Attempted a state change the workflow does not allow.
    #[error("Invalid declaration transition from {from} to {to}")]
    InvalidTransition {
        /// The current state.
        from: DeclarationState,
        /// The attempted target state.
        to: DeclarationState,
    },

    /// A line failed validation.
    #[error("Declaration line {index} is invalid: {reason}")]
    InvalidLine {
        /// Zero-based position of the line.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },
}

impl DeclarationError {
    /// Returns the stable error code for reports.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadySent(_) => "DECLARATION_SENT",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::InvalidLine { .. } => "INVALID_LINE",
        }
    }
}
