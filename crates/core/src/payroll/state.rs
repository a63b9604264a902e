//! Payslip state machine.
//!
//! The valid transitions are:
//! - Draft → Done (complete)
//! - Draft → Cancelled (cancel)
//! - Done → Draft (reset)
//!
//! Anything else is rejected with [`PayrollError::InvalidTransition`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::PayrollError;

/// Payslip workflow state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayslipState {
    /// Editable; amounts may be recomputed.
    #[default]
    Draft,
    /// Completed; a ledger entry exists.
    Done,
    /// Cancelled; terminal.
    Cancelled,
}

impl PayslipState {
    /// Returns the string representation of the state.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a state from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "done" => Some(Self::Done),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns true if the payslip's inputs and amounts may change.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }
}

impl fmt::Display for PayslipState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A requested state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayslipAction {
    /// Finalize the payslip and post it.
    Complete,
    /// Abandon the payslip.
    Cancel,
    /// Reopen a completed payslip.
    Reset,
}

impl PayslipAction {
    /// The state this action leads to.
    #[must_use]
    pub fn target(&self) -> PayslipState {
        match self {
            Self::Complete => PayslipState::Done,
            Self::Cancel => PayslipState::Cancelled,
            Self::Reset => PayslipState::Draft,
        }
    }
}

/// Allowed (from, to) pairs.
const TRANSITIONS: [(PayslipState, PayslipState); 3] = [
    (PayslipState::Draft, PayslipState::Done),
    (PayslipState::Draft, PayslipState::Cancelled),
    (PayslipState::Done, PayslipState::Draft),
];

/// Stateless guard over the payslip transition table.
pub struct PayslipStateMachine;

impl PayslipStateMachine {
    /// Checks a status transition against the table.
    #[must_use]
    pub fn is_valid_transition(from: PayslipState, to: PayslipState) -> bool {
        TRANSITIONS.contains(&(from, to))
    }

    /// States reachable from `from` in one step.
    pub fn allowed_targets(from: PayslipState) -> impl Iterator<Item = PayslipState> {
        TRANSITIONS
            .into_iter()
            .filter(move |(source, _)| *source == from)
            .map(|(_, target)| target)
    }

    /// Validates `action` from `current` and returns the resulting state.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::InvalidTransition` if the pair is not in the table.
    pub fn transition(
        current: PayslipState,
        action: PayslipAction,
    ) -> Result<PayslipState, PayrollError> {
        let target = action.target();
        if Self::is_valid_transition(current, target) {
            Ok(target)
        } else {
            Err(PayrollError::InvalidTransition {
                from: current,
                to: target,
            })
        }
    }

    /// Guards recomputation: only drafts are editable.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::NotEditable` outside draft.
    pub fn ensure_editable(current: PayslipState) -> Result<(), PayrollError> {
        if current.is_editable() {
            Ok(())
        } else {
            Err(PayrollError::NotEditable(current))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_as_str_and_parse() {
        for state in [PayslipState::Draft, PayslipState::Done, PayslipState::Cancelled] {
            assert_eq!(PayslipState::parse(state.as_str()), Some(state));
        }
        assert_eq!(PayslipState::parse("DONE"), Some(PayslipState::Done));
        assert_eq!(PayslipState::parse("posted"), None);
    }

    #[test]
    fn test_default_is_draft() {
        assert_eq!(PayslipState::default(), PayslipState::Draft);
    }

    #[test]
    fn test_complete_from_draft() {
        assert_eq!(
            PayslipStateMachine::transition(PayslipState::Draft, PayslipAction::Complete),
            Ok(PayslipState::Done)
        );
    }

    #[test]
    fn test_cancel_only_from_draft() {
        assert_eq!(
            PayslipStateMachine::transition(PayslipState::Draft, PayslipAction::Cancel),
            Ok(PayslipState::Cancelled)
        );
        assert_eq!(
            PayslipStateMachine::transition(PayslipState::Done, PayslipAction::Cancel),
            Err(PayrollError::InvalidTransition {
                from: PayslipState::Done,
                to: PayslipState::Cancelled,
            })
        );
    }

    #[test]
    fn test_reset_only_from_done() {
        assert_eq!(
            PayslipStateMachine::transition(PayslipState::Done, PayslipAction::Reset),
            Ok(PayslipState::Draft)
        );
        assert!(PayslipStateMachine::transition(PayslipState::Draft, PayslipAction::Reset).is_err());
        assert!(
            PayslipStateMachine::transition(PayslipState::Cancelled, PayslipAction::Reset).is_err()
        );
    }

    #[test]
    fn test_cancelled_is_terminal() {
        assert_eq!(
            PayslipStateMachine::allowed_targets(PayslipState::Cancelled).count(),
            0
        );
    }

    #[test]
    fn test_allowed_targets_from_draft() {
        let targets: Vec<_> = PayslipStateMachine::allowed_targets(PayslipState::Draft).collect();
        assert_eq!(targets, vec![PayslipState::Done, PayslipState::Cancelled]);
    }

    #[test]
    fn test_ensure_editable() {
        assert!(PayslipStateMachine::ensure_editable(PayslipState::Draft).is_ok());
        assert_eq!(
            PayslipStateMachine::ensure_editable(PayslipState::Done),
            Err(PayrollError::NotEditable(PayslipState::Done))
        );
    }
}
