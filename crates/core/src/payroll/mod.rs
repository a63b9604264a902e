//! Payslip computation and lifecycle.
//!
//! # Modules
//!
//! - `types` - Contract, employee, payslip and line records
//! - `state` - Draft/done/cancelled state machine
//! - `calculator` - Proration and statutory deductions
//! - `lines` - Itemized payslip line generation
//! - `directory` - Read-only contract and employee lookups
//! - `service` - Batch Compute / Complete / Reset / Cancel
//! - `error` - Payroll error types

pub mod calculator;
pub mod directory;
pub mod error;
pub mod lines;
pub mod service;
pub mod state;
pub mod types;

#[cfg(test)]
mod calculator_props;
#[cfg(test)]
mod service_props;

pub use calculator::{ComputedAmounts, PayrollCalculator};
pub use directory::{Directory, InMemoryDirectory};
pub use error::PayrollError;
pub use lines::LineItemGenerator;
pub use service::{BatchReport, Outcome, PayrollService, RecordOutcome, SkipReason};
pub use state::{PayslipAction, PayslipState, PayslipStateMachine};
pub use types::{
    Contract, Employee, LineCategory, PayrollAccounts, Payslip, PayslipAmounts, PayslipLine,
};
