//! Core payroll logic for hrpay.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Collaborators (holiday source, contract store, accounting service) are
//! traits injected by the caller.
//!
//! # Modules
//!
//! - `calendar` - Public holidays and business-day counting
//! - `payroll` - Payslip computation, lines and lifecycle
//! - `ledger` - Double-entry postings for completed payslips
//! - `declaration` - Source withholding income declarations

pub mod calendar;
pub mod declaration;
pub mod ledger;
pub mod payroll;
