//! Source withholding income declarations.
//!
//! A declaration lists payments made to recipients during a period together
//! with the income tax withheld on each. Computing it fills every line's
//! tax and the totals; sending it only freezes the record, transmission to
//! the tax authority happens elsewhere.

pub mod error;
pub mod types;

pub use error::DeclarationError;
pub use types::{DeclarationLine, DeclarationState, IncomeDeclaration};
