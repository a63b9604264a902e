//! Calendar error types.

use thiserror::Error;

/// Errors raised by holiday calendar sources.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The backing holiday source could not be queried.
    #[error("Holiday source unavailable: {0}")]
    Unavailable(String),

    /// Moving holidays cannot be derived for this year.
    #[error("Year {0} is outside the supported range 1900..=2099")]
    UnsupportedYear(i32),
}
