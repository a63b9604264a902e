//! Declaration records and their computation.

use std::fmt;

use chrono::NaiveDate;
use hrpay_shared::types::{DeclarationId, round_money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::DeclarationError;

/// Maximum length of a recipient tax identification number.
pub const TIN_MAX_LEN: usize = 11;

/// Residency code of Georgia.
pub const DEFAULT_RESIDENCY_CODE: &str = "268";

/// Declaration workflow state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationState {
    /// Lines are being collected.
    #[default]
    Draft,
    /// Taxes and totals are filled in.
    Computed,
    /// Handed over to the tax authority; frozen.
    Sent,
}

impl fmt::Display for DeclarationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::Computed => "computed",
            Self::Sent => "sent",
        };
        f.write_str(s)
    }
}

fn default_residency_code() -> String {
    DEFAULT_RESIDENCY_CODE.to_string()
}

fn default_tax_rate() -> Decimal {
    Decimal::new(2000, 2)
}

/// One payment to one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationLine {
    /// Personal or company identification number.
    pub tin: String,
    /// First name, or legal form for companies.
    pub first_name: String,
    /// Last name, or company name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Three-digit residency code.
    #[serde(default = "default_residency_code")]
    pub residency_code: String,
    /// Two-character recipient category.
    #[serde(default)]
    pub recipient_category: Option<String>,
    /// Two-character payment type.
    #[serde(default)]
    pub payment_type: Option<String>,
    /// Amount paid out.
    pub amount: Decimal,
    /// Relief deducted from the amount before tax.
    #[serde(default)]
    pub other_relief: Option<Decimal>,
    /// Day the payment was made.
    pub payment_date: NaiveDate,
    /// Withholding rate in percent, e.g. `20.00`.
    #[serde(default = "default_tax_rate")]
    pub tax_rate: Decimal,
    /// Tax exempted under a double taxation treaty.
    #[serde(default)]
    pub treaty_exempt_tax: Option<Decimal>,
    /// Tax already paid abroad and credited.
    #[serde(default)]
    pub foreign_tax_credit: Option<Decimal>,
    /// Withheld tax, filled by [`IncomeDeclaration::compute`].
    #[serde(default)]
    pub tax_amount: Option<Decimal>,
}

impl DeclarationLine {
    /// Creates a line with the default residency and rate.
    #[must_use]
    pub fn new(
        tin: impl Into<String>,
        first_name: impl Into<String>,
        amount: Decimal,
        payment_date: NaiveDate,
    ) -> Self {
        Self {
            tin: tin.into(),
            first_name: first_name.into(),
            last_name: None,
            address: None,
            residency_code: default_residency_code(),
            recipient_category: None,
            payment_type: None,
            amount,
            other_relief: None,
            payment_date,
            tax_rate: default_tax_rate(),
            treaty_exempt_tax: None,
            foreign_tax_credit: None,
            tax_amount: None,
        }
    }

    /// Withholding tax for this line.
    ///
    /// The base is the amount less other relief, floored at zero. Treaty
    /// exemptions and foreign credits reduce the tax, which never goes
    /// below zero.
    #[must_use]
    pub fn calculate_tax(&self) -> Decimal {
        let relief = self.other_relief.unwrap_or_default();
        let treaty = self.treaty_exempt_tax.unwrap_or_default();
        let foreign = self.foreign_tax_credit.unwrap_or_default();

        let base = (self.amount - relief).max(Decimal::ZERO);
        let tax = base * self.tax_rate / Decimal::ONE_HUNDRED - treaty - foreign;
        round_money(tax.max(Decimal::ZERO))
    }

    fn validate(&self) -> Result<(), String> {
        let tin = self.tin.trim();
        if tin.is_empty() {
            return Err("tin is required".to_string());
        }
        if tin.chars().count() > TIN_MAX_LEN {
            return Err(format!("tin exceeds {TIN_MAX_LEN} characters"));
        }
        if self.first_name.trim().is_empty() {
            return Err("first name is required".to_string());
        }
        if self.residency_code.chars().count() > 3 {
            return Err("residency code exceeds 3 characters".to_string());
        }
        for (field, value) in [
            ("recipient category", &self.recipient_category),
            ("payment type", &self.payment_type),
        ] {
            if value.as_ref().is_some_and(|v| v.chars().count() > 2) {
                return Err(format!("{field} exceeds 2 characters"));
            }
        }
        if self.tax_rate < Decimal::ZERO || self.tax_rate > Decimal::ONE_HUNDRED {
            return Err(format!("tax rate {} is outside 0..100", self.tax_rate));
        }
        Ok(())
    }
}

/// Withholding declaration of one company for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeDeclaration {
    /// Unique identifier.
    #[serde(default)]
    pub id: DeclarationId,
    /// Declaring company.
    pub company: String,
    /// First day of the declared period.
    pub period_start: NaiveDate,
    /// Last day of the declared period.
    pub period_end: NaiveDate,
    /// Workflow state.
    #[serde(default)]
    pub state: DeclarationState,
    /// Declared payments.
    #[serde(default)]
    pub lines: Vec<DeclarationLine>,
    /// Sum of line amounts, filled on computation.
    #[serde(default)]
    pub total_amount: Decimal,
    /// Sum of line taxes, filled on computation.
    #[serde(default)]
    pub total_tax: Decimal,
}

impl IncomeDeclaration {
    /// Creates an empty draft declaration.
    #[must_use]
    pub fn new(company: impl Into<String>, period_start: NaiveDate, period_end: NaiveDate) -> Self {
        Self {
            id: DeclarationId::new(),
            company: company.into(),
            period_start,
            period_end,
            state: DeclarationState::Draft,
            lines: Vec::new(),
            total_amount: Decimal::ZERO,
            total_tax: Decimal::ZERO,
        }
    }

    /// Appends a line. Any previous computation is invalidated.
    ///
    /// # Errors
    ///
    /// Returns `DeclarationError::AlreadySent` once the declaration is sent.
    pub fn add_line(&mut self, line: DeclarationLine) -> Result<(), DeclarationError> {
        self.ensure_not_sent()?;
        self.lines.push(line);
        self.state = DeclarationState::Draft;
        Ok(())
    }

    /// Computes every line's tax and the totals, then moves to computed.
    ///
    /// Recomputing a computed declaration is allowed.
    ///
    /// # Errors
    ///
    /// Returns `DeclarationError::AlreadySent` for a sent declaration and
    /// `DeclarationError::InvalidLine` for the first malformed line; nothing
    /// changes in either case.
    pub fn compute(&mut self) -> Result<(), DeclarationError> {
        self.ensure_not_sent()?;
        for (index, line) in self.lines.iter().enumerate() {
            line.validate()
                .map_err(|reason| DeclarationError::InvalidLine { index, reason })?;
        }

        for line in &mut self.lines {
            line.tax_amount = Some(line.calculate_tax());
        }
        self.total_amount = self.lines.iter().map(|l| l.amount).sum();
        self.total_tax = self.lines.iter().filter_map(|l| l.tax_amount).sum();
        self.state = DeclarationState::Computed;

        debug!(
            declaration = %self.id,
            lines = self.lines.len(),
            total_amount = %self.total_amount,
            total_tax = %self.total_tax,
            "Computed income declaration"
        );
        Ok(())
    }

    /// Marks a computed declaration as sent.
    ///
    /// # Errors
    ///
    /// Returns `DeclarationError::InvalidTransition` from draft and
    /// `DeclarationError::AlreadySent` when already sent.
    pub fn mark_sent(&mut self) -> Result<(), DeclarationError> {
        match self.state {
            DeclarationState::Computed => {
                self.state = DeclarationState::Sent;
                Ok(())
            }
            DeclarationState::Sent => Err(DeclarationError::AlreadySent(self.id)),
            DeclarationState::Draft => Err(DeclarationError::InvalidTransition {
                from: DeclarationState::Draft,
                to: DeclarationState::Sent,
            }),
        }
    }

    fn ensure_not_sent(&self) -> Result<(), DeclarationError> {
        if self.state == DeclarationState::Sent {
            Err(DeclarationError::AlreadySent(self.id))
        } else {
            Ok(())
        }
    }
}
