//! Currency codes and the payroll rounding rule.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` throughout.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of fractional digits carried by every payroll amount.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Zero at money scale, rendered as `0.00`.
pub const ZERO_MONEY: Decimal = Decimal::from_parts(0, 0, 0, false, MONEY_DECIMAL_PLACES);

/// Rounds an amount to two fractional digits, half away from zero.
///
/// The result always carries a scale of two, so `1500` becomes `1500.00`.
///
/// Payroll amounts are rounded independently at each calculation step,
/// so `round_money(a) + round_money(b)` is not `round_money(a + b)`.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded
}

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Georgian Lari
    #[default]
    Gel,
    /// US Dollar
    Usd,
    /// Euro
    Eur,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gel => write!(f, "GEL"),
            Self::Usd => write!(f, "USD"),
            Self::Eur => write!(f, "EUR"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GEL" => Ok(Self::Gel),
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}
