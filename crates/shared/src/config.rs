//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::AppError;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Statutory contribution and tax rates.
    #[serde(default)]
    pub rates: StatutoryRates,
    /// Holiday calendar configuration.
    #[serde(default)]
    pub calendar: CalendarConfig,
    /// Batch runner configuration.
    #[serde(default)]
    pub runner: RunnerConfig,
}

/// Statutory rates applied by the payroll calculator.
///
/// Rates are fractions: `0.02` means two percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StatutoryRates {
    /// Employee pension contribution, withheld from gross.
    #[serde(default = "default_pension_rate")]
    pub pension_employee: Decimal,
    /// Employer pension contribution, paid on top of gross.
    #[serde(default = "default_pension_rate")]
    pub pension_employer: Decimal,
    /// Flat personal income tax rate.
    #[serde(default = "default_income_tax_rate")]
    pub income_tax: Decimal,
}

fn default_pension_rate() -> Decimal {
    Decimal::new(2, 2)
}

fn default_income_tax_rate() -> Decimal {
    Decimal::new(20, 2)
}

impl Default for StatutoryRates {
    fn default() -> Self {
        Self {
            pension_employee: default_pension_rate(),
            pension_employer: default_pension_rate(),
            income_tax: default_income_tax_rate(),
        }
    }
}

impl StatutoryRates {
    /// Checks that every rate is a fraction in `[0, 1)`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` naming the first offending rate.
    pub fn validate(&self) -> Result<(), AppError> {
        let rates = [
            ("pension_employee", self.pension_employee),
            ("pension_employer", self.pension_employer),
            ("income_tax", self.income_tax),
        ];
        for (name, rate) in rates {
            if rate < Decimal::ZERO || rate >= Decimal::ONE {
                return Err(AppError::Configuration(format!(
                    "rate {name} must be within [0, 1), got {rate}"
                )));
            }
        }
        Ok(())
    }

    /// Formats a rate as a whole-or-fractional percentage, e.g. `0.02` as `2%`.
    #[must_use]
    pub fn percent_label(rate: Decimal) -> String {
        format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
    }
}

/// Holiday calendar configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// ISO 3166-1 alpha-2 country whose public holidays apply.
    #[serde(default = "default_country")]
    pub country: String,
    /// Maximum number of cached holiday range lookups.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
    /// Time-to-live of a cached lookup in seconds.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

fn default_country() -> String {
    "GE".to_string()
}

fn default_cache_capacity() -> u64 {
    64
}

fn default_cache_ttl() -> u64 {
    3600 // 1 hour
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            country: default_country(),
            cache_capacity: default_cache_capacity(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

/// Batch runner configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    /// Path of the JSON batch file to process.
    #[serde(default = "default_input_path")]
    pub input_path: String,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Whether to run Complete after Compute.
    #[serde(default = "default_complete")]
    pub complete: bool,
}

fn default_input_path() -> String {
    "payroll.json".to_string()
}

fn default_log_filter() -> String {
    "hrpay=info".to_string()
}

fn default_complete() -> bool {
    true
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            log_filter: default_log_filter(),
            complete: default_complete(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones: `config/default`,
    /// `config/{RUN_MODE}`, then `HRPAY__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the rates are out of range.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("HRPAY").separator("__"))
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.rates.validate()?;
        Ok(app_config)
    }
}
