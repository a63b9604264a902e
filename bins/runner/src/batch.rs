//! Batch file model and the payroll run over it.

use std::ops::RangeInclusive;

use chrono::{Datelike, Days};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use hrpay_core::calendar::{CachedCalendar, HolidayStore, PublicHoliday};
use hrpay_core::declaration::IncomeDeclaration;
use hrpay_core::ledger::{InMemoryLedger, LedgerEntryRequest};
use hrpay_core::payroll::{
    BatchReport, Contract, Employee, InMemoryDirectory, Outcome, PayrollService, Payslip,
};
use hrpay_shared::types::{LedgerEntryId, PayslipId};
use hrpay_shared::{AppConfig, AppError, AppResult};

/// Days past the last period end that still need holidays seeded.
const LOOKAHEAD_DAYS: u64 = 32;

/// Records read from the batch file.
#[derive(Debug, Default, Deserialize)]
pub struct BatchInput {
    /// Employees referenced by contracts and payslips.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Contracts referenced by payslips.
    #[serde(default)]
    pub contracts: Vec<Contract>,
    /// Payslips to process.
    #[serde(default)]
    pub payslips: Vec<Payslip>,
    /// Extra holidays on top of the generated ones.
    #[serde(default)]
    pub holidays: Vec<PublicHoliday>,
    /// Income declarations to compute.
    #[serde(default)]
    pub declarations: Vec<IncomeDeclaration>,
}

impl BatchInput {
    /// Parses a batch from JSON.
    pub fn parse(json: &str) -> AppResult<Self> {
        serde_json::from_str(json)
            .map_err(|err| AppError::Validation(format!("malformed batch file: {err}")))
    }

    /// Years whose holidays the batch may need.
    fn years(&self) -> Option<RangeInclusive<i32>> {
        let dates: Vec<_> = self
            .payslips
            .iter()
            .flat_map(|p| [p.date_from, p.date_to])
            .flatten()
            .collect();
        let first = dates.iter().min()?;
        let last = dates.iter().max()?;
        let horizon = last.checked_add_days(Days::new(LOOKAHEAD_DAYS))?;
        Some(first.year()..=horizon.year())
    }

    /// Active, valid contracts and all employees.
    ///
    /// An invalid contract is left out, so its payslips are skipped as
    /// having no contract.
    fn directory(&self) -> InMemoryDirectory {
        let mut directory: InMemoryDirectory = self
            .contracts
            .iter()
            .filter(|contract| contract.active)
            .filter(|contract| match contract.validate() {
                Ok(()) => true,
                Err(err) => {
                    warn!(contract = %contract.id, error = %err, "Ignoring invalid contract");
                    false
                }
            })
            .cloned()
            .collect();
        for employee in &self.employees {
            directory.add_employee(employee.clone());
        }
        directory
    }
}

/// A ledger entry created during the run.
#[derive(Debug, Serialize)]
pub struct PostedEntry {
    /// Reference returned by the ledger.
    pub id: LedgerEntryId,
    /// The entry as requested.
    #[serde(flatten)]
    pub request: LedgerEntryRequest,
}

/// One payslip outcome in report form.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct OutcomeRecord {
    /// Payslip concerned.
    pub payslip: PayslipId,
    /// `compute` or `complete`.
    pub operation: &'static str,
    /// Outcome label.
    pub outcome: &'static str,
    /// Skip reason, error message or entry reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl OutcomeRecord {
    fn from_report(operation: &'static str, report: &BatchReport) -> impl Iterator<Item = Self> {
        report.outcomes.iter().map(move |record| Self {
            payslip: record.payslip,
            operation,
            outcome: record.outcome.label(),
            detail: match &record.outcome {
                Outcome::Completed { entry, .. } => Some(entry.to_string()),
                Outcome::Skipped(reason) => Some(reason.to_string()),
                Outcome::Rejected(err) => Some(err.to_string()),
                Outcome::Computed | Outcome::Reset | Outcome::Cancelled => None,
            },
        })
    }
}

/// Everything the run produced.
#[derive(Debug, Serialize)]
pub struct BatchOutput {
    /// Payslips after processing.
    pub payslips: Vec<Payslip>,
    /// Entries created in the ledger.
    pub ledger_entries: Vec<PostedEntry>,
    /// Per-payslip outcomes of every operation.
    pub outcomes: Vec<OutcomeRecord>,
    /// Declarations after computation.
    pub declarations: Vec<IncomeDeclaration>,
}

/// Runs Compute, then Complete when enabled, over the batch.
///
/// Invalid records are reported per payslip and never stop the run.
pub fn run(input: BatchInput, config: &AppConfig) -> BatchOutput {
    let mut store = HolidayStore::new(config.calendar.country.as_str());
    if let Some(years) = input.years() {
        match store.seed(years.clone()) {
            Ok(report) => info!(
                country = store.country(),
                first_year = years.start(),
                last_year = years.end(),
                created = report.created,
                skipped = report.skipped,
                "Seeded public holidays"
            ),
            Err(err) => warn!(error = %err, "No generated holidays, using supplied ones only"),
        }
    }

    let directory = input.directory();
    let BatchInput {
        payslips: mut payslips,
        holidays,
        declarations: mut declarations,
        ..
    } = input;

    for holiday in holidays {
        store.insert(holiday);
    }
    let calendar = CachedCalendar::with_config(
        store,
        config.calendar.cache_capacity,
        config.calendar.cache_ttl_secs,
    );
    let mut service = PayrollService::new(calendar, InMemoryLedger::new(), config.rates);

    let report = service.compute(&mut payslips, &directory);
    let mut outcomes: Vec<_> = OutcomeRecord::from_report("compute", &report).collect();

    if config.runner.complete {
        let report = service.complete(&mut payslips, &directory);
        outcomes.extend(OutcomeRecord::from_report("complete", &report));
    }

    for declaration in &mut declarations {
        if let Err(err) = declaration.compute() {
            warn!(declaration = %declaration.id, error = %err, "Declaration not computed");
        }
    }

    let ledger_entries = service
        .ledger()
        .entries()
        .map(|(id, request)| PostedEntry {
            id: *id,
            request: request.clone(),
        })
        .collect();

    BatchOutput {
        payslips,
        ledger_entries,
        outcomes,
        declarations,
    }
}
