//! Batch orchestration of payslip operations.
//!
//! Every operation walks an explicit batch sequentially and records one
//! [`Outcome`] per payslip. A bad record is skipped or rejected; the rest
//! of the batch still runs.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use hrpay_shared::StatutoryRates;
use hrpay_shared::types::{LedgerEntryId, PayslipId};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::calculator::PayrollCalculator;
use super::directory::Directory;
use super::error::PayrollError;
use super::lines::LineItemGenerator;
use super::state::{PayslipAction, PayslipStateMachine};
use super::types::Payslip;
use crate::calendar::{HolidayCalendar, HolidaySet};
use crate::ledger::{AccountingService, LedgerEntryBuilder, LedgerError};

/// Extra days past the last period end covered by the holiday lookup.
const HOLIDAY_LOOKAHEAD_DAYS: u64 = 32;

/// Why a payslip was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No contract reference, or the contract is unknown.
    MissingContract,
    /// A period bound is missing.
    MissingDates,
    /// The period starts after it ends.
    InvalidPeriod,
    /// The contract has no payroll journal.
    MissingJournal,
    /// The employee participates in the pension scheme but no pension account is set.
    MissingPensionAccount,
    /// No posting survived (zero amounts or no accounts).
    NoPostings,
    /// The postings do not balance because an account is missing.
    UnbalancedEntry {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },
}

impl SkipReason {
    /// Stable code for reports.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingContract => "MISSING_CONTRACT",
            Self::MissingDates => "MISSING_DATES",
            Self::InvalidPeriod => "INVALID_PERIOD",
            Self::MissingJournal => "MISSING_JOURNAL",
            Self::MissingPensionAccount => "MISSING_PENSION_ACCOUNT",
            Self::NoPostings => "NO_POSTINGS",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContract => write!(f, "contract is missing"),
            Self::MissingDates => write!(f, "period dates are missing"),
            Self::InvalidPeriod => write!(f, "period starts after it ends"),
            Self::MissingJournal => write!(f, "contract has no payroll journal"),
            Self::MissingPensionAccount => {
                write!(f, "pension participant has no pension account")
            }
            Self::NoPostings => write!(f, "nothing to post"),
            Self::UnbalancedEntry { debit, credit } => {
                write!(f, "postings do not balance: debit {debit}, credit {credit}")
            }
        }
    }
}

/// Result of one operation on one payslip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Amounts and lines were recomputed.
    Computed,
    /// The payslip is done and references `entry`.
    Completed {
        /// Ledger entry reference.
        entry: LedgerEntryId,
        /// False when an existing entry was kept.
        created: bool,
    },
    /// The payslip is back in draft.
    Reset,
    /// The payslip is cancelled.
    Cancelled,
    /// Nothing changed.
    Skipped(SkipReason),
    /// The operation is not allowed or the ledger refused it.
    Rejected(PayrollError),
}

impl Outcome {
    /// Short label for reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Computed => "computed",
            Self::Completed { .. } => "completed",
            Self::Reset => "reset",
            Self::Cancelled => "cancelled",
            Self::Skipped(_) => "skipped",
            Self::Rejected(_) => "rejected",
        }
    }
}

/// Outcome for one payslip of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    /// The payslip concerned.
    pub payslip: PayslipId,
    /// What happened to it.
    pub outcome: Outcome,
}

/// Per-record outcomes of a batch operation, in batch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// One outcome per payslip.
    pub outcomes: Vec<RecordOutcome>,
}

impl BatchReport {
    fn record(&mut self, payslip: PayslipId, outcome: Outcome) {
        self.outcomes.push(RecordOutcome { payslip, outcome });
    }

    /// Looks up the outcome of one payslip.
    #[must_use]
    pub fn outcome_of(&self, payslip: PayslipId) -> Option<&Outcome> {
        self.outcomes
            .iter()
            .find(|record| record.payslip == payslip)
            .map(|record| &record.outcome)
    }

    /// Number of skipped records.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped(_)))
    }

    /// Number of rejected records.
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Rejected(_)))
    }

    /// Number of records the operation applied to.
    #[must_use]
    pub fn applied(&self) -> usize {
        self.outcomes.len() - self.skipped() - self.rejected()
    }

    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.iter().filter(|r| predicate(&r.outcome)).count()
    }
}

/// Payroll engine with its collaborators injected.
pub struct PayrollService<C, L> {
    calendar: C,
    ledger: L,
    calculator: PayrollCalculator,
    lines: LineItemGenerator,
}

impl<C: HolidayCalendar, L: AccountingService> PayrollService<C, L> {
    /// Creates a service over `calendar` and `ledger` applying `rates`.
    #[must_use]
    pub fn new(calendar: C, ledger: L, rates: StatutoryRates) -> Self {
        Self {
            calendar,
            ledger,
            calculator: PayrollCalculator::new(rates),
            lines: LineItemGenerator::new(rates),
        }
    }

    /// The holiday calendar.
    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    /// The accounting collaborator.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the accounting collaborator.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// The calculator in use.
    pub fn calculator(&self) -> &PayrollCalculator {
        &self.calculator
    }

    /// Loads holidays once for the whole batch.
    ///
    /// The range runs from the first day of the earliest month to 32 days
    /// past the latest date. A calendar failure yields an empty set.
    pub fn load_holidays(&self, batch: &[Payslip]) -> HolidaySet {
        let Some((start, end)) = holiday_range(batch) else {
            return HolidaySet::new();
        };

        match self.calendar.holidays_in_range(start, end) {
            Ok(holidays) => {
                debug!(%start, %end, count = holidays.len(), "Loaded holidays");
                holidays
            }
            Err(err) => {
                warn!(%start, %end, error = %err, "Holiday lookup failed, counting weekdays only");
                HolidaySet::new()
            }
        }
    }

    /// Recomputes working days, amounts and lines of every draft payslip.
    pub fn compute<D: Directory + ?Sized>(
        &self,
        batch: &mut [Payslip],
        directory: &D,
    ) -> BatchReport {
        let holidays = self.load_holidays(batch);
        let mut report = BatchReport::default();

        for payslip in batch.iter_mut() {
            let outcome = self.compute_one(payslip, directory, &holidays);
            report.record(payslip.id, outcome);
        }

        info!(
            total = report.outcomes.len(),
            computed = report.applied(),
            skipped = report.skipped(),
            rejected = report.rejected(),
            "Payslip computation finished"
        );
        report
    }

    fn compute_one<D: Directory + ?Sized>(
        &self,
        payslip: &mut Payslip,
        directory: &D,
        holidays: &HolidaySet,
    ) -> Outcome {
        if let Err(err) = PayslipStateMachine::ensure_editable(payslip.state) {
            return Outcome::Rejected(err);
        }
        let Some(contract) = payslip.contract_id.and_then(|id| directory.contract(id)) else {
            warn!(payslip = %payslip.id, "Skipping computation: contract missing");
            return Outcome::Skipped(SkipReason::MissingContract);
        };
        if let Err(err) = payslip.validate() {
            warn!(payslip = %payslip.id, error = %err, "Skipping computation: invalid period");
            return Outcome::Skipped(SkipReason::InvalidPeriod);
        }
        let Some(computed) = self.calculator.compute(payslip, contract, holidays) else {
            warn!(payslip = %payslip.id, "Skipping computation: period dates missing");
            return Outcome::Skipped(SkipReason::MissingDates);
        };

        payslip.working_days = Some(computed.working_days);
        payslip.paid_days = Some(computed.days_to_pay);
        payslip.gross = Some(computed.gross);
        payslip.pension_employee = Some(computed.pension_employee);
        payslip.pension_employer = Some(computed.pension_employer);
        payslip.income_tax = Some(computed.income_tax);
        payslip.net = Some(computed.net);
        payslip.currency = contract.currency;
        payslip.lines = self.lines.generate(&computed);

        debug!(
            payslip = %payslip.id,
            working_days = computed.working_days,
            gross = %computed.gross,
            net = %computed.net,
            "Computed payslip"
        );
        Outcome::Computed
    }

    /// Moves draft payslips to done, creating one ledger entry each.
    pub fn complete<D: Directory + ?Sized>(
        &mut self,
        batch: &mut [Payslip],
        directory: &D,
    ) -> BatchReport {
        let mut report = BatchReport::default();

        for payslip in batch.iter_mut() {
            let outcome = self.complete_one(payslip, directory);
            report.record(payslip.id, outcome);
        }

        info!(
            total = report.outcomes.len(),
            completed = report.applied(),
            skipped = report.skipped(),
            rejected = report.rejected(),
            "Payslip completion finished"
        );
        report
    }

    fn complete_one<D: Directory + ?Sized>(&mut self, payslip: &mut Payslip, directory: &D) -> Outcome {
        let target = match PayslipStateMachine::transition(payslip.state, PayslipAction::Complete) {
            Ok(target) => target,
            Err(err) => return Outcome::Rejected(err),
        };
        let Some(contract) = payslip.contract_id.and_then(|id| directory.contract(id)) else {
            warn!(payslip = %payslip.id, "Skipping completion: contract missing");
            return Outcome::Skipped(SkipReason::MissingContract);
        };
        if contract.journal.is_none() {
            warn!(
                payslip = %payslip.id,
                contract = %contract.id,
                "Skipping completion: contract has no payroll journal"
            );
            return Outcome::Skipped(SkipReason::MissingJournal);
        }
        if contract.pension_participant && contract.accounts.pension.is_none() {
            warn!(
                payslip = %payslip.id,
                contract = %contract.id,
                "Skipping completion: pension account not configured"
            );
            return Outcome::Skipped(SkipReason::MissingPensionAccount);
        }

        if let Some(entry) = payslip.ledger_entry {
            payslip.state = target;
            debug!(payslip = %payslip.id, %entry, "Reusing existing ledger entry");
            return Outcome::Completed {
                entry,
                created: false,
            };
        }

        let employee = directory.employee(payslip.employee_id);
        let Some(request) =
            LedgerEntryBuilder::build(payslip, contract, employee, self.calculator.rates())
        else {
            warn!(payslip = %payslip.id, "Skipping completion: nothing to post");
            return Outcome::Skipped(SkipReason::NoPostings);
        };

        let totals = request.totals();
        if !totals.is_balanced {
            warn!(
                payslip = %payslip.id,
                debit = %totals.debit,
                credit = %totals.credit,
                "Skipping completion: postings do not balance"
            );
            return Outcome::Skipped(SkipReason::UnbalancedEntry {
                debit: totals.debit,
                credit: totals.credit,
            });
        }

        match self.ledger.create_entry(&request) {
            Ok(entry) => {
                payslip.ledger_entry = Some(entry);
                payslip.state = target;
                info!(payslip = %payslip.id, %entry, amount = %totals.debit, "Payslip completed");
                Outcome::Completed {
                    entry,
                    created: true,
                }
            }
            Err(err) => {
                warn!(payslip = %payslip.id, error = %err, "Ledger refused payslip entry");
                Outcome::Rejected(err.into())
            }
        }
    }

    /// Moves done payslips back to draft, removing their ledger entries.
    ///
    /// Amounts and lines stay as they are until the next computation.
    pub fn reset_to_draft(&mut self, batch: &mut [Payslip]) -> BatchReport {
        let mut report = BatchReport::default();

        for payslip in batch.iter_mut() {
            let outcome = self.reset_one(payslip);
            report.record(payslip.id, outcome);
        }

        info!(
            total = report.outcomes.len(),
            reset = report.applied(),
            rejected = report.rejected(),
            "Payslip reset finished"
        );
        report
    }

    fn reset_one(&mut self, payslip: &mut Payslip) -> Outcome {
        let target = match PayslipStateMachine::transition(payslip.state, PayslipAction::Reset) {
            Ok(target) => target,
            Err(err) => return Outcome::Rejected(err),
        };

        if let Some(entry) = payslip.ledger_entry {
            match self.ledger.remove_entry(entry) {
                Ok(()) => {}
                Err(LedgerError::EntryNotFound(_)) => {
                    warn!(payslip = %payslip.id, %entry, "Ledger entry already gone");
                }
                Err(err) => return Outcome::Rejected(err.into()),
            }
        }

        payslip.ledger_entry = None;
        payslip.state = target;
        Outcome::Reset
    }

    /// Cancels draft payslips. Amounts are kept.
    pub fn cancel(&self, batch: &mut [Payslip]) -> BatchReport {
        let mut report = BatchReport::default();

        for payslip in batch.iter_mut() {
            let outcome = match PayslipStateMachine::transition(payslip.state, PayslipAction::Cancel) {
                Ok(target) => {
                    payslip.state = target;
                    Outcome::Cancelled
                }
                Err(err) => Outcome::Rejected(err),
            };
            report.record(payslip.id, outcome);
        }

        report
    }
}

/// Holiday lookup range covering every dated payslip of the batch.
fn holiday_range(batch: &[Payslip]) -> Option<(NaiveDate, NaiveDate)> {
    let dates = batch
        .iter()
        .flat_map(|p| [p.date_from, p.date_to])
        .flatten();
    let (min, max) = dates.fold(None, |acc: Option<(NaiveDate, NaiveDate)>, date| match acc {
        None => Some((date, date)),
        Some((min, max)) => Some((min.min(date), max.max(date))),
    })?;

    let start = min.with_day(1)?;
    let end = max.checked_add_days(Days::new(HOLIDAY_LOOKAHEAD_DAYS))?;
    Some((start, end))
}
