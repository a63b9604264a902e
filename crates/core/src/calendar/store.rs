//! In-memory public holiday store.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::CalendarError;
use super::georgia::{GEORGIA, georgian_holidays};
use super::{HolidayCalendar, HolidaySet};

/// A public holiday observed in one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// Holiday name.
    pub name: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    /// Inactive holidays are kept but not reported.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl PublicHoliday {
    /// Creates an active holiday.
    #[must_use]
    pub fn new(name: impl Into<String>, date: NaiveDate, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date,
            country: country.into(),
            active: true,
        }
    }
}

/// Counts produced by a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Holidays inserted.
    pub created: usize,
    /// Holidays skipped because the (date, country) pair already existed.
    pub skipped: usize,
}

/// Holiday records unique on (country, date), queried for one jurisdiction.
#[derive(Debug, Clone)]
pub struct HolidayStore {
    country: String,
    holidays: BTreeMap<(String, NaiveDate), PublicHoliday>,
}

impl HolidayStore {
    /// Creates an empty store answering queries for `country`.
    #[must_use]
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            holidays: BTreeMap::new(),
        }
    }

    /// The jurisdiction this store reports holidays for.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Inserts a holiday. Returns false if the (date, country) pair exists.
    pub fn insert(&mut self, holiday: PublicHoliday) -> bool {
        let key = (holiday.country.clone(), holiday.date);
        if self.holidays.contains_key(&key) {
            return false;
        }
        self.holidays.insert(key, holiday);
        true
    }

    /// Marks a holiday inactive. Returns false if it is unknown.
    pub fn deactivate(&mut self, country: &str, date: NaiveDate) -> bool {
        match self.holidays.get_mut(&(country.to_string(), date)) {
            Some(holiday) => {
                holiday.active = false;
                true
            }
            None => false,
        }
    }

    /// Seeds the statutory holidays of the store's country for `years`.
    ///
    /// Existing (date, country) pairs are left untouched and counted as skipped.
    pub fn seed(
        &mut self,
        years: impl IntoIterator<Item = i32>,
    ) -> Result<SeedReport, CalendarError> {
        if self.country != GEORGIA {
            return Err(CalendarError::Unavailable(format!(
                "no holiday generator for country {}",
                self.country
            )));
        }

        let mut report = SeedReport::default();
        for year in years {
            for holiday in georgian_holidays(year)? {
                if self.insert(holiday) {
                    report.created += 1;
                } else {
                    report.skipped += 1;
                }
            }
        }
        Ok(report)
    }

    /// Number of stored holidays across all countries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns true if the store holds no holidays.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

impl HolidayCalendar for HolidayStore {
    fn holidays_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HolidaySet, CalendarError> {
        if start > end {
            return Ok(HolidaySet::new());
        }
        let from = (self.country.clone(), start);
        let to = (self.country.clone(), end);
        Ok(self
            .holidays
            .range(from..=to)
            .filter(|(_, holiday)| holiday.active)
            .map(|(_, holiday)| holiday.date)
            .collect())
    }
}
