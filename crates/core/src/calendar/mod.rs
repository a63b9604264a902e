//! Public holiday calendars and business-day arithmetic.
//!
//! The payroll engine only needs a set of non-working dates for a range.
//! Any source can supply it through [`HolidayCalendar`]; this module also
//! ships a seedable in-memory store and a caching decorator.

pub mod business_days;
pub mod cache;
pub mod error;
pub mod georgia;
pub mod store;

#[cfg(test)]
mod business_days_props;

use std::collections::HashSet;

use chrono::NaiveDate;

pub use business_days::{count_business_days, is_business_day, month_bounds};
pub use cache::CachedCalendar;
pub use error::CalendarError;
pub use georgia::{georgian_holidays, orthodox_easter};
pub use store::{HolidayStore, PublicHoliday, SeedReport};

/// Set of non-working dates.
pub type HolidaySet = HashSet<NaiveDate>;

/// Source of public holidays for one jurisdiction.
pub trait HolidayCalendar {
    /// Returns the holidays falling within `[start, end]` inclusive.
    ///
    /// An inverted range yields an empty set.
    fn holidays_in_range(&self, start: NaiveDate, end: NaiveDate)
    -> Result<HolidaySet, CalendarError>;
}

impl<T: HolidayCalendar + ?Sized> HolidayCalendar for &T {
    fn holidays_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HolidaySet, CalendarError> {
        (**self).holidays_in_range(start, end)
    }
}

/// A fixed set of dates acts as a calendar on its own.
impl HolidayCalendar for HolidaySet {
    fn holidays_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HolidaySet, CalendarError> {
        Ok(self
            .iter()
            .copied()
            .filter(|date| *date >= start && *date <= end)
            .collect())
    }
}
