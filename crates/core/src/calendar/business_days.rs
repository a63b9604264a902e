//! Business-day counting.
//!
//! A business day is Monday through Friday and not a holiday.

use chrono::{Datelike, Months, NaiveDate, Weekday};

use super::HolidaySet;

/// Returns true if `date` is a weekday that is not in `holidays`.
#[must_use]
pub fn is_business_day(date: NaiveDate, holidays: &HolidaySet) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !holidays.contains(&date)
}

/// Counts business days in `[start, end]` inclusive.
///
/// A missing bound or `start > end` is an empty range and counts as zero.
#[must_use]
pub fn count_business_days(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    holidays: &HolidaySet,
) -> u32 {
    let (Some(start), Some(end)) = (start, end) else {
        return 0;
    };

    let days = start
        .iter_days()
        .take_while(|date| *date <= end)
        .filter(|date| is_business_day(*date, holidays))
        .count();

    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Returns the first and last day of the calendar month containing `date`.
#[must_use]
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    (first, last)
}
