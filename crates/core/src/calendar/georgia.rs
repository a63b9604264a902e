//! Georgian statutory public holidays.
//!
//! Fixed-date holidays plus four holidays anchored on Orthodox Easter:
//! Good Friday, Holy Saturday, Easter Sunday and Easter Monday.

use chrono::{Days, NaiveDate};

use super::error::CalendarError;
use super::store::PublicHoliday;

/// ISO country code of Georgia.
pub const GEORGIA: &str = "GE";

/// Fixed-date holidays as (month, day, name).
const FIXED_HOLIDAYS: [(u32, u32, &str); 13] = [
    (1, 1, "New Year's Day"),
    (1, 2, "New Year Holiday"),
    (1, 7, "Orthodox Christmas"),
    (1, 19, "Epiphany"),
    (3, 3, "Mother's Day"),
    (3, 8, "International Women's Day"),
    (4, 9, "National Unity Day"),
    (5, 9, "Victory Day"),
    (5, 12, "Saint Andrew the First-Called Day"),
    (5, 26, "Independence Day"),
    (8, 28, "Mariamoba"),
    (10, 14, "Svetitskhovloba"),
    (11, 23, "Giorgoba"),
];

/// Computes Orthodox Easter Sunday as a Gregorian date.
///
/// Uses the Julian computus and shifts by 13 days, which holds for 1900..=2099.
pub fn orthodox_easter(year: i32) -> Result<NaiveDate, CalendarError> {
    if !(1900..=2099).contains(&year) {
        return Err(CalendarError::UnsupportedYear(year));
    }

    let a = year.rem_euclid(4);
    let b = year.rem_euclid(7);
    let c = year.rem_euclid(19);
    let d = (19 * c + 15).rem_euclid(30);
    let e = (2 * a + 4 * b - d + 34).rem_euclid(7);
    let month = (d + e + 114) / 31;
    let day = (d + e + 114).rem_euclid(31) + 1;

    let julian = u32::try_from(month)
        .ok()
        .zip(u32::try_from(day).ok())
        .and_then(|(m, d)| NaiveDate::from_ymd_opt(year, m, d))
        .ok_or(CalendarError::UnsupportedYear(year))?;

    julian
        .checked_add_days(Days::new(13))
        .ok_or(CalendarError::UnsupportedYear(year))
}

/// Generates every Georgian public holiday of `year`.
///
/// The list may contain the same date twice when a moving holiday lands on a
/// fixed one; [`super::HolidayStore::seed`] keeps the first.
pub fn georgian_holidays(year: i32) -> Result<Vec<PublicHoliday>, CalendarError> {
    let mut holidays = Vec::with_capacity(FIXED_HOLIDAYS.len() + 4);

    for (month, day, name) in FIXED_HOLIDAYS {
        let date =
            NaiveDate::from_ymd_opt(year, month, day).ok_or(CalendarError::UnsupportedYear(year))?;
        holidays.push(PublicHoliday::new(name, date, GEORGIA));
    }

    let easter = orthodox_easter(year)?;
    let moving = [
        (easter.checked_sub_days(Days::new(2)), "Good Friday"),
        (easter.checked_sub_days(Days::new(1)), "Holy Saturday"),
        (Some(easter), "Easter Sunday"),
        (easter.checked_add_days(Days::new(1)), "Easter Monday"),
    ];
    for (date, name) in moving {
        let date = date.ok_or(CalendarError::UnsupportedYear(year))?;
        holidays.push(PublicHoliday::new(name, date, GEORGIA));
    }

    Ok(holidays)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2025, 4, 20)]
    #[case(2026, 4, 12)]
    #[case(2027, 5, 2)]
    #[case(2029, 4, 8)]
    #[case(2030, 4, 28)]
    fn test_orthodox_easter(#[case] year: i32, #[case] month: u32, #[case] day: u32) {
        assert_eq!(
            orthodox_easter(year).unwrap(),
            NaiveDate::from_ymd_opt(year, month, day).unwrap()
        );
    }

    #[test]
    fn test_orthodox_easter_out_of_range() {
        assert_eq!(
            orthodox_easter(2100),
            Err(CalendarError::UnsupportedYear(2100))
        );
        assert!(orthodox_easter(1899).is_err());
    }

    #[test]
    fn test_holiday_count_per_year() {
        let holidays = georgian_holidays(2026).unwrap();
        assert_eq!(holidays.len(), 17);
        assert!(holidays.iter().all(|h| h.country == GEORGIA && h.active));
    }

    #[test]
    fn test_moving_holidays_2026() {
        let holidays = georgian_holidays(2026).unwrap();
        let good_friday = holidays.iter().find(|h| h.name == "Good Friday").unwrap();
        let easter_monday = holidays.iter().find(|h| h.name == "Easter Monday").unwrap();
        assert_eq!(good_friday.date, NaiveDate::from_ymd_opt(2026, 4, 10).unwrap());
        assert_eq!(easter_monday.date, NaiveDate::from_ymd_opt(2026, 4, 13).unwrap());
    }

    #[test]
    fn test_easter_monday_collides_with_unity_day_in_2029() {
        let holidays = georgian_holidays(2029).unwrap();
        let april_ninth = NaiveDate::from_ymd_opt(2029, 4, 9).unwrap();
        assert_eq!(holidays.iter().filter(|h| h.date == april_ninth).count(), 2);
    }
}
