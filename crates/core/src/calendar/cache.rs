//! Holiday lookup caching using Moka.
//!
//! Batch runs over the same months query identical ranges; the decorator
//! keeps recent answers so the backing source is hit once per range.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::sync::Cache;

use super::error::CalendarError;
use super::{HolidayCalendar, HolidaySet};

/// Default cache capacity (number of ranges).
const DEFAULT_CACHE_CAPACITY: u64 = 64;

/// Default time-to-live for cache entries (1 hour).
const DEFAULT_TTL_SECS: u64 = 3600;

/// Caching decorator over any [`HolidayCalendar`].
///
/// Failed lookups are not cached.
#[derive(Clone)]
pub struct CachedCalendar<C> {
    inner: C,
    cache: Cache<(NaiveDate, NaiveDate), Arc<HolidaySet>>,
}

impl<C: HolidayCalendar> CachedCalendar<C> {
    /// Wraps `inner` with default settings: 64 ranges, 1 hour TTL.
    #[must_use]
    pub fn new(inner: C) -> Self {
        Self::with_config(inner, DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Wraps `inner` with a custom capacity and time-to-live.
    #[must_use]
    pub fn with_config(inner: C, max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner, cache }
    }

    /// The wrapped calendar.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Drops every cached range, e.g. after the backing store was reseeded.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

impl<C: HolidayCalendar> HolidayCalendar for CachedCalendar<C> {
    fn holidays_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HolidaySet, CalendarError> {
        let key = (start, end);
        if let Some(cached) = self.cache.get(&key) {
            return Ok((*cached).clone());
        }

        let holidays = self.inner.holidays_in_range(start, end)?;
        self.cache.insert(key, Arc::new(holidays.clone()));
        Ok(holidays)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingCalendar {
        calls: Cell<usize>,
        fail: bool,
    }

    impl HolidayCalendar for CountingCalendar {
        fn holidays_in_range(
            &self,
            start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<HolidaySet, CalendarError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(CalendarError::Unavailable("offline".into()));
            }
            Ok([start].into_iter().collect())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_repeated_range_hits_cache() {
        let cached = CachedCalendar::new(CountingCalendar {
            calls: Cell::new(0),
            fail: false,
        });

        let first = cached.holidays_in_range(date(2026, 1, 1), date(2026, 2, 1)).unwrap();
        let second = cached.holidays_in_range(date(2026, 1, 1), date(2026, 2, 1)).unwrap();
        assert_eq!(first, second);
        assert_eq!(cached.inner().calls.get(), 1);

        cached.holidays_in_range(date(2026, 3, 1), date(2026, 4, 1)).unwrap();
        assert_eq!(cached.inner().calls.get(), 2);
    }

    #[test]
    fn test_invalidate_all_forces_reload() {
        let cached = CachedCalendar::new(CountingCalendar {
            calls: Cell::new(0),
            fail: false,
        });
        cached.holidays_in_range(date(2026, 1, 1), date(2026, 2, 1)).unwrap();
        cached.invalidate_all();
        cached.holidays_in_range(date(2026, 1, 1), date(2026, 2, 1)).unwrap();
        assert_eq!(cached.inner().calls.get(), 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cached = CachedCalendar::new(CountingCalendar {
            calls: Cell::new(0),
            fail: true,
        });
        assert!(cached.holidays_in_range(date(2026, 1, 1), date(2026, 2, 1)).is_err());
        assert!(cached.holidays_in_range(date(2026, 1, 1), date(2026, 2, 1)).is_err());
        assert_eq!(cached.inner().calls.get(), 2);
    }
}
