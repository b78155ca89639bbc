//! Local-date arithmetic and business-day helpers.
//!
//! All dates in the system are plain calendar days (`NaiveDate`), never
//! timestamps. Arithmetic stays on the local calendar: a sale entered at
//! 23:59 local time must not silently become tomorrow's date, which is
//! exactly what UTC conversion would do.

use std::collections::HashSet;

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

/// Source of "today" for date-dependent operations.
///
/// Injected so that allocation and settlement logic can be tested against a
/// fixed date.
pub trait Clock: Send + Sync {
    /// Returns the current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// Production clock backed by the system's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Predicate over configured holidays.
///
/// Holiday storage lives outside the engine; the settlement scheduler only
/// needs this boolean check.
pub trait HolidayCalendar: Send + Sync {
    /// Returns true if `date` is a configured holiday.
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// Calendar with no holidays at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// Calendar backed by a fixed set of dates (typically from configuration).
#[derive(Debug, Clone, Default)]
pub struct FixedHolidayCalendar {
    dates: HashSet<NaiveDate>,
}

impl FixedHolidayCalendar {
    /// Builds a calendar from a list of holiday dates.
    #[must_use]
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }
}

impl HolidayCalendar for FixedHolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

/// Returns the calendar date `n` days away (`n` may be negative).
///
/// Pure calendar arithmetic on `NaiveDate`; no timestamps involved.
#[must_use]
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    if n >= 0 {
        date.checked_add_days(Days::new(n.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(n.unsigned_abs()))
    }
    .unwrap_or(date)
}

/// Returns true if the date falls on Saturday or Sunday.
#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Parses a `YYYY-MM-DD` string into a calendar date.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
}

/// Formats a calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Smallest date strictly after `date` that is not a weekend.
///
/// Holiday-unaware; the settlement scheduler composes this with the
/// holiday predicate.
#[must_use]
pub fn next_business_day(date: NaiveDate) -> NaiveDate {
    let mut candidate = add_days(date, 1);
    while is_weekend(candidate) {
        candidate = add_days(candidate, 1);
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_days_forward_and_back() {
        assert_eq!(add_days(date(2025, 10, 31), 1), date(2025, 11, 1));
        assert_eq!(add_days(date(2025, 10, 31), -1), date(2025, 10, 30));
        assert_eq!(add_days(date(2024, 2, 28), 1), date(2024, 2, 29)); // leap year
        assert_eq!(add_days(date(2025, 1, 1), -1), date(2024, 12, 31));
    }

    #[rstest]
    #[case(date(2026, 1, 3), true)] // Saturday
    #[case(date(2026, 1, 4), true)] // Sunday
    #[case(date(2026, 1, 5), false)] // Monday
    #[case(date(2026, 1, 9), false)] // Friday
    fn test_is_weekend(#[case] d: NaiveDate, #[case] expected: bool) {
        assert_eq!(is_weekend(d), expected);
    }

    #[test]
    fn test_next_business_day_skips_weekend() {
        // Friday -> Monday
        assert_eq!(next_business_day(date(2026, 1, 2)), date(2026, 1, 5));
        // Wednesday -> Thursday
        assert_eq!(next_business_day(date(2026, 1, 7)), date(2026, 1, 8));
        // Saturday -> Monday
        assert_eq!(next_business_day(date(2026, 1, 3)), date(2026, 1, 5));
    }

    #[test]
    fn test_next_business_day_is_strictly_later() {
        let mut d = date(2026, 1, 1);
        for _ in 0..30 {
            let next = next_business_day(d);
            assert!(next > d);
            assert!(!is_weekend(next));
            d = next;
        }
    }

    #[test]
    fn test_fixed_holiday_calendar() {
        let cal = FixedHolidayCalendar::new([date(2026, 12, 25)]);
        assert!(cal.is_holiday(date(2026, 12, 25)));
        assert!(!cal.is_holiday(date(2026, 12, 26)));
        assert!(!NoHolidays.is_holiday(date(2026, 12, 25)));
    }

    #[test]
    fn test_iso_date_round_trip() {
        let d = parse_iso_date("2026-03-09").unwrap();
        assert_eq!(d, date(2026, 3, 9));
        assert_eq!(format_iso_date(d), "2026-03-09");
        assert!(parse_iso_date("09/03/2026").is_err());
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(date(2026, 3, 10));
        assert_eq!(clock.today(), date(2026, 3, 10));
    }
}
