//! Settlement-date computation.

use chrono::NaiveDate;

use crate::calendar::{HolidayCalendar, add_days, is_weekend};

use super::error::SettlementError;

/// Upper bound on the business-day search.
///
/// Guards against a corrupted holiday calendar marking every day a holiday;
/// hitting the bound surfaces [`SettlementError::DateUnresolved`] instead of
/// looping forever.
pub const MAX_SETTLEMENT_SEARCH_DAYS: u32 = 30;

/// Computes the settlement date for a card sale: the first day strictly
/// after `sale_date` that is neither a weekend nor a configured holiday.
pub fn settlement_date<H: HolidayCalendar + ?Sized>(
    sale_date: NaiveDate,
    holidays: &H,
) -> Result<NaiveDate, SettlementError> {
    let mut candidate = add_days(sale_date, 1);
    let mut attempts = 1;
    while is_weekend(candidate) || holidays.is_holiday(candidate) {
        if attempts >= MAX_SETTLEMENT_SEARCH_DAYS {
            return Err(SettlementError::DateUnresolved {
                sale_date,
                attempts,
            });
        }
        candidate = add_days(candidate, 1);
        attempts += 1;
    }
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{FixedHolidayCalendar, NoHolidays};
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_sale_settles_next_day() {
        // Wednesday 2026-01-07 -> Thursday 2026-01-08.
        assert_eq!(
            settlement_date(date(2026, 1, 7), &NoHolidays).unwrap(),
            date(2026, 1, 8)
        );
    }

    #[test]
    fn test_friday_sale_settles_monday() {
        // Friday 2026-01-02 -> Monday 2026-01-05.
        assert_eq!(
            settlement_date(date(2026, 1, 2), &NoHolidays).unwrap(),
            date(2026, 1, 5)
        );
    }

    #[test]
    fn test_holiday_pushes_settlement() {
        // Thursday 2026-01-08 is a holiday: Wednesday sale settles Friday.
        let cal = FixedHolidayCalendar::new([date(2026, 1, 8)]);
        assert_eq!(
            settlement_date(date(2026, 1, 7), &cal).unwrap(),
            date(2026, 1, 9)
        );
    }

    #[test]
    fn test_holiday_bridging_weekend() {
        // Friday holiday after a Thursday sale: skip Fri + weekend -> Monday.
        let cal = FixedHolidayCalendar::new([date(2026, 1, 9)]);
        assert_eq!(
            settlement_date(date(2026, 1, 8), &cal).unwrap(),
            date(2026, 1, 12)
        );
    }

    #[test]
    fn test_pathological_calendar_is_bounded() {
        struct AlwaysHoliday;
        impl crate::calendar::HolidayCalendar for AlwaysHoliday {
            fn is_holiday(&self, _date: NaiveDate) -> bool {
                true
            }
        }
        let err = settlement_date(date(2026, 1, 7), &AlwaysHoliday).unwrap_err();
        assert!(matches!(err, SettlementError::DateUnresolved { .. }));
    }

    fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (0i64..3650).prop_map(|offset| add_days(date(2024, 1, 1), offset))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// For any sale date, the settlement date is strictly later and
        /// never a weekend or holiday.
        #[test]
        fn prop_settlement_date_is_valid(
            sale_date in date_strategy(),
            holiday_offsets in prop::collection::hash_set(1i64..10, 0..5),
        ) {
            let holidays = FixedHolidayCalendar::new(
                holiday_offsets.iter().map(|o| add_days(sale_date, *o)),
            );
            let settled = settlement_date(sale_date, &holidays).unwrap();
            prop_assert!(settled > sale_date);
            prop_assert!(!is_weekend(settled));
            prop_assert!(!holidays.is_holiday(settled));
        }
    }
}
