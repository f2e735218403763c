//! Business-day calendar (Monday to Friday, no holidays)

use chrono::{Datelike, NaiveDate, Weekday};

/// Whether `date` falls on Monday through Friday
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Every business day in `[start, end]`, ascending
pub fn business_days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| is_business_day(*d))
        .collect()
}

/// The `count` business days strictly after `last`
pub fn business_days_after(last: NaiveDate, count: usize) -> Vec<NaiveDate> {
    last.iter_days()
        .skip(1)
        .filter(|d| is_business_day(*d))
        .take(count)
        .collect()
}

/// The first business day strictly after `date`
pub fn next_business_day(date: NaiveDate) -> Option<NaiveDate> {
    business_days_after(date, 1).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekends_are_skipped() {
        // 2024-01-05 is a Friday
        assert!(is_business_day(date(2024, 1, 5)));
        assert!(!is_business_day(date(2024, 1, 6)));
        assert!(!is_business_day(date(2024, 1, 7)));
        assert_eq!(next_business_day(date(2024, 1, 5)), Some(date(2024, 1, 8)));
    }

    #[test]
    fn test_grid_between() {
        let grid = business_days_between(date(2024, 1, 4), date(2024, 1, 9));
        assert_eq!(
            grid,
            vec![date(2024, 1, 4), date(2024, 1, 5), date(2024, 1, 8), date(2024, 1, 9)]
        );
        assert!(business_days_between(date(2024, 1, 6), date(2024, 1, 7)).is_empty());
    }

    #[test]
    fn test_days_after() {
        let days = business_days_after(date(2024, 1, 4), 3);
        assert_eq!(days, vec![date(2024, 1, 5), date(2024, 1, 8), date(2024, 1, 9)]);
        assert!(business_days_after(date(2024, 1, 4), 0).is_empty());
    }
}
