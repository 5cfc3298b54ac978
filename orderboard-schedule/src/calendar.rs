//! Business-day arithmetic. Saturdays and Sundays are the only non-business days.

use chrono::{Datelike, NaiveDate, Weekday};

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Walk forward one calendar day at a time until `days` business days have been counted.
///
/// With `days == 0` the date is returned unchanged.
pub fn add_business_days(date: NaiveDate, days: u32) -> NaiveDate {
    let mut current = date;
    let mut counted = 0;
    while counted < days {
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
        if is_business_day(current) {
            counted += 1;
        }
    }
    current
}

/// `date` itself when it is a business day, otherwise the following Monday.
pub fn next_business_day_on_or_after(date: NaiveDate) -> NaiveDate {
    let mut current = date;
    while !is_business_day(current) {
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_weekends_are_not_business_days() {
        assert!(is_business_day(d(2024, 5, 17))); // Friday
        assert!(!is_business_day(d(2024, 5, 18)));
        assert!(!is_business_day(d(2024, 5, 19)));
        assert!(is_business_day(d(2024, 5, 20)));
    }

    #[test]
    fn test_add_business_days_skips_weekend() {
        assert_eq!(add_business_days(d(2024, 5, 17), 1), d(2024, 5, 20));
        assert_eq!(add_business_days(d(2024, 5, 15), 7), d(2024, 5, 24));
        assert_eq!(add_business_days(d(2024, 5, 15), 10), d(2024, 5, 29));
    }

    #[test]
    fn test_add_from_weekend_lands_on_monday() {
        assert_eq!(add_business_days(d(2024, 5, 18), 1), d(2024, 5, 20));
        assert_eq!(add_business_days(d(2024, 5, 19), 1), d(2024, 5, 20));
    }

    #[test]
    fn test_zero_days_is_identity() {
        assert_eq!(add_business_days(d(2024, 5, 18), 0), d(2024, 5, 18));
    }

    #[test]
    fn test_next_business_day_on_or_after() {
        assert_eq!(next_business_day_on_or_after(d(2024, 5, 15)), d(2024, 5, 15));
        assert_eq!(next_business_day_on_or_after(d(2024, 5, 18)), d(2024, 5, 20));
    }

    #[test]
    fn test_results_never_fall_on_weekend() {
        let start = d(2024, 1, 1);
        for offset in 0..60 {
            let date = start + chrono::Duration::days(offset);
            for n in 1..15 {
                assert!(is_business_day(add_business_days(date, n)));
            }
        }
    }
}
