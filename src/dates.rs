//! Calendar iteration over the harvest window.

use chrono::{Days, NaiveDate};

/// Inclusive ascending range of calendar dates, one day per step.
///
/// Yields nothing when `start` is after `end`.
#[derive(Debug, Clone)]
pub struct DateRange {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            next: Some(start),
            end,
        }
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next.filter(|d| *d <= self.end)?;
        self.next = current.checked_add_days(Days::new(1));
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_includes_both_ends() {
        let days: Vec<_> = DateRange::new(ymd(2025, 1, 24), ymd(2025, 1, 25)).collect();
        assert_eq!(days, vec![ymd(2025, 1, 24), ymd(2025, 1, 25)]);
    }

    #[test]
    fn test_single_day_when_start_is_end() {
        let days: Vec<_> = DateRange::new(ymd(2025, 3, 1), ymd(2025, 3, 1)).collect();
        assert_eq!(days, vec![ymd(2025, 3, 1)]);
    }

    #[test]
    fn test_empty_when_start_after_end() {
        assert_eq!(DateRange::new(ymd(2025, 3, 2), ymd(2025, 3, 1)).count(), 0);
    }

    #[test]
    fn test_visits_every_day_once_in_order_across_month_and_leap_day() {
        let days: Vec<_> = DateRange::new(ymd(2024, 2, 27), ymd(2024, 3, 2)).collect();
        assert_eq!(
            days,
            vec![
                ymd(2024, 2, 27),
                ymd(2024, 2, 28),
                ymd(2024, 2, 29),
                ymd(2024, 3, 1),
                ymd(2024, 3, 2),
            ]
        );
        assert!(days.windows(2).all(|w| w[1] - w[0] == chrono::Duration::days(1)));
    }

    #[test]
    fn test_full_year_has_no_gaps() {
        let count = DateRange::new(ymd(2025, 1, 1), ymd(2025, 12, 31)).count();
        assert_eq!(count, 365);
    }

    #[test]
    fn test_stops_at_max_date() {
        let days: Vec<_> = DateRange::new(NaiveDate::MAX, NaiveDate::MAX).collect();
        assert_eq!(days, vec![NaiveDate::MAX]);
    }
}
