//! Calendar utilities for the finance tracker.
//!
//! Month identity is the `(year, month)` pair, independent of day-of-month:
//! budgets join to transactions on it, and the monthly trend buckets by it.
//! Rendering a month as text goes through an injectable [`MonthLabeler`] so
//! aggregation stays decoupled from display formatting.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// A calendar month, normalized away from any day-of-month.
///
/// Ordering is chronological: `(year, month)` lexicographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> DomainResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::validation(format!(
                "month must be 1-12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of the month; the normalized form budget records key off.
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("month key holds a valid (year, month)")
    }

    /// Last day of the month, leap-years included.
    pub fn last_day(self) -> NaiveDate {
        self.next().first_day().pred_opt().expect("day before a month start exists")
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The month as "YYYY-MM".
    pub fn to_year_month(self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Renders a month for display. Injected wherever labels leave the engine.
pub type MonthLabeler = fn(MonthKey) -> String;

/// "Jan 2025" — the trend/report label format.
pub fn short_label(month: MonthKey) -> String {
    month.first_day().format("%b %Y").to_string()
}

/// "January 2025" — the budget history label format.
pub fn long_label(month: MonthKey) -> String {
    month.first_day().format("%B %Y").to_string()
}

/// An inclusive calendar date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::validation(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The range covering exactly one calendar month.
    pub fn month(month: MonthKey) -> Self {
        Self {
            start: month.first_day(),
            end: month.last_day(),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Every calendar month fully or partially inside the range, in
    /// chronological order. Never empty: a single-day range yields one month.
    pub fn months(&self) -> Vec<MonthKey> {
        let mut months = Vec::new();
        let mut current = MonthKey::from_date(self.start);
        let last = MonthKey::from_date(self.end);
        while current <= last {
            months.push(current);
            current = current.next();
        }
        months
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = DateRange::new(d(2025, 3, 10), d(2025, 3, 9)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn single_day_range_spans_one_month() {
        let range = DateRange::new(d(2025, 2, 14), d(2025, 2, 14)).unwrap();
        assert_eq!(range.months(), vec![MonthKey { year: 2025, month: 2 }]);
    }

    #[test]
    fn months_cross_year_boundaries_without_gaps() {
        let range = DateRange::new(d(2024, 11, 20), d(2025, 2, 3)).unwrap();
        let months = range.months();
        assert_eq!(
            months,
            vec![
                MonthKey { year: 2024, month: 11 },
                MonthKey { year: 2024, month: 12 },
                MonthKey { year: 2025, month: 1 },
                MonthKey { year: 2025, month: 2 },
            ]
        );
    }

    #[test]
    fn last_day_handles_leap_february() {
        assert_eq!(MonthKey::new(2024, 2).unwrap().last_day(), d(2024, 2, 29));
        assert_eq!(MonthKey::new(2025, 2).unwrap().last_day(), d(2025, 2, 28));
    }

    #[test]
    fn labels_render_short_and_long_forms() {
        let month = MonthKey::new(2025, 1).unwrap();
        assert_eq!(short_label(month), "Jan 2025");
        assert_eq!(long_label(month), "January 2025");
        assert_eq!(month.to_year_month(), "2025-01");
    }
}
