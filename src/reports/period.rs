//! Period filtering
//!
//! Narrows a collection of dated records to the current week, month or
//! year. Weeks start on Monday and every window includes both endpoints.
//! "Current" is always relative to the `today` argument.

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{Period, Transaction};

/// Anything that occurs on a calendar date
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for Transaction {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// An inclusive date window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Monday through Sunday of the week containing `date`
    pub fn week_of(date: NaiveDate) -> Self {
        let start = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
        Self::new(start, start + Duration::days(6))
    }

    /// First through last day of the month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let next_month = if date.month() == 12 {
            NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
        };
        let end = next_month
            .and_then(|d| d.pred_opt())
            .unwrap_or(date);
        Self::new(start, end)
    }

    /// January 1 through December 31 of the year containing `date`
    pub fn year_of(date: NaiveDate) -> Self {
        let start = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
        let end = NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date);
        Self::new(start, end)
    }
}

impl Period {
    /// The date window for this period, or `None` for `All`
    pub fn range(&self, today: NaiveDate) -> Option<DateRange> {
        match self {
            Period::All => None,
            Period::Week => Some(DateRange::week_of(today)),
            Period::Month => Some(DateRange::month_of(today)),
            Period::Year => Some(DateRange::year_of(today)),
        }
    }
}

/// Return the records dated within `period`, preserving their order.
///
/// `Period::All` returns the whole collection.
pub fn filter_by_period<T>(records: &[T], period: Period, today: NaiveDate) -> Vec<T>
where
    T: Dated + Clone,
{
    match period.range(today) {
        None => records.to_vec(),
        Some(range) => records
            .iter()
            .filter(|r| range.contains(r.date()))
            .cloned()
            .collect(),
    }
}
