use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::collections::HashSet;

use crate::holiday::Holiday;

/// Mon-Fri work week plus a set of official holidays.
///
/// A day is *available* (a work day someone would have to request as leave)
/// when it is neither a weekend day nor an official holiday.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkCalendar {
    holidays: HashSet<NaiveDate>,
}

impl WorkCalendar {
    pub const WEEKEND: [Weekday; 2] = [Weekday::Sat, Weekday::Sun];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_holidays(holidays: &[Holiday]) -> Self {
        let mut calendar = Self::new();
        calendar.add_holidays(holidays.iter().map(|h| h.date));
        calendar
    }

    /// Add a single holiday
    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
    }

    /// Add multiple holidays at once
    pub fn add_holidays<I>(&mut self, dates: I)
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        self.holidays.extend(dates);
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    pub fn is_weekend(date: NaiveDate) -> bool {
        Self::WEEKEND.contains(&date.weekday())
    }

    /// Check if a date is a work day that would need a leave request
    pub fn is_available(&self, date: NaiveDate) -> bool {
        !self.is_holiday(date) && !Self::is_weekend(date)
    }

    /// Whole days from `start` to `end` (negative when `end` precedes `start`)
    pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
        end.signed_duration_since(start).num_days()
    }

    /// Every calendar day in `start..=end`
    pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut current = Some(start);

        while let Some(day) = current.filter(|d| *d <= end) {
            days.push(day);
            current = day.succ_opt();
        }
        days
    }

    /// Get all available days in a date range
    pub fn available_days_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        Self::days_in_range(start, end)
            .into_iter()
            .filter(|d| self.is_available(*d))
            .collect()
    }

    /// Count available days in a date range
    pub fn count_available_days(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        let mut count = 0;
        let mut current = Some(start);

        while let Some(day) = current.filter(|d| *d <= end) {
            if self.is_available(day) {
                count += 1;
            }
            current = day.succ_opt();
        }
        count
    }

    /// Monday of the work week containing `date`, `None` past the start of
    /// the representable range
    pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
        date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
    }

    /// Friday of the work week containing `date`
    pub fn week_end(date: NaiveDate) -> Option<NaiveDate> {
        Self::week_start(date)?.checked_add_days(Days::new(4))
    }
}
