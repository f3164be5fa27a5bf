//! Business-day calendar.
//!
//! Decides which dates count as working days when laying subtasks out on
//! a timeline: optionally skips Saturdays and Sundays, and always skips
//! any listed holidays.
//!
//! # Precedence
//! A date is a working day iff:
//! - It is not a weekend day (when `skip_weekends` is set), AND
//! - It is not in `holidays`.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Working-day calendar for sequential scheduling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessCalendar {
    /// Whether Saturday and Sunday are non-working.
    pub skip_weekends: bool,
    /// Additional non-working dates.
    pub holidays: BTreeSet<NaiveDate>,
}

impl BusinessCalendar {
    /// Monday-to-Friday calendar with no holidays.
    pub fn weekdays() -> Self {
        Self {
            skip_weekends: true,
            holidays: BTreeSet::new(),
        }
    }

    /// Calendar where every date is a working day.
    pub fn every_day() -> Self {
        Self::default()
    }

    /// Calendar that skips weekends only when asked to.
    pub fn with_weekends_skipped(skip_weekends: bool) -> Self {
        Self {
            skip_weekends,
            holidays: BTreeSet::new(),
        }
    }

    /// Adds a holiday.
    pub fn with_holiday(mut self, date: NaiveDate) -> Self {
        self.holidays.insert(date);
        self
    }

    /// Adds several holidays.
    pub fn with_holidays(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.holidays.extend(dates);
        self
    }

    /// Whether `date` counts toward a duration.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        if self.skip_weekends && matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }
        !self.holidays.contains(&date)
    }

    /// First working day at or after `date`.
    pub fn next_working_day(&self, date: NaiveDate) -> NaiveDate {
        let mut current = date;
        while !self.is_working_day(current) && current < NaiveDate::MAX {
            current = next_day(current);
        }
        current
    }

    /// Walks forward from `start` one calendar day at a time until
    /// `days` working days have been counted, and returns the last day
    /// reached.
    ///
    /// `start` itself is never counted. Fractional durations round up to
    /// whole days; a duration of zero (or less) returns `start`.
    pub fn advance(&self, start: NaiveDate, days: f64) -> NaiveDate {
        let mut end = start;
        let mut counted = 0.0;
        while counted < days && end < NaiveDate::MAX {
            end = next_day(end);
            if self.is_working_day(end) {
                counted += 1.0;
            }
        }
        end
    }
}

#[inline]
fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX)
}
