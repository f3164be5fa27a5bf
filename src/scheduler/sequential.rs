//! Sequential single-worker scheduler.
//!
//! # Algorithm
//!
//! 1. The first subtask starts on `start_date` as given.
//! 2. Its end is found by stepping forward one calendar day at a time and
//!    counting only working days, until `estimated_days` are counted
//!    (fractional estimates round up). The start day is not counted.
//! 3. The next subtask starts the day after, moved forward past any
//!    non-working days.
//!
//! # Complexity
//! O(total calendar days spanned).

use chrono::{Days, NaiveDate};

use crate::models::{BusinessCalendar, ScheduledSubtask, Subtask};

/// Lays subtasks out back to back on a business calendar.
#[derive(Debug, Clone, Default)]
pub struct SequentialScheduler {
    calendar: BusinessCalendar,
}

impl SequentialScheduler {
    /// Creates a scheduler over the given calendar.
    pub fn new(calendar: BusinessCalendar) -> Self {
        Self { calendar }
    }

    /// Monday-to-Friday scheduler.
    pub fn weekdays() -> Self {
        Self::new(BusinessCalendar::weekdays())
    }

    /// The calendar in use.
    pub fn calendar(&self) -> &BusinessCalendar {
        &self.calendar
    }

    /// Places each subtask on the calendar, in input order.
    pub fn schedule(&self, subtasks: &[Subtask], start_date: NaiveDate) -> Vec<ScheduledSubtask> {
        let mut scheduled = Vec::with_capacity(subtasks.len());
        let mut current = start_date;

        for subtask in subtasks {
            let planned_start = current;
            let planned_end = self.calendar.advance(planned_start, subtask.estimated_days);

            scheduled.push(ScheduledSubtask {
                name: subtask.name.clone(),
                estimated_days: subtask.estimated_days,
                planned_start,
                planned_end,
            });

            let next = planned_end
                .checked_add_days(Days::new(1))
                .unwrap_or(planned_end);
            current = self.calendar.next_working_day(next);
        }

        if let (Some(first), Some(last)) = (scheduled.first(), scheduled.last()) {
            tracing::debug!(
                steps = scheduled.len(),
                start = %first.planned_start,
                end = %last.planned_end,
                "subtasks scheduled"
            );
        }
        scheduled
    }
}

/// Schedules subtasks from `start_date`, optionally skipping weekends.
pub fn schedule(subtasks: &[Subtask], start_date: NaiveDate, skip_weekends: bool) -> Vec<ScheduledSubtask> {
    SequentialScheduler::new(BusinessCalendar::with_weekends_skipped(skip_weekends))
        .schedule(subtasks, start_date)
}

/// Schedules subtasks over an explicit calendar (weekends and holidays).
pub fn schedule_with_calendar(
    subtasks: &[Subtask],
    start_date: NaiveDate,
    calendar: &BusinessCalendar,
) -> Vec<ScheduledSubtask> {
    SequentialScheduler::new(calendar.clone()).schedule(subtasks, start_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    // 2026-03-02 is a Monday.
    fn monday() -> NaiveDate {
        d(2026, 3, 2)
    }

    #[test]
    fn test_three_days_from_monday_ends_thursday() {
        let plan = schedule(&[Subtask::new("Build", 3.0)], monday(), true);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].planned_start, monday());
        assert_eq!(plan[0].planned_end, d(2026, 3, 5));
        assert_eq!(plan[0].planned_end.weekday(), Weekday::Thu);
    }

    #[test]
    fn test_five_days_from_thursday_crosses_weekend() {
        let thursday = d(2026, 3, 5);
        let plan = schedule(&[Subtask::new("Build", 5.0)], thursday, true);
        // Counted: Fri, Mon, Tue, Wed, Thu
        assert_eq!(plan[0].planned_end, d(2026, 3, 12));

        let no_skip = schedule(&[Subtask::new("Build", 5.0)], thursday, false);
        assert_eq!(no_skip[0].planned_end, d(2026, 3, 10));
    }

    #[test]
    fn test_sequential_no_overlap() {
        let subtasks = vec![
            Subtask::new("Plan", 1.0),
            Subtask::new("Execute", 2.0),
            Subtask::new("Review", 1.0),
        ];
        let plan = schedule(&subtasks, monday(), true);

        assert_eq!(plan[0].planned_start, d(2026, 3, 2));
        assert_eq!(plan[0].planned_end, d(2026, 3, 3));
        assert_eq!(plan[1].planned_start, d(2026, 3, 4));
        assert_eq!(plan[1].planned_end, d(2026, 3, 6));
        // Saturday after Friday's end is skipped.
        assert_eq!(plan[2].planned_start, d(2026, 3, 9));
        assert_eq!(plan[2].planned_end, d(2026, 3, 10));

        for pair in plan.windows(2) {
            assert!(pair[1].planned_start > pair[0].planned_end);
        }
    }

    #[test]
    fn test_next_start_skips_weekend_only_when_asked() {
        let subtasks = vec![Subtask::new("A", 4.0), Subtask::new("B", 1.0)];
        // Mon + 4 = Fri; next start would be Saturday.
        let skip = schedule(&subtasks, monday(), true);
        assert_eq!(skip[1].planned_start.weekday(), Weekday::Mon);

        let keep = schedule(&subtasks, monday(), false);
        assert_eq!(keep[0].planned_end, d(2026, 3, 6));
        assert_eq!(keep[1].planned_start, d(2026, 3, 7));
    }

    #[test]
    fn test_fractional_and_zero_durations() {
        let subtasks = vec![Subtask::new("Half", 0.5), Subtask::new("Sign-off", 0.0)];
        let plan = schedule(&subtasks, monday(), true);
        assert_eq!(plan[0].planned_end, d(2026, 3, 3));
        assert_eq!(plan[1].planned_start, d(2026, 3, 4));
        assert_eq!(plan[1].planned_end, d(2026, 3, 4));
        assert!((plan[0].estimated_days - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_weekend_start_date_kept() {
        let saturday = d(2026, 3, 7);
        let plan = schedule(&[Subtask::new("A", 1.0)], saturday, true);
        assert_eq!(plan[0].planned_start, saturday);
        assert_eq!(plan[0].planned_end, d(2026, 3, 9));
    }

    #[test]
    fn test_empty_input() {
        assert!(schedule(&[], monday(), true).is_empty());
    }

    #[test]
    fn test_holidays() {
        let cal = BusinessCalendar::weekdays().with_holiday(d(2026, 3, 3));
        let plan = schedule_with_calendar(
            &[Subtask::new("A", 1.0), Subtask::new("B", 1.0)],
            monday(),
            &cal,
        );
        // Tuesday is a holiday, so one counted day lands on Wednesday.
        assert_eq!(plan[0].planned_end, d(2026, 3, 4));
        assert_eq!(plan[1].planned_start, d(2026, 3, 5));
        assert_eq!(plan[1].planned_end, d(2026, 3, 6));
    }

    #[test]
    fn test_scheduler_struct() {
        let scheduler = SequentialScheduler::weekdays();
        assert!(scheduler.calendar().skip_weekends);
        let plan = scheduler.schedule(&[Subtask::new("A", 2.0)], monday());
        assert_eq!(plan[0].planned_end, d(2026, 3, 4));
    }
}
