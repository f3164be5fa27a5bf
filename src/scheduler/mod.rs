//! Business-day layout of subtask plans.
//!
//! # Algorithm
//!
//! `SequentialScheduler` models a single worker doing subtasks strictly in
//! order. It never reorders steps and never overlaps them: each subtask
//! starts on the working day after the previous one ends.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_pm::models::Subtask;
//! use u_pm::scheduler::schedule;
//!
//! let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
//! let plan = schedule(&[Subtask::new("Build", 3.0)], monday, true);
//! assert_eq!(plan[0].planned_end, NaiveDate::from_ymd_opt(2026, 3, 5).unwrap());
//! ```

mod sequential;

pub use sequential::{schedule, schedule_with_calendar, SequentialScheduler};
