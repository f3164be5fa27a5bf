//! Value-based progress aggregation.
//!
//! Project progress is weighted by task value, not task count:
//!
//! ```text
//! progress = Σ (actual_i / 100 × weight_i) / Σ weight_i × 100
//! ```
//!
//! Tasks with weight <= 0 are excluded from both sums. An empty (or
//! zero-weight) set yields 0.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Actual progress | Weighted mean of `actual_progress` |
//! | Planned progress | Weighted mean of date-expected completion at `as_of` |
//! | Weekly snapshot | ISO week + (planned, actual) pair for plan-vs-actual curves |

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::Task;

/// Weighted completion of a task set (0..=100).
///
/// # Example
/// ```
/// use u_pm::models::Task;
/// use u_pm::progress::aggregate_progress;
///
/// let tasks = vec![
///     Task::new("T1").with_weight(3.0).with_progress(100.0),
///     Task::new("T2").with_weight(1.0),
/// ];
/// assert!((aggregate_progress(&tasks) - 75.0).abs() < 1e-10);
/// ```
pub fn aggregate_progress<'a, I>(tasks: I) -> f64
where
    I: IntoIterator<Item = &'a Task>,
{
    weighted_mean(tasks, |t| t.actual_progress)
}

/// Weighted completion the plan expects by `as_of` (0..=100).
///
/// Each task contributes `elapsed / total × 100`, clamped to 0..=100.
/// Tasks without a usable date range contribute 0 before their planned
/// end and 100 on or after it (0 if there is no end date either).
pub fn planned_progress<'a, I>(tasks: I, as_of: NaiveDate) -> f64
where
    I: IntoIterator<Item = &'a Task>,
{
    weighted_mean(tasks, |t| expected_task_progress(t, as_of))
}

/// Completion a single task is expected to have reached by `as_of`.
pub fn expected_task_progress(task: &Task, as_of: NaiveDate) -> f64 {
    match (task.planned_start, task.planned_end) {
        (Some(start), Some(end)) if end > start => {
            let total = (end - start).num_days() as f64;
            let elapsed = (as_of - start).num_days() as f64;
            (elapsed / total * 100.0).clamp(0.0, 100.0)
        }
        (_, Some(end)) => {
            if as_of >= end {
                100.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

fn weighted_mean<'a, I, F>(tasks: I, value: F) -> f64
where
    I: IntoIterator<Item = &'a Task>,
    F: Fn(&Task) -> f64,
{
    let (weighted, total_weight) = tasks
        .into_iter()
        .filter(|t| t.counts_toward_progress())
        .fold((0.0, 0.0), |(acc, w), t| {
            (acc + value(t) / 100.0 * t.weight, w + t.weight)
        });

    if total_weight > 0.0 {
        weighted / total_weight * 100.0
    } else {
        0.0
    }
}

/// One point of a project's plan-vs-actual curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySnapshot {
    /// Project the point belongs to.
    pub project_id: String,
    /// ISO week number of `as_of`.
    pub week_number: u32,
    /// Date the snapshot was taken.
    pub as_of: NaiveDate,
    /// Planned accumulated progress (0..=100).
    pub plan_acc: f64,
    /// Actual accumulated progress (0..=100).
    pub actual_acc: f64,
}

impl WeeklySnapshot {
    /// Captures planned and actual weighted progress for a project's tasks.
    pub fn capture(project_id: impl Into<String>, tasks: &[&Task], as_of: NaiveDate) -> Self {
        let snapshot = Self {
            project_id: project_id.into(),
            week_number: as_of.iso_week().week(),
            as_of,
            plan_acc: planned_progress(tasks.iter().copied(), as_of),
            actual_acc: aggregate_progress(tasks.iter().copied()),
        };
        tracing::debug!(
            project_id = %snapshot.project_id,
            week = snapshot.week_number,
            plan = snapshot.plan_acc,
            actual = snapshot.actual_acc,
            "weekly snapshot captured"
        );
        snapshot
    }

    /// Actual minus planned progress; negative means behind plan.
    pub fn variance(&self) -> f64 {
        self.actual_acc - self.plan_acc
    }
}
