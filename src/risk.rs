//! Per-task risk prediction.
//!
//! A task's risk score is the sum of three independent signals, capped at
//! 100:
//!
//! | Signal | Condition | Points |
//! |--------|-----------|--------|
//! | Schedule | past `planned_end` | 40 |
//! | | due within 2 days | 30 |
//! | | due within 7 days | 15 |
//! | Progress | expected − actual > 30 | 30 |
//! | | expected − actual > 15 | 15 |
//! | Staffing | nobody assigned | 20 |
//!
//! Only the first matching band of each signal applies. Expected progress
//! is `elapsed / total × 100` over the planned window and is not clamped,
//! so a task past its end date keeps accumulating gap.
//!
//! Recommendations are derived from the factor text, one per factor.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::models::{ProjectSnapshot, Task};

const OVERDUE_POINTS: u32 = 40;
const DUE_VERY_SOON_POINTS: u32 = 30;
const DUE_SOON_POINTS: u32 = 15;
const LARGE_GAP_POINTS: u32 = 30;
const GAP_POINTS: u32 = 15;
const UNSTAFFED_POINTS: u32 = 20;

/// Discrete risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskLevel {
    /// Score < 30.
    Low,
    /// Score 30..50.
    Medium,
    /// Score 50..70.
    High,
    /// Score >= 70.
    Critical,
}

impl RiskLevel {
    /// Band for a score.
    pub fn from_score(score: u32) -> Self {
        match score {
            70..=u32::MAX => Self::Critical,
            50..=69 => Self::High,
            30..=49 => Self::Medium,
            _ => Self::Low,
        }
    }

    /// Display colour.
    pub fn color(self) -> &'static str {
        match self {
            Self::Critical => "red",
            Self::High => "orange",
            Self::Medium => "yellow",
            Self::Low => "green",
        }
    }

    /// High or Critical.
    pub fn is_elevated(self) -> bool {
        self >= Self::High
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        };
        f.write_str(label)
    }
}

/// Risk of one task at one evaluation date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    /// Task evaluated.
    pub task_id: String,
    /// 0..=100.
    pub score: u32,
    /// Band of `score`.
    pub level: RiskLevel,
    /// Signals that fired, in schedule/progress/staffing order.
    pub factors: Vec<String>,
    /// Suggested actions.
    pub recommendations: Vec<String>,
}

/// Scores task risk against a snapshot's assignments.
#[derive(Debug, Clone, Copy)]
pub struct RiskPredictor<'a> {
    snapshot: &'a ProjectSnapshot,
}

impl<'a> RiskPredictor<'a> {
    /// Creates a predictor over a snapshot.
    pub fn new(snapshot: &'a ProjectSnapshot) -> Self {
        Self { snapshot }
    }

    /// Assesses a task as of `today`.
    pub fn assess(&self, task: &Task, today: NaiveDate) -> RiskAssessment {
        let mut score = 0u32;
        let mut factors = Vec::new();

        let signals = [
            schedule_signal(task, today),
            progress_signal(task, today),
            staffing_signal(task, self.snapshot),
        ];
        for (points, factor) in signals.into_iter().flatten() {
            score += points;
            factors.push(factor);
        }

        let score = score.min(100);
        let level = RiskLevel::from_score(score);
        tracing::debug!(task = %task.id, score, level = %level, "risk assessed");

        RiskAssessment {
            task_id: task.id.clone(),
            score,
            level,
            recommendations: recommendations_for(&factors),
            factors,
        }
    }
}

/// Assesses a task's risk as of `today`.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use u_pm::models::{ProjectSnapshot, Task};
/// use u_pm::risk::{predict_risk, RiskLevel};
///
/// let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
/// let task = Task::new("T1")
///     .with_planned_end(NaiveDate::from_ymd_opt(2026, 3, 5).unwrap())
///     .with_assignee("R1");
/// let risk = predict_risk(&task, &ProjectSnapshot::new(), today);
/// assert_eq!(risk.score, 40);
/// assert_eq!(risk.level, RiskLevel::Medium);
/// ```
pub fn predict_risk(task: &Task, snapshot: &ProjectSnapshot, today: NaiveDate) -> RiskAssessment {
    RiskPredictor::new(snapshot).assess(task, today)
}

fn schedule_signal(task: &Task, today: NaiveDate) -> Option<(u32, String)> {
    let end = task.planned_end?;
    let days_remaining = (end - today).num_days();
    match days_remaining {
        d if d < 0 => Some((OVERDUE_POINTS, format!("Overdue by {} days", -d))),
        d if d <= 2 => Some((DUE_VERY_SOON_POINTS, format!("Due in {d} days"))),
        d if d <= 7 => Some((DUE_SOON_POINTS, format!("Due in {d} days"))),
        _ => None,
    }
}

fn progress_signal(task: &Task, today: NaiveDate) -> Option<(u32, String)> {
    let (start, end) = (task.planned_start?, task.planned_end?);
    let total = (end - start).num_days();
    let elapsed = (today - start).num_days();
    if total <= 0 || elapsed <= 0 {
        return None;
    }

    let expected = elapsed as f64 / total as f64 * 100.0;
    let gap = expected - task.actual_progress;
    let points = if gap > 30.0 {
        LARGE_GAP_POINTS
    } else if gap > 15.0 {
        GAP_POINTS
    } else {
        return None;
    };
    Some((points, format!("{gap:.0}% behind schedule")))
}

fn staffing_signal(task: &Task, snapshot: &ProjectSnapshot) -> Option<(u32, String)> {
    if snapshot.is_staffed(task) {
        None
    } else {
        Some((UNSTAFFED_POINTS, "No resource assigned".to_string()))
    }
}

fn recommendations_for(factors: &[String]) -> Vec<String> {
    let mut recommendations = Vec::new();
    for factor in factors {
        if factor.contains("Overdue") || factor.contains("Due in") {
            recommendations.push("Consider extending deadline or adding resources".to_string());
        }
        if factor.contains("behind schedule") {
            recommendations.push("Increase task priority and check blockers".to_string());
        }
        if factor.contains("No resource assigned") {
            recommendations.push("Assign qualified resource immediately".to_string());
        }
    }
    if recommendations.is_empty() {
        recommendations.push("Continue monitoring task progress".to_string());
    }
    recommendations
}
