//! Project health rollup.
//!
//! Buckets a project's tasks by completion, runs the risk predictor over
//! each, and turns the counts into a health verdict and a short list of
//! recommendations.
//!
//! # Health
//!
//! | Completion rate | Health | Colour |
//! |-----------------|--------|--------|
//! | >= 80 | Excellent | green |
//! | >= 60 | Good | blue |
//! | >= 40 | Fair | yellow |
//! | < 40 | At Risk | red |

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::error::{EngineError, Result};
use crate::models::{ProjectSnapshot, TaskStatus};
use crate::progress::aggregate_progress;
use crate::risk::{RiskAssessment, RiskPredictor};

/// Project health verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProjectHealth {
    /// Completion >= 80%.
    Excellent,
    /// Completion >= 60%.
    Good,
    /// Completion >= 40%.
    Fair,
    /// Completion < 40%, or no tasks.
    #[serde(rename = "At Risk")]
    AtRisk,
}

impl ProjectHealth {
    /// Verdict for a completion rate in percent.
    pub fn from_completion_rate(rate: f64) -> Self {
        if rate >= 80.0 {
            Self::Excellent
        } else if rate >= 60.0 {
            Self::Good
        } else if rate >= 40.0 {
            Self::Fair
        } else {
            Self::AtRisk
        }
    }

    /// Display colour.
    pub fn color(self) -> &'static str {
        match self {
            Self::Excellent => "green",
            Self::Good => "blue",
            Self::Fair => "yellow",
            Self::AtRisk => "red",
        }
    }
}

impl fmt::Display for ProjectHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::AtRisk => "At Risk",
        };
        f.write_str(label)
    }
}

/// A task at High or Critical risk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighRiskTask {
    /// Task id.
    pub task_id: String,
    /// Task name.
    pub task_name: String,
    /// Its assessment.
    pub risk: RiskAssessment,
}

/// Health summary of one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectInsight {
    /// Project evaluated.
    pub project_id: String,
    /// Verdict.
    pub health: ProjectHealth,
    /// Completed / total × 100, one decimal.
    pub completion_rate: f64,
    /// Weighted project progress.
    pub weighted_progress: f64,
    /// Task count.
    pub total_tasks: usize,
    /// Tasks at 100%.
    pub completed_tasks: usize,
    /// Tasks strictly between 0% and 100%.
    pub in_progress_tasks: usize,
    /// Tasks at 0%.
    pub not_started_tasks: usize,
    /// Number of High/Critical tasks, before the list cap.
    pub high_risk_count: usize,
    /// First High/Critical tasks, in snapshot order.
    pub high_risk_tasks: Vec<HighRiskTask>,
    /// Suggested actions.
    pub recommendations: Vec<String>,
}

/// Summarizes a project's health as of `today`, listing at most
/// `high_risk_limit` high-risk tasks.
///
/// # Errors
/// `ProjectNotFound` if the project is not in the snapshot.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use u_pm::insights::{generate_insights, ProjectHealth};
/// use u_pm::models::{Project, ProjectSnapshot, Task};
///
/// let mut snapshot = ProjectSnapshot::new().with_project(Project::new("P1"));
/// for i in 0..10 {
///     let progress = if i < 8 { 100.0 } else { 0.0 };
///     snapshot = snapshot.with_task(
///         Task::new(format!("T{i}")).with_project("P1").with_progress(progress).with_assignee("R1"),
///     );
/// }
///
/// let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
/// let insight = generate_insights(&snapshot, "P1", today, 5).unwrap();
/// assert_eq!(insight.completion_rate, 80.0);
/// assert_eq!(insight.health, ProjectHealth::Excellent);
/// ```
pub fn generate_insights(
    snapshot: &ProjectSnapshot,
    project_id: &str,
    today: NaiveDate,
    high_risk_limit: usize,
) -> Result<ProjectInsight> {
    if snapshot.project(project_id).is_none() {
        return Err(EngineError::ProjectNotFound(project_id.to_string()));
    }

    let tasks: Vec<_> = snapshot.project_tasks(project_id).collect();
    if tasks.is_empty() {
        return Ok(ProjectInsight {
            project_id: project_id.to_string(),
            health: ProjectHealth::AtRisk,
            completion_rate: 0.0,
            weighted_progress: 0.0,
            total_tasks: 0,
            completed_tasks: 0,
            in_progress_tasks: 0,
            not_started_tasks: 0,
            high_risk_count: 0,
            high_risk_tasks: Vec::new(),
            recommendations: vec!["Start by creating tasks for this project".to_string()],
        });
    }

    let count = |status: TaskStatus| tasks.iter().filter(|t| t.status() == status).count();
    let total = tasks.len();
    let completed = count(TaskStatus::Completed);
    let in_progress = count(TaskStatus::InProgress);
    let not_started = count(TaskStatus::NotStarted);

    let predictor = RiskPredictor::new(snapshot);
    let elevated: Vec<HighRiskTask> = tasks
        .iter()
        .filter_map(|task| {
            let risk = predictor.assess(task, today);
            risk.level.is_elevated().then(|| HighRiskTask {
                task_id: task.id.clone(),
                task_name: task.name.clone(),
                risk,
            })
        })
        .collect();
    let high_risk_count = elevated.len();

    let rate = completed as f64 / total as f64 * 100.0;
    let completion_rate = (rate * 10.0).round() / 10.0;
    // Thresholds use the unrounded rate.
    let health = ProjectHealth::from_completion_rate(rate);

    let mut recommendations = Vec::new();
    if high_risk_count > 0 {
        recommendations.push(format!("{high_risk_count} task(s) at high risk - review immediately"));
    }
    if not_started > in_progress + completed {
        recommendations.push("Many tasks not started - consider sprint planning".to_string());
    }
    if in_progress > 5 {
        recommendations.push("Too many tasks in progress - focus on completion".to_string());
    }
    if recommendations.is_empty() {
        recommendations.push("Project is on track - keep up the good work!".to_string());
    }

    tracing::debug!(
        project = project_id,
        completion_rate,
        health = %health,
        high_risk = high_risk_count,
        "insights generated"
    );

    Ok(ProjectInsight {
        project_id: project_id.to_string(),
        health,
        completion_rate,
        weighted_progress: aggregate_progress(tasks.iter().copied()),
        total_tasks: total,
        completed_tasks: completed,
        in_progress_tasks: in_progress,
        not_started_tasks: not_started,
        high_risk_count,
        high_risk_tasks: elevated.into_iter().take(high_risk_limit).collect(),
        recommendations,
    })
}
