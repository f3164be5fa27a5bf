//! Task model.
//!
//! A task is a weighted unit of work inside a project. Its weight is the
//! task's relative value: project progress counts weight, not tasks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A task as stored by the persistence layer.
///
/// `assigned_resource` is the single primary assignee. Additional
/// assignees live in [`TaskAssignment`](super::TaskAssignment) records on
/// the snapshot; both forms describe the same relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Owning project identifier.
    pub project_id: String,
    /// Human-readable name.
    pub name: String,
    /// Category tag ("Dev", "Fix", "Admin", "Procurement", ...).
    pub task_type: String,
    /// Relative value/effort. Tasks with weight <= 0 are left out of rollups.
    pub weight: f64,
    /// Planned start date.
    pub planned_start: Option<NaiveDate>,
    /// Planned end date.
    pub planned_end: Option<NaiveDate>,
    /// Actual completion (0..=100).
    pub actual_progress: f64,
    /// Primary assignee (resource ID).
    pub assigned_resource: Option<String>,
    /// Estimated effort in hours.
    pub estimated_hours: Option<f64>,
    /// Actual effort in hours.
    pub actual_hours: Option<f64>,
}

/// Completion bucket of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Progress is 0.
    NotStarted,
    /// Progress strictly between 0 and 100.
    InProgress,
    /// Progress is 100.
    Completed,
}

impl Task {
    /// Creates a new task with weight 1.0 and no progress.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            project_id: String::new(),
            name: String::new(),
            task_type: String::new(),
            weight: 1.0,
            planned_start: None,
            planned_end: None,
            actual_progress: 0.0,
            assigned_resource: None,
            estimated_hours: None,
            actual_hours: None,
        }
    }

    /// Sets the owning project.
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = project_id.into();
        self
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the task type tag.
    pub fn with_type(mut self, task_type: impl Into<String>) -> Self {
        self.task_type = task_type.into();
        self
    }

    /// Sets the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the planned date range.
    pub fn with_plan(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.planned_start = Some(start);
        self.planned_end = Some(end);
        self
    }

    /// Sets only the planned end date.
    pub fn with_planned_end(mut self, end: NaiveDate) -> Self {
        self.planned_end = Some(end);
        self
    }

    /// Sets the actual progress.
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.actual_progress = progress;
        self
    }

    /// Sets the primary assignee.
    pub fn with_assignee(mut self, resource_id: impl Into<String>) -> Self {
        self.assigned_resource = Some(resource_id.into());
        self
    }

    /// Sets estimated and actual effort hours.
    pub fn with_hours(mut self, estimated: Option<f64>, actual: Option<f64>) -> Self {
        self.estimated_hours = estimated;
        self.actual_hours = actual;
        self
    }

    /// Completion bucket for this task.
    pub fn status(&self) -> TaskStatus {
        if self.actual_progress >= 100.0 {
            TaskStatus::Completed
        } else if self.actual_progress <= 0.0 {
            TaskStatus::NotStarted
        } else {
            TaskStatus::InProgress
        }
    }

    /// Whether the task still has work left (progress < 100).
    #[inline]
    pub fn is_open(&self) -> bool {
        self.actual_progress < 100.0
    }

    /// Whether this task takes part in weighted rollups.
    #[inline]
    pub fn counts_toward_progress(&self) -> bool {
        self.weight > 0.0
    }

    /// Parsed category of this task.
    pub fn kind(&self) -> TaskType {
        TaskType::parse(&self.task_type)
    }
}

/// Recognized task categories.
///
/// Anything unrecognized is kept verbatim in `Other` and treated like
/// `Admin` where a template is needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    /// Software development.
    Dev,
    /// Bug fixing.
    Fix,
    /// Administrative work.
    Admin,
    /// Purchasing (PR/PO).
    Procurement,
    /// Unrecognized tag.
    Other(String),
}

impl TaskType {
    /// Parses a stored type tag. Matching is exact; `"Procurement (PR/PO)"`
    /// is accepted as an alias of `Procurement`.
    pub fn parse(tag: &str) -> Self {
        match tag.trim() {
            "Dev" => Self::Dev,
            "Fix" => Self::Fix,
            "Admin" => Self::Admin,
            "Procurement" | "Procurement (PR/PO)" => Self::Procurement,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether the category is delivery work that favors fast resources.
    pub fn is_delivery(&self) -> bool {
        matches!(self, Self::Dev | Self::Fix)
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dev => f.write_str("Dev"),
            Self::Fix => f.write_str("Fix"),
            Self::Admin => f.write_str("Admin"),
            Self::Procurement => f.write_str("Procurement"),
            Self::Other(tag) => f.write_str(tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 3, 13).unwrap();
        let task = Task::new("T1")
            .with_project("P1")
            .with_name("Login page")
            .with_type("Dev")
            .with_weight(3.0)
            .with_plan(start, end)
            .with_progress(40.0)
            .with_assignee("R1")
            .with_hours(Some(16.0), None);

        assert_eq!(task.id, "T1");
        assert_eq!(task.project_id, "P1");
        assert_eq!(task.kind(), TaskType::Dev);
        assert!((task.weight - 3.0).abs() < 1e-10);
        assert_eq!(task.planned_start, Some(start));
        assert_eq!(task.planned_end, Some(end));
        assert_eq!(task.assigned_resource.as_deref(), Some("R1"));
        assert_eq!(task.estimated_hours, Some(16.0));
        assert_eq!(task.actual_hours, None);
    }

    #[test]
    fn test_task_defaults() {
        let task = Task::new("T1");
        assert!((task.weight - 1.0).abs() < 1e-10);
        assert!((task.actual_progress - 0.0).abs() < 1e-10);
        assert!(task.assigned_resource.is_none());
        assert!(task.counts_toward_progress());
    }

    #[test]
    fn test_task_status_buckets() {
        assert_eq!(Task::new("a").status(), TaskStatus::NotStarted);
        assert_eq!(Task::new("b").with_progress(0.5).status(), TaskStatus::InProgress);
        assert_eq!(Task::new("c").with_progress(99.9).status(), TaskStatus::InProgress);
        assert_eq!(Task::new("d").with_progress(100.0).status(), TaskStatus::Completed);
        assert!(Task::new("e").with_progress(99.0).is_open());
        assert!(!Task::new("f").with_progress(100.0).is_open());
    }

    #[test]
    fn test_non_positive_weight_excluded() {
        assert!(!Task::new("a").with_weight(0.0).counts_toward_progress());
        assert!(!Task::new("b").with_weight(-1.0).counts_toward_progress());
    }

    #[test]
    fn test_task_type_parse() {
        assert_eq!(TaskType::parse("Dev"), TaskType::Dev);
        assert_eq!(TaskType::parse("Fix"), TaskType::Fix);
        assert_eq!(TaskType::parse("Admin"), TaskType::Admin);
        assert_eq!(TaskType::parse("Procurement"), TaskType::Procurement);
        assert_eq!(TaskType::parse("Procurement (PR/PO)"), TaskType::Procurement);
        assert_eq!(TaskType::parse("Research"), TaskType::Other("Research".into()));
        assert_eq!(TaskType::parse("Research").to_string(), "Research");
        assert!(TaskType::Fix.is_delivery());
        assert!(!TaskType::Admin.is_delivery());
    }
}
