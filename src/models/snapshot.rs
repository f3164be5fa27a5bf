//! Read-only snapshot of persisted project state.
//!
//! Scoring functions never query storage. The caller loads projects, tasks,
//! resources, and multi-assign links into a [`ProjectSnapshot`] and hands
//! that to the engine.
//!
//! A task's assignees are the union of its primary `assigned_resource`
//! and every [`TaskAssignment`] pointing at it, de-duplicated by resource.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Resource, Task};
use crate::error::{EngineError, Result};
use crate::progress::aggregate_progress;

/// A project record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Persisted weighted progress (0..=100).
    pub progress: f64,
}

impl Project {
    /// Creates a project with zero progress.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            progress: 0.0,
        }
    }

    /// Sets the project name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Multi-assign link between a task and a resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskAssignment {
    /// Assigned task.
    pub task_id: String,
    /// Assigned resource.
    pub resource_id: String,
    /// Role on the task ("Lead", "Support", "Reviewer", ...).
    pub role: Option<String>,
}

impl TaskAssignment {
    /// Creates an assignment without a role.
    pub fn new(task_id: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            resource_id: resource_id.into(),
            role: None,
        }
    }

    /// Sets the role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Result of [`ProjectSnapshot::update_task_progress`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    /// Updated task.
    pub task_id: String,
    /// Progress before the update.
    pub old_progress: f64,
    /// Progress after the update.
    pub new_progress: f64,
    /// Recomputed weighted progress of the owning project, if the project
    /// is part of the snapshot.
    pub project_progress: Option<f64>,
}

/// Everything the engine reads, loaded up front by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    /// Projects.
    pub projects: Vec<Project>,
    /// Tasks across all projects.
    pub tasks: Vec<Task>,
    /// All resources, active or not.
    pub resources: Vec<Resource>,
    /// Multi-assign links.
    pub assignments: Vec<TaskAssignment>,
}

impl ProjectSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a project.
    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    /// Adds a task.
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Adds a resource.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Adds a multi-assign link.
    pub fn with_assignment(mut self, assignment: TaskAssignment) -> Self {
        self.assignments.push(assignment);
        self
    }

    /// Looks up a project.
    pub fn project(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }

    /// Looks up a task.
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Looks up a resource.
    pub fn resource(&self, resource_id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == resource_id)
    }

    /// Tasks belonging to a project, in snapshot order.
    pub fn project_tasks<'a>(&'a self, project_id: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| t.project_id == project_id)
    }

    /// Active resources, in snapshot order.
    pub fn active_resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter().filter(|r| r.active)
    }

    /// De-duplicated assignees of a task (primary and multi-assign).
    pub fn assignees<'a>(&'a self, task: &'a Task) -> BTreeSet<&'a str> {
        let mut ids: BTreeSet<&str> = self
            .assignments
            .iter()
            .filter(|a| a.task_id == task.id)
            .map(|a| a.resource_id.as_str())
            .collect();
        if let Some(primary) = task.assigned_resource.as_deref() {
            ids.insert(primary);
        }
        ids
    }

    /// Whether anyone is assigned to the task in either form.
    pub fn is_staffed(&self, task: &Task) -> bool {
        task.assigned_resource.is_some() || self.assignments.iter().any(|a| a.task_id == task.id)
    }

    /// Tasks assigned to a resource in either form, de-duplicated by task
    /// identity, in snapshot order.
    pub fn resource_tasks(&self, resource_id: &str) -> Vec<&Task> {
        let linked: BTreeSet<&str> = self
            .assignments
            .iter()
            .filter(|a| a.resource_id == resource_id)
            .map(|a| a.task_id.as_str())
            .collect();

        let mut seen = BTreeSet::new();
        self.tasks
            .iter()
            .filter(|t| {
                t.assigned_resource.as_deref() == Some(resource_id) || linked.contains(t.id.as_str())
            })
            .filter(|t| seen.insert(t.id.as_str()))
            .collect()
    }

    /// Number of unfinished tasks (progress < 100) held by a resource.
    pub fn open_task_count(&self, resource_id: &str) -> usize {
        self.resource_tasks(resource_id)
            .into_iter()
            .filter(|t| t.is_open())
            .count()
    }

    /// Sets a task's progress and recomputes the owning project's weighted
    /// progress from all of that project's tasks.
    ///
    /// # Errors
    /// `InvalidProgress` if `progress` is outside 0..=100 (or NaN),
    /// `TaskNotFound` if the task is not in the snapshot.
    pub fn update_task_progress(&mut self, task_id: &str, progress: f64) -> Result<ProgressUpdate> {
        if !(0.0..=100.0).contains(&progress) {
            return Err(EngineError::InvalidProgress {
                task_id: task_id.to_string(),
                value: progress,
            });
        }

        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| EngineError::TaskNotFound(task_id.to_string()))?;
        let old_progress = task.actual_progress;
        task.actual_progress = progress;
        let project_id = task.project_id.clone();

        let recomputed = aggregate_progress(self.project_tasks(&project_id));
        let project_progress = self
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .map(|p| {
                p.progress = recomputed;
                recomputed
            });

        tracing::info!(
            task_id,
            project_id = %project_id,
            old_progress,
            new_progress = progress,
            project_progress = ?project_progress,
            "progress updated from {old_progress}% to {progress}%"
        );

        Ok(ProgressUpdate {
            task_id: task_id.to_string(),
            old_progress,
            new_progress: progress,
            project_progress,
        })
    }
}
